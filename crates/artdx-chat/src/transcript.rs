//! Conversation transcript.
//!
//! An ordered list of role-tagged messages for one session. Role alternation
//! is not enforced: the welcome message and a templated reply may sit next
//! to each other.

use std::sync::LazyLock;

use artdx_core::Message;
use regex::Regex;

use crate::templates;

// Leftmost delimiter wins and the match runs to end of string, so a single
// pass leaves no footer behind.
static SUGGESTION_FOOTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\n\n---\n\*\*(?:Saran|Suggestion).*?:.*\z")
        .expect("Invalid suggestion footer regex")
});

/// Remove a trailing suggestion-list footer (Indonesian `**Saran...:` or
/// English `**Suggestion...:`) so stale chips never reach the model.
pub fn strip_suggestion_footers(text: &str) -> String {
    SUGGESTION_FOOTER.replace(text, "").into_owned()
}

/// Ordered message history of a single session.
#[derive(Debug, Default, Clone)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Remove and return the most recent message, or `None` when empty.
    pub fn pop_last(&mut self) -> Option<Message> {
        self.messages.pop()
    }

    pub fn reset(&mut self) {
        self.messages.clear();
    }

    /// Inject the welcome message into an empty transcript.
    ///
    /// Returns `true` if the message was added.
    pub fn ensure_welcome(&mut self) -> bool {
        if !self.messages.is_empty() {
            return false;
        }
        self.messages.push(Message::assistant(templates::WELCOME));
        true
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
