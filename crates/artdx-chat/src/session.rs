//! Per-session conversation context.
//!
//! [`ArtSession`] owns every piece of mutable state for one user (transcript,
//! attachment, language, suggestion chips, lifecycle state) and drives a
//! turn from raw input to a display-ready answer. One session per user; no
//! state is shared between sessions.

use std::sync::Arc;

use artdx_core::config::ChatConfig;
use artdx_core::{Language, Message, Role};

use crate::annotate::TextAnnotator;
use crate::attachment::{Attachment, AttachmentHolder};
use crate::classify::{FailureClassifier, KeywordFailureClassifier};
use crate::error::ChatError;
use crate::language::{KeywordLanguageDetector, LanguageClassifier};
use crate::model::ModelClient;
use crate::reconcile::ResponseReconciler;
use crate::state::{SessionState, SessionStateMachine};
use crate::suggestions::{FollowUpSuggestions, SuggestionStrategy};
use crate::templates;
use crate::transcript::{strip_suggestion_footers, Transcript};

/// A transcript entry ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayMessage {
    pub role: Role,
    pub text: String,
}

/// Everything the front-end needs after a turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    /// Assistant text as stored in the transcript.
    pub answer: String,
    /// `answer` with footers stripped and markup applied.
    pub display: String,
    pub language: Language,
    pub suggestions: Vec<String>,
    pub model_called: bool,
    pub failed: bool,
}

/// State and collaborators of one conversation.
pub struct ArtSession {
    config: ChatConfig,
    transcript: Transcript,
    attachments: AttachmentHolder,
    language: Language,
    suggestions: Vec<String>,
    state: SessionStateMachine,
    classifier: Box<dyn LanguageClassifier>,
    reconciler: ResponseReconciler,
    suggester: Box<dyn SuggestionStrategy>,
    informational: Box<dyn FailureClassifier>,
    annotator: TextAnnotator,
}

impl ArtSession {
    /// Create a session backed by `client`.
    pub fn new(config: ChatConfig, client: Arc<dyn ModelClient>) -> Self {
        let reconciler = ResponseReconciler::new(client, config.override_keywords.clone());
        Self {
            config,
            transcript: Transcript::new(),
            attachments: AttachmentHolder::new(),
            language: Language::default(),
            suggestions: Vec::new(),
            state: SessionStateMachine::new(),
            classifier: Box::new(KeywordLanguageDetector),
            reconciler,
            suggester: Box::new(FollowUpSuggestions),
            informational: Box::new(KeywordFailureClassifier::non_informational()),
            annotator: TextAnnotator::new(),
        }
    }

    pub fn with_language_classifier(mut self, classifier: Box<dyn LanguageClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_suggestion_strategy(mut self, strategy: Box<dyn SuggestionStrategy>) -> Self {
        self.suggester = strategy;
        self
    }

    /// Replace the classifier deciding whether an answer earns suggestions.
    pub fn with_failure_classifier(mut self, classifier: Box<dyn FailureClassifier>) -> Self {
        self.informational = classifier;
        self
    }

    /// Bind an uploaded artwork.
    ///
    /// A different upload clears the transcript and suggestions. Returns
    /// whether the upload was new.
    pub fn upload(&mut self, attachment: Attachment) -> Result<bool, ChatError> {
        self.recover_dropped_turn()?;
        if !self.attachments.is_new(&attachment) {
            return Ok(false);
        }
        self.state.ready_for_input()?;
        self.state.transition(SessionState::NewUpload)?;
        self.attachments.set(attachment, &mut self.transcript);
        self.suggestions.clear();
        self.state.transition(SessionState::AwaitingInput)?;
        Ok(true)
    }

    /// Run one conversation turn for `text`.
    ///
    /// Model failures do not surface as errors: they become the assistant
    /// message of the turn. Errors are returned only for rejected input, in
    /// which case nothing is recorded.
    pub async fn handle_message(&mut self, text: &str) -> Result<TurnOutcome, ChatError> {
        if text.trim().is_empty() {
            tracing::warn!("Rejected empty message");
            return Err(ChatError::EmptyMessage);
        }
        if text.chars().count() > self.config.max_message_chars {
            tracing::warn!(
                limit = self.config.max_message_chars,
                "Rejected oversized message"
            );
            return Err(ChatError::MessageTooLong(self.config.max_message_chars));
        }

        self.recover_dropped_turn()?;
        self.state.ready_for_input()?;

        let answered_locally = self.reconciler.requires_upload(self.attachments.get(), text);
        let next = if answered_locally {
            SessionState::Reconciled
        } else {
            SessionState::ModelInvocation
        };
        let current = self.state.current();
        if !current.can_transition_to(&next) {
            return Err(ChatError::InvalidTransition {
                from: current,
                to: next,
            });
        }

        let language = self.classifier.classify(text);
        self.language = language;
        self.suggestions.clear();
        self.transcript.ensure_welcome();
        self.transcript.append(Message::user(text));

        if !answered_locally {
            self.state.transition(SessionState::ModelInvocation)?;
        }

        let attachment = self.attachments.get();
        let reply = self
            .reconciler
            .respond(&mut self.transcript, attachment, text, language)
            .await;
        self.state.transition(SessionState::Reconciled)?;

        if attachment.is_some() && !self.informational.is_failure(&reply.answer) {
            let mut chips = self.suggester.suggest(&reply.answer, language);
            chips.truncate(self.config.max_suggestions);
            self.suggestions = chips;
        }

        tracing::info!(
            %language,
            model_called = reply.model_called,
            failed = reply.failed,
            suggestions = self.suggestions.len(),
            "Turn reconciled"
        );

        Ok(TurnOutcome {
            display: self.format_for_display(&reply.answer),
            answer: reply.answer,
            language,
            suggestions: self.suggestions.clone(),
            model_called: reply.model_called,
            failed: reply.failed,
        })
    }

    /// Return the transcript as display text, injecting the welcome message
    /// into an empty transcript first.
    ///
    /// The welcome message already carries its own markup and is passed
    /// through as-is.
    pub fn render(&mut self) -> Vec<DisplayMessage> {
        self.transcript.ensure_welcome();
        self.transcript
            .messages()
            .iter()
            .enumerate()
            .map(|(i, msg)| DisplayMessage {
                role: msg.role,
                text: if i == 0 && msg.content == templates::WELCOME {
                    msg.content.clone()
                } else {
                    self.format_for_display(&msg.content)
                },
            })
            .collect()
    }

    /// Start over: empty transcript, no attachment, default language.
    pub fn reset(&mut self) -> Result<(), ChatError> {
        self.state.transition(SessionState::Reset)?;
        self.transcript.reset();
        self.attachments.clear();
        self.suggestions.clear();
        self.language = Language::default();
        self.state.transition(SessionState::AwaitingInput)?;
        tracing::info!("Session reset");
        Ok(())
    }

    /// The suggestion chip at `index`, to be fed back into
    /// [`handle_message`](Self::handle_message).
    pub fn suggestion(&self, index: usize) -> Option<String> {
        self.suggestions.get(index).cloned()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn attachment(&self) -> Option<&Attachment> {
        self.attachments.get()
    }

    /// Language of the most recent user message.
    pub fn language(&self) -> Language {
        self.language
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn state(&self) -> SessionState {
        self.state.current()
    }

    /// Status text to show while `text` is being answered, in its language.
    pub fn progress_text_for(&self, text: &str) -> &'static str {
        templates::progress(self.classifier.classify(text))
    }

    /// Undo a turn whose future was dropped while the model call was pending.
    ///
    /// The provisional user entry is removed so the transcript keeps
    /// alternating user/assistant pairs.
    fn recover_dropped_turn(&mut self) -> Result<(), ChatError> {
        if self.state.current() != SessionState::ModelInvocation {
            return Ok(());
        }
        if self.transcript.last().map(|m| m.role) == Some(Role::User) {
            self.transcript.pop_last();
        }
        tracing::warn!("Previous turn was dropped before the model answered");
        self.state.recover_interrupted()?;
        Ok(())
    }

    fn format_for_display(&self, content: &str) -> String {
        self.annotator.annotate(&strip_suggestion_footers(content))
    }
}

// =============================================================================
// Tests
// =============================================================================
