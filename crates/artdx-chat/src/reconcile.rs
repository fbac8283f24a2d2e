//! Model invocation and transcript write-back.
//!
//! The caller appends the user turn before reconciling. After the model
//! returns (or fails), that provisional turn is popped and re-appended
//! together with the assistant turn so the transcript always ends in a clean
//! user/assistant pair, whatever was queued in between.

use std::sync::Arc;

use artdx_core::{Language, Message};

use crate::attachment::Attachment;
use crate::classify::{FailureClassifier, KeywordFailureClassifier};
use crate::model::ModelClient;
use crate::shaper::MessageShaper;
use crate::templates;
use crate::transcript::Transcript;

/// Result of reconciling one user turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Assistant text as stored in the transcript (no display markup).
    pub answer: String,
    /// Whether the model client was called.
    pub model_called: bool,
    /// Whether the model call raised.
    pub failed: bool,
}

/// Calls the model with the shaped history and writes the answer back.
pub struct ResponseReconciler {
    client: Arc<dyn ModelClient>,
    shaper: MessageShaper,
    apology: Box<dyn FailureClassifier>,
    override_keywords: Vec<String>,
}

impl ResponseReconciler {
    pub fn new(client: Arc<dyn ModelClient>, override_keywords: Vec<String>) -> Self {
        Self {
            client,
            shaper: MessageShaper,
            apology: Box::new(KeywordFailureClassifier::apology()),
            override_keywords: override_keywords
                .into_iter()
                .map(|k| k.to_lowercase())
                .collect(),
        }
    }

    /// Replace the classifier that decides whether an answer is an apology.
    pub fn with_apology_classifier(mut self, classifier: Box<dyn FailureClassifier>) -> Self {
        self.apology = classifier;
        self
    }

    /// Whether the turn must be answered with an upload request instead of
    /// a model call.
    pub fn requires_upload(&self, attachment: Option<&Attachment>, user_text: &str) -> bool {
        if attachment.is_some() {
            return false;
        }
        let lower = user_text.to_lowercase();
        !self
            .override_keywords
            .iter()
            .any(|k| lower.contains(k.as_str()))
    }

    /// Answer `user_text`, whose user turn is already the last transcript entry.
    pub async fn respond(
        &self,
        transcript: &mut Transcript,
        attachment: Option<&Attachment>,
        user_text: &str,
        language: Language,
    ) -> Reply {
        if self.requires_upload(attachment, user_text) {
            let answer = templates::upload_required(language).to_string();
            transcript.append(Message::assistant(answer.clone()));
            return Reply {
                answer,
                model_called: false,
                failed: false,
            };
        }

        let payload = self.shaper.shape(transcript, user_text, attachment);
        let (answer, failed) = match self
            .client
            .generate(templates::SYSTEM_INSTRUCTION, &payload)
            .await
        {
            Ok(raw) => (self.decorate(raw, attachment, language), false),
            Err(e) => {
                tracing::error!(error = %e, "LLM invocation failed");
                (templates::model_failure(language, &e.to_string()), true)
            }
        };

        // Load-bearing: restores a clean user/assistant tail.
        if transcript.pop_last().is_none() {
            tracing::warn!("Reconciling a turn with an empty transcript");
        }
        transcript.append(Message::user(user_text));
        transcript.append(Message::assistant(answer.clone()));

        Reply {
            answer,
            model_called: true,
            failed,
        }
    }

    fn decorate(&self, raw: String, attachment: Option<&Attachment>, language: Language) -> String {
        match attachment {
            Some(att) if !raw.contains(att.name()) && !self.apology.is_failure(&raw) => {
                templates::with_analysis_prefix(language, att.name(), &raw)
            }
            _ => raw,
        }
    }
}
