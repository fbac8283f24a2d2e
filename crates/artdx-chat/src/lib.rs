//! Conversation core for the art diagnostics assistant.
//!
//! Keeps the per-session transcript and attachment, shapes history into a
//! model request, reconciles the model's answer back into the transcript,
//! and formats text for display.

pub mod annotate;
pub mod attachment;
pub mod classify;
pub mod error;
pub mod language;
pub mod model;
pub mod reconcile;
pub mod session;
pub mod shaper;
pub mod state;
pub mod suggestions;
pub mod templates;
pub mod transcript;

pub use annotate::TextAnnotator;
pub use attachment::{Attachment, AttachmentHolder};
pub use classify::{FailureClassifier, KeywordFailureClassifier};
pub use error::ChatError;
pub use language::{detect, KeywordLanguageDetector, LanguageClassifier};
pub use model::{ModelClient, ModelError, Part, RequestTurn, TurnRole};
pub use reconcile::{Reply, ResponseReconciler};
pub use session::{ArtSession, DisplayMessage, TurnOutcome};
pub use shaper::MessageShaper;
pub use state::{SessionState, SessionStateMachine};
pub use suggestions::{FollowUpSuggestions, SuggestionStrategy};
pub use transcript::{strip_suggestion_footers, Transcript};
