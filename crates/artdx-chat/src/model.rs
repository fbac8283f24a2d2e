//! Boundary to the hosted language model.
//!
//! The core hands an ordered list of role-tagged turns plus a system
//! instruction to a [`ModelClient`] and gets one text answer back. Wire
//! formats belong to the implementations.

use std::sync::Arc;

use artdx_core::Role;
use async_trait::async_trait;

/// Speaker of a request turn, in the vocabulary model backends expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnRole {
    User,
    Model,
}

impl From<Role> for TurnRole {
    fn from(role: Role) -> Self {
        match role {
            Role::User => TurnRole::User,
            Role::Assistant => TurnRole::Model,
        }
    }
}

/// One piece of a request turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    Text(String),
    /// Raw image bytes forwarded untouched.
    InlineImage { mime_type: String, data: Arc<[u8]> },
}

/// A single turn of the request payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTurn {
    pub role: TurnRole,
    pub parts: Vec<Part>,
}

impl RequestTurn {
    pub fn text(role: TurnRole, text: impl Into<String>) -> Self {
        Self {
            role,
            parts: vec![Part::Text(text.into())],
        }
    }

    /// Whether any part of this turn carries an image.
    pub fn has_image(&self) -> bool {
        self.parts
            .iter()
            .any(|p| matches!(p, Part::InlineImage { .. }))
    }
}

/// Failure raised by a model backend.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ModelError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("parse error: {0}")]
    Parse(String),
    #[error("model returned no text")]
    EmptyResponse,
    #[error("{0}")]
    Other(String),
}

/// A language model that can answer a conversation.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Generate the next assistant answer for `turns`.
    async fn generate(
        &self,
        system_instruction: &str,
        turns: &[RequestTurn],
    ) -> Result<String, ModelError>;
}
