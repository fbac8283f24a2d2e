//! Error types for the conversation core.

use artdx_core::error::ArtdxError;

use crate::state::SessionState;

/// Errors from the conversation core.
///
/// Model failures are not represented here: they are caught during
/// reconciliation and turned into an assistant message.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("message cannot be empty")]
    EmptyMessage,
    #[error("message exceeds maximum length of {0} characters")]
    MessageTooLong(usize),
    #[error("unsupported image type: {0} (expected PNG or JPEG)")]
    UnsupportedMediaType(String),
    #[error("image file is empty")]
    EmptyAttachment,
    #[error("attachment error: {0}")]
    AttachmentError(String),
    #[error("invalid session transition: {from} -> {to}")]
    InvalidTransition { from: SessionState, to: SessionState },
}

impl From<ChatError> for ArtdxError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::UnsupportedMediaType(_)
            | ChatError::EmptyAttachment
            | ChatError::AttachmentError(_) => ArtdxError::Attachment(err.to_string()),
            ChatError::EmptyMessage | ChatError::MessageTooLong(_) => {
                ArtdxError::InvalidInput(err.to_string())
            }
            ChatError::InvalidTransition { .. } => ArtdxError::Session(err.to_string()),
        }
    }
}
