//! The artwork image bound to the current conversation.
//!
//! A session holds at most one attachment. Uploading a different artwork
//! starts a new analysis, so replacing the attachment also clears the
//! transcript.

use std::path::Path;
use std::sync::Arc;

use uuid::Uuid;

use crate::error::ChatError;
use crate::transcript::Transcript;

/// An uploaded PNG or JPEG image.
///
/// Identity is the upload `handle`, not the bytes: uploading the same file
/// twice yields two distinct attachments.
#[derive(Debug, Clone)]
pub struct Attachment {
    handle: Uuid,
    name: String,
    mime_type: String,
    bytes: Arc<[u8]>,
}

impl Attachment {
    /// Ingest an upload from its declared MIME type and raw bytes.
    pub fn new(
        name: impl Into<String>,
        mime_type: &str,
        bytes: Vec<u8>,
    ) -> Result<Self, ChatError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ChatError::AttachmentError("file name is empty".to_string()));
        }
        let mime_type = normalize_mime(mime_type)?;
        if bytes.is_empty() {
            return Err(ChatError::EmptyAttachment);
        }
        Ok(Self {
            handle: Uuid::new_v4(),
            name,
            mime_type,
            bytes: Arc::from(bytes),
        })
    }

    /// Read an image from disk, deriving the MIME type from its extension.
    pub fn from_path(path: &Path) -> Result<Self, ChatError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        let mime = match ext.as_str() {
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            other => return Err(ChatError::UnsupportedMediaType(format!(".{}", other))),
        };
        let bytes = std::fs::read(path)
            .map_err(|e| ChatError::AttachmentError(format!("{}: {}", path.display(), e)))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::new(name, mime, bytes)
    }

    pub fn handle(&self) -> Uuid {
        self.handle
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn bytes(&self) -> &Arc<[u8]> {
        &self.bytes
    }

    /// Whether `other` comes from the same upload.
    pub fn same_upload(&self, other: &Attachment) -> bool {
        self.handle == other.handle
    }
}

fn normalize_mime(mime_type: &str) -> Result<String, ChatError> {
    match mime_type.trim().to_ascii_lowercase().as_str() {
        "image/png" => Ok("image/png".to_string()),
        "image/jpeg" | "image/jpg" => Ok("image/jpeg".to_string()),
        _ => Err(ChatError::UnsupportedMediaType(mime_type.to_string())),
    }
}

/// Holds the session's single pending attachment.
#[derive(Debug, Default)]
pub struct AttachmentHolder {
    current: Option<Attachment>,
}

impl AttachmentHolder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `attachment` to the session.
    ///
    /// A different upload replaces the current one and resets `transcript`.
    /// Re-setting the same upload changes nothing. Returns whether the
    /// attachment was new.
    pub fn set(&mut self, attachment: Attachment, transcript: &mut Transcript) -> bool {
        if !self.is_new(&attachment) {
            return false;
        }
        tracing::info!(
            name = %attachment.name,
            mime_type = %attachment.mime_type,
            bytes = attachment.bytes.len(),
            "New artwork attached, conversation reset"
        );
        transcript.reset();
        self.current = Some(attachment);
        true
    }

    pub fn get(&self) -> Option<&Attachment> {
        self.current.as_ref()
    }

    /// Whether `attachment` differs from the one currently held.
    pub fn is_new(&self, attachment: &Attachment) -> bool {
        self.current
            .as_ref()
            .map_or(true, |current| !current.same_upload(attachment))
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}
