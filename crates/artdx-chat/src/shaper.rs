//! Builds the model request from the transcript.

use artdx_core::Role;

use crate::attachment::Attachment;
use crate::model::{Part, RequestTurn, TurnRole};
use crate::transcript::{strip_suggestion_footers, Transcript};

/// Converts transcript history plus the pending attachment into request turns.
#[derive(Debug, Default, Clone, Copy)]
pub struct MessageShaper;

impl MessageShaper {
    /// Shape `transcript` into an ordered request payload.
    ///
    /// Every entry is footer-stripped. User entries whose content equals
    /// `pending_user_text` carry the attachment as a second part when one is
    /// present. Nothing is reordered or dropped.
    pub fn shape(
        &self,
        transcript: &Transcript,
        pending_user_text: &str,
        attachment: Option<&Attachment>,
    ) -> Vec<RequestTurn> {
        let turns: Vec<RequestTurn> = transcript
            .messages()
            .iter()
            .map(|msg| {
                if msg.role == Role::User && msg.content == pending_user_text {
                    let mut parts = vec![Part::Text(pending_user_text.to_string())];
                    if let Some(att) = attachment {
                        parts.push(Part::InlineImage {
                            mime_type: att.mime_type().to_string(),
                            data: att.bytes().clone(),
                        });
                    }
                    RequestTurn {
                        role: TurnRole::User,
                        parts,
                    }
                } else {
                    RequestTurn::text(msg.role.into(), strip_suggestion_footers(&msg.content))
                }
            })
            .collect();

        tracing::debug!(
            turns = turns.len(),
            with_image = attachment.is_some(),
            "Shaped model request"
        );
        turns
    }
}
