//! Request and response bodies for `models/{model}:generateContent`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use artdx_chat::{ModelError, Part, RequestTurn, TurnRole};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
pub(crate) struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<&'static str>,
    pub parts: Vec<WirePart>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WirePart {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct GenerationConfig {
    pub temperature: f32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CandidatePart {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

/// Error envelope Google returns alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: String,
}

fn wire_role(role: TurnRole) -> &'static str {
    match role {
        TurnRole::User => "user",
        TurnRole::Model => "model",
    }
}

fn wire_part(part: &Part) -> WirePart {
    match part {
        Part::Text(text) => WirePart {
            text: Some(text.clone()),
            inline_data: None,
        },
        Part::InlineImage { mime_type, data } => WirePart {
            text: None,
            inline_data: Some(InlineData {
                mime_type: mime_type.clone(),
                data: STANDARD.encode(data),
            }),
        },
    }
}

pub(crate) fn build_request(
    system_instruction: &str,
    turns: &[RequestTurn],
    temperature: f32,
) -> GenerateRequest {
    let system_instruction = if system_instruction.trim().is_empty() {
        None
    } else {
        Some(Content {
            role: None,
            parts: vec![WirePart {
                text: Some(system_instruction.to_string()),
                inline_data: None,
            }],
        })
    };

    let contents = turns
        .iter()
        .map(|turn| Content {
            role: Some(wire_role(turn.role)),
            parts: turn.parts.iter().map(wire_part).collect(),
        })
        .collect();

    GenerateRequest {
        system_instruction,
        contents,
        generation_config: GenerationConfig { temperature },
    }
}

/// Concatenate the text parts of the first candidate.
pub(crate) fn extract_text(response: GenerateResponse) -> Result<String, ModelError> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(ModelError::Api {
                status: 200,
                message: format!("prompt blocked: {reason}"),
            });
        }
        return Err(ModelError::EmptyResponse);
    };

    let text: String = candidate
        .content
        .map(|c| c.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|p| p.text)
        .collect();

    if text.trim().is_empty() {
        return Err(ModelError::EmptyResponse);
    }
    Ok(text)
}

/// Pull the human-readable message out of an error body, falling back to the
/// raw text.
pub(crate) fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) if !envelope.error.message.is_empty() => envelope.error.message,
        _ => body.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn turns() -> Vec<RequestTurn> {
        vec![
            RequestTurn {
                role: TurnRole::Model,
                parts: vec![Part::Text("Welcome".to_string())],
            },
            RequestTurn {
                role: TurnRole::User,
                parts: vec![
                    Part::Text("What style is this?".to_string()),
                    Part::InlineImage {
                        mime_type: "image/png".to_string(),
                        data: Arc::from(&b"abc"[..]),
                    },
                ],
            },
        ]
    }

    // ---- Request body ----

    #[test]
    fn test_request_body_shape() {
        let req = build_request("Be an art critic.", &turns(), 0.3);
        let json = serde_json::to_value(&req).unwrap();

        assert_eq!(
            json["systemInstruction"]["parts"][0]["text"],
            "Be an art critic."
        );
        assert!(json["systemInstruction"].get("role").is_none());
        assert_eq!(json["contents"][0]["role"], "model");
        assert_eq!(json["contents"][1]["role"], "user");
        assert_eq!(json["contents"][1]["parts"][0]["text"], "What style is this?");
        assert_eq!(
            json["contents"][1]["parts"][1]["inlineData"]["mimeType"],
            "image/png"
        );
        assert_eq!(json["contents"][1]["parts"][1]["inlineData"]["data"], "YWJj");
        assert!(json["contents"][1]["parts"][1].get("text").is_none());
        assert!(json["generationConfig"]["temperature"].is_number());
    }

    #[test]
    fn test_blank_system_instruction_omitted() {
        let req = build_request("  ", &turns(), 0.3);
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("systemInstruction").is_none());
    }

    // ---- Response parsing ----

    fn parse(body: &str) -> GenerateResponse {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_extract_concatenates_parts() {
        let resp = parse(
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Baroque, "},{"text":"circa 1650."}]}}]}"#,
        );
        assert_eq!(extract_text(resp).unwrap(), "Baroque, circa 1650.");
    }

    #[test]
    fn test_extract_empty_candidates() {
        let resp = parse(r#"{"candidates":[]}"#);
        assert!(matches!(extract_text(resp), Err(ModelError::EmptyResponse)));
    }

    #[test]
    fn test_extract_blocked_prompt() {
        let resp = parse(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#);
        match extract_text(resp) {
            Err(ModelError::Api { message, .. }) => assert!(message.contains("SAFETY")),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_extract_candidate_without_text() {
        let resp = parse(r#"{"candidates":[{"finishReason":"MAX_TOKENS"}]}"#);
        assert!(matches!(extract_text(resp), Err(ModelError::EmptyResponse)));
    }

    #[test]
    fn test_error_message() {
        let body = r#"{"error":{"code":400,"message":"API key not valid.","status":"INVALID_ARGUMENT"}}"#;
        assert_eq!(error_message(body), "API key not valid.");
        assert_eq!(error_message("  Bad Gateway \n"), "Bad Gateway");
    }
}
