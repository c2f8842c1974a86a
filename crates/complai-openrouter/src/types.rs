// SPDX-FileCopyrightText: 2026 Complai Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenRouter chat-completions request/response types.

use complai_core::ChatMessage;
use serde::{Deserialize, Serialize};

// --- Request types ---

/// A request to the chat-completions endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model identifier (e.g., "minimax/minimax-m2.5").
    pub model: String,

    /// Conversation messages, oldest first.
    pub messages: Vec<ApiMessage>,
}

/// A single message in the request.
#[derive(Debug, Clone, Serialize)]
pub struct ApiMessage {
    /// "system", "user", or "assistant".
    pub role: String,
    pub content: String,
}

impl From<&ChatMessage> for ApiMessage {
    fn from(message: &ChatMessage) -> Self {
        Self {
            role: message.role.to_string(),
            content: message.content.clone(),
        }
    }
}

// --- Response types ---

/// A chat-completions response. Only the fields we read are modelled;
/// everything else is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

/// One completion choice.
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    /// Chat-style message (OpenAI shape).
    #[serde(default)]
    pub message: Option<ResponseMessage>,

    /// Legacy completion text.
    #[serde(default)]
    pub text: Option<String>,
}

/// The assistant message inside a choice.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatResponse {
    /// Text of the first choice: `message.content`, falling back to `text`.
    pub fn first_text(&self) -> Option<&str> {
        let first = self.choices.first()?;
        first
            .message
            .as_ref()
            .and_then(|m| m.content.as_deref())
            .or(first.text.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_message_content() {
        let resp: ChatResponse = serde_json::from_str(
            r#"{"id":"gen-1","choices":[{"message":{"role":"assistant","content":"Hello"}}]}"#,
        )
        .unwrap();
        assert_eq!(resp.first_text(), Some("Hello"));
    }

    #[test]
    fn falls_back_to_legacy_text() {
        let resp: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"text":"legacy"}]}"#).unwrap();
        assert_eq!(resp.first_text(), Some("legacy"));
    }

    #[test]
    fn null_content_falls_back_to_text() {
        let resp: ChatResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"content":null},"text":"legacy"}]}"#,
        )
        .unwrap();
        assert_eq!(resp.first_text(), Some("legacy"));
    }

    #[test]
    fn empty_choices_yield_nothing() {
        let resp: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert_eq!(resp.first_text(), None);
        let resp: ChatResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(resp.first_text(), None);
    }

    #[test]
    fn request_serializes_roles_lowercase() {
        let req = ChatRequest {
            model: "m".into(),
            messages: vec![
                ApiMessage::from(&ChatMessage::system("s")),
                ApiMessage::from(&ChatMessage::user("u")),
            ],
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "u");
    }
}
