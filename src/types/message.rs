//! Message and streaming payloads.
//!
//! The send and stream endpoints share one response shape: a single
//! assistant `message` with its `usage` and the `model` that produced it.
//! Older servers answered with a user/assistant pair and OpenAI-style delta
//! chunks; those are kept in [`crate::types::legacy`].

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
    System,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Server-side generation time in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_time: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub conversation_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<String>,
    pub role: MessageRole,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_count: Option<u64>,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MessageMetadata>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<String>,
}

impl SendMessageRequest {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn branch_id(mut self, branch_id: impl Into<String>) -> Self {
        self.branch_id = Some(branch_id.into());
        self
    }
}

/// Token counts reported by the server. Carried through, never computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendMessageResponse {
    pub message: Message,
    pub usage: Usage,
    pub model: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkType {
    Content,
    Complete,
    Error,
    #[serde(other)]
    Other,
}

/// One event of `POST /conversations/{id}/messages/stream`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamChunk {
    #[serde(rename = "type")]
    pub chunk_type: ChunkType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl StreamChunk {
    /// The completed response, if this is a `complete` chunk carrying
    /// message, usage and model.
    pub fn completion(&self) -> Option<SendMessageResponse> {
        if self.chunk_type != ChunkType::Complete {
            return None;
        }
        Some(SendMessageResponse {
            message: self.message.clone()?,
            usage: self.usage?,
            model: self.model.clone()?,
        })
    }
}

#[derive(Serialize)]
pub(crate) struct UpdateMessageRequest<'a> {
    pub content: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MessageData {
    pub message: Message,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MessageList {
    pub messages: Vec<Message>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn message() -> serde_json::Value {
        json!({
            "id": "m2",
            "conversationId": "c1",
            "role": "assistant",
            "content": "Hi",
            "createdAt": "2025-01-01T00:00:00Z",
            "metadata": {"model": "gpt-4o", "finishReason": "stop"}
        })
    }

    #[test]
    fn complete_chunk_yields_response() {
        let chunk: StreamChunk = serde_json::from_value(json!({
            "type": "complete",
            "message": message(),
            "usage": {"promptTokens": 3, "completionTokens": 1, "totalTokens": 4},
            "model": "gpt-4o"
        }))
        .unwrap();
        let done = chunk.completion().unwrap();
        assert_eq!(done.model, "gpt-4o");
        assert_eq!(done.usage.total_tokens, 4);
        assert_eq!(done.message.role, MessageRole::Assistant);
        assert_eq!(
            done.message.metadata.unwrap().finish_reason.as_deref(),
            Some("stop")
        );
    }

    #[test]
    fn content_and_partial_complete_chunks_yield_nothing() {
        let chunk: StreamChunk =
            serde_json::from_value(json!({"type": "content", "content": "He"})).unwrap();
        assert_eq!(chunk.content.as_deref(), Some("He"));
        assert!(chunk.completion().is_none());

        let chunk: StreamChunk =
            serde_json::from_value(json!({"type": "complete", "model": "gpt-4o"})).unwrap();
        assert!(chunk.completion().is_none());
    }

    #[test]
    fn unknown_chunk_type_is_tolerated() {
        let chunk: StreamChunk = serde_json::from_value(json!({"type": "ping"})).unwrap();
        assert_eq!(chunk.chunk_type, ChunkType::Other);
    }

    #[test]
    fn send_request_omits_unset_fields() {
        let req = SendMessageRequest::new("Hello").model("gpt-4o").max_tokens(64);
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"content": "Hello", "model": "gpt-4o", "maxTokens": 64})
        );
    }
}
