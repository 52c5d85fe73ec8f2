//! Response shapes used by earlier versions of the API.
//!
//! Current servers do not emit these. They are provided for callers talking
//! to an older deployment through [`crate::ChatRoutesClient::execute`] or
//! [`crate::ChatRoutesClient::open_stream`] directly.

use super::message::Message;
use serde::{Deserialize, Serialize};

/// `send` response carrying both sides of the exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePair {
    pub user_message: Message,
    pub assistant_message: Message,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeltaChoice {
    pub delta: Delta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
    pub index: u32,
}

/// OpenAI-style incremental chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeltaChunk {
    pub id: String,
    pub model: String,
    pub choices: Vec<DeltaChoice>,
    pub created: i64,
}

impl DeltaChunk {
    /// Concatenated content of all choices in this chunk.
    pub fn text(&self) -> String {
        self.choices
            .iter()
            .filter_map(|c| c.delta.content.as_deref())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::{EventDecoder, Frame};

    #[test]
    fn delta_chunks_decode_through_the_stream_decoder() {
        let mut d = EventDecoder::<DeltaChunk>::new();
        let frames = d.push(
            b"data: {\"id\":\"x\",\"model\":\"m\",\"created\":1,\"choices\":[{\"index\":0,\"delta\":{\"content\":\"Hel\"}}]}\n\
              data: {\"id\":\"x\",\"model\":\"m\",\"created\":1,\"choices\":[{\"index\":0,\"delta\":{\"content\":\"lo\"},\"finish_reason\":\"stop\"}]}\n\
              data: [DONE]\n",
        );
        let text: String = frames
            .iter()
            .filter_map(|f| match f {
                Frame::Event(c) => Some(c.text()),
                Frame::Done => None,
            })
            .collect();
        assert_eq!(text, "Hello");
        assert_eq!(frames.last(), Some(&Frame::Done));
    }
}
