use super::api_path;
use crate::client::ChatRoutesClient;
use crate::error::ErrorContext;
use crate::types::message::{MessageData, MessageList, UpdateMessageRequest};
use crate::types::{Message, SendMessageRequest, SendMessageResponse, StreamChunk};
use crate::{Error, Result};
use serde_json::Value;

/// Message endpoints, including the streaming send.
pub struct MessagesApi<'a> {
    client: &'a ChatRoutesClient,
}

impl<'a> MessagesApi<'a> {
    pub(crate) fn new(client: &'a ChatRoutesClient) -> Self {
        Self { client }
    }

    /// Send a message and wait for the full assistant reply.
    pub async fn send(
        &self,
        conversation_id: &str,
        request: &SendMessageRequest,
    ) -> Result<SendMessageResponse> {
        let data = self
            .client
            .post::<Value, _>(
                &api_path(&["conversations", conversation_id, "messages"]),
                Some(request),
            )
            .await?
            .into_data("Failed to send message")?;

        if data.get("message").map_or(true, Value::is_null) {
            return Err(Error::response_with_context(
                "Invalid response format: missing message field",
                ErrorContext::new()
                    .with_field_path("data.message")
                    .with_source("response_envelope"),
            ));
        }
        Ok(serde_json::from_value(data)?)
    }

    /// Send a message and receive the reply incrementally.
    ///
    /// `on_chunk` sees every chunk in arrival order.
    pub async fn stream<C>(
        &self,
        conversation_id: &str,
        request: &SendMessageRequest,
        mut on_chunk: C,
    ) -> Result<()>
    where
        C: FnMut(&StreamChunk),
    {
        self.stream_chunks(conversation_id, request, |chunk| on_chunk(&chunk))
            .await
    }

    /// Like [`MessagesApi::stream`], and additionally calls `on_complete`
    /// once when a `complete` chunk carries the final message, usage and
    /// model, after `on_chunk` has seen that chunk.
    pub async fn stream_with_completion<C, D>(
        &self,
        conversation_id: &str,
        request: &SendMessageRequest,
        mut on_chunk: C,
        mut on_complete: D,
    ) -> Result<()>
    where
        C: FnMut(&StreamChunk),
        D: FnMut(SendMessageResponse),
    {
        self.stream_chunks(conversation_id, request, |chunk| {
            on_chunk(&chunk);
            if let Some(done) = chunk.completion() {
                on_complete(done);
            }
        })
        .await
    }

    async fn stream_chunks<F>(
        &self,
        conversation_id: &str,
        request: &SendMessageRequest,
        mut on_chunk: F,
    ) -> Result<()>
    where
        F: FnMut(StreamChunk),
    {
        let path = api_path(&["conversations", conversation_id, "messages", "stream"]);
        self.client
            .stream::<StreamChunk, _, _>(&path, request, |chunk| {
                on_chunk(chunk);
                Ok(())
            })
            .await
    }

    /// Messages of a conversation, optionally restricted to one branch.
    pub async fn list(&self, conversation_id: &str, branch_id: Option<&str>) -> Result<Vec<Message>> {
        let query: Vec<(&str, String)> = branch_id
            .map(|id| vec![("branchId", id.to_string())])
            .unwrap_or_default();
        let data = self
            .client
            .get::<MessageList>(&api_path(&["conversations", conversation_id, "messages"]), &query)
            .await?
            .into_data("Failed to list messages")?;
        Ok(data.messages)
    }

    pub async fn update(&self, message_id: &str, content: &str) -> Result<Message> {
        let data = self
            .client
            .patch::<MessageData, _>(
                &api_path(&["messages", message_id]),
                &UpdateMessageRequest { content },
            )
            .await?
            .into_data("Failed to update message")?;
        Ok(data.message)
    }

    pub async fn delete(&self, message_id: &str) -> Result<()> {
        self.client
            .delete::<Value>(&api_path(&["messages", message_id]))
            .await?
            .into_unit("Failed to delete message")
    }
}
