use super::api_path;
use crate::client::ChatRoutesClient;
use crate::types::conversation::{ConversationData, ConversationPage};
use crate::types::{
    Conversation, ConversationTree, CreateConversationRequest, ListConversationsParams,
    PaginatedResponse, UpdateConversationRequest,
};
use crate::Result;
use serde_json::Value;

/// `/conversations` endpoints.
pub struct ConversationsApi<'a> {
    client: &'a ChatRoutesClient,
}

impl<'a> ConversationsApi<'a> {
    pub(crate) fn new(client: &'a ChatRoutesClient) -> Self {
        Self { client }
    }

    pub async fn create(&self, request: &CreateConversationRequest) -> Result<Conversation> {
        let data = self
            .client
            .post::<ConversationData, _>(&api_path(&["conversations"]), Some(request))
            .await?
            .into_data("Failed to create conversation")?;
        Ok(data.conversation)
    }

    pub async fn list(
        &self,
        params: &ListConversationsParams,
    ) -> Result<PaginatedResponse<Conversation>> {
        let page = self
            .client
            .get::<ConversationPage>(&api_path(&["conversations"]), &params.to_query())
            .await?
            .into_data("Failed to list conversations")?;
        Ok(page.into())
    }

    pub async fn get(&self, conversation_id: &str) -> Result<Conversation> {
        let data = self
            .client
            .get::<ConversationData>(&api_path(&["conversations", conversation_id]), &[])
            .await?
            .into_data("Failed to get conversation")?;
        Ok(data.conversation)
    }

    pub async fn update(
        &self,
        conversation_id: &str,
        request: &UpdateConversationRequest,
    ) -> Result<Conversation> {
        let data = self
            .client
            .patch::<ConversationData, _>(&api_path(&["conversations", conversation_id]), request)
            .await?
            .into_data("Failed to update conversation")?;
        Ok(data.conversation)
    }

    pub async fn delete(&self, conversation_id: &str) -> Result<()> {
        self.client
            .delete::<Value>(&api_path(&["conversations", conversation_id]))
            .await?
            .into_unit("Failed to delete conversation")
    }

    /// The conversation with its message tree and tree statistics.
    pub async fn get_tree(&self, conversation_id: &str) -> Result<ConversationTree> {
        self.client
            .get::<ConversationTree>(&api_path(&["conversations", conversation_id, "tree"]), &[])
            .await?
            .into_data("Failed to get conversation tree")
    }
}
