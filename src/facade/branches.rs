use super::api_path;
use crate::client::ChatRoutesClient;
use crate::types::branch::{BranchData, BranchList};
use crate::types::message::MessageList;
use crate::types::{
    Branch, CreateBranchRequest, ForkConversationRequest, Message, UpdateBranchRequest,
};
use crate::Result;
use serde_json::Value;

/// Branch endpoints under `/conversations/{id}`.
pub struct BranchesApi<'a> {
    client: &'a ChatRoutesClient,
}

impl<'a> BranchesApi<'a> {
    pub(crate) fn new(client: &'a ChatRoutesClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, conversation_id: &str) -> Result<Vec<Branch>> {
        let data = self
            .client
            .get::<BranchList>(&api_path(&["conversations", conversation_id, "branches"]), &[])
            .await?
            .into_data("Failed to list branches")?;
        Ok(data.branches)
    }

    pub async fn create(
        &self,
        conversation_id: &str,
        request: &CreateBranchRequest,
    ) -> Result<Branch> {
        let data = self
            .client
            .post::<BranchData, _>(
                &api_path(&["conversations", conversation_id, "branches"]),
                Some(request),
            )
            .await?
            .into_data("Failed to create branch")?;
        Ok(data.branch)
    }

    /// Start a new branch at an existing message.
    pub async fn fork(
        &self,
        conversation_id: &str,
        request: &ForkConversationRequest,
    ) -> Result<Branch> {
        let data = self
            .client
            .post::<BranchData, _>(
                &api_path(&["conversations", conversation_id, "fork"]),
                Some(request),
            )
            .await?
            .into_data("Failed to fork conversation")?;
        Ok(data.branch)
    }

    pub async fn update(
        &self,
        conversation_id: &str,
        branch_id: &str,
        request: &UpdateBranchRequest,
    ) -> Result<Branch> {
        let data = self
            .client
            .patch::<BranchData, _>(
                &api_path(&["conversations", conversation_id, "branches", branch_id]),
                request,
            )
            .await?
            .into_data("Failed to update branch")?;
        Ok(data.branch)
    }

    pub async fn delete(&self, conversation_id: &str, branch_id: &str) -> Result<()> {
        self.client
            .delete::<Value>(&api_path(&[
                "conversations",
                conversation_id,
                "branches",
                branch_id,
            ]))
            .await?
            .into_unit("Failed to delete branch")
    }

    pub async fn messages(&self, conversation_id: &str, branch_id: &str) -> Result<Vec<Message>> {
        let path = api_path(&[
            "conversations",
            conversation_id,
            "branches",
            branch_id,
            "messages",
        ]);
        let data = self
            .client
            .get::<MessageList>(&path, &[])
            .await?
            .into_data("Failed to get branch messages")?;
        Ok(data.messages)
    }
}
