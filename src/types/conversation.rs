use super::branch::Branch;
use super::message::Message;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<Message>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branches: Option<Vec<Branch>>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateConversationRequest {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl CreateConversationRequest {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            model: None,
        }
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

/// Partial update; unset fields are left unchanged on the server.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateConversationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationFilter {
    All,
    Owned,
    Shared,
}

impl ConversationFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Owned => "owned",
            Self::Shared => "shared",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListConversationsParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub filter: Option<ConversationFilter>,
}

impl ListConversationsParams {
    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut q = Vec::new();
        if let Some(page) = self.page {
            q.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            q.push(("limit", limit.to_string()));
        }
        if let Some(filter) = self.filter {
            q.push(("filter", filter.as_str().to_string()));
        }
        q
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_next: Option<bool>,
}

/// Payload of `GET /conversations`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ConversationPage {
    pub conversations: Vec<Conversation>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    #[serde(default)]
    pub has_next: Option<bool>,
}

impl From<ConversationPage> for PaginatedResponse<Conversation> {
    fn from(p: ConversationPage) -> Self {
        Self {
            data: p.conversations,
            total: p.total,
            page: p.page,
            limit: p.limit,
            has_next: p.has_next,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchInfo {
    pub branch_id: String,
    pub branch_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    pub id: String,
    pub content: String,
    pub role: String,
    #[serde(default)]
    pub children: Vec<TreeNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_info: Option<BranchInfo>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeMetadata {
    pub total_nodes: u64,
    pub total_branches: u64,
    pub max_depth: u64,
}

/// Conversation with its full message tree, as computed by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTree {
    pub conversation: Conversation,
    pub tree: TreeNode,
    pub metadata: TreeMetadata,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ConversationData {
    pub conversation: Conversation,
}
