use serde::{Deserialize, Serialize};

/// How much parent context a branch inherits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ContextMode {
    Full,
    Partial,
    Minimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    pub id: String,
    pub conversation_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_branch_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fork_point_message_id: Option<String>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_mode: Option<ContextMode>,
    pub is_main: bool,
    pub is_active: bool,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_count: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBranchRequest {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_node_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_mode: Option<ContextMode>,
}

impl CreateBranchRequest {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            base_node_id: None,
            description: None,
            context_mode: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForkConversationRequest {
    pub fork_point_message_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_mode: Option<ContextMode>,
}

impl ForkConversationRequest {
    pub fn new(fork_point_message_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            fork_point_message_id: fork_point_message_id.into(),
            title: title.into(),
            context_mode: None,
        }
    }

    pub fn context_mode(mut self, mode: ContextMode) -> Self {
        self.context_mode = Some(mode);
        self
    }
}

/// Partial update; unset fields are left unchanged on the server.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBranchRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_mode: Option<ContextMode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BranchData {
    pub branch: Branch,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BranchList {
    pub branches: Vec<Branch>,
}
