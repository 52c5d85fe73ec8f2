//! Wire types for the ChatRoutes API.

pub mod auth;
pub mod branch;
pub mod conversation;
pub mod envelope;
pub mod legacy;
pub mod message;

pub use auth::{AuthSession, AuthTokens, LoginRequest, RegisterRequest, User};
pub use branch::{
    Branch, ContextMode, CreateBranchRequest, ForkConversationRequest, UpdateBranchRequest,
};
pub use conversation::{
    BranchInfo, Conversation, ConversationFilter, ConversationTree, CreateConversationRequest,
    ListConversationsParams, PaginatedResponse, TreeMetadata, TreeNode, UpdateConversationRequest,
};
pub use envelope::ApiResponse;
pub use message::{
    ChunkType, Message, MessageMetadata, MessageRole, SendMessageRequest, SendMessageResponse,
    StreamChunk, Usage,
};
