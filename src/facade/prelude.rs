//! Convenience re-exports for application code.
//!
//! ```no_run
//! use chatroutes::prelude::*;
//! ```

pub use crate::client::{ChatRoutesClient, ChatRoutesClientBuilder};
pub use crate::error::{ApiError, Error};
pub use crate::error_code::ErrorKind;
pub use crate::types::{
    ContextMode, CreateBranchRequest, CreateConversationRequest, ForkConversationRequest,
    ListConversationsParams, LoginRequest, RegisterRequest, SendMessageRequest,
    SendMessageResponse, StreamChunk,
};
pub use crate::Result;
