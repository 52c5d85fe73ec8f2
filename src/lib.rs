//! # chatroutes
//!
//! ChatRoutes API 的 Rust 客户端：带分类错误与指数退避的请求执行器，以及流式事件读取。
//!
//! Rust client for the ChatRoutes conversational-AI API.
//!
//! ## Overview
//!
//! All traffic goes through one shared request layer:
//!
//! - **Executor**: every non-streaming call is classified into an
//!   [`ErrorKind`] and retried with exponential backoff when, and only when,
//!   the failure is transient (transport errors, HTTP >= 500).
//! - **Stream reader**: the streaming send endpoint is decoded incrementally
//!   into typed events, tolerating arbitrary chunk boundaries and skipping
//!   malformed fragments. Streams are never retried.
//!
//! Resource facades ([`facade`]) sit on top and map one method to one
//! endpoint.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatroutes::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> chatroutes::Result<()> {
//!     let client = ChatRoutesClient::new("your-api-key")?;
//!
//!     let conversation = client
//!         .conversations()
//!         .create(&CreateConversationRequest::new("Hello"))
//!         .await?;
//!
//!     let reply = client
//!         .messages()
//!         .send(&conversation.id, &SendMessageRequest::new("Hi there").model("gpt-5"))
//!         .await?;
//!     println!("{}", reply.message.content);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Client, builder, configuration and the retrying executor |
//! | [`stream`] | Incremental event decoding for streaming responses |
//! | [`facade`] | Auth, conversation, message and branch endpoints |
//! | [`types`] | Wire types and the response envelope |
//! | [`transport`] | HTTP transport |
//! | [`error`] | Error types |

pub mod client;
pub mod error;
pub mod error_code;
pub mod facade;
pub mod stream;
pub mod transport;
pub mod types;

pub use client::{ApiRequest, ChatRoutesClient, ChatRoutesClientBuilder, ClientConfig, RetryPolicy};
pub use error::{ApiError, Error, ErrorContext};
pub use error_code::ErrorKind;
pub use facade::prelude;
pub use stream::{EventStream, StreamState};
pub use types::ApiResponse;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;
