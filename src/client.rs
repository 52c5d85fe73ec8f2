//! ChatRoutes client.
//!
//! Keep the public surface small: a builder, the client, and the request
//! executor. Implementation details are split into submodules under
//! `src/client/`.

pub mod builder;
pub mod config;
pub mod core;
pub mod error_classification;
mod execution;
pub mod policy;
pub mod request;

pub use builder::ChatRoutesClientBuilder;
pub use config::ClientConfig;
pub use core::ChatRoutesClient;
pub use error_classification::classify;
pub use policy::{execute_with_retry, RetryPolicy};
pub use request::ApiRequest;
