//! Resource facades: one method per endpoint.
//!
//! Each facade borrows the client, sends one request through the shared
//! executor and unwraps the response envelope. None of them holds state.

pub mod auth;
pub mod branches;
pub mod conversations;
pub mod messages;
pub mod prelude;

pub use auth::AuthApi;
pub use branches::BranchesApi;
pub use conversations::ConversationsApi;
pub use messages::MessagesApi;

const API_PREFIX: &str = "/api/v1";

/// Build an API path from literal parts and caller-supplied ids.
///
/// Odd positions (ids) are percent-encoded; even positions are used verbatim.
pub(crate) fn api_path(parts: &[&str]) -> String {
    let mut path = String::from(API_PREFIX);
    for (i, part) in parts.iter().enumerate() {
        path.push('/');
        if i % 2 == 1 {
            path.push_str(&crate::client::request::encode_segment(part));
        } else {
            path.push_str(part);
        }
    }
    path
}
