//! Mock HTTP server setup for integration tests

#![allow(dead_code)]

use chatroutes::{ChatRoutesClient, ChatRoutesClientBuilder};
use mockito::{Mock, Server, ServerGuard};
use std::time::Duration;

pub const API_KEY: &str = "test-key";

/// Test fixture that owns a mock server and a client pointed at it.
pub struct MockServerFixture {
    pub server: ServerGuard,
    pub base_url: String,
}

impl MockServerFixture {
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        let base_url = server.url();
        Self { server, base_url }
    }

    /// Builder pointed at the mock server, isolated from `CHATROUTES_*`
    /// variables, with a millisecond backoff so retry tests stay fast.
    pub fn builder(&self) -> ChatRoutesClientBuilder {
        ChatRoutesClientBuilder::new()
            .ignore_env(true)
            .api_key(API_KEY)
            .base_url(&self.base_url)
            .retry_delay(Duration::from_millis(1))
    }

    pub fn client(&self) -> ChatRoutesClient {
        self.builder().build().expect("client")
    }

    /// A JSON response on `method path`.
    pub async fn mock_json(&mut self, method: &str, path: &str, status: usize, body: &str) -> Mock {
        self.server
            .mock(method, path)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }

    /// An event-stream response on `POST path`, one `data:` line per event.
    pub async fn mock_stream(&mut self, path: &str, events: &[&str]) -> Mock {
        let body: String = events
            .iter()
            .map(|e| format!("data: {}\n\n", e))
            .collect();
        self.server
            .mock("POST", path)
            .with_status(200)
            .with_header("content-type", "text/event-stream")
            .with_body(body)
            .create_async()
            .await
    }
}

/// `{"success": true, "data": <data>}`
pub fn ok(data: serde_json::Value) -> String {
    serde_json::json!({ "success": true, "data": data }).to_string()
}

pub fn message_json(id: &str, role: &str, content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "conversationId": "c1",
        "role": role,
        "content": content,
        "createdAt": "2025-01-01T00:00:00Z"
    })
}

pub fn conversation_json(id: &str, title: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "userId": "u1",
        "title": title,
        "createdAt": "2025-01-01T00:00:00Z",
        "updatedAt": "2025-01-01T00:00:00Z"
    })
}

pub fn branch_json(id: &str, title: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "conversationId": "c1",
        "title": title,
        "isMain": false,
        "isActive": true,
        "createdAt": "2025-01-01T00:00:00Z"
    })
}
