//! Resource facades: paths, bodies and envelope unwrapping.

mod support;

use chatroutes::prelude::*;
use chatroutes::types::{ChunkType, ConversationFilter, UpdateBranchRequest};
use mockito::Matcher;
use serde_json::json;
use support::{branch_json, conversation_json, message_json, ok, MockServerFixture};

#[tokio::test]
async fn login_skips_auth_and_returns_session() {
    let mut fx = MockServerFixture::new().await;
    let mock = fx
        .server
        .mock("POST", "/api/v1/auth/login")
        .match_header("authorization", Matcher::Missing)
        .match_body(Matcher::Json(json!({"email": "a@b.c", "password": "pw"})))
        .with_status(200)
        .with_body(ok(json!({
            "user": {"id": "u1", "email": "a@b.c"},
            "tokens": {"accessToken": "at", "refreshToken": "rt", "expiresIn": 3600}
        })))
        .create_async()
        .await;

    let session = fx
        .client()
        .auth()
        .login(&LoginRequest::new("a@b.c", "pw"))
        .await
        .unwrap();

    assert_eq!(session.user.id, "u1");
    assert_eq!(session.tokens.expires_in, 3600);
    mock.assert_async().await;
}

#[tokio::test]
async fn refresh_sends_camel_case_token() {
    let mut fx = MockServerFixture::new().await;
    let mock = fx
        .server
        .mock("POST", "/api/v1/auth/refresh")
        .match_body(Matcher::Json(json!({"refreshToken": "rt"})))
        .with_status(200)
        .with_body(ok(json!({"accessToken": "at2", "refreshToken": "rt2", "expiresIn": 60})))
        .create_async()
        .await;

    let tokens = fx.client().auth().refresh_token("rt").await.unwrap();
    assert_eq!(tokens.access_token, "at2");
    mock.assert_async().await;
}

#[tokio::test]
async fn me_without_data_uses_fallback_message() {
    let mut fx = MockServerFixture::new().await;
    let _m = fx
        .mock_json("GET", "/api/v1/auth/me", 200, r#"{"success":true}"#)
        .await;

    let err = fx.client().auth().me().await.unwrap_err();
    assert!(matches!(err, Error::Response { ref message, .. } if message == "Failed to get user info"));
}

#[tokio::test]
async fn create_conversation_unwraps_nested_payload() {
    let mut fx = MockServerFixture::new().await;
    let mock = fx
        .server
        .mock("POST", "/api/v1/conversations")
        .match_body(Matcher::Json(json!({"title": "Trip", "model": "gpt-5"})))
        .with_status(201)
        .with_body(ok(json!({"conversation": conversation_json("c1", "Trip")})))
        .create_async()
        .await;

    let conv = fx
        .client()
        .conversations()
        .create(&CreateConversationRequest::new("Trip").model("gpt-5"))
        .await
        .unwrap();
    assert_eq!(conv.id, "c1");
    assert_eq!(conv.title, "Trip");
    mock.assert_async().await;
}

#[tokio::test]
async fn list_conversations_maps_pagination() {
    let mut fx = MockServerFixture::new().await;
    let mock = fx
        .server
        .mock("GET", "/api/v1/conversations")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page".into(), "2".into()),
            Matcher::UrlEncoded("limit".into(), "10".into()),
            Matcher::UrlEncoded("filter".into(), "shared".into()),
        ]))
        .with_status(200)
        .with_body(ok(json!({
            "conversations": [conversation_json("c1", "A"), conversation_json("c2", "B")],
            "total": 12,
            "page": 2,
            "limit": 10,
            "hasNext": false
        })))
        .create_async()
        .await;

    let page = fx
        .client()
        .conversations()
        .list(&ListConversationsParams {
            page: Some(2),
            limit: Some(10),
            filter: Some(ConversationFilter::Shared),
        })
        .await
        .unwrap();

    assert_eq!(page.data.len(), 2);
    assert_eq!(page.total, 12);
    assert_eq!(page.has_next, Some(false));
    mock.assert_async().await;
}

#[tokio::test]
async fn ids_are_percent_encoded_in_paths() {
    let mut fx = MockServerFixture::new().await;
    let mock = fx
        .server
        .mock("DELETE", "/api/v1/conversations/a%2Fb")
        .with_status(200)
        .with_body(r#"{"success":true}"#)
        .create_async()
        .await;

    fx.client().conversations().delete("a/b").await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn failed_delete_prefers_server_message() {
    let mut fx = MockServerFixture::new().await;
    let _m = fx
        .mock_json(
            "DELETE",
            "/api/v1/messages/m1",
            200,
            r#"{"success":false,"message":"message is locked"}"#,
        )
        .await;

    let err = fx.client().messages().delete("m1").await.unwrap_err();
    assert!(err.to_string().contains("message is locked"));
}

#[tokio::test]
async fn send_message_returns_reply() {
    let mut fx = MockServerFixture::new().await;
    let _m = fx
        .mock_json(
            "POST",
            "/api/v1/conversations/c1/messages",
            200,
            &ok(json!({
                "message": message_json("m2", "assistant", "Hello!"),
                "usage": {"promptTokens": 5, "completionTokens": 2, "totalTokens": 7},
                "model": "gpt-5"
            })),
        )
        .await;

    let reply = fx
        .client()
        .messages()
        .send("c1", &SendMessageRequest::new("Hi"))
        .await
        .unwrap();
    assert_eq!(reply.message.content, "Hello!");
    assert_eq!(reply.usage.total_tokens, 7);
}

#[tokio::test]
async fn send_message_without_message_field_fails() {
    let mut fx = MockServerFixture::new().await;
    let _m = fx
        .mock_json(
            "POST",
            "/api/v1/conversations/c1/messages",
            200,
            &ok(json!({"model": "gpt-5"})),
        )
        .await;

    let err = fx
        .client()
        .messages()
        .send("c1", &SendMessageRequest::new("Hi"))
        .await
        .unwrap_err();
    assert!(err
        .to_string()
        .contains("Invalid response format: missing message field"));
}

#[tokio::test]
async fn stream_message_reports_chunks_and_completion() {
    let mut fx = MockServerFixture::new().await;
    let complete = json!({
        "type": "complete",
        "message": message_json("m2", "assistant", "Hello"),
        "usage": {"promptTokens": 1, "completionTokens": 1, "totalTokens": 2},
        "model": "gpt-5"
    })
    .to_string();
    let _m = fx
        .mock_stream(
            "/api/v1/conversations/c1/messages/stream",
            &[
                r#"{"type":"content","content":"Hel"}"#,
                r#"{"type":"content","content":"lo"}"#,
                complete.as_str(),
                "[DONE]",
            ],
        )
        .await;

    let mut text = String::new();
    let mut kinds = Vec::new();
    let mut completed = Vec::new();
    fx.client()
        .messages()
        .stream_with_completion(
            "c1",
            &SendMessageRequest::new("Hi"),
            |chunk| {
                kinds.push(chunk.chunk_type.clone());
                if let Some(c) = &chunk.content {
                    text.push_str(c);
                }
            },
            |done| completed.push(done),
        )
        .await
        .unwrap();

    assert_eq!(text, "Hello");
    assert_eq!(
        kinds,
        vec![ChunkType::Content, ChunkType::Content, ChunkType::Complete]
    );
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].model, "gpt-5");
}

#[tokio::test]
async fn stream_message_without_completion_handler() {
    let mut fx = MockServerFixture::new().await;
    let _m = fx
        .mock_stream(
            "/api/v1/conversations/c1/messages/stream",
            &[
                r#"{"type":"content","content":"Hi"}"#,
                r#"{"type":"complete","model":"gpt-5"}"#,
                "[DONE]",
            ],
        )
        .await;

    let mut chunks = 0;
    fx.client()
        .messages()
        .stream("c1", &SendMessageRequest::new("Hi"), |_| chunks += 1)
        .await
        .unwrap();
    assert_eq!(chunks, 2);
}

#[tokio::test]
async fn list_messages_filters_by_branch() {
    let mut fx = MockServerFixture::new().await;
    let mock = fx
        .server
        .mock("GET", "/api/v1/conversations/c1/messages")
        .match_query(Matcher::UrlEncoded("branchId".into(), "b1".into()))
        .with_status(200)
        .with_body(ok(json!({"messages": [message_json("m1", "user", "Hi")]})))
        .create_async()
        .await;

    let messages = fx.client().messages().list("c1", Some("b1")).await.unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].content, "Hi");
    mock.assert_async().await;
}

#[tokio::test]
async fn fork_and_update_branch() {
    let mut fx = MockServerFixture::new().await;
    let fork = fx
        .server
        .mock("POST", "/api/v1/conversations/c1/fork")
        .match_body(Matcher::Json(json!({
            "forkPointMessageId": "m1",
            "title": "Alt",
            "contextMode": "PARTIAL"
        })))
        .with_status(200)
        .with_body(ok(json!({"branch": branch_json("b2", "Alt")})))
        .create_async()
        .await;
    let update = fx
        .server
        .mock("PATCH", "/api/v1/conversations/c1/branches/b2")
        .match_body(Matcher::Json(json!({"title": "Renamed"})))
        .with_status(200)
        .with_body(ok(json!({"branch": branch_json("b2", "Renamed")})))
        .create_async()
        .await;

    let client = fx.client();
    let branch = client
        .branches()
        .fork(
            "c1",
            &ForkConversationRequest::new("m1", "Alt").context_mode(ContextMode::Partial),
        )
        .await
        .unwrap();
    assert_eq!(branch.id, "b2");
    assert!(branch.is_active);

    let renamed = client
        .branches()
        .update(
            "c1",
            "b2",
            &UpdateBranchRequest {
                title: Some("Renamed".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.title, "Renamed");

    fork.assert_async().await;
    update.assert_async().await;
}

#[tokio::test]
async fn branch_messages_and_tree() {
    let mut fx = MockServerFixture::new().await;
    let _msgs = fx
        .mock_json(
            "GET",
            "/api/v1/conversations/c1/branches/b1/messages",
            200,
            &ok(json!({"messages": [message_json("m1", "user", "Hi")]})),
        )
        .await;
    let _tree = fx
        .mock_json(
            "GET",
            "/api/v1/conversations/c1/tree",
            200,
            &ok(json!({
                "conversation": conversation_json("c1", "T"),
                "tree": {
                    "id": "m1", "content": "Hi", "role": "user",
                    "children": [{"id": "m2", "content": "Hello", "role": "assistant", "children": [],
                                  "branchInfo": {"branchId": "b1", "branchName": "main"}}]
                },
                "metadata": {"totalNodes": 2, "totalBranches": 1, "maxDepth": 2}
            })),
        )
        .await;

    let client = fx.client();
    let messages = client.branches().messages("c1", "b1").await.unwrap();
    assert_eq!(messages[0].id, "m1");

    let tree = client.conversations().get_tree("c1").await.unwrap();
    assert_eq!(tree.metadata.total_nodes, 2);
    assert_eq!(
        tree.tree.children[0].branch_info.as_ref().map(|b| b.branch_id.as_str()),
        Some("b1")
    );
}
