//! Streaming chat: print the reply as it arrives.
//!
//!   CHATROUTES_API_KEY=your_key cargo run --example streaming_chat

use chatroutes::prelude::*;
use chatroutes::types::ChunkType;
use std::io::Write;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let client = ChatRoutesClient::from_env()?;
    let conversation = client
        .conversations()
        .create(&CreateConversationRequest::new("Streaming Chat Example").model("gpt-5"))
        .await?;

    print!("Assistant: ");
    client
        .messages()
        .stream_with_completion(
            &conversation.id,
            &SendMessageRequest::new("Write a short poem about artificial intelligence")
                .model("gpt-5"),
            |chunk| {
                if chunk.chunk_type == ChunkType::Content {
                    if let Some(text) = &chunk.content {
                        print!("{text}");
                        let _ = std::io::stdout().flush();
                    }
                }
            },
            |done| {
                println!("\n\nTotal tokens: {}", done.usage.total_tokens);
                println!("Model: {}", done.model);
            },
        )
        .await?;

    Ok(())
}
