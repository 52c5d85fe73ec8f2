//! Basic chat: create a conversation and send one message.
//!
//! The API key is read from the environment:
//!   CHATROUTES_API_KEY=your_key cargo run --example basic_chat

use chatroutes::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let client = ChatRoutesClient::from_env()?;

    let conversation = client
        .conversations()
        .create(&CreateConversationRequest::new("Basic Chat Example").model("gpt-5"))
        .await?;
    println!("Created conversation: {}", conversation.id);

    let reply = client
        .messages()
        .send(
            &conversation.id,
            &SendMessageRequest::new("What is quantum computing in one paragraph?")
                .model("gpt-5"),
        )
        .await?;

    println!("\nAssistant:\n{}", reply.message.content);
    println!(
        "\nModel: {}, tokens: {}",
        reply.model, reply.usage.total_tokens
    );
    Ok(())
}
