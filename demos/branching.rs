//! Branching: fork a conversation and continue on the new branch.
//!
//!   CHATROUTES_API_KEY=your_key cargo run --example branching

use chatroutes::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let client = ChatRoutesClient::from_env()?;

    let conversation = client
        .conversations()
        .create(&CreateConversationRequest::new("Branching Example").model("gpt-5"))
        .await?;

    let first = client
        .messages()
        .send(
            &conversation.id,
            &SendMessageRequest::new("What are the benefits of Rust?").model("gpt-5"),
        )
        .await?;

    let branch = client
        .branches()
        .fork(
            &conversation.id,
            &ForkConversationRequest::new(&first.message.id, "Alternative Discussion")
                .context_mode(ContextMode::Full),
        )
        .await?;
    println!("Created branch: {}", branch.id);

    for b in client.branches().list(&conversation.id).await? {
        println!(
            "  - {} ({}) - {} messages",
            b.title,
            if b.is_main { "main" } else { "branch" },
            b.message_count.unwrap_or(0)
        );
    }

    client
        .messages()
        .send(
            &conversation.id,
            &SendMessageRequest::new("Now explain the disadvantages of Rust")
                .model("gpt-5")
                .branch_id(&branch.id),
        )
        .await?;

    let tree = client.conversations().get_tree(&conversation.id).await?;
    println!(
        "Tree of '{}': {} nodes, {} branches, depth {}",
        tree.conversation.title,
        tree.metadata.total_nodes,
        tree.metadata.total_branches,
        tree.metadata.max_depth
    );

    match client.conversations().get("does-not-exist").await {
        Err(e) if e.kind() == Some(ErrorKind::NotFound) => println!("Missing conversation: {e}"),
        Err(e) => return Err(e.into()),
        Ok(_) => {}
    }
    Ok(())
}
