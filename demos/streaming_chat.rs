//! Streaming chat with reasoning output and Ctrl-C pause
//!
//! Before running, set your API key:
//! ```bash
//! export DEEPSEEK_API_KEY="your-deepseek-key"
//! ```
//!
//! Run with:
//! ```bash
//! RUST_LOG=unichat=debug cargo run --example streaming-chat -- deepseek deepseek-reasoner "Why is the sky blue?"
//! ```

use std::io::{self, Write};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use unichat::prelude::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let provider = args.next().unwrap_or_else(|| "deepseek".to_string());
    let model_id = args.next().unwrap_or_else(|| "deepseek-reasoner".to_string());
    let question = args
        .next()
        .unwrap_or_else(|| "How many r's are in 'strawberry'?".to_string());

    let config = ProviderConfig::from_env(&provider)?;
    let pause = Arc::new(PauseRegistry::new());
    let client = ChatClient::from_config(config, Arc::new(LocalFileAccess::new(".")))?
        .with_pause_signal(pause.clone());

    let model = ModelInfo::new(&model_id, &provider).with_reasoning(model_id.contains("reason"));
    let request = CompletionRequest::new(
        vec![Message::user(question)],
        AssistantSettings::default().with_prompt("You are a concise assistant."),
        model,
    );

    let key = request.stream_key.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            pause.pause(&key);
        }
    });

    let mut in_reasoning = false;
    let mut handler = |event: NormalizedEvent| {
        let mut out = io::stdout();
        if !event.reasoning_content.is_empty() {
            if !in_reasoning {
                let _ = write!(out, "🧠 ");
                in_reasoning = true;
            }
            let _ = write!(out, "{}", event.reasoning_content);
        }
        if !event.text.is_empty() {
            if in_reasoning {
                let _ = write!(out, "\n\n");
                in_reasoning = false;
            }
            let _ = write!(out, "{}", event.text);
        }
        let _ = out.flush();
    };

    let summary = client.complete(request, &mut handler).await?;

    let m = summary.metrics;
    println!("\n");
    if summary.cancelled {
        println!("⏸️  paused after {} events", summary.events);
    }
    println!(
        "first token {} ms | thinking {} ms | total {} ms | {} completion tokens",
        m.time_first_token_millsec, m.time_thinking_millsec, m.time_completion_millsec, m.completion_tokens
    );
    Ok(())
}
