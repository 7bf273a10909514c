use std::sync::Arc;

use rag_chat::application::RagPipeline;
use rag_chat::domain::{ports::DocumentSource, TextSplitter};
use rag_chat::infrastructure::{
    Config, DirectorySource, GeminiEmbedding, GeminiLlm, InMemoryVectorIndex,
};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rag_chat=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    if std::env::var("GEMINI_API_KEY").is_err() {
        anyhow::bail!("Please set GEMINI_API_KEY in your environment or .env file");
    }

    let config = Config::default();
    let mut pipeline = RagPipeline::new(
        Arc::new(GeminiEmbedding::from_config(&config.embedding)),
        Arc::new(GeminiLlm::from_config(&config.llm)),
        Arc::new(InMemoryVectorIndex::new()),
    )
    .with_splitter(TextSplitter::new(
        config.chunking.chunk_size,
        config.chunking.chunk_overlap,
    ))
    .with_top_k(config.rag.top_k)
    .with_memory_capacity(config.rag.max_history);

    let data_dir = std::env::var("DATA_DIR").unwrap_or_else(|_| "data".into());
    let documents = DirectorySource::new(&data_dir).load().await?;
    let chunks = pipeline.ingest(documents).await?;
    info!(chunks, "index ready");

    println!("RAG chatbot ready. Ask questions about your documents.");
    println!("Commands: 'history' to show past exchanges, 'clear' to clear history, 'quit' to exit.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(b"\nYou: ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let question = line.trim();

        match question.to_lowercase().as_str() {
            "quit" | "exit" | "bye" => break,
            "clear" => {
                pipeline.clear_memory();
                println!("Conversation history cleared.");
                continue;
            }
            "history" => {
                println!("{}", serde_json::to_string_pretty(&pipeline.history())?);
                continue;
            }
            "" => {
                println!("Please enter a question.");
                continue;
            }
            _ => {}
        }

        let answer = pipeline.ask(question).await;
        println!("AI: {answer}");
    }

    println!("Goodbye!");
    Ok(())
}
