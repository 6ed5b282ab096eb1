// Main entry point for the review QA server

use anyhow::{Context, Result};
use review_server::{build_app, build_review_qa, logging::init_tracing, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    init_tracing();

    tracing::info!("Starting review QA server");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    let rag = config.rag_config()?;
    tracing::info!(
        max_pages = rag.max_pages,
        max_docs = rag.max_docs,
        chat_model = %rag.completion.model,
        embedding_model = %rag.embedding_model,
        "Configuration loaded"
    );

    // Build application
    let qa = build_review_qa(&config.openai, rag)?;
    let app = build_app(qa);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
