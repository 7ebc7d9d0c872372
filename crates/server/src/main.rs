use anyhow::Context;
use splitt_ocr::recognizer::ocr_space_backend::OcrSpaceRecognizer;
use splitt_ocr::ReceiptPipeline;
use tracing_subscriber::EnvFilter;

mod config;
mod routes;

use config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::load().context("Failed to load configuration")?;
    let api_key = config.api_key()?;

    let recognizer = OcrSpaceRecognizer::new(&config.ocr_endpoint, api_key, config.ocr_timeout())
        .context("Failed to build OCR client")?;
    let app = routes::router(ReceiptPipeline::new(recognizer), config.max_body_bytes);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;

    tracing::info!("Listening on {} (OCR endpoint {})", config.bind_addr, config.ocr_endpoint);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
