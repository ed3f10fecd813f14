use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use glassbox::api::{AppState, create_router};
use glassbox::config::CONFIG;
use glassbox::gemini::GeminiClient;
use glassbox::orchestrator::QueryOrchestrator;

#[derive(Debug, Parser)]
#[command(name = "glassbox", about = "AI search transparency demo server")]
struct Args {
    /// Address to listen on, overrides GLASSBOX_BIND
    #[arg(long)]
    bind: Option<String>,

    /// Model identifier, overrides GLASSBOX_MODEL
    #[arg(long)]
    model: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Also bridges log crate records from dependencies into tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let args = Args::parse();
    let config = &*CONFIG;
    if config.api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY is not set; every search will fail until it is");
    }

    let model = args.model.unwrap_or_else(|| config.model.clone());
    let bind = args.bind.unwrap_or_else(|| config.bind.clone());

    let backend = Arc::new(GeminiClient::from_config(config));
    let orchestrator = Arc::new(QueryOrchestrator::new(backend, model));
    tracing::info!(model = orchestrator.model(), "query orchestrator ready");
    let state = Arc::new(AppState::new(orchestrator)?);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
