use anyhow::Context;
use tracing_subscriber::EnvFilter;

use cinefilo::{
    api::{create_router, AppState},
    config::Config,
    dataset::Dataset,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    let dataset = Dataset::from_path(&config.dataset_path)
        .with_context(|| format!("Failed to load dataset from {}", config.dataset_path))?;
    tracing::info!(movies = dataset.len(), path = %config.dataset_path, "Dataset loaded");

    let app = create_router(AppState::new(dataset));

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    tracing::info!("Server running on http://{}", address);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
