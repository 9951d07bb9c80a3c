//! joblens server entry point.
//!
//! Loads configuration, opens the response cache, builds the search
//! service (which fails fast on a missing API credential) and serves the
//! site over HTTP.

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

mod resolve;
mod routes;
mod search;
mod seo;
mod state;
mod views;

use joblens_core::{AppConfig, CacheDb};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = AppConfig::load().context("loading configuration")?;
    let db = CacheDb::open(&config.db_path)
        .await
        .context("opening response cache database")?;

    let purged = db.purge_expired().await.unwrap_or(0);
    if purged > 0 {
        tracing::info!(purged, "removed expired response cache rows");
    }

    let service = search::SearchService::new(&config, db).context("building search service")?;
    let state = state::AppState { config: Arc::new(config), search: Arc::new(service) };

    let listener = TcpListener::bind(&state.config.bind_addr)
        .await
        .with_context(|| format!("binding {}", state.config.bind_addr))?;
    tracing::info!(addr = %state.config.bind_addr, "starting joblens server");

    axum::serve(listener, routes::router(state)).await?;

    Ok(())
}
