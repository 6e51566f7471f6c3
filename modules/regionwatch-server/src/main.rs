//! Thin HTTP surface around the scrape pipeline. All real logic lives in
//! regionwatch-scrape and regionwatch-store; this binary only wires config,
//! store, fetcher, and routes together.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use regionwatch_common::Config;
use regionwatch_scrape::{HttpFetcher, ScrapePipeline};
use regionwatch_store::{SnapshotStore, SqliteStore};

mod routes;

pub struct AppState {
    pub pipeline: ScrapePipeline,
    pub store: Arc<dyn SnapshotStore>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("regionwatch=info".parse()?))
        .init();

    let config = Config::from_env();
    config.log_summary();

    let store: Arc<dyn SnapshotStore> =
        Arc::new(SqliteStore::connect(&config.database_url).await?);
    let fetcher = Arc::new(HttpFetcher::new(Duration::from_secs(
        config.fetch_timeout_secs,
    ))?);
    let pipeline = ScrapePipeline::new(
        fetcher,
        store.clone(),
        config.source_url.clone(),
        config.always_refetch,
    );

    let state = Arc::new(AppState { pipeline, store });

    let app = Router::new()
        .route("/api/refresh", post(routes::refresh))
        .route(
            "/api/snapshots",
            get(routes::list_snapshots).delete(routes::clear_snapshots),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("{}:{}", config.host, config.port);
    info!(addr = addr.as_str(), "Regionwatch listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
