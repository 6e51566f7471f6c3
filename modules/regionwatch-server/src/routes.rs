// Trigger and listing handlers. Errors are sanitized to a stable category;
// detail goes to server-side logs only.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use tracing::error;

use regionwatch_common::Snapshot;
use regionwatch_scrape::{CycleOutcome, ScrapeError};

use crate::AppState;

type ApiError = (StatusCode, Json<Value>);

/// POST /api/refresh — run one freshness-gated scrape cycle.
pub async fn refresh(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    match state.pipeline.run_cycle().await {
        Ok(CycleOutcome::Inserted { rows, fingerprint }) => Ok(Json(json!({
            "status": "inserted",
            "rows": rows,
            "fingerprint": fingerprint,
        }))),
        Ok(CycleOutcome::SkippedFresh) => Ok(Json(json!({ "status": "already_current" }))),
        Ok(CycleOutcome::SkippedUnchanged) => Ok(Json(json!({ "status": "unchanged" }))),
        Err(e) => Err(sanitize(e)),
    }
}

/// GET /api/snapshots — every stored snapshot, oldest first.
pub async fn list_snapshots(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Snapshot>>, ApiError> {
    state.store.all_snapshots().await.map(Json).map_err(|e| {
        error!(error = %e, "Failed to list snapshots");
        store_error()
    })
}

/// DELETE /api/snapshots — administrative purge.
pub async fn clear_snapshots(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    state.store.clear_all().await.map_err(|e| {
        error!(error = %e, "Failed to clear snapshots");
        store_error()
    })?;
    Ok(Json(json!({ "status": "cleared" })))
}

fn sanitize(e: ScrapeError) -> ApiError {
    error!(error = %e, category = e.category(), "Scrape cycle failed");
    let status = match &e {
        ScrapeError::Fetch(_) | ScrapeError::Parse(_) => StatusCode::BAD_GATEWAY,
        ScrapeError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": e.category() })))
}

fn store_error() -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "store_failed" })),
    )
}
