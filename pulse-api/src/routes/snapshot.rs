//! Home page snapshot endpoint

use axum::{extract::State, routing::get, Json, Router};

use pulse_core::Snapshot;

use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/snapshot", get(snapshot))
}

/// Featured article and headlines, as last refreshed
async fn snapshot(State(state): State<AppState>) -> Json<Snapshot> {
    Json(state.cache.current().as_ref().clone())
}
