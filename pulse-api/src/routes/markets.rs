//! Market data endpoints

use axum::{
    extract::{Path, State},
    http::{HeaderName, HeaderValue},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tracing::debug;

use pulse_services::Sourced;

use crate::AppState;

/// Response header naming the provider that answered
pub const DATA_SOURCE_HEADER: &str = "x-data-source";

/// Create market routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/market-data", get(market_data))
        .route("/kline-data/{symbol}", get(kline_data))
}

/// Top markets, ordered as the answering provider ranked them
async fn market_data(State(state): State<AppState>) -> Response {
    let sourced = state.market_service.market_snapshot().await;
    debug!(
        "Serving {} tickers from {}",
        sourced.records.len(),
        sourced.provider
    );
    sourced_response(sourced)
}

/// Daily candles for a symbol, oldest first
async fn kline_data(State(state): State<AppState>, Path(symbol): Path<String>) -> Response {
    let sourced = state.market_service.candles(&symbol).await;
    debug!(
        "Serving {} candles for {} from {}",
        sourced.records.len(),
        symbol,
        sourced.provider
    );
    sourced_response(sourced)
}

fn sourced_response<T: Serialize>(sourced: Sourced<T>) -> Response {
    let header = (
        HeaderName::from_static(DATA_SOURCE_HEADER),
        HeaderValue::from_static(sourced.provider.as_str()),
    );
    ([header], Json(sourced.records)).into_response()
}
