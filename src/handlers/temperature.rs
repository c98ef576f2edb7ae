//! Temperature statistics endpoint handlers.
//!
//! `/api/v1.0/:start` and `/api/v1.0/:start/:end` return `{min, avg, max}` of
//! the busiest station's observations inside the window. The busiest station is
//! chosen over the whole dataset, not within the window.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use super::{error_response, run_query};
use crate::logging::generate_request_id;
use crate::queries::range_temperature_stats;
use crate::state::AppState;

const ENDPOINT: &str = "/api/v1.0/:start[/:end]";

/// Handle GET /api/v1.0/:start requests
pub async fn temperature_start_handler(
    State(state): State<Arc<AppState>>,
    Path(start): Path<String>,
) -> Response {
    temperature_stats(state, start, None).await
}

/// Handle GET /api/v1.0/:start/:end requests
pub async fn temperature_range_handler(
    State(state): State<Arc<AppState>>,
    Path((start, end)): Path<(String, String)>,
) -> Response {
    temperature_stats(state, start, Some(end)).await
}

async fn temperature_stats(state: Arc<AppState>, start: String, end: Option<String>) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();
    let params = format!("start={}, end={}", start, end.as_deref().unwrap_or("none"));

    debug!(
        endpoint = ENDPOINT,
        request_id = %request_id,
        params = %params,
        "Processing temperature stats request"
    );

    match run_query(state, "range_temperature_stats", &request_id, move |db| {
        range_temperature_stats(db, &start, end.as_deref())
    })
    .await
    {
        Ok(result) => {
            info!(
                endpoint = ENDPOINT,
                request_id = %request_id,
                station = %result.station,
                start = %result.range.start,
                end = ?result.range.end,
                has_data = result.stats.has_data(),
                duration_us = start_time.elapsed().as_micros() as u64,
                "Temperature stats request successful"
            );
            Json(result.stats).into_response()
        }
        Err(error) => error_response(error, ENDPOINT, &request_id, Some(params.as_str())),
    }
}
