//! Temperature observations endpoint handler.
//!
//! Returns the temperatures recorded by the busiest station during the 365
//! days before the latest date in the dataset.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use super::{error_response, run_query};
use crate::logging::generate_request_id;
use crate::queries::trailing_year_temperatures;
use crate::state::AppState;

const ENDPOINT: &str = "/api/v1.0/tobs";

/// Handle GET /api/v1.0/tobs requests
pub async fn tobs_handler(State(state): State<Arc<AppState>>) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();

    debug!(
        endpoint = ENDPOINT,
        request_id = %request_id,
        "Processing temperature observations request"
    );

    match run_query(
        state,
        "trailing_year_temperatures",
        &request_id,
        trailing_year_temperatures,
    )
    .await
    {
        Ok(result) => {
            info!(
                endpoint = ENDPOINT,
                request_id = %request_id,
                station = %result.station,
                most_recent = %result.most_recent,
                cutoff = %result.cutoff,
                observations = result.observations.len(),
                duration_us = start_time.elapsed().as_micros() as u64,
                "Temperature observations request successful"
            );
            Json(result.values()).into_response()
        }
        Err(error) => error_response(error, ENDPOINT, &request_id, None),
    }
}
