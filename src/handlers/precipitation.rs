//! Precipitation endpoint handler.
//!
//! Returns every precipitation reading, either as a list of `{date, prcp}`
//! pairs or as the legacy date-keyed object.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use super::{error_response, run_query};
use crate::error::Result;
use crate::logging::generate_request_id;
use crate::queries::{precipitation_series, PrecipitationFormat};
use crate::state::AppState;

const ENDPOINT: &str = "/api/v1.0/precipitation";

/// Query parameters for the precipitation endpoint
#[derive(Debug, Deserialize)]
pub struct PrecipitationQuery {
    /// Response shape: `list` (default) or `map`
    #[serde(default)]
    pub format: Option<String>,
}

impl PrecipitationQuery {
    fn resolve_format(&self, fallback: PrecipitationFormat) -> Result<PrecipitationFormat> {
        match &self.format {
            Some(format) => PrecipitationFormat::parse("format", format),
            None => Ok(fallback),
        }
    }
}

/// Handle GET /api/v1.0/precipitation requests
pub async fn precipitation_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PrecipitationQuery>,
) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();

    debug!(
        endpoint = ENDPOINT,
        request_id = %request_id,
        format = ?params.format,
        "Processing precipitation request"
    );

    let format = match params.resolve_format(state.precipitation_format) {
        Ok(format) => format,
        Err(error) => {
            return error_response(error, ENDPOINT, &request_id, params.format.as_deref())
        }
    };

    match run_query(state, "precipitation_series", &request_id, move |db| {
        precipitation_series(db, format)
    })
    .await
    {
        Ok(series) => {
            info!(
                endpoint = ENDPOINT,
                request_id = %request_id,
                format = format.as_str(),
                entries = series.len(),
                duration_us = start_time.elapsed().as_micros() as u64,
                "Precipitation request successful"
            );
            Json(series).into_response()
        }
        Err(error) => error_response(error, ENDPOINT, &request_id, Some(format.as_str())),
    }
}
