//! HTTP request handlers for the surfsup API.
//!
//! This module contains all the endpoint handlers for the web server, plus the
//! two helpers they share: running a query on the blocking pool and turning an
//! error into a JSON response.

pub mod heartbeat;
pub mod home;
pub mod precipitation;
pub mod stations;
pub mod temperature;
pub mod tobs;

pub use heartbeat::heartbeat_handler;
pub use home::home_handler;
pub use precipitation::precipitation_handler;
pub use stations::stations_handler;
pub use temperature::{temperature_range_handler, temperature_start_handler};
pub use tobs::tobs_handler;

use axum::response::{IntoResponse, Response};
use axum::Json;
use std::sync::Arc;

use crate::error::{Result, SurfsupError};
use crate::logging::{log_request_error, log_timed_operation};
use crate::state::AppState;
use crate::store::ClimateDb;

/// Run a blocking store query off the async runtime.
///
/// The closure gets the database handle and opens whatever session it needs;
/// the session is closed before the task finishes.
pub(crate) async fn run_query<T, F>(
    state: Arc<AppState>,
    operation: &'static str,
    request_id: &str,
    f: F,
) -> Result<T>
where
    F: FnOnce(&ClimateDb) -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    let request_id = request_id.to_string();
    tokio::task::spawn_blocking(move || {
        log_timed_operation(operation, &request_id, || f(&state.db))
    })
    .await
    .map_err(|e| SurfsupError::Server {
        message: format!("Query task failed: {}", e),
    })?
}

/// Log a failed request and build its JSON error response.
///
/// The full error goes to the log; the body only carries
/// [`SurfsupError::client_message`].
pub(crate) fn error_response(
    error: SurfsupError,
    endpoint: &str,
    request_id: &str,
    params: Option<&str>,
) -> Response {
    log_request_error(&error, endpoint, request_id, params);

    (
        error.status_code(),
        Json(serde_json::json!({
            "error": error.client_message(),
            "request_id": request_id
        })),
    )
        .into_response()
}
