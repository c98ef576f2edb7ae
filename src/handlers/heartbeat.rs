//! Heartbeat endpoint handler.
//!
//! Returns server status information, including uptime and a fresh summary of
//! the dataset. If the store cannot be read the status turns `degraded` and the
//! summary taken at startup is reported instead.

use axum::{extract::State, Json};
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tracing::warn;
use uuid::Uuid;

use super::run_query;
use crate::logging::generate_request_id;
use crate::state::AppState;
use crate::store::DatasetSummary;

/// Server ID, generated once per process
static SERVER_ID: once_cell::sync::Lazy<String> =
    once_cell::sync::Lazy::new(|| Uuid::new_v4().to_string());

/// Server start time
static START_TIME: once_cell::sync::Lazy<SystemTime> = once_cell::sync::Lazy::new(SystemTime::now);

/// Heartbeat response structure
#[derive(Debug, Serialize)]
pub struct HeartbeatResponse {
    /// Server ID (unique per instance)
    pub server_id: String,
    /// Current timestamp (ISO 8601 format)
    pub timestamp: String,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Dataset information
    pub dataset: DatasetInfo,
    /// Server status
    pub status: String,
}

/// Dataset information structure
#[derive(Debug, Serialize)]
pub struct DatasetInfo {
    pub database_path: String,
    pub station_count: u64,
    pub measurement_count: u64,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

impl DatasetInfo {
    fn new(database_path: String, summary: &DatasetSummary) -> Self {
        Self {
            database_path,
            station_count: summary.station_count,
            measurement_count: summary.measurement_count,
            first_date: summary.first_date,
            last_date: summary.last_date,
        }
    }
}

/// Mark the process start, so uptime counts from server startup
pub fn init_start_time() {
    once_cell::sync::Lazy::force(&START_TIME);
}

/// Handle GET /heartbeat requests
pub async fn heartbeat_handler(State(state): State<Arc<AppState>>) -> Json<HeartbeatResponse> {
    let request_id = generate_request_id();
    let now = SystemTime::now();
    let timestamp = chrono::DateTime::<chrono::Utc>::from(now)
        .to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
    let uptime = now
        .duration_since(*START_TIME)
        .unwrap_or(Duration::from_secs(0));

    let database_path = state.database_path().display().to_string();
    let startup_summary = state.summary.clone();

    let (summary, status) =
        match run_query(state, "dataset_summary", &request_id, |db| db.summary()).await {
            Ok(summary) => (summary, "healthy"),
            Err(error) => {
                warn!(
                    endpoint = "/heartbeat",
                    request_id = %request_id,
                    error = %error,
                    "Dataset unreadable, reporting startup summary"
                );
                (startup_summary, "degraded")
            }
        };

    Json(HeartbeatResponse {
        server_id: SERVER_ID.clone(),
        timestamp,
        uptime_seconds: uptime.as_secs(),
        dataset: DatasetInfo::new(database_path, &summary),
        status: status.to_string(),
    })
}
