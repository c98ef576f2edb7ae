//! # surfsup
//!
//! A small, read-only JSON API over a SQLite climate-observation dataset of
//! weather stations and their daily precipitation and temperature readings.
//!
//! ## Endpoints
//!
//! - `/api/v1.0/precipitation`: every precipitation reading
//! - `/api/v1.0/stations`: every station
//! - `/api/v1.0/tobs`: temperatures of the busiest station over the trailing year
//! - `/api/v1.0/:start` and `/api/v1.0/:start/:end`: min/avg/max temperature of
//!   the busiest station inside a date window
//!
//! ## Architecture
//!
//! - **Store** ([`store`]): scoped read-only SQLite sessions and typed row queries
//! - **Queries** ([`queries`]): the windowing and aggregation logic
//! - **API Layer** ([`handlers`], [`router`]): axum handlers serializing query results

pub mod config;
pub mod dates;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod queries;
pub mod router;
pub mod state;
pub mod store;

pub use config::Config;
pub use error::{Result, SurfsupError};
pub use logging::{
    create_http_trace_layer, generate_request_id, init_tracing, log_dataset_stats, log_error,
    log_request_error, log_timed_operation,
};
pub use router::build_router;
pub use state::AppState;
pub use store::{ClimateDb, DatasetSummary, Station, TemperatureStats};
