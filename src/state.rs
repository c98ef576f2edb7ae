//! Application state management for surfsup.
//!
//! The state passed to every handler is immutable: the configuration, the
//! database handle (a path, not an open connection) and the dataset summary
//! taken at startup.

use std::path::Path;
use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::queries::PrecipitationFormat;
use crate::store::{ClimateDb, DatasetSummary};

/// The main application state shared across all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    /// Configuration
    pub config: Config,
    /// Observation store
    pub db: ClimateDb,
    /// Row counts and date span at startup
    pub summary: DatasetSummary,
    /// Response shape used when a precipitation request does not pick one
    pub precipitation_format: PrecipitationFormat,
}

impl AppState {
    /// Open and validate the configured database, then build the state
    pub fn load(config: Config) -> Result<Self> {
        let db = ClimateDb::open(config.database_path()?)?;
        db.validate()?;
        let summary = db.summary()?;
        let precipitation_format = config.precipitation_format()?;

        Ok(Self {
            config,
            db,
            summary,
            precipitation_format,
        })
    }

    /// Same as [`AppState::load`] with the database path given explicitly
    pub fn load_from_path(path: &Path, mut config: Config) -> Result<Self> {
        config.data.database_path = Some(path.to_path_buf());
        Self::load(config)
    }

    /// Create a new AppState wrapped in an Arc for shared ownership
    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Path of the database backing this state
    pub fn database_path(&self) -> &Path {
        self.db.path()
    }
}
