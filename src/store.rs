//! Read-only access to the observation store.
//!
//! The store is a SQLite file with two tables, `station` and `measurement`,
//! populated by an external loader before the service starts. Nothing here
//! writes to it.
//!
//! Connections are never held across requests. [`ClimateDb`] only remembers
//! where the file lives; [`ClimateDb::session`] opens a read-only connection
//! wrapped in a [`Session`], and the connection closes when the session is
//! dropped, on every exit path.

use chrono::NaiveDate;
use rusqlite::{params, Connection, OpenFlags, OptionalExtension};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::dates::{format_date, parse_stored_date};
use crate::error::{Result, SurfsupError};

/// Tables the service expects to find
pub const REQUIRED_TABLES: [&str; 2] = ["station", "measurement"];

/// A weather station record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: i64,
    /// Station code, the business key measurements refer to
    pub station: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
}

/// One measurement row reduced to its date and precipitation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrecipitationReading {
    pub date: NaiveDate,
    /// Absent when the station did not record precipitation that day
    pub prcp: Option<f64>,
}

/// Number of measurement rows recorded by a station
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationActivity {
    pub station: String,
    pub count: u64,
}

/// A single temperature observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureObservation {
    pub date: NaiveDate,
    pub tobs: f64,
}

/// Minimum, average and maximum temperature over a window.
///
/// All three are `None` when no observation matched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureStats {
    pub min: Option<f64>,
    pub avg: Option<f64>,
    pub max: Option<f64>,
}

impl TemperatureStats {
    /// Whether any observation contributed to the stats
    pub fn has_data(&self) -> bool {
        self.min.is_some() && self.avg.is_some() && self.max.is_some()
    }
}

/// Row counts and date span of the dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub station_count: u64,
    pub measurement_count: u64,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

/// Handle on the SQLite file backing the service
#[derive(Debug, Clone)]
pub struct ClimateDb {
    path: PathBuf,
}

impl ClimateDb {
    /// Point at an existing database file.
    ///
    /// No connection is kept open; this only checks that the file exists.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SurfsupError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Database not found: {}", path.display()),
            )));
        }

        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// Path of the database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a read-only session, released when the returned value is dropped
    pub fn session(&self) -> Result<Session> {
        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        debug!(path = %self.path.display(), "Opened read-only session");
        Ok(Session { conn })
    }

    /// Check that both tables exist
    pub fn validate(&self) -> Result<()> {
        let session = self.session()?;
        for table in REQUIRED_TABLES {
            if !session.has_table(table)? {
                return Err(SurfsupError::Storage {
                    message: format!(
                        "Table '{}' not found in {}",
                        table,
                        self.path.display()
                    ),
                });
            }
        }
        Ok(())
    }

    /// Row counts and date span, used at startup and by the heartbeat
    pub fn summary(&self) -> Result<DatasetSummary> {
        self.session()?.summary()
    }
}

/// A scoped read-only connection
pub struct Session {
    conn: Connection,
}

impl Session {
    fn has_table(&self, name: &str) -> Result<bool> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1",
                params![name],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    /// Every measurement as (date, precipitation), each row exactly once
    pub fn list_measurements(&self) -> Result<Vec<PrecipitationReading>> {
        let mut stmt = self.conn.prepare("SELECT date, prcp FROM measurement")?;
        let rows = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, Option<f64>>(1)?))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        rows.into_iter()
            .map(|(date, prcp)| {
                Ok(PrecipitationReading {
                    date: parse_stored_date(&date)?,
                    prcp,
                })
            })
            .collect()
    }

    /// Every station
    pub fn list_stations(&self) -> Result<Vec<Station>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, station, name, latitude, longitude, elevation FROM station ORDER BY id",
        )?;
        let stations = stmt
            .query_map([], |row| {
                Ok(Station {
                    id: row.get(0)?,
                    station: row.get(1)?,
                    name: row.get(2)?,
                    latitude: row.get(3)?,
                    longitude: row.get(4)?,
                    elevation: row.get(5)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(stations)
    }

    /// Latest date across all measurements.
    ///
    /// An empty measurement table is a hard error, not a default.
    pub fn max_date(&self) -> Result<NaiveDate> {
        let max: Option<String> =
            self.conn
                .query_row("SELECT MAX(date) FROM measurement", [], |row| row.get(0))?;

        match max {
            Some(date) => parse_stored_date(&date),
            None => Err(SurfsupError::DataUnavailable {
                message: "No measurements recorded".to_string(),
            }),
        }
    }

    /// Measurement count per station, busiest first, ties broken by station code
    pub fn count_measurements_per_station(&self) -> Result<Vec<StationActivity>> {
        let mut stmt = self.conn.prepare(
            "SELECT station, COUNT(*) AS n FROM measurement \
             GROUP BY station ORDER BY n DESC, station ASC",
        )?;
        let activity = stmt
            .query_map([], |row| {
                Ok(StationActivity {
                    station: row.get(0)?,
                    count: row.get::<_, i64>(1)? as u64,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(activity)
    }

    /// Temperature observations for `station` strictly after `since`, oldest first
    pub fn temperatures_for_station_since(
        &self,
        station: &str,
        since: NaiveDate,
    ) -> Result<Vec<TemperatureObservation>> {
        let mut stmt = self.conn.prepare(
            "SELECT date, tobs FROM measurement \
             WHERE station = ?1 AND date > ?2 AND tobs IS NOT NULL \
             ORDER BY date",
        )?;
        let rows = stmt
            .query_map(params![station, format_date(since)], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        rows.into_iter()
            .map(|(date, tobs)| {
                Ok(TemperatureObservation {
                    date: parse_stored_date(&date)?,
                    tobs,
                })
            })
            .collect()
    }

    /// Min/avg/max of `tobs` for `station` with `start <= date [<= end]`
    pub fn temperature_stats_for_station_in_range(
        &self,
        station: &str,
        start: NaiveDate,
        end: Option<NaiveDate>,
    ) -> Result<TemperatureStats> {
        let stats = self.conn.query_row(
            "SELECT MIN(tobs), AVG(tobs), MAX(tobs) FROM measurement \
             WHERE station = ?1 AND date >= ?2 AND (?3 IS NULL OR date <= ?3)",
            params![station, format_date(start), end.map(format_date)],
            |row| {
                Ok(TemperatureStats {
                    min: row.get(0)?,
                    avg: row.get(1)?,
                    max: row.get(2)?,
                })
            },
        )?;
        Ok(stats)
    }

    /// Row counts and date span of the dataset
    pub fn summary(&self) -> Result<DatasetSummary> {
        let station_count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM station", [], |row| row.get(0))?;
        let (measurement_count, first, last): (i64, Option<String>, Option<String>) =
            self.conn.query_row(
                "SELECT COUNT(*), MIN(date), MAX(date) FROM measurement",
                [],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )?;

        Ok(DatasetSummary {
            station_count: station_count as u64,
            measurement_count: measurement_count as u64,
            first_date: first.as_deref().map(parse_stored_date).transpose()?,
            last_date: last.as_deref().map(parse_stored_date).transpose()?,
        })
    }
}
