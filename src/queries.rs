//! The four analytical queries behind the API.
//!
//! Each query opens one read-only [`Session`](crate::store::Session) for its
//! own use and closes it before returning. Nothing is shared between calls.
//!
//! Both temperature queries pick the busiest station over the *whole* dataset,
//! not the busiest station inside the requested window.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::dates::{format_date, trailing_cutoff, DateRange};
use crate::error::{Result, SurfsupError};
use crate::store::{
    ClimateDb, PrecipitationReading, Session, Station, TemperatureObservation, TemperatureStats,
};

/// Response shape for the precipitation series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrecipitationFormat {
    /// One `{date, prcp}` entry per measurement row
    #[default]
    List,
    /// Legacy date-keyed object. Rows sharing a date collapse to the last one read.
    Map,
}

impl PrecipitationFormat {
    /// Parse a format name, case-insensitively
    pub fn parse(param: &str, value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "list" => Ok(Self::List),
            "map" => Ok(Self::Map),
            other => Err(SurfsupError::invalid_argument(
                param,
                format!("Unsupported format: {}. Must be one of: list, map", other),
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Map => "map",
        }
    }
}

/// Precipitation readings in either response shape
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PrecipitationSeries {
    List(Vec<PrecipitationReading>),
    Map(BTreeMap<String, Option<f64>>),
}

impl PrecipitationSeries {
    /// Number of entries in the response
    pub fn len(&self) -> usize {
        match self {
            Self::List(readings) => readings.len(),
            Self::Map(by_date) => by_date.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Temperatures at the busiest station over the trailing year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrailingYearTemperatures {
    pub station: String,
    pub most_recent: NaiveDate,
    /// Exclusive lower bound of the window
    pub cutoff: NaiveDate,
    pub observations: Vec<TemperatureObservation>,
}

impl TrailingYearTemperatures {
    /// The bare temperature values, as served by the API
    pub fn values(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.tobs).collect()
    }
}

/// Temperature stats for the busiest station over a requested range
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeTemperatureStats {
    pub station: String,
    pub range: DateRange,
    pub stats: TemperatureStats,
}

/// All precipitation readings.
///
/// [`PrecipitationFormat::List`] keeps every row. [`PrecipitationFormat::Map`]
/// keys by date, so when several stations report on the same date only the
/// last row read survives.
pub fn precipitation_series(
    db: &ClimateDb,
    format: PrecipitationFormat,
) -> Result<PrecipitationSeries> {
    let readings = db.session()?.list_measurements()?;

    Ok(match format {
        PrecipitationFormat::List => PrecipitationSeries::List(readings),
        PrecipitationFormat::Map => PrecipitationSeries::Map(
            readings
                .into_iter()
                .map(|r| (format_date(r.date), r.prcp))
                .collect(),
        ),
    })
}

/// Every station, unfiltered
pub fn station_roster(db: &ClimateDb) -> Result<Vec<Station>> {
    db.session()?.list_stations()
}

/// Code of the station with the most measurement rows
fn busiest_station(session: &Session) -> Result<String> {
    session
        .count_measurements_per_station()?
        .into_iter()
        .next()
        .map(|activity| activity.station)
        .ok_or_else(|| SurfsupError::DataUnavailable {
            message: "No station has any measurements".to_string(),
        })
}

/// Temperature observations of the busiest station within 365 days of the latest recorded date.
///
/// Fails with `DataUnavailable` when that station has no temperature in the window.
pub fn trailing_year_temperatures(db: &ClimateDb) -> Result<TrailingYearTemperatures> {
    let session = db.session()?;

    let most_recent = session.max_date()?;
    let cutoff = trailing_cutoff(most_recent)?;
    let station = busiest_station(&session)?;
    let observations = session.temperatures_for_station_since(&station, cutoff)?;
    if observations.is_empty() {
        return Err(SurfsupError::DataUnavailable {
            message: format!(
                "No measurements for station {} after {}",
                station,
                format_date(cutoff)
            ),
        });
    }

    Ok(TrailingYearTemperatures {
        station,
        most_recent,
        cutoff,
        observations,
    })
}

/// Min/avg/max temperature for the busiest station between `start` and optional `end`, inclusive.
///
/// The dates are validated before the store is touched.
pub fn range_temperature_stats(
    db: &ClimateDb,
    start: &str,
    end: Option<&str>,
) -> Result<RangeTemperatureStats> {
    let range = DateRange::parse(start, end)?;

    let session = db.session()?;
    let station = busiest_station(&session)?;
    let stats = session.temperature_stats_for_station_in_range(&station, range.start, range.end)?;

    Ok(RangeTemperatureStats {
        station,
        range,
        stats,
    })
}
