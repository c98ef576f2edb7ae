//! Test data generation utilities.
//!
//! This module builds small SQLite observation databases with the same two
//! tables as the real Hawaii dataset. The generated rows are also returned to
//! the caller so tests can compute expected answers independently.

use chrono::{Days, NaiveDate};
use rusqlite::{params, Connection};
use std::path::Path;

type Result<T> = std::result::Result<T, rusqlite::Error>;

/// A station row: (code, name, latitude, longitude, elevation)
#[derive(Debug, Clone)]
pub struct StationRow {
    pub station: &'static str,
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
}

/// A measurement row
#[derive(Debug, Clone)]
pub struct MeasurementRow {
    pub station: &'static str,
    pub date: NaiveDate,
    pub prcp: Option<f64>,
    pub tobs: Option<f64>,
}

/// The station codes used by [`hawaii_rows`], busiest first
pub const WAIHEE: &str = "USC00519281";
pub const WAIKIKI: &str = "USC00519397";
pub const KANEOHE: &str = "USC00513117";

/// Latest date in [`hawaii_rows`]
pub fn last_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2017, 8, 23).unwrap()
}

/// Create the two tables and insert the given rows
pub fn create_db(path: &Path, stations: &[StationRow], measurements: &[MeasurementRow]) -> Result<()> {
    let mut conn = Connection::open(path)?;
    conn.execute_batch(
        "CREATE TABLE station (
             id INTEGER PRIMARY KEY,
             station TEXT,
             name TEXT,
             latitude FLOAT,
             longitude FLOAT,
             elevation FLOAT
         );
         CREATE TABLE measurement (
             id INTEGER PRIMARY KEY,
             station TEXT,
             date TEXT,
             prcp FLOAT,
             tobs FLOAT
         );",
    )?;

    let tx = conn.transaction()?;
    for (i, s) in stations.iter().enumerate() {
        tx.execute(
            "INSERT INTO station (id, station, name, latitude, longitude, elevation)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![i as i64 + 1, s.station, s.name, s.latitude, s.longitude, s.elevation],
        )?;
    }
    for m in measurements {
        tx.execute(
            "INSERT INTO measurement (station, date, prcp, tobs) VALUES (?1, ?2, ?3, ?4)",
            params![m.station, m.date.format("%Y-%m-%d").to_string(), m.prcp, m.tobs],
        )?;
    }
    tx.commit()?;

    Ok(())
}

/// The three stations of the Hawaii-like dataset
pub fn hawaii_stations() -> Vec<StationRow> {
    vec![
        StationRow {
            station: WAIHEE,
            name: "WAIHEE 837.5, HI US",
            latitude: 21.45167,
            longitude: -157.84889,
            elevation: 32.9,
        },
        StationRow {
            station: WAIKIKI,
            name: "WAIKIKI 717.2, HI US",
            latitude: 21.2716,
            longitude: -157.8168,
            elevation: 3.0,
        },
        StationRow {
            station: KANEOHE,
            name: "KANEOHE 838.1, HI US",
            latitude: 21.4234,
            longitude: -157.8015,
            elevation: 14.6,
        },
    ]
}

/// About twenty months of daily readings.
///
/// WAIHEE reports every day, WAIKIKI every other day and KANEOHE every third
/// day, so WAIHEE is the busiest station. Every seventh WAIHEE day has no
/// precipitation reading and every thirteenth has no temperature.
pub fn hawaii_rows() -> Vec<MeasurementRow> {
    let first = NaiveDate::from_ymd_opt(2016, 1, 1).unwrap();
    let days = (last_date() - first).num_days() as u64;
    let mut rows = Vec::new();

    for offset in 0..=days {
        let date = first + Days::new(offset);
        let i = offset as f64;

        rows.push(MeasurementRow {
            station: WAIHEE,
            date,
            prcp: (offset % 7 != 0).then(|| (offset % 5) as f64 * 0.1),
            tobs: (offset % 13 != 0).then(|| 62.0 + (offset % 17) as f64),
        });
        if offset % 2 == 0 {
            rows.push(MeasurementRow {
                station: WAIKIKI,
                date,
                prcp: Some(0.02 * (offset % 3) as f64),
                tobs: Some(70.0 + (i * 0.37).sin() * 8.0),
            });
        }
        if offset % 3 == 0 {
            rows.push(MeasurementRow {
                station: KANEOHE,
                date,
                prcp: None,
                tobs: Some(58.0 + (offset % 11) as f64),
            });
        }
    }

    rows
}

/// Create the Hawaii-like database, returning its rows
pub fn create_hawaii_db(path: &Path) -> Result<Vec<MeasurementRow>> {
    let rows = hawaii_rows();
    create_db(path, &hawaii_stations(), &rows)?;
    Ok(rows)
}

/// Create a database whose busiest station stopped reporting years before the
/// latest recorded date
pub fn create_stale_busiest_db(path: &Path) -> Result<()> {
    let old = NaiveDate::from_ymd_opt(2010, 1, 1).unwrap();
    let mut rows: Vec<MeasurementRow> = (0..30)
        .map(|offset| MeasurementRow {
            station: WAIHEE,
            date: old + Days::new(offset),
            prcp: Some(0.1),
            tobs: Some(65.0),
        })
        .collect();
    rows.push(MeasurementRow {
        station: WAIKIKI,
        date: last_date(),
        prcp: Some(0.0),
        tobs: Some(78.0),
    });
    create_db(path, &hawaii_stations(), &rows)
}

/// Create a database with stations but no measurements
pub fn create_empty_db(path: &Path) -> Result<()> {
    create_db(path, &hawaii_stations(), &[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hawaii_rows_shape() {
        let rows = hawaii_rows();
        let waihee = rows.iter().filter(|r| r.station == WAIHEE).count();
        let waikiki = rows.iter().filter(|r| r.station == WAIKIKI).count();
        let kaneohe = rows.iter().filter(|r| r.station == KANEOHE).count();

        assert!(waihee > waikiki && waikiki > kaneohe);
        assert_eq!(rows.iter().map(|r| r.date).max(), Some(last_date()));
    }
}
