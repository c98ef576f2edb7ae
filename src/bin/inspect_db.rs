use std::error::Error;
use std::path::PathBuf;

use surfsup::dates::trailing_cutoff;
use surfsup::ClimateDb;

fn main() -> Result<(), Box<dyn Error>> {
    let file_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("Resources/hawaii.sqlite"));

    println!("Inspecting observation database: {}", file_path.display());

    let db = ClimateDb::open(&file_path)?;
    db.validate()?;
    let session = db.session()?;

    println!("\n=== DATASET ===");
    let summary = session.summary()?;
    println!("  stations     = {}", summary.station_count);
    println!("  measurements = {}", summary.measurement_count);
    match (summary.first_date, summary.last_date) {
        (Some(first), Some(last)) => println!("  dates        = {} .. {}", first, last),
        _ => println!("  dates        = (none)"),
    }

    println!("\nStations:");
    for station in session.list_stations()? {
        println!(
            "  {:>3} {} {} ({:.4}, {:.4}, {} m)",
            station.id,
            station.station,
            station.name,
            station.latitude,
            station.longitude,
            station.elevation
        );
    }

    println!("\nActivity (measurements per station):");
    let activity = session.count_measurements_per_station()?;
    for entry in &activity {
        println!("  {} = {}", entry.station, entry.count);
    }

    if let (Some(busiest), Ok(most_recent)) = (activity.first(), session.max_date()) {
        let cutoff = trailing_cutoff(most_recent)?;
        let temps = session.temperatures_for_station_since(&busiest.station, cutoff)?;
        println!(
            "\nTrailing year for {} ({} < date <= {}): {} observations",
            busiest.station,
            cutoff,
            most_recent,
            temps.len()
        );

        let stats = session.temperature_stats_for_station_in_range(
            &busiest.station,
            cutoff.succ_opt().unwrap_or(cutoff),
            Some(most_recent),
        )?;
        println!(
            "  min = {:?}, avg = {:?}, max = {:?}",
            stats.min, stats.avg, stats.max
        );
    }

    Ok(())
}
