//! Resource spawning.

use clap::Args;
use geospawn::altitude::AltitudeReading;
use geospawn::spawn::ResourceSpawn;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::info;

use super::common::{print_json, validate_coordinates, OutputFormat};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for `geospawn spawn`.
#[derive(Debug, Args)]
pub struct SpawnArgs {
    /// Latitude in decimal degrees
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,

    /// Longitude in decimal degrees
    #[arg(long, allow_negative_numbers = true)]
    pub lng: f64,

    /// GPS altitude in metres
    #[arg(long, allow_negative_numbers = true)]
    pub altitude: Option<f64>,

    /// Vertical accuracy of the altitude in metres
    #[arg(long, requires = "altitude")]
    pub accuracy: Option<f64>,

    /// Seed for a reproducible spawn
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct SpawnReport<'a> {
    geohash: &'a str,
    data_source: String,
    spawns: &'a [ResourceSpawn],
}

/// Run the spawn command.
pub fn run(runner: &CliRunner, args: SpawnArgs) -> Result<(), CliError> {
    validate_coordinates(args.lat, args.lng)?;
    runner.log_startup("spawn");

    let geospawn = runner.create_geospawn()?;
    let altitude = args
        .altitude
        .map(|value| AltitudeReading::from_gps(value, args.accuracy));

    let spawns = match args.seed {
        Some(seed) => geospawn.spawn_resources_with(
            args.lat,
            args.lng,
            altitude.as_ref(),
            &mut StdRng::seed_from_u64(seed),
        ),
        None => geospawn.spawn_resources_at(args.lat, args.lng, altitude.as_ref()),
    };

    // Tile lookups are cached, so this re-resolves the cell the spawn used
    let location = geospawn.get_location_data(args.lat, args.lng);
    info!("Spawned {} stacks at {}", spawns.len(), location.geohash);

    match args.format {
        OutputFormat::Json => print_json(&SpawnReport {
            geohash: &location.geohash,
            data_source: location.data_source.to_string(),
            spawns: &spawns,
        }),
        OutputFormat::Text => {
            let catalog = geospawn.spawner().selector().catalog();
            println!(
                "Spawn at {:.5}, {:.5} (geohash {}, {} data)",
                args.lat, args.lng, location.geohash, location.data_source
            );
            for spawn in &spawns {
                let name = catalog
                    .get(spawn.resource_type, &spawn.resource_id)
                    .map(|d| d.name.as_str())
                    .unwrap_or(spawn.resource_id.as_str());
                println!(
                    "  {:>3} x {:<24} {}",
                    spawn.quantity, name, spawn.resource_type
                );
            }
            Ok(())
        }
    }
}
