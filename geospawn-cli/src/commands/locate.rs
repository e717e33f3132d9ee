//! Geology and biome lookup.

use clap::Args;
use geospawn::geo::LocationGeoData;
use tracing::info;

use super::common::{print_json, validate_coordinates, OutputFormat};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for `geospawn locate`.
#[derive(Debug, Args)]
pub struct LocateArgs {
    /// Latitude in decimal degrees
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,

    /// Longitude in decimal degrees
    #[arg(long, allow_negative_numbers = true)]
    pub lng: f64,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Run the locate command.
pub fn run(runner: &CliRunner, args: LocateArgs) -> Result<(), CliError> {
    validate_coordinates(args.lat, args.lng)?;
    runner.log_startup("locate");

    let geospawn = runner.create_geospawn()?;
    let location = geospawn.get_location_data(args.lat, args.lng);
    info!(
        "Resolved {} from {} data",
        location.geohash, location.data_source
    );

    match args.format {
        OutputFormat::Json => print_json(&location),
        OutputFormat::Text => {
            print_location(args.lat, args.lng, &location);
            Ok(())
        }
    }
}

/// Print a resolved location as text.
pub fn print_location(lat: f64, lng: f64, location: &LocationGeoData) {
    let geology = &location.geology;
    let biome = &location.biome;

    println!(
        "Location: {:.5}, {:.5} (geohash {})",
        lat, lng, location.geohash
    );
    println!("Data source: {}", location.data_source);
    println!();
    println!("Geology ({})", location.provenance.geology);
    println!("  Lithology:  {}", geology.primary_lithology);
    if !geology.secondary_lithologies.is_empty() {
        println!("  Secondary:  {}", geology.secondary_lithologies.join(", "));
    }
    println!("  Confidence: {:.2}", geology.confidence);
    println!();
    println!("Biome ({})", location.provenance.biome);
    println!("  Type:       {}", biome.biome_type);
    println!("  Realm:      {}", biome.realm.as_deref().unwrap_or("(none)"));
    if let Some(ecoregion) = biome.ecoregion_id {
        println!("  Ecoregion:  {}", ecoregion);
    }
    println!("  Confidence: {:.2}", biome.confidence);
}
