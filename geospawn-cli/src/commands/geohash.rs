//! Geohash utility commands.

use clap::Subcommand;
use geospawn::geohash::{self, GeohashBounds, MAX_PRECISION};

use crate::error::CliError;

/// Geohash subcommands.
#[derive(Debug, Subcommand)]
pub enum GeohashCommands {
    /// Encode a coordinate
    Encode {
        /// Latitude in decimal degrees
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        /// Longitude in decimal degrees
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,
        /// Number of characters
        #[arg(long, default_value = "5")]
        precision: usize,
    },

    /// Decode a geohash to its centre point
    Decode { geohash: String },

    /// List the eight neighbouring cells
    Neighbors { geohash: String },

    /// Show a cell's bounding box and size
    Bounds { geohash: String },

    /// List the cells covering a bounding box
    Cover {
        #[arg(long, allow_negative_numbers = true)]
        min_lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        max_lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        min_lng: f64,
        #[arg(long, allow_negative_numbers = true)]
        max_lng: f64,
        /// Number of characters
        #[arg(long, default_value = "5")]
        precision: usize,
    },
}

/// Run a geohash subcommand.
pub fn run(command: GeohashCommands) -> Result<(), CliError> {
    match command {
        GeohashCommands::Encode {
            lat,
            lng,
            precision,
        } => {
            check_precision(precision)?;
            println!("{}", geohash::encode(lat, lng, precision));
        }
        GeohashCommands::Decode { geohash: hash } => {
            geohash::validate(&hash)?;
            let (lat, lng) = geohash::decode(&hash);
            println!("{:.6}, {:.6}", lat, lng);
        }
        GeohashCommands::Neighbors { geohash: hash } => {
            geohash::validate(&hash)?;
            for neighbor in geohash::neighbors(&hash) {
                println!("{}", neighbor);
            }
        }
        GeohashCommands::Bounds { geohash: hash } => {
            geohash::validate(&hash)?;
            let b = geohash::bounds(&hash);
            let size = geohash::cell_size(geohash::precision_of(&hash));
            println!("Latitude:  {:.6} .. {:.6}", b.min_lat, b.max_lat);
            println!("Longitude: {:.6} .. {:.6}", b.min_lng, b.max_lng);
            println!("Size:      {} x {} km", size.width_km, size.height_km);
        }
        GeohashCommands::Cover {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
            precision,
        } => {
            check_precision(precision)?;
            let bounds = GeohashBounds::new(min_lat, max_lat, min_lng, max_lng);
            for cell in geohash::coverage(&bounds, precision) {
                println!("{}", cell);
            }
        }
    }
    Ok(())
}

fn check_precision(precision: usize) -> Result<(), CliError> {
    if (1..=MAX_PRECISION).contains(&precision) {
        Ok(())
    } else {
        Err(CliError::InvalidArgument(format!(
            "precision {} must be between 1 and {}",
            precision, MAX_PRECISION
        )))
    }
}
