//! Common types and utilities shared across CLI commands.

use clap::ValueEnum;
use serde::Serialize;

use crate::error::CliError;

/// Output format selection for CLI arguments.
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Reject coordinates outside the valid latitude/longitude range.
///
/// The library accepts anything; the CLI is strict so typos surface.
pub fn validate_coordinates(lat: f64, lng: f64) -> Result<(), CliError> {
    if !(-90.0..=90.0).contains(&lat) {
        return Err(CliError::InvalidArgument(format!(
            "latitude {} must be between -90 and 90",
            lat
        )));
    }
    if !(-180.0..=180.0).contains(&lng) {
        return Err(CliError::InvalidArgument(format!(
            "longitude {} must be between -180 and 180",
            lng
        )));
    }
    Ok(())
}

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_coordinates() {
        assert!(validate_coordinates(0.0, 0.0).is_ok());
        assert!(validate_coordinates(-90.0, 180.0).is_ok());
        assert!(validate_coordinates(90.5, 0.0).is_err());
        assert!(validate_coordinates(0.0, -181.0).is_err());
        assert!(validate_coordinates(f64::NAN, 0.0).is_err());
    }
}
