//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and handlers.
//!
//! # Command Modules
//!
//! - [`config`] - Configuration management (init, show, path)
//! - [`db`] - Tile database inspection
//! - [`geohash`] - Geohash utilities (encode, decode, neighbors, bounds, cover)
//! - [`locate`] - Geology and biome lookup for a coordinate
//! - [`spawn`] - Resource spawning for a coordinate

pub mod common;
pub mod config;
pub mod db;
pub mod geohash;
pub mod locate;
pub mod spawn;
