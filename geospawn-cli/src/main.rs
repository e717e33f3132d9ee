//! GeoSpawn CLI - Command-line interface
//!
//! Looks up geology and biome for coordinates, spawns resources, and
//! inspects the tile database and configuration.

mod commands;
mod error;
mod runner;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::config::ConfigCommands;
use commands::db::DbCommands;
use commands::geohash::GeohashCommands;
use commands::locate::LocateArgs;
use commands::spawn::SpawnArgs;
use error::CliError;
use runner::CliRunner;

#[derive(Parser)]
#[command(name = "geospawn")]
#[command(version = geospawn::VERSION)]
#[command(
    about = "Geology and biome lookups with biome-aware resource spawning",
    long_about = None
)]
struct Cli {
    /// Configuration file (default: ~/.geospawn/config.ini)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve geology and biome for a coordinate
    Locate(LocateArgs),

    /// Spawn resources for a coordinate
    Spawn(SpawnArgs),

    /// Geohash utilities
    Geohash {
        #[command(subcommand)]
        command: GeohashCommands,
    },

    /// Tile database inspection
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        e.exit();
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Locate(args) => {
            let runner = CliRunner::new(config_path, cli.verbose)?;
            commands::locate::run(&runner, args)
        }
        Commands::Spawn(args) => {
            let runner = CliRunner::new(config_path, cli.verbose)?;
            commands::spawn::run(&runner, args)
        }
        Commands::Db { command } => {
            let runner = CliRunner::new(config_path, cli.verbose)?;
            commands::db::run(&runner, command)
        }
        Commands::Geohash { command } => commands::geohash::run(command),
        Commands::Config { command } => commands::config::run(config_path, command),
    }
}
