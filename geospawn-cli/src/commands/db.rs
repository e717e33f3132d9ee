//! Tile database inspection.

use clap::Subcommand;
use geospawn::tiles::{SqliteConfig, SqliteTileBackend, TileBackend};
use std::path::PathBuf;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Database subcommands.
#[derive(Debug, Subcommand)]
pub enum DbCommands {
    /// Show tile database provenance
    Info {
        /// Database to inspect instead of the configured one
        #[arg(long)]
        database: Option<PathBuf>,
    },
}

/// Run a database subcommand.
pub fn run(runner: &CliRunner, command: DbCommands) -> Result<(), CliError> {
    match command {
        DbCommands::Info { database } => {
            runner.log_startup("db info");
            let path = database.unwrap_or_else(|| runner.config().tiles.database.clone());
            run_info(SqliteConfig::new(path))
        }
    }
}

/// Open the database directly so failures are reported instead of degraded.
fn run_info(config: SqliteConfig) -> Result<(), CliError> {
    let path = config.database_path.clone();
    let backend = SqliteTileBackend::new(config);
    backend.initialize()?;
    let metadata = backend.metadata()?.unwrap_or_default();
    backend.close();

    println!("Tile database: {}", path.display());
    if metadata.sources.is_empty() {
        println!("  Sources:      (not recorded)");
    } else {
        println!("  Sources:      {}", metadata.sources.join(", "));
    }
    println!(
        "  Generated at: {}",
        metadata.generated_at.as_deref().unwrap_or("(not recorded)")
    );
    match metadata.tile_count {
        Some(count) => println!("  Tiles:        {}", count),
        None => println!("  Tiles:        (not recorded)"),
    }
    for (key, value) in &metadata.extra {
        println!("  {}: {}", key, value);
    }
    Ok(())
}
