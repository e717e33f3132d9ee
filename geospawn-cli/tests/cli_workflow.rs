//! Integration tests for the `geospawn` binary.
//!
//! Each test runs the built CLI against a temporary config file, log file
//! and tile database so nothing touches the real home directory.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use geospawn::geo::{BiomeCode, BiomeData, GeoTile, GeologyData};
use geospawn::geohash;
use geospawn::tiles::schema::{create_schema, insert_tiles, write_metadata};
use geospawn::tiles::TileDatabaseMetadata;
use rusqlite::Connection;
use tempfile::TempDir;

const LAT: &str = "44.98";
const LNG: &str = "-93.27";

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Temp dir with a config file pointing at `database`.
    fn new(with_database: bool) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let database = dir.path().join("geotiles.db");
        if with_database {
            build_database(&database);
        }

        let config = format!(
            "[tiles]\ndatabase = {}\n\n[logging]\nfile = {}\n",
            database.display(),
            dir.path().join("logs").join("geospawn.log").display()
        );
        std::fs::write(dir.path().join("config.ini"), config).unwrap();
        Self { dir }
    }

    fn config_path(&self) -> PathBuf {
        self.dir.path().join("config.ini")
    }

    /// Run the CLI with `--config` pointing at this workspace.
    fn run(&self, args: &[&str]) -> Output {
        let config = self.config_path();
        Command::new(env!("CARGO_BIN_EXE_geospawn"))
            .arg("--config")
            .arg(&config)
            .args(args)
            .env("HOME", self.dir.path())
            .env_remove("RUST_LOG")
            .output()
            .expect("Failed to execute CLI command")
    }
}

fn build_database(path: &Path) {
    let lat: f64 = LAT.parse().unwrap();
    let lng: f64 = LNG.parse().unwrap();
    let tiles = vec![GeoTile::new(
        geohash::encode(lat, lng, 5),
        GeologyData::new("acid_plutonic", 0.9),
        BiomeData::new(BiomeCode::TemperateBroadleaf, 0.85).with_realm("Nearctic"),
    )];

    let mut conn = Connection::open(path).unwrap();
    create_schema(&conn).unwrap();
    insert_tiles(&mut conn, &tiles).unwrap();
    write_metadata(
        &conn,
        &TileDatabaseMetadata {
            sources: vec!["GLiM".to_string()],
            tile_count: Some(1),
            ..Default::default()
        },
    )
    .unwrap();
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Assert a command succeeded.
fn assert_success(output: &Output, context: &str) {
    if !output.status.success() {
        panic!(
            "{} failed:\nstdout: {}\nstderr: {}",
            context,
            stdout(output),
            String::from_utf8_lossy(&output.stderr)
        );
    }
}

#[test]
fn test_locate_text_output() {
    let ws = Workspace::new(true);
    let output = ws.run(&["locate", "--lat", LAT, "--lng", LNG]);
    assert_success(&output, "locate");

    let text = stdout(&output);
    assert!(text.contains("Data source: detailed"), "{}", text);
    assert!(text.contains("acid_plutonic"));
    assert!(text.contains("Nearctic"));
}

#[test]
fn test_locate_json_without_database() {
    let ws = Workspace::new(false);
    let output = ws.run(&["locate", "--lat", "0", "--lng", "-160", "--format", "json"]);
    assert_success(&output, "locate --format json");

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["data_source"], "fallback");
    assert_ne!(json["biome"]["type"], "unknown");
}

#[test]
fn test_locate_rejects_bad_latitude() {
    let ws = Workspace::new(false);
    let output = ws.run(&["locate", "--lat", "95", "--lng", "0"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("latitude"));
}

#[test]
fn test_spawn_with_seed_is_reproducible() {
    let ws = Workspace::new(true);
    let args = [
        "spawn", "--lat", LAT, "--lng", LNG, "--seed", "42", "--format", "json",
    ];

    let first = ws.run(&args);
    let second = ws.run(&args);
    assert_success(&first, "spawn");
    assert_eq!(stdout(&first), stdout(&second));

    let json: serde_json::Value = serde_json::from_str(&stdout(&first)).unwrap();
    let spawns = json["spawns"].as_array().unwrap();
    assert!((3..=5).contains(&spawns.len()));
    assert!(spawns.iter().all(|s| s["quantity"].as_u64().unwrap() >= 1));
}

#[test]
fn test_geohash_commands() {
    let ws = Workspace::new(false);

    let output = ws.run(&[
        "geohash",
        "encode",
        "--lat",
        "57.64911",
        "--lng",
        "10.40744",
        "--precision",
        "11",
    ]);
    assert_success(&output, "geohash encode");
    assert_eq!(stdout(&output).trim(), "u4pruydqqvj");

    let output = ws.run(&["geohash", "neighbors", "u4pru"]);
    assert_success(&output, "geohash neighbors");
    assert_eq!(stdout(&output).lines().count(), 8);

    let output = ws.run(&["geohash", "decode", "u4pr!"]);
    assert!(!output.status.success());
}

#[test]
fn test_db_info() {
    let ws = Workspace::new(true);
    let output = ws.run(&["db", "info"]);
    assert_success(&output, "db info");

    let text = stdout(&output);
    assert!(text.contains("GLiM"));
    assert!(text.contains("Tiles:        1"));
}

#[test]
fn test_db_info_missing_database_fails() {
    let ws = Workspace::new(false);
    let output = ws.run(&["db", "info"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("not found"));
}

#[test]
fn test_config_init_show_path() {
    let ws = Workspace::new(false);
    let config_path = ws.dir.path().join("fresh").join("config.ini");
    let config_arg = config_path.to_str().unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_geospawn"))
        .args(["--config", config_arg, "config", "init"])
        .env("HOME", ws.dir.path())
        .output()
        .unwrap();
    assert_success(&output, "config init");
    assert!(config_path.is_file());

    let output = ws.run(&["config", "path"]);
    assert_eq!(stdout(&output).trim(), ws.config_path().display().to_string());

    let output = ws.run(&["config", "show"]);
    assert_success(&output, "config show");
    assert!(stdout(&output).contains("[spawn]"));
}
