//! botscan - Botnet Scan CLI
//!
//! Scan an uploaded telemetry file (CSV / JSON / TXT / LOG) and browse the
//! recorded scan history. Output is always JSON on stdout.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use botscan_core::constants;
use botscan_core::{ScanConfig, ScanPipeline, ScanStore};

/// Botnet detection over uploaded network and host telemetry.
#[derive(Parser, Debug)]
#[command(name = "botscan")]
#[command(version)]
#[command(about = "Signature, host-anomaly and flow-behavior botnet scanning")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan a file and record the result.
    Scan {
        /// Path to a .csv, .json, .txt or .log file.
        file: PathBuf,
    },

    /// List recorded scans, newest first.
    History {
        /// Show at most N scans.
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show one recorded scan.
    Show {
        scan_id: String,
    },

    /// Verdict counts over the whole history.
    Stats,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = ScanConfig::from_env();

    log::debug!("{} v{} using data dir {}", constants::APP_NAME, constants::APP_VERSION, config.data_dir.display());

    match cli.command {
        Commands::Scan { file } => {
            let pipeline = ScanPipeline::from_config(&config).context("Failed to initialize scan pipeline")?;

            let bytes = fs::read(&file).with_context(|| format!("Failed to read {}", file.display()))?;
            let extension = file
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or_default();
            let filename = file
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("upload");

            let record = pipeline
                .scan(&bytes, extension, filename)
                .with_context(|| format!("Scan of {} failed", file.display()))?;
            print_json(&record)?;
        }
        Commands::History { limit } => {
            let store = ScanStore::open(&config.history_file);
            let mut records = store.list_all();
            if let Some(limit) = limit {
                records.truncate(limit);
            }
            print_json(&records)?;
        }
        Commands::Show { scan_id } => {
            let store = ScanStore::open(&config.history_file);
            let record = store.get_by_id(&scan_id)?;
            print_json(&record)?;
        }
        Commands::Stats => {
            let store = ScanStore::open(&config.history_file);
            print_json(&store.stats())?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}
