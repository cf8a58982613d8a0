//! scandiff CLI
//!
//! Command-line interface for the scan snapshot ledger and diff engine

use clap::{Parser, Subcommand};
use scandiff_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "scandiff")]
#[command(about = "scandiff - Network scan snapshot ledger and diff engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Ingest a snapshot document into the ledger
    Ingest(commands::ingest::IngestArgs),
    /// Snapshot lookups (show, list)
    Snapshot(commands::snapshot::SnapshotArgs),
    /// List hosts known to the ledger
    Hosts(commands::hosts::HostsArgs),
    /// Compare two snapshots of one host
    Diff(commands::diff::DiffArgs),
}

fn main() {
    let profile = match std::env::var("SCANDIFF_LOG").as_deref() {
        Ok("json") => Profile::Production,
        _ => Profile::Development,
    };
    init(profile);

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Ingest(args) => commands::ingest::execute(args),
        Commands::Snapshot(args) => commands::snapshot::execute(args),
        Commands::Hosts(args) => commands::hosts::execute(args),
        Commands::Diff(args) => commands::diff::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
