//! Snapshot lookup commands

use clap::{Args, Subcommand};
use scandiff_engine::commands::engine_query::{
    apply_engine_query, EngineQuery, EngineQueryResult,
};

#[derive(Debug, Args)]
pub struct SnapshotArgs {
    #[command(subcommand)]
    pub command: SnapshotCommand,
}

#[derive(Debug, Subcommand)]
pub enum SnapshotCommand {
    /// Show a stored snapshot with its ledger metadata
    Show(ShowArgs),
    /// List a host's snapshots, newest first
    List(ListArgs),
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Ledger ID of the snapshot
    pub id: i64,

    #[arg(long, default_value = ".scandiff/store.db")]
    pub db: String,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Host address to list snapshots for
    pub host: String,

    #[arg(long, default_value = ".scandiff/store.db")]
    pub db: String,
}

pub fn execute(args: SnapshotArgs) -> Result<(), Box<dyn std::error::Error>> {
    match args.command {
        SnapshotCommand::Show(show_args) => execute_show(show_args),
        SnapshotCommand::List(list_args) => execute_list(list_args),
    }
}

fn execute_show(args: ShowArgs) -> Result<(), Box<dyn std::error::Error>> {
    let conn = scandiff_store::db::open(&args.db)?;

    match apply_engine_query(EngineQuery::SnapshotGet { snapshot_id: args.id }, &conn)? {
        EngineQueryResult::SnapshotGet(result) => {
            println!("snapshot_id: {}", result.snapshot_id);
            println!("filename: {}", result.filename);
            println!("content_digest: {}", result.content_digest);
            println!("uploaded_at: {}", result.uploaded_at);
            println!("{}", serde_json::to_string_pretty(&result.snapshot)?);
        }
        _ => unreachable!(),
    }

    Ok(())
}

fn execute_list(args: ListArgs) -> Result<(), Box<dyn std::error::Error>> {
    let conn = scandiff_store::db::open(&args.db)?;

    match apply_engine_query(EngineQuery::SnapshotList { host: args.host.clone() }, &conn)? {
        EngineQueryResult::SnapshotList(items) => {
            if items.is_empty() {
                println!("No snapshots stored for {}", args.host);
                return Ok(());
            }
            for item in items {
                println!(
                    "{}  {}  {}",
                    item.snapshot_id, item.timestamp, item.filename
                );
            }
        }
        _ => unreachable!(),
    }

    Ok(())
}
