//! Snapshot ingest command

use clap::Args;
use scandiff_engine::commands::ingest::ingest_snapshot;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct IngestArgs {
    /// Path to the snapshot JSON document
    pub file: PathBuf,

    #[arg(long, default_value = ".scandiff/store.db")]
    pub db: String,
}

pub fn execute(args: IngestArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.file.extension().and_then(|e| e.to_str()) != Some("json") {
        return Err("only JSON snapshot documents are accepted".into());
    }

    let bytes = std::fs::read(&args.file)?;
    let filename = args
        .file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("snapshot.json")
        .to_string();

    if let Some(parent) = std::path::Path::new(&args.db).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut conn = scandiff_store::db::open(&args.db)?;
    scandiff_store::db::configure(&conn)?;
    scandiff_store::migrations::apply_migrations(&mut conn)?;

    let result = ingest_snapshot(&mut conn, &bytes, &filename)?;

    if result.was_duplicate {
        println!("Snapshot already stored (idempotent):");
    } else {
        println!("Snapshot ingested:");
    }
    println!("  snapshot_id: {}", result.snapshot_id);
    println!("  host: {}", result.ip);
    println!("  timestamp: {}", result.timestamp);
    println!("  service_count: {}", result.service_count);
    println!("  content_digest: {}", result.content_digest);

    Ok(())
}
