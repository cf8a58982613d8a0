//! Snapshot diff command

use clap::Args;
use scandiff_core_types::RequestContext;
use scandiff_engine::commands::engine_query::{
    apply_engine_query, EngineQuery, EngineQueryResult,
};

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Ledger ID of one snapshot (either chronological order)
    pub first: i64,

    /// Ledger ID of the other snapshot
    pub second: i64,

    /// Print the human-readable summary instead of the JSON report
    #[arg(long)]
    pub summary: bool,

    #[arg(long, default_value = ".scandiff/store.db")]
    pub db: String,
}

pub fn execute(args: DiffArgs) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = RequestContext::new();
    tracing::info!(
        request_id = %ctx.request_id,
        first_id = args.first,
        second_id = args.second,
        "diff requested"
    );

    let conn = scandiff_store::db::open(&args.db)?;

    match apply_engine_query(
        EngineQuery::SnapshotDiff {
            first_id: args.first,
            second_id: args.second,
        },
        &conn,
    )? {
        EngineQueryResult::SnapshotDiff(result) => {
            if args.summary {
                print!("{}", result.human_summary);
            } else {
                println!("{}", serde_json::to_string_pretty(&result.report)?);
            }
        }
        _ => unreachable!(),
    }

    Ok(())
}
