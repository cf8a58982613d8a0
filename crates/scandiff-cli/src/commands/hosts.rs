//! Host listing command

use clap::Args;
use scandiff_engine::commands::engine_query::{
    apply_engine_query, EngineQuery, EngineQueryResult,
};

#[derive(Debug, Args)]
pub struct HostsArgs {
    #[arg(long, default_value = ".scandiff/store.db")]
    pub db: String,
}

pub fn execute(args: HostsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let conn = scandiff_store::db::open(&args.db)?;

    match apply_engine_query(EngineQuery::HostList, &conn)? {
        EngineQueryResult::HostList(hosts) => {
            if hosts.is_empty() {
                println!("No hosts in the ledger");
                return Ok(());
            }
            for host in hosts {
                println!("{}", host);
            }
        }
        _ => unreachable!(),
    }

    Ok(())
}
