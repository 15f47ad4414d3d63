use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::report::ReportLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Report { json } = cmd {
        let pool = DbPool::open(&cfg.database)?;
        let report = ReportLogic::build(&pool)?;

        if *json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            ReportLogic::print(&report);
        }
    }
    Ok(())
}
