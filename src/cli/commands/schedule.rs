use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::schedule::ScheduleLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::utils::date::parse_month;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Schedule {
        role,
        month,
        add,
        delete,
    } = cmd
    {
        let month = parse_month(month).ok_or_else(|| AppError::InvalidMonth(month.clone()))?;
        let role = role.trim();
        let mut pool = DbPool::open(&cfg.database)?;

        if *delete {
            ScheduleLogic::delete(&mut pool, role, month)?;
        } else if !add.is_empty() {
            ScheduleLogic::add(&mut pool, role, month, add)?;
        }

        ScheduleLogic::print(&pool, role, month)?;
    }
    Ok(())
}
