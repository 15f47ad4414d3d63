use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::record::RecordLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::execution::NewExecutionRecord;
use crate::utils::date::{parse_date, today};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Record {
        person,
        event,
        date,
        hours,
        result,
    } = cmd
    {
        let date = match date {
            Some(d) => parse_date(d).ok_or_else(|| AppError::InvalidDate(d.clone()))?,
            None => today(),
        };

        if let Some(h) = hours
            && (!h.is_finite() || *h <= 0.0)
        {
            return Err(AppError::InvalidNumber(h.to_string()));
        }

        let mut rec = NewExecutionRecord::new(person, event, date);
        rec.hours = *hours;
        rec.result = result.clone();

        let mut pool = DbPool::open(&cfg.database)?;
        RecordLogic::append(&mut pool, &rec)?;
    }
    Ok(())
}
