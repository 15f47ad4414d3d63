use crate::core::obligations::is_scheduled;
use crate::db::log::{LogOp, ttlog_lenient};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::execution::NewExecutionRecord;
use crate::ui::messages::{success, warning};
use crate::utils::date::format_month;

pub struct RecordLogic;

impl RecordLogic {
    /// Append one attendance record and report whether it was on schedule.
    pub fn append(pool: &mut DbPool, rec: &NewExecutionRecord) -> AppResult<i64> {
        let id = pool.append_execution_record(rec)?;
        ttlog_lenient(
            &pool.conn,
            LogOp::Record,
            &rec.person_id,
            &format!("Execution #{} of event {} on {}", id, rec.event_id, rec.execution_date),
        );
        success(format!("Execution #{} recorded.", id));

        match is_scheduled(pool, &rec.person_id, &rec.event_id, rec.execution_date) {
            Ok(m) if m.scheduled => success(format!(
                "Matches schedule (role: {} | month: {})",
                m.role,
                format_month(m.month)
            )),
            Ok(m) => warning(format!(
                "Outside schedule (role: {} | month: {})",
                m.role,
                format_month(m.month)
            )),
            Err(e) => warning(format!("Schedule check skipped: {}", e)),
        }

        Ok(id)
    }
}
