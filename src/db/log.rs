//! Internal audit trail kept in the `log` table.

use crate::errors::AppResult;
use crate::ui::messages::warning;
use chrono::Local;
use rusqlite::{Connection, params};

/// Operations written to the `log` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOp {
    Init,
    MigrationApplied,
    Import,
    ImportFailed,
    Diagnostic,
    Record,
    ScheduleAdd,
    ScheduleDel,
}

impl LogOp {
    pub fn as_str(self) -> &'static str {
        match self {
            LogOp::Init => "init",
            LogOp::MigrationApplied => "migration_applied",
            LogOp::Import => "import",
            LogOp::ImportFailed => "import_failed",
            LogOp::Diagnostic => "diagnostic",
            LogOp::Record => "record",
            LogOp::ScheduleAdd => "schedule_add",
            LogOp::ScheduleDel => "schedule_del",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        [
            LogOp::Init,
            LogOp::MigrationApplied,
            LogOp::Import,
            LogOp::ImportFailed,
            LogOp::Diagnostic,
            LogOp::Record,
            LogOp::ScheduleAdd,
            LogOp::ScheduleDel,
        ]
        .into_iter()
        .find(|op| op.as_str() == s)
    }
}

pub fn ttlog(conn: &Connection, op: LogOp, target: &str, message: &str) -> AppResult<()> {
    conn.prepare_cached(
        "INSERT INTO log (date, operation, target, message) VALUES (?1, ?2, ?3, ?4)",
    )?
    .execute(params![Local::now().to_rfc3339(), op.as_str(), target, message])?;
    Ok(())
}

/// Audit writes never abort the operation being audited.
pub fn ttlog_lenient(conn: &Connection, op: LogOp, target: &str, message: &str) {
    if let Err(e) = ttlog(conn, op, target, message) {
        warning(format!("Audit entry '{}' not written: {}", op.as_str(), e));
    }
}
