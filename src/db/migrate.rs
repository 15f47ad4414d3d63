use crate::db::log::{LogOp, ttlog};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::progress;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists; it also records applied migrations.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250301_0001_create_core_tables",
        description: "Created persons, events, schedule and records tables",
        sql: r#"
        CREATE TABLE IF NOT EXISTS persons (
            id         TEXT PRIMARY KEY,
            name       TEXT NOT NULL DEFAULT '',
            role       TEXT NOT NULL DEFAULT '',
            process    TEXT NOT NULL DEFAULT '',
            workplace  TEXT NOT NULL DEFAULT ''
        );

        CREATE TABLE IF NOT EXISTS events (
            id              TEXT PRIMARY KEY,
            event_type      TEXT NOT NULL DEFAULT '',
            topic           TEXT NOT NULL DEFAULT '',
            name            TEXT NOT NULL DEFAULT '',
            scheme          TEXT NOT NULL DEFAULT '',
            duration_hours  REAL NOT NULL DEFAULT 1.0
        );

        CREATE TABLE IF NOT EXISTS schedule (
            event_id  TEXT NOT NULL,
            role      TEXT NOT NULL,
            month     TEXT NOT NULL,
            PRIMARY KEY (event_id, role, month)
        );

        CREATE TABLE IF NOT EXISTS records (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            person_id       TEXT NOT NULL,
            event_id        TEXT NOT NULL,
            execution_date  TEXT NOT NULL,
            hours           REAL NOT NULL,
            result          TEXT NOT NULL
        );
        "#,
    },
    Migration {
        version: "20250301_0002_add_lookup_indexes",
        description: "Added role/month and record lookup indexes",
        sql: r#"
        CREATE INDEX IF NOT EXISTS idx_persons_role ON persons(role);
        CREATE INDEX IF NOT EXISTS idx_schedule_role_month ON schedule(role, month);
        CREATE INDEX IF NOT EXISTS idx_records_person ON records(person_id);
        CREATE INDEX IF NOT EXISTS idx_records_event_date ON records(event_id, execution_date);
        "#,
    },
];

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = ?1 AND target = ?2
         LIMIT 1",
    )?;
    Ok(chk
        .query_row([LogOp::MigrationApplied.as_str(), version], |_| Ok(()))
        .optional()?
        .is_some())
}

fn apply(conn: &Connection, m: &Migration) -> AppResult<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute_batch(m.sql)
        .map_err(|e| AppError::Migration(format!("{}: {}", m.version, e)))?;

    ttlog(&tx, LogOp::MigrationApplied, m.version, m.description)?;

    tx.commit()?;

    progress(format!("Migration applied: {}", m.version));
    Ok(())
}

/// Public entry point: run all pending migrations, oldest first.
///
/// Invoked by `DbPool::open` and `DbPool::in_memory`.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    ensure_log_table(conn)?;

    for m in MIGRATIONS {
        if !is_applied(conn, m.version)? {
            apply(conn, m)?;
        }
    }

    Ok(())
}

/// Versions recorded as applied, oldest first.
pub fn applied_versions(conn: &Connection) -> AppResult<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT target FROM log WHERE operation = ?1 ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([LogOp::MigrationApplied.as_str()], |row| {
        row.get::<_, String>(0)
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
