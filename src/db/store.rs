//! Write contract of the normalized store.
//!
//! Single-record functions take a plain `&Connection` so they can run either
//! directly or inside a batch transaction (`DbPool::in_transaction`).

use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::event::{DEFAULT_DURATION_HOURS, Event};
use crate::models::execution::NewExecutionRecord;
use crate::models::person::Person;
use crate::models::schedule::ScheduleEntry;
use crate::utils::date::format_date;
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, params};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Inserted,
    Replaced,
}

/// Insert a person, or replace every non-key field of the existing row.
pub fn upsert_person(conn: &Connection, p: &Person) -> AppResult<Upsert> {
    let exists = conn
        .query_row("SELECT 1 FROM persons WHERE id = ?1", [&p.id], |_| Ok(()))
        .optional()?
        .is_some();

    if exists {
        conn.execute(
            "UPDATE persons SET name = ?2, role = ?3, process = ?4, workplace = ?5
             WHERE id = ?1",
            params![p.id, p.name, p.role, p.process, p.workplace],
        )?;
        Ok(Upsert::Replaced)
    } else {
        conn.execute(
            "INSERT INTO persons (id, name, role, process, workplace)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![p.id, p.name, p.role, p.process, p.workplace],
        )?;
        Ok(Upsert::Inserted)
    }
}

/// Insert an event, or replace every non-key field of the existing row.
pub fn upsert_event(conn: &Connection, e: &Event) -> AppResult<Upsert> {
    let exists = conn
        .query_row("SELECT 1 FROM events WHERE id = ?1", [&e.id], |_| Ok(()))
        .optional()?
        .is_some();

    if exists {
        conn.execute(
            "UPDATE events SET event_type = ?2, topic = ?3, name = ?4, scheme = ?5, duration_hours = ?6
             WHERE id = ?1",
            params![e.id, e.event_type, e.topic, e.name, e.scheme, e.duration_hours],
        )?;
        Ok(Upsert::Replaced)
    } else {
        conn.execute(
            "INSERT INTO events (id, event_type, topic, name, scheme, duration_hours)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![e.id, e.event_type, e.topic, e.name, e.scheme, e.duration_hours],
        )?;
        Ok(Upsert::Inserted)
    }
}

/// Returns `true` when the triple was new.
pub fn insert_schedule_entry_if_absent(conn: &Connection, s: &ScheduleEntry) -> AppResult<bool> {
    let changed = conn.execute(
        "INSERT OR IGNORE INTO schedule (event_id, role, month) VALUES (?1, ?2, ?3)",
        params![s.event_id, s.role, format_date(s.month)],
    )?;
    Ok(changed > 0)
}

/// Hours of the referenced event, or 1.0 when the event is unknown.
pub fn resolve_hours(conn: &Connection, event_id: &str) -> AppResult<f64> {
    let hours: Option<f64> = conn
        .query_row(
            "SELECT duration_hours FROM events WHERE id = ?1",
            [event_id],
            |row| row.get(0),
        )
        .optional()?;
    Ok(hours.unwrap_or(DEFAULT_DURATION_HOURS))
}

/// Always inserts a new row and returns its surrogate id.
pub fn append_execution_record(conn: &Connection, rec: &NewExecutionRecord) -> AppResult<i64> {
    let hours = match rec.hours {
        Some(h) => h,
        None => resolve_hours(conn, &rec.event_id)?,
    };

    conn.execute(
        "INSERT INTO records (person_id, event_id, execution_date, hours, result)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            rec.person_id,
            rec.event_id,
            format_date(rec.execution_date),
            hours,
            rec.effective_result(),
        ],
    )?;

    Ok(conn.last_insert_rowid())
}

/// Bulk delete every entry scheduled for `role` in `month`.
pub fn delete_schedule(conn: &Connection, role: &str, month: NaiveDate) -> AppResult<usize> {
    let n = conn.execute(
        "DELETE FROM schedule WHERE role = ?1 AND month = ?2",
        params![role, format_date(month)],
    )?;
    Ok(n)
}

// ---------------------------
// Batch writes
// ---------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchCounts {
    pub inserted: usize,
    pub updated: usize,
    pub unchanged: usize,
}

impl BatchCounts {
    fn record(&mut self, u: Upsert) {
        match u {
            Upsert::Inserted => self.inserted += 1,
            Upsert::Replaced => self.updated += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.inserted + self.updated + self.unchanged
    }
}

impl DbPool {
    pub fn upsert_person(&mut self, p: &Person) -> AppResult<Upsert> {
        upsert_person(&self.conn, p)
    }

    pub fn upsert_event(&mut self, e: &Event) -> AppResult<Upsert> {
        upsert_event(&self.conn, e)
    }

    pub fn insert_schedule_entry_if_absent(&mut self, s: &ScheduleEntry) -> AppResult<bool> {
        insert_schedule_entry_if_absent(&self.conn, s)
    }

    pub fn append_execution_record(&mut self, rec: &NewExecutionRecord) -> AppResult<i64> {
        append_execution_record(&self.conn, rec)
    }

    pub fn delete_schedule(&mut self, role: &str, month: NaiveDate) -> AppResult<usize> {
        delete_schedule(&self.conn, role, month)
    }

    /// All persons commit together or not at all.
    pub fn import_persons(&mut self, persons: &[Person]) -> AppResult<BatchCounts> {
        self.in_transaction(|tx| {
            let mut counts = BatchCounts::default();
            for p in persons {
                counts.record(upsert_person(tx, p)?);
            }
            Ok(counts)
        })
    }

    pub fn import_events(&mut self, events: &[Event]) -> AppResult<BatchCounts> {
        self.in_transaction(|tx| {
            let mut counts = BatchCounts::default();
            for e in events {
                counts.record(upsert_event(tx, e)?);
            }
            Ok(counts)
        })
    }

    pub fn import_schedule(&mut self, entries: &[ScheduleEntry]) -> AppResult<BatchCounts> {
        self.in_transaction(|tx| {
            let mut counts = BatchCounts::default();
            for s in entries {
                if insert_schedule_entry_if_absent(tx, s)? {
                    counts.inserted += 1;
                } else {
                    counts.unchanged += 1;
                }
            }
            Ok(counts)
        })
    }

    pub fn import_records(&mut self, records: &[NewExecutionRecord]) -> AppResult<BatchCounts> {
        self.in_transaction(|tx| {
            let mut counts = BatchCounts::default();
            for r in records {
                append_execution_record(tx, r)?;
                counts.inserted += 1;
            }
            Ok(counts)
        })
    }
}
