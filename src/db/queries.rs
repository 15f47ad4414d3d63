//! Read side of the normalized store: list/filter queries over the four
//! collections. All functions take `&Connection` so they can run inside a
//! read snapshot.

use crate::errors::{AppError, AppResult};
use crate::models::event::Event;
use crate::models::execution::ExecutionRecord;
use crate::models::person::Person;
use crate::models::schedule::ScheduleEntry;
use crate::utils::date::format_date;
use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

fn parse_db_date(idx: usize, s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            Box::new(AppError::InvalidDate(s.to_string())),
        )
    })
}

pub fn map_person(row: &Row) -> Result<Person> {
    Ok(Person {
        id: row.get("id")?,
        name: row.get("name")?,
        role: row.get("role")?,
        process: row.get("process")?,
        workplace: row.get("workplace")?,
    })
}

pub fn map_event(row: &Row) -> Result<Event> {
    Ok(Event {
        id: row.get("id")?,
        event_type: row.get("event_type")?,
        topic: row.get("topic")?,
        name: row.get("name")?,
        scheme: row.get("scheme")?,
        duration_hours: row.get("duration_hours")?,
    })
}

pub fn map_schedule(row: &Row) -> Result<ScheduleEntry> {
    let month: String = row.get("month")?;
    Ok(ScheduleEntry {
        event_id: row.get("event_id")?,
        role: row.get("role")?,
        month: parse_db_date(2, &month)?,
    })
}

pub fn map_record(row: &Row) -> Result<ExecutionRecord> {
    let date: String = row.get("execution_date")?;
    Ok(ExecutionRecord {
        id: row.get("id")?,
        person_id: row.get("person_id")?,
        event_id: row.get("event_id")?,
        execution_date: parse_db_date(3, &date)?,
        hours: row.get("hours")?,
        result: row.get("result")?,
    })
}

fn collect<T>(rows: impl Iterator<Item = Result<T>>) -> AppResult<Vec<T>> {
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

// ---------------------------
// Persons
// ---------------------------

pub fn list_persons(conn: &Connection, role: Option<&str>) -> AppResult<Vec<Person>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, role, process, workplace FROM persons
         WHERE (?1 IS NULL OR role = ?1)
         ORDER BY role, name, id",
    )?;
    let rows = stmt.query_map([role], map_person)?;
    collect(rows)
}

pub fn get_person(conn: &Connection, id: &str) -> AppResult<Option<Person>> {
    let p = conn
        .query_row(
            "SELECT id, name, role, process, workplace FROM persons WHERE id = ?1",
            [id],
            map_person,
        )
        .optional()?;
    Ok(p)
}

/// Distinct non-empty roles currently held by someone.
pub fn list_roles(conn: &Connection) -> AppResult<Vec<String>> {
    let mut stmt =
        conn.prepare("SELECT DISTINCT role FROM persons WHERE role <> '' ORDER BY role")?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
    collect(rows)
}

// ---------------------------
// Events
// ---------------------------

pub fn list_events(conn: &Connection) -> AppResult<Vec<Event>> {
    let mut stmt = conn.prepare(
        "SELECT id, event_type, topic, name, scheme, duration_hours FROM events
         ORDER BY topic, name, id",
    )?;
    let rows = stmt.query_map([], map_event)?;
    collect(rows)
}

pub fn get_event(conn: &Connection, id: &str) -> AppResult<Option<Event>> {
    let e = conn
        .query_row(
            "SELECT id, event_type, topic, name, scheme, duration_hours FROM events WHERE id = ?1",
            [id],
            map_event,
        )
        .optional()?;
    Ok(e)
}

// ---------------------------
// Schedule
// ---------------------------

#[derive(Debug, Clone, Default)]
pub struct ScheduleFilter<'a> {
    pub role: Option<&'a str>,
    pub month: Option<NaiveDate>,
    pub event_id: Option<&'a str>,
}

pub fn list_schedule(conn: &Connection, filter: &ScheduleFilter) -> AppResult<Vec<ScheduleEntry>> {
    let month = filter.month.map(format_date);
    let mut stmt = conn.prepare(
        "SELECT event_id, role, month FROM schedule
         WHERE (?1 IS NULL OR role = ?1)
           AND (?2 IS NULL OR month = ?2)
           AND (?3 IS NULL OR event_id = ?3)
         ORDER BY month, role, event_id",
    )?;
    let rows = stmt.query_map(params![filter.role, month, filter.event_id], map_schedule)?;
    collect(rows)
}

pub fn schedule_exists(
    conn: &Connection,
    event_id: &str,
    role: &str,
    month: NaiveDate,
) -> AppResult<bool> {
    let found = conn
        .query_row(
            "SELECT 1 FROM schedule WHERE event_id = ?1 AND role = ?2 AND month = ?3",
            params![event_id, role, format_date(month)],
            |_| Ok(()),
        )
        .optional()?;
    Ok(found.is_some())
}

// ---------------------------
// Execution records
// ---------------------------

#[derive(Debug, Clone, Default)]
pub struct RecordFilter<'a> {
    pub person_id: Option<&'a str>,
    pub event_id: Option<&'a str>,
}

pub fn list_records(conn: &Connection, filter: &RecordFilter) -> AppResult<Vec<ExecutionRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, person_id, event_id, execution_date, hours, result FROM records
         WHERE (?1 IS NULL OR person_id = ?1)
           AND (?2 IS NULL OR event_id = ?2)
         ORDER BY execution_date, id",
    )?;
    let rows = stmt.query_map(params![filter.person_id, filter.event_id], map_record)?;
    collect(rows)
}

// ---------------------------
// Counts and diagnostics
// ---------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct TableCounts {
    pub persons: i64,
    pub events: i64,
    pub schedule: i64,
    pub records: i64,
}

pub fn table_counts(conn: &Connection) -> AppResult<TableCounts> {
    let count = |table: &str| -> AppResult<i64> {
        let n = conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
        Ok(n)
    };

    Ok(TableCounts {
        persons: count("persons")?,
        events: count("events")?,
        schedule: count("schedule")?,
        records: count("records")?,
    })
}

/// References that point at ids missing from persons/events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DanglingRefs {
    pub schedule_unknown_event: i64,
    pub records_unknown_person: i64,
    pub records_unknown_event: i64,
}

impl DanglingRefs {
    pub fn is_clean(&self) -> bool {
        self.schedule_unknown_event == 0
            && self.records_unknown_person == 0
            && self.records_unknown_event == 0
    }
}

pub fn dangling_refs(conn: &Connection) -> AppResult<DanglingRefs> {
    let count = |sql: &str| -> AppResult<i64> { Ok(conn.query_row(sql, [], |row| row.get(0))?) };

    Ok(DanglingRefs {
        schedule_unknown_event: count(
            "SELECT COUNT(*) FROM schedule s
             WHERE NOT EXISTS (SELECT 1 FROM events e WHERE e.id = s.event_id)",
        )?,
        records_unknown_person: count(
            "SELECT COUNT(*) FROM records r
             WHERE NOT EXISTS (SELECT 1 FROM persons p WHERE p.id = r.person_id)",
        )?,
        records_unknown_event: count(
            "SELECT COUNT(*) FROM records r
             WHERE NOT EXISTS (SELECT 1 FROM events e WHERE e.id = r.event_id)",
        )?,
    })
}
