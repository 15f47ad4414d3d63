//! Row parsing for the persons, events and execution sheets.

use crate::errors::{AppError, AppResult};
use crate::ingest::columns::{ResolvedColumns, resolve_sheet};
use crate::ingest::schema::{EVENT_SCHEMA, PERSON_SCHEMA, RECORD_SCHEMA, event, person, record};
use crate::ingest::sheet::Sheet;
use crate::models::event::Event;
use crate::models::execution::NewExecutionRecord;
use crate::models::person::Person;
use chrono::NaiveDate;

/// Rows accepted from a sheet plus the rows dropped for a blank natural key.
#[derive(Debug)]
pub struct Parsed<T> {
    pub items: Vec<T>,
    pub skipped: Vec<AppError>,
}

impl<T> Parsed<T> {
    fn empty() -> Self {
        Self {
            items: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

fn text(cols: &ResolvedColumns, sheet: &Sheet, row: usize, field: &str) -> String {
    cols.get(sheet, row, field).as_text()
}

fn empty_id(sheet: &Sheet, row: usize) -> AppError {
    AppError::EmptyId {
        sheet: sheet.name.clone(),
        row: Sheet::display_row(row),
    }
}

pub fn parse_persons(sheet: &Sheet) -> AppResult<Parsed<Person>> {
    let cols = resolve_sheet(sheet, &PERSON_SCHEMA)?;
    let mut out = Parsed::empty();

    for row in 0..sheet.rows.len() {
        let id = text(&cols, sheet, row, person::ID);
        if id.is_empty() {
            if !sheet.row_is_blank(row) {
                out.skipped.push(empty_id(sheet, row));
            }
            continue;
        }
        out.items.push(Person::new(
            &id,
            &text(&cols, sheet, row, person::NAME),
            &text(&cols, sheet, row, person::ROLE),
            &text(&cols, sheet, row, person::PROCESS),
            &text(&cols, sheet, row, person::WORKPLACE),
        ));
    }

    Ok(out)
}

/// Events take `event_type` from configuration; the sheet does not carry it.
pub fn parse_events(sheet: &Sheet, event_type: &str) -> AppResult<Parsed<Event>> {
    let cols = resolve_sheet(sheet, &EVENT_SCHEMA)?;
    let mut out = Parsed::empty();

    for row in 0..sheet.rows.len() {
        let id = text(&cols, sheet, row, event::ID);
        if id.is_empty() {
            if !sheet.row_is_blank(row) {
                out.skipped.push(empty_id(sheet, row));
            }
            continue;
        }
        let duration = cols.get(sheet, row, event::DURATION_HOURS).as_number();
        out.items.push(
            Event::new(
                &id,
                &text(&cols, sheet, row, event::TOPIC),
                &text(&cols, sheet, row, event::NAME),
                &text(&cols, sheet, row, event::SCHEME),
            )
            .with_type(event_type)
            .with_duration(duration),
        );
    }

    Ok(out)
}

/// Execution rows are optional: a sheet without both id columns yields an
/// empty batch instead of an error. Rows missing a date get `today`.
pub fn parse_records(sheet: &Sheet, today: NaiveDate) -> Parsed<NewExecutionRecord> {
    let cols = match resolve_sheet(sheet, &RECORD_SCHEMA) {
        Ok(c) => c,
        Err(_) => return Parsed::empty(),
    };
    let mut out = Parsed::empty();

    for row in 0..sheet.rows.len() {
        let person_id = text(&cols, sheet, row, record::PERSON_ID);
        let event_id = text(&cols, sheet, row, record::EVENT_ID);
        if person_id.is_empty() || event_id.is_empty() {
            if !sheet.row_is_blank(row) {
                out.skipped.push(empty_id(sheet, row));
            }
            continue;
        }

        let date = cols
            .get(sheet, row, record::EXECUTION_DATE)
            .as_date()
            .unwrap_or(today);

        let mut rec = NewExecutionRecord::new(&person_id, &event_id, date);
        rec.hours = cols.get(sheet, row, record::HOURS).as_number();
        let result = text(&cols, sheet, row, record::RESULT);
        if !result.is_empty() {
            rec.result = Some(result);
        }
        out.items.push(rec);
    }

    out
}
