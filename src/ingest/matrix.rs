//! Schedule matrix decomposition.
//!
//! The matrix sheet has one row per event. Its columns are identity fields
//! (event id and descriptors), month columns (headers that are dates) and
//! role columns (any other named header). A row schedules its event for every
//! marked role in every marked month.

use crate::errors::{AppError, AppResult};
use crate::ingest::columns::fold;
use crate::ingest::schema::{MATRIX_DESCRIPTORS, MATRIX_EVENT_ID};
use crate::ingest::sentinel::is_marked;
use crate::ingest::sheet::{Cell, Sheet};
use crate::models::schedule::ScheduleEntry;
use crate::utils::date::{looks_like_date, month_start, parse_date_like};
use chrono::NaiveDate;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnKind {
    EventId,
    Descriptor,
    Month(NaiveDate),
    Role(String),
    /// Empty or `Unnamed: n` style header.
    Anonymous,
    /// Date-shaped header that did not parse; excluded from the month set.
    UnparsableMonth(String),
    /// Non-text header that is not a date (e.g. a bare number).
    Ignored,
}

pub fn classify_header(header: &Cell) -> ColumnKind {
    match header {
        Cell::Date(d) => ColumnKind::Month(month_start(*d)),
        Cell::Text(raw) => classify_text(raw),
        Cell::Empty => ColumnKind::Anonymous,
        _ => ColumnKind::Ignored,
    }
}

fn classify_text(raw: &str) -> ColumnKind {
    let text = raw.trim();
    let folded = fold(text);

    if folded.is_empty() || folded.starts_with("unnamed") {
        return ColumnKind::Anonymous;
    }
    if MATRIX_EVENT_ID.iter().any(|h| fold(h) == folded) {
        return ColumnKind::EventId;
    }
    if MATRIX_DESCRIPTORS.iter().any(|h| fold(h) == folded) {
        return ColumnKind::Descriptor;
    }
    if looks_like_date(text) {
        return match parse_date_like(text) {
            Some(d) => ColumnKind::Month(month_start(d)),
            None => ColumnKind::UnparsableMonth(text.to_string()),
        };
    }
    ColumnKind::Role(text.to_string())
}

pub fn classify_columns(sheet: &Sheet) -> Vec<ColumnKind> {
    sheet.headers.iter().map(classify_header).collect()
}

#[derive(Debug, Clone, Default)]
pub struct MatrixOutcome {
    /// Deduplicated, ordered schedule triples.
    pub entries: Vec<ScheduleEntry>,
    pub roles: Vec<String>,
    pub months: Vec<NaiveDate>,
    /// Headers excluded because they looked like dates but did not parse.
    pub skipped_columns: Vec<String>,
    /// Spreadsheet row numbers whose event id was blank.
    pub skipped_rows: Vec<usize>,
    /// Events with an id but no marked role or no marked month.
    pub unscheduled_events: Vec<String>,
}

/// Turn the wide matrix into (event, role, month) triples.
///
/// Fails only when no event id column exists; rows without a marked role or
/// month contribute nothing.
pub fn decompose(sheet: &Sheet) -> AppResult<MatrixOutcome> {
    let kinds = classify_columns(sheet);

    let id_col = kinds
        .iter()
        .position(|k| *k == ColumnKind::EventId)
        .ok_or_else(|| AppError::MissingIdentityColumn {
            sheet: sheet.name.clone(),
        })?;

    let mut role_cols: Vec<(usize, &str)> = Vec::new();
    let mut month_cols: Vec<(usize, NaiveDate)> = Vec::new();
    let mut outcome = MatrixOutcome::default();

    for (col, kind) in kinds.iter().enumerate() {
        match kind {
            ColumnKind::Role(name) => role_cols.push((col, name.as_str())),
            ColumnKind::Month(m) => month_cols.push((col, *m)),
            ColumnKind::UnparsableMonth(h) => outcome.skipped_columns.push(h.clone()),
            _ => {}
        }
    }

    let mut triples: BTreeSet<ScheduleEntry> = BTreeSet::new();

    for row_idx in 0..sheet.rows.len() {
        let event_id = sheet.cell(row_idx, id_col).as_text();
        if event_id.is_empty() {
            if !sheet.row_is_blank(row_idx) {
                outcome.skipped_rows.push(Sheet::display_row(row_idx));
            }
            continue;
        }

        let roles: BTreeSet<&str> = role_cols
            .iter()
            .filter(|(col, _)| is_marked(sheet.cell(row_idx, *col)))
            .map(|(_, name)| *name)
            .collect();

        let months: BTreeSet<NaiveDate> = month_cols
            .iter()
            .filter(|(col, _)| is_marked(sheet.cell(row_idx, *col)))
            .map(|(_, m)| *m)
            .collect();

        if roles.is_empty() || months.is_empty() {
            outcome.unscheduled_events.push(event_id);
            continue;
        }

        for role in &roles {
            for month in &months {
                triples.insert(ScheduleEntry::new(&event_id, role, *month));
            }
        }
    }

    outcome.roles = role_cols
        .iter()
        .map(|(_, r)| r.to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    outcome.months = month_cols
        .iter()
        .map(|(_, m)| *m)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    outcome.entries = triples.into_iter().collect();

    Ok(outcome)
}
