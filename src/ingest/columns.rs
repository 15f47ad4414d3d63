//! Header resolution: raw spreadsheet headers → canonical field names.

use crate::errors::{AppError, AppResult};
use crate::ingest::schema::EntitySchema;
use crate::ingest::sheet::{Cell, Sheet};
use std::collections::HashMap;

/// Column index of every canonical field found in a sheet.
#[derive(Debug, Clone)]
pub struct ResolvedColumns {
    fields: HashMap<&'static str, usize>,
    /// Headers after renaming (canonical name where one applied).
    pub headers: Vec<String>,
}

impl ResolvedColumns {
    pub fn index(&self, field: &str) -> Option<usize> {
        self.fields.get(field).copied()
    }

    pub fn has(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Cell of `field` in `row`, or `Cell::Empty` when the column is absent.
    pub fn get<'a>(&self, sheet: &'a Sheet, row: usize, field: &str) -> &'a Cell {
        static EMPTY: Cell = Cell::Empty;
        match self.index(field) {
            Some(col) => sheet.cell(row, col),
            None => &EMPTY,
        }
    }
}

pub fn fold(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Map `headers` onto the canonical fields of `schema`.
///
/// A header matches a spelling, or the canonical field name itself, only on
/// exact equality after trimming and case-folding. The first header to match
/// a field wins. Fails with `MissingColumns` when a required field is still
/// absent after renaming.
pub fn resolve_columns(
    sheet_name: &str,
    headers: &[String],
    schema: &EntitySchema,
) -> AppResult<ResolvedColumns> {
    let lookup: HashMap<String, &'static str> = schema
        .mappings
        .iter()
        .map(|m| (fold(m.spelling), m.field))
        .chain(schema.mappings.iter().map(|m| (fold(m.field), m.field)))
        .collect();

    let mut fields: HashMap<&'static str, usize> = HashMap::new();
    let mut renamed = Vec::with_capacity(headers.len());

    for (col, raw) in headers.iter().enumerate() {
        match lookup.get(&fold(raw)) {
            Some(field) if !fields.contains_key(field) => {
                fields.insert(*field, col);
                renamed.push(field.to_string());
            }
            _ => renamed.push(raw.trim().to_string()),
        }
    }

    let missing: Vec<String> = schema
        .required
        .iter()
        .filter(|f| !fields.contains_key(*f))
        .map(|f| f.to_string())
        .collect();

    if !missing.is_empty() {
        return Err(AppError::MissingColumns {
            sheet: sheet_name.to_string(),
            missing,
            detected: renamed,
        });
    }

    Ok(ResolvedColumns {
        fields,
        headers: renamed,
    })
}

pub fn resolve_sheet(sheet: &Sheet, schema: &EntitySchema) -> AppResult<ResolvedColumns> {
    resolve_columns(&sheet.name, &sheet.header_texts(), schema)
}
