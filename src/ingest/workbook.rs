//! Workbook loaders.
//!
//! Spreadsheet files (`.xlsx`, `.xlsm`, `.xlsb`, `.xls`, `.ods`) are read with
//! calamine. A directory is read as a workbook whose sheets are the `*.csv`
//! files it contains, each named after its file stem.

use crate::errors::{AppError, AppResult};
use crate::ingest::sheet::{Cell, Sheet, Workbook};
use crate::utils::date::parse_date_like;
use calamine::{Data, Reader, open_workbook_auto};
use std::fs;
use std::path::Path;

const SPREADSHEET_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

pub fn load_workbook(path: &Path) -> AppResult<Workbook> {
    if path.is_dir() {
        return load_csv_dir(path);
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    if SPREADSHEET_EXTENSIONS.contains(&ext.as_str()) {
        load_spreadsheet(path)
    } else {
        Err(AppError::UnsupportedWorkbook(path.display().to_string()))
    }
}

fn load_spreadsheet(path: &Path) -> AppResult<Workbook> {
    let mut wb = open_workbook_auto(path)?;
    let mut sheets = Vec::new();

    for name in wb.sheet_names() {
        let range = wb.worksheet_range(&name)?;
        let mut rows = range.rows();

        let headers: Vec<Cell> = match rows.next() {
            Some(h) => h.iter().map(to_cell).collect(),
            None => Vec::new(),
        };
        let body: Vec<Vec<Cell>> = rows.map(|r| r.iter().map(to_cell).collect()).collect();

        sheets.push(Sheet::new(name, headers, body));
    }

    Ok(Workbook::new(sheets))
}

fn to_cell(d: &Data) -> Cell {
    match d {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::String(s) => Cell::text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Bool(*b),
        // as_datetime honours the workbook's 1900/1904 date system
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(t) if dt.is_datetime() => Cell::Date(t.date()),
            _ => Cell::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) => parse_date_like(s)
            .map(Cell::Date)
            .unwrap_or_else(|| Cell::text(s.clone())),
        Data::DurationIso(s) => Cell::text(s.clone()),
    }
}

fn load_csv_dir(dir: &Path) -> AppResult<Workbook> {
    let mut paths: Vec<_> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
        })
        .collect();
    paths.sort();

    let mut sheets = Vec::with_capacity(paths.len());
    for p in paths {
        let name = p
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        sheets.push(read_csv_sheet(&name, &p)?);
    }

    Ok(Workbook::new(sheets))
}

pub fn read_csv_sheet(name: &str, path: &Path) -> AppResult<Sheet> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let headers: Vec<Cell> = rdr
        .headers()?
        .iter()
        .map(|h| Cell::text(h.trim_start_matches('\u{feff}')))
        .collect();

    let mut rows = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        rows.push(rec.iter().map(Cell::text).collect());
    }

    Ok(Sheet::new(name, headers, rows))
}
