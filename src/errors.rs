//! Unified application error type.
//! All modules (ingest, db, core, cli) return AppError so that a failed
//! sheet can be reported with the same shape no matter where it broke.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Workbook reading
    // ---------------------------
    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unsupported workbook: {0}")]
    UnsupportedWorkbook(String),

    #[error("Sheet '{0}' not found in workbook")]
    MissingSheet(String),

    // ---------------------------
    // Sheet interpretation
    // ---------------------------
    #[error("Sheet '{sheet}' is missing required columns {missing:?}. Detected columns: {detected:?}")]
    MissingColumns {
        sheet: String,
        missing: Vec<String>,
        detected: Vec<String>,
    },

    #[error("Sheet '{sheet}' has no event id column")]
    MissingIdentityColumn { sheet: String },

    #[error("Sheet '{sheet}', row {row}: empty id")]
    EmptyId { sheet: String, row: usize },

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid month format: {0}")]
    InvalidMonth(String),

    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    // ---------------------------
    // Lookup errors
    // ---------------------------
    #[error("Person not found: {0}")]
    PersonNotFound(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
