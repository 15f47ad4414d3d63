//! Workbook ingestion: sheet loading, header resolution, matrix decomposition
//! and row parsing into domain records.

pub mod columns;
pub mod entities;
pub mod matrix;
pub mod schema;
pub mod sentinel;
pub mod sheet;
pub mod workbook;
