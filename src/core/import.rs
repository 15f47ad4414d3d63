//! Workbook import: four independent batches in dependency order.
//!
//! Persons → Events → Schedule → Execution records. Each batch is parsed and
//! written inside its own transaction; a failing batch is reported and rolled
//! back without touching the batches that already committed.

use crate::config::Config;
use crate::db::log::{LogOp, ttlog_lenient};
use crate::db::pool::DbPool;
use crate::db::queries::{DanglingRefs, dangling_refs};
use crate::db::store::BatchCounts;
use crate::errors::{AppError, AppResult};
use crate::ingest::entities::{parse_events, parse_persons, parse_records};
use crate::ingest::matrix::decompose;
use crate::ingest::sheet::Workbook;
use crate::ui::messages::{error, info, success, warning};
use chrono::NaiveDate;

#[derive(Debug)]
pub enum BatchStatus {
    Committed(BatchCounts),
    Failed(AppError),
}

#[derive(Debug)]
pub struct BatchReport {
    pub entity: &'static str,
    pub sheet: String,
    pub status: BatchStatus,
    /// Row-level problems that did not stop the batch.
    pub skipped: Vec<String>,
}

impl BatchReport {
    pub fn is_committed(&self) -> bool {
        matches!(self.status, BatchStatus::Committed(_))
    }

    pub fn counts(&self) -> Option<BatchCounts> {
        match &self.status {
            BatchStatus::Committed(c) => Some(*c),
            BatchStatus::Failed(_) => None,
        }
    }
}

#[derive(Debug)]
pub struct ImportSummary {
    pub persons: BatchReport,
    pub events: BatchReport,
    pub schedule: BatchReport,
    pub records: BatchReport,
    pub dangling: DanglingRefs,
}

impl ImportSummary {
    pub fn batches(&self) -> [&BatchReport; 4] {
        [&self.persons, &self.events, &self.schedule, &self.records]
    }

    pub fn all_committed(&self) -> bool {
        self.batches().iter().all(|b| b.is_committed())
    }
}

pub struct ImportLogic;

impl ImportLogic {
    pub fn run(pool: &mut DbPool, wb: &Workbook, cfg: &Config, today: NaiveDate) -> ImportSummary {
        let persons = Self::import_persons(pool, wb, &cfg.persons_sheet);
        let events = Self::import_events(pool, wb, &cfg.events_sheet, &cfg.default_event_type);
        let schedule = Self::import_schedule(pool, wb, &cfg.matrix_sheet);
        let records = Self::import_records(pool, wb, &cfg.records_sheet, today);

        let dangling = match dangling_refs(&pool.conn) {
            Ok(d) => d,
            Err(e) => {
                warning(format!("Could not check references: {}", e));
                DanglingRefs::default()
            }
        };

        let summary = ImportSummary {
            persons,
            events,
            schedule,
            records,
            dangling,
        };

        for b in summary.batches() {
            Self::log_batch(pool, b);
        }
        if !summary.dangling.is_clean() {
            ttlog_lenient(
                &pool.conn,
                LogOp::Diagnostic,
                "references",
                &describe_dangling(&summary.dangling),
            );
        }

        summary
    }

    fn import_persons(pool: &mut DbPool, wb: &Workbook, sheet_name: &str) -> BatchReport {
        let mut skipped = Vec::new();
        let status = settle(
            wb.sheet(sheet_name)
                .ok_or_else(|| AppError::MissingSheet(sheet_name.to_string()))
                .and_then(parse_persons)
                .and_then(|parsed| {
                    skipped = parsed.skipped.iter().map(ToString::to_string).collect();
                    pool.import_persons(&parsed.items)
                }),
        );
        BatchReport {
            entity: "persons",
            sheet: sheet_name.to_string(),
            status,
            skipped,
        }
    }

    fn import_events(
        pool: &mut DbPool,
        wb: &Workbook,
        sheet_name: &str,
        event_type: &str,
    ) -> BatchReport {
        let mut skipped = Vec::new();
        let status = settle(
            wb.sheet(sheet_name)
                .ok_or_else(|| AppError::MissingSheet(sheet_name.to_string()))
                .and_then(|s| parse_events(s, event_type))
                .and_then(|parsed| {
                    skipped = parsed.skipped.iter().map(ToString::to_string).collect();
                    pool.import_events(&parsed.items)
                }),
        );
        BatchReport {
            entity: "events",
            sheet: sheet_name.to_string(),
            status,
            skipped,
        }
    }

    fn import_schedule(pool: &mut DbPool, wb: &Workbook, sheet_name: &str) -> BatchReport {
        let mut skipped = Vec::new();
        let status = settle(
            wb.sheet(sheet_name)
                .ok_or_else(|| AppError::MissingSheet(sheet_name.to_string()))
                .and_then(decompose)
                .and_then(|outcome| {
                    for row in &outcome.skipped_rows {
                        skipped.push(
                            AppError::EmptyId {
                                sheet: sheet_name.to_string(),
                                row: *row,
                            }
                            .to_string(),
                        );
                    }
                    let counts = pool.import_schedule(&outcome.entries)?;

                    // only a committed batch leaves diagnostics behind
                    for col in &outcome.skipped_columns {
                        skipped.push(format!("Unparsable month column '{}' ignored", col));
                        ttlog_lenient(
                            &pool.conn,
                            LogOp::Diagnostic,
                            sheet_name,
                            &format!("Unparsable month column '{}' excluded", col),
                        );
                    }
                    if !outcome.unscheduled_events.is_empty() {
                        ttlog_lenient(
                            &pool.conn,
                            LogOp::Diagnostic,
                            sheet_name,
                            &format!(
                                "{} events without a marked role or month: {}",
                                outcome.unscheduled_events.len(),
                                outcome.unscheduled_events.join(", ")
                            ),
                        );
                    }
                    Ok(counts)
                }),
        );
        BatchReport {
            entity: "schedule",
            sheet: sheet_name.to_string(),
            status,
            skipped,
        }
    }

    /// The execution sheet is optional; a missing sheet commits an empty batch.
    fn import_records(
        pool: &mut DbPool,
        wb: &Workbook,
        sheet_name: &str,
        today: NaiveDate,
    ) -> BatchReport {
        let mut skipped = Vec::new();
        let status = match wb.sheet(sheet_name) {
            None => BatchStatus::Committed(BatchCounts::default()),
            Some(sheet) => {
                let parsed = parse_records(sheet, today);
                skipped = parsed.skipped.iter().map(ToString::to_string).collect();
                settle(pool.import_records(&parsed.items))
            }
        };
        BatchReport {
            entity: "records",
            sheet: sheet_name.to_string(),
            status,
            skipped,
        }
    }

    fn log_batch(pool: &DbPool, b: &BatchReport) {
        let message = match &b.status {
            BatchStatus::Committed(c) => format!(
                "Committed {} rows from '{}' ({} new, {} updated, {} unchanged, {} skipped)",
                c.total(),
                b.sheet,
                c.inserted,
                c.updated,
                c.unchanged,
                b.skipped.len()
            ),
            BatchStatus::Failed(e) => format!("Batch rolled back: {}", e),
        };
        let op = if b.is_committed() {
            LogOp::Import
        } else {
            LogOp::ImportFailed
        };
        ttlog_lenient(&pool.conn, op, b.entity, &message);
    }

    pub fn print(summary: &ImportSummary) {
        for b in summary.batches() {
            match &b.status {
                BatchStatus::Committed(c) => success(format!(
                    "{:<8} {} new, {} updated, {} unchanged",
                    b.entity, c.inserted, c.updated, c.unchanged
                )),
                BatchStatus::Failed(e) => error(format!("{:<8} not imported: {}", b.entity, e)),
            }
            for s in &b.skipped {
                warning(format!("{:<8} {}", b.entity, s));
            }
        }

        if summary.dangling.is_clean() {
            info("All schedule entries and records reference known persons and events.");
        } else {
            warning(describe_dangling(&summary.dangling));
        }
    }
}

fn settle(result: AppResult<BatchCounts>) -> BatchStatus {
    match result {
        Ok(c) => BatchStatus::Committed(c),
        Err(e) => BatchStatus::Failed(e),
    }
}

fn describe_dangling(d: &DanglingRefs) -> String {
    format!(
        "Dangling references: {} schedule entries with unknown event, {} records with unknown person, {} records with unknown event",
        d.schedule_unknown_event, d.records_unknown_person, d.records_unknown_event
    )
}
