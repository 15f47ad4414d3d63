use crate::core::calculator::percentage;
use crate::models::execution::ExecutionRecord;
use crate::models::schedule::ScheduleEntry;
use crate::utils::date::month_start;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyCompliance {
    pub month: NaiveDate,
    pub scheduled: usize,
    pub executed: usize,
    pub percent: f64,
}

/// One row per scheduled month, oldest first. Executions in months with no
/// schedule are not reported.
pub fn calculate_monthly(
    entries: &[ScheduleEntry],
    records: &[ExecutionRecord],
) -> Vec<MonthlyCompliance> {
    let mut scheduled: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for e in entries {
        *scheduled.entry(month_start(e.month)).or_default() += 1;
    }

    let mut executed: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for r in records {
        *executed.entry(month_start(r.execution_date)).or_default() += 1;
    }

    scheduled
        .into_iter()
        .map(|(month, sched)| {
            let exec = executed.get(&month).copied().unwrap_or(0);
            MonthlyCompliance {
                month,
                scheduled: sched,
                executed: exec,
                percent: percentage(exec, sched),
            }
        })
        .collect()
}
