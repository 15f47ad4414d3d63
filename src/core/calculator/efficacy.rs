use crate::core::calculator::percentage;
use crate::models::execution::ExecutionRecord;
use crate::models::schedule::ScheduleEntry;
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Efficacy {
    /// Schedule triples (event, role, month).
    pub scheduled: usize,
    /// Distinct (event, execution date) pairs.
    pub executed: usize,
    pub percent: f64,
}

/// Numerator and denominator count different units: executed sessions
/// against scheduled triples.
pub fn calculate_efficacy(entries: &[ScheduleEntry], records: &[ExecutionRecord]) -> Efficacy {
    let scheduled = entries.len();
    let executed = records
        .iter()
        .map(|r| (r.event_id.as_str(), r.execution_date))
        .collect::<BTreeSet<_>>()
        .len();

    Efficacy {
        scheduled,
        executed,
        percent: percentage(executed, scheduled),
    }
}
