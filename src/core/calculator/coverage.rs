use crate::core::calculator::percentage;
use crate::core::obligations::{Obligation, obligated_persons};
use crate::models::execution::ExecutionRecord;
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Coverage {
    /// Distinct persons in the obligation set.
    pub obligated: usize,
    /// Distinct persons with at least one execution record.
    pub trained: usize,
    pub percent: f64,
}

pub fn calculate_coverage(obligations: &[Obligation], records: &[ExecutionRecord]) -> Coverage {
    let obligated = obligated_persons(obligations).len();
    let trained = records
        .iter()
        .map(|r| r.person_id.as_str())
        .collect::<BTreeSet<_>>()
        .len();

    Coverage {
        obligated,
        trained,
        percent: percentage(trained, obligated),
    }
}
