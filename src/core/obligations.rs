//! Role-based obligation inheritance.
//!
//! A person is obligated to every event scheduled for their current role in a
//! given month. The join is always computed from committed state and never
//! stored.

use crate::db::pool::DbPool;
use crate::db::queries::{
    ScheduleFilter, get_person, list_persons, list_schedule, schedule_exists,
};
use crate::errors::{AppError, AppResult};
use crate::models::person::Person;
use crate::models::schedule::ScheduleEntry;
use crate::utils::date::month_start;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Obligation {
    pub person_id: String,
    pub event_id: String,
    pub role: String,
    pub month: NaiveDate,
}

/// Cross-join schedule entries with the persons holding each entry's role.
pub fn expand(entries: &[ScheduleEntry], persons: &[Person]) -> Vec<Obligation> {
    let mut by_role: HashMap<&str, Vec<&Person>> = HashMap::new();
    for p in persons {
        by_role.entry(p.role.as_str()).or_default().push(p);
    }

    let mut out = Vec::new();
    for e in entries {
        let Some(holders) = by_role.get(e.role.as_str()) else {
            continue;
        };
        for p in holders {
            out.push(Obligation {
                person_id: p.id.clone(),
                event_id: e.event_id.clone(),
                role: e.role.clone(),
                month: e.month,
            });
        }
    }
    out
}

/// Distinct persons appearing in an obligation set.
pub fn obligated_persons(obligations: &[Obligation]) -> BTreeSet<&str> {
    obligations.iter().map(|o| o.person_id.as_str()).collect()
}

pub struct ObligationLogic;

impl ObligationLogic {
    /// Obligation set of one (role, month) pair.
    pub fn for_role_month(pool: &DbPool, role: &str, month: NaiveDate) -> AppResult<Vec<Obligation>> {
        let month = month_start(month);
        pool.read_snapshot(|conn| {
            let filter = ScheduleFilter {
                role: Some(role),
                month: Some(month),
                event_id: None,
            };
            let entries = list_schedule(conn, &filter)?;
            let persons = list_persons(conn, Some(role))?;
            Ok(expand(&entries, &persons))
        })
    }

    /// Obligation set across every role and month.
    pub fn all(pool: &DbPool) -> AppResult<Vec<Obligation>> {
        pool.read_snapshot(|conn| {
            let entries = list_schedule(conn, &ScheduleFilter::default())?;
            let persons = list_persons(conn, None)?;
            Ok(expand(&entries, &persons))
        })
    }
}

/// Whether an attendance matches the schedule of the person's current role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleMatch {
    pub role: String,
    pub month: NaiveDate,
    pub scheduled: bool,
}

pub fn is_scheduled(
    pool: &DbPool,
    person_id: &str,
    event_id: &str,
    date: NaiveDate,
) -> AppResult<ScheduleMatch> {
    pool.read_snapshot(|conn| {
        let person = get_person(conn, person_id)?
            .ok_or_else(|| AppError::PersonNotFound(person_id.to_string()))?;
        let month = month_start(date);
        let scheduled = schedule_exists(conn, event_id, &person.role, month)?;
        Ok(ScheduleMatch {
            role: person.role,
            month,
            scheduled,
        })
    })
}
