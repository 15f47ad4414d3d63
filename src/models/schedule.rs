use crate::utils::date::month_start;
use chrono::NaiveDate;
use serde::Serialize;

/// One (event, role, month) obligation triple.
///
/// `month` is always the first day of its month; construct through
/// [`ScheduleEntry::new`] to keep that invariant.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ScheduleEntry {
    pub event_id: String,
    pub role: String,
    pub month: NaiveDate,
}

impl ScheduleEntry {
    pub fn new(event_id: &str, role: &str, month: NaiveDate) -> Self {
        Self {
            event_id: event_id.trim().to_string(),
            role: role.trim().to_string(),
            month: month_start(month),
        }
    }
}
