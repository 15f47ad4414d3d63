use chrono::NaiveDate;
use serde::Serialize;

/// Outcome stored when a record carries none.
pub const DEFAULT_RESULT: &str = "Approved";

/// A stored attendance record. `id` is a monotonic surrogate key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionRecord {
    pub id: i64,
    pub person_id: String,
    pub event_id: String,
    pub execution_date: NaiveDate,
    pub hours: f64,
    pub result: String,
}

/// An attendance record before it is appended; unset fields get defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExecutionRecord {
    pub person_id: String,
    pub event_id: String,
    pub execution_date: NaiveDate,
    pub hours: Option<f64>,
    pub result: Option<String>,
}

impl NewExecutionRecord {
    pub fn new(person_id: &str, event_id: &str, execution_date: NaiveDate) -> Self {
        Self {
            person_id: person_id.trim().to_string(),
            event_id: event_id.trim().to_string(),
            execution_date,
            hours: None,
            result: None,
        }
    }

    pub fn hours(mut self, hours: f64) -> Self {
        self.hours = Some(hours);
        self
    }

    pub fn result(mut self, result: &str) -> Self {
        self.result = Some(result.to_string());
        self
    }

    /// The outcome to store: the given one unless blank.
    pub fn effective_result(&self) -> String {
        match &self.result {
            Some(r) if !r.trim().is_empty() => r.trim().to_string(),
            _ => DEFAULT_RESULT.to_string(),
        }
    }
}
