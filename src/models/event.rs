use serde::Serialize;

pub const DEFAULT_DURATION_HOURS: f64 = 1.0;

/// A training event (course, workshop, talk). `id` is the natural key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub id: String,
    pub event_type: String,
    pub topic: String,
    pub name: String,
    pub scheme: String,
    pub duration_hours: f64, // > 0, defaults to 1.0
}

impl Event {
    pub fn new(id: &str, topic: &str, name: &str, scheme: &str) -> Self {
        Self {
            id: id.trim().to_string(),
            event_type: String::new(),
            topic: topic.to_string(),
            name: name.to_string(),
            scheme: scheme.to_string(),
            duration_hours: DEFAULT_DURATION_HOURS,
        }
    }

    pub fn with_type(mut self, event_type: &str) -> Self {
        self.event_type = event_type.to_string();
        self
    }

    /// Non-positive or non-finite durations fall back to the default.
    pub fn with_duration(mut self, hours: Option<f64>) -> Self {
        self.duration_hours = sanitize_duration(hours);
        self
    }
}

pub fn sanitize_duration(hours: Option<f64>) -> f64 {
    match hours {
        Some(h) if h.is_finite() && h > 0.0 => h,
        _ => DEFAULT_DURATION_HOURS,
    }
}
