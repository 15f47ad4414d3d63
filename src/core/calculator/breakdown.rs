//! Descriptive aggregates over execution records.

use crate::core::calculator::round2;
use crate::models::event::Event;
use crate::models::execution::ExecutionRecord;
use crate::models::person::Person;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonHours {
    pub person_id: String,
    /// Empty when the person is unknown to the store.
    pub name: String,
    pub role: String,
    pub hours: f64,
}

/// Total hours per person, highest first.
pub fn hours_by_person(records: &[ExecutionRecord], persons: &[Person]) -> Vec<PersonHours> {
    let index: HashMap<&str, &Person> = persons.iter().map(|p| (p.id.as_str(), p)).collect();

    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for r in records {
        *totals.entry(r.person_id.as_str()).or_default() += r.hours;
    }

    let mut out: Vec<PersonHours> = totals
        .into_iter()
        .map(|(id, hours)| {
            let (name, role) = index
                .get(id)
                .map(|p| (p.name.clone(), p.role.clone()))
                .unwrap_or_default();
            PersonHours {
                person_id: id.to_string(),
                name,
                role,
                hours: round2(hours),
            }
        })
        .collect();

    out.sort_by(|a, b| {
        b.hours
            .total_cmp(&a.hours)
            .then_with(|| a.person_id.cmp(&b.person_id))
    });
    out
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicResult {
    /// Empty when the event is unknown to the store.
    pub topic: String,
    pub result: String,
    pub count: usize,
}

/// Record counts per (event topic, result).
pub fn results_by_topic(records: &[ExecutionRecord], events: &[Event]) -> Vec<TopicResult> {
    let topics: HashMap<&str, &str> = events
        .iter()
        .map(|e| (e.id.as_str(), e.topic.as_str()))
        .collect();

    let mut counts: BTreeMap<(&str, &str), usize> = BTreeMap::new();
    for r in records {
        let topic = topics.get(r.event_id.as_str()).copied().unwrap_or("");
        *counts.entry((topic, r.result.as_str())).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|((topic, result), count)| TopicResult {
            topic: topic.to_string(),
            result: result.to_string(),
            count,
        })
        .collect()
}
