use serde::Serialize;

/// A member of the organization. `id` is the natural key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Person {
    pub id: String,
    pub name: String,
    pub role: String,
    pub process: String,
    pub workplace: String,
}

impl Person {
    pub fn new(id: &str, name: &str, role: &str, process: &str, workplace: &str) -> Self {
        Self {
            id: id.trim().to_string(),
            name: name.to_string(),
            role: role.trim().to_string(),
            process: process.to_string(),
            workplace: workplace.to_string(),
        }
    }
}
