use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventCategory {
    Academic,
    Social,
    Holiday,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchoolEvent {
    pub id: String,
    pub title: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub category: EventCategory,
    pub description: String,
}
