//! Task Entity
//!
//! A single task card: text, priority and an optional due date. A task lives
//! in exactly one lane of exactly one project at a time.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::fresh_id;

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    /// Default for newly created tasks
    #[default]
    Med,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Med => "med",
            Priority::Low => "low",
        }
    }

    /// Unrecognized values decode to `Low`, matching how remote rows with a
    /// missing priority are treated.
    pub fn from_str(s: &str) -> Self {
        match s {
            "high" => Priority::High,
            "med" => Priority::Med,
            _ => Priority::Low,
        }
    }
}

/// A task card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Opaque unique identifier
    pub id: String,
    /// Task text content
    pub text: String,
    pub priority: Priority,
    /// Optional due date
    pub due: Option<NaiveDate>,
}

impl Task {
    /// Create a new task with a fresh id
    pub fn new(text: String, priority: Priority, due: Option<NaiveDate>) -> Self {
        Self {
            id: fresh_id(),
            text,
            priority,
            due,
        }
    }
}

/// Due date `days` from today (negative values land in the past)
pub fn due_in_days(days: i64) -> NaiveDate {
    chrono::Local::now().date_naive() + chrono::Duration::days(days)
}
