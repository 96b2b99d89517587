//! Domain Layer
//!
//! Contains all domain entities and core business rules.
//! This layer has NO external dependencies (except serde for serialization,
//! chrono for dates and uuid for identifiers).

mod error;
mod planner;
mod project;
mod task;

pub use error::{DomainError, DomainResult};
pub use planner::PlannerState;
pub use project::{Lane, Lanes, Project};
pub use task::{due_in_days, Priority, Task};

use uuid::Uuid;

/// Fresh opaque identifier for tasks and projects.
pub(crate) fn fresh_id() -> String {
    Uuid::new_v4().to_string()
}
