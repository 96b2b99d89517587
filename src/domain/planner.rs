//! Planner State
//!
//! The whole-board state: the project list plus the index of the project
//! currently on screen. Every mutation goes through this container and is
//! followed by a write-through save in the command layer.

use serde::{Deserialize, Serialize};

use super::project::{Lane, Project};
use super::task::{due_in_days, Priority, Task};

/// Complete planner state, persisted as a single JSON document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerState {
    /// Never empty; emptied lists fall back to the default set
    pub projects: Vec<Project>,
    /// Index of the active project, `0 <= current < projects.len()`
    pub current: usize,
}

impl PlannerState {
    /// The sample project set used on first launch and as the fallback when
    /// the last project is deleted or local data cannot be read.
    pub fn default_set() -> Self {
        let mut choir = Project::new("Community Choir".to_string(), "#6EE7B7".to_string());
        choir.lanes.today.push(Task::new(
            "Confirm Thursday rehearsal set list".to_string(),
            Priority::High,
            Some(due_in_days(0)),
        ));
        choir.lanes.backlog.push(Task::new(
            "Design the December concert poster".to_string(),
            Priority::Med,
            None,
        ));
        choir.lanes.backlog.push(Task::new(
            "Refresh the sponsor package copy".to_string(),
            Priority::Low,
            None,
        ));

        let mut outreach = Project::new("Partner Outreach".to_string(), "#93C5FD".to_string());
        outreach.lanes.today.push(Task::new(
            "Follow up on the autumn campaign assets".to_string(),
            Priority::Med,
            Some(due_in_days(1)),
        ));
        outreach.lanes.backlog.push(Task::new(
            "Organize the partner contact notes".to_string(),
            Priority::Low,
            None,
        ));

        let mut growth = Project::new("Personal Growth".to_string(), "#FBCFE8".to_string());
        growth.lanes.today.push(Task::new(
            "10 minute walk and stretch".to_string(),
            Priority::Low,
            None,
        ));
        growth.lanes.backlog.push(Task::new(
            "Record the vlog voiceover draft".to_string(),
            Priority::Med,
            None,
        ));

        Self {
            projects: vec![choir, outreach, growth],
            current: 0,
        }
    }

    /// Restore the invariants after deserialization or project removal:
    /// a non-empty project list and an in-range `current`.
    pub fn clamp(&mut self) {
        if self.projects.is_empty() {
            *self = Self::default_set();
        }
        if self.current >= self.projects.len() {
            self.current = 0;
        }
    }

    pub fn current_project(&self) -> &Project {
        &self.projects[self.current]
    }

    pub fn current_project_mut(&mut self) -> &mut Project {
        &mut self.projects[self.current]
    }

    /// Circular navigation; a full cycle of `projects.len()` steps returns
    /// to the starting project.
    pub fn go(&mut self, delta: i64) {
        let len = self.projects.len() as i64;
        self.current = (self.current as i64 + delta).rem_euclid(len) as usize;
    }

    /// Find a task anywhere in the board: (project index, lane, position)
    pub fn locate_task(&self, task_id: &str) -> Option<(usize, Lane, usize)> {
        for (pidx, project) in self.projects.iter().enumerate() {
            if let Some((lane, idx)) = project.locate_task(task_id) {
                return Some((pidx, lane, idx));
            }
        }
        None
    }

    pub fn find_task(&self, task_id: &str) -> Option<(usize, Lane, &Task)> {
        let (pidx, lane, idx) = self.locate_task(task_id)?;
        Some((pidx, lane, &self.projects[pidx].lanes.get(lane)[idx]))
    }

    /// Remove a task from whichever project and lane hold it
    pub fn remove_task(&mut self, task_id: &str) -> Option<(usize, Lane, Task)> {
        let (pidx, lane, idx) = self.locate_task(task_id)?;
        Some((pidx, lane, self.projects[pidx].lanes.get_mut(lane).remove(idx)))
    }
}
