//! Remote Row Codec
//!
//! Converts between the nested {project -> lane -> task} tree and the flat
//! remote representation: one row per task, carrying the project name, the
//! lane and the owner. No Project entity exists remotely; projects are
//! reconstructed by grouping rows on their project name.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Lane, PlannerState, Priority, Project, Task};

/// Project name assigned to rows that arrive without one
pub const FALLBACK_PROJECT: &str = "General";

/// Flat remote representation of a single task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRow {
    /// Task id, the upsert conflict key
    pub id: String,
    /// Identity the row belongs to
    pub owner: String,
    /// Project name; together with `lane` it replaces the ownership path
    #[serde(default)]
    pub project: String,
    #[serde(default)]
    pub lane: String,
    pub text: String,
    pub priority: Option<String>,
    pub due: Option<NaiveDate>,
    pub updated_at: DateTime<Utc>,
}

/// Pure projection of a task into its remote row, stamped with the current
/// time. Text is passed through unvalidated.
pub fn task_to_row(project_name: &str, lane: Lane, task: &Task, owner: &str) -> TaskRow {
    TaskRow {
        id: task.id.clone(),
        owner: owner.to_string(),
        project: project_name.to_string(),
        lane: lane.as_str().to_string(),
        text: task.text.clone(),
        priority: Some(task.priority.as_str().to_string()),
        due: task.due,
        updated_at: Utc::now(),
    }
}

/// Flatten a whole board into rows, projects in list order and lanes in
/// display order. Used to seed an uninitialized remote store.
pub fn state_to_rows(state: &PlannerState, owner: &str) -> Vec<TaskRow> {
    let mut rows = Vec::new();
    for project in &state.projects {
        for (lane, task) in project.lanes.iter() {
            rows.push(task_to_row(&project.name, lane, task, owner));
        }
    }
    rows
}

/// Rebuild a board from remote rows.
///
/// Rows group by project name in first-seen order; each task lands in the
/// lane its row names (unrecognized lanes fall back to backlog). An empty
/// row set yields the default project set, a deliberate fallback rather
/// than an error. Reconstructed projects get fresh ids and the default
/// color; project identity is not stored remotely.
pub fn rows_to_state(rows: &[TaskRow]) -> PlannerState {
    if rows.is_empty() {
        return PlannerState::default_set();
    }

    let mut projects: Vec<Project> = Vec::new();
    let mut by_name: HashMap<String, usize> = HashMap::new();

    for row in rows {
        let name = if row.project.is_empty() {
            FALLBACK_PROJECT
        } else {
            row.project.as_str()
        };
        let idx = *by_name.entry(name.to_string()).or_insert_with(|| {
            projects.push(Project::new(
                name.to_string(),
                Project::DEFAULT_COLOR.to_string(),
            ));
            projects.len() - 1
        });

        let task = Task {
            id: row.id.clone(),
            text: row.text.clone(),
            priority: row
                .priority
                .as_deref()
                .map_or(Priority::Low, Priority::from_str),
            due: row.due,
        };
        projects[idx]
            .lanes
            .get_mut(Lane::from_str(&row.lane))
            .push(task);
    }

    PlannerState {
        projects,
        current: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::due_in_days;

    fn row(id: &str, project: &str, lane: &str, text: &str) -> TaskRow {
        TaskRow {
            id: id.to_string(),
            owner: "owner-1".to_string(),
            project: project.to_string(),
            lane: lane.to_string(),
            text: text.to_string(),
            priority: Some("med".to_string()),
            due: None,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_rows_fall_back_to_defaults() {
        let state = rows_to_state(&[]);
        let defaults = PlannerState::default_set();
        assert_eq!(state.current, 0);
        let names: Vec<&str> = state.projects.iter().map(|p| p.name.as_str()).collect();
        let expected: Vec<&str> = defaults.projects.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_grouping_preserves_first_seen_order() {
        let rows = vec![
            row("t1", "Beta", "today", "one"),
            row("t2", "Alpha", "backlog", "two"),
            row("t3", "Beta", "done", "three"),
        ];
        let state = rows_to_state(&rows);
        let names: Vec<&str> = state.projects.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Beta", "Alpha"]);
        assert_eq!(state.current, 0);
        assert_eq!(state.projects[0].lanes.today[0].text, "one");
        assert_eq!(state.projects[0].lanes.done[0].text, "three");
        assert_eq!(state.projects[1].lanes.backlog[0].text, "two");
    }

    #[test]
    fn test_missing_project_and_lane_defaults() {
        let mut r = row("t1", "", "", "stray");
        r.priority = None;
        let state = rows_to_state(&[r]);
        assert_eq!(state.projects.len(), 1);
        assert_eq!(state.projects[0].name, FALLBACK_PROJECT);
        let task = &state.projects[0].lanes.backlog[0];
        assert_eq!(task.text, "stray");
        assert_eq!(task.priority, Priority::Low);
    }

    #[test]
    fn test_unrecognized_lane_lands_in_backlog() {
        let state = rows_to_state(&[row("t1", "P", "doing", "x")]);
        assert!(state.projects[0].lanes.today.is_empty());
        assert_eq!(state.projects[0].lanes.backlog.len(), 1);
    }

    #[test]
    fn test_task_to_row_passes_text_through() {
        let task = Task::new("".to_string(), Priority::High, Some(due_in_days(2)));
        let r = task_to_row("P", Lane::Today, &task, "owner-1");
        assert_eq!(r.text, "");
        assert_eq!(r.lane, "today");
        assert_eq!(r.priority.as_deref(), Some("high"));
        assert_eq!(r.due, task.due);
        assert_eq!(r.owner, "owner-1");
    }

    #[test]
    fn test_round_trip_reconstructs_lane_grouping() {
        let state = PlannerState::default_set();
        let rows = state_to_rows(&state, "owner-1");
        assert_eq!(
            rows.len(),
            state.projects.iter().map(|p| p.task_count()).sum::<usize>()
        );

        let rebuilt = rows_to_state(&rows);
        assert_eq!(rebuilt.projects.len(), state.projects.len());
        for (orig, back) in state.projects.iter().zip(rebuilt.projects.iter()) {
            assert_eq!(orig.name, back.name);
            for lane in Lane::ALL {
                let orig_tasks: Vec<(&str, &str)> = orig
                    .lanes
                    .get(lane)
                    .iter()
                    .map(|t| (t.id.as_str(), t.text.as_str()))
                    .collect();
                let back_tasks: Vec<(&str, &str)> = back
                    .lanes
                    .get(lane)
                    .iter()
                    .map(|t| (t.id.as_str(), t.text.as_str()))
                    .collect();
                assert_eq!(orig_tasks, back_tasks);
            }
        }
    }
}
