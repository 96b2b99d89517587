//! Task Commands
//!
//! Add, edit, move and delete tasks. Local state changes immediately; the
//! remote row follows best-effort when an identity is present.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::warn_unsynced;
use crate::domain::{DomainError, DomainResult, Lane, Priority, Task};
use crate::repository::task_to_row;
use crate::Planner;

/// Input for a new task; priority defaults to `Med`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDraft {
    pub text: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub due: Option<NaiveDate>,
}

/// Append a fresh task to `lane` of the current project
pub async fn add_task(planner: &Planner, lane: Lane, draft: TaskDraft) -> DomainResult<Task> {
    let task = Task::new(draft.text, draft.priority, draft.due);

    let project_name = {
        let mut state = planner.state.lock().await;
        let project = state.current_project_mut();
        let name = project.name.clone();
        project.lanes.get_mut(lane).push(task.clone());
        planner.persist(&state)?;
        name
    };

    push_row(planner, &project_name, lane, &task).await;
    Ok(task)
}

/// Merge the provided fields into the task with `task_id`, wherever it
/// lives on the board
pub async fn edit_task(
    planner: &Planner,
    task_id: &str,
    text: Option<String>,
    priority: Option<Priority>,
    due: Option<NaiveDate>,
) -> DomainResult<Task> {
    let (project_name, lane, updated) = {
        let mut state = planner.state.lock().await;
        let (pidx, lane, idx) = state
            .locate_task(task_id)
            .ok_or_else(|| DomainError::NotFound(format!("task {}", task_id)))?;
        let project_name = state.projects[pidx].name.clone();

        let existing = &mut state.projects[pidx].lanes.get_mut(lane)[idx];
        let updated = Task {
            id: existing.id.clone(),
            text: text.unwrap_or_else(|| existing.text.clone()),
            priority: priority.unwrap_or(existing.priority),
            due: due.or(existing.due),
        };
        *existing = updated.clone();

        planner.persist(&state)?;
        (project_name, lane, updated)
    };

    push_row(planner, &project_name, lane, &updated).await;
    Ok(updated)
}

/// Move a task of the current project into `target`, appending at the end
pub async fn move_task(planner: &Planner, task_id: &str, target: Lane) -> DomainResult<()> {
    {
        let mut state = planner.state.lock().await;
        let project = state.current_project_mut();
        let (lane, idx) = project.locate_task(task_id).ok_or_else(|| {
            DomainError::NotFound(format!("task {} in current project", task_id))
        })?;
        if lane == target {
            return Ok(());
        }
        let task = project.lanes.get_mut(lane).remove(idx);
        project.lanes.get_mut(target).push(task);
        planner.persist(&state)?;
    }

    let Some(owner) = planner.session.current_owner() else {
        warn_unsynced("task move");
        return Ok(());
    };
    if let Err(e) = planner
        .remote
        .update_lane(task_id, &owner, target, chrono::Utc::now())
        .await
    {
        tracing::warn!(error = %e, "remote lane update failed, keeping local change");
    }
    Ok(())
}

/// Remove a task from whichever lane holds it
pub async fn delete_task(planner: &Planner, task_id: &str) -> DomainResult<()> {
    {
        let mut state = planner.state.lock().await;
        state
            .remove_task(task_id)
            .ok_or_else(|| DomainError::NotFound(format!("task {}", task_id)))?;
        planner.persist(&state)?;
    }

    let Some(owner) = planner.session.current_owner() else {
        warn_unsynced("task deletion");
        return Ok(());
    };
    if let Err(e) = planner.remote.delete_row(task_id, &owner).await {
        tracing::warn!(error = %e, "remote delete failed, keeping local change");
    }
    Ok(())
}

/// Best-effort upsert of one task row, gated on identity presence
async fn push_row(planner: &Planner, project_name: &str, lane: Lane, task: &Task) {
    let Some(owner) = planner.session.current_owner() else {
        warn_unsynced("task change");
        return;
    };
    let row = task_to_row(project_name, lane, task, &owner);
    if let Err(e) = planner.remote.upsert_rows(std::slice::from_ref(&row)).await {
        tracing::warn!(error = %e, "remote upsert failed, keeping local change");
    }
}
