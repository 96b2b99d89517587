//! Project Commands
//!
//! Project management plus circular navigation. Projects themselves are
//! never synced as entities; only their tasks carry them remotely.

use super::warn_unsynced;
use crate::domain::{DomainError, DomainResult, Project};
use crate::Planner;

/// Append a new empty project and switch to it. Nothing is written
/// remotely until a task is added, since an empty project has no rows.
pub async fn add_project(
    planner: &Planner,
    name: String,
    color: Option<String>,
) -> DomainResult<Project> {
    if name.is_empty() {
        return Err(DomainError::InvalidInput(
            "project name must not be empty".to_string(),
        ));
    }
    let project = Project::new(
        name,
        color.unwrap_or_else(|| Project::DEFAULT_COLOR.to_string()),
    );

    let mut state = planner.state.lock().await;
    state.projects.push(project.clone());
    state.current = state.projects.len() - 1;
    planner.persist(&state)?;
    Ok(project)
}

/// Rename and/or recolor the current project in place. Empty values keep
/// the existing ones. Remote rows still reference the old name, so
/// grouping desynchronizes on the next pull until the board is re-seeded.
pub async fn rename_project(
    planner: &Planner,
    name: Option<String>,
    color: Option<String>,
) -> DomainResult<Project> {
    let mut state = planner.state.lock().await;
    let project = state.current_project_mut();
    if let Some(name) = name.filter(|n| !n.is_empty()) {
        project.name = name;
    }
    if let Some(color) = color.filter(|c| !c.is_empty()) {
        project.color = color;
    }
    let updated = project.clone();
    planner.persist(&state)?;
    Ok(updated)
}

/// Delete the current project and all its remote rows (matched by project
/// name). An emptied project list falls back to the default set; the
/// active index resets to 0 either way.
pub async fn delete_project(planner: &Planner) -> DomainResult<()> {
    let name = {
        let mut state = planner.state.lock().await;
        let current = state.current;
        let removed = state.projects.remove(current);
        state.current = 0;
        state.clamp();
        planner.persist(&state)?;
        removed.name
    };

    let Some(owner) = planner.session.current_owner() else {
        warn_unsynced("project deletion");
        return Ok(());
    };
    if let Err(e) = planner.remote.delete_project_rows(&owner, &name).await {
        tracing::warn!(error = %e, "remote project delete failed, keeping local change");
    }
    Ok(())
}

/// Circular navigation: positive delta moves forward, negative backward.
/// Always valid, never errors. Returns the new active index.
pub async fn switch_project(planner: &Planner, delta: i64) -> DomainResult<usize> {
    let mut state = planner.state.lock().await;
    state.go(delta);
    planner.persist(&state)?;
    Ok(state.current)
}
