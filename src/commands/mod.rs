//! Command Layer
//!
//! Mutation command handlers. Every command takes the shared `Planner`
//! container, applies its optimistic local mutation (persisted
//! write-through), then issues the corresponding best-effort remote write.
//! Remote failures never roll the local change back.

mod project_cmd;
mod sync_cmd;
mod task_cmd;

pub use project_cmd::{add_project, delete_project, rename_project, switch_project};
pub use sync_cmd::{
    complete_sign_in, configure_remote, remote_config, sign_in, sign_out, start_realtime,
    sync_now, sync_status,
};
pub use task_cmd::{add_task, delete_task, edit_task, move_task, TaskDraft};

/// Warn that a local-only change will be reverted by the next remote-wins
/// pull
pub(crate) fn warn_unsynced(action: &str) {
    tracing::warn!(
        "not signed in; {} stays local and will not survive the next sync",
        action
    );
}
