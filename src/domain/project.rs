//! Project Entity
//!
//! A project owns three fixed task lanes (today/backlog/done). Task ordering
//! within a lane is the insertion order.

use serde::{Deserialize, Serialize};

use super::fresh_id;
use super::task::Task;

/// One of the three fixed task buckets of a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lane {
    Today,
    Backlog,
    Done,
}

impl Lane {
    /// Lanes in display order
    pub const ALL: [Lane; 3] = [Lane::Today, Lane::Backlog, Lane::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            Lane::Today => "today",
            Lane::Backlog => "backlog",
            Lane::Done => "done",
        }
    }

    /// Unrecognized lane names decode to `Backlog`.
    pub fn from_str(s: &str) -> Self {
        match s {
            "today" => Lane::Today,
            "done" => Lane::Done,
            _ => Lane::Backlog,
        }
    }
}

/// The three task lanes of a project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Lanes {
    pub today: Vec<Task>,
    pub backlog: Vec<Task>,
    pub done: Vec<Task>,
}

impl Lanes {
    pub fn get(&self, lane: Lane) -> &Vec<Task> {
        match lane {
            Lane::Today => &self.today,
            Lane::Backlog => &self.backlog,
            Lane::Done => &self.done,
        }
    }

    pub fn get_mut(&mut self, lane: Lane) -> &mut Vec<Task> {
        match lane {
            Lane::Today => &mut self.today,
            Lane::Backlog => &mut self.backlog,
            Lane::Done => &mut self.done,
        }
    }

    /// All tasks with their lane, lanes in display order
    pub fn iter(&self) -> impl Iterator<Item = (Lane, &Task)> {
        Lane::ALL
            .into_iter()
            .flat_map(|lane| self.get(lane).iter().map(move |t| (lane, t)))
    }
}

/// A project: named, colored, with three task lanes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Opaque unique identifier (local only, not synced)
    pub id: String,
    pub name: String,
    /// Display color (hex or color name)
    pub color: String,
    pub lanes: Lanes,
}

impl Project {
    /// Color assigned to new and remotely reconstructed projects
    pub const DEFAULT_COLOR: &'static str = "#A7F3D0";

    /// Create a new project with empty lanes and a fresh id
    pub fn new(name: String, color: String) -> Self {
        Self {
            id: fresh_id(),
            name,
            color,
            lanes: Lanes::default(),
        }
    }

    /// Find the lane and position of a task by id
    pub fn locate_task(&self, task_id: &str) -> Option<(Lane, usize)> {
        for lane in Lane::ALL {
            if let Some(idx) = self.lanes.get(lane).iter().position(|t| t.id == task_id) {
                return Some((lane, idx));
            }
        }
        None
    }

    pub fn find_task(&self, task_id: &str) -> Option<(Lane, &Task)> {
        let (lane, idx) = self.locate_task(task_id)?;
        Some((lane, &self.lanes.get(lane)[idx]))
    }

    /// Remove a task from whichever lane holds it
    pub fn remove_task(&mut self, task_id: &str) -> Option<(Lane, Task)> {
        let (lane, idx) = self.locate_task(task_id)?;
        Some((lane, self.lanes.get_mut(lane).remove(idx)))
    }

    pub fn task_count(&self) -> usize {
        Lane::ALL.iter().map(|&l| self.lanes.get(l).len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Priority;

    #[test]
    fn test_lane_conversion() {
        assert_eq!(Lane::Today.as_str(), "today");
        assert_eq!(Lane::from_str("done"), Lane::Done);
        assert_eq!(Lane::from_str("someday"), Lane::Backlog);
        assert_eq!(Lane::from_str(""), Lane::Backlog);
    }

    #[test]
    fn test_find_and_remove_task() {
        let mut project = Project::new("Test".to_string(), Project::DEFAULT_COLOR.to_string());
        let task = Task::new("find me".to_string(), Priority::Med, None);
        let id = task.id.clone();
        project.lanes.get_mut(Lane::Done).push(task);

        let (lane, found) = project.find_task(&id).expect("task should exist");
        assert_eq!(lane, Lane::Done);
        assert_eq!(found.text, "find me");

        let (lane, removed) = project.remove_task(&id).expect("task should exist");
        assert_eq!(lane, Lane::Done);
        assert_eq!(removed.id, id);
        assert!(project.find_task(&id).is_none());
        assert_eq!(project.task_count(), 0);
    }

    #[test]
    fn test_lanes_iter_order() {
        let mut lanes = Lanes::default();
        lanes.done.push(Task::new("d".to_string(), Priority::Low, None));
        lanes.today.push(Task::new("t".to_string(), Priority::Low, None));
        let order: Vec<Lane> = lanes.iter().map(|(l, _)| l).collect();
        assert_eq!(order, vec![Lane::Today, Lane::Done]);
    }
}
