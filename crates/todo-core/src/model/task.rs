use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a task, unique within one screen's collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single to-do entry.
///
/// Tasks are values: every update builds a new `Task` (see
/// [`Task::with_done`], [`Task::with_title`]) rather than mutating one that
/// is already in the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub done: bool,
}

impl Task {
    /// A fresh, not-yet-done task.
    #[must_use]
    pub fn new(id: TaskId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            done: false,
        }
    }

    #[must_use]
    pub fn with_done(&self, done: bool) -> Self {
        Self {
            done,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_title(&self, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_task_is_not_done() {
        let task = Task::new(TaskId::new(7), "Buy milk");
        assert_eq!(task.id.get(), 7);
        assert_eq!(task.title, "Buy milk");
        assert!(!task.done);
    }

    #[test]
    fn with_done_keeps_id_and_title() {
        let task = Task::new(TaskId::new(1), "Walk dog");
        let done = task.with_done(true);
        assert_eq!(done.id, task.id);
        assert_eq!(done.title, task.title);
        assert!(done.done);
        assert!(!task.done, "original value is left untouched");
    }

    #[test]
    fn with_title_keeps_id_and_done() {
        let task = Task::new(TaskId::new(1), "Walk dog").with_done(true);
        let renamed = task.with_title("Walk the dog");
        assert_eq!(renamed.id, task.id);
        assert!(renamed.done);
        assert_eq!(renamed.title, "Walk the dog");
    }

    #[test]
    fn task_id_displays_raw_number() {
        assert_eq!(TaskId::new(1_700_000_000_123).to_string(), "1700000000123");
    }
}
