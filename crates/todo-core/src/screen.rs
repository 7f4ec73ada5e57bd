//! Screen controller: the single owner of the task collection.
//!
//! Every mutation replaces the whole collection with a freshly built one
//! (see the free functions [`appended`], [`toggled`], [`retitled`] and
//! [`without`]); nothing edits a `Task` that is already in the list.
//!
//! User-facing prompts are part of the state. `remove` does not delete
//! anything by itself: it raises [`Prompt::ConfirmRemove`], and the task is
//! only dropped when the prompt is answered with [`Choice::Yes`]. A duplicate
//! title on `add` raises [`Prompt::DuplicateTitle`], which blocks until it is
//! dismissed.

use crate::error::TodoError;
use crate::ids::{IdSource, IdStrategy};
use crate::model::task::{Task, TaskId};
use tracing::{debug, info};

pub const REMOVE_PROMPT_TITLE: &str = "Remove item";
pub const REMOVE_PROMPT_MESSAGE: &str = "Are you sure you want to remove this item?";
pub const DUPLICATE_PROMPT_TITLE: &str = "Task already exists";
pub const DUPLICATE_PROMPT_MESSAGE: &str = "You cannot add a task with the same name";

/// Intents a row can raise towards whoever owns the collection.
pub trait TaskActions {
    fn toggle_done(&mut self, id: TaskId);
    fn remove(&mut self, id: TaskId);
    fn edit(&mut self, id: TaskId, new_title: &str);
}

/// A button on a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    No,
    Yes,
    Ok,
}

impl Choice {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::No => "No",
            Self::Yes => "Yes",
            Self::Ok => "OK",
        }
    }
}

/// A blocking modal the screen is waiting on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    /// Two-option confirmation before a task is deleted.
    ConfirmRemove { id: TaskId },
    /// Single-button notice after `add` was rejected.
    DuplicateTitle { title: String },
}

impl Prompt {
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::ConfirmRemove { .. } => REMOVE_PROMPT_TITLE,
            Self::DuplicateTitle { .. } => DUPLICATE_PROMPT_TITLE,
        }
    }

    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::ConfirmRemove { .. } => REMOVE_PROMPT_MESSAGE,
            Self::DuplicateTitle { .. } => DUPLICATE_PROMPT_MESSAGE,
        }
    }

    /// Buttons in display order. The first one is the cancel/dismiss choice.
    #[must_use]
    pub const fn choices(&self) -> &'static [Choice] {
        match self {
            Self::ConfirmRemove { .. } => &[Choice::No, Choice::Yes],
            Self::DuplicateTitle { .. } => &[Choice::Ok],
        }
    }
}

// ---------------------------------------------------------------------------
// Pure collection updates
// ---------------------------------------------------------------------------

/// Returns the first task whose title is exactly `title`.
#[must_use]
pub fn find_by_title<'a>(tasks: &'a [Task], title: &str) -> Option<&'a Task> {
    tasks.iter().find(|task| task.title == title)
}

/// `tasks` followed by `task`.
#[must_use]
pub fn appended(tasks: &[Task], task: Task) -> Vec<Task> {
    let mut next = Vec::with_capacity(tasks.len() + 1);
    next.extend_from_slice(tasks);
    next.push(task);
    next
}

/// `tasks` with the `done` flag of `id` inverted.
#[must_use]
pub fn toggled(tasks: &[Task], id: TaskId) -> Vec<Task> {
    tasks
        .iter()
        .map(|task| {
            if task.id == id {
                task.with_done(!task.done)
            } else {
                task.clone()
            }
        })
        .collect()
}

/// `tasks` with the title of `id` replaced by `new_title`.
#[must_use]
pub fn retitled(tasks: &[Task], id: TaskId, new_title: &str) -> Vec<Task> {
    tasks
        .iter()
        .map(|task| {
            if task.id == id {
                task.with_title(new_title)
            } else {
                task.clone()
            }
        })
        .collect()
}

/// `tasks` without `id`.
#[must_use]
pub fn without(tasks: &[Task], id: TaskId) -> Vec<Task> {
    tasks.iter().filter(|task| task.id != id).cloned().collect()
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Owns the ordered task collection and the prompt currently on screen.
pub struct ScreenController {
    tasks: Vec<Task>,
    pending: Option<Prompt>,
    ids: Box<dyn IdSource>,
}

impl Default for ScreenController {
    fn default() -> Self {
        Self::with_strategy(IdStrategy::default())
    }
}

impl ScreenController {
    #[must_use]
    pub fn new(ids: Box<dyn IdSource>) -> Self {
        Self {
            tasks: Vec::new(),
            pending: None,
            ids,
        }
    }

    #[must_use]
    pub fn with_strategy(strategy: IdStrategy) -> Self {
        Self::new(strategy.source())
    }

    /// The live collection, in insertion order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Number of tasks; always derived from the collection.
    #[must_use]
    pub fn count(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub const fn pending_prompt(&self) -> Option<&Prompt> {
        self.pending.as_ref()
    }

    /// Append a new task, unless one with exactly this title already exists.
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::DuplicateTitle`] when the title is taken. The
    /// collection is left unchanged and [`Prompt::DuplicateTitle`] becomes
    /// pending, unless another prompt is already open: that prompt stays and
    /// the notice is dropped, so the returned error is the only signal.
    pub fn add(&mut self, title: &str) -> Result<TaskId, TodoError> {
        if find_by_title(&self.tasks, title).is_some() {
            info!(title, "task.add rejected: duplicate title");
            self.raise(Prompt::DuplicateTitle {
                title: title.to_string(),
            });
            return Err(TodoError::DuplicateTitle {
                title: title.to_string(),
            });
        }

        let id = self.ids.next_id();
        self.tasks = appended(&self.tasks, Task::new(id, title));
        debug!(%id, title, count = self.count(), "task.add");
        Ok(id)
    }

    /// Flip `done` on `id`. Unknown ids are ignored.
    pub fn toggle_done(&mut self, id: TaskId) {
        self.tasks = toggled(&self.tasks, id);
        debug!(%id, "task.toggle");
    }

    /// Replace the title of `id`. No uniqueness check; unknown ids are ignored.
    pub fn edit(&mut self, id: TaskId, new_title: &str) {
        self.tasks = retitled(&self.tasks, id, new_title);
        debug!(%id, new_title, "task.edit");
    }

    /// Ask for confirmation before removing `id`. Unknown ids are ignored.
    pub fn remove(&mut self, id: TaskId) {
        if self.get(id).is_none() {
            return;
        }
        self.raise(Prompt::ConfirmRemove { id });
    }

    /// Resolve the pending prompt.
    ///
    /// Returns the prompt that was answered, or `None` if nothing was pending.
    pub fn answer(&mut self, choice: Choice) -> Option<Prompt> {
        let prompt = self.pending.take()?;
        if let Prompt::ConfirmRemove { id } = prompt {
            if choice == Choice::Yes {
                self.tasks = without(&self.tasks, id);
                debug!(%id, count = self.count(), "task.remove");
            } else {
                debug!(%id, "task.remove cancelled");
            }
        }
        Some(prompt)
    }

    fn raise(&mut self, prompt: Prompt) {
        if let Some(current) = &self.pending {
            info!(?current, dropped = ?prompt, "prompt already pending; new prompt dropped");
            return;
        }
        self.pending = Some(prompt);
    }
}

impl TaskActions for ScreenController {
    fn toggle_done(&mut self, id: TaskId) {
        Self::toggle_done(self, id);
    }

    fn remove(&mut self, id: TaskId) {
        Self::remove(self, id);
    }

    fn edit(&mut self, id: TaskId, new_title: &str) {
        Self::edit(self, id, new_title);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequenceIds;

    fn screen() -> ScreenController {
        ScreenController::new(Box::new(SequenceIds::default()))
    }

    fn titles(screen: &ScreenController) -> Vec<&str> {
        screen.tasks().iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn starts_empty() {
        let screen = screen();
        assert_eq!(screen.count(), 0);
        assert!(screen.pending_prompt().is_none());
    }

    #[test]
    fn add_appends_in_insertion_order() {
        let mut screen = screen();
        screen.add("a").unwrap();
        screen.add("b").unwrap();
        screen.add("c").unwrap();
        assert_eq!(titles(&screen), ["a", "b", "c"]);
        assert!(screen.tasks().iter().all(|t| !t.done));
    }

    #[test]
    fn add_duplicate_is_rejected_with_notice() {
        let mut screen = screen();
        screen.add("Buy milk").unwrap();
        let err = screen.add("Buy milk").unwrap_err();
        assert!(matches!(err, TodoError::DuplicateTitle { ref title } if title == "Buy milk"));
        assert_eq!(screen.count(), 1);
        assert_eq!(
            screen.pending_prompt(),
            Some(&Prompt::DuplicateTitle {
                title: "Buy milk".into()
            })
        );
    }

    #[test]
    fn duplicate_check_is_exact_match() {
        let mut screen = screen();
        screen.add("Buy milk").unwrap();
        screen.add("buy milk").unwrap();
        screen.add("Buy milk ").unwrap();
        assert_eq!(screen.count(), 3);
    }

    #[test]
    fn dismissing_duplicate_notice_changes_nothing() {
        let mut screen = screen();
        screen.add("x").unwrap();
        let _ = screen.add("x");
        let before = screen.tasks().to_vec();
        let answered = screen.answer(Choice::Ok);
        assert!(matches!(answered, Some(Prompt::DuplicateTitle { .. })));
        assert!(screen.pending_prompt().is_none());
        assert_eq!(screen.tasks(), before.as_slice());
    }

    #[test]
    fn toggle_flips_only_target() {
        let mut screen = screen();
        let a = screen.add("a").unwrap();
        screen.add("b").unwrap();
        screen.toggle_done(a);
        assert!(screen.tasks()[0].done);
        assert!(!screen.tasks()[1].done);
    }

    #[test]
    fn toggle_does_not_reorder() {
        let mut screen = screen();
        screen.add("a").unwrap();
        let b = screen.add("b").unwrap();
        screen.add("c").unwrap();
        screen.toggle_done(b);
        assert_eq!(titles(&screen), ["a", "b", "c"]);
    }

    #[test]
    fn toggle_unknown_id_is_noop() {
        let mut screen = screen();
        screen.add("a").unwrap();
        let before = screen.tasks().to_vec();
        screen.toggle_done(TaskId::new(999));
        assert_eq!(screen.tasks(), before.as_slice());
    }

    #[test]
    fn edit_replaces_title_only() {
        let mut screen = screen();
        let a = screen.add("a").unwrap();
        screen.toggle_done(a);
        screen.edit(a, "renamed");
        let task = screen.get(a).unwrap();
        assert_eq!(task.title, "renamed");
        assert!(task.done);
        assert_eq!(task.id, a);
    }

    #[test]
    fn edit_skips_uniqueness_check() {
        let mut screen = screen();
        screen.add("a").unwrap();
        let b = screen.add("b").unwrap();
        screen.edit(b, "a");
        assert_eq!(titles(&screen), ["a", "a"]);
        assert!(screen.pending_prompt().is_none());
    }

    #[test]
    fn edit_unknown_id_is_noop() {
        let mut screen = screen();
        screen.add("a").unwrap();
        screen.edit(TaskId::new(42), "zzz");
        assert_eq!(titles(&screen), ["a"]);
    }

    #[test]
    fn remove_waits_for_confirmation() {
        let mut screen = screen();
        let a = screen.add("a").unwrap();
        screen.remove(a);
        assert_eq!(screen.count(), 1);
        assert_eq!(screen.pending_prompt(), Some(&Prompt::ConfirmRemove { id: a }));
    }

    #[test]
    fn remove_then_no_keeps_task() {
        let mut screen = screen();
        let a = screen.add("a").unwrap();
        screen.remove(a);
        screen.answer(Choice::No);
        assert_eq!(titles(&screen), ["a"]);
        assert!(screen.pending_prompt().is_none());
    }

    #[test]
    fn remove_then_yes_drops_task() {
        let mut screen = screen();
        screen.add("a").unwrap();
        let b = screen.add("b").unwrap();
        screen.add("c").unwrap();
        screen.remove(b);
        screen.answer(Choice::Yes);
        assert_eq!(titles(&screen), ["a", "c"]);
        assert!(screen.get(b).is_none());
    }

    #[test]
    fn remove_unknown_id_raises_nothing() {
        let mut screen = screen();
        screen.add("a").unwrap();
        screen.remove(TaskId::new(42));
        assert!(screen.pending_prompt().is_none());
    }

    #[test]
    fn answer_without_prompt_is_none() {
        let mut screen = screen();
        assert!(screen.answer(Choice::Yes).is_none());
    }

    #[test]
    fn second_prompt_does_not_replace_pending_one() {
        let mut screen = screen();
        let a = screen.add("a").unwrap();
        let b = screen.add("b").unwrap();
        screen.remove(a);
        screen.remove(b);
        assert_eq!(screen.pending_prompt(), Some(&Prompt::ConfirmRemove { id: a }));
    }

    #[test]
    fn duplicate_add_during_confirmation_keeps_confirmation() {
        let mut screen = screen();
        let a = screen.add("a").unwrap();
        screen.remove(a);

        let err = screen.add("a").unwrap_err();
        assert!(matches!(err, TodoError::DuplicateTitle { .. }));
        assert_eq!(screen.pending_prompt(), Some(&Prompt::ConfirmRemove { id: a }));
        assert_eq!(titles(&screen), ["a"]);

        screen.answer(Choice::Yes);
        assert!(screen.pending_prompt().is_none(), "no notice queued behind it");
        assert_eq!(screen.count(), 0);
    }

    #[test]
    fn prompt_copy_and_choices() {
        let confirm = Prompt::ConfirmRemove { id: TaskId::new(1) };
        assert_eq!(confirm.title(), "Remove item");
        assert_eq!(confirm.message(), "Are you sure you want to remove this item?");
        assert_eq!(confirm.choices(), &[Choice::No, Choice::Yes]);

        let notice = Prompt::DuplicateTitle { title: "x".into() };
        assert_eq!(notice.choices(), &[Choice::Ok]);
        assert_eq!(Choice::Ok.label(), "OK");
    }

    #[test]
    fn pure_updates_leave_input_untouched() {
        let tasks = vec![Task::new(TaskId::new(1), "a"), Task::new(TaskId::new(2), "b")];
        let snapshot = tasks.clone();
        let _ = toggled(&tasks, TaskId::new(1));
        let _ = retitled(&tasks, TaskId::new(2), "z");
        let _ = without(&tasks, TaskId::new(1));
        let _ = appended(&tasks, Task::new(TaskId::new(3), "c"));
        assert_eq!(tasks, snapshot);
    }

    #[test]
    fn controller_works_through_task_actions() {
        fn drive(actions: &mut dyn TaskActions, id: TaskId) {
            actions.toggle_done(id);
            actions.edit(id, "via trait");
            actions.remove(id);
        }

        let mut screen = screen();
        let a = screen.add("a").unwrap();
        drive(&mut screen, a);
        let task = screen.get(a).unwrap();
        assert!(task.done);
        assert_eq!(task.title, "via trait");
        assert_eq!(screen.pending_prompt(), Some(&Prompt::ConfirmRemove { id: a }));
    }
}
