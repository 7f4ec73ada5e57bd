//! Per-row inline editing.
//!
//! An [`ItemEditor`] exists for as long as its task is on screen. It holds a
//! draft title and a two-state machine:
//!
//! ```text
//! Viewing --start_editing--> Editing --commit_editing | cancel_editing--> Viewing
//! ```
//!
//! Nothing here touches the collection directly; commits, toggles and
//! removals go through [`TaskActions`]. Focus is a side effect that follows
//! the `editing` flag and is delivered through a [`FocusHook`] after each
//! transition.

use crate::model::task::{Task, TaskId};
use crate::screen::TaskActions;

/// Receives focus changes for a row's title input.
pub trait FocusHook {
    fn focus(&mut self, id: TaskId);
    fn blur(&mut self, id: TaskId);
}

/// Focus hook for environments without an input to focus.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoFocus;

impl FocusHook for NoFocus {
    fn focus(&mut self, _id: TaskId) {}
    fn blur(&mut self, _id: TaskId) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
    Viewing,
    Editing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemEditor {
    id: TaskId,
    editing: bool,
    draft: String,
}

impl ItemEditor {
    /// A viewing-state editor whose draft starts as the task's title.
    #[must_use]
    pub fn mount(task: &Task) -> Self {
        Self {
            id: task.id,
            editing: false,
            draft: task.title.clone(),
        }
    }

    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    #[must_use]
    pub const fn is_editing(&self) -> bool {
        self.editing
    }

    #[must_use]
    pub const fn state(&self) -> EditState {
        if self.editing {
            EditState::Editing
        } else {
            EditState::Viewing
        }
    }

    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// The delete control is disabled mid-edit.
    #[must_use]
    pub const fn can_remove(&self) -> bool {
        !self.editing
    }

    /// Enter edit mode, keeping whatever draft is already there.
    pub fn start_editing(&mut self, focus: &mut dyn FocusHook) {
        self.set_editing(true, focus);
    }

    /// Throw the draft away and go back to viewing.
    pub fn cancel_editing(&mut self, task: &Task, focus: &mut dyn FocusHook) {
        self.draft.clone_from(&task.title);
        self.set_editing(false, focus);
    }

    /// Send the draft to the owner of the collection and go back to viewing.
    pub fn commit_editing(&mut self, actions: &mut dyn TaskActions, focus: &mut dyn FocusHook) {
        actions.edit(self.id, &self.draft);
        self.set_editing(false, focus);
    }

    pub fn change_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Row body pressed: toggle done, whatever the edit state.
    pub fn press_row(&self, actions: &mut dyn TaskActions) {
        actions.toggle_done(self.id);
    }

    /// Delete control pressed. Returns `false` when the control is disabled.
    pub fn press_delete(&self, actions: &mut dyn TaskActions) -> bool {
        if !self.can_remove() {
            return false;
        }
        actions.remove(self.id);
        true
    }

    fn set_editing(&mut self, editing: bool, focus: &mut dyn FocusHook) {
        if self.editing == editing {
            return;
        }
        self.editing = editing;
        if editing {
            focus.focus(self.id);
        } else {
            focus.blur(self.id);
        }
    }
}
