//! todo-core library.
//!
//! View-state for a single to-do screen: the [`screen::ScreenController`]
//! owns the task collection, each row's [`item::ItemEditor`] owns its inline
//! edit draft and raises intents back up through [`screen::TaskActions`].
//!
//! # Conventions
//!
//! - **Errors**: domain failures are [`error::TodoError`]; callers at the
//!   binary boundary use `anyhow::Result`.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `debug!`).

pub mod config;
pub mod error;
pub mod ids;
pub mod item;
pub mod model;
pub mod screen;

pub use error::{ErrorCode, TodoError};
pub use item::{FocusHook, ItemEditor, NoFocus};
pub use model::task::{Task, TaskId};
pub use screen::{Choice, Prompt, ScreenController, TaskActions};
