//! The to-do screen: header with the task count, the add bar, the task list
//! and whichever prompt is pending.
//!
//! Key bindings (list focused): j/k or arrows move, Space/Enter toggle done,
//! e edit / cancel edit, d or Delete remove, a or Tab jump to the add bar,
//! q quit. While a row is being edited its keystrokes go to the inline
//! editor: Enter commits, Esc cancels.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use todo_core::config::UiConfig;
use todo_core::item::FocusHook;
use todo_core::{ItemEditor, ScreenController, TaskId, TodoError};
use tracing::debug;

use super::input::LineInput;
use super::prompt::PromptDialog;
use super::row::{self, RowHit};

/// What receives keystrokes when no prompt is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    AddInput,
    List,
    /// The inline title editor of one row.
    Row(TaskId),
}

/// [`FocusHook`] that moves terminal focus to and from a row's editor.
#[derive(Debug)]
struct FocusState {
    current: Focus,
}

impl FocusHook for FocusState {
    fn focus(&mut self, id: TaskId) {
        self.current = Focus::Row(id);
    }

    fn blur(&mut self, id: TaskId) {
        if self.current == Focus::Row(id) {
            self.current = Focus::List;
        }
    }
}

/// Header text: "You have 1 task" / "You have 3 tasks".
pub fn count_label(count: usize) -> String {
    if count == 1 {
        "You have 1 task".to_string()
    } else {
        format!("You have {count} tasks")
    }
}

pub struct App {
    screen: ScreenController,
    /// One editor per task, parallel to `screen.tasks()`.
    rows: Vec<ItemEditor>,
    focus: FocusState,
    /// Text of the add bar.
    add_input: LineInput,
    /// Cursor state for the focused row's draft.
    row_input: LineInput,
    list_state: ListState,
    prompt: PromptDialog,
    show_hints: bool,
    status_msg: Option<(String, Instant)>,
    /// Last drawn list geometry, for mouse hits.
    list_area: Rect,
    should_quit: bool,
}

impl App {
    pub fn new(screen: ScreenController, ui: &UiConfig) -> Self {
        let mut app = Self {
            screen,
            rows: Vec::new(),
            focus: FocusState {
                current: Focus::AddInput,
            },
            add_input: LineInput::default(),
            row_input: LineInput::default(),
            list_state: ListState::default(),
            prompt: PromptDialog::default(),
            show_hints: ui.show_hints,
            status_msg: None,
            list_area: Rect::default(),
            should_quit: false,
        };
        app.sync_rows();
        app
    }

    pub const fn screen(&self) -> &ScreenController {
        &self.screen
    }

    #[cfg(test)]
    pub const fn focus(&self) -> Focus {
        self.focus.current
    }

    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    #[cfg(test)]
    pub fn selected(&self) -> Option<usize> {
        self.list_state.selected()
    }

    pub fn editor(&self, id: TaskId) -> Option<&ItemEditor> {
        self.rows.iter().find(|row| row.id() == id)
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_msg = Some((msg.into(), Instant::now()));
    }

    // -----------------------------------------------------------------------
    // Row bookkeeping
    // -----------------------------------------------------------------------

    /// Rebuild `rows` after the collection changed: keep editors of surviving
    /// tasks, mount new ones, drop the rest.
    fn sync_rows(&mut self) {
        let mut existing: HashMap<TaskId, ItemEditor> = std::mem::take(&mut self.rows)
            .into_iter()
            .map(|row| (row.id(), row))
            .collect();
        self.rows = self
            .screen
            .tasks()
            .iter()
            .map(|task| {
                existing
                    .remove(&task.id)
                    .unwrap_or_else(|| ItemEditor::mount(task))
            })
            .collect();

        if let Focus::Row(id) = self.focus.current {
            if self.editor(id).is_none() {
                self.focus.current = Focus::List;
            }
        }

        let len = self.rows.len();
        match self.list_state.selected() {
            _ if len == 0 => self.list_state.select(None),
            None => self.list_state.select(Some(0)),
            Some(i) if i >= len => self.list_state.select(Some(len - 1)),
            Some(_) => {}
        }
    }

    fn row_index(&self, id: TaskId) -> Option<usize> {
        self.rows.iter().position(|row| row.id() == id)
    }

    fn selected_id(&self) -> Option<TaskId> {
        self.list_state
            .selected()
            .and_then(|i| self.rows.get(i))
            .map(ItemEditor::id)
    }

    fn select_next(&mut self) {
        let len = self.rows.len();
        if len == 0 {
            return;
        }
        let i = self.list_state.selected().map_or(0, |i| (i + 1).min(len - 1));
        self.list_state.select(Some(i));
    }

    fn select_prev(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let i = self.list_state.selected().map_or(0, |i| i.saturating_sub(1));
        self.list_state.select(Some(i));
    }

    // -----------------------------------------------------------------------
    // Row intents
    // -----------------------------------------------------------------------

    fn toggle_row(&mut self, id: TaskId) {
        if let Some(idx) = self.row_index(id) {
            self.rows[idx].press_row(&mut self.screen);
            self.sync_rows();
        }
    }

    fn delete_row(&mut self, id: TaskId) {
        if let Some(idx) = self.row_index(id) {
            if !self.rows[idx].press_delete(&mut self.screen) {
                self.set_status("Finish or cancel the edit before removing this task");
            }
            self.prompt.reset();
        }
    }

    /// The edit control: pencil while viewing, X while editing.
    fn edit_control(&mut self, id: TaskId) {
        let Some(idx) = self.row_index(id) else {
            return;
        };
        if self.rows[idx].is_editing() {
            if let Some(task) = self.screen.get(id) {
                self.rows[idx].cancel_editing(task, &mut self.focus);
            }
        } else {
            self.row_input = LineInput::with_text(self.rows[idx].draft());
            self.rows[idx].start_editing(&mut self.focus);
        }
    }

    fn commit_row(&mut self, id: TaskId) {
        if let Some(idx) = self.row_index(id) {
            self.rows[idx].commit_editing(&mut self.screen, &mut self.focus);
            self.sync_rows();
        }
    }

    fn cancel_row(&mut self, id: TaskId) {
        let Some(idx) = self.row_index(id) else {
            return;
        };
        if let Some(task) = self.screen.get(id) {
            self.rows[idx].cancel_editing(task, &mut self.focus);
        }
    }

    fn submit_add(&mut self) {
        let title = self.add_input.text().to_string();
        if title.trim().is_empty() {
            return;
        }
        match self.screen.add(&title) {
            Ok(id) => {
                debug!(%id, "added from input bar");
                self.add_input.clear();
                self.sync_rows();
            }
            Err(TodoError::DuplicateTitle { .. }) => self.prompt.reset(),
            Err(err) => self.set_status(err.to_string()),
        }
    }

    // -----------------------------------------------------------------------
    // Input handling
    // -----------------------------------------------------------------------

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if let Some(prompt) = self.screen.pending_prompt().cloned() {
            if let Some(choice) = self.prompt.handle_key(&prompt, key) {
                self.screen.answer(choice);
                self.prompt.reset();
                self.sync_rows();
            }
            return;
        }

        match self.focus.current {
            Focus::AddInput => self.handle_add_key(key),
            Focus::List => self.handle_list_key(key),
            Focus::Row(id) => self.handle_row_key(id, key),
        }
    }

    fn handle_add_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.submit_add(),
            KeyCode::Tab | KeyCode::Down | KeyCode::Esc => self.focus.current = Focus::List,
            _ => {
                self.add_input.handle_key(key);
            }
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => self.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.select_prev(),
            KeyCode::Char('a') | KeyCode::Tab | KeyCode::BackTab => {
                self.focus.current = Focus::AddInput;
            }
            KeyCode::Char(' ') => {
                if let Some(id) = self.selected_id() {
                    self.toggle_row(id);
                }
            }
            KeyCode::Enter => {
                let Some(id) = self.selected_id() else {
                    return;
                };
                // An editing row that lost focus gets it back; otherwise
                // Enter behaves like pressing the row.
                let draft = self
                    .editor(id)
                    .filter(|editor| editor.is_editing())
                    .map(|editor| editor.draft().to_string());
                match draft {
                    Some(draft) => {
                        self.row_input = LineInput::with_text(draft);
                        self.focus.focus(id);
                    }
                    None => self.toggle_row(id),
                }
            }
            KeyCode::Char('e') => {
                if let Some(id) = self.selected_id() {
                    self.edit_control(id);
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(id) = self.selected_id() {
                    self.delete_row(id);
                }
            }
            _ => {}
        }
    }

    fn handle_row_key(&mut self, id: TaskId, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.commit_row(id),
            KeyCode::Esc => self.cancel_row(id),
            _ => {
                if self.row_input.handle_key(key) {
                    if let Some(idx) = self.row_index(id) {
                        self.rows[idx].change_draft(self.row_input.text());
                    }
                }
            }
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.screen.pending_prompt().is_some() {
            return;
        }

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let (x, y) = (mouse.column, mouse.row);
                let inner = Rect {
                    x: self.list_area.x + 1,
                    y: self.list_area.y + 1,
                    width: self.list_area.width.saturating_sub(2),
                    height: self.list_area.height.saturating_sub(2),
                };
                if !inner.contains((x, y).into()) {
                    return;
                }
                let idx = usize::from(y - inner.y) + self.list_state.offset();
                let Some(id) = self.rows.get(idx).map(ItemEditor::id) else {
                    return;
                };
                self.list_state.select(Some(idx));
                match row::hit_test(x - inner.x, inner.width) {
                    RowHit::Body => self.toggle_row(id),
                    RowHit::Edit => self.edit_control(id),
                    RowHit::Delete => self.delete_row(id),
                }
            }
            MouseEventKind::ScrollDown => self.select_next(),
            MouseEventKind::ScrollUp => self.select_prev(),
            _ => {}
        }
    }

    // -----------------------------------------------------------------------
    // Rendering
    // -----------------------------------------------------------------------

    pub fn render(&mut self, frame: &mut Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(area);

        self.render_header(frame, chunks[0]);
        self.render_add_bar(frame, chunks[1]);
        self.render_list(frame, chunks[2]);
        frame.render_widget(Paragraph::new(self.build_status_bar()), chunks[3]);

        if let Some(prompt) = self.screen.pending_prompt() {
            self.prompt.render(frame, area, prompt);
        }
    }

    fn render_header(&self, frame: &mut Frame<'_>, area: Rect) {
        let line = Line::from(vec![
            Span::styled(
                " todo ",
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(count_label(self.screen.count()), Style::default().fg(Color::White)),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_add_bar(&self, frame: &mut Frame<'_>, area: Rect) {
        let focused = self.focus.current == Focus::AddInput;
        let text = if focused {
            self.add_input.display()
        } else if self.add_input.text().is_empty() {
            "Add a new task...".to_string()
        } else {
            self.add_input.text().to_string()
        };
        let text_style = if !focused && self.add_input.text().is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::White)
        };
        let border_style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let para = Paragraph::new(Span::styled(text, text_style)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_set(border::ROUNDED)
                .border_style(border_style)
                .title(" New task "),
        );
        frame.render_widget(para, area);
    }

    fn render_list(&mut self, frame: &mut Frame<'_>, area: Rect) {
        self.list_area = area;
        let width = area.width.saturating_sub(2);
        let focused_row = match self.focus.current {
            Focus::Row(id) => Some(id),
            _ => None,
        };

        let items: Vec<ListItem<'static>> = self
            .screen
            .tasks()
            .iter()
            .zip(&self.rows)
            .map(|(task, editor)| {
                let input = (focused_row == Some(task.id)).then_some(&self.row_input);
                ListItem::new(row::build_row(task, editor, input, width))
            })
            .collect();

        let list_focused = matches!(self.focus.current, Focus::List | Focus::Row(_));
        let border_style = if list_focused {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let highlight = if list_focused {
            Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_set(border::ROUNDED)
                    .border_style(border_style)
                    .title(" Tasks "),
            )
            .highlight_style(highlight);
        frame.render_stateful_widget(list, area, &mut self.list_state);

        if self.rows.is_empty() && area.height > 2 {
            let hint = Paragraph::new(Line::from(Span::styled(
                "Nothing to do yet",
                Style::default().fg(Color::DarkGray),
            )))
            .alignment(Alignment::Center);
            let inner = Rect {
                x: area.x + 1,
                y: area.y + 1,
                width: area.width.saturating_sub(2),
                height: 1,
            };
            frame.render_widget(hint, inner);
        }
    }

    fn build_status_bar(&self) -> Line<'static> {
        if let Some((msg, at)) = &self.status_msg {
            if at.elapsed() < Duration::from_secs(3) {
                return Line::from(Span::styled(msg.clone(), Style::default().fg(Color::Cyan)));
            }
        }
        if !self.show_hints {
            return Line::default();
        }

        let key_style = Style::default().fg(Color::Cyan);
        let dim_style = Style::default().fg(Color::DarkGray);
        let hints: &[(&str, &str)] = if self.screen.pending_prompt().is_some() {
            &[("←/→", "choose"), ("ENTER", "confirm"), ("ESC", "cancel")]
        } else {
            match self.focus.current {
                Focus::AddInput => &[("ENTER", "add"), ("TAB", "list"), ("CTRL+C", "quit")],
                Focus::List => &[
                    ("SPACE", "done"),
                    ("e", "edit"),
                    ("d", "remove"),
                    ("a", "add"),
                    ("q", "quit"),
                ],
                Focus::Row(_) => &[("ENTER", "save"), ("ESC", "cancel")],
            }
        };

        let mut spans = Vec::with_capacity(hints.len() * 2);
        for (key, label) in hints {
            spans.push(Span::styled((*key).to_string(), key_style));
            spans.push(Span::styled(format!(" {label}  "), dim_style));
        }
        Line::from(spans)
    }
}
