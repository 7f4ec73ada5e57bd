//! Blocking modal for the screen's pending [`Prompt`].
//!
//! While a prompt is pending every key goes here. The dialog never touches
//! the task list itself; it only reports which [`Choice`] the user picked.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use todo_core::{Choice, Prompt};

/// Button highlight for the open prompt.
#[derive(Debug, Default)]
pub struct PromptDialog {
    selected: usize,
}

impl PromptDialog {
    /// Forget the previous highlight; the first (cancel) button is the default.
    pub fn reset(&mut self) {
        self.selected = 0;
    }

    #[cfg(test)]
    pub const fn selected(&self) -> usize {
        self.selected
    }

    /// Feed a key. Returns the picked choice once the user decides.
    pub fn handle_key(&mut self, prompt: &Prompt, key: KeyEvent) -> Option<Choice> {
        let choices = prompt.choices();
        match key.code {
            KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => {
                self.selected = (self.selected + 1).min(choices.len().saturating_sub(1));
                None
            }
            KeyCode::Enter | KeyCode::Char(' ') => choices.get(self.selected).copied(),
            KeyCode::Esc => choices.first().copied(),
            KeyCode::Char('y' | 'Y') if choices.contains(&Choice::Yes) => Some(Choice::Yes),
            KeyCode::Char('n' | 'N') if choices.contains(&Choice::No) => Some(Choice::No),
            _ => None,
        }
    }

    /// Draw the prompt centered over `area`.
    pub fn render(&self, frame: &mut Frame<'_>, area: Rect, prompt: &Prompt) {
        let dialog_w: u16 = 50.min(area.width.saturating_sub(4));
        let dialog_h: u16 = 7.min(area.height.saturating_sub(2));
        let x = area.x + area.width.saturating_sub(dialog_w) / 2;
        let y = area.y + area.height.saturating_sub(dialog_h) / 2;
        let dialog_area = Rect {
            x,
            y,
            width: dialog_w,
            height: dialog_h,
        };

        frame.render_widget(Clear, dialog_area);

        let title_color = match prompt {
            Prompt::ConfirmRemove { .. } => Color::Red,
            Prompt::DuplicateTitle { .. } => Color::Yellow,
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", prompt.title()))
            .title_style(
                Style::default()
                    .fg(title_color)
                    .add_modifier(Modifier::BOLD),
            )
            .style(Style::default().bg(Color::Black));

        let mut buttons: Vec<Span<'static>> = Vec::new();
        for (idx, choice) in prompt.choices().iter().enumerate() {
            if idx > 0 {
                buttons.push(Span::raw("   "));
            }
            let style = if idx == self.selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            buttons.push(Span::styled(format!(" {} ", choice.label()), style));
        }

        let body = vec![
            Line::from(prompt.message()),
            Line::from(""),
            Line::from(buttons),
        ];
        let para = Paragraph::new(body)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false });
        frame.render_widget(para, dialog_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use todo_core::TaskId;

    fn confirm() -> Prompt {
        Prompt::ConfirmRemove { id: TaskId::new(1) }
    }

    fn notice() -> Prompt {
        Prompt::DuplicateTitle { title: "x".into() }
    }

    fn press(dialog: &mut PromptDialog, prompt: &Prompt, code: KeyCode) -> Option<Choice> {
        dialog.handle_key(prompt, KeyEvent::from(code))
    }

    #[test]
    fn enter_defaults_to_no() {
        let mut dialog = PromptDialog::default();
        assert_eq!(press(&mut dialog, &confirm(), KeyCode::Enter), Some(Choice::No));
    }

    #[test]
    fn right_then_enter_picks_yes() {
        let mut dialog = PromptDialog::default();
        let prompt = confirm();
        assert_eq!(press(&mut dialog, &prompt, KeyCode::Right), None);
        assert_eq!(dialog.selected(), 1);
        assert_eq!(press(&mut dialog, &prompt, KeyCode::Right), None);
        assert_eq!(dialog.selected(), 1, "selection stops at last button");
        assert_eq!(press(&mut dialog, &prompt, KeyCode::Enter), Some(Choice::Yes));
    }

    #[test]
    fn shortcut_letters_answer_directly() {
        let mut dialog = PromptDialog::default();
        assert_eq!(press(&mut dialog, &confirm(), KeyCode::Char('y')), Some(Choice::Yes));
        assert_eq!(press(&mut dialog, &confirm(), KeyCode::Char('n')), Some(Choice::No));
        assert_eq!(press(&mut dialog, &confirm(), KeyCode::Esc), Some(Choice::No));
    }

    #[test]
    fn notice_only_offers_ok() {
        let mut dialog = PromptDialog::default();
        let prompt = notice();
        assert_eq!(press(&mut dialog, &prompt, KeyCode::Char('y')), None);
        assert_eq!(press(&mut dialog, &prompt, KeyCode::Right), None);
        assert_eq!(press(&mut dialog, &prompt, KeyCode::Enter), Some(Choice::Ok));
        assert_eq!(press(&mut dialog, &prompt, KeyCode::Esc), Some(Choice::Ok));
    }

    #[test]
    fn unrelated_keys_do_nothing() {
        let mut dialog = PromptDialog::default();
        assert_eq!(press(&mut dialog, &confirm(), KeyCode::Char('q')), None);
    }
}
