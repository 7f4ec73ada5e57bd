//! Drawing for one task row.
//!
//! Layout, left to right: done marker, title (or the inline editor), then
//! the edit control and the delete control pinned to the right edge.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use todo_core::{ItemEditor, Task};

use super::input::LineInput;

pub const EDIT_GLYPH: &str = "✎";
pub const CANCEL_GLYPH: &str = "✕";
pub const DELETE_GLYPH: &str = "⌫";

/// Cells taken by the controls on the right: `" ✎ │ ⌫ "`.
pub const CONTROLS_WIDTH: u16 = 7;

const DONE_COLOR: Color = Color::Green;
const PENDING_COLOR: Color = Color::Gray;

/// Which control a click at column `x` (relative to the row start) hits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowHit {
    Body,
    Edit,
    Delete,
}

/// Classify a click inside a row of `width` cells.
pub fn hit_test(x: u16, width: u16) -> RowHit {
    let controls_start = width.saturating_sub(CONTROLS_WIDTH);
    if x < controls_start {
        return RowHit::Body;
    }
    // " ✎ │ ⌫ " -> offsets 0..3 edit, 3 divider, 4..7 delete
    match x - controls_start {
        0..=2 => RowHit::Edit,
        3 => RowHit::Body,
        _ => RowHit::Delete,
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= max_chars {
        s.to_string()
    } else if max_chars == 0 {
        String::new()
    } else {
        let truncated: String = chars[..max_chars.saturating_sub(1)].iter().collect();
        format!("{truncated}…")
    }
}

fn title_style(task: &Task) -> Style {
    if task.done {
        Style::default()
            .fg(DONE_COLOR)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default().fg(PENDING_COLOR)
    }
}

/// Build the line for `task`.
///
/// `focused_input` is `Some` only for the row whose inline editor currently
/// has focus; it is drawn with a cursor.
pub fn build_row(
    task: &Task,
    editor: &ItemEditor,
    focused_input: Option<&LineInput>,
    width: u16,
) -> Line<'static> {
    let (marker, marker_style) = if task.done {
        ("[✓] ", Style::default().fg(DONE_COLOR).add_modifier(Modifier::BOLD))
    } else {
        ("[ ] ", Style::default().fg(Color::DarkGray))
    };

    let title_budget = usize::from(width.saturating_sub(CONTROLS_WIDTH + 4));
    let (title_text, style) = match (editor.is_editing(), focused_input) {
        (true, Some(input)) => (
            input.display(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::UNDERLINED),
        ),
        (true, None) => (
            editor.draft().to_string(),
            Style::default().fg(Color::Yellow),
        ),
        (false, _) => (editor.draft().to_string(), title_style(task)),
    };
    let title = truncate(&title_text, title_budget);
    let pad = title_budget.saturating_sub(title.chars().count());

    let edit_glyph = if editor.is_editing() {
        CANCEL_GLYPH
    } else {
        EDIT_GLYPH
    };
    let delete_style = if editor.can_remove() {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM)
    };

    Line::from(vec![
        Span::styled(marker, marker_style),
        Span::styled(title, style),
        Span::raw(" ".repeat(pad)),
        Span::styled(format!(" {edit_glyph} "), Style::default().fg(Color::Gray)),
        Span::styled("│", Style::default().fg(Color::DarkGray)),
        Span::styled(format!(" {DELETE_GLYPH} "), delete_style),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use todo_core::{NoFocus, TaskId};

    fn text_of(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn pending_row_has_empty_marker_and_edit_glyph() {
        let task = Task::new(TaskId::new(1), "Buy milk");
        let editor = ItemEditor::mount(&task);
        let text = text_of(&build_row(&task, &editor, None, 40));
        assert!(text.starts_with("[ ] Buy milk"));
        assert!(text.contains(EDIT_GLYPH));
        assert!(text.ends_with(&format!(" {DELETE_GLYPH} ")));
    }

    #[test]
    fn done_row_is_checked_and_crossed_out() {
        let task = Task::new(TaskId::new(1), "Buy milk").with_done(true);
        let editor = ItemEditor::mount(&task);
        let line = build_row(&task, &editor, None, 40);
        assert!(text_of(&line).starts_with("[✓] "));
        assert!(line.spans[1].style.add_modifier.contains(Modifier::CROSSED_OUT));
    }

    #[test]
    fn editing_row_shows_cancel_and_dims_delete() {
        let task = Task::new(TaskId::new(1), "Buy milk");
        let mut editor = ItemEditor::mount(&task);
        editor.start_editing(&mut NoFocus);
        let input = LineInput::with_text("Buy milk");
        let line = build_row(&task, &editor, Some(&input), 40);
        let text = text_of(&line);
        assert!(text.contains(CANCEL_GLYPH));
        assert!(text.contains("Buy milk█"));
        let delete = line.spans.last().expect("delete span");
        assert!(delete.style.add_modifier.contains(Modifier::DIM));
    }

    #[test]
    fn row_width_is_stable() {
        let task = Task::new(TaskId::new(1), "a very long title that will not fit in the row");
        let editor = ItemEditor::mount(&task);
        let text = text_of(&build_row(&task, &editor, None, 30));
        assert_eq!(text.chars().count(), 30);
        assert!(text.contains('…'));
    }

    #[test]
    fn hit_test_maps_columns_to_controls() {
        assert_eq!(hit_test(0, 30), RowHit::Body);
        assert_eq!(hit_test(22, 30), RowHit::Body);
        assert_eq!(hit_test(23, 30), RowHit::Edit);
        assert_eq!(hit_test(25, 30), RowHit::Edit);
        assert_eq!(hit_test(26, 30), RowHit::Body);
        assert_eq!(hit_test(27, 30), RowHit::Delete);
        assert_eq!(hit_test(29, 30), RowHit::Delete);
    }
}
