use anyhow::Error;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Terminal position `column` cells right of and `row` lines below the top
/// left of `area`, kept inside `area` however long the typed text gets.
pub(crate) fn cursor_in(area: Rect, column: usize, row: usize) -> (u16, u16) {
    let offset = |n: usize| u16::try_from(n).unwrap_or(u16::MAX);
    let x = area
        .x
        .saturating_add(offset(column))
        .min(area.right().saturating_sub(1).max(area.x));
    let y = area
        .y
        .saturating_add(offset(row))
        .min(area.bottom().saturating_sub(1).max(area.y));
    (x, y)
}

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}

/// Footer hint pair: a highlighted key followed by what it does.
pub(crate) fn key_hint(key: &'static str, action: &'static str) -> [Span<'static>; 2] {
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    [
        Span::styled(key, key_style),
        Span::raw(format!(" {action}   ")),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    use crate::error::LibraryError;

    #[test]
    fn surface_error_prefers_root_cause() {
        let err = Err::<(), _>(LibraryError::Validation { field: "Title" })
            .context("failed to add book")
            .unwrap_err();
        assert_eq!(surface_error(&err), "Title cannot be empty.");
    }

    #[test]
    fn centered_rect_stays_inside() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(60, 50, area);
        assert_eq!(popup.width, 60);
        assert_eq!(popup.height, 20);
        assert!(popup.x >= area.x && popup.right() <= area.right());
    }

    #[test]
    fn cursor_stays_inside_area() {
        let area = Rect::new(10, 5, 20, 4);
        assert_eq!(cursor_in(area, 3, 1), (13, 6));
        assert_eq!(cursor_in(area, 500, 0), (29, 5));
        assert_eq!(cursor_in(area, usize::MAX, usize::MAX), (29, 8));
        assert_eq!(cursor_in(Rect::new(u16::MAX - 2, 0, 2, 1), 70_000, 0), (u16::MAX - 1, 0));
    }
}
