//! Small presentation helpers shared by the drawing code.

use anyhow::Error;
use ratatui::layout::{Constraint, Layout, Rect};

/// Checkbox glyph for a boolean flag.
pub(crate) fn check_mark(value: bool) -> &'static str {
    if value {
        "[x]"
    } else {
        "[ ]"
    }
}

/// Progress label in the same wording the status bar has always used.
pub(crate) fn progress_label(done: usize, total: usize) -> String {
    format!("Cases Done: {done} / {total}")
}

/// A rectangle centered within `area` spanning the requested percentages.
/// Used for the jump and unsaved-changes dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let [_, middle, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(area);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(middle);
    center
}

/// Extract the most relevant message from a chained error for the footer.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_mark_renders_both_states() {
        assert_eq!(check_mark(true), "[x]");
        assert_eq!(check_mark(false), "[ ]");
    }

    #[test]
    fn progress_label_formats_counts() {
        assert_eq!(progress_label(2, 5), "Cases Done: 2 / 5");
    }
}
