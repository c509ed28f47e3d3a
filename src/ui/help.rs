//! Help screen

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::layout::panel;
use crate::theme::Theme;

const BINDINGS: &[(&str, &[(&str, &str)])] = &[
    (
        "Dashboard",
        &[
            ("j / k, ↓ / ↑", "Move selection"),
            ("h / l, Tab", "Switch between days and lessons"),
            ("g / G", "First / last day"),
            ("Ctrl-d / Ctrl-u", "Half page down / up"),
            ("Space, Enter", "Toggle lesson completion"),
            ("t", "Jump to today"),
        ],
    ),
    ("Focus", &[("Space", "Start or pause the timer"), ("r", "Reset the timer")]),
    (
        "Screens",
        &[
            ("a", "Achievements"),
            ("f", "Focus timer"),
            ("?", "This help"),
            ("Esc", "Back to the dashboard"),
            ("q, Ctrl-c", "Quit"),
        ],
    ),
];

/// Draw the key binding reference
pub fn draw(frame: &mut Frame, area: Rect, vim_mode: bool, theme: &Theme) {
    let block = panel(" Help ", theme, true);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = Vec::new();
    for (section, bindings) in BINDINGS {
        lines.push(Line::from(Span::styled(
            format!(" {section}"),
            Style::default().fg(theme.accent_secondary).add_modifier(Modifier::BOLD),
        )));
        for (keys, description) in *bindings {
            lines.push(Line::from(vec![
                Span::styled(format!("   {keys:<18}"), Style::default().fg(theme.fg_primary)),
                Span::styled(*description, Style::default().fg(theme.fg_secondary)),
            ]));
        }
        lines.push(Line::from(""));
    }

    if !vim_mode {
        lines.push(Line::from(Span::styled(
            " Vim keys are off; enable vim_mode in config.json to use h/j/k/l",
            Style::default().fg(theme.fg_muted),
        )));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}
