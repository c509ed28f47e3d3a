//! Layout utilities and common components

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::state::StatusMessage;
use crate::theme::Theme;

/// Bordered panel block, highlighted when focused
pub fn panel<'a>(title: &'a str, theme: &Theme, focused: bool) -> Block<'a> {
    let border_color = if focused { theme.border_focused } else { theme.border };

    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(theme.bg_primary))
}

/// Split off the one-line status bar at the bottom of `area`
pub fn split_status(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);
    (chunks[0], chunks[1])
}

/// Draw the status bar: the current message, or key hints
pub fn draw_status(
    frame: &mut Frame,
    area: Rect,
    status: Option<&StatusMessage>,
    hints: &[(&str, &str)],
    theme: &Theme,
) {
    let line = match status {
        Some(message) => {
            let style = if message.celebrate {
                Style::default().fg(theme.success).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.fg_secondary)
            };
            Line::from(Span::styled(format!(" {}", message.text), style))
        }
        None => {
            let mut spans = vec![Span::raw(" ")];
            for (key, label) in hints {
                spans.push(Span::styled(format!("[{key}]"), Style::default().fg(theme.fg_muted)));
                spans.push(Span::styled(
                    format!(" {label}  "),
                    Style::default().fg(theme.fg_secondary),
                ));
            }
            Line::from(spans)
        }
    };

    let bar = Paragraph::new(line).style(Style::default().bg(theme.bg_secondary));
    frame.render_widget(bar, area);
}

/// A `width` x `height` rectangle centered in `area`, clamped to fit
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Text progress bar, e.g. `████░░░░`
pub fn progress_bar(percent: u32, width: usize) -> String {
    let filled = (percent.min(100) as usize * width + 50) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
