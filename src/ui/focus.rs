//! Focus mode screen

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph},
};

use super::layout::{centered, panel};
use crate::focus::{FocusMode, FocusTimer};
use crate::theme::Theme;

/// Draw the Pomodoro timer centered on screen
pub fn draw(frame: &mut Frame, area: Rect, timer: &FocusTimer, theme: &Theme) {
    let block = panel(" Focus ", theme, true);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let box_area = centered(inner, 40, 7);
    let accent = match timer.mode() {
        FocusMode::Focus => theme.accent_primary,
        FocusMode::Break => theme.success,
    };
    let state = if timer.is_running() { "running" } else { "paused" };

    let lines = vec![
        Line::from(Span::styled(
            format!("{} · {}", timer.mode(), state),
            Style::default().fg(theme.fg_secondary),
        )),
        Line::from(""),
        Line::from(Span::styled(
            timer.display(),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("Sessions completed: {}", timer.sessions()),
            Style::default().fg(theme.fg_muted),
        )),
    ];
    let text_area = Rect { height: box_area.height.saturating_sub(1), ..box_area };
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), text_area);

    if box_area.height > 0 {
        let gauge_area = Rect { y: box_area.y + box_area.height - 1, height: 1, ..box_area };
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(accent).bg(theme.bg_secondary))
            .ratio(timer.elapsed_ratio().clamp(0.0, 1.0))
            .label("");
        frame.render_widget(gauge, gauge_area);
    }
}
