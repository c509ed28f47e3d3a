//! UI rendering components

pub mod achievements;
pub mod dashboard;
pub mod focus;
pub mod help;
pub mod layout;

use chrono::NaiveDate;
use ratatui::{Frame, style::Style, widgets::Block};

use crate::app::state::{AppState, Screen};
use crate::theme::Theme;
use crate::tracker::Tracker;

/// Main draw function
pub fn draw(
    frame: &mut Frame,
    state: &mut AppState,
    tracker: &Tracker,
    theme: &Theme,
    vim_mode: bool,
    today: NaiveDate,
) {
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(theme.bg_primary)), area);
    let (main, status) = layout::split_status(area);

    let hints: &[(&str, &str)] = match state.screen {
        Screen::Dashboard => {
            dashboard::draw(frame, main, state, tracker, theme, today);
            &[
                ("space", "toggle"),
                ("t", "today"),
                ("a", "achievements"),
                ("f", "focus"),
                ("?", "help"),
                ("q", "quit"),
            ]
        }
        Screen::Achievements => {
            achievements::draw(frame, main, state, tracker, theme, today);
            &[("j/k", "scroll"), ("esc", "back"), ("q", "quit")]
        }
        Screen::Focus => {
            focus::draw(frame, main, &state.focus, theme);
            &[("space", "start/pause"), ("r", "reset"), ("esc", "back"), ("q", "quit")]
        }
        Screen::Help => {
            help::draw(frame, main, vim_mode, theme);
            &[("esc", "back"), ("q", "quit")]
        }
    };

    layout::draw_status(frame, status, state.status.as_ref(), hints, theme);
}
