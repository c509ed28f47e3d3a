//! Event handling utilities

use crossterm::event::{KeyCode, KeyModifiers};

/// Map a key to an action.
///
/// Arrow keys always work; h/j/k/l, g and G only with `vim_mode`.
pub fn key_to_action(key: KeyCode, modifiers: KeyModifiers, vim_mode: bool) -> Option<Action> {
    if modifiers.contains(KeyModifiers::CONTROL) {
        return match key {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('d') if vim_mode => Some(Action::HalfPageDown),
            KeyCode::Char('u') if vim_mode => Some(Action::HalfPageUp),
            _ => None,
        };
    }

    let vim = vim_mode.then(|| vim_key_to_action(key)).flatten();
    vim.or(match key {
        KeyCode::Down => Some(Action::Down),
        KeyCode::Up => Some(Action::Up),
        KeyCode::Left => Some(Action::Left),
        KeyCode::Right | KeyCode::Tab => Some(Action::Right),
        KeyCode::Home => Some(Action::Top),
        KeyCode::End => Some(Action::Bottom),
        KeyCode::Enter => Some(Action::Select),
        KeyCode::Esc => Some(Action::Back),
        KeyCode::Char(' ') => Some(Action::Toggle),
        KeyCode::Char('t') => Some(Action::Today),
        KeyCode::Char('r') => Some(Action::Reset),
        KeyCode::Char('a') => Some(Action::Achievements),
        KeyCode::Char('f') => Some(Action::Focus),
        KeyCode::Char('?') => Some(Action::Help),
        KeyCode::Char('q') => Some(Action::Quit),
        _ => None,
    })
}

/// Vim-style movement keys
fn vim_key_to_action(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Char('j') => Some(Action::Down),
        KeyCode::Char('k') => Some(Action::Up),
        KeyCode::Char('h') => Some(Action::Left),
        KeyCode::Char('l') => Some(Action::Right),
        KeyCode::Char('g') => Some(Action::Top),
        KeyCode::Char('G') => Some(Action::Bottom),
        _ => None,
    }
}

/// Actions that can be taken in the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Navigation
    Up,
    Down,
    Left,
    Right,
    Top,
    Bottom,
    HalfPageUp,
    HalfPageDown,
    /// Jump to today's day
    Today,

    // Selection
    Select,
    Back,

    /// Toggle lesson completion, or start/pause the focus timer
    Toggle,
    /// Reset the focus timer
    Reset,

    // Screens
    Achievements,
    Focus,
    Help,
    Quit,
}
