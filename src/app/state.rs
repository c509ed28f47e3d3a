//! Application state definitions

use std::time::{Duration, Instant};

use crate::focus::FocusTimer;
use crate::schedule::LessonKey;

/// Which screen is currently displayed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Dashboard,
    Achievements,
    Focus,
    Help,
}

/// Which dashboard panel is currently focused
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Panel {
    #[default]
    Days,
    Lessons,
}

/// Selection and scrolling for a vertical list
#[derive(Debug, Clone, Default)]
pub struct ListState {
    /// Currently selected row
    pub selected: usize,
    /// First visible row
    pub scroll_offset: usize,
    /// Visible height in rows (updated on render)
    pub visible_height: usize,
}

impl ListState {
    /// Move the selection by `delta` rows, clamped to `len`
    pub fn move_by(&mut self, delta: isize, len: usize) {
        if len == 0 {
            self.selected = 0;
            return;
        }
        let target = self.selected.saturating_add_signed(delta);
        self.selected = target.min(len - 1);
        self.ensure_selection_visible();
    }

    pub fn select(&mut self, index: usize, len: usize) {
        self.selected = index.min(len.saturating_sub(1));
        self.ensure_selection_visible();
    }

    /// Ensure the selected row is visible by adjusting scroll offset
    pub fn ensure_selection_visible(&mut self) {
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        }
        let visible = self.visible_height;
        if visible > 0 && self.selected >= self.scroll_offset + visible {
            self.scroll_offset = self.selected + 1 - visible;
        }
    }
}

/// A transient message in the status bar
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    /// Highlight as a celebration rather than plain info
    pub celebrate: bool,
    pub shown_at: Instant,
}

/// How long a status message stays on screen
pub const STATUS_TIMEOUT: Duration = Duration::from_secs(4);

/// Main application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Current screen
    pub screen: Screen,

    /// Focused dashboard panel
    pub panel: Panel,

    /// Day list
    pub days: ListState,

    /// Lesson list of the selected day
    pub lessons: ListState,

    /// Scroll position on the achievements screen
    pub achievements_scroll: usize,

    /// Pomodoro timer shown on the focus screen
    pub focus: FocusTimer,

    /// When the focus timer last advanced
    pub focus_last_tick: Instant,

    /// Status bar message
    pub status: Option<StatusMessage>,
}

impl AppState {
    /// Fresh state with `day` selected
    pub fn new(day: usize, focus: FocusTimer) -> Self {
        Self {
            screen: Screen::default(),
            panel: Panel::default(),
            days: ListState { selected: day, ..Default::default() },
            lessons: ListState::default(),
            achievements_scroll: 0,
            focus,
            focus_last_tick: Instant::now(),
            status: None,
        }
    }

    /// Key of the highlighted lesson
    pub fn selected_key(&self) -> LessonKey {
        LessonKey::new(self.days.selected, self.lessons.selected)
    }

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.show(text.into(), false);
    }

    pub fn celebrate(&mut self, text: impl Into<String>) {
        self.show(text.into(), true);
    }

    fn show(&mut self, text: String, celebrate: bool) {
        self.status = Some(StatusMessage { text, celebrate, shown_at: Instant::now() });
    }

    /// Drop the status message once it has timed out
    pub fn expire_status(&mut self) {
        if self.status.as_ref().is_some_and(|s| s.shown_at.elapsed() >= STATUS_TIMEOUT) {
            self.status = None;
        }
    }
}
