//! Application state and event handling

pub mod input;
pub mod state;

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::Result;
use chrono::Local;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::config::Config;
use crate::focus::{FocusTimer, TickEvent};
use crate::schedule::find_day;
use crate::stats::ACHIEVEMENTS;
use crate::theme::Theme;
use crate::tracker::Tracker;
use crate::ui;
use input::{Action, key_to_action};
use state::{AppState, Panel, Screen};

const SECOND: Duration = Duration::from_secs(1);

/// The main application
pub struct App {
    /// Application configuration
    config: Config,

    /// Persisted study data
    tracker: Tracker,

    /// Active colour palette
    theme: Theme,

    /// Current application state
    state: AppState,

    /// Terminal backend
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl App {
    /// Create a new application instance
    pub fn new(config: Config, tracker: Tracker) -> Result<Self> {
        let today = Local::now().date_naive();
        let day = find_day(tracker.days(), today).unwrap_or(0);
        let focus = FocusTimer::new(config.focus_seconds(), config.break_seconds());
        let theme = tracker.theme.active_theme();
        let terminal = Self::setup_terminal()?;

        Ok(Self { config, tracker, theme, state: AppState::new(day, focus), terminal })
    }

    /// Set up the terminal for TUI rendering
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    /// Restore the terminal to its original state
    fn restore_terminal(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    /// Run the application main loop
    pub async fn run(&mut self) -> Result<()> {
        // Set up panic hook to restore terminal
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
            original_hook(panic_info);
        }));

        loop {
            let today = Local::now().date_naive();

            // Draw UI
            let vim_mode = self.config.vim_mode;
            self.terminal.draw(|frame| {
                ui::draw(frame, &mut self.state, &self.tracker, &self.theme, vim_mode, today);
            })?;

            // Handle events
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        match self.handle_key(key) {
                            Ok(true) => break, // Exit requested
                            Ok(false) => {}    // Continue
                            Err(e) => {
                                tracing::error!("Error handling key: {}", e);
                                self.state.set_status(format!("Error: {e:#}"));
                            }
                        }
                    }
                }
            }

            self.tick_focus();
            self.state.expire_status();
        }

        self.restore_terminal()?;
        Ok(())
    }

    /// Handle a key press, returns true if should exit
    fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
        let Some(action) = key_to_action(key.code, key.modifiers, self.config.vim_mode) else {
            return Ok(false);
        };

        match action {
            Action::Quit => return Ok(true),
            Action::Help => self.switch_screen(Screen::Help),
            Action::Achievements => self.switch_screen(Screen::Achievements),
            Action::Focus => self.switch_screen(Screen::Focus),
            Action::Back if self.state.screen != Screen::Dashboard => {
                self.state.screen = Screen::Dashboard;
            }
            _ => match self.state.screen {
                Screen::Dashboard => self.handle_dashboard(action)?,
                Screen::Achievements => self.handle_achievements(action),
                Screen::Focus => self.handle_focus(action),
                Screen::Help => {}
            },
        }
        Ok(false)
    }

    /// Open `screen`, or return to the dashboard if it is already open
    fn switch_screen(&mut self, screen: Screen) {
        self.state.screen = if self.state.screen == screen { Screen::Dashboard } else { screen };
    }

    fn handle_dashboard(&mut self, action: Action) -> Result<()> {
        let day_count = self.tracker.days().len();
        let lesson_count = self.lesson_count();
        let half_page = (self.state.days.visible_height / 2).max(1) as isize;

        match (action, self.state.panel) {
            (Action::Up, Panel::Days) => self.move_day(-1),
            (Action::Down, Panel::Days) => self.move_day(1),
            (Action::HalfPageUp, Panel::Days) => self.move_day(-half_page),
            (Action::HalfPageDown, Panel::Days) => self.move_day(half_page),
            (Action::Top, Panel::Days) => self.move_day(-(day_count as isize)),
            (Action::Bottom, Panel::Days) => self.move_day(day_count as isize),
            (Action::Up, Panel::Lessons) => self.state.lessons.move_by(-1, lesson_count),
            (Action::Down, Panel::Lessons) => self.state.lessons.move_by(1, lesson_count),
            (Action::Top, Panel::Lessons) => self.state.lessons.select(0, lesson_count),
            (Action::Bottom, Panel::Lessons) => {
                self.state.lessons.select(lesson_count, lesson_count);
            }
            (Action::Right | Action::Select, Panel::Days) => self.state.panel = Panel::Lessons,
            (Action::Left | Action::Back, Panel::Lessons) => self.state.panel = Panel::Days,
            (Action::Select | Action::Toggle, Panel::Lessons) => self.toggle_selected()?,
            (Action::Toggle, Panel::Days) => {
                self.state.panel = Panel::Lessons;
                self.toggle_selected()?;
            }
            (Action::Today, _) => {
                let today = Local::now().date_naive();
                match find_day(self.tracker.days(), today) {
                    Some(day) => {
                        self.state.days.select(day, day_count);
                        self.state.lessons.select(0, self.lesson_count());
                    }
                    None => self.state.set_status("Today is outside the schedule"),
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn move_day(&mut self, delta: isize) {
        self.state.days.move_by(delta, self.tracker.days().len());
        let lessons = self.lesson_count();
        self.state.lessons.select(self.state.lessons.selected, lessons);
    }

    fn lesson_count(&self) -> usize {
        self.tracker.days().get(self.state.days.selected).map_or(0, |d| d.lessons.len())
    }

    /// Flip completion of the highlighted lesson and report unlocks
    fn toggle_selected(&mut self) -> Result<()> {
        let key = self.state.selected_key();
        let Some(name) = self.tracker.lesson_title(key) else {
            return Ok(());
        };

        let now = Local::now().naive_local();
        let (completed, unlocked) = self.tracker.toggle(key, now)?;

        if unlocked.is_empty() {
            let verb = if completed { "Completed" } else { "Unmarked" };
            self.state.set_status(format!("{verb} {name}"));
        } else {
            let titles: Vec<_> =
                unlocked.iter().map(|d| format!("{} {}", d.icon, d.title)).collect();
            self.state.celebrate(format!("Achievement unlocked: {}", titles.join(", ")));
        }
        Ok(())
    }

    fn handle_achievements(&mut self, action: Action) {
        let max = ACHIEVEMENTS.len().saturating_sub(1);
        let scroll = &mut self.state.achievements_scroll;
        match action {
            Action::Up => *scroll = scroll.saturating_sub(1),
            Action::Down => *scroll = (*scroll + 1).min(max),
            Action::Top => *scroll = 0,
            Action::Bottom => *scroll = max,
            _ => {}
        }
    }

    fn handle_focus(&mut self, action: Action) {
        match action {
            Action::Toggle | Action::Select => {
                self.state.focus.toggle();
                self.state.focus_last_tick = std::time::Instant::now();
            }
            Action::Reset => self.state.focus.reset(),
            _ => {}
        }
    }

    /// Advance the focus timer by however many whole seconds have passed
    fn tick_focus(&mut self) {
        if !self.state.focus.is_running() {
            return;
        }

        while self.state.focus_last_tick.elapsed() >= SECOND {
            self.state.focus_last_tick += SECOND;
            match self.state.focus.tick() {
                Some(TickEvent::FocusComplete { sessions }) => {
                    self.state.celebrate(format!(
                        "Focus session {sessions} complete, take a {} minute break",
                        self.config.break_minutes.max(1)
                    ));
                    break;
                }
                Some(TickEvent::BreakComplete) => {
                    self.state.set_status("Break over, ready to focus");
                    break;
                }
                Some(TickEvent::Tick { .. }) => {}
                None => break,
            }
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = self.restore_terminal();
    }
}
