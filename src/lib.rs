//! Study Dashboard - a terminal study-progress tracker
//!
//! Tracks completion of a day-by-day lesson schedule, derives streaks and
//! statistics from it, awards achievements, and keeps per-lesson notes and
//! resources. Everything is stored locally as JSON.

pub mod app;
pub mod cli;
pub mod config;
pub mod export;
pub mod focus;
pub mod notes;
pub mod schedule;
pub mod stats;
pub mod store;
pub mod theme;
pub mod tracker;
pub mod ui;

pub use app::App;
pub use config::Config;
pub use schedule::{Day, Lesson, LessonKey};
pub use stats::{Stats, compute_stats};
pub use theme::Theme;
pub use tracker::Tracker;
