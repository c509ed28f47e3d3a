//! Lesson schedule: data model, built-in catalog and saved schedules

pub mod catalog;
pub mod library;
pub mod model;

pub use catalog::{default_start_date, find_day, generate, lesson_count};
pub use library::{SavedSchedule, ScheduleError, ScheduleLibrary};
pub use model::{Day, KeyError, Lesson, LessonKey};
