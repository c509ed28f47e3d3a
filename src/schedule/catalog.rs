//! Built-in lesson catalog
//!
//! The catalog lays a fixed list of lessons out over consecutive days,
//! three lessons per day, starting from a configurable date.

use chrono::{Days, NaiveDate};

use super::model::{Day, Lesson};

/// Default first day of the schedule
pub const DEFAULT_START_DATE: (i32, u32, u32) = (2026, 2, 15);

/// Lessons per day, in order. Each entry is `(subject, lesson number)`.
const BASE_SCHEDULE: [[(&str, u32); 3]; 20] = [
    [("Nahw", 1), ("Science", 1), ("Trigonometry", 1)],
    [("History", 1), ("Nosoos", 1), ("Matrices", 1)],
    [("Nahw", 2), ("A'dab", 1), ("Straight Line", 1)],
    [("Science", 2), ("Reading", 1), ("Vectors", 1)],
    [("Nahw", 3), ("Trigonometry", 2), ("Balagha", 1)],
    [("History", 2), ("Nosoos", 2), ("Linear Programming", 1)],
    [("Nahw", 4), ("Science", 3), ("Matrices", 2)],
    [("A'dab", 2), ("Trigonometry", 3), ("Straight Line", 2)],
    [("Nahw", 5), ("Nosoos", 3), ("Vectors", 2)],
    [("Science", 4), ("History", 3), ("Reading", 2)],
    [("Nahw", 6), ("Trigonometry", 4), ("Matrices", 3)],
    [("Nosoos", 4), ("A'dab", 3), ("Balagha", 2)],
    [("Nahw", 7), ("Science", 5), ("Straight Line", 3)],
    [("History", 4), ("Trigonometry", 5), ("Linear Programming", 2)],
    [("Nahw", 8), ("Nosoos", 5), ("Matrices", 4)],
    [("Science", 6), ("Vectors", 3), ("Reading", 3)],
    [("Nahw", 9), ("Trigonometry", 6), ("A'dab", 4)],
    [("History", 5), ("Science", 7), ("Straight Line", 4)],
    [("Nahw", 10), ("Nosoos", 6), ("Matrices", 5)],
    [("Science", 8), ("History", 6), ("Trigonometry", 7)],
];

/// Number of days in the built-in catalog
pub const CATALOG_DAYS: usize = BASE_SCHEDULE.len();

/// Number of lessons in the built-in catalog
pub const CATALOG_LESSONS: usize = BASE_SCHEDULE.len() * 3;

/// The default start date as a `NaiveDate`
pub fn default_start_date() -> NaiveDate {
    let (y, m, d) = DEFAULT_START_DATE;
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

/// Generate the schedule starting at `start`.
///
/// Day `i` is scheduled on `start + i` days. Deterministic in `start`.
pub fn generate(start: NaiveDate) -> Vec<Day> {
    BASE_SCHEDULE
        .iter()
        .enumerate()
        .map(|(i, lessons)| Day {
            number: i as u32 + 1,
            date: start.checked_add_days(Days::new(i as u64)).unwrap_or(NaiveDate::MAX),
            lessons: lessons.iter().map(|&(subject, n)| Lesson::new(subject, n)).collect(),
        })
        .collect()
}

/// Index of the day scheduled on `date`, if any
pub fn find_day(days: &[Day], date: NaiveDate) -> Option<usize> {
    days.iter().position(|d| d.date == date)
}

/// Total number of lesson slots in a schedule
pub fn lesson_count(days: &[Day]) -> usize {
    days.iter().map(|d| d.lessons.len()).sum()
}
