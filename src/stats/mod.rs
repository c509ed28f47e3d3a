//! Derived statistics over a schedule and its progress
//!
//! Everything here is a pure function of the schedule, the progress mapping
//! and the reference date. Nothing is cached or persisted.

pub mod achievements;

pub use achievements::{
    Achievement, AchievementDef, AchievementReport, AchievementStore, Category, ACHIEVEMENTS,
    evaluate, special_triggers,
};

use chrono::NaiveDate;
use serde::Serialize;

use crate::schedule::{Day, find_day};
use crate::store::ProgressMap;

/// Completion counts for one subject
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SubjectProgress {
    pub completed: usize,
    pub total: usize,
}

impl SubjectProgress {
    pub fn percent(&self) -> u32 {
        percent(self.completed, self.total)
    }
}

/// Aggregate statistics for the eligible prefix of a schedule
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Stats {
    pub total_completed: usize,
    pub total_lessons: usize,
    pub days_completed: usize,
    pub current_streak: usize,
    pub longest_streak: usize,
    /// Percentage of eligible lessons completed, 0.0 to 100.0
    pub completion_rate: f64,
    /// Subject name to counts, in order of first appearance
    pub per_subject: Vec<(String, SubjectProgress)>,
}

impl Stats {
    /// Completion rate rounded to a whole percent
    pub fn completion_percent(&self) -> u32 {
        self.completion_rate.round() as u32
    }

    /// Counts for one subject, if it appears in the eligible days
    pub fn subject(&self, name: &str) -> Option<SubjectProgress> {
        self.per_subject.iter().find(|(n, _)| n == name).map(|(_, p)| *p)
    }
}

/// Number of leading days that count as "in the past" relative to `as_of`.
///
/// That is the index of the day scheduled on `as_of` plus one, or the whole
/// schedule when `as_of` has no scheduled day.
pub fn eligible_days(days: &[Day], as_of: NaiveDate) -> usize {
    find_day(days, as_of).map(|i| i + 1).unwrap_or(days.len())
}

/// Compute statistics for `days` as of `as_of`
pub fn compute_stats(days: &[Day], progress: &ProgressMap, as_of: NaiveDate) -> Stats {
    let end = eligible_days(days, as_of);
    let mut stats = Stats::default();
    let mut run = 0;

    for (day_index, day) in days[..end].iter().enumerate() {
        for (key, lesson) in day.keyed_lessons(day_index) {
            stats.total_lessons += 1;
            let done = progress.is_completed(key);
            if done {
                stats.total_completed += 1;
            }

            let slot = match stats.per_subject.iter().position(|(n, _)| *n == lesson.subject) {
                Some(slot) => slot,
                None => {
                    stats.per_subject.push((lesson.subject.clone(), SubjectProgress::default()));
                    stats.per_subject.len() - 1
                }
            };
            let entry = &mut stats.per_subject[slot].1;
            entry.total += 1;
            if done {
                entry.completed += 1;
            }
        }

        if progress.is_day_complete(day_index, day.lessons.len()) {
            run += 1;
            stats.days_completed += 1;
            stats.longest_streak = stats.longest_streak.max(run);
        } else {
            run = 0;
        }
    }

    stats.current_streak = (0..end)
        .rev()
        .take_while(|&i| progress.is_day_complete(i, days[i].lessons.len()))
        .count();

    stats.completion_rate = if stats.total_lessons == 0 {
        0.0
    } else {
        stats.total_completed as f64 / stats.total_lessons as f64 * 100.0
    };

    stats
}

/// Rounded percentage of a day's lessons completed; an empty day is 100
pub fn day_progress(day_index: usize, day: &Day, progress: &ProgressMap) -> u32 {
    if day.lessons.is_empty() {
        return 100;
    }
    percent(progress.completed_in_day(day_index, day.lessons.len()), day.lessons.len())
}

/// One day inside a weekly summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaySummary {
    pub index: usize,
    pub number: u32,
    pub date: NaiveDate,
    pub completed: usize,
    pub total: usize,
    pub percent: u32,
}

/// A block of up to seven consecutive scheduled days
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekSummary {
    /// Week number, 1-based
    pub number: usize,
    pub days: Vec<DaySummary>,
    pub completed: usize,
    pub total: usize,
    pub percent: u32,
}

/// Split the whole schedule into weeks of seven days
pub fn weekly_summary(days: &[Day], progress: &ProgressMap) -> Vec<WeekSummary> {
    days.chunks(7)
        .enumerate()
        .map(|(week_index, chunk)| {
            let days: Vec<DaySummary> = chunk
                .iter()
                .enumerate()
                .map(|(offset, day)| {
                    let index = week_index * 7 + offset;
                    let total = day.lessons.len();
                    let completed = progress.completed_in_day(index, total);
                    DaySummary {
                        index,
                        number: day.number,
                        date: day.date,
                        completed,
                        total,
                        percent: day_progress(index, day, progress),
                    }
                })
                .collect();

            let completed = days.iter().map(|d| d.completed).sum();
            let total = days.iter().map(|d| d.total).sum();
            WeekSummary {
                number: week_index + 1,
                days,
                completed,
                total,
                percent: percent(completed, total),
            }
        })
        .collect()
}

fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 { 0 } else { (part as f64 / whole as f64 * 100.0).round() as u32 }
}
