//! Achievements
//!
//! Statistical achievements (lessons, streak, days) are recomputed from the
//! current [`Stats`] every time. The persisted "seen" set exists only so a
//! newly crossed threshold is reported exactly once.
//!
//! Special achievements have no statistical source. They are granted when a
//! lesson is completed at a matching local time (see [`special_triggers`]) and
//! are read back from the seen set.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use anyhow::Result;
use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

use super::Stats;
use crate::schedule::catalog::{CATALOG_DAYS, CATALOG_LESSONS};
use crate::store::{ACHIEVEMENTS as ACHIEVEMENTS_NS, Backend, Store};

/// What an achievement measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Lessons,
    Streak,
    Days,
    Special,
}

/// Static description of an achievement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AchievementDef {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub requirement: usize,
    pub category: Category,
}

const fn def(
    id: &'static str,
    title: &'static str,
    description: &'static str,
    icon: &'static str,
    requirement: usize,
    category: Category,
) -> AchievementDef {
    AchievementDef { id, title, description, icon, requirement, category }
}

/// All achievements, in display order
pub const ACHIEVEMENTS: &[AchievementDef] = &[
    def("first_lesson", "First Steps", "Complete your first lesson", "🎯", 1, Category::Lessons),
    def("5_lessons", "Getting Started", "Complete 5 lessons", "📚", 5, Category::Lessons),
    def("10_lessons", "Dedicated Learner", "Complete 10 lessons", "🌟", 10, Category::Lessons),
    def("25_lessons", "Knowledge Seeker", "Complete 25 lessons", "🔥", 25, Category::Lessons),
    def("50_lessons", "Master Student", "Complete 50 lessons", "👑", 50, Category::Lessons),
    def(
        "all_lessons",
        "Perfect Score!",
        "Complete ALL lessons",
        "🏆",
        CATALOG_LESSONS,
        Category::Lessons,
    ),
    def("3_day_streak", "Consistent", "3 day streak", "🔥", 3, Category::Streak),
    def("7_day_streak", "Week Warrior", "7 day streak", "⚡", 7, Category::Streak),
    def("14_day_streak", "Unstoppable", "14 day streak", "💪", 14, Category::Streak),
    def(
        "full_streak",
        "Legendary",
        "Complete every day in a row",
        "🎖️",
        CATALOG_DAYS,
        Category::Streak,
    ),
    def("5_days", "Good Start", "Complete 5 full days", "📅", 5, Category::Days),
    def("10_days", "Half Way", "Complete 10 full days", "🎉", 10, Category::Days),
    def("20_days", "Almost There", "Complete 20 full days", "🚀", 20, Category::Days),
    def("weekend_warrior", "Weekend Warrior", "Study on weekend", "💼", 1, Category::Special),
    def("early_bird", "Early Bird", "Complete before 9 AM", "🌅", 1, Category::Special),
    def("night_owl", "Night Owl", "Complete after 10 PM", "🦉", 1, Category::Special),
];

/// Points awarded per unlocked achievement
pub const POINTS_PER_ACHIEVEMENT: usize = 100;

/// An achievement evaluated against current statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Achievement {
    #[serde(flatten)]
    pub def: AchievementDef,
    pub unlocked: bool,
    /// Progress toward the requirement, capped at the requirement
    pub progress: usize,
}

/// Result of evaluating every achievement
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AchievementReport {
    /// Every achievement, for display
    pub achievements: Vec<Achievement>,
    /// Achievements unlocked now that had not been seen before
    pub newly_unlocked: Vec<AchievementDef>,
}

impl AchievementReport {
    pub fn unlocked_count(&self) -> usize {
        self.achievements.iter().filter(|a| a.unlocked).count()
    }

    pub fn points(&self) -> usize {
        self.unlocked_count() * POINTS_PER_ACHIEVEMENT
    }

    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &Achievement> {
        self.achievements.iter().filter(move |a| a.def.category == category)
    }
}

/// Evaluate `config` against `stats`.
///
/// `seen` holds ids previously recorded as unlocked. It is not modified; the
/// caller records `newly_unlocked` once any side effects have fired.
pub fn evaluate(
    config: &[AchievementDef],
    stats: &Stats,
    seen: &BTreeSet<String>,
) -> AchievementReport {
    let mut report = AchievementReport::default();

    for def in config {
        let was_seen = seen.contains(def.id);
        let (current, unlocked) = match def.category {
            Category::Lessons => (stats.total_completed, stats.total_completed >= def.requirement),
            Category::Streak => (stats.current_streak, stats.current_streak >= def.requirement),
            Category::Days => (stats.days_completed, stats.days_completed >= def.requirement),
            Category::Special => (usize::from(was_seen), was_seen),
        };

        if unlocked && !was_seen {
            report.newly_unlocked.push(*def);
        }

        report.achievements.push(Achievement {
            def: *def,
            unlocked,
            progress: current.min(def.requirement),
        });
    }

    report
}

/// Special achievements earned by completing a lesson at `at` (local time)
pub fn special_triggers(at: NaiveDateTime) -> Vec<&'static str> {
    let mut ids = Vec::new();
    if matches!(at.weekday(), Weekday::Sat | Weekday::Sun) {
        ids.push("weekend_warrior");
    }
    if at.hour() < 9 {
        ids.push("early_bird");
    }
    if at.hour() >= 22 {
        ids.push("night_owl");
    }
    ids
}

/// Persisted set of achievements already reported as unlocked
#[derive(Debug)]
pub struct AchievementStore {
    store: Store<BTreeMap<String, bool>>,
}

impl AchievementStore {
    pub fn open(backend: Arc<dyn Backend>) -> Self {
        Self { store: Store::open(backend, ACHIEVEMENTS_NS) }
    }

    /// Ids recorded as unlocked
    pub fn seen(&self) -> BTreeSet<String> {
        self.store.get().iter().filter(|(_, v)| **v).map(|(k, _)| k.clone()).collect()
    }

    /// Record the newly unlocked achievements of a report as seen
    pub fn record(&mut self, report: &AchievementReport) -> Result<()> {
        if report.newly_unlocked.is_empty() {
            return Ok(());
        }
        self.store.update(|seen| {
            for def in &report.newly_unlocked {
                tracing::info!(id = def.id, "achievement unlocked");
                seen.insert(def.id.to_string(), true);
            }
        })
    }

    /// Grant a special achievement, returning true if it was not seen before
    pub fn grant(&mut self, id: &str) -> Result<bool> {
        if self.store.get().get(id).copied().unwrap_or(false) {
            return Ok(false);
        }
        self.store.update(|seen| seen.insert(id.to_string(), true))?;
        tracing::info!(id, "special achievement granted");
        Ok(true)
    }

    pub fn reset(&mut self) -> Result<()> {
        self.store.clear()
    }
}

/// Look up an achievement definition by id
pub fn find(id: &str) -> Option<&'static AchievementDef> {
    ACHIEVEMENTS.iter().find(|d| d.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryBackend;
    use chrono::NaiveDate;

    fn stats(total_completed: usize, current_streak: usize, days_completed: usize) -> Stats {
        Stats { total_completed, current_streak, days_completed, ..Default::default() }
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, 30, 0).unwrap()
    }

    const FIRST: AchievementDef = def(
        "first_lesson",
        "First Steps",
        "Complete your first lesson",
        "🎯",
        1,
        Category::Lessons,
    );

    #[test]
    fn threshold_crossing_is_reported_once() {
        let seen = BTreeSet::new();
        let report = evaluate(&[FIRST], &stats(0, 0, 0), &seen);
        assert!(report.newly_unlocked.is_empty());
        assert!(!report.achievements[0].unlocked);

        let report = evaluate(&[FIRST], &stats(1, 0, 0), &seen);
        assert_eq!(report.newly_unlocked, vec![FIRST]);

        let seen: BTreeSet<String> = ["first_lesson".to_string()].into();
        let report = evaluate(&[FIRST], &stats(5, 0, 0), &seen);
        assert!(report.achievements[0].unlocked);
        assert!(report.newly_unlocked.is_empty());
    }

    #[test]
    fn progress_is_capped_at_requirement() {
        let report = evaluate(ACHIEVEMENTS, &stats(7, 2, 1), &BTreeSet::new());
        let five = report.achievements.iter().find(|a| a.def.id == "5_lessons").unwrap();
        assert_eq!(five.progress, 5);
        let ten = report.achievements.iter().find(|a| a.def.id == "10_lessons").unwrap();
        assert_eq!(ten.progress, 7);
        assert!(!ten.unlocked);
    }

    #[test]
    fn categories_read_their_own_stat() {
        let report = evaluate(ACHIEVEMENTS, &stats(0, 3, 5), &BTreeSet::new());
        let unlocked: Vec<_> = report.newly_unlocked.iter().map(|d| d.id).collect();
        assert_eq!(unlocked, vec!["3_day_streak", "5_days"]);
    }

    #[test]
    fn specials_come_only_from_seen_set() {
        let report = evaluate(ACHIEVEMENTS, &stats(60, 20, 20), &BTreeSet::new());
        assert!(report.by_category(Category::Special).all(|a| !a.unlocked));

        let seen: BTreeSet<String> = ["night_owl".to_string()].into();
        let report = evaluate(ACHIEVEMENTS, &stats(0, 0, 0), &seen);
        let owl = report.achievements.iter().find(|a| a.def.id == "night_owl").unwrap();
        assert!(owl.unlocked);
        assert_eq!(owl.progress, 1);
        assert!(report.newly_unlocked.is_empty());
    }

    #[test]
    fn points_are_per_unlocked() {
        let report = evaluate(ACHIEVEMENTS, &stats(10, 0, 0), &BTreeSet::new());
        assert_eq!(report.unlocked_count(), 3);
        assert_eq!(report.points(), 300);
    }

    #[test]
    fn special_triggers_by_time() {
        // 2026-02-18 is a Wednesday
        assert_eq!(special_triggers(at(2026, 2, 18, 12)), Vec::<&str>::new());
        assert_eq!(special_triggers(at(2026, 2, 18, 7)), vec!["early_bird"]);
        assert_eq!(special_triggers(at(2026, 2, 18, 22)), vec!["night_owl"]);
        // 2026-02-21 is a Saturday
        assert_eq!(special_triggers(at(2026, 2, 21, 8)), vec!["weekend_warrior", "early_bird"]);
    }

    #[test]
    fn store_records_and_grants_once() {
        let backend: Arc<dyn Backend> = Arc::new(MemoryBackend::default());
        let mut store = AchievementStore::open(backend.clone());

        let report = evaluate(&[FIRST], &stats(1, 0, 0), &store.seen());
        store.record(&report).unwrap();
        assert!(store.seen().contains("first_lesson"));

        assert!(store.grant("early_bird").unwrap());
        assert!(!store.grant("early_bird").unwrap());

        let reopened = AchievementStore::open(backend);
        assert_eq!(reopened.seen().len(), 2);
    }

    #[test]
    fn every_id_is_unique() {
        let ids: BTreeSet<_> = ACHIEVEMENTS.iter().map(|d| d.id).collect();
        assert_eq!(ids.len(), ACHIEVEMENTS.len());
        assert!(find("early_bird").is_some());
    }
}
