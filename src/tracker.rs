//! The study tracker
//!
//! Owns the active schedule and every persisted namespace, all opened once
//! over a shared [`Backend`]. Both the CLI and the dashboard go through it.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};

use crate::config::Config;
use crate::config::reminders::ReminderStore;
use crate::export::{self, ImportError};
use crate::notes::{LessonEntry, NotesStore, ResourceStore};
use crate::schedule::{Day, Lesson, LessonKey, ScheduleLibrary, generate};
use crate::stats::{
    ACHIEVEMENTS, AchievementDef, AchievementReport, AchievementStore, Stats, WeekSummary,
    compute_stats, evaluate, special_triggers, weekly_summary,
};
use crate::store::{Backend, FileBackend, ProgressMap, ProgressStore};
use crate::theme::ThemeStore;

/// Study progress tracker
#[derive(Debug)]
pub struct Tracker {
    days: Vec<Day>,
    start_date: NaiveDate,
    pub progress: ProgressStore,
    pub achievements: AchievementStore,
    pub notes: NotesStore,
    pub resources: ResourceStore,
    pub reminders: ReminderStore,
    pub theme: ThemeStore,
    pub schedules: ScheduleLibrary,
}

impl Tracker {
    /// Open a tracker persisting into `data_dir`
    pub fn open_dir(config: &Config, data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir)
            .with_context(|| format!("Failed to create data directory {:?}", data_dir))?;
        Ok(Self::open(config, Arc::new(FileBackend::new(data_dir))))
    }

    /// Open a tracker over any backend
    pub fn open(config: &Config, backend: Arc<dyn Backend>) -> Self {
        let mut tracker = Self {
            days: Vec::new(),
            start_date: config.start_date,
            progress: ProgressStore::open(backend.clone()),
            achievements: AchievementStore::open(backend.clone()),
            notes: NotesStore::open(backend.clone()),
            resources: ResourceStore::open(backend.clone()),
            reminders: ReminderStore::open(backend.clone()),
            theme: ThemeStore::open(backend.clone()),
            schedules: ScheduleLibrary::open(backend),
        };
        tracker.refresh_days();
        tracker
    }

    /// Days of the active schedule, or the built-in one from the configured start date
    pub fn days(&self) -> &[Day] {
        &self.days
    }

    /// Rebuild the day list after the active schedule changed
    pub fn refresh_days(&mut self) {
        self.days = match self.schedules.active() {
            Some(schedule) => schedule.days.clone(),
            None => generate(self.start_date),
        };
    }

    /// The lesson a key points at, if it is inside the schedule
    pub fn lesson(&self, key: LessonKey) -> Option<&Lesson> {
        key.resolve(&self.days)
    }

    pub fn progress_map(&self) -> &ProgressMap {
        self.progress.map()
    }

    pub fn stats(&self, today: NaiveDate) -> Stats {
        compute_stats(&self.days, self.progress.map(), today)
    }

    pub fn weekly(&self) -> Vec<WeekSummary> {
        weekly_summary(&self.days, self.progress.map())
    }

    /// Achievements as of `today`, without recording anything
    pub fn achievements(&self, today: NaiveDate) -> AchievementReport {
        evaluate(ACHIEVEMENTS, &self.stats(today), &self.achievements.seen())
    }

    /// Mark a lesson complete or incomplete at local time `now`.
    ///
    /// Returns the achievements unlocked by this change, each reported once.
    pub fn mark(
        &mut self,
        key: LessonKey,
        completed: bool,
        now: NaiveDateTime,
    ) -> Result<Vec<AchievementDef>> {
        if self.lesson(key).is_none() {
            anyhow::bail!("Lesson {key} is not in the current schedule");
        }
        self.progress.set_completed(key.day, key.subject, completed)?;

        let mut unlocked = Vec::new();
        if completed {
            for id in special_triggers(now) {
                if self.achievements.grant(id)? {
                    unlocked.extend(crate::stats::achievements::find(id).copied());
                }
            }
        }

        let report = self.achievements(now.date());
        self.achievements.record(&report)?;
        unlocked.extend(report.newly_unlocked);
        Ok(unlocked)
    }

    /// Flip a lesson's completion, returning the new state and any unlocks
    pub fn toggle(
        &mut self,
        key: LessonKey,
        now: NaiveDateTime,
    ) -> Result<(bool, Vec<AchievementDef>)> {
        let completed = !self.progress.map().is_completed(key);
        let unlocked = self.mark(key, completed, now)?;
        Ok((completed, unlocked))
    }

    /// Lesson title honouring custom names, e.g. "Nahw – Lesson 1"
    pub fn lesson_title(&self, key: LessonKey) -> Option<String> {
        let lesson = self.lesson(key)?;
        Some(match self.notes.custom_name(key) {
            Some(name) => format!("{} \u{2013} Lesson {}", name, lesson.number),
            None => lesson.display_name(),
        })
    }

    /// Every lesson joined with names, notes and progress
    pub fn lessons(&self) -> Vec<LessonEntry> {
        self.notes.lessons(&self.days, self.progress.map())
    }

    pub fn search(&self, query: &str) -> Vec<LessonEntry> {
        self.notes.search(&self.days, self.progress.map(), query)
    }

    pub fn export_json(&self) -> Result<String> {
        export::export_json(self.progress.map()).context("Failed to serialize progress")
    }

    pub fn export_markdown(&self) -> String {
        export::export_markdown(&self.lessons())
    }

    /// Replace all progress with an exported document.
    ///
    /// On any error the current progress is left untouched.
    pub fn import_progress(&mut self, text: &str) -> Result<usize, ImportError> {
        let map = export::import_json(text)?;
        self.replace_progress(map)
    }

    /// Replace all progress with the contents of a file
    pub fn import_file(&mut self, path: &Path) -> Result<usize, ImportError> {
        let map = export::read_import_file(path)?;
        self.replace_progress(map)
    }

    fn replace_progress(&mut self, map: ProgressMap) -> Result<usize, ImportError> {
        let count = map.len();
        self.progress.replace(map)?;
        tracing::info!(entries = count, "progress imported");
        Ok(count)
    }

    /// Clear progress, achievements and notes
    pub fn reset(&mut self) -> Result<()> {
        self.progress.reset()?;
        self.achievements.reset()?;
        self.notes.clear()?;
        tracing::info!("all progress reset");
        Ok(())
    }
}
