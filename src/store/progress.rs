//! Lesson completion progress

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::{Backend, PROGRESS, Store, decode_keyed};
use crate::schedule::LessonKey;

/// Completion flags keyed by lesson position.
///
/// Keys outside the current schedule are kept as-is and simply never read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, bool>", into = "BTreeMap<String, bool>")]
pub struct ProgressMap {
    entries: BTreeMap<LessonKey, bool>,
}

impl From<BTreeMap<String, bool>> for ProgressMap {
    fn from(raw: BTreeMap<String, bool>) -> Self {
        Self { entries: decode_keyed(raw) }
    }
}

impl From<ProgressMap> for BTreeMap<String, bool> {
    fn from(map: ProgressMap) -> Self {
        map.entries.into_iter().map(|(k, v)| (k.encode(), v)).collect()
    }
}

impl FromIterator<(LessonKey, bool)> for ProgressMap {
    fn from_iter<I: IntoIterator<Item = (LessonKey, bool)>>(iter: I) -> Self {
        Self { entries: iter.into_iter().collect() }
    }
}

impl ProgressMap {
    /// Whether the lesson is marked complete; absent keys are incomplete
    pub fn is_completed(&self, key: LessonKey) -> bool {
        self.entries.get(&key).copied().unwrap_or(false)
    }

    /// Upsert a completion flag
    pub fn set(&mut self, key: LessonKey, completed: bool) {
        self.entries.insert(key, completed);
    }

    /// A day is complete iff every lesson in it is complete.
    ///
    /// A day with no lessons is complete.
    pub fn is_day_complete(&self, day_index: usize, subject_count: usize) -> bool {
        (0..subject_count).all(|s| self.is_completed(LessonKey::new(day_index, s)))
    }

    /// Number of lessons completed within one day
    pub fn completed_in_day(&self, day_index: usize, subject_count: usize) -> usize {
        (0..subject_count).filter(|&s| self.is_completed(LessonKey::new(day_index, s))).count()
    }

    /// Number of stored entries, including `false` and out-of-range ones
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate stored entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (LessonKey, bool)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, *v))
    }
}

/// Persisted progress namespace
#[derive(Debug)]
pub struct ProgressStore {
    store: Store<ProgressMap>,
}

impl ProgressStore {
    /// Open the progress namespace; malformed data loads as empty
    pub fn open(backend: Arc<dyn Backend>) -> Self {
        Self { store: Store::open(backend, PROGRESS) }
    }

    /// Current mapping
    pub fn map(&self) -> &ProgressMap {
        self.store.get()
    }

    /// Mark a lesson complete or incomplete and persist immediately
    pub fn set_completed(&mut self, day: usize, subject: usize, completed: bool) -> Result<()> {
        let key = LessonKey::new(day, subject);
        self.store.update(|m| m.set(key, completed))?;
        tracing::debug!(%key, completed, "progress updated");
        Ok(())
    }

    /// Flip a lesson's completion flag, returning the new value
    pub fn toggle(&mut self, key: LessonKey) -> Result<bool> {
        self.store.update(|m| {
            let completed = !m.is_completed(key);
            m.set(key, completed);
            completed
        })
    }

    /// Replace the whole mapping
    pub fn replace(&mut self, map: ProgressMap) -> Result<()> {
        self.store.set(map)
    }

    /// Drop all progress
    pub fn reset(&mut self) -> Result<()> {
        self.store.clear()
    }
}
