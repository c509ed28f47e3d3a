//! Note and custom-name persistence

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::schedule::{Day, Lesson, LessonKey};
use crate::store::{Backend, LESSON_NAMES, NOTES, ProgressMap, Store, decode_keyed};

/// Free text keyed by lesson position
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct LessonTexts {
    entries: BTreeMap<LessonKey, String>,
}

impl From<BTreeMap<String, String>> for LessonTexts {
    fn from(raw: BTreeMap<String, String>) -> Self {
        Self { entries: decode_keyed(raw) }
    }
}

impl From<LessonTexts> for BTreeMap<String, String> {
    fn from(texts: LessonTexts) -> Self {
        texts.entries.into_iter().map(|(k, v)| (k.encode(), v)).collect()
    }
}

impl LessonTexts {
    pub fn get(&self, key: LessonKey) -> Option<&str> {
        self.entries.get(&key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (LessonKey, &str)> {
        self.entries.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Set or, for blank text, remove an entry
    fn put(&mut self, key: LessonKey, text: &str) {
        if text.trim().is_empty() {
            self.entries.remove(&key);
        } else {
            self.entries.insert(key, text.to_string());
        }
    }
}

/// A lesson joined with its name override, note and completion state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LessonEntry {
    pub key: LessonKey,
    pub date: NaiveDate,
    /// Custom name, or the catalog subject name
    pub name: String,
    pub subject: String,
    pub number: u32,
    pub topic: String,
    pub note: Option<String>,
    pub completed: bool,
}

/// Notes and custom lesson names
#[derive(Debug)]
pub struct NotesStore {
    notes: Store<LessonTexts>,
    names: Store<LessonTexts>,
}

impl NotesStore {
    /// Open both namespaces
    pub fn open(backend: Arc<dyn Backend>) -> Self {
        Self {
            notes: Store::open(backend.clone(), NOTES),
            names: Store::open(backend, LESSON_NAMES),
        }
    }

    /// All notes
    pub fn notes(&self) -> &LessonTexts {
        self.notes.get()
    }

    /// All custom names
    pub fn names(&self) -> &LessonTexts {
        self.names.get()
    }

    /// Note for a lesson
    pub fn note(&self, key: LessonKey) -> Option<&str> {
        self.notes.get().get(key)
    }

    /// Save a note. Blank text deletes the note.
    pub fn set_note(&mut self, key: LessonKey, text: &str) -> Result<()> {
        self.notes.update(|n| n.put(key, text))
    }

    /// Delete a note, returning whether one existed
    pub fn delete_note(&mut self, key: LessonKey) -> Result<bool> {
        if self.note(key).is_none() {
            return Ok(false);
        }
        self.notes.update(|n| n.entries.remove(&key).is_some())
    }

    /// Custom name for a lesson
    pub fn custom_name(&self, key: LessonKey) -> Option<&str> {
        self.names.get().get(key)
    }

    /// Override a lesson's name. A blank name restores the catalog name.
    pub fn rename(&mut self, key: LessonKey, name: &str) -> Result<()> {
        self.names.update(|n| n.put(key, name))
    }

    /// Name to show for a lesson: the override if set, else the subject name
    pub fn display_name(&self, key: LessonKey, lesson: &Lesson) -> String {
        self.custom_name(key).map(str::to_string).unwrap_or_else(|| lesson.subject.clone())
    }

    /// Every lesson in the schedule joined with notes, names and progress
    pub fn lessons(&self, days: &[Day], progress: &ProgressMap) -> Vec<LessonEntry> {
        days.iter()
            .enumerate()
            .flat_map(|(day_index, day)| {
                day.keyed_lessons(day_index).map(move |(key, lesson)| (key, day.date, lesson))
            })
            .map(|(key, date, lesson)| LessonEntry {
                key,
                date,
                name: self.display_name(key, lesson),
                subject: lesson.subject.clone(),
                number: lesson.number,
                topic: lesson.topic.clone(),
                note: self.note(key).map(str::to_string),
                completed: progress.is_completed(key),
            })
            .collect()
    }

    /// Lessons whose name, topic or note contains `query`, ignoring case.
    ///
    /// An empty query matches everything.
    pub fn search(&self, days: &[Day], progress: &ProgressMap, query: &str) -> Vec<LessonEntry> {
        let query = query.trim().to_lowercase();
        let mut lessons = self.lessons(days, progress);
        if query.is_empty() {
            return lessons;
        }

        lessons.retain(|l| {
            l.name.to_lowercase().contains(&query)
                || l.topic.to_lowercase().contains(&query)
                || l.note.as_deref().is_some_and(|n| n.to_lowercase().contains(&query))
        });
        lessons
    }

    /// Drop every note and custom name
    pub fn clear(&mut self) -> Result<()> {
        self.notes.clear()?;
        self.names.clear()
    }
}
