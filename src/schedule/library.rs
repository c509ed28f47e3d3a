//! Saved schedules
//!
//! Users can keep several schedules, each generated from its own start date,
//! and switch between them. One of them may be marked active.

use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::catalog::generate;
use super::model::Day;
use crate::store::{Backend, SCHEDULES, Store};

/// Errors from schedule management
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// No saved schedule has this id
    #[error("no schedule with id {0:?}")]
    NotFound(String),

    /// Failed to persist the schedule library
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// A named, generated schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSchedule {
    pub id: String,
    pub name: String,
    pub start_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub days: Vec<Day>,
}

/// Persisted form of the library
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleList {
    #[serde(default)]
    pub schedules: Vec<SavedSchedule>,
    #[serde(default)]
    pub active: Option<String>,
}

/// All saved schedules plus the active pointer
#[derive(Debug)]
pub struct ScheduleLibrary {
    store: Store<ScheduleList>,
}

impl ScheduleLibrary {
    pub fn open(backend: Arc<dyn Backend>) -> Self {
        Self { store: Store::open(backend, SCHEDULES) }
    }

    /// Generate and save a new schedule. The first schedule becomes active.
    pub fn add(&mut self, name: &str, start_date: NaiveDate) -> Result<SavedSchedule> {
        let created_at = Utc::now();
        let base_id = format!("schedule-{}", created_at.timestamp_millis());

        let schedule = self.store.update(|list| {
            let mut id = base_id.clone();
            let mut n = 1;
            while list.schedules.iter().any(|s| s.id == id) {
                n += 1;
                id = format!("{base_id}-{n}");
            }

            let schedule = SavedSchedule {
                id,
                name: name.to_string(),
                start_date,
                created_at,
                days: generate(start_date),
            };
            list.schedules.push(schedule.clone());
            if list.schedules.len() == 1 {
                list.active = Some(schedule.id.clone());
            }
            schedule
        })?;

        tracing::info!(id = %schedule.id, %start_date, "schedule added");
        Ok(schedule)
    }

    /// Delete a schedule, returning whether it existed.
    ///
    /// Deleting the active schedule moves the pointer to the first remaining
    /// schedule, or clears it.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        if self.get(id).is_none() {
            return Ok(false);
        }

        self.store.update(|list| {
            list.schedules.retain(|s| s.id != id);
            if list.active.as_deref() == Some(id) {
                list.active = list.schedules.first().map(|s| s.id.clone());
            }
        })?;
        Ok(true)
    }

    pub fn get(&self, id: &str) -> Option<&SavedSchedule> {
        self.store.get().schedules.iter().find(|s| s.id == id)
    }

    pub fn list(&self) -> &[SavedSchedule] {
        &self.store.get().schedules
    }

    /// Point the active schedule at `id`
    pub fn set_active(&mut self, id: &str) -> Result<(), ScheduleError> {
        if self.get(id).is_none() {
            return Err(ScheduleError::NotFound(id.to_string()));
        }
        self.store.update(|list| list.active = Some(id.to_string()))?;
        Ok(())
    }

    pub fn active_id(&self) -> Option<&str> {
        self.store.get().active.as_deref()
    }

    /// The active schedule, if the pointer is set and still valid
    pub fn active(&self) -> Option<&SavedSchedule> {
        self.active_id().and_then(|id| self.get(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryBackend;

    fn library() -> ScheduleLibrary {
        ScheduleLibrary::open(Arc::new(MemoryBackend::default()))
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn first_schedule_becomes_active() {
        let mut lib = library();
        let first = lib.add("Spring", date(2026, 2, 15)).unwrap();
        let _second = lib.add("Summer", date(2026, 6, 1)).unwrap();

        assert_eq!(lib.list().len(), 2);
        assert_eq!(lib.active_id(), Some(first.id.as_str()));
    }

    #[test]
    fn ids_are_unique() {
        let mut lib = library();
        let a = lib.add("A", date(2026, 1, 1)).unwrap();
        let b = lib.add("B", date(2026, 1, 1)).unwrap();
        assert_ne!(a.id, b.id);
        assert!(a.id.starts_with("schedule-"));
    }

    #[test]
    fn added_schedule_is_generated_from_start_date() {
        let mut lib = library();
        let s = lib.add("Autumn", date(2026, 9, 1)).unwrap();
        assert_eq!(s.days, generate(date(2026, 9, 1)));
    }

    #[test]
    fn deleting_active_moves_pointer() {
        let mut lib = library();
        let a = lib.add("A", date(2026, 1, 1)).unwrap();
        let b = lib.add("B", date(2026, 2, 1)).unwrap();

        assert!(lib.delete(&a.id).unwrap());
        assert_eq!(lib.active_id(), Some(b.id.as_str()));

        assert!(lib.delete(&b.id).unwrap());
        assert_eq!(lib.active_id(), None);
        assert!(lib.active().is_none());
    }

    #[test]
    fn deleting_unknown_is_false() {
        let mut lib = library();
        assert!(!lib.delete("schedule-0").unwrap());
    }

    #[test]
    fn set_active_rejects_unknown_id() {
        let mut lib = library();
        let err = lib.set_active("nope").unwrap_err();
        assert!(matches!(err, ScheduleError::NotFound(id) if id == "nope"));
    }

    #[test]
    fn set_active_switches_schedule() {
        let mut lib = library();
        let _a = lib.add("A", date(2026, 1, 1)).unwrap();
        let b = lib.add("B", date(2026, 2, 1)).unwrap();

        lib.set_active(&b.id).unwrap();
        assert_eq!(lib.active().map(|s| s.name.as_str()), Some("B"));
    }
}
