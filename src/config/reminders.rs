//! Daily study reminder settings

use std::sync::Arc;

use anyhow::Result;
use chrono::{Days, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::{Backend, REMINDERS, Store};

static TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01]\d|2[0-3]):([0-5]\d)$").unwrap());

/// Error validating reminder settings
#[derive(Debug, Error)]
pub enum ReminderError {
    #[error("invalid reminder time {0:?}, expected HH:MM")]
    InvalidTime(String),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Reminder configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderSettings {
    pub enabled: bool,
    /// Local time of day, "HH:MM"
    pub time: String,
    /// Whether desktop notifications may be shown
    pub notifications_allowed: bool,
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self { enabled: false, time: "09:00".to_string(), notifications_allowed: false }
    }
}

/// Parse an "HH:MM" time
pub fn parse_time(time: &str) -> Result<NaiveTime, ReminderError> {
    let invalid = || ReminderError::InvalidTime(time.to_string());
    let caps = TIME_RE.captures(time).ok_or_else(invalid)?;
    let hour = caps[1].parse().map_err(|_| invalid())?;
    let minute = caps[2].parse().map_err(|_| invalid())?;
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(invalid)
}

impl ReminderSettings {
    /// Next time the reminder fires after `now`.
    ///
    /// Today at the configured time if that is still ahead, otherwise
    /// tomorrow. `None` when disabled or the stored time is unparsable.
    pub fn next_reminder(&self, now: NaiveDateTime) -> Option<NaiveDateTime> {
        if !self.enabled {
            return None;
        }
        let time = parse_time(&self.time).ok()?;
        let today = now.date().and_time(time);
        if today > now {
            return Some(today);
        }
        now.date().checked_add_days(Days::new(1)).map(|d| d.and_time(time))
    }
}

/// Persisted reminder settings
#[derive(Debug)]
pub struct ReminderStore {
    store: Store<ReminderSettings>,
}

impl ReminderStore {
    pub fn open(backend: Arc<dyn Backend>) -> Self {
        Self { store: Store::open(backend, REMINDERS) }
    }

    pub fn settings(&self) -> &ReminderSettings {
        self.store.get()
    }

    /// Enable the reminder at `time` ("HH:MM")
    pub fn enable(&mut self, time: &str) -> Result<(), ReminderError> {
        parse_time(time)?;
        self.store.update(|s| {
            s.enabled = true;
            s.time = time.to_string();
        })?;
        Ok(())
    }

    pub fn disable(&mut self) -> Result<()> {
        self.store.update(|s| s.enabled = false)
    }

    pub fn set_notifications_allowed(&mut self, allowed: bool) -> Result<()> {
        self.store.update(|s| s.notifications_allowed = allowed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryBackend;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 2, 15).unwrap().and_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn parse_time_accepts_valid_times() {
        assert_eq!(parse_time("09:00").unwrap(), NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(parse_time("23:59").unwrap(), NaiveTime::from_hms_opt(23, 59, 0).unwrap());
    }

    #[test]
    fn parse_time_rejects_invalid_times() {
        for bad in ["9:00", "24:00", "12:60", "noon", "12:00:00", ""] {
            assert!(parse_time(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn next_reminder_later_today() {
        let settings = ReminderSettings { enabled: true, ..Default::default() };
        assert_eq!(settings.next_reminder(at(7, 30)), Some(at(9, 0)));
    }

    #[test]
    fn next_reminder_tomorrow_once_passed() {
        let settings = ReminderSettings { enabled: true, ..Default::default() };
        let next = settings.next_reminder(at(9, 0)).unwrap();
        assert_eq!(next.date(), NaiveDate::from_ymd_opt(2026, 2, 16).unwrap());
        assert_eq!(next.time(), NaiveTime::from_hms_opt(9, 0, 0).unwrap());
    }

    #[test]
    fn disabled_reminder_never_fires() {
        assert_eq!(ReminderSettings::default().next_reminder(at(7, 0)), None);
    }

    #[test]
    fn settings_use_camel_case_on_disk() {
        let json = serde_json::to_string(&ReminderSettings::default()).unwrap();
        assert!(json.contains("notificationsAllowed"));
    }

    #[test]
    fn store_enable_validates_time() {
        let mut store = ReminderStore::open(Arc::new(MemoryBackend::default()));
        assert!(store.enable("25:00").is_err());
        assert!(!store.settings().enabled);

        store.enable("20:15").unwrap();
        assert!(store.settings().enabled);
        assert_eq!(store.settings().time, "20:15");

        store.disable().unwrap();
        assert!(!store.settings().enabled);
    }
}
