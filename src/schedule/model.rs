//! Schedule data model
//!
//! A schedule is an ordered list of days, each holding an ordered list of
//! lessons. Lessons have no intrinsic identity: a lesson is addressed by its
//! position in the schedule through [`LessonKey`].

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single lesson slot in the schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    /// Subject name (e.g. "Trigonometry")
    pub subject: String,
    /// Lesson number within the subject, 1-based
    pub number: u32,
    /// Free-form topic, often empty
    pub topic: String,
}

impl Lesson {
    /// Create a lesson with an empty topic
    pub fn new(subject: impl Into<String>, number: u32) -> Self {
        Self { subject: subject.into(), number, topic: String::new() }
    }

    /// Name shown to the user, e.g. "Nahw – Lesson 3"
    pub fn display_name(&self) -> String {
        format!("{} \u{2013} Lesson {}", self.subject, self.number)
    }
}

/// One scheduled day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Day {
    /// Day number, 1-based
    pub number: u32,
    /// Calendar date this day is scheduled on
    pub date: NaiveDate,
    /// Lessons in display order
    pub lessons: Vec<Lesson>,
}

impl Day {
    /// Iterate the lessons of this day together with their keys
    pub fn keyed_lessons(&self, day_index: usize) -> impl Iterator<Item = (LessonKey, &Lesson)> {
        self.lessons.iter().enumerate().map(move |(i, l)| (LessonKey::new(day_index, i), l))
    }
}

/// Error decoding a lesson key
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    /// The key is not of the form "{day}-{lesson}"
    #[error("invalid lesson key {0:?}, expected \"<day>-<lesson>\"")]
    Malformed(String),
}

/// Positional identity of a lesson: `(day index, lesson index)`, both 0-based.
///
/// Encoded as `"{day}-{subject}"` wherever it is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LessonKey {
    pub day: usize,
    pub subject: usize,
}

impl LessonKey {
    pub fn new(day: usize, subject: usize) -> Self {
        Self { day, subject }
    }

    /// Encode as the persisted string form
    pub fn encode(&self) -> String {
        format!("{}-{}", self.day, self.subject)
    }

    /// Decode from the persisted string form
    pub fn decode(s: &str) -> Result<Self, KeyError> {
        let malformed = || KeyError::Malformed(s.to_string());

        let (day, subject) = s.split_once('-').ok_or_else(malformed)?;
        if day.is_empty()
            || subject.is_empty()
            || !day.bytes().all(|b| b.is_ascii_digit())
            || !subject.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(malformed());
        }

        let day = day.parse().map_err(|_| malformed())?;
        let subject = subject.parse().map_err(|_| malformed())?;
        Ok(Self { day, subject })
    }

    /// Look up the lesson this key points at, if it is still in range
    pub fn resolve<'a>(&self, days: &'a [Day]) -> Option<&'a Lesson> {
        days.get(self.day).and_then(|d| d.lessons.get(self.subject))
    }
}

impl fmt::Display for LessonKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.day, self.subject)
    }
}

impl FromStr for LessonKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

impl TryFrom<String> for LessonKey {
    type Error = KeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::decode(&value)
    }
}

impl From<LessonKey> for String {
    fn from(key: LessonKey) -> Self {
        key.encode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_encodes_day_then_subject() {
        assert_eq!(LessonKey::new(3, 1).encode(), "3-1");
        assert_eq!(LessonKey::new(12, 0).to_string(), "12-0");
    }

    #[test]
    fn key_decodes_valid_input() {
        assert_eq!(LessonKey::decode("0-2").unwrap(), LessonKey::new(0, 2));
        assert_eq!("19-1".parse::<LessonKey>().unwrap(), LessonKey::new(19, 1));
    }

    #[test]
    fn key_rejects_malformed_input() {
        for bad in ["", "3", "3-", "-3", "a-1", "1-b", "1-2-3", "-1-2", "1--2", " 1-2"] {
            assert!(LessonKey::decode(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn key_serializes_as_string() {
        let json = serde_json::to_string(&LessonKey::new(4, 2)).unwrap();
        assert_eq!(json, "\"4-2\"");

        let key: LessonKey = serde_json::from_str("\"7-0\"").unwrap();
        assert_eq!(key, LessonKey::new(7, 0));
    }

    #[test]
    fn key_orders_by_day_then_subject() {
        let mut keys = vec![LessonKey::new(1, 0), LessonKey::new(0, 2), LessonKey::new(0, 1)];
        keys.sort();
        assert_eq!(keys, vec![LessonKey::new(0, 1), LessonKey::new(0, 2), LessonKey::new(1, 0)]);
    }

    #[test]
    fn lesson_display_name() {
        assert_eq!(Lesson::new("Nahw", 3).display_name(), "Nahw \u{2013} Lesson 3");
    }

    #[test]
    fn resolve_out_of_range_is_none() {
        let days = vec![Day {
            number: 1,
            date: NaiveDate::from_ymd_opt(2026, 2, 15).unwrap(),
            lessons: vec![Lesson::new("Nahw", 1)],
        }];
        assert!(LessonKey::new(0, 0).resolve(&days).is_some());
        assert!(LessonKey::new(0, 1).resolve(&days).is_none());
        assert!(LessonKey::new(5, 0).resolve(&days).is_none());
    }
}
