//! Persisted key-value namespaces
//!
//! Every persisted feature (progress, notes, achievements, ...) owns one
//! namespace. A namespace is stored as a single JSON document through a
//! [`Backend`] and accessed through a typed [`Store`], opened once and passed
//! by reference to everything that needs it.
//!
//! Writes are read-modify-write of the whole document with no concurrency
//! check: two processes writing the same namespace can clobber each other.

mod backend;
pub mod progress;

pub use backend::{Backend, FileBackend, MemoryBackend};
pub use progress::{ProgressMap, ProgressStore};

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::schedule::LessonKey;

/// Namespace holding the progress mapping
pub const PROGRESS: &str = "progress";
/// Namespace holding per-lesson notes
pub const NOTES: &str = "notes";
/// Namespace holding custom lesson names
pub const LESSON_NAMES: &str = "lesson-names";
/// Namespace holding the achievements-seen set
pub const ACHIEVEMENTS: &str = "achievements";
/// Namespace holding study resources
pub const RESOURCES: &str = "resources";
/// Namespace holding reminder settings
pub const REMINDERS: &str = "reminders";
/// Namespace holding the theme selection
pub const THEME: &str = "theme";
/// Namespace holding saved schedules
pub const SCHEDULES: &str = "schedules";

type Subscriber<T> = Box<dyn Fn(&T) + Send>;

/// A typed, persisted namespace
pub struct Store<T> {
    backend: Arc<dyn Backend>,
    namespace: &'static str,
    value: T,
    subscribers: Vec<Subscriber<T>>,
}

impl<T> fmt::Debug for Store<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("namespace", &self.namespace)
            .field("value", &self.value)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl<T> Store<T>
where
    T: Serialize + DeserializeOwned + Default + Clone,
{
    /// Open a namespace, loading its current value.
    ///
    /// Missing or unreadable data yields `T::default()`; the failure is
    /// logged and never returned.
    pub fn open(backend: Arc<dyn Backend>, namespace: &'static str) -> Self {
        let value = load_or_default(backend.as_ref(), namespace);
        Self { backend, namespace, value, subscribers: Vec::new() }
    }

    /// Namespace name
    pub fn namespace(&self) -> &'static str {
        self.namespace
    }

    /// Current value
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Replace the value and persist it.
    ///
    /// The cached value only changes once the write has succeeded.
    pub fn set(&mut self, value: T) -> Result<()> {
        self.persist(&value)?;
        self.value = value;
        self.notify();
        Ok(())
    }

    /// Mutate a copy of the value, persist the whole document, then keep the
    /// copy. On error the cached value is unchanged.
    pub fn update<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> Result<R> {
        let mut next = self.value.clone();
        let out = f(&mut next);
        self.set(next)?;
        Ok(out)
    }

    /// Reset to the default value and remove the persisted document
    pub fn clear(&mut self) -> Result<()> {
        self.backend
            .remove(self.namespace)
            .with_context(|| format!("Failed to clear {}", self.namespace))?;
        self.value = T::default();
        self.notify();
        Ok(())
    }

    /// Re-read the namespace from the backend, discarding the cached value
    pub fn reload(&mut self) {
        self.value = load_or_default(self.backend.as_ref(), self.namespace);
        self.notify();
    }

    /// Register a callback invoked after every successful write
    pub fn subscribe(&mut self, f: impl Fn(&T) + Send + 'static) {
        self.subscribers.push(Box::new(f));
    }

    fn persist(&self, value: &T) -> Result<()> {
        let contents = serde_json::to_string_pretty(value)
            .with_context(|| format!("Failed to serialize {}", self.namespace))?;
        self.backend
            .write(self.namespace, &contents)
            .with_context(|| format!("Failed to write {}", self.namespace))?;
        tracing::debug!(namespace = self.namespace, bytes = contents.len(), "store written");
        Ok(())
    }

    fn notify(&self) {
        for subscriber in &self.subscribers {
            subscriber(&self.value);
        }
    }
}

fn load_or_default<T>(backend: &dyn Backend, namespace: &str) -> T
where
    T: DeserializeOwned + Default,
{
    let contents = match backend.read(namespace) {
        Ok(Some(contents)) => contents,
        Ok(None) => return T::default(),
        Err(e) => {
            tracing::warn!(namespace, "Failed to read store, using defaults: {e:#}");
            return T::default();
        }
    };

    match serde_json::from_str(&contents) {
        Ok(value) => {
            tracing::debug!(namespace, "store loaded");
            value
        }
        Err(e) => {
            tracing::warn!(namespace, "Failed to parse store, using defaults: {e}");
            T::default()
        }
    }
}

/// Decode a persisted `key -> value` object, dropping undecodable keys.
///
/// Used by the lesson-keyed namespaces so a single bad key from an older
/// version doesn't discard the whole document.
pub(crate) fn decode_keyed<V>(raw: BTreeMap<String, V>) -> BTreeMap<LessonKey, V> {
    raw.into_iter()
        .filter_map(|(k, v)| match LessonKey::decode(&k) {
            Ok(key) => Some((key, v)),
            Err(e) => {
                tracing::debug!("Dropping persisted entry: {e}");
                None
            }
        })
        .collect()
}
