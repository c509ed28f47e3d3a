//! Study resources attached to lessons (links, PDFs, videos)

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::schedule::LessonKey;
use crate::store::{Backend, RESOURCES, Store};

/// Kind of resource
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    #[default]
    Link,
    Pdf,
    Video,
    Note,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ResourceKind::Link => "link",
            ResourceKind::Pdf => "pdf",
            ResourceKind::Video => "video",
            ResourceKind::Note => "note",
        };
        f.write_str(s)
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "link" => Ok(ResourceKind::Link),
            "pdf" => Ok(ResourceKind::Pdf),
            "video" => Ok(ResourceKind::Video),
            "note" => Ok(ResourceKind::Note),
            other => Err(format!("unknown resource kind {other:?}")),
        }
    }
}

/// A resource attached to one lesson
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    pub lesson_key: LessonKey,
    pub kind: ResourceKind,
    pub title: String,
    pub url: String,
    pub added_at: DateTime<Utc>,
}

/// Persisted list of resources
#[derive(Debug)]
pub struct ResourceStore {
    store: Store<Vec<Resource>>,
}

impl ResourceStore {
    pub fn open(backend: Arc<dyn Backend>) -> Self {
        Self { store: Store::open(backend, RESOURCES) }
    }

    pub fn all(&self) -> &[Resource] {
        self.store.get()
    }

    /// Attach a resource to a lesson. Title and URL are required.
    pub fn add(
        &mut self,
        lesson_key: LessonKey,
        kind: ResourceKind,
        title: &str,
        url: &str,
    ) -> Result<Resource> {
        let (title, url) = (title.trim(), url.trim());
        if title.is_empty() || url.is_empty() {
            bail!("A resource needs both a title and a URL");
        }

        let added_at = Utc::now();
        let resource = self.store.update(|list| {
            let base = added_at.timestamp_millis().to_string();
            let mut id = base.clone();
            let mut n = 1;
            while list.iter().any(|r| r.id == id) {
                n += 1;
                id = format!("{base}-{n}");
            }

            let resource = Resource {
                id,
                lesson_key,
                kind,
                title: title.to_string(),
                url: url.to_string(),
                added_at,
            };
            list.push(resource.clone());
            resource
        })?;
        Ok(resource)
    }

    /// Remove a resource by id, returning whether it existed
    pub fn remove(&mut self, id: &str) -> Result<bool> {
        if !self.all().iter().any(|r| r.id == id) {
            return Ok(false);
        }
        self.store.update(|list| list.retain(|r| r.id != id))?;
        Ok(true)
    }

    /// Resources attached to one lesson
    pub fn for_lesson(&self, key: LessonKey) -> Vec<&Resource> {
        self.all().iter().filter(|r| r.lesson_key == key).collect()
    }

    pub fn clear(&mut self) -> Result<()> {
        self.store.clear()
    }
}
