//! Storage backends for persisted namespaces

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};

/// Raw document storage, one document per namespace
pub trait Backend: Send + Sync {
    /// Read a namespace document, `None` if it has never been written
    fn read(&self, namespace: &str) -> Result<Option<String>>;

    /// Replace a namespace document
    fn write(&self, namespace: &str, contents: &str) -> Result<()>;

    /// Delete a namespace document; deleting a missing document is not an error
    fn remove(&self, namespace: &str) -> Result<()>;
}

/// Stores each namespace as `<dir>/<namespace>.json`
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the namespace files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, namespace: &str) -> PathBuf {
        self.dir.join(format!("{namespace}.json"))
    }
}

impl Backend for FileBackend {
    fn read(&self, namespace: &str) -> Result<Option<String>> {
        let path = self.path(namespace);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read {:?}", path)),
        }
    }

    fn write(&self, namespace: &str, contents: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create data directory {:?}", self.dir))?;

        let path = self.path(namespace);
        fs::write(&path, contents).with_context(|| format!("Failed to write {:?}", path))
    }

    fn remove(&self, namespace: &str) -> Result<()> {
        let path = self.path(namespace);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to remove {:?}", path)),
        }
    }
}

/// In-memory backend, used by tests and dry runs
#[derive(Debug, Default)]
pub struct MemoryBackend {
    documents: Mutex<HashMap<String, String>>,
}

impl Backend for MemoryBackend {
    fn read(&self, namespace: &str) -> Result<Option<String>> {
        let documents = self.documents.lock().map_err(|_| anyhow!("memory backend poisoned"))?;
        Ok(documents.get(namespace).cloned())
    }

    fn write(&self, namespace: &str, contents: &str) -> Result<()> {
        let mut documents =
            self.documents.lock().map_err(|_| anyhow!("memory backend poisoned"))?;
        documents.insert(namespace.to_string(), contents.to_string());
        Ok(())
    }

    fn remove(&self, namespace: &str) -> Result<()> {
        let mut documents =
            self.documents.lock().map_err(|_| anyhow!("memory backend poisoned"))?;
        documents.remove(namespace);
        Ok(())
    }
}
