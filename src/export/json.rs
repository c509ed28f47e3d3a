//! JSON export and import of the progress mapping

use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use crate::schedule::{KeyError, LessonKey};
use crate::store::ProgressMap;

/// Why an import was rejected. A rejected import changes nothing.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The file could not be read
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON
    #[error("Not a valid progress file: {0}")]
    Json(#[from] serde_json::Error),

    /// The document is valid JSON but not an object
    #[error("Progress file must contain a JSON object of \"<day>-<lesson>\": true/false")]
    NotAnObject,

    /// A key is not a lesson key
    #[error(transparent)]
    Key(#[from] KeyError),

    /// A value is not a boolean
    #[error("Value for {key} must be true or false")]
    NotBoolean { key: String },

    /// The imported progress could not be saved
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Serialize the progress mapping as pretty JSON
pub fn export_json(progress: &ProgressMap) -> serde_json::Result<String> {
    serde_json::to_string_pretty(progress)
}

/// Strictly parse an exported progress document.
///
/// Unlike loading the persisted store, every key and value must be valid.
pub fn import_json(text: &str) -> Result<ProgressMap, ImportError> {
    let Value::Object(object) = serde_json::from_str::<Value>(text)? else {
        return Err(ImportError::NotAnObject);
    };

    object
        .into_iter()
        .map(|(key, value)| {
            let lesson = LessonKey::decode(&key)?;
            match value {
                Value::Bool(completed) => Ok((lesson, completed)),
                _ => Err(ImportError::NotBoolean { key }),
            }
        })
        .collect()
}

/// Read and parse a progress file
pub fn read_import_file(path: &Path) -> Result<ProgressMap, ImportError> {
    let text = std::fs::read_to_string(path)
        .map_err(|source| ImportError::Io { path: path.to_path_buf(), source })?;
    import_json(&text)
}
