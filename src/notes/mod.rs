//! Per-lesson notes, custom names and study resources
//!
//! All three share the positional lesson key of the progress store but are
//! otherwise independent of it.

pub mod resources;
pub mod storage;

// Re-exports
pub use resources::{Resource, ResourceKind, ResourceStore};
pub use storage::{LessonEntry, LessonTexts, NotesStore};
