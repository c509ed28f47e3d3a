//! Markdown export of lessons and notes

use std::fmt::Write;

use crate::notes::LessonEntry;

/// Render every lesson with its status and note as a Markdown document
pub fn export_markdown(lessons: &[LessonEntry]) -> String {
    let mut out = String::from("# My Study Lessons & Notes\n\n");

    for lesson in lessons {
        let status = if lesson.completed { "✅ Completed" } else { "⏳ Pending" };

        // Writing into a String cannot fail
        let _ = writeln!(out, "## {}", lesson.name);
        let _ = writeln!(out, "**Topic:** {}", lesson.topic);
        let _ = writeln!(out, "**Date:** {}", lesson.date.format("%B %-d, %Y"));
        let _ = writeln!(out, "**Status:** {status}\n");

        if let Some(note) = &lesson.note {
            let _ = writeln!(out, "### Notes:\n{note}\n");
        }

        out.push_str("---\n\n");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::LessonKey;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn entry(note: Option<&str>, completed: bool) -> LessonEntry {
        LessonEntry {
            key: LessonKey::new(0, 0),
            date: NaiveDate::from_ymd_opt(2026, 2, 15).unwrap(),
            name: "Nahw".into(),
            subject: "Nahw".into(),
            number: 1,
            topic: "Sentence structure".into(),
            note: note.map(str::to_string),
            completed,
        }
    }

    #[test]
    fn renders_completed_lesson_with_note() {
        let md = export_markdown(&[entry(Some("Subject comes first"), true)]);
        assert_eq!(
            md,
            "# My Study Lessons & Notes\n\n\
             ## Nahw\n\
             **Topic:** Sentence structure\n\
             **Date:** February 15, 2026\n\
             **Status:** ✅ Completed\n\n\
             ### Notes:\nSubject comes first\n\n\
             ---\n\n"
        );
    }

    #[test]
    fn omits_notes_section_without_note() {
        let md = export_markdown(&[entry(None, false)]);
        assert!(md.contains("⏳ Pending"));
        assert!(!md.contains("### Notes:"));
    }

    #[test]
    fn empty_export_has_only_heading() {
        assert_eq!(export_markdown(&[]), "# My Study Lessons & Notes\n\n");
    }
}
