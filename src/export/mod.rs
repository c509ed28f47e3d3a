//! Export and import of progress and notes

pub mod json;
pub mod markdown;

pub use json::{ImportError, export_json, import_json, read_import_file};
pub use markdown::export_markdown;

use chrono::NaiveDate;

/// Default file name for a JSON progress export
pub fn json_file_name(on: NaiveDate) -> String {
    format!("study-progress-{}.json", on.format("%Y-%m-%d"))
}

/// Default file name for a Markdown lessons export
pub fn markdown_file_name(on: NaiveDate) -> String {
    format!("my-lessons-{}.md", on.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_file_names_carry_date() {
        let on = NaiveDate::from_ymd_opt(2026, 3, 4).unwrap();
        assert_eq!(json_file_name(on), "study-progress-2026-03-04.json");
        assert_eq!(markdown_file_name(on), "my-lessons-2026-03-04.md");
    }
}
