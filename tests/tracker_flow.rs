use chrono::{NaiveDate, NaiveDateTime};
use clap::Parser;
use pretty_assertions::assert_eq;
use study_dashboard::cli::{self, Cli, Commands};
use study_dashboard::store::{FileBackend, PROGRESS};
use study_dashboard::{Config, LessonKey, Tracker};
use tempfile::TempDir;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Mid-afternoon, clear of the early and late achievement triggers
fn afternoon(day: NaiveDate) -> NaiveDateTime {
    day.and_hms_opt(14, 0, 0).unwrap()
}

fn complete_day(tracker: &mut Tracker, day: usize, at: NaiveDateTime) {
    let lessons = tracker.days()[day].lessons.len();
    for subject in 0..lessons {
        tracker.mark(LessonKey::new(day, subject), true, at).unwrap();
    }
}

#[test]
fn progress_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let config = Config::default();

    let mut tracker = Tracker::open_dir(&config, dir.path()).unwrap();
    tracker.mark(LessonKey::new(0, 0), true, afternoon(date(2026, 2, 17))).unwrap();
    tracker.notes.set_note(LessonKey::new(0, 0), "irab of the verb").unwrap();
    drop(tracker);

    assert!(dir.path().join(format!("{PROGRESS}.json")).exists());

    let reopened = Tracker::open_dir(&config, dir.path()).unwrap();
    assert!(reopened.progress_map().is_completed(LessonKey::new(0, 0)));
    assert_eq!(reopened.notes.note(LessonKey::new(0, 0)), Some("irab of the verb"));
    assert!(reopened.achievements.seen().contains("first_lesson"));
}

#[test]
fn streak_builds_over_consecutive_days() {
    let dir = TempDir::new().unwrap();
    let mut tracker = Tracker::open_dir(&Config::default(), dir.path()).unwrap();
    let start = Config::default().start_date;

    complete_day(&mut tracker, 0, afternoon(date(2026, 2, 17)));
    complete_day(&mut tracker, 1, afternoon(date(2026, 2, 17)));
    complete_day(&mut tracker, 2, afternoon(date(2026, 2, 17)));

    let stats = tracker.stats(start.succ_opt().unwrap().succ_opt().unwrap());
    assert_eq!(stats.current_streak, 3);
    assert_eq!(stats.longest_streak, 3);
    assert_eq!(stats.days_completed, 3);
    assert_eq!(stats.total_completed, 9);
    assert_eq!(stats.completion_percent(), 100);

    let report = tracker.achievements(date(2026, 2, 17));
    let unlocked: Vec<_> =
        report.achievements.iter().filter(|a| a.unlocked).map(|a| a.def.id).collect();
    assert_eq!(unlocked, vec!["first_lesson", "5_lessons", "3_day_streak"]);
}

#[test]
fn unmarking_keeps_seen_set() {
    let dir = TempDir::new().unwrap();
    let mut tracker = Tracker::open_dir(&Config::default(), dir.path()).unwrap();
    let at = afternoon(date(2026, 2, 17));

    tracker.mark(LessonKey::new(0, 0), true, at).unwrap();
    tracker.mark(LessonKey::new(0, 0), false, at).unwrap();

    // The displayed state follows the stats again, only the seen set persists
    let report = tracker.achievements(at.date());
    assert!(!report.achievements[0].unlocked);
    assert_eq!(report.achievements[0].def.id, "first_lesson");
    assert!(tracker.achievements.seen().contains("first_lesson"));

    // Crossing the threshold again is not reported a second time
    let unlocked = tracker.mark(LessonKey::new(0, 0), true, at).unwrap();
    assert!(unlocked.is_empty());
}

#[test]
fn weekend_completion_grants_weekend_warrior() {
    let dir = TempDir::new().unwrap();
    let mut tracker = Tracker::open_dir(&Config::default(), dir.path()).unwrap();

    // 2026-02-21 is a Saturday
    let unlocked = tracker.mark(LessonKey::new(0, 0), true, afternoon(date(2026, 2, 21))).unwrap();
    let ids: Vec<_> = unlocked.iter().map(|d| d.id).collect();
    assert_eq!(ids, vec!["weekend_warrior", "first_lesson"]);
}

#[test]
fn malformed_import_file_changes_nothing() {
    let dir = TempDir::new().unwrap();
    let mut tracker = Tracker::open_dir(&Config::default(), dir.path()).unwrap();
    tracker.mark(LessonKey::new(1, 1), true, afternoon(date(2026, 2, 17))).unwrap();
    let before = tracker.progress_map().clone();

    let bad = dir.path().join("broken.json");
    std::fs::write(&bad, r#"{"0-0": true, "#).unwrap();
    assert!(tracker.import_file(&bad).is_err());
    assert_eq!(tracker.progress_map(), &before);

    let missing = dir.path().join("missing.json");
    assert!(tracker.import_file(&missing).is_err());
    assert_eq!(tracker.progress_map(), &before);
}

#[test]
fn exported_file_imports_into_fresh_tracker() {
    let source_dir = TempDir::new().unwrap();
    let mut source = Tracker::open_dir(&Config::default(), source_dir.path()).unwrap();
    complete_day(&mut source, 0, afternoon(date(2026, 2, 17)));
    source.mark(LessonKey::new(4, 2), true, afternoon(date(2026, 2, 17))).unwrap();

    let file = source_dir.path().join("study-progress.json");
    std::fs::write(&file, source.export_json().unwrap()).unwrap();

    let target_dir = TempDir::new().unwrap();
    let mut target = Tracker::open_dir(&Config::default(), target_dir.path()).unwrap();
    assert_eq!(target.import_file(&file).unwrap(), 4);
    assert_eq!(target.progress_map(), source.progress_map());
}

#[test]
fn corrupt_store_file_loads_as_empty() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("progress.json"), "not json at all").unwrap();

    let tracker = Tracker::open_dir(&Config::default(), dir.path()).unwrap();
    assert!(tracker.progress_map().is_empty());
}

#[test]
fn markdown_export_lists_every_lesson() {
    let dir = TempDir::new().unwrap();
    let mut tracker = Tracker::open_dir(&Config::default(), dir.path()).unwrap();
    tracker.mark(LessonKey::new(0, 0), true, afternoon(date(2026, 2, 17))).unwrap();
    tracker.notes.rename(LessonKey::new(0, 1), "Physics").unwrap();

    let markdown = tracker.export_markdown();
    assert!(markdown.starts_with("# My Study Lessons & Notes"));
    assert_eq!(markdown.matches("\n## ").count(), 60);
    assert!(markdown.contains("## Physics"));
    assert!(markdown.contains("✅ Completed"));
}

#[test]
fn file_backend_writes_one_file_per_namespace() {
    let dir = TempDir::new().unwrap();
    let backend = FileBackend::new(dir.path());
    assert_eq!(backend.dir(), dir.path());

    let mut tracker = Tracker::open_dir(&Config::default(), dir.path()).unwrap();
    tracker.mark(LessonKey::new(0, 0), true, afternoon(date(2026, 2, 17))).unwrap();
    tracker.reminders.enable("07:30").unwrap();

    for name in ["progress.json", "achievements.json", "reminders.json"] {
        assert!(dir.path().join(name).exists(), "{name} missing");
    }
}

#[tokio::test]
async fn cli_commands_run_against_data_dir() {
    let dir = TempDir::new().unwrap();
    let data_dir = dir.path().to_str().unwrap();
    let config = Config::default();

    for args in [
        vec!["study-dashboard", "complete", "0-0"],
        vec!["study-dashboard", "complete", "0-1"],
        vec!["study-dashboard", "undo", "0-1"],
        vec!["study-dashboard", "note", "set", "0-0", "first note"],
        vec!["study-dashboard", "theme", "set", "ocean"],
        vec!["study-dashboard", "schedule", "add", "Spring", "2026-03-01"],
    ] {
        let cli = Cli::try_parse_from(args.into_iter().chain(["--data-dir", data_dir])).unwrap();
        let mut tracker = cli::open_tracker(&cli, &config).unwrap();
        let now = afternoon(date(2026, 2, 17));
        let command = cli.command.expect("subcommand");
        cli::execute(command, &mut tracker, &config, now).await.unwrap();
    }

    let tracker = Tracker::open_dir(&config, dir.path()).unwrap();
    assert!(tracker.progress_map().is_completed(LessonKey::new(0, 0)));
    assert!(!tracker.progress_map().is_completed(LessonKey::new(0, 1)));
    assert_eq!(tracker.notes.note(LessonKey::new(0, 0)), Some("first note"));
    assert_eq!(tracker.theme.active_theme().name, "Ocean Blue");
    assert_eq!(tracker.days()[0].date, date(2026, 3, 1));
}

#[tokio::test]
async fn cli_rejects_reset_without_confirmation() {
    let dir = TempDir::new().unwrap();
    let config = Config::default();
    let mut tracker = Tracker::open_dir(&config, dir.path()).unwrap();
    tracker.mark(LessonKey::new(0, 0), true, afternoon(date(2026, 2, 17))).unwrap();

    let now = afternoon(date(2026, 2, 17));
    let result = cli::execute(Commands::Reset { yes: false }, &mut tracker, &config, now).await;
    assert!(result.is_err());
    assert!(!tracker.progress_map().is_empty());

    cli::execute(Commands::Reset { yes: true }, &mut tracker, &config, now).await.unwrap();
    assert!(tracker.progress_map().is_empty());
}
