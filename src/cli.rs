//! Command line interface
//!
//! Every subcommand opens the tracker, performs one operation and prints a
//! plain-text result. With no subcommand the dashboard is launched instead.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand, ValueEnum};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::export::{json_file_name, markdown_file_name};
use crate::focus::{FocusTimer, TickEvent, run_focus};
use crate::notes::{LessonEntry, ResourceKind};
use crate::schedule::{LessonKey, find_day};
use crate::stats::{AchievementDef, Category};
use crate::theme::{PRESETS, ThemeSelection};
use crate::tracker::Tracker;

#[derive(Debug, Parser)]
#[command(name = "study-dashboard")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory holding progress, notes and other study data
    #[arg(long, global = true, env = "STUDY_DASHBOARD_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Date to treat as today (YYYY-MM-DD)
    #[arg(long, global = true)]
    pub today: Option<NaiveDate>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show today's lessons
    Today,
    /// Show progress statistics
    Stats {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show progress week by week
    Weekly,
    /// Mark a lesson complete
    Complete {
        /// Lesson key, "<day>-<lesson>" counting from 0
        lesson: LessonKey,
    },
    /// Mark a lesson as not complete
    Undo {
        /// Lesson key, "<day>-<lesson>" counting from 0
        lesson: LessonKey,
    },
    /// List achievements
    Achievements,
    /// Manage lesson notes
    Note {
        #[command(subcommand)]
        action: NoteAction,
    },
    /// Give a lesson a custom name; omit the name to restore the default
    Rename { lesson: LessonKey, name: Option<String> },
    /// Search lesson names, topics and notes
    Search { query: String },
    /// Manage study resources
    Resource {
        #[command(subcommand)]
        action: ResourceAction,
    },
    /// Export progress or lessons to a file
    Export {
        #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
        /// Output path; "-" writes to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Replace all progress with an exported JSON file
    Import { path: PathBuf },
    /// Clear all progress, achievements and notes
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
    /// Manage saved schedules
    Schedule {
        #[command(subcommand)]
        action: ScheduleAction,
    },
    /// Configure the daily study reminder
    Reminder {
        #[command(subcommand)]
        action: ReminderAction,
    },
    /// Choose a colour theme
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },
    /// Run a Pomodoro focus session
    Focus {
        /// Focus length in minutes, overriding the config
        #[arg(long)]
        minutes: Option<u32>,
    },
}

#[derive(Debug, Subcommand)]
pub enum NoteAction {
    /// Save a note, replacing any existing one
    Set { lesson: LessonKey, text: String },
    /// Print a note
    Show { lesson: LessonKey },
    /// Delete a note
    Delete { lesson: LessonKey },
    /// List every lesson that has a note
    List,
}

#[derive(Debug, Subcommand)]
pub enum ResourceAction {
    /// Attach a resource to a lesson
    Add {
        lesson: LessonKey,
        /// link, pdf, video or note
        kind: ResourceKind,
        title: String,
        url: String,
    },
    /// List resources, optionally for one lesson
    List { lesson: Option<LessonKey> },
    /// Remove a resource by id
    Remove { id: String },
}

#[derive(Debug, Subcommand)]
pub enum ScheduleAction {
    /// Generate and save a schedule starting on a date
    Add { name: String, start: NaiveDate },
    /// List saved schedules
    List,
    /// Make a saved schedule active
    Use { id: String },
    /// Delete a saved schedule
    Delete { id: String },
}

#[derive(Debug, Subcommand)]
pub enum ReminderAction {
    /// Enable the reminder at a time of day (HH:MM)
    On { time: String },
    /// Disable the reminder
    Off,
    /// Allow or forbid desktop notifications
    Notifications {
        #[arg(action = clap::ArgAction::Set)]
        allowed: bool,
    },
    /// Show reminder settings
    Status,
}

#[derive(Debug, Subcommand)]
pub enum ThemeAction {
    /// List the preset themes
    List,
    /// Use a preset theme
    Set { preset: String },
    /// Use custom colours, each #rrggbb
    Custom { primary: String, accent: String, success: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Progress mapping as JSON
    Json,
    /// Lessons and notes as Markdown
    Markdown,
}

/// Resolve the data directory: flag or environment, else the platform default
pub fn data_dir(cli: &Cli) -> Result<PathBuf> {
    match &cli.data_dir {
        Some(dir) => Ok(dir.clone()),
        None => Config::data_dir(),
    }
}

/// Run one subcommand against an open tracker
pub async fn execute(
    command: Commands,
    tracker: &mut Tracker,
    config: &Config,
    now: NaiveDateTime,
) -> Result<()> {
    let today = now.date();

    match command {
        Commands::Today => print_today(tracker, today),
        Commands::Stats { json } => print_stats(tracker, today, json)?,
        Commands::Weekly => print_weekly(tracker),
        Commands::Complete { lesson } => {
            let unlocked = tracker.mark(lesson, true, now)?;
            println!("✓ Completed {}", lesson_label(tracker, lesson)?);
            print_unlocked(&unlocked);
        }
        Commands::Undo { lesson } => {
            tracker.mark(lesson, false, now)?;
            println!("○ Unmarked {}", lesson_label(tracker, lesson)?);
        }
        Commands::Achievements => print_achievements(tracker, today),
        Commands::Note { action } => note(tracker, action)?,
        Commands::Rename { lesson, name } => {
            lesson_label(tracker, lesson)?;
            tracker.notes.rename(lesson, name.as_deref().unwrap_or(""))?;
            println!("Renamed {lesson} to {}", lesson_label(tracker, lesson)?);
        }
        Commands::Search { query } => {
            let results = tracker.search(&query);
            if results.is_empty() {
                println!("No lessons match {query:?}");
            }
            for entry in &results {
                print_entry(entry);
            }
        }
        Commands::Resource { action } => resource(tracker, action)?,
        Commands::Export { format, output } => export(tracker, format, output, today)?,
        Commands::Import { path } => {
            let count = tracker
                .import_file(&path)
                .with_context(|| format!("Import of {:?} rejected, progress unchanged", path))?;
            println!("Imported {count} progress entries from {}", path.display());
        }
        Commands::Reset { yes } => {
            if !yes {
                bail!("This deletes all progress, achievements and notes; rerun with --yes");
            }
            tracker.reset()?;
            println!("All progress reset");
        }
        Commands::Schedule { action } => schedule(tracker, action)?,
        Commands::Reminder { action } => reminder(tracker, action, now)?,
        Commands::Theme { action } => theme(tracker, action)?,
        Commands::Focus { minutes } => {
            let focus_seconds = minutes.unwrap_or(config.focus_minutes).max(1) * 60;
            focus(FocusTimer::new(focus_seconds, config.break_seconds())).await?;
        }
    }
    Ok(())
}

/// "Day 3 · Nahw – Lesson 2", using the custom name when set
fn lesson_label(tracker: &Tracker, key: LessonKey) -> Result<String> {
    let Some(day) = tracker.days().get(key.day) else {
        bail!("Lesson {key} is not in the current schedule");
    };
    let Some(lesson) = key.resolve(tracker.days()) else {
        bail!("Lesson {key} is not in the current schedule");
    };
    let name = tracker.notes.display_name(key, lesson);
    Ok(format!("Day {} · {} \u{2013} Lesson {}", day.number, name, lesson.number))
}

fn status_icon(completed: bool) -> &'static str {
    if completed { "✓" } else { "○" }
}

fn print_entry(entry: &LessonEntry) {
    println!(
        "{} {:<6} {}  {} \u{2013} Lesson {}",
        status_icon(entry.completed),
        entry.key.to_string(),
        entry.date,
        entry.name,
        entry.number
    );
    if !entry.topic.is_empty() {
        println!("         {}", entry.topic);
    }
    if let Some(note) = &entry.note {
        for line in textwrap::wrap(note, 70) {
            println!("         > {line}");
        }
    }
}

fn print_today(tracker: &Tracker, today: NaiveDate) {
    let days = tracker.days();
    let Some(index) = find_day(days, today) else {
        match (days.first(), days.last()) {
            (Some(first), Some(last)) => println!(
                "No lessons scheduled for {today}; the schedule runs {} to {}",
                first.date, last.date
            ),
            _ => println!("The schedule is empty"),
        }
        return;
    };

    let day = &days[index];
    println!("Day {} · {}", day.number, day.date.format("%A, %B %-d, %Y"));
    for (key, lesson) in day.keyed_lessons(index) {
        let done = tracker.progress_map().is_completed(key);
        let name = tracker.notes.display_name(key, lesson);
        println!(
            "  {} {:<6} {} \u{2013} Lesson {}",
            status_icon(done),
            key.to_string(),
            name,
            lesson.number
        );
    }
}

fn print_stats(tracker: &Tracker, today: NaiveDate, json: bool) -> Result<()> {
    let stats = tracker.stats(today);
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("Progress as of {today}");
    println!(
        "  Lessons completed: {}/{} ({}%)",
        stats.total_completed,
        stats.total_lessons,
        stats.completion_percent()
    );
    println!("  Days completed:    {}", stats.days_completed);
    println!("  Current streak:    {}", stats.current_streak);
    println!("  Longest streak:    {}", stats.longest_streak);
    if !stats.per_subject.is_empty() {
        println!("  By subject:");
        for (subject, progress) in &stats.per_subject {
            println!(
                "    {:<20} {:>2}/{:<2} {:>3}%",
                subject,
                progress.completed,
                progress.total,
                progress.percent()
            );
        }
    }
    Ok(())
}

fn print_weekly(tracker: &Tracker) {
    for week in tracker.weekly() {
        println!("Week {}  {}/{}  {}%", week.number, week.completed, week.total, week.percent);
        for day in &week.days {
            println!(
                "  Day {:>2}  {}  {}/{}  {:>3}%",
                day.number,
                day.date.format("%a %b %d"),
                day.completed,
                day.total,
                day.percent
            );
        }
    }
}

fn print_achievements(tracker: &Tracker, today: NaiveDate) {
    let report = tracker.achievements(today);
    println!(
        "{}/{} unlocked · {} points",
        report.unlocked_count(),
        report.achievements.len(),
        report.points()
    );
    for category in [Category::Lessons, Category::Streak, Category::Days, Category::Special] {
        for achievement in report.by_category(category) {
            let def = &achievement.def;
            let icon = if achievement.unlocked { def.icon } else { "🔒" };
            println!(
                "  {} {:<18} {:<30} {}/{}",
                icon, def.title, def.description, achievement.progress, def.requirement
            );
        }
    }
}

fn print_unlocked(unlocked: &[AchievementDef]) {
    for def in unlocked {
        println!("🏆 Achievement unlocked: {} {} ({})", def.icon, def.title, def.description);
    }
}

fn note(tracker: &mut Tracker, action: NoteAction) -> Result<()> {
    match action {
        NoteAction::Set { lesson, text } => {
            let label = lesson_label(tracker, lesson)?;
            tracker.notes.set_note(lesson, &text)?;
            println!("Saved note for {label}");
        }
        NoteAction::Show { lesson } => match tracker.notes.note(lesson) {
            Some(text) => println!("{text}"),
            None => println!("No note for {lesson}"),
        },
        NoteAction::Delete { lesson } => {
            if tracker.notes.delete_note(lesson)? {
                println!("Deleted note for {lesson}");
            } else {
                println!("No note for {lesson}");
            }
        }
        NoteAction::List => {
            for entry in tracker.lessons().iter().filter(|e| e.note.is_some()) {
                print_entry(entry);
            }
        }
    }
    Ok(())
}

fn resource(tracker: &mut Tracker, action: ResourceAction) -> Result<()> {
    match action {
        ResourceAction::Add { lesson, kind, title, url } => {
            lesson_label(tracker, lesson)?;
            let resource = tracker.resources.add(lesson, kind, &title, &url)?;
            println!("Added {} {} ({})", resource.kind, resource.title, resource.id);
        }
        ResourceAction::List { lesson } => {
            let resources: Vec<_> = match lesson {
                Some(key) => tracker.resources.for_lesson(key),
                None => tracker.resources.all().iter().collect(),
            };
            if resources.is_empty() {
                println!("No resources");
            }
            for r in resources {
                println!(
                    "{:<16} {:<6} [{}] {} <{}>",
                    r.id,
                    r.lesson_key.to_string(),
                    r.kind,
                    r.title,
                    r.url
                );
            }
        }
        ResourceAction::Remove { id } => {
            if !tracker.resources.remove(&id)? {
                bail!("No resource with id {id:?}");
            }
            println!("Removed {id}");
        }
    }
    Ok(())
}

fn export(
    tracker: &Tracker,
    format: ExportFormat,
    output: Option<PathBuf>,
    today: NaiveDate,
) -> Result<()> {
    let (contents, default_name) = match format {
        ExportFormat::Json => (tracker.export_json()?, json_file_name(today)),
        ExportFormat::Markdown => (tracker.export_markdown(), markdown_file_name(today)),
    };

    let path = output.unwrap_or_else(|| PathBuf::from(default_name));
    if path == Path::new("-") {
        print!("{contents}");
        return Ok(());
    }

    std::fs::write(&path, contents)
        .with_context(|| format!("Failed to write export to {:?}", path))?;
    println!("Exported to {}", path.display());
    Ok(())
}

fn schedule(tracker: &mut Tracker, action: ScheduleAction) -> Result<()> {
    match action {
        ScheduleAction::Add { name, start } => {
            let schedule = tracker.schedules.add(&name, start)?;
            println!("Saved schedule {:?} ({}) starting {}", schedule.name, schedule.id, start);
        }
        ScheduleAction::List => {
            let active = tracker.schedules.active_id();
            if tracker.schedules.list().is_empty() {
                println!("No saved schedules; using the built-in schedule");
            }
            for s in tracker.schedules.list() {
                let marker = if Some(s.id.as_str()) == active { "*" } else { " " };
                println!("{marker} {:<24} {:<20} starts {}", s.id, s.name, s.start_date);
            }
        }
        ScheduleAction::Use { id } => {
            tracker.schedules.set_active(&id)?;
            tracker.refresh_days();
            println!("Active schedule is now {id}");
        }
        ScheduleAction::Delete { id } => {
            if !tracker.schedules.delete(&id)? {
                bail!("No schedule with id {id:?}");
            }
            tracker.refresh_days();
            println!("Deleted {id}");
        }
    }
    Ok(())
}

fn reminder(tracker: &mut Tracker, action: ReminderAction, now: NaiveDateTime) -> Result<()> {
    match action {
        ReminderAction::On { time } => {
            tracker.reminders.enable(&time)?;
            println!("Daily reminder set for {time}");
        }
        ReminderAction::Off => {
            tracker.reminders.disable()?;
            println!("Daily reminder disabled");
        }
        ReminderAction::Notifications { allowed } => {
            tracker.reminders.set_notifications_allowed(allowed)?;
            println!("Notifications {}", if allowed { "allowed" } else { "blocked" });
        }
        ReminderAction::Status => {
            let settings = tracker.reminders.settings();
            println!("Enabled:       {}", settings.enabled);
            println!("Time:          {}", settings.time);
            println!("Notifications: {}", settings.notifications_allowed);
            if let Some(next) = settings.next_reminder(now) {
                println!("Next reminder: {}", next.format("%Y-%m-%d %H:%M"));
            }
        }
    }
    Ok(())
}

fn theme(tracker: &mut Tracker, action: ThemeAction) -> Result<()> {
    match action {
        ThemeAction::List => {
            let current = tracker.theme.selection();
            for preset in PRESETS {
                let active = matches!(current, ThemeSelection::Preset { id } if id == preset.id);
                let marker = if active { "*" } else { " " };
                println!("{marker} {:<10} {:<16} {}", preset.id, preset.name, preset.primary);
            }
            if matches!(current, ThemeSelection::Custom { .. }) {
                println!("* custom");
            }
        }
        ThemeAction::Set { preset } => {
            tracker.theme.select(ThemeSelection::preset(&preset)?)?;
            println!("Theme set to {}", tracker.theme.active_theme().name);
        }
        ThemeAction::Custom { primary, accent, success } => {
            tracker.theme.select(ThemeSelection::custom(&primary, &accent, &success)?)?;
            println!("Custom theme saved");
        }
    }
    Ok(())
}

/// Run one focus phase in the terminal until it ends or Ctrl-C is pressed
async fn focus(timer: FocusTimer) -> Result<()> {
    let cancel = CancellationToken::new();
    let (tx, mut rx) = mpsc::unbounded_channel();

    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    println!("Focus for {}, Ctrl-C to stop", timer.display());
    let runner = tokio::spawn(run_focus(timer, tx, cancel));

    while let Some(event) = rx.recv().await {
        match event {
            TickEvent::Tick { remaining } => {
                print!("\r  {:02}:{:02} ", remaining / 60, remaining % 60);
                std::io::stdout().flush()?;
            }
            TickEvent::FocusComplete { sessions } => {
                println!("\rFocus session {sessions} complete, time for a break");
            }
            TickEvent::BreakComplete => println!("\rBreak over"),
        }
    }

    let timer = runner.await.context("Focus timer task failed")?;
    if timer.sessions() == 0 {
        println!("\rStopped with {} left", timer.display());
    }
    Ok(())
}

/// Current local time, moved to the `--today` date when given
pub fn now(cli: &Cli) -> NaiveDateTime {
    match cli.today {
        Some(date) => date.and_time(Local::now().time()),
        None => Local::now().naive_local(),
    }
}

/// Open the tracker in the resolved data directory
pub fn open_tracker(cli: &Cli, config: &Config) -> Result<Tracker> {
    Tracker::open_dir(config, &data_dir(cli)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_lesson_keys() {
        let cli = Cli::try_parse_from(["study-dashboard", "complete", "3-1"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Complete { lesson }) if lesson == LessonKey::new(3, 1)
        ));
    }

    #[test]
    fn rejects_malformed_lesson_keys() {
        assert!(Cli::try_parse_from(["study-dashboard", "complete", "3:1"]).is_err());
        assert!(Cli::try_parse_from(["study-dashboard", "undo", "-1-0"]).is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "study-dashboard",
            "stats",
            "--json",
            "--data-dir",
            "/tmp/study",
            "--today",
            "2026-02-20",
        ])
        .unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/study")));
        assert_eq!(cli.today, NaiveDate::from_ymd_opt(2026, 2, 20));
        assert!(matches!(cli.command, Some(Commands::Stats { json: true })));
    }

    #[test]
    fn no_subcommand_launches_dashboard() {
        let cli = Cli::try_parse_from(["study-dashboard"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn export_format_defaults_to_json() {
        let cli = Cli::try_parse_from(["study-dashboard", "export"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Export { format: ExportFormat::Json, output: None })
        ));
    }

    #[test]
    fn resource_kind_parses() {
        let args = ["study-dashboard", "resource", "add", "0-0", "pdf", "Notes", "n.pdf"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Resource { action: ResourceAction::Add { kind: ResourceKind::Pdf, .. } })
        ));
    }
}
