//! Dashboard screen: day list, lessons of the selected day and a stats footer

use chrono::NaiveDate;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::layout::{panel, progress_bar};
use crate::app::state::{AppState, Panel};
use crate::schedule::Day;
use crate::stats::day_progress;
use crate::store::ProgressMap;
use crate::theme::Theme;
use crate::tracker::Tracker;

/// Status indicators for days and lessons
const STATUS_NOT_STARTED: &str = "○";
const STATUS_IN_PROGRESS: &str = "●";
const STATUS_COMPLETED: &str = "✓";

/// Width of the day list panel
const DAYS_WIDTH: u16 = 32;

/// Height of the stats footer, borders included
const FOOTER_HEIGHT: u16 = 4;

/// Draw the dashboard
pub fn draw(
    frame: &mut Frame,
    area: Rect,
    state: &mut AppState,
    tracker: &Tracker,
    theme: &Theme,
    today: NaiveDate,
) {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(FOOTER_HEIGHT)])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(DAYS_WIDTH), Constraint::Min(30)])
        .split(vertical[0]);

    draw_days(frame, columns[0], state, tracker, theme, today);
    draw_lessons(frame, columns[1], state, tracker, theme);
    draw_footer(frame, vertical[1], tracker, theme, today);
}

/// Marker for a day or lesson given how much of it is done
fn status_marker(completed: usize, total: usize) -> &'static str {
    if completed == total {
        STATUS_COMPLETED
    } else if completed > 0 {
        STATUS_IN_PROGRESS
    } else {
        STATUS_NOT_STARTED
    }
}

/// One row of the day list
fn day_label(index: usize, day: &Day, progress: &ProgressMap, today: NaiveDate) -> String {
    let completed = progress.completed_in_day(index, day.lessons.len());
    let marker = status_marker(completed, day.lessons.len());
    let today_marker = if day.date == today { " ◀" } else { "" };
    format!(
        "{} Day {:>2}  {}  {:>3}%{}",
        marker,
        day.number,
        day.date.format("%b %d"),
        day_progress(index, day, progress),
        today_marker
    )
}

fn draw_days(
    frame: &mut Frame,
    area: Rect,
    state: &mut AppState,
    tracker: &Tracker,
    theme: &Theme,
    today: NaiveDate,
) {
    let focused = state.panel == Panel::Days;
    let block = panel(" Days ", theme, focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Update visible height for scroll calculations
    state.days.visible_height = inner.height as usize;
    state.days.ensure_selection_visible();

    let progress = tracker.progress_map();
    let lines: Vec<Line> = tracker
        .days()
        .iter()
        .enumerate()
        .skip(state.days.scroll_offset)
        .take(inner.height as usize)
        .map(|(index, day)| {
            let style = if index == state.days.selected {
                let style = Style::default().add_modifier(Modifier::BOLD);
                if focused {
                    style.fg(theme.bg_primary).bg(theme.accent_primary)
                } else {
                    style.fg(theme.accent_secondary)
                }
            } else if progress.is_day_complete(index, day.lessons.len()) {
                Style::default().fg(theme.success)
            } else {
                Style::default().fg(theme.fg_primary)
            };
            Line::from(Span::styled(day_label(index, day, progress, today), style))
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn draw_lessons(
    frame: &mut Frame,
    area: Rect,
    state: &mut AppState,
    tracker: &Tracker,
    theme: &Theme,
) {
    let focused = state.panel == Panel::Lessons;
    let day_index = state.days.selected;
    let Some(day) = tracker.days().get(day_index) else {
        frame.render_widget(panel(" Lessons ", theme, focused), area);
        return;
    };

    let title = format!(" Day {} · {} ", day.number, day.date.format("%A, %B %-d"));
    let block = panel(&title, theme, focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    state.lessons.visible_height = inner.height as usize;

    let progress = tracker.progress_map();
    let mut lines: Vec<Line> = Vec::new();

    for (key, lesson) in day.keyed_lessons(day_index) {
        let done = progress.is_completed(key);
        let selected = key.subject == state.lessons.selected;
        let marker = if done { STATUS_COMPLETED } else { STATUS_NOT_STARTED };
        let name = tracker.notes.display_name(key, lesson);

        let style = if selected && focused {
            Style::default()
                .fg(theme.bg_primary)
                .bg(theme.accent_primary)
                .add_modifier(Modifier::BOLD)
        } else if done {
            Style::default().fg(theme.success)
        } else {
            Style::default().fg(theme.fg_primary)
        };

        lines.push(Line::from(Span::styled(
            format!(" {} {} \u{2013} Lesson {}", marker, name, lesson.number),
            style,
        )));
        if !lesson.topic.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("     {}", lesson.topic),
                Style::default().fg(theme.fg_muted),
            )));
        }
    }

    // Details of the highlighted lesson
    let key = state.selected_key();
    if key.resolve(tracker.days()).is_some() {
        lines.push(Line::from(""));

        let resources = tracker.resources.for_lesson(key);
        if !resources.is_empty() {
            lines.push(Line::from(Span::styled(
                format!(" Resources ({})", resources.len()),
                Style::default().fg(theme.accent_secondary).add_modifier(Modifier::BOLD),
            )));
            for resource in resources {
                lines.push(Line::from(Span::styled(
                    format!("   [{}] {}", resource.kind, resource.title),
                    Style::default().fg(theme.fg_secondary),
                )));
            }
        }

        if let Some(note) = tracker.notes.note(key) {
            lines.push(Line::from(Span::styled(
                " Notes",
                Style::default().fg(theme.accent_secondary).add_modifier(Modifier::BOLD),
            )));
            let width = (inner.width as usize).saturating_sub(4).max(10);
            for wrapped in textwrap::wrap(note, width) {
                lines.push(Line::from(Span::styled(
                    format!("   {wrapped}"),
                    Style::default().fg(theme.fg_secondary),
                )));
            }
        }
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn draw_footer(frame: &mut Frame, area: Rect, tracker: &Tracker, theme: &Theme, today: NaiveDate) {
    let block = panel(" Progress ", theme, false);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let stats = tracker.stats(today);
    let report = tracker.achievements(today);
    let percent = stats.completion_percent();

    let label = |text: &str| Span::styled(text.to_string(), Style::default().fg(theme.fg_muted));
    let value = |text: String| {
        Span::styled(text, Style::default().fg(theme.fg_primary).add_modifier(Modifier::BOLD))
    };

    let summary = Line::from(vec![
        label(" Lessons "),
        value(format!("{}/{}", stats.total_completed, stats.total_lessons)),
        label("  Days "),
        value(stats.days_completed.to_string()),
        label("  Streak "),
        value(format!("🔥 {}", stats.current_streak)),
        label("  Best "),
        value(stats.longest_streak.to_string()),
        label("  Points "),
        value(report.points().to_string()),
    ]);

    let bar_width = (inner.width as usize).saturating_sub(8).min(60);
    let bar = Line::from(vec![
        Span::raw(" "),
        Span::styled(progress_bar(percent, bar_width), Style::default().fg(theme.accent_primary)),
        Span::styled(format!(" {percent:>3}%"), Style::default().fg(theme.fg_secondary)),
    ]);

    frame.render_widget(Paragraph::new(vec![summary, bar]), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{LessonKey, generate};
    use pretty_assertions::assert_eq;

    #[test]
    fn marker_reflects_completion() {
        assert_eq!(status_marker(0, 3), STATUS_NOT_STARTED);
        assert_eq!(status_marker(1, 3), STATUS_IN_PROGRESS);
        assert_eq!(status_marker(3, 3), STATUS_COMPLETED);
        assert_eq!(status_marker(0, 0), STATUS_COMPLETED);
    }

    #[test]
    fn day_label_marks_today() {
        let start = NaiveDate::from_ymd_opt(2026, 2, 15).unwrap();
        let days = generate(start);
        let mut progress = ProgressMap::default();
        progress.set(LessonKey::new(0, 0), true);

        assert_eq!(day_label(0, &days[0], &progress, start), "● Day  1  Feb 15   33% ◀");
        assert_eq!(day_label(1, &days[1], &progress, start), "○ Day  2  Feb 16    0%");
    }
}
