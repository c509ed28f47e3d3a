//! Achievements screen

use chrono::NaiveDate;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::layout::{panel, progress_bar};
use crate::app::state::AppState;
use crate::stats::{Achievement, Category};
use crate::theme::Theme;
use crate::tracker::Tracker;

const CATEGORIES: [(Category, &str); 4] = [
    (Category::Lessons, "Lessons"),
    (Category::Streak, "Streaks"),
    (Category::Days, "Full days"),
    (Category::Special, "Special"),
];

/// Draw every achievement grouped by category
pub fn draw(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    tracker: &Tracker,
    theme: &Theme,
    today: NaiveDate,
) {
    let report = tracker.achievements(today);
    let title = format!(
        " Achievements · {}/{} unlocked · {} pts ",
        report.unlocked_count(),
        report.achievements.len(),
        report.points()
    );
    let block = panel(&title, theme, true);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = Vec::new();
    for (category, heading) in CATEGORIES {
        lines.push(Line::from(Span::styled(
            format!(" {heading}"),
            Style::default().fg(theme.accent_secondary).add_modifier(Modifier::BOLD),
        )));
        for achievement in report.by_category(category) {
            lines.push(achievement_line(achievement, theme));
        }
        lines.push(Line::from(""));
    }

    let paragraph = Paragraph::new(lines).scroll((state.achievements_scroll as u16, 0));
    frame.render_widget(paragraph, inner);
}

fn achievement_line(achievement: &Achievement, theme: &Theme) -> Line<'static> {
    let def = &achievement.def;
    let (icon, style) = if achievement.unlocked {
        (def.icon, Style::default().fg(theme.success))
    } else {
        ("🔒", Style::default().fg(theme.fg_muted))
    };

    let percent = (achievement.progress * 100 / def.requirement.max(1)) as u32;
    Line::from(vec![
        Span::styled(format!("   {icon} {:<18}", def.title), style.add_modifier(Modifier::BOLD)),
        Span::styled(format!("{:<30}", def.description), style),
        Span::styled(progress_bar(percent, 10), Style::default().fg(theme.accent_primary)),
        Span::styled(
            format!(" {}/{}", achievement.progress, def.requirement),
            Style::default().fg(theme.fg_secondary),
        ),
    ])
}
