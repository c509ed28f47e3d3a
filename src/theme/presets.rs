//! Preset colour themes

use ratatui::style::Color;

use super::Theme;

/// A named preset: primary, accent and success colours as hex strings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub id: &'static str,
    pub name: &'static str,
    pub primary: &'static str,
    pub accent: &'static str,
    pub success: &'static str,
}

const fn preset(
    id: &'static str,
    name: &'static str,
    primary: &'static str,
    accent: &'static str,
    success: &'static str,
) -> Preset {
    Preset { id, name, primary, accent, success }
}

/// Built-in presets, the first is the default
pub const PRESETS: &[Preset] = &[
    preset("purple", "Purple Dream", "#8b5cf6", "#a78bfa", "#10b981"),
    preset("ocean", "Ocean Blue", "#3b82f6", "#60a5fa", "#06b6d4"),
    preset("cyberpunk", "Cyberpunk Pink", "#ec4899", "#f472b6", "#f59e0b"),
    preset("matrix", "Matrix Green", "#10b981", "#34d399", "#22c55e"),
    preset("sunset", "Sunset Orange", "#f97316", "#fb923c", "#eab308"),
    preset("royal", "Royal Purple", "#6366f1", "#818cf8", "#8b5cf6"),
    preset("crimson", "Crimson Red", "#ef4444", "#f87171", "#fb923c"),
    preset("teal", "Teal Wave", "#14b8a6", "#2dd4bf", "#10b981"),
];

/// Look up a preset by id, ignoring case
pub fn find(id: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.id.eq_ignore_ascii_case(id))
}

/// Dark base palette shared by every preset
pub const BASE: Theme = Theme {
    name: String::new(),

    // Background colors
    bg_primary: Color::Rgb(26, 27, 38),   // #1a1b26
    bg_secondary: Color::Rgb(36, 40, 59), // #24283b

    // Foreground colors
    fg_primary: Color::Rgb(169, 177, 214),   // #a9b1d6
    fg_secondary: Color::Rgb(192, 202, 245), // #c0caf5
    fg_muted: Color::Rgb(86, 95, 137),       // #565f89

    // Accent colors, replaced by the selected preset
    accent_primary: Color::Rgb(139, 92, 246),   // #8b5cf6
    accent_secondary: Color::Rgb(167, 139, 250), // #a78bfa

    // Semantic colors
    success: Color::Rgb(16, 185, 129), // #10b981
    warning: Color::Rgb(224, 175, 104), // #e0af68
    error: Color::Rgb(247, 118, 142),   // #f7768e

    // UI elements
    border: Color::Rgb(65, 72, 104),            // #414868
    border_focused: Color::Rgb(139, 92, 246),   // #8b5cf6
    selection: Color::Rgb(40, 52, 87),          // #283457
};
