//! Theming system for the study dashboard

mod presets;

pub use presets::{BASE, PRESETS, Preset, find as find_preset};

use std::sync::Arc;

use anyhow::Result;
use once_cell::sync::Lazy;
use ratatui::style::Color;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::{Backend, Store, THEME};

static HEX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#([0-9a-fA-F]{2})([0-9a-fA-F]{2})([0-9a-fA-F]{2})$").unwrap());

/// Errors selecting a theme
#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("unknown theme preset {0:?}")]
    UnknownPreset(String),

    #[error("invalid colour {0:?}, expected #rrggbb")]
    InvalidColor(String),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Parse a `#rrggbb` colour
pub fn parse_hex(hex: &str) -> Result<Color, ThemeError> {
    let invalid = || ThemeError::InvalidColor(hex.to_string());
    let caps = HEX_RE.captures(hex).ok_or_else(invalid)?;
    let channel = |i: usize| u8::from_str_radix(&caps[i], 16).map_err(|_| invalid());
    Ok(Color::Rgb(channel(1)?, channel(2)?, channel(3)?))
}

/// The persisted theme choice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ThemeSelection {
    /// One of [`PRESETS`]
    Preset { id: String },
    /// Explicit colours, each `#rrggbb`
    Custom { primary: String, accent: String, success: String },
}

impl Default for ThemeSelection {
    fn default() -> Self {
        ThemeSelection::Preset { id: PRESETS[0].id.to_string() }
    }
}

impl ThemeSelection {
    /// Select a preset by id
    pub fn preset(id: &str) -> Result<Self, ThemeError> {
        let preset = find_preset(id).ok_or_else(|| ThemeError::UnknownPreset(id.to_string()))?;
        Ok(ThemeSelection::Preset { id: preset.id.to_string() })
    }

    /// Select explicit colours, validating each
    pub fn custom(primary: &str, accent: &str, success: &str) -> Result<Self, ThemeError> {
        for hex in [primary, accent, success] {
            parse_hex(hex)?;
        }
        Ok(ThemeSelection::Custom {
            primary: primary.to_lowercase(),
            accent: accent.to_lowercase(),
            success: success.to_lowercase(),
        })
    }

    /// Build the terminal palette for this selection.
    ///
    /// Unknown presets or bad colours fall back to the default preset.
    pub fn theme(&self) -> Theme {
        let (name, primary, accent, success) = match self {
            ThemeSelection::Preset { id } => {
                let preset = find_preset(id).unwrap_or(&PRESETS[0]);
                (preset.name.to_string(), preset.primary, preset.accent, preset.success)
            }
            ThemeSelection::Custom { primary, accent, success } => {
                ("Custom".to_string(), primary.as_str(), accent.as_str(), success.as_str())
            }
        };

        let fallback = &PRESETS[0];
        let color = |hex: &str, default: &str| {
            parse_hex(hex).or_else(|_| parse_hex(default)).unwrap_or(Color::Reset)
        };
        let primary = color(primary, fallback.primary);

        Theme {
            name,
            accent_primary: primary,
            accent_secondary: color(accent, fallback.accent),
            success: color(success, fallback.success),
            border_focused: primary,
            ..BASE
        }
    }
}

/// A color theme for the application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,

    // Background colors
    pub bg_primary: Color,
    pub bg_secondary: Color,

    // Foreground colors
    pub fg_primary: Color,
    pub fg_secondary: Color,
    pub fg_muted: Color,

    // Accent colors
    pub accent_primary: Color,
    pub accent_secondary: Color,

    // Semantic colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,

    // UI elements
    pub border: Color,
    pub border_focused: Color,
    pub selection: Color,
}

impl Default for Theme {
    fn default() -> Self {
        ThemeSelection::default().theme()
    }
}

/// Persisted theme selection
#[derive(Debug)]
pub struct ThemeStore {
    store: Store<ThemeSelection>,
}

impl ThemeStore {
    pub fn open(backend: Arc<dyn Backend>) -> Self {
        Self { store: Store::open(backend, THEME) }
    }

    pub fn selection(&self) -> &ThemeSelection {
        self.store.get()
    }

    pub fn select(&mut self, selection: ThemeSelection) -> Result<()> {
        self.store.set(selection)
    }

    /// Palette for the current selection
    pub fn active_theme(&self) -> Theme {
        self.selection().theme()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryBackend;

    #[test]
    fn default_theme_is_purple_dream() {
        let theme = Theme::default();
        assert_eq!(theme.name, "Purple Dream");
        assert_eq!(theme.accent_primary, Color::Rgb(0x8b, 0x5c, 0xf6));
    }

    #[test]
    fn parse_hex_accepts_both_cases() {
        assert_eq!(parse_hex("#FF0080").unwrap(), Color::Rgb(255, 0, 128));
        assert_eq!(parse_hex("#ff0080").unwrap(), Color::Rgb(255, 0, 128));
    }

    #[test]
    fn parse_hex_rejects_malformed() {
        for bad in ["ff0080", "#ff008", "#gg0080", "#ff00801", ""] {
            assert!(parse_hex(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn preset_selection_rejects_unknown() {
        assert!(matches!(ThemeSelection::preset("mauve"), Err(ThemeError::UnknownPreset(_))));
        assert_eq!(
            ThemeSelection::preset("Teal").unwrap(),
            ThemeSelection::Preset { id: "teal".into() }
        );
    }

    #[test]
    fn custom_selection_drives_palette() {
        let selection = ThemeSelection::custom("#112233", "#445566", "#778899").unwrap();
        let theme = selection.theme();
        assert_eq!(theme.name, "Custom");
        assert_eq!(theme.accent_primary, Color::Rgb(0x11, 0x22, 0x33));
        assert_eq!(theme.success, Color::Rgb(0x77, 0x88, 0x99));
        assert_eq!(theme.bg_primary, BASE.bg_primary);
    }

    #[test]
    fn selection_serializes_tagged() {
        let json = serde_json::to_string(&ThemeSelection::default()).unwrap();
        assert_eq!(json, r#"{"kind":"preset","id":"purple"}"#);

        let custom: ThemeSelection = serde_json::from_str(
            r##"{"kind":"custom","primary":"#000000","accent":"#111111","success":"#222222"}"##,
        )
        .unwrap();
        assert!(matches!(custom, ThemeSelection::Custom { .. }));
    }

    #[test]
    fn store_persists_selection() {
        let backend: Arc<dyn Backend> = Arc::new(MemoryBackend::default());
        let mut store = ThemeStore::open(backend.clone());
        store.select(ThemeSelection::preset("ocean").unwrap()).unwrap();

        let reopened = ThemeStore::open(backend);
        assert_eq!(reopened.active_theme().name, "Ocean Blue");
    }
}
