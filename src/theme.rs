use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Serializable color representation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum ColorDef {
    /// RGB color as [r, g, b]
    Rgb(u8, u8, u8),
    /// Named color
    Named(String),
}

impl From<ColorDef> for Color {
    fn from(def: ColorDef) -> Self {
        match def {
            ColorDef::Rgb(r, g, b) => Color::Rgb(r, g, b),
            ColorDef::Named(name) => match name.as_str() {
                "Black" => Color::Black,
                "Red" => Color::Red,
                "Green" => Color::Green,
                "Yellow" => Color::Yellow,
                "Blue" => Color::Blue,
                "Magenta" => Color::Magenta,
                "Cyan" => Color::Cyan,
                "Gray" => Color::Gray,
                "DarkGray" => Color::DarkGray,
                "LightRed" => Color::LightRed,
                "LightGreen" => Color::LightGreen,
                "LightYellow" => Color::LightYellow,
                "LightBlue" => Color::LightBlue,
                "LightMagenta" => Color::LightMagenta,
                "LightCyan" => Color::LightCyan,
                "White" => Color::White,
                "Reset" => Color::Reset,
                _ => Color::White, // Default fallback
            },
        }
    }
}

/// Serializable theme definition (matches JSON structure)
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ThemeFile {
    name: String,
    text_fg: ColorDef,
    text_bg: ColorDef,
    highlight_fg: ColorDef,
    highlight_bg: ColorDef,
    marker_fg: ColorDef,
    status_bar_fg: ColorDef,
    status_bar_bg: ColorDef,
    #[serde(default = "default_error_fg")]
    status_error_fg: ColorDef,
    #[serde(default = "default_follow_fg")]
    follow_fg: ColorDef,
}

fn default_error_fg() -> ColorDef {
    ColorDef::Named("Red".to_string())
}

fn default_follow_fg() -> ColorDef {
    ColorDef::Named("Green".to_string())
}

/// Colors used when drawing the pager
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // File lines
    pub text_fg: Color,
    pub text_bg: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,

    /// Status-line position when a file boundary is on screen
    pub marker_fg: Color,

    // Status line
    pub status_bar_fg: Color,
    pub status_bar_bg: Color,
    pub status_error_fg: Color,
    pub follow_fg: Color,
}

impl From<ThemeFile> for Theme {
    fn from(file: ThemeFile) -> Self {
        Self {
            name: file.name,
            text_fg: file.text_fg.into(),
            text_bg: file.text_bg.into(),
            highlight_fg: file.highlight_fg.into(),
            highlight_bg: file.highlight_bg.into(),
            marker_fg: file.marker_fg.into(),
            status_bar_fg: file.status_bar_fg.into(),
            status_bar_bg: file.status_bar_bg.into(),
            status_error_fg: file.status_error_fg.into(),
            follow_fg: file.follow_fg.into(),
        }
    }
}

impl Theme {
    /// Load theme from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read theme file: {}", e))?;
        let theme_file: ThemeFile = serde_json::from_str(&content)
            .map_err(|e| format!("Failed to parse theme file: {}", e))?;
        Ok(theme_file.into())
    }

    /// Default dark theme
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            text_fg: Color::Rgb(212, 212, 212),
            text_bg: Color::Rgb(30, 30, 30),
            highlight_fg: Color::Rgb(255, 255, 255),
            highlight_bg: Color::Rgb(38, 79, 120),
            marker_fg: Color::Rgb(133, 133, 133),
            status_bar_fg: Color::Black,
            status_bar_bg: Color::White,
            status_error_fg: Color::Red,
            follow_fg: Color::Rgb(0, 128, 0),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            text_fg: Color::Rgb(0, 0, 0),
            text_bg: Color::Rgb(255, 255, 255),
            highlight_fg: Color::Rgb(0, 0, 0),
            highlight_bg: Color::Rgb(173, 214, 255),
            marker_fg: Color::Rgb(133, 133, 133),
            status_bar_fg: Color::White,
            status_bar_bg: Color::Rgb(0, 122, 204),
            status_error_fg: Color::Rgb(205, 49, 49),
            follow_fg: Color::Rgb(200, 255, 200),
        }
    }

    pub fn high_contrast() -> Self {
        Self {
            name: "high-contrast".to_string(),
            text_fg: Color::White,
            text_bg: Color::Black,
            highlight_fg: Color::Black,
            highlight_bg: Color::Yellow,
            marker_fg: Color::Cyan,
            status_bar_fg: Color::Black,
            status_bar_bg: Color::Yellow,
            status_error_fg: Color::Red,
            follow_fg: Color::Blue,
        }
    }

    /// Get a theme by name, defaults to dark if not found.
    ///
    /// A name ending in `.json` is read as a theme file; a file that cannot
    /// be loaded also falls back to dark.
    pub fn from_name(name: &str) -> Self {
        if name.ends_with(".json") {
            return match Self::from_file(name) {
                Ok(theme) => theme,
                Err(e) => {
                    tracing::warn!("{}, using dark theme", e);
                    Self::dark()
                }
            };
        }

        let normalized_name = name.to_lowercase().replace('_', "-");
        match normalized_name.as_str() {
            "light" => Self::light(),
            "high-contrast" => Self::high_contrast(),
            "dark" => Self::dark(),
            _ => {
                tracing::warn!(
                    "Unknown theme {:?} (available: {}), using dark theme",
                    name,
                    Self::available_themes().join(", ")
                );
                Self::dark()
            }
        }
    }

    /// Get all builtin theme names
    pub fn available_themes() -> Vec<&'static str> {
        vec!["dark", "light", "high-contrast"]
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
