//! Theme management and ANSI escape sequence generation.
//!
//! Two palettes are built in, `dark` (default) and `light`. Custom themes
//! are loaded from TOML files.
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! search_bar_border = "#f5c2e7"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! empty_state_fg = "#89b4fa"
//! liked_fg = "#f38ba8"
//! alert_fg = "#f38ba8"
//! notice_fg = "#a6e3a1"
//! ```
//!
//! # Example
//!
//! ```
//! use abtube::ui::theme::Theme;
//!
//! let theme = Theme::from_name("light").unwrap();
//! print!("{}{}Bold{}", Theme::fg(&theme.colors.header_fg), Theme::bold(), Theme::reset());
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::domain::error::{ClientError, Result};

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements, as hex strings (e.g. "#cdd6f4").
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    pub text_normal: String,
    /// Secondary info (uploader, age, counts).
    pub text_dim: String,

    pub border: String,
    pub search_bar_border: String,

    /// Search match highlight.
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    pub empty_state_fg: String,

    /// Like indicator when the session user likes the video.
    pub liked_fg: String,

    pub alert_fg: String,
    pub notice_fg: String,
}

impl Theme {
    /// Dark palette, used by default.
    #[must_use]
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            colors: ThemeColors {
                header_fg: "#cdd6f4".to_string(),
                header_bg: Some("#181825".to_string()),
                text_normal: "#cdd6f4".to_string(),
                text_dim: "#6c7086".to_string(),
                border: "#45475a".to_string(),
                search_bar_border: "#f5c2e7".to_string(),
                match_highlight_fg: "#1e1e2e".to_string(),
                match_highlight_bg: "#f9e2af".to_string(),
                empty_state_fg: "#89b4fa".to_string(),
                liked_fg: "#f38ba8".to_string(),
                alert_fg: "#f38ba8".to_string(),
                notice_fg: "#a6e3a1".to_string(),
            },
        }
    }

    /// Light palette.
    #[must_use]
    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            colors: ThemeColors {
                header_fg: "#4c4f69".to_string(),
                header_bg: Some("#e6e9ef".to_string()),
                text_normal: "#4c4f69".to_string(),
                text_dim: "#8c8fa1".to_string(),
                border: "#bcc0cc".to_string(),
                search_bar_border: "#ea76cb".to_string(),
                match_highlight_fg: "#eff1f5".to_string(),
                match_highlight_bg: "#df8e1d".to_string(),
                empty_state_fg: "#1e66f5".to_string(),
                liked_fg: "#d20f39".to_string(),
                alert_fg: "#d20f39".to_string(),
                notice_fg: "#40a02b".to_string(),
            },
        }
    }

    /// Looks up a built-in theme: `dark` or `light`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "dark" => Some(Self::dark()),
            "light" => Some(Self::light()),
            _ => None,
        }
    }

    /// The other built-in palette. Custom themes toggle to `dark`.
    #[must_use]
    pub fn toggled(&self) -> Self {
        if self.name == "dark" {
            Self::light()
        } else {
            Self::dark()
        }
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if the file cannot be read or does not
    /// parse as a theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| ClientError::Config(format!("failed to read theme file {}: {e}", path.display())))?;

        toml::from_str(&contents)
            .map_err(|e| ClientError::Config(format!("failed to parse theme {}: {e}", path.display())))
    }

    /// Returns `(255, 255, 255)` on malformed input.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// ANSI 24-bit foreground color escape sequence.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// ANSI 24-bit background color escape sequence.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
