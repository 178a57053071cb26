//! Optional TOML configuration: chart tuning and theme colors.
//!
//! All fields default, so a missing config file is the common case and an
//! empty file is equivalent to the defaults. Unknown color strings fall back
//! to the default color rather than failing the load.

use color_eyre::eyre::eyre;
use color_eyre::Result;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const CONFIG_FILE: &str = "config.toml";

/// Manages the config directory and config file loading.
#[derive(Clone)]
pub struct ConfigManager {
    config_dir: PathBuf,
}

impl ConfigManager {
    /// Create a ConfigManager with a custom config directory (primarily for testing)
    pub fn with_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    /// Create a new ConfigManager for the given app name
    pub fn new(app_name: &str) -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| eyre!("Could not determine config directory"))?
            .join(app_name);
        Ok(Self { config_dir })
    }

    /// Loads `config.toml` from the config directory, or the defaults when
    /// the file does not exist. A file that exists but fails to parse is an
    /// error (silent fallback would hide typos).
    pub fn load_config(&self) -> Result<AppConfig> {
        let path = self.config_dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(AppConfig::default());
        }
        let contents = std::fs::read_to_string(&path)
            .map_err(|e| eyre!("Could not read '{}': {}", path.display(), e))?;
        toml::from_str(&contents).map_err(|e| eyre!("Invalid config '{}': {}", path.display(), e))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub chart: ChartConfig,
    pub theme: ThemeConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Number of roles in the top-roles bar chart.
    pub top_roles: usize,
    /// Bin count for the salary distribution histogram.
    pub histogram_bins: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            top_roles: crate::chart_data::TOP_ROLES,
            histogram_bins: crate::chart_data::HISTOGRAM_BINS,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Accent color for bars, selected options, and focused borders.
    pub accent: String,
    /// Border and secondary text color.
    pub border: String,
    /// Primary text color.
    pub text: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            accent: "#e32033".to_string(),
            border: "darkgray".to_string(),
            text: "white".to_string(),
        }
    }
}

impl ThemeConfig {
    pub fn accent_color(&self) -> Color {
        parse_color(&self.accent).unwrap_or(Color::Red)
    }

    pub fn border_color(&self) -> Color {
        parse_color(&self.border).unwrap_or(Color::DarkGray)
    }

    pub fn text_color(&self) -> Color {
        parse_color(&self.text).unwrap_or(Color::White)
    }
}

/// Parses a color string: a named ANSI color, an indexed color (0-255), or
/// a `#rrggbb` hex value.
pub fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        return Some(Color::Rgb(r, g, b));
    }
    if let Ok(idx) = s.parse::<u8>() {
        return Some(Color::Indexed(idx));
    }
    match s.to_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "gray" | "grey" => Some(Color::Gray),
        "darkgray" | "darkgrey" => Some(Color::DarkGray),
        "lightred" => Some(Color::LightRed),
        "lightgreen" => Some(Color::LightGreen),
        "lightyellow" => Some(Color::LightYellow),
        "lightblue" => Some(Color::LightBlue),
        "lightmagenta" => Some(Color::LightMagenta),
        "lightcyan" => Some(Color::LightCyan),
        "white" => Some(Color::White),
        _ => None,
    }
}
