mod loader;

use serde::{Deserialize, Serialize};

use crate::chrome::DEFAULT_DRAG_STRIP;
use crate::color::Color;
use crate::log::LogConfig;

pub use loader::{config_dir, config_path, load};

/// Top-level configuration for Desktop Clock.
///
/// Loaded from `~/.config/desktop-clock/config.toml`. Missing sections
/// fall back to defaults thanks to `#[serde(default)]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Window placement and chrome behaviour.
    pub window: WindowConfig,
    /// Fonts and vertical layout of the three text bands.
    pub text: TextConfig,
    /// Background and text colors.
    pub colors: ColorConfig,
    /// File logging.
    pub logging: LogConfig,
}

/// Window settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Width of the restored window in pixels.
    pub width: i32,
    /// Height of the restored window in pixels.
    pub height: i32,
    /// Keep the clock above all other windows.
    pub topmost: bool,
    /// Show the window maximized on startup.
    pub start_maximized: bool,
    /// Height in DIPs of the strip along the top edge that drags the window.
    pub drag_strip: i32,
}

/// Text appearance and layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Font family shared by every label.
    pub font: String,
    /// Time label size in DIPs.
    pub time_size: f32,
    /// Time label weight (100 thin – 950 extra black).
    pub time_weight: u16,
    /// Day and date label size in DIPs.
    pub label_size: f32,
    /// Day and date label weight.
    pub label_weight: u16,
    /// Distance in DIPs the day and date bands are shifted from the time band.
    pub band_offset: f32,
}

/// Color scheme, as hex strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub background: String,
    pub time: String,
    pub label: String,
}

/// Parsed colors ready for drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub time: Color,
    pub label: Color,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            topmost: true,
            start_maximized: true,
            drag_strip: DEFAULT_DRAG_STRIP,
        }
    }
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            font: "Chakra Petch".into(),
            time_size: 200.0,
            time_weight: 900,
            label_size: 48.0,
            label_weight: 300,
            band_offset: 300.0,
        }
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            background: "#000000".into(),
            time: "#ffffff".into(),
            label: "#666666".into(),
        }
    }
}

impl ColorConfig {
    /// Parses every color, falling back to the default for any that is
    /// not a valid `#rrggbb` string.
    pub fn palette(&self) -> Palette {
        Palette {
            background: Color::from_hex(&self.background).unwrap_or(Color::BLACK),
            time: Color::from_hex(&self.time).unwrap_or(Color::WHITE),
            label: Color::from_hex(&self.label).unwrap_or(Color::GRAY),
        }
    }
}

impl Config {
    /// Clamps window and text values to safe ranges.
    ///
    /// Prevents zero-sized windows, unusable font sizes, and weights
    /// DirectWrite rejects.
    pub fn validate(&mut self) {
        self.window.width = self.window.width.clamp(200, 16384);
        self.window.height = self.window.height.clamp(120, 16384);
        self.window.drag_strip = self.window.drag_strip.clamp(0, 200);

        if self.text.font.trim().is_empty() {
            self.text.font = TextConfig::default().font;
        }
        self.text.time_size = clamp_size(self.text.time_size, 200.0);
        self.text.label_size = clamp_size(self.text.label_size, 48.0);
        self.text.time_weight = self.text.time_weight.clamp(1, 999);
        self.text.label_weight = self.text.label_weight.clamp(1, 999);
        self.text.band_offset = if self.text.band_offset.is_finite() {
            self.text.band_offset.clamp(0.0, 4000.0)
        } else {
            300.0
        };
    }
}

fn clamp_size(size: f32, fallback: f32) -> f32 {
    if size.is_finite() {
        size.clamp(4.0, 1000.0)
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests;
