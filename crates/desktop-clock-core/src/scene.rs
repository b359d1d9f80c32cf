//! Frame layout for the clock face.
//!
//! A [`Scene`] is everything one paint needs, in DIPs: the background and
//! three text runs. The renderer only has to replay it.

use crate::color::Color;
use crate::config::Palette;
use crate::time::ClockSnapshot;

/// Client area size in DIPs.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Converts a physical pixel size to DIPs for the given DPI.
    pub fn from_pixels(width: u32, height: u32, dpi: u32) -> Self {
        let scale = if dpi == 0 { 1.0 } else { 96.0 / dpi as f32 };
        Self {
            width: width as f32 * scale,
            height: height as f32 * scale,
        }
    }

    /// A size with no drawable area.
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Layout rectangle in DIPs (left, top, right, bottom).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutRect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

/// Which text style a run is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRole {
    /// Large bold style for the time.
    Time,
    /// Smaller light style for day and date.
    Label,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub role: TextRole,
    pub color: Color,
    pub rect: LayoutRect,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub background: Color,
    /// Day, time and date, in draw order.
    pub runs: Vec<TextRun>,
}

impl Scene {
    /// Lays out the clock face for a client area.
    ///
    /// Every band spans the full width and starts at the top; text is
    /// centered in its band. Growing or shrinking a band's bottom edge by
    /// `band_offset` moves its center by half that, which places the day
    /// above and the date below the time. A band never ends above the
    /// top edge, so a client area shorter than `band_offset` collapses the
    /// day band to zero height instead of inverting it. Returns `None` for
    /// an empty client area.
    pub fn build(
        snapshot: &ClockSnapshot,
        size: Size,
        band_offset: f32,
        palette: &Palette,
    ) -> Option<Self> {
        if size.is_empty() {
            return None;
        }

        let band = |bottom: f32| LayoutRect {
            left: 0.0,
            top: 0.0,
            right: size.width,
            bottom: bottom.max(0.0),
        };

        let runs = vec![
            TextRun {
                text: snapshot.weekday.clone(),
                role: TextRole::Label,
                color: palette.label,
                rect: band(size.height - band_offset),
            },
            TextRun {
                text: snapshot.time.clone(),
                role: TextRole::Time,
                color: palette.time,
                rect: band(size.height),
            },
            TextRun {
                text: snapshot.date.clone(),
                role: TextRole::Label,
                color: palette.label,
                rect: band(size.height + band_offset),
            },
        ];

        Some(Self {
            background: palette.background,
            runs,
        })
    }
}
