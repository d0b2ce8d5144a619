//! Shared chart styling: dimensions, palette, fonts.

use plotters::prelude::*;

pub const FONT_FAMILY: &str = "sans-serif";
pub const CAPTION_SIZE: u32 = 24;
pub const LABEL_SIZE: u32 = 16;

/// Resolved visual style shared by every chart.
///
/// Colors arrive as hex strings from the configuration and are parsed
/// once here, so the render functions only ever see `RGBColor`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartStyle {
    pub width: u32,
    pub height: u32,
    /// Color for the emphasized bar or slice.
    pub highlight: RGBColor,
    /// Color for everything that is not emphasized.
    pub muted: RGBColor,
    /// Color for line series.
    pub line: RGBColor,
    pub background: RGBColor,
}

impl ChartStyle {
    pub fn from_hex(
        width: u32,
        height: u32,
        highlight: &str,
        muted: &str,
        line: &str,
        background: &str,
    ) -> Self {
        Self {
            width,
            height,
            highlight: parse_color(highlight),
            muted: parse_color(muted),
            line: parse_color(line),
            background: parse_color(background),
        }
    }
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            highlight: RGBColor(0x90, 0xCA, 0xF9),
            muted: RGBColor(0xD3, 0xD3, 0xD3),
            line: RGBColor(0x72, 0xBC, 0xD4),
            background: RGBColor(0xFF, 0xFF, 0xFF),
        }
    }
}

/// Parse a `#RRGGBB` color string, falling back to black.
pub fn parse_color(value: &str) -> RGBColor {
    if let Some(hex) = value.trim().strip_prefix('#') {
        if hex.len() == 6 {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return RGBColor(r, g, b);
            }
        }
    }
    RGBColor(0, 0, 0)
}

/// Map a segmented x position back to its bar label.
pub(crate) fn segment_label(segment: &SegmentValue<u32>, labels: &[String]) -> String {
    let idx = match segment {
        SegmentValue::Exact(idx) | SegmentValue::CenterOf(idx) => *idx as usize,
        SegmentValue::Last => return String::new(),
    };
    labels.get(idx).cloned().unwrap_or_default()
}
