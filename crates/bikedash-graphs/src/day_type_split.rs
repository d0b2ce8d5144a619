//! Working-day versus holiday pie chart.

use std::path::Path;

use bikedash_common::Result;
use bikedash_data::DayTypeTotal;
use plotters::prelude::*;
use tracing::info;

use crate::style::{ChartStyle, CAPTION_SIZE, FONT_FAMILY, LABEL_SIZE};

/// Slices start at 12 o'clock, like the dashboard this chart replaces.
const START_ANGLE: f64 = 90.0;

fn slice_sizes(rows: &[DayTypeTotal]) -> Vec<f64> {
    rows.iter().map(|row| row.total_rentals as f64).collect()
}

fn slice_labels(rows: &[DayTypeTotal]) -> Vec<String> {
    rows.iter()
        .map(|row| row.day_kind.label().to_string())
        .collect()
}

/// The dominant kind comes first in the table and gets the highlight
/// color; the other slice is muted.
fn slice_colors(rows: &[DayTypeTotal], style: &ChartStyle) -> Vec<RGBColor> {
    (0..rows.len())
        .map(|idx| if idx == 0 { style.highlight } else { style.muted })
        .collect()
}

pub fn render(rows: &[DayTypeTotal], style: &ChartStyle, path: &Path) -> Result<()> {
    let root = BitMapBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&style.background)?;

    let title_style = TextStyle::from((FONT_FAMILY, CAPTION_SIZE).into_font()).color(&BLACK);
    root.titled("Rentals: Working Days vs Holidays", title_style)?;

    if !rows.is_empty() {
        let sizes = slice_sizes(rows);
        let labels = slice_labels(rows);
        let colors = slice_colors(rows, style);

        let (width, height) = root.dim_in_pixel();
        let center = (width as i32 / 2, height as i32 / 2);
        let radius = f64::from(width.min(height)) * 0.35;

        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
        pie.start_angle(START_ANGLE);
        pie.label_style((FONT_FAMILY, LABEL_SIZE).into_font().color(&BLACK));
        pie.percentages((FONT_FAMILY, LABEL_SIZE).into_font().color(&BLACK));
        root.draw(&pie)?;
    }

    root.present()?;
    info!("Rendered day type split chart to {}", path.display());
    Ok(())
}
