//! Busiest rental hours bar chart.

use std::path::Path;

use bikedash_common::Result;
use bikedash_data::HourTotal;
use plotters::prelude::*;
use tracing::info;

use crate::style::{segment_label, ChartStyle, CAPTION_SIZE, FONT_FAMILY};

fn hour_label(hour: u8) -> String {
    format!("{hour:02}:00")
}

fn bar_labels(rows: &[HourTotal]) -> Vec<String> {
    rows.iter().map(|row| hour_label(row.hour)).collect()
}

fn y_ceiling(rows: &[HourTotal]) -> f64 {
    if rows.is_empty() {
        return 10.0;
    }
    rows.iter()
        .map(|row| row.total_rentals as f64)
        .fold(0.0, f64::max)
        * 1.1
}

/// Draw the top hours busiest-first; the peak hour is the first row
/// and gets the highlight color.
pub fn render(rows: &[HourTotal], style: &ChartStyle, path: &Path) -> Result<()> {
    let root = BitMapBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&style.background)?;

    let labels = bar_labels(rows);
    let segments = rows.len().max(1) as u32;

    let mut chart = ChartBuilder::on(&root)
        .caption("Busiest Rental Hours", (FONT_FAMILY, CAPTION_SIZE))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(80)
        .build_cartesian_2d((0u32..segments).into_segmented(), 0f64..y_ceiling(rows))?;

    chart
        .configure_mesh()
        .x_desc("Hour of Day")
        .y_desc("Total Rentals")
        .x_label_formatter(&|segment| segment_label(segment, &labels))
        .draw()?;

    chart.draw_series(rows.iter().enumerate().map(|(idx, row)| {
        let color = if idx == 0 { style.highlight } else { style.muted };
        let mut bar = Rectangle::new(
            [
                (SegmentValue::Exact(idx as u32), 0.0),
                (SegmentValue::Exact(idx as u32 + 1), row.total_rentals as f64),
            ],
            color.filled(),
        );
        bar.set_margin(0, 0, 8, 8);
        bar
    }))?;

    root.present()?;
    info!("Rendered top hours chart to {}", path.display());
    Ok(())
}
