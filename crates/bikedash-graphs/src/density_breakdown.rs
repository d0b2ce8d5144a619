//! Traffic density breakdown bar chart.
//!
//! The density table is row-per-date; this module computes the
//! second-order summary (dates per band) itself, zero-filled over the
//! fixed band set so all three bars always appear.

use std::path::Path;

use bikedash_common::{DensityBand, Result};
use bikedash_data::DensityRow;
use plotters::prelude::*;
use tracing::info;

use crate::style::{segment_label, ChartStyle, CAPTION_SIZE, FONT_FAMILY};

/// Count dates per band in fixed band order, including zero counts.
pub fn band_counts(rows: &[DensityRow]) -> [(DensityBand, u64); 3] {
    DensityBand::ALL.map(|band| {
        let count = rows.iter().filter(|row| row.band == band).count() as u64;
        (band, count)
    })
}

/// Index of the largest band; a tie keeps the quieter band.
fn busiest_index(counts: &[(DensityBand, u64); 3]) -> usize {
    let mut best = 0;
    for (idx, (_, count)) in counts.iter().enumerate() {
        if *count > counts[best].1 {
            best = idx;
        }
    }
    best
}

fn y_ceiling(counts: &[(DensityBand, u64); 3]) -> f64 {
    let max = counts.iter().map(|(_, count)| *count as f64).fold(0.0, f64::max);
    if max == 0.0 {
        10.0
    } else {
        max * 1.1
    }
}

pub fn render(rows: &[DensityRow], style: &ChartStyle, path: &Path) -> Result<()> {
    let root = BitMapBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&style.background)?;

    let counts = band_counts(rows);
    let labels: Vec<String> = counts.iter().map(|(band, _)| band.to_string()).collect();
    let highlight = busiest_index(&counts);

    let mut chart = ChartBuilder::on(&root)
        .caption("Days per Traffic Density Band", (FONT_FAMILY, CAPTION_SIZE))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(80)
        .build_cartesian_2d((0u32..3u32).into_segmented(), 0f64..y_ceiling(&counts))?;

    chart
        .configure_mesh()
        .x_desc("Density")
        .y_desc("Days")
        .x_label_formatter(&|segment| segment_label(segment, &labels))
        .draw()?;

    chart.draw_series(counts.iter().enumerate().map(|(idx, (_, count))| {
        let color = if idx == highlight {
            style.highlight
        } else {
            style.muted
        };
        let mut bar = Rectangle::new(
            [
                (SegmentValue::Exact(idx as u32), 0.0),
                (SegmentValue::Exact(idx as u32 + 1), *count as f64),
            ],
            color.filled(),
        );
        bar.set_margin(0, 0, 8, 8);
        bar
    }))?;

    root.present()?;
    info!("Rendered density breakdown chart to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn row(day: u32, rentals: u64) -> DensityRow {
        DensityRow {
            date: NaiveDate::from_ymd_opt(2012, 6, day).unwrap(),
            rentals,
            band: DensityBand::classify(rentals),
        }
    }

    #[test]
    fn test_band_counts_zero_fill() {
        let rows = vec![row(1, 100), row(2, 1_999), row(3, 2_000)];

        let counts = band_counts(&rows);

        assert_eq!(counts[0], (DensityBand::Quiet, 2));
        assert_eq!(counts[1], (DensityBand::Moderate, 1));
        assert_eq!(counts[2], (DensityBand::Busy, 0));
    }

    #[test]
    fn test_band_counts_of_empty_table() {
        let counts = band_counts(&[]);
        assert!(counts.iter().all(|(_, count)| *count == 0));
    }

    #[test]
    fn test_busiest_index_prefers_the_quieter_band_on_tie() {
        let counts = [
            (DensityBand::Quiet, 3),
            (DensityBand::Moderate, 3),
            (DensityBand::Busy, 1),
        ];
        assert_eq!(busiest_index(&counts), 0);

        let counts = [
            (DensityBand::Quiet, 1),
            (DensityBand::Moderate, 3),
            (DensityBand::Busy, 2),
        ];
        assert_eq!(busiest_index(&counts), 1);
    }

    #[test]
    fn test_render_writes_a_png() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("density.png");
        let rows = vec![row(1, 100), row(2, 3_000), row(3, 6_000), row(4, 2_500)];

        render(&rows, &ChartStyle::default(), &path).unwrap();

        assert!(path.exists());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_render_empty_table() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("density_empty.png");

        render(&[], &ChartStyle::default(), &path).unwrap();

        assert!(path.exists());
    }
}
