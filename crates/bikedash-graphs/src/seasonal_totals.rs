//! Seasonal totals bar chart.

use std::path::Path;

use bikedash_common::Result;
use bikedash_data::SeasonTotal;
use plotters::prelude::*;
use tracing::info;

use crate::style::{segment_label, ChartStyle, CAPTION_SIZE, FONT_FAMILY};

fn y_ceiling(rows: &[SeasonTotal]) -> f64 {
    if rows.is_empty() {
        return 10.0;
    }
    rows.iter()
        .map(|row| row.total_rentals as f64)
        .fold(0.0, f64::max)
        * 1.1
}

fn bar_labels(rows: &[SeasonTotal]) -> Vec<String> {
    rows.iter().map(|row| row.season.to_string()).collect()
}

/// Group an axis value's integer digits with commas (8714342 becomes
/// "8,714,342").
fn thousands(value: f64) -> String {
    let digits = format!("{value:.0}");
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Draw one bar per season present in range, busiest first and
/// highlighted.
pub fn render(rows: &[SeasonTotal], style: &ChartStyle, path: &Path) -> Result<()> {
    let root = BitMapBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&style.background)?;

    let labels = bar_labels(rows);
    let segments = rows.len().max(1) as u32;

    let mut chart = ChartBuilder::on(&root)
        .caption("Total Rentals per Season", (FONT_FAMILY, CAPTION_SIZE))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(90)
        .build_cartesian_2d((0u32..segments).into_segmented(), 0f64..y_ceiling(rows))?;

    chart
        .configure_mesh()
        .x_desc("Season")
        .y_desc("Total Rentals")
        .x_label_formatter(&|segment| segment_label(segment, &labels))
        .y_label_formatter(&|value| thousands(*value))
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
    info!("Rendered seasonal totals chart to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bikedash_common::Season;
    use tempfile::tempdir;

    fn rows() -> Vec<SeasonTotal> {
        vec![
            SeasonTotal {
                season: Season::Fall,
                total_rentals: 1_061_129,
            },
            SeasonTotal {
                season: Season::Summer,
                total_rentals: 918_589,
            },
            SeasonTotal {
                season: Season::Winter,
                total_rentals: 841_613,
            },
        ]
    }

    #[test]
    fn test_thousands_grouping() {
        assert_eq!(thousands(0.0), "0");
        assert_eq!(thousands(999.0), "999");
        assert_eq!(thousands(1_000.0), "1,000");
        assert_eq!(thousands(1_061_129.0), "1,061,129");
    }

    #[test]
    fn test_bar_labels_use_season_names() {
        assert_eq!(bar_labels(&rows()), vec!["Fall", "Summer", "Winter"]);
    }

    #[test]
    fn test_y_ceiling_pads_the_maximum() {
        let ceiling = y_ceiling(&rows());
        assert!((ceiling - 1_167_241.9).abs() < 1e-6);
    }

    #[test]
    fn test_render_writes_a_png() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("seasonal.png");

        render(&rows(), &ChartStyle::default(), &path).unwrap();

        assert!(path.exists());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_render_empty_table() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("seasonal_empty.png");

        render(&[], &ChartStyle::default(), &path).unwrap();

        assert!(path.exists());
    }
}
