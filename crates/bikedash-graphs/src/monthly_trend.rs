//! Monthly trend line chart for the configured trend year.

use std::path::Path;

use bikedash_common::Result;
use bikedash_data::MonthlyAverage;
use plotters::prelude::*;
use tracing::info;

use crate::style::{ChartStyle, CAPTION_SIZE, FONT_FAMILY};

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

fn month_label(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|idx| MONTHS.get(idx as usize))
        .copied()
        .unwrap_or("")
}

/// The table arrives sorted by average for display; the line is drawn
/// in calendar order instead.
fn month_points(rows: &[MonthlyAverage]) -> Vec<(u32, f64)> {
    let mut points: Vec<(u32, f64)> = rows
        .iter()
        .map(|row| (row.month, row.avg_rentals))
        .collect();
    points.sort_by_key(|&(month, _)| month);
    points
}

/// Fixed 500-unit headroom above the largest average.
fn y_ceiling(rows: &[MonthlyAverage]) -> f64 {
    rows.iter()
        .map(|row| row.avg_rentals)
        .fold(0.0, f64::max)
        + 500.0
}

pub fn render(
    rows: &[MonthlyAverage],
    trend_year: i32,
    style: &ChartStyle,
    path: &Path,
) -> Result<()> {
    let root = BitMapBackend::new(path, (style.width, style.height)).into_drawing_area();
    root.fill(&style.background)?;

    let caption = format!("Average Daily Rentals per Month, {trend_year}");
    let mut chart = ChartBuilder::on(&root)
        .caption(&caption, (FONT_FAMILY, CAPTION_SIZE))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(80)
        .build_cartesian_2d(1u32..12u32, 0f64..y_ceiling(rows))?;

    chart
        .configure_mesh()
        .x_desc("Month")
        .y_desc("Average Rentals")
        .x_labels(12)
        .x_label_formatter(&|month| month_label(*month).to_string())
        .draw()?;

    let points = month_points(rows);
    if !points.is_empty() {
        chart
            .draw_series(LineSeries::new(points, style.line.stroke_width(3)).point_size(4))?;
    }

    root.present()?;
    info!("Rendered monthly trend chart to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn rows() -> Vec<MonthlyAverage> {
        vec![
            MonthlyAverage {
                month: 7,
                avg_rentals: 900.0,
            },
            MonthlyAverage {
                month: 6,
                avg_rentals: 300.0,
            },
        ]
    }

    #[test]
    fn test_month_points_are_in_calendar_order() {
        assert_eq!(month_points(&rows()), vec![(6, 300.0), (7, 900.0)]);
    }

    #[test]
    fn test_y_ceiling_adds_fixed_headroom() {
        assert_eq!(y_ceiling(&rows()), 1_400.0);
        assert_eq!(y_ceiling(&[]), 500.0);
    }

    #[test]
    fn test_month_labels() {
        assert_eq!(month_label(1), "Jan");
        assert_eq!(month_label(12), "Dec");
        assert_eq!(month_label(0), "");
        assert_eq!(month_label(13), "");
    }

    #[test]
    fn test_render_writes_a_png() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("monthly.png");

        render(&rows(), 2012, &ChartStyle::default(), &path).unwrap();

        assert!(path.exists());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_render_empty_table() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("monthly_empty.png");

        render(&[], 2012, &ChartStyle::default(), &path).unwrap();

        assert!(path.exists());
    }
}
