//! Loads the source tables, resolves the reporting range, builds the
//! derived tables and writes the charts.

use std::fs;
use std::path::PathBuf;

use bikedash_common::{BikedashError, DailyRecord, DateRange, HourlyRecord, Result};
use bikedash_config::Config;
use bikedash_data::{
    clip_to_range, load_daily_records, load_hourly_records, totals, RentalTotals, ReportOptions,
    ReportTables,
};
use bikedash_graphs::{
    day_type_split, density_breakdown, monthly_trend, seasonal_totals, top_hours,
    yearly_performance, ChartStyle,
};
use tracing::{info, warn};

/// One fully loaded dashboard: configuration plus both source tables.
pub struct Dashboard {
    config: Config,
    daily: Vec<DailyRecord>,
    hourly: Vec<HourlyRecord>,
}

/// What a run produced, for the closing log lines and for tests.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub range: DateRange,
    /// Headline totals over the whole daily table, not the range.
    pub totals: RentalTotals,
    pub days_in_range: usize,
    pub hours_in_range: usize,
    pub charts: Vec<PathBuf>,
}

impl Dashboard {
    /// Load both source tables. Malformed input aborts here.
    pub fn load(config: Config) -> Result<Self> {
        let daily = load_daily_records(&config.data.daily_path)?;
        let hourly = load_hourly_records(&config.data.hourly_path)?;

        Ok(Self {
            config,
            daily,
            hourly,
        })
    }

    /// Reporting window: configured bounds win, missing bounds fall
    /// back to the full span of the daily table.
    fn resolve_range(&self) -> Result<DateRange> {
        let span = DateRange::spanning(&self.daily).ok_or_else(|| {
            BikedashError::data(format!(
                "daily table '{}' has no rows",
                self.config.data.daily_path.display()
            ))
        })?;

        Ok(DateRange::new(
            self.config.report.start_date.unwrap_or(span.start),
            self.config.report.end_date.unwrap_or(span.end),
        ))
    }

    /// Filter, aggregate, render. An empty filtered range is not an
    /// error; the charts simply come out empty.
    pub fn run(&self) -> Result<RunSummary> {
        let range = self.resolve_range()?;
        info!("Reporting range: {}", range);

        let daily = clip_to_range(&self.daily, range);
        let hourly = clip_to_range(&self.hourly, range);
        if daily.is_empty() {
            warn!("No daily rows fall within {}", range);
        }
        info!(
            "{} of {} daily rows and {} of {} hourly rows in range",
            daily.len(),
            self.daily.len(),
            hourly.len(),
            self.hourly.len()
        );

        let all_time = totals(&self.daily);
        info!(
            "All-time totals: {} rentals, {} from registered users",
            all_time.rentals, all_time.registered
        );

        let options = ReportOptions {
            trend_year: self.config.report.trend_year,
            top_hours: self.config.report.top_hours,
        };
        let tables = ReportTables::build(&daily, &hourly, &options);

        let charts = self.render_charts(&tables)?;
        info!(
            "Wrote {} charts to {}",
            charts.len(),
            self.config.charts.output_dir.display()
        );

        Ok(RunSummary {
            range,
            totals: all_time,
            days_in_range: daily.len(),
            hours_in_range: hourly.len(),
            charts,
        })
    }

    fn render_charts(&self, tables: &ReportTables) -> Result<Vec<PathBuf>> {
        let charts_config = &self.config.charts;
        fs::create_dir_all(&charts_config.output_dir)?;

        let style = ChartStyle::from_hex(
            charts_config.width,
            charts_config.height,
            &charts_config.colors.highlight,
            &charts_config.colors.muted,
            &charts_config.colors.line,
            &charts_config.colors.background,
        );

        let out = |name: &str| charts_config.output_dir.join(name);
        let mut written = Vec::with_capacity(6);

        let path = out("yearly_performance.png");
        yearly_performance::render(
            &tables.yearly,
            self.config.report.highlight_year,
            &style,
            &path,
        )?;
        written.push(path);

        let path = out("monthly_trend.png");
        monthly_trend::render(&tables.monthly, self.config.report.trend_year, &style, &path)?;
        written.push(path);

        let path = out("seasonal_totals.png");
        seasonal_totals::render(&tables.seasonal, &style, &path)?;
        written.push(path);

        let path = out("day_type_split.png");
        day_type_split::render(&tables.day_type, &style, &path)?;
        written.push(path);

        let path = out("top_hours.png");
        top_hours::render(&tables.top_hours, &style, &path)?;
        written.push(path);

        let path = out("density_breakdown.png");
        density_breakdown::render(&tables.density, &style, &path)?;
        written.push(path);

        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bikedash_common::{DayKind, Season};
    use chrono::{Datelike, NaiveDate};
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn daily(d: NaiveDate, rentals: u64) -> DailyRecord {
        DailyRecord {
            date: d,
            year: d.year(),
            month: d.month(),
            season: Season::Summer,
            day_kind: DayKind::WorkingDay,
            rentals,
            registered: rentals / 2,
        }
    }

    fn hourly(d: NaiveDate, hour: u8, rentals: u64) -> HourlyRecord {
        HourlyRecord {
            date: d,
            hour,
            rentals,
        }
    }

    fn dashboard_with(config: Config) -> Dashboard {
        Dashboard {
            config,
            daily: vec![
                daily(date(2011, 3, 15), 1_100),
                daily(date(2012, 6, 1), 4_300),
                daily(date(2012, 7, 1), 6_043),
            ],
            hourly: vec![
                hourly(date(2012, 6, 1), 8, 350),
                hourly(date(2012, 6, 1), 17, 520),
            ],
        }
    }

    #[test]
    fn test_resolve_range_defaults_to_full_span() {
        let dashboard = dashboard_with(Config::default());

        let range = dashboard.resolve_range().unwrap();

        assert_eq!(range.start, date(2011, 3, 15));
        assert_eq!(range.end, date(2012, 7, 1));
    }

    #[test]
    fn test_resolve_range_honors_configured_bounds() {
        let mut config = Config::default();
        config.report.start_date = Some(date(2012, 1, 1));
        let dashboard = dashboard_with(config);

        let range = dashboard.resolve_range().unwrap();

        // Configured start, full-span end.
        assert_eq!(range.start, date(2012, 1, 1));
        assert_eq!(range.end, date(2012, 7, 1));
    }

    #[test]
    fn test_resolve_range_fails_without_daily_rows() {
        let dashboard = Dashboard {
            config: Config::default(),
            daily: Vec::new(),
            hourly: Vec::new(),
        };

        let err = dashboard.resolve_range().unwrap_err();
        assert!(err.to_string().contains("has no rows"));
    }

    #[test]
    fn test_run_writes_all_six_charts() {
        let out = TempDir::new().unwrap();
        let mut config = Config::default();
        config.charts.output_dir = out.path().join("charts");
        let dashboard = dashboard_with(config);

        let summary = dashboard.run().unwrap();

        assert_eq!(summary.days_in_range, 3);
        assert_eq!(summary.hours_in_range, 2);
        assert_eq!(summary.totals.rentals, 11_443);
        assert_eq!(summary.charts.len(), 6);
        for chart in &summary.charts {
            assert!(chart.exists(), "{} was not written", chart.display());
        }
    }

    #[test]
    fn test_run_with_range_outside_the_data() {
        let out = TempDir::new().unwrap();
        let mut config = Config::default();
        config.charts.output_dir = out.path().to_path_buf();
        config.report.start_date = Some(date(2020, 1, 1));
        config.report.end_date = Some(date(2020, 12, 31));
        let dashboard = dashboard_with(config);

        let summary = dashboard.run().unwrap();

        // Nothing in range, but the run still completes and the charts
        // are written (empty).
        assert_eq!(summary.days_in_range, 0);
        assert_eq!(summary.hours_in_range, 0);
        assert_eq!(summary.charts.len(), 6);
        // Headline totals still cover the whole table.
        assert_eq!(summary.totals.rentals, 11_443);
    }
}
