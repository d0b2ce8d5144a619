//! Configuration schema definitions using serde.

use bikedash_common::{BikedashError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for bikedash.
///
/// Every section is optional in the YAML file; missing sections fall
/// back to their documented defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Input data configuration.
    #[serde(default)]
    pub data: DataConfig,
    /// Report parameters (date range, fixed business-rule years).
    #[serde(default)]
    pub report: ReportConfig,
    /// Chart output configuration.
    #[serde(default)]
    pub charts: ChartsConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Input data configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Path to the cleaned daily rentals CSV.
    pub daily_path: PathBuf,
    /// Path to the cleaned hourly rentals CSV.
    pub hourly_path: PathBuf,
}

/// Report parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// First date of the report range; defaults to the earliest date in
    /// the daily table when absent.
    pub start_date: Option<NaiveDate>,
    /// Last date of the report range; defaults to the latest date in
    /// the daily table when absent.
    pub end_date: Option<NaiveDate>,
    /// Year whose monthly averages feed the trend chart.
    pub trend_year: i32,
    /// Year drawn in the highlight color on the yearly chart.
    pub highlight_year: i32,
    /// Number of rows kept by the top-hours table.
    pub top_hours: usize,
}

/// Chart output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartsConfig {
    /// Directory where chart PNGs are written.
    pub output_dir: PathBuf,
    /// Chart width in pixels.
    pub width: u32,
    /// Chart height in pixels.
    pub height: u32,
    /// Color palette.
    pub colors: ColorsConfig,
}

/// Color palette, as "#RRGGBB" strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorsConfig {
    /// Bar/slice color for the emphasized category.
    pub highlight: String,
    /// Bar/slice color for everything else.
    pub muted: String,
    /// Line color for the trend chart.
    pub line: String,
    /// Chart background color.
    pub background: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g. "info", "debug").
    pub level: String,
    /// Whether to colorize terminal output.
    pub ansi: bool,
}

impl Config {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.data.daily_path.as_os_str().is_empty() {
            return Err(BikedashError::validation_field(
                "daily data path cannot be empty",
                "data.daily_path",
            ));
        }

        if self.data.hourly_path.as_os_str().is_empty() {
            return Err(BikedashError::validation_field(
                "hourly data path cannot be empty",
                "data.hourly_path",
            ));
        }

        if self.charts.width == 0 || self.charts.height == 0 {
            return Err(BikedashError::validation_field(
                "chart dimensions must be at least 1x1 pixel",
                "charts.width/charts.height",
            ));
        }

        if self.report.top_hours == 0 {
            return Err(BikedashError::validation_field(
                "top_hours must keep at least one row",
                "report.top_hours",
            ));
        }

        if let (Some(start), Some(end)) = (self.report.start_date, self.report.end_date) {
            if start > end {
                return Err(BikedashError::validation_field(
                    format!("start_date {start} is after end_date {end}"),
                    "report.start_date",
                ));
            }
        }

        Ok(())
    }
}
