//! Integration tests for bikedash-config crate.

use bikedash_config::{Config, ConfigLoader};
use chrono::NaiveDate;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_default_config_passes_validation() {
    let config = Config::default();
    assert!(config.validate().is_ok());

    assert_eq!(config.report.trend_year, 2012);
    assert_eq!(config.report.highlight_year, 2011);
    assert_eq!(config.report.top_hours, 5);
    assert_eq!(config.charts.width, 800);
    assert_eq!(config.charts.height, 600);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_validation_rejects_inverted_report_range() {
    let mut config = Config::default();
    config.report.start_date = NaiveDate::from_ymd_opt(2012, 6, 1);
    config.report.end_date = NaiveDate::from_ymd_opt(2012, 1, 1);

    let error = config.validate().unwrap_err();
    assert!(error.to_string().contains("start_date"));
}

#[test]
fn test_validation_rejects_zero_chart_dimensions() {
    let mut config = Config::default();
    config.charts.width = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_partial_file_keeps_defaults_for_the_rest() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        "report:\n  trend_year: 2024\n  highlight_year: 2023\n"
    )
    .unwrap();

    let config = ConfigLoader::load_from_file(file.path()).unwrap();
    assert_eq!(config.report.trend_year, 2024);
    assert_eq!(config.report.highlight_year, 2023);

    // Everything the file omits stays at its default
    assert_eq!(config.report.top_hours, 5);
    assert_eq!(config.charts.colors.highlight, "#90CAF9");
    assert!(config.report.start_date.is_none());
}

#[test]
fn test_unreadable_file_is_a_configuration_error() {
    let error = ConfigLoader::load_from_file("/nonexistent/bikedash.yaml").unwrap_err();
    assert!(error.to_string().contains("Configuration error"));
}
