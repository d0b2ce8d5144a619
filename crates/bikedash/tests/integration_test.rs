//! Integration tests for the bikedash crate: CSV files through to PNGs.

use std::fs;

use bikedash::Dashboard;
use bikedash_config::Config;
use chrono::NaiveDate;
use tempfile::TempDir;

const DAILY_CSV: &str = "dteday,season,yr,mnth,workingday,cnt,registered\n\
                         2011-01-01,Winter,2011,1,No,985,654\n\
                         2012-06-01,Summer,2012,6,Yes,4300,3100\n\
                         2012-06-02,Summer,2012,6,Yes,2100,1500\n\
                         2012-07-01,Fall,2012,7,No,6043,4100\n";

const HOURLY_CSV: &str = "dteday,hr,cnt\n\
                          2012-06-01,8,350\n\
                          2012-06-01,17,520\n\
                          2012-06-02,17,410\n\
                          2012-07-01,12,280\n";

fn write_fixtures(dir: &TempDir) -> Config {
    let daily_path = dir.path().join("day.csv");
    let hourly_path = dir.path().join("hour.csv");
    fs::write(&daily_path, DAILY_CSV).unwrap();
    fs::write(&hourly_path, HOURLY_CSV).unwrap();

    let mut config = Config::default();
    config.data.daily_path = daily_path;
    config.data.hourly_path = hourly_path;
    config.charts.output_dir = dir.path().join("charts");
    config
}

#[test]
fn test_full_run_from_files_to_charts() {
    let dir = TempDir::new().unwrap();
    let config = write_fixtures(&dir);

    let summary = Dashboard::load(config).unwrap().run().unwrap();

    // Full span of the daily table by default.
    assert_eq!(
        summary.range.start,
        NaiveDate::from_ymd_opt(2011, 1, 1).unwrap()
    );
    assert_eq!(
        summary.range.end,
        NaiveDate::from_ymd_opt(2012, 7, 1).unwrap()
    );
    assert_eq!(summary.days_in_range, 4);
    assert_eq!(summary.hours_in_range, 4);
    assert_eq!(summary.totals.rentals, 13_428);
    assert_eq!(summary.totals.registered, 9_354);

    assert_eq!(summary.charts.len(), 6);
    for chart in &summary.charts {
        assert!(chart.exists(), "{} was not written", chart.display());
        assert!(fs::metadata(chart).unwrap().len() > 0);
    }

    let names: Vec<String> = summary
        .charts
        .iter()
        .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert!(names.contains(&"yearly_performance.png".to_string()));
    assert!(names.contains(&"density_breakdown.png".to_string()));
}

#[test]
fn test_configured_range_narrows_the_report() {
    let dir = TempDir::new().unwrap();
    let mut config = write_fixtures(&dir);
    config.report.start_date = NaiveDate::from_ymd_opt(2012, 6, 1);
    config.report.end_date = NaiveDate::from_ymd_opt(2012, 6, 30);

    let summary = Dashboard::load(config).unwrap().run().unwrap();

    assert_eq!(summary.days_in_range, 2);
    assert_eq!(summary.hours_in_range, 3);
    // Headline totals ignore the range.
    assert_eq!(summary.totals.rentals, 13_428);
}

#[test]
fn test_malformed_daily_file_aborts_the_load() {
    let dir = TempDir::new().unwrap();
    let mut config = write_fixtures(&dir);
    let broken = dir.path().join("broken.csv");
    fs::write(
        &broken,
        "dteday,season,yr,mnth,workingday,cnt,registered\n\
         2012-06-31,Summer,2012,6,Yes,100,50\n",
    )
    .unwrap();
    config.data.daily_path = broken;

    let err = Dashboard::load(config).unwrap_err();
    assert!(err.to_string().contains("invalid date '2012-06-31'"));
}

#[test]
fn test_missing_hourly_file_aborts_the_load() {
    let dir = TempDir::new().unwrap();
    let mut config = write_fixtures(&dir);
    config.data.hourly_path = dir.path().join("does_not_exist.csv");

    let err = Dashboard::load(config).unwrap_err();
    assert!(err.to_string().contains("failed to open"));
}
