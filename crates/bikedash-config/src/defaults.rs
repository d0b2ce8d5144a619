//! Default configuration values.

use crate::schema::*;
use std::path::PathBuf;

impl Default for Config {
    fn default() -> Self {
        Self {
            data: DataConfig::default(),
            report: ReportConfig::default(),
            charts: ChartsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            daily_path: PathBuf::from("data/day_clean.csv"),
            hourly_path: PathBuf::from("data/hour_clean.csv"),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            start_date: None,
            end_date: None,
            trend_year: 2012,
            highlight_year: 2011,
            top_hours: 5,
        }
    }
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("charts"),
            width: 800,
            height: 600,
            colors: ColorsConfig::default(),
        }
    }
}

impl Default for ColorsConfig {
    fn default() -> Self {
        Self {
            highlight: "#90CAF9".to_string(),
            muted: "#D3D3D3".to_string(),
            line: "#72BCD4".to_string(),
            background: "#FFFFFF".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            ansi: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_report_constants() {
        let report = ReportConfig::default();
        assert_eq!(report.trend_year, 2012);
        assert_eq!(report.highlight_year, 2011);
        assert_eq!(report.top_hours, 5);
        assert!(report.start_date.is_none());
        assert!(report.end_date.is_none());
    }

    #[test]
    fn test_default_charts() {
        let charts = ChartsConfig::default();
        assert_eq!(charts.width, 800);
        assert_eq!(charts.height, 600);
        assert_eq!(charts.output_dir, PathBuf::from("charts"));
        assert_eq!(charts.colors.highlight, "#90CAF9");
        assert_eq!(charts.colors.muted, "#D3D3D3");
        assert_eq!(charts.colors.line, "#72BCD4");
    }

    #[test]
    fn test_default_config_validates() {
        assert!(Config::default().validate().is_ok());
    }
}
