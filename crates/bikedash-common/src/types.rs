//! Domain types for bicycle-rental records and their derived tables

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BikedashError;

/// One row of the daily rentals table, keyed by calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub year: i32,
    /// Calendar month, 1 through 12.
    pub month: u32,
    pub season: Season,
    pub day_kind: DayKind,
    /// Total rentals recorded on this date.
    pub rentals: u64,
    /// Rentals attributed to registered users.
    pub registered: u64,
}

/// One row of the hourly rentals table, keyed by (date, hour).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyRecord {
    pub date: NaiveDate,
    /// Hour of day, 0 through 23.
    pub hour: u8,
    pub rentals: u64,
}

/// Anything carrying a calendar date, so date filtering is written once.
pub trait Dated {
    fn date(&self) -> NaiveDate;
}

impl Dated for DailyRecord {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Dated for HourlyRecord {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

/// The four fixed season categories.
///
/// Ordering follows the calendar (Spring first) and is used as the
/// deterministic tie-break when seasons share a total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Fall, Season::Winter];

    pub fn label(&self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
            Season::Winter => "Winter",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Season {
    type Err = BikedashError;

    /// Accepts the season names (case-insensitive) and the numeric
    /// codes 1-4 used by the upstream dataset.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "spring" => Ok(Season::Spring),
            "2" | "summer" => Ok(Season::Summer),
            "3" | "fall" | "autumn" => Ok(Season::Fall),
            "4" | "winter" => Ok(Season::Winter),
            other => Err(BikedashError::data(format!("unknown season '{other}'"))),
        }
    }
}

/// Whether a date counts as a working day or a holiday/weekend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DayKind {
    #[serde(rename = "Working Day")]
    WorkingDay,
    Holiday,
}

impl DayKind {
    pub const ALL: [DayKind; 2] = [DayKind::WorkingDay, DayKind::Holiday];

    pub fn label(&self) -> &'static str {
        match self {
            DayKind::WorkingDay => "Working Day",
            DayKind::Holiday => "Holiday",
        }
    }
}

impl fmt::Display for DayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DayKind {
    type Err = BikedashError;

    /// Accepts yes/no, true/false, 0/1 and the display labels.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yes" | "true" | "1" | "working day" | "workingday" => Ok(DayKind::WorkingDay),
            "no" | "false" | "0" | "holiday" => Ok(DayKind::Holiday),
            other => Err(BikedashError::data(format!(
                "unknown working-day flag '{other}'"
            ))),
        }
    }
}

/// Daily rental volume bucketed into three fixed bands.
///
/// The band labels are the dashboard's fixed vocabulary: Sepi (quiet),
/// Sedang (moderate), Ramai (busy).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DensityBand {
    #[serde(rename = "Sepi")]
    Quiet,
    #[serde(rename = "Sedang")]
    Moderate,
    #[serde(rename = "Ramai")]
    Busy,
}

impl DensityBand {
    pub const ALL: [DensityBand; 3] =
        [DensityBand::Quiet, DensityBand::Moderate, DensityBand::Busy];

    /// Lowest rental count that counts as moderate traffic.
    pub const MODERATE_FLOOR: u64 = 2_000;
    /// Lowest rental count that counts as busy traffic.
    pub const BUSY_FLOOR: u64 = 5_000;

    /// Buckets a daily rental count using half-open intervals:
    /// [0, 2000) is quiet, [2000, 5000) is moderate, [5000, ..) is busy.
    pub fn classify(rentals: u64) -> Self {
        if rentals < Self::MODERATE_FLOOR {
            DensityBand::Quiet
        } else if rentals < Self::BUSY_FLOOR {
            DensityBand::Moderate
        } else {
            DensityBand::Busy
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DensityBand::Quiet => "Sepi",
            DensityBand::Moderate => "Sedang",
            DensityBand::Busy => "Ramai",
        }
    }
}

impl fmt::Display for DensityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An inclusive calendar-date interval.
///
/// A range whose start lies after its end contains no dates; filtering
/// with such a range yields empty tables rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// True when `date` lies within [start, end], both ends inclusive.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// True when the range selects no dates at all.
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    /// The tightest range covering every record in `records`, or `None`
    /// for an empty slice.
    pub fn spanning<T: Dated>(records: &[T]) -> Option<Self> {
        let first = records.first()?.date();
        let (start, end) = records.iter().fold((first, first), |(lo, hi), record| {
            let date = record.date();
            (lo.min(date), hi.max(date))
        });
        Some(Self { start, end })
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}
