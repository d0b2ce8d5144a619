//! Grouped aggregations producing the dashboard's derived tables.
//!
//! Every function here is a pure pass over the filtered input slice:
//! group, reduce, sort. Empty input yields an empty table, never an
//! error. Descending sorts break ties on the ascending group key so the
//! output order is deterministic.

use std::collections::HashMap;

use bikedash_common::{DailyRecord, DayKind, DensityBand, HourlyRecord, Season};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Total rentals per distinct year, sorted descending by total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlyTotal {
    pub year: i32,
    pub total_rentals: u64,
}

/// Mean daily rentals per month of the trend year, sorted descending.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAverage {
    pub month: u32,
    pub avg_rentals: f64,
}

/// Total rentals per season present in range, sorted descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonTotal {
    pub season: Season,
    pub total_rentals: u64,
}

/// Total rentals per day kind, at most two rows, sorted descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayTypeTotal {
    pub day_kind: DayKind,
    pub total_rentals: u64,
}

/// Total rentals for one hour of day, used by the top-hours table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourTotal {
    pub hour: u8,
    pub total_rentals: u64,
}

/// One daily row classified into a density band. Row-wise map, so the
/// table is one-to-one with the filtered daily table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DensityRow {
    pub date: NaiveDate,
    pub rentals: u64,
    pub band: DensityBand,
}

/// Headline metrics summed over the whole (unfiltered) daily table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RentalTotals {
    pub rentals: u64,
    pub registered: u64,
}

/// Group the daily table by year and sum rentals.
///
/// Rows are sorted by total descending; years tie toward the earlier
/// year.
pub fn yearly_performance(daily: &[DailyRecord]) -> Vec<YearlyTotal> {
    let mut totals: HashMap<i32, u64> = HashMap::new();

    for record in daily {
        *totals.entry(record.year).or_insert(0) += record.rentals;
    }

    let mut result: Vec<YearlyTotal> = totals
        .into_iter()
        .map(|(year, total_rentals)| YearlyTotal {
            year,
            total_rentals,
        })
        .collect();

    result.sort_by(|a, b| {
        b.total_rentals
            .cmp(&a.total_rentals)
            .then_with(|| a.year.cmp(&b.year))
    });

    debug!("Aggregated {} yearly performance rows", result.len());
    result
}

/// Mean daily rentals per month, restricted to `trend_year`.
///
/// The year restriction is a fixed business rule, independent of the
/// selected date range; when the trend year is absent from the filtered
/// table the result is empty, which is valid output. Rows are sorted by
/// average descending; months tie toward the earlier month.
pub fn monthly_average_for_year(daily: &[DailyRecord], trend_year: i32) -> Vec<MonthlyAverage> {
    let mut sums: HashMap<u32, (u64, u64)> = HashMap::new();

    for record in daily.iter().filter(|record| record.year == trend_year) {
        let entry = sums.entry(record.month).or_insert((0, 0));
        entry.0 += record.rentals;
        entry.1 += 1;
    }

    let mut result: Vec<MonthlyAverage> = sums
        .into_iter()
        .map(|(month, (total, days))| MonthlyAverage {
            month,
            avg_rentals: total as f64 / days as f64,
        })
        .collect();

    result.sort_by(|a, b| {
        b.avg_rentals
            .total_cmp(&a.avg_rentals)
            .then_with(|| a.month.cmp(&b.month))
    });

    debug!(
        "Aggregated {} monthly average rows for year {}",
        result.len(),
        trend_year
    );
    result
}

/// Group the daily table by season and sum rentals.
///
/// Seasons absent from the filtered range do not appear (no zero-fill).
/// Rows are sorted by total descending; ties follow calendar season
/// order.
pub fn seasonal_totals(daily: &[DailyRecord]) -> Vec<SeasonTotal> {
    let mut totals: HashMap<Season, u64> = HashMap::new();

    for record in daily {
        *totals.entry(record.season).or_insert(0) += record.rentals;
    }

    let mut result: Vec<SeasonTotal> = totals
        .into_iter()
        .map(|(season, total_rentals)| SeasonTotal {
            season,
            total_rentals,
        })
        .collect();

    result.sort_by(|a, b| {
        b.total_rentals
            .cmp(&a.total_rentals)
            .then_with(|| a.season.cmp(&b.season))
    });

    debug!("Aggregated {} seasonal total rows", result.len());
    result
}

/// Group the daily table by working-day flag and sum rentals.
///
/// At most two rows; a kind with no rows in range is simply absent.
/// Sorted by total descending; a tie puts working days first.
pub fn day_type_totals(daily: &[DailyRecord]) -> Vec<DayTypeTotal> {
    let mut totals: HashMap<DayKind, u64> = HashMap::new();

    for record in daily {
        *totals.entry(record.day_kind).or_insert(0) += record.rentals;
    }

    let mut result: Vec<DayTypeTotal> = totals
        .into_iter()
        .map(|(day_kind, total_rentals)| DayTypeTotal {
            day_kind,
            total_rentals,
        })
        .collect();

    result.sort_by(|a, b| {
        b.total_rentals
            .cmp(&a.total_rentals)
            .then_with(|| a.day_kind.cmp(&b.day_kind))
    });

    debug!("Aggregated {} day type rows", result.len());
    result
}

/// Group the hourly table by hour of day, sum rentals across all dates,
/// and keep the `limit` busiest hours.
///
/// Sorted by total descending; hours tie toward the earlier hour. Fewer
/// than `limit` rows come back when fewer distinct hours are present.
pub fn top_hours(hourly: &[HourlyRecord], limit: usize) -> Vec<HourTotal> {
    let mut totals: HashMap<u8, u64> = HashMap::new();

    for record in hourly {
        *totals.entry(record.hour).or_insert(0) += record.rentals;
    }

    let mut result: Vec<HourTotal> = totals
        .into_iter()
        .map(|(hour, total_rentals)| HourTotal {
            hour,
            total_rentals,
        })
        .collect();

    result.sort_by(|a, b| {
        b.total_rentals
            .cmp(&a.total_rentals)
            .then_with(|| a.hour.cmp(&b.hour))
    });
    result.truncate(limit);

    debug!("Aggregated top {} hour rows", result.len());
    result
}

/// Classify each daily row into a density band.
///
/// A row-wise map, not an aggregation: the output preserves the input
/// order and has exactly one row per input row.
pub fn density_rows(daily: &[DailyRecord]) -> Vec<DensityRow> {
    let result: Vec<DensityRow> = daily
        .iter()
        .map(|record| DensityRow {
            date: record.date,
            rentals: record.rentals,
            band: DensityBand::classify(record.rentals),
        })
        .collect();

    debug!("Classified {} density rows", result.len());
    result
}

/// Sum the headline metrics over the full daily table.
///
/// Deliberately computed before date filtering: the headline numbers
/// describe the whole dataset, not the selected range.
pub fn totals(daily: &[DailyRecord]) -> RentalTotals {
    daily.iter().fold(RentalTotals::default(), |acc, record| {
        RentalTotals {
            rentals: acc.rentals + record.rentals,
            registered: acc.registered + record.registered,
        }
    })
}

/// Parameters for building the derived tables.
#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    /// Year whose monthly averages feed the trend table.
    pub trend_year: i32,
    /// Maximum number of rows kept by the top-hours table.
    pub top_hours: usize,
}

/// The six derived tables consumed by the rendering layer.
///
/// Ephemeral by design: rebuilt in full from the filtered inputs on
/// every date-range change, never cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportTables {
    pub yearly: Vec<YearlyTotal>,
    pub monthly: Vec<MonthlyAverage>,
    pub seasonal: Vec<SeasonTotal>,
    pub day_type: Vec<DayTypeTotal>,
    pub top_hours: Vec<HourTotal>,
    pub density: Vec<DensityRow>,
}

impl ReportTables {
    /// Run all six aggregations over the filtered tables.
    pub fn build(
        daily: &[DailyRecord],
        hourly: &[HourlyRecord],
        options: &ReportOptions,
    ) -> Self {
        Self {
            yearly: yearly_performance(daily),
            monthly: monthly_average_for_year(daily, options.trend_year),
            seasonal: seasonal_totals(daily),
            day_type: day_type_totals(daily),
            top_hours: top_hours(hourly, options.top_hours),
            density: density_rows(daily),
        }
    }

    /// True when every derived table is empty.
    pub fn is_empty(&self) -> bool {
        self.yearly.is_empty()
            && self.monthly.is_empty()
            && self.seasonal.is_empty()
            && self.day_type.is_empty()
            && self.top_hours.is_empty()
            && self.density.is_empty()
    }
}
