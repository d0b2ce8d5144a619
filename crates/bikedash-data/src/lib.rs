//! Data loading, filtering, and aggregation for bikedash

pub mod aggregate;
pub mod filter;
pub mod ingest;

pub use aggregate::{
    day_type_totals, density_rows, monthly_average_for_year, seasonal_totals, top_hours, totals,
    yearly_performance, DayTypeTotal, DensityRow, HourTotal, MonthlyAverage, RentalTotals,
    ReportOptions, ReportTables, SeasonTotal, YearlyTotal,
};
pub use filter::clip_to_range;
pub use ingest::{load_daily_records, load_hourly_records};
