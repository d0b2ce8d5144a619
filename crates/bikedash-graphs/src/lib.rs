//! Chart rendering for the bikedash dashboard.
//!
//! One module per chart. Each exposes pure data-prep helpers plus a
//! `render` function that writes a PNG with the plotters bitmap
//! backend. Every `render` accepts an empty table and still produces a
//! valid image.

pub mod day_type_split;
pub mod density_breakdown;
pub mod monthly_trend;
pub mod seasonal_totals;
pub mod style;
pub mod top_hours;
pub mod yearly_performance;

pub use style::ChartStyle;
