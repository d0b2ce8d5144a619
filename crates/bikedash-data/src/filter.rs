//! Date-range filtering applied to both tables before aggregation.

use bikedash_common::{DateRange, Dated};
use tracing::debug;

/// Keep the rows whose date lies within `range`, both ends inclusive.
///
/// An inverted range (start after end) keeps nothing; downstream
/// aggregations then produce empty tables rather than failing.
pub fn clip_to_range<T: Dated + Clone>(records: &[T], range: DateRange) -> Vec<T> {
    let kept: Vec<T> = records
        .iter()
        .filter(|record| range.contains(record.date()))
        .cloned()
        .collect();

    debug!("Kept {} of {} rows in range {}", kept.len(), records.len(), range);
    kept
}
