//! Busiest stations and station combinations.

use crate::analyzers::frequency::mode_by;
use crate::analyzers::types::{Mode, PairMode};
use crate::analyzers::utility::{count_values, top_count};
use crate::error::{Result, StatsError};
use crate::trips::TripTable;

pub fn most_common_start_station(table: &TripTable) -> Result<Mode<String>> {
    let m = mode_by(table, |trip| Some(trip.record().start_station.as_str()))?;
    Ok(Mode {
        value: m.value.to_string(),
        count: m.count,
    })
}

pub fn most_common_end_station(table: &TripTable) -> Result<Mode<String>> {
    let m = mode_by(table, |trip| Some(trip.record().end_station.as_str()))?;
    Ok(Mode {
        value: m.value.to_string(),
        count: m.count,
    })
}

/// Most frequent trip, keyed on the exact `(start, end)` station pair.
///
/// Ties go to the smallest pair, comparing start station first.
pub fn most_common_pair(table: &TripTable) -> Result<PairMode> {
    let pairs = table.iter().map(|trip| {
        let r = trip.record();
        (r.start_station.as_str(), r.end_station.as_str())
    });

    let ((start, end), count) = top_count(count_values(pairs)).ok_or(StatsError::EmptyInput)?;

    Ok(PairMode {
        start_station: start.to_string(),
        end_station: end.to_string(),
        count,
    })
}
