//! Most-frequent-value (mode) statistics.
//!
//! Ties are broken deterministically: among values sharing the highest
//! count, the smallest one wins.

use crate::analyzers::types::Mode;
use crate::analyzers::utility::{count_values, top_count};
use crate::error::{Result, StatsError};
use crate::trips::{Trip, TripTable};

/// Calendar fields a mode can be taken over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemporalField {
    Month,
    Weekday,
    Hour,
}

impl TemporalField {
    pub fn value(self, trip: &Trip) -> u32 {
        match self {
            TemporalField::Month => trip.month(),
            TemporalField::Weekday => trip.weekday(),
            TemporalField::Hour => trip.hour(),
        }
    }
}

/// Most common value of a derived calendar field.
///
/// # Errors
///
/// [`StatsError::EmptyInput`] when the table has no trips.
pub fn mode(table: &TripTable, field: TemporalField) -> Result<Mode<u32>> {
    mode_by(table, |trip| Some(field.value(trip)))
}

/// Most common value of an arbitrary key. Trips for which `key` returns
/// `None` are skipped; if nothing is left, the result is `EmptyInput`.
pub fn mode_by<'a, K, F>(table: &'a TripTable, key: F) -> Result<Mode<K>>
where
    K: Ord,
    F: Fn(&'a Trip) -> Option<K>,
{
    top_count(count_values(table.iter().filter_map(key)))
        .map(|(value, count)| Mode { value, count })
        .ok_or(StatsError::EmptyInput)
}
