//! Trip records and the calendar fields derived from their start time.

use chrono::{DateTime, Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StatsError};

const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// A single row deserialized from a city's trip CSV.
///
/// Every cell is kept as text here; [`TripRecord::from_raw`] does the typing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTrip {
    #[serde(rename = "Start Time")]
    pub start_time: String,
    #[serde(rename = "End Time", default)]
    pub end_time: Option<String>,
    #[serde(rename = "Trip Duration", default)]
    pub trip_duration: Option<String>,
    #[serde(rename = "Start Station", default)]
    pub start_station: String,
    #[serde(rename = "End Station", default)]
    pub end_station: String,
    #[serde(rename = "User Type", default)]
    pub user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    pub gender: Option<String>,
    #[serde(rename = "Birth Year", default)]
    pub birth_year: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripRecord {
    pub start_time: NaiveDateTime,
    pub end_time: Option<String>,
    pub duration_seconds: f64,
    pub start_station: String,
    pub end_station: String,
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,
}

impl TripRecord {
    /// Types a raw CSV row. `row` is the 0-based data row index, used in errors.
    pub fn from_raw(row: usize, raw: RawTrip) -> Result<Self> {
        let start_time =
            parse_timestamp(&raw.start_time).ok_or_else(|| StatsError::InvalidTimestamp {
                row,
                value: raw.start_time.clone(),
            })?;

        let duration_text = raw.trip_duration.unwrap_or_default();
        let duration_seconds = match duration_text.trim().parse::<f64>() {
            Ok(d) if d.is_finite() && d >= 0.0 => d,
            _ => {
                return Err(StatsError::InvalidDuration {
                    row,
                    value: duration_text,
                });
            }
        };

        Ok(TripRecord {
            start_time,
            end_time: non_empty(raw.end_time),
            duration_seconds,
            start_station: raw.start_station,
            end_station: raw.end_station,
            user_type: non_empty(raw.user_type),
            gender: non_empty(raw.gender),
            // Exports store birth years as floats ("1992.0").
            birth_year: non_empty(raw.birth_year).and_then(|y| parse_birth_year(&y)),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Years outside the `i32` range are treated as missing, not clamped.
fn parse_birth_year(value: &str) -> Option<i32> {
    let year = value.trim().parse::<f64>().ok()?.trunc();
    if year.is_finite() && year >= f64::from(i32::MIN) && year <= f64::from(i32::MAX) {
        Some(year as i32)
    } else {
        None
    }
}

/// Parses a start/end timestamp as wall-clock time.
///
/// Offsets in RFC 3339 input are kept as-is, never converted to UTC.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }

    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

/// Calendar fields computed from a trip's start time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DerivedFields {
    /// 1 = January .. 12 = December
    pub month: u32,
    /// 0 = Monday .. 6 = Sunday
    pub weekday: u32,
    pub hour: u32,
}

impl DerivedFields {
    pub fn from_start_time(start: &NaiveDateTime) -> Self {
        DerivedFields {
            month: start.month(),
            weekday: start.weekday().num_days_from_monday(),
            hour: start.hour(),
        }
    }
}

/// A trip together with its derived fields.
///
/// The derived fields can only be produced from the record itself, so they
/// never drift from `start_time`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trip {
    #[serde(flatten)]
    record: TripRecord,
    #[serde(flatten)]
    derived: DerivedFields,
}

impl Trip {
    pub fn new(record: TripRecord) -> Self {
        let derived = DerivedFields::from_start_time(&record.start_time);
        Trip { record, derived }
    }

    pub fn record(&self) -> &TripRecord {
        &self.record
    }

    pub fn derived(&self) -> DerivedFields {
        self.derived
    }

    pub fn month(&self) -> u32 {
        self.derived.month
    }

    pub fn weekday(&self) -> u32 {
        self.derived.weekday
    }

    pub fn hour(&self) -> u32 {
        self.derived.hour
    }
}

/// Trips in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TripTable {
    trips: Vec<Trip>,
}

impl TripTable {
    /// Attaches derived fields to every record, keeping input order.
    pub fn derive(records: impl IntoIterator<Item = TripRecord>) -> Self {
        TripTable {
            trips: records.into_iter().map(Trip::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Trip> {
        self.trips.iter()
    }

    pub fn as_slice(&self) -> &[Trip] {
        &self.trips
    }
}

impl FromIterator<Trip> for TripTable {
    fn from_iter<I: IntoIterator<Item = Trip>>(iter: I) -> Self {
        TripTable {
            trips: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a TripTable {
    type Item = &'a Trip;
    type IntoIter = std::slice::Iter<'a, Trip>;

    fn into_iter(self) -> Self::IntoIter {
        self.trips.iter()
    }
}
