//! Result types produced by the aggregators.

use serde::Serialize;

use crate::filter::FilterCriteria;
use crate::schema::Column;

/// Most frequent value of a field and how often it occurs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mode<K> {
    pub value: K,
    pub count: usize,
}

/// Most frequent (start, end) station combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairMode {
    pub start_station: String,
    pub end_station: String,
    pub count: usize,
}

/// One entry of a count listing, e.g. `Subscriber: 238`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub value: String,
    pub count: usize,
}

/// Outcome for statistics over optional columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Availability<T> {
    Available { stats: T },
    /// The city never publishes this column.
    NoData { column: Column },
    /// The column exists but no trip in the working subset has a value.
    Empty { column: Column },
}

impl<T> Availability<T> {
    pub fn available(&self) -> Option<&T> {
        match self {
            Availability::Available { stats } => Some(stats),
            _ => None,
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, Availability::NoData { .. })
    }
}

/// Month or weekday statistic. When the axis was filtered to one value the
/// mode is meaningless, so the trip count for the selection is reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AxisStat {
    MostCommon {
        value: u32,
        name: String,
        count: usize,
    },
    Selected {
        value: u32,
        name: String,
        trips: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeStats {
    pub month: AxisStat,
    pub weekday: AxisStat,
    pub start_hour: Mode<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationStats {
    pub start_station: Mode<String>,
    pub end_station: Mode<String>,
    pub trip: PairMode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DurationStats {
    pub total_seconds: i64,
    pub mean_seconds: i64,
    pub total_formatted: String,
    pub mean_formatted: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BirthYearStats {
    pub earliest: i32,
    pub most_recent: i32,
    pub most_common: Mode<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserStats {
    pub user_types: Vec<CategoryCount>,
    pub gender: Availability<Vec<CategoryCount>>,
    pub birth_year: Availability<BirthYearStats>,
}

/// All four statistic sections for one city and filter selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripReport {
    pub city: String,
    pub filter: FilterCriteria,
    pub trips: usize,
    pub time: TimeStats,
    pub stations: StationStats,
    pub duration: DurationStats,
    pub users: UserStats,
}
