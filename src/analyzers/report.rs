use crate::analyzers::demographics::{birth_year_stats, gender_counts, user_type_counts};
use crate::analyzers::duration::total_and_mean;
use crate::analyzers::frequency::{TemporalField, mode};
use crate::analyzers::stations::{most_common_end_station, most_common_pair, most_common_start_station};
use crate::analyzers::types::{AxisStat, StationStats, TimeStats, TripReport, UserStats};
use crate::error::{Result, StatsError};
use crate::filter::{FilterCriteria, MONTH_NAMES, MonthFilter, WEEKDAY_NAMES, WeekdayFilter};
use crate::schema::DatasetSchema;
use crate::trips::TripTable;

/// Busiest month, weekday and start hour of the working subset.
///
/// An axis that was filtered to a single value reports the number of trips
/// in that selection instead of a mode.
pub fn time_stats(table: &TripTable, criteria: &FilterCriteria) -> Result<TimeStats> {
    if table.is_empty() {
        return Err(StatsError::EmptyInput);
    }

    let month = match criteria.month {
        MonthFilter::All => {
            let m = mode(table, TemporalField::Month)?;
            AxisStat::MostCommon {
                value: m.value,
                name: MONTH_NAMES[(m.value - 1) as usize].to_string(),
                count: m.count,
            }
        }
        MonthFilter::Only(selected) => AxisStat::Selected {
            value: selected.number(),
            name: selected.name().to_string(),
            trips: table.len(),
        },
    };

    let weekday = match criteria.weekday {
        WeekdayFilter::All => {
            let d = mode(table, TemporalField::Weekday)?;
            AxisStat::MostCommon {
                value: d.value,
                name: WEEKDAY_NAMES[d.value as usize].to_string(),
                count: d.count,
            }
        }
        WeekdayFilter::Only(selected) => AxisStat::Selected {
            value: selected.number(),
            name: selected.name().to_string(),
            trips: table.len(),
        },
    };

    Ok(TimeStats {
        month,
        weekday,
        start_hour: mode(table, TemporalField::Hour)?,
    })
}

pub fn station_stats(table: &TripTable) -> Result<StationStats> {
    Ok(StationStats {
        start_station: most_common_start_station(table)?,
        end_station: most_common_end_station(table)?,
        trip: most_common_pair(table)?,
    })
}

pub fn user_stats(table: &TripTable, schema: &DatasetSchema) -> Result<UserStats> {
    if table.is_empty() {
        return Err(StatsError::EmptyInput);
    }

    Ok(UserStats {
        user_types: user_type_counts(table),
        gender: gender_counts(table, schema),
        birth_year: birth_year_stats(table, schema)?,
    })
}

/// Computes every statistic section over an already filtered subset.
///
/// `schema` must describe the full, unfiltered data set of `city`.
pub fn build_report(
    city: &str,
    subset: &TripTable,
    schema: &DatasetSchema,
    criteria: &FilterCriteria,
) -> Result<TripReport> {
    if subset.is_empty() {
        return Err(StatsError::EmptyInput);
    }

    Ok(TripReport {
        city: city.to_string(),
        filter: *criteria,
        trips: subset.len(),
        time: time_stats(subset, criteria)?,
        stations: station_stats(subset)?,
        duration: total_and_mean(subset)?,
        users: user_stats(subset, schema)?,
    })
}
