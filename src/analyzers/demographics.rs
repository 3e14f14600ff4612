//! Rider statistics: user types, gender and birth year.
//!
//! Gender and birth year are optional per city. Whether a city carries them
//! is decided by the [`DatasetSchema`] of the full data set, never by the
//! filtered subset handed in here.

use crate::analyzers::frequency::mode_by;
use crate::analyzers::types::{Availability, BirthYearStats, CategoryCount};
use crate::analyzers::utility::{count_values, ranked};
use crate::error::{Result, StatsError};
use crate::schema::{Column, DatasetSchema};
use crate::trips::TripTable;

fn category_counts<'a>(values: impl Iterator<Item = &'a str>) -> Vec<CategoryCount> {
    ranked(count_values(values))
        .into_iter()
        .map(|(value, count)| CategoryCount {
            value: value.to_string(),
            count,
        })
        .collect()
}

/// Trips per user type, busiest first. Trips without a user type are not counted.
pub fn user_type_counts(table: &TripTable) -> Vec<CategoryCount> {
    category_counts(table.iter().filter_map(|trip| trip.record().user_type.as_deref()))
}

/// Trips per gender, busiest first. Trips without a gender are not counted.
pub fn gender_counts(table: &TripTable, schema: &DatasetSchema) -> Availability<Vec<CategoryCount>> {
    let Some(column) = schema.gender else {
        return Availability::NoData {
            column: Column::Gender,
        };
    };

    let counts = category_counts(table.iter().filter_map(|trip| trip.record().gender.as_deref()));
    if counts.is_empty() {
        Availability::Empty { column }
    } else {
        Availability::Available { stats: counts }
    }
}

/// Earliest, most recent and most common birth year.
///
/// # Errors
///
/// [`StatsError::EmptyInput`] when the table has no trips at all.
pub fn birth_year_stats(
    table: &TripTable,
    schema: &DatasetSchema,
) -> Result<Availability<BirthYearStats>> {
    let Some(column) = schema.birth_year else {
        return Ok(Availability::NoData {
            column: Column::BirthYear,
        });
    };
    if table.is_empty() {
        return Err(StatsError::EmptyInput);
    }

    let years = || table.iter().filter_map(|trip| trip.record().birth_year);
    let (Some(earliest), Some(most_recent)) = (years().min(), years().max()) else {
        return Ok(Availability::Empty { column });
    };
    let most_common = mode_by(table, |trip| trip.record().birth_year)?;

    Ok(Availability::Available {
        stats: BirthYearStats {
            earliest,
            most_recent,
            most_common,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::types::Mode;
    use crate::trips::tests::record;

    fn rider(user_type: &str, gender: Option<&str>, birth_year: Option<i32>) -> crate::trips::TripRecord {
        let mut r = record("2017-02-01 07:00:00");
        r.user_type = Some(user_type.to_string());
        r.gender = gender.map(str::to_string);
        r.birth_year = birth_year;
        r
    }

    fn table() -> TripTable {
        TripTable::derive(vec![
            rider("Subscriber", Some("Male"), Some(1985)),
            rider("Customer", None, None),
            rider("Subscriber", Some("Female"), Some(1992)),
            rider("Subscriber", Some("Male"), Some(1992)),
            rider("Dependent", Some("Female"), Some(1939)),
            rider("Customer", None, Some(1985)),
        ])
    }

    fn full_schema() -> DatasetSchema {
        DatasetSchema::detect(&["Gender", "Birth Year"], &table())
    }

    #[test]
    fn test_user_type_counts() {
        let counts = user_type_counts(&table());
        let pairs: Vec<(&str, usize)> = counts.iter().map(|c| (c.value.as_str(), c.count)).collect();
        assert_eq!(pairs, vec![("Subscriber", 3), ("Customer", 2), ("Dependent", 1)]);
    }

    #[test]
    fn test_user_type_counts_skip_blank_cells() {
        let mut rows = vec![rider("Subscriber", None, None)];
        for _ in 0..3 {
            let mut blank = rider("Customer", None, None);
            blank.user_type = None;
            rows.push(blank);
        }
        let counts = user_type_counts(&TripTable::derive(rows));
        assert_eq!(counts, vec![CategoryCount { value: "Subscriber".to_string(), count: 1 }]);
    }

    #[test]
    fn test_gender_counts() {
        let result = gender_counts(&table(), &full_schema());
        let counts = result.available().unwrap();
        // tie between Female and Male resolves alphabetically
        assert_eq!(counts[0], CategoryCount { value: "Female".to_string(), count: 2 });
        assert_eq!(counts[1], CategoryCount { value: "Male".to_string(), count: 2 });
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_gender_missing_column_is_no_data() {
        let schema = DatasetSchema::detect(&["Start Time"], &table());
        let result = gender_counts(&table(), &schema);
        assert!(result.is_no_data());
        assert_eq!(result, Availability::NoData { column: Column::Gender });
    }

    #[test]
    fn test_gender_present_but_subset_has_none() {
        let subset = TripTable::derive(vec![rider("Customer", None, None)]);
        let result = gender_counts(&subset, &full_schema());
        assert_eq!(result, Availability::Empty { column: Column::Gender });
    }

    #[test]
    fn test_birth_year_stats() {
        let stats = birth_year_stats(&table(), &full_schema()).unwrap();
        assert_eq!(
            stats,
            Availability::Available {
                stats: BirthYearStats {
                    earliest: 1939,
                    most_recent: 1992,
                    // 1985 and 1992 both occur twice
                    most_common: Mode { value: 1985, count: 2 },
                }
            }
        );
    }

    #[test]
    fn test_birth_year_missing_column() {
        let schema = DatasetSchema::detect(&["Gender"], &table());
        let stats = birth_year_stats(&table(), &schema).unwrap();
        assert_eq!(stats, Availability::NoData { column: Column::BirthYear });
    }

    #[test]
    fn test_birth_year_empty_table() {
        let result = birth_year_stats(&TripTable::default(), &full_schema());
        assert!(matches!(result, Err(StatsError::EmptyInput)));
    }
}
