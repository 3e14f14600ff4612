//! Month / weekday narrowing of a trip table.
//!
//! User input is converted into [`MonthFilter`] and [`WeekdayFilter`] at the
//! boundary; past that point nothing compares raw strings.

use serde::Serialize;
use std::fmt;
use tracing::debug;

use crate::error::{Result, StatsError};
use crate::trips::{Trip, TripTable};

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Calendar month, 1 = January.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Month(u32);

impl Month {
    pub fn new(number: u32) -> Option<Self> {
        (1..=12).contains(&number).then_some(Month(number))
    }

    pub fn number(self) -> u32 {
        self.0
    }

    pub fn name(self) -> &'static str {
        MONTH_NAMES[(self.0 - 1) as usize]
    }
}

/// Day of week, 0 = Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Weekday(u32);

impl Weekday {
    pub fn new(number: u32) -> Option<Self> {
        (number <= 6).then_some(Weekday(number))
    }

    pub fn number(self) -> u32 {
        self.0
    }

    pub fn name(self) -> &'static str {
        WEEKDAY_NAMES[self.0 as usize]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthFilter {
    #[default]
    All,
    Only(Month),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekdayFilter {
    #[default]
    All,
    Only(Weekday),
}

impl MonthFilter {
    /// Parses `all` (any case) or a month number.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.eq_ignore_ascii_case("all") {
            return Ok(MonthFilter::All);
        }
        input
            .parse::<u32>()
            .ok()
            .and_then(Month::new)
            .map(MonthFilter::Only)
            .ok_or_else(|| StatsError::InvalidMonth(input.to_string()))
    }

    pub fn matches(self, month: u32) -> bool {
        match self {
            MonthFilter::All => true,
            MonthFilter::Only(m) => m.number() == month,
        }
    }

    /// Display label: the month name, or `All`.
    pub fn label(self) -> &'static str {
        match self {
            MonthFilter::All => "All",
            MonthFilter::Only(m) => m.name(),
        }
    }
}

impl WeekdayFilter {
    /// Parses `all` (any case) or a weekday number.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.eq_ignore_ascii_case("all") {
            return Ok(WeekdayFilter::All);
        }
        input
            .parse::<u32>()
            .ok()
            .and_then(Weekday::new)
            .map(WeekdayFilter::Only)
            .ok_or_else(|| StatsError::InvalidWeekday(input.to_string()))
    }

    pub fn matches(self, weekday: u32) -> bool {
        match self {
            WeekdayFilter::All => true,
            WeekdayFilter::Only(d) => d.number() == weekday,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WeekdayFilter::All => "All",
            WeekdayFilter::Only(d) => d.name(),
        }
    }
}

pub fn is_valid_month(input: &str) -> bool {
    MonthFilter::parse(input).is_ok()
}

pub fn is_valid_weekday(input: &str) -> bool {
    WeekdayFilter::parse(input).is_ok()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FilterCriteria {
    pub month: MonthFilter,
    pub weekday: WeekdayFilter,
}

impl FilterCriteria {
    pub fn new(month: MonthFilter, weekday: WeekdayFilter) -> Self {
        FilterCriteria { month, weekday }
    }

    pub fn accepts(&self, trip: &Trip) -> bool {
        self.month.matches(trip.month()) && self.weekday.matches(trip.weekday())
    }
}

impl fmt::Display for FilterCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Month: {} / Weekday: {}",
            self.month.label(),
            self.weekday.label()
        )
    }
}

/// Returns the trips matching `criteria`, in their original order.
///
/// An empty result is not an error.
pub fn filter(table: &TripTable, criteria: &FilterCriteria) -> TripTable {
    let subset: TripTable = table
        .iter()
        .filter(|trip| criteria.accepts(trip))
        .cloned()
        .collect();

    debug!(
        input = table.len(),
        output = subset.len(),
        %criteria,
        "Applied trip filter"
    );
    subset
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trips::tests::record;

    fn table() -> TripTable {
        TripTable::derive(vec![
            record("2017-01-02 08:00:00"), // Jan, Monday
            record("2017-02-06 09:00:00"), // Feb, Monday
            record("2017-01-03 10:00:00"), // Jan, Tuesday
            record("2017-02-07 11:00:00"), // Feb, Tuesday
            record("2017-01-09 12:00:00"), // Jan, Monday
        ])
    }

    fn hours(table: &TripTable) -> Vec<u32> {
        table.iter().map(Trip::hour).collect()
    }

    #[test]
    fn test_all_all_returns_input() {
        let t = table();
        assert_eq!(filter(&t, &FilterCriteria::default()), t);
    }

    #[test]
    fn test_filter_by_month() {
        let criteria = FilterCriteria::new(MonthFilter::parse("1").unwrap(), WeekdayFilter::All);
        assert_eq!(hours(&filter(&table(), &criteria)), vec![8, 10, 12]);
    }

    #[test]
    fn test_filter_by_weekday() {
        let criteria = FilterCriteria::new(MonthFilter::All, WeekdayFilter::parse("1").unwrap());
        assert_eq!(hours(&filter(&table(), &criteria)), vec![10, 11]);
    }

    #[test]
    fn test_filter_by_both_is_stable_subset() {
        let t = table();
        let criteria = FilterCriteria::new(
            MonthFilter::parse("1").unwrap(),
            WeekdayFilter::parse("0").unwrap(),
        );
        let out = filter(&t, &criteria);
        assert!(out.iter().all(|trip| trip.month() == 1 && trip.weekday() == 0));
        let expected: Vec<u32> = t
            .iter()
            .filter(|trip| trip.month() == 1 && trip.weekday() == 0)
            .map(Trip::hour)
            .collect();
        assert_eq!(hours(&out), expected);
    }

    #[test]
    fn test_no_match_is_empty_table() {
        let criteria = FilterCriteria::new(MonthFilter::parse("6").unwrap(), WeekdayFilter::All);
        assert!(filter(&table(), &criteria).is_empty());
    }

    #[test]
    fn test_parse_filters() {
        assert_eq!(MonthFilter::parse("ALL").unwrap(), MonthFilter::All);
        assert_eq!(MonthFilter::parse(" 12 ").unwrap().label(), "December");
        assert!(matches!(
            MonthFilter::parse("13"),
            Err(StatsError::InvalidMonth(_))
        ));
        assert!(matches!(
            MonthFilter::parse("0"),
            Err(StatsError::InvalidMonth(_))
        ));
        assert_eq!(WeekdayFilter::parse("6").unwrap().label(), "Sunday");
        assert!(matches!(
            WeekdayFilter::parse("7"),
            Err(StatsError::InvalidWeekday(_))
        ));
    }

    #[test]
    fn test_validators() {
        assert!(is_valid_month("all"));
        assert!(is_valid_month("1"));
        assert!(!is_valid_month("january"));
        assert!(is_valid_weekday("0"));
        assert!(!is_valid_weekday("-1"));
        assert!(!is_valid_weekday(""));
    }

    #[test]
    fn test_criteria_display() {
        let criteria = FilterCriteria::new(MonthFilter::parse("3").unwrap(), WeekdayFilter::All);
        assert_eq!(criteria.to_string(), "Month: March / Weekday: All");
    }
}
