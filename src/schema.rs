//! Per-city dataset properties, computed once from the unfiltered table.

use serde::Serialize;
use std::collections::BTreeSet;

use crate::trips::TripTable;

/// Optional columns that some cities never publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Column {
    Gender,
    BirthYear,
}

impl Column {
    /// Header name in the CSV export.
    pub fn header(self) -> &'static str {
        match self {
            Column::Gender => "Gender",
            Column::BirthYear => "Birth Year",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DatasetSchema {
    pub gender: Option<Column>,
    pub birth_year: Option<Column>,
    /// Sorted distinct months (1-12) present in the data set.
    pub available_months: Vec<u32>,
    /// Sorted distinct weekdays (0 = Monday) present in the data set.
    pub available_weekdays: Vec<u32>,
    pub row_count: usize,
}

impl DatasetSchema {
    /// Builds the schema for a freshly loaded table.
    ///
    /// `headers` are the raw CSV header names. An optional column only counts
    /// as present when its header exists and at least one row has a value.
    pub fn detect<S: AsRef<str>>(headers: &[S], table: &TripTable) -> Self {
        let has_header = |column: Column| {
            headers
                .iter()
                .any(|h| h.as_ref().trim() == column.header())
        };

        let gender = (has_header(Column::Gender)
            && table.iter().any(|t| t.record().gender.is_some()))
        .then_some(Column::Gender);

        let birth_year = (has_header(Column::BirthYear)
            && table.iter().any(|t| t.record().birth_year.is_some()))
        .then_some(Column::BirthYear);

        let months: BTreeSet<u32> = table.iter().map(|t| t.month()).collect();
        let weekdays: BTreeSet<u32> = table.iter().map(|t| t.weekday()).collect();

        DatasetSchema {
            gender,
            birth_year,
            available_months: months.into_iter().collect(),
            available_weekdays: weekdays.into_iter().collect(),
            row_count: table.len(),
        }
    }

    pub fn has(&self, column: Column) -> bool {
        match column {
            Column::Gender => self.gender.is_some(),
            Column::BirthYear => self.birth_year.is_some(),
        }
    }

    pub fn is_available_month(&self, month: u32) -> bool {
        self.available_months.contains(&month)
    }

    pub fn is_available_weekday(&self, weekday: u32) -> bool {
        self.available_weekdays.contains(&weekday)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trips::tests::record;

    fn table() -> TripTable {
        let mut with_gender = record("2017-03-06 09:00:00");
        with_gender.gender = Some("Male".to_string());
        TripTable::derive(vec![
            record("2017-01-01 10:00:00"),
            with_gender,
            record("2017-01-02 10:00:00"),
        ])
    }

    #[test]
    fn test_detect_domains() {
        let schema = DatasetSchema::detect(&["Start Time", "Gender"], &table());
        assert_eq!(schema.available_months, vec![1, 3]);
        assert_eq!(schema.available_weekdays, vec![0, 6]);
        assert_eq!(schema.row_count, 3);
        assert!(schema.is_available_month(3));
        assert!(!schema.is_available_month(2));
        assert!(schema.is_available_weekday(6));
        assert!(!schema.is_available_weekday(3));
    }

    #[test]
    fn test_detect_optional_columns() {
        let schema = DatasetSchema::detect(&["Start Time", "Gender", "Birth Year"], &table());
        assert_eq!(schema.gender, Some(Column::Gender));
        // header exists but no row carries a birth year
        assert_eq!(schema.birth_year, None);
        assert!(schema.has(Column::Gender));
        assert!(!schema.has(Column::BirthYear));
    }

    #[test]
    fn test_detect_missing_header() {
        let schema = DatasetSchema::detect(&["Start Time"], &table());
        assert_eq!(schema.gender, None);
    }
}
