//! Total and mean trip duration.

use crate::analyzers::types::DurationStats;
use crate::error::{Result, StatsError};
use crate::trips::TripTable;

const SECONDS_PER_DAY: i64 = 86_400;

/// Sums and averages `duration_seconds`. Both values are truncated toward
/// zero, never rounded.
pub fn total_and_mean(table: &TripTable) -> Result<DurationStats> {
    if table.is_empty() {
        return Err(StatsError::EmptyInput);
    }

    let sum: f64 = table.iter().map(|trip| trip.record().duration_seconds).sum();
    let total_seconds = sum.trunc() as i64;
    let mean_seconds = (sum / table.len() as f64).trunc() as i64;

    Ok(DurationStats {
        total_seconds,
        mean_seconds,
        total_formatted: format_duration(total_seconds),
        mean_formatted: format_duration(mean_seconds),
    })
}

/// Renders seconds as `H:MM:SS`, prefixed with `N day(s), ` once the value
/// reaches a full day. Negative values borrow from the day count, so
/// `-10` is `-1 day, 23:59:50`.
pub fn format_duration(seconds: i64) -> String {
    let days = seconds.div_euclid(SECONDS_PER_DAY);
    let rest = seconds.rem_euclid(SECONDS_PER_DAY);
    let clock = format!("{}:{:02}:{:02}", rest / 3600, (rest % 3600) / 60, rest % 60);

    if days == 0 {
        clock
    } else {
        let plural = if days.abs() == 1 { "" } else { "s" };
        format!("{days} day{plural}, {clock}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trips::tests::record;

    fn table(durations: &[f64]) -> TripTable {
        TripTable::derive(durations.iter().map(|d| {
            let mut r = record("2017-01-01 10:00:00");
            r.duration_seconds = *d;
            r
        }))
    }

    #[test]
    fn test_total_and_mean() {
        let stats = total_and_mean(&table(&[10.0, 20.0, 30.0])).unwrap();
        assert_eq!(stats.total_seconds, 60);
        assert_eq!(stats.mean_seconds, 20);
        assert_eq!(stats.total_formatted, "0:01:00");
        assert_eq!(stats.mean_formatted, "0:00:20");
    }

    #[test]
    fn test_mean_truncates() {
        // total 31.9 -> 31, mean 15.95 -> 15
        let stats = total_and_mean(&table(&[10.4, 21.5])).unwrap();
        assert_eq!(stats.total_seconds, 31);
        assert_eq!(stats.mean_seconds, 15);

        let stats = total_and_mean(&table(&[1.0, 2.0])).unwrap();
        assert_eq!(stats.mean_seconds, 1);
    }

    #[test]
    fn test_empty_table() {
        assert!(matches!(
            total_and_mean(&TripTable::default()),
            Err(StatsError::EmptyInput)
        ));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0:00:00");
        assert_eq!(format_duration(59), "0:00:59");
        assert_eq!(format_duration(3_661), "1:01:01");
        assert_eq!(format_duration(86_399), "23:59:59");
        assert_eq!(format_duration(86_400), "1 day, 0:00:00");
        assert_eq!(format_duration(280_871_787), "3250 days, 19:56:27");
        assert_eq!(format_duration(-10), "-1 day, 23:59:50");
    }
}
