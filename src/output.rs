//! Text and JSON rendering of reports and raw row pages.
//!
//! Renderers return lines rather than printing, so the CLI decides where
//! they go and tests can inspect them.

use anyhow::Result;
use serde::Serialize;
use tracing::debug;

use crate::analyzers::types::{
    Availability, AxisStat, DurationStats, StationStats, TimeStats, TripReport, UserStats,
};
use crate::catalog::title_case;
use crate::filter::FilterCriteria;
use crate::pager::Page;
use crate::trips::Trip;

/// Serializes any report value as pretty JSON.
pub fn to_json(value: &impl Serialize) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Logs a report using Rust's debug pretty-print format.
pub fn print_pretty(report: &TripReport) {
    debug!("{:#?}", report);
}

pub fn header_lines(city: &str, criteria: &FilterCriteria) -> Vec<String> {
    vec![
        "*".repeat(80),
        "Query Result".to_string(),
        String::new(),
        format!("Filters applied - City: {} / {}", title_case(city), criteria),
        "*".repeat(80),
    ]
}

pub fn time_lines(stats: &TimeStats) -> Vec<String> {
    let mut lines = Vec::new();

    match &stats.month {
        AxisStat::MostCommon { name, .. } => {
            lines.push(format!("The most common month to travel is: {name}"));
        }
        AxisStat::Selected { name, trips, .. } => {
            lines.push(format!(
                "You selected a single month ({name}) so most common month is not calculated!"
            ));
            lines.push(format!("Number of trips in {name} is {trips}"));
        }
    }

    lines.push(String::new());
    match &stats.weekday {
        AxisStat::MostCommon { name, .. } => {
            lines.push(format!("The most common weekday to travel is: {name}"));
        }
        AxisStat::Selected { name, trips, .. } => {
            lines.push(format!(
                "You selected a single weekday ({name}) so most common weekday is not calculated!"
            ));
            lines.push(format!("Number of trips on a {name} is {trips}"));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "The most common hour to start a trip is: {}",
        stats.start_hour.value
    ));
    lines
}

pub fn station_lines(stats: &StationStats) -> Vec<String> {
    vec![
        format!(
            "The most used start station is {} with {} trips starting here.",
            stats.start_station.value, stats.start_station.count
        ),
        format!(
            "The most used end station is {} with {} trips ending here.",
            stats.end_station.value, stats.end_station.count
        ),
        format!(
            "The most common combination of Start and End station is: {} to {} ({} trips)",
            stats.trip.start_station, stats.trip.end_station, stats.trip.count
        ),
    ]
}

pub fn duration_lines(stats: &DurationStats) -> Vec<String> {
    vec![
        format!("Total travel time was: {}", stats.total_formatted),
        format!("Mean travel time was: {}", stats.mean_formatted),
    ]
}

pub fn user_lines(stats: &UserStats, city: &str) -> Vec<String> {
    let city = title_case(city);
    let mut lines = vec!["User Types:".to_string()];
    if stats.user_types.is_empty() {
        lines.push(format!("There is no user type data available for {city}!"));
    }
    for entry in &stats.user_types {
        lines.push(format!("  {}: {}", entry.value, entry.count));
    }

    lines.push(String::new());
    lines.push("Gender:".to_string());
    match &stats.gender {
        Availability::Available { stats } => {
            for entry in stats {
                lines.push(format!("  {}: {}", entry.value, entry.count));
            }
        }
        Availability::NoData { .. } => {
            lines.push(format!("There is no gender data available for {city}!"));
        }
        Availability::Empty { .. } => {
            lines.push("No trip in this selection has gender data.".to_string());
        }
    }

    lines.push(String::new());
    lines.push("Year of birth:".to_string());
    match &stats.birth_year {
        Availability::Available { stats } => {
            lines.push(format!("Oldest user was born: {}", stats.earliest));
            lines.push(format!("Youngest user was born: {}", stats.most_recent));
            lines.push(format!(
                "Most common year of birth is: {}",
                stats.most_common.value
            ));
        }
        Availability::NoData { .. } => {
            lines.push(format!("There is no birth year available for {city}!"));
        }
        Availability::Empty { .. } => {
            lines.push("No trip in this selection has a birth year.".to_string());
        }
    }
    lines
}

/// All sections of a report, separated the same way the interactive view is.
pub fn report_lines(report: &TripReport) -> Vec<String> {
    let mut lines = header_lines(&report.city, &report.filter);
    lines.push(format!("Trips analysed: {}", report.trips));

    let sections = [
        ("Most Frequent Times of Travel", time_lines(&report.time)),
        ("Most Popular Stations and Trip", station_lines(&report.stations)),
        ("Trip Duration", duration_lines(&report.duration)),
        ("User Stats", user_lines(&report.users, &report.city)),
    ];
    for (title, body) in sections {
        lines.push(String::new());
        lines.push(format!("{title}:"));
        lines.push(String::new());
        lines.extend(body);
        lines.push("-".repeat(40));
    }
    lines
}

pub fn format_row(index: usize, trip: &Trip) -> String {
    let r = trip.record();
    format!(
        "{:>6}  {}  {}  {:>8}  {} -> {}  {}  {}  {}",
        index,
        r.start_time.format("%Y-%m-%d %H:%M:%S"),
        r.end_time.as_deref().unwrap_or("-"),
        r.duration_seconds,
        r.start_station,
        r.end_station,
        r.user_type.as_deref().unwrap_or("-"),
        r.gender.as_deref().unwrap_or("-"),
        r.birth_year.map_or_else(|| "-".to_string(), |y| y.to_string()),
    )
}

pub fn page_lines(page: &Page<'_>) -> Vec<String> {
    let mut lines = Vec::new();
    if !page.rows.is_empty() {
        lines.push(format!(
            "Displaying rows {}-{} of {}:",
            page.start, page.cursor, page.total
        ));
        lines.extend(
            page.rows
                .iter()
                .enumerate()
                .map(|(offset, trip)| format_row(page.start + offset, trip)),
        );
    }
    if page.exhausted {
        lines.push("You have reached the end of the dataset!".to_string());
    }
    lines
}
