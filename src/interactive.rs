//! Prompt-driven exploration session.
//!
//! All input validation loops live here; the library only exposes the pure
//! parsers and validators they call.

use anyhow::Result;
use bikeshare_stats::StatsError;
use bikeshare_stats::analyzers::duration::total_and_mean;
use bikeshare_stats::analyzers::report::{station_stats, time_stats, user_stats};
use bikeshare_stats::catalog::CityCatalog;
use bikeshare_stats::filter::{FilterCriteria, MonthFilter, WeekdayFilter, filter};
use bikeshare_stats::output::{
    duration_lines, header_lines, page_lines, station_lines, time_lines, user_lines,
};
use bikeshare_stats::pager::RawRowPager;
use bikeshare_stats::schema::DatasetSchema;
use bikeshare_stats::trips::TripTable;
use std::io::{BufRead, Write};
use std::time::Instant;
use tracing::{error, info};

use crate::load_city;

pub struct Session<'a, R, W> {
    input: R,
    output: W,
    catalog: &'a CityCatalog,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(input: R, output: W, catalog: &'a CityCatalog) -> Self {
        Self {
            input,
            output,
            catalog,
        }
    }

    /// Runs sessions until the user declines to restart or input ends.
    pub async fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.output, "Hello! Let's explore some US bikeshare data!")?;

            let Some(city) = self.prompt_city()? else {
                return Ok(());
            };

            match load_city(self.catalog, &city).await {
                Ok(outcome) => {
                    if !self.explore_city(&city, &outcome.table, &outcome.schema)? {
                        return Ok(());
                    }
                }
                Err(e) => {
                    error!(city = %city, error = %e, "Failed to load city data");
                    writeln!(self.output, "Could not load data for {city}: {e}")?;
                }
            }

            if !self.confirm("\nWould you like to restart? Enter yes or no.\n")? {
                info!("Session finished");
                return Ok(());
            }
        }
    }

    /// Filters, reports and pages one city's table. Returns `false` when the
    /// input ended mid-way.
    fn explore_city(&mut self, city: &str, table: &TripTable, schema: &DatasetSchema) -> Result<bool> {
        let Some(month) = self.prompt_month(schema)? else {
            return Ok(false);
        };
        let Some(weekday) = self.prompt_weekday(schema)? else {
            return Ok(false);
        };
        writeln!(self.output, "{}", "-".repeat(80))?;

        let criteria = FilterCriteria::new(month, weekday);
        let subset = filter(table, &criteria);
        if subset.is_empty() {
            writeln!(self.output, "{}", StatsError::EmptyInput)?;
            return Ok(true);
        }

        self.show_statistics(city, &subset, schema, &criteria)?;
        self.browse_rows(&subset)?;
        Ok(true)
    }

    fn show_statistics(
        &mut self,
        city: &str,
        subset: &TripTable,
        schema: &DatasetSchema,
        criteria: &FilterCriteria,
    ) -> Result<()> {
        self.write_lines(&header_lines(city, criteria))?;

        let started = Instant::now();
        let lines = time_lines(&time_stats(subset, criteria)?);
        self.section("The Most Frequent Times of Travel", &lines, started)?;

        let started = Instant::now();
        let lines = station_lines(&station_stats(subset)?);
        self.section("The Most Popular Stations and Trip", &lines, started)?;

        let started = Instant::now();
        let lines = duration_lines(&total_and_mean(subset)?);
        self.section("Trip Duration", &lines, started)?;

        let started = Instant::now();
        let lines = user_lines(&user_stats(subset, schema)?, city);
        self.section("User Stats", &lines, started)?;
        Ok(())
    }

    fn section(&mut self, title: &str, lines: &[String], started: Instant) -> Result<()> {
        writeln!(self.output, "\nCalculating {title}...\n")?;
        self.write_lines(lines)?;
        writeln!(
            self.output,
            "\nThis took {} seconds.",
            started.elapsed().as_secs_f64()
        )?;
        writeln!(self.output, "{}", "-".repeat(40))?;
        Ok(())
    }

    fn browse_rows(&mut self, subset: &TripTable) -> Result<()> {
        if !self.confirm("\nDo you want to scroll through the raw data? (Yes/No): \n")? {
            return Ok(());
        }

        let mut pager = RawRowPager::default();
        loop {
            let page = pager.next_page(subset);
            let exhausted = page.exhausted;
            self.write_lines(&page_lines(&page))?;
            if exhausted || !self.confirm("\nDo you want to see five more rows? (Yes/No): \n")? {
                return Ok(());
            }
        }
    }

    fn prompt_city(&mut self) -> Result<Option<String>> {
        let names = self.catalog.display_names();
        let catalog = self.catalog;
        self.ask_until(
            &format!("Select one of these available cities ({names}): "),
            &format!("You can only select one of these available cities ({names}): "),
            |answer| catalog.contains(answer).then(|| answer.trim().to_lowercase()),
        )
    }

    fn prompt_month(&mut self, schema: &DatasetSchema) -> Result<Option<MonthFilter>> {
        let months = list(&schema.available_months);
        self.ask_until(
            &format!("Select one of these months {months}, or 'All' for no filter: "),
            &format!("You can only select one of these available months {months}, or 'All': "),
            |answer| match MonthFilter::parse(answer) {
                Ok(MonthFilter::Only(m)) if !schema.is_available_month(m.number()) => None,
                parsed => parsed.ok(),
            },
        )
    }

    fn prompt_weekday(&mut self, schema: &DatasetSchema) -> Result<Option<WeekdayFilter>> {
        let weekdays = list(&schema.available_weekdays);
        self.ask_until(
            &format!("Select one of these weekdays {weekdays}, or 'All' for no filter: "),
            &format!("You can only select one of these available weekdays {weekdays}, or 'All': "),
            |answer| match WeekdayFilter::parse(answer) {
                Ok(WeekdayFilter::Only(d)) if !schema.is_available_weekday(d.number()) => None,
                parsed => parsed.ok(),
            },
        )
    }

    /// Re-prompts until `accept` yields a value. `None` means input ended.
    fn ask_until<T>(
        &mut self,
        prompt: &str,
        retry: &str,
        accept: impl Fn(&str) -> Option<T>,
    ) -> Result<Option<T>> {
        let mut current = prompt;
        loop {
            let Some(answer) = self.ask(current)? else {
                return Ok(None);
            };
            if let Some(value) = accept(&answer) {
                return Ok(Some(value));
            }
            current = retry;
        }
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        Ok(self
            .ask(prompt)?
            .is_some_and(|answer| answer.eq_ignore_ascii_case("yes")))
    }

    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn write_lines(&mut self, lines: &[String]) -> Result<()> {
        for line in lines {
            writeln!(self.output, "{line}")?;
        }
        Ok(())
    }
}

/// Renders `[1 2 3]`, the form the prompts show available values in.
fn list(values: &[u32]) -> String {
    let joined: Vec<String> = values.iter().map(u32::to_string).collect();
    format!("[{}]", joined.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bikeshare_stats::loader::load_trips;
    use std::io::Cursor;

    const CSV: &str = "\
Start Time,Trip Duration,Start Station,End Station,User Type
2017-01-02 08:00:00,100,A,B,Subscriber
2017-01-03 09:00:00,200,B,A,Customer
2017-03-06 10:00:00,300,A,B,Subscriber
2017-03-07 11:00:00,400,C,A,Subscriber
2017-03-08 12:00:00,500,A,C,Customer
2017-03-09 13:00:00,600,A,B,Subscriber
2017-03-10 14:00:00,700,B,C,Subscriber
";

    fn session<'a>(input: &str, catalog: &'a CityCatalog) -> Session<'a, Cursor<Vec<u8>>, Vec<u8>> {
        Session::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), catalog)
    }

    fn written(session: Session<'_, Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(session.output).unwrap()
    }

    #[test]
    fn test_prompt_city_retries_until_known() {
        let catalog = CityCatalog::default();
        let mut s = session("boston\n  Chicago \n", &catalog);
        assert_eq!(s.prompt_city().unwrap().as_deref(), Some("chicago"));
        assert!(written(s).contains("You can only select one of these available cities"));
    }

    #[test]
    fn test_prompt_month_only_offers_available_months() {
        let catalog = CityCatalog::default();
        let outcome = load_trips(CSV.as_bytes()).unwrap();
        // 2 is a valid month but absent from the data
        let mut s = session("2\nfeb\n3\n", &catalog);
        let month = s.prompt_month(&outcome.schema).unwrap();
        assert_eq!(month, Some(MonthFilter::parse("3").unwrap()));
        assert!(written(s).contains("Select one of these months [1 3], or 'All' for no filter: "));
    }

    #[test]
    fn test_prompt_weekday_all() {
        let catalog = CityCatalog::default();
        let outcome = load_trips(CSV.as_bytes()).unwrap();
        let mut s = session("ALL\n", &catalog);
        assert_eq!(s.prompt_weekday(&outcome.schema).unwrap(), Some(WeekdayFilter::All));
    }

    #[test]
    fn test_end_of_input_stops_prompting() {
        let catalog = CityCatalog::default();
        let mut s = session("", &catalog);
        assert_eq!(s.prompt_city().unwrap(), None);
        assert!(!s.confirm("again? ").unwrap());
    }

    #[test]
    fn test_explore_city_prints_sections_and_pages() {
        let catalog = CityCatalog::default();
        let outcome = load_trips(CSV.as_bytes()).unwrap();
        let mut s = session("all\nall\nyes\nyes\n", &catalog);

        assert!(s.explore_city("chicago", &outcome.table, &outcome.schema).unwrap());
        let out = written(s);
        assert!(out.contains("The most common month to travel is: March"));
        assert!(out.contains("There is no gender data available for Chicago!"));
        assert!(out.contains("Displaying rows 0-5 of 7:"));
        assert!(out.contains("Displaying rows 5-7 of 7:"));
        assert!(out.contains("You have reached the end of the dataset!"));
    }

    #[test]
    fn test_explore_city_reports_empty_selection() {
        let catalog = CityCatalog::default();
        let outcome = load_trips(CSV.as_bytes()).unwrap();
        // January has no Friday trips in this data
        let mut s = session("1\n4\n", &catalog);

        assert!(s.explore_city("chicago", &outcome.table, &outcome.schema).unwrap());
        assert!(written(s).contains("not enough data for this filter combination"));
    }
}
