//! CLI entry point for the bikeshare statistics tool.
//!
//! Provides an interactive exploration session mirroring the classic
//! prompt-driven workflow, plus one-shot subcommands for reports, raw rows
//! and the city catalog.

mod interactive;

use anyhow::Result;
use bikeshare_stats::analyzers::report::build_report;
use bikeshare_stats::catalog::CityCatalog;
use bikeshare_stats::filter::{FilterCriteria, MonthFilter, WeekdayFilter, filter};
use bikeshare_stats::loader::LoadOutcome;
use bikeshare_stats::output::{page_lines, print_pretty, report_lines, to_json};
use bikeshare_stats::pager::{DEFAULT_PAGE_SIZE, next_page};
use bikeshare_stats::source::{fetch_table, source_for};
use bikeshare_stats::StatsError;
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::io::{BufReader, stdin, stdout};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bikeshare_stats")]
#[command(about = "Explore descriptive statistics of bike-share trip data", long_about = None)]
struct Cli {
    /// Directory holding the city CSV files (env: BIKESHARE_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// JSON file mapping city names to CSV paths or URLs (env: BIKESHARE_CITIES)
    #[arg(long, global = true)]
    cities: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive session: pick a city and filters, then browse statistics
    Explore,
    /// Print the statistics report for one city and filter selection
    Report {
        /// City name, e.g. "new york city"
        #[arg(short, long)]
        city: String,

        /// Month number 1-12, or "all"
        #[arg(short, long, default_value = "all")]
        month: String,

        /// Weekday number 0-6 (0 = Monday), or "all"
        #[arg(short, long, default_value = "all")]
        weekday: String,

        /// Emit JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print one page of raw trip rows
    Rows {
        #[arg(short, long)]
        city: String,

        #[arg(short, long, default_value = "all")]
        month: String,

        #[arg(short, long, default_value = "all")]
        weekday: String,

        /// 0-based row to start from
        #[arg(short, long, default_value_t = 0)]
        offset: usize,

        /// Rows per page
        #[arg(short = 'n', long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: usize,
    },
    /// List the configured cities and their data sources
    Cities,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let _file_guard = init_tracing()?;

    let cli = Cli::parse();
    let catalog = build_catalog(cli.data_dir, cli.cities)?;

    match cli.command {
        Commands::Explore => {
            let input = BufReader::new(stdin());
            let mut session = interactive::Session::new(input, stdout(), &catalog);
            session.run().await?;
        }
        Commands::Report {
            city,
            month,
            weekday,
            json,
        } => {
            let criteria = parse_criteria(&month, &weekday)?;
            let outcome = load_city(&catalog, &city).await?;
            let subset = filter(&outcome.table, &criteria);

            let report = build_report(&city, &subset, &outcome.schema, &criteria);
            if let Ok(report) = &report {
                print_pretty(report);
            }

            match report {
                Ok(report) if json => println!("{}", to_json(&report)?),
                Ok(report) => {
                    for line in report_lines(&report) {
                        println!("{line}");
                    }
                }
                Err(StatsError::EmptyInput) => {
                    warn!(%criteria, "No trips match the selected filters");
                    println!("{}", StatsError::EmptyInput);
                }
                Err(e) => return Err(e.into()),
            }
        }
        Commands::Rows {
            city,
            month,
            weekday,
            offset,
            page_size,
        } => {
            let criteria = parse_criteria(&month, &weekday)?;
            let outcome = load_city(&catalog, &city).await?;
            let subset = filter(&outcome.table, &criteria);

            let page = next_page(&subset, offset, page_size.max(1));
            for line in page_lines(&page) {
                println!("{line}");
            }
        }
        Commands::Cities => {
            for (city, location) in catalog.iter() {
                println!("{city}: {location}");
            }
        }
    }

    Ok(())
}

/// Colored stderr logging plus a JSON rolling log file.
fn init_tracing() -> Result<WorkerGuard> {
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/bikeshare_stats.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bikeshare_stats.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    Ok(file_guard)
}

/// Built-in cities under the data directory, or the JSON catalog if given.
fn build_catalog(data_dir: Option<PathBuf>, cities: Option<PathBuf>) -> Result<CityCatalog> {
    let data_dir = data_dir
        .or_else(|| std::env::var_os("BIKESHARE_DATA_DIR").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."));
    let cities = cities.or_else(|| std::env::var_os("BIKESHARE_CITIES").map(PathBuf::from));

    let catalog = match cities {
        Some(path) => {
            let mut catalog = CityCatalog::load(&path)?;
            catalog.resolve_relative(&data_dir);
            catalog
        }
        None => CityCatalog::with_data_dir(&data_dir),
    };
    Ok(catalog)
}

fn parse_criteria(month: &str, weekday: &str) -> Result<FilterCriteria> {
    Ok(FilterCriteria::new(
        MonthFilter::parse(month)?,
        WeekdayFilter::parse(weekday)?,
    ))
}

/// Resolves `city` in the catalog and loads its trip table.
#[tracing::instrument(skip(catalog))]
async fn load_city(catalog: &CityCatalog, city: &str) -> Result<LoadOutcome> {
    let location = catalog.location(city)?;
    let source = source_for(location)?;
    let outcome = fetch_table(source.as_ref()).await?;
    info!(
        rows = outcome.table.len(),
        rejected = outcome.rejected.total(),
        "City data ready"
    );
    Ok(outcome)
}
