//! CSV loading of a city's trip table.

use csv::{ErrorKind, ReaderBuilder, Trim};
use flate2::read::GzDecoder;
use serde::Serialize;
use std::io::Read;
use tracing::{debug, info, warn};

use crate::error::{Result, StatsError};
use crate::schema::DatasetSchema;
use crate::trips::{RawTrip, TripRecord, TripTable};

const REQUIRED_HEADERS: &[&str] = &[
    "Start Time",
    "Trip Duration",
    "Start Station",
    "End Station",
    "User Type",
];

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Rows dropped while loading, by reason.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RejectedRows {
    pub invalid_timestamp: usize,
    pub invalid_duration: usize,
    pub malformed: usize,
}

impl RejectedRows {
    pub fn total(&self) -> usize {
        self.invalid_timestamp + self.invalid_duration + self.malformed
    }
}

#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub table: TripTable,
    pub schema: DatasetSchema,
    pub rejected: RejectedRows,
}

/// Reads a trip CSV, skipping rows that cannot be typed.
///
/// # Errors
///
/// Fails when a required header is missing or the reader itself fails.
/// Bad individual rows are only counted in [`LoadOutcome::rejected`].
#[tracing::instrument(skip_all)]
pub fn load_trips<R: Read>(reader: R) -> Result<LoadOutcome> {
    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    if let Some(missing) = REQUIRED_HEADERS
        .iter()
        .find(|required| !headers.iter().any(|h| h == *required))
    {
        return Err(StatsError::MissingHeader(missing.to_string()));
    }

    let mut records = Vec::new();
    let mut rejected = RejectedRows::default();

    for (row, result) in rdr.deserialize::<RawTrip>().enumerate() {
        let raw = match result {
            Ok(raw) => raw,
            Err(e) if is_row_error(&e) => {
                debug!(row, error = %e, "Skipping malformed row");
                rejected.malformed += 1;
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        match TripRecord::from_raw(row, raw) {
            Ok(record) => records.push(record),
            Err(e @ StatsError::InvalidTimestamp { .. }) => {
                debug!(error = %e, "Skipping row");
                rejected.invalid_timestamp += 1;
            }
            Err(e @ StatsError::InvalidDuration { .. }) => {
                debug!(error = %e, "Skipping row");
                rejected.invalid_duration += 1;
            }
            Err(e) => return Err(e),
        }
    }

    let table = TripTable::derive(records);
    let schema = DatasetSchema::detect(&headers, &table);

    if rejected.total() > 0 {
        warn!(
            invalid_timestamp = rejected.invalid_timestamp,
            invalid_duration = rejected.invalid_duration,
            malformed = rejected.malformed,
            "Rows rejected while loading"
        );
    }
    info!(
        rows = table.len(),
        gender = schema.gender.is_some(),
        birth_year = schema.birth_year.is_some(),
        "Trip table loaded"
    );

    Ok(LoadOutcome {
        table,
        schema,
        rejected,
    })
}

/// Like [`load_trips`], transparently inflating gzip payloads.
pub fn load_bytes(bytes: &[u8]) -> Result<LoadOutcome> {
    if bytes.starts_with(&GZIP_MAGIC) {
        debug!(compressed = bytes.len(), "Inflating gzip payload");
        load_trips(GzDecoder::new(bytes))
    } else {
        load_trips(bytes)
    }
}

fn is_row_error(e: &csv::Error) -> bool {
    matches!(
        e.kind(),
        ErrorKind::Deserialize { .. } | ErrorKind::Utf8 { .. } | ErrorKind::UnequalLengths { .. }
    )
}
