#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Ingestion pipeline for SIGACT incident data.
//!
//! Reads the delimited record source once, normalizes every row into an
//! [`Incident`], and builds the in-memory [`IncidentStore`] that all
//! queries run against. The [`dataset::Dataset`] handle wraps a store in
//! its load lifecycle.

pub mod boundary;
pub mod columns;
pub mod dataset;
pub mod parsing;
pub mod store;

use std::io::Read;
use std::path::Path;
use std::time::Instant;

use csv::StringRecord;
use sigact_map_incident_models::{Incident, NOT_AVAILABLE, Position, UNKNOWN_TYPE, or_default};

use crate::boundary::{Boundary, load_boundary};
use crate::columns::{ColumnMap, Field};
use crate::parsing::{normalize_date, parse_coordinate, split_timestamp};
use crate::store::{IncidentStore, IncidentStoreBuilder};

/// Errors that abort a load.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The record source could not be opened or read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The record source is not a readable delimited stream.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The dataset has already been loaded (or is loading).
    #[error("Dataset load already started")]
    AlreadyStarted,
}

/// Options controlling how the record source is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Field delimiter byte.
    pub delimiter: u8,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

/// Parses a delimiter setting. Accepts a single ASCII character, or `\t`
/// spelled out.
#[must_use]
pub fn parse_delimiter(raw: &str) -> Option<u8> {
    match raw {
        "\\t" | "\t" => Some(b'\t'),
        s if s.len() == 1 && s.is_ascii() => s.bytes().next(),
        _ => None,
    }
}

/// Normalizes one source row into an [`Incident`].
#[must_use]
pub fn normalize_record(columns: &ColumnMap, record: &StringRecord) -> Incident {
    let timestamp = columns.get(record, Field::Timestamp).unwrap_or("");
    let (date, time) = split_timestamp(timestamp);
    let field = |f: Field| or_default(columns.get(record, f), NOT_AVAILABLE);

    Incident {
        position: Position {
            latitude: parse_coordinate(columns.get(record, Field::Latitude)),
            longitude: parse_coordinate(columns.get(record, Field::Longitude)),
        },
        date: normalize_date(date),
        time: time.to_owned(),
        incident_type: or_default(columns.get(record, Field::Type), UNKNOWN_TYPE),
        category: field(Field::Category),
        target_category: field(Field::TargetCategory),
        target: field(Field::Target),
        force_type: field(Field::ForceType),
        city: field(Field::City),
        province: field(Field::Province),
    }
}

/// Reads every record from `reader` into a builder.
///
/// # Errors
///
/// Returns [`LoadError`] if the stream cannot be read or is not a valid
/// delimited file.
pub fn read_records<R: Read>(
    reader: R,
    options: &LoadOptions,
) -> Result<IncidentStoreBuilder, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .flexible(true)
        .from_reader(reader);

    let columns = ColumnMap::from_headers(reader.headers()?);
    let missing = columns.missing();
    if !missing.is_empty() {
        log::warn!("Record source has no column for {missing:?}, using defaults");
    }

    let mut builder = IncidentStoreBuilder::new();
    let mut record = StringRecord::new();
    while reader.read_record(&mut record)? {
        builder.push(normalize_record(&columns, &record));
    }

    Ok(builder)
}

/// Builds a complete store from a record stream and an already-loaded
/// boundary.
///
/// # Errors
///
/// Returns [`LoadError`] if the record stream cannot be read.
pub fn load_from_reader<R: Read>(
    reader: R,
    boundary: Option<Boundary>,
    options: &LoadOptions,
) -> Result<IncidentStore, LoadError> {
    Ok(read_records(reader, options)?.finish(boundary))
}

/// Builds a complete store from the record file at `records` and the
/// optional boundary file at `boundary`.
///
/// The boundary is best-effort: see [`load_boundary`].
///
/// # Errors
///
/// Returns [`LoadError`] if the record file cannot be opened or read.
pub fn load_from_path(
    records: &Path,
    boundary: Option<&Path>,
    options: &LoadOptions,
) -> Result<IncidentStore, LoadError> {
    let start = Instant::now();
    log::info!("Loading incidents from {}...", records.display());

    let file = std::fs::File::open(records).inspect_err(|e| {
        log::error!("Failed to open record source {}: {e}", records.display());
    })?;
    let builder = read_records(std::io::BufReader::new(file), options).inspect_err(|e| {
        log::error!("Failed to read record source {}: {e}", records.display());
    })?;

    let boundary = boundary.and_then(load_boundary);
    let store = builder.finish(boundary);

    log::info!(
        "Loaded {} incidents across {} dates in {:.2?}",
        store.len(),
        store.dates().len(),
        start.elapsed()
    );

    Ok(store)
}
