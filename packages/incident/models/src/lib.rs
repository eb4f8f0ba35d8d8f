#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Canonical SIGACT incident record types.
//!
//! An [`Incident`] is the normalized form of one row of the raw record
//! source. Every index and aggregate in the system is built from these
//! records, so the field defaults defined here are the single source of
//! truth for how missing classification text is represented.

use serde::{Deserialize, Serialize};

/// Fallback value for a missing or empty incident type.
pub const UNKNOWN_TYPE: &str = "Unknown";

/// Fallback value for every other missing or empty classification field.
pub const NOT_AVAILABLE: &str = "N/A";

/// Geographic position of an incident.
///
/// Coordinates are kept exactly as parsed. Non-numeric source text yields
/// `NaN` rather than rejecting the record, so consumers must tolerate
/// non-finite values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

impl Position {
    /// Returns `true` if both coordinates are finite numbers.
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

/// A single normalized incident event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    /// Where the incident occurred.
    pub position: Position,
    /// Canonical `YYYY-MM-DD` date.
    pub date: String,
    /// `HH:MM:SS` clock time, or empty if the source had none.
    pub time: String,
    /// Incident type (e.g. "Enemy Action").
    #[serde(rename = "type")]
    pub incident_type: String,
    /// Incident category within the type.
    pub category: String,
    /// Category of the attacked target.
    pub target_category: String,
    /// Attacked target.
    pub target: String,
    /// Type of force involved.
    pub force_type: String,
    /// City name.
    pub city: String,
    /// Province name.
    pub province: String,
}

/// Returns the trimmed `value`, or `fallback` when it is missing or blank.
#[must_use]
pub fn or_default(value: Option<&str>, fallback: &str) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(fallback)
        .to_owned()
}
