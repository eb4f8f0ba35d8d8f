#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the SIGACT map server.
//!
//! These types are serialized to JSON for the REST API. They are separate
//! from the in-memory record types to allow independent evolution of the
//! API contract.

use serde::{Deserialize, Serialize};
use sigact_map_analytics_models::{DatasetSummary, IncidentFilter};
use sigact_map_incident_models::Incident;

/// An incident as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiIncident {
    /// Latitude, or `null` if the source value was not a number.
    pub latitude: Option<f64>,
    /// Longitude, or `null` if the source value was not a number.
    pub longitude: Option<f64>,
    /// Canonical `YYYY-MM-DD` date.
    pub date: String,
    /// `HH:MM:SS` time, empty if unknown.
    pub time: String,
    /// Incident type.
    #[serde(rename = "type")]
    pub incident_type: String,
    /// Incident category.
    pub category: String,
    /// Target category.
    pub target_category: String,
    /// Target.
    pub target: String,
    /// Force type.
    pub force_type: String,
    /// City.
    pub city: String,
    /// Province.
    pub province: String,
}

impl From<&Incident> for ApiIncident {
    fn from(incident: &Incident) -> Self {
        let finite = |v: f64| v.is_finite().then_some(v);
        Self {
            latitude: finite(incident.position.latitude),
            longitude: finite(incident.position.longitude),
            date: incident.date.clone(),
            time: incident.time.clone(),
            incident_type: incident.incident_type.clone(),
            category: incident.category.clone(),
            target_category: incident.target_category.clone(),
            target: incident.target.clone(),
            force_type: incident.force_type.clone(),
            city: incident.city.clone(),
            province: incident.province.clone(),
        }
    }
}

/// Query parameters for the incidents endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentQueryParams {
    /// Canonical date to look up (required).
    pub date: Option<String>,
    /// Incident type filter (`"all"` disables it).
    #[serde(rename = "type")]
    pub incident_type: Option<String>,
    /// Category filter (`"all"` disables it).
    pub category: Option<String>,
    /// Province filter (`"all"` disables it).
    pub province: Option<String>,
}

impl From<&IncidentQueryParams> for IncidentFilter {
    fn from(p: &IncidentQueryParams) -> Self {
        Self {
            incident_type: p.incident_type.clone(),
            category: p.category.clone(),
            province: p.province.clone(),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

/// Dataset lifecycle response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiStatus {
    /// Lifecycle state (`not_loaded`, `loading`, `ready`, `failed`).
    pub state: String,
    /// Headline figures, once ready.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<DatasetSummary>,
    /// Failure message, if the load failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Error body returned for non-2xx responses.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Human-readable error message.
    pub error: String,
    /// Dataset lifecycle state, for `503` responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl ApiError {
    /// An error with no lifecycle state attached.
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            state: None,
        }
    }
}
