#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Query and aggregation engine for loaded SIGACT data.
//!
//! Every function here is a pure read over an [`IncidentStore`]. None of
//! them mutate, none of them can fail, and results are computed fresh on
//! each call. Callers are expected to have obtained the store from a
//! ready [`sigact_map_ingest::dataset::Dataset`].
//!
//! [`IncidentStore`]: sigact_map_ingest::store::IncidentStore

pub mod aggregates;
pub mod lookups;

pub use aggregates::{heatmap, radar, treemap};
pub use lookups::{boundary, list_dates, list_metadata, lookup_incidents, summary};
