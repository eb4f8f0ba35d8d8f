//! The immutable in-memory incident store.
//!
//! An [`IncidentStore`] is one generation of loaded data: an arena of
//! [`Incident`]s in source order plus the indexes built over it. It is
//! assembled by an [`IncidentStoreBuilder`] during a single ingestion pass
//! and never mutated afterwards, so any number of readers may share a
//! reference to it without synchronization.

use std::collections::{BTreeSet, HashMap};

use sigact_map_incident_models::Incident;

use crate::boundary::Boundary;
use crate::parsing::sort_by_calendar;

/// One loaded generation of incidents and their indexes.
#[derive(Debug, Default)]
pub struct IncidentStore {
    incidents: Vec<Incident>,
    /// Date key to arena positions, in source order.
    by_date: HashMap<String, Vec<usize>>,
    /// Distinct date keys, ascending by calendar value.
    dates: Vec<String>,
    types: BTreeSet<String>,
    categories: BTreeSet<String>,
    provinces: BTreeSet<String>,
    boundary: Option<Boundary>,
}

impl IncidentStore {
    /// All incidents in source-file order.
    #[must_use]
    pub fn incidents(&self) -> &[Incident] {
        &self.incidents
    }

    /// Number of loaded incidents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.incidents.len()
    }

    /// Returns `true` if no incidents were loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.incidents.is_empty()
    }

    /// Distinct date keys, ascending by calendar value.
    #[must_use]
    pub fn dates(&self) -> &[String] {
        &self.dates
    }

    /// Incidents recorded on `date`, in source order. Empty for unknown
    /// dates.
    pub fn on_date<'a>(&'a self, date: &str) -> impl Iterator<Item = &'a Incident> + use<'a> {
        self.by_date
            .get(date)
            .into_iter()
            .flatten()
            .map(move |&idx| &self.incidents[idx])
    }

    /// Distinct incident types, lexically sorted.
    #[must_use]
    pub const fn types(&self) -> &BTreeSet<String> {
        &self.types
    }

    /// Distinct incident categories, lexically sorted.
    #[must_use]
    pub const fn categories(&self) -> &BTreeSet<String> {
        &self.categories
    }

    /// Distinct provinces, lexically sorted.
    #[must_use]
    pub const fn provinces(&self) -> &BTreeSet<String> {
        &self.provinces
    }

    /// The boundary document, if one was loaded.
    #[must_use]
    pub const fn boundary(&self) -> Option<&Boundary> {
        self.boundary.as_ref()
    }
}

/// Accumulates incidents during ingestion and finalizes them into an
/// [`IncidentStore`].
#[derive(Debug, Default)]
pub struct IncidentStoreBuilder {
    store: IncidentStore,
}

impl IncidentStoreBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an incident and indexes it under its (already normalized)
    /// date.
    pub fn push(&mut self, incident: Incident) {
        let store = &mut self.store;
        let idx = store.incidents.len();

        store
            .by_date
            .entry(incident.date.clone())
            .or_default()
            .push(idx);

        if !store.types.contains(&incident.incident_type) {
            store.types.insert(incident.incident_type.clone());
        }
        if !store.categories.contains(&incident.category) {
            store.categories.insert(incident.category.clone());
        }
        if !store.provinces.contains(&incident.province) {
            store.provinces.insert(incident.province.clone());
        }

        store.incidents.push(incident);
    }

    /// Sorts the date list and attaches the boundary document, producing
    /// the finished store.
    #[must_use]
    pub fn finish(self, boundary: Option<Boundary>) -> IncidentStore {
        let mut store = self.store;

        let mut dates: Vec<String> = store.by_date.keys().cloned().collect();
        sort_by_calendar(&mut dates, String::as_str);

        store.dates = dates;
        store.boundary = boundary;
        store
    }
}

impl FromIterator<Incident> for IncidentStore {
    fn from_iter<I: IntoIterator<Item = Incident>>(iter: I) -> Self {
        let mut builder = IncidentStoreBuilder::new();
        for incident in iter {
            builder.push(incident);
        }
        builder.finish(None)
    }
}

#[cfg(test)]
mod tests {
    use sigact_map_incident_models::{NOT_AVAILABLE, Position};

    use super::*;

    fn incident(date: &str, incident_type: &str, province: &str) -> Incident {
        Incident {
            position: Position {
                latitude: 34.0,
                longitude: 69.0,
            },
            date: date.to_owned(),
            time: String::new(),
            incident_type: incident_type.to_owned(),
            category: NOT_AVAILABLE.to_owned(),
            target_category: NOT_AVAILABLE.to_owned(),
            target: NOT_AVAILABLE.to_owned(),
            force_type: NOT_AVAILABLE.to_owned(),
            city: NOT_AVAILABLE.to_owned(),
            province: province.to_owned(),
        }
    }

    #[test]
    fn indexes_by_date_in_source_order() {
        let store: IncidentStore = [
            incident("2008-01-02", "A", "Kabul"),
            incident("2007-12-05", "B", "Helmand"),
            incident("2008-01-02", "C", "Kabul"),
        ]
        .into_iter()
        .collect();

        assert_eq!(store.len(), 3);
        assert_eq!(store.dates(), ["2007-12-05", "2008-01-02"]);

        let types: Vec<&str> = store
            .on_date("2008-01-02")
            .map(|i| i.incident_type.as_str())
            .collect();
        assert_eq!(types, ["A", "C"]);
        assert_eq!(store.on_date("1999-01-01").count(), 0);
    }

    #[test]
    fn collects_distinct_values() {
        let store: IncidentStore = [
            incident("2008-01-02", "B", "Kabul"),
            incident("2008-01-02", "A", "Helmand"),
            incident("2008-01-03", "B", "Kabul"),
        ]
        .into_iter()
        .collect();

        assert_eq!(store.types().iter().collect::<Vec<_>>(), ["A", "B"]);
        assert_eq!(
            store.provinces().iter().collect::<Vec<_>>(),
            ["Helmand", "Kabul"]
        );
        assert_eq!(store.categories().len(), 1);
    }

    #[test]
    fn empty_builder_finishes_empty() {
        let store = IncidentStoreBuilder::new().finish(None);
        assert!(store.is_empty());
        assert!(store.dates().is_empty());
        assert!(store.boundary().is_none());
    }
}
