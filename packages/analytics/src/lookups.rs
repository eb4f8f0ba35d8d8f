//! Direct reads of the store's indexes.

use sigact_map_analytics_models::{DatasetSummary, IncidentFilter, Metadata};
use sigact_map_incident_models::Incident;
use sigact_map_ingest::boundary::Boundary;
use sigact_map_ingest::store::IncidentStore;

/// All distinct date keys, ascending by calendar value.
#[must_use]
pub fn list_dates(store: &IncidentStore) -> &[String] {
    store.dates()
}

/// Distinct types, categories, and provinces, each lexically sorted.
#[must_use]
pub fn list_metadata(store: &IncidentStore) -> Metadata {
    Metadata {
        types: store.types().iter().cloned().collect(),
        categories: store.categories().iter().cloned().collect(),
        provinces: store.provinces().iter().cloned().collect(),
    }
}

/// Incidents on `date` that pass `filter`, in source order.
///
/// An unknown date yields an empty list.
#[must_use]
pub fn lookup_incidents<'a>(
    store: &'a IncidentStore,
    date: &str,
    filter: &IncidentFilter,
) -> Vec<&'a Incident> {
    if filter.is_empty() {
        return store.on_date(date).collect();
    }

    store
        .on_date(date)
        .filter(|incident| filter.matches(incident))
        .collect()
}

/// The boundary document, if one was loaded.
#[must_use]
pub const fn boundary(store: &IncidentStore) -> Option<&Boundary> {
    store.boundary()
}

/// Headline figures for the loaded data.
#[must_use]
pub fn summary(store: &IncidentStore) -> DatasetSummary {
    let dates = store.dates();
    DatasetSummary {
        total_incidents: store.len() as u64,
        distinct_dates: dates.len() as u64,
        first_date: dates.first().cloned(),
        last_date: dates.last().cloned(),
        has_boundary: store.boundary().is_some(),
    }
}

#[cfg(test)]
mod tests {
    use sigact_map_ingest::{LoadOptions, load_from_reader};

    use super::*;

    const SAMPLE: &str = "\
DateTime,Type,Category,Province
12/5/2007 14:30:00,Enemy Action,Direct Fire,Kabul
2008-01-02 07:05:00,Explosive Hazard,IED Found,Kandahar
12/5/2007 23:10:00,Enemy Action,Indirect Fire,Helmand
12/5/2007,,Direct Fire,Kabul
";

    fn store() -> IncidentStore {
        load_from_reader(SAMPLE.as_bytes(), None, &LoadOptions::default()).unwrap()
    }

    fn filter(incident_type: Option<&str>, province: Option<&str>) -> IncidentFilter {
        IncidentFilter {
            incident_type: incident_type.map(ToOwned::to_owned),
            category: None,
            province: province.map(ToOwned::to_owned),
        }
    }

    #[test]
    fn lists_calendar_sorted_dates() {
        let store = store();
        assert_eq!(list_dates(&store), ["2007-12-05", "2008-01-02"]);
    }

    #[test]
    fn metadata_is_sorted_and_includes_defaults() {
        let metadata = list_metadata(&store());
        assert_eq!(
            metadata.types,
            ["Enemy Action", "Explosive Hazard", "Unknown"]
        );
        assert_eq!(
            metadata.categories,
            ["Direct Fire", "IED Found", "Indirect Fire"]
        );
        assert_eq!(metadata.provinces, ["Helmand", "Kabul", "Kandahar"]);
    }

    #[test]
    fn lookup_preserves_source_order() {
        let store = store();
        let incidents = lookup_incidents(&store, "2007-12-05", &IncidentFilter::default());
        let times: Vec<&str> = incidents.iter().map(|i| i.time.as_str()).collect();
        assert_eq!(times, ["14:30:00", "23:10:00", ""]);
    }

    #[test]
    fn unknown_date_is_empty_not_error() {
        let store = store();
        assert!(lookup_incidents(&store, "1999-01-01", &IncidentFilter::default()).is_empty());
    }

    #[test]
    fn applies_equality_filters() {
        let store = store();
        let hits = lookup_incidents(&store, "2007-12-05", &filter(Some("Enemy Action"), None));
        assert_eq!(hits.len(), 2);

        let hits = lookup_incidents(
            &store,
            "2007-12-05",
            &filter(Some("Enemy Action"), Some("Kabul")),
        );
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].category, "Direct Fire");

        let hits = lookup_incidents(&store, "2007-12-05", &filter(Some("all"), Some("all")));
        assert_eq!(hits.len(), 3);

        let hits = lookup_incidents(&store, "2007-12-05", &filter(Some("Nope"), None));
        assert!(hits.is_empty());
    }

    #[test]
    fn summarizes_store() {
        let summary = summary(&store());
        assert_eq!(summary.total_incidents, 4);
        assert_eq!(summary.distinct_dates, 2);
        assert_eq!(summary.first_date.as_deref(), Some("2007-12-05"));
        assert_eq!(summary.last_date.as_deref(), Some("2008-01-02"));
        assert!(!summary.has_boundary);
    }

    #[test]
    fn boundary_absent_without_document() {
        assert!(boundary(&store()).is_none());
    }
}
