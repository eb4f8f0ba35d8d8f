//! Pre-shaped summaries over the whole dataset.
//!
//! Each aggregate walks the store once per call. Nothing is cached.

use std::collections::HashMap;

use sigact_map_analytics_models::{
    CategoryCount, Heatmap, Histogram, Radar, RadarType, TimeOfDayBucket, TreemapGroup,
};
use sigact_map_ingest::store::IncidentStore;

/// Incident counts per `(type, category)`.
///
/// Groups appear in the order their type was first seen in the source, and
/// categories within a group in the order they were first seen for that
/// type.
#[must_use]
pub fn treemap(store: &IncidentStore) -> Vec<TreemapGroup> {
    let mut groups: Vec<TreemapGroup> = Vec::new();
    let mut group_slots: HashMap<&str, usize> = HashMap::new();
    let mut category_slots: HashMap<(usize, &str), usize> = HashMap::new();

    for incident in store.incidents() {
        let g = *group_slots
            .entry(incident.incident_type.as_str())
            .or_insert_with(|| {
                groups.push(TreemapGroup {
                    incident_type: incident.incident_type.clone(),
                    categories: Vec::new(),
                });
                groups.len() - 1
            });

        let group = &mut groups[g];
        let c = *category_slots
            .entry((g, incident.category.as_str()))
            .or_insert_with(|| {
                group.categories.push(CategoryCount {
                    category: incident.category.clone(),
                    count: 0,
                });
                group.categories.len() - 1
            });

        group.categories[c].count += 1;
    }

    log::debug!("Computed treemap over {} types", groups.len());

    groups
}

/// Hour component of an `HH:MM:SS` time, or `None` if it has none.
#[must_use]
pub fn hour_of(time: &str) -> Option<u32> {
    let hour = time.split_once(':').map_or(time, |(hour, _)| hour);
    hour.trim().parse().ok()
}

/// Time-of-day histograms for "Enemy Action" and "Explosive Hazard"
/// incidents.
///
/// Incidents of any other type, without a time, or with an hour outside
/// `0..24` are left out of both histograms.
#[must_use]
pub fn radar(store: &IncidentStore) -> Radar {
    let mut enemy_action = [0_u64; 7];
    let mut explosive_hazard = [0_u64; 7];

    for incident in store.incidents() {
        let Ok(radar_type) = incident.incident_type.parse::<RadarType>() else {
            continue;
        };
        let Some(bucket) = hour_of(&incident.time).and_then(TimeOfDayBucket::for_hour) else {
            continue;
        };

        let counts = match radar_type {
            RadarType::EnemyAction => &mut enemy_action,
            RadarType::ExplosiveHazard => &mut explosive_hazard,
        };
        counts[bucket.index()] += 1;
    }

    Radar {
        enemy_action: Histogram::from_counts(enemy_action),
        explosive_hazard: Histogram::from_counts(explosive_hazard),
    }
}

/// Incident counts per date, ascending by calendar value.
///
/// Only dates with incidents appear; there is no zero-filling between
/// them. Incidents with an empty date are skipped.
#[must_use]
pub fn heatmap(store: &IncidentStore) -> Heatmap {
    let (dates, counts) = store
        .dates()
        .iter()
        .filter(|date| !date.is_empty())
        .map(|date| (date.clone(), store.on_date(date).count() as u64))
        .unzip();

    Heatmap { dates, counts }
}

#[cfg(test)]
mod tests {
    use sigact_map_ingest::{LoadOptions, load_from_reader};

    use super::*;

    fn load(text: &str) -> IncidentStore {
        load_from_reader(text.as_bytes(), None, &LoadOptions::default()).unwrap()
    }

    #[test]
    fn treemap_keeps_first_seen_order() {
        let store = load(
            "DateTime,Type,Category\n\
             2008-01-01,Friendly Action,Escalation\n\
             2008-01-01,Enemy Action,Indirect Fire\n\
             2008-01-02,Enemy Action,Direct Fire\n\
             2008-01-02,Friendly Action,Detain\n\
             2008-01-03,Enemy Action,Indirect Fire\n",
        );

        let groups = treemap(&store);
        let types: Vec<&str> = groups.iter().map(|g| g.incident_type.as_str()).collect();
        assert_eq!(types, ["Friendly Action", "Enemy Action"]);

        assert_eq!(
            groups[1].categories,
            [
                CategoryCount {
                    category: "Indirect Fire".to_owned(),
                    count: 2
                },
                CategoryCount {
                    category: "Direct Fire".to_owned(),
                    count: 1
                },
            ]
        );
        assert_eq!(groups.iter().map(TreemapGroup::total).sum::<u64>(), 5);
    }

    #[test]
    fn treemap_separates_same_category_across_types() {
        let store = load(
            "DateTime,Type,Category\n\
             2008-01-01,A,Shared\n\
             2008-01-01,B,Shared\n\
             2008-01-01,A,Shared\n",
        );
        let groups = treemap(&store);
        assert_eq!(groups[0].categories[0].count, 2);
        assert_eq!(groups[1].categories[0].count, 1);
    }

    #[test]
    fn parses_hours() {
        assert_eq!(hour_of("14:30:00"), Some(14));
        assert_eq!(hour_of("07:05:00"), Some(7));
        assert_eq!(hour_of(""), None);
        assert_eq!(hour_of("xx:00:00"), None);
    }

    #[test]
    fn radar_buckets_by_hour() {
        let store = load(
            "DateTime,Type\n\
             2008-01-01 00:00:00,Enemy Action\n\
             2008-01-01 03:59:59,Enemy Action\n\
             2008-01-01 04:00:00,Enemy Action\n\
             2008-01-01 21:30:00,Explosive Hazard\n\
             2008-01-01 22:00:00,Explosive Hazard\n\
             2008-01-01 23:59:59,Explosive Hazard\n\
             2008-01-01,Enemy Action\n\
             2008-01-01 12:00:00,Friendly Action\n\
             2008-01-01 12:00:00,enemy action\n",
        );

        let radar = radar(&store);
        assert_eq!(radar.enemy_action.counts, [2, 1, 0, 0, 0, 0, 0]);
        assert_eq!(radar.explosive_hazard.counts, [0, 0, 0, 0, 0, 1, 2]);
        assert_eq!(radar.enemy_action.labels, radar.explosive_hazard.labels);
        assert_eq!(radar.histogram(RadarType::EnemyAction).total(), 3);
    }

    #[test]
    fn radar_is_all_zero_without_matches() {
        let store = load("DateTime,Type\n2008-01-01 10:00:00,Other\n");
        let radar = radar(&store);
        assert_eq!(radar.enemy_action.total() + radar.explosive_hazard.total(), 0);
        assert_eq!(radar.enemy_action.labels.len(), 7);
    }

    #[test]
    fn heatmap_counts_per_date_without_zero_fill() {
        let store = load(
            "DateTime,Type\n\
             1/10/2008,A\n\
             12/5/2007,A\n\
             1/10/2008,B\n\
             1/2/2008,A\n\
             ,A\n",
        );
        let heatmap = heatmap(&store);
        assert_eq!(heatmap.dates, ["2007-12-05", "2008-01-02", "2008-01-10"]);
        assert_eq!(heatmap.counts, [1, 1, 2]);
    }

    #[test]
    fn heatmap_of_empty_store_is_empty() {
        let heatmap = heatmap(&IncidentStore::default());
        assert!(heatmap.dates.is_empty());
        assert!(heatmap.counts.is_empty());
    }
}
