#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Filter and aggregate result types for SIGACT queries.
//!
//! These are the shapes the query engine hands to its callers. They are
//! plain containers; the server serializes them as they are.

use serde::{Deserialize, Serialize};
use sigact_map_incident_models::Incident;
use strum_macros::{AsRefStr, Display, EnumString};

/// Filter value that disables a filter.
pub const ALL_SENTINEL: &str = "all";

/// Equality filters applied to a date lookup.
///
/// A filter that is `None`, empty, or equal to [`ALL_SENTINEL`] is not
/// applied. Active filters combine with logical AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentFilter {
    /// Required incident type.
    #[serde(rename = "type")]
    pub incident_type: Option<String>,
    /// Required incident category.
    pub category: Option<String>,
    /// Required province.
    pub province: Option<String>,
}

impl IncidentFilter {
    /// Returns `true` if `incident` passes every active filter.
    #[must_use]
    pub fn matches(&self, incident: &Incident) -> bool {
        passes(self.incident_type.as_deref(), &incident.incident_type)
            && passes(self.category.as_deref(), &incident.category)
            && passes(self.province.as_deref(), &incident.province)
    }

    /// Returns `true` if no filter is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        [&self.incident_type, &self.category, &self.province]
            .into_iter()
            .all(|f| active(f.as_deref()).is_none())
    }
}

fn active(filter: Option<&str>) -> Option<&str> {
    filter.filter(|v| !v.is_empty() && *v != ALL_SENTINEL)
}

fn passes(filter: Option<&str>, value: &str) -> bool {
    active(filter).is_none_or(|wanted| wanted == value)
}

/// Distinct classification values available for filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// Distinct incident types, lexically sorted.
    pub types: Vec<String>,
    /// Distinct categories, lexically sorted.
    pub categories: Vec<String>,
    /// Distinct provinces, lexically sorted.
    pub provinces: Vec<String>,
}

/// Count of incidents in a single category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    /// Category name.
    pub category: String,
    /// Number of incidents.
    pub count: u64,
}

/// One incident type and its per-category counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreemapGroup {
    /// Incident type.
    #[serde(rename = "type")]
    pub incident_type: String,
    /// Categories in first-seen order.
    pub categories: Vec<CategoryCount>,
}

impl TreemapGroup {
    /// Total incidents across all categories of this type.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.categories.iter().map(|c| c.count).sum()
    }
}

/// Incident types charted by the time-of-day radar.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum RadarType {
    /// Direct enemy engagements.
    #[strum(serialize = "Enemy Action")]
    #[serde(rename = "Enemy Action")]
    EnemyAction,
    /// IEDs, mines, and unexploded ordnance.
    #[strum(serialize = "Explosive Hazard")]
    #[serde(rename = "Explosive Hazard")]
    ExplosiveHazard,
}

/// Fixed clock-hour buckets used by the radar histogram.
///
/// Buckets are contiguous and non-overlapping over `[0, 24)`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum TimeOfDayBucket {
    /// `[0, 4)`
    #[strum(serialize = "00-04")]
    #[serde(rename = "00-04")]
    LateNight,
    /// `[4, 9)`
    #[strum(serialize = "04-09")]
    #[serde(rename = "04-09")]
    EarlyMorning,
    /// `[9, 12)`
    #[strum(serialize = "09-12")]
    #[serde(rename = "09-12")]
    Morning,
    /// `[12, 15)`
    #[strum(serialize = "12-15")]
    #[serde(rename = "12-15")]
    Midday,
    /// `[15, 18)`
    #[strum(serialize = "15-18")]
    #[serde(rename = "15-18")]
    Afternoon,
    /// `[18, 22)`
    #[strum(serialize = "18-22")]
    #[serde(rename = "18-22")]
    Evening,
    /// `[22, 24)`
    #[strum(serialize = "22-24")]
    #[serde(rename = "22-24")]
    Night,
}

impl TimeOfDayBucket {
    /// Returns all buckets in clock order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::LateNight,
            Self::EarlyMorning,
            Self::Morning,
            Self::Midday,
            Self::Afternoon,
            Self::Evening,
            Self::Night,
        ]
    }

    /// Half-open hour range `[start, end)` covered by this bucket.
    #[must_use]
    pub const fn hours(self) -> (u32, u32) {
        match self {
            Self::LateNight => (0, 4),
            Self::EarlyMorning => (4, 9),
            Self::Morning => (9, 12),
            Self::Midday => (12, 15),
            Self::Afternoon => (15, 18),
            Self::Evening => (18, 22),
            Self::Night => (22, 24),
        }
    }

    /// The bucket containing `hour`, or `None` if `hour` is not in
    /// `0..24`.
    #[must_use]
    pub fn for_hour(hour: u32) -> Option<Self> {
        Self::all().iter().copied().find(|bucket| {
            let (start, end) = bucket.hours();
            (start..end).contains(&hour)
        })
    }

    /// Position of this bucket in [`TimeOfDayBucket::all`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Per-bucket incident counts for one radar type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Histogram {
    /// Bucket labels in fixed clock order.
    pub labels: Vec<String>,
    /// Counts aligned with `labels`.
    pub counts: Vec<u64>,
}

impl Histogram {
    /// Builds a histogram from per-bucket counts in clock order.
    #[must_use]
    pub fn from_counts(counts: [u64; 7]) -> Self {
        Self {
            labels: TimeOfDayBucket::all()
                .iter()
                .map(ToString::to_string)
                .collect(),
            counts: counts.to_vec(),
        }
    }

    /// Sum of all bucket counts.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

/// Time-of-day histograms for both radar types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Radar {
    /// Histogram for "Enemy Action" incidents.
    pub enemy_action: Histogram,
    /// Histogram for "Explosive Hazard" incidents.
    pub explosive_hazard: Histogram,
}

impl Radar {
    /// The histogram for `radar_type`.
    #[must_use]
    pub const fn histogram(&self, radar_type: RadarType) -> &Histogram {
        match radar_type {
            RadarType::EnemyAction => &self.enemy_action,
            RadarType::ExplosiveHazard => &self.explosive_hazard,
        }
    }
}

/// Daily incident counts as two aligned sequences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Heatmap {
    /// Dates with at least one incident, ascending by calendar value.
    pub dates: Vec<String>,
    /// Counts aligned with `dates`.
    pub counts: Vec<u64>,
}

/// Headline figures for a loaded dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetSummary {
    /// Number of loaded incidents.
    pub total_incidents: u64,
    /// Number of distinct dates.
    pub distinct_dates: u64,
    /// Earliest date key.
    pub first_date: Option<String>,
    /// Latest date key.
    pub last_date: Option<String>,
    /// Whether a boundary document is available.
    pub has_boundary: bool,
}

#[cfg(test)]
mod tests {
    use sigact_map_incident_models::{NOT_AVAILABLE, Position};

    use super::*;

    fn incident(incident_type: &str, province: &str) -> Incident {
        Incident {
            position: Position {
                latitude: 0.0,
                longitude: 0.0,
            },
            date: "2008-01-02".to_owned(),
            time: String::new(),
            incident_type: incident_type.to_owned(),
            category: "Direct Fire".to_owned(),
            target_category: NOT_AVAILABLE.to_owned(),
            target: NOT_AVAILABLE.to_owned(),
            force_type: NOT_AVAILABLE.to_owned(),
            city: NOT_AVAILABLE.to_owned(),
            province: province.to_owned(),
        }
    }

    #[test]
    fn all_sentinel_disables_filter() {
        let filter = IncidentFilter {
            incident_type: Some("all".to_owned()),
            category: Some(String::new()),
            province: None,
        };
        assert!(filter.is_empty());
        assert!(filter.matches(&incident("Enemy Action", "Kabul")));
    }

    #[test]
    fn filters_combine_with_and() {
        let filter = IncidentFilter {
            incident_type: Some("Enemy Action".to_owned()),
            category: None,
            province: Some("Kabul".to_owned()),
        };
        assert!(!filter.is_empty());
        assert!(filter.matches(&incident("Enemy Action", "Kabul")));
        assert!(!filter.matches(&incident("Enemy Action", "Helmand")));
        assert!(!filter.matches(&incident("Friendly Action", "Kabul")));
    }

    #[test]
    fn buckets_cover_the_day_without_gaps() {
        let mut expected_start = 0;
        for bucket in TimeOfDayBucket::all() {
            let (start, end) = bucket.hours();
            assert_eq!(start, expected_start, "{bucket:?} leaves a gap");
            assert!(end > start);
            for hour in start..end {
                assert_eq!(TimeOfDayBucket::for_hour(hour), Some(*bucket));
            }
            expected_start = end;
        }
        assert_eq!(expected_start, 24);
        assert_eq!(TimeOfDayBucket::for_hour(24), None);
    }

    #[test]
    fn bucket_index_matches_order() {
        for (i, bucket) in TimeOfDayBucket::all().iter().enumerate() {
            assert_eq!(bucket.index(), i);
        }
    }

    #[test]
    fn radar_types_parse_from_source_text() {
        assert_eq!("Enemy Action".parse::<RadarType>().unwrap(), RadarType::EnemyAction);
        assert_eq!(
            "Explosive Hazard".parse::<RadarType>().unwrap(),
            RadarType::ExplosiveHazard
        );
        assert!("enemy action".parse::<RadarType>().is_err());
    }

    #[test]
    fn histogram_labels_follow_bucket_order() {
        let histogram = Histogram::from_counts([1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(
            histogram.labels,
            ["00-04", "04-09", "09-12", "12-15", "15-18", "18-22", "22-24"]
        );
        assert_eq!(histogram.total(), 28);
    }

    #[test]
    fn filter_deserializes_type_key() {
        let filter: IncidentFilter =
            serde_json::from_str(r#"{"type":"Enemy Action","province":"all"}"#).unwrap();
        assert_eq!(filter.incident_type.as_deref(), Some("Enemy Action"));
        assert!(filter.category.is_none());
    }
}
