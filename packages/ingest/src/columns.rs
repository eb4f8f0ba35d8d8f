//! Header resolution for the raw record source.
//!
//! Source files from different export years spell their headers
//! differently, so each canonical field accepts a small set of aliases.
//! When a header appears more than once the first occurrence wins.

use csv::StringRecord;

/// A canonical source field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Combined date and time.
    Timestamp,
    /// Latitude in decimal degrees.
    Latitude,
    /// Longitude in decimal degrees.
    Longitude,
    /// Incident type.
    Type,
    /// Incident category.
    Category,
    /// Target category.
    TargetCategory,
    /// Target.
    Target,
    /// Force type.
    ForceType,
    /// City.
    City,
    /// Province.
    Province,
}

impl Field {
    /// Every field, in column-map order.
    pub const ALL: [Self; 10] = [
        Self::Timestamp,
        Self::Latitude,
        Self::Longitude,
        Self::Type,
        Self::Category,
        Self::TargetCategory,
        Self::Target,
        Self::ForceType,
        Self::City,
        Self::Province,
    ];

    /// Header names accepted for this field. The first is canonical.
    #[must_use]
    pub const fn headers(self) -> &'static [&'static str] {
        match self {
            Self::Timestamp => &["DateTime", "datetime", "date_time", "Date"],
            Self::Latitude => &["Latitude", "latitude", "lat"],
            Self::Longitude => &["Longitude", "longitude", "lon", "lng"],
            Self::Type => &["Type", "type"],
            Self::Category => &["Category", "category"],
            Self::TargetCategory => &["TargetCategory", "targetCategory", "target_category"],
            Self::Target => &["Target", "target"],
            Self::ForceType => &["ForceType", "forceType", "force_type"],
            Self::City => &["City", "city"],
            Self::Province => &["Province", "province"],
        }
    }

    const fn slot(self) -> usize {
        self as usize
    }
}

/// Column positions of each canonical field within a source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    positions: [Option<usize>; Field::ALL.len()],
}

impl ColumnMap {
    /// Resolves field positions from a header row.
    #[must_use]
    pub fn from_headers(headers: &StringRecord) -> Self {
        let mut map = Self::default();

        for (idx, header) in headers.iter().enumerate() {
            let header = header.trim().trim_start_matches('\u{feff}');
            for field in Field::ALL {
                let slot = &mut map.positions[field.slot()];
                if slot.is_none() && field.headers().contains(&header) {
                    *slot = Some(idx);
                }
            }
        }

        map
    }

    /// Column index of `field`, if the source has it.
    #[must_use]
    pub const fn position(&self, field: Field) -> Option<usize> {
        self.positions[field.slot()]
    }

    /// Fields the source does not provide.
    #[must_use]
    pub fn missing(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|f| self.position(*f).is_none())
            .collect()
    }

    /// Reads `field` from `record`. Missing columns and short rows read as
    /// `None`.
    #[must_use]
    pub fn get<'r>(&self, record: &'r StringRecord, field: Field) -> Option<&'r str> {
        self.position(field).and_then(|idx| record.get(idx))
    }
}
