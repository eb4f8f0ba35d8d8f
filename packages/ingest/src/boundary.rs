//! Optional province boundary document.
//!
//! The boundary file is a GeoJSON polygon collection that the frontend
//! draws under the incident layer. It is served exactly as read, so it is
//! only checked for being well-formed JSON and otherwise kept as text.

use std::path::Path;

/// A loaded boundary document, kept byte-for-byte as read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Boundary {
    document: String,
}

impl Boundary {
    /// Wraps `document` after checking that it is well-formed JSON.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if `document` is not valid JSON.
    pub fn from_json(document: String) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<serde::de::IgnoredAny>(&document)?;
        Ok(Self { document })
    }

    /// The raw document text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.document
    }
}

/// Loads the boundary document at `path`.
///
/// A missing, unreadable, or malformed file is not an error: a warning is
/// logged and `None` is returned so the rest of the load can proceed.
#[must_use]
pub fn load_boundary(path: &Path) -> Option<Boundary> {
    let document = match std::fs::read_to_string(path) {
        Ok(document) => document,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::warn!(
                "No boundary file at {}, boundary will be unavailable",
                path.display()
            );
            return None;
        }
        Err(e) => {
            log::warn!("Failed to read boundary file {}: {e}", path.display());
            return None;
        }
    };

    match Boundary::from_json(document) {
        Ok(boundary) => {
            log::info!(
                "Loaded boundary document from {} ({} bytes)",
                path.display(),
                boundary.as_str().len()
            );
            Some(boundary)
        }
        Err(e) => {
            log::warn!("Boundary file {} is not valid JSON: {e}", path.display());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    #[test]
    fn keeps_document_verbatim() {
        let text = r#"{"type":"FeatureCollection",  "features":[]}"#.to_owned();
        let boundary = Boundary::from_json(text.clone()).unwrap();
        assert_eq!(boundary.as_str(), text);
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(Boundary::from_json("{not json".to_owned()).is_err());
    }

    #[test]
    fn missing_file_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_boundary(&dir.path().join("absent.geojson")).is_none());
    }

    #[test]
    fn loads_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"type":"FeatureCollection","features":[]}}"#).unwrap();
        let boundary = load_boundary(file.path()).unwrap();
        assert!(boundary.as_str().contains("FeatureCollection"));
    }

    #[test]
    fn malformed_file_yields_none() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json at all").unwrap();
        assert!(load_boundary(file.path()).is_none());
    }
}
