//! Load lifecycle for a single generation of incident data.
//!
//! A [`Dataset`] starts out [`LoadState::NotLoaded`], moves to
//! [`LoadState::Loading`] when a load begins, and ends in either
//! [`LoadState::Ready`] or [`LoadState::Failed`]. Neither end state is
//! ever left. The finished store is published through a [`OnceLock`], so
//! readers never take a lock once the data is ready.

use std::path::Path;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use strum_macros::{AsRefStr, Display};

use crate::store::IncidentStore;
use crate::{LoadError, LoadOptions, load_from_path};

/// Where a [`Dataset`] is in its load lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LoadState {
    /// No load has been started.
    NotLoaded,
    /// A load is in progress.
    Loading,
    /// Data is loaded and queryable.
    Ready,
    /// The load failed. Terminal.
    Failed,
}

/// Returned when data is requested from a dataset that is not
/// [`LoadState::Ready`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Dataset is not ready (state: {state})")]
pub struct NotReady {
    /// The state the dataset was in.
    pub state: LoadState,
}

#[derive(Debug)]
enum Generation {
    Ready(IncidentStore),
    Failed(String),
}

/// Handle to one generation of loaded incident data.
#[derive(Debug, Default)]
pub struct Dataset {
    started: AtomicBool,
    generation: OnceLock<Generation>,
}

impl Dataset {
    /// Creates a dataset in the [`LoadState::NotLoaded`] state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            started: AtomicBool::new(false),
            generation: OnceLock::new(),
        }
    }

    /// Creates a dataset that is already [`LoadState::Ready`] with `store`.
    #[must_use]
    pub fn from_store(store: IncidentStore) -> Self {
        let dataset = Self::new();
        dataset.started.store(true, Ordering::Release);
        dataset.publish(Generation::Ready(store));
        dataset
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> LoadState {
        match self.generation.get() {
            Some(Generation::Ready(_)) => LoadState::Ready,
            Some(Generation::Failed(_)) => LoadState::Failed,
            None if self.started.load(Ordering::Acquire) => LoadState::Loading,
            None => LoadState::NotLoaded,
        }
    }

    /// Runs `build` as this dataset's one and only load.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::AlreadyStarted`] if a load has already begun,
    /// leaving the existing generation untouched. Otherwise returns
    /// whatever error `build` produced, after moving the dataset to
    /// [`LoadState::Failed`].
    pub fn load<F>(&self, build: F) -> Result<(), LoadError>
    where
        F: FnOnce() -> Result<IncidentStore, LoadError>,
    {
        if self.started.swap(true, Ordering::AcqRel) {
            return Err(LoadError::AlreadyStarted);
        }

        match build() {
            Ok(store) => {
                self.publish(Generation::Ready(store));
                Ok(())
            }
            Err(e) => {
                log::error!("Dataset load failed: {e}");
                self.publish(Generation::Failed(e.to_string()));
                Err(e)
            }
        }
    }

    /// Loads the record file at `records` and the optional boundary file.
    ///
    /// # Errors
    ///
    /// See [`Dataset::load`] and [`load_from_path`].
    pub fn load_path(
        &self,
        records: &Path,
        boundary: Option<&Path>,
        options: &LoadOptions,
    ) -> Result<(), LoadError> {
        self.load(|| load_from_path(records, boundary, options))
    }

    /// The loaded store.
    ///
    /// # Errors
    ///
    /// Returns [`NotReady`] unless the dataset is [`LoadState::Ready`].
    pub fn ready(&self) -> Result<&IncidentStore, NotReady> {
        match self.generation.get() {
            Some(Generation::Ready(store)) => Ok(store),
            _ => Err(NotReady {
                state: self.state(),
            }),
        }
    }

    /// The failure message, if the load failed.
    #[must_use]
    pub fn failure(&self) -> Option<&str> {
        match self.generation.get() {
            Some(Generation::Failed(message)) => Some(message),
            _ => None,
        }
    }

    fn publish(&self, generation: Generation) {
        // Only the caller that flipped `started` gets here, so the cell is
        // always empty.
        if self.generation.set(generation).is_err() {
            log::warn!("Dataset generation was already published");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_store() -> IncidentStore {
        crate::load_from_reader(
            "DateTime,Type\n12/5/2007 10:00:00,Enemy Action\n".as_bytes(),
            None,
            &LoadOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn starts_not_loaded() {
        let dataset = Dataset::new();
        assert_eq!(dataset.state(), LoadState::NotLoaded);
        assert_eq!(
            dataset.ready().unwrap_err(),
            NotReady {
                state: LoadState::NotLoaded
            }
        );
    }

    #[test]
    fn reports_loading_while_build_runs() {
        let dataset = Dataset::new();
        dataset
            .load(|| {
                assert_eq!(dataset.state(), LoadState::Loading);
                assert_eq!(dataset.ready().unwrap_err().state, LoadState::Loading);
                Ok(sample_store())
            })
            .unwrap();
        assert_eq!(dataset.state(), LoadState::Ready);
    }

    #[test]
    fn ready_exposes_store() {
        let dataset = Dataset::new();
        dataset.load(|| Ok(sample_store())).unwrap();
        assert_eq!(dataset.ready().unwrap().len(), 1);
        assert!(dataset.failure().is_none());
    }

    #[test]
    fn failure_is_terminal() {
        let dataset = Dataset::new();
        let result = dataset.load(|| Err(std::io::Error::other("disk gone").into()));
        assert!(matches!(result, Err(LoadError::Io(_))));
        assert_eq!(dataset.state(), LoadState::Failed);
        assert!(dataset.failure().unwrap().contains("disk gone"));
        assert_eq!(dataset.ready().unwrap_err().state, LoadState::Failed);

        let retry = dataset.load(|| Ok(sample_store()));
        assert!(matches!(retry, Err(LoadError::AlreadyStarted)));
        assert_eq!(dataset.state(), LoadState::Failed);
    }

    #[test]
    fn second_load_is_rejected() {
        let dataset = Dataset::from_store(sample_store());
        let result = dataset.load(|| Ok(IncidentStore::default()));
        assert!(matches!(result, Err(LoadError::AlreadyStarted)));
        assert_eq!(dataset.ready().unwrap().len(), 1);
    }

    #[test]
    fn load_path_fails_for_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let dataset = Dataset::new();
        let result = dataset.load_path(&dir.path().join("absent.csv"), None, &LoadOptions::default());
        assert!(result.is_err());
        assert_eq!(dataset.state(), LoadState::Failed);
    }

    #[test]
    fn state_names_are_snake_case() {
        assert_eq!(LoadState::NotLoaded.to_string(), "not_loaded");
        assert_eq!(LoadState::Ready.as_ref(), "ready");
    }
}
