//! Result container: the immutable outcome of one search.

use std::sync::Arc;
use std::time::Duration;

use crate::criteria::CriteriaMap;

/// Records, the criteria that produced them, and how long it took.
///
/// Not `Clone`: every search builds a fresh container behind an `Arc`, and
/// [`crate::render::CacheViewer`] compares those pointers.
#[derive(Debug)]
pub struct ResultContainer<T> {
    records: Arc<[T]>,
    criteria: CriteriaMap,
    duration: Duration,
}

impl<T> ResultContainer<T> {
    pub fn new(records: Arc<[T]>, criteria: CriteriaMap, duration: Duration) -> Self {
        Self {
            records,
            criteria,
            duration,
        }
    }

    /// No records, no criteria, zero duration.
    pub fn empty() -> Self {
        Self::new(Arc::from(Vec::new()), CriteriaMap::new(), Duration::ZERO)
    }

    pub fn records(&self) -> &Arc<[T]> {
        &self.records
    }

    pub fn criteria_map(&self) -> &CriteriaMap {
        &self.criteria
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn duration_ms(&self) -> u128 {
        self.duration.as_millis()
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
