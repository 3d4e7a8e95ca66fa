//! Searchers and the manager that hot-swaps them.

use std::sync::Arc;
use std::time::Instant;

use crate::container::FilterContainerBuilder;
use crate::result::ResultContainer;

pub trait Searcher<T> {
    /// Run one search. Each call returns a freshly built container.
    fn search(&self) -> Arc<ResultContainer<T>>;
}

/// Searcher used before any data has loaded.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSearcher;

impl<T> Searcher<T> for NullSearcher {
    fn search(&self) -> Arc<ResultContainer<T>> {
        Arc::new(ResultContainer::empty())
    }
}

/// Filters a loaded record set through the current widget state.
pub struct FilledSearcher<T> {
    source: Arc<[T]>,
    builder: Arc<FilterContainerBuilder<T>>,
}

impl<T> FilledSearcher<T> {
    pub fn new(source: Arc<[T]>, builder: Arc<FilterContainerBuilder<T>>) -> Self {
        Self { source, builder }
    }
}

impl<T: Clone + 'static> Searcher<T> for FilledSearcher<T> {
    fn search(&self) -> Arc<ResultContainer<T>> {
        let start = Instant::now();
        let container = self.builder.build();
        let records = container.filter(&self.source);
        let duration = start.elapsed();

        tracing::debug!(
            source = self.source.len(),
            matched = records.len(),
            criteria = container.criteria_map().len(),
            duration_us = duration.as_micros() as u64,
            "search complete"
        );

        Arc::new(ResultContainer::new(
            records,
            container.criteria_map().clone(),
            duration,
        ))
    }
}

// ---------------------------------------------------------------------------
// SearcherManager
// ---------------------------------------------------------------------------

/// Holds the active searcher. Previously returned results stay valid across
/// a swap since they are immutable and reference-counted.
pub struct SearcherManager<T> {
    searcher: Box<dyn Searcher<T> + Send + Sync>,
}

impl<T: 'static> Default for SearcherManager<T> {
    fn default() -> Self {
        Self {
            searcher: Box::new(NullSearcher),
        }
    }
}

impl<T: 'static> SearcherManager<T> {
    pub fn new(searcher: impl Searcher<T> + Send + Sync + 'static) -> Self {
        Self {
            searcher: Box::new(searcher),
        }
    }

    pub fn set_searcher(&mut self, searcher: impl Searcher<T> + Send + Sync + 'static) {
        tracing::debug!("searcher swapped");
        self.searcher = Box::new(searcher);
    }

    pub fn search(&self) -> Arc<ResultContainer<T>> {
        self.searcher.search()
    }
}
