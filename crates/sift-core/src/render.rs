//! Presentation surfaces and the cache-aware decorator.

use std::sync::Arc;

use crate::result::ResultContainer;

/// Anything that displays a search result: a list, a map, a counter.
pub trait ResultViewer<T> {
    fn render(&mut self, result: &Arc<ResultContainer<T>>);
}

impl<T, V: ResultViewer<T> + ?Sized> ResultViewer<T> for Box<V> {
    fn render(&mut self, result: &Arc<ResultContainer<T>>) {
        (**self).render(result)
    }
}

/// Skips the wrapped viewer when handed the same result container as last
/// time. Identity is pointer identity: an equal but separately built result
/// renders again.
pub struct CacheViewer<T, V> {
    inner: V,
    last: Option<Arc<ResultContainer<T>>>,
}

impl<T, V: ResultViewer<T>> CacheViewer<T, V> {
    pub fn new(inner: V) -> Self {
        Self { inner, last: None }
    }

    pub fn get_ref(&self) -> &V {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut V {
        &mut self.inner
    }

    /// Forget the cached result so the next render always reaches the viewer.
    pub fn invalidate(&mut self) {
        self.last = None;
    }
}

impl<T, V: ResultViewer<T>> ResultViewer<T> for CacheViewer<T, V> {
    fn render(&mut self, result: &Arc<ResultContainer<T>>) {
        if let Some(last) = &self.last {
            if Arc::ptr_eq(last, result) {
                tracing::trace!("render skipped, result unchanged");
                return;
            }
        }
        self.inner.render(result);
        self.last = Some(Arc::clone(result));
    }
}
