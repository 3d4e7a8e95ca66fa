//! Modifiers: record transforms that either rewrite a record or drop it.

use std::fmt;
use std::sync::Arc;

type Transform<T> = Arc<dyn Fn(T) -> Option<T> + Send + Sync>;

/// Rewrites a record, or rejects it by returning `None`.
///
/// [`Modifier::merge`] runs `self` first and feeds its output to `other`,
/// short-circuiting on `None`. The merge is associative but not commutative.
pub struct Modifier<T> {
    transform: Option<Transform<T>>,
}

impl<T> Modifier<T> {
    /// The identity modifier.
    pub fn same() -> Self {
        Self { transform: None }
    }

    pub fn new(transform: impl Fn(T) -> Option<T> + Send + Sync + 'static) -> Self {
        Self {
            transform: Some(Arc::new(transform)),
        }
    }

    /// Keep only the items of a nested collection that satisfy `keep`.
    /// A record whose collection ends up empty is dropped.
    pub fn narrow<I, S, K>(select: S, keep: K) -> Self
    where
        S: Fn(&mut T) -> &mut Vec<I> + Send + Sync + 'static,
        K: Fn(&I) -> bool + Send + Sync + 'static,
    {
        Self::new(move |mut record| {
            let items = select(&mut record);
            items.retain(|item| keep(item));
            if items.is_empty() {
                None
            } else {
                Some(record)
            }
        })
    }

    pub fn is_same(&self) -> bool {
        self.transform.is_none()
    }

    pub fn modify(&self, record: T) -> Option<T> {
        match &self.transform {
            None => Some(record),
            Some(transform) => transform(record),
        }
    }

    pub fn merge(self, other: Modifier<T>) -> Modifier<T>
    where
        T: 'static,
    {
        match (self.transform, other.transform) {
            (None, transform) | (transform, None) => Modifier { transform },
            (Some(first), Some(second)) => {
                Modifier::new(move |record| first(record).and_then(|r| second(r)))
            }
        }
    }
}

impl<T> Clone for Modifier<T> {
    fn clone(&self) -> Self {
        Self {
            transform: self.transform.clone(),
        }
    }
}

impl<T> Default for Modifier<T> {
    fn default() -> Self {
        Self::same()
    }
}

impl<T> fmt::Debug for Modifier<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_same() {
            f.write_str("Modifier(same)")
        } else {
            f.write_str("Modifier(..)")
        }
    }
}
