//! Matchers: pure record predicates with an identity and a conjunctive merge.

use std::fmt;
use std::sync::Arc;

type Predicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// Accepts or rejects a record.
///
/// [`Matcher::same`] is the identity (accepts everything) and
/// [`Matcher::merge`] is logical AND, so matchers form a monoid.
pub struct Matcher<T> {
    predicate: Option<Predicate<T>>,
}

impl<T> Matcher<T> {
    /// The identity matcher.
    pub fn same() -> Self {
        Self { predicate: None }
    }

    pub fn new(predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        Self {
            predicate: Some(Arc::new(predicate)),
        }
    }

    pub fn is_same(&self) -> bool {
        self.predicate.is_none()
    }

    pub fn matches(&self, record: &T) -> bool {
        match &self.predicate {
            None => true,
            Some(predicate) => predicate(record),
        }
    }

    pub fn merge(self, other: Matcher<T>) -> Matcher<T>
    where
        T: 'static,
    {
        match (self.predicate, other.predicate) {
            (None, predicate) | (predicate, None) => Matcher { predicate },
            (Some(a), Some(b)) => Matcher::new(move |record| a(record) && b(record)),
        }
    }
}

impl<T> Clone for Matcher<T> {
    fn clone(&self) -> Self {
        Self {
            predicate: self.predicate.clone(),
        }
    }
}

impl<T> Default for Matcher<T> {
    fn default() -> Self {
        Self::same()
    }
}

impl<T> fmt::Debug for Matcher<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_same() {
            f.write_str("Matcher(same)")
        } else {
            f.write_str("Matcher(..)")
        }
    }
}
