//! Filter container: the composed matcher, modifier and criteria map for one
//! search, and the builder that folds named builders into it.

use std::fmt;
use std::sync::Arc;

use crate::builder::FilterStateBuilder;
use crate::criteria::{CriteriaMap, CriterionName};
use crate::matcher::Matcher;
use crate::modifier::Modifier;
use crate::state::StateFilter;

static EMPTY_CRITERIA: CriteriaMap = CriteriaMap::new();

pub type MatcherBuilder<T> = Box<dyn FilterStateBuilder<Matcher<T>> + Send + Sync>;
pub type ModifierBuilder<T> = Box<dyn FilterStateBuilder<Modifier<T>> + Send + Sync>;

// ---------------------------------------------------------------------------
// FilterContainer
// ---------------------------------------------------------------------------

pub enum FilterContainer<T> {
    /// Every builder was empty; `filter` is a pass-through.
    Empty,
    Filled {
        criteria: CriteriaMap,
        matcher: Matcher<T>,
        modifier: Modifier<T>,
    },
}

impl<T> FilterContainer<T> {
    pub fn is_empty(&self) -> bool {
        matches!(self, FilterContainer::Empty)
    }

    /// Non-empty criteria, keyed by name, in the order they were built.
    pub fn criteria_map(&self) -> &CriteriaMap {
        match self {
            FilterContainer::Empty => &EMPTY_CRITERIA,
            FilterContainer::Filled { criteria, .. } => criteria,
        }
    }
}

impl<T: Clone> FilterContainer<T> {
    /// Keep the records that pass the matcher and survive the modifier, in
    /// source order. The empty container returns the source itself.
    pub fn filter(&self, source: &Arc<[T]>) -> Arc<[T]> {
        match self {
            FilterContainer::Empty => Arc::clone(source),
            FilterContainer::Filled {
                matcher, modifier, ..
            } => source
                .iter()
                .filter(|record| matcher.matches(record))
                .filter_map(|record| modifier.modify(record.clone()))
                .collect(),
        }
    }
}

impl<T> fmt::Debug for FilterContainer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterContainer::Empty => f.write_str("FilterContainer::Empty"),
            FilterContainer::Filled {
                criteria,
                matcher,
                modifier,
            } => f
                .debug_struct("FilterContainer::Filled")
                .field("criteria", criteria)
                .field("matcher", matcher)
                .field("modifier", modifier)
                .finish(),
        }
    }
}

// ---------------------------------------------------------------------------
// FilterContainerBuilder
// ---------------------------------------------------------------------------

/// Named matcher and modifier builders, in registration order.
pub struct FilterContainerBuilder<T> {
    matchers: Vec<(CriterionName, MatcherBuilder<T>)>,
    modifiers: Vec<(CriterionName, ModifierBuilder<T>)>,
}

impl<T> Default for FilterContainerBuilder<T> {
    fn default() -> Self {
        Self {
            matchers: Vec::new(),
            modifiers: Vec::new(),
        }
    }
}

impl<T: 'static> FilterContainerBuilder<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_matcher(
        mut self,
        name: CriterionName,
        builder: impl FilterStateBuilder<Matcher<T>> + Send + Sync + 'static,
    ) -> Self {
        self.matchers.push((name, Box::new(builder)));
        self
    }

    pub fn with_modifier(
        mut self,
        name: CriterionName,
        builder: impl FilterStateBuilder<Modifier<T>> + Send + Sync + 'static,
    ) -> Self {
        self.modifiers.push((name, Box::new(builder)));
        self
    }

    /// Read every widget and fold the filled states into one container.
    pub fn build(&self) -> FilterContainer<T> {
        let mut criteria = CriteriaMap::new();

        let mut matcher = Matcher::same();
        for (name, builder) in &self.matchers {
            if let StateFilter::Filled {
                criteria: value,
                filter,
            } = builder.build()
            {
                criteria.insert(*name, value);
                matcher = matcher.merge(filter);
            }
        }

        let mut modifier = Modifier::same();
        for (name, builder) in &self.modifiers {
            if let StateFilter::Filled {
                criteria: value,
                filter,
            } = builder.build()
            {
                criteria.insert(*name, value);
                modifier = modifier.merge(filter);
            }
        }

        if criteria.is_empty() {
            return FilterContainer::Empty;
        }
        FilterContainer::Filled {
            criteria,
            matcher,
            modifier,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
