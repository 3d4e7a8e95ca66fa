//! Filter state: a criterion's resolved value, or nothing.
//!
//! An empty state never reaches the criteria map and contributes the identity
//! element to the composed matcher/modifier.

use crate::criteria::CriteriaValue;
use crate::matcher::Matcher;
use crate::modifier::Modifier;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterState {
    Empty,
    Filled(CriteriaValue),
}

impl FilterState {
    pub fn is_empty(&self) -> bool {
        matches!(self, FilterState::Empty)
    }

    pub fn criteria(&self) -> Option<&CriteriaValue> {
        match self {
            FilterState::Empty => None,
            FilterState::Filled(criteria) => Some(criteria),
        }
    }
}

/// A filter state paired with the matcher or modifier it produced.
///
/// `Empty` carries no filter at all; the container substitutes the identity.
pub enum StateFilter<F> {
    Empty,
    Filled { criteria: CriteriaValue, filter: F },
}

pub type FilterStateMatcher<T> = StateFilter<Matcher<T>>;
pub type FilterStateModifier<T> = StateFilter<Modifier<T>>;

impl<F> StateFilter<F> {
    pub fn filled(criteria: CriteriaValue, filter: F) -> Self {
        StateFilter::Filled { criteria, filter }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, StateFilter::Empty)
    }

    pub fn state(&self) -> FilterState {
        match self {
            StateFilter::Empty => FilterState::Empty,
            StateFilter::Filled { criteria, .. } => FilterState::Filled(criteria.clone()),
        }
    }
}

impl<F> std::fmt::Debug for StateFilter<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StateFilter::Empty => f.write_str("Empty"),
            StateFilter::Filled { criteria, .. } => {
                f.debug_struct("Filled").field("criteria", criteria).finish_non_exhaustive()
            }
        }
    }
}
