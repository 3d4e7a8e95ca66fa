//! Criterion names, criterion values and the ordered criteria map.
//!
//! A [`CriterionName`] can only be obtained from a [`CriteriaRegistry`], which
//! refuses duplicates. Everything downstream (builders, the filter container,
//! the URL state) is keyed by these names.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Names
// ---------------------------------------------------------------------------

/// A registered criterion name. Doubles as the query-string parameter name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CriterionName(&'static str);

impl CriterionName {
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for CriterionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Hands out unique criterion names in registration order.
#[derive(Debug, Default)]
pub struct CriteriaRegistry {
    names: Vec<CriterionName>,
}

impl CriteriaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name`. Registering the same name twice is a wiring bug and
    /// fails with [`ConfigError::DuplicateCriterion`].
    pub fn register(&mut self, name: &'static str) -> Result<CriterionName, ConfigError> {
        if self.names.iter().any(|n| n.0 == name) {
            return Err(ConfigError::DuplicateCriterion(name.to_string()));
        }
        let name = CriterionName(name);
        self.names.push(name);
        tracing::trace!(criterion = %name, "criterion registered");
        Ok(name)
    }

    /// All registered names, in registration order.
    pub fn names(&self) -> &[CriterionName] {
        &self.names
    }
}

// ---------------------------------------------------------------------------
// Values
// ---------------------------------------------------------------------------

/// An inclusive numeric range. `to == 0` means "no upper bound".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Range {
    pub from: u32,
    pub to: u32,
}

impl Range {
    pub fn new(from: u32, to: u32) -> Self {
        Self { from, to }
    }

    /// Effective upper bound, with the open-ended `to == 0` widened.
    pub fn upper(&self) -> u64 {
        if self.to == 0 {
            u64::MAX
        } else {
            u64::from(self.to)
        }
    }

    pub fn contains(&self, value: u64) -> bool {
        u64::from(self.from) <= value && value <= self.upper()
    }
}

/// The resolved value of one criterion, as stored in the criteria map and
/// round-tripped through the query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CriteriaValue {
    /// Free text, or the fixed `"1"` of a single checkbox.
    Text(String),
    /// Selected aliases of a multi-select.
    Aliases(Vec<String>),
    /// Tri-state aliases: `true` checked, `false` explicitly unchecked.
    AliasStates(BTreeMap<String, bool>),
    Range(Range),
}

impl CriteriaValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CriteriaValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_aliases(&self) -> Option<&[String]> {
        match self {
            CriteriaValue::Aliases(aliases) => Some(aliases),
            _ => None,
        }
    }

    pub fn as_alias_states(&self) -> Option<&BTreeMap<String, bool>> {
        match self {
            CriteriaValue::AliasStates(states) => Some(states),
            _ => None,
        }
    }

    pub fn as_range(&self) -> Option<Range> {
        match self {
            CriteriaValue::Range(range) => Some(*range),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// CriteriaMap
// ---------------------------------------------------------------------------

/// Criterion name → value, kept in insertion order so the encoded URL lists
/// parameters in the order the builders contributed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CriteriaMap {
    entries: Vec<(CriterionName, CriteriaValue)>,
}

impl CriteriaMap {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert or replace the value for `name`. A replaced entry keeps its
    /// original position.
    pub fn insert(&mut self, name: CriterionName, value: CriteriaValue) {
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: CriterionName) -> Option<&CriteriaValue> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CriterionName, &CriteriaValue)> {
        self.entries.iter().map(|(name, value)| (*name, value))
    }
}

impl FromIterator<(CriterionName, CriteriaValue)> for CriteriaMap {
    fn from_iter<I: IntoIterator<Item = (CriterionName, CriteriaValue)>>(iter: I) -> Self {
        let mut map = CriteriaMap::new();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}

// ---------------------------------------------------------------------------
// AliasSet
// ---------------------------------------------------------------------------

/// Set of aliases used by membership matchers and modifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasSet(HashSet<String>);

impl AliasSet {
    pub fn new<I, S>(aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(aliases.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, alias: &str) -> bool {
        self.0.contains(alias)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut registry = CriteriaRegistry::new();
        registry.register("company").unwrap();
        let err = registry.register("company").unwrap_err();
        assert_eq!(err, ConfigError::DuplicateCriterion("company".into()));
        assert_eq!(registry.names().len(), 1);
    }

    #[test]
    fn names_keep_registration_order() {
        let mut registry = CriteriaRegistry::new();
        let b = registry.register("b").unwrap();
        let a = registry.register("a").unwrap();
        assert_eq!(registry.names(), &[b, a]);
    }

    #[test]
    fn criteria_map_replaces_in_place() {
        let mut registry = CriteriaRegistry::new();
        let x = registry.register("x").unwrap();
        let y = registry.register("y").unwrap();

        let mut map = CriteriaMap::new();
        map.insert(x, CriteriaValue::Text("1".into()));
        map.insert(y, CriteriaValue::Text("2".into()));
        map.insert(x, CriteriaValue::Text("3".into()));

        let order: Vec<_> = map.iter().map(|(n, _)| n).collect();
        assert_eq!(order, vec![x, y]);
        assert_eq!(map.get(x), Some(&CriteriaValue::Text("3".into())));
    }

    #[test]
    fn open_range_has_no_upper_bound() {
        let range = Range::new(100, 0);
        assert!(range.contains(100));
        assert!(range.contains(1_000_000));
        assert!(!range.contains(99));
    }
}
