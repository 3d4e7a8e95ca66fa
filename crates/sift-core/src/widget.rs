//! Widget state: the values the UI glue writes and the builders read.
//!
//! Every widget is a cheap, cloneable handle onto shared state, so the input
//! layer and the builder that reads it observe the same value.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ---------------------------------------------------------------------------
// Checkbox
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct Checkbox(Arc<AtomicBool>);

impl Checkbox {
    pub fn new(checked: bool) -> Self {
        Self(Arc::new(AtomicBool::new(checked)))
    }

    pub fn is_checked(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    pub fn set_checked(&self, checked: bool) {
        self.0.store(checked, Ordering::Relaxed);
    }
}

// ---------------------------------------------------------------------------
// TextField / RangeFields
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct TextField(Arc<Mutex<String>>);

impl TextField {
    pub fn new(value: impl Into<String>) -> Self {
        Self(Arc::new(Mutex::new(value.into())))
    }

    pub fn value(&self) -> String {
        lock(&self.0).clone()
    }

    pub fn set_value(&self, value: impl Into<String>) {
        *lock(&self.0) = value.into();
    }
}

/// A "from" / "to" pair of numeric text inputs.
#[derive(Debug, Clone, Default)]
pub struct RangeFields {
    pub from: TextField,
    pub to: TextField,
}

impl RangeFields {
    pub fn new() -> Self {
        Self::default()
    }
}

// ---------------------------------------------------------------------------
// CheckboxGroup
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
struct CheckItem {
    alias: String,
    checked: bool,
}

/// A fixed list of aliased checkboxes (multi-select).
#[derive(Debug, Clone, Default)]
pub struct CheckboxGroup(Arc<Mutex<Vec<CheckItem>>>);

impl CheckboxGroup {
    pub fn new<I, S>(aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items = aliases
            .into_iter()
            .map(|alias| CheckItem {
                alias: alias.into(),
                checked: false,
            })
            .collect();
        Self(Arc::new(Mutex::new(items)))
    }

    pub fn aliases(&self) -> Vec<String> {
        lock(&self.0).iter().map(|item| item.alias.clone()).collect()
    }

    /// Set the checked flag of `alias`. Returns false if the group has no such
    /// checkbox.
    pub fn set_checked(&self, alias: &str, checked: bool) -> bool {
        match lock(&self.0).iter_mut().find(|item| item.alias == alias) {
            Some(item) => {
                item.checked = checked;
                true
            }
            None => false,
        }
    }

    /// Check every alias in `aliases`, appending those the group lacks.
    pub fn check_aliases(&self, aliases: &[String]) {
        let mut items = lock(&self.0);
        for alias in aliases {
            match items.iter_mut().find(|item| &item.alias == alias) {
                Some(item) => item.checked = true,
                None => items.push(CheckItem {
                    alias: alias.clone(),
                    checked: true,
                }),
            }
        }
    }

    /// Offer `aliases` as unchecked boxes; aliases already offered keep
    /// their state.
    pub fn extend<I, S>(&self, aliases: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut items = lock(&self.0);
        for alias in aliases {
            let alias = alias.into();
            if !items.iter().any(|item| item.alias == alias) {
                items.push(CheckItem {
                    alias,
                    checked: false,
                });
            }
        }
    }

    /// Checked aliases in list order.
    pub fn checked_aliases(&self) -> Vec<String> {
        lock(&self.0)
            .iter()
            .filter(|item| item.checked)
            .map(|item| item.alias.clone())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// CheckboxList
// ---------------------------------------------------------------------------

/// Snapshot of a [`CheckboxList`], split by state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasStateMap {
    pub states: BTreeMap<String, bool>,
    pub selected: Vec<String>,
    pub disabled: Vec<String>,
}

/// Autocompleted tri-state list: aliases not in the list are unset, aliases
/// in it are either checked or explicitly unchecked.
#[derive(Debug, Clone, Default)]
pub struct CheckboxList(Arc<Mutex<Vec<CheckItem>>>);

impl CheckboxList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `alias` as checked, or re-check it if already listed.
    pub fn add_checked(&self, alias: impl Into<String>) {
        let alias = alias.into();
        let mut items = lock(&self.0);
        match items.iter_mut().find(|item| item.alias == alias) {
            Some(item) => item.checked = true,
            None => items.push(CheckItem {
                alias,
                checked: true,
            }),
        }
    }

    pub fn set_checked(&self, alias: &str, checked: bool) -> bool {
        match lock(&self.0).iter_mut().find(|item| item.alias == alias) {
            Some(item) => {
                item.checked = checked;
                true
            }
            None => false,
        }
    }

    pub fn alias_state_map(&self) -> AliasStateMap {
        let items = lock(&self.0);
        let mut map = AliasStateMap::default();
        for item in items.iter() {
            map.states.insert(item.alias.clone(), item.checked);
            if item.checked {
                map.selected.push(item.alias.clone());
            } else {
                map.disabled.push(item.alias.clone());
            }
        }
        map
    }
}
