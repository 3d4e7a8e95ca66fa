//! Criteria converters: bidirectional codecs between a [`CriteriaValue`] and
//! the string token stored in the query string.
//!
//! `unmarshal` is total: any input, however mangled, decodes either to a value
//! or to `None` ("absent"). `marshal` is total over everything `unmarshal`
//! can produce.

use std::collections::{BTreeMap, HashMap};

use crate::criteria::{CriteriaValue, CriterionName, Range};

/// Separator between the aliases of multi-select and multi-checkbox tokens.
pub const LIST_SEPARATOR: char = ',';
/// Suffix marking an alias as explicitly unchecked.
pub const UNCHECKED_SUFFIX: &str = "-unchecked";
/// Separator between the bounds of a range token.
pub const RANGE_SEPARATOR: char = '-';

/// Converter registered for each criterion name.
pub type ConverterMap = HashMap<CriterionName, CriteriaConverter>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CriteriaConverter {
    /// Pass-through text; the empty string is absent.
    Identity,
    /// `"a,b,c"` ⇄ `["a", "b", "c"]`; the empty string is absent.
    MultiSelect,
    /// `"a,b-unchecked"` ⇄ `{a: true, b: false}`.
    MultiCheckbox,
    /// `"from-to"` or `"from"` ⇄ [`Range`]; invalid or inverted is absent.
    Range,
}

impl CriteriaConverter {
    pub fn unmarshal(&self, token: &str) -> Option<CriteriaValue> {
        match self {
            CriteriaConverter::Identity => {
                if token.is_empty() {
                    None
                } else {
                    Some(CriteriaValue::Text(token.to_string()))
                }
            }
            CriteriaConverter::MultiSelect => {
                let aliases = split_aliases(token);
                if aliases.is_empty() {
                    None
                } else {
                    Some(CriteriaValue::Aliases(aliases))
                }
            }
            CriteriaConverter::MultiCheckbox => {
                let states: BTreeMap<String, bool> = split_aliases(token)
                    .into_iter()
                    .filter_map(|alias| match alias.strip_suffix(UNCHECKED_SUFFIX) {
                        Some("") => None,
                        Some(stripped) => Some((stripped.to_string(), false)),
                        None => Some((alias, true)),
                    })
                    .collect();
                if states.is_empty() {
                    None
                } else {
                    Some(CriteriaValue::AliasStates(states))
                }
            }
            CriteriaConverter::Range => parse_range(token).map(CriteriaValue::Range),
        }
    }

    /// Encode `value`. A value of the wrong shape for this converter is a
    /// wiring bug; it is logged and encoded as the empty token, which the URL
    /// writer omits.
    pub fn marshal(&self, value: &CriteriaValue) -> String {
        match (self, value) {
            (CriteriaConverter::Identity, CriteriaValue::Text(text)) => text.clone(),
            (CriteriaConverter::MultiSelect, CriteriaValue::Aliases(aliases)) => {
                aliases.join(",")
            }
            (CriteriaConverter::MultiCheckbox, CriteriaValue::AliasStates(states)) => states
                .iter()
                .map(|(alias, checked)| {
                    if *checked {
                        alias.clone()
                    } else {
                        format!("{alias}{UNCHECKED_SUFFIX}")
                    }
                })
                .collect::<Vec<_>>()
                .join(","),
            (CriteriaConverter::Range, CriteriaValue::Range(range)) => {
                if range.to > 0 {
                    format!("{}{RANGE_SEPARATOR}{}", range.from, range.to)
                } else {
                    range.from.to_string()
                }
            }
            (converter, value) => {
                tracing::error!(?converter, ?value, "criteria value does not fit its converter");
                String::new()
            }
        }
    }
}

fn split_aliases(token: &str) -> Vec<String> {
    token
        .split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|alias| !alias.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse `"from-to"` or `"from"`.
///
/// Two bounds are valid when `to > 0 && to >= from`; a single bound when
/// `from > 0`. Anything else, including a third part, is absent.
pub fn parse_range(token: &str) -> Option<Range> {
    let parts: Vec<&str> = token.split(RANGE_SEPARATOR).map(str::trim).collect();
    match parts.as_slice() {
        [from] => {
            let from = from.parse::<u32>().ok()?;
            (from > 0).then_some(Range::new(from, 0))
        }
        [from, to] => {
            let from = from.parse::<u32>().ok()?;
            let to = to.parse::<u32>().ok()?;
            (to > 0 && to >= from).then_some(Range::new(from, to))
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
