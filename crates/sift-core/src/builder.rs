//! Filter state builders: read one widget, produce a [`StateFilter`].
//!
//! Builders are generic over the filter they produce, so the same widget
//! policy yields either a [`Matcher`] or a [`Modifier`]. The domain supplies a
//! factory closure that turns the widget reading into the concrete filter.
//!
//! Each builder seeds its widget from the persisted criteria value once, at
//! construction. `build()` never touches the record set.

use crate::criteria::{CriteriaValue, Range};
use crate::matcher::Matcher;
use crate::modifier::Modifier;
use crate::state::StateFilter;
use crate::widget::{Checkbox, CheckboxGroup, CheckboxList, RangeFields, TextField};

/// Criteria value persisted for a checked single checkbox.
pub const CHECKED: &str = "1";

/// Something that can turn current widget state into a filter state pair.
pub trait FilterStateBuilder<F> {
    fn build(&self) -> StateFilter<F>;
}

/// Case-insensitive substring test, as used by free-text criteria.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

// ---------------------------------------------------------------------------
// Single checkbox
// ---------------------------------------------------------------------------

pub struct CheckboxBuilder<F> {
    checkbox: Checkbox,
    factory: Box<dyn Fn() -> F + Send + Sync>,
}

pub type CheckboxMatcherBuilder<T> = CheckboxBuilder<Matcher<T>>;
pub type CheckboxModifierBuilder<T> = CheckboxBuilder<Modifier<T>>;

impl<F> CheckboxBuilder<F> {
    pub fn new(
        checkbox: Checkbox,
        seed: Option<&CriteriaValue>,
        factory: impl Fn() -> F + Send + Sync + 'static,
    ) -> Self {
        if seed.and_then(CriteriaValue::as_text) == Some(CHECKED) {
            checkbox.set_checked(true);
        }
        Self {
            checkbox,
            factory: Box::new(factory),
        }
    }
}

impl<F> FilterStateBuilder<F> for CheckboxBuilder<F> {
    fn build(&self) -> StateFilter<F> {
        if !self.checkbox.is_checked() {
            return StateFilter::Empty;
        }
        StateFilter::filled(CriteriaValue::Text(CHECKED.to_string()), (self.factory)())
    }
}

// ---------------------------------------------------------------------------
// Multi-select (checkbox group)
// ---------------------------------------------------------------------------

pub struct MultiSelectBuilder<F> {
    group: CheckboxGroup,
    factory: Box<dyn Fn(&[String]) -> F + Send + Sync>,
}

pub type MultiSelectMatcherBuilder<T> = MultiSelectBuilder<Matcher<T>>;
pub type MultiSelectModifierBuilder<T> = MultiSelectBuilder<Modifier<T>>;

impl<F> MultiSelectBuilder<F> {
    pub fn new(
        group: CheckboxGroup,
        seed: Option<&CriteriaValue>,
        factory: impl Fn(&[String]) -> F + Send + Sync + 'static,
    ) -> Self {
        if let Some(aliases) = seed.and_then(CriteriaValue::as_aliases) {
            group.check_aliases(aliases);
        }
        Self {
            group,
            factory: Box::new(factory),
        }
    }
}

impl<F> FilterStateBuilder<F> for MultiSelectBuilder<F> {
    fn build(&self) -> StateFilter<F> {
        let checked = self.group.checked_aliases();
        if checked.is_empty() {
            return StateFilter::Empty;
        }
        let filter = (self.factory)(&checked);
        StateFilter::filled(CriteriaValue::Aliases(checked), filter)
    }
}

// ---------------------------------------------------------------------------
// Tri-state alias list
// ---------------------------------------------------------------------------

/// Builder over a [`CheckboxList`]. If anything is checked, the factory gets
/// the checked aliases and `true`; otherwise, if anything is explicitly
/// unchecked, it gets those and `false`.
pub struct AliasStateBuilder<F> {
    list: CheckboxList,
    factory: Box<dyn Fn(&[String], bool) -> F + Send + Sync>,
}

pub type AliasMatcherBuilder<T> = AliasStateBuilder<Matcher<T>>;
pub type AliasModifierBuilder<T> = AliasStateBuilder<Modifier<T>>;

impl<F> AliasStateBuilder<F> {
    pub fn new(
        list: CheckboxList,
        seed: Option<&CriteriaValue>,
        factory: impl Fn(&[String], bool) -> F + Send + Sync + 'static,
    ) -> Self {
        if let Some(states) = seed.and_then(CriteriaValue::as_alias_states) {
            for (alias, checked) in states {
                list.add_checked(alias.clone());
                list.set_checked(alias, *checked);
            }
        }
        Self {
            list,
            factory: Box::new(factory),
        }
    }
}

impl<F> FilterStateBuilder<F> for AliasStateBuilder<F> {
    fn build(&self) -> StateFilter<F> {
        let map = self.list.alias_state_map();
        let filter = if !map.selected.is_empty() {
            (self.factory)(&map.selected, true)
        } else if !map.disabled.is_empty() {
            (self.factory)(&map.disabled, false)
        } else {
            return StateFilter::Empty;
        };
        StateFilter::filled(CriteriaValue::AliasStates(map.states), filter)
    }
}

// ---------------------------------------------------------------------------
// Free text
// ---------------------------------------------------------------------------

pub struct TextBuilder<F> {
    field: TextField,
    factory: Box<dyn Fn(&str) -> F + Send + Sync>,
}

pub type TextMatcherBuilder<T> = TextBuilder<Matcher<T>>;
pub type TextModifierBuilder<T> = TextBuilder<Modifier<T>>;

impl<F> TextBuilder<F> {
    pub fn new(
        field: TextField,
        seed: Option<&CriteriaValue>,
        factory: impl Fn(&str) -> F + Send + Sync + 'static,
    ) -> Self {
        if let Some(text) = seed.and_then(CriteriaValue::as_text) {
            field.set_value(text);
        }
        Self {
            field,
            factory: Box::new(factory),
        }
    }
}

impl<F> FilterStateBuilder<F> for TextBuilder<F> {
    fn build(&self) -> StateFilter<F> {
        let value = self.field.value();
        let text = value.trim();
        if text.is_empty() {
            return StateFilter::Empty;
        }
        StateFilter::filled(CriteriaValue::Text(text.to_string()), (self.factory)(text))
    }
}

// ---------------------------------------------------------------------------
// Numeric range
// ---------------------------------------------------------------------------

pub struct RangeBuilder<F> {
    fields: RangeFields,
    factory: Box<dyn Fn(Range) -> F + Send + Sync>,
}

pub type RangeMatcherBuilder<T> = RangeBuilder<Matcher<T>>;
pub type RangeModifierBuilder<T> = RangeBuilder<Modifier<T>>;

impl<F> RangeBuilder<F> {
    pub fn new(
        fields: RangeFields,
        seed: Option<&CriteriaValue>,
        factory: impl Fn(Range) -> F + Send + Sync + 'static,
    ) -> Self {
        if let Some(range) = seed.and_then(CriteriaValue::as_range) {
            fields.from.set_value(range.from.to_string());
            if range.to > 0 {
                fields.to.set_value(range.to.to_string());
            }
        }
        Self {
            fields,
            factory: Box::new(factory),
        }
    }

    /// Current range, or `None` if the inputs are malformed, inverted, or
    /// both zero.
    pub fn range(&self) -> Option<Range> {
        let from = parse_bound(&self.fields.from.value())?;
        let to = parse_bound(&self.fields.to.value())?;
        if to > 0 && from > to {
            return None;
        }
        if from == 0 && to == 0 {
            return None;
        }
        Some(Range::new(from, to))
    }
}

/// A blank input is zero; anything other than a non-negative integer is
/// invalid.
fn parse_bound(text: &str) -> Option<u32> {
    let text = text.trim();
    if text.is_empty() {
        Some(0)
    } else {
        text.parse().ok()
    }
}

impl<F> FilterStateBuilder<F> for RangeBuilder<F> {
    fn build(&self) -> StateFilter<F> {
        match self.range() {
            Some(range) => StateFilter::filled(CriteriaValue::Range(range), (self.factory)(range)),
            None => StateFilter::Empty,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FilterState;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::collections::BTreeMap;

    fn range_builder(from: &str, to: &str) -> RangeBuilder<Matcher<u64>> {
        let fields = RangeFields::new();
        fields.from.set_value(from);
        fields.to.set_value(to);
        RangeBuilder::new(fields, None, |range| Matcher::new(move |x| range.contains(*x)))
    }

    #[rstest]
    #[case("100", "", Some(Range::new(100, 0)))]
    #[case("", "500", Some(Range::new(0, 500)))]
    #[case(" 100 ", "500", Some(Range::new(100, 500)))]
    #[case("500", "100", None)]
    #[case("", "", None)]
    #[case("0", "0", None)]
    #[case("-1", "10", None)]
    #[case("ten", "", None)]
    fn range_validation(#[case] from: &str, #[case] to: &str, #[case] expected: Option<Range>) {
        let builder = range_builder(from, to);
        assert_eq!(builder.range(), expected);
        assert_eq!(builder.build().is_empty(), expected.is_none());
    }

    #[test]
    fn checkbox_seeds_from_persisted_value() {
        let checkbox = Checkbox::default();
        let seed = CriteriaValue::Text(CHECKED.into());
        let builder = CheckboxBuilder::new(checkbox.clone(), Some(&seed), || Matcher::<u8>::same());
        assert!(checkbox.is_checked());
        assert_eq!(builder.build().state(), FilterState::Filled(seed));

        checkbox.set_checked(false);
        assert!(builder.build().is_empty());
    }

    #[test]
    fn text_is_trimmed() {
        let field = TextField::new("  java ");
        let builder = TextBuilder::new(field, None, |needle: &str| {
            let needle = needle.to_string();
            Matcher::new(move |title: &String| contains_ignore_case(title, &needle))
        });
        let StateFilter::Filled { criteria, filter } = builder.build() else {
            panic!("expected filled");
        };
        assert_eq!(criteria, CriteriaValue::Text("java".into()));
        assert!(filter.matches(&"Senior JAVA dev".to_string()));

        let blank = TextBuilder::new(TextField::new("   "), None, |_: &str| Matcher::<String>::same());
        assert!(blank.build().is_empty());
    }

    #[test]
    fn alias_builder_prefers_checked() {
        let mut seed = BTreeMap::new();
        seed.insert("a".to_string(), true);
        seed.insert("b".to_string(), false);
        let seed = CriteriaValue::AliasStates(seed);

        let builder = AliasStateBuilder::new(CheckboxList::new(), Some(&seed), |aliases, state| {
            let aliases = aliases.to_vec();
            Matcher::new(move |x: &String| aliases.contains(x) == state)
        });
        let StateFilter::Filled { criteria, filter } = builder.build() else {
            panic!("expected filled");
        };
        assert_eq!(criteria, seed);
        assert!(filter.matches(&"a".to_string()));
        assert!(!filter.matches(&"b".to_string()));
    }

    #[test]
    fn alias_builder_falls_back_to_unchecked() {
        let list = CheckboxList::new();
        list.add_checked("b");
        list.set_checked("b", false);
        let builder = AliasStateBuilder::new(list, None, |aliases, state| {
            let aliases = aliases.to_vec();
            Matcher::new(move |x: &String| aliases.contains(x) == state)
        });
        let StateFilter::Filled { filter, .. } = builder.build() else {
            panic!("expected filled");
        };
        assert!(filter.matches(&"a".to_string()));
        assert!(!filter.matches(&"b".to_string()));
    }

    #[test]
    fn empty_widgets_build_empty() {
        let multi = MultiSelectBuilder::new(CheckboxGroup::new(["x"]), None, |_| Matcher::<u8>::same());
        let alias = AliasStateBuilder::new(CheckboxList::new(), None, |_, _| Matcher::<u8>::same());
        assert!(multi.build().is_empty());
        assert!(alias.build().is_empty());
    }
}
