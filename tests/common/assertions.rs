//! Domain-specific assertions for sift harnesses.
//!
//! These wrap `pretty_assertions` and compare records by alias, so a failure
//! shows which records the filter let through rather than a full struct dump.

use pretty_assertions::assert_eq;
use sift_feeds::{Company, Course};

/// Records that carry a stable alias.
pub trait Aliased {
    fn alias(&self) -> &str;
}

impl Aliased for Company {
    fn alias(&self) -> &str {
        &self.alias
    }
}

impl Aliased for Course {
    fn alias(&self) -> &str {
        &self.alias
    }
}

pub fn aliases_of<T: Aliased>(records: &[T]) -> Vec<String> {
    records.iter().map(|record| record.alias().to_string()).collect()
}

/// Assert the result holds exactly `expected`, in order.
#[track_caller]
pub fn assert_aliases<T: Aliased>(records: &[T], expected: &[&str]) {
    assert_eq!(aliases_of(records), expected, "unexpected records in result");
}

/// Vacancy titles of `company`, in feed order.
pub fn vacancy_titles(company: &Company) -> Vec<&str> {
    company.vacancies.iter().map(|v| v.title.as_str()).collect()
}

/// Direction titles of `course`, in feed order.
pub fn direction_titles(course: &Course) -> Vec<&str> {
    course.directions.iter().map(|d| d.title.as_str()).collect()
}

/// Find a record by alias, failing the test if it is missing.
#[track_caller]
pub fn find<'a, T: Aliased>(records: &'a [T], alias: &str) -> &'a T {
    records
        .iter()
        .find(|record| record.alias() == alias)
        .unwrap_or_else(|| panic!("no record {alias:?} in {:?}", aliases_of(records)))
}
