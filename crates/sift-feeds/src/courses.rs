//! Course and school listings.
//!
//! Unlike the company feed, the course feed is plain JSON objects, so the
//! archiver is a straight serde decode.

use serde::Deserialize;
use sift_core::Location;

use crate::error::FeedError;
use crate::Archiver;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub alias: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Teacher {
    /// Works in the industry.
    #[serde(default)]
    pub job: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Direction {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub category: Category,
    /// `None` when the school publishes no teacher list.
    #[serde(default)]
    pub teachers: Option<Vec<Teacher>>,
    #[serde(default)]
    pub employment_guarantee: bool,
}

impl Direction {
    pub fn has_working_teacher(&self) -> bool {
        self.teachers
            .as_deref()
            .is_some_and(|teachers| teachers.iter().any(|teacher| teacher.job))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CourseCity {
    #[serde(default)]
    pub alias: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub locations: Vec<Location>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Course {
    pub alias: String,
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub directions: Vec<Direction>,
    #[serde(default)]
    pub cities: Vec<CourseCity>,
    /// 1 when every direction is free of charge.
    #[serde(default)]
    pub free_status: i64,
    #[serde(default)]
    pub plan_exists: bool,
    #[serde(default)]
    pub is_company: bool,
}

impl Course {
    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.cities.iter().flat_map(|city| city.locations.iter())
    }
}

/// Decodes the course feed.
#[derive(Debug, Default, Clone, Copy)]
pub struct CourseArchiver;

impl Archiver for CourseArchiver {
    type Record = Course;

    fn unzip(&self, blob: serde_json::Value) -> Result<Vec<Course>, FeedError> {
        Ok(serde_json::from_value(blob)?)
    }
}
