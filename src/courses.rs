//! Courses catalog: schools and their study directions.
//!
//! Matchers pick schools; modifiers narrow a school's directions or cities
//! and drop the school once nothing is left.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use sift_core::builder::{
    contains_ignore_case, AliasStateBuilder, CheckboxBuilder, MultiSelectBuilder, TextBuilder,
};
use sift_core::config::Config;
use sift_core::location::{LocationGrouper, LocationListMap};
use sift_core::widget::{Checkbox, CheckboxGroup, CheckboxList, TextField};
use sift_core::{
    AliasSet, ConfigError, ConverterMap, CriteriaConverter, CriteriaRegistry, CriterionName,
    FilterContainerBuilder, Location, Matcher, Modifier, ResultContainer, UrlStateContainer,
};
use sift_feeds::{Course, CourseCity, Direction};

use crate::catalog::{Surfaces, Wiring};
use crate::surface::{ListSurface, MapSurface, Screens, StatsSurface};

/// `free_status` of a school whose every direction is free.
const FREE: i64 = 1;

// ---------------------------------------------------------------------------
// Criteria
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct CourseCriteria {
    pub query: CriterionName,
    pub school: CriterionName,
    pub city: CriterionName,
    pub category: CriterionName,
    pub free: CriterionName,
    pub employment_guarantee: CriterionName,
    pub by_company: CriterionName,
    pub plan_exists: CriterionName,
    pub teacher_works: CriterionName,
}

impl CourseCriteria {
    pub fn register(registry: &mut CriteriaRegistry) -> Result<Self, ConfigError> {
        Ok(Self {
            query: registry.register("direction-query")?,
            school: registry.register("school-alias")?,
            city: registry.register("city-alias")?,
            category: registry.register("direction-category-alias")?,
            free: registry.register("free")?,
            employment_guarantee: registry.register("employment-guarantee")?,
            by_company: registry.register("school-by-company")?,
            plan_exists: registry.register("exists-plan")?,
            teacher_works: registry.register("teacher-works")?,
        })
    }

    pub fn converters(&self) -> ConverterMap {
        [
            (self.query, CriteriaConverter::Identity),
            (self.school, CriteriaConverter::MultiCheckbox),
            (self.city, CriteriaConverter::MultiSelect),
            (self.category, CriteriaConverter::MultiSelect),
            (self.free, CriteriaConverter::Identity),
            (self.employment_guarantee, CriteriaConverter::Identity),
            (self.by_company, CriteriaConverter::Identity),
            (self.plan_exists, CriteriaConverter::Identity),
            (self.teacher_works, CriteriaConverter::Identity),
        ]
        .into()
    }
}

// ---------------------------------------------------------------------------
// Widgets
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct CourseWidgets {
    pub query: TextField,
    pub schools: CheckboxList,
    pub cities: CheckboxGroup,
    pub categories: CheckboxGroup,
    pub free: Checkbox,
    pub employment_guarantee: Checkbox,
    pub by_company: Checkbox,
    pub plan_exists: Checkbox,
    pub teacher_works: Checkbox,
}

impl CourseWidgets {
    /// Offer the cities and direction categories present in the data, most
    /// frequent first, and build the autocomplete index.
    pub fn populate(&self, courses: &[Course]) -> CourseAutocomplete {
        self.cities
            .extend(city_options(courses).into_iter().map(|option| option.alias));
        self.categories
            .extend(category_options(courses).into_iter().map(|option| option.alias));
        CourseAutocomplete::new(courses)
    }

    /// Pick a school by its display name, as the autocomplete does.
    pub fn pick_school(&self, index: &CourseAutocomplete, name: &str) -> bool {
        match index.find_school_alias(name) {
            Some(alias) => {
                self.schools.add_checked(alias);
                true
            }
            None => false,
        }
    }
}

/// A filter option with the number of records behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionCount {
    pub alias: String,
    pub name: String,
    pub count: usize,
}

fn rank(counts: HashMap<String, OptionCount>) -> Vec<OptionCount> {
    let mut options: Vec<OptionCount> = counts.into_values().collect();
    options.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| b.name.cmp(&a.name)));
    options
}

fn count(counts: &mut HashMap<String, OptionCount>, alias: &str, name: &str, value: usize) {
    counts
        .entry(alias.to_string())
        .or_insert_with(|| OptionCount {
            alias: alias.to_string(),
            name: name.to_string(),
            count: 0,
        })
        .count += value;
}

/// Cities weighted by the number of directions taught there.
pub fn city_options(courses: &[Course]) -> Vec<OptionCount> {
    let mut counts = HashMap::new();
    for course in courses {
        for city in &course.cities {
            count(&mut counts, &city.alias, &city.name, course.directions.len());
        }
    }
    rank(counts)
}

/// Direction categories weighted by their number of directions.
pub fn category_options(courses: &[Course]) -> Vec<OptionCount> {
    let mut counts = HashMap::new();
    for direction in courses.iter().flat_map(|course| &course.directions) {
        count(&mut counts, &direction.category.alias, &direction.category.name, 1);
    }
    rank(counts)
}

// ---------------------------------------------------------------------------
// Wiring
// ---------------------------------------------------------------------------

pub fn wire(config: &Config, query: &str) -> Result<Wiring<Course, CourseWidgets>, ConfigError> {
    let mut registry = CriteriaRegistry::new();
    let criteria = CourseCriteria::register(&mut registry)?;
    let url_state = UrlStateContainer::new(
        config.map.view(),
        query,
        registry.names(),
        criteria.converters(),
    )?
    .with_path(config.url.path.clone());

    let widgets = CourseWidgets::default();
    let seed = |name| url_state.criteria(name);

    let filters = FilterContainerBuilder::new()
        .with_matcher(
            criteria.school,
            AliasStateBuilder::new(widgets.schools.clone(), seed(criteria.school), same_school),
        )
        .with_matcher(
            criteria.free,
            CheckboxBuilder::new(widgets.free.clone(), seed(criteria.free), free),
        )
        .with_matcher(
            criteria.plan_exists,
            CheckboxBuilder::new(widgets.plan_exists.clone(), seed(criteria.plan_exists), plan_exists),
        )
        .with_matcher(
            criteria.by_company,
            CheckboxBuilder::new(widgets.by_company.clone(), seed(criteria.by_company), by_company),
        )
        .with_modifier(
            criteria.query,
            TextBuilder::new(widgets.query.clone(), seed(criteria.query), direction_title),
        )
        .with_modifier(
            criteria.category,
            MultiSelectBuilder::new(widgets.categories.clone(), seed(criteria.category), direction_category),
        )
        .with_modifier(
            criteria.city,
            MultiSelectBuilder::new(widgets.cities.clone(), seed(criteria.city), city_alias),
        )
        .with_modifier(
            criteria.teacher_works,
            CheckboxBuilder::new(widgets.teacher_works.clone(), seed(criteria.teacher_works), teacher_works),
        )
        .with_modifier(
            criteria.employment_guarantee,
            CheckboxBuilder::new(
                widgets.employment_guarantee.clone(),
                seed(criteria.employment_guarantee),
                employment_guarantee,
            ),
        );

    Ok(Wiring {
        url_state,
        filters,
        widgets,
    })
}

pub fn surfaces(config: &Config, screens: &Screens) -> Surfaces<Course> {
    Surfaces {
        map: Box::new(MapSurface::new(
            screens.map.clone(),
            CourseLocationGrouper,
            |course: &Course| course.name.clone(),
        )),
        list: Box::new(ListSurface::new(
            screens.list.clone(),
            config.list.limit,
            nearest_location,
            list_lines,
        )),
        stats: Box::new(StatsSurface::new(screens.stats.clone(), |result: &ResultContainer<Course>| {
            CourseStats::of(result).to_string()
        })),
    }
}

/// Squared distance from `center` to the school's nearest location.
pub fn nearest_location(course: &Course, center: &Location) -> Option<f64> {
    course
        .locations()
        .map(|location| location.distance(center))
        .min_by(f64::total_cmp)
}

fn list_lines(course: &Course) -> Vec<String> {
    let mut lines = vec![format!("{}  {}", course.name, course.url)];
    lines.extend(course.directions.iter().map(|direction| format!("  {}", direction.title)));
    lines
}

// ---------------------------------------------------------------------------
// Matchers
// ---------------------------------------------------------------------------

pub fn same_school(aliases: &[String], state: bool) -> Matcher<Course> {
    let aliases = AliasSet::new(aliases.iter().cloned());
    Matcher::new(move |course: &Course| aliases.contains(&course.alias) == state)
}

pub fn free() -> Matcher<Course> {
    Matcher::new(|course: &Course| course.free_status == FREE)
}

pub fn plan_exists() -> Matcher<Course> {
    Matcher::new(|course: &Course| course.plan_exists)
}

pub fn by_company() -> Matcher<Course> {
    Matcher::new(|course: &Course| course.is_company)
}

// ---------------------------------------------------------------------------
// Modifiers
// ---------------------------------------------------------------------------

/// Narrow a school's directions; schools left without any are dropped.
pub fn directions_where(keep: impl Fn(&Direction) -> bool + Send + Sync + 'static) -> Modifier<Course> {
    Modifier::narrow(|course: &mut Course| &mut course.directions, keep)
}

pub fn direction_title(query: &str) -> Modifier<Course> {
    let query = query.to_string();
    directions_where(move |direction| contains_ignore_case(&direction.title, &query))
}

pub fn direction_category(aliases: &[String]) -> Modifier<Course> {
    let aliases = AliasSet::new(aliases.iter().cloned());
    directions_where(move |direction| aliases.contains(&direction.category.alias))
}

pub fn city_alias(aliases: &[String]) -> Modifier<Course> {
    let aliases = AliasSet::new(aliases.iter().cloned());
    Modifier::narrow(
        |course: &mut Course| &mut course.cities,
        move |city: &CourseCity| aliases.contains(&city.alias),
    )
}

pub fn teacher_works() -> Modifier<Course> {
    directions_where(Direction::has_working_teacher)
}

pub fn employment_guarantee() -> Modifier<Course> {
    directions_where(|direction| direction.employment_guarantee)
}

// ---------------------------------------------------------------------------
// Map grouping
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone, Copy)]
pub struct CourseLocationGrouper;

impl LocationGrouper<Course> for CourseLocationGrouper {
    fn group(&self, courses: &[Course]) -> LocationListMap<Course> {
        let mut map = LocationListMap::new();
        for course in courses {
            for location in course.locations() {
                map.add(*location, course.clone());
            }
        }
        map
    }
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CourseStats {
    pub schools: usize,
    pub categories: usize,
    pub cities: usize,
}

impl CourseStats {
    pub fn of(result: &ResultContainer<Course>) -> Self {
        let courses = result.records();
        let unique = |aliases: Vec<&str>| aliases.into_iter().collect::<BTreeSet<_>>().len();
        Self {
            schools: unique(courses.iter().map(|c| c.alias.as_str()).collect()),
            categories: unique(
                courses
                    .iter()
                    .flat_map(|c| &c.directions)
                    .map(|d| d.category.alias.as_str())
                    .collect(),
            ),
            cities: unique(
                courses
                    .iter()
                    .flat_map(|c| &c.cities)
                    .map(|city| city.alias.as_str())
                    .collect(),
            ),
        }
    }
}

impl std::fmt::Display for CourseStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} schools, {} categories, {} cities",
            self.schools, self.categories, self.cities
        )
    }
}

// ---------------------------------------------------------------------------
// Autocomplete
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct CourseAutocomplete {
    schools: BTreeMap<String, String>,
    directions: BTreeSet<String>,
}

impl CourseAutocomplete {
    pub fn new(courses: &[Course]) -> Self {
        let mut index = Self::default();
        for course in courses {
            index.schools.insert(course.name.clone(), course.alias.clone());
            index
                .directions
                .extend(course.directions.iter().map(|d| d.title.clone()));
        }
        index
    }

    pub fn school_names(&self) -> impl Iterator<Item = &str> {
        self.schools.keys().map(String::as_str)
    }

    pub fn direction_titles(&self) -> impl Iterator<Item = &str> {
        self.directions.iter().map(String::as_str)
    }

    pub fn find_school_alias(&self, name: &str) -> Option<&str> {
        self.schools.get(name).map(String::as_str)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
