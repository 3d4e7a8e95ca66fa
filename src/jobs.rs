//! Jobs catalog: vacancies grouped by company.
//!
//! Matchers decide which companies appear at all (reviews, picked companies,
//! size, type). Modifiers then narrow each company's offices and vacancies,
//! in this order: city, title, newest, salary. City runs first so the later
//! vacancy filters only see vacancies valid for the remaining offices.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use chrono::{Local, NaiveDate};
use regex::Regex;

use sift_core::builder::{
    contains_ignore_case, AliasStateBuilder, CheckboxBuilder, MultiSelectBuilder, RangeBuilder,
    TextBuilder,
};
use sift_core::config::Config;
use sift_core::location::{LocationGrouper, LocationListMap};
use sift_core::widget::{Checkbox, CheckboxGroup, CheckboxList, RangeFields, TextField};
use sift_core::{
    AliasSet, ConfigError, ConverterMap, CriteriaConverter, CriteriaRegistry, CriterionName,
    FilterContainerBuilder, Location, Matcher, Modifier, Range, ResultContainer, UrlStateContainer,
};
use sift_feeds::{City, Company, Vacancy};

use crate::catalog::{Surfaces, Wiring};
use crate::surface::{ListSurface, MapSurface, Screens, StatsSurface};

static NON_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\D").expect("non-digit pattern is valid"));

/// Separator between the bounds of a salary text, e.g. `"$2000–3500"`.
const SALARY_SEPARATOR: char = '–';

// ---------------------------------------------------------------------------
// Criteria
// ---------------------------------------------------------------------------

/// Criterion names of the jobs catalog.
#[derive(Debug, Clone, Copy)]
pub struct JobCriteria {
    pub query: CriterionName,
    pub city: CriterionName,
    pub review: CriterionName,
    pub company: CriterionName,
    pub newest: CriterionName,
    pub salary: CriterionName,
    pub size: CriterionName,
    pub company_type: CriterionName,
}

impl JobCriteria {
    pub fn register(registry: &mut CriteriaRegistry) -> Result<Self, ConfigError> {
        Ok(Self {
            query: registry.register("vacancy-query")?,
            city: registry.register("vacancy-city")?,
            review: registry.register("company-review")?,
            company: registry.register("company")?,
            newest: registry.register("vacancy-newest")?,
            salary: registry.register("vacancy-salary")?,
            size: registry.register("company-size")?,
            company_type: registry.register("company-type")?,
        })
    }

    pub fn converters(&self) -> ConverterMap {
        [
            (self.review, CriteriaConverter::Identity),
            (self.query, CriteriaConverter::Identity),
            (self.company, CriteriaConverter::MultiCheckbox),
            (self.city, CriteriaConverter::MultiCheckbox),
            (self.newest, CriteriaConverter::Identity),
            (self.salary, CriteriaConverter::Range),
            (self.size, CriteriaConverter::MultiSelect),
            (self.company_type, CriteriaConverter::MultiSelect),
        ]
        .into()
    }
}

// ---------------------------------------------------------------------------
// Widgets
// ---------------------------------------------------------------------------

/// Input state of the jobs page.
#[derive(Debug, Clone, Default)]
pub struct JobWidgets {
    pub query: TextField,
    pub cities: CheckboxList,
    pub review: Checkbox,
    pub companies: CheckboxList,
    pub newest: Checkbox,
    pub salary: RangeFields,
    pub sizes: CheckboxGroup,
    pub types: CheckboxGroup,
}

impl JobWidgets {
    /// Offer the company sizes and types present in the data, and build the
    /// autocomplete index.
    pub fn populate(&self, companies: &[Company]) -> JobAutocomplete {
        let sizes: BTreeSet<u32> = companies.iter().map(|c| c.employee_count).collect();
        let types: BTreeSet<u32> = companies.iter().map(|c| c.company_type).collect();
        self.sizes.extend(sizes.iter().map(u32::to_string));
        self.types.extend(types.iter().map(u32::to_string));
        JobAutocomplete::new(companies)
    }

    /// Pick a company by its display name, as the autocomplete does.
    pub fn pick_company(&self, index: &JobAutocomplete, name: &str) -> bool {
        match index.find_company_alias(name) {
            Some(alias) => {
                self.companies.add_checked(alias);
                true
            }
            None => false,
        }
    }

    /// Pick a city by its display name, as the autocomplete does.
    pub fn pick_city(&self, index: &JobAutocomplete, name: &str) -> bool {
        match index.find_city_alias(name) {
            Some(alias) => {
                self.cities.add_checked(alias);
                true
            }
            None => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Wiring
// ---------------------------------------------------------------------------

/// Register the jobs criteria, decode `query` and wire every builder.
pub fn wire(config: &Config, query: &str) -> Result<Wiring<Company, JobWidgets>, ConfigError> {
    let mut registry = CriteriaRegistry::new();
    let criteria = JobCriteria::register(&mut registry)?;
    let url_state = UrlStateContainer::new(
        config.map.view(),
        query,
        registry.names(),
        criteria.converters(),
    )?
    .with_path(config.url.path.clone());

    let widgets = JobWidgets::default();
    let newest_days = config.jobs.newest_days;
    let seed = |name| url_state.criteria(name);

    let filters = FilterContainerBuilder::new()
        .with_matcher(
            criteria.review,
            CheckboxBuilder::new(widgets.review.clone(), seed(criteria.review), review_exists),
        )
        .with_matcher(
            criteria.company,
            AliasStateBuilder::new(widgets.companies.clone(), seed(criteria.company), same_company),
        )
        .with_matcher(
            criteria.size,
            MultiSelectBuilder::new(widgets.sizes.clone(), seed(criteria.size), company_size_in),
        )
        .with_matcher(
            criteria.company_type,
            MultiSelectBuilder::new(widgets.types.clone(), seed(criteria.company_type), company_type_in),
        )
        .with_modifier(
            criteria.city,
            AliasStateBuilder::new(widgets.cities.clone(), seed(criteria.city), office_city),
        )
        .with_modifier(
            criteria.query,
            TextBuilder::new(widgets.query.clone(), seed(criteria.query), vacancy_title),
        )
        .with_modifier(
            criteria.newest,
            CheckboxBuilder::new(widgets.newest.clone(), seed(criteria.newest), move || {
                vacancy_newest(published_since(Local::now().date_naive(), newest_days))
            }),
        )
        .with_modifier(
            criteria.salary,
            RangeBuilder::new(widgets.salary.clone(), seed(criteria.salary), vacancy_salary),
        );

    Ok(Wiring {
        url_state,
        filters,
        widgets,
    })
}

/// Text surfaces for the jobs catalog.
pub fn surfaces(config: &Config, screens: &Screens) -> Surfaces<Company> {
    Surfaces {
        map: Box::new(MapSurface::new(
            screens.map.clone(),
            CompanyLocationGrouper,
            |company: &Company| company.name.clone(),
        )),
        list: Box::new(ListSurface::new(
            screens.list.clone(),
            config.list.limit,
            |company: &Company, center: &Location| {
                company.offices.first().map(|office| office.location.distance(center))
            },
            list_lines,
        )),
        stats: Box::new(StatsSurface::new(screens.stats.clone(), |result: &ResultContainer<Company>| {
            JobStats::of(result).to_string()
        })),
    }
}

fn list_lines(company: &Company) -> Vec<String> {
    let mut lines = vec![format!("{}  {}", company.name, company.url())];
    lines.extend(company.vacancies.iter().map(|vacancy| {
        if vacancy.salary.is_empty() {
            format!("  {}", vacancy.title)
        } else {
            format!("  {} ({})", vacancy.title, vacancy.salary)
        }
    }));
    lines
}

// ---------------------------------------------------------------------------
// Matchers
// ---------------------------------------------------------------------------

pub fn review_exists() -> Matcher<Company> {
    Matcher::new(|company: &Company| company.review_count > 0)
}

/// Companies whose alias is (`state == true`) or is not in `aliases`.
pub fn same_company(aliases: &[String], state: bool) -> Matcher<Company> {
    let aliases = AliasSet::new(aliases.iter().cloned());
    Matcher::new(move |company: &Company| aliases.contains(&company.alias) == state)
}

pub fn company_size_in(aliases: &[String]) -> Matcher<Company> {
    let aliases = AliasSet::new(aliases.iter().cloned());
    Matcher::new(move |company: &Company| aliases.contains(&company.employee_count.to_string()))
}

pub fn company_type_in(aliases: &[String]) -> Matcher<Company> {
    let aliases = AliasSet::new(aliases.iter().cloned());
    Matcher::new(move |company: &Company| aliases.contains(&company.company_type.to_string()))
}

// ---------------------------------------------------------------------------
// Modifiers
// ---------------------------------------------------------------------------

/// Narrow a company's vacancies; companies left without any are dropped.
pub fn vacancies_where(keep: impl Fn(&Vacancy) -> bool + Send + Sync + 'static) -> Modifier<Company> {
    Modifier::narrow(|company: &mut Company| &mut company.vacancies, keep)
}

/// Keep the offices whose city alias is (`state == true`) or is not in
/// `aliases`, then the vacancies workable from those offices.
pub fn office_city(aliases: &[String], state: bool) -> Modifier<Company> {
    let aliases = AliasSet::new(aliases.iter().cloned());
    Modifier::new(move |mut company: Company| {
        company
            .offices
            .retain(|office| aliases.contains(&office.city.alias) == state);
        if company.offices.is_empty() {
            return None;
        }

        let cities: Vec<City> = company.offices.iter().map(|office| office.city.clone()).collect();
        company
            .vacancies
            .retain(|vacancy| !vacancy.exists_office || vacancy.in_cities(cities.iter()));
        if company.vacancies.is_empty() {
            return None;
        }
        Some(company)
    })
}

pub fn vacancy_title(query: &str) -> Modifier<Company> {
    let query = query.to_string();
    vacancies_where(move |vacancy| contains_ignore_case(&vacancy.title, &query))
}

/// Vacancies published on or after `since` (`YYYY-MM-DD`).
pub fn vacancy_newest(since: String) -> Modifier<Company> {
    vacancies_where(move |vacancy| vacancy.published.as_str() >= since.as_str())
}

pub fn published_since(today: NaiveDate, days: u32) -> String {
    let since = today - chrono::Duration::days(i64::from(days));
    since.format("%Y-%m-%d").to_string()
}

pub fn vacancy_salary(range: Range) -> Modifier<Company> {
    vacancies_where(move |vacancy| salary_in_range(&vacancy.salary, range))
}

/// Whether a salary text such as `"$2000–3500"` overlaps `range`.
///
/// Each side of the en dash is reduced to its digits. The text overlaps if
/// any side falls inside the range, or if either range bound falls between
/// the two sides. An open range (`to == 0`) has no upper bound; an empty
/// salary never matches.
pub fn salary_in_range(text: &str, range: Range) -> bool {
    if text.is_empty() {
        return false;
    }

    let salaries: Vec<Option<u64>> = text
        .split(SALARY_SEPARATOR)
        .map(|part| NON_DIGITS.replace_all(part, "").parse().ok())
        .collect();

    if salaries.iter().flatten().any(|salary| range.contains(*salary)) {
        return true;
    }

    let low = salaries.first().copied().flatten();
    let high = salaries.get(1).copied().flatten().or(if salaries.len() == 1 { low } else { None });
    match (low, high) {
        (Some(low), Some(high)) => {
            let between = |value: u64| low <= value && value <= high;
            between(u64::from(range.from)) || between(range.upper())
        }
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Map grouping
// ---------------------------------------------------------------------------

/// One map entry per office that has vacancies workable from it. Each entry
/// is the company narrowed to that office and those vacancies.
#[derive(Debug, Default, Clone, Copy)]
pub struct CompanyLocationGrouper;

impl LocationGrouper<Company> for CompanyLocationGrouper {
    fn group(&self, companies: &[Company]) -> LocationListMap<Company> {
        let mut map = LocationListMap::new();
        for company in companies {
            for office in &company.offices {
                let vacancies = company.office_vacancies(office);
                if vacancies.is_empty() {
                    continue;
                }
                map.add(
                    office.location,
                    Company {
                        offices: vec![office.clone()],
                        vacancies,
                        ..company.clone()
                    },
                );
            }
        }
        map
    }
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobStats {
    pub companies: usize,
    pub vacancies: usize,
    pub duration_ms: u128,
}

impl JobStats {
    pub fn of(result: &ResultContainer<Company>) -> Self {
        Self {
            companies: result.count(),
            vacancies: result.records().iter().map(|c| c.vacancies.len()).sum(),
            duration_ms: result.duration_ms(),
        }
    }
}

impl std::fmt::Display for JobStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} vacancies in {} companies ({} ms)",
            self.vacancies, self.companies, self.duration_ms
        )
    }
}

// ---------------------------------------------------------------------------
// Autocomplete
// ---------------------------------------------------------------------------

/// Names offered by the company, vacancy and city pickers.
#[derive(Debug, Clone, Default)]
pub struct JobAutocomplete {
    companies: BTreeMap<String, String>,
    vacancies: BTreeSet<String>,
    cities: Vec<City>,
}

impl JobAutocomplete {
    pub fn new(companies: &[Company]) -> Self {
        let mut index = Self::default();
        for company in companies {
            index
                .companies
                .insert(company.name.clone(), company.alias.clone());
            for vacancy in &company.vacancies {
                index.vacancies.insert(vacancy.title.clone());
                for city in &vacancy.cities {
                    if !city.alias.is_empty() && !index.cities.iter().any(|c| c.name == city.name) {
                        index.cities.push(city.clone());
                    }
                }
            }
        }
        index
    }

    pub fn company_names(&self) -> impl Iterator<Item = &str> {
        self.companies.keys().map(String::as_str)
    }

    pub fn vacancy_titles(&self) -> impl Iterator<Item = &str> {
        self.vacancies.iter().map(String::as_str)
    }

    /// Unique by name, first seen wins; cities without an alias are skipped.
    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    pub fn find_company_alias(&self, name: &str) -> Option<&str> {
        self.companies.get(name).map(String::as_str)
    }

    pub fn find_city_alias(&self, name: &str) -> Option<&str> {
        self.cities
            .iter()
            .find(|city| city.name == name)
            .map(|city| city.alias.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
