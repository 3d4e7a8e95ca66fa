//! Test builders: ergonomic constructors for companies, vacancies and
//! courses.
//!
//! These builders are designed for readability in test assertions, not for
//! production use.

use sift_core::Location;
use sift_feeds::{Category, City, Company, Course, CourseCity, Direction, Office, Teacher, Vacancy};

/// A city whose display name is the alias upper-cased.
pub fn city(alias: &str) -> City {
    City::new(alias, alias.to_uppercase())
}

// ---------------------------------------------------------------------------
// CompanyBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`Company`] fixtures.
///
/// ```rust
/// let company = CompanyBuilder::new("acme")
///     .office("kyiv", 50.45, 30.52)
///     .vacancy(VacancyBuilder::new("Rust developer").city("kyiv"))
///     .reviews(3)
///     .build();
/// ```
pub struct CompanyBuilder {
    company: Company,
}

impl CompanyBuilder {
    pub fn new(alias: &str) -> Self {
        Self {
            company: Company {
                alias: alias.to_string(),
                name: alias.to_uppercase(),
                offices: Vec::new(),
                vacancies: Vec::new(),
                review_count: 0,
                employee_count: 0,
                company_type: 0,
            },
        }
    }

    pub fn office(mut self, city_alias: &str, latitude: f64, longitude: f64) -> Self {
        self.company.offices.push(Office {
            city: city(city_alias),
            address: format!("{city_alias} street"),
            location: Location::new(latitude, longitude),
        });
        self
    }

    pub fn vacancy(mut self, vacancy: VacancyBuilder) -> Self {
        self.company.vacancies.push(vacancy.build());
        self
    }

    pub fn reviews(mut self, count: u32) -> Self {
        self.company.review_count = count;
        self
    }

    pub fn size(mut self, employees: u32) -> Self {
        self.company.employee_count = employees;
        self
    }

    pub fn kind(mut self, company_type: u32) -> Self {
        self.company.company_type = company_type;
        self
    }

    pub fn build(self) -> Company {
        self.company
    }
}

// ---------------------------------------------------------------------------
// VacancyBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`Vacancy`]. Office-bound unless [`remote`](Self::remote)
/// is called.
pub struct VacancyBuilder {
    vacancy: Vacancy,
}

impl VacancyBuilder {
    pub fn new(title: &str) -> Self {
        Self {
            vacancy: Vacancy {
                id: title.to_lowercase().replace(' ', "-"),
                title: title.to_string(),
                cities: Vec::new(),
                exists_office: true,
                salary: String::new(),
                published: "2024-01-01".to_string(),
            },
        }
    }

    pub fn city(mut self, alias: &str) -> Self {
        self.vacancy.cities.push(city(alias));
        self
    }

    pub fn remote(mut self) -> Self {
        self.vacancy.exists_office = false;
        self
    }

    pub fn salary(mut self, salary: &str) -> Self {
        self.vacancy.salary = salary.to_string();
        self
    }

    pub fn published(mut self, date: &str) -> Self {
        self.vacancy.published = date.to_string();
        self
    }

    pub fn build(self) -> Vacancy {
        self.vacancy
    }
}

// ---------------------------------------------------------------------------
// CourseBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`Course`] fixtures.
pub struct CourseBuilder {
    course: Course,
}

impl CourseBuilder {
    pub fn new(alias: &str) -> Self {
        Self {
            course: Course {
                alias: alias.to_string(),
                name: alias.to_uppercase(),
                url: format!("https://{alias}.example/"),
                ..Course::default()
            },
        }
    }

    /// Add a direction in `category`, taught by a working teacher if
    /// `working_teacher` is set.
    pub fn direction(mut self, title: &str, category: &str, working_teacher: bool) -> Self {
        self.course.directions.push(Direction {
            title: title.to_string(),
            url: String::new(),
            category: Category {
                alias: category.to_string(),
                name: category.to_uppercase(),
            },
            teachers: Some(vec![Teacher {
                job: working_teacher,
            }]),
            employment_guarantee: false,
        });
        self
    }

    /// Mark the most recently added direction as guaranteeing employment.
    pub fn guaranteed(mut self) -> Self {
        if let Some(direction) = self.course.directions.last_mut() {
            direction.employment_guarantee = true;
        }
        self
    }

    pub fn city(mut self, alias: &str, latitude: f64, longitude: f64) -> Self {
        self.course.cities.push(CourseCity {
            alias: alias.to_string(),
            name: alias.to_uppercase(),
            locations: vec![Location::new(latitude, longitude)],
        });
        self
    }

    pub fn free(mut self) -> Self {
        self.course.free_status = 1;
        self
    }

    pub fn plan(mut self) -> Self {
        self.course.plan_exists = true;
        self
    }

    pub fn by_company(mut self) -> Self {
        self.course.is_company = true;
        self
    }

    pub fn build(self) -> Course {
        self.course
    }
}
