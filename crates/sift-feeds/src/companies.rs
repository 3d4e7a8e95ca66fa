//! Job postings grouped by company.
//!
//! The feed packs every record as a positional array to keep the blob small:
//!
//! ```text
//! company = [alias, name, [office...], [vacancy...], review_count, employee_count, type]
//! office  = [city, address, [latitude, longitude]]
//! vacancy = [id, title, [city...], exists_office, salary, published]
//! city    = [alias, name]
//! ```

use serde::Deserialize;
use sift_core::Location;

use crate::error::FeedError;
use crate::Archiver;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct City {
    pub alias: String,
    pub name: String,
}

impl City {
    pub fn new(alias: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            name: name.into(),
        }
    }

    /// Cities are the same if either the alias or the display name agrees.
    pub fn same(&self, other: &City) -> bool {
        self.alias == other.alias || self.name == other.name
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Office {
    pub city: City,
    pub address: String,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vacancy {
    pub id: String,
    pub title: String,
    pub cities: Vec<City>,
    /// False for remote positions that are not tied to an office.
    pub exists_office: bool,
    /// Free-form, e.g. `"$2000–3500"`. Empty when unknown.
    pub salary: String,
    /// `YYYY-MM-DD`.
    pub published: String,
}

impl Vacancy {
    /// Whether this vacancy can be worked from any of `cities`.
    pub fn in_cities<'a>(&self, mut cities: impl Iterator<Item = &'a City>) -> bool {
        cities.any(|office_city| self.cities.iter().any(|city| city.same(office_city)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Company {
    pub alias: String,
    pub name: String,
    pub offices: Vec<Office>,
    pub vacancies: Vec<Vacancy>,
    pub review_count: u32,
    pub employee_count: u32,
    pub company_type: u32,
}

impl Company {
    pub fn url(&self) -> String {
        format!("https://jobs.dou.ua/companies/{}/", self.alias)
    }

    pub fn vacancy_url(&self, vacancy: &Vacancy) -> String {
        format!("https://jobs.dou.ua/companies/{}/vacancies/{}/", self.alias, vacancy.id)
    }

    /// Vacancies that can be worked at `office`: remote ones, and those
    /// listing the office's city.
    pub fn office_vacancies(&self, office: &Office) -> Vec<Vacancy> {
        self.vacancies
            .iter()
            .filter(|vacancy| !vacancy.exists_office || vacancy.in_cities(std::iter::once(&office.city)))
            .cloned()
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct RawCity(String, String);

#[derive(Deserialize)]
struct RawOffice(RawCity, String, (f64, f64));

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u64),
    Text(String),
}

#[derive(Deserialize)]
struct RawVacancy(RawId, String, Vec<RawCity>, bool, Option<String>, String);

#[derive(Deserialize)]
struct RawCompany(String, String, Vec<RawOffice>, Vec<RawVacancy>, u32, u32, u32);

impl From<RawCity> for City {
    fn from(RawCity(alias, name): RawCity) -> Self {
        City { alias, name }
    }
}

impl From<RawOffice> for Office {
    fn from(RawOffice(city, address, (latitude, longitude)): RawOffice) -> Self {
        Office {
            city: city.into(),
            address,
            location: Location::new(latitude, longitude),
        }
    }
}

impl From<RawVacancy> for Vacancy {
    fn from(RawVacancy(id, title, cities, exists_office, salary, published): RawVacancy) -> Self {
        Vacancy {
            id: match id {
                RawId::Number(n) => n.to_string(),
                RawId::Text(s) => s,
            },
            title,
            cities: cities.into_iter().map(City::from).collect(),
            exists_office,
            salary: salary.unwrap_or_default(),
            published,
        }
    }
}

impl From<RawCompany> for Company {
    fn from(raw: RawCompany) -> Self {
        let RawCompany(alias, name, offices, vacancies, review_count, employee_count, company_type) = raw;
        Company {
            alias,
            name,
            offices: offices.into_iter().map(Office::from).collect(),
            vacancies: vacancies.into_iter().map(Vacancy::from).collect(),
            review_count,
            employee_count,
            company_type,
        }
    }
}

/// Unzips the positional company feed.
#[derive(Debug, Default, Clone, Copy)]
pub struct CompanyArchiver;

impl Archiver for CompanyArchiver {
    type Record = Company;

    fn unzip(&self, blob: serde_json::Value) -> Result<Vec<Company>, FeedError> {
        let raw: Vec<RawCompany> = serde_json::from_value(blob)?;
        Ok(raw.into_iter().map(Company::from).collect())
    }
}
