//! Static feeds used across harnesses.
//!
//! The company feed is in the positional wire format; the course feed is
//! plain objects. Decoded views of both are provided so tests can start from
//! records or from the raw blob.
//!
//! | company | office(s)    | reviews | size | type | vacancies                                   |
//! |---------|--------------|---------|------|------|---------------------------------------------|
//! | acme    | kyiv         | 5       | 200  | 1    | Rust developer (kyiv, 3000–5000), Remote QA |
//! | globex  | lviv         | 0       | 50   | 2    | Java developer (lviv, 2000–2500)            |
//! | initech | kyiv, lviv   | 2       | 1000 | 1    | Senior Rust engineer (kyiv), Java lead (lviv, 4000) |

use serde_json::{json, Value};
use sift_feeds::{Archiver, Company, CompanyArchiver, Course, CourseArchiver};

/// Coordinates of the fixture offices.
pub const KYIV: (f64, f64) = (50.45, 30.52);
pub const LVIV: (f64, f64) = (49.84, 24.03);

pub fn companies_blob() -> Value {
    json!([
        [
            "acme",
            "Acme",
            [[["kyiv", "Kyiv"], "Khreshchatyk 1", [50.45, 30.52]]],
            [
                [101, "Rust developer", [["kyiv", "Kyiv"]], true, "$3000–5000", "2024-03-01"],
                [102, "Remote QA", [], false, null, "2024-01-10"]
            ],
            5,
            200,
            1
        ],
        [
            "globex",
            "Globex",
            [[["lviv", "Lviv"], "Rynok 1", [49.84, 24.03]]],
            [
                [201, "Java developer", [["lviv", "Lviv"]], true, "$2000–2500", "2024-02-20"]
            ],
            0,
            50,
            2
        ],
        [
            "initech",
            "Initech",
            [
                [["kyiv", "Kyiv"], "Podil 3", [50.40, 30.60]],
                [["lviv", "Lviv"], "Zelena 7", [49.80, 24.00]]
            ],
            [
                [301, "Senior Rust engineer", [["kyiv", "Kyiv"]], true, "", "2024-03-02"],
                [302, "Java lead", [["lviv", "Lviv"]], true, "4000", "2024-02-01"]
            ],
            2,
            1000,
            1
        ]
    ])
}

pub fn three_companies() -> Vec<Company> {
    CompanyArchiver
        .unzip(companies_blob())
        .expect("company fixture decodes")
}

pub fn courses_blob() -> Value {
    json!([
        {
            "alias": "rust-school",
            "name": "Rust School",
            "url": "https://rust-school.example/",
            "free_status": 1,
            "plan_exists": true,
            "is_company": false,
            "directions": [
                {
                    "title": "Rust basics",
                    "category": {"alias": "dev", "name": "Development"},
                    "teachers": [{"job": true}],
                    "employment_guarantee": false
                },
                {
                    "title": "Testing in Rust",
                    "category": {"alias": "qa", "name": "QA"},
                    "teachers": null,
                    "employment_guarantee": true
                }
            ],
            "cities": [
                {"alias": "kyiv", "name": "Kyiv", "locations": [{"latitude": 50.45, "longitude": 30.52}]}
            ]
        },
        {
            "alias": "it-academy",
            "name": "IT Academy",
            "url": "https://it-academy.example/",
            "free_status": 0,
            "plan_exists": false,
            "is_company": true,
            "directions": [
                {
                    "title": "Java from scratch",
                    "category": {"alias": "dev", "name": "Development"},
                    "teachers": [{"job": false}],
                    "employment_guarantee": true
                }
            ],
            "cities": [
                {"alias": "kyiv", "name": "Kyiv", "locations": [{"latitude": 50.46, "longitude": 30.50}]},
                {"alias": "lviv", "name": "Lviv", "locations": [{"latitude": 49.84, "longitude": 24.03}]}
            ]
        }
    ])
}

pub fn two_courses() -> Vec<Course> {
    CourseArchiver
        .unzip(courses_blob())
        .expect("course fixture decodes")
}
