//! sift-feeds: record sources for sift.
//!
//! A feed is an opaque JSON blob loaded once at startup plus an [`Archiver`]
//! that "unzips" it into domain records. The engine only needs the records to
//! be a finite, ordered, cloneable sequence.

pub mod companies;
pub mod courses;
pub mod error;
pub mod source;

pub use companies::{City, Company, CompanyArchiver, Office, Vacancy};
pub use courses::{Category, Course, CourseArchiver, CourseCity, Direction, Teacher};
pub use error::FeedError;
pub use source::{load, load_records};

/// Decodes a raw feed blob into domain records.
pub trait Archiver: Send + Sync {
    type Record: Clone + Send + Sync + 'static;

    fn unzip(&self, blob: serde_json::Value) -> Result<Vec<Self::Record>, FeedError>;
}
