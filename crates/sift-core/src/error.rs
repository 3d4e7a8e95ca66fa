//! Error types for sift-core.
//!
//! Only wiring mistakes are errors. Malformed user or URL input is never an
//! error value: converters and parsers return `None` and the caller falls back
//! to "absent".

use thiserror::Error;

/// Programmer errors detected while wiring criteria at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The same criterion name was registered twice.
    #[error("criterion already registered: {0}")]
    DuplicateCriterion(String),

    /// A registered criterion has no converter for the URL codec.
    #[error("missing converter for \"{0}\"")]
    MissingConverter(String),
}
