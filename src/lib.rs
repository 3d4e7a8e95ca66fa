//! sift: faceted search over job and course listings.
//!
//! The generic engine lives in `sift-core`; the record feeds in
//! `sift-feeds`. This crate wires the two catalogs onto the engine and drives
//! them from semantic events.
//!
//! # Architecture
//!
//! ```text
//! feed blob ─► Archiver ─┐
//!                        ├─► Application ─► Searcher ─► ResultContainer
//! map ready ─────────────┘        │                           │
//!                                 ▼                           ▼
//!                        UrlStateContainer        map / list / stats surfaces
//! ```
//!
//! A catalog module (`jobs`, `courses`) contributes three things: a
//! [`catalog::Wiring`] (criteria, URL state, filter builders, widgets), its
//! [`catalog::Surfaces`], and a grouping of records by coordinate.

pub mod application;
pub mod catalog;
pub mod courses;
pub mod event;
pub mod jobs;
pub mod surface;

pub use application::Application;
pub use event::{AppEvent, Tab};
