//! sift-core: the filtration engine behind sift.
//!
//! # Architecture
//!
//! ```text
//! URL ──► UrlStateContainer ──► widgets ──► builders ──► FilterContainerBuilder
//!              ▲                                              │
//!              │                                              ▼
//!              └──── criteria map ◄──── ResultContainer ◄── Searcher
//!                                             │
//!                                             └──► CacheViewer ──► surfaces
//! ```
//!
//! Records are filtered by a conjunction of [`Matcher`]s and then reshaped by
//! a left-to-right chain of [`Modifier`]s. Each criterion's value round-trips
//! through the query string via its [`CriteriaConverter`].

pub mod builder;
pub mod config;
pub mod container;
pub mod converter;
pub mod criteria;
pub mod debounce;
pub mod error;
pub mod join;
pub mod location;
pub mod matcher;
pub mod modifier;
pub mod render;
pub mod result;
pub mod searcher;
pub mod state;
pub mod url_state;
pub mod widget;

pub use builder::FilterStateBuilder;
pub use container::{FilterContainer, FilterContainerBuilder};
pub use converter::{ConverterMap, CriteriaConverter};
pub use criteria::{AliasSet, CriteriaMap, CriteriaRegistry, CriteriaValue, CriterionName, Range};
pub use error::ConfigError;
pub use location::{Location, MapView};
pub use matcher::Matcher;
pub use modifier::Modifier;
pub use render::{CacheViewer, ResultViewer};
pub use result::ResultContainer;
pub use searcher::{FilledSearcher, NullSearcher, Searcher, SearcherManager};
pub use state::{FilterState, StateFilter};
pub use url_state::UrlStateContainer;
