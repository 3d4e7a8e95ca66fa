//! What a catalog hands to the [`Application`](crate::application::Application).

use sift_core::{FilterContainerBuilder, ResultViewer, UrlStateContainer};

use crate::surface::{ListViewer, MapViewer};

/// A catalog's decoded URL state, its filter builders and the widgets those
/// builders read.
pub struct Wiring<T, W> {
    pub url_state: UrlStateContainer,
    pub filters: FilterContainerBuilder<T>,
    pub widgets: W,
}

/// The three presentation surfaces of a catalog.
pub struct Surfaces<T> {
    pub map: Box<dyn MapViewer<T>>,
    pub list: Box<dyn ListViewer<T>>,
    pub stats: Box<dyn ResultViewer<T>>,
}
