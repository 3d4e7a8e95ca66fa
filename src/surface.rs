//! Text presentation surfaces: the list, the map and the counters.
//!
//! Each surface writes its last rendering into a [`Screen`], a shared line
//! buffer the binary prints and the tests inspect.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use sift_core::location::{sort_by_distance, LocationGrouper};
use sift_core::{Location, MapView, ResultContainer, ResultViewer};

// ---------------------------------------------------------------------------
// Screen
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct ScreenState {
    lines: Vec<String>,
    renders: usize,
}

/// Shared output buffer of one surface.
#[derive(Debug, Clone, Default)]
pub struct Screen(Arc<Mutex<ScreenState>>);

impl Screen {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, ScreenState> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn show(&self, lines: Vec<String>) {
        let mut state = self.state();
        state.lines = lines;
        state.renders += 1;
    }

    /// Lines of the last rendering.
    pub fn lines(&self) -> Vec<String> {
        self.state().lines.clone()
    }

    /// How many times the surface has rendered.
    pub fn renders(&self) -> usize {
        self.state().renders
    }
}

// ---------------------------------------------------------------------------
// Surface traits
// ---------------------------------------------------------------------------

/// The map surface. Besides rendering results it follows the map view.
pub trait MapViewer<T>: ResultViewer<T> {
    fn set_view(&mut self, view: MapView);
    /// Focus the marker group at `location`.
    fn open(&mut self, location: Location);
}

/// The list surface, ordered by distance from the current center.
pub trait ListViewer<T>: ResultViewer<T> {
    fn set_center(&mut self, center: Location);
}

// ---------------------------------------------------------------------------
// MapSurface
// ---------------------------------------------------------------------------

/// Renders one line per marker group: coordinates and record titles. The
/// group last passed to [`MapViewer::open`] is marked `[open]`.
pub struct MapSurface<T, G> {
    screen: Screen,
    grouper: G,
    title: Box<dyn Fn(&T) -> String>,
    view: Option<MapView>,
    opened: Option<Location>,
}

impl<T, G: LocationGrouper<T>> MapSurface<T, G> {
    pub fn new(screen: Screen, grouper: G, title: impl Fn(&T) -> String + 'static) -> Self {
        Self {
            screen,
            grouper,
            title: Box::new(title),
            view: None,
            opened: None,
        }
    }
}

impl<T, G: LocationGrouper<T>> ResultViewer<T> for MapSurface<T, G> {
    fn render(&mut self, result: &Arc<ResultContainer<T>>) {
        let groups = self.grouper.group(result.records());
        let mut lines = Vec::with_capacity(groups.len() + 1);
        if let Some(view) = self.view {
            lines.push(format!(
                "view {},{} zoom {}",
                view.center.latitude, view.center.longitude, view.zoom
            ));
        }
        for (location, records) in groups.iter() {
            let titles: Vec<String> = records.iter().map(|record| (self.title)(record)).collect();
            let marker = if self.opened == Some(*location) { "  [open]" } else { "" };
            lines.push(format!(
                "{},{}  {}{marker}",
                location.latitude,
                location.longitude,
                titles.join(" | ")
            ));
        }
        tracing::debug!(markers = groups.len(), "map rendered");
        self.screen.show(lines);
    }
}

impl<T, G: LocationGrouper<T>> MapViewer<T> for MapSurface<T, G> {
    fn set_view(&mut self, view: MapView) {
        self.view = Some(view);
    }

    fn open(&mut self, location: Location) {
        if let Some(view) = &mut self.view {
            view.center = location;
        }
        self.opened = Some(location);
    }
}

// ---------------------------------------------------------------------------
// ListSurface
// ---------------------------------------------------------------------------

/// Renders the records nearest to the center, up to `limit`.
pub struct ListSurface<T> {
    screen: Screen,
    limit: usize,
    center: Location,
    distance: Box<dyn Fn(&T, &Location) -> Option<f64>>,
    format: Box<dyn Fn(&T) -> Vec<String>>,
}

impl<T> ListSurface<T> {
    pub fn new(
        screen: Screen,
        limit: usize,
        distance: impl Fn(&T, &Location) -> Option<f64> + 'static,
        format: impl Fn(&T) -> Vec<String> + 'static,
    ) -> Self {
        Self {
            screen,
            limit,
            center: Location::default(),
            distance: Box::new(distance),
            format: Box::new(format),
        }
    }
}

impl<T> ResultViewer<T> for ListSurface<T> {
    fn render(&mut self, result: &Arc<ResultContainer<T>>) {
        let mut records: Vec<&T> = result.records().iter().collect();
        let center = self.center;
        sort_by_distance(&mut records, |record| (self.distance)(*record, &center));

        let lines = records
            .into_iter()
            .take(self.limit)
            .flat_map(|record| (self.format)(record))
            .collect();
        self.screen.show(lines);
    }
}

impl<T> ListViewer<T> for ListSurface<T> {
    fn set_center(&mut self, center: Location) {
        self.center = center;
    }
}

// ---------------------------------------------------------------------------
// StatsSurface
// ---------------------------------------------------------------------------

/// Renders the result counters as a single line.
pub struct StatsSurface<T> {
    screen: Screen,
    format: Box<dyn Fn(&ResultContainer<T>) -> String>,
}

impl<T> StatsSurface<T> {
    pub fn new(screen: Screen, format: impl Fn(&ResultContainer<T>) -> String + 'static) -> Self {
        Self {
            screen,
            format: Box::new(format),
        }
    }
}

impl<T> ResultViewer<T> for StatsSurface<T> {
    fn render(&mut self, result: &Arc<ResultContainer<T>>) {
        self.screen.show(vec![(self.format)(result.as_ref())]);
    }
}

/// Screens for the three surfaces of a catalog.
#[derive(Debug, Clone, Default)]
pub struct Screens {
    pub map: Screen,
    pub list: Screen,
    pub stats: Screen,
}
