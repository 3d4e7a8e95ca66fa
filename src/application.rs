//! The orchestrator: joins data and map readiness, runs searches and routes
//! results to the surfaces.
//!
//! # Lifecycle
//!
//! ```text
//! DataLoaded ─┐
//!             ├─► ReadyJoin ─► unzip ─► FilledSearcher ─► first search + render
//! MapReady  ──┘
//! ```
//!
//! Until the join completes the searcher is a [`NullSearcher`], so any
//! search yields an empty result. After it completes, each search builds a
//! fresh [`ResultContainer`] and only the selected tab plus the stats are
//! rendered. Both tabs sit behind a [`CacheViewer`], so switching back to a
//! tab that already shows the current result is free.

use std::sync::Arc;

use sift_core::{
    CacheViewer, FilledSearcher, FilterContainerBuilder, MapView, NullSearcher, ResultContainer,
    ResultViewer, SearcherManager, UrlStateContainer,
};
use sift_core::join::ReadyJoin;
use sift_feeds::{Archiver, FeedError};

use crate::catalog::{Surfaces, Wiring};
use crate::event::{AppEvent, Tab};
use crate::surface::{ListViewer, MapViewer};

type Unzipped<T> = (Result<Vec<T>, FeedError>, MapView);

pub struct Application<A: Archiver> {
    url_state: UrlStateContainer,
    builder: Arc<FilterContainerBuilder<A::Record>>,
    searcher: SearcherManager<A::Record>,
    result: Arc<ResultContainer<A::Record>>,
    join: ReadyJoin<serde_json::Value, MapView, Unzipped<A::Record>>,
    map: CacheViewer<A::Record, Box<dyn MapViewer<A::Record>>>,
    list: CacheViewer<A::Record, Box<dyn ListViewer<A::Record>>>,
    stats: Box<dyn ResultViewer<A::Record>>,
    tab: Tab,
    on_data: Option<Box<dyn FnMut(&[A::Record])>>,
    loaded: bool,
}

impl<A: Archiver + 'static> Application<A> {
    pub fn new<W>(archiver: A, wiring: Wiring<A::Record, W>, surfaces: Surfaces<A::Record>) -> Self {
        let archiver = Arc::new(archiver);
        let join = ReadyJoin::new(move |blob: serde_json::Value, view: MapView| {
            (archiver.unzip(blob), view)
        });
        let searcher = SearcherManager::new(NullSearcher);
        let result = searcher.search();

        Self {
            url_state: wiring.url_state,
            builder: Arc::new(wiring.filters),
            searcher,
            result,
            join,
            map: CacheViewer::new(surfaces.map),
            list: CacheViewer::new(surfaces.list),
            stats: surfaces.stats,
            tab: Tab::Map,
            on_data: None,
            loaded: false,
        }
    }

    /// Called with the decoded records before the first search, to offer
    /// data-driven filter options.
    pub fn with_on_data(mut self, hook: impl FnMut(&[A::Record]) + 'static) -> Self {
        self.on_data = Some(Box::new(hook));
        self
    }

    /// React to one event. Returns the would-be result count for
    /// [`AppEvent::InputChanged`], `None` otherwise.
    pub fn handle(&mut self, event: AppEvent) -> Option<usize> {
        tracing::debug!(event = event.name(), "event");
        match event {
            AppEvent::DataLoaded(blob) => {
                if let Some(ready) = self.join.set_data(blob) {
                    self.start(ready);
                }
            }
            AppEvent::DataFailed(reason) => {
                tracing::error!(reason = %reason, "data load failed");
            }
            AppEvent::MapReady => {
                let view = self.url_state.view();
                if let Some(ready) = self.join.set_map(view) {
                    self.start(ready);
                }
            }
            AppEvent::GeoLocated(location) => {
                if self.url_state.set_real_center(location) {
                    self.map.get_mut().set_view(self.url_state.view());
                }
            }
            AppEvent::CenterChanged(location) => {
                self.url_state.set_center(location);
                self.map.get_mut().set_view(self.url_state.view());
            }
            AppEvent::ZoomChanged(zoom) => {
                self.url_state.set_zoom(zoom);
                self.map.get_mut().set_view(self.url_state.view());
            }
            AppEvent::Open(location) => {
                self.url_state.set_center(location);
                self.map.get_mut().open(location);
                self.map.invalidate();
                self.select_tab(Tab::Map);
            }
            AppEvent::InputChanged => return Some(self.search_and_count()),
            AppEvent::Submit => self.search_and_render(),
            AppEvent::ShowCounted => self.render_after_search(),
            AppEvent::SelectTab(tab) => self.select_tab(tab),
        }
        None
    }

    fn start(&mut self, (records, view): Unzipped<A::Record>) {
        let records = match records {
            Ok(records) => records,
            Err(err) => {
                tracing::error!(error = %err, "feed could not be decoded");
                return;
            }
        };

        if let Some(hook) = &mut self.on_data {
            hook(records.as_slice());
        }
        tracing::debug!(records = records.len(), "searcher ready");
        self.searcher
            .set_searcher(FilledSearcher::new(records.into(), Arc::clone(&self.builder)));
        self.map.get_mut().set_view(view);
        self.loaded = true;

        self.search();
        self.render();
    }

    /// Search, render, then persist the criteria that produced the result.
    pub fn search_and_render(&mut self) {
        self.search();
        self.render_after_search();
    }

    /// Search without rendering; the result is kept for
    /// [`render_after_search`](Self::render_after_search).
    pub fn search_and_count(&mut self) -> usize {
        self.search();
        self.result.count()
    }

    /// Render the last result and persist its criteria.
    pub fn render_after_search(&mut self) {
        self.render();
        self.url_state
            .set_criteria_map(self.result.criteria_map().clone());
    }

    /// Switch the result surface and show the current result on it.
    pub fn select_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.render_selected_tab();
    }

    fn search(&mut self) {
        self.result = self.searcher.search();
    }

    fn render(&mut self) {
        self.render_selected_tab();
        self.stats.render(&self.result);
    }

    fn render_selected_tab(&mut self) {
        match self.tab {
            Tab::Map => self.map.render(&self.result),
            Tab::List => {
                self.list.get_mut().set_center(self.url_state.center());
                self.list.render(&self.result);
            }
        }
    }

    // -- getters -------------------------------------------------------------

    pub fn url_state(&self) -> &UrlStateContainer {
        &self.url_state
    }

    pub fn url_state_mut(&mut self) -> &mut UrlStateContainer {
        &mut self.url_state
    }

    pub fn result(&self) -> &Arc<ResultContainer<A::Record>> {
        &self.result
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    /// True once both signals arrived and the feed decoded.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }
}
