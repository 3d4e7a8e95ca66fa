#![allow(unused)]
//! URL state integration harness.
//!
//! # What this covers
//!
//! - **Decode**: a shared query string seeds the jobs widgets, and the first
//!   search reproduces the criteria it came from.
//! - **Encode**: the URL lists the center first, then criteria in builder
//!   order, each token percent-encoded like `encodeURIComponent`
//!   (snapshot).
//! - **Malformed input**: bad tokens and bad centers fall back silently.
//! - **Debounce**: a burst of map moves persists one URL after the quiet
//!   period, and `flush` writes a pending URL immediately.
//!
//! # Running
//!
//! ```sh
//! cargo test --test url_state_harness
//! ```

mod common;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use pretty_assertions::assert_eq;

use common::*;
use sift::jobs;
use sift_core::config::Config;
use sift_core::{
    ConfigError, ConverterMap, CriteriaRegistry, FilledSearcher, Location, MapView, Searcher,
    UrlStateContainer,
};

/// Decoding reads `+` as a space like `URLSearchParams`; encoding always
/// writes `%20` like `encodeURIComponent`.
const SHARED: &str = "center=50.45,30.52,14&vacancy-query=java+dev&company=acme,globex-unchecked&vacancy-salary=1000";

fn recorder() -> (Arc<Mutex<Vec<String>>>, impl FnMut(&str) + Send + 'static) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    (seen, move |url: &str| sink.lock().unwrap().push(url.to_string()))
}

// ---------------------------------------------------------------------------
// Decode
// ---------------------------------------------------------------------------

#[test]
fn shared_url_seeds_widgets() {
    let wiring = jobs::wire(&Config::defaults(), SHARED).unwrap();
    let state = &wiring.url_state;

    assert!(state.is_center_defined());
    assert_eq!(state.view(), MapView::new(Location::new(50.45, 30.52), 14.0));
    assert_eq!(state.criteria_map().len(), 3);

    let widgets = &wiring.widgets;
    assert_eq!(widgets.query.value(), "java dev");
    assert_eq!(widgets.salary.from.value(), "1000");
    assert_eq!(widgets.salary.to.value(), "");
    let companies = widgets.companies.alias_state_map();
    assert_eq!(companies.selected, vec!["acme"]);
    assert_eq!(companies.disabled, vec!["globex"]);
}

#[test]
fn first_search_reproduces_decoded_criteria() {
    let wiring = jobs::wire(&Config::defaults(), SHARED).unwrap();
    let decoded = wiring.url_state.criteria_map().clone();
    let searcher = FilledSearcher::new(three_companies().into(), Arc::new(wiring.filters));

    let result = searcher.search();
    let mut names: Vec<&str> = result.criteria_map().iter().map(|(n, _)| n.as_str()).collect();
    names.sort_unstable();
    assert_eq!(names, vec!["company", "vacancy-query", "vacancy-salary"]);
    for (name, value) in decoded.iter() {
        assert_eq!(result.criteria_map().get(name), Some(value), "criterion {name}");
    }
}

#[test]
fn plus_and_percent_twenty_both_decode_to_space() {
    let escaped = SHARED.replace("java+dev", "java%20dev");
    let plus = jobs::wire(&Config::defaults(), SHARED).unwrap();
    let percent = jobs::wire(&Config::defaults(), &escaped).unwrap();

    assert_eq!(percent.widgets.query.value(), "java dev");
    assert_eq!(percent.url_state.criteria_map(), plus.url_state.criteria_map());
    assert_eq!(percent.url_state.url(), plus.url_state.url());
    assert!(plus.url_state.url().contains("vacancy-query=java%20dev"));
}

#[test]
fn malformed_tokens_fall_back() {
    let query = "center=abc,1,2&vacancy-salary=500-100&company-size=&vacancy-query=rust";
    let wiring = jobs::wire(&Config::defaults(), query).unwrap();
    let state = &wiring.url_state;

    assert!(!state.is_center_defined());
    assert_eq!(state.view(), Config::defaults().map.view());
    let names: Vec<&str> = state.criteria_map().iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["vacancy-query"]);
}

#[test]
fn registered_name_without_converter_is_rejected() {
    let mut registry = CriteriaRegistry::new();
    registry.register("orphan").unwrap();
    let err = UrlStateContainer::new(
        Config::defaults().map.view(),
        "",
        registry.names(),
        ConverterMap::new(),
    )
    .unwrap_err();
    assert_eq!(err, ConfigError::MissingConverter("orphan".into()));
}

// ---------------------------------------------------------------------------
// Encode
// ---------------------------------------------------------------------------

#[test]
fn shared_url_round_trips() {
    let wiring = jobs::wire(&Config::defaults(), SHARED).unwrap();
    insta::assert_snapshot!(
        wiring.url_state.url(),
        @"/?center=50.45,30.52,14&vacancy-query=java%20dev&company=acme%2Cglobex-unchecked&vacancy-salary=1000"
    );
}

#[test]
fn blank_state_encodes_only_center() {
    let wiring = jobs::wire(&Config::defaults(), "").unwrap();
    assert_eq!(wiring.url_state.url(), "/?center=50.4435158,30.5030242,14");
}

// ---------------------------------------------------------------------------
// Debounce
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn map_moves_persist_once_after_quiet_period() {
    let (seen, bar) = recorder();
    let mut wiring = jobs::wire(&Config::defaults(), "").unwrap();
    let state = &mut wiring.url_state;
    state.attach(Duration::from_millis(500), bar);

    for zoom in [10.0, 11.0, 12.0] {
        state.set_zoom(zoom);
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    assert!(seen.lock().unwrap().is_empty());

    tokio::time::sleep(Duration::from_millis(600)).await;
    assert_eq!(*seen.lock().unwrap(), vec!["/?center=50.4435158,30.5030242,12"]);
}

#[tokio::test(start_paused = true)]
async fn flush_writes_pending_url() {
    let (seen, bar) = recorder();
    let mut wiring = jobs::wire(&Config::defaults(), "").unwrap();
    wiring.url_state.attach(Duration::from_secs(60), bar);

    wiring.url_state.set_center(Location::new(49.84, 24.03));
    tokio::task::yield_now().await;
    wiring.url_state.flush().await;

    assert_eq!(*seen.lock().unwrap(), vec!["/?center=49.84,24.03,14"]);
}
