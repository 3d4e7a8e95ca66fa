//! URL state container: map view and active criteria, round-tripped through
//! the query string.
//!
//! The container decodes the query string once at construction. Every
//! mutation re-encodes the state and hands the URL to a debounced
//! [`AddressBar`], so a burst of changes produces a single replace.
//!
//! Query format:
//!
//! ```text
//! <path>?center=<lat>,<lng>,<zoom>&<criterion>=<percent-encoded token>...
//! ```

use std::time::Duration;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::converter::ConverterMap;
use crate::criteria::{CriteriaMap, CriteriaValue, CriterionName};
use crate::debounce::Debounce;
use crate::error::ConfigError;
use crate::location::{Location, MapView};

pub const CENTER_PARAM: &str = "center";

/// Characters left unescaped by `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Where persisted URLs go. Replaces the current address, never pushes a
/// history entry.
pub trait AddressBar: Send + 'static {
    fn replace_state(&mut self, url: &str);
}

impl<F> AddressBar for F
where
    F: FnMut(&str) + Send + 'static,
{
    fn replace_state(&mut self, url: &str) {
        self(url)
    }
}

// ---------------------------------------------------------------------------
// Query parsing
// ---------------------------------------------------------------------------

/// Decode `a=1&b=x%20y` into key/value pairs. A leading `?` is ignored and
/// `+` decodes to a space.
pub fn parse_query(query: &str) -> Vec<(String, String)> {
    let query = query.strip_prefix('?').unwrap_or(query);
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(key), decode_component(value))
        })
        .collect()
}

fn decode_component(raw: &str) -> String {
    percent_decode_str(&raw.replace('+', " "))
        .decode_utf8_lossy()
        .into_owned()
}

/// Parse `"<lat>,<lng>,<zoom>"`. All three must be finite and positive.
pub fn parse_center(token: &str) -> Option<MapView> {
    let parts: Vec<f64> = token
        .split(',')
        .map(|part| part.trim().parse::<f64>().ok())
        .collect::<Option<_>>()?;
    match parts.as_slice() {
        [lat, lng, zoom] if [lat, lng, zoom].iter().all(|v| v.is_finite() && **v > 0.0) => {
            Some(MapView::new(Location::new(*lat, *lng), *zoom))
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// UrlStateContainer
// ---------------------------------------------------------------------------

pub struct UrlStateContainer {
    path: String,
    view: MapView,
    center_defined: bool,
    converters: ConverterMap,
    criteria: CriteriaMap,
    persist: Option<Debounce<String>>,
}

impl UrlStateContainer {
    /// Decode `query` for the registered `names`.
    ///
    /// Fails if any registered name lacks a converter. Malformed tokens are
    /// dropped; a malformed or missing center falls back to `defaults`.
    pub fn new(
        defaults: MapView,
        query: &str,
        names: &[CriterionName],
        converters: ConverterMap,
    ) -> Result<Self, ConfigError> {
        if let Some(name) = names.iter().find(|name| !converters.contains_key(*name)) {
            return Err(ConfigError::MissingConverter(name.to_string()));
        }

        let params = parse_query(query);
        let param = |key: &str| {
            params
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, value)| value.as_str())
        };

        let (view, center_defined) = match param(CENTER_PARAM).and_then(parse_center) {
            Some(view) => (view, true),
            None => (defaults, false),
        };

        let mut criteria = CriteriaMap::new();
        for name in names {
            let Some(token) = param(name.as_str()).map(str::trim) else {
                continue;
            };
            if token.is_empty() {
                continue;
            }
            let Some(converter) = converters.get(name) else {
                continue;
            };
            match converter.unmarshal(token) {
                Some(value) => criteria.insert(*name, value),
                None => tracing::trace!(criterion = %name, token, "dropped malformed token"),
            }
        }

        tracing::debug!(
            center_defined,
            criteria = criteria.len(),
            "url state decoded"
        );

        Ok(Self {
            path: "/".to_string(),
            view,
            center_defined,
            converters,
            criteria,
            persist: None,
        })
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Start persisting to `bar`, debounced by `delay`. Must be called within
    /// a Tokio runtime.
    pub fn attach(&mut self, delay: Duration, mut bar: impl AddressBar) {
        self.persist = Some(Debounce::spawn(delay, move |url: String| {
            tracing::debug!(url = %url, "url persisted");
            bar.replace_state(&url);
        }));
    }

    /// Write any pending URL now and stop persisting.
    pub async fn flush(&mut self) {
        if let Some(persist) = self.persist.take() {
            persist.shutdown().await;
        }
    }

    // -- getters -------------------------------------------------------------

    pub fn view(&self) -> MapView {
        self.view
    }

    pub fn center(&self) -> Location {
        self.view.center
    }

    pub fn zoom(&self) -> f64 {
        self.view.zoom
    }

    /// True once the center came from the URL or from geolocation.
    pub fn is_center_defined(&self) -> bool {
        self.center_defined
    }

    pub fn criteria_map(&self) -> &CriteriaMap {
        &self.criteria
    }

    pub fn criteria(&self, name: CriterionName) -> Option<&CriteriaValue> {
        self.criteria.get(name)
    }

    // -- setters -------------------------------------------------------------

    pub fn set_center(&mut self, center: Location) {
        self.view.center = center;
        self.schedule();
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.view.zoom = zoom;
        self.schedule();
    }

    pub fn set_criteria_map(&mut self, criteria: CriteriaMap) {
        self.criteria = criteria;
        self.schedule();
    }

    /// Apply a geolocated center unless one was already defined. Returns
    /// whether it was applied.
    pub fn set_real_center(&mut self, center: Location) -> bool {
        if self.center_defined {
            return false;
        }
        self.center_defined = true;
        self.set_center(center);
        true
    }

    /// Encode the current state.
    pub fn url(&self) -> String {
        let center = self.view.center;
        let mut url = format!(
            "{}?{CENTER_PARAM}={},{},{}",
            self.path, center.latitude, center.longitude, self.view.zoom
        );
        for (name, value) in self.criteria.iter() {
            let Some(converter) = self.converters.get(&name) else {
                continue;
            };
            let token = converter.marshal(value);
            if token.is_empty() {
                continue;
            }
            url.push('&');
            url.push_str(name.as_str());
            url.push('=');
            url.extend(utf8_percent_encode(&token, COMPONENT));
        }
        url
    }

    fn schedule(&self) {
        if let Some(persist) = &self.persist {
            persist.handle(self.url());
        }
    }
}

impl std::fmt::Debug for UrlStateContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UrlStateContainer")
            .field("path", &self.path)
            .field("view", &self.view)
            .field("center_defined", &self.center_defined)
            .field("criteria", &self.criteria)
            .field("attached", &self.persist.is_some())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::CriteriaConverter;
    use crate::criteria::{CriteriaRegistry, Range};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn defaults() -> MapView {
        MapView::new(Location::new(50.0, 30.0), 14.0)
    }

    #[rstest]
    #[case("50.1,30.2,12", Some(MapView::new(Location::new(50.1, 30.2), 12.0)))]
    #[case("50.1,30.2", None)]
    #[case("50.1,30.2,0", None)]
    #[case("-50.1,30.2,12", None)]
    #[case("a,b,c", None)]
    #[case("1,2,3,4", None)]
    #[case("inf,1,1", None)]
    fn center_tokens(#[case] token: &str, #[case] expected: Option<MapView>) {
        assert_eq!(parse_center(token), expected);
    }

    #[test]
    fn query_decoding() {
        let params = parse_query("?q=java+dev&city=kyiv%2Clviv&flag");
        assert_eq!(
            params,
            vec![
                ("q".to_string(), "java dev".to_string()),
                ("city".to_string(), "kyiv,lviv".to_string()),
                ("flag".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn missing_converter_fails_fast() {
        let mut registry = CriteriaRegistry::new();
        let salary = registry.register("salary").unwrap();
        let err = UrlStateContainer::new(defaults(), "", &[salary], ConverterMap::new()).unwrap_err();
        assert_eq!(err, ConfigError::MissingConverter("salary".into()));
    }

    #[test]
    fn decode_then_encode() {
        let mut registry = CriteriaRegistry::new();
        let salary = registry.register("salary").unwrap();
        let query = registry.register("query").unwrap();
        let converters: ConverterMap = [
            (salary, CriteriaConverter::Range),
            (query, CriteriaConverter::Identity),
        ]
        .into();

        let state = UrlStateContainer::new(
            defaults(),
            "?center=50.5,30.5,10&salary=1000-2000&query=%20c%2B%2B%20&unknown=1",
            registry.names(),
            converters,
        )
        .unwrap();

        assert!(state.is_center_defined());
        assert_eq!(state.zoom(), 10.0);
        assert_eq!(state.criteria(salary), Some(&CriteriaValue::Range(Range::new(1000, 2000))));
        assert_eq!(state.criteria(query), Some(&CriteriaValue::Text("c++".into())));
        assert_eq!(state.url(), "/?center=50.5,30.5,10&salary=1000-2000&query=c%2B%2B");
    }

    #[test]
    fn malformed_tokens_are_dropped() {
        let mut registry = CriteriaRegistry::new();
        let salary = registry.register("salary").unwrap();
        let converters: ConverterMap = [(salary, CriteriaConverter::Range)].into();

        let state =
            UrlStateContainer::new(defaults(), "center=oops&salary=50-10", registry.names(), converters)
                .unwrap();
        assert!(!state.is_center_defined());
        assert_eq!(state.view(), defaults());
        assert!(state.criteria_map().is_empty());
    }

    #[test]
    fn geolocation_applies_once() {
        let mut state = UrlStateContainer::new(defaults(), "", &[], ConverterMap::new()).unwrap();
        assert!(state.set_real_center(Location::new(49.0, 24.0)));
        assert!(!state.set_real_center(Location::new(1.0, 1.0)));
        assert_eq!(state.center(), Location::new(49.0, 24.0));
    }
}
