//! Semantic application events.
//!
//! The input layer (map widget callbacks, form inputs, the data loader)
//! translates whatever it receives into an [`AppEvent`], and the
//! [`Application`](crate::application::Application) reacts to these only.
//!
//! | Source                        | Event             |
//! |-------------------------------|-------------------|
//! | feed loaded / failed          | `DataLoaded` / `DataFailed` |
//! | map widget initialised        | `MapReady`        |
//! | geolocation lookup resolved   | `GeoLocated`      |
//! | map dragged / zoomed          | `CenterChanged` / `ZoomChanged` |
//! | "show on map" in the list     | `Open`            |
//! | checkbox or range edited      | `InputChanged`    |
//! | search button, Enter          | `Submit`          |
//! | "show N results" pop-up       | `ShowCounted`     |
//! | tab header clicked            | `SelectTab`       |

use sift_core::Location;

/// Which surface receives result renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Map,
    List,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The raw feed blob arrived.
    DataLoaded(serde_json::Value),
    /// The feed could not be loaded; the application stays pre-load.
    DataFailed(String),
    MapReady,
    GeoLocated(Location),
    CenterChanged(Location),
    ZoomChanged(f64),
    Open(Location),
    /// A filter input changed; the caller gets the would-be result count.
    InputChanged,
    Submit,
    /// Render the result counted by the last `InputChanged`.
    ShowCounted,
    SelectTab(Tab),
}

impl AppEvent {
    /// Variant name, for logging without the payload.
    pub fn name(&self) -> &'static str {
        match self {
            AppEvent::DataLoaded(_) => "data_loaded",
            AppEvent::DataFailed(_) => "data_failed",
            AppEvent::MapReady => "map_ready",
            AppEvent::GeoLocated(_) => "geo_located",
            AppEvent::CenterChanged(_) => "center_changed",
            AppEvent::ZoomChanged(_) => "zoom_changed",
            AppEvent::Open(_) => "open",
            AppEvent::InputChanged => "input_changed",
            AppEvent::Submit => "submit",
            AppEvent::ShowCounted => "show_counted",
            AppEvent::SelectTab(_) => "select_tab",
        }
    }
}
