//! Configuration types for sift.
//!
//! [`Config::load`] layers `~/.config/sift/config.toml` (if present) over the
//! built-in defaults. [`Config::defaults`] returns the same defaults without
//! touching the filesystem (useful in tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::location::{Location, MapView};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[url]
debounce_ms = 500
path        = "/"

[map]
latitude  = 50.4435158
longitude = 30.5030242
zoom      = 14

[list]
limit = 20

[jobs]
newest_days = 7
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level configuration, loaded from `~/.config/sift/config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub url: UrlConfig,
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub list: ListConfig,
    #[serde(default)]
    pub jobs: JobsConfig,
}

/// `[url]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct UrlConfig {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_path")]
    pub path: String,
}

fn default_debounce_ms() -> u64 { 500 }
fn default_path() -> String { "/".to_string() }

impl Default for UrlConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            path: default_path(),
        }
    }
}

impl UrlConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// `[map]` section: the fallback center when neither the URL nor geolocation
/// provides one.
#[derive(Debug, Clone, Deserialize)]
pub struct MapConfig {
    #[serde(default = "default_latitude")]
    pub latitude: f64,
    #[serde(default = "default_longitude")]
    pub longitude: f64,
    #[serde(default = "default_zoom")]
    pub zoom: f64,
}

fn default_latitude() -> f64 { 50.4435158 }
fn default_longitude() -> f64 { 30.5030242 }
fn default_zoom() -> f64 { 14.0 }

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            latitude: default_latitude(),
            longitude: default_longitude(),
            zoom: default_zoom(),
        }
    }
}

impl MapConfig {
    pub fn view(&self) -> MapView {
        MapView::new(Location::new(self.latitude, self.longitude), self.zoom)
    }
}

/// `[list]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ListConfig {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize { 20 }

impl Default for ListConfig {
    fn default() -> Self {
        Self { limit: default_limit() }
    }
}

/// `[jobs]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct JobsConfig {
    #[serde(default = "default_newest_days")]
    pub newest_days: u32,
}

fn default_newest_days() -> u32 { 7 }

impl Default for JobsConfig {
    fn default() -> Self {
        Self {
            newest_days: default_newest_days(),
        }
    }
}

impl Config {
    /// Load from `~/.config/sift/config.toml`, layered on top of the built-in
    /// defaults. A missing file is not an error.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&config_path())
    }

    /// Load from an explicit path, layered on top of the built-in defaults.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(false))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        Self::default()
    }
}

/// Returns `$XDG_CONFIG_HOME/sift/config.toml`, falling back to
/// `~/.config/sift/config.toml`.
pub fn config_path() -> PathBuf {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))
        .unwrap_or_else(|| PathBuf::from(".config"));
    base.join("sift").join("config.toml")
}
