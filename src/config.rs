//! Runtime configuration.
//!
//! Sources, lowest precedence first:
//! 1. Built-in defaults ([`AppConfig::default`]).
//! 2. `config.toml` in `<config_dir>/parktrack/`, or the file named by
//!    `PARKTRACK_CONFIG`.
//! 3. `PARKTRACK_API_BASE_URL`, `PARKTRACK_API_TOKEN` and
//!    `PARKTRACK_POLL_INTERVAL_SECS`.
//!
//! The merged result is validated before use.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::api::ZoneQuery;
use crate::error::AppError;
use crate::models::{LatLng, ViewState};

pub const DEFAULT_BASE_URL: &str = "https://api.parktrack.live";
/// Highest zoom any supported tile source serves.
pub const MAX_ZOOM: u8 = 22;

/// `[api]`: where and how to reach the ParkTrack service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Static bearer token. Empty means requests go out unauthenticated.
    pub token: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: String::new(),
            timeout_secs: 30,
        }
    }
}

/// `[polling]`: automatic zone refresh.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    pub interval_secs: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self { interval_secs: 10 }
    }
}

impl PollingConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

/// `[map]`: initial viewport and the zoom used when focusing a target.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// `[lat, lng]`
    pub center: [f64; 2],
    pub zoom: u8,
    pub focus_zoom: u8,
}

impl Default for MapConfig {
    fn default() -> Self {
        let view = ViewState::default();
        Self {
            center: [view.center.lat, view.center.lng],
            zoom: view.zoom,
            focus_zoom: 18,
        }
    }
}

impl MapConfig {
    pub fn initial_view(&self) -> ViewState {
        ViewState {
            center: LatLng::new(self.center[0], self.center[1]),
            zoom: self.zoom,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub polling: PollingConfig,
    pub map: MapConfig,
    /// Server-side filters applied to every zone fetch.
    pub zones: ZoneQuery,
}

impl AppConfig {
    /// Load from the default file location plus environment overrides.
    pub fn load() -> Result<Self, AppError> {
        let path = std::env::var_os("PARKTRACK_CONFIG")
            .map(PathBuf::from)
            .or_else(default_config_path);
        let mut cfg = match path {
            Some(p) if p.exists() => Self::from_file(&p)?,
            _ => Self::default(),
        };
        cfg.apply_env(|key| std::env::var(key).ok())?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;
        tracing::info!(path = %path.display(), "loading configuration");
        parse(&text)
    }

    /// Overlay environment variables read through `lookup`.
    pub fn apply_env(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), AppError> {
        if let Some(v) = lookup("PARKTRACK_API_BASE_URL") {
            self.api.base_url = v;
        }
        if let Some(v) = lookup("PARKTRACK_API_TOKEN") {
            self.api.token = v;
        }
        if let Some(v) = lookup("PARKTRACK_POLL_INTERVAL_SECS") {
            self.polling.interval_secs = v.trim().parse().map_err(|e| {
                AppError::Config(format!("PARKTRACK_POLL_INTERVAL_SECS={v:?}: {e}"))
            })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), AppError> {
        let url = self.api.base_url.as_str();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(AppError::Config(format!(
                "api.base_url must be an http(s) URL, got {url:?}"
            )));
        }
        if self.api.timeout_secs == 0 {
            return Err(AppError::Config(
                "api.timeout_secs must be at least 1".to_string(),
            ));
        }
        if self.polling.interval_secs == 0 {
            return Err(AppError::Config(
                "polling.interval_secs must be at least 1".to_string(),
            ));
        }
        if !self.map.initial_view().center.is_finite() {
            return Err(AppError::Config("map.center must be finite".to_string()));
        }
        if self.map.zoom > MAX_ZOOM || self.map.focus_zoom > MAX_ZOOM {
            return Err(AppError::Config(format!(
                "map zoom levels must not exceed {MAX_ZOOM}"
            )));
        }
        Ok(())
    }
}

/// Parse a TOML string into an [`AppConfig`], running validation.
pub fn parse(toml_str: &str) -> Result<AppConfig, AppError> {
    let cfg: AppConfig =
        toml::from_str(toml_str).map_err(|e| AppError::Config(e.to_string()))?;
    cfg.validate()?;
    Ok(cfg)
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("parktrack").join("config.toml"))
}
