//! Configuration for the map state, the viewer URL and the route overlay
//!
//! Options can come from a preset profile or be loaded from a JSON file; every
//! field has a default so partial files are fine.

use crate::core::constants::{
    ARROW_SPACING_PX, CURVE_BULGE, DEFAULT_CENTER, DEFAULT_CONTAINER_SIZE, DEFAULT_VIEWER_HOST,
    DEFAULT_ZOOM, HISTORY_SLOT,
};
use crate::tiles::source::MapStyle;
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub enum MapProfile {
    Default,
    /// Small containers: fewer arrows, flatter legs
    Compact,
    /// Large displays: denser arrows
    Dense,
    Custom(MapOptions),
}

impl MapProfile {
    pub fn resolve(&self) -> MapOptions {
        match self {
            Self::Default => MapOptions::default(),
            Self::Compact => MapOptions {
                container_width: 640.0,
                container_height: 480.0,
                overlay: OverlayConfig {
                    arrow_spacing_px: 120.0,
                    curve_bulge: 0.1,
                },
                ..MapOptions::default()
            },
            Self::Dense => MapOptions {
                container_width: 1920.0,
                container_height: 1080.0,
                overlay: OverlayConfig {
                    arrow_spacing_px: 60.0,
                    curve_bulge: CURVE_BULGE,
                },
                ..MapOptions::default()
            },
            Self::Custom(options) => options.clone(),
        }
    }
}

impl Default for MapProfile {
    fn default() -> Self {
        Self::Default
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapOptions {
    #[serde(default = "default_viewer_host")]
    pub viewer_host: String,
    #[serde(default)]
    pub map_style: MapStyle,
    #[serde(default = "default_center_lat")]
    pub center_lat: f64,
    #[serde(default = "default_center_lng")]
    pub center_lng: f64,
    #[serde(default = "default_zoom")]
    pub zoom: u8,
    #[serde(default = "default_container_width")]
    pub container_width: f64,
    #[serde(default = "default_container_height")]
    pub container_height: f64,
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub overlay: OverlayConfig,
}

/// Where the recent-search list lives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryConfig {
    #[serde(default = "default_history_slot")]
    pub slot: String,
    /// Directory for the JSON file store; `None` keeps history in memory only
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

/// Geometry knobs for the route overlay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayConfig {
    #[serde(default = "default_arrow_spacing")]
    pub arrow_spacing_px: f64,
    #[serde(default = "default_curve_bulge")]
    pub curve_bulge: f64,
}

fn default_viewer_host() -> String {
    DEFAULT_VIEWER_HOST.to_string()
}

fn default_center_lat() -> f64 {
    DEFAULT_CENTER.0
}

fn default_center_lng() -> f64 {
    DEFAULT_CENTER.1
}

fn default_zoom() -> u8 {
    DEFAULT_ZOOM
}

fn default_container_width() -> f64 {
    DEFAULT_CONTAINER_SIZE.0
}

fn default_container_height() -> f64 {
    DEFAULT_CONTAINER_SIZE.1
}

fn default_history_slot() -> String {
    HISTORY_SLOT.to_string()
}

fn default_arrow_spacing() -> f64 {
    ARROW_SPACING_PX
}

fn default_curve_bulge() -> f64 {
    CURVE_BULGE
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            viewer_host: default_viewer_host(),
            map_style: MapStyle::default(),
            center_lat: default_center_lat(),
            center_lng: default_center_lng(),
            zoom: default_zoom(),
            container_width: default_container_width(),
            container_height: default_container_height(),
            history: HistoryConfig::default(),
            overlay: OverlayConfig::default(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            slot: default_history_slot(),
            directory: None,
        }
    }
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            arrow_spacing_px: default_arrow_spacing(),
            curve_bulge: default_curve_bulge(),
        }
    }
}

impl MapOptions {
    /// Parses options from JSON text, filling in defaults for missing fields
    pub fn from_json(text: &str) -> Result<Self> {
        let options: MapOptions = serde_json::from_str(text)?;
        options.validate()?;
        Ok(options)
    }

    /// Loads options from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        log::debug!("loaded map options from {}", path.display());
        Self::from_json(&text)
    }

    /// Rejects values the projector or the overlay cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.viewer_host.trim().is_empty() {
            return Err(MapError::Config("viewer_host must not be empty".into()));
        }
        if !(self.container_width > 0.0 && self.container_height > 0.0) {
            return Err(MapError::Config(format!(
                "container size must be positive, got {}x{}",
                self.container_width, self.container_height
            )));
        }
        if !(self.overlay.arrow_spacing_px > 0.0) {
            return Err(MapError::Config(
                "overlay.arrow_spacing_px must be positive".into(),
            ));
        }
        if !self.overlay.curve_bulge.is_finite() {
            return Err(MapError::Config("overlay.curve_bulge must be finite".into()));
        }
        crate::core::geo::LatLng::try_new(self.center_lat, self.center_lng)?;
        Ok(())
    }
}
