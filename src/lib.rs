//! # routeview
//!
//! A multilingual map explorer with place search, recent searches and
//! multi-stop route planning.
//!
//! The base map is an external embeddable viewer addressed by a bounding box
//! URL; this crate owns the view state, the projection used to draw the route
//! overlay on top of it, the place table, the recent-search history and the
//! route planner. An egui front end lives behind the `egui` feature.

pub mod core;
pub mod data;
pub mod i18n;
pub mod input;
pub mod layers;
pub mod plugins;
pub mod prelude;
pub mod rendering;
pub mod tiles;
#[cfg(feature = "egui")]
pub mod ui;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::{MapOptions, MapProfile},
    geo::{LatLng, LatLngBounds, NamedLatLng, Point},
    map::{MapState, PanelMode},
    viewport::Viewport,
};

pub use crate::data::{
    history::SearchHistory,
    locations::{LocationDatabase, LocationRecord},
};

pub use crate::i18n::{Language, TextKey, Translator};

pub use crate::input::{events::InputEvent, events::MapEvent, handler::InputHandler};

pub use crate::layers::route::{RenderedRoute, RouteOverlay, RoutePath};

pub use crate::plugins::route_planner::{RoutePlan, RoutePlanner, RouteType, TravelMode};

pub use crate::tiles::source::{MapStyle, OpenStreetMapSource, TileSource};

#[cfg(feature = "egui")]
pub use crate::ui::widget::MapView;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Route error: {0}")]
    Route(String),
}

/// Error type alias for convenience
pub type Error = MapError;
