//! Prelude module for common routeview types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use routeview::prelude::*;`

pub use crate::core::{
    config::{HistoryConfig, MapOptions, MapProfile, OverlayConfig},
    geo::{LatLng, LatLngBounds, NamedLatLng, Point},
    map::{ContextMenu, MapState, PanelMode, RouteInput, ViewState},
    viewport::Viewport,
};

pub use crate::data::{
    formats::parse_coordinates,
    history::{HistoryEntry, HistoryStore, JsonFileStore, MemoryStore, SearchHistory},
    locations::{LocationDatabase, LocationRecord, SearchScope},
};

pub use crate::i18n::{Language, TextDirection, TextKey, Translator};

pub use crate::input::{
    events::{InputEvent, KeyCode, KeyModifiers, MapEvent, MouseButton},
    handler::{Action, InputHandler},
};

pub use crate::layers::{
    marker::{MarkerKind, RouteMarker},
    route::{Arrow, RenderedRoute, RouteOverlay, RoutePath},
};

pub use crate::plugins::{
    poi::PoiDetail,
    route_planner::{
        Instruction, InstructionProvider, PlaceholderInstructions, RoutePlan, RoutePlanner,
        RouteSummary, RouteType, TravelMode,
    },
};

pub use crate::rendering::path::QuadraticBezier;

pub use crate::tiles::source::{MapStyle, OpenStreetMapSource, TileSource, ViewerRequest};

#[cfg(feature = "egui")]
pub use crate::ui::{style::OverlayStyle, widget::MapView, UiMapExt};

pub use crate::{Error as MapError, Result};
