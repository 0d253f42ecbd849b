pub mod config;
pub mod constants;
pub mod geo;
pub mod map;
pub mod viewport;

pub use self::config::{HistoryConfig, MapOptions, MapProfile, OverlayConfig};
pub use self::geo::{LatLng, LatLngBounds, NamedLatLng, Point};
pub use self::map::{ContextMenu, MapState, PanelMode, RouteInput, ViewState};
pub use self::viewport::Viewport;
