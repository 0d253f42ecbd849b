//! Core constants shared by the projector, the route renderer and the panels.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

/// Half of the visible span, in degrees, at [`REFERENCE_ZOOM`].
pub const ZOOM_FACTOR_BASE: f64 = 0.05;

/// Zoom level at which the visible half-span equals [`ZOOM_FACTOR_BASE`].
pub const REFERENCE_ZOOM: i32 = 10;

/// Lowest zoom reachable through the controls.
pub const MIN_ZOOM: u8 = 3;

/// Highest zoom reachable through the controls.
pub const MAX_ZOOM: u8 = 18;

/// Programmatic +/- zoom step when calling `zoom_in/zoom_out`.
pub const DEFAULT_ZOOM_DELTA: u8 = 1;

/// Zoom applied when a single location gets selected.
pub const LOCATION_ZOOM: u8 = 12;

/// Zoom applied when a route is established.
pub const ROUTE_ZOOM: u8 = 8;

/// Fraction of a drag delta (scaled by the zoom factor) applied to the center.
pub const DRAG_SENSITIVITY: f64 = 0.5;

/// Perpendicular bulge of each route leg, as a fraction of its chord length.
pub const CURVE_BULGE: f64 = 0.15;

/// Screen distance covered by one direction arrow.
pub const ARROW_SPACING_PX: f64 = 80.0;

/// Parametric half-width of the secant used to orient an arrow.
pub const ARROW_TANGENT_STEP: f64 = 0.01;

/// Arrows further than this outside the container are not laid out.
pub const ARROW_CLIP_MARGIN_PX: f64 = 80.0;

/// Arrow slots evaluated one by one once a range of them is this small.
pub const ARROW_CLIP_BATCH: usize = 64;

/// Chords shorter than this are drawn straight and carry no arrows.
pub const DEGENERATE_SEGMENT_EPSILON: f64 = 1e-9;

/// Upper bound on intermediate stops in a route.
pub const MAX_WAYPOINTS: usize = 3;

/// Recent-search list capacity.
pub const HISTORY_LIMIT: usize = 10;

/// Recent searches listed under the search box; the rest stay stored.
pub const HISTORY_VISIBLE: usize = 5;

/// Maximum number of suggestions shown for a query.
pub const SUGGESTION_LIMIT: usize = 6;

/// Storage slot holding the serialized recent-search list.
pub const HISTORY_SLOT: &str = "searchHistory";

/// Host serving the embeddable map viewer.
pub const DEFAULT_VIEWER_HOST: &str = "www.openstreetmap.org";

/// Map shown before anything is selected (Beijing).
pub const DEFAULT_CENTER: (f64, f64) = (39.9042, 116.4074);

/// Zoom shown before anything is selected.
pub const DEFAULT_ZOOM: u8 = 10;

/// Default container size in pixels.
pub const DEFAULT_CONTAINER_SIZE: (f64, f64) = (1200.0, 800.0);

