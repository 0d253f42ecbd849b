pub mod marker;
pub mod route;

pub use self::marker::{MarkerKind, Rgb, RouteMarker};
pub use self::route::{Arrow, RenderedRoute, RouteOverlay, RoutePath};
