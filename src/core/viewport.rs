use crate::core::constants::{
    DEFAULT_CENTER, DEFAULT_CONTAINER_SIZE, DEFAULT_ZOOM, DEFAULT_ZOOM_DELTA, DRAG_SENSITIVITY,
    LOCATION_ZOOM, MAX_ZOOM, MIN_ZOOM, REFERENCE_ZOOM, ROUTE_ZOOM, ZOOM_FACTOR_BASE,
};
use crate::core::geo::{LatLng, LatLngBounds, Point};
use serde::{Deserialize, Serialize};

/// Half of the geographic span, in degrees, visible across the container at `zoom`.
///
/// The same factor applies to latitude and longitude; every zoom step halves it.
pub fn zoom_factor(zoom: u8) -> f64 {
    ZOOM_FACTOR_BASE / 2_f64.powi(i32::from(zoom) - REFERENCE_ZOOM)
}

/// Manages the current view of the map: center, zoom, and screen dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// The center of the map view in geographical coordinates
    pub center: LatLng,
    /// The current zoom level, always within `[MIN_ZOOM, MAX_ZOOM]`
    zoom: u8,
    /// The size of the container in pixels
    pub size: Point,
}

impl Viewport {
    /// Creates a new viewport
    pub fn new(center: LatLng, zoom: u8, size: Point) -> Self {
        Self {
            center,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            size,
        }
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    /// Half-span in degrees for the current zoom
    pub fn zoom_factor(&self) -> f64 {
        zoom_factor(self.zoom)
    }

    /// Sets the center of the viewport, clamped to valid coordinates
    pub fn set_center(&mut self, center: LatLng) {
        self.center = LatLng::clamped(center.lat, center.lng);
    }

    /// Sets the zoom level, clamping to valid range
    pub fn set_zoom(&mut self, zoom: u8) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Sets the container size
    pub fn set_size(&mut self, size: Point) {
        self.size = size;
    }

    /// One step closer. Returns whether the zoom changed.
    pub fn zoom_in(&mut self) -> bool {
        let before = self.zoom;
        self.set_zoom(before.saturating_add(DEFAULT_ZOOM_DELTA));
        self.zoom != before
    }

    /// One step further out. Returns whether the zoom changed.
    pub fn zoom_out(&mut self) -> bool {
        let before = self.zoom;
        self.set_zoom(before.saturating_sub(DEFAULT_ZOOM_DELTA));
        self.zoom != before
    }

    /// Converts a geographical coordinate to container pixel coordinates.
    ///
    /// Points outside the visible span land outside the container; nothing is clipped.
    pub fn lat_lng_to_pixel(&self, lat_lng: &LatLng) -> Point {
        let span = 2.0 * self.zoom_factor();
        let rel_lng = (lat_lng.lng - self.center.lng) / span;
        let rel_lat = (self.center.lat - lat_lng.lat) / span;

        Point::new(
            self.size.x / 2.0 + rel_lng * self.size.x,
            self.size.y / 2.0 + rel_lat * self.size.y,
        )
    }

    /// Converts container pixel coordinates back to geographical coordinates
    pub fn pixel_to_lat_lng(&self, pixel: &Point) -> LatLng {
        if self.size.x <= 0.0 || self.size.y <= 0.0 {
            return self.center;
        }

        let span = 2.0 * self.zoom_factor();
        let rel_lng = (pixel.x - self.size.x / 2.0) / self.size.x;
        let rel_lat = (pixel.y - self.size.y / 2.0) / self.size.y;

        LatLng::new(
            self.center.lat - rel_lat * span,
            self.center.lng + rel_lng * span,
        )
    }

    /// Translates the center for a pointer drag of `delta` pixels.
    ///
    /// Dragging right moves the map east-to-west under the pointer (center goes west),
    /// dragging down moves the center north. There is no inertia.
    pub fn pan(&mut self, delta: Point) {
        let step = self.zoom_factor() * DRAG_SENSITIVITY;
        let new_center = LatLng::new(
            self.center.lat + delta.y * step,
            self.center.lng - delta.x * step,
        );
        self.set_center(new_center);
    }

    /// Gets the current viewport bounds requested from the tile viewer
    pub fn bounds(&self) -> LatLngBounds {
        LatLngBounds::around(self.center, self.zoom_factor())
    }

    /// Centers on a single selected location at street-level zoom
    pub fn fit_location(&mut self, location: &LatLng) {
        self.set_center(*location);
        self.set_zoom(LOCATION_ZOOM);
    }

    /// Centers on the mean of `points` at regional zoom.
    ///
    /// This is a centroid fit only: widely spread routes may extend past the container.
    pub fn fit_points(&mut self, points: &[LatLng]) {
        if let Some(centroid) = LatLng::centroid(points) {
            self.set_center(centroid);
            self.set_zoom(ROUTE_ZOOM);
        }
    }

    /// Checks whether a screen point falls inside the container
    pub fn contains_pixel(&self, pixel: &Point) -> bool {
        pixel.x >= 0.0 && pixel.y >= 0.0 && pixel.x <= self.size.x && pixel.y <= self.size.y
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(
            LatLng::new(DEFAULT_CENTER.0, DEFAULT_CENTER.1),
            DEFAULT_ZOOM,
            Point::new(DEFAULT_CONTAINER_SIZE.0, DEFAULT_CONTAINER_SIZE.1),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn viewport() -> Viewport {
        Viewport::new(LatLng::new(39.9042, 116.4074), 10, Point::new(800.0, 600.0))
    }

    #[test]
    fn test_viewport_creation() {
        let viewport = viewport();

        assert_eq!(viewport.zoom(), 10);
        assert_eq!(viewport.center.lat, 39.9042);
        assert_eq!(viewport.size.x, 800.0);
        assert_eq!(Viewport::new(LatLng::default(), 40, Point::default()).zoom(), MAX_ZOOM);
        assert_eq!(Viewport::new(LatLng::default(), 0, Point::default()).zoom(), MIN_ZOOM);
    }

    #[test]
    fn test_zoom_factor_reference_and_monotonic() {
        assert!((zoom_factor(10) - 0.05).abs() < EPS);
        assert!((zoom_factor(11) - 0.025).abs() < EPS);
        assert!((zoom_factor(9) - 0.1).abs() < EPS);

        for zoom in MIN_ZOOM..MAX_ZOOM {
            assert!(zoom_factor(zoom) > zoom_factor(zoom + 1));
        }
    }

    #[test]
    fn test_center_projects_to_midpoint() {
        for (w, h) in [(800.0, 600.0), (1.0, 1.0), (1920.0, 1080.0)] {
            for zoom in MIN_ZOOM..=MAX_ZOOM {
                let viewport = Viewport::new(LatLng::new(-33.9, 18.4), zoom, Point::new(w, h));
                let pixel = viewport.lat_lng_to_pixel(&viewport.center);
                assert_eq!(pixel, Point::new(w / 2.0, h / 2.0));
            }
        }
    }

    #[test]
    fn test_forward_projection_edges() {
        let viewport = viewport();
        let f = viewport.zoom_factor();

        // The east edge of the half-span sits on the right border, north on the top border
        let east = LatLng::new(viewport.center.lat, viewport.center.lng + f);
        let north = LatLng::new(viewport.center.lat + f, viewport.center.lng);

        let east_px = viewport.lat_lng_to_pixel(&east);
        let north_px = viewport.lat_lng_to_pixel(&north);
        assert!((east_px.x - 800.0).abs() < 1e-6);
        assert!((east_px.y - 300.0).abs() < 1e-6);
        assert!((north_px.x - 400.0).abs() < 1e-6);
        assert!(north_px.y.abs() < 1e-6);
    }

    #[test]
    fn test_projection_round_trip() {
        let viewport = viewport();
        for point in [
            LatLng::new(39.95, 116.35),
            LatLng::new(-10.0, 50.0),
            LatLng::new(39.9042, 116.4074),
        ] {
            let pixel = viewport.lat_lng_to_pixel(&point);
            let back = viewport.pixel_to_lat_lng(&pixel);
            assert!((back.lat - point.lat).abs() < 1e-9);
            assert!((back.lng - point.lng).abs() < 1e-9);
        }
    }

    #[test]
    fn test_pan_direction_and_reversal() {
        let mut viewport = viewport();
        let original = viewport.center;

        viewport.pan(Point::new(40.0, -25.0));
        let f = zoom_factor(10);
        assert!((viewport.center.lng - (original.lng - 40.0 * f * 0.5)).abs() < EPS);
        assert!((viewport.center.lat - (original.lat - 25.0 * f * 0.5)).abs() < EPS);

        viewport.pan(Point::new(-40.0, 25.0));
        assert!((viewport.center.lat - original.lat).abs() < EPS);
        assert!((viewport.center.lng - original.lng).abs() < EPS);
    }

    #[test]
    fn test_zoom_steps_and_limits() {
        let mut viewport = viewport();
        assert!(viewport.zoom_in());
        assert!(viewport.zoom_out());
        assert_eq!(viewport.zoom(), 10);

        viewport.set_zoom(MAX_ZOOM);
        assert!(!viewport.zoom_in());
        assert_eq!(viewport.zoom(), 18);

        viewport.set_zoom(MIN_ZOOM);
        assert!(!viewport.zoom_out());
        assert_eq!(viewport.zoom(), 3);
    }

    #[test]
    fn test_zoom_keeps_center() {
        let mut viewport = viewport();
        let center = viewport.center;
        viewport.zoom_in();
        assert_eq!(viewport.center, center);
    }

    #[test]
    fn test_bounds() {
        let viewport = Viewport::new(LatLng::new(10.0, 20.0), 10, Point::new(100.0, 100.0));
        let bounds = viewport.bounds();
        assert!((bounds.west() - 19.95).abs() < EPS);
        assert!((bounds.south() - 9.95).abs() < EPS);
        assert!((bounds.east() - 20.05).abs() < EPS);
        assert!((bounds.north() - 10.05).abs() < EPS);
    }

    #[test]
    fn test_fit_location_and_points() {
        let mut viewport = viewport();
        viewport.fit_location(&LatLng::new(13.7563, 100.5018));
        assert_eq!(viewport.center, LatLng::new(13.7563, 100.5018));
        assert_eq!(viewport.zoom(), 12);

        viewport.fit_points(&[LatLng::new(0.0, 0.0), LatLng::new(2.0, 0.0)]);
        assert_eq!(viewport.center, LatLng::new(1.0, 0.0));
        assert_eq!(viewport.zoom(), 8);

        // An empty set leaves the view alone
        viewport.fit_points(&[]);
        assert_eq!(viewport.center, LatLng::new(1.0, 0.0));
    }

    #[test]
    fn test_zero_sized_container_unprojects_to_center() {
        let viewport = Viewport::new(LatLng::new(1.0, 2.0), 10, Point::new(0.0, 0.0));
        assert_eq!(viewport.pixel_to_lat_lng(&Point::new(5.0, 5.0)), LatLng::new(1.0, 2.0));
    }
}
