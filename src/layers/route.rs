use crate::{
    core::{
        config::OverlayConfig,
        constants::{ARROW_CLIP_BATCH, ARROW_CLIP_MARGIN_PX, MAX_WAYPOINTS},
        geo::{LatLng, NamedLatLng, Point},
        viewport::Viewport,
    },
    layers::marker::{MarkerKind, RouteMarker},
    rendering::path::{svg_path_data, QuadraticBezier},
};
use serde::{Deserialize, Serialize};

/// Ordered route points: start, up to [`MAX_WAYPOINTS`] stops, end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePath {
    start: NamedLatLng,
    waypoints: Vec<NamedLatLng>,
    end: NamedLatLng,
}

impl RoutePath {
    pub fn new(start: NamedLatLng, end: NamedLatLng) -> Self {
        Self {
            start,
            waypoints: Vec::new(),
            end,
        }
    }

    /// Builds a route with intermediate stops; stops past the limit are dropped
    pub fn with_waypoints(
        start: NamedLatLng,
        mut waypoints: Vec<NamedLatLng>,
        end: NamedLatLng,
    ) -> Self {
        if waypoints.len() > MAX_WAYPOINTS {
            log::warn!(
                "route has {} waypoints, keeping the first {}",
                waypoints.len(),
                MAX_WAYPOINTS
            );
            waypoints.truncate(MAX_WAYPOINTS);
        }
        Self {
            start,
            waypoints,
            end,
        }
    }

    pub fn start(&self) -> &NamedLatLng {
        &self.start
    }

    pub fn end(&self) -> &NamedLatLng {
        &self.end
    }

    pub fn waypoints(&self) -> &[NamedLatLng] {
        &self.waypoints
    }

    /// All points in traversal order
    pub fn points(&self) -> impl Iterator<Item = &NamedLatLng> {
        std::iter::once(&self.start)
            .chain(self.waypoints.iter())
            .chain(std::iter::once(&self.end))
    }

    pub fn coordinates(&self) -> Vec<LatLng> {
        self.points().map(|p| p.position).collect()
    }

    pub fn point_count(&self) -> usize {
        self.waypoints.len() + 2
    }

    /// Great-circle length over all legs, in kilometers
    pub fn great_circle_km(&self) -> f64 {
        self.coordinates()
            .windows(2)
            .map(|leg| leg[0].distance_km(&leg[1]))
            .sum()
    }
}

/// A direction glyph placed on the route
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arrow {
    pub position: Point,
    /// Rotation in degrees for a glyph that points along +x when unrotated
    pub angle: f64,
}

/// Number of arrows on a leg of `distance` pixels: one per full `spacing`
pub fn arrow_count(distance: f64, spacing: f64) -> usize {
    if !(distance.is_finite() && spacing > 0.0) || distance <= 0.0 {
        return 0;
    }
    (distance / spacing).floor() as usize
}

/// Geometry of a route for one viewport state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderedRoute {
    pub segments: Vec<QuadraticBezier>,
    pub arrows: Vec<Arrow>,
    pub markers: Vec<RouteMarker>,
}

impl RenderedRoute {
    /// SVG `d` attribute for the whole route
    pub fn svg_path(&self) -> String {
        svg_path_data(&self.segments)
    }
}

/// Builds route geometry in screen space.
///
/// Output is rebuilt from scratch for every call; there is no cached state to
/// invalidate when the viewport or the route changes.
#[derive(Debug, Clone, Default)]
pub struct RouteOverlay {
    config: OverlayConfig,
}

impl RouteOverlay {
    pub fn new(config: OverlayConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Projects every route point through `viewport` and lays out legs, arrows and markers.
    ///
    /// Only arrows within [`ARROW_CLIP_MARGIN_PX`] of the container are kept.
    pub fn render(&self, route: &RoutePath, viewport: &Viewport) -> RenderedRoute {
        let positions: Vec<Point> = route
            .points()
            .map(|p| viewport.lat_lng_to_pixel(&p.position))
            .collect();

        let clip = ClipRect::around(viewport.size, ARROW_CLIP_MARGIN_PX);
        let segments: Vec<QuadraticBezier> = positions
            .windows(2)
            .map(|pair| QuadraticBezier::bowed(pair[0], pair[1], self.config.curve_bulge))
            .collect();
        let arrows = segments
            .iter()
            .flat_map(|segment| self.arrows_within(segment, &clip))
            .collect();

        let rendered = RenderedRoute {
            segments,
            arrows,
            markers: markers_for(&positions),
        };

        log::debug!(
            "route rebuilt: {} legs, {} arrows at zoom {}",
            rendered.segments.len(),
            rendered.arrows.len(),
            viewport.zoom()
        );
        rendered
    }

    /// Legs and arrows for already-projected points. Fewer than two points yield nothing.
    pub fn render_points(&self, positions: &[Point]) -> RenderedRoute {
        let segments: Vec<QuadraticBezier> = positions
            .windows(2)
            .map(|pair| QuadraticBezier::bowed(pair[0], pair[1], self.config.curve_bulge))
            .collect();

        let arrows = segments
            .iter()
            .flat_map(|segment| self.arrows_for(segment))
            .collect();

        RenderedRoute {
            segments,
            arrows,
            markers: Vec::new(),
        }
    }

    /// Arrows evenly spaced along one leg, excluding its endpoints
    pub fn arrows_for(&self, segment: &QuadraticBezier) -> Vec<Arrow> {
        if segment.is_degenerate() {
            return Vec::new();
        }

        let count = arrow_count(segment.chord_length(), self.config.arrow_spacing_px);
        (1..=count)
            .map(|j| {
                let t = j as f64 / (count + 1) as f64;
                Arrow {
                    position: segment.point_at(t),
                    angle: segment.heading_at(t),
                }
            })
            .collect()
    }

    /// Same arrows as [`arrows_for`](Self::arrows_for), minus those outside `clip`.
    ///
    /// Ranges of arrow slots whose piece of the curve misses `clip` are skipped
    /// whole, so a leg millions of pixels long costs about as much as one on screen.
    pub fn arrows_within(&self, segment: &QuadraticBezier, clip: &ClipRect) -> Vec<Arrow> {
        if segment.is_degenerate() {
            return Vec::new();
        }
        let count = arrow_count(segment.chord_length(), self.config.arrow_spacing_px);
        let mut arrows = Vec::new();
        if count > 0 {
            collect_clipped(segment, count, 1, count, clip, &mut arrows);
        }
        arrows
    }
}

/// Screen-space rectangle that arrows must fall in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipRect {
    pub min: Point,
    pub max: Point,
}

impl ClipRect {
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// A container of `size` grown by `margin` on every side
    pub fn around(size: Point, margin: f64) -> Self {
        Self::new(
            Point::new(-margin, -margin),
            Point::new(size.x + margin, size.y + margin),
        )
    }

    pub fn contains(&self, point: &Point) -> bool {
        (self.min.x..=self.max.x).contains(&point.x) && (self.min.y..=self.max.y).contains(&point.y)
    }

    fn overlaps(&self, min: &Point, max: &Point) -> bool {
        min.x <= self.max.x && max.x >= self.min.x && min.y <= self.max.y && max.y >= self.min.y
    }
}

/// Pushes the clipped arrows for slots `lo..=hi` of `count`, in slot order
fn collect_clipped(
    segment: &QuadraticBezier,
    count: usize,
    lo: usize,
    hi: usize,
    clip: &ClipRect,
    out: &mut Vec<Arrow>,
) {
    let slot = |j: usize| j as f64 / (count + 1) as f64;
    let (min, max) = segment.hull_between(slot(lo), slot(hi));
    if !clip.overlaps(&min, &max) {
        return;
    }

    if hi - lo < ARROW_CLIP_BATCH {
        for j in lo..=hi {
            let t = slot(j);
            let position = segment.point_at(t);
            if clip.contains(&position) {
                out.push(Arrow {
                    position,
                    angle: segment.heading_at(t),
                });
            }
        }
        return;
    }

    let mid = lo + (hi - lo) / 2;
    collect_clipped(segment, count, lo, mid, clip, out);
    collect_clipped(segment, count, mid + 1, hi, clip, out);
}

fn markers_for(positions: &[Point]) -> Vec<RouteMarker> {
    let last = positions.len().saturating_sub(1);
    positions
        .iter()
        .enumerate()
        .map(|(i, &position)| {
            let kind = match i {
                0 => MarkerKind::Start,
                i if i == last => MarkerKind::End,
                i => MarkerKind::Waypoint(i),
            };
            RouteMarker::new(kind, position)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str, lat: f64, lng: f64) -> NamedLatLng {
        NamedLatLng::new(name, LatLng::new(lat, lng))
    }

    #[test]
    fn test_arrow_count() {
        assert_eq!(arrow_count(0.0, 80.0), 0);
        assert_eq!(arrow_count(79.9, 80.0), 0);
        assert_eq!(arrow_count(80.0, 80.0), 1);
        assert_eq!(arrow_count(250.0, 80.0), 3);
        assert_eq!(arrow_count(f64::NAN, 80.0), 0);
        assert_eq!(arrow_count(100.0, 0.0), 0);
    }

    #[test]
    fn test_two_point_route_geometry() {
        let overlay = RouteOverlay::default();
        let rendered = overlay.render_points(&[Point::new(0.0, 0.0), Point::new(100.0, 0.0)]);

        assert_eq!(rendered.segments.len(), 1);
        let control = rendered.segments[0].control;
        assert!((control.x - 50.0).abs() < 1e-9);
        assert!((control.y - 15.0).abs() < 1e-9);

        // 100px leg carries exactly one arrow, at the curve's midpoint
        assert_eq!(rendered.arrows.len(), 1);
        let arrow = rendered.arrows[0];
        assert!((arrow.position.x - 50.0).abs() < 1e-9);
        assert!((arrow.position.y - 7.5).abs() < 1e-9);
        assert!(arrow.angle.abs() < 1e-6);
    }

    #[test]
    fn test_arrows_evenly_spaced() {
        let overlay = RouteOverlay::new(OverlayConfig {
            arrow_spacing_px: 80.0,
            curve_bulge: 0.0,
        });
        let rendered = overlay.render_points(&[Point::new(0.0, 0.0), Point::new(400.0, 0.0)]);

        // 400 / 80 = 5 arrows at t = 1/6 .. 5/6
        let xs: Vec<f64> = rendered.arrows.iter().map(|a| a.position.x).collect();
        assert_eq!(xs.len(), 5);
        for (j, x) in xs.iter().enumerate() {
            let expected = 400.0 * (j + 1) as f64 / 6.0;
            assert!((x - expected).abs() < 1e-9);
        }
        assert!(rendered.arrows.iter().all(|a| a.angle.abs() < 1e-9));
    }

    #[test]
    fn test_coincident_points_are_stable() {
        let overlay = RouteOverlay::default();
        let p = Point::new(10.0, 10.0);
        let rendered = overlay.render_points(&[p, p, Point::new(200.0, 10.0)]);

        assert_eq!(rendered.segments.len(), 2);
        assert!(rendered.segments[0].is_degenerate());
        assert!(rendered.segments.iter().all(|s| s.control.is_finite()));
        assert!(rendered.arrows.iter().all(|a| a.position.is_finite() && a.angle.is_finite()));
        assert_eq!(rendered.arrows.len(), 2);
        assert!(!rendered.svg_path().contains("NaN"));
    }

    #[test]
    fn test_single_point_renders_nothing() {
        let rendered = RouteOverlay::default().render_points(&[Point::new(1.0, 1.0)]);
        assert!(rendered.segments.is_empty());
        assert!(rendered.arrows.is_empty());
        assert_eq!(rendered.svg_path(), "");
    }

    #[test]
    fn test_route_points_and_markers() {
        let route = RoutePath::with_waypoints(
            named("A", 0.0, 0.0),
            vec![named("B", 0.0, 0.01), named("C", 0.0, 0.02)],
            named("D", 0.0, 0.03),
        );
        assert_eq!(route.point_count(), 4);

        let viewport = Viewport::new(LatLng::new(0.0, 0.015), 10, Point::new(800.0, 600.0));
        let rendered = RouteOverlay::default().render(&route, &viewport);

        assert_eq!(rendered.segments.len(), 3);
        let kinds: Vec<MarkerKind> = rendered.markers.iter().map(|m| m.kind).collect();
        assert_eq!(
            kinds,
            vec![
                MarkerKind::Start,
                MarkerKind::Waypoint(1),
                MarkerKind::Waypoint(2),
                MarkerKind::End
            ]
        );
        assert_eq!(
            rendered.markers[0].position,
            viewport.lat_lng_to_pixel(&LatLng::new(0.0, 0.0))
        );
        assert!(rendered.svg_path().starts_with("M "));
        assert_eq!(rendered.svg_path().matches(" Q ").count(), 3);
    }

    #[test]
    fn test_rendering_follows_viewport() {
        let route = RoutePath::new(named("A", 0.0, 0.0), named("B", 0.0, 0.05));
        let overlay = RouteOverlay::default();
        let mut viewport = Viewport::new(LatLng::new(0.0, 0.025), 10, Point::new(800.0, 600.0));

        let before = overlay.render(&route, &viewport);
        viewport.zoom_in();
        let after = overlay.render(&route, &viewport);

        // Twice the zoom, twice the chord, roughly twice the arrows
        assert!(after.segments[0].chord_length() > before.segments[0].chord_length() * 1.99);
        assert!(after.arrows.len() > before.arrows.len());
    }

    #[test]
    fn test_clipped_arrows_match_unclipped_on_screen() {
        let overlay = RouteOverlay::default();
        let segment =
            QuadraticBezier::bowed(Point::new(40.0, 700.0), Point::new(1100.0, 90.0), 0.15);
        let clip = ClipRect::around(Point::new(1200.0, 800.0), 80.0);
        assert_eq!(overlay.arrows_within(&segment, &clip), overlay.arrows_for(&segment));
    }

    #[test]
    fn test_far_off_screen_leg_is_cut_to_the_container() {
        let overlay = RouteOverlay::default();
        let segment = QuadraticBezier::bowed(
            Point::new(-1_000_000.0, 400.0),
            Point::new(1_001_200.0, 400.0),
            0.0,
        );
        let clip = ClipRect::around(Point::new(1200.0, 800.0), 80.0);
        assert_eq!(overlay.arrows_for(&segment).len(), 25_015);

        let arrows = overlay.arrows_within(&segment, &clip);
        assert!((14..=18).contains(&arrows.len()), "{} arrows", arrows.len());
        assert!(arrows.iter().all(|a| clip.contains(&a.position)));
        assert!(arrows.windows(2).all(|w| w[0].position.x < w[1].position.x));
    }

    #[test]
    fn test_leg_entirely_outside_has_no_arrows() {
        let overlay = RouteOverlay::default();
        let segment =
            QuadraticBezier::bowed(Point::new(-5000.0, -300.0), Point::new(-100.0, -3000.0), 0.15);
        let clip = ClipRect::around(Point::new(800.0, 600.0), 80.0);
        assert!(overlay.arrows_within(&segment, &clip).is_empty());
    }

    #[test]
    fn test_long_route_at_max_zoom_stays_bounded() {
        let route = RoutePath::new(named("A", 39.9042, 116.4074), named("B", 25.2048, 55.2708));
        let mut viewport =
            Viewport::new(LatLng::new(32.5545, 85.8391), 18, Point::new(1200.0, 800.0));
        viewport.set_center(LatLng::new(39.9042, 116.4074));

        let rendered = RouteOverlay::default().render(&route, &viewport);
        assert!(rendered.segments[0].chord_length() > 1.0e8);
        assert!(rendered.arrows.len() < 100, "{} arrows", rendered.arrows.len());
        let clip = ClipRect::around(viewport.size, ARROW_CLIP_MARGIN_PX);
        assert!(rendered.arrows.iter().all(|a| clip.contains(&a.position)));
    }

    #[test]
    fn test_waypoint_limit() {
        let stops = (0..5).map(|i| named("stop", 0.0, i as f64)).collect();
        let route = RoutePath::with_waypoints(named("A", 0.0, 0.0), stops, named("B", 1.0, 1.0));
        assert_eq!(route.waypoints().len(), MAX_WAYPOINTS);
    }

    #[test]
    fn test_great_circle_length_sums_legs() {
        let direct = RoutePath::new(named("A", 0.0, 0.0), named("B", 0.0, 2.0));
        let via = RoutePath::with_waypoints(
            named("A", 0.0, 0.0),
            vec![named("M", 0.0, 1.0)],
            named("B", 0.0, 2.0),
        );
        assert!((direct.great_circle_km() - via.great_circle_km()).abs() < 1e-6);
        assert!((direct.great_circle_km() - 222.39).abs() < 0.5);
    }
}
