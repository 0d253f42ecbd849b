use geo::HaversineDistance;
use serde::{Deserialize, Serialize};

/// Represents a geographical coordinate with latitude and longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a new LatLng coordinate
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Creates a coordinate, clamping both axes into the valid ranges
    pub fn clamped(lat: f64, lng: f64) -> Self {
        Self::new(Self::clamp_lat(lat), Self::clamp_lng(lng))
    }

    /// Creates a coordinate, rejecting anything outside the valid ranges
    pub fn try_new(lat: f64, lng: f64) -> crate::Result<Self> {
        let coord = Self::new(lat, lng);
        if coord.is_valid() {
            Ok(coord)
        } else {
            Err(crate::MapError::InvalidCoordinates(format!(
                "{}, {} is outside [-90, 90] x [-180, 180]",
                lat, lng
            )))
        }
    }

    /// Validates that the coordinates are within valid ranges
    pub fn is_valid(&self) -> bool {
        self.lat >= -90.0 && self.lat <= 90.0 && self.lng >= -180.0 && self.lng <= 180.0
    }

    /// Great-circle distance to another LatLng, in kilometers
    pub fn distance_km(&self, other: &LatLng) -> f64 {
        let from = geo_types::Point::new(self.lng, self.lat);
        let to = geo_types::Point::new(other.lng, other.lat);
        from.haversine_distance(&to) / 1000.0
    }

    /// Clamps latitude to valid range
    pub fn clamp_lat(lat: f64) -> f64 {
        lat.clamp(-90.0, 90.0)
    }

    /// Clamps longitude to valid range
    pub fn clamp_lng(lng: f64) -> f64 {
        lng.clamp(-180.0, 180.0)
    }

    /// Arithmetic mean of a set of coordinates; `None` for an empty set
    pub fn centroid<'a, I>(points: I) -> Option<LatLng>
    where
        I: IntoIterator<Item = &'a LatLng>,
    {
        let (count, lat, lng) = points
            .into_iter()
            .fold((0usize, 0.0, 0.0), |(n, lat, lng), p| {
                (n + 1, lat + p.lat, lng + p.lng)
            });
        if count == 0 {
            return None;
        }
        Some(LatLng::new(lat / count as f64, lng / count as f64))
    }

    /// `lat,lng` with four decimals, the form accepted back by the route inputs
    pub fn to_display_string(&self) -> String {
        format!("{:.4}, {:.4}", self.lat, self.lng)
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// A coordinate with a display label.
///
/// Route endpoints and waypoints only need `name`; locations picked from search
/// also remember their type key and address so the detail panel can show them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedLatLng {
    pub name: String,
    #[serde(flatten)]
    pub position: LatLng,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl NamedLatLng {
    pub fn new(name: impl Into<String>, position: LatLng) -> Self {
        Self {
            name: name.into(),
            position,
            kind: None,
            address: None,
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn lat(&self) -> f64 {
        self.position.lat
    }

    pub fn lng(&self) -> f64 {
        self.position.lng
    }
}

/// Represents a point in screen coordinates, relative to the container's top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(&self, other: &Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    pub fn subtract(&self, other: &Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    pub fn multiply(&self, scalar: f64) -> Point {
        Point::new(self.x * scalar, self.y * scalar)
    }

    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        other.subtract(self).length()
    }

    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// The vector rotated by +90 degrees in screen space: `(-y, x)`
    pub fn perpendicular(&self) -> Point {
        Point::new(-self.y, self.x)
    }

    /// Angle of the vector in degrees, measured from +x towards +y
    pub fn angle_degrees(&self) -> f64 {
        self.y.atan2(self.x).to_degrees()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Represents a bounding box of geographical coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LatLngBounds {
    pub fn new(south_west: LatLng, north_east: LatLng) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    /// A square box of half-size `half_span` degrees around `center`
    pub fn around(center: LatLng, half_span: f64) -> Self {
        Self::new(
            LatLng::new(center.lat - half_span, center.lng - half_span),
            LatLng::new(center.lat + half_span, center.lng + half_span),
        )
    }

    pub fn west(&self) -> f64 {
        self.south_west.lng
    }

    pub fn south(&self) -> f64 {
        self.south_west.lat
    }

    pub fn east(&self) -> f64 {
        self.north_east.lng
    }

    pub fn north(&self) -> f64 {
        self.north_east.lat
    }

    /// Checks if the bounds contain a point
    pub fn contains(&self, point: &LatLng) -> bool {
        point.lat >= self.south_west.lat
            && point.lat <= self.north_east.lat
            && point.lng >= self.south_west.lng
            && point.lng <= self.north_east.lng
    }

    /// Gets the center point of the bounds
    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.south_west.lat + self.north_east.lat) / 2.0,
            (self.south_west.lng + self.north_east.lng) / 2.0,
        )
    }

    /// `west,south,east,north`, the ordering the embed viewer expects
    pub fn to_bbox_param(&self) -> String {
        [self.west(), self.south(), self.east(), self.north()]
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}
