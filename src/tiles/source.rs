use crate::core::{
    constants::DEFAULT_VIEWER_HOST,
    geo::{LatLng, LatLngBounds},
    viewport::Viewport,
};
use serde::{Deserialize, Serialize};

/// Base map look selected by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MapStyle {
    #[default]
    Standard,
    Satellite,
    Terrain,
}

impl MapStyle {
    pub const ALL: [MapStyle; 3] = [MapStyle::Standard, MapStyle::Satellite, MapStyle::Terrain];
}

/// Everything the embedded viewer needs to draw one frame.
///
/// The viewer keeps no state of its own, so a new request replaces the previous
/// one whenever the center, zoom, style or marker changes.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerRequest {
    pub bounds: LatLngBounds,
    pub style: MapStyle,
    pub marker: Option<LatLng>,
}

impl ViewerRequest {
    pub fn from_viewport(viewport: &Viewport, style: MapStyle, marker: Option<LatLng>) -> Self {
        Self {
            bounds: viewport.bounds(),
            style,
            marker,
        }
    }
}

/// Trait representing anything that can address the embedded map viewer.
pub trait TileSource: Send + Sync {
    /// Provider layer identifier for a style.
    fn layer_id(&self, style: MapStyle) -> &'static str;

    /// Build the viewer URL for `request`.
    fn url(&self, request: &ViewerRequest) -> String;
}

/// The OpenStreetMap embed page (`/export/embed.html`).
#[derive(Debug, Clone)]
pub struct OpenStreetMapSource {
    host: String,
}

impl OpenStreetMapSource {
    pub fn new() -> Self {
        Self::with_host(DEFAULT_VIEWER_HOST)
    }

    pub fn with_host(host: impl Into<String>) -> Self {
        Self { host: host.into() }
    }

    pub fn host(&self) -> &str {
        &self.host
    }
}

impl Default for OpenStreetMapSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TileSource for OpenStreetMapSource {
    fn layer_id(&self, style: MapStyle) -> &'static str {
        // OSM has no satellite or terrain layer on the embed page
        match style {
            MapStyle::Standard | MapStyle::Satellite | MapStyle::Terrain => "mapnik",
        }
    }

    fn url(&self, request: &ViewerRequest) -> String {
        let mut url = format!(
            "https://{}/export/embed.html?bbox={}&layer={}",
            self.host,
            request.bounds.to_bbox_param(),
            self.layer_id(request.style)
        );

        if let Some(marker) = request.marker {
            url.push_str(&format!("&marker={},{}", marker.lat, marker.lng));
        }

        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::Point;

    #[test]
    fn test_url_without_marker() {
        let viewport = Viewport::new(LatLng::new(10.0, 20.0), 10, Point::new(800.0, 600.0));
        let request = ViewerRequest::from_viewport(&viewport, MapStyle::Standard, None);
        let url = OpenStreetMapSource::new().url(&request);

        let bbox = viewport.bounds().to_bbox_param();
        assert_eq!(
            url,
            format!(
                "https://www.openstreetmap.org/export/embed.html?bbox={}&layer=mapnik",
                bbox
            )
        );
        assert!(!url.contains("marker"));
    }

    #[test]
    fn test_url_with_marker_and_custom_host() {
        let viewport = Viewport::new(LatLng::new(0.0, 0.0), 10, Point::new(800.0, 600.0));
        let request = ViewerRequest::from_viewport(
            &viewport,
            MapStyle::Terrain,
            Some(LatLng::new(1.5, -2.25)),
        );
        let url = OpenStreetMapSource::with_host("tiles.example.org").url(&request);

        assert!(url.starts_with("https://tiles.example.org/export/embed.html?bbox="));
        assert!(url.contains("bbox=-0.05,-0.05,0.05,0.05"));
        assert!(url.ends_with("&layer=mapnik&marker=1.5,-2.25"));
    }

    #[test]
    fn test_request_changes_with_zoom() {
        let mut viewport = Viewport::default();
        let before = ViewerRequest::from_viewport(&viewport, MapStyle::Standard, None);
        viewport.zoom_in();
        let after = ViewerRequest::from_viewport(&viewport, MapStyle::Standard, None);
        assert_ne!(before, after);
    }

    #[test]
    fn test_style_serde_names() {
        assert_eq!(serde_json::to_string(&MapStyle::Satellite).unwrap(), "\"satellite\"");
    }
}
