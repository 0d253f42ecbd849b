use crate::{
    core::geo::Point,
    i18n::{TextKey, Translator},
};
use serde::{Deserialize, Serialize};

/// Plain RGB color, independent of any UI toolkit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

pub const ROUTE_COLOR: Rgb = Rgb(0x3a, 0x5e, 0xfb);
pub const START_COLOR: Rgb = ROUTE_COLOR;
pub const END_COLOR: Rgb = Rgb(0xef, 0x44, 0x44);
pub const WAYPOINT_COLOR: Rgb = Rgb(0xf9, 0x73, 0x16);

/// Role of a route point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerKind {
    Start,
    /// 1-based position among the waypoints
    Waypoint(usize),
    End,
}

/// A labeled circle drawn at a projected route point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteMarker {
    pub kind: MarkerKind,
    pub position: Point,
}

impl RouteMarker {
    pub fn new(kind: MarkerKind, position: Point) -> Self {
        Self { kind, position }
    }

    pub fn color(&self) -> Rgb {
        match self.kind {
            MarkerKind::Start => START_COLOR,
            MarkerKind::Waypoint(_) => WAYPOINT_COLOR,
            MarkerKind::End => END_COLOR,
        }
    }

    pub fn radius(&self) -> f64 {
        match self.kind {
            MarkerKind::Waypoint(_) => 14.0,
            MarkerKind::Start | MarkerKind::End => 16.0,
        }
    }

    /// Text drawn inside the circle
    pub fn label(&self, translator: &Translator) -> String {
        match self.kind {
            MarkerKind::Start => translator.text(TextKey::Start).to_string(),
            MarkerKind::Waypoint(number) => number.to_string(),
            MarkerKind::End => translator.text(TextKey::End).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;

    #[test]
    fn test_marker_styles() {
        let start = RouteMarker::new(MarkerKind::Start, Point::default());
        let stop = RouteMarker::new(MarkerKind::Waypoint(2), Point::default());
        let end = RouteMarker::new(MarkerKind::End, Point::default());

        assert_eq!(start.color().hex(), "#3a5efb");
        assert_eq!(end.color().hex(), "#ef4444");
        assert_eq!(stop.color().hex(), "#f97316");
        assert_eq!(stop.radius(), 14.0);
        assert_eq!(end.radius(), 16.0);
    }

    #[test]
    fn test_marker_labels() {
        let en = Translator::new(Language::En);
        let zh = Translator::new(Language::Zh);

        assert_eq!(RouteMarker::new(MarkerKind::Start, Point::default()).label(&en), "Start");
        assert_eq!(RouteMarker::new(MarkerKind::End, Point::default()).label(&zh), "终");
        assert_eq!(RouteMarker::new(MarkerKind::Waypoint(3), Point::default()).label(&en), "3");
    }
}
