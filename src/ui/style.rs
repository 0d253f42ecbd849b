use crate::layers::marker::{Rgb, ROUTE_COLOR};
use egui::Color32;

/// Colors and sizes used when painting the map view
#[derive(Debug, Clone)]
pub struct OverlayStyle {
    pub route_color: Color32,
    pub route_width: f32,
    pub arrow_color: Color32,
    /// Length of an arrow glyph from tail to tip
    pub arrow_size: f32,
    pub marker_outline: Color32,
    pub marker_text: Color32,
    pub selection_color: Color32,
    pub background: Color32,
    pub grid: Color32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            route_color: color(ROUTE_COLOR),
            route_width: 4.0,
            arrow_color: Color32::WHITE,
            arrow_size: 10.0,
            marker_outline: Color32::WHITE,
            marker_text: Color32::WHITE,
            selection_color: Color32::from_rgb(0xef, 0x44, 0x44),
            background: Color32::from_rgb(232, 236, 229),
            grid: Color32::from_rgb(214, 219, 210),
        }
    }
}

pub fn color(rgb: Rgb) -> Color32 {
    Color32::from_rgb(rgb.0, rgb.1, rgb.2)
}
