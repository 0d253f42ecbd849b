pub mod panels;
pub mod style;
pub mod widget;

pub use self::panels::{side_panel, top_bar};
pub use self::style::OverlayStyle;
pub use self::widget::MapView;

/// Shorthand for adding a [`MapView`] to a `Ui`
pub trait UiMapExt {
    fn map_view(&mut self, state: &mut crate::core::map::MapState) -> egui::Response;
}

impl UiMapExt for egui::Ui {
    fn map_view(&mut self, state: &mut crate::core::map::MapState) -> egui::Response {
        self.add(MapView::new(state))
    }
}
