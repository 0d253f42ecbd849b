use crate::{
    core::{geo::Point, map::MapState},
    i18n::TextKey,
    input::events::{InputEvent, KeyCode, KeyModifiers, MouseButton},
    layers::route::{Arrow, RenderedRoute},
    ui::style::{color, OverlayStyle},
};
use egui::{
    epaint::QuadraticBezierShape, Align2, Color32, FontId, Pos2, Rect, Response, Sense, Shape,
    Stroke, Ui, Vec2, Widget,
};

/// Keys the map listens to while hovered
const MAP_KEYS: [egui::Key; 4] = [
    egui::Key::Plus,
    egui::Key::Equals,
    egui::Key::Minus,
    egui::Key::Escape,
];

/// `=` shares the plus key on most layouts, so both zoom in
fn key_code(key: egui::Key) -> Option<KeyCode> {
    match key {
        egui::Key::Plus | egui::Key::Equals => Some(KeyCode::Plus),
        egui::Key::Minus => Some(KeyCode::Minus),
        egui::Key::Escape => Some(KeyCode::Escape),
        _ => None,
    }
}

/// Immediate-mode view of a [`MapState`]
///
/// The base map itself lives in the external viewer addressed by
/// [`MapState::viewer_url`]; this widget paints the visible bbox, the selected
/// place and the route overlay, and feeds pointer and keyboard input back into
/// the state.
///
/// ```rust,ignore
/// ui.add(MapView::new(&mut state));
/// ```
pub struct MapView<'a> {
    state: &'a mut MapState,
    style: OverlayStyle,
    interactive: bool,
    show_controls: bool,
    show_attribution: bool,
}

impl<'a> MapView<'a> {
    pub fn new(state: &'a mut MapState) -> Self {
        Self {
            state,
            style: OverlayStyle::default(),
            interactive: true,
            show_controls: true,
            show_attribution: true,
        }
    }

    pub fn style(mut self, style: OverlayStyle) -> Self {
        self.style = style;
        self
    }

    /// Set whether the map reacts to input (default: true)
    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// Set whether to show zoom controls (default: true)
    pub fn controls(mut self, show: bool) -> Self {
        self.show_controls = show;
        self
    }

    /// Set whether to show attribution (default: true)
    pub fn attribution(mut self, show: bool) -> Self {
        self.show_attribution = show;
        self
    }

    fn local(rect: Rect, pos: Pos2) -> Point {
        Point::new((pos.x - rect.min.x) as f64, (pos.y - rect.min.y) as f64)
    }

    fn screen(rect: Rect, point: Point) -> Pos2 {
        Pos2::new(rect.min.x + point.x as f32, rect.min.y + point.y as f32)
    }

    fn handle_input(&mut self, ui: &Ui, rect: Rect, response: &Response) {
        let size = Point::new(rect.width() as f64, rect.height() as f64);
        if size != self.state.viewport().size {
            self.state.handle_input(InputEvent::Resize { size });
        }

        let pointer = response
            .interact_pointer_pos()
            .or_else(|| response.hover_pos())
            .map(|pos| Self::local(rect, pos));

        if response.secondary_clicked() {
            if let Some(position) = pointer {
                self.state.handle_input(InputEvent::ContextMenu { position });
            }
            return;
        }

        if response.drag_started() || (response.clicked() && self.state.context_menu().is_some())
        {
            if let Some(position) = pointer {
                self.state.handle_input(InputEvent::PointerDown {
                    position,
                    button: MouseButton::Left,
                });
            }
        }
        if response.dragged() {
            if let Some(position) = pointer {
                self.state.handle_input(InputEvent::PointerMove { position });
            }
        }
        if response.drag_released() {
            self.state.handle_input(InputEvent::PointerUp);
        }

        if response.hovered() {
            let scroll = ui.input(|i| i.raw_scroll_delta.y);
            if scroll.abs() > 0.1 {
                self.state.handle_input(InputEvent::Scroll {
                    delta: scroll as f64,
                    position: pointer.unwrap_or_default(),
                });
            }

            let keys = ui.input(|i| {
                MAP_KEYS
                    .into_iter()
                    .filter(|key| i.key_pressed(*key))
                    .filter_map(key_code)
                    .collect::<Vec<_>>()
            });
            for key in keys {
                self.state.handle_input(InputEvent::KeyPress {
                    key,
                    modifiers: KeyModifiers::default(),
                });
            }
        }
    }

    fn paint_background(&self, ui: &Ui, rect: Rect) {
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, self.style.background);

        // One grid line per tenth of the visible span
        let step_x = rect.width() / 10.0;
        let step_y = rect.height() / 10.0;
        for i in 1..10 {
            let x = rect.min.x + step_x * i as f32;
            let y = rect.min.y + step_y * i as f32;
            painter.line_segment(
                [Pos2::new(x, rect.min.y), Pos2::new(x, rect.max.y)],
                Stroke::new(1.0, self.style.grid),
            );
            painter.line_segment(
                [Pos2::new(rect.min.x, y), Pos2::new(rect.max.x, y)],
                Stroke::new(1.0, self.style.grid),
            );
        }

        let bounds = self.state.viewport().bounds();
        painter.text(
            rect.left_top() + Vec2::new(8.0, 8.0),
            Align2::LEFT_TOP,
            format!(
                "{} · z{}",
                bounds.to_bbox_param(),
                self.state.viewport().zoom()
            ),
            FontId::monospace(11.0),
            Color32::from_gray(90),
        );
    }

    fn paint_route(&self, ui: &Ui, rect: Rect, route: &RenderedRoute) {
        let painter = ui.painter_at(rect);
        let stroke = Stroke::new(self.style.route_width, self.style.route_color);

        for segment in &route.segments {
            let points = [
                Self::screen(rect, segment.start),
                Self::screen(rect, segment.control),
                Self::screen(rect, segment.end),
            ];
            painter.add(QuadraticBezierShape::from_points_stroke(
                points,
                false,
                Color32::TRANSPARENT,
                stroke,
            ));
        }

        let visible = rect.expand(self.style.arrow_size);
        for arrow in &route.arrows {
            if visible.contains(Self::screen(rect, arrow.position)) {
                painter.add(self.arrow_shape(rect, arrow));
            }
        }

        let translator = *self.state.translator();
        for marker in &route.markers {
            let center = Self::screen(rect, marker.position);
            let radius = marker.radius() as f32;
            painter.circle(
                center,
                radius,
                color(marker.color()),
                Stroke::new(2.0, self.style.marker_outline),
            );
            painter.text(
                center,
                Align2::CENTER_CENTER,
                marker.label(&translator),
                FontId::proportional(11.0),
                self.style.marker_text,
            );
        }
    }

    /// Triangle pointing along the arrow's heading
    fn arrow_shape(&self, rect: Rect, arrow: &Arrow) -> Shape {
        let center = Self::screen(rect, arrow.position);
        let angle = arrow.angle.to_radians() as f32;
        let forward = Vec2::angled(angle);
        let side = Vec2::new(-forward.y, forward.x);
        let half = self.style.arrow_size / 2.0;

        let tip = center + forward * half;
        let back = center - forward * half;
        Shape::convex_polygon(
            vec![tip, back + side * half * 0.8, back - side * half * 0.8],
            self.style.arrow_color,
            Stroke::NONE,
        )
    }

    fn paint_selection(&self, ui: &Ui, rect: Rect) {
        let Some(selected) = self.state.selected() else {
            return;
        };
        let pixel = self.state.viewport().lat_lng_to_pixel(&selected.position);
        if !self.state.viewport().contains_pixel(&pixel) {
            return;
        }
        let painter = ui.painter_at(rect);
        let pos = Self::screen(rect, pixel);
        painter.circle(
            pos,
            8.0,
            self.style.selection_color,
            Stroke::new(2.0, Color32::WHITE),
        );
        painter.text(
            pos + Vec2::new(0.0, -14.0),
            Align2::CENTER_BOTTOM,
            &selected.name,
            FontId::proportional(13.0),
            Color32::BLACK,
        );
    }

    fn zoom_controls(&mut self, ui: &mut Ui, rect: Rect) {
        let size = Vec2::splat(30.0);
        let zoom_in_rect = Rect::from_min_size(rect.right_top() + Vec2::new(-40.0, 10.0), size);
        let zoom_out_rect = Rect::from_min_size(rect.right_top() + Vec2::new(-40.0, 45.0), size);

        for (control, label, zoom_in) in [(zoom_in_rect, "+", true), (zoom_out_rect, "−", false)] {
            let response = ui.allocate_rect(control, Sense::click());
            if response.clicked() {
                if zoom_in {
                    self.state.zoom_in();
                } else {
                    self.state.zoom_out();
                }
            }
            ui.painter().rect_filled(
                control,
                3.0,
                Color32::from_rgba_unmultiplied(255, 255, 255, 220),
            );
            ui.painter()
                .rect_stroke(control, 3.0, Stroke::new(1.0, Color32::from_gray(100)));
            ui.painter().text(
                control.center(),
                Align2::CENTER_CENTER,
                label,
                FontId::proportional(16.0),
                Color32::BLACK,
            );
        }
    }

    fn context_menu(&mut self, ui: &Ui, rect: Rect) {
        let Some(menu) = self.state.context_menu().copied() else {
            return;
        };
        let translator = *self.state.translator();

        egui::Area::new(egui::Id::new("routeview_context_menu"))
            .fixed_pos(Self::screen(rect, menu.pixel))
            .order(egui::Order::Foreground)
            .show(ui.ctx(), |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.label(menu.position.to_display_string());
                    ui.separator();
                    if ui.button(translator.text(TextKey::SetAsStart)).clicked() {
                        self.state.context_set_start();
                    }
                    if ui.button(translator.text(TextKey::SetAsEnd)).clicked() {
                        self.state.context_set_end();
                    }
                    if ui.button(translator.text(TextKey::SearchNearby)).clicked() {
                        self.state.context_search_nearby();
                    }
                });
            });
    }
}

impl<'a> Widget for MapView<'a> {
    fn ui(mut self, ui: &mut Ui) -> Response {
        let desired_size = ui.available_size();
        let (rect, response) = ui.allocate_exact_size(desired_size, Sense::click_and_drag());

        if self.interactive {
            self.handle_input(ui, rect, &response);
        }

        self.paint_background(ui, rect);
        if let Some(route) = self.state.rendered_route() {
            self.paint_route(ui, rect, &route);
        }
        self.paint_selection(ui, rect);

        if self.show_controls {
            self.zoom_controls(ui, rect);
        }

        if self.show_attribution {
            ui.painter().text(
                rect.left_bottom() + Vec2::new(5.0, -5.0),
                Align2::LEFT_BOTTOM,
                "© OpenStreetMap contributors",
                FontId::proportional(10.0),
                Color32::from_gray(120),
            );
        }

        self.context_menu(ui, rect);

        if self.state.is_dragging() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing);
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plus_and_equals_both_zoom_in() {
        assert_eq!(key_code(egui::Key::Plus), Some(KeyCode::Plus));
        assert_eq!(key_code(egui::Key::Equals), Some(KeyCode::Plus));
        assert_eq!(key_code(egui::Key::Minus), Some(KeyCode::Minus));
        assert_eq!(key_code(egui::Key::Escape), Some(KeyCode::Escape));
        assert_eq!(key_code(egui::Key::A), None);
    }

    #[test]
    fn test_every_listened_key_maps() {
        assert!(MAP_KEYS.into_iter().all(|key| key_code(key).is_some()));
    }
}
