#![cfg(feature = "egui")]

use egui::{Context, Pos2, RawInput, Rect, Vec2};
use routeview::{
    core::{config::MapOptions, geo::Point, map::MapState},
    data::{history::SearchHistory, locations::LocationDatabase},
    i18n::Language,
    plugins::route_planner::{PlaceholderInstructions, RoutePlanner},
    ui::{side_panel, top_bar, MapView},
};

/// Headless egui frames over a live MapState

fn map() -> MapState {
    MapState::with_parts(
        MapOptions::default(),
        LocationDatabase::builtin().clone(),
        SearchHistory::in_memory(),
        RoutePlanner::new(Box::new(PlaceholderInstructions::seeded(5))),
    )
}

fn input(size: Vec2) -> RawInput {
    RawInput {
        screen_rect: Some(Rect::from_min_size(Pos2::ZERO, size)),
        ..Default::default()
    }
}

/// Runs one frame with the full layout; returns the map widget's rect
fn frame(ctx: &Context, state: &mut MapState) -> Rect {
    let mut rect = Rect::NOTHING;
    let _ = ctx.run(input(Vec2::new(1024.0, 700.0)), |ctx| {
        egui::TopBottomPanel::top("top").show(ctx, |ui| top_bar(ui, state));
        egui::SidePanel::left("side").show(ctx, |ui| side_panel(ui, state));
        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                rect = ui.add(MapView::new(state)).rect;
            });
    });
    rect
}

#[test]
fn test_widget_resizes_viewport_to_its_rect() {
    let ctx = Context::default();
    let mut state = map();

    let rect = frame(&ctx, &mut state);
    assert!(rect.width() > 0.0 && rect.height() > 0.0);
    assert_eq!(
        state.viewport().size,
        Point::new(rect.width() as f64, rect.height() as f64)
    );
}

#[test]
fn test_every_panel_renders() {
    let ctx = Context::default();
    let mut state = map();
    state.set_language(Language::En);

    // Search panel with suggestions
    state.set_search_query("beijing");
    frame(&ctx, &mut state);

    // Detail panel
    assert!(state.select_search_result(0));
    frame(&ctx, &mut state);

    // Route panel with a drawn route and the context menu open
    state.request_route();
    state.set_end_text("Shanghai");
    state.add_waypoint();
    state.open_context_menu(Point::new(50.0, 50.0));
    frame(&ctx, &mut state);

    assert!(state.plan().is_some());
    assert!(state.context_menu().is_some());
}

#[test]
fn test_right_to_left_layout_renders() {
    let ctx = Context::default();
    let mut state = map();
    state.set_language(Language::Ar);
    state.set_start_text("Dubai");
    state.set_end_text("25.2532, 55.3657");
    frame(&ctx, &mut state);

    assert!(state.route().is_some());
}
