use routeview::{
    core::{config::MapProfile, geo::Point},
    i18n::Language,
    plugins::route_planner::{RouteType, TravelMode},
    MapState,
};

/// Example of driving routeview without any UI
fn main() -> routeview::Result<()> {
    env_logger::init();

    println!("Routeview Headless Example");
    println!("==========================");

    let mut map = MapState::from_profile(MapProfile::Default)?;
    map.set_language(Language::En);
    println!(
        "Map created at {} zoom {}",
        map.viewport().center.to_display_string(),
        map.viewport().zoom()
    );
    println!("Viewer: {}", map.viewer_url());

    // Search and select a landmark
    map.set_search_query("forbidden");
    for record in map.search_results() {
        println!("   match: {} ({})", record.name_en, record.kind);
    }
    if map.select_search_result(0) {
        if let Some(detail) = map.poi_detail() {
            println!("\nSelected {} [{}]", detail.name, detail.category);
            println!("   {}", detail.coordinates_line());
        }
        println!("Viewer: {}", map.viewer_url());
    }

    // Pan around a bit
    for (dx, dy) in [(100.0, 0.0), (0.0, 100.0), (-50.0, -50.0)] {
        map.pan(Point::new(dx, dy));
        println!(
            "   pan ({}, {}) -> {}",
            dx,
            dy,
            map.viewport().center.to_display_string()
        );
    }

    // Plan a route Beijing -> Shanghai via Tianjin coordinates
    map.request_route();
    map.set_end_text("Shanghai");
    map.add_waypoint();
    map.set_waypoint_text(0, "39.0842, 117.2009");
    map.set_travel_mode(TravelMode::Truck);
    map.set_route_type(RouteType::Eco);

    if let Some(rendered) = map.rendered_route() {
        println!("\nRoute overlay:");
        println!("   path: {}", rendered.svg_path());
        println!(
            "   {} legs, {} arrows, {} markers",
            rendered.segments.len(),
            rendered.arrows.len(),
            rendered.markers.len()
        );
    }

    if let Some(plan) = map.plan() {
        println!(
            "\n{} / {}",
            plan.summary.format_distance(),
            plan.summary.format_time(map.translator())
        );
        for instruction in &plan.instructions {
            println!("   {} {}", instruction.text, instruction.distance);
        }
    }

    for event in map.process_events() {
        println!("   event: {}", event.event_type());
    }

    println!("\nSnapshot:");
    println!("{}", serde_json::to_string_pretty(&map.snapshot())?);

    Ok(())
}
