//! Top bar and side panels around the [`MapView`](super::widget::MapView)
//!
//! Panels only read from and call into [`MapState`]; none of them keep state of
//! their own beyond egui's widget memory.

use crate::{
    core::map::{MapState, PanelMode, RouteInput},
    data::locations::LocationRecord,
    i18n::{Language, TextDirection, TextKey, Translator},
    plugins::route_planner::{InstructionIcon, RouteType, TravelMode},
    tiles::source::MapStyle,
};
use egui::{Align, Layout, RichText, Ui};

/// Categories offered as one-click searches
pub const QUICK_CATEGORIES: [&str; 3] = ["restaurant", "hotel", "bank"];

fn style_label(style: MapStyle) -> TextKey {
    match style {
        MapStyle::Standard => TextKey::StandardMap,
        MapStyle::Satellite => TextKey::SatelliteMap,
        MapStyle::Terrain => TextKey::TerrainMap,
    }
}

fn icon_glyph(icon: InstructionIcon) -> &'static str {
    match icon {
        InstructionIcon::Start => "●",
        InstructionIcon::Straight => "↑",
        InstructionIcon::Left => "←",
        InstructionIcon::Right => "→",
        InstructionIcon::End => "⚑",
    }
}

/// Lays out a row in reading order
fn row<R>(ui: &mut Ui, direction: TextDirection, add_contents: impl FnOnce(&mut Ui) -> R) -> R {
    let layout = match direction {
        TextDirection::Ltr => Layout::left_to_right(Align::Center),
        TextDirection::Rtl => Layout::right_to_left(Align::Center),
    };
    let size = egui::vec2(ui.available_width(), ui.spacing().interact_size.y);
    ui.allocate_ui_with_layout(size, layout, add_contents).inner
}

/// Language, style, 3D toggle and city picker
pub fn top_bar(ui: &mut Ui, state: &mut MapState) {
    let translator = *state.translator();
    row(ui, translator.direction(), |ui| {
        let mut language = state.language();
        egui::ComboBox::from_id_source("routeview_language")
            .selected_text(language.native_name())
            .show_ui(ui, |ui| {
                for option in Language::ALL {
                    ui.selectable_value(&mut language, option, option.native_name());
                }
            });
        if language != state.language() {
            state.set_language(language);
        }

        ui.separator();
        ui.label(translator.text(TextKey::MapStyle));
        for style in MapStyle::ALL {
            if ui
                .selectable_label(state.style() == style, translator.text(style_label(style)))
                .clicked()
            {
                state.set_style(style);
            }
        }

        ui.separator();
        let view_label = if state.is_3d() {
            TextKey::View2D
        } else {
            TextKey::View3D
        };
        if ui.button(translator.text(view_label)).clicked() {
            state.toggle_3d();
        }

        ui.separator();
        let cities: Vec<_> = state
            .locations()
            .presets()
            .map(|record| (record.name_for(translator.language()).to_string(), record.position()))
            .collect();
        egui::ComboBox::from_id_source("routeview_city")
            .selected_text(translator.text(TextKey::SelectCity))
            .show_ui(ui, |ui| {
                for (name, position) in cities {
                    if ui.selectable_label(false, name).clicked() {
                        state.jump_to_city(position);
                    }
                }
            });
    });
}

/// Whichever panel the state says is active
pub fn side_panel(ui: &mut Ui, state: &mut MapState) {
    match state.panel() {
        PanelMode::Search => search_panel(ui, state),
        PanelMode::PoiDetail => poi_panel(ui, state),
        PanelMode::Route => route_panel(ui, state),
    }
}

fn record_button(ui: &mut Ui, record: &LocationRecord, translator: &Translator) -> bool {
    let name = record.name_for(translator.language());
    let kind = translator.type_label(&record.kind);
    ui.selectable_label(false, format!("{name}  ·  {kind}"))
        .clicked()
}

fn search_panel(ui: &mut Ui, state: &mut MapState) {
    let translator = *state.translator();
    let direction = translator.direction();

    let mut query = state.search_query().to_string();
    let response = ui.add(
        egui::TextEdit::singleline(&mut query)
            .hint_text(state.search_placeholder())
            .desired_width(f32::INFINITY),
    );
    if response.changed() {
        state.set_search_query(query);
    }
    if state.nearby().is_some() && ui.small_button("×").clicked() {
        state.clear_nearby();
    }

    ui.add_space(4.0);
    ui.label(RichText::new(translator.text(TextKey::QuickSearch)).small());
    row(ui, direction, |ui| {
        for category in QUICK_CATEGORIES {
            if ui.button(translator.type_label(category)).clicked() {
                state.quick_search(category);
            }
        }
    });

    let mut picked = None;
    for (index, record) in state.search_results().into_iter().enumerate() {
        if record_button(ui, record, &translator) {
            picked = Some(index);
        }
    }
    if let Some(index) = picked {
        state.select_search_result(index);
        return;
    }

    if !state.history().is_empty() {
        ui.separator();
        row(ui, direction, |ui| {
            ui.label(RichText::new(translator.text(TextKey::RecentSearches)).strong());
            if ui.small_button(translator.text(TextKey::ClearAll)).clicked() {
                state.clear_history();
            }
        });

        let mut selected = None;
        let mut removed = None;
        for (index, entry) in state.history().visible().iter().enumerate() {
            row(ui, direction, |ui| {
                if ui.selectable_label(false, &entry.name).clicked() {
                    selected = Some(index);
                }
                if ui.small_button("×").clicked() {
                    removed = Some(index);
                }
            });
        }
        if let Some(index) = selected {
            state.select_history(index);
        } else if let Some(index) = removed {
            state.remove_history(index);
        }
    }

    ui.separator();
    if ui.button(translator.text(TextKey::GetDirections)).clicked() {
        state.request_route();
    }
}

fn poi_panel(ui: &mut Ui, state: &mut MapState) {
    let translator = *state.translator();
    let Some(detail) = state.poi_detail() else {
        state.close_poi();
        return;
    };

    row(ui, translator.direction(), |ui| {
        ui.heading(&detail.name);
        if ui.small_button("×").clicked() {
            state.close_poi();
        }
    });
    ui.label(RichText::new(&detail.category).italics());
    if let Some(address) = &detail.address {
        ui.label(address);
    }
    ui.label(RichText::new(detail.coordinates_line()).monospace());

    ui.add_space(8.0);
    row(ui, translator.direction(), |ui| {
        if ui.button(translator.text(TextKey::GoHere)).clicked() {
            state.go_here();
        }
        if ui.button(translator.text(TextKey::SearchNearby)).clicked() {
            state.search_nearby();
        }
    });
}

/// Text box plus suggestions; returns the picked record
fn route_field(
    ui: &mut Ui,
    state: &MapState,
    input: &RouteInput,
    hint: &str,
    changed: &mut Option<String>,
) -> Option<LocationRecord> {
    let mut text = input.text.clone();
    if ui
        .add(egui::TextEdit::singleline(&mut text).hint_text(hint))
        .changed()
    {
        *changed = Some(text.clone());
    }

    let settled = input
        .resolved
        .as_ref()
        .is_some_and(|location| location.name == text);
    if settled || text.trim().is_empty() {
        return None;
    }

    let translator = state.translator();
    let mut picked = None;
    for record in state.route_suggestions(&text) {
        if record_button(ui, record, translator) {
            picked = Some(record.clone());
        }
    }
    picked
}

fn route_panel(ui: &mut Ui, state: &mut MapState) {
    let translator = *state.translator();
    let direction = translator.direction();
    let language = translator.language();

    row(ui, direction, |ui| {
        ui.heading(translator.text(TextKey::RoutePlanning));
        if ui.small_button("×").clicked() {
            state.close_route_panel();
        }
    });

    let mut start_text = None;
    let picked_start = route_field(
        ui,
        state,
        state.route_start(),
        translator.text(TextKey::StartPoint),
        &mut start_text,
    );
    if let Some(text) = start_text {
        state.set_start_text(text);
    }
    if let Some(record) = picked_start {
        state.set_route_start(record.to_named(language));
    }

    let mut waypoint_edits = Vec::new();
    let mut removed = None;
    for index in 0..state.waypoints().len() {
        let mut text = None;
        let picked = row(ui, direction, |ui| {
            let picked = route_field(
                ui,
                state,
                &state.waypoints()[index],
                translator.text(TextKey::Waypoint),
                &mut text,
            );
            if ui
                .small_button("−")
                .on_hover_text(translator.text(TextKey::RemoveWaypoint))
                .clicked()
            {
                removed = Some(index);
            }
            picked
        });
        waypoint_edits.push((index, text, picked));
    }
    for (index, text, picked) in waypoint_edits {
        if let Some(text) = text {
            state.set_waypoint_text(index, text);
        }
        if let Some(record) = picked {
            state.set_waypoint(index, record.to_named(language));
        }
    }
    if let Some(index) = removed {
        state.remove_waypoint(index);
    }

    let mut end_text = None;
    let picked_end = route_field(
        ui,
        state,
        state.route_end(),
        translator.text(TextKey::EndPoint),
        &mut end_text,
    );
    if let Some(text) = end_text {
        state.set_end_text(text);
    }
    if let Some(record) = picked_end {
        state.set_route_end(record.to_named(language));
    }

    row(ui, direction, |ui| {
        if ui.button(translator.text(TextKey::SwapStartEnd)).clicked() {
            state.swap_endpoints();
        }
        if ui.button(translator.text(TextKey::AddWaypoint)).clicked() {
            state.add_waypoint();
        }
    });

    ui.separator();
    ui.label(RichText::new(translator.text(TextKey::Mode)).strong());
    row(ui, direction, |ui| {
        for mode in [TravelMode::Driving, TravelMode::Truck] {
            if ui
                .selectable_label(state.travel_mode() == mode, translator.text(mode.label_key()))
                .clicked()
            {
                state.set_travel_mode(mode);
            }
        }
    });

    ui.label(RichText::new(translator.text(TextKey::RouteOptions)).strong());
    row(ui, direction, |ui| {
        for route_type in [RouteType::Fastest, RouteType::Shortest, RouteType::Eco] {
            let mut label = translator.text(route_type.label_key()).to_string();
            if route_type == RouteType::Fastest {
                label = format!("{label} ({})", translator.text(TextKey::Recommended));
            }
            if ui
                .selectable_label(state.route_type() == route_type, label)
                .clicked()
            {
                state.set_route_type(route_type);
            }
        }
    });

    if let Some(plan) = state.plan() {
        ui.separator();
        ui.label(RichText::new(translator.text(TextKey::RouteDetails)).strong());
        egui::Grid::new("routeview_summary").show(ui, |ui| {
            ui.label(translator.text(TextKey::Distance));
            ui.label(plan.summary.format_distance());
            ui.end_row();
            ui.label(translator.text(TextKey::EstimatedTime));
            ui.label(plan.summary.format_time(&translator));
            ui.end_row();
        });

        egui::ScrollArea::vertical()
            .max_height(240.0)
            .show(ui, |ui| {
                for instruction in &plan.instructions {
                    row(ui, direction, |ui| {
                        ui.label(icon_glyph(instruction.icon));
                        ui.label(&instruction.text);
                        if !instruction.distance.is_empty() {
                            ui.label(RichText::new(&instruction.distance).weak());
                        }
                    });
                }
            });

        if ui.button(translator.text(TextKey::ClearRoute)).clicked() {
            state.clear_route();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_style_has_a_label() {
        let translator = Translator::new(Language::En);
        let labels: Vec<_> = MapStyle::ALL
            .iter()
            .map(|style| translator.text(style_label(*style)))
            .collect();
        assert_eq!(labels, vec!["Standard", "Satellite", "Terrain"]);
    }

    #[test]
    fn test_quick_categories_have_type_labels() {
        let translator = Translator::new(Language::Zh);
        for category in QUICK_CATEGORIES {
            assert_ne!(translator.type_label(category), category);
        }
    }
}
