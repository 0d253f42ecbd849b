use routeview::{
    core::config::{MapOptions, MapProfile},
    i18n::{Language, TextDirection},
    ui::{side_panel, top_bar, MapView},
    MapState,
};

/// Path of a JSON options file; unset means the default profile
const CONFIG_ENV: &str = "ROUTEVIEW_CONFIG";
/// Initial UI language code (`zh`, `en`, `ar`, `ms`, `pt`, `es`)
const LANGUAGE_ENV: &str = "ROUTEVIEW_LANG";

fn load_options() -> routeview::Result<MapOptions> {
    match std::env::var(CONFIG_ENV) {
        Ok(path) => {
            log::info!("loading options from {path}");
            MapOptions::from_path(path)
        }
        Err(_) => Ok(MapProfile::Default.resolve()),
    }
}

/// Standalone map explorer
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let options = load_options()?;
    let mut state = MapState::new(options)?;
    if let Some(language) = std::env::var(LANGUAGE_ENV)
        .ok()
        .and_then(|code| Language::from_code(&code))
    {
        state.set_language(language);
    }

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("Routeview"),
        ..Default::default()
    };

    eframe::run_native(
        "routeview-app",
        native_options,
        Box::new(|_cc| Box::new(RouteViewApp::new(state))),
    )?;

    Ok(())
}

/// The main application struct
struct RouteViewApp {
    state: MapState,
    show_debug_panel: bool,
}

impl RouteViewApp {
    fn new(state: MapState) -> Self {
        Self {
            state,
            show_debug_panel: false,
        }
    }

    fn debug_panel(&self, ui: &mut egui::Ui) {
        let viewport = self.state.viewport();
        ui.label(format!(
            "Center: {:.4}, {:.4} | Zoom: {}",
            viewport.center.lat,
            viewport.center.lng,
            viewport.zoom()
        ));
        let url = self.state.viewer_url();
        ui.hyperlink_to("Open viewer", &url);
        if let Some(route) = self.state.rendered_route() {
            ui.label(format!(
                "{} legs, {} arrows",
                route.segments.len(),
                route.arrows.len()
            ));
        }
    }
}

impl eframe::App for RouteViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("View", |ui| {
                    ui.checkbox(&mut self.show_debug_panel, "Debug Panel");
                });
                ui.separator();
                top_bar(ui, &mut self.state);
            });
        });

        if self.show_debug_panel {
            egui::TopBottomPanel::bottom("debug_panel").show(ctx, |ui| {
                self.debug_panel(ui);
            });
        }

        let panel = match self.state.translator().direction() {
            TextDirection::Ltr => egui::SidePanel::left("side_panel"),
            TextDirection::Rtl => egui::SidePanel::right("side_panel"),
        };
        panel.default_width(320.0).show(ctx, |ui| {
            side_panel(ui, &mut self.state);
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                ui.add(MapView::new(&mut self.state));
            });

        for event in self.state.process_events() {
            log::trace!("{}", event.event_type());
        }
    }
}
