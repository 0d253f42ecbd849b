//! Application state for the map, search, detail and route panels
//!
//! Every user interaction is a method on [`MapState`]. Methods mutate the state
//! synchronously, queue [`MapEvent`]s for the host, and leave derived output
//! (viewer URL, route geometry) to be recomputed on demand.

use crate::{
    core::{
        config::{MapOptions, MapProfile},
        constants::MAX_WAYPOINTS,
        geo::{LatLng, NamedLatLng, Point},
        viewport::Viewport,
    },
    data::{
        history::{HistoryEntry, SearchHistory},
        locations::{LocationDatabase, LocationRecord, SearchScope},
    },
    i18n::{Language, TextKey, Translator},
    input::{
        events::{InputEvent, MapEvent},
        handler::{Action, EventManager, InputHandler},
    },
    layers::route::{RenderedRoute, RouteOverlay, RoutePath},
    plugins::{
        poi::PoiDetail,
        route_planner::{RoutePlan, RoutePlanner, RouteType, TravelMode},
    },
    tiles::source::{MapStyle, OpenStreetMapSource, TileSource, ViewerRequest},
    MapError, Result,
};
use serde::Serialize;

/// Which side panel is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PanelMode {
    #[default]
    Search,
    PoiDetail,
    Route,
}

/// One route text box and the place it resolved to
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RouteInput {
    pub text: String,
    pub resolved: Option<NamedLatLng>,
}

impl RouteInput {
    fn set_location(&mut self, location: NamedLatLng) {
        self.text = location.name.clone();
        self.resolved = Some(location);
    }

    fn clear(&mut self) {
        self.text.clear();
        self.resolved = None;
    }
}

/// An open right-click menu
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContextMenu {
    /// Where the menu is drawn
    pub pixel: Point,
    /// Geographic position under the click
    pub position: LatLng,
}

impl ContextMenu {
    /// The clicked place, named after its coordinates
    pub fn location(&self) -> NamedLatLng {
        NamedLatLng::new(self.position.to_display_string(), self.position)
    }
}

/// Serializable summary of what is on screen
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewState {
    pub center: LatLng,
    pub zoom: u8,
    pub style: MapStyle,
    pub view_3d: bool,
    pub language: Language,
    pub panel: PanelMode,
    pub selected: Option<NamedLatLng>,
    pub route: Option<RoutePath>,
    pub viewer_url: String,
}

/// The whole interactive map
pub struct MapState {
    options: MapOptions,
    viewport: Viewport,
    style: MapStyle,
    view_3d: bool,
    translator: Translator,
    source: Box<dyn TileSource>,
    locations: LocationDatabase,
    history: SearchHistory,

    panel: PanelMode,
    search_query: String,
    selected: Option<NamedLatLng>,
    nearby: Option<NamedLatLng>,
    context_menu: Option<ContextMenu>,

    start: RouteInput,
    end: RouteInput,
    waypoints: Vec<RouteInput>,
    route: Option<RoutePath>,
    plan: Option<RoutePlan>,
    planner: RoutePlanner,
    overlay: RouteOverlay,

    input: InputHandler,
    events: EventManager,
}

impl std::fmt::Debug for MapState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapState")
            .field("viewport", &self.viewport)
            .field("style", &self.style)
            .field("panel", &self.panel)
            .field("selected", &self.selected)
            .field("route", &self.route)
            .finish_non_exhaustive()
    }
}

impl MapState {
    /// Builds the state from validated options, opening the configured history store
    pub fn new(options: MapOptions) -> Result<Self> {
        options.validate()?;
        let history = SearchHistory::open(&options.history);
        Ok(Self::with_parts(
            options,
            LocationDatabase::builtin().clone(),
            history,
            RoutePlanner::default(),
        ))
    }

    pub fn from_profile(profile: MapProfile) -> Result<Self> {
        Self::new(profile.resolve())
    }

    /// Assembles the state from explicit parts; `options` are trusted as given
    pub fn with_parts(
        options: MapOptions,
        locations: LocationDatabase,
        history: SearchHistory,
        planner: RoutePlanner,
    ) -> Self {
        let viewport = Viewport::new(
            LatLng::clamped(options.center_lat, options.center_lng),
            options.zoom,
            Point::new(options.container_width, options.container_height),
        );
        let source: Box<dyn TileSource> =
            Box::new(OpenStreetMapSource::with_host(options.viewer_host.clone()));

        log::info!(
            "map state ready at {} zoom {} with {} locations",
            viewport.center.to_display_string(),
            viewport.zoom(),
            locations.records().len()
        );

        Self {
            style: options.map_style,
            overlay: RouteOverlay::new(options.overlay.clone()),
            viewport,
            view_3d: false,
            translator: Translator::default(),
            source,
            locations,
            history,
            panel: PanelMode::Search,
            search_query: String::new(),
            selected: None,
            nearby: None,
            context_menu: None,
            start: RouteInput::default(),
            end: RouteInput::default(),
            waypoints: Vec::new(),
            route: None,
            plan: None,
            planner,
            input: InputHandler::new(),
            events: EventManager::new(),
            options,
        }
    }

    // --- accessors ---

    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn style(&self) -> MapStyle {
        self.style
    }

    pub fn is_3d(&self) -> bool {
        self.view_3d
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    pub fn language(&self) -> Language {
        self.translator.language()
    }

    pub fn locations(&self) -> &LocationDatabase {
        &self.locations
    }

    pub fn history(&self) -> &SearchHistory {
        &self.history
    }

    pub fn panel(&self) -> PanelMode {
        self.panel
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn selected(&self) -> Option<&NamedLatLng> {
        self.selected.as_ref()
    }

    pub fn nearby(&self) -> Option<&NamedLatLng> {
        self.nearby.as_ref()
    }

    pub fn context_menu(&self) -> Option<&ContextMenu> {
        self.context_menu.as_ref()
    }

    pub fn route_start(&self) -> &RouteInput {
        &self.start
    }

    pub fn route_end(&self) -> &RouteInput {
        &self.end
    }

    pub fn waypoints(&self) -> &[RouteInput] {
        &self.waypoints
    }

    pub fn route(&self) -> Option<&RoutePath> {
        self.route.as_ref()
    }

    pub fn plan(&self) -> Option<&RoutePlan> {
        self.plan.as_ref()
    }

    pub fn travel_mode(&self) -> TravelMode {
        self.planner.mode
    }

    pub fn route_type(&self) -> RouteType {
        self.planner.route_type
    }

    pub fn is_dragging(&self) -> bool {
        self.input.is_dragging()
    }

    // --- derived output ---

    /// What the embedded viewer should show right now
    pub fn viewer_request(&self) -> ViewerRequest {
        let marker = self.selected.as_ref().map(|location| location.position);
        ViewerRequest::from_viewport(&self.viewport, self.style, marker)
    }

    pub fn viewer_url(&self) -> String {
        self.source.url(&self.viewer_request())
    }

    /// Route geometry for the current viewport, rebuilt on every call
    pub fn rendered_route(&self) -> Option<RenderedRoute> {
        self.route
            .as_ref()
            .map(|route| self.overlay.render(route, &self.viewport))
    }

    /// Detail card for the selected place
    pub fn poi_detail(&self) -> Option<PoiDetail> {
        self.selected
            .as_ref()
            .map(|location| PoiDetail::new(location, None, &self.translator))
    }

    /// Search box placeholder, naming the nearby anchor when one is set
    pub fn search_placeholder(&self) -> String {
        match &self.nearby {
            Some(anchor) => self.translator.search_nearby(&anchor.name),
            None => self.translator.text(TextKey::SearchPlaceholder).to_string(),
        }
    }

    pub fn snapshot(&self) -> ViewState {
        ViewState {
            center: self.viewport.center,
            zoom: self.viewport.zoom(),
            style: self.style,
            view_3d: self.view_3d,
            language: self.language(),
            panel: self.panel,
            selected: self.selected.clone(),
            route: self.route.clone(),
            viewer_url: self.viewer_url(),
        }
    }

    // --- events ---

    /// Register a listener for one [`MapEvent::event_type`]
    pub fn on<F>(&mut self, event_type: &'static str, callback: F)
    where
        F: Fn(&MapEvent) + Send + Sync + 'static,
    {
        self.events.on(event_type, callback);
    }

    /// Runs listeners for queued events and returns them
    pub fn process_events(&mut self) -> Vec<MapEvent> {
        self.events.process_events()
    }

    fn emit_view_changed(&mut self) {
        self.events.emit(MapEvent::ViewChanged {
            center: self.viewport.center,
            zoom: self.viewport.zoom(),
        });
    }

    // --- navigation ---

    pub fn handle_input(&mut self, event: InputEvent) {
        let actions = self
            .input
            .handle_event(event, self.context_menu.is_some());
        for action in actions {
            self.apply(action);
        }
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::StartDrag => self.events.emit(MapEvent::MoveStart {
                center: self.viewport.center,
            }),
            Action::Pan { delta } => self.pan(delta),
            Action::EndDrag => self.events.emit(MapEvent::MoveEnd {
                center: self.viewport.center,
            }),
            Action::ZoomIn => {
                self.zoom_in();
            }
            Action::ZoomOut => {
                self.zoom_out();
            }
            Action::OpenContextMenu { position } => self.open_context_menu(position),
            Action::CloseContextMenu => self.close_context_menu(),
            Action::Resize { size } => self.resize(size),
        }
    }

    /// Moves the view for a drag of `delta` pixels
    pub fn pan(&mut self, delta: Point) {
        self.viewport.pan(delta);
        self.emit_view_changed();
    }

    pub fn zoom_in(&mut self) -> bool {
        let changed = self.viewport.zoom_in();
        if changed {
            log::debug!("zoom in to {}", self.viewport.zoom());
            self.emit_view_changed();
        }
        changed
    }

    pub fn zoom_out(&mut self) -> bool {
        let changed = self.viewport.zoom_out();
        if changed {
            log::debug!("zoom out to {}", self.viewport.zoom());
            self.emit_view_changed();
        }
        changed
    }

    pub fn resize(&mut self, size: Point) {
        if size.x > 0.0 && size.y > 0.0 && size != self.viewport.size {
            self.viewport.set_size(size);
        }
    }

    /// Recenters on a city without touching the zoom
    pub fn jump_to_city(&mut self, center: LatLng) {
        self.viewport.set_center(center);
        self.emit_view_changed();
    }

    pub fn set_style(&mut self, style: MapStyle) {
        if self.style != style {
            self.style = style;
            self.events.emit(MapEvent::StyleChanged { style });
        }
    }

    pub fn toggle_3d(&mut self) -> bool {
        self.view_3d = !self.view_3d;
        self.view_3d
    }

    /// Switches the UI language; an existing plan is rebuilt so its text follows
    pub fn set_language(&mut self, language: Language) {
        if self.translator.language() == language {
            return;
        }
        self.translator.set_language(language);
        if let Some(route) = &self.route {
            self.plan = Some(self.planner.plan(route, &self.translator));
        }
        self.events.emit(MapEvent::LanguageChanged { language });
    }

    // --- search ---

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    /// Category shortcut: the query becomes the type key
    pub fn quick_search(&mut self, category: &str) {
        self.search_query = category.to_string();
    }

    /// Suggestions for the main search box
    pub fn search_results(&self) -> Vec<&LocationRecord> {
        self.locations
            .search(&self.search_query, SearchScope::PlacesAndTypes)
    }

    /// Suggestions for a route text box
    pub fn route_suggestions(&self, text: &str) -> Vec<&LocationRecord> {
        self.locations.search(text, SearchScope::Places)
    }

    /// Picks the `index`-th search suggestion: records it, selects it, clears the query
    pub fn select_search_result(&mut self, index: usize) -> bool {
        let Some(record) = self.search_results().get(index).map(|r| (*r).clone()) else {
            return false;
        };
        self.pick_record(&record);
        true
    }

    /// Re-selects a recent search; entries no longer in the table select their coordinates
    pub fn select_history(&mut self, index: usize) -> bool {
        let Some(entry) = self.history.entries().get(index).cloned() else {
            return false;
        };
        let record = self
            .locations
            .records()
            .iter()
            .find(|r| r.lat == entry.lat && r.lng == entry.lng)
            .cloned();
        match record {
            Some(record) => self.pick_record(&record),
            None => {
                let mut location = NamedLatLng::new(entry.name.clone(), entry.position());
                location.kind = entry.kind.clone();
                self.history.record(entry);
                self.select_location(location);
            }
        }
        true
    }

    fn pick_record(&mut self, record: &LocationRecord) {
        let location = record.to_named(self.language());
        self.history.record(HistoryEntry::from(&location));
        self.search_query.clear();
        self.select_location(location);
    }

    pub fn remove_history(&mut self, index: usize) {
        self.history.remove(index);
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Selects a place: detail panel, marker, street-level zoom
    pub fn select_location(&mut self, location: NamedLatLng) {
        log::debug!("selected {}", location.name);
        self.viewport.fit_location(&location.position);
        self.selected = Some(location.clone());
        self.panel = PanelMode::PoiDetail;
        self.nearby = None;
        self.events.emit(MapEvent::LocationSelected { location });
        self.emit_view_changed();
    }

    /// Closes the detail card and drops the selection
    pub fn close_poi(&mut self) {
        self.panel = PanelMode::Search;
        if self.selected.take().is_some() {
            self.events.emit(MapEvent::SelectionCleared);
        }
    }

    /// Reopens the detail card for the current selection
    pub fn show_poi(&mut self) {
        if self.selected.is_some() {
            self.panel = PanelMode::PoiDetail;
        }
    }

    /// Anchors the search box on the selected place
    pub fn search_nearby(&mut self) {
        if let Some(selected) = self.selected.clone() {
            self.nearby = Some(selected);
            self.panel = PanelMode::Search;
        }
    }

    pub fn clear_nearby(&mut self) {
        self.nearby = None;
    }

    // --- route panel ---

    /// Opens the route panel, starting from the selected place if there is one
    pub fn request_route(&mut self) {
        self.panel = PanelMode::Route;
        self.nearby = None;
        if let Some(selected) = self.selected.clone() {
            self.start.set_location(selected);
            self.refresh_route();
        }
    }

    pub fn close_route_panel(&mut self) {
        self.panel = PanelMode::Search;
    }

    /// Routes to the selected place ("go here" / "set as destination")
    pub fn go_here(&mut self) {
        if let Some(selected) = self.selected.clone() {
            self.set_route_end(selected);
        }
    }

    pub fn set_route_start(&mut self, location: NamedLatLng) {
        self.start.set_location(location);
        self.enter_route_mode();
    }

    pub fn set_route_end(&mut self, location: NamedLatLng) {
        self.end.set_location(location);
        self.enter_route_mode();
    }

    fn enter_route_mode(&mut self) {
        self.panel = PanelMode::Route;
        self.nearby = None;
        self.refresh_route();
    }

    /// Typed start text: coordinates or a name from the table
    pub fn set_start_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.start.resolved = self.locations.resolve(&text, self.language());
        self.start.text = text;
        self.refresh_route();
    }

    pub fn set_end_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.end.resolved = self.locations.resolve(&text, self.language());
        self.end.text = text;
        self.refresh_route();
    }

    pub fn swap_endpoints(&mut self) {
        std::mem::swap(&mut self.start, &mut self.end);
        self.refresh_route();
    }

    /// Adds an empty stop. Returns `false` once [`MAX_WAYPOINTS`] stops exist.
    pub fn add_waypoint(&mut self) -> bool {
        if self.waypoints.len() >= MAX_WAYPOINTS {
            return false;
        }
        self.waypoints.push(RouteInput::default());
        true
    }

    pub fn remove_waypoint(&mut self, index: usize) {
        if index < self.waypoints.len() {
            self.waypoints.remove(index);
            self.refresh_route();
        }
    }

    pub fn set_waypoint_text(&mut self, index: usize, text: impl Into<String>) {
        let language = self.language();
        let Some(waypoint) = self.waypoints.get_mut(index) else {
            return;
        };
        let text = text.into();
        waypoint.resolved = self.locations.resolve(&text, language);
        waypoint.text = text;
        self.refresh_route();
    }

    pub fn set_waypoint(&mut self, index: usize, location: NamedLatLng) {
        if let Some(waypoint) = self.waypoints.get_mut(index) {
            waypoint.set_location(location);
            self.refresh_route();
        }
    }

    pub fn set_travel_mode(&mut self, mode: TravelMode) {
        if self.planner.mode != mode {
            self.planner.mode = mode;
            self.refresh_route();
        }
    }

    pub fn set_route_type(&mut self, route_type: RouteType) {
        if self.planner.route_type != route_type {
            self.planner.route_type = route_type;
            self.refresh_route();
        }
    }

    /// Drops the route and empties every route input
    pub fn clear_route(&mut self) {
        self.start.clear();
        self.end.clear();
        self.waypoints.clear();
        if self.route.take().is_some() {
            self.events.emit(MapEvent::RouteCleared);
        }
        self.plan = None;
    }

    /// The route the current inputs describe; unresolved stops are skipped
    pub fn build_route(&self) -> Result<RoutePath> {
        let start = self
            .start
            .resolved
            .clone()
            .ok_or_else(|| MapError::Route("start point is not set".into()))?;
        let end = self
            .end
            .resolved
            .clone()
            .ok_or_else(|| MapError::Route("end point is not set".into()))?;
        let stops = self
            .waypoints
            .iter()
            .filter_map(|waypoint| waypoint.resolved.clone())
            .collect();
        Ok(RoutePath::with_waypoints(start, stops, end))
    }

    /// Re-derives the route and plan from the inputs.
    ///
    /// The view refits only when the route's points changed, not when only the
    /// travel options did.
    fn refresh_route(&mut self) {
        let route = match self.build_route() {
            Ok(route) => route,
            Err(e) => {
                log::debug!("no route yet: {}", e);
                if self.route.take().is_some() {
                    self.plan = None;
                    self.events.emit(MapEvent::RouteCleared);
                }
                return;
            }
        };

        let points = route.coordinates();
        let moved = self
            .route
            .as_ref()
            .map_or(true, |previous| previous.coordinates() != points);

        self.plan = Some(self.planner.plan(&route, &self.translator));
        self.route = Some(route);

        if moved {
            self.viewport.fit_points(&points);
            self.events.emit(MapEvent::RouteChanged { points });
            self.emit_view_changed();
        }
    }

    // --- context menu ---

    /// Opens the menu for the place under `pixel`
    pub fn open_context_menu(&mut self, pixel: Point) {
        let position = self.viewport.pixel_to_lat_lng(&pixel);
        let position = LatLng::clamped(position.lat, position.lng);
        self.context_menu = Some(ContextMenu { pixel, position });
        self.events.emit(MapEvent::ContextMenuOpened {
            pixel,
            lat_lng: position,
        });
    }

    pub fn close_context_menu(&mut self) {
        if self.context_menu.take().is_some() {
            self.events.emit(MapEvent::ContextMenuClosed);
        }
    }

    pub fn context_set_start(&mut self) {
        if let Some(menu) = self.context_menu {
            self.close_context_menu();
            self.set_route_start(menu.location());
        }
    }

    pub fn context_set_end(&mut self) {
        if let Some(menu) = self.context_menu {
            self.close_context_menu();
            self.set_route_end(menu.location());
        }
    }

    /// Anchors the search box on the clicked place
    pub fn context_search_nearby(&mut self) {
        if let Some(menu) = self.context_menu {
            self.close_context_menu();
            self.nearby = Some(menu.location());
            self.panel = PanelMode::Search;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::constants::{LOCATION_ZOOM, ROUTE_ZOOM},
        input::events::MouseButton,
        plugins::route_planner::PlaceholderInstructions,
    };

    fn state() -> MapState {
        MapState::with_parts(
            MapOptions::default(),
            LocationDatabase::builtin().clone(),
            SearchHistory::in_memory(),
            RoutePlanner::new(Box::new(PlaceholderInstructions::seeded(3))),
        )
    }

    fn named(name: &str, lat: f64, lng: f64) -> NamedLatLng {
        NamedLatLng::new(name, LatLng::new(lat, lng))
    }

    #[test]
    fn test_defaults() {
        let map = state();
        assert_eq!(map.viewport().zoom(), 10);
        assert_eq!(map.panel(), PanelMode::Search);
        assert_eq!(map.language(), Language::Zh);
        assert!(map.route().is_none());
        assert!(map.viewer_url().contains("layer=mapnik"));
        assert!(!map.viewer_url().contains("marker"));
    }

    #[test]
    fn test_search_select_records_history() {
        let mut map = state();
        map.set_language(Language::En);
        map.set_search_query("bangkok");
        assert_eq!(map.search_results().len(), 1);
        assert!(map.select_search_result(0));

        let selected = map.selected().unwrap();
        assert_eq!(selected.name, "Bangkok");
        assert_eq!(map.panel(), PanelMode::PoiDetail);
        assert_eq!(map.viewport().zoom(), LOCATION_ZOOM);
        assert_eq!(map.viewport().center, LatLng::new(13.7563, 100.5018));
        assert_eq!(map.search_query(), "");
        assert_eq!(map.history().len(), 1);
        assert!(map.viewer_url().ends_with("&marker=13.7563,100.5018"));

        assert!(!map.select_search_result(0));
    }

    #[test]
    fn test_select_history_reuses_table_entry() {
        let mut map = state();
        map.set_search_query("Dubai International");
        map.select_search_result(0);
        map.set_search_query("Beijing");
        map.select_search_result(0);
        assert_eq!(map.history().len(), 2);

        assert!(map.select_history(1));
        assert_eq!(map.history().entries()[0].lat, 25.2532);
        assert_eq!(map.history().len(), 2);
        assert!(!map.select_history(9));
    }

    #[test]
    fn test_drag_via_input() {
        let mut map = state();
        let start = map.viewport().center;
        map.handle_input(InputEvent::PointerDown {
            position: Point::new(100.0, 100.0),
            button: MouseButton::Left,
        });
        map.handle_input(InputEvent::PointerMove {
            position: Point::new(140.0, 80.0),
        });
        assert!(map.is_dragging());
        assert_ne!(map.viewport().center, start);
        map.handle_input(InputEvent::PointerMove {
            position: Point::new(100.0, 100.0),
        });
        map.handle_input(InputEvent::PointerUp);

        let center = map.viewport().center;
        assert!((center.lat - start.lat).abs() < 1e-9);
        assert!((center.lng - start.lng).abs() < 1e-9);

        let kinds: Vec<&str> = map.process_events().iter().map(|e| e.event_type()).collect();
        assert_eq!(kinds.first(), Some(&"movestart"));
        assert_eq!(kinds.last(), Some(&"moveend"));
    }

    #[test]
    fn test_route_from_text_inputs() {
        let mut map = state();
        map.request_route();
        assert_eq!(map.panel(), PanelMode::Route);

        map.set_start_text("0.0, 0.0");
        assert!(map.route().is_none());
        map.set_end_text("2.0, 0.0");

        let route = map.route().unwrap();
        assert_eq!(route.start().name, "0.0, 0.0");
        assert_eq!(map.viewport().center, LatLng::new(1.0, 0.0));
        assert_eq!(map.viewport().zoom(), ROUTE_ZOOM);
        assert_eq!(map.plan().unwrap().instructions.len(), 6);

        let rendered = map.rendered_route().unwrap();
        assert_eq!(rendered.segments.len(), 1);
        assert_eq!(rendered.markers.len(), 2);
    }

    #[test]
    fn test_unresolvable_text_yields_no_route() {
        let mut map = state();
        map.set_start_text("Beijing");
        map.set_end_text("Atlantis");
        assert!(map.route_start().resolved.is_some());
        assert!(map.route_end().resolved.is_none());
        assert!(map.route().is_none());
        assert!(matches!(map.build_route(), Err(MapError::Route(_))));
    }

    #[test]
    fn test_options_change_plan_without_refit() {
        let mut map = state();
        map.set_route_start(named("A", 0.0, 0.0));
        map.set_route_end(named("B", 0.0, 1.0));
        let fastest = map.plan().unwrap().summary;

        map.zoom_in();
        map.set_route_type(RouteType::Eco);
        let eco = map.plan().unwrap().summary;
        assert!(eco.distance_km > fastest.distance_km);
        assert_eq!(map.viewport().zoom(), ROUTE_ZOOM + 1);

        map.set_travel_mode(TravelMode::Truck);
        assert!(map.plan().unwrap().summary.minutes > eco.minutes);
    }

    #[test]
    fn test_waypoints() {
        let mut map = state();
        map.set_route_start(named("A", 0.0, 0.0));
        map.set_route_end(named("B", 0.0, 3.0));

        for _ in 0..MAX_WAYPOINTS {
            assert!(map.add_waypoint());
        }
        assert!(!map.add_waypoint());

        // Empty stops are skipped
        assert_eq!(map.route().unwrap().point_count(), 2);
        map.set_waypoint(1, named("M", 0.0, 1.5));
        assert_eq!(map.route().unwrap().waypoints().len(), 1);
        assert_eq!(map.viewport().center, LatLng::new(0.0, 1.5));

        map.remove_waypoint(1);
        assert_eq!(map.waypoints().len(), MAX_WAYPOINTS - 1);
        assert!(map.route().unwrap().waypoints().is_empty());
    }

    #[test]
    fn test_swap_and_clear() {
        let mut map = state();
        map.set_route_start(named("A", 0.0, 0.0));
        map.set_route_end(named("B", 0.0, 1.0));
        map.swap_endpoints();
        assert_eq!(map.route().unwrap().start().name, "B");
        assert_eq!(map.route_end().text, "A");

        map.process_events();
        map.clear_route();
        assert!(map.route().is_none());
        assert!(map.plan().is_none());
        assert!(map.route_start().text.is_empty());
        assert!(map
            .process_events()
            .iter()
            .any(|e| *e == MapEvent::RouteCleared));
    }

    #[test]
    fn test_go_here_and_nearby() {
        let mut map = state();
        map.select_location(named("X", 10.0, 10.0));
        map.search_nearby();
        assert_eq!(map.panel(), PanelMode::Search);
        assert_eq!(map.nearby().map(|n| n.name.as_str()), Some("X"));
        assert_eq!(map.search_placeholder(), "在X附近搜索");

        map.go_here();
        assert_eq!(map.panel(), PanelMode::Route);
        assert!(map.nearby().is_none());
        assert_eq!(map.route_end().text, "X");

        map.request_route();
        assert!(map.route().is_some());
    }

    #[test]
    fn test_context_menu_uses_clicked_position() {
        let mut map = state();
        let size = map.viewport().size;
        map.handle_input(InputEvent::ContextMenu {
            position: Point::new(size.x / 2.0, size.y / 2.0),
        });
        let menu = *map.context_menu().unwrap();
        assert_eq!(menu.position, map.viewport().center);

        // Any press closes the menu without starting a drag
        map.handle_input(InputEvent::PointerDown {
            position: Point::new(1.0, 1.0),
            button: MouseButton::Left,
        });
        assert!(map.context_menu().is_none());
        assert!(!map.is_dragging());

        map.open_context_menu(Point::new(0.0, 0.0));
        let corner = map.context_menu().unwrap().position;
        map.context_set_start();
        assert!(map.context_menu().is_none());
        assert_eq!(map.route_start().resolved.as_ref().unwrap().position, corner);
        assert_eq!(map.route_start().text, corner.to_display_string());
        assert_eq!(map.panel(), PanelMode::Route);
    }

    #[test]
    fn test_city_jump_keeps_zoom() {
        let mut map = state();
        map.zoom_in();
        let dubai = map
            .locations()
            .presets()
            .find(|r| r.name_en == "Dubai")
            .unwrap()
            .position();
        map.jump_to_city(dubai);
        assert_eq!(map.viewport().center, dubai);
        assert_eq!(map.viewport().zoom(), 11);
    }

    #[test]
    fn test_style_language_and_snapshot() {
        let mut map = state();
        map.set_style(MapStyle::Satellite);
        assert!(map.toggle_3d());
        map.set_language(Language::Ar);

        let snapshot = map.snapshot();
        assert_eq!(snapshot.style, MapStyle::Satellite);
        assert!(snapshot.view_3d);
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["language"], "ar");
        assert_eq!(json["style"], "satellite");
        assert_eq!(json["panel"], "search");
    }

    #[test]
    fn test_invalid_options_rejected() {
        let options = MapOptions {
            container_width: 0.0,
            ..MapOptions::default()
        };
        assert!(matches!(MapState::new(options), Err(MapError::Config(_))));
    }
}
