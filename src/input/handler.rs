use crate::{
    core::geo::Point,
    input::events::{InputEvent, KeyCode, MapEvent, MouseButton},
};
use fxhash::FxHashMap;
use std::collections::VecDeque;

/// What the map state should do in response to input
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Start of a drag gesture
    StartDrag,
    /// Move the view by a pointer delta since the last move
    Pan { delta: Point },
    /// End of a drag gesture
    EndDrag,
    ZoomIn,
    ZoomOut,
    /// Open the context menu at a pixel
    OpenContextMenu { position: Point },
    CloseContextMenu,
    Resize { size: Point },
}

/// Event listener callback type
pub type EventCallback = Box<dyn Fn(&MapEvent) + Send + Sync>;

/// Queue of map events plus listeners keyed by [`MapEvent::event_type`]
#[derive(Default)]
pub struct EventManager {
    listeners: FxHashMap<&'static str, Vec<EventCallback>>,
    event_queue: VecDeque<MapEvent>,
}

impl EventManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event listener
    pub fn on<F>(&mut self, event_type: &'static str, callback: F)
    where
        F: Fn(&MapEvent) + Send + Sync + 'static,
    {
        self.listeners
            .entry(event_type)
            .or_default()
            .push(Box::new(callback));
    }

    /// Emit an event to the queue
    pub fn emit(&mut self, event: MapEvent) {
        self.event_queue.push_back(event);
    }

    /// Runs listeners for every queued event and hands the events back
    pub fn process_events(&mut self) -> Vec<MapEvent> {
        let events: Vec<_> = self.event_queue.drain(..).collect();

        for event in &events {
            if let Some(callbacks) = self.listeners.get(event.event_type()) {
                for callback in callbacks {
                    callback(event);
                }
            }
        }

        events
    }

    /// Get number of pending events
    pub fn pending_events(&self) -> usize {
        self.event_queue.len()
    }
}

impl std::fmt::Debug for EventManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventManager")
            .field("listeners", &self.listeners.len())
            .field("pending", &self.event_queue.len())
            .finish()
    }
}

/// Drag gesture tracking
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Button held; `last` is the pointer position of the previous move
    Dragging { last: Point },
}

/// Turns raw input into [`Action`]s.
///
/// A press while the context menu is open only closes the menu. Any other
/// non-secondary press starts a drag, and each move while dragging pans by the
/// delta since the previous move.
#[derive(Debug, Clone)]
pub struct InputHandler {
    pub enabled: bool,
    pub pan_on_drag: bool,
    pub zoom_on_wheel: bool,
    pub zoom_on_keys: bool,
    drag: DragState,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            enabled: true,
            pan_on_drag: true,
            zoom_on_wheel: true,
            zoom_on_keys: true,
            drag: DragState::Idle,
        }
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    pub fn handle_event(&mut self, event: InputEvent, context_menu_open: bool) -> Vec<Action> {
        if !self.enabled {
            return vec![];
        }

        let mut actions = vec![];

        match event {
            InputEvent::PointerDown { position, button } => {
                if context_menu_open {
                    actions.push(Action::CloseContextMenu);
                } else if button != MouseButton::Right && self.pan_on_drag {
                    self.drag = DragState::Dragging { last: position };
                    actions.push(Action::StartDrag);
                }
            }
            InputEvent::PointerMove { position } => {
                if let DragState::Dragging { last } = self.drag {
                    let delta = position.subtract(&last);
                    self.drag = DragState::Dragging { last: position };
                    if delta != Point::default() {
                        actions.push(Action::Pan { delta });
                    }
                }
            }
            InputEvent::PointerUp | InputEvent::PointerLeave => {
                if self.is_dragging() {
                    self.drag = DragState::Idle;
                    actions.push(Action::EndDrag);
                }
            }
            InputEvent::ContextMenu { position } => {
                self.drag = DragState::Idle;
                actions.push(Action::OpenContextMenu { position });
            }
            InputEvent::Scroll { delta, .. } => {
                if self.zoom_on_wheel && delta != 0.0 {
                    actions.push(if delta > 0.0 {
                        Action::ZoomIn
                    } else {
                        Action::ZoomOut
                    });
                }
            }
            InputEvent::KeyPress { key, .. } => match key {
                KeyCode::Plus if self.zoom_on_keys => actions.push(Action::ZoomIn),
                KeyCode::Minus if self.zoom_on_keys => actions.push(Action::ZoomOut),
                KeyCode::Escape if context_menu_open => actions.push(Action::CloseContextMenu),
                _ => {}
            },
            InputEvent::Resize { size } => actions.push(Action::Resize { size }),
        }

        actions
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
