use crate::{
    core::geo::{LatLng, NamedLatLng, Point},
    i18n::Language,
    tiles::source::MapStyle,
};
use serde::{Deserialize, Serialize};

/// Input events delivered by the host, in container pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Button pressed over the map
    PointerDown {
        position: Point,
        button: MouseButton,
    },
    /// Pointer moved over the map
    PointerMove { position: Point },
    /// Button released
    PointerUp,
    /// Pointer left the container
    PointerLeave,
    /// Secondary click asking for the context menu
    ContextMenu { position: Point },
    /// Scroll wheel; positive is away from the user
    Scroll { delta: f64, position: Point },
    KeyPress {
        key: KeyCode,
        modifiers: KeyModifiers,
    },
    /// Container resized
    Resize { size: Point },
}

/// Keyboard key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    Plus,
    Minus,
    Escape,
    Other(u32),
}

/// Keyboard modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct KeyModifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// Mouse button types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

/// Notifications emitted by the map state after it changes
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    /// Center or zoom changed
    ViewChanged { center: LatLng, zoom: u8 },
    /// A drag gesture started
    MoveStart { center: LatLng },
    /// A drag gesture ended
    MoveEnd { center: LatLng },
    ContextMenuOpened { pixel: Point, lat_lng: LatLng },
    ContextMenuClosed,
    LocationSelected { location: NamedLatLng },
    SelectionCleared,
    /// A route was (re)established; points in traversal order
    RouteChanged { points: Vec<LatLng> },
    RouteCleared,
    StyleChanged { style: MapStyle },
    LanguageChanged { language: Language },
}

impl MapEvent {
    /// Listener key for this event
    pub fn event_type(&self) -> &'static str {
        match self {
            MapEvent::ViewChanged { .. } => "viewchanged",
            MapEvent::MoveStart { .. } => "movestart",
            MapEvent::MoveEnd { .. } => "moveend",
            MapEvent::ContextMenuOpened { .. } => "contextmenu",
            MapEvent::ContextMenuClosed => "contextmenuclose",
            MapEvent::LocationSelected { .. } => "select",
            MapEvent::SelectionCleared => "selectclear",
            MapEvent::RouteChanged { .. } => "routechange",
            MapEvent::RouteCleared => "routeclear",
            MapEvent::StyleChanged { .. } => "stylechange",
            MapEvent::LanguageChanged { .. } => "languagechange",
        }
    }
}

impl InputEvent {
    /// Gets the primary position associated with this event, if any
    pub fn position(&self) -> Option<Point> {
        match self {
            InputEvent::PointerDown { position, .. }
            | InputEvent::PointerMove { position }
            | InputEvent::ContextMenu { position }
            | InputEvent::Scroll { position, .. } => Some(*position),
            _ => None,
        }
    }

    /// Checks if this is a mouse/pointer event
    pub fn is_pointer_event(&self) -> bool {
        matches!(
            self,
            InputEvent::PointerDown { .. }
                | InputEvent::PointerMove { .. }
                | InputEvent::PointerUp
                | InputEvent::PointerLeave
                | InputEvent::ContextMenu { .. }
                | InputEvent::Scroll { .. }
        )
    }

    /// Checks if this is a keyboard event
    pub fn is_keyboard_event(&self) -> bool {
        matches!(self, InputEvent::KeyPress { .. })
    }
}
