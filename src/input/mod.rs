pub mod events;
pub mod handler;

// Re-export the essential types
pub use self::events::{InputEvent, KeyCode, KeyModifiers, MapEvent, MouseButton};
pub use self::handler::{Action, DragState, EventManager, InputHandler};
