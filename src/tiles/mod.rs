pub mod source;

// Re-exports for convenience
pub use self::source::{MapStyle, OpenStreetMapSource, TileSource, ViewerRequest};
