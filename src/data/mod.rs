pub mod formats;
pub mod history;
pub mod locations;

pub use self::formats::parse_coordinates;
pub use self::history::{HistoryEntry, HistoryStore, JsonFileStore, MemoryStore, SearchHistory};
pub use self::locations::{LocationDatabase, LocationRecord, SearchScope};
