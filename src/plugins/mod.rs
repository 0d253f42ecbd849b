pub mod poi;
pub mod route_planner;

pub use self::poi::PoiDetail;
pub use self::route_planner::{
    Instruction, InstructionIcon, InstructionProvider, PlaceholderInstructions, RoutePlan,
    RoutePlanner, RouteSummary, RouteType, TravelMode,
};
