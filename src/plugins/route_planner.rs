//! Route summary and turn-by-turn list
//!
//! Nothing here talks to a routing engine. Distance is the great-circle length
//! of the legs scaled per route type, time comes from a fixed speed table, and
//! the instruction list is a placeholder with random street names.

use crate::{
    i18n::{TextKey, Translator},
    layers::route::RoutePath,
};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    #[default]
    Driving,
    Truck,
}

impl TravelMode {
    pub const ALL: [TravelMode; 2] = [TravelMode::Driving, TravelMode::Truck];

    pub fn label_key(&self) -> TextKey {
        match self {
            Self::Driving => TextKey::DrivingMode,
            Self::Truck => TextKey::TruckMode,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RouteType {
    #[default]
    Fastest,
    Shortest,
    Eco,
}

impl RouteType {
    pub const ALL: [RouteType; 3] = [RouteType::Fastest, RouteType::Shortest, RouteType::Eco];

    /// Scale applied to the straight-line distance
    pub fn distance_multiplier(&self) -> f64 {
        match self {
            Self::Fastest => 1.1,
            Self::Shortest => 1.0,
            Self::Eco => 1.15,
        }
    }

    /// Average speed in km/h
    pub fn speed_kmh(&self, mode: TravelMode) -> f64 {
        match (mode, self) {
            (TravelMode::Driving, Self::Fastest) => 80.0,
            (TravelMode::Driving, Self::Shortest) => 60.0,
            (TravelMode::Driving, Self::Eco) => 50.0,
            (TravelMode::Truck, Self::Fastest) => 65.0,
            (TravelMode::Truck, Self::Shortest) => 50.0,
            (TravelMode::Truck, Self::Eco) => 40.0,
        }
    }

    pub fn label_key(&self) -> TextKey {
        match self {
            Self::Fastest => TextKey::FastestRoute,
            Self::Shortest => TextKey::ShortestRoute,
            Self::Eco => TextKey::EcoRoute,
        }
    }
}

/// Estimated length and duration of a route
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    pub distance_km: f64,
    pub minutes: f64,
}

impl RouteSummary {
    pub fn estimate(route: &RoutePath, mode: TravelMode, route_type: RouteType) -> Self {
        Self::from_distance(route.great_circle_km(), mode, route_type)
    }

    /// Summary for a straight-line length of `base_km`
    pub fn from_distance(base_km: f64, mode: TravelMode, route_type: RouteType) -> Self {
        let distance_km = base_km * route_type.distance_multiplier();
        let minutes = distance_km / route_type.speed_kmh(mode) * 60.0;
        Self {
            distance_km,
            minutes,
        }
    }

    /// Whole kilometers, e.g. `"23 km"`
    pub fn format_distance(&self) -> String {
        format!("{} km", self.distance_km.round())
    }

    /// `"1 h 15 min"` past the hour, `"45 min"` below it, with localized units
    pub fn format_time(&self, translator: &Translator) -> String {
        let minutes_unit = translator.text(TextKey::Minutes);
        // Whole minutes first, then the hour split
        let total = self.minutes.max(0.0).round() as u64;
        if total >= 60 {
            format!(
                "{} {} {} {}",
                total / 60,
                translator.text(TextKey::Hours),
                total % 60,
                minutes_unit
            )
        } else {
            format!("{} {}", total, minutes_unit)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstructionIcon {
    Start,
    Straight,
    Left,
    Right,
    End,
}

/// One line of the turn-by-turn list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    pub icon: InstructionIcon,
    pub text: String,
    /// Empty for the first and last line
    pub distance: String,
}

impl Instruction {
    fn new(icon: InstructionIcon, text: String, distance: &str) -> Self {
        Self {
            icon,
            text,
            distance: distance.to_string(),
        }
    }
}

/// Produces the turn-by-turn list for a route
pub trait InstructionProvider {
    fn instructions(&mut self, route: &RoutePath, translator: &Translator) -> Vec<Instruction>;
}

pub const PLACEHOLDER_STREETS: [&str; 8] = [
    "Main Street",
    "Central Avenue",
    "Park Boulevard",
    "River Road",
    "Market Street",
    "King's Highway",
    "Queen's Road",
    "Victory Avenue",
];

/// Fixed six-step list with two randomly picked street names
#[derive(Debug, Clone)]
pub struct PlaceholderInstructions {
    rng: StdRng,
}

impl PlaceholderInstructions {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic street picks
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn street(&mut self) -> &'static str {
        PLACEHOLDER_STREETS
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(PLACEHOLDER_STREETS[0])
    }
}

impl Default for PlaceholderInstructions {
    fn default() -> Self {
        Self::new()
    }
}

impl InstructionProvider for PlaceholderInstructions {
    fn instructions(&mut self, route: &RoutePath, translator: &Translator) -> Vec<Instruction> {
        let t = |key| translator.text(key);
        let first_street = self.street();
        let second_street = self.street();

        vec![
            Instruction::new(
                InstructionIcon::Start,
                format!("{}: {}", t(TextKey::StartPoint), route.start().name),
                "",
            ),
            Instruction::new(
                InstructionIcon::Straight,
                format!("{} {} {}", t(TextKey::GoStraight), t(TextKey::Along), first_street),
                "2.3 km",
            ),
            Instruction::new(
                InstructionIcon::Left,
                format!("{} {} {}", t(TextKey::TurnLeft), t(TextKey::Along), second_street),
                "1.8 km",
            ),
            Instruction::new(InstructionIcon::Right, t(TextKey::TurnRight).to_string(), "0.5 km"),
            Instruction::new(InstructionIcon::Straight, t(TextKey::GoStraight).to_string(), "3.2 km"),
            Instruction::new(
                InstructionIcon::End,
                format!("{} {}", t(TextKey::Arrive), route.end().name),
                "",
            ),
        ]
    }
}

/// Everything the route details view shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePlan {
    pub route: RoutePath,
    pub mode: TravelMode,
    pub route_type: RouteType,
    pub summary: RouteSummary,
    pub instructions: Vec<Instruction>,
}

/// Turns an established route into a [`RoutePlan`] for the current options
pub struct RoutePlanner {
    pub mode: TravelMode,
    pub route_type: RouteType,
    provider: Box<dyn InstructionProvider>,
}

impl std::fmt::Debug for RoutePlanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoutePlanner")
            .field("mode", &self.mode)
            .field("route_type", &self.route_type)
            .finish_non_exhaustive()
    }
}

impl RoutePlanner {
    pub fn new(provider: Box<dyn InstructionProvider>) -> Self {
        Self {
            mode: TravelMode::default(),
            route_type: RouteType::default(),
            provider,
        }
    }

    pub fn plan(&mut self, route: &RoutePath, translator: &Translator) -> RoutePlan {
        let summary = RouteSummary::estimate(route, self.mode, self.route_type);
        let instructions = self.provider.instructions(route, translator);
        log::debug!(
            "planned {:?}/{:?} route over {} points: {:.1} km, {:.0} min",
            self.mode,
            self.route_type,
            route.point_count(),
            summary.distance_km,
            summary.minutes
        );
        RoutePlan {
            route: route.clone(),
            mode: self.mode,
            route_type: self.route_type,
            summary,
            instructions,
        }
    }
}

impl Default for RoutePlanner {
    fn default() -> Self {
        Self::new(Box::new(PlaceholderInstructions::new()))
    }
}
