//! Ship spawn descriptions used by scenarios and spawn requests.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::Faction;
use crate::types::Position;

/// Everything needed to add a ship to the world.
///
/// All fields except `name` have defaults so scenario files stay short.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipSpec {
    pub name: String,
    pub class: String,
    pub faction: Faction,
    pub position: Position,
    pub heading: f64,
    pub max_velocity: f64,
    pub turn_rate: f64,
    pub max_hull: f64,
    pub max_shields: f64,
    pub collision_radius: f64,
    pub patrol_route: Vec<Position>,
    /// Initial power for engines, weapons, shields, sensors.
    pub power: [f64; 4],
    pub scanned: bool,
}

impl Default for ShipSpec {
    fn default() -> Self {
        Self {
            name: "Unnamed".into(),
            class: "frigate".into(),
            faction: Faction::Neutral,
            position: Position::default(),
            heading: 0.0,
            max_velocity: DEFAULT_MAX_VELOCITY,
            turn_rate: DEFAULT_TURN_RATE,
            max_hull: DEFAULT_MAX_HULL,
            max_shields: DEFAULT_MAX_SHIELDS,
            collision_radius: DEFAULT_COLLISION_RADIUS,
            patrol_route: Vec::new(),
            power: [DEFAULT_SUBSYSTEM_POWER; 4],
            scanned: false,
        }
    }
}

impl ShipSpec {
    pub fn new(name: impl Into<String>, faction: Faction, position: Position) -> Self {
        Self {
            name: name.into(),
            faction,
            position,
            ..Default::default()
        }
    }

    pub fn with_patrol(mut self, route: Vec<Position>) -> Self {
        self.patrol_route = route;
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }
}
