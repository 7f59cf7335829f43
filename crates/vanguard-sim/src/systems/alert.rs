//! Alert automation driven by the nearest hostile's distance.
//!
//! Escalates to red inside 500 and to yellow inside 1000 (never demoting
//! red to yellow), and stands down to normal only beyond 1500. Between the
//! bands the current level holds, so a stationary hostile on a boundary
//! cannot make the level oscillate.

use hecs::World;

use vanguard_core::components::{PlayerShip, Ship};
use vanguard_core::constants::*;
use vanguard_core::enums::{AlertLevel, Faction};
use vanguard_core::types::Position;

/// Distance from `from` to the closest hostile NPC, if any.
pub fn nearest_hostile_distance(world: &World, from: Position) -> Option<f64> {
    let mut query = world.query::<(&Ship, &Position)>().without::<&PlayerShip>();
    let nearest = query
        .iter()
        .filter(|(_, (ship, _))| ship.faction == Faction::Hostile)
        .map(|(_, (_, pos))| pos.distance_to(&from))
        .min_by(|a, b| a.total_cmp(b));
    nearest
}

/// The level the bridge should be at given the current one.
pub fn evaluate(current: AlertLevel, nearest_hostile: Option<f64>) -> AlertLevel {
    let distance = nearest_hostile.unwrap_or(f64::INFINITY);
    if distance < ALERT_RED_RANGE {
        AlertLevel::Red
    } else if distance < ALERT_YELLOW_RANGE {
        current.max(AlertLevel::Yellow)
    } else if distance > ALERT_CLEAR_RANGE {
        AlertLevel::Normal
    } else {
        current
    }
}

/// Returns the new level when it differs from `current`.
pub fn run(world: &World, player_position: Position, current: AlertLevel) -> Option<AlertLevel> {
    let next = evaluate(current, nearest_hostile_distance(world, player_position));
    (next != current).then_some(next)
}
