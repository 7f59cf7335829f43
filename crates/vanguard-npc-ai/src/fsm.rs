//! NPC behavior finite state machine.
//!
//! Pure functions that pick a behavior, a movement target and a speed
//! for one NPC from its faction, condition and the player's position.
//! No ECS dependency; operates on plain data.

use vanguard_core::constants::*;
use vanguard_core::enums::{AiBehavior, Faction};
use vanguard_core::types::{heading_vector, Position};

use crate::profiles::get_profile;

/// Input to the FSM for a single NPC.
pub struct NpcContext<'a> {
    pub faction: Faction,
    pub behavior: AiBehavior,
    pub position: Position,
    pub heading: f64,
    pub hull_fraction: f64,
    /// `None` when there is no player ship in the world.
    pub player_position: Option<Position>,
    pub patrol_route: &'a [Position],
    pub patrol_index: usize,
}

/// Output from the FSM.
#[derive(Debug, Clone, PartialEq)]
pub struct NpcDecision {
    pub behavior: AiBehavior,
    pub behavior_changed: bool,
    /// Point to steer toward. `None` means hold position.
    pub move_target: Option<Position>,
    /// Fraction of max velocity; zero when there is no target.
    pub speed_fraction: f64,
    pub patrol_index: usize,
    /// Attacking and close enough to roll for a phaser shot this tick.
    pub in_firing_range: bool,
}

/// Pick the behavior state for an NPC.
pub fn select_behavior(faction: Faction, hull_fraction: f64, player_distance: f64) -> AiBehavior {
    match faction {
        Faction::Friendly => {
            if player_distance > FRIENDLY_ESCORT_RANGE {
                AiBehavior::Approach
            } else {
                AiBehavior::Patrol
            }
        }
        Faction::Neutral => AiBehavior::Patrol,
        Faction::Hostile => {
            if hull_fraction < HOSTILE_FLEE_HULL_FRACTION {
                AiBehavior::Flee
            } else if player_distance < HOSTILE_ATTACK_RANGE {
                AiBehavior::Attack
            } else if player_distance < HOSTILE_APPROACH_RANGE {
                AiBehavior::Approach
            } else {
                AiBehavior::Patrol
            }
        }
    }
}

/// Evaluate the FSM for one NPC.
pub fn evaluate(ctx: &NpcContext) -> NpcDecision {
    let player_distance = ctx
        .player_position
        .map(|p| ctx.position.distance_to(&p))
        .unwrap_or(f64::INFINITY);

    let mut behavior = select_behavior(ctx.faction, ctx.hull_fraction, player_distance);
    // Nothing to approach, attack or run from without a player
    if ctx.player_position.is_none() {
        behavior = AiBehavior::Patrol;
    }

    let mut patrol_index = ctx.patrol_index;
    let move_target = match (behavior, ctx.player_position) {
        (AiBehavior::Approach | AiBehavior::Attack, Some(player)) => Some(player),
        (AiBehavior::Flee, Some(player)) => Some(flee_point(ctx.position, player, ctx.heading)),
        _ => {
            let (target, index) = patrol_target(ctx.position, ctx.patrol_route, ctx.patrol_index);
            patrol_index = index;
            target
        }
    };

    let profile = get_profile(behavior);
    let speed_fraction = if move_target.is_some() {
        profile.speed_fraction
    } else {
        0.0
    };

    NpcDecision {
        behavior,
        behavior_changed: behavior != ctx.behavior,
        move_target,
        speed_fraction,
        patrol_index,
        in_firing_range: profile.weapons_free && player_distance < NPC_PHASER_RANGE,
    }
}

/// Current patrol point, advancing (with wrap) once within arrival range.
pub fn patrol_target(
    position: Position,
    route: &[Position],
    index: usize,
) -> (Option<Position>, usize) {
    if route.is_empty() {
        return (None, 0);
    }
    let mut index = index % route.len();
    if position.distance_to(&route[index]) < PATROL_ARRIVAL_RADIUS {
        index = (index + 1) % route.len();
    }
    (Some(route[index]), index)
}

/// A point `FLEE_DISTANCE` away from the player, straight out from them.
pub fn flee_point(position: Position, player: Position, heading: f64) -> Position {
    let away = (position.as_vec() - player.as_vec()).normalize_or_zero();
    // Sitting on top of the player: keep running the way we face
    let away = if away == glam::DVec2::ZERO {
        heading_vector(heading)
    } else {
        away
    };
    (position.as_vec() + away * FLEE_DISTANCE).into()
}
