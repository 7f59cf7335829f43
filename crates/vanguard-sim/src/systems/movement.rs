//! Kinematic integration for ships.
//!
//! Distance covered per tick is nominal velocity × engine effectiveness.
//! The player moves along its commanded heading; NPCs steer toward an
//! AI-selected point with a turn rate that also scales with engines.

use hecs::{Entity, World};

use vanguard_core::components::{Helm, Subsystems};
use vanguard_core::constants::WAYPOINT_ARRIVAL_RADIUS;
use vanguard_core::enums::SubsystemKind;
use vanguard_core::events::SimEvent;
use vanguard_core::types::{heading_delta, normalize_heading, Position};

/// Advance the player ship and check waypoint arrival.
///
/// Arrival clears the waypoint but does not stop the ship.
pub fn run_player(
    world: &mut World,
    player: Entity,
    waypoint: &mut Option<Position>,
    events: &mut Vec<SimEvent>,
) {
    let Ok((helm, pos, subsystems)) =
        world.query_one_mut::<(&Helm, &mut Position, &Subsystems)>(player)
    else {
        return;
    };

    let engines = subsystems.effectiveness(SubsystemKind::Engines);
    *pos = pos.advanced(helm.heading, helm.velocity * engines);

    if let Some(target) = *waypoint {
        if helm.velocity > 0.0 && pos.distance_to(&target) < WAYPOINT_ARRIVAL_RADIUS {
            *waypoint = None;
            events.push(SimEvent::WaypointReached { position: target });
            events.push(SimEvent::WaypointCleared);
        }
    }
}

/// Turn toward `target` without overshooting, then advance along the
/// (possibly still turning) heading.
pub fn steer(helm: &mut Helm, position: &mut Position, target: Option<Position>, engines: f64) {
    if let Some(target) = target {
        if position.distance_to(&target) > f64::EPSILON {
            let delta = heading_delta(helm.heading, position.bearing_to(&target));
            let max_turn = (helm.turn_rate * engines).max(0.0);
            let turn = delta.clamp(-max_turn, max_turn);
            helm.heading = normalize_heading(helm.heading + turn);
        }
    }
    *position = position.advanced(helm.heading, helm.velocity * engines);
}

/// Effective speed of a helm given its engines.
pub fn effective_velocity(helm: &Helm, subsystems: &Subsystems) -> f64 {
    helm.velocity * subsystems.effectiveness(SubsystemKind::Engines)
}
