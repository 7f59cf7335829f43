//! Torpedo flight and collision.
//!
//! Each tick every torpedo moves along its fixed heading, then checks for a
//! hit. Player torpedoes can hit any NPC; NPC torpedoes can only hit the
//! player. A torpedo is removed exactly once: on its first hit, or when its
//! lifetime runs out without one.

use hecs::{Entity, World};
use rand::RngCore;

use vanguard_core::components::*;
use vanguard_core::events::SimEvent;
use vanguard_core::types::{Position, ShipId};

use crate::systems::damage::damage_ship;

struct InFlight {
    entity: Entity,
    id: u32,
    position: Position,
    radius: f64,
    damage: f64,
    from_player: bool,
    expired: bool,
}

/// Run the projectile system: advance, collide, expire.
pub fn run(
    world: &mut World,
    rng: &mut dyn RngCore,
    events: &mut Vec<SimEvent>,
    despawn_buffer: &mut Vec<Entity>,
) {
    despawn_buffer.clear();

    let mut in_flight: Vec<InFlight> = Vec::new();
    for (entity, (torpedo, pos)) in world.query_mut::<(&mut Torpedo, &mut Position)>() {
        *pos = pos.advanced(torpedo.heading, torpedo.velocity);
        torpedo.lifetime_ticks = torpedo.lifetime_ticks.saturating_sub(1);
        in_flight.push(InFlight {
            entity,
            id: torpedo.id,
            position: *pos,
            radius: torpedo.collision_radius,
            damage: torpedo.damage,
            from_player: torpedo.from_player,
            expired: torpedo.lifetime_ticks == 0,
        });
    }
    in_flight.sort_by_key(|t| t.id);

    // Sequential so a ship destroyed by one torpedo is gone for the next
    for torpedo in &in_flight {
        if let Some(victim) = find_collision(world, torpedo) {
            damage_ship(world, victim, torpedo.damage, rng, events);
            despawn_buffer.push(torpedo.entity);
        } else if torpedo.expired {
            despawn_buffer.push(torpedo.entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

/// First ship (by id) this torpedo overlaps, among the ships it may hit.
fn find_collision(world: &World, torpedo: &InFlight) -> Option<Entity> {
    let mut query = world.query::<(&Ship, &Position, Option<&PlayerShip>)>();
    let hit = query
        .iter()
        .filter(|(_, (_, _, player))| player.is_some() != torpedo.from_player)
        .filter(|(_, (ship, pos, _))| {
            pos.distance_to(&torpedo.position) < ship.collision_radius + torpedo.radius
        })
        .map(|(entity, (ship, _, _))| (ship.id, entity))
        .min_by_key(|(id, _): &(ShipId, Entity)| *id)
        .map(|(_, entity)| entity);
    hit
}
