//! Ship spawn factories and roster lookups over the ECS world.
//!
//! Ships are addressed from outside by `ShipId`; the hecs `Entity`
//! stays internal to the simulation crate.

use hecs::{Entity, World};

use vanguard_core::components::*;
use vanguard_core::constants::{SUBSYSTEM_MAX_POWER, TORPEDO_COLLISION_RADIUS};
use vanguard_core::events::SimEvent;
use vanguard_core::roster::ShipSpec;
use vanguard_core::types::{normalize_heading, ShipId};

/// Spawn a ship with the full component bundle. Players get weapon and
/// repair state; everyone else gets an NPC brain.
pub fn spawn_ship(world: &mut World, id: ShipId, spec: &ShipSpec, is_player: bool) -> Entity {
    let mut subsystems = Subsystems::uniform(0.0);
    for (system, power) in subsystems.systems.iter_mut().zip(spec.power) {
        system.power = clamp_power(power);
    }

    let max_hull = spec.max_hull.max(0.0);
    let max_shields = spec.max_shields.max(0.0);
    let max_velocity = spec.max_velocity.max(0.0);

    let entity = world.spawn((
        Ship {
            id,
            name: spec.name.clone(),
            class: spec.class.clone(),
            faction: spec.faction,
            scanned: spec.scanned || is_player,
            collision_radius: spec.collision_radius.max(0.0),
        },
        spec.position,
        Helm {
            heading: normalize_heading(spec.heading),
            velocity: 0.0,
            max_velocity,
            turn_rate: spec.turn_rate.max(0.0),
        },
        Hull {
            current: max_hull,
            max: max_hull,
        },
        Shields {
            strength: max_shields,
            max: max_shields,
        },
        subsystems,
        Targeting::default(),
    ));

    let extra = if is_player {
        world.insert(
            entity,
            (
                PlayerShip::default(),
                WeaponCooldowns::default(),
                RepairBay::default(),
            ),
        )
    } else {
        world.insert_one(
            entity,
            NpcBrain {
                behavior: Default::default(),
                patrol_route: spec.patrol_route.clone(),
                patrol_index: 0,
            },
        )
    };
    debug_assert!(extra.is_ok(), "entity was just spawned");

    entity
}

/// Spawn a torpedo entity at `origin`.
#[allow(clippy::too_many_arguments)]
pub fn spawn_torpedo(
    world: &mut World,
    id: u32,
    origin: vanguard_core::types::Position,
    heading: f64,
    velocity: f64,
    damage: f64,
    owner: ShipId,
    from_player: bool,
    target: Option<ShipId>,
    lifetime_ticks: u32,
) -> Entity {
    world.spawn((
        origin,
        Torpedo {
            id,
            heading: normalize_heading(heading),
            velocity,
            damage,
            owner,
            from_player,
            target,
            lifetime_ticks,
            collision_radius: TORPEDO_COLLISION_RADIUS,
        },
    ))
}

/// Look up the entity for a ship id.
pub fn find_ship(world: &World, id: ShipId) -> Option<Entity> {
    world
        .query::<&Ship>()
        .iter()
        .find(|(_, ship)| ship.id == id)
        .map(|(entity, _)| entity)
}

/// All live ships in id order.
pub fn ships_by_id(world: &World) -> Vec<(ShipId, Entity)> {
    let mut ships: Vec<(ShipId, Entity)> = world
        .query::<&Ship>()
        .iter()
        .map(|(entity, ship)| (ship.id, entity))
        .collect();
    ships.sort_by_key(|(id, _)| *id);
    ships
}

/// Remove a ship and clear every reference to it.
///
/// Idempotent: returns `false` if the ship was already gone. Ships whose
/// engagement target pointed at it lose their lock and emit `TargetChanged`.
pub fn despawn_ship(world: &mut World, id: ShipId, events: &mut Vec<SimEvent>) -> bool {
    let Some(entity) = find_ship(world, id) else {
        return false;
    };
    let _ = world.despawn(entity);

    let mut cleared: Vec<ShipId> = Vec::new();
    for (_entity, (ship, targeting)) in world.query_mut::<(&Ship, &mut Targeting)>() {
        if targeting.target == Some(id) {
            targeting.target = None;
            cleared.push(ship.id);
        }
    }
    cleared.sort();
    events.extend(cleared.into_iter().map(|ship_id| SimEvent::TargetChanged {
        ship_id,
        target: None,
    }));

    for (_entity, torpedo) in world.query_mut::<&mut Torpedo>() {
        if torpedo.target == Some(id) {
            torpedo.target = None;
        }
    }

    true
}

/// Clamp operator power input into [0, 100]. NaN counts as zero.
pub fn clamp_power(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, SUBSYSTEM_MAX_POWER)
    }
}
