//! Weapon fire resolution for phasers and torpedoes.
//!
//! Both weapons require the shooter's weapons subsystem to have hp and
//! power. Phasers resolve instantly through the damage pipeline; torpedoes
//! spawn a projectile that the projectile system resolves later.

use hecs::{Entity, World};
use rand::RngCore;
use tracing::debug;

use vanguard_core::components::*;
use vanguard_core::constants::*;
use vanguard_core::enums::{SubsystemKind, WeaponKind};
use vanguard_core::errors::CommandError;
use vanguard_core::events::SimEvent;
use vanguard_core::types::{Position, ShipId};

use crate::systems::damage::damage_ship;
use crate::world_setup::{find_ship, spawn_torpedo};

/// Shooter state captured once weapons are confirmed online.
struct ArmedShip {
    id: ShipId,
    position: Position,
    heading: f64,
    effectiveness: f64,
    is_player: bool,
}

fn armed_ship(world: &mut World, shooter: Entity) -> Result<ArmedShip, CommandError> {
    let (ship, position, helm, subsystems, player) = world
        .query_one_mut::<(&Ship, &Position, &Helm, &Subsystems, Option<&PlayerShip>)>(shooter)
        .map_err(|_| CommandError::WeaponsOffline)?;
    let weapons = subsystems.get(SubsystemKind::Weapons);
    if !weapons.online() {
        return Err(CommandError::WeaponsOffline);
    }
    Ok(ArmedShip {
        id: ship.id,
        position: *position,
        heading: helm.heading,
        effectiveness: weapons.effectiveness(),
        is_player: player.is_some(),
    })
}

/// Fire a phaser at `target`. Damage is applied before this returns.
pub fn fire_phaser(
    world: &mut World,
    shooter: Entity,
    target: Option<ShipId>,
    rng: &mut dyn RngCore,
    events: &mut Vec<SimEvent>,
) -> Result<(), CommandError> {
    let armed = armed_ship(world, shooter)?;
    let target_id = target.ok_or(CommandError::NoTarget)?;
    if target_id == armed.id {
        return Err(CommandError::InvalidTarget(target_id));
    }
    let target_entity = find_ship(world, target_id).ok_or(CommandError::NoTarget)?;
    let target_pos = world
        .get::<&Position>(target_entity)
        .map(|p| *p)
        .map_err(|_| CommandError::NoTarget)?;

    if armed.position.distance_to(&target_pos) > PHASER_RANGE {
        return Err(CommandError::OutOfRange);
    }

    world.spawn((Beam {
        owner: armed.id,
        origin: armed.position,
        target: target_pos,
        lifetime_ticks: PHASER_BEAM_LIFETIME_TICKS,
    },));

    events.push(SimEvent::WeaponFired {
        shooter: armed.id,
        weapon: WeaponKind::Phaser,
        target: Some(target_id),
    });

    let damage = PHASER_BASE_DAMAGE * armed.effectiveness;
    debug!(shooter = %armed.id, target = %target_id, damage, "phaser fired");
    damage_ship(world, target_entity, damage, rng, events);
    Ok(())
}

/// Launch a torpedo. Aimed at `target` when it exists, otherwise along
/// the shooter's heading. The target is kept for display only.
pub fn fire_torpedo(
    world: &mut World,
    shooter: Entity,
    target: Option<ShipId>,
    torpedo_id: u32,
    events: &mut Vec<SimEvent>,
) -> Result<(), CommandError> {
    let armed = armed_ship(world, shooter)?;

    let aim = target
        .filter(|id| *id != armed.id)
        .and_then(|id| find_ship(world, id).map(|entity| (id, entity)))
        .and_then(|(id, entity)| world.get::<&Position>(entity).ok().map(|p| (id, *p)));

    let (target, heading) = match aim {
        Some((id, pos)) => (Some(id), armed.position.bearing_to(&pos)),
        None => (None, armed.heading),
    };

    let damage = TORPEDO_BASE_DAMAGE * armed.effectiveness;
    spawn_torpedo(
        world,
        torpedo_id,
        armed.position,
        heading,
        TORPEDO_SPEED,
        damage,
        armed.id,
        armed.is_player,
        target,
        TORPEDO_LIFETIME_TICKS,
    );

    events.push(SimEvent::WeaponFired {
        shooter: armed.id,
        weapon: WeaponKind::Torpedo,
        target,
    });
    debug!(shooter = %armed.id, torpedo_id, damage, "torpedo launched");
    Ok(())
}

/// Count down player weapon recharge timers.
pub fn tick_cooldowns(world: &mut World) {
    for (_entity, cooldowns) in world.query_mut::<&mut WeaponCooldowns>() {
        cooldowns.phaser = cooldowns.phaser.saturating_sub(1);
        cooldowns.torpedo = cooldowns.torpedo.saturating_sub(1);
    }
}
