//! Shared damage pipeline: shields first, then hull, with a chance of
//! cascading into a random subsystem. Destroys NPCs at zero hull.

use hecs::{Entity, World};
use rand::{Rng, RngCore};
use tracing::info;

use vanguard_core::components::*;
use vanguard_core::constants::*;
use vanguard_core::enums::SubsystemKind;
use vanguard_core::events::{SimEvent, SubsystemHit};

use crate::world_setup::despawn_ship;

/// Breakdown of one resolved hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageReport {
    pub shield_absorbed: f64,
    /// Raw damage minus absorption. May exceed the hull actually lost.
    pub hull_damage: f64,
    pub hull_remaining: f64,
    pub subsystem_hit: Option<SubsystemHit>,
}

impl DamageReport {
    pub fn hull_depleted(&self) -> bool {
        self.hull_remaining <= 0.0
    }
}

/// Apply `raw_damage` to one ship's defensive components.
///
/// Shield absorption is `raw × shield power fraction × 0.8`, capped by the
/// current shield strength. Hull and shields never go below zero.
pub fn resolve_damage<R: Rng + ?Sized>(
    hull: &mut Hull,
    shields: &mut Shields,
    subsystems: &mut Subsystems,
    raw_damage: f64,
    rng: &mut R,
) -> DamageReport {
    let raw = if raw_damage.is_nan() {
        0.0
    } else {
        raw_damage.max(0.0)
    };

    let shield_power = subsystems.get(SubsystemKind::Shields).power_fraction();
    let absorbable = raw * shield_power * SHIELD_ABSORB_FACTOR;
    let shield_absorbed = if absorbable.is_nan() {
        0.0
    } else {
        absorbable.min(shields.strength).max(0.0)
    };
    shields.strength = (shields.strength - shield_absorbed).max(0.0);

    let hull_damage = raw - shield_absorbed;
    hull.current = (hull.current - hull_damage).max(0.0);

    let subsystem_hit = if hull_damage > SUBSYSTEM_HIT_THRESHOLD
        && rng.gen_bool(SUBSYSTEM_HIT_CHANCE)
    {
        let system = SubsystemKind::ALL[rng.gen_range(0..SubsystemKind::ALL.len())];
        let target = subsystems.get_mut(system);
        let amount = hull_damage * SUBSYSTEM_HIT_FACTOR;
        target.hp = (target.hp - amount).max(0.0);
        Some(SubsystemHit {
            system,
            amount,
            remaining_hp: target.hp,
        })
    } else {
        None
    };

    DamageReport {
        shield_absorbed,
        hull_damage,
        hull_remaining: hull.current,
        subsystem_hit,
    }
}

/// Damage a ship entity and handle destruction.
///
/// NPCs at zero hull are removed immediately. The player is flagged
/// destroyed once and stays in the world. Returns `None` if the entity
/// is not a ship.
pub fn damage_ship(
    world: &mut World,
    entity: Entity,
    raw_damage: f64,
    rng: &mut dyn RngCore,
    events: &mut Vec<SimEvent>,
) -> Option<DamageReport> {
    let (ship_id, name, report, player_newly_destroyed, is_player) = {
        let (ship, hull, shields, subsystems, player) = world
            .query_one_mut::<(
                &Ship,
                &mut Hull,
                &mut Shields,
                &mut Subsystems,
                Option<&mut PlayerShip>,
            )>(entity)
            .ok()?;

        let report = resolve_damage(hull, shields, subsystems, raw_damage, rng);
        let is_player = player.is_some();
        let mut newly_destroyed = false;
        if let Some(player) = player {
            if report.hull_depleted() && !player.destroyed {
                player.destroyed = true;
                newly_destroyed = true;
            }
        }
        (ship.id, ship.name.clone(), report, newly_destroyed, is_player)
    };

    events.push(SimEvent::ShipDamaged {
        ship_id,
        shield_absorbed: report.shield_absorbed,
        hull_damage: report.hull_damage,
        hull_remaining: report.hull_remaining,
        subsystem_hit: report.subsystem_hit,
    });

    if player_newly_destroyed {
        info!(%ship_id, "player ship destroyed");
        events.push(SimEvent::PlayerDestroyed { ship_id });
    } else if !is_player && report.hull_depleted() {
        let mut lost_locks = Vec::new();
        if despawn_ship(world, ship_id, &mut lost_locks) {
            info!(%ship_id, %name, "ship destroyed");
            events.push(SimEvent::ShipDestroyed { ship_id, name });
            events.extend(lost_locks);
        }
    }

    Some(report)
}
