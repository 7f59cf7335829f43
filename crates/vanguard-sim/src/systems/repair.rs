//! Damage control: crew repairs on player subsystems with per-system turnaround.

use hecs::{Entity, World};
use tracing::debug;

use vanguard_core::components::{RepairBay, Subsystems};
use vanguard_core::constants::*;
use vanguard_core::enums::SubsystemKind;
use vanguard_core::errors::CommandError;
use vanguard_core::events::SimEvent;

/// Send a repair crew to `system`. Grants a fixed hp restoration and starts
/// that system's cooldown.
pub fn start(
    world: &mut World,
    ship: Entity,
    system: SubsystemKind,
    events: &mut Vec<SimEvent>,
) -> Result<(), CommandError> {
    let (bay, subsystems) = world
        .query_one_mut::<(&mut RepairBay, &mut Subsystems)>(ship)
        .map_err(|_| CommandError::NoPlayerShip)?;

    let cooldown = bay.cooldowns[system.index()];
    if cooldown > 0 {
        return Err(CommandError::RepairCooling(system, cooldown));
    }
    let target = subsystems.get_mut(system);
    if target.hp >= SUBSYSTEM_MAX_HP {
        return Err(CommandError::FullyRepaired(system));
    }

    target.hp = (target.hp + REPAIR_AMOUNT).min(SUBSYSTEM_MAX_HP);
    bay.cooldowns[system.index()] = REPAIR_COOLDOWN_TICKS;

    debug!(%system, hp = target.hp, "repair crew dispatched");
    events.push(SimEvent::RepairStarted {
        system,
        hp: target.hp,
        cooldown_ticks: REPAIR_COOLDOWN_TICKS,
    });
    Ok(())
}

/// Count down repair crew turnaround.
pub fn run(world: &mut World) {
    for (_entity, bay) in world.query_mut::<&mut RepairBay>() {
        for cooldown in bay.cooldowns.iter_mut() {
            *cooldown = cooldown.saturating_sub(1);
        }
    }
}
