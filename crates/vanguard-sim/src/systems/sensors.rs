//! Active sensor scans that reveal a contact's true identity.

use hecs::{Entity, World};

use vanguard_core::components::{Ship, Subsystems};
use vanguard_core::constants::SCAN_RANGE;
use vanguard_core::enums::SubsystemKind;
use vanguard_core::errors::CommandError;
use vanguard_core::events::SimEvent;
use vanguard_core::types::{Position, ShipId};

use crate::world_setup::find_ship;

/// Scan `target` from `scanner`. Range scales with sensor effectiveness.
/// Re-scanning a known contact succeeds without a new event.
pub fn scan(
    world: &mut World,
    scanner: Entity,
    target: ShipId,
    events: &mut Vec<SimEvent>,
) -> Result<(), CommandError> {
    let (scanner_id, origin, reach) = {
        let (ship, pos, subsystems) = world
            .query_one_mut::<(&Ship, &Position, &Subsystems)>(scanner)
            .map_err(|_| CommandError::NoPlayerShip)?;
        let sensors = subsystems.get(SubsystemKind::Sensors);
        if !sensors.online() {
            return Err(CommandError::SensorsOffline);
        }
        (ship.id, *pos, SCAN_RANGE * sensors.effectiveness())
    };
    if target == scanner_id {
        return Err(CommandError::InvalidTarget(target));
    }

    let entity = find_ship(world, target).ok_or(CommandError::ShipNotFound(target))?;
    let (ship, pos) = world
        .query_one_mut::<(&mut Ship, &Position)>(entity)
        .map_err(|_| CommandError::ShipNotFound(target))?;
    if origin.distance_to(pos) > reach {
        return Err(CommandError::OutOfRange);
    }
    if !ship.scanned {
        ship.scanned = true;
        events.push(SimEvent::ShipScanned {
            ship_id: target,
            name: ship.name.clone(),
        });
    }
    Ok(())
}
