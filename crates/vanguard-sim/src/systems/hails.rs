//! Deferred hail responses, keyed by simulation tick rather than wall clock.

use hecs::World;

use vanguard_core::components::Ship;
use vanguard_core::enums::Faction;
use vanguard_core::events::SimEvent;
use vanguard_core::types::ShipId;

use crate::world_setup::find_ship;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingHail {
    ship_id: ShipId,
    due_tick: u64,
}

/// Hails waiting for an answer.
#[derive(Debug, Clone, Default)]
pub struct HailSchedule {
    pending: Vec<PendingHail>,
}

impl HailSchedule {
    pub fn schedule(&mut self, ship_id: ShipId, due_tick: u64) {
        self.pending.push(PendingHail { ship_id, due_tick });
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Deliver every response due at or before `tick`, in scheduling order.
    /// Ships removed in the meantime never answer.
    pub fn run(&mut self, world: &World, tick: u64, events: &mut Vec<SimEvent>) {
        let (due, waiting): (Vec<PendingHail>, Vec<PendingHail>) =
            std::mem::take(&mut self.pending)
                .into_iter()
                .partition(|h| h.due_tick <= tick);
        self.pending = waiting;

        for hail in due {
            let Some(entity) = find_ship(world, hail.ship_id) else {
                continue;
            };
            let Ok(ship) = world.get::<&Ship>(entity) else {
                continue;
            };
            events.push(SimEvent::HailResponse {
                ship_id: hail.ship_id,
                message: response_for(&ship),
            });
        }
    }
}

fn response_for(ship: &Ship) -> String {
    let caller = if ship.scanned {
        ship.name.as_str()
    } else {
        "Unknown vessel"
    };
    match ship.faction {
        Faction::Friendly => format!("{caller}: Reading you clearly. Standing by to assist."),
        Faction::Neutral => format!("{caller}: We are a civilian vessel. Please keep your distance."),
        Faction::Hostile => format!("{caller}: Your hail is noted. Lower your shields."),
    }
}
