//! NPC AI system: evaluates the behavior FSM for every NPC, steers it,
//! and rolls for opportunistic phaser fire while attacking.

use hecs::{Entity, World};
use rand::{Rng, RngCore};

use vanguard_core::components::*;
use vanguard_core::constants::NPC_PHASER_CHANCE;
use vanguard_core::enums::{AiBehavior, SubsystemKind};
use vanguard_core::events::SimEvent;
use vanguard_core::types::{Position, ShipId};

use vanguard_npc_ai::fsm::{evaluate, NpcContext, NpcDecision};

use crate::systems::movement::steer;
use crate::systems::weapons::fire_phaser;

/// Run AI and movement for all NPCs, in ship id order.
pub fn run(
    world: &mut World,
    player: Option<(ShipId, Position)>,
    rng: &mut dyn RngCore,
    events: &mut Vec<SimEvent>,
) {
    // Collect decisions first to avoid borrow issues with hecs
    let mut decisions: Vec<(ShipId, Entity, NpcDecision)> = Vec::new();
    {
        let mut query = world.query::<(&Ship, &Position, &Helm, &Hull, &NpcBrain)>();
        for (entity, (ship, pos, helm, hull, brain)) in query.iter() {
            let ctx = NpcContext {
                faction: ship.faction,
                behavior: brain.behavior,
                position: *pos,
                heading: helm.heading,
                hull_fraction: hull.fraction(),
                player_position: player.map(|(_, p)| p),
                patrol_route: &brain.patrol_route,
                patrol_index: brain.patrol_index,
            };
            decisions.push((ship.id, entity, evaluate(&ctx)));
        }
    }
    decisions.sort_by_key(|(id, _, _)| *id);

    for (ship_id, entity, decision) in decisions {
        let new_lock = {
            let Ok((brain, helm, pos, subsystems, targeting)) = world.query_one_mut::<(
                &mut NpcBrain,
                &mut Helm,
                &mut Position,
                &Subsystems,
                &mut Targeting,
            )>(entity) else {
                continue;
            };

            brain.behavior = decision.behavior;
            brain.patrol_index = decision.patrol_index;

            helm.velocity = (helm.max_velocity * decision.speed_fraction).min(helm.max_velocity);
            let engines = subsystems.effectiveness(SubsystemKind::Engines);
            steer(helm, pos, decision.move_target, engines);

            // Attackers lock the player; everyone else holds no lock
            let wanted = match (decision.behavior, player) {
                (AiBehavior::Attack, Some((player_id, _))) => Some(player_id),
                _ => None,
            };
            if targeting.target != wanted {
                targeting.target = wanted;
                Some(wanted)
            } else {
                None
            }
        };

        if let Some(target) = new_lock {
            events.push(SimEvent::TargetChanged { ship_id, target });
        }

        if decision.in_firing_range && rng.gen_bool(NPC_PHASER_CHANCE) {
            if let Some((player_id, _)) = player {
                // Offline weapons or a target that slipped out of range just means no shot
                if let Err(reason) = fire_phaser(world, entity, Some(player_id), rng, events) {
                    tracing::trace!(%ship_id, %reason, "npc phaser held");
                }
            }
        }
    }
}

