//! Phaser beam decay. Beams are never collision-checked after firing.

use hecs::{Entity, World};

use vanguard_core::components::Beam;

pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();
    for (entity, beam) in world.query_mut::<&mut Beam>() {
        beam.lifetime_ticks = beam.lifetime_ticks.saturating_sub(1);
        if beam.lifetime_ticks == 0 {
            despawn_buffer.push(entity);
        }
    }
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
