//! Shield regeneration for every ship, the player included.

use hecs::World;

use vanguard_core::components::{Shields, Subsystems};
use vanguard_core::constants::SHIELD_REGEN_RATE;
use vanguard_core::enums::SubsystemKind;

pub fn run(world: &mut World) {
    for (_entity, (shields, subsystems)) in world.query_mut::<(&mut Shields, &Subsystems)>() {
        let generator = subsystems.get(SubsystemKind::Shields);
        let power = generator.power_fraction();
        let integrity = generator.hp_fraction();
        if power > 0.0 && integrity > 0.0 && shields.strength < shields.max {
            shields.strength = (shields.strength + SHIELD_REGEN_RATE * power * integrity)
                .min(shields.max);
        }
    }
}
