//! Behavior-specific movement and fire parameters.

use vanguard_core::constants::*;
use vanguard_core::enums::AiBehavior;

/// Movement and fire posture for one behavior state.
pub struct BehaviorProfile {
    /// Fraction of max velocity while in this state.
    pub speed_fraction: f64,
    /// Whether the ship may open fire on the player.
    pub weapons_free: bool,
}

/// Get the profile for a given behavior.
pub fn get_profile(behavior: AiBehavior) -> BehaviorProfile {
    match behavior {
        AiBehavior::Patrol => BehaviorProfile {
            speed_fraction: PATROL_SPEED_FRACTION,
            weapons_free: false,
        },
        AiBehavior::Approach => BehaviorProfile {
            speed_fraction: APPROACH_SPEED_FRACTION,
            weapons_free: false,
        },
        AiBehavior::Attack => BehaviorProfile {
            speed_fraction: ATTACK_SPEED_FRACTION,
            weapons_free: true,
        },
        AiBehavior::Flee => BehaviorProfile {
            speed_fraction: FLEE_SPEED_FRACTION,
            weapons_free: false,
        },
    }
}
