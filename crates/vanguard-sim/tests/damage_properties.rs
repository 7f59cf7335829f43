//! Property tests for the damage pipeline and heading arithmetic.

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use vanguard_sim::core::components::{Hull, Shields, Subsystem, Subsystems};
use vanguard_sim::core::enums::SubsystemKind;
use vanguard_sim::core::types::{heading_delta, normalize_heading};
use vanguard_sim::systems::damage::resolve_damage;

fn ship_state(hull: f64, shields: f64, shield_power: f64) -> (Hull, Shields, Subsystems) {
    let mut subsystems = Subsystems::uniform(50.0);
    *subsystems.get_mut(SubsystemKind::Shields) = Subsystem {
        hp: 100.0,
        power: shield_power,
    };
    (
        Hull {
            current: hull,
            max: 100.0,
        },
        Shields {
            strength: shields,
            max: 100.0,
        },
        subsystems,
    )
}

proptest! {
    #[test]
    fn hull_and_shields_never_negative(
        hull in 0.0f64..100.0,
        shields in 0.0f64..100.0,
        power in 0.0f64..=100.0,
        raw in 0.0f64..10_000.0,
        seed in any::<u64>(),
    ) {
        let (mut h, mut s, mut subs) = ship_state(hull, shields, power);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        resolve_damage(&mut h, &mut s, &mut subs, raw, &mut rng);
        prop_assert!(h.current >= 0.0);
        prop_assert!(s.strength >= 0.0);
        for system in subs.systems.iter() {
            prop_assert!(system.hp >= 0.0);
        }
    }

    #[test]
    fn absorbed_plus_hull_damage_equals_raw(
        hull in 0.0f64..100.0,
        shields in 0.0f64..100.0,
        power in 0.0f64..=100.0,
        raw in 0.0f64..500.0,
        seed in any::<u64>(),
    ) {
        let (mut h, mut s, mut subs) = ship_state(hull, shields, power);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let report = resolve_damage(&mut h, &mut s, &mut subs, raw, &mut rng);
        prop_assert!((report.shield_absorbed + report.hull_damage - raw).abs() < 1e-9);
        prop_assert!(report.shield_absorbed <= shields + 1e-9);
        prop_assert!(report.shield_absorbed <= raw * power / 100.0 * 0.8 + 1e-9);
    }

    #[test]
    fn same_seed_same_outcome(
        raw in 0.0f64..200.0,
        seed in any::<u64>(),
    ) {
        let (mut h1, mut s1, mut subs1) = ship_state(100.0, 10.0, 50.0);
        let (mut h2, mut s2, mut subs2) = ship_state(100.0, 10.0, 50.0);
        let a = resolve_damage(&mut h1, &mut s1, &mut subs1, raw, &mut ChaCha8Rng::seed_from_u64(seed));
        let b = resolve_damage(&mut h2, &mut s2, &mut subs2, raw, &mut ChaCha8Rng::seed_from_u64(seed));
        prop_assert_eq!(a, b);
        prop_assert_eq!(subs1, subs2);
    }

    #[test]
    fn heading_always_normalized(degrees in -1e6f64..1e6) {
        let h = normalize_heading(degrees);
        prop_assert!((0.0..360.0).contains(&h), "{} -> {}", degrees, h);
    }

    #[test]
    fn heading_delta_in_half_open_range(from in 0.0f64..360.0, to in 0.0f64..360.0) {
        let d = heading_delta(from, to);
        prop_assert!(d > -180.0 && d <= 180.0, "{} -> {} gave {}", from, to, d);
        prop_assert!(heading_delta(normalize_heading(from + d), to).abs() < 1e-6);
    }
}
