//! ECS components for hecs entities.
//!
//! Components are plain data. The only methods are read accessors that
//! derive a value from the component's own fields; game logic lives in systems.

use serde::{Deserialize, Serialize};

use crate::constants::{SUBSYSTEM_MAX_HP, SUBSYSTEM_MAX_POWER};
use crate::enums::*;
use crate::types::{Position, ShipId};

/// Identity and display attributes shared by every ship.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub id: ShipId,
    /// True name, revealed to operators once scanned.
    pub name: String,
    /// Hull class tag (e.g. "cruiser").
    pub class: String,
    pub faction: Faction,
    pub scanned: bool,
    pub collision_radius: f64,
}

/// Marker for the single operator-controlled ship.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PlayerShip {
    /// Set once when hull first reaches zero. The entity persists.
    pub destroyed: bool,
}

/// Heading and speed state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Helm {
    /// Degrees in [0, 360), 0 = +x axis.
    pub heading: f64,
    /// Nominal speed (units/tick) before engine effectiveness.
    pub velocity: f64,
    pub max_velocity: f64,
    /// Max degrees per tick.
    pub turn_rate: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Hull {
    pub current: f64,
    pub max: f64,
}

impl Hull {
    pub fn fraction(&self) -> f64 {
        if self.max > 0.0 {
            self.current / self.max
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Shields {
    pub strength: f64,
    pub max: f64,
}

/// One powered subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Subsystem {
    /// 0..=100.
    pub hp: f64,
    /// Operator-assigned, 0..=100.
    pub power: f64,
}

impl Subsystem {
    pub fn hp_fraction(&self) -> f64 {
        self.hp / SUBSYSTEM_MAX_HP
    }

    pub fn power_fraction(&self) -> f64 {
        self.power / SUBSYSTEM_MAX_POWER
    }

    /// (hp/100) × (power/100).
    pub fn effectiveness(&self) -> f64 {
        self.hp_fraction() * self.power_fraction()
    }

    pub fn online(&self) -> bool {
        self.hp > 0.0 && self.power > 0.0
    }
}

/// The four subsystems, indexed by `SubsystemKind::index`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Subsystems {
    pub systems: [Subsystem; 4],
}

impl Subsystems {
    /// All subsystems at full hp with the given per-system power.
    pub fn uniform(power: f64) -> Self {
        Self {
            systems: [Subsystem {
                hp: SUBSYSTEM_MAX_HP,
                power,
            }; 4],
        }
    }

    pub fn get(&self, kind: SubsystemKind) -> &Subsystem {
        &self.systems[kind.index()]
    }

    pub fn get_mut(&mut self, kind: SubsystemKind) -> &mut Subsystem {
        &mut self.systems[kind.index()]
    }

    pub fn effectiveness(&self, kind: SubsystemKind) -> f64 {
        self.get(kind).effectiveness()
    }

    /// Sum of assigned power across all four subsystems.
    pub fn total_power(&self) -> f64 {
        self.systems.iter().map(|s| s.power).sum()
    }
}

/// NPC decision state and patrol memory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NpcBrain {
    pub behavior: AiBehavior,
    /// Cyclic route; empty means the ship holds position when patrolling.
    pub patrol_route: Vec<Position>,
    pub patrol_index: usize,
}

/// Current engagement target.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Targeting {
    pub target: Option<ShipId>,
}

/// Player weapon recharge counters, in ticks.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct WeaponCooldowns {
    pub phaser: u32,
    pub torpedo: u32,
}

impl WeaponCooldowns {
    pub fn remaining(&self, weapon: WeaponKind) -> u32 {
        match weapon {
            WeaponKind::Phaser => self.phaser,
            WeaponKind::Torpedo => self.torpedo,
        }
    }
}

/// Per-subsystem repair crew turnaround, in ticks.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RepairBay {
    pub cooldowns: [u32; 4],
}

/// A torpedo in flight. Paired with a `Position` component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Torpedo {
    pub id: u32,
    pub heading: f64,
    pub velocity: f64,
    pub damage: f64,
    pub owner: ShipId,
    /// Whether the player launched it; decides which ships it can hit.
    pub from_player: bool,
    /// Display only. Torpedoes do not home.
    pub target: Option<ShipId>,
    pub lifetime_ticks: u32,
    pub collision_radius: f64,
}

/// Visual record of a resolved phaser shot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Beam {
    pub owner: ShipId,
    pub origin: Position,
    pub target: Position,
    pub lifetime_ticks: u32,
}
