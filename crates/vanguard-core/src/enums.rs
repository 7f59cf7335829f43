//! Enumeration types used throughout the simulation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ParseNameError;

/// Allegiance tag driving AI behavior and damage-targeting rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Faction {
    Friendly,
    #[default]
    Neutral,
    Hostile,
}

/// NPC behavior state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiBehavior {
    #[default]
    Patrol,
    Approach,
    Attack,
    Flee,
}

/// Ship-wide alert condition. Ordered by severity.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    #[default]
    Normal,
    Yellow,
    Red,
}

/// The four powered subsystems every ship carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubsystemKind {
    Engines,
    Weapons,
    Shields,
    Sensors,
}

impl SubsystemKind {
    pub const ALL: [SubsystemKind; 4] = [
        SubsystemKind::Engines,
        SubsystemKind::Weapons,
        SubsystemKind::Shields,
        SubsystemKind::Sensors,
    ];

    /// Slot in the fixed subsystem array.
    pub fn index(self) -> usize {
        match self {
            SubsystemKind::Engines => 0,
            SubsystemKind::Weapons => 1,
            SubsystemKind::Shields => 2,
            SubsystemKind::Sensors => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SubsystemKind::Engines => "engines",
            SubsystemKind::Weapons => "weapons",
            SubsystemKind::Shields => "shields",
            SubsystemKind::Sensors => "sensors",
        }
    }
}

impl fmt::Display for SubsystemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SubsystemKind {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SubsystemKind::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseNameError::Subsystem(s.to_string()))
    }
}

/// Player-selectable weapon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeaponKind {
    /// Instant-hit energy beam.
    Phaser,
    /// Unguided projectile resolved on collision.
    Torpedo,
}

impl fmt::Display for WeaponKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeaponKind::Phaser => f.write_str("phaser"),
            WeaponKind::Torpedo => f.write_str("torpedo"),
        }
    }
}

impl FromStr for WeaponKind {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "phaser" | "phasers" => Ok(WeaponKind::Phaser),
            "torpedo" | "torpedoes" => Ok(WeaponKind::Torpedo),
            _ => Err(ParseNameError::Weapon(s.to_string())),
        }
    }
}
