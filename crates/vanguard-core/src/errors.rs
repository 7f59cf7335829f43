//! Error types for rejected commands and bad names.

use thiserror::Error;

use crate::enums::SubsystemKind;
use crate::types::ShipId;

/// Why an operator command was rejected. Never fatal to the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("weapons offline")]
    WeaponsOffline,
    #[error("no target")]
    NoTarget,
    #[error("target out of range")]
    OutOfRange,
    #[error("weapon recharging ({0} ticks)")]
    WeaponCooling(u32),
    #[error("{0} repair crew busy ({1} ticks)")]
    RepairCooling(SubsystemKind, u32),
    #[error("{0} already at full integrity")]
    FullyRepaired(SubsystemKind),
    #[error("ship {0} not found")]
    ShipNotFound(ShipId),
    #[error("invalid target {0}")]
    InvalidTarget(ShipId),
    #[error("ship {0} is not an NPC")]
    NotAnNpc(ShipId),
    #[error("sensors offline")]
    SensorsOffline,
    #[error("player ship destroyed")]
    PlayerDestroyed,
    #[error("no player ship in the world")]
    NoPlayerShip,
}

/// Unknown subsystem or weapon name at a text boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseNameError {
    #[error("unknown subsystem '{0}'")]
    Subsystem(String),
    #[error("unknown weapon '{0}'")]
    Weapon(String),
}
