//! Operator commands sent from UI collaborators to the simulation.
//!
//! Each command is applied synchronously and returns success or a
//! `CommandError`; none of them can stall a tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::roster::ShipSpec;
use crate::types::ShipId;

/// All possible operator actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Tactical ---
    /// Fire a weapon at `target`, or at the locked target when `None`.
    FireWeapon {
        weapon: WeaponKind,
        #[serde(default)]
        target: Option<ShipId>,
    },
    /// Lock or release the engagement target.
    SetTarget { target: Option<ShipId> },

    // --- Helm ---
    SetThrottle { percent: f64 },
    SetHeading { degrees: f64 },
    Turn { delta: f64 },
    SetWaypoint { x: f64, y: f64 },
    ClearWaypoint,

    // --- Engineering ---
    SetPower { system: SubsystemKind, value: f64 },
    Repair { system: SubsystemKind },

    // --- Bridge ---
    SetAlertLevel { level: AlertLevel },
    Scan { ship_id: ShipId },
    Hail { ship_id: ShipId },

    // --- Scenario ---
    SpawnShip { spec: ShipSpec },
    RemoveShip { ship_id: ShipId },
}
