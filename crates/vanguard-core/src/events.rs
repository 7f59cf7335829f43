//! Events published by the simulation for audio, UI and other observers.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{Position, ShipId};

/// Discriminant used to subscribe to one kind of event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    ShipAdded,
    ShipDestroyed,
    TargetChanged,
    WeaponFired,
    ShipDamaged,
    PlayerDestroyed,
    AlertChanged,
    WaypointSet,
    WaypointCleared,
    WaypointReached,
    PowerChanged,
    RepairStarted,
    ShipScanned,
    HailResponse,
}

/// A subsystem knocked down by a cascading hull hit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubsystemHit {
    pub system: SubsystemKind,
    pub amount: f64,
    pub remaining_hp: f64,
}

/// Something observable happened in the world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    ShipAdded {
        ship_id: ShipId,
        name: String,
        faction: Faction,
    },
    /// An NPC reached zero hull and was removed.
    ShipDestroyed { ship_id: ShipId, name: String },
    /// `ship_id` changed its engagement target.
    TargetChanged {
        ship_id: ShipId,
        target: Option<ShipId>,
    },
    WeaponFired {
        shooter: ShipId,
        weapon: WeaponKind,
        target: Option<ShipId>,
    },
    ShipDamaged {
        ship_id: ShipId,
        shield_absorbed: f64,
        hull_damage: f64,
        hull_remaining: f64,
        subsystem_hit: Option<SubsystemHit>,
    },
    /// Terminal: the player hull reached zero. Fires once per session.
    PlayerDestroyed { ship_id: ShipId },
    AlertChanged { from: AlertLevel, to: AlertLevel },
    WaypointSet { position: Position },
    WaypointCleared,
    /// The player came within arrival range; published before `WaypointCleared`.
    WaypointReached { position: Position },
    PowerChanged {
        ship_id: ShipId,
        system: SubsystemKind,
        power: f64,
        total_power: f64,
    },
    RepairStarted {
        system: SubsystemKind,
        hp: f64,
        cooldown_ticks: u32,
    },
    ShipScanned { ship_id: ShipId, name: String },
    HailResponse { ship_id: ShipId, message: String },
}

impl SimEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            SimEvent::ShipAdded { .. } => EventKind::ShipAdded,
            SimEvent::ShipDestroyed { .. } => EventKind::ShipDestroyed,
            SimEvent::TargetChanged { .. } => EventKind::TargetChanged,
            SimEvent::WeaponFired { .. } => EventKind::WeaponFired,
            SimEvent::ShipDamaged { .. } => EventKind::ShipDamaged,
            SimEvent::PlayerDestroyed { .. } => EventKind::PlayerDestroyed,
            SimEvent::AlertChanged { .. } => EventKind::AlertChanged,
            SimEvent::WaypointSet { .. } => EventKind::WaypointSet,
            SimEvent::WaypointCleared => EventKind::WaypointCleared,
            SimEvent::WaypointReached { .. } => EventKind::WaypointReached,
            SimEvent::PowerChanged { .. } => EventKind::PowerChanged,
            SimEvent::RepairStarted { .. } => EventKind::RepairStarted,
            SimEvent::ShipScanned { .. } => EventKind::ShipScanned,
            SimEvent::HailResponse { .. } => EventKind::HailResponse,
        }
    }
}
