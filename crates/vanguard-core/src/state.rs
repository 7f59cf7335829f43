//! World snapshot: the complete read-only state handed to renderers and UI panels.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::SimEvent;
use crate::types::{Position, ShipId, SimTime};

/// Complete visible world state, rebuilt once per clock frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub time: SimTime,
    pub alert: AlertLevel,
    pub paused: bool,
    pub waypoint: Option<Position>,
    /// Ordered by ship id.
    pub ships: Vec<ShipView>,
    pub torpedoes: Vec<TorpedoView>,
    pub beams: Vec<BeamView>,
    pub helm: Option<HelmView>,
    /// Events published since the previous snapshot.
    pub events: Vec<SimEvent>,
}

/// A ship as an operator sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipView {
    pub id: ShipId,
    /// True name. Operators should show `display_name`.
    pub name: String,
    /// True name if scanned (or the player's own ship), otherwise a contact label.
    pub display_name: String,
    pub class: String,
    pub faction: Faction,
    pub is_player: bool,
    pub position: Position,
    pub heading: f64,
    pub velocity: f64,
    /// Distance actually covered per tick after engine effectiveness.
    pub effective_velocity: f64,
    pub max_velocity: f64,
    pub hull: f64,
    pub max_hull: f64,
    pub shields: f64,
    pub max_shields: f64,
    pub subsystems: Vec<SubsystemView>,
    pub behavior: Option<AiBehavior>,
    pub target: Option<ShipId>,
    pub scanned: bool,
    pub destroyed: bool,
    pub collision_radius: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubsystemView {
    pub system: SubsystemKind,
    pub hp: f64,
    pub power: f64,
    pub effectiveness: f64,
    pub repair_cooldown: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TorpedoView {
    pub id: u32,
    pub position: Position,
    pub heading: f64,
    pub owner: ShipId,
    pub target: Option<ShipId>,
    pub lifetime_ticks: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeamView {
    pub owner: ShipId,
    pub origin: Position,
    pub target: Position,
    pub lifetime_ticks: u32,
}

/// Player-station readouts derived from the world.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HelmView {
    pub waypoint_distance: Option<f64>,
    /// Ticks to waypoint at the current effective velocity.
    pub waypoint_eta: Option<f64>,
    pub total_power: f64,
    pub power_over_budget: bool,
    pub phaser_cooldown: u32,
    pub torpedo_cooldown: u32,
}
