//! Scenario definitions: the initial roster and bridge state for a session.
//!
//! Scenarios are plain JSON. A built-in skirmish is available for the
//! headless runner and tests.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use vanguard_core::enums::{AlertLevel, Faction};
use vanguard_core::roster::ShipSpec;
use vanguard_core::types::Position;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse scenario: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Everything needed to populate a fresh world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub player: ShipSpec,
    #[serde(default)]
    pub npcs: Vec<ShipSpec>,
    #[serde(default)]
    pub waypoint: Option<Position>,
    #[serde(default)]
    pub alert: AlertLevel,
}

impl Scenario {
    pub fn from_json(json: &str) -> Result<Self, ScenarioError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Built-in "Border Skirmish": one escort, one freighter, two raiders.
    pub fn skirmish() -> Self {
        let player = ShipSpec {
            name: "Vanguard".into(),
            class: "cruiser".into(),
            faction: Faction::Friendly,
            max_velocity: 6.0,
            turn_rate: 4.0,
            max_hull: 150.0,
            max_shields: 120.0,
            scanned: true,
            ..Default::default()
        };

        let escort = ShipSpec::new("Resolute", Faction::Friendly, Position::new(-300.0, 200.0))
            .with_class("frigate")
            .with_patrol(vec![
                Position::new(-300.0, 200.0),
                Position::new(-300.0, -200.0),
            ]);

        let freighter = ShipSpec::new("Meridian Trader", Faction::Neutral, Position::new(900.0, -600.0))
            .with_class("freighter")
            .with_patrol(vec![
                Position::new(900.0, -600.0),
                Position::new(-900.0, -600.0),
            ]);

        let raider_a = ShipSpec::new("Blackfin", Faction::Hostile, Position::new(2200.0, 400.0))
            .with_class("raider")
            .with_patrol(vec![
                Position::new(2200.0, 400.0),
                Position::new(1800.0, 1200.0),
                Position::new(2600.0, 1000.0),
            ]);

        let raider_b = ShipSpec::new("Carrion", Faction::Hostile, Position::new(-1800.0, 1600.0))
            .with_class("raider");

        Self {
            name: "Border Skirmish".into(),
            player,
            npcs: vec![escort, freighter, raider_a, raider_b],
            waypoint: None,
            alert: AlertLevel::Normal,
        }
    }
}
