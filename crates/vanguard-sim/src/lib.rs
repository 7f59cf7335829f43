//! Simulation engine for VANGUARD.
//!
//! Owns the hecs ECS world, applies operator commands, runs systems
//! in a fixed order each tick, and publishes events to subscribers.

pub mod clock;
pub mod engine;
pub mod event_bus;
pub mod scenario;
pub mod systems;
pub mod world_setup;

pub use clock::SimClock;
pub use engine::{SimConfig, SimulationEngine};
pub use event_bus::EventBus;
pub use scenario::Scenario;
pub use vanguard_core as core;
