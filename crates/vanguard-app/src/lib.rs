//! VANGUARD headless bridge.
//!
//! Runs the simulation on its own thread and exposes it to a text console:
//! commands go in over a channel, snapshots and events come back out.

pub mod console;
pub mod game_loop;
pub mod state;

pub use vanguard_core as core;
