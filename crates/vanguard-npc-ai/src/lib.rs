//! NPC behavior for VANGUARD.
//!
//! Implements the per-faction decision state machine and the
//! behavior profiles that map each state to a speed and fire posture.

pub mod fsm;
pub mod profiles;

pub use vanguard_core as core;

#[cfg(test)]
mod tests;
