//! Core types and definitions for the VANGUARD tactical simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, errors, snapshots, events, and constants.
//! It has no dependency on the ECS runtime or any frontend.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod errors;
pub mod events;
pub mod roster;
pub mod state;
pub mod types;
