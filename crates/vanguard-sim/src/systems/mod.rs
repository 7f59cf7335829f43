//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are free functions over the world, run by the engine in a fixed
//! order. Anything they observe goes into the caller's event buffer. The
//! hail schedule is the one system that keeps state between ticks.

pub mod alert;
pub mod beams;
pub mod damage;
pub mod hails;
pub mod movement;
pub mod npc_ai;
pub mod projectiles;
pub mod repair;
pub mod sensors;
pub mod shields;
pub mod snapshot;
pub mod weapons;
