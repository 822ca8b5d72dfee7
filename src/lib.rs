//! Slime Clicker - combat/economy engine for an idle clicker.
//!
//! A player clicks a spawned slime, the slime dies and drops gold, gold buys
//! damage upgrades, and every tenth kill brings out a boss whose death ends
//! the session. This crate holds the rules; rendering, audio and scene
//! changes are reached through the traits in [`collaborators`].

pub mod collaborators;
pub mod combat;
pub mod core;
pub mod economy;
pub mod effects;
pub mod simulator;
pub mod utils;

pub use crate::core::config::EngineConfig;
pub use crate::core::constants::TICK_INTERVAL_MS;
pub use crate::core::engine::ClickerEngine;
pub use crate::core::events::EngineEvent;
