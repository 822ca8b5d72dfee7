//! Engine wiring: configuration, timing, events and the composition root.

#![allow(unused_imports)]

pub mod config;
pub mod constants;
pub mod engine;
pub mod events;
pub mod scheduler;

pub use config::*;
pub use constants::*;
pub use engine::*;
pub use events::*;
pub use scheduler::*;
