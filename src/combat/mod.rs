//! Combat system types and logic.

#![allow(unused_imports)]

pub mod logic;
pub mod spawn;
pub mod types;

pub use logic::*;
pub use spawn::*;
pub use types::*;
