//! Gold balance and the damage upgrades it buys.

#![allow(unused_imports)]

pub mod ledger;
pub mod upgrade;

pub use ledger::*;
pub use upgrade::*;
