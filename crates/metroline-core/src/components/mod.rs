//! Component definitions for the ECS simulation.
//!
//! Components are pure data structs attached to entities.
//! They have no behavior beyond invariant-preserving mutators - the rest
//! lives in systems.

mod common;
mod transit;
mod ui;

pub use common::*;
pub use transit::*;
pub use ui::*;
