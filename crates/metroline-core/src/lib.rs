//! Metroline Core - real-time transit simulation engine
//!
//! An ECS-based simulation of a small metro network: stations on a directed
//! graph, vehicles interpolating along its edges, and riders that board and
//! alight by destination.
//!
//! # Architecture
//!
//! The simulation uses an Entity Component System (ECS) via `hecs`:
//! - **Entities**: stations, vehicles, riders, UI widgets
//! - **Components**: pure data attached to entities (Position, Route, Rider, ...)
//! - **Systems**: logic that queries and updates components
//!
//! There is no global state: a [`engine::SimulationEngine`] is constructed
//! once and passed to every call. The engine is headless: a driver owns the
//! window and frame loop, calls [`engine::SimulationEngine::update`] once per
//! frame with elapsed milliseconds and pointer state, renders from
//! [`engine::SimulationEngine::scene`], and sweeps inactive entities.
//!
//! # Example
//!
//! ```rust,no_run
//! use metroline_core::prelude::*;
//! use metroline_core::generation;
//! use metroline_core::network::NetworkConfig;
//!
//! let mut engine = SimulationEngine::new();
//! let config = NetworkConfig::load_or_empty("assets/network.json");
//! generation::default_setup(&mut engine, &config, &mut rand::thread_rng());
//! engine.start_score_decay();
//!
//! // Driver frame loop
//! loop {
//!     engine.update(16.0, &PointerState::default());
//!     let _scene = engine.scene();
//!     engine.sweep_inactive();
//! }
//! ```

pub mod arbiter;
pub mod components;
pub mod decay;
pub mod engine;
pub mod generation;
pub mod network;
pub mod pointer;
pub mod scene;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::engine::SimulationEngine;
    pub use crate::pointer::PointerState;
}
