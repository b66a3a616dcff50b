//! Components shared across entity categories.

use metroline_logic::geometry::Vec2;
use serde::{Deserialize, Serialize};

/// Canvas-space position of an entity.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Position {
    pub at: Vec2,
}

impl Position {
    pub fn new(at: Vec2) -> Self {
        Self { at }
    }
}

/// Active/inactive flag. The driver destroys inactive entities through
/// `SimulationEngine::sweep_inactive`; systems skip them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Active(pub bool);

impl Default for Active {
    fn default() -> Self {
        Self(true)
    }
}
