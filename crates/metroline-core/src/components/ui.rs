//! UI widget components driven by pointer state.
//!
//! Widget geometry and styling stay with the driver; the engine only owns
//! hit testing and the fired action.

/// Actions a button can fire into the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    StartSimulation,
}

/// A clickable rectangle centered on the entity's position.
#[derive(Debug, Clone)]
pub struct Button {
    pub width: f32,
    pub height: f32,
    pub label: String,
    pub action: ButtonAction,
    pub hovered: bool,
}

impl Button {
    pub fn new(width: f32, height: f32, label: impl Into<String>, action: ButtonAction) -> Self {
        Self {
            width,
            height,
            label: label.into(),
            action,
            hovered: false,
        }
    }

    /// Hit test against the button's bounds, centered on `(cx, cy)`.
    pub fn contains(&self, cx: f32, cy: f32, px: f32, py: f32) -> bool {
        px >= cx - self.width / 2.0
            && px <= cx + self.width / 2.0
            && py >= cy - self.height / 2.0
            && py <= cy + self.height / 2.0
    }
}
