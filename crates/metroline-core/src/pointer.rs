//! Per-frame pointer-device state supplied by the driver.

use metroline_logic::geometry::Vec2;

/// Pointer snapshot for one frame, in canvas coordinates.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
    /// Button is down this frame.
    pub held: bool,
    /// Button went down this frame (edge, not level).
    pub pressed: bool,
}

impl PointerState {
    pub fn at(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Button held at a position; `pressed` marks the first frame of the hold.
    pub fn held_at(x: f32, y: f32, pressed: bool) -> Self {
        Self {
            x,
            y,
            held: true,
            pressed,
        }
    }

    /// Button up at a position.
    pub fn hover_at(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            held: false,
            pressed: false,
        }
    }
}
