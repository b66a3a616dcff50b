//! Minimum-spacing checks for random station placement.
//!
//! The retry loop itself lives with the engine's setup code (it needs an
//! RNG); this module keeps the pure predicates so they can be tested
//! without one.

use crate::geometry::Vec2;

/// Rectangle a station may be placed in.
#[derive(Debug, Clone, Copy)]
pub struct PlacementBounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl PlacementBounds {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Canvas-sized bounds with the side margins and top reserve applied.
    pub fn for_canvas(width: f32, height: f32, margin: f32, top_margin: f32) -> Self {
        Self {
            min: Vec2::new(margin, top_margin),
            max: Vec2::new(width - margin, height - margin),
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }
}

/// True when `candidate` keeps at least `min_spacing` distance from every
/// already-placed position.
pub fn is_clear(existing: &[Vec2], candidate: Vec2, min_spacing: f32) -> bool {
    let spacing_squared = min_spacing * min_spacing;
    existing
        .iter()
        .all(|placed| placed.distance_squared(&candidate) >= spacing_squared)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_field_is_clear() {
        assert!(is_clear(&[], Vec2::new(10.0, 10.0), 100.0));
    }

    #[test]
    fn test_too_close_rejected() {
        let existing = vec![Vec2::new(0.0, 0.0)];
        assert!(!is_clear(&existing, Vec2::new(50.0, 0.0), 100.0));
    }

    #[test]
    fn test_exactly_at_spacing_is_clear() {
        let existing = vec![Vec2::new(0.0, 0.0)];
        assert!(is_clear(&existing, Vec2::new(100.0, 0.0), 100.0));
    }

    #[test]
    fn test_any_collision_rejects() {
        let existing = vec![Vec2::new(0.0, 0.0), Vec2::new(300.0, 0.0)];
        assert!(!is_clear(&existing, Vec2::new(310.0, 0.0), 100.0));
        assert!(is_clear(&existing, Vec2::new(150.0, 200.0), 100.0));
    }

    #[test]
    fn test_canvas_bounds() {
        let bounds = PlacementBounds::for_canvas(800.0, 600.0, 50.0, 150.0);
        assert!(bounds.contains(Vec2::new(400.0, 300.0)));
        assert!(bounds.contains(Vec2::new(50.0, 150.0)));
        assert!(!bounds.contains(Vec2::new(25.0, 300.0)));
        assert!(!bounds.contains(Vec2::new(400.0, 100.0)));
        assert!(!bounds.contains(Vec2::new(400.0, 575.0)));
    }
}
