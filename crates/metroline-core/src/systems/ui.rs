//! UI widgets: hover tracking and press-edge action firing.

use hecs::World;

use crate::components::{Active, Button, ButtonAction, Position};
use crate::pointer::PointerState;

/// Update widget hover state and fire actions on the just-pressed edge.
pub fn ui_system(world: &mut World, pointer: &PointerState) -> Vec<ButtonAction> {
    let mut fired = Vec::new();

    for (_, (button, pos, active)) in world.query::<(&mut Button, &Position, &Active)>().iter() {
        if !active.0 {
            continue;
        }

        button.hovered = button.contains(pos.at.x, pos.at.y, pointer.x, pointer.y);
        if button.hovered && pointer.pressed {
            fired.push(button.action);
        }
    }

    fired
}

#[cfg(test)]
mod tests {
    use super::*;
    use metroline_logic::geometry::Vec2;

    fn world_with_button() -> World {
        let mut world = World::new();
        world.spawn((
            Button::new(120.0, 40.0, "Simulate", ButtonAction::StartSimulation),
            Position::new(Vec2::new(700.0, 560.0)),
            Active(true),
        ));
        world
    }

    #[test]
    fn test_press_inside_fires_once() {
        let mut world = world_with_button();

        let fired = ui_system(&mut world, &PointerState::held_at(700.0, 560.0, true));
        assert_eq!(fired, vec![ButtonAction::StartSimulation]);

        // Still held, but no longer the press edge: nothing fires.
        let fired = ui_system(&mut world, &PointerState::held_at(700.0, 560.0, false));
        assert!(fired.is_empty());
    }

    #[test]
    fn test_press_outside_does_nothing() {
        let mut world = world_with_button();
        let fired = ui_system(&mut world, &PointerState::held_at(100.0, 100.0, true));
        assert!(fired.is_empty());
    }

    #[test]
    fn test_hover_tracked_without_press() {
        let mut world = world_with_button();
        ui_system(&mut world, &PointerState::hover_at(700.0, 560.0));
        let (_, button) = world.query::<&Button>().iter().next().map(|(e, b)| (e, b.clone())).unwrap();
        assert!(button.hovered);

        ui_system(&mut world, &PointerState::hover_at(0.0, 0.0));
        let (_, button) = world.query::<&Button>().iter().next().map(|(e, b)| (e, b.clone())).unwrap();
        assert!(!button.hovered);
    }
}
