//! Driver-facing scene snapshot.
//!
//! The engine is headless: rendering lives with the driver, which captures
//! a `Scene` each frame and draws it however it likes. Only active entities
//! appear in the snapshot.

use metroline_logic::geometry::Vec2;
use metroline_logic::graph::StationId;

use crate::components::{Active, Button, Draggable, Position, Rider, RiderState, Route, Station, Vehicle, Waiting};
use crate::engine::SimulationEngine;

#[derive(Debug, Clone)]
pub struct StationView {
    pub id: StationId,
    pub name: String,
    pub at: Vec2,
    pub radius: f32,
    /// Outgoing connections, for drawing the network lines.
    pub links: Vec<StationId>,
    pub waiting: usize,
    pub dragging: bool,
}

#[derive(Debug, Clone)]
pub struct VehicleView {
    pub at: Vec2,
    /// Heading toward the next station, radians; 0 while docked.
    pub heading: f32,
    pub onboard: usize,
    pub capacity: usize,
    pub in_transit: bool,
}

#[derive(Debug, Clone)]
pub struct RiderView {
    pub at: Vec2,
    pub state: RiderState,
}

#[derive(Debug, Clone)]
pub struct ButtonView {
    pub at: Vec2,
    pub width: f32,
    pub height: f32,
    pub label: String,
    pub hovered: bool,
}

/// Everything the driver needs to draw one frame, in draw order:
/// stations, vehicles, riders, UI.
#[derive(Debug, Clone)]
pub struct Scene {
    pub stations: Vec<StationView>,
    pub vehicles: Vec<VehicleView>,
    pub riders: Vec<RiderView>,
    pub buttons: Vec<ButtonView>,
    pub score: i32,
    pub running: bool,
}

impl Scene {
    pub fn capture(engine: &SimulationEngine) -> Self {
        let world = &engine.world;
        let graph = engine.graph();

        let mut stations = Vec::new();
        for (_, (station, waiting, drag, active)) in world
            .query::<(&Station, &Waiting, &Draggable, &Active)>()
            .iter()
        {
            if !active.0 {
                continue;
            }
            stations.push(StationView {
                id: station.id,
                name: graph.name(station.id).to_string(),
                at: graph.position(station.id),
                radius: drag.radius,
                links: graph.neighbors(station.id).to_vec(),
                waiting: waiting.queue.len(),
                dragging: drag.dragging(),
            });
        }
        stations.sort_by_key(|view| view.id);

        let mut vehicles = Vec::new();
        for (_, (vehicle, route, pos, active)) in
            world.query::<(&Vehicle, &Route, &Position, &Active)>().iter()
        {
            if !active.0 {
                continue;
            }
            let heading = route
                .next
                .map(|next| graph.position(route.current).angle_to(&graph.position(next)))
                .unwrap_or(0.0);
            vehicles.push(VehicleView {
                at: pos.at,
                heading,
                onboard: vehicle.onboard.len(),
                capacity: vehicle.capacity,
                in_transit: route.in_transit(),
            });
        }

        let mut riders = Vec::new();
        for (_, (rider, pos, active)) in world.query::<(&Rider, &Position, &Active)>().iter() {
            if !active.0 {
                continue;
            }
            riders.push(RiderView {
                at: pos.at,
                state: rider.state(),
            });
        }

        let mut buttons = Vec::new();
        for (_, (button, pos, active)) in world.query::<(&Button, &Position, &Active)>().iter() {
            if !active.0 {
                continue;
            }
            buttons.push(ButtonView {
                at: pos.at,
                width: button.width,
                height: button.height,
                label: button.label.clone(),
                hovered: button.hovered,
            });
        }

        Self {
            stations,
            vehicles,
            riders,
            buttons,
            score: engine.score(),
            running: engine.is_running(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ButtonAction;
    use crate::pointer::PointerState;

    #[test]
    fn test_scene_reflects_world() {
        let mut engine = SimulationEngine::new();
        engine.add_station("A", Vec2::new(10.0, 20.0)).unwrap();
        engine.add_station("B", Vec2::new(110.0, 20.0)).unwrap();
        engine.connect("A", "B").unwrap();
        engine.spawn_vehicle(0);
        engine.spawn_rider(0, 1);
        engine.add_button(
            Vec2::new(700.0, 560.0),
            120.0,
            40.0,
            "Simulate",
            ButtonAction::StartSimulation,
        );

        let scene = engine.scene();
        assert_eq!(scene.stations.len(), 2);
        assert_eq!(scene.stations[0].name, "A");
        assert_eq!(scene.stations[0].links, vec![1]);
        assert_eq!(scene.stations[0].waiting, 1);
        assert_eq!(scene.vehicles.len(), 1);
        assert!(scene.vehicles[0].in_transit);
        assert_eq!(scene.riders.len(), 1);
        assert_eq!(scene.buttons.len(), 1);
        assert!(!scene.running);
        assert_eq!(scene.score, 0);
    }

    #[test]
    fn test_inactive_entities_excluded() {
        let mut engine = SimulationEngine::new();
        engine.add_station("A", Vec2::ZERO).unwrap();
        let rider = engine.spawn_rider(0, 0);
        engine.world.get::<&mut Active>(rider).unwrap().0 = false;

        let scene = engine.scene();
        assert!(scene.riders.is_empty());
    }

    #[test]
    fn test_vehicle_position_interpolates_in_scene() {
        let mut engine = SimulationEngine::new();
        engine.add_station("A", Vec2::new(0.0, 0.0)).unwrap();
        engine.add_station("B", Vec2::new(100.0, 0.0)).unwrap();
        engine.connect("A", "B").unwrap();
        engine.spawn_vehicle(0);
        engine.set_running(true);

        // 1000 ms at 0.0005/ms = halfway along the edge
        engine.update(1000.0, &PointerState::default());
        let scene = engine.scene();
        assert!((scene.vehicles[0].at.x - 50.0).abs() < 1.0);
        assert!((scene.vehicles[0].heading).abs() < 0.001);
    }
}
