//! Transit components: stations, vehicles, and riders.

use std::collections::VecDeque;

use hecs::Entity;
use metroline_logic::constants::{STATION_RADIUS, VEHICLE_CAPACITY, VEHICLE_SPEED};
use metroline_logic::geometry::Vec2;
use metroline_logic::graph::StationId;
use serde::{Deserialize, Serialize};

/// Ties a station entity to its record in the graph, which owns the
/// station's name, position, and adjacency.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Station {
    pub id: StationId,
}

/// FIFO queue of riders waiting on a station's platform.
#[derive(Debug, Clone, Default)]
pub struct Waiting {
    pub queue: VecDeque<Entity>,
}

impl Waiting {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Pointer-drag interaction state for a station.
#[derive(Debug, Clone, Copy)]
pub struct Draggable {
    /// Interaction radius around the station center.
    pub radius: f32,
    /// Offset from pointer to station center while a drag is in progress.
    pub grip: Option<Vec2>,
}

impl Draggable {
    pub fn new(radius: f32) -> Self {
        Self { radius, grip: None }
    }

    pub fn dragging(&self) -> bool {
        self.grip.is_some()
    }
}

impl Default for Draggable {
    fn default() -> Self {
        Self::new(STATION_RADIUS)
    }
}

/// Vehicle body: seating and onboard membership.
/// `onboard.len() <= capacity` is maintained by the boarding loop.
#[derive(Debug, Clone)]
pub struct Vehicle {
    pub capacity: usize,
    /// Edge progress gained per elapsed millisecond.
    pub speed: f32,
    pub onboard: Vec<Entity>,
}

impl Vehicle {
    pub fn new() -> Self {
        Self::with_capacity(VEHICLE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            speed: VEHICLE_SPEED,
            onboard: Vec::with_capacity(capacity),
        }
    }

    pub fn free_seats(&self) -> usize {
        self.capacity.saturating_sub(self.onboard.len())
    }
}

impl Default for Vehicle {
    fn default() -> Self {
        Self::new()
    }
}

/// Edge-traversal state of a vehicle. `next == None` means docked; the
/// vehicle retries pick-next on later running ticks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Route {
    pub current: StationId,
    pub next: Option<StationId>,
    pub previous: Option<StationId>,
    /// Progress fraction along the current edge, in `[0, 1]`.
    pub progress: f32,
}

impl Route {
    pub fn docked_at(station: StationId) -> Self {
        Self {
            current: station,
            next: None,
            previous: None,
            progress: 0.0,
        }
    }

    pub fn in_transit(&self) -> bool {
        self.next.is_some()
    }
}

/// Rider lifecycle states. Transitions are monotonic:
/// Waiting -> OnVehicle -> Completed, never backward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiderState {
    Waiting,
    OnVehicle,
    Completed,
}

impl RiderState {
    /// Whether `next` is a legal forward step from `self`.
    pub fn can_become(self, next: RiderState) -> bool {
        matches!(
            (self, next),
            (RiderState::Waiting, RiderState::OnVehicle)
                | (RiderState::OnVehicle, RiderState::Completed)
        )
    }
}

/// A rider with a destination fixed at creation. The state field is private
/// so every mutation goes through the monotonic transition check.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Rider {
    pub destination: StationId,
    state: RiderState,
}

impl Rider {
    pub fn waiting_for(destination: StationId) -> Self {
        Self {
            destination,
            state: RiderState::Waiting,
        }
    }

    pub fn state(&self) -> RiderState {
        self.state
    }

    /// Step to `next` if it is a legal forward transition; regressions and
    /// skips are refused.
    pub fn advance(&mut self, next: RiderState) -> bool {
        if self.state.can_become(next) {
            self.state = next;
            true
        } else {
            false
        }
    }

    pub fn board(&mut self) -> bool {
        self.advance(RiderState::OnVehicle)
    }

    pub fn complete(&mut self) -> bool {
        self.advance(RiderState::Completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Position;

    #[test]
    fn test_rider_transitions_forward() {
        let mut rider = Rider::waiting_for(3);
        assert_eq!(rider.state(), RiderState::Waiting);
        assert!(rider.board());
        assert_eq!(rider.state(), RiderState::OnVehicle);
        assert!(rider.complete());
        assert_eq!(rider.state(), RiderState::Completed);
    }

    #[test]
    fn test_rider_refuses_regression() {
        let mut rider = Rider::waiting_for(0);
        rider.board();
        rider.complete();
        assert!(!rider.advance(RiderState::Waiting));
        assert!(!rider.advance(RiderState::OnVehicle));
        assert_eq!(rider.state(), RiderState::Completed);
    }

    #[test]
    fn test_rider_refuses_skip() {
        let mut rider = Rider::waiting_for(0);
        assert!(!rider.complete());
        assert_eq!(rider.state(), RiderState::Waiting);
    }

    #[test]
    fn test_vehicle_free_seats() {
        let mut world = hecs::World::new();
        let filler = world.spawn((Position::default(),));

        let mut vehicle = Vehicle::with_capacity(2);
        assert_eq!(vehicle.free_seats(), 2);
        vehicle.onboard.push(filler);
        vehicle.onboard.push(filler);
        assert_eq!(vehicle.free_seats(), 0);
    }

    #[test]
    fn test_route_docked() {
        let route = Route::docked_at(5);
        assert!(!route.in_transit());
        assert_eq!(route.current, 5);
        assert_eq!(route.previous, None);
    }
}
