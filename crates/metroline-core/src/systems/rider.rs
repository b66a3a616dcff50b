//! Rider positioning: waiting rows beside stations, seat rows on vehicles.
//!
//! Riders are passive; their lifecycle transitions are driven entirely by
//! the vehicle system. This system only keeps their canvas positions in
//! step with whatever currently holds them, so waiting riders follow a
//! dragged station and onboard riders ride along the interpolated vehicle
//! position. Completed riders keep their last position until swept.

use hecs::{Entity, World};
use metroline_logic::constants::{RIDER_RADIUS, STATION_RADIUS};
use metroline_logic::geometry::Vec2;
use metroline_logic::graph::StationGraph;

use crate::components::{Position, Station, Vehicle, Waiting};

/// Place every waiting and onboard rider for this frame.
pub fn rider_system(world: &mut World, graph: &StationGraph) {
    // Collect placements first (can't mutate while iterating)
    let mut updates: Vec<(Entity, Vec2)> = Vec::new();

    for (_, (station, waiting)) in world.query::<(&Station, &Waiting)>().iter() {
        let base = graph.position(station.id);
        for (index, &rider) in waiting.queue.iter().enumerate() {
            updates.push((rider, waiting_slot(base, index)));
        }
    }

    for (_, (vehicle, pos)) in world.query::<(&Vehicle, &Position)>().iter() {
        for (index, &rider) in vehicle.onboard.iter().enumerate() {
            updates.push((rider, seat_slot(pos.at, index)));
        }
    }

    for (rider, at) in updates {
        if let Ok(mut pos) = world.get::<&mut Position>(rider) {
            pos.at = at;
        }
    }
}

/// Platform layout: two rows above the station disk, filled left to right.
fn waiting_slot(base: Vec2, index: usize) -> Vec2 {
    let column = (index / 2) as f32;
    let row = (index % 2) as f32;
    Vec2::new(
        base.x - STATION_RADIUS + column * (RIDER_RADIUS * 2.0 + 2.0),
        base.y - STATION_RADIUS * 1.5 - row * (RIDER_RADIUS * 2.0),
    )
}

/// Seat layout: two columns of seats across the vehicle body.
fn seat_slot(base: Vec2, index: usize) -> Vec2 {
    let column = (index % 2) as f32;
    let row = (index / 2) as f32;
    Vec2::new(
        base.x - RIDER_RADIUS + column * (RIDER_RADIUS * 2.0),
        base.y - RIDER_RADIUS * 2.0 + row * (RIDER_RADIUS * 2.0),
    )
}
