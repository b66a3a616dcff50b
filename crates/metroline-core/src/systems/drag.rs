//! Station drag interaction, arbitrated to a single owner.

use hecs::{Entity, World};
use metroline_logic::graph::StationGraph;

use crate::arbiter::DragArbiter;
use crate::components::{Active, Draggable, Station};
use crate::pointer::PointerState;

/// Resolve pointer dragging for stations, visited in insertion order.
///
/// A drag starts only when the arbiter slot is free and the pointer is
/// within the station's interaction radius; it moves the station's graph
/// position while held and releases the slot when the button goes up.
pub fn drag_system(
    world: &mut World,
    graph: &mut StationGraph,
    arbiter: &mut DragArbiter,
    stations: &[Entity],
    pointer: &PointerState,
) {
    let at = pointer.at();

    for &entity in stations {
        let (id, radius, grip) = {
            let mut query = match world.query_one::<(&Station, &Draggable, &Active)>(entity) {
                Ok(query) => query,
                Err(_) => continue,
            };
            match query.get() {
                Some((station, drag, active)) if active.0 => (station.id, drag.radius, drag.grip),
                _ => continue,
            }
        };

        let new_grip = if pointer.held {
            let mut grip = grip;

            // Start: free slot and pointer within the interaction radius.
            if grip.is_none()
                && !arbiter.is_claimed()
                && graph.position(id).distance_squared(&at) < radius * radius
                && arbiter.try_claim(entity)
            {
                grip = Some(at - graph.position(id));
                log::debug!("drag start on {}", graph.name(id));
            }

            // Continue: only the slot owner moves its station.
            if let Some(offset) = grip {
                if arbiter.owner() == Some(entity) {
                    graph.set_position(id, at - offset);
                }
            }
            grip
        } else {
            // Release: give the slot back when the button goes up.
            if grip.is_some() && arbiter.release(entity) {
                log::debug!("drag release on {}", graph.name(id));
            }
            None
        };

        if new_grip != grip {
            if let Ok(mut drag) = world.get::<&mut Draggable>(entity) {
                drag.grip = new_grip;
            }
        }
    }
}
