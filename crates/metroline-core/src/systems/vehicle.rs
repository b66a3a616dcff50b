//! Vehicle motion: edge interpolation, arrivals, boarding and alighting.

use std::sync::atomic::{AtomicI32, Ordering};

use hecs::{Entity, World};
use metroline_logic::constants::DELIVERY_REWARD;
use metroline_logic::geometry::Vec2;
use metroline_logic::graph::{StationGraph, StationId};
use rand::Rng;

use crate::components::{Active, Position, Rider, Route, Vehicle, Waiting};

/// Pick where a vehicle heads next from `current`.
///
/// Candidates are the outgoing neighbors minus `previous`; when that leaves
/// nothing (dead end), the full neighbor set is used so the vehicle reverses
/// immediately instead of deadlocking at a degree-1 station. Returns `None`
/// only when `current` has no neighbors at all.
pub fn pick_next(
    graph: &StationGraph,
    current: StationId,
    previous: Option<StationId>,
    rng: &mut impl Rng,
) -> Option<StationId> {
    let neighbors = graph.neighbors(current);
    if neighbors.is_empty() {
        return None;
    }

    let forward: Vec<StationId> = neighbors
        .iter()
        .copied()
        .filter(|&n| Some(n) != previous)
        .collect();
    let candidates: &[StationId] = if forward.is_empty() { neighbors } else { &forward };

    Some(candidates[rng.gen_range(0..candidates.len())])
}

/// Advance every vehicle by `elapsed_ms` and handle arrivals.
///
/// The engine only calls this while the simulation-running flag is true, so
/// motion (and docked pick-next retries) stop when the simulation is paused.
pub fn vehicle_system(
    world: &mut World,
    graph: &StationGraph,
    score: &AtomicI32,
    stations: &[Entity],
    elapsed_ms: f32,
    rng: &mut impl Rng,
) {
    // Collect motion updates first (can't mutate while iterating)
    let mut moves: Vec<(Entity, f32, Vec2)> = Vec::new();
    let mut arrivals: Vec<Entity> = Vec::new();
    let mut docked: Vec<Entity> = Vec::new();

    for (entity, (vehicle, route, active)) in
        world.query::<(&Vehicle, &Route, &Active)>().iter()
    {
        if !active.0 {
            continue;
        }
        match route.next {
            None => docked.push(entity),
            Some(next) => {
                let progress = route.progress + elapsed_ms * vehicle.speed;
                if progress >= 1.0 {
                    arrivals.push(entity);
                } else {
                    // Re-read both endpoints every frame: dragging a station
                    // bends in-flight paths.
                    let at = graph
                        .position(route.current)
                        .lerp(&graph.position(next), progress);
                    moves.push((entity, progress, at));
                }
            }
        }
    }

    for (entity, progress, at) in moves {
        if let Ok(mut route) = world.get::<&mut Route>(entity) {
            route.progress = progress;
        }
        if let Ok(mut pos) = world.get::<&mut Position>(entity) {
            pos.at = at;
        }
    }

    // Docked vehicles retry pick-next, so a freshly added edge wakes them.
    for entity in docked {
        let (current, previous) = match world.get::<&Route>(entity) {
            Ok(route) => (route.current, route.previous),
            Err(_) => continue,
        };
        if let Some(next) = pick_next(graph, current, previous, rng) {
            if let Ok(mut route) = world.get::<&mut Route>(entity) {
                route.next = Some(next);
                route.progress = 0.0;
            }
        }
    }

    for entity in arrivals {
        arrive(world, graph, score, stations, entity, rng);
    }
}

/// Handle one vehicle reaching `next`: swap route pointers, let riders with
/// this destination off, admit waiting riders FIFO until the seats run out,
/// then pick the next edge. All within the same tick.
fn arrive(
    world: &mut World,
    graph: &StationGraph,
    score: &AtomicI32,
    stations: &[Entity],
    vehicle_entity: Entity,
    rng: &mut impl Rng,
) {
    // Swap pointers first; everything below sees the new current station.
    let (arrived_at, came_from) = {
        let route = match world.query_one_mut::<&mut Route>(vehicle_entity) {
            Ok(route) => route,
            Err(_) => return,
        };
        let next = match route.next {
            Some(next) => next,
            None => return,
        };
        let came_from = route.current;
        route.previous = Some(came_from);
        route.current = next;
        route.next = None;
        route.progress = 0.0;
        (next, came_from)
    };

    let (capacity, onboard) = match world.get::<&Vehicle>(vehicle_entity) {
        Ok(vehicle) => (vehicle.capacity, vehicle.onboard.clone()),
        Err(_) => return,
    };

    // Riders whose destination is this station get off.
    let mut remaining: Vec<Entity> = Vec::with_capacity(onboard.len());
    let mut delivered: Vec<Entity> = Vec::new();
    for rider_entity in onboard {
        let destination = world
            .get::<&Rider>(rider_entity)
            .map(|rider| rider.destination)
            .ok();
        if destination == Some(arrived_at) {
            delivered.push(rider_entity);
        } else {
            remaining.push(rider_entity);
        }
    }

    for &rider_entity in &delivered {
        if let Ok(mut rider) = world.get::<&mut Rider>(rider_entity) {
            rider.complete();
        }
        if let Ok(mut pos) = world.get::<&mut Position>(rider_entity) {
            pos.at = graph.position(arrived_at);
        }
        // Done riding; the driver sweeps inactive entities.
        if let Ok(mut active) = world.get::<&mut Active>(rider_entity) {
            active.0 = false;
        }
        score.fetch_add(DELIVERY_REWARD, Ordering::Relaxed);
        log::debug!("rider delivered at {}", graph.name(arrived_at));
    }

    // Waiting riders board in FIFO arrival order until capacity, regardless
    // of where the vehicle is headed (riders do not plan routes).
    let mut boarding: Vec<Entity> = Vec::new();
    if let Some(&station_entity) = stations.get(arrived_at as usize) {
        if let Ok(mut waiting) = world.get::<&mut Waiting>(station_entity) {
            while remaining.len() + boarding.len() < capacity {
                match waiting.queue.pop_front() {
                    Some(rider_entity) => boarding.push(rider_entity),
                    None => break,
                }
            }
        }
    }

    for &rider_entity in &boarding {
        if let Ok(mut rider) = world.get::<&mut Rider>(rider_entity) {
            rider.board();
        }
        log::debug!("rider boarded at {}", graph.name(arrived_at));
    }
    remaining.extend(boarding);

    if let Ok(mut vehicle) = world.get::<&mut Vehicle>(vehicle_entity) {
        vehicle.onboard = remaining;
    }
    if let Ok(mut pos) = world.get::<&mut Position>(vehicle_entity) {
        pos.at = graph.position(arrived_at);
    }

    if let Some(next) = pick_next(graph, arrived_at, Some(came_from), rng) {
        if let Ok(route) = world.query_one_mut::<&mut Route>(vehicle_entity) {
            route.next = Some(next);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use metroline_logic::geometry::Vec2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// A <-> B <-> C line.
    fn line_graph() -> StationGraph {
        let mut graph = StationGraph::new();
        graph.add_station("A", Vec2::new(0.0, 0.0)).unwrap();
        graph.add_station("B", Vec2::new(100.0, 0.0)).unwrap();
        graph.add_station("C", Vec2::new(200.0, 0.0)).unwrap();
        graph.connect("A", "B").unwrap();
        graph.connect("B", "A").unwrap();
        graph.connect("B", "C").unwrap();
        graph.connect("C", "B").unwrap();
        graph
    }

    #[test]
    fn test_pick_next_excludes_previous() {
        let graph = line_graph();
        let mut rng = StdRng::seed_from_u64(7);
        // From B having come from A, the only forward option is C.
        for _ in 0..20 {
            assert_eq!(pick_next(&graph, 1, Some(0), &mut rng), Some(2));
        }
    }

    #[test]
    fn test_pick_next_dead_end_reverses() {
        let graph = line_graph();
        let mut rng = StdRng::seed_from_u64(7);
        // A's only neighbor is B, which is also previous: fall back and reverse.
        for _ in 0..20 {
            assert_eq!(pick_next(&graph, 0, Some(1), &mut rng), Some(1));
        }
    }

    #[test]
    fn test_pick_next_no_neighbors() {
        let mut graph = StationGraph::new();
        graph.add_station("Lone", Vec2::ZERO).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(pick_next(&graph, 0, None, &mut rng), None);
    }

    #[test]
    fn test_pick_next_ignores_stale_previous() {
        let graph = line_graph();
        let mut rng = StdRng::seed_from_u64(7);
        // No previous at all: both neighbors of B are fair game.
        let mut seen = std::collections::HashSet::new();
        for _ in 0..50 {
            if let Some(pick) = pick_next(&graph, 1, None, &mut rng) {
                seen.insert(pick);
            }
        }
        assert!(seen.contains(&0));
        assert!(seen.contains(&2));
    }
}
