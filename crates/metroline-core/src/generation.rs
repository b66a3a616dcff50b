//! Procedural setup: station placement, fleet and rider spawning.

use hecs::Entity;
use metroline_logic::constants::{
    CANVAS_HEIGHT, CANVAS_WIDTH, FLEET_SIZE, MAX_PLACEMENT_ATTEMPTS, MIN_STATION_SPACING,
    PLACEMENT_MARGIN, PLACEMENT_TOP_MARGIN, RIDER_COUNT,
};
use metroline_logic::geometry::Vec2;
use metroline_logic::graph::StationId;
use metroline_logic::placement::{is_clear, PlacementBounds};
use rand::Rng;

use crate::components::ButtonAction;
use crate::engine::SimulationEngine;
use crate::network::NetworkConfig;

/// Default placement area: the canvas minus its margins and top reserve.
pub fn default_bounds() -> PlacementBounds {
    PlacementBounds::for_canvas(
        CANVAS_WIDTH,
        CANVAS_HEIGHT,
        PLACEMENT_MARGIN,
        PLACEMENT_TOP_MARGIN,
    )
}

fn random_point(bounds: &PlacementBounds, rng: &mut impl Rng) -> Vec2 {
    Vec2::new(
        rng.gen_range(bounds.min.x..=bounds.max.x),
        rng.gen_range(bounds.min.y..=bounds.max.y),
    )
}

/// Find a position keeping the minimum spacing from `existing`. After the
/// retries run out the overlap is accepted, a soft degradation, not a
/// failure.
pub fn place_station(
    existing: &[Vec2],
    bounds: &PlacementBounds,
    min_spacing: f32,
    rng: &mut impl Rng,
) -> Vec2 {
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let candidate = random_point(bounds, rng);
        if is_clear(existing, candidate, min_spacing) {
            return candidate;
        }
    }
    log::warn!(
        "no clear position after {} attempts; placing with overlap",
        MAX_PLACEMENT_ATTEMPTS
    );
    random_point(bounds, rng)
}

/// Build the station graph from a parsed document in two passes: place and
/// add every station, then wire up connections. Duplicates and unknown
/// targets are warned and skipped.
pub fn build_network(
    engine: &mut SimulationEngine,
    config: &NetworkConfig,
    bounds: &PlacementBounds,
    rng: &mut impl Rng,
) {
    let mut placed: Vec<Vec2> = engine
        .graph()
        .ids()
        .map(|id| engine.graph().position(id))
        .collect();

    for spec in &config.stations {
        let position = place_station(&placed, bounds, MIN_STATION_SPACING, rng);
        match engine.add_station(&spec.name, position) {
            Ok(_) => placed.push(position),
            Err(e) => log::warn!("skipping station: {}", e),
        }
    }

    for spec in &config.stations {
        for target in &spec.connections {
            if let Err(e) = engine.connect(&spec.name, target) {
                log::warn!("skipping connection {} -> {}: {}", spec.name, target, e);
            }
        }
    }
}

/// Spawn `count` vehicles at distinct random stations. Spawns none when the
/// network has fewer stations than vehicles, matching the demo setup.
pub fn spawn_fleet(
    engine: &mut SimulationEngine,
    count: usize,
    rng: &mut impl Rng,
) -> Vec<Entity> {
    let station_count = engine.graph().station_count();
    if station_count < count {
        return Vec::new();
    }

    let mut used: Vec<StationId> = Vec::with_capacity(count);
    let mut fleet = Vec::with_capacity(count);
    while fleet.len() < count {
        let id = rng.gen_range(0..station_count) as StationId;
        if used.contains(&id) {
            continue;
        }
        used.push(id);
        fleet.push(engine.spawn_vehicle(id));
    }
    fleet
}

/// Spawn `count` riders at random stations, re-rolling the destination so it
/// differs from the origin whenever more than one station exists.
pub fn spawn_riders(
    engine: &mut SimulationEngine,
    count: usize,
    rng: &mut impl Rng,
) -> Vec<Entity> {
    let station_count = engine.graph().station_count();
    if station_count == 0 {
        return Vec::new();
    }

    let mut riders = Vec::with_capacity(count);
    for _ in 0..count {
        let start = rng.gen_range(0..station_count) as StationId;
        let mut destination = rng.gen_range(0..station_count) as StationId;
        while destination == start && station_count > 1 {
            destination = rng.gen_range(0..station_count) as StationId;
        }
        riders.push(engine.spawn_rider(start, destination));
    }
    riders
}

/// Place the start button at the bottom-right of the canvas.
pub fn spawn_start_button(engine: &mut SimulationEngine) -> Entity {
    let width = 120.0;
    let height = 40.0;
    engine.add_button(
        Vec2::new(
            CANVAS_WIDTH - width / 2.0 - 20.0,
            CANVAS_HEIGHT - height / 2.0 - 20.0,
        ),
        width,
        height,
        "Simulate",
        ButtonAction::StartSimulation,
    )
}

/// One-call demo setup: build the network, spawn the fleet and riders, add
/// the start button.
pub fn default_setup(engine: &mut SimulationEngine, config: &NetworkConfig, rng: &mut impl Rng) {
    build_network(engine, config, &default_bounds(), rng);
    spawn_fleet(engine, FLEET_SIZE, rng);
    spawn_riders(engine, RIDER_COUNT, rng);
    spawn_start_button(engine);
}
