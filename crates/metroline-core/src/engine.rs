//! Simulation engine - the explicit context object driving each frame.
//!
//! One `SimulationEngine` is constructed per simulation and passed by
//! reference to everything that needs it; there is no process-wide state,
//! so independent simulations can coexist (tests rely on this).

use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use hecs::{Entity, World};
use metroline_logic::analyzer;
use metroline_logic::constants::STATION_RADIUS;
use metroline_logic::geometry::Vec2;
use metroline_logic::graph::{GraphError, StationGraph, StationId};
use rand::Rng;

use crate::arbiter::DragArbiter;
use crate::components::{
    Active, Button, ButtonAction, Draggable, Position, Rider, Route, Station, Vehicle, Waiting,
};
use crate::decay::ScoreDecay;
use crate::pointer::PointerState;
use crate::scene::Scene;
use crate::systems::{drag_system, pick_next, rider_system, ui_system, vehicle_system};

/// Main simulation engine: the ECS world plus everything one frame needs.
pub struct SimulationEngine {
    /// ECS world containing stations, vehicles, riders, and widgets
    pub world: World,
    /// Directed station graph; owns station names, positions, adjacency
    graph: StationGraph,
    /// Station entities in insertion order, indexed by `StationId`
    stations: Vec<Entity>,
    /// Shared score, also touched by the decay thread
    score: Arc<AtomicI32>,
    /// Simulation-running flag; vehicles and decay are gated on it
    running: Arc<AtomicBool>,
    /// Single-owner drag gate, frame thread only
    arbiter: DragArbiter,
    /// Background decay task, if started
    decay: Option<ScoreDecay>,
}

impl SimulationEngine {
    /// Create a new empty simulation, paused, with an empty graph.
    pub fn new() -> Self {
        Self {
            world: World::new(),
            graph: StationGraph::new(),
            stations: Vec::new(),
            score: Arc::new(AtomicI32::new(0)),
            running: Arc::new(AtomicBool::new(false)),
            arbiter: DragArbiter::new(),
            decay: None,
        }
    }

    // ── Graph management ────────────────────────────────────────────────

    /// Add a station to the graph and spawn its entity.
    pub fn add_station(&mut self, name: &str, position: Vec2) -> Result<StationId, GraphError> {
        let id = self.graph.add_station(name, position)?;
        let entity = self.world.spawn((
            Station { id },
            Waiting::new(),
            Draggable::new(STATION_RADIUS),
            Active(true),
        ));
        self.stations.push(entity);
        Ok(id)
    }

    /// Add a directed edge between named stations.
    pub fn connect(&mut self, from: &str, to: &str) -> Result<(), GraphError> {
        self.graph.connect(from, to)
    }

    pub fn graph(&self) -> &StationGraph {
        &self.graph
    }

    /// Station entity for a graph id.
    pub fn station_entity(&self, id: StationId) -> Option<Entity> {
        self.stations.get(id as usize).copied()
    }

    // ── Spawning ────────────────────────────────────────────────────────

    /// Spawn a vehicle attached to a station, with its first destination
    /// already resolved (when the station has any outgoing edge).
    pub fn spawn_vehicle(&mut self, at: StationId) -> Entity {
        let mut route = Route::docked_at(at);
        route.next = pick_next(&self.graph, at, None, &mut rand::thread_rng());
        self.world.spawn((
            Vehicle::new(),
            route,
            Position::new(self.graph.position(at)),
            Active(true),
        ))
    }

    /// Spawn a rider waiting at `at` with a fixed destination, queued at the
    /// back of the platform's FIFO.
    pub fn spawn_rider(&mut self, at: StationId, destination: StationId) -> Entity {
        let entity = self.world.spawn((
            Rider::waiting_for(destination),
            Position::new(self.graph.position(at)),
            Active(true),
        ));
        if let Some(&station_entity) = self.stations.get(at as usize) {
            if let Ok(mut waiting) = self.world.get::<&mut Waiting>(station_entity) {
                waiting.queue.push_back(entity);
            }
        }
        entity
    }

    /// Spawn a clickable widget centered at `at`.
    pub fn add_button(
        &mut self,
        at: Vec2,
        width: f32,
        height: f32,
        label: &str,
        action: ButtonAction,
    ) -> Entity {
        self.world.spawn((
            Button::new(width, height, label, action),
            Position::new(at),
            Active(true),
        ))
    }

    // ── Frame loop ──────────────────────────────────────────────────────

    /// Advance the simulation by one frame.
    ///
    /// Fixed category order: stations (drag), then vehicles, then riders,
    /// then UI. Vehicle motion only runs while the running flag is true;
    /// interaction keeps working while paused.
    pub fn update(&mut self, elapsed_ms: f32, pointer: &PointerState) {
        drag_system(
            &mut self.world,
            &mut self.graph,
            &mut self.arbiter,
            &self.stations,
            pointer,
        );

        if self.is_running() {
            vehicle_system(
                &mut self.world,
                &self.graph,
                &self.score,
                &self.stations,
                elapsed_ms,
                &mut rand::thread_rng(),
            );
        }

        rider_system(&mut self.world, &self.graph);

        for action in ui_system(&mut self.world, pointer) {
            match action {
                ButtonAction::StartSimulation => self.set_running(true),
            }
        }
    }

    /// Despawn every inactive entity. The driver calls this once per frame,
    /// after rendering. Returns how many entities were removed.
    pub fn sweep_inactive(&mut self) -> usize {
        let dead: Vec<Entity> = self
            .world
            .query::<&Active>()
            .iter()
            .filter(|(_, active)| !active.0)
            .map(|(entity, _)| entity)
            .collect();
        for &entity in &dead {
            let _ = self.world.despawn(entity);
        }
        dead.len()
    }

    /// Capture a renderable snapshot of the current frame.
    pub fn scene(&self) -> Scene {
        Scene::capture(self)
    }

    // ── Score & running flag ────────────────────────────────────────────

    pub fn score(&self) -> i32 {
        self.score.load(Ordering::Relaxed)
    }

    pub fn add_score(&self, points: i32) {
        self.score.fetch_add(points, Ordering::Relaxed);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    pub fn set_running(&self, running: bool) {
        self.running.store(running, Ordering::Relaxed);
    }

    pub fn arbiter(&self) -> &DragArbiter {
        &self.arbiter
    }

    // ── Score decay lifecycle ───────────────────────────────────────────

    /// Start the background score decay with the default interval/amount.
    /// Replaces any previously running decay task.
    pub fn start_score_decay(&mut self) {
        self.stop_score_decay();
        self.decay = Some(ScoreDecay::spawn(
            Arc::clone(&self.score),
            Arc::clone(&self.running),
        ));
    }

    /// Start the background score decay with explicit timing (tests use
    /// short intervals).
    pub fn start_score_decay_with(&mut self, interval: Duration, amount: i32) {
        self.stop_score_decay();
        self.decay = Some(ScoreDecay::spawn_with(
            Arc::clone(&self.score),
            Arc::clone(&self.running),
            interval,
            amount,
        ));
    }

    /// Stop the decay task and wait for its thread to exit.
    pub fn stop_score_decay(&mut self) {
        if let Some(mut decay) = self.decay.take() {
            decay.stop();
        }
    }

    /// Tear down background work. Dropping the engine does the same; this
    /// makes the stop point explicit for drivers.
    pub fn shutdown(&mut self) {
        self.stop_score_decay();
    }

    // ── Offline analysis ────────────────────────────────────────────────

    /// Batch trip report over `samples` randomly drawn rider pairs.
    ///
    /// Runs on a clone of the graph, so concurrent frame mutation cannot
    /// tear the analysis. Equal pairs are allowed and reported as stayed
    /// trips. Returns no lines for an empty graph.
    pub fn trip_report(&self, samples: usize, rng: &mut impl Rng) -> Vec<String> {
        let snapshot = self.graph.clone();
        let count = snapshot.station_count();
        if count == 0 {
            return Vec::new();
        }

        let pairs: Vec<(StationId, StationId)> = (0..samples)
            .map(|_| {
                (
                    rng.gen_range(0..count) as StationId,
                    rng.gen_range(0..count) as StationId,
                )
            })
            .collect();
        analyzer::trip_report(&snapshot, &pairs)
    }

    // ── Counters (tests and harnesses) ──────────────────────────────────

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    pub fn vehicle_count(&self) -> usize {
        self.world.query::<&Vehicle>().iter().count()
    }

    pub fn rider_count(&self) -> usize {
        self.world.query::<&Rider>().iter().count()
    }

    /// Riders queued at one station's platform.
    pub fn waiting_count(&self, id: StationId) -> usize {
        self.stations
            .get(id as usize)
            .and_then(|&entity| self.world.get::<&Waiting>(entity).ok())
            .map(|waiting| waiting.queue.len())
            .unwrap_or(0)
    }
}

impl Default for SimulationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SimulationEngine {
    fn drop(&mut self) {
        self.stop_score_decay();
    }
}
