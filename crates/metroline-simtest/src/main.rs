//! Metroline Headless Simulation Harness
//!
//! Validates the transit logic and engine behavior without a window or
//! renderer. Runs entirely in-process: no assets, no frame callbacks.
//!
//! Usage:
//!   cargo run -p metroline-simtest
//!   cargo run -p metroline-simtest -- --verbose

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use metroline_core::components::{RiderState, Route, Vehicle};
use metroline_core::decay::ScoreDecay;
use metroline_core::engine::SimulationEngine;
use metroline_core::generation;
use metroline_core::network::NetworkConfig;
use metroline_core::pointer::PointerState;
use metroline_core::systems::pick_next;
use metroline_logic::analyzer::{analyze_trip, report_line, TripOutcome};
use metroline_logic::geometry::Vec2;
use metroline_logic::graph::StationGraph;
use rand::rngs::StdRng;
use rand::SeedableRng;

// ── Sample network (same JSON the demo driver loads) ────────────────────
const NETWORK_JSON: &str = include_str!("../../../data/network.json");

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

impl TestResult {
    fn new(name: &str, passed: bool, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed,
            detail: detail.into(),
        }
    }
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== Metroline Simulation Harness ===\n");

    let mut results = Vec::new();

    // 1. Network document validation
    results.extend(validate_network_document(verbose));

    // 2. Graph invariants
    results.extend(validate_graph(verbose));

    // 3. Shortest-path scenarios
    results.extend(validate_pathfinding(verbose));

    // 4. Trip analyzer sweep
    results.extend(validate_analyzer(verbose));

    // 5. Vehicle rules
    results.extend(validate_vehicle_rules(verbose));

    // 6. Scoring
    results.extend(validate_scoring(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Network document ─────────────────────────────────────────────────

fn validate_network_document(_verbose: bool) -> Vec<TestResult> {
    println!("--- Network Document ---");
    let mut results = Vec::new();

    // Raw structural check first
    let value: serde_json::Value = match serde_json::from_str(NETWORK_JSON) {
        Ok(v) => v,
        Err(e) => {
            results.push(TestResult::new(
                "document_parse",
                false,
                format!("JSON parse error: {}", e),
            ));
            return results;
        }
    };
    let station_array = value
        .get("stations")
        .and_then(|s| s.as_array())
        .cloned()
        .unwrap_or_default();
    results.push(TestResult::new(
        "document_has_stations",
        !station_array.is_empty(),
        format!("{} station entries", station_array.len()),
    ));

    // Typed parse
    let config = match NetworkConfig::from_json(NETWORK_JSON) {
        Ok(c) => c,
        Err(e) => {
            results.push(TestResult::new(
                "document_typed_parse",
                false,
                format!("{}", e),
            ));
            return results;
        }
    };

    // Unique names
    let mut names = HashSet::new();
    let duplicates: Vec<&str> = config
        .stations
        .iter()
        .filter(|s| !names.insert(s.name.as_str()))
        .map(|s| s.name.as_str())
        .collect();
    results.push(TestResult::new(
        "station_names_unique",
        duplicates.is_empty(),
        if duplicates.is_empty() {
            "no duplicates".to_string()
        } else {
            format!("duplicates: {:?}", duplicates)
        },
    ));

    // Every connection target exists
    let known: HashSet<&str> = config.stations.iter().map(|s| s.name.as_str()).collect();
    let dangling: Vec<String> = config
        .stations
        .iter()
        .flat_map(|s| s.connections.iter())
        .filter(|target| !known.contains(target.as_str()))
        .cloned()
        .collect();
    results.push(TestResult::new(
        "connections_resolve",
        dangling.is_empty(),
        if dangling.is_empty() {
            "all targets known".to_string()
        } else {
            format!("dangling targets: {:?}", dangling)
        },
    ));

    results
}

// ── 2. Graph invariants ─────────────────────────────────────────────────

fn validate_graph(_verbose: bool) -> Vec<TestResult> {
    println!("--- Station Graph ---");
    let mut results = Vec::new();

    let mut engine = SimulationEngine::new();
    let config = match NetworkConfig::from_json(NETWORK_JSON) {
        Ok(c) => c,
        Err(_) => return results,
    };
    let mut rng = StdRng::seed_from_u64(101);
    generation::build_network(&mut engine, &config, &generation::default_bounds(), &mut rng);

    let graph = engine.graph();
    results.push(TestResult::new(
        "all_stations_loaded",
        graph.station_count() == config.stations.len(),
        format!(
            "{}/{} stations",
            graph.station_count(),
            config.stations.len()
        ),
    ));

    // connect(a, b) implies b in a.neighbors and a in b.incoming
    let mut inverse_ok = true;
    for a in graph.ids() {
        for &b in graph.neighbors(a) {
            if !graph.incoming(b).contains(&a) {
                inverse_ok = false;
            }
        }
    }
    results.push(TestResult::new(
        "inverse_adjacency_consistent",
        inverse_ok,
        "every edge mirrored in the incoming list",
    ));

    // Duplicate add is rejected without damaging the graph
    let mut probe = StationGraph::new();
    let _ = probe.add_station("Twin", Vec2::ZERO);
    let rejected = probe.add_station("Twin", Vec2::new(1.0, 1.0)).is_err();
    results.push(TestResult::new(
        "duplicate_name_rejected",
        rejected && probe.station_count() == 1,
        "second insert refused",
    ));

    results
}

// ── 3. Pathfinding ──────────────────────────────────────────────────────

fn validate_pathfinding(_verbose: bool) -> Vec<TestResult> {
    println!("--- Pathfinding ---");
    let mut results = Vec::new();

    // A → B → C → D chain with a direct A → D shortcut
    let mut graph = StationGraph::new();
    for (name, x) in [("A", 0.0), ("B", 100.0), ("C", 200.0), ("D", 300.0)] {
        let _ = graph.add_station(name, Vec2::new(x, 0.0));
    }
    let _ = graph.connect("A", "B");
    let _ = graph.connect("B", "C");
    let _ = graph.connect("C", "D");
    let _ = graph.connect("A", "D");

    let shortcut = metroline_logic::pathfinding::shortest_path(&graph, 0, 3);
    results.push(TestResult::new(
        "shortcut_wins",
        shortcut == Some(vec![0, 3]),
        format!("A->D path: {:?}", shortcut),
    ));

    let backward = metroline_logic::pathfinding::shortest_path(&graph, 3, 0);
    results.push(TestResult::new(
        "direction_respected",
        backward.is_none(),
        "no reverse path on one-way edges",
    ));

    let mut island = graph.clone();
    let _ = island.add_station("Island", Vec2::new(999.0, 999.0));
    let unreachable = metroline_logic::pathfinding::shortest_path(&island, 0, 4);
    results.push(TestResult::new(
        "unreachable_is_none",
        unreachable.is_none(),
        "isolated station unreachable",
    ));

    results
}

// ── 4. Analyzer ─────────────────────────────────────────────────────────

fn validate_analyzer(verbose: bool) -> Vec<TestResult> {
    println!("--- Trip Analyzer ---");
    let mut results = Vec::new();

    let mut engine = SimulationEngine::new();
    let config = match NetworkConfig::from_json(NETWORK_JSON) {
        Ok(c) => c,
        Err(_) => return results,
    };
    let mut rng = StdRng::seed_from_u64(202);
    generation::build_network(&mut engine, &config, &generation::default_bounds(), &mut rng);
    let graph = engine.graph().clone();

    // Exhaustive pair sweep: deviation is never negative, stayed pairs skip
    // BFS, and every line formats.
    let mut negative = 0usize;
    let mut found = 0usize;
    let mut not_found = 0usize;
    let mut stayed = 0usize;
    for start in graph.ids() {
        for end in graph.ids() {
            let outcome = analyze_trip(&graph, start, end);
            match &outcome {
                TripOutcome::Trip(stats) => {
                    found += 1;
                    if stats.deviation < 0.0 {
                        negative += 1;
                    }
                }
                TripOutcome::NotFound => not_found += 1,
                TripOutcome::Stayed => stayed += 1,
            }
            let line = report_line(&graph, start, end, &outcome);
            if verbose {
                println!("    {}", line);
            }
        }
    }

    results.push(TestResult::new(
        "deviation_non_negative",
        negative == 0,
        format!("{} found trips, {} negative deviations", found, negative),
    ));
    results.push(TestResult::new(
        "stayed_pairs_diagonal",
        stayed == graph.station_count(),
        format!("{} stayed pairs", stayed),
    ));
    // The sample network is fully connected both ways
    results.push(TestResult::new(
        "sample_network_connected",
        not_found == 0,
        format!("{} unreachable pairs", not_found),
    ));

    // Engine-level sampled report
    let mut rng = StdRng::seed_from_u64(203);
    let lines = engine.trip_report(20, &mut rng);
    let well_formed = lines.iter().all(|line| {
        line == "Path not found!"
            || line.contains("| Metro Time:")
    });
    results.push(TestResult::new(
        "report_lines_well_formed",
        lines.len() == 20 && well_formed,
        format!("{} lines", lines.len()),
    ));

    results
}

// ── 5. Vehicle rules ────────────────────────────────────────────────────

fn validate_vehicle_rules(_verbose: bool) -> Vec<TestResult> {
    println!("--- Vehicle Rules ---");
    let mut results = Vec::new();

    // Dead-end reversal on an A <-> B <-> C line
    let mut graph = StationGraph::new();
    let _ = graph.add_station("A", Vec2::new(0.0, 0.0));
    let _ = graph.add_station("B", Vec2::new(100.0, 0.0));
    let _ = graph.add_station("C", Vec2::new(200.0, 0.0));
    let _ = graph.connect("A", "B");
    let _ = graph.connect("B", "A");
    let _ = graph.connect("B", "C");
    let _ = graph.connect("C", "B");

    let mut rng = StdRng::seed_from_u64(303);
    let mut reversal_ok = true;
    for _ in 0..50 {
        if pick_next(&graph, 0, Some(1), &mut rng) != Some(1) {
            reversal_ok = false;
        }
    }
    results.push(TestResult::new(
        "dead_end_reverses",
        reversal_ok,
        "A with previous B always returns to B",
    ));

    // Full-capacity boarding leaves the seventh rider waiting
    let mut engine = SimulationEngine::new();
    let _ = engine.add_station("A", Vec2::new(0.0, 0.0));
    let _ = engine.add_station("B", Vec2::new(100.0, 0.0));
    let _ = engine.add_station("C", Vec2::new(200.0, 0.0));
    let _ = engine.connect("A", "B");
    let _ = engine.connect("B", "C");
    let _ = engine.connect("C", "B");
    let vehicle = engine.spawn_vehicle(0);
    for _ in 0..7 {
        engine.spawn_rider(1, 2);
    }
    engine.set_running(true);

    let pointer = PointerState::default();
    let mut arrived = false;
    for _ in 0..10_000 {
        engine.update(16.0, &pointer);
        if let Ok(route) = engine.world.get::<&Route>(vehicle) {
            if route.current == 1 {
                arrived = true;
                break;
            }
        }
    }

    let onboard = engine
        .world
        .get::<&Vehicle>(vehicle)
        .map(|v| v.onboard.len())
        .unwrap_or(0);
    results.push(TestResult::new(
        "boarding_respects_capacity",
        arrived && onboard == 6 && engine.waiting_count(1) == 1,
        format!(
            "onboard {}, waiting {} after arrival",
            onboard,
            engine.waiting_count(1)
        ),
    ));

    // The boarded riders are on the vehicle, the overflow rider still waits
    let mut states = (0usize, 0usize);
    for (_, rider) in engine
        .world
        .query::<&metroline_core::components::Rider>()
        .iter()
    {
        match rider.state() {
            RiderState::OnVehicle => states.0 += 1,
            RiderState::Waiting => states.1 += 1,
            RiderState::Completed => {}
        }
    }
    results.push(TestResult::new(
        "rider_states_after_boarding",
        states.0 == 6 && states.1 == 1,
        format!("{} on vehicle, {} waiting", states.0, states.1),
    ));

    results
}

// ── 6. Scoring ──────────────────────────────────────────────────────────

fn validate_scoring(_verbose: bool) -> Vec<TestResult> {
    println!("--- Scoring ---");
    let mut results = Vec::new();

    // Clamp at zero while running
    let score = Arc::new(AtomicI32::new(5));
    let running = Arc::new(AtomicBool::new(true));
    let mut decay = ScoreDecay::spawn_with(
        Arc::clone(&score),
        Arc::clone(&running),
        Duration::from_millis(10),
        3,
    );
    std::thread::sleep(Duration::from_millis(200));
    decay.stop();
    let settled = score.load(Ordering::Relaxed);
    results.push(TestResult::new(
        "decay_clamps_at_zero",
        settled == 0,
        format!("score settled at {}", settled),
    ));

    // Paused simulation does not decay
    let score = Arc::new(AtomicI32::new(50));
    let running = Arc::new(AtomicBool::new(false));
    let mut decay = ScoreDecay::spawn_with(
        Arc::clone(&score),
        Arc::clone(&running),
        Duration::from_millis(10),
        3,
    );
    std::thread::sleep(Duration::from_millis(100));
    decay.stop();
    let untouched = score.load(Ordering::Relaxed);
    results.push(TestResult::new(
        "decay_gated_on_running_flag",
        untouched == 50,
        format!("paused score {}", untouched),
    ));

    results
}
