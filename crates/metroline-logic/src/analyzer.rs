//! Offline trip analysis: shortest-path metrics and report formatting.
//!
//! The analyzer is read-only and snapshot-based: callers hand it a
//! `StationGraph` (usually a clone of the live one) and it never touches
//! vehicle or rider state. "No path" is a normal outcome, not an error.

use crate::graph::{StationGraph, StationId};
use crate::pathfinding::{path_distance, shortest_path};

/// Metrics for a found trip.
#[derive(Debug, Clone, PartialEq)]
pub struct TripStats {
    /// Station ids along the shortest-hop path, start and end inclusive.
    pub path: Vec<StationId>,
    /// Sum of Euclidean lengths of consecutive path edges.
    pub metro_distance: f32,
    /// Euclidean distance between start and end.
    pub direct_distance: f32,
    /// `metro_distance - direct_distance`; never negative for a real path.
    pub deviation: f32,
}

/// Outcome of analyzing one (start, end) pair.
#[derive(Debug, Clone, PartialEq)]
pub enum TripOutcome {
    /// start == end: a degenerate zero-cost trip, BFS not consulted.
    Stayed,
    /// No directed path exists.
    NotFound,
    Trip(TripStats),
}

/// Analyze a single rider pair against the graph snapshot.
pub fn analyze_trip(graph: &StationGraph, start: StationId, end: StationId) -> TripOutcome {
    if start == end {
        return TripOutcome::Stayed;
    }

    match shortest_path(graph, start, end) {
        None => TripOutcome::NotFound,
        Some(path) => {
            let metro_distance = path_distance(graph, &path);
            let direct_distance = graph.position(start).distance(&graph.position(end));
            TripOutcome::Trip(TripStats {
                path,
                metro_distance,
                direct_distance,
                deviation: metro_distance - direct_distance,
            })
        }
    }
}

/// Format one report line for a pair and its outcome.
pub fn report_line(
    graph: &StationGraph,
    start: StationId,
    end: StationId,
    outcome: &TripOutcome,
) -> String {
    match outcome {
        TripOutcome::Stayed => format!(
            "{} -> {} | Stayed at {} | Metro Time: 0",
            graph.name(start),
            graph.name(end),
            graph.name(start)
        ),
        TripOutcome::NotFound => "Path not found!".to_string(),
        TripOutcome::Trip(stats) => format!(
            "{} -> {} | Metro Time: {} | Direct Distance (Best): {} | Deviation: {}",
            graph.name(start),
            graph.name(end),
            stats.metro_distance.round() as i64,
            stats.direct_distance.round() as i64,
            stats.deviation.round() as i64
        ),
    }
}

/// Analyze and format a batch of pairs, one line per pair.
pub fn trip_report(graph: &StationGraph, pairs: &[(StationId, StationId)]) -> Vec<String> {
    pairs
        .iter()
        .map(|&(start, end)| {
            let outcome = analyze_trip(graph, start, end);
            report_line(graph, start, end, &outcome)
        })
        .collect()
}
