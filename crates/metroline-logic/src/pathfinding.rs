//! BFS shortest-hop search over the station graph.
//!
//! Edges are unweighted: the search minimizes hop count, not distance. Ties
//! are broken by adjacency insertion order: the first-discovered shortest
//! path wins, with no distance-based tie-break.

use std::collections::VecDeque;

use crate::graph::{StationGraph, StationId};

/// Find a shortest-hop path from `start` to `end`, inclusive of both.
///
/// Returns `Some(vec![start])` when `start == end` and `None` when `end` is
/// unreachable. Respects edge direction.
pub fn shortest_path(
    graph: &StationGraph,
    start: StationId,
    end: StationId,
) -> Option<Vec<StationId>> {
    let count = graph.station_count();
    if (start as usize) >= count || (end as usize) >= count {
        return None;
    }
    if start == end {
        return Some(vec![start]);
    }

    let mut visited = vec![false; count];
    let mut parent: Vec<Option<StationId>> = vec![None; count];
    let mut queue: VecDeque<StationId> = VecDeque::new();

    visited[start as usize] = true;
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        for &next in graph.neighbors(current) {
            if visited[next as usize] {
                continue;
            }
            visited[next as usize] = true;
            parent[next as usize] = Some(current);

            if next == end {
                return Some(reconstruct(&parent, start, end));
            }
            queue.push_back(next);
        }
    }

    None
}

fn reconstruct(parent: &[Option<StationId>], start: StationId, end: StationId) -> Vec<StationId> {
    let mut path = vec![end];
    let mut node = end;
    while node != start {
        match parent[node as usize] {
            Some(prev) => {
                path.push(prev);
                node = prev;
            }
            // Unreachable: every visited node except `start` has a parent.
            None => break,
        }
    }
    path.reverse();
    path
}

/// Sum of Euclidean lengths of consecutive path edges.
pub fn path_distance(graph: &StationGraph, path: &[StationId]) -> f32 {
    path.windows(2)
        .map(|pair| graph.position(pair[0]).distance(&graph.position(pair[1])))
        .sum()
}
