//! Directed station graph with positions and inverse adjacency.
//!
//! `StationGraph` owns every station record; the rest of the system refers to
//! stations by `StationId`, a dense index handed out by `add_station`. Edges
//! are directed and never removed at runtime. The graph is `Clone`, which is
//! how the offline analyzer takes its snapshot.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::geometry::Vec2;

/// Dense index into the graph's station table.
pub type StationId = u32;

/// A single station record: identity, position, and both adjacency lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationNode {
    pub name: String,
    pub position: Vec2,
    outgoing: Vec<StationId>,
    incoming: Vec<StationId>,
}

/// Errors from graph construction. Callers are expected to warn and skip
/// rather than abort; a partially loaded network is still valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    DuplicateName(String),
    UnknownStation(String),
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphError::DuplicateName(name) => {
                write!(f, "station name already exists: {}", name)
            }
            GraphError::UnknownStation(name) => write!(f, "unknown station: {}", name),
        }
    }
}

impl std::error::Error for GraphError {}

/// Directed adjacency structure over named stations with 2-D positions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StationGraph {
    stations: Vec<StationNode>,
    by_name: HashMap<String, StationId>,
}

impl StationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a station with a unique name. Returns its id, or
    /// `GraphError::DuplicateName` if the name is taken.
    pub fn add_station(
        &mut self,
        name: impl Into<String>,
        position: Vec2,
    ) -> Result<StationId, GraphError> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(GraphError::DuplicateName(name));
        }

        let id = self.stations.len() as StationId;
        self.by_name.insert(name.clone(), id);
        self.stations.push(StationNode {
            name,
            position,
            outgoing: Vec::new(),
            incoming: Vec::new(),
        });
        Ok(id)
    }

    /// Add a directed edge by station name. Appends `to` to `from`'s outgoing
    /// list and `from` to `to`'s incoming list. Self-loops are permitted.
    pub fn connect(&mut self, from: &str, to: &str) -> Result<(), GraphError> {
        let from_id = self
            .index(from)
            .ok_or_else(|| GraphError::UnknownStation(from.to_string()))?;
        let to_id = self
            .index(to)
            .ok_or_else(|| GraphError::UnknownStation(to.to_string()))?;

        self.stations[from_id as usize].outgoing.push(to_id);
        self.stations[to_id as usize].incoming.push(from_id);
        Ok(())
    }

    /// Outgoing adjacency of a station, in edge insertion order.
    pub fn neighbors(&self, id: StationId) -> &[StationId] {
        self.stations
            .get(id as usize)
            .map(|s| s.outgoing.as_slice())
            .unwrap_or(&[])
    }

    /// Inverse adjacency of a station, in edge insertion order.
    pub fn incoming(&self, id: StationId) -> &[StationId] {
        self.stations
            .get(id as usize)
            .map(|s| s.incoming.as_slice())
            .unwrap_or(&[])
    }

    /// Position of a station. `id` must come from `add_station`.
    pub fn position(&self, id: StationId) -> Vec2 {
        self.stations[id as usize].position
    }

    /// Move a station (drag interaction). `id` must come from `add_station`.
    pub fn set_position(&mut self, id: StationId, position: Vec2) {
        self.stations[id as usize].position = position;
    }

    /// Name of a station. `id` must come from `add_station`.
    pub fn name(&self, id: StationId) -> &str {
        &self.stations[id as usize].name
    }

    /// Look up a station id by name.
    pub fn index(&self, name: &str) -> Option<StationId> {
        self.by_name.get(name).copied()
    }

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// All station ids, in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = StationId> {
        0..self.stations.len() as StationId
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> StationGraph {
        let mut g = StationGraph::new();
        g.add_station("A", Vec2::new(0.0, 0.0)).unwrap();
        g.add_station("B", Vec2::new(100.0, 0.0)).unwrap();
        g.add_station("C", Vec2::new(100.0, 100.0)).unwrap();
        g
    }

    #[test]
    fn test_add_and_lookup() {
        let g = triangle();
        assert_eq!(g.station_count(), 3);
        assert_eq!(g.index("A"), Some(0));
        assert_eq!(g.index("C"), Some(2));
        assert_eq!(g.index("Z"), None);
        assert_eq!(g.name(1), "B");
        assert_eq!(g.position(1), Vec2::new(100.0, 0.0));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut g = triangle();
        let err = g.add_station("A", Vec2::ZERO).unwrap_err();
        assert_eq!(err, GraphError::DuplicateName("A".to_string()));
        // Graph unchanged by the rejected insert
        assert_eq!(g.station_count(), 3);
    }

    #[test]
    fn test_connect_maintains_inverse_list() {
        let mut g = triangle();
        g.connect("A", "B").unwrap();

        let a = g.index("A").unwrap();
        let b = g.index("B").unwrap();
        assert!(g.neighbors(a).contains(&b));
        assert!(g.incoming(b).contains(&a));
        // Directed: nothing in the other direction
        assert!(g.neighbors(b).is_empty());
        assert!(g.incoming(a).is_empty());
    }

    #[test]
    fn test_connect_unknown_station() {
        let mut g = triangle();
        assert_eq!(
            g.connect("A", "Nowhere").unwrap_err(),
            GraphError::UnknownStation("Nowhere".to_string())
        );
        assert_eq!(
            g.connect("Nowhere", "A").unwrap_err(),
            GraphError::UnknownStation("Nowhere".to_string())
        );
        // Failed connects leave no half-added edges
        assert!(g.neighbors(g.index("A").unwrap()).is_empty());
    }

    #[test]
    fn test_neighbors_keep_insertion_order() {
        let mut g = triangle();
        g.connect("A", "C").unwrap();
        g.connect("A", "B").unwrap();
        let a = g.index("A").unwrap();
        assert_eq!(g.neighbors(a), &[2, 1]);
    }

    #[test]
    fn test_self_loop_permitted() {
        let mut g = triangle();
        g.connect("B", "B").unwrap();
        let b = g.index("B").unwrap();
        assert_eq!(g.neighbors(b), &[b]);
        assert_eq!(g.incoming(b), &[b]);
    }

    #[test]
    fn test_isolated_station_is_valid() {
        let mut g = StationGraph::new();
        let id = g.add_station("Lonely", Vec2::new(5.0, 5.0)).unwrap();
        assert!(g.neighbors(id).is_empty());
        assert!(g.incoming(id).is_empty());
    }

    #[test]
    fn test_set_position() {
        let mut g = triangle();
        let b = g.index("B").unwrap();
        g.set_position(b, Vec2::new(42.0, 7.0));
        assert_eq!(g.position(b), Vec2::new(42.0, 7.0));
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut g = triangle();
        g.connect("A", "B").unwrap();
        let snapshot = g.clone();
        g.connect("B", "C").unwrap();
        g.set_position(0, Vec2::new(999.0, 999.0));

        let b = snapshot.index("B").unwrap();
        assert!(snapshot.neighbors(b).is_empty());
        assert_eq!(snapshot.position(0), Vec2::new(0.0, 0.0));
    }
}
