//! Graph model and loader for the crate.
//!
//! This module defines the core data structures for the flight network
//! (`FlightGraph`, `Airport`) and the upsert path that populates them from
//! airport and flight records. The graph is simple and undirected: nodes
//! are airports keyed by code, edges are flights weighted by distance.
//!
//! You typically construct a graph via `FlightGraph::from_records` (or
//! `crate::data::load_network` when starting from JSON files) and then pass
//! it to queries in `crate::query`. Once loaded the graph is never mutated;
//! every query takes `&FlightGraph`, so a loaded graph can be shared
//! read-only across threads.
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::data::{AirportRecord, FlightRecord};
use crate::errors::DataError;

/// Airport attributes carried on each node. Identity is the `code`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Airport {
    pub code: String,
    pub name: String,
    pub city: String,
    pub country: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AdjacencyEntry {
    to: usize,
    distance: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Node {
    airport: Airport,
    // Neighbors in edge-insertion order; mirrored on both endpoints.
    adjacency: Vec<AdjacencyEntry>,
}

/// Weighted undirected graph of airports and flights.
///
/// Nodes live in an arena (`nodes`) whose positions record insertion order;
/// the arena index is the tie-break key used by queries that must be
/// deterministic across equal-cost or equal-degree alternatives.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlightGraph {
    nodes: Vec<Node>,
    index: HashMap<String, usize>,
    edge_count: usize,
}

impl FlightGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert an airport node. Re-adding a known code overwrites its
    /// attributes (last write wins) and keeps its insertion position.
    pub fn add_airport(&mut self, code: &str, name: &str, city: &str, country: &str) {
        let airport = Airport {
            code: code.to_string(),
            name: name.to_string(),
            city: city.to_string(),
            country: country.to_string(),
        };
        match self.index.get(code) {
            Some(&i) => self.nodes[i].airport = airport,
            None => {
                self.index.insert(code.to_string(), self.nodes.len());
                self.nodes.push(Node { airport, adjacency: Vec::new() });
            }
        }
    }

    // Look up a node by code, creating a bare node (empty attributes) for
    // codes first seen as a flight endpoint.
    fn ensure_node(&mut self, code: &str) -> usize {
        if let Some(&i) = self.index.get(code) {
            return i;
        }
        let i = self.nodes.len();
        self.index.insert(code.to_string(), i);
        self.nodes.push(Node {
            airport: Airport { code: code.to_string(), ..Airport::default() },
            adjacency: Vec::new(),
        });
        i
    }

    /// Upsert a flight edge on the unordered pair. Re-adding an existing
    /// pair overwrites its distance (never additive) and keeps its position
    /// in both adjacency lists. Unknown endpoints are created as bare nodes.
    pub fn add_flight(&mut self, origin: &str, destination: &str, distance: u64) {
        let a = self.ensure_node(origin);
        let b = self.ensure_node(destination);

        if let Some(entry) = self.nodes[a].adjacency.iter_mut().find(|e| e.to == b) {
            entry.distance = distance;
            if a != b {
                if let Some(back) = self.nodes[b].adjacency.iter_mut().find(|e| e.to == a) {
                    back.distance = distance;
                }
            }
            return;
        }

        self.nodes[a].adjacency.push(AdjacencyEntry { to: b, distance });
        if a != b {
            self.nodes[b].adjacency.push(AdjacencyEntry { to: a, distance });
        }
        self.edge_count += 1;
    }

    /// Apply `add_airport` for every airport record, then `add_flight` for
    /// every flight record, in sequence order.
    pub fn load(&mut self, airports: &[AirportRecord], flights: &[FlightRecord]) {
        for a in airports {
            self.add_airport(&a.code, &a.name, &a.city, &a.country);
        }
        for f in flights {
            self.add_flight(&f.origin, &f.destination, f.distance);
        }
    }

    /// Build a fresh graph from record sequences.
    #[must_use]
    pub fn from_records(airports: &[AirportRecord], flights: &[FlightRecord]) -> Self {
        let mut graph = Self::new();
        graph.load(airports, flights);
        graph
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    /// Attributes of a known airport.
    #[must_use]
    pub fn airport(&self, code: &str) -> Option<&Airport> {
        self.index.get(code).map(|&i| &self.nodes[i].airport)
    }

    /// Direct neighbors of a code with flight distances, in edge-insertion
    /// order. Empty for an unknown code.
    #[must_use]
    pub fn neighbors(&self, code: &str) -> Vec<(&str, u64)> {
        match self.index.get(code) {
            Some(&i) => self
                .nodes[i]
                .adjacency
                .iter()
                .map(|e| (self.nodes[e.to].airport.code.as_str(), e.distance))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Airport codes in node-insertion order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.airport.code.as_str())
    }

    /// All airports in node-insertion order.
    pub fn airports(&self) -> impl Iterator<Item = &Airport> {
        self.nodes.iter().map(|n| &n.airport)
    }

    // Index-based view used by the algorithms in `crate::query`.

    pub(crate) fn node_index(&self, code: &str) -> Option<usize> {
        self.index.get(code).copied()
    }

    pub(crate) fn code_at(&self, i: usize) -> &str {
        self.nodes[i].airport.code.as_str()
    }

    pub(crate) fn adjacency(&self, i: usize) -> impl Iterator<Item = (usize, u64)> + '_ {
        self.nodes[i].adjacency.iter().map(|e| (e.to, e.distance))
    }

    pub(crate) fn degree_at(&self, i: usize) -> usize {
        self.nodes[i].adjacency.len()
    }

    /// Save the graph as pretty-printed JSON.
    ///
    /// # Errors
    /// Returns `DataError::Io` if serialization output cannot be written.
    pub fn save_json(&self, path: &std::path::Path) -> Result<(), DataError> {
        let data = serde_json::to_string_pretty(self)
            .map_err(|source| DataError::Json { file: path.to_path_buf(), source })?;
        std::fs::write(path, data)
            .map_err(|source| DataError::Io { file: path.to_path_buf(), source })
    }

    /// Load a previously saved graph from JSON.
    ///
    /// # Errors
    /// Returns `DataError` if reading the file fails or the JSON is invalid.
    pub fn load_json(path: &std::path::Path) -> Result<Self, DataError> {
        let data = std::fs::read_to_string(path)
            .map_err(|source| DataError::Io { file: path.to_path_buf(), source })?;
        serde_json::from_str(&data)
            .map_err(|source| DataError::Json { file: path.to_path_buf(), source })
    }
}
