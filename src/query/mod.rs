//! Queries over a loaded `FlightGraph`.
//!
//! Every query is a struct implementing [`Query`] and runs against an
//! immutable graph reference. Connectivity and degree queries live here;
//! path search is in [`paths`] and community detection in [`community`].
use serde::Serialize;
use std::collections::VecDeque;

use crate::errors::QueryError;
use crate::graph::{Airport, FlightGraph};

pub mod community;
pub mod paths;

pub use community::ClustersQuery;
pub use paths::{
    AllSimplePathsQuery, LongestPathQuery, Route, ShortestDistanceQuery, ShortestPathQuery,
    LONGEST_PATH_CUTOFF,
};

/// Query trait implemented by all query types.
///
/// Given an immutable reference to a `FlightGraph`, returns a result of
/// type `R`.
pub trait Query<R> {
    fn run(&self, graph: &FlightGraph) -> R;
}

/// List every airport with its attributes, in node-insertion order.
#[derive(Debug, Default)]
pub struct AirportsQuery;

impl AirportsQuery {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Query<Vec<Airport>> for AirportsQuery {
    fn run(&self, graph: &FlightGraph) -> Vec<Airport> {
        graph.airports().cloned().collect()
    }
}

/// Direct neighbors of an airport, in edge-insertion order.
///
/// An unknown code yields an empty list, not an error.
pub struct ConnectionsQuery {
    pub airport: String,
}

impl ConnectionsQuery {
    #[must_use]
    pub fn new(airport: &str) -> Self {
        Self { airport: airport.to_string() }
    }
}

impl Query<Vec<String>> for ConnectionsQuery {
    fn run(&self, graph: &FlightGraph) -> Vec<String> {
        graph.neighbors(&self.airport).into_iter().map(|(code, _)| code.to_string()).collect()
    }
}

/// Airports with zero connections, in node-insertion order.
#[derive(Debug, Default)]
pub struct IsolatedAirportsQuery;

impl IsolatedAirportsQuery {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Query<Vec<String>> for IsolatedAirportsQuery {
    fn run(&self, graph: &FlightGraph) -> Vec<String> {
        (0..graph.node_count())
            .filter(|&i| graph.degree_at(i) == 0)
            .map(|i| graph.code_at(i).to_string())
            .collect()
    }
}

/// Airports whose connection count equals `degree` exactly, in
/// node-insertion order.
pub struct DegreeQuery {
    pub degree: usize,
}

impl DegreeQuery {
    #[must_use]
    pub fn new(degree: usize) -> Self {
        Self { degree }
    }
}

impl Query<Vec<String>> for DegreeQuery {
    fn run(&self, graph: &FlightGraph) -> Vec<String> {
        (0..graph.node_count())
            .filter(|&i| graph.degree_at(i) == self.degree)
            .map(|i| graph.code_at(i).to_string())
            .collect()
    }
}

/// One row of the hub ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HubEntry {
    pub airport: String,
    pub connections: usize,
}

/// Top-N airports by connection count, descending. Equal degrees keep
/// node-insertion order (stable sort over insertion-ordered input).
pub struct HubsQuery {
    pub top: usize,
}

impl HubsQuery {
    #[must_use]
    pub fn new(top: usize) -> Self {
        Self { top }
    }
}

impl Query<Result<Vec<HubEntry>, QueryError>> for HubsQuery {
    fn run(&self, graph: &FlightGraph) -> Result<Vec<HubEntry>, QueryError> {
        if self.top == 0 {
            return Err(QueryError::InvalidArgument("top must be positive".to_string()));
        }
        let mut rows: Vec<HubEntry> = (0..graph.node_count())
            .map(|i| HubEntry {
                airport: graph.code_at(i).to_string(),
                connections: graph.degree_at(i),
            })
            .collect();
        rows.sort_by(|a, b| b.connections.cmp(&a.connections));
        rows.truncate(self.top);
        Ok(rows)
    }
}

/// Whole-network statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkStats {
    pub total_airports: usize,
    pub total_flights: usize,
    pub density: f64,
    pub is_connected: bool,
}

/// Compute node/edge counts, density and connectivity.
///
/// Density is `2E / (N(N-1))` for `N > 1` and `0` otherwise. A graph with
/// zero or one node is trivially connected.
#[derive(Debug, Default)]
pub struct StatsQuery;

impl StatsQuery {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Query<NetworkStats> for StatsQuery {
    fn run(&self, graph: &FlightGraph) -> NetworkStats {
        let n = graph.node_count();
        let e = graph.edge_count();
        let density = if n > 1 {
            (2 * e) as f64 / (n * (n - 1)) as f64
        } else {
            0.0
        };
        NetworkStats {
            total_airports: n,
            total_flights: e,
            density,
            is_connected: is_connected(graph),
        }
    }
}

// BFS from the first node; connected iff every node is reached.
fn is_connected(graph: &FlightGraph) -> bool {
    let n = graph.node_count();
    if n <= 1 {
        return true;
    }
    let mut visited = vec![false; n];
    let mut queue = VecDeque::new();
    visited[0] = true;
    queue.push_back(0);
    let mut seen = 1usize;
    while let Some(u) = queue.pop_front() {
        for (v, _) in graph.adjacency(u) {
            if !visited[v] {
                visited[v] = true;
                seen += 1;
                queue.push_back(v);
            }
        }
    }
    seen == n
}
