//! Path search over the flight network: weighted shortest path (Dijkstra),
//! bounded simple-path enumeration (DFS), and the bounded longest-path
//! approximation.
//!
//! All searches are deterministic: the priority queue orders equal
//! distances by node-insertion index and DFS visits neighbors in
//! edge-insertion order.
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

use super::Query;
use crate::errors::QueryError;
use crate::graph::FlightGraph;

/// Fixed edge-count cutoff for the longest-path approximation.
pub const LONGEST_PATH_CUTOFF: usize = 10;

/// A concrete route through the network with its total distance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub path: Vec<String>,
    pub distance: u64,
}

fn endpoints(
    graph: &FlightGraph,
    origin: &str,
    destination: &str,
) -> Result<(usize, usize), QueryError> {
    let src = graph
        .node_index(origin)
        .ok_or_else(|| QueryError::NodeNotFound(origin.to_string()))?;
    let dst = graph
        .node_index(destination)
        .ok_or_else(|| QueryError::NodeNotFound(destination.to_string()))?;
    Ok((src, dst))
}

/// Cheapest route between two airports by total flight distance.
///
/// `Ok(None)` when both airports exist but lie in different components.
pub struct ShortestPathQuery {
    pub origin: String,
    pub destination: String,
}

impl ShortestPathQuery {
    #[must_use]
    pub fn new(origin: &str, destination: &str) -> Self {
        Self { origin: origin.to_string(), destination: destination.to_string() }
    }
}

impl Query<Result<Option<Route>, QueryError>> for ShortestPathQuery {
    fn run(&self, graph: &FlightGraph) -> Result<Option<Route>, QueryError> {
        let (src, dst) = endpoints(graph, &self.origin, &self.destination)?;
        Ok(dijkstra(graph, src, dst))
    }
}

/// Total distance of the route `ShortestPathQuery` returns.
pub struct ShortestDistanceQuery {
    pub origin: String,
    pub destination: String,
}

impl ShortestDistanceQuery {
    #[must_use]
    pub fn new(origin: &str, destination: &str) -> Self {
        Self { origin: origin.to_string(), destination: destination.to_string() }
    }
}

impl Query<Result<Option<u64>, QueryError>> for ShortestDistanceQuery {
    fn run(&self, graph: &FlightGraph) -> Result<Option<u64>, QueryError> {
        let (src, dst) = endpoints(graph, &self.origin, &self.destination)?;
        Ok(dijkstra(graph, src, dst).map(|route| route.distance))
    }
}

fn dijkstra(graph: &FlightGraph, src: usize, dst: usize) -> Option<Route> {
    let n = graph.node_count();
    let mut dist: Vec<Option<u64>> = vec![None; n];
    let mut prev: Vec<Option<usize>> = vec![None; n];
    // Reverse on (distance, insertion index): equal-cost candidates settle
    // lowest-index first, which fixes the tie-break to insertion order.
    let mut heap: BinaryHeap<Reverse<(u64, usize)>> = BinaryHeap::new();
    dist[src] = Some(0);
    heap.push(Reverse((0, src)));

    while let Some(Reverse((d, u))) = heap.pop() {
        if dist[u] != Some(d) {
            continue; // stale entry
        }
        if u == dst {
            break;
        }
        for (v, w) in graph.adjacency(u) {
            let nd = d + w;
            // Strictly-better only: an equal-cost relaxation keeps the
            // predecessor that settled first.
            if dist[v].map_or(true, |cur| nd < cur) {
                dist[v] = Some(nd);
                prev[v] = Some(u);
                heap.push(Reverse((nd, v)));
            }
        }
    }

    let distance = dist[dst]?;
    let mut order = vec![dst];
    let mut cur = dst;
    while let Some(p) = prev[cur] {
        order.push(p);
        cur = p;
    }
    order.reverse();
    Some(Route {
        path: order.into_iter().map(|i| graph.code_at(i).to_string()).collect(),
        distance,
    })
}

/// Every simple path between two airports with at most `max_hops` flights.
///
/// Enumeration is exponential in the worst case; `max_paths` caps the
/// number of paths collected and stops the search once reached. Callers
/// serving requests should always set it.
pub struct AllSimplePathsQuery {
    pub origin: String,
    pub destination: String,
    pub max_hops: usize,
    pub max_paths: Option<usize>,
}

impl AllSimplePathsQuery {
    #[must_use]
    pub fn new(origin: &str, destination: &str, max_hops: usize) -> Self {
        Self {
            origin: origin.to_string(),
            destination: destination.to_string(),
            max_hops,
            max_paths: None,
        }
    }

    #[must_use]
    pub fn with_cap(mut self, max_paths: usize) -> Self {
        self.max_paths = Some(max_paths);
        self
    }
}

impl Query<Result<Vec<Vec<String>>, QueryError>> for AllSimplePathsQuery {
    fn run(&self, graph: &FlightGraph) -> Result<Vec<Vec<String>>, QueryError> {
        let (src, dst) = endpoints(graph, &self.origin, &self.destination)?;
        let cap = self.max_paths.unwrap_or(usize::MAX);
        if cap == 0 {
            return Ok(Vec::new());
        }

        let mut visited = vec![false; graph.node_count()];
        visited[src] = true;
        let mut path = vec![src];
        let mut found: Vec<Vec<usize>> = Vec::new();
        enumerate(graph, src, dst, self.max_hops, cap, &mut visited, &mut path, &mut found);

        Ok(found
            .into_iter()
            .map(|p| p.into_iter().map(|i| graph.code_at(i).to_string()).collect())
            .collect())
    }
}

// Depth-first enumeration of simple paths; returns false once the cap is
// reached so the whole search unwinds.
#[allow(clippy::too_many_arguments)]
fn enumerate(
    graph: &FlightGraph,
    u: usize,
    dst: usize,
    budget: usize,
    cap: usize,
    visited: &mut [bool],
    path: &mut Vec<usize>,
    found: &mut Vec<Vec<usize>>,
) -> bool {
    if u == dst {
        found.push(path.clone());
        return found.len() < cap;
    }
    if budget == 0 {
        return true;
    }
    for (v, _) in graph.adjacency(u) {
        if visited[v] {
            continue;
        }
        visited[v] = true;
        path.push(v);
        let keep_going = enumerate(graph, v, dst, budget - 1, cap, visited, path, found);
        path.pop();
        visited[v] = false;
        if !keep_going {
            return false;
        }
    }
    true
}

/// Longest simple path between two airports, approximated by taking the
/// node-richest path among those with at most [`LONGEST_PATH_CUTOFF`]
/// flights. Ties go to the first path found in DFS order.
///
/// This is intentionally a bounded-depth approximation, not an exact
/// longest-simple-path solver.
pub struct LongestPathQuery {
    pub origin: String,
    pub destination: String,
}

impl LongestPathQuery {
    #[must_use]
    pub fn new(origin: &str, destination: &str) -> Self {
        Self { origin: origin.to_string(), destination: destination.to_string() }
    }
}

impl Query<Result<Option<Vec<String>>, QueryError>> for LongestPathQuery {
    fn run(&self, graph: &FlightGraph) -> Result<Option<Vec<String>>, QueryError> {
        let (src, dst) = endpoints(graph, &self.origin, &self.destination)?;

        let mut visited = vec![false; graph.node_count()];
        visited[src] = true;
        let mut path = vec![src];
        let mut best: Option<Vec<usize>> = None;
        longest(graph, src, dst, LONGEST_PATH_CUTOFF, &mut visited, &mut path, &mut best);

        Ok(best.map(|p| p.into_iter().map(|i| graph.code_at(i).to_string()).collect()))
    }
}

fn longest(
    graph: &FlightGraph,
    u: usize,
    dst: usize,
    budget: usize,
    visited: &mut [bool],
    path: &mut Vec<usize>,
    best: &mut Option<Vec<usize>>,
) {
    if u == dst {
        // Strictly longer only, so the first path found wins ties.
        if best.as_ref().map_or(true, |b| path.len() > b.len()) {
            *best = Some(path.clone());
        }
        return;
    }
    if budget == 0 {
        return;
    }
    for (v, _) in graph.adjacency(u) {
        if visited[v] {
            continue;
        }
        visited[v] = true;
        path.push(v);
        longest(graph, v, dst, budget - 1, visited, path, best);
        path.pop();
        visited[v] = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::tests::sample_graph;
    use crate::graph::FlightGraph;

    #[test]
    fn shortest_path_follows_weights() {
        let g = sample_graph();
        let route = ShortestPathQuery::new("MAD", "JFK").run(&g).unwrap().unwrap();
        assert_eq!(route.path, vec!["MAD", "LHR", "JFK"]);
        assert_eq!(route.distance, 6700);
    }

    #[test]
    fn shortest_path_across_components_is_none() {
        let g = sample_graph();
        assert_eq!(ShortestPathQuery::new("MAD", "ISO").run(&g), Ok(None));
        assert_eq!(ShortestDistanceQuery::new("MAD", "ISO").run(&g), Ok(None));
    }

    #[test]
    fn shortest_path_unknown_endpoint_is_node_not_found() {
        let g = sample_graph();
        assert_eq!(
            ShortestPathQuery::new("MAD", "XXX").run(&g),
            Err(QueryError::NodeNotFound("XXX".to_string()))
        );
        assert_eq!(
            ShortestPathQuery::new("YYY", "MAD").run(&g),
            Err(QueryError::NodeNotFound("YYY".to_string()))
        );
    }

    #[test]
    fn shortest_path_to_self_is_single_node() {
        let g = sample_graph();
        let route = ShortestPathQuery::new("MAD", "MAD").run(&g).unwrap().unwrap();
        assert_eq!(route.path, vec!["MAD"]);
        assert_eq!(route.distance, 0);
    }

    #[test]
    fn shortest_distance_matches_path_weight_sum() {
        let g = sample_graph();
        let route = ShortestPathQuery::new("BCN", "JFK").run(&g).unwrap().unwrap();
        let dist = ShortestDistanceQuery::new("BCN", "JFK").run(&g).unwrap().unwrap();
        assert_eq!(route.path, vec!["BCN", "MAD", "LHR", "JFK"]);
        assert_eq!(dist, 500 + 1200 + 5500);
        assert_eq!(dist, route.distance);
    }

    // Two equal-cost routes A->B: direct (10) and via C (4+6). The direct
    // edge is inserted after the detour, but B has a lower insertion index
    // than C, so the tie resolves to the direct hop.
    #[test]
    fn equal_cost_tie_prefers_lower_insertion_order_next_hop() {
        let mut g = FlightGraph::new();
        g.add_airport("AAA", "", "", "");
        g.add_airport("BBB", "", "", "");
        g.add_airport("CCC", "", "", "");
        g.add_flight("AAA", "CCC", 4);
        g.add_flight("CCC", "BBB", 6);
        g.add_flight("AAA", "BBB", 10);

        let route = ShortestPathQuery::new("AAA", "BBB").run(&g).unwrap().unwrap();
        assert_eq!(route.distance, 10);
        assert_eq!(route.path, vec!["AAA", "BBB"]);
    }

    #[test]
    fn all_simple_paths_within_hop_budget() {
        let g = sample_graph();
        let paths = AllSimplePathsQuery::new("MAD", "JFK", 5).run(&g).unwrap();
        assert_eq!(paths, vec![vec!["MAD", "LHR", "JFK"]]);

        // One hop is not enough to reach JFK from MAD.
        let paths = AllSimplePathsQuery::new("MAD", "JFK", 1).run(&g).unwrap();
        assert!(paths.is_empty());
    }

    #[test]
    fn all_simple_paths_enumerates_alternatives_in_adjacency_order() {
        // Diamond: AAA-BBB-DDD and AAA-CCC-DDD, plus direct AAA-DDD.
        let mut g = FlightGraph::new();
        g.add_flight("AAA", "BBB", 1);
        g.add_flight("AAA", "CCC", 1);
        g.add_flight("BBB", "DDD", 1);
        g.add_flight("CCC", "DDD", 1);
        g.add_flight("AAA", "DDD", 5);

        let paths = AllSimplePathsQuery::new("AAA", "DDD", 2).run(&g).unwrap();
        assert_eq!(
            paths,
            vec![
                vec!["AAA", "BBB", "DDD"],
                vec!["AAA", "CCC", "DDD"],
                vec!["AAA", "DDD"],
            ]
        );
    }

    #[test]
    fn all_simple_paths_cap_stops_enumeration() {
        let mut g = FlightGraph::new();
        g.add_flight("AAA", "BBB", 1);
        g.add_flight("AAA", "CCC", 1);
        g.add_flight("BBB", "DDD", 1);
        g.add_flight("CCC", "DDD", 1);

        let capped = AllSimplePathsQuery::new("AAA", "DDD", 3).with_cap(1).run(&g).unwrap();
        assert_eq!(capped.len(), 1);
        assert_eq!(capped[0], vec!["AAA", "BBB", "DDD"]);
    }

    #[test]
    fn longest_path_prefers_more_nodes() {
        let g = sample_graph();
        // BCN->LHR: direct route does not exist; via MAD is the only one.
        let path = LongestPathQuery::new("BCN", "LHR").run(&g).unwrap().unwrap();
        assert_eq!(path, vec!["BCN", "MAD", "LHR"]);

        let mut g = FlightGraph::new();
        g.add_flight("AAA", "DDD", 1);
        g.add_flight("AAA", "BBB", 1);
        g.add_flight("BBB", "CCC", 1);
        g.add_flight("CCC", "DDD", 1);
        let path = LongestPathQuery::new("AAA", "DDD").run(&g).unwrap().unwrap();
        assert_eq!(path, vec!["AAA", "BBB", "CCC", "DDD"]);
    }

    #[test]
    fn longest_path_without_route_is_none() {
        let g = sample_graph();
        assert_eq!(LongestPathQuery::new("MAD", "ISO").run(&g), Ok(None));
    }

    #[test]
    fn longest_path_respects_fixed_cutoff() {
        // A chain of 12 hops from START to END plus a direct edge: the
        // chain exceeds the cutoff, so only the direct route qualifies.
        let mut g = FlightGraph::new();
        let codes: Vec<String> = (0..13).map(|i| format!("N{i:02}")).collect();
        for pair in codes.windows(2) {
            g.add_flight(&pair[0], &pair[1], 1);
        }
        g.add_flight("N00", "N12", 100);

        let path = LongestPathQuery::new("N00", "N12").run(&g).unwrap().unwrap();
        assert_eq!(path, vec!["N00", "N12"]);
    }
}
