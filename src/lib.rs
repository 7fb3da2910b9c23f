//! flight-network-explorer — Flight Network Graph Explorer
//!
//! Load a weighted undirected graph of airports and flights from JSON data
//! files and query it.
//!
//! # Features
//! - Upsert-based load with deterministic insertion order (stable tie-breaks)
//! - Queries: shortest path (Dijkstra), bounded all-routes enumeration,
//!   approximate longest route, hubs, isolated airports, degree filters,
//!   connectivity stats, greedy-modularity clusters
//! - DOT visualization with community coloring
//!
//! # Quickstart (Library)
//! ```no_run
//! use flight_network_explorer::data;
//! use flight_network_explorer::query::{Query, ShortestPathQuery};
//! use std::path::Path;
//!
//! let graph = data::load_network(
//!     Path::new("data/airports.json"),
//!     Path::new("data/flights.json"),
//! ).expect("load network");
//! let route = ShortestPathQuery::new("MAD", "JFK").run(&graph).expect("known airports");
//! println!("route: {route:?}");
//! ```
//!
//! # Quickstart (CLI)
//! ```text
//! flight-network-explorer build --save graph.json --dot network.dot
//! flight-network-explorer query shortest-path --origin MAD --destination JFK --format json
//! ```
//!
//! The graph is built once at startup and never mutated afterwards; every
//! query borrows it immutably, so one instance can serve any number of
//! concurrent readers.
pub mod app;
pub mod cli;
pub mod data;
pub mod errors;
pub mod graph;
pub mod query;
pub mod utils;
pub mod visualization;
