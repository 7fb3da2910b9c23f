//! DOT rendering of the flight network for Graphviz.
//!
//! Nodes are airports (labeled with code and city), edges are flights
//! labeled with their distance. With `clusters` enabled, nodes are colored
//! by the community partition from `query::ClustersQuery`.
use std::collections::HashMap;
use std::fmt::Write as _;

use crate::graph::FlightGraph;
use crate::query::{ClustersQuery, Query};

#[derive(Debug, Clone, Copy)]
pub enum DotTheme {
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy)]
pub enum RankDir {
    LR,
    TB,
}

#[derive(Debug, Clone, Copy)]
pub struct DotOptions {
    pub clusters: bool,
    pub legend: bool,
    pub theme: DotTheme,
    pub rankdir: RankDir,
}

impl Default for DotOptions {
    fn default() -> Self {
        Self { clusters: true, legend: true, theme: DotTheme::Light, rankdir: RankDir::LR }
    }
}

// Community fill colors, cycled when there are more communities than
// entries.
const PALETTE: [&str; 8] = [
    "#a6cee3", "#b2df8a", "#fb9a99", "#fdbf6f", "#cab2d6", "#ffff99", "#1f78b4", "#33a02c",
];

#[derive(Debug, Default)]
pub struct DotGenerator;

impl DotGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self {}
    }

    #[must_use]
    pub fn generate_dot(&self, graph: &FlightGraph) -> String {
        self.generate_dot_with_options(graph, DotOptions::default())
    }

    #[must_use]
    pub fn generate_dot_with_options(&self, graph: &FlightGraph, opts: DotOptions) -> String {
        let (bg, fg, edge) = match opts.theme {
            DotTheme::Light => ("white", "black", "#666666"),
            DotTheme::Dark => ("#1e1e1e", "#e0e0e0", "#999999"),
        };
        let rankdir = match opts.rankdir {
            RankDir::LR => "LR",
            RankDir::TB => "TB",
        };

        let community_of: HashMap<String, usize> = if opts.clusters {
            ClustersQuery::new()
                .run(graph)
                .into_iter()
                .enumerate()
                .flat_map(|(ci, cluster)| cluster.into_iter().map(move |code| (code, ci)))
                .collect()
        } else {
            HashMap::new()
        };

        let mut out = String::new();
        let _ = writeln!(out, "graph flights {{");
        let _ = writeln!(out, "  bgcolor=\"{bg}\";");
        let _ = writeln!(out, "  rankdir={rankdir};");
        let _ = writeln!(
            out,
            "  node [shape=ellipse, style=filled, color=\"{fg}\", fontcolor=\"{fg}\"];"
        );
        let _ = writeln!(out, "  edge [color=\"{edge}\", fontcolor=\"{fg}\"];");

        for airport in graph.airports() {
            let label = if airport.city.is_empty() {
                airport.code.clone()
            } else {
                format!("{}\\n{}", airport.code, airport.city)
            };
            let fill = community_of
                .get(&airport.code)
                .map_or("#dddddd", |&ci| PALETTE[ci % PALETTE.len()]);
            let _ = writeln!(
                out,
                "  \"{}\" [label=\"{}\", fillcolor=\"{}\"];",
                airport.code, label, fill
            );
        }

        // Each unordered pair once; the lexicographic guard also skips
        // self-loops.
        for code in graph.codes() {
            for (neighbor, distance) in graph.neighbors(code) {
                if code < neighbor {
                    let _ = writeln!(out, "  \"{code}\" -- \"{neighbor}\" [label=\"{distance}\"];");
                }
            }
        }

        if opts.legend {
            let _ = writeln!(
                out,
                "  label=\"{} airports, {} flights\";",
                graph.node_count(),
                graph.edge_count()
            );
            let _ = writeln!(out, "  labelloc=b;");
        }

        let _ = writeln!(out, "}}");
        out
    }
}
