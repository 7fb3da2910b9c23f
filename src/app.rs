use crate::cli::{
    Cli, Commands, DotRankDirArg, DotThemeArg, OnOffArg, OutputFormat, QueryCommands, SourceArgs,
};
use crate::data;
use crate::errors::QueryError;
use crate::graph::{Airport, FlightGraph};
use crate::query::{
    AirportsQuery, AllSimplePathsQuery, ClustersQuery, ConnectionsQuery, DegreeQuery, HubEntry,
    HubsQuery, IsolatedAirportsQuery, LongestPathQuery, Query, ShortestPathQuery, StatsQuery,
};
use crate::utils::config::{self, Config};
use crate::visualization::{DotGenerator, DotOptions, DotTheme, RankDir};
use clap::CommandFactory;
use clap_complete::generate;
use std::fs;
use std::io;
use std::path::PathBuf;

// Safety valve for route enumeration when neither the CLI nor the config
// caps it.
const DEFAULT_MAX_PATHS: usize = 10_000;

/// Run the CLI logic in-process.
///
/// Returns an exit code: 0 on success (including "no route" results),
/// 1 for load failures and unknown airports, 2 for invalid arguments.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn run_cli(cli: Cli) -> i32 {
    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let bin_name = env!("CARGO_PKG_NAME");
            let mut out = io::stdout();
            generate(shell, &mut cmd, bin_name, &mut out);
            0
        }
        Commands::Build { source, save, dot, dot_clusters, dot_legend, dot_theme, dot_rankdir } => {
            let graph = match resolve_graph(&source) {
                Ok(g) => g,
                Err(code) => return code,
            };

            if let Some(save_path) = save {
                if let Err(e) = graph.save_json(&save_path) {
                    eprintln!("Failed to save graph JSON {}: {e}", save_path.display());
                    return 1;
                }
            }

            if let Some(dot_path) = dot {
                let mut clusters = matches!(dot_clusters, OnOffArg::On);
                let mut legend = matches!(dot_legend, OnOffArg::On);
                let mut theme = match dot_theme {
                    DotThemeArg::Dark => DotTheme::Dark,
                    DotThemeArg::Light => DotTheme::Light,
                };
                let mut rankdir = match dot_rankdir {
                    DotRankDirArg::TB => RankDir::TB,
                    DotRankDirArg::LR => RankDir::LR,
                };
                if let Some(cfg) = load_config(&source) {
                    if let Some(dot_cfg) = cfg.dot {
                        if let Some(v) = dot_cfg.clusters {
                            clusters = v;
                        }
                        if let Some(v) = dot_cfg.legend {
                            legend = v;
                        }
                        if let Some(v) = dot_cfg.theme {
                            theme = if v == "dark" { DotTheme::Dark } else { DotTheme::Light };
                        }
                        if let Some(v) = dot_cfg.rankdir {
                            rankdir = if v == "TB" { RankDir::TB } else { RankDir::LR };
                        }
                    }
                }
                let opts = DotOptions { clusters, legend, theme, rankdir };
                let content = DotGenerator::new().generate_dot_with_options(&graph, opts);
                if let Err(e) = fs::write(&dot_path, content) {
                    eprintln!("Failed to write DOT output {}: {e}", dot_path.display());
                    return 1;
                }
            }

            if !cli.quiet {
                println!(
                    "Loaded {} airports and {} flights",
                    graph.node_count(),
                    graph.edge_count()
                );
            }
            0
        }
        Commands::Query { query } => match query {
            QueryCommands::Airports { source, format } => {
                let graph = match resolve_graph(&source) {
                    Ok(g) => g,
                    Err(code) => return code,
                };
                let airports = AirportsQuery::new().run(&graph);
                if matches!(resolve_format(format, &source), OutputFormat::Json) {
                    #[derive(serde::Serialize)]
                    struct Out {
                        airports: Vec<Airport>,
                    }
                    print_json(&Out { airports })
                } else {
                    let rows: Vec<Vec<String>> = airports
                        .into_iter()
                        .map(|a| vec![a.code, a.name, a.city, a.country])
                        .collect();
                    let table =
                        crate::utils::table::render(&["Code", "Name", "City", "Country"], &rows);
                    println!("{table}");
                    0
                }
            }
            QueryCommands::Stats { source, format } => {
                let graph = match resolve_graph(&source) {
                    Ok(g) => g,
                    Err(code) => return code,
                };
                let stats = StatsQuery::new().run(&graph);
                if matches!(resolve_format(format, &source), OutputFormat::Json) {
                    print_json(&stats)
                } else {
                    let rows = vec![
                        vec!["Airports".to_string(), stats.total_airports.to_string()],
                        vec!["Flights".to_string(), stats.total_flights.to_string()],
                        vec!["Density".to_string(), format!("{:.4}", stats.density)],
                        vec!["Connected".to_string(), stats.is_connected.to_string()],
                    ];
                    let table = crate::utils::table::render(&["Metric", "Value"], &rows);
                    println!("{table}");
                    0
                }
            }
            QueryCommands::ShortestPath { source, origin, destination, format } => {
                let graph = match resolve_graph(&source) {
                    Ok(g) => g,
                    Err(code) => return code,
                };
                let origin = normalize(&origin);
                let destination = normalize(&destination);
                let route = match ShortestPathQuery::new(&origin, &destination).run(&graph) {
                    Ok(r) => r,
                    Err(e) => return query_failed(&e),
                };
                let json = matches!(resolve_format(format, &source), OutputFormat::Json);
                match route {
                    Some(route) => {
                        if json {
                            #[derive(serde::Serialize)]
                            struct Out {
                                origin: String,
                                destination: String,
                                path: Vec<String>,
                                distance: u64,
                                stops: usize,
                            }
                            print_json(&Out {
                                origin,
                                destination,
                                stops: route.path.len().saturating_sub(2),
                                path: route.path,
                                distance: route.distance,
                            })
                        } else {
                            println!("{}", route.path.join(" -> "));
                            println!("Distance: {}", route.distance);
                            0
                        }
                    }
                    None => no_route(json),
                }
            }
            QueryCommands::AllPaths { source, origin, destination, max_hops, max_paths, format } => {
                let graph = match resolve_graph(&source) {
                    Ok(g) => g,
                    Err(code) => return code,
                };
                let origin = normalize(&origin);
                let destination = normalize(&destination);
                let cap = max_paths
                    .or_else(|| {
                        source
                            .config
                            .as_ref()
                            .and_then(|p| config::load_config_at(p))
                            .and_then(|c| c.query.and_then(|q| q.max_paths))
                    })
                    .unwrap_or(DEFAULT_MAX_PATHS);
                let paths = match AllSimplePathsQuery::new(&origin, &destination, max_hops)
                    .with_cap(cap)
                    .run(&graph)
                {
                    Ok(p) => p,
                    Err(e) => return query_failed(&e),
                };
                if matches!(resolve_format(format, &source), OutputFormat::Json) {
                    #[derive(serde::Serialize)]
                    struct Out {
                        origin: String,
                        destination: String,
                        total_paths: usize,
                        paths: Vec<Vec<String>>,
                    }
                    print_json(&Out { origin, destination, total_paths: paths.len(), paths })
                } else if paths.is_empty() {
                    println!("<no route>");
                    0
                } else {
                    for (i, path) in paths.iter().enumerate() {
                        println!("{}: {}", i + 1, path.join(" -> "));
                    }
                    0
                }
            }
            QueryCommands::Hubs { source, top, format } => {
                let graph = match resolve_graph(&source) {
                    Ok(g) => g,
                    Err(code) => return code,
                };
                let hubs = match HubsQuery::new(top).run(&graph) {
                    Ok(h) => h,
                    Err(e) => return query_failed(&e),
                };
                if matches!(resolve_format(format, &source), OutputFormat::Json) {
                    #[derive(serde::Serialize)]
                    struct Out {
                        hubs: Vec<HubEntry>,
                    }
                    print_json(&Out { hubs })
                } else {
                    let rows: Vec<Vec<String>> = hubs
                        .into_iter()
                        .map(|h| vec![h.airport, h.connections.to_string()])
                        .collect();
                    let table = crate::utils::table::render(&["Airport", "Connections"], &rows);
                    println!("{table}");
                    0
                }
            }
            QueryCommands::Isolated { source, format } => {
                let graph = match resolve_graph(&source) {
                    Ok(g) => g,
                    Err(code) => return code,
                };
                let isolated = IsolatedAirportsQuery::new().run(&graph);
                if matches!(resolve_format(format, &source), OutputFormat::Json) {
                    #[derive(serde::Serialize)]
                    struct Out {
                        isolated_airports: Vec<String>,
                    }
                    print_json(&Out { isolated_airports: isolated })
                } else if isolated.is_empty() {
                    println!("<none>");
                    0
                } else {
                    for code in isolated {
                        println!("{code}");
                    }
                    0
                }
            }
            QueryCommands::Connections { source, airport, format } => {
                let graph = match resolve_graph(&source) {
                    Ok(g) => g,
                    Err(code) => return code,
                };
                let airport = normalize(&airport);
                let connections = ConnectionsQuery::new(&airport).run(&graph);
                if matches!(resolve_format(format, &source), OutputFormat::Json) {
                    #[derive(serde::Serialize)]
                    struct Out {
                        airport: String,
                        connections: Vec<String>,
                        total: usize,
                    }
                    print_json(&Out { airport, total: connections.len(), connections })
                } else if connections.is_empty() {
                    println!("<none>");
                    0
                } else {
                    for code in connections {
                        println!("{code}");
                    }
                    0
                }
            }
            QueryCommands::ByDegree { source, degree, format } => {
                let graph = match resolve_graph(&source) {
                    Ok(g) => g,
                    Err(code) => return code,
                };
                let airports = DegreeQuery::new(degree).run(&graph);
                if matches!(resolve_format(format, &source), OutputFormat::Json) {
                    #[derive(serde::Serialize)]
                    struct Out {
                        degree: usize,
                        airports: Vec<String>,
                        total: usize,
                    }
                    print_json(&Out { degree, total: airports.len(), airports })
                } else if airports.is_empty() {
                    println!("<none>");
                    0
                } else {
                    for code in airports {
                        println!("{code}");
                    }
                    0
                }
            }
            QueryCommands::Clusters { source, format } => {
                let graph = match resolve_graph(&source) {
                    Ok(g) => g,
                    Err(code) => return code,
                };
                let clusters = ClustersQuery::new().run(&graph);
                if matches!(resolve_format(format, &source), OutputFormat::Json) {
                    #[derive(serde::Serialize)]
                    struct Out {
                        total_clusters: usize,
                        clusters: Vec<Vec<String>>,
                    }
                    print_json(&Out { total_clusters: clusters.len(), clusters })
                } else {
                    for (i, cluster) in clusters.iter().enumerate() {
                        println!("{}: {}", i + 1, cluster.join(", "));
                    }
                    0
                }
            }
            QueryCommands::LongestPath { source, origin, destination, format } => {
                let graph = match resolve_graph(&source) {
                    Ok(g) => g,
                    Err(code) => return code,
                };
                let origin = normalize(&origin);
                let destination = normalize(&destination);
                let path = match LongestPathQuery::new(&origin, &destination).run(&graph) {
                    Ok(p) => p,
                    Err(e) => return query_failed(&e),
                };
                let json = matches!(resolve_format(format, &source), OutputFormat::Json);
                match path {
                    Some(path) => {
                        if json {
                            #[derive(serde::Serialize)]
                            struct Out {
                                origin: String,
                                destination: String,
                                path: Vec<String>,
                                length: usize,
                            }
                            print_json(&Out { origin, destination, length: path.len(), path })
                        } else {
                            println!("{}", path.join(" -> "));
                            0
                        }
                    }
                    None => no_route(json),
                }
            }
        },
    }
}

// Codes are uppercased at this boundary; the core is case-sensitive.
fn normalize(code: &str) -> String {
    code.trim().to_uppercase()
}

fn load_config(source: &SourceArgs) -> Option<Config> {
    source.config.as_ref().and_then(|p| config::load_config_at(p))
}

fn resolve_graph(source: &SourceArgs) -> Result<FlightGraph, i32> {
    if let Some(path) = source.graph.as_ref() {
        return FlightGraph::load_json(path).map_err(|e| {
            eprintln!("Load graph failed: {e}");
            1
        });
    }
    let (airports, flights) = data_paths(source);
    data::load_network(&airports, &flights).map_err(|e| {
        eprintln!("Load failed: {e}");
        1
    })
}

// CLI arguments win; config [data] paths apply when the argument was left
// at its default.
fn data_paths(source: &SourceArgs) -> (PathBuf, PathBuf) {
    let mut airports = source.airports.clone();
    let mut flights = source.flights.clone();
    if let Some(data_cfg) = load_config(source).and_then(|c| c.data) {
        if airports == PathBuf::from("data/airports.json") {
            if let Some(a) = data_cfg.airports {
                airports = PathBuf::from(a);
            }
        }
        if flights == PathBuf::from("data/flights.json") {
            if let Some(f) = data_cfg.flights {
                flights = PathBuf::from(f);
            }
        }
    }
    (airports, flights)
}

fn resolve_format(format: OutputFormat, source: &SourceArgs) -> OutputFormat {
    if let Some(cfg) = load_config(source) {
        return match cfg.query.and_then(|q| q.default_format).as_deref() {
            Some("json") => OutputFormat::Json,
            Some("text") => OutputFormat::Text,
            _ => format,
        };
    }
    format
}

fn print_json<T: serde::Serialize>(value: &T) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(s) => {
            println!("{s}");
            0
        }
        Err(e) => {
            eprintln!("JSON encode error: {e}");
            1
        }
    }
}

// "No route" is an empty result, not an error: exit 0 either way.
fn no_route(json: bool) -> i32 {
    if json {
        println!("{}", serde_json::json!({ "error": "no route found" }));
    } else {
        println!("<no route>");
    }
    0
}

fn query_failed(err: &QueryError) -> i32 {
    eprintln!("{err}");
    match err {
        QueryError::NodeNotFound(_) => 1,
        QueryError::InvalidArgument(_) => 2,
    }
}
