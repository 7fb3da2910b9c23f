use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OnOffArg {
    On,
    Off,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DotThemeArg {
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DotRankDirArg {
    #[value(name = "LR")]
    LR,
    #[value(name = "TB")]
    TB,
}

#[derive(Debug, Parser)]
#[command(
    name = "flight-network-explorer",
    version,
    about = "Flight Network Graph Explorer",
    long_about = "Load an airport/flight network from JSON data files and run graph queries: shortest and all routes between airports, hub ranking, isolated airports, degree filters, connectivity stats, and community clusters. Airport codes given on the command line are uppercased before querying."
)]
pub struct Cli {
    /// Suppress non-essential output
    #[arg(short, long, global = true, default_value_t = false)]
    pub quiet: bool,
    #[command(subcommand)]
    pub command: Commands,
}

/// Where the graph comes from: the two data files, or a prebuilt graph
/// JSON saved by `build --save`.
#[derive(Debug, Args)]
pub struct SourceArgs {
    /// Path to the airports JSON file
    #[arg(long, default_value = "data/airports.json")]
    pub airports: PathBuf,
    /// Path to the flights JSON file
    #[arg(long, default_value = "data/flights.json")]
    pub flights: PathBuf,
    /// Optional path to a prebuilt graph JSON (skips data loading)
    #[arg(long)]
    pub graph: Option<PathBuf>,
    /// Path to a TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Load and validate the network data, optionally exporting the graph
    Build {
        #[command(flatten)]
        source: SourceArgs,
        /// Save the loaded graph as JSON
        #[arg(long)]
        save: Option<PathBuf>,
        /// Write a DOT rendering of the network
        #[arg(long)]
        dot: Option<PathBuf>,
        /// DOT: color nodes by community (default: on)
        #[arg(long, value_enum, default_value_t = OnOffArg::On)]
        dot_clusters: OnOffArg,
        /// DOT: include the summary legend (default: on)
        #[arg(long, value_enum, default_value_t = OnOffArg::On)]
        dot_legend: OnOffArg,
        /// DOT: theme (light or dark)
        #[arg(long, value_enum, default_value_t = DotThemeArg::Light)]
        dot_theme: DotThemeArg,
        /// DOT: rank direction (LR or TB)
        #[arg(long, value_enum, default_value_t = DotRankDirArg::LR)]
        dot_rankdir: DotRankDirArg,
    },
    /// Run queries over the flight network
    Query {
        #[command(subcommand)]
        query: QueryCommands,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Subcommand)]
pub enum QueryCommands {
    /// List all airports with their attributes
    Airports {
        #[command(flatten)]
        source: SourceArgs,
        /// Output format: text or json
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Show network statistics (counts, density, connectivity)
    Stats {
        #[command(flatten)]
        source: SourceArgs,
        /// Output format: text or json
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Cheapest route between two airports by total distance
    ShortestPath {
        #[command(flatten)]
        source: SourceArgs,
        /// Origin airport code
        #[arg(long)]
        origin: String,
        /// Destination airport code
        #[arg(long)]
        destination: String,
        /// Output format: text or json
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// All simple routes between two airports within a hop budget
    AllPaths {
        #[command(flatten)]
        source: SourceArgs,
        /// Origin airport code
        #[arg(long)]
        origin: String,
        /// Destination airport code
        #[arg(long)]
        destination: String,
        /// Maximum number of flights per route
        #[arg(long, default_value_t = 5)]
        max_hops: usize,
        /// Stop after collecting this many routes
        #[arg(long)]
        max_paths: Option<usize>,
        /// Output format: text or json
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Top-N airports by number of connections
    Hubs {
        #[command(flatten)]
        source: SourceArgs,
        /// Top N results
        #[arg(long, default_value_t = 5)]
        top: usize,
        /// Output format: text or json
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Airports with no connections
    Isolated {
        #[command(flatten)]
        source: SourceArgs,
        /// Output format: text or json
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Direct connections of one airport
    Connections {
        #[command(flatten)]
        source: SourceArgs,
        /// Airport code
        #[arg(long)]
        airport: String,
        /// Output format: text or json
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Airports with an exact number of connections
    ByDegree {
        #[command(flatten)]
        source: SourceArgs,
        /// Connection count to match
        #[arg(long)]
        degree: usize,
        /// Output format: text or json
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Community clusters detected by greedy modularity
    Clusters {
        #[command(flatten)]
        source: SourceArgs,
        /// Output format: text or json
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Longest simple route within the fixed hop cutoff (approximate)
    LongestPath {
        #[command(flatten)]
        source: SourceArgs,
        /// Origin airport code
        #[arg(long)]
        origin: String,
        /// Destination airport code
        #[arg(long)]
        destination: String,
        /// Output format: text or json
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
