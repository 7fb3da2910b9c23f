use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or decoding the network data files.
///
/// Any `DataError` during load is fatal: the graph is built once at startup
/// and a malformed record aborts the whole load.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("IO error reading {file}: {source}")]
    Io {
        file: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON in {file}: {source}")]
    Json {
        file: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors raised by queries before computation begins.
///
/// "No route exists" is not an error and is represented as an empty or
/// optional result by the individual queries.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("unknown airport: {0}")]
    NodeNotFound(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
