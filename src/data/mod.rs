//! Record types and JSON loading for the network data files.
//!
//! Input is two ordered JSON documents: an array of airport records and an
//! array of flight records. Codes are stored exactly as given; the CLI
//! boundary is responsible for case normalization.
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::errors::DataError;
use crate::graph::FlightGraph;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirportRecord {
    pub code: String,
    pub name: String,
    pub city: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightRecord {
    pub origin: String,
    pub destination: String,
    pub distance: u64,
}

/// Read and decode one JSON data file.
///
/// # Errors
/// Returns `DataError::Io` when the file cannot be read and
/// `DataError::Json` when it does not decode into `T` (missing fields,
/// wrong types). Either aborts the whole load.
pub fn load_json_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, DataError> {
    let data = fs::read_to_string(path)
        .map_err(|source| DataError::Io { file: path.to_path_buf(), source })?;
    serde_json::from_str(&data).map_err(|source| DataError::Json { file: path.to_path_buf(), source })
}

/// Load airports then flights and build the graph, in sequence order.
///
/// # Errors
/// Propagates any `DataError` from either file; no partial graph is
/// returned.
pub fn load_network(airports: &Path, flights: &Path) -> Result<FlightGraph, DataError> {
    let airports: Vec<AirportRecord> = load_json_file(airports)?;
    let flights: Vec<FlightRecord> = load_json_file(flights)?;
    Ok(FlightGraph::from_records(&airports, &flights))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn load_network_builds_graph() {
        let dir = tempfile::tempdir().unwrap();
        let airports = write_file(
            dir.path(),
            "airports.json",
            r#"[{"code":"MAD","name":"Barajas","city":"Madrid","country":"Spain"},
                {"code":"BCN","name":"El Prat","city":"Barcelona","country":"Spain"}]"#,
        );
        let flights = write_file(
            dir.path(),
            "flights.json",
            r#"[{"origin":"MAD","destination":"BCN","distance":500}]"#,
        );

        let graph = load_network(&airports, &flights).unwrap();
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.neighbors("MAD"), vec![("BCN", 500)]);
    }

    #[test]
    fn malformed_record_aborts_load() {
        let dir = tempfile::tempdir().unwrap();
        let airports = write_file(
            dir.path(),
            "airports.json",
            // second record is missing `country`
            r#"[{"code":"MAD","name":"Barajas","city":"Madrid","country":"Spain"},
                {"code":"BCN","name":"El Prat","city":"Barcelona"}]"#,
        );
        let flights = write_file(dir.path(), "flights.json", "[]");

        let err = load_network(&airports, &flights).unwrap_err();
        assert!(matches!(err, DataError::Json { .. }));
    }

    #[test]
    fn negative_distance_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let airports = write_file(dir.path(), "airports.json", "[]");
        let flights = write_file(
            dir.path(),
            "flights.json",
            r#"[{"origin":"MAD","destination":"BCN","distance":-1}]"#,
        );

        let err = load_network(&airports, &flights).unwrap_err();
        assert!(matches!(err, DataError::Json { .. }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err =
            load_network(&dir.path().join("nope.json"), &dir.path().join("nope2.json")).unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
    }
}
