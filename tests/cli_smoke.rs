use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

// Bottom-up: simple CLI smoke test for build and one query.
#[test]
fn cli_build_and_shortest_path_smoke() {
    // Arrange: temp dir with the two data files
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_data_files(root);

    // Act: build and save the graph
    let mut cmd = Command::cargo_bin("flight-network-explorer").unwrap();
    cmd.arg("build")
        .arg("--airports")
        .arg(root.join("airports.json"))
        .arg("--flights")
        .arg(root.join("flights.json"))
        .arg("--save")
        .arg(root.join("graph.json"));
    cmd.assert().success().stdout(predicate::str::contains("5 airports"));

    // Assert: graph file exists and contains the nodes
    let graph_path = root.join("graph.json");
    assert!(graph_path.exists());
    let content = fs::read_to_string(&graph_path).unwrap();
    assert!(content.contains("MAD"));

    // Act: query shortest path against the prebuilt graph
    let mut cmd2 = Command::cargo_bin("flight-network-explorer").unwrap();
    cmd2.arg("query")
        .arg("shortest-path")
        .arg("--graph")
        .arg(&graph_path)
        .arg("--origin")
        .arg("MAD")
        .arg("--destination")
        .arg("JFK")
        .arg("--format")
        .arg("json");
    cmd2.assert()
        .success()
        .stdout(predicate::str::contains("LHR"))
        .stdout(predicate::str::contains("6700"))
        .stdout(predicate::str::contains("\"stops\": 1"));
}

pub fn write_data_files(root: &Path) {
    fs::write(
        root.join("airports.json"),
        r#"[
  {"code": "MAD", "name": "Madrid", "city": "Madrid", "country": "Spain"},
  {"code": "BCN", "name": "Barcelona", "city": "Barcelona", "country": "Spain"},
  {"code": "LHR", "name": "London", "city": "London", "country": "UK"},
  {"code": "JFK", "name": "New York", "city": "New York", "country": "USA"},
  {"code": "ISO", "name": "Isolated", "city": "Isolated", "country": "Test"}
]"#,
    )
    .unwrap();
    fs::write(
        root.join("flights.json"),
        r#"[
  {"origin": "MAD", "destination": "BCN", "distance": 500},
  {"origin": "MAD", "destination": "LHR", "distance": 1200},
  {"origin": "LHR", "destination": "JFK", "distance": 5500}
]"#,
    )
    .unwrap();
}
