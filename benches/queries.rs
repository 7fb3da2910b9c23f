use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use flight_network_explorer::data::{AirportRecord, FlightRecord};
use flight_network_explorer::graph::FlightGraph;
use flight_network_explorer::query::{
    AllSimplePathsQuery, ClustersQuery, HubsQuery, Query, ShortestPathQuery,
};

fn build_graph_once(n: usize) -> FlightGraph {
    let airports: Vec<AirportRecord> = (0..n)
        .map(|i| AirportRecord {
            code: format!("A{i:04}"),
            name: format!("Airport {i}"),
            city: String::new(),
            country: String::new(),
        })
        .collect();
    let mut flights: Vec<FlightRecord> = (0..n)
        .map(|i| FlightRecord {
            origin: format!("A{i:04}"),
            destination: format!("A{:04}", (i + 1) % n),
            distance: 100 + (i as u64 % 900),
        })
        .collect();
    for i in (0..n).step_by(7) {
        flights.push(FlightRecord {
            origin: format!("A{i:04}"),
            destination: format!("A{:04}", (i + n / 2) % n),
            distance: 1000 + (i as u64 % 4000),
        });
    }
    FlightGraph::from_records(&airports, &flights)
}

fn bench_queries(c: &mut Criterion) {
    // Setup outside of iter
    let graph = build_graph_once(500);
    let from = "A0000";
    let to = "A0250";

    let mut group = c.benchmark_group("queries");

    group.bench_function(BenchmarkId::new("shortest_path", "half_ring"), |b| {
        b.iter(|| {
            let q = ShortestPathQuery::new(from, to);
            let res = q.run(black_box(&graph));
            black_box(res.unwrap().map(|r| r.distance))
        })
    });

    group.bench_function(BenchmarkId::new("hubs", "top10"), |b| {
        b.iter(|| {
            let q = HubsQuery::new(10);
            let res = q.run(black_box(&graph));
            black_box(res.unwrap().len())
        })
    });

    group.bench_function(BenchmarkId::new("all_paths", "4_hops_capped"), |b| {
        b.iter(|| {
            let q = AllSimplePathsQuery::new(from, "A0004", 4).with_cap(1000);
            let res = q.run(black_box(&graph));
            black_box(res.unwrap().len())
        })
    });

    group.bench_function(BenchmarkId::new("clusters", "greedy_modularity"), |b| {
        b.iter(|| {
            let q = ClustersQuery::new();
            let res = q.run(black_box(&graph));
            black_box(res.len())
        })
    });

    group.finish();
}

criterion_group!(name = benches; config = Criterion::default(); targets = bench_queries);
criterion_main!(benches);
