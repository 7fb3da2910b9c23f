//! Community detection by greedy modularity maximization
//! (Clauset–Newman–Moore merging).
//!
//! Detection is structural: it looks only at which airports are connected,
//! never at flight distances. The same graph carries weights for the path
//! queries; the asymmetry is intentional.
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::HashMap;

use super::Query;
use crate::graph::FlightGraph;

/// Partition all airports into communities.
///
/// Starts from singletons and repeatedly merges the connected community
/// pair with the greatest positive modularity gain, stopping when no merge
/// improves modularity. The result is a true partition: every airport
/// appears in exactly one cluster. Output is stabilized for reproducibility:
/// codes sorted within each cluster, clusters sorted by their smallest code.
#[derive(Debug, Default)]
pub struct ClustersQuery;

impl ClustersQuery {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Query<Vec<Vec<String>>> for ClustersQuery {
    fn run(&self, graph: &FlightGraph) -> Vec<Vec<String>> {
        let mut clusters: Vec<Vec<String>> = greedy_modularity(graph)
            .into_iter()
            .map(|members| {
                let mut codes: Vec<String> =
                    members.into_iter().map(|i| graph.code_at(i).to_string()).collect();
                codes.sort();
                codes
            })
            .collect();
        clusters.sort_by(|a, b| a[0].cmp(&b[0]));
        clusters
    }
}

// Merge candidate scored by modularity gain; the pair ids break ties so
// the reduction below is a total order and the merge choice deterministic.
type Candidate = (f64, usize, usize);

fn better(x: Candidate, y: Candidate) -> Candidate {
    match x.0.partial_cmp(&y.0) {
        Some(Ordering::Greater) => x,
        Some(Ordering::Less) => y,
        _ => {
            if (x.1, x.2) <= (y.1, y.2) {
                x
            } else {
                y
            }
        }
    }
}

// CNM greedy merging over community ids (initially node indices).
// Maintains per-community structural degree sums `k` and inter-community
// edge counts `e`; gain for a connected pair (i, j) is
// 2 * (e_ij / 2m - k_i * k_j / (2m)^2) with m the whole-graph edge count.
fn greedy_modularity(graph: &FlightGraph) -> Vec<Vec<usize>> {
    let n = graph.node_count();
    let m = graph.edge_count();

    let mut members: HashMap<usize, Vec<usize>> = (0..n).map(|i| (i, vec![i])).collect();
    if m == 0 {
        return finish(members);
    }

    let mut k: Vec<usize> = (0..n).map(|i| graph.degree_at(i)).collect();
    let mut e: HashMap<(usize, usize), usize> = HashMap::new();
    for u in 0..n {
        for (v, _) in graph.adjacency(u) {
            if u < v {
                *e.entry((u, v)).or_insert(0) += 1;
            }
        }
    }

    let two_m = 2.0 * m as f64;
    loop {
        let mut pairs: Vec<((usize, usize), usize)> =
            e.iter().map(|(&pair, &count)| (pair, count)).collect();
        pairs.sort_unstable();

        let best = pairs
            .par_iter()
            .map(|&((a, b), count)| {
                let gain =
                    2.0 * (count as f64 / two_m - (k[a] as f64 * k[b] as f64) / (two_m * two_m));
                (gain, a, b)
            })
            .reduce_with(better);

        let Some((gain, a, b)) = best else { break };
        if gain <= 0.0 {
            break;
        }

        // Merge community b into a.
        let absorbed = members.remove(&b).unwrap_or_default();
        members.entry(a).or_default().extend(absorbed);
        k[a] += k[b];
        k[b] = 0;
        e.remove(&(a, b));
        let rewired: Vec<((usize, usize), usize)> = e
            .iter()
            .filter(|((x, y), _)| *x == b || *y == b)
            .map(|(&pair, &count)| (pair, count))
            .collect();
        for ((x, y), count) in rewired {
            e.remove(&(x, y));
            let other = if x == b { y } else { x };
            let key = (a.min(other), a.max(other));
            *e.entry(key).or_insert(0) += count;
        }
    }

    finish(members)
}

fn finish(members: HashMap<usize, Vec<usize>>) -> Vec<Vec<usize>> {
    let mut out: Vec<Vec<usize>> = members.into_values().collect();
    for cluster in &mut out {
        cluster.sort_unstable();
    }
    out.sort_by_key(|cluster| cluster[0]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::FlightGraph;
    use crate::query::tests::sample_graph;
    use std::collections::HashSet;

    #[test]
    fn clusters_on_sample_graph() {
        let g = sample_graph();
        let clusters = ClustersQuery::new().run(&g);
        assert_eq!(
            clusters,
            vec![
                vec!["BCN".to_string(), "MAD".to_string()],
                vec!["ISO".to_string()],
                vec!["JFK".to_string(), "LHR".to_string()],
            ]
        );
    }

    #[test]
    fn two_triangles_bridged_by_one_edge() {
        let mut g = FlightGraph::new();
        for (a, b) in [
            ("AAA", "BBB"),
            ("BBB", "CCC"),
            ("AAA", "CCC"),
            ("DDD", "EEE"),
            ("EEE", "FFF"),
            ("DDD", "FFF"),
            ("CCC", "DDD"),
        ] {
            g.add_flight(a, b, 1);
        }

        let clusters = ClustersQuery::new().run(&g);
        assert_eq!(
            clusters,
            vec![
                vec!["AAA".to_string(), "BBB".to_string(), "CCC".to_string()],
                vec!["DDD".to_string(), "EEE".to_string(), "FFF".to_string()],
            ]
        );
    }

    #[test]
    fn edgeless_graph_yields_singletons() {
        let mut g = FlightGraph::new();
        g.add_airport("MAD", "", "", "");
        g.add_airport("BCN", "", "", "");

        let clusters = ClustersQuery::new().run(&g);
        assert_eq!(clusters, vec![vec!["BCN".to_string()], vec!["MAD".to_string()]]);
    }

    #[test]
    fn empty_graph_yields_no_clusters() {
        let g = FlightGraph::new();
        assert!(ClustersQuery::new().run(&g).is_empty());
    }

    #[test]
    fn clusters_form_a_partition() {
        let g = sample_graph();
        let clusters = ClustersQuery::new().run(&g);

        let mut seen: HashSet<String> = HashSet::new();
        for cluster in &clusters {
            for code in cluster {
                assert!(seen.insert(code.clone()), "{code} appears in two clusters");
            }
        }
        let all: HashSet<String> = g.codes().map(str::to_string).collect();
        assert_eq!(seen, all);
    }
}
