use simnet::algos::{dijkstra, dijkstra_all, floyd_warshall, out_edges_of};
use simnet::graph::{Graph, GraphOptions};

type Weighted = Graph<(), f64, ()>;

fn weighted(directed: bool, edges: &[(&str, &str, f64)]) -> Weighted {
    let mut g = Weighted::new(GraphOptions {
        directed,
        ..Default::default()
    });
    for &(v, w, weight) in edges {
        g.set_edge_with_label(v, w, weight);
    }
    g
}

fn sample() -> Weighted {
    let mut g = weighted(
        true,
        &[
            ("a", "b", 1.0),
            ("a", "c", 4.0),
            ("b", "c", 2.0),
            ("c", "d", 1.0),
            ("b", "d", 5.0),
        ],
    );
    g.set_node("e", ());
    g
}

#[test]
fn dijkstra_finds_shortest_distances_and_predecessors() {
    let g = sample();
    let weight = |e: &simnet::EdgeKey| g.edge_by_key(e).copied().unwrap_or(0.0);
    let paths = dijkstra(&g, "a", weight, out_edges_of(&g));

    assert_eq!(paths["a"].distance, 0.0);
    assert_eq!(paths["a"].predecessor, None);
    assert_eq!(paths["b"].distance, 1.0);
    assert_eq!(paths["c"].distance, 3.0);
    assert_eq!(paths["c"].predecessor.as_deref(), Some("b"));
    assert_eq!(paths["d"].distance, 4.0);
    assert_eq!(paths["d"].predecessor.as_deref(), Some("c"));
    assert_eq!(paths["e"].distance, f64::INFINITY);
    assert_eq!(paths["e"].predecessor, None);
}

#[test]
fn dijkstra_follows_the_supplied_edge_selector() {
    let g = sample();
    let weight = |e: &simnet::EdgeKey| g.edge_by_key(e).copied().unwrap_or(0.0);
    let paths = dijkstra(&g, "d", weight, |v| g.in_edges(v, None));

    assert_eq!(paths["c"].distance, 1.0);
    assert_eq!(paths["b"].distance, 3.0);
    assert_eq!(paths["a"].distance, 4.0);
    assert_eq!(paths["a"].predecessor.as_deref(), Some("b"));
}

#[test]
fn dijkstra_walks_both_directions_of_an_undirected_graph() {
    let g = weighted(false, &[("a", "b", 1.0), ("b", "c", 1.0)]);
    let weight = |e: &simnet::EdgeKey| g.edge_by_key(e).copied().unwrap_or(0.0);
    let paths = dijkstra(&g, "c", weight, out_edges_of(&g));
    assert_eq!(paths["a"].distance, 2.0);
    assert_eq!(paths["a"].predecessor.as_deref(), Some("b"));
}

#[test]
#[should_panic(expected = "negative edge weights")]
fn dijkstra_rejects_negative_weights() {
    let g = weighted(true, &[("a", "b", -1.0)]);
    let weight = |e: &simnet::EdgeKey| g.edge_by_key(e).copied().unwrap_or(0.0);
    dijkstra(&g, "a", weight, out_edges_of(&g));
}

#[test]
fn floyd_warshall_agrees_with_dijkstra_from_every_node() {
    let g = sample();
    let weight = |e: &simnet::EdgeKey| g.edge_by_key(e).copied().unwrap_or(0.0);
    let all = dijkstra_all(&g, weight, out_edges_of(&g));
    let fw = floyd_warshall(&g, weight, out_edges_of(&g));

    assert_eq!(all.len(), 5);
    for (source, row) in &all {
        for (target, entry) in row {
            assert_eq!(
                fw[source][target].distance, entry.distance,
                "{source} -> {target}"
            );
        }
    }
}

#[test]
fn floyd_warshall_reports_predecessors_on_the_shortest_path() {
    let g = sample();
    let weight = |e: &simnet::EdgeKey| g.edge_by_key(e).copied().unwrap_or(0.0);
    let fw = floyd_warshall(&g, weight, out_edges_of(&g));

    assert_eq!(fw["a"]["a"].distance, 0.0);
    assert_eq!(fw["a"]["d"].distance, 4.0);
    assert_eq!(fw["a"]["d"].predecessor.as_deref(), Some("c"));
    assert_eq!(fw["a"]["c"].predecessor.as_deref(), Some("b"));
    assert_eq!(fw["d"]["a"].distance, f64::INFINITY);
}

/// Fixed linear congruential sequence so every run sees the same graphs.
struct Lcg(u64);

impl Lcg {
    fn below(&mut self, n: usize) -> usize {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        (self.0 >> 33) as usize % n
    }
}

#[test]
fn floyd_warshall_agrees_with_dijkstra_on_generated_graphs() {
    let mut rng = Lcg(0x2545_f491_4f6c_dd1d);
    for round in 0..40 {
        let directed = round % 2 == 0;
        let n = 2 + rng.below(6);
        let mut g = Weighted::new(GraphOptions {
            directed,
            ..Default::default()
        });
        for i in 0..n {
            g.set_node(format!("n{i}"), ());
        }
        for _ in 0..rng.below(2 * n + 1) {
            let (v, w) = (rng.below(n), rng.below(n));
            // Small integers keep every path sum exact.
            g.set_edge_with_label(format!("n{v}"), format!("n{w}"), rng.below(10) as f64);
        }

        let weight = |e: &simnet::EdgeKey| g.edge_by_key(e).copied().unwrap_or(0.0);
        let all = dijkstra_all(&g, weight, out_edges_of(&g));
        let fw = floyd_warshall(&g, weight, out_edges_of(&g));
        for (source, row) in &all {
            for (target, entry) in row {
                assert_eq!(
                    fw[source][target].distance, entry.distance,
                    "round {round}: {source} -> {target}"
                );
            }
        }
    }
}
