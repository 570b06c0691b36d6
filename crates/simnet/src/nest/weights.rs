use crate::LayoutGraph;
use std::collections::BTreeMap;

/// Neighbor weights per node: `weights[v][w]` sums the weights of all edges `v -> w`.
pub fn successor_weights(g: &LayoutGraph) -> BTreeMap<String, BTreeMap<String, f64>> {
    g.nodes()
        .map(|v| {
            let mut sums: BTreeMap<String, f64> = BTreeMap::new();
            g.for_each_out_edge(v, |key, label| {
                *sums.entry(key.w.clone()).or_insert(0.0) += label.weight;
            });
            (v.to_string(), sums)
        })
        .collect()
}

/// Neighbor weights per node: `weights[v][u]` sums the weights of all edges `u -> v`.
pub fn predecessor_weights(g: &LayoutGraph) -> BTreeMap<String, BTreeMap<String, f64>> {
    g.nodes()
        .map(|v| {
            let mut sums: BTreeMap<String, f64> = BTreeMap::new();
            g.for_each_in_edge(v, |key, label| {
                *sums.entry(key.v.clone()).or_insert(0.0) += label.weight;
            });
            (v.to_string(), sums)
        })
        .collect()
}
