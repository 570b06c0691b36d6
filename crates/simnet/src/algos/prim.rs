//! Minimum spanning tree.

use crate::data::PriorityQueue;
use simnet_graph::{EdgeKey, Graph};
use std::collections::BTreeMap;

/// Prim's algorithm over the incident edges of each node, so edge direction is ignored.
///
/// Returns a graph with the options and node labels of `g` and only the tree edges, each with
/// its original key and label.
///
/// # Panics
///
/// Panics if `g` is not connected or an edge weight is negative.
pub fn prim<N, E, G, W>(g: &Graph<N, E, G>, weight_fn: W) -> Graph<N, E, G>
where
    N: Default + Clone + 'static,
    E: Default + Clone + 'static,
    G: Default,
    W: Fn(&EdgeKey) -> f64,
{
    let mut tree: Graph<N, E, G> = g.with_options();
    g.for_each_node(|v, label| {
        tree.set_node(v, label.clone());
    });

    let Some(start) = g.nodes().next() else {
        return tree;
    };

    let mut parents: BTreeMap<String, EdgeKey> = BTreeMap::new();
    let mut pq = PriorityQueue::new();
    for v in g.nodes() {
        pq.add(v, f64::INFINITY);
    }
    pq.decrease(start, 0.0);

    let mut init = false;
    while !pq.is_empty() {
        let v = pq.remove_min();
        if let Some(edge) = parents.get(&v) {
            if let Some(label) = g.edge_by_key(edge) {
                tree.set_edge_key(edge.clone(), label.clone());
            }
        } else {
            assert!(!init, "input graph is not connected: {v} is unreachable");
            init = true;
        }

        for edge in g.node_edges(&v, None) {
            let w = edge.other(&v);
            let Some(current) = pq.priority(w) else {
                continue;
            };
            let weight = weight_fn(&edge);
            assert!(weight >= 0.0, "negative edge weight {weight} on {edge}");
            if weight < current {
                parents.insert(w.to_string(), edge.clone());
                pq.decrease(w, weight);
            }
        }
    }

    tree
}
