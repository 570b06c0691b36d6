//! Crossing minimization.
//!
//! Starts from a DFS layering, then alternates downward and upward sweeps that reorder each rank
//! by the weighted mean position of its neighbors on the rank just swept. Subgraphs move as one
//! unit and keep the left-to-right order fixed by earlier ranks.

mod constraints;
mod cross_count;
mod init_order;
mod layer_graph;
pub mod sort;

pub use constraints::{ConstraintGraph, sub_constraints};
pub use cross_count::{cross_count, cross_layers};
pub use init_order::init_order;
pub use layer_graph::{LayerGraph, LayerNode, layer};
pub use sort::{Mass, SortEntry, SortResult, conflicts, mass, sort, sort_subgraph};

use crate::LayoutGraph;
use crate::nest::{predecessor_weights, successor_weights};
use crate::util::NodeIds;
use simnet_graph::GraphOptions;
use std::collections::BTreeMap;
use tracing::trace;

type Weights = BTreeMap<String, BTreeMap<String, f64>>;

/// Sets `order` on every ranked node (and every subgraph spanning ranks) to minimize crossings.
pub fn run(g: &mut LayoutGraph) {
    let mut max_rank: Option<i32> = None;
    let mut nodes_by_rank: BTreeMap<i32, Vec<String>> = BTreeMap::new();
    g.for_each_node(|v, node| {
        if let Some(rank) = node.rank {
            max_rank = max_rank.max(Some(rank));
            nodes_by_rank.entry(rank).or_default().push(v.to_string());
        }
        if let (Some(lo), Some(hi)) = (node.min_rank, node.max_rank) {
            for r in lo..=hi {
                if node.rank != Some(r) {
                    nodes_by_rank.entry(r).or_default().push(v.to_string());
                }
            }
        }
    });
    let Some(max_rank) = max_rank else {
        return;
    };

    let initial = init_order(g);
    assign_order(g, &initial);

    let down = predecessor_weights(g);
    let up = successor_weights(g);
    let root = NodeIds::default().fresh(g, "_root");

    let mut best_cc = f64::INFINITY;
    let mut best: Option<Vec<Vec<String>>> = None;
    let mut i = 0usize;
    let mut last_best = 0usize;
    while last_best < 4 {
        let bias_right = i % 4 >= 2;
        if i % 2 == 1 {
            let ranks: Vec<i32> = (1..=max_rank).collect();
            sweep(g, &nodes_by_rank, &ranks, &down, &root, bias_right);
        } else {
            let ranks: Vec<i32> = (0..max_rank).rev().collect();
            sweep(g, &nodes_by_rank, &ranks, &up, &root, bias_right);
        }

        let layering = layer_matrix(g, max_rank);
        let cc = cross_count(g, &layering);
        trace!(sweep = i, crossings = cc, "order sweep");
        if cc < best_cc {
            last_best = 0;
            best_cc = cc;
            best = Some(layering);
        }

        i += 1;
        last_best += 1;
    }

    if let Some(best) = best {
        assign_order(g, &best);
    }
}

fn sweep(
    g: &mut LayoutGraph,
    nodes_by_rank: &BTreeMap<i32, Vec<String>>,
    ranks: &[i32],
    weights: &Weights,
    root: &str,
    bias_right: bool,
) {
    let mut cg = ConstraintGraph::new(GraphOptions::default());
    for &rank in ranks {
        let candidates = nodes_by_rank.get(&rank).map(Vec::as_slice).unwrap_or(&[]);
        let lg = layer_graph::layer_of(g, rank, weights, candidates, root);
        let sorted = sort_subgraph(&lg, root, &cg, bias_right);
        for (order, v) in sorted.vs.iter().enumerate() {
            if let Some(node) = g.node_mut(v) {
                node.order = Some(order);
            }
        }
        sub_constraints(&lg, &mut cg, &sorted.vs);
    }
}

fn assign_order(g: &mut LayoutGraph, layering: &[Vec<String>]) {
    for layer in layering {
        for (order, v) in layer.iter().enumerate() {
            if let Some(node) = g.node_mut(v) {
                node.order = Some(order);
            }
        }
    }
}

fn layer_matrix(g: &LayoutGraph, max_rank: i32) -> Vec<Vec<String>> {
    let mut layers: Vec<Vec<(usize, String)>> =
        vec![Vec::new(); usize::try_from(max_rank).map_or(0, |r| r + 1)];
    g.for_each_node(|v, node| {
        let (Some(rank), Some(order)) = (node.rank, node.order) else {
            return;
        };
        if let Some(layer) = usize::try_from(rank).ok().and_then(|r| layers.get_mut(r)) {
            layer.push((order, v.to_string()));
        }
    });
    layers
        .into_iter()
        .map(|mut layer| {
            layer.sort_by_key(|(order, _)| *order);
            layer.into_iter().map(|(_, v)| v).collect()
        })
        .collect()
}
