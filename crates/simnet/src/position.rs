//! Coordinate assignment.
//!
//! A plain grid: ranks stack downward, nodes of a rank run left to right in `order`. Each rank is
//! as tall as its tallest node, and `(x, y)` is the node's center.

use crate::LayoutGraph;
use std::collections::BTreeMap;
use tracing::debug;

pub fn run(g: &mut LayoutGraph) {
    let mut ranks: BTreeMap<i32, Vec<(usize, String)>> = BTreeMap::new();
    g.for_each_node(|v, node| {
        if let (Some(rank), Some(order)) = (node.rank, node.order) {
            ranks.entry(rank).or_default().push((order, v.to_string()));
        }
    });
    for layer in ranks.values_mut() {
        layer.sort_by_key(|(order, _)| *order);
    }

    let ranksep = g.graph().ranksep;
    let nodesep = g.graph().nodesep;
    let mut y = 0.0;
    for layer in ranks.values() {
        let height = layer
            .iter()
            .filter_map(|(_, v)| g.node(v))
            .map(|n| n.height)
            .fold(0.0, f64::max);
        let mut x = 0.0;
        for (_, v) in layer {
            let Some(node) = g.node_mut(v) else {
                continue;
            };
            node.x = x + node.width / 2.0;
            node.y = y + height / 2.0;
            x += node.width + nodesep;
        }
        y += height + ranksep;
    }
    debug!(ranks = ranks.len(), "positioned nodes");
}
