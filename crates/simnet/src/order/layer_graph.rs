//! Single-rank graphs fed to [`sort_subgraph`](super::sort_subgraph).

use crate::LayoutGraph;
use crate::util::NodeIds;
use simnet_graph::{Graph, GraphOptions};
use std::collections::BTreeMap;

/// What the sort needs to know about a node of a layer graph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerNode {
    pub order: Option<usize>,
    /// For a subgraph spanning the rank: its left/right border node at that rank.
    pub border_left: Option<String>,
    pub border_right: Option<String>,
}

/// Compound graph of the nodes on one rank, nested under a synthetic root whose id is the graph
/// label. Edges run from neighbors on the adjacent rank into the rank's nodes and carry the
/// summed weight.
pub type LayerGraph = Graph<LayerNode, f64, String>;

/// Builds the layer graph of `rank`. Nodes on the rank, and subgraphs whose rank range covers it,
/// are included; `weights[v]` lists the neighbors of `v` to link in.
pub fn layer(
    g: &LayoutGraph,
    rank: i32,
    weights: &BTreeMap<String, BTreeMap<String, f64>>,
) -> LayerGraph {
    let candidates: Vec<String> = g.node_ids();
    let root = NodeIds::default().fresh(g, "_root");
    layer_of(g, rank, weights, &candidates, &root)
}

pub(super) fn layer_of(
    g: &LayoutGraph,
    rank: i32,
    weights: &BTreeMap<String, BTreeMap<String, f64>>,
    candidates: &[String],
    root: &str,
) -> LayerGraph {
    let mut lg = LayerGraph::new(GraphOptions {
        compound: true,
        ..Default::default()
    });
    lg.set_graph(root.to_string());
    lg.set_node(root, LayerNode::default());

    for v in candidates {
        let Some(node) = g.node(v) else {
            continue;
        };
        let ranged = match (node.min_rank, node.max_rank) {
            (Some(lo), Some(hi)) => lo <= rank && rank <= hi,
            _ => false,
        };
        if node.rank != Some(rank) && !ranged {
            continue;
        }

        let label = if ranged {
            LayerNode {
                order: node.order,
                border_left: node.border_left_at(rank).map(str::to_string),
                border_right: node.border_right_at(rank).map(str::to_string),
            }
        } else {
            LayerNode {
                order: node.order,
                ..Default::default()
            }
        };
        lg.set_node(v.as_str(), label);
        lg.set_parent(v.as_str(), g.parent(v).unwrap_or(root));

        let Some(neighbors) = weights.get(v) else {
            continue;
        };
        for (u, &weight) in neighbors {
            if !lg.has_node(u) {
                let order = g.node(u).and_then(|n| n.order);
                lg.set_node(u.as_str(), LayerNode {
                    order,
                    ..Default::default()
                });
            }
            let sum = lg.edge(u, v, None).copied().unwrap_or(0.0) + weight;
            lg.set_edge_with_label(u.as_str(), v.as_str(), sum);
        }
    }

    lg
}
