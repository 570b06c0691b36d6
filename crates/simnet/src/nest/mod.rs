//! Compound-graph support.
//!
//! [`run`] turns subgraph containment into ordinary edges so a flat ranker keeps every subgraph
//! between its own top and bottom border nodes. The remaining helpers carry subgraphs through
//! ordering: per-rank left/right borders, re-parenting of normalized edge chains, and the
//! neighbor weights used by the sweeps.

mod borders;
mod fake_chains;
mod weights;

pub use borders::{add_borders, assign_rank_ranges, remove_borders};
pub use fake_chains::fake_chains;
pub use weights::{predecessor_weights, successor_weights};

use crate::LayoutGraph;
use crate::model::{BorderKind, Dummy, EdgeLabel, LayoutContext, NodeLabel};
use crate::util::NodeIds;
use simnet_graph::{EdgeKey, Graph};
use std::collections::BTreeMap;
use tracing::debug;

/// Depth of every node in the compound forest; top-level nodes are at depth 1.
pub fn tree_depths<N, E, G>(g: &Graph<N, E, G>) -> BTreeMap<String, usize>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    fn dfs<N, E, G>(g: &Graph<N, E, G>, v: &str, depth: usize, out: &mut BTreeMap<String, usize>)
    where
        N: Default + 'static,
        E: Default + 'static,
        G: Default,
    {
        for child in g.children(v) {
            dfs(g, child, depth + 1, out);
        }
        out.insert(v.to_string(), depth);
    }

    let mut out: BTreeMap<String, usize> = BTreeMap::new();
    for v in g.children_root() {
        dfs(g, v, 1, &mut out);
    }
    out
}

struct Nesting<'a> {
    root: String,
    sep: usize,
    weight: f64,
    height: usize,
    depths: &'a BTreeMap<String, usize>,
    ids: NodeIds,
}

impl Nesting<'_> {
    fn depth(&self, v: &str) -> usize {
        self.depths.get(v).copied().unwrap_or(1)
    }

    fn walk(&mut self, g: &mut LayoutGraph, v: &str) {
        let children: Vec<String> = g.children(v).into_iter().map(str::to_string).collect();
        if children.is_empty() {
            if v != self.root {
                g.set_edge_with_label(
                    self.root.clone(),
                    v,
                    EdgeLabel {
                        weight: 0.0,
                        minlen: self.sep,
                        nesting_edge: true,
                        ..Default::default()
                    },
                );
            }
            return;
        }

        let top = self.ids.add_dummy(
            g,
            "_bt",
            Dummy::Border(BorderKind::Top),
            NodeLabel::default(),
        );
        let bottom = self.ids.add_dummy(
            g,
            "_bb",
            Dummy::Border(BorderKind::Bottom),
            NodeLabel::default(),
        );
        g.set_parent(top.as_str(), v);
        g.set_parent(bottom.as_str(), v);
        if let Some(label) = g.node_mut(v) {
            label.border_top = Some(top.clone());
            label.border_bottom = Some(bottom.clone());
        }

        for child in children {
            self.walk(g, &child);

            let (child_top, child_bottom, is_subgraph) = match g.node(&child) {
                Some(NodeLabel {
                    border_top: Some(t),
                    border_bottom: Some(b),
                    ..
                }) => (t.clone(), b.clone(), true),
                _ => (child.clone(), child.clone(), false),
            };
            let (weight, minlen) = if is_subgraph {
                (self.weight, 1)
            } else {
                (2.0 * self.weight, self.height - self.depth(v) + 1)
            };

            g.set_edge_with_label(
                top.clone(),
                child_top,
                EdgeLabel {
                    weight,
                    minlen,
                    nesting_edge: true,
                    ..Default::default()
                },
            );
            g.set_edge_with_label(
                child_bottom,
                bottom.clone(),
                EdgeLabel {
                    weight,
                    minlen,
                    nesting_edge: true,
                    ..Default::default()
                },
            );
        }

        if g.parent(v).is_none() {
            g.set_edge_with_label(
                self.root.clone(),
                top,
                EdgeLabel {
                    weight: 0.0,
                    minlen: self.height + self.depth(v),
                    nesting_edge: true,
                    ..Default::default()
                },
            );
        }
    }
}

/// Adds a `_root` node plus top/bottom borders per subgraph, and scales every existing
/// `minlen` by `2 * height + 1` so there is room for the borders between ranks.
///
/// Leaves hang off the root; each subgraph's top border precedes, and its bottom border
/// follows, everything inside it. Nesting edges weigh more than all caller edges together.
pub fn run(g: &mut LayoutGraph, ctx: &mut LayoutContext) {
    let mut ids = NodeIds::default();
    let root = ids.add_dummy(g, "_root", Dummy::Root, NodeLabel::default());
    let depths = tree_depths(g);
    let height = depths.values().copied().max().unwrap_or(1).saturating_sub(1);
    let sep = 2 * height + 1;

    g.for_each_edge_mut(|_, label| label.minlen *= sep);
    let mut weight = 1.0;
    g.for_each_edge(|_, label| weight += label.weight);

    let mut nesting = Nesting {
        root: root.clone(),
        sep,
        weight,
        height,
        depths: &depths,
        ids,
    };
    let top_level: Vec<String> = g.children_root().into_iter().map(str::to_string).collect();
    for v in top_level {
        nesting.walk(g, &v);
    }

    debug!(%root, height, rank_factor = sep, "added nesting structure");
    ctx.nest_root = Some(root);
    ctx.rank_factor = Some(sep);
}

/// Removes the nesting root and every nesting edge. Border nodes stay until
/// [`remove_borders`].
pub fn undo(g: &mut LayoutGraph, ctx: &mut LayoutContext) {
    if let Some(root) = ctx.nest_root.take() {
        g.remove_node(&root);
    }
    let mut nesting: Vec<EdgeKey> = Vec::new();
    g.for_each_edge(|key, label| {
        if label.nesting_edge {
            nesting.push(key.clone());
        }
    });
    for key in &nesting {
        g.remove_edge_key(key);
    }
}
