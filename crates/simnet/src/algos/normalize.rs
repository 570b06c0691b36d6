//! Split long edges into chains of rank-adjacent edges, and join them again.

use crate::LayoutGraph;
use crate::model::{Dummy, EdgeLabel, FakeChain, LayoutContext, NodeLabel, Point};
use crate::util::{NodeIds, rank_of};
use simnet_graph::EdgeKey;
use tracing::debug;

/// Replaces every edge spanning more than one rank with a chain of `_d` nodes, one per
/// intermediate rank. The chain node at the edge's `label_rank` takes over the label size.
pub fn run(g: &mut LayoutGraph, ctx: &mut LayoutContext) {
    ctx.chains.clear();
    let mut ids = NodeIds::default();
    for e in g.edge_keys() {
        normalize_edge(g, ctx, &mut ids, e);
    }
    debug!(chains = ctx.chains.len(), nodes = g.node_count(), "normalized long edges");
}

fn normalize_edge(g: &mut LayoutGraph, ctx: &mut LayoutContext, ids: &mut NodeIds, e: EdgeKey) {
    let v_rank = rank_of(g, &e.v);
    let w_rank = rank_of(g, &e.w);
    if w_rank <= v_rank + 1 {
        return;
    }
    let Some(mut label) = g.take_edge(&e.v, &e.w, e.name.as_deref()) else {
        return;
    };
    label.points.clear();

    let chain = ctx.chains.len();
    let mut head: Option<String> = None;
    let mut prev = e.v.clone();
    for rank in v_rank + 1..w_rank {
        let (dummy, node) = if label.label_rank == Some(rank) {
            (
                Dummy::EdgeLabel { chain },
                NodeLabel {
                    width: label.width,
                    height: label.height,
                    labelpos: Some(label.labelpos),
                    rank: Some(rank),
                    ..Default::default()
                },
            )
        } else {
            (
                Dummy::Edge { chain },
                NodeLabel {
                    rank: Some(rank),
                    ..Default::default()
                },
            )
        };
        let id = ids.add_dummy(g, "_d", dummy, node);
        g.set_edge_named(
            prev,
            id.clone(),
            e.name.clone(),
            Some(EdgeLabel::weighted(label.weight)),
        );
        head.get_or_insert_with(|| id.clone());
        prev = id;
    }
    g.set_edge_named(
        prev,
        e.w.clone(),
        e.name.clone(),
        Some(EdgeLabel::weighted(label.weight)),
    );

    if let Some(head) = head {
        ctx.chains.push(FakeChain {
            head,
            link: e,
            label,
        });
    }
}

/// Removes every chain recorded by [`run`], collecting the chain nodes' coordinates into the
/// restored edge's `points`.
pub fn undo(g: &mut LayoutGraph, ctx: &mut LayoutContext) {
    for chain in std::mem::take(&mut ctx.chains) {
        let FakeChain {
            head,
            link,
            mut label,
        } = chain;

        let mut v = head;
        loop {
            let Some(node) = g.node(&v) else {
                break;
            };
            let Some(dummy) = node.dummy else {
                break;
            };
            label.points.push(Point {
                x: node.x,
                y: node.y,
            });
            if matches!(dummy, Dummy::EdgeLabel { .. }) {
                label.x = Some(node.x);
                label.y = Some(node.y);
                label.width = node.width;
                label.height = node.height;
            }
            let next = g.first_successor(&v).map(str::to_string);
            g.remove_node(&v);
            match next {
                Some(w) => v = w,
                None => break,
            }
        }

        g.set_edge_key(link, label);
    }
}
