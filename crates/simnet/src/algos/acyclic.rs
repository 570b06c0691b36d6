//! Break cycles by reversing a feedback arc set, and put the edges back afterwards.

use super::greedy_fas;
use crate::LayoutGraph;
use crate::model::{Acycler, EdgeLabel, LayoutContext};
use rustc_hash::FxHashSet as HashSet;
use simnet_graph::{EdgeKey, Graph};
use tracing::debug;

/// Back edges of a depth-first walk started from every node in insertion order.
///
/// A self-loop counts as a back edge.
pub fn walk_fas<N, E, G>(g: &Graph<N, E, G>) -> Vec<EdgeKey>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    fn dfs<N, E, G>(
        g: &Graph<N, E, G>,
        v: &str,
        visited: &mut HashSet<String>,
        on_stack: &mut HashSet<String>,
        fas: &mut Vec<EdgeKey>,
    ) where
        N: Default + 'static,
        E: Default + 'static,
        G: Default,
    {
        if !visited.insert(v.to_string()) {
            return;
        }
        on_stack.insert(v.to_string());
        for e in g.out_edges(v, None) {
            if on_stack.contains(&e.w) {
                fas.push(e);
            } else {
                dfs(g, &e.w, visited, on_stack, fas);
            }
        }
        on_stack.remove(v);
    }

    let mut fas: Vec<EdgeKey> = Vec::new();
    let mut visited: HashSet<String> = HashSet::default();
    let mut on_stack: HashSet<String> = HashSet::default();
    for v in g.nodes() {
        dfs(g, v, &mut visited, &mut on_stack, &mut fas);
    }
    fas
}

/// Reverses a feedback arc set so `g` becomes acyclic. Self-loops are set aside in `ctx`.
///
/// # Panics
///
/// Panics on a simple graph when an edge to reverse already has an opposite edge; [`layout`]
/// always runs this stage on a multigraph.
///
/// [`layout`]: crate::layout
pub fn run(g: &mut LayoutGraph, ctx: &mut LayoutContext) {
    for key in g.edge_keys() {
        if !key.is_self_loop() {
            continue;
        }
        if let Some(label) = g.take_edge(&key.v, &key.w, key.name.as_deref()) {
            ctx.self_loops.push((key, label));
        }
    }

    let acycler = g.graph().acycler;
    let fas = match acycler {
        Acycler::Greedy => greedy_fas(g, |label: &EdgeLabel| {
            if label.weight.is_finite() {
                (label.weight.round() as i64).max(1)
            } else {
                1
            }
        }),
        Acycler::Walk => walk_fas(g),
    };
    debug!(
        ?acycler,
        reversed = fas.len(),
        self_loops = ctx.self_loops.len(),
        "breaking cycles"
    );

    for e in fas {
        let Some(mut label) = g.take_edge(&e.v, &e.w, e.name.as_deref()) else {
            continue;
        };
        label.forward_name = e.name;
        label.reversed = true;

        let name = if g.is_multigraph() {
            Some(rev_name(g, &e.w, &e.v))
        } else {
            assert!(
                !g.has_edge(&e.w, &e.v, None),
                "cannot reverse {} -> {}: the opposite edge exists and the graph is not a multigraph",
                e.v,
                e.w
            );
            None
        };
        g.set_edge_named(e.w, e.v, name, Some(label));
    }
}

/// Restores reversed edges to their original direction and name. A graph without reversed
/// edges is left as is.
pub fn undo(g: &mut LayoutGraph, ctx: &mut LayoutContext) {
    for e in g.edge_keys() {
        if !g.edge_by_key(&e).is_some_and(|l| l.reversed) {
            continue;
        }
        let Some(mut label) = g.take_edge(&e.v, &e.w, e.name.as_deref()) else {
            continue;
        };
        let forward_name = label.forward_name.take();
        label.reversed = false;
        label.points.reverse();
        g.set_edge_named(e.w, e.v, forward_name, Some(label));
    }

    for (key, label) in ctx.self_loops.drain(..) {
        g.set_edge_key(key, label);
    }
}

fn rev_name(g: &LayoutGraph, v: &str, w: &str) -> String {
    (1usize..)
        .map(|i| format!("rev{i}"))
        .find(|name| !g.has_edge(v, w, Some(name)))
        .unwrap_or_default()
}
