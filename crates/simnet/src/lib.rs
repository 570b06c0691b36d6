#![forbid(unsafe_code)]

//! Layered (Sugiyama-style) graph layout.
//!
//! [`layout`] assigns every node of a [`LayoutGraph`] a rank, an order within its rank, and a
//! position; edges spanning several ranks get bend points. The stages are public too, together
//! with the general graph algorithms they build on (shortest paths, spanning trees, strongly
//! connected components, feedback arc sets).

pub mod algos;
pub mod data;
pub mod error;
pub mod model;
pub mod nest;
pub mod order;
pub mod position;
pub mod rank;

mod util;

pub use error::{Error, Result};
pub use model::{
    Acycler, BorderKind, Dummy, EdgeLabel, FakeChain, LabelPos, LayoutConfig, LayoutContext,
    NodeLabel, Point,
};
pub use simnet_graph as graph;
pub use simnet_graph::{EdgeKey, Graph, GraphOptions};

use tracing::debug;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The graph [`layout`] works on; its label is the [`LayoutConfig`].
pub type LayoutGraph = Graph<NodeLabel, EdgeLabel, LayoutConfig>;

/// Lays out `g` in place.
///
/// Afterwards every caller node has `rank`, `order`, `x` and `y`; subgraphs of a compound graph
/// are sized to enclose their members; edges spanning more than one rank carry one point per
/// intermediate rank. A labelled edge gets a label position only when it spans two or more
/// ranks, since the label sits on one of its chain nodes. The caller's nodes and edges are left
/// as they were given.
///
/// `g` may be any directed graph, cycles and opposite edges included: the stages run on a
/// compound multigraph copy and only the labels are written back.
///
/// Edges must not touch a node that has children. Returns the pipeline state, which records the
/// normalized edge chains.
pub fn layout(g: &mut LayoutGraph) -> LayoutContext {
    debug!(
        nodes = g.node_count(),
        edges = g.edge_count(),
        compound = g.is_compound(),
        "layout"
    );

    let mut work = working_graph(g);
    let ctx = run_layout(&mut work);

    g.for_each_node_mut(|v, label| {
        if let Some(laid_out) = work.node(v) {
            label.clone_from(laid_out);
        }
    });
    g.for_each_edge_mut(|key, label| {
        if let Some(laid_out) = work.edge_by_key(key) {
            label.clone_from(laid_out);
        }
    });
    debug!("layout done");

    ctx
}

/// Copies `g` into a directed compound multigraph, so reversed edges never collide with an
/// opposite edge of the caller.
fn working_graph(g: &LayoutGraph) -> LayoutGraph {
    let mut work = LayoutGraph::new(GraphOptions {
        multigraph: true,
        compound: true,
        directed: true,
    });
    work.set_graph(g.graph().clone());
    g.for_each_node(|v, label| {
        work.set_node(v, label.clone());
    });
    if g.is_compound() {
        for v in g.nodes() {
            if let Some(parent) = g.parent(v) {
                work.set_parent(v, parent);
            }
        }
    }
    g.for_each_edge(|key, label| {
        work.set_edge_key(key.clone(), label.clone());
    });
    work
}

fn run_layout(g: &mut LayoutGraph) -> LayoutContext {
    let mut ctx = LayoutContext::default();

    algos::acyclic::run(g, &mut ctx);
    nest::run(g, &mut ctx);
    rank::longest_path(g);
    rank::normalize_ranks(g);
    rank::remove_empty_ranks(g, ctx.rank_factor.unwrap_or(1));
    nest::undo(g, &mut ctx);
    rank::normalize_ranks(g);
    nest::assign_rank_ranges(g);
    assign_label_ranks(g);
    debug!("ranked");

    algos::normalize::run(g, &mut ctx);
    nest::fake_chains(g, &ctx);
    nest::add_borders(g);
    order::run(g);
    debug!(nodes = g.node_count(), "ordered");

    position::run(g);
    nest::remove_borders(g);
    algos::normalize::undo(g, &mut ctx);
    algos::acyclic::undo(g, &mut ctx);

    ctx
}

/// Puts the label of every labelled edge spanning two or more ranks halfway along the edge.
fn assign_label_ranks(g: &mut LayoutGraph) {
    let mut ranks: Vec<(EdgeKey, i32)> = Vec::new();
    g.for_each_edge(|key, label| {
        if !label.has_label() {
            return;
        }
        let (Some(v_rank), Some(w_rank)) = (
            g.node(&key.v).and_then(|n| n.rank),
            g.node(&key.w).and_then(|n| n.rank),
        ) else {
            return;
        };
        let span = w_rank - v_rank;
        if span > 1 {
            ranks.push((key.clone(), v_rank + span / 2));
        }
    });
    for (key, rank) in ranks {
        if let Some(label) = g.edge_mut_by_key(&key) {
            label.label_rank = Some(rank);
        }
    }
}
