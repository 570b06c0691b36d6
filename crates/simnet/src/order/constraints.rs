//! Left-to-right constraints between sibling subgraphs.

use super::LayerGraph;
use rustc_hash::FxHashMap as HashMap;
use simnet_graph::Graph;
use std::iter;

/// Edges `left -> right` between subgraphs that must keep their relative order.
pub type ConstraintGraph = Graph<(), (), ()>;

/// Walks the ancestors of each node of `vs` (in that order) and, at the first ancestor that
/// follows a different subgraph under the same parent, records `previous -> ancestor` in `cg`.
/// Later sweeps then keep those subgraphs in the same left-to-right order.
pub fn sub_constraints(lg: &LayerGraph, cg: &mut ConstraintGraph, vs: &[String]) {
    // Last subgraph met under each parent; `None` keys the top level.
    let mut last_seen: HashMap<Option<&str>, &str> = HashMap::default();

    for v in vs {
        for sub in iter::successors(lg.parent(v), |&c| lg.parent(c)) {
            match last_seen.insert(lg.parent(sub), sub) {
                Some(prev) if prev != sub => {
                    cg.set_edge(prev, sub);
                    break;
                }
                _ => {}
            }
        }
    }
}
