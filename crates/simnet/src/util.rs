//! Helpers shared by the stages that insert synthetic nodes.

use crate::LayoutGraph;
use crate::model::{Dummy, NodeLabel};
use rustc_hash::FxHashMap;
use simnet_graph::Graph;

/// Hands out node ids that are free in a graph: `prefix`, then `prefix1`, `prefix2`, ...
///
/// The cursor per prefix only moves forward, so a stage inserting many nodes does not rescan
/// from `1` on every call.
#[derive(Debug, Default)]
pub(crate) struct NodeIds {
    next_suffix: FxHashMap<&'static str, usize>,
}

impl NodeIds {
    pub(crate) fn fresh<N, E, G>(&mut self, g: &Graph<N, E, G>, prefix: &'static str) -> String
    where
        N: Default + 'static,
        E: Default + 'static,
        G: Default,
    {
        let mut next = match self.next_suffix.get(prefix) {
            Some(&n) => n,
            None => {
                self.next_suffix.insert(prefix, 1);
                if !g.has_node(prefix) {
                    return prefix.to_string();
                }
                1
            }
        };
        loop {
            let id = format!("{prefix}{next}");
            next += 1;
            if !g.has_node(&id) {
                self.next_suffix.insert(prefix, next);
                return id;
            }
        }
    }

    /// Inserts a synthetic node tagged with `dummy` and returns its id.
    pub(crate) fn add_dummy(
        &mut self,
        g: &mut LayoutGraph,
        prefix: &'static str,
        dummy: Dummy,
        mut label: NodeLabel,
    ) -> String {
        let id = self.fresh(g, prefix);
        label.dummy = Some(dummy);
        g.set_node(id.clone(), label);
        id
    }
}

pub(crate) fn rank_of(g: &LayoutGraph, v: &str) -> i32 {
    g.node(v).and_then(|n| n.rank).unwrap_or(0)
}
