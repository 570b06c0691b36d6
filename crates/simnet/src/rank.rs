//! Layer assignment.

use crate::LayoutGraph;
use rustc_hash::FxHashMap as HashMap;
use std::collections::BTreeMap;

/// Ranks every node without children as high as its out-edges allow: sinks sit at rank 0 and a
/// node with out-edges takes `min(rank(w) - minlen)`. Ranks come out non-positive; see
/// [`normalize_ranks`].
///
/// The graph must be acyclic.
pub fn longest_path(g: &mut LayoutGraph) {
    fn dfs(g: &LayoutGraph, v: &str, ranks: &mut HashMap<String, i32>) -> i32 {
        if let Some(&rank) = ranks.get(v) {
            return rank;
        }
        let mut rank: Option<i32> = None;
        for e in g.out_edges(v, None) {
            let minlen = g.edge_by_key(&e).map_or(1, |label| label.minlen as i32);
            let candidate = dfs(g, &e.w, ranks) - minlen;
            rank = Some(rank.map_or(candidate, |r| r.min(candidate)));
        }
        let rank = rank.unwrap_or(0);
        ranks.insert(v.to_string(), rank);
        rank
    }

    let mut ranks: HashMap<String, i32> = HashMap::default();
    for v in g.sources() {
        if !g.has_children(v) {
            dfs(g, v, &mut ranks);
        }
    }
    for (v, rank) in ranks {
        if let Some(node) = g.node_mut(&v) {
            node.rank = Some(rank);
        }
    }
}

/// Shifts ranks so the lowest is 0.
pub fn normalize_ranks(g: &mut LayoutGraph) {
    let mut min_rank: Option<i32> = None;
    g.for_each_node(|_, node| {
        if let Some(rank) = node.rank {
            min_rank = Some(min_rank.map_or(rank, |m| m.min(rank)));
        }
    });
    let Some(min_rank) = min_rank else {
        return;
    };
    g.for_each_node_mut(|_, node| {
        if let Some(rank) = node.rank.as_mut() {
            *rank -= min_rank;
        }
    });
}

/// Closes up empty ranks, except those on a multiple of `factor`: nesting keeps those as the
/// boundaries between subgraph levels. A `factor` of 0 leaves ranks untouched.
pub fn remove_empty_ranks(g: &mut LayoutGraph, factor: usize) {
    if factor == 0 {
        return;
    }
    let mut offset: Option<i32> = None;
    g.for_each_node(|_, node| {
        if let Some(rank) = node.rank {
            offset = Some(offset.map_or(rank, |o| o.min(rank)));
        }
    });
    let Some(offset) = offset else {
        return;
    };

    let mut layers: BTreeMap<usize, Vec<String>> = BTreeMap::new();
    g.for_each_node(|v, node| {
        if let Some(rank) = node.rank {
            let ix = usize::try_from(rank - offset).unwrap_or(0);
            layers.entry(ix).or_default().push(v.to_string());
        }
    });
    let max_ix = layers.keys().next_back().copied().unwrap_or(0);

    let mut delta: i32 = 0;
    for i in 0..=max_ix {
        match layers.get(&i) {
            None if i % factor != 0 => delta -= 1,
            Some(vs) if delta != 0 => {
                for v in vs {
                    if let Some(rank) = g.node_mut(v).and_then(|n| n.rank.as_mut()) {
                        *rank += delta;
                    }
                }
            }
            _ => {}
        }
    }
}
