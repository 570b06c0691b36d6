//! Greedy feedback arc set (Eades, Lin and Smyth).
//!
//! Nodes sit in buckets keyed by `out - in`. Sinks and sources are peeled off for free; when only
//! "mixed" nodes remain, the one with the largest `out - in` is removed and its remaining in-edges
//! join the feedback set.

use rustc_hash::FxHashMap as HashMap;
use simnet_graph::{EdgeKey, Graph};
use std::collections::VecDeque;

/// Feedback arc set with every edge weighing `1`.
pub fn greedy_fas_unweighted<N, E, G>(g: &Graph<N, E, G>) -> Vec<EdgeKey>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    greedy_fas(g, |_| 1)
}

/// Edges of `g` whose removal leaves it acyclic, picked greedily by weighted degree.
///
/// Parallel edges are merged (weights summed) for the search and expanded again in the result.
/// Self-loops are ignored. Weights are expected to be non-negative; the bucket array grows with
/// `max_out + max_in`, so huge weights cost memory linearly.
pub fn greedy_fas<N, E, G>(g: &Graph<N, E, G>, weight_fn: impl Fn(&E) -> i64) -> Vec<EdgeKey>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    if g.node_count() <= 1 {
        return Vec::new();
    }

    let ids: Vec<&str> = g.nodes().collect();
    let index: HashMap<&str, usize> = ids.iter().enumerate().map(|(i, &v)| (v, i)).collect();
    let n = ids.len();

    let mut pair_slot: HashMap<(usize, usize), usize> = HashMap::default();
    let mut pairs: Vec<(usize, usize, i64)> = Vec::new();
    g.for_each_edge(|key, label| {
        if key.is_self_loop() {
            return;
        }
        let (v, w) = (index[key.v.as_str()], index[key.w.as_str()]);
        let weight = weight_fn(label);
        match pair_slot.get(&(v, w)) {
            Some(&slot) => pairs[slot].2 += weight,
            None => {
                pair_slot.insert((v, w), pairs.len());
                pairs.push((v, w, weight));
            }
        }
    });

    let mut fas = FasState::new(n, &pairs);
    let last = fas.buckets.len() - 1;
    for v in 0..n {
        fas.assign_bucket(v);
    }

    let mut picked: Vec<(usize, usize)> = Vec::new();
    while fas.remaining > 0 {
        while let Some(v) = fas.pop(0) {
            fas.remove(v, None);
        }
        while let Some(v) = fas.pop(last) {
            fas.remove(v, None);
        }
        if fas.remaining == 0 {
            break;
        }
        let Some(v) = (1..last).rev().find_map(|i| fas.pop(i)) else {
            debug_assert!(false, "every live node sits in some bucket");
            break;
        };
        fas.remove(v, Some(&mut picked));
    }

    picked
        .into_iter()
        .flat_map(|(u, v)| g.out_edges(ids[u], Some(ids[v])))
        .collect()
}

struct FasState {
    in_w: Vec<i64>,
    out_w: Vec<i64>,
    ins: Vec<Vec<(usize, i64)>>,
    outs: Vec<Vec<(usize, i64)>>,
    alive: Vec<bool>,
    remaining: usize,
    zero_idx: i64,
    /// FIFO buckets of `(node, stamp)`; an entry is stale once the node's stamp moved on.
    buckets: Vec<VecDeque<(usize, u32)>>,
    stamp: Vec<u32>,
}

impl FasState {
    fn new(n: usize, pairs: &[(usize, usize, i64)]) -> Self {
        let mut in_w = vec![0i64; n];
        let mut out_w = vec![0i64; n];
        let mut ins: Vec<Vec<(usize, i64)>> = vec![Vec::new(); n];
        let mut outs: Vec<Vec<(usize, i64)>> = vec![Vec::new(); n];
        for &(v, w, weight) in pairs {
            out_w[v] += weight;
            in_w[w] += weight;
            outs[v].push((w, weight));
            ins[w].push((v, weight));
        }
        let max_in = in_w.iter().copied().max().unwrap_or(0).max(0);
        let max_out = out_w.iter().copied().max().unwrap_or(0).max(0);
        let bucket_count = usize::try_from(max_out + max_in + 3).unwrap_or(3);

        Self {
            in_w,
            out_w,
            ins,
            outs,
            alive: vec![true; n],
            remaining: n,
            zero_idx: max_in + 1,
            buckets: vec![VecDeque::new(); bucket_count],
            stamp: vec![0; n],
        }
    }

    fn assign_bucket(&mut self, v: usize) {
        let last = self.buckets.len() - 1;
        let idx = if self.out_w[v] <= 0 {
            0
        } else if self.in_w[v] <= 0 {
            last
        } else {
            let raw = self.out_w[v] - self.in_w[v] + self.zero_idx;
            usize::try_from(raw).unwrap_or(1).clamp(1, last - 1)
        };
        self.stamp[v] += 1;
        self.buckets[idx].push_front((v, self.stamp[v]));
    }

    fn pop(&mut self, idx: usize) -> Option<usize> {
        while let Some((v, stamp)) = self.buckets[idx].pop_back() {
            if self.alive[v] && self.stamp[v] == stamp {
                return Some(v);
            }
        }
        None
    }

    fn remove(&mut self, v: usize, mut feedback: Option<&mut Vec<(usize, usize)>>) {
        self.alive[v] = false;
        self.remaining -= 1;

        for i in 0..self.ins[v].len() {
            let (u, weight) = self.ins[v][i];
            if !self.alive[u] {
                continue;
            }
            if let Some(out) = feedback.as_deref_mut() {
                out.push((u, v));
            }
            self.out_w[u] -= weight;
            self.assign_bucket(u);
        }
        for i in 0..self.outs[v].len() {
            let (w, weight) = self.outs[v][i];
            if !self.alive[w] {
                continue;
            }
            self.in_w[w] -= weight;
            self.assign_bucket(w);
        }
    }
}
