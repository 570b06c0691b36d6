//! Structural queries over a [`Graph`].

use super::Graph;
use rustc_hash::FxHashSet as HashSet;
use std::collections::VecDeque;

/// Weakly connected components, each listed in BFS order from its first node in insertion order.
pub fn components<N, E, G>(g: &Graph<N, E, G>) -> Vec<Vec<String>>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    let mut seen: HashSet<&str> = HashSet::default();
    let mut out: Vec<Vec<String>> = Vec::new();

    for start in g.nodes() {
        if !seen.insert(start) {
            continue;
        }
        let mut comp: Vec<String> = Vec::new();
        let mut queue: VecDeque<&str> = VecDeque::from([start]);
        while let Some(v) = queue.pop_front() {
            comp.push(v.to_string());
            for n in g.neighbors(v) {
                if seen.insert(n) {
                    queue.push_back(n);
                }
            }
        }
        out.push(comp);
    }

    out
}
