//! Strongly connected components and topological order.

use crate::error::{Error, Result};
use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};
use simnet_graph::Graph;

#[derive(Debug, Clone, Copy)]
struct Visit {
    index: usize,
    low: usize,
    on_stack: bool,
}

struct Tarjan<'a, N, E, G>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    g: &'a Graph<N, E, G>,
    next_index: usize,
    visits: HashMap<&'a str, Visit>,
    stack: Vec<&'a str>,
    components: Vec<Vec<String>>,
}

impl<'a, N, E, G> Tarjan<'a, N, E, G>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    fn visit(&mut self, v: &'a str) {
        let g = self.g;
        let index = self.next_index;
        self.next_index += 1;
        self.visits.insert(
            v,
            Visit {
                index,
                low: index,
                on_stack: true,
            },
        );
        self.stack.push(v);

        for w in g.successors(v) {
            match self.visits.get(w).copied() {
                None => {
                    self.visit(w);
                    let w_low = self.visits[w].low;
                    if let Some(entry) = self.visits.get_mut(v) {
                        entry.low = entry.low.min(w_low);
                    }
                }
                Some(w_visit) if w_visit.on_stack => {
                    if let Some(entry) = self.visits.get_mut(v) {
                        entry.low = entry.low.min(w_visit.index);
                    }
                }
                Some(_) => {}
            }
        }

        let entry = self.visits[v];
        if entry.low == entry.index {
            let mut component: Vec<String> = Vec::new();
            while let Some(w) = self.stack.pop() {
                if let Some(visit) = self.visits.get_mut(w) {
                    visit.on_stack = false;
                }
                component.push(w.to_string());
                if w == v {
                    break;
                }
            }
            self.components.push(component);
        }
    }
}

/// Strongly connected components, in the order they are completed.
///
/// Every node of `g` is in exactly one component. Recursion depth grows with the longest DFS
/// path, so very deep graphs need a correspondingly large stack.
pub fn tarjan<N, E, G>(g: &Graph<N, E, G>) -> Vec<Vec<String>>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    let mut state = Tarjan {
        g,
        next_index: 0,
        visits: HashMap::default(),
        stack: Vec::new(),
        components: Vec::new(),
    };
    for v in g.nodes() {
        if !state.visits.contains_key(v) {
            state.visit(v);
        }
    }
    state.components
}

/// Components that contain a cycle: more than one node, or one node with a self-loop.
pub fn find_cycles<N, E, G>(g: &Graph<N, E, G>) -> Vec<Vec<String>>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    tarjan(g)
        .into_iter()
        .filter(|cmpt| match cmpt.as_slice() {
            [v] => !g.out_edges(v, Some(v)).is_empty(),
            _ => true,
        })
        .collect()
}

/// Orders the nodes so that every node comes after all of its predecessors.
///
/// The walk starts at the sinks and follows predecessors. Meeting a node that is still on the
/// walk, or finishing with nodes that no sink reaches, is reported as [`Error::Cycle`].
pub fn topsort<N, E, G>(g: &Graph<N, E, G>) -> Result<Vec<String>>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    fn visit<'a, N, E, G>(
        g: &'a Graph<N, E, G>,
        v: &'a str,
        on_walk: &mut HashSet<&'a str>,
        done: &mut HashSet<&'a str>,
        out: &mut Vec<String>,
    ) -> Result<()>
    where
        N: Default + 'static,
        E: Default + 'static,
        G: Default,
    {
        if on_walk.contains(v) {
            return Err(Error::Cycle {
                node: Some(v.to_string()),
            });
        }
        if done.contains(v) {
            return Ok(());
        }
        on_walk.insert(v);
        for u in g.predecessors(v) {
            visit(g, u, on_walk, done, out)?;
        }
        on_walk.remove(v);
        done.insert(v);
        out.push(v.to_string());
        Ok(())
    }

    let mut on_walk: HashSet<&str> = HashSet::default();
    let mut done: HashSet<&str> = HashSet::default();
    let mut out: Vec<String> = Vec::with_capacity(g.node_count());
    for v in g.sinks() {
        visit(g, v, &mut on_walk, &mut done, &mut out)?;
    }

    if out.len() != g.node_count() {
        return Err(Error::Cycle { node: None });
    }
    Ok(out)
}

pub fn is_acyclic<N, E, G>(g: &Graph<N, E, G>) -> bool
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    topsort(g).is_ok()
}
