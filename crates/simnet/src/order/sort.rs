//! Ordering of one rank: weighted positions, constraint-driven merging, and the final sort.

use super::LayerGraph;
use rustc_hash::FxHashMap as HashMap;
use simnet_graph::Graph;
use std::cmp::Ordering;

/// Weighted mean order of a node's in-neighbors. `value` is `None` without in-edges.
#[derive(Debug, Clone, PartialEq)]
pub struct Mass {
    pub v: String,
    pub value: Option<f64>,
    pub weight: Option<f64>,
}

/// A run of nodes that must stay together, with its original index among the movable nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct SortEntry {
    pub vs: Vec<String>,
    pub i: usize,
    pub value: Option<f64>,
    pub weight: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SortResult {
    pub vs: Vec<String>,
    pub value: Option<f64>,
    pub weight: Option<f64>,
}

pub fn mass(lg: &LayerGraph, movable: &[String]) -> Vec<Mass> {
    movable
        .iter()
        .map(|v| {
            let mut sum = 0.0;
            let mut weight = 0.0;
            let mut seen = false;
            lg.for_each_in_edge(v, |key, &w| {
                seen = true;
                let order = lg.node(&key.v).and_then(|n| n.order).unwrap_or(0);
                sum += w * order as f64;
                weight += w;
            });
            Mass {
                v: v.clone(),
                value: seen.then(|| sum / weight),
                weight: seen.then_some(weight),
            }
        })
        .collect()
}

#[derive(Debug, Clone)]
struct Conflict {
    vs: Vec<usize>,
    i: usize,
    value: Option<f64>,
    weight: Option<f64>,
    indegree: usize,
    ins: Vec<usize>,
    outs: Vec<usize>,
    merged: bool,
}

/// Merges masses that the constraint graph `cg` forbids from being reordered.
///
/// Entries are processed in topological order of `cg`. When a processed predecessor ends up at
/// or right of its successor (or either has no value) the two collapse into one entry, keeping
/// the predecessor's nodes first.
pub fn conflicts<N, E, G>(masses: &[Mass], cg: &Graph<N, E, G>) -> Vec<SortEntry>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    let slot: HashMap<&str, usize> = masses
        .iter()
        .enumerate()
        .map(|(i, m)| (m.v.as_str(), i))
        .collect();
    let mut entries: Vec<Conflict> = masses
        .iter()
        .enumerate()
        .map(|(i, m)| Conflict {
            vs: vec![i],
            i,
            value: m.value,
            weight: m.weight,
            indegree: 0,
            ins: Vec::new(),
            outs: Vec::new(),
            merged: false,
        })
        .collect();

    for e in cg.edges() {
        let (Some(&v), Some(&w)) = (slot.get(e.v.as_str()), slot.get(e.w.as_str())) else {
            continue;
        };
        entries[w].indegree += 1;
        entries[v].outs.push(w);
    }

    let mut sources: Vec<usize> = (0..entries.len())
        .filter(|&i| entries[i].indegree == 0)
        .collect();
    let mut processed: Vec<usize> = Vec::new();
    while let Some(v) = sources.pop() {
        processed.push(v);

        let ins = std::mem::take(&mut entries[v].ins);
        for u in ins.into_iter().rev() {
            if entries[u].merged {
                continue;
            }
            let collapse = match (entries[u].value, entries[v].value) {
                (Some(uv), Some(vv)) => uv >= vv,
                _ => true,
            };
            if collapse {
                merge(&mut entries, v, u);
            }
        }

        for w in std::mem::take(&mut entries[v].outs) {
            entries[w].ins.push(v);
            entries[w].indegree -= 1;
            if entries[w].indegree == 0 {
                sources.push(w);
            }
        }
    }

    processed
        .into_iter()
        .filter(|&i| !entries[i].merged)
        .map(|i| {
            let entry = &entries[i];
            SortEntry {
                vs: entry.vs.iter().map(|&m| masses[m].v.clone()).collect(),
                i: entry.i,
                value: entry.value,
                weight: entry.weight,
            }
        })
        .collect()
}

fn merge(entries: &mut [Conflict], target: usize, source: usize) {
    let mut sum = 0.0;
    let mut weight = 0.0;
    for ix in [target, source] {
        if let (Some(value), Some(w)) = (entries[ix].value, entries[ix].weight) {
            if w != 0.0 {
                sum += value * w;
                weight += w;
            }
        }
    }

    let mut vs = std::mem::take(&mut entries[source].vs);
    vs.append(&mut entries[target].vs);
    let source_i = entries[source].i;
    entries[source].merged = true;

    let t = &mut entries[target];
    t.vs = vs;
    if weight != 0.0 {
        t.value = Some(sum / weight);
        t.weight = Some(weight);
    }
    t.i = t.i.min(source_i);
}

/// Orders entries by value. Ties go left-to-right by index, or right-to-left with
/// `bias_right`. Entries without a value keep their index position.
pub fn sort(entries: &[SortEntry], bias_right: bool) -> SortResult {
    let (mut sortable, mut unsortable): (Vec<&SortEntry>, Vec<&SortEntry>) =
        entries.iter().partition(|e| e.value.is_some());

    unsortable.sort_by(|a, b| b.i.cmp(&a.i));
    sortable.sort_by(|a, b| {
        let (av, bv) = (a.value.unwrap_or(0.0), b.value.unwrap_or(0.0));
        match av.partial_cmp(&bv) {
            Some(Ordering::Less) => Ordering::Less,
            Some(Ordering::Greater) => Ordering::Greater,
            _ if bias_right => b.i.cmp(&a.i),
            _ => a.i.cmp(&b.i),
        }
    });

    fn consume_unsortable(
        out: &mut Vec<String>,
        unsortable: &mut Vec<&SortEntry>,
        mut index: usize,
    ) -> usize {
        while let Some(last) = unsortable.last() {
            if last.i > index {
                break;
            }
            out.extend(last.vs.iter().cloned());
            unsortable.pop();
            index += 1;
        }
        index
    }

    let mut vs: Vec<String> = Vec::with_capacity(entries.iter().map(|e| e.vs.len()).sum());
    let mut sum = 0.0;
    let mut weight = 0.0;
    let mut index = consume_unsortable(&mut vs, &mut unsortable, 0);
    for entry in sortable {
        index += entry.vs.len();
        vs.extend(entry.vs.iter().cloned());
        if let (Some(value), Some(w)) = (entry.value, entry.weight) {
            sum += value * w;
            weight += w;
        }
        index = consume_unsortable(&mut vs, &mut unsortable, index);
    }

    let (value, weight) = if weight != 0.0 {
        (Some(sum / weight), Some(weight))
    } else {
        (None, None)
    };
    SortResult { vs, value, weight }
}

/// Orders the children of `v` in a layer graph, recursing into child subgraphs.
///
/// A subgraph's left/right borders are kept out of the sort and put at the ends. When the borders
/// are linked to the adjacent rank, their neighbors' orders are folded into the result's value, so
/// the subgraph moves as one unit one level up.
pub fn sort_subgraph<N, E, G>(
    lg: &LayerGraph,
    v: &str,
    cg: &Graph<N, E, G>,
    bias_right: bool,
) -> SortResult
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    let (border_left, border_right) = match lg.node(v) {
        Some(node) => (node.border_left.clone(), node.border_right.clone()),
        None => (None, None),
    };
    let movable: Vec<String> = lg
        .children(v)
        .into_iter()
        .filter(|w| border_left.as_deref() != Some(*w) && border_right.as_deref() != Some(*w))
        .map(str::to_string)
        .collect();

    let mut subgraphs: HashMap<String, SortResult> = HashMap::default();
    let mut masses = mass(lg, &movable);
    for entry in &mut masses {
        if !lg.has_children(&entry.v) {
            continue;
        }
        let nested = sort_subgraph(lg, &entry.v, cg, bias_right);
        if let Some(nested_value) = nested.value {
            let nested_weight = nested.weight.unwrap_or(0.0);
            match (entry.value, entry.weight) {
                (Some(value), Some(weight)) => {
                    let total = weight + nested_weight;
                    entry.value = Some((value * weight + nested_value * nested_weight) / total);
                    entry.weight = Some(total);
                }
                _ => {
                    entry.value = Some(nested_value);
                    entry.weight = Some(nested_weight);
                }
            }
        }
        subgraphs.insert(entry.v.clone(), nested);
    }

    let mut entries = conflicts(&masses, cg);
    for entry in &mut entries {
        entry.vs = entry
            .vs
            .iter()
            .flat_map(|w| match subgraphs.get(w) {
                Some(nested) => nested.vs.clone(),
                None => vec![w.clone()],
            })
            .collect();
    }

    let mut result = sort(&entries, bias_right);

    if let (Some(bl), Some(br)) = (border_left, border_right) {
        let order_of = |border: &str| {
            lg.first_predecessor(border)
                .map(|p| lg.node(p).and_then(|n| n.order).unwrap_or(0) as f64)
        };
        let preds = (order_of(&bl), order_of(&br));

        let mut vs = Vec::with_capacity(result.vs.len() + 2);
        vs.push(bl);
        vs.append(&mut result.vs);
        vs.push(br);
        result.vs = vs;

        if let (Some(left), Some(right)) = preds {
            let value = result.value.unwrap_or(0.0);
            let weight = result.weight.unwrap_or(0.0);
            result.value = Some((value * weight + left + right) / (weight + 2.0));
            result.weight = Some(weight + 2.0);
        }
    }

    result
}
