//! Single-source and all-pairs shortest paths.

use crate::data::PriorityQueue;
use simnet_graph::{EdgeKey, Graph};
use std::collections::BTreeMap;

/// Distance from the source and the previous node on one shortest path.
#[derive(Debug, Clone, PartialEq)]
pub struct PathEntry {
    pub distance: f64,
    pub predecessor: Option<String>,
}

impl PathEntry {
    fn unreached() -> Self {
        Self {
            distance: f64::INFINITY,
            predecessor: None,
        }
    }
}

/// The default edge selector: out-edges in a directed graph, incident edges otherwise.
pub fn out_edges_of<N, E, G>(g: &Graph<N, E, G>) -> impl Fn(&str) -> Vec<EdgeKey> + '_
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    move |v| g.out_edges(v, None)
}

/// Shortest paths from `source` to every node of `g`.
///
/// `edge_fn(v)` lists the edges to relax from `v`; the neighbor reached is the endpoint that is
/// not `v`. Nodes that cannot be reached keep an infinite distance and no predecessor.
///
/// # Panics
///
/// Panics if `weight_fn` returns a negative weight.
pub fn dijkstra<N, E, G, W, F>(
    g: &Graph<N, E, G>,
    source: &str,
    weight_fn: W,
    edge_fn: F,
) -> BTreeMap<String, PathEntry>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
    W: Fn(&EdgeKey) -> f64,
    F: Fn(&str) -> Vec<EdgeKey>,
{
    let mut results: BTreeMap<String, PathEntry> = BTreeMap::new();
    let mut pq = PriorityQueue::new();

    for v in g.nodes() {
        let distance = if v == source { 0.0 } else { f64::INFINITY };
        results.insert(
            v.to_string(),
            PathEntry {
                distance,
                predecessor: None,
            },
        );
        pq.add(v, distance);
    }

    while !pq.is_empty() {
        let v = pq.remove_min();
        let v_distance = results[&v].distance;
        if v_distance == f64::INFINITY {
            break;
        }

        for edge in edge_fn(&v) {
            let w = edge.other(&v);
            let weight = weight_fn(&edge);
            assert!(
                weight >= 0.0,
                "dijkstra does not allow negative edge weights; bad edge {edge} with weight {weight}"
            );
            let distance = v_distance + weight;
            let Some(entry) = results.get_mut(w) else {
                continue;
            };
            if distance < entry.distance {
                entry.distance = distance;
                entry.predecessor = Some(v.clone());
                pq.decrease(w, distance);
            }
        }
    }

    results
}

/// [`dijkstra`] from every node.
pub fn dijkstra_all<N, E, G, W, F>(
    g: &Graph<N, E, G>,
    weight_fn: W,
    edge_fn: F,
) -> BTreeMap<String, BTreeMap<String, PathEntry>>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
    W: Fn(&EdgeKey) -> f64,
    F: Fn(&str) -> Vec<EdgeKey>,
{
    g.nodes()
        .map(|v| (v.to_string(), dijkstra(g, v, &weight_fn, &edge_fn)))
        .collect()
}

/// All-pairs shortest paths by dynamic programming over intermediate nodes. O(V^3).
pub fn floyd_warshall<N, E, G, W, F>(
    g: &Graph<N, E, G>,
    weight_fn: W,
    edge_fn: F,
) -> BTreeMap<String, BTreeMap<String, PathEntry>>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
    W: Fn(&EdgeKey) -> f64,
    F: Fn(&str) -> Vec<EdgeKey>,
{
    let nodes = g.node_ids();
    let n = nodes.len();
    let index: BTreeMap<&str, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, v)| (v.as_str(), i))
        .collect();

    let mut dist: Vec<Vec<PathEntry>> = vec![vec![PathEntry::unreached(); n]; n];
    for (i, v) in nodes.iter().enumerate() {
        dist[i][i].distance = 0.0;
        for edge in edge_fn(v) {
            let Some(&j) = index.get(edge.other(v)) else {
                continue;
            };
            let distance = weight_fn(&edge);
            if distance < dist[i][j].distance {
                dist[i][j] = PathEntry {
                    distance,
                    predecessor: Some(v.clone()),
                };
            }
        }
    }

    for k in 0..n {
        for i in 0..n {
            let ik = dist[i][k].distance;
            if ik == f64::INFINITY {
                continue;
            }
            for j in 0..n {
                let alt = ik + dist[k][j].distance;
                if alt < dist[i][j].distance {
                    let predecessor = dist[k][j].predecessor.clone();
                    dist[i][j] = PathEntry {
                        distance: alt,
                        predecessor,
                    };
                }
            }
        }
    }

    nodes
        .iter()
        .zip(dist)
        .map(|(v, row)| {
            let row: BTreeMap<String, PathEntry> = nodes.iter().cloned().zip(row).collect();
            (v.clone(), row)
        })
        .collect()
}
