use crate::LayoutGraph;
use rustc_hash::FxHashMap as HashMap;

/// Weighted crossings over every pair of adjacent layers.
pub fn cross_count(g: &LayoutGraph, layering: &[Vec<String>]) -> f64 {
    layering
        .windows(2)
        .map(|pair| cross_layers(g, &pair[0], &pair[1]))
        .sum()
}

/// Weighted crossings between the edges from `north` to `south`, both given in order.
///
/// Edges are visited by north position, then south position (stable, so parallel edges keep
/// insertion order), and accumulated in an implicit binary tree over south positions: each edge
/// crosses every edge already inserted further right.
pub fn cross_layers(g: &LayoutGraph, north: &[String], south: &[String]) -> f64 {
    if south.is_empty() {
        return 0.0;
    }
    let south_pos: HashMap<&str, usize> = south
        .iter()
        .enumerate()
        .map(|(i, v)| (v.as_str(), i))
        .collect();

    let mut entries: Vec<(usize, f64)> = Vec::new();
    for v in north {
        let start = entries.len();
        g.for_each_out_edge(v, |key, label| {
            if let Some(&pos) = south_pos.get(key.w.as_str()) {
                entries.push((pos, label.weight));
            }
        });
        entries[start..].sort_by_key(|&(pos, _)| pos);
    }

    let first_index = south.len().next_power_of_two() - 1;
    let mut tree: Vec<f64> = vec![0.0; 2 * first_index + 1];
    let mut crossings = 0.0;
    for (pos, weight) in entries {
        let mut index = pos + first_index;
        tree[index] += weight;
        let mut right_of = 0.0;
        while index > 0 {
            if index % 2 == 1 {
                right_of += tree[index + 1];
            }
            index = (index - 1) / 2;
            tree[index] += weight;
        }
        crossings += weight * right_of;
    }
    crossings
}
