use crate::LayoutGraph;
use rustc_hash::FxHashSet as HashSet;

/// Initial layering: leaf nodes taken by rank (ties in insertion order), each followed by a
/// depth-first walk over successors. Every visited node is appended to its rank's layer.
pub fn init_order(g: &LayoutGraph) -> Vec<Vec<String>> {
    fn dfs<'a>(
        g: &'a LayoutGraph,
        v: &'a str,
        visited: &mut HashSet<&'a str>,
        layers: &mut [Vec<String>],
    ) {
        if !visited.insert(v) {
            return;
        }
        let Some(rank) = g.node(v).and_then(|n| n.rank) else {
            return;
        };
        if let Some(layer) = usize::try_from(rank).ok().and_then(|r| layers.get_mut(r)) {
            layer.push(v.to_string());
        }
        for w in g.successors(v) {
            dfs(g, w, visited, layers);
        }
    }

    let mut leaves: Vec<(i32, &str)> = g
        .nodes()
        .filter(|v| !g.has_children(v))
        .filter_map(|v| Some((g.node(v)?.rank?, v)))
        .collect();
    let Some(max_rank) = leaves.iter().map(|&(rank, _)| rank).max() else {
        return Vec::new();
    };
    leaves.sort_by_key(|&(rank, _)| rank);

    let mut layers: Vec<Vec<String>> =
        vec![Vec::new(); usize::try_from(max_rank).map_or(0, |r| r + 1)];
    let mut visited: HashSet<&str> = HashSet::default();
    for (_, v) in leaves {
        dfs(g, v, &mut visited, &mut layers);
    }
    layers
}
