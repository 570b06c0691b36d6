use crate::LayoutGraph;
use crate::model::{BorderKind, Dummy, EdgeLabel, NodeLabel};
use crate::util::{NodeIds, rank_of};

/// Copies the ranks of each subgraph's top and bottom borders into its `min_rank`/`max_rank`.
pub fn assign_rank_ranges(g: &mut LayoutGraph) {
    let mut ranges: Vec<(String, i32, i32)> = Vec::new();
    g.for_each_node(|v, label| {
        if let (Some(top), Some(bottom)) = (&label.border_top, &label.border_bottom) {
            ranges.push((v.to_string(), rank_of(g, top), rank_of(g, bottom)));
        }
    });
    for (v, min_rank, max_rank) in ranges {
        if let Some(label) = g.node_mut(&v) {
            label.min_rank = Some(min_rank);
            label.max_rank = Some(max_rank);
        }
    }
}

/// Gives every ranked subgraph one `_bl` and one `_br` node per rank of its range, each side
/// chained top to bottom by weight-1 edges.
pub fn add_borders(g: &mut LayoutGraph) {
    fn dfs(g: &mut LayoutGraph, ids: &mut NodeIds, v: &str) {
        let children: Vec<String> = g.children(v).into_iter().map(str::to_string).collect();
        for child in &children {
            dfs(g, ids, child);
        }

        let Some((min_rank, max_rank)) = g.node(v).and_then(|n| Some((n.min_rank?, n.max_rank?)))
        else {
            return;
        };
        let slots = usize::try_from(max_rank).map_or(0, |r| r + 1);
        if let Some(label) = g.node_mut(v) {
            label.border_left = vec![None; slots];
            label.border_right = vec![None; slots];
        }
        for rank in min_rank..=max_rank {
            add_border_node(g, ids, v, rank, BorderKind::Left);
            add_border_node(g, ids, v, rank, BorderKind::Right);
        }
    }

    if !g.is_compound() {
        return;
    }
    let mut ids = NodeIds::default();
    let top_level: Vec<String> = g.children_root().into_iter().map(str::to_string).collect();
    for v in top_level {
        dfs(g, &mut ids, &v);
    }
}

fn add_border_node(g: &mut LayoutGraph, ids: &mut NodeIds, sg: &str, rank: i32, side: BorderKind) {
    let prefix = match side {
        BorderKind::Left => "_bl",
        _ => "_br",
    };
    let prev = g.node(sg).and_then(|n| {
        let above = match side {
            BorderKind::Left => n.border_left_at(rank - 1),
            _ => n.border_right_at(rank - 1),
        };
        above.map(str::to_string)
    });

    let curr = ids.add_dummy(
        g,
        prefix,
        Dummy::Border(side),
        NodeLabel {
            rank: Some(rank),
            ..Default::default()
        },
    );
    if let (Some(label), Ok(slot)) = (g.node_mut(sg), usize::try_from(rank)) {
        let borders = match side {
            BorderKind::Left => &mut label.border_left,
            _ => &mut label.border_right,
        };
        if slot >= borders.len() {
            borders.resize(slot + 1, None);
        }
        borders[slot] = Some(curr.clone());
    }
    g.set_parent(curr.as_str(), sg);
    if let Some(prev) = prev {
        g.set_edge_with_label(prev, curr, EdgeLabel::weighted(1.0));
    }
}

/// Sizes each subgraph to the box spanned by its border nodes, then deletes all border nodes.
pub fn remove_borders(g: &mut LayoutGraph) {
    let mut boxes: Vec<(String, f64, f64, f64, f64)> = Vec::new();
    for v in g.nodes() {
        if !g.has_children(v) {
            continue;
        }
        let Some(label) = g.node(v) else {
            continue;
        };
        let at = |id: Option<&String>| id.and_then(|id| g.node(id));
        let top = at(label.border_top.as_ref());
        let bottom = at(label.border_bottom.as_ref());
        let left = at(label.border_left.iter().flatten().last());
        let right = at(label.border_right.iter().flatten().last());
        let (Some(t), Some(b), Some(l), Some(r)) = (top, bottom, left, right) else {
            continue;
        };
        let width = (r.x - l.x).abs();
        let height = (b.y - t.y).abs();
        boxes.push((v.to_string(), l.x + width / 2.0, t.y + height / 2.0, width, height));
    }
    for (v, x, y, width, height) in boxes {
        if let Some(label) = g.node_mut(&v) {
            label.x = x;
            label.y = y;
            label.width = width;
            label.height = height;
        }
    }

    let borders: Vec<String> = g
        .nodes()
        .filter(|v| {
            g.node(v)
                .is_some_and(|n| matches!(n.dummy, Some(Dummy::Border(_))))
        })
        .map(str::to_string)
        .collect();
    for v in borders {
        g.remove_node(&v);
    }
}
