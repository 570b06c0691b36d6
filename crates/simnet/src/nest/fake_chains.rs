use crate::LayoutGraph;
use crate::model::LayoutContext;
use crate::util::rank_of;
use rustc_hash::FxHashMap as HashMap;

/// Moves each normalized chain node into the subgraph it crosses.
///
/// The chain climbs from the tail's parent towards the lowest common ancestor of the edge's
/// endpoints while the rank is past the current subgraph's `max_rank`, then descends towards
/// the head's parent once the rank reaches the next subgraph's `min_rank`.
pub fn fake_chains(g: &mut LayoutGraph, ctx: &LayoutContext) {
    let postorder = postorder(g);

    for chain in &ctx.chains {
        let link = &chain.link;
        let (path, lca) = find_path(g, &postorder, &link.v, &link.w);
        let mut path_idx = 0usize;
        let mut path_v: Option<String> = path.first().cloned().flatten();
        let mut ascending = true;

        let mut v = chain.head.clone();
        while v != link.w {
            let rank = rank_of(g, &v);

            if ascending {
                while path_v != lca
                    && path_v
                        .as_deref()
                        .and_then(|p| g.node(p))
                        .and_then(|n| n.max_rank)
                        .is_some_and(|max| max < rank)
                {
                    path_idx += 1;
                    path_v = path.get(path_idx).cloned().flatten();
                }
                if path_v == lca {
                    ascending = false;
                }
            }

            if !ascending {
                while path_idx + 1 < path.len()
                    && path[path_idx + 1]
                        .as_deref()
                        .and_then(|p| g.node(p))
                        .and_then(|n| n.min_rank)
                        .is_some_and(|min| min <= rank)
                {
                    path_idx += 1;
                }
                path_v = path.get(path_idx).cloned().flatten();
            }

            match &path_v {
                Some(parent) => {
                    g.set_parent(v.as_str(), parent.as_str());
                }
                None => {
                    g.clear_parent(&v);
                }
            }

            let Some(next) = g.first_successor(&v).map(str::to_string) else {
                break;
            };
            v = next;
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Postorder {
    low: usize,
    lim: usize,
}

/// Ancestors of `v` up to and including the LCA, followed by the ancestors of `w` below the
/// LCA from the top down. `None` stands for the top level.
fn find_path(
    g: &LayoutGraph,
    postorder: &HashMap<String, Postorder>,
    v: &str,
    w: &str,
) -> (Vec<Option<String>>, Option<String>) {
    let (Some(v_po), Some(w_po)) = (postorder.get(v), postorder.get(w)) else {
        return (vec![None], None);
    };
    let low = v_po.low.min(w_po.low);
    let lim = v_po.lim.max(w_po.lim);

    let mut path: Vec<Option<String>> = Vec::new();
    let mut current = v.to_string();
    let lca = loop {
        let parent = g.parent(&current).map(str::to_string);
        path.push(parent.clone());
        let Some(p) = parent else {
            break None;
        };
        if postorder
            .get(&p)
            .is_some_and(|po| po.low <= low && lim <= po.lim)
        {
            break Some(p);
        }
        current = p;
    };

    let mut w_path: Vec<Option<String>> = Vec::new();
    let mut current = w.to_string();
    while let Some(p) = g.parent(&current).map(str::to_string) {
        if Some(&p) == lca.as_ref() {
            break;
        }
        w_path.push(Some(p.clone()));
        current = p;
    }
    path.extend(w_path.into_iter().rev());
    (path, lca)
}

fn postorder(g: &LayoutGraph) -> HashMap<String, Postorder> {
    fn dfs(g: &LayoutGraph, v: &str, lim: &mut usize, out: &mut HashMap<String, Postorder>) {
        let low = *lim;
        for child in g.children(v) {
            dfs(g, child, lim, out);
        }
        out.insert(v.to_string(), Postorder { low, lim: *lim });
        *lim += 1;
    }

    let mut out: HashMap<String, Postorder> = HashMap::default();
    let mut lim = 0usize;
    for v in g.children_root() {
        dfs(g, v, &mut lim, &mut out);
    }
    out
}
