//! The [`Graph`] container.
//!
//! Nodes and edges are stored in slot arenas (`Vec<Option<_>>`). A removal tombstones its slot and
//! unlinks it from the per-node adjacency lists; nothing else moves, so the edge slots cached in
//! those lists stay valid. Once tombstones outnumber live entries the arenas are compacted.

mod edge_key;
mod entries;
mod options;

pub mod alg;

pub use edge_key::EdgeKey;
pub use options::GraphOptions;

use edge_key::EdgeKeyView;
use entries::{EdgeEntry, NodeEntry};
use rustc_hash::FxBuildHasher;
use std::sync::Arc;

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

const COMPACT_MIN_SLOTS: usize = 64;

type LabelFactory<T> = Arc<dyn Fn() -> T + Send + Sync>;

pub struct Graph<N, E, G>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    options: GraphOptions,

    graph_label: G,
    default_node_label: LabelFactory<N>,
    default_edge_label: LabelFactory<E>,

    nodes: Vec<Option<NodeEntry<N>>>,
    node_index: HashMap<String, usize>,

    edges: Vec<Option<EdgeEntry<E>>>,
    edge_index: HashMap<EdgeKey, usize>,

    parent: HashMap<String, String>,
    children: HashMap<String, Vec<String>>,
}

impl<N, E, G> Clone for Graph<N, E, G>
where
    N: Default + Clone + 'static,
    E: Default + Clone + 'static,
    G: Default + Clone,
{
    fn clone(&self) -> Self {
        Self {
            options: self.options,
            graph_label: self.graph_label.clone(),
            default_node_label: Arc::clone(&self.default_node_label),
            default_edge_label: Arc::clone(&self.default_edge_label),
            nodes: self.nodes.clone(),
            node_index: self.node_index.clone(),
            edges: self.edges.clone(),
            edge_index: self.edge_index.clone(),
            parent: self.parent.clone(),
            children: self.children.clone(),
        }
    }
}

impl<N, E, G> Graph<N, E, G>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    pub fn new(options: GraphOptions) -> Self {
        Self {
            options,
            graph_label: G::default(),
            default_node_label: Arc::new(N::default),
            default_edge_label: Arc::new(E::default),
            nodes: Vec::new(),
            node_index: HashMap::default(),
            edges: Vec::new(),
            edge_index: HashMap::default(),
            parent: HashMap::default(),
            children: HashMap::default(),
        }
    }

    /// Creates an empty graph with the same options as `self`.
    pub fn with_options<N2, E2, G2>(&self) -> Graph<N2, E2, G2>
    where
        N2: Default + 'static,
        E2: Default + 'static,
        G2: Default,
    {
        Graph::new(self.options)
    }

    pub fn options(&self) -> GraphOptions {
        self.options
    }

    pub fn is_multigraph(&self) -> bool {
        self.options.multigraph
    }

    pub fn is_compound(&self) -> bool {
        self.options.compound
    }

    pub fn is_directed(&self) -> bool {
        self.options.directed
    }

    pub fn set_graph(&mut self, label: G) -> &mut Self {
        self.graph_label = label;
        self
    }

    pub fn graph(&self) -> &G {
        &self.graph_label
    }

    pub fn graph_mut(&mut self) -> &mut G {
        &mut self.graph_label
    }

    pub fn set_default_node_label<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn() -> N + Send + Sync + 'static,
    {
        self.default_node_label = Arc::new(f);
        self
    }

    pub fn set_default_edge_label<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn() -> E + Send + Sync + 'static,
    {
        self.default_edge_label = Arc::new(f);
        self
    }

    // ---- nodes ----

    fn node_entry(&self, id: &str) -> Option<&NodeEntry<N>> {
        let &ix = self.node_index.get(id)?;
        self.nodes[ix].as_ref()
    }

    fn live_nodes(&self) -> impl Iterator<Item = &NodeEntry<N>> {
        self.nodes.iter().flatten()
    }

    fn live_edges(&self) -> impl Iterator<Item = &EdgeEntry<E>> {
        self.edges.iter().flatten()
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    pub fn set_node(&mut self, id: impl Into<String>, label: N) -> &mut Self {
        let id = id.into();
        if let Some(&ix) = self.node_index.get(&id) {
            if let Some(entry) = self.nodes[ix].as_mut() {
                entry.label = label;
            }
            return self;
        }
        let ix = self.nodes.len();
        self.nodes.push(Some(NodeEntry::new(id.clone(), label)));
        self.node_index.insert(id, ix);
        self
    }

    pub fn ensure_node(&mut self, id: impl Into<String>) -> &mut Self {
        let id = id.into();
        if self.node_index.contains_key(&id) {
            return self;
        }
        let label = (self.default_node_label)();
        self.set_node(id, label)
    }

    pub fn node(&self, id: &str) -> Option<&N> {
        self.node_entry(id).map(|n| &n.label)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut N> {
        let &ix = self.node_index.get(id)?;
        self.nodes[ix].as_mut().map(|n| &mut n.label)
    }

    pub fn node_count(&self) -> usize {
        self.node_index.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.live_nodes().map(|n| n.id.as_str())
    }

    pub fn node_ids(&self) -> Vec<String> {
        self.nodes().map(str::to_string).collect()
    }

    pub fn for_each_node<F>(&self, mut f: F)
    where
        F: FnMut(&str, &N),
    {
        for n in self.live_nodes() {
            f(&n.id, &n.label);
        }
    }

    pub fn for_each_node_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&str, &mut N),
    {
        for n in self.nodes.iter_mut().flatten() {
            f(&n.id, &mut n.label);
        }
    }

    /// Removes `id` with its incident edges. Its children move to the top level.
    pub fn remove_node(&mut self, id: &str) -> bool {
        let Some(ix) = self.node_index.remove(id) else {
            return false;
        };
        let Some(entry) = self.nodes[ix].take() else {
            return false;
        };

        let mut incident: Vec<usize> = entry.out;
        incident.extend(entry.in_);
        incident.sort_unstable();
        incident.dedup();
        for edge_ix in incident {
            self.unlink_edge(edge_ix);
        }

        if let Some(parent) = self.parent.remove(id) {
            if let Some(siblings) = self.children.get_mut(&parent) {
                siblings.retain(|c| c != id);
            }
        }
        if let Some(children) = self.children.remove(id) {
            for child in children {
                self.parent.remove(&child);
            }
        }

        self.maybe_compact();
        true
    }

    // ---- edges ----

    fn edge_key_view<'a>(&self, v: &'a str, w: &'a str, name: Option<&'a str>) -> EdgeKeyView<'a> {
        let (v, w) = if self.options.directed || v <= w {
            (v, w)
        } else {
            (w, v)
        };
        let name = if self.options.multigraph { name } else { None };
        EdgeKeyView { v, w, name }
    }

    fn edge_slot(&self, v: &str, w: &str, name: Option<&str>) -> Option<usize> {
        let view = self.edge_key_view(v, w, name);
        self.edge_index.get(&view).copied()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_index.len()
    }

    pub fn edges(&self) -> impl Iterator<Item = &EdgeKey> {
        self.live_edges().map(|e| &e.key)
    }

    pub fn edge_keys(&self) -> Vec<EdgeKey> {
        self.edges().cloned().collect()
    }

    pub fn for_each_edge<F>(&self, mut f: F)
    where
        F: FnMut(&EdgeKey, &E),
    {
        for e in self.live_edges() {
            f(&e.key, &e.label);
        }
    }

    pub fn for_each_edge_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&EdgeKey, &mut E),
    {
        for e in self.edges.iter_mut().flatten() {
            f(&e.key, &mut e.label);
        }
    }

    pub fn set_edge(&mut self, v: impl Into<String>, w: impl Into<String>) -> &mut Self {
        self.set_edge_named(v, w, None::<String>, None)
    }

    pub fn set_edge_with_label(
        &mut self,
        v: impl Into<String>,
        w: impl Into<String>,
        label: E,
    ) -> &mut Self {
        self.set_edge_named(v, w, None::<String>, Some(label))
    }

    /// Inserts or updates an edge. Missing endpoints are created with the default node label.
    ///
    /// # Panics
    ///
    /// Panics when `name` is given on a graph that is not a multigraph.
    pub fn set_edge_named(
        &mut self,
        v: impl Into<String>,
        w: impl Into<String>,
        name: Option<impl Into<String>>,
        label: Option<E>,
    ) -> &mut Self {
        let name: Option<String> = name.map(Into::into);
        assert!(
            self.options.multigraph || name.is_none(),
            "cannot set a named edge when multigraph = false"
        );

        let (v, w) = {
            let (v, w) = (v.into(), w.into());
            if self.options.directed || v <= w {
                (v, w)
            } else {
                (w, v)
            }
        };

        if let Some(ix) = self.edge_slot(&v, &w, name.as_deref()) {
            if let (Some(label), Some(entry)) = (label, self.edges[ix].as_mut()) {
                entry.label = label;
            }
            return self;
        }

        self.ensure_node(v.as_str());
        self.ensure_node(w.as_str());
        let v_ix = self.node_index[v.as_str()];
        let w_ix = self.node_index[w.as_str()];

        let key = EdgeKey { v, w, name };
        let edge_ix = self.edges.len();
        self.edges.push(Some(EdgeEntry {
            key: key.clone(),
            v_ix,
            w_ix,
            label: label.unwrap_or_else(|| (self.default_edge_label)()),
        }));
        self.edge_index.insert(key, edge_ix);

        if let Some(n) = self.nodes[v_ix].as_mut() {
            n.out.push(edge_ix);
        }
        if let Some(n) = self.nodes[w_ix].as_mut() {
            n.in_.push(edge_ix);
        }
        self
    }

    pub fn set_edge_key(&mut self, key: EdgeKey, label: E) -> &mut Self {
        self.set_edge_named(key.v, key.w, key.name, Some(label))
    }

    pub fn set_path(&mut self, nodes: &[&str]) -> &mut Self {
        for pair in nodes.windows(2) {
            self.set_edge(pair[0], pair[1]);
        }
        self
    }

    pub fn has_edge(&self, v: &str, w: &str, name: Option<&str>) -> bool {
        self.edge_slot(v, w, name).is_some()
    }

    pub fn edge(&self, v: &str, w: &str, name: Option<&str>) -> Option<&E> {
        let ix = self.edge_slot(v, w, name)?;
        self.edges[ix].as_ref().map(|e| &e.label)
    }

    pub fn edge_mut(&mut self, v: &str, w: &str, name: Option<&str>) -> Option<&mut E> {
        let ix = self.edge_slot(v, w, name)?;
        self.edges[ix].as_mut().map(|e| &mut e.label)
    }

    pub fn edge_by_key(&self, key: &EdgeKey) -> Option<&E> {
        self.edge(&key.v, &key.w, key.name.as_deref())
    }

    pub fn edge_mut_by_key(&mut self, key: &EdgeKey) -> Option<&mut E> {
        self.edge_mut(&key.v, &key.w, key.name.as_deref())
    }

    fn unlink_edge(&mut self, edge_ix: usize) -> Option<E> {
        let entry = self.edges[edge_ix].take()?;
        self.edge_index.remove(&entry.key);
        if let Some(n) = self.nodes[entry.v_ix].as_mut() {
            n.out.retain(|&e| e != edge_ix);
        }
        if let Some(n) = self.nodes[entry.w_ix].as_mut() {
            n.in_.retain(|&e| e != edge_ix);
        }
        Some(entry.label)
    }

    /// Removes an edge and hands back its label.
    pub fn take_edge(&mut self, v: &str, w: &str, name: Option<&str>) -> Option<E> {
        let ix = self.edge_slot(v, w, name)?;
        let label = self.unlink_edge(ix);
        self.maybe_compact();
        label
    }

    pub fn remove_edge(&mut self, v: &str, w: &str, name: Option<&str>) -> bool {
        self.take_edge(v, w, name).is_some()
    }

    pub fn remove_edge_key(&mut self, key: &EdgeKey) -> bool {
        self.remove_edge(&key.v, &key.w, key.name.as_deref())
    }

    // ---- adjacency ----

    fn out_slots(&self, v: &str) -> &[usize] {
        self.node_entry(v).map(|n| n.out.as_slice()).unwrap_or(&[])
    }

    fn in_slots(&self, v: &str) -> &[usize] {
        self.node_entry(v).map(|n| n.in_.as_slice()).unwrap_or(&[])
    }

    fn edge_at(&self, ix: usize) -> &EdgeEntry<E> {
        self.edges[ix]
            .as_ref()
            .expect("adjacency lists only reference live edges")
    }

    /// Incident edge slots; for self-loops the slot is reported once.
    fn incident_slots(&self, v: &str) -> Vec<usize> {
        let mut slots: Vec<usize> = self.out_slots(v).to_vec();
        for &ix in self.in_slots(v) {
            if !self.edge_at(ix).key.is_self_loop() {
                slots.push(ix);
            }
        }
        slots
    }

    pub fn successors(&self, v: &str) -> Vec<&str> {
        if !self.options.directed {
            return self.neighbors(v);
        }
        let mut out: Vec<&str> = Vec::new();
        for &ix in self.out_slots(v) {
            let w = self.edge_at(ix).key.w.as_str();
            if !out.contains(&w) {
                out.push(w);
            }
        }
        out
    }

    pub fn predecessors(&self, v: &str) -> Vec<&str> {
        if !self.options.directed {
            return self.neighbors(v);
        }
        let mut out: Vec<&str> = Vec::new();
        for &ix in self.in_slots(v) {
            let u = self.edge_at(ix).key.v.as_str();
            if !out.contains(&u) {
                out.push(u);
            }
        }
        out
    }

    pub fn neighbors(&self, v: &str) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for &ix in self.out_slots(v) {
            let w = self.edge_at(ix).key.w.as_str();
            if !out.contains(&w) {
                out.push(w);
            }
        }
        for &ix in self.in_slots(v) {
            let u = self.edge_at(ix).key.v.as_str();
            if !out.contains(&u) {
                out.push(u);
            }
        }
        out
    }

    pub fn first_successor(&self, v: &str) -> Option<&str> {
        if !self.options.directed {
            return self.neighbors(v).into_iter().next();
        }
        let &ix = self.out_slots(v).first()?;
        Some(self.edge_at(ix).key.w.as_str())
    }

    pub fn first_predecessor(&self, v: &str) -> Option<&str> {
        if !self.options.directed {
            return self.neighbors(v).into_iter().next();
        }
        let &ix = self.in_slots(v).first()?;
        Some(self.edge_at(ix).key.v.as_str())
    }

    /// Edges leaving `v`, optionally only those ending at `w`. In an undirected graph every
    /// incident edge counts.
    pub fn out_edges(&self, v: &str, w: Option<&str>) -> Vec<EdgeKey> {
        if !self.options.directed {
            return self.node_edges(v, w);
        }
        self.out_slots(v)
            .iter()
            .map(|&ix| &self.edge_at(ix).key)
            .filter(|k| w.is_none_or(|w| k.w == w))
            .cloned()
            .collect()
    }

    /// Edges entering `v`, optionally only those starting at `u`.
    pub fn in_edges(&self, v: &str, u: Option<&str>) -> Vec<EdgeKey> {
        if !self.options.directed {
            return self.node_edges(v, u);
        }
        self.in_slots(v)
            .iter()
            .map(|&ix| &self.edge_at(ix).key)
            .filter(|k| u.is_none_or(|u| k.v == u))
            .cloned()
            .collect()
    }

    /// All edges incident on `v`, optionally only those whose other endpoint is `w`.
    pub fn node_edges(&self, v: &str, w: Option<&str>) -> Vec<EdgeKey> {
        self.incident_slots(v)
            .into_iter()
            .map(|ix| &self.edge_at(ix).key)
            .filter(|k| w.is_none_or(|w| k.other(v) == w))
            .cloned()
            .collect()
    }

    pub fn for_each_out_edge<F>(&self, v: &str, mut f: F)
    where
        F: FnMut(&EdgeKey, &E),
    {
        let slots: Vec<usize> = if self.options.directed {
            self.out_slots(v).to_vec()
        } else {
            self.incident_slots(v)
        };
        for ix in slots {
            let e = self.edge_at(ix);
            f(&e.key, &e.label);
        }
    }

    pub fn for_each_in_edge<F>(&self, v: &str, mut f: F)
    where
        F: FnMut(&EdgeKey, &E),
    {
        let slots: Vec<usize> = if self.options.directed {
            self.in_slots(v).to_vec()
        } else {
            self.incident_slots(v)
        };
        for ix in slots {
            let e = self.edge_at(ix);
            f(&e.key, &e.label);
        }
    }

    pub fn sources(&self) -> Vec<&str> {
        if !self.options.directed {
            return self.nodes().collect();
        }
        self.live_nodes()
            .filter(|n| n.in_.is_empty())
            .map(|n| n.id.as_str())
            .collect()
    }

    pub fn sinks(&self) -> Vec<&str> {
        if !self.options.directed {
            return self.nodes().collect();
        }
        self.live_nodes()
            .filter(|n| n.out.is_empty())
            .map(|n| n.id.as_str())
            .collect()
    }

    // ---- compound ----

    /// Nests `child` under `parent`, creating either node if needed.
    ///
    /// # Panics
    ///
    /// Panics on a non-compound graph, or when `parent` is `child` or one of its descendants.
    pub fn set_parent(&mut self, child: impl Into<String>, parent: impl Into<String>) -> &mut Self {
        assert!(
            self.options.compound,
            "cannot set parent in a non-compound graph"
        );
        let child = child.into();
        let parent = parent.into();

        let mut ancestor: Option<&str> = Some(parent.as_str());
        while let Some(a) = ancestor {
            assert!(
                a != child,
                "setting {parent} as parent of {child} would create a cycle"
            );
            ancestor = self.parent(a);
        }

        self.ensure_node(child.as_str());
        self.ensure_node(parent.as_str());
        if let Some(prev) = self.parent.insert(child.clone(), parent.clone()) {
            if let Some(siblings) = self.children.get_mut(&prev) {
                siblings.retain(|c| c != &child);
            }
        }
        let entry = self.children.entry(parent).or_default();
        if !entry.contains(&child) {
            entry.push(child);
        }
        self
    }

    /// Moves `child` to the top level.
    pub fn clear_parent(&mut self, child: &str) -> &mut Self {
        if let Some(prev) = self.parent.remove(child) {
            if let Some(siblings) = self.children.get_mut(&prev) {
                siblings.retain(|c| c != child);
            }
        }
        self
    }

    pub fn parent(&self, child: &str) -> Option<&str> {
        self.parent.get(child).map(String::as_str)
    }

    pub fn children(&self, parent: &str) -> Vec<&str> {
        self.children
            .get(parent)
            .map(|cs| cs.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn has_children(&self, v: &str) -> bool {
        self.children.get(v).is_some_and(|cs| !cs.is_empty())
    }

    /// Top-level nodes (every node when the graph is not compound).
    pub fn children_root(&self) -> Vec<&str> {
        self.live_nodes()
            .filter(|n| !self.parent.contains_key(&n.id))
            .map(|n| n.id.as_str())
            .collect()
    }

    // ---- housekeeping ----

    fn maybe_compact(&mut self) {
        let dead_nodes = self.nodes.len() - self.node_index.len();
        let dead_edges = self.edges.len() - self.edge_index.len();
        let slots = self.nodes.len() + self.edges.len();
        if slots < COMPACT_MIN_SLOTS || (dead_nodes + dead_edges) * 2 < slots {
            return;
        }
        self.compact();
    }

    /// Drops tombstones and rebuilds indices. Relative order of nodes, edges, and adjacency lists
    /// is preserved.
    fn compact(&mut self) {
        let nodes = std::mem::take(&mut self.nodes);
        self.node_index.clear();
        for mut n in nodes.into_iter().flatten() {
            n.out.clear();
            n.in_.clear();
            self.node_index.insert(n.id.clone(), self.nodes.len());
            self.nodes.push(Some(n));
        }

        let edges = std::mem::take(&mut self.edges);
        self.edge_index.clear();
        for mut e in edges.into_iter().flatten() {
            let edge_ix = self.edges.len();
            e.v_ix = self.node_index[e.key.v.as_str()];
            e.w_ix = self.node_index[e.key.w.as_str()];
            if let Some(n) = self.nodes[e.v_ix].as_mut() {
                n.out.push(edge_ix);
            }
            if let Some(n) = self.nodes[e.w_ix].as_mut() {
                n.in_.push(edge_ix);
            }
            self.edge_index.insert(e.key.clone(), edge_ix);
            self.edges.push(Some(e));
        }
    }
}
