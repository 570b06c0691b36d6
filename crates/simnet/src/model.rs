//! Node, edge, and graph payloads carried through the layout pipeline.

use crate::error::Result;
use serde::Deserialize;
use simnet_graph::EdgeKey;

/// Role of a node created by the layout itself. Caller nodes carry no `Dummy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dummy {
    /// One segment of a normalized long edge; `chain` indexes `LayoutContext::chains`.
    Edge { chain: usize },
    /// The chain node standing in for the edge's label.
    EdgeLabel { chain: usize },
    Border(BorderKind),
    /// The nesting root.
    Root,
}

impl Dummy {
    pub fn chain(self) -> Option<usize> {
        match self {
            Dummy::Edge { chain } | Dummy::EdgeLabel { chain } => Some(chain),
            Dummy::Border(_) | Dummy::Root => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderKind {
    Top,
    Bottom,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelPos {
    L,
    #[default]
    C,
    R,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeLabel {
    pub width: f64,
    pub height: f64,
    pub x: f64,
    pub y: f64,
    pub rank: Option<i32>,
    pub order: Option<usize>,
    pub dummy: Option<Dummy>,
    pub labelpos: Option<LabelPos>,
    /// Rank span of a subgraph, set once its top/bottom borders are ranked.
    pub min_rank: Option<i32>,
    pub max_rank: Option<i32>,
    pub border_top: Option<String>,
    pub border_bottom: Option<String>,
    /// Per-rank left/right border nodes of a subgraph, indexed by rank.
    pub border_left: Vec<Option<String>>,
    pub border_right: Vec<Option<String>>,
}

impl NodeLabel {
    pub fn sized(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn is_dummy(&self) -> bool {
        self.dummy.is_some()
    }

    pub fn border_left_at(&self, rank: i32) -> Option<&str> {
        usize::try_from(rank)
            .ok()
            .and_then(|r| self.border_left.get(r))
            .and_then(|b| b.as_deref())
    }

    pub fn border_right_at(&self, rank: i32) -> Option<&str> {
        usize::try_from(rank)
            .ok()
            .and_then(|r| self.border_right.get(r))
            .and_then(|b| b.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeLabel {
    pub width: f64,
    pub height: f64,
    pub labelpos: LabelPos,
    /// Rank of the chain node that carries the label, once the edge is normalized.
    pub label_rank: Option<i32>,
    pub minlen: usize,
    pub weight: f64,
    pub nesting_edge: bool,
    pub reversed: bool,
    pub forward_name: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub points: Vec<Point>,
}

impl Default for EdgeLabel {
    fn default() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            labelpos: LabelPos::C,
            label_rank: None,
            minlen: 1,
            weight: 1.0,
            nesting_edge: false,
            reversed: false,
            forward_name: None,
            x: None,
            y: None,
            points: Vec::new(),
        }
    }
}

impl EdgeLabel {
    pub fn weighted(weight: f64) -> Self {
        Self {
            weight,
            ..Default::default()
        }
    }

    pub fn has_label(&self) -> bool {
        self.width > 0.0 || self.height > 0.0
    }
}

/// Feedback arc set heuristic used to break cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Acycler {
    Greedy,
    #[default]
    Walk,
}

/// Graph-level configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    pub acycler: Acycler,
    pub nodesep: f64,
    pub ranksep: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            acycler: Acycler::Walk,
            nodesep: 50.0,
            ranksep: 50.0,
        }
    }
}

impl LayoutConfig {
    /// Parses a JSON object such as `{"acycler": "greedy", "ranksep": 20}`. Missing keys keep
    /// their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// A normalized long edge: its first chain node plus the edge it replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct FakeChain {
    pub head: String,
    pub link: EdgeKey,
    pub label: EdgeLabel,
}

/// Scratch state shared by the pipeline stages of one layout run.
#[derive(Debug, Clone, Default)]
pub struct LayoutContext {
    pub chains: Vec<FakeChain>,
    pub nest_root: Option<String>,
    pub rank_factor: Option<usize>,
    /// Self-loops detached while cycles are broken, restored on undo.
    pub self_loops: Vec<(EdgeKey, EdgeLabel)>,
}
