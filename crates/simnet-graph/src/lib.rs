#![forbid(unsafe_code)]

//! Graph container used by `simnet`.
//!
//! A string-keyed multigraph with optional compound (parent/child) structure. Nodes and edges live
//! in slot arenas so removals never shift the indices held by adjacency lists; iteration follows
//! insertion order.

mod graph;

pub use graph::{EdgeKey, Graph, GraphOptions, alg};
