//! Graph algorithms: shortest paths, spanning trees, cycles, and the reversible transforms that
//! make a graph acyclic and rank-adjacent.

pub mod acyclic;
pub mod normalize;

mod cycles;
mod greedy_fas;
mod prim;
mod shortest_paths;

pub use acyclic::walk_fas;
pub use cycles::{find_cycles, is_acyclic, tarjan, topsort};
pub use greedy_fas::{greedy_fas, greedy_fas_unweighted};
pub use prim::prim;
pub use shortest_paths::{PathEntry, dijkstra, dijkstra_all, floyd_warshall, out_edges_of};
