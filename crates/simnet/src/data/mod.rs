//! Data structures used by the graph algorithms.

mod priority_queue;

pub use priority_queue::PriorityQueue;
