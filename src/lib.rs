//! dagraph - directed graphs with cycle detection and topological ordering
//!
//! This crate provides an in-process graph container: nodes with ordered
//! adjacency lists, edge mutation by id, cycle search, and Kahn's
//! topological sort.

pub mod graph;

pub use graph::{Cycle, Graph, GraphError, GraphResult, IterationOrder, Node, NodeId};
