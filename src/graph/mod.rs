//! Graph module for directed graphs with acyclicity checks.
//!
//! This module provides the [`Graph`] container, its [`Node`] vertices, cycle
//! search, and topological ordering.
//!
//! # Example
//!
//! ```rust
//! use dagraph::graph::{Graph, Node};
//!
//! let mut graph = Graph::new();
//! graph.add_nodes([Node::new("parse", 1), Node::new("check", 2)]).unwrap();
//! graph.add_edge("parse", "check").unwrap();
//!
//! assert_eq!(graph.len(), 2);
//! assert_eq!(graph.edge_count(), 1);
//! assert!(graph.validate().is_ok());
//! ```

mod cycle;
mod digraph;
mod error;
mod node;
mod order;
mod topo;

#[cfg(test)]
mod proptests;

pub use cycle::Cycle;
pub use digraph::Graph;
pub use error::{GraphError, GraphResult};
pub use node::{Node, NodeId};
pub use order::IterationOrder;
