//! Cycle search.
//!
//! Depth-first search tracking which nodes were ever visited and which are on
//! the current path. Reaching a node that is still on the path closes a cycle,
//! which is rebuilt from the parent links. The search runs on an explicit
//! stack of frames so deep graphs cannot overflow the call stack.

use std::collections::{HashMap, HashSet};
use std::fmt;

use tracing::{debug, trace};

use super::digraph::Graph;
use super::node::{Node, NodeId};

/// A closed walk through the graph.
///
/// The first and last ids are the same node, so a cycle over `k` distinct
/// nodes holds `k + 1` ids.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cycle {
    /// Node ids along the walk
    pub nodes: Vec<NodeId>,
}

impl Cycle {
    /// Renders the walk, e.g. `"a -> b -> c -> a"`.
    pub fn path(&self) -> String {
        self.nodes
            .iter()
            .map(NodeId::as_str)
            .collect::<Vec<_>>()
            .join(" -> ")
    }

    /// Number of ids in the walk, counting the repeated endpoint.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if no cycle was found.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// One level of the DFS: a node and the index of the next edge to follow.
struct Frame<'a> {
    id: &'a NodeId,
    next: usize,
}

impl<V> Graph<V> {
    /// Returns true if the graph contains at least one cycle.
    pub fn has_cycle(&self) -> bool {
        !self.find_cycle().is_empty()
    }

    /// Finds one cycle and returns its nodes as a closed walk.
    ///
    /// The result starts and ends with the same node. An acyclic graph yields
    /// an empty vector. The search stops at the first cycle it meets, so which
    /// cycle is reported depends on the graph's [`IterationOrder`](super::IterationOrder)
    /// and on edge order.
    ///
    /// # Example
    ///
    /// ```rust
    /// use dagraph::graph::{Graph, Node};
    ///
    /// let mut graph = Graph::from_nodes([Node::new("n1", ()), Node::new("n2", ())]).unwrap();
    /// graph.add_edge("n1", "n2").unwrap();
    /// graph.add_edge("n2", "n1").unwrap();
    ///
    /// let walk: Vec<&str> = graph.find_cycle().iter().map(|n| n.id().as_str()).collect();
    /// assert_eq!(walk, vec!["n1", "n2", "n1"]);
    /// ```
    pub fn find_cycle(&self) -> Vec<&Node<V>> {
        self.cycle_ids()
            .into_iter()
            .filter_map(|id| self.nodes.get(id))
            .collect()
    }

    /// Finds one cycle and returns it as a [`Cycle`] of ids.
    pub fn cycle(&self) -> Option<Cycle> {
        let nodes: Vec<NodeId> = self.cycle_ids().into_iter().cloned().collect();
        if nodes.is_empty() {
            None
        } else {
            Some(Cycle { nodes })
        }
    }

    fn cycle_ids(&self) -> Vec<&NodeId> {
        let mut visited: HashSet<&NodeId> = HashSet::with_capacity(self.len());
        let mut on_stack: HashSet<&NodeId> = HashSet::new();
        let mut parent: HashMap<&NodeId, &NodeId> = HashMap::new();
        let mut stack: Vec<Frame<'_>> = Vec::new();

        for start in self.ordered_ids() {
            if !visited.insert(start) {
                continue;
            }
            on_stack.insert(start);
            stack.push(Frame { id: start, next: 0 });

            while let Some(frame) = stack.last_mut() {
                let id = frame.id;
                let neighbor = self
                    .nodes
                    .get(id)
                    .and_then(|node| node.edge_to().get(frame.next));

                let Some(neighbor) = neighbor else {
                    on_stack.remove(id);
                    stack.pop();
                    continue;
                };
                frame.next += 1;

                if visited.insert(neighbor) {
                    trace!(from = %id, to = %neighbor, "descending");
                    parent.insert(neighbor, id);
                    on_stack.insert(neighbor);
                    stack.push(Frame {
                        id: neighbor,
                        next: 0,
                    });
                } else if on_stack.contains(neighbor) {
                    let walk = close_walk(id, neighbor, &parent);
                    debug!(length = walk.len() - 1, "cycle found");
                    return walk;
                }
            }
        }

        Vec::new()
    }
}

/// Rebuilds the walk `repeated -> ... -> current -> repeated` from parent links.
fn close_walk<'a>(
    current: &'a NodeId,
    repeated: &'a NodeId,
    parent: &HashMap<&'a NodeId, &'a NodeId>,
) -> Vec<&'a NodeId> {
    let mut walk = Vec::new();
    let mut cursor = current;
    while cursor != repeated {
        walk.push(cursor);
        match parent.get(cursor) {
            Some(&up) => cursor = up,
            None => break,
        }
    }
    walk.push(repeated);
    walk.reverse();
    walk.push(repeated);
    walk
}
