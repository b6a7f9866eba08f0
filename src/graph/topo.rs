//! Topological ordering with Kahn's algorithm.

use std::collections::VecDeque;

use indexmap::IndexMap;
use tracing::debug;

use super::digraph::Graph;
use super::error::{GraphError, GraphResult};
use super::node::{Node, NodeId};

impl<V> Graph<V> {
    /// Returns the number of edges pointing at `id`.
    ///
    /// # Errors
    ///
    /// Fails with [`GraphError::NotFound`] if the id is not registered.
    pub fn in_degree(&self, id: &str) -> GraphResult<usize> {
        self.get_node(id)?;
        Ok(self.nodes.values().filter(|node| node.points_to(id)).count())
    }

    /// Returns the in-degree of every node, in traversal order.
    pub fn in_degrees(&self) -> IndexMap<NodeId, usize> {
        self.in_degree_table()
            .into_iter()
            .map(|(id, degree)| (id.clone(), degree))
            .collect()
    }

    fn in_degree_table(&self) -> IndexMap<&NodeId, usize> {
        let mut table: IndexMap<&NodeId, usize> =
            self.ordered_ids().into_iter().map(|id| (id, 0)).collect();

        for node in self.nodes.values() {
            for target in node.edges() {
                if let Some(degree) = table.get_mut(target) {
                    *degree += 1;
                }
            }
        }
        table
    }

    /// Orders all nodes so that every edge points forward.
    ///
    /// Nodes with no incoming edges are queued in traversal order, and each
    /// dequeued node releases its successors in edge order once their last
    /// incoming edge is consumed.
    ///
    /// # Errors
    ///
    /// Fails with [`GraphError::CycleDetected`] if the graph has a cycle.
    ///
    /// # Example
    ///
    /// ```rust
    /// use dagraph::graph::{Graph, Node};
    ///
    /// let mut graph = Graph::from_nodes(
    ///     ["n1", "n2", "n3", "n4"].map(|id| Node::new(id, ())),
    /// )
    /// .unwrap();
    /// graph.add_edge("n1", "n2").unwrap();
    /// graph.add_edge("n1", "n3").unwrap();
    /// graph.add_edge("n2", "n3").unwrap();
    /// graph.add_edge("n3", "n4").unwrap();
    ///
    /// let order: Vec<&str> = graph
    ///     .topological_sort()
    ///     .unwrap()
    ///     .iter()
    ///     .map(|n| n.id().as_str())
    ///     .collect();
    /// assert_eq!(order, vec!["n1", "n2", "n3", "n4"]);
    /// ```
    pub fn topological_sort(&self) -> GraphResult<Vec<&Node<V>>> {
        let mut in_degree = self.in_degree_table();
        let mut queue: VecDeque<&NodeId> = in_degree
            .iter()
            .filter(|(_, degree)| **degree == 0)
            .map(|(&id, _)| id)
            .collect();

        let mut sorted = Vec::with_capacity(self.len());
        while let Some(id) = queue.pop_front() {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            sorted.push(node);

            for target in node.edges() {
                if let Some(degree) = in_degree.get_mut(target) {
                    *degree -= 1;
                    if *degree == 0 {
                        queue.push_back(target);
                    }
                }
            }
        }

        if sorted.len() < self.len() {
            debug!(sorted = sorted.len(), total = self.len(), "topological sort stalled on a cycle");
            return Err(GraphError::CycleDetected {
                sorted: sorted.len(),
                total: self.len(),
            });
        }
        Ok(sorted)
    }

    /// Returns `Ok(())` if the graph is acyclic.
    ///
    /// # Errors
    ///
    /// Fails with [`GraphError::CycleDetected`] if the graph has a cycle.
    pub fn validate(&self) -> GraphResult<()> {
        self.topological_sort().map(|_| ())
    }
}
