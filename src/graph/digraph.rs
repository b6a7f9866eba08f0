//! The graph container.
//!
//! [`Graph`] owns every registered [`Node`] and is the only way to add edges
//! between registered nodes, so edge targets always name a node in the same
//! graph. Cycle search and topological sort live in the sibling `cycle` and
//! `topo` modules as further `impl` blocks on the same type.

use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::{debug, trace};

use super::error::{GraphError, GraphResult};
use super::node::{Node, NodeId};
use super::order::IterationOrder;

/// A directed graph of uniquely identified nodes.
///
/// Nodes are kept in insertion order. Traversals start from nodes in the
/// graph's [`IterationOrder`], which makes their output reproducible.
///
/// # Example
///
/// ```rust
/// use dagraph::graph::{Graph, Node};
///
/// let mut graph = Graph::from_nodes([
///     Node::new("fetch", ()),
///     Node::new("build", ()),
///     Node::new("test", ()),
/// ])
/// .unwrap();
///
/// graph.add_edge("fetch", "build").unwrap();
/// graph.add_edge("build", "test").unwrap();
///
/// assert_eq!(graph.len(), 3);
/// assert_eq!(graph.edge_count(), 2);
/// assert!(!graph.has_cycle());
/// ```
#[derive(Debug, Clone)]
pub struct Graph<V> {
    /// Registered nodes, keyed by id, in insertion order
    pub(crate) nodes: IndexMap<NodeId, Node<V>>,
    /// Human-readable name to id, one entry per named node
    names: HashMap<String, NodeId>,
    order: IterationOrder,
}

impl<V> Default for Graph<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Graph<V> {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::with_order(IterationOrder::default())
    }

    /// Creates an empty graph that traverses nodes in the given order.
    pub fn with_order(order: IterationOrder) -> Self {
        Self {
            nodes: IndexMap::new(),
            names: HashMap::new(),
            order,
        }
    }

    /// Creates a graph pre-seeded with `nodes`.
    ///
    /// # Errors
    ///
    /// Fails with [`GraphError::NilNode`] if a node has a blank id, with
    /// [`GraphError::DuplicateId`] if two nodes share an id, and with
    /// [`GraphError::NotFound`] if a node already points at a node that is
    /// not registered before it.
    pub fn from_nodes(nodes: impl IntoIterator<Item = Node<V>>) -> GraphResult<Self> {
        let mut graph = Self::new();
        graph.add_nodes(nodes)?;
        Ok(graph)
    }

    /// Returns the traversal order.
    pub fn order(&self) -> IterationOrder {
        self.order
    }

    /// Changes the traversal order.
    pub fn set_order(&mut self, order: IterationOrder) {
        self.order = order;
    }

    /// Registers one node.
    ///
    /// # Errors
    ///
    /// - [`GraphError::NilNode`] if the node has a blank id
    /// - [`GraphError::DuplicateId`] if the id is already registered
    /// - [`GraphError::NotFound`] if the node already points at an id that
    ///   is not registered
    /// - [`GraphError::DuplicateName`] if the node's name is already taken
    pub fn add_node(&mut self, node: Node<V>) -> GraphResult<()> {
        if node.id().is_blank() {
            return Err(GraphError::NilNode);
        }
        if self.nodes.contains_key(node.id()) {
            return Err(GraphError::DuplicateId(node.id().clone()));
        }
        if let Some(missing) = node.edges().find(|target| !self.nodes.contains_key(*target)) {
            return Err(GraphError::NotFound(missing.clone()));
        }
        if let Some(name) = node.name() {
            if self.names.contains_key(name) {
                return Err(GraphError::DuplicateName(name.to_string()));
            }
            self.names.insert(name.to_string(), node.id().clone());
        }

        debug!(id = %node.id(), "node added");
        self.nodes.insert(node.id().clone(), node);
        Ok(())
    }

    /// Registers several nodes in order.
    ///
    /// The batch stops at the first failing node. Nodes added before it stay
    /// registered.
    pub fn add_nodes(&mut self, nodes: impl IntoIterator<Item = Node<V>>) -> GraphResult<()> {
        for node in nodes {
            self.add_node(node)?;
        }
        Ok(())
    }

    /// Removes a node and every edge pointing at it.
    ///
    /// Returns the removed node detached: its outgoing edges are cleared too.
    ///
    /// # Errors
    ///
    /// Fails with [`GraphError::NotFound`] if the id is not registered.
    pub fn remove_node(&mut self, id: &str) -> GraphResult<Node<V>> {
        let mut node = self
            .nodes
            .shift_remove(id)
            .ok_or_else(|| GraphError::NotFound(id.into()))?;

        let mut severed = 0;
        for other in self.nodes.values_mut() {
            if other.sever(id) {
                trace!(from = %other.id(), to = id, "inbound edge severed");
                severed += 1;
            }
        }
        if let Some(name) = node.name() {
            self.names.remove(name);
        }
        let dropped = node.clear_edges();

        debug!(id, severed, dropped, "node removed");
        Ok(node)
    }

    /// Returns true if a node with this id is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Looks up a node by id.
    ///
    /// # Errors
    ///
    /// Fails with [`GraphError::NotFound`] if the id is not registered.
    pub fn get_node(&self, id: &str) -> GraphResult<&Node<V>> {
        self.nodes
            .get(id)
            .ok_or_else(|| GraphError::NotFound(id.into()))
    }

    /// Returns a mutable reference to a node's payload.
    ///
    /// Edges are only mutable through [`Graph::add_edge`] and
    /// [`Graph::remove_edge`], so no `&mut Node` is handed out.
    pub fn value_mut(&mut self, id: &str) -> GraphResult<&mut V> {
        self.nodes
            .get_mut(id)
            .map(|node| &mut node.value)
            .ok_or_else(|| GraphError::NotFound(id.into()))
    }

    /// Resolves a human-readable name to its node id.
    pub fn id_for_name(&self, name: &str) -> Option<&NodeId> {
        self.names.get(name)
    }

    /// Looks up a node by its human-readable name.
    ///
    /// # Errors
    ///
    /// Fails with [`GraphError::NameNotFound`] if no node carries this name.
    pub fn get_node_by_name(&self, name: &str) -> GraphResult<&Node<V>> {
        let id = self
            .id_for_name(name)
            .ok_or_else(|| GraphError::NameNotFound(name.to_string()))?;
        self.get_node(id.as_str())
    }

    /// Adds an edge from `from` to `to`.
    ///
    /// # Errors
    ///
    /// - [`GraphError::NotFound`] if either id is not registered
    /// - [`GraphError::SelfLoop`] if `from == to`
    /// - [`GraphError::DuplicateEdge`] if the edge already exists
    ///
    /// # Example
    ///
    /// ```rust
    /// use dagraph::graph::{Graph, GraphError, Node};
    ///
    /// let mut graph = Graph::from_nodes([Node::new("a", 0), Node::new("b", 0)]).unwrap();
    ///
    /// assert!(graph.add_edge("a", "b").is_ok());
    /// assert!(matches!(graph.add_edge("a", "a"), Err(GraphError::SelfLoop(_))));
    /// assert!(matches!(graph.add_edge("a", "zz"), Err(GraphError::NotFound(_))));
    /// ```
    pub fn add_edge(&mut self, from: &str, to: &str) -> GraphResult<()> {
        let to_id = self.resolve_pair(from, to)?;
        if let Some(node) = self.nodes.get_mut(from) {
            node.connect_id(&to_id)?;
        }
        debug!(from, to, "edge added");
        Ok(())
    }

    /// Removes the edge from `from` to `to`.
    ///
    /// # Errors
    ///
    /// - [`GraphError::NotFound`] if either id is not registered
    /// - [`GraphError::EdgeNotFound`] if there is no such edge
    pub fn remove_edge(&mut self, from: &str, to: &str) -> GraphResult<()> {
        let to_id = self.resolve_pair(from, to)?;
        if let Some(node) = self.nodes.get_mut(from) {
            node.disconnect_id(&to_id)?;
        }
        debug!(from, to, "edge removed");
        Ok(())
    }

    /// Checks both endpoints and returns the registered id of `to`.
    fn resolve_pair(&self, from: &str, to: &str) -> GraphResult<NodeId> {
        self.get_node(from)?;
        Ok(self.get_node(to)?.id().clone())
    }

    /// Returns true if the edge `from -> to` exists.
    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        self.nodes
            .get(from)
            .is_some_and(|node| node.points_to(to))
    }

    /// Returns the number of registered nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if no node is registered.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(Node::out_degree).sum()
    }

    /// Returns every node in traversal order.
    pub fn get_all_nodes(&self) -> Vec<&Node<V>> {
        self.ordered_ids()
            .into_iter()
            .filter_map(|id| self.nodes.get(id))
            .collect()
    }

    /// Returns the nodes `id` points to, in edge order.
    pub fn successors(&self, id: &str) -> GraphResult<Vec<&Node<V>>> {
        Ok(self
            .get_node(id)?
            .edges()
            .filter_map(|target| self.nodes.get(target))
            .collect())
    }

    /// Returns the nodes pointing at `id`, in traversal order.
    pub fn predecessors(&self, id: &str) -> GraphResult<Vec<&Node<V>>> {
        self.get_node(id)?;
        Ok(self
            .get_all_nodes()
            .into_iter()
            .filter(|node| node.points_to(id))
            .collect())
    }

    /// Node ids in the configured traversal order.
    pub(crate) fn ordered_ids(&self) -> Vec<&NodeId> {
        let mut ids: Vec<&NodeId> = self.nodes.keys().collect();
        if self.order == IterationOrder::Lexical {
            ids.sort();
        }
        ids
    }
}
