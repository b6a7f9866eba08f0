//! Graph vertices and their outgoing adjacency lists.
//!
//! A [`Node`] owns the ordered list of ids it points to. Edge membership is
//! always decided by [`NodeId`], never by where a node lives in memory.

use std::borrow::Borrow;
use std::fmt;

use uuid::Uuid;

use super::error::{GraphError, GraphResult};

/// Unique, immutable identifier of a node.
///
/// Hashes like `str`, so maps keyed by `NodeId` can be queried with a plain `&str`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct NodeId(String);

impl NodeId {
    /// Creates an id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh random id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the id is empty or whitespace, i.e. the node has no identity.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A named vertex holding an opaque payload and its outgoing edges.
///
/// # Example
///
/// ```rust
/// use dagraph::graph::Node;
///
/// let mut a = Node::new("a", 1);
/// let b = Node::new("b", 2);
///
/// a.connect(&b).unwrap();
/// assert!(a.connect(&b).is_err()); // duplicate edge
/// assert_eq!(a.edges().map(|id| id.as_str()).collect::<Vec<_>>(), vec!["b"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Node<V> {
    id: NodeId,
    name: Option<String>,
    /// Opaque payload, never interpreted by the graph
    pub value: V,
    edge_to: Vec<NodeId>,
}

impl<V> Node<V> {
    /// Creates an unattached node with no edges.
    pub fn new(id: impl Into<NodeId>, value: V) -> Self {
        Self {
            id: id.into(),
            name: None,
            value,
            edge_to: Vec::new(),
        }
    }

    /// Creates a node addressed by a human-readable name.
    ///
    /// The id is generated and unique; the graph resolves the name through
    /// its name index.
    pub fn named(name: impl Into<String>, value: V) -> Self {
        Self {
            id: NodeId::generate(),
            name: Some(name.into()),
            value,
            edge_to: Vec::new(),
        }
    }

    /// Attaches a human-readable name to a node with an explicit id.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns the node id.
    pub fn id(&self) -> &NodeId {
        &self.id
    }

    /// Returns the human-readable name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Adds an edge from this node to `target`.
    ///
    /// # Errors
    ///
    /// - [`GraphError::InvalidArgument`] if `target` has a blank id
    /// - [`GraphError::SelfLoop`] if `target` is this node
    /// - [`GraphError::DuplicateEdge`] if the edge already exists
    pub fn connect(&mut self, target: &Node<V>) -> GraphResult<()> {
        self.connect_id(&target.id)
    }

    /// Removes the edge from this node to `target`, keeping the order of the
    /// remaining edges.
    ///
    /// # Errors
    ///
    /// - [`GraphError::InvalidArgument`] if `target` has a blank id
    /// - [`GraphError::EdgeNotFound`] if there is no such edge
    pub fn disconnect(&mut self, target: &Node<V>) -> GraphResult<()> {
        self.disconnect_id(&target.id)
    }

    pub(crate) fn connect_id(&mut self, target: &NodeId) -> GraphResult<()> {
        if target.is_blank() {
            return Err(GraphError::InvalidArgument("cannot connect to a nil node"));
        }
        if self.id == *target {
            return Err(GraphError::SelfLoop(self.id.clone()));
        }
        if self.points_to(target.as_str()) {
            return Err(GraphError::DuplicateEdge {
                from: self.id.clone(),
                to: target.clone(),
            });
        }
        self.edge_to.push(target.clone());
        Ok(())
    }

    pub(crate) fn disconnect_id(&mut self, target: &NodeId) -> GraphResult<()> {
        if target.is_blank() {
            return Err(GraphError::InvalidArgument("cannot disconnect from a nil node"));
        }
        let Some(index) = self.edge_to.iter().position(|id| id == target) else {
            return Err(GraphError::EdgeNotFound {
                from: self.id.clone(),
                to: target.clone(),
            });
        };
        self.edge_to.remove(index);
        Ok(())
    }

    /// Drops the edge to `target` if present. Returns whether one was removed.
    pub(crate) fn sever(&mut self, target: &str) -> bool {
        let before = self.edge_to.len();
        self.edge_to.retain(|id| id.as_str() != target);
        self.edge_to.len() != before
    }

    /// Drops every outgoing edge. Returns how many were removed.
    pub(crate) fn clear_edges(&mut self) -> usize {
        let dropped = self.edge_to.len();
        self.edge_to.clear();
        dropped
    }

    /// Returns true if this node has an edge to `target`.
    pub fn points_to(&self, target: &str) -> bool {
        self.edge_to.iter().any(|id| id.as_str() == target)
    }

    /// Iterates over outgoing edge targets in insertion order.
    pub fn edges(&self) -> impl ExactSizeIterator<Item = &NodeId> + '_ {
        self.edge_to.iter()
    }

    /// Returns the outgoing edge targets as a slice.
    pub fn edge_to(&self) -> &[NodeId] {
        &self.edge_to
    }

    /// Returns the number of outgoing edges.
    pub fn out_degree(&self) -> usize {
        self.edge_to.len()
    }
}
