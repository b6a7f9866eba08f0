//! Error types for graph construction and traversal.

use super::node::NodeId;

/// Errors that can occur while building or querying a [`Graph`](super::Graph).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// A node without an identity was supplied where a registered node is required.
    #[error("node is nil")]
    NilNode,

    /// A node with the same id is already registered.
    #[error("node id '{0}' already exists in the graph")]
    DuplicateId(NodeId),

    /// A node name is already mapped to another node.
    #[error("node name '{0}' is already taken")]
    DuplicateName(String),

    /// The id is not registered in the graph.
    #[error("node '{0}' not added to the graph")]
    NotFound(NodeId),

    /// No node carries this human-readable name.
    #[error("no node named '{0}' in the graph")]
    NameNotFound(String),

    /// An edge endpoint has no identity.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// A node cannot point at itself.
    #[error("cannot connect node '{0}' to itself")]
    SelfLoop(NodeId),

    /// The edge is already present.
    #[error("from '{from}' already contains '{to}'")]
    DuplicateEdge {
        /// Source node id
        from: NodeId,
        /// Target node id
        to: NodeId,
    },

    /// The edge to remove does not exist.
    #[error("edge from '{from}' to '{to}' does not exist")]
    EdgeNotFound {
        /// Source node id
        from: NodeId,
        /// Target node id
        to: NodeId,
    },

    /// The graph contains a cycle, so no topological order exists.
    #[error("graph has a cycle, no topological sort possible ({sorted} of {total} nodes ordered)")]
    CycleDetected {
        /// Nodes that could be ordered before the sort stalled
        sorted: usize,
        /// Nodes registered in the graph
        total: usize,
    },
}

/// Result type alias for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;
