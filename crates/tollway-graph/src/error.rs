use std::fmt;

use crate::graph::NodeId;

/// Structural errors reported by [`Graph`](crate::Graph) operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphError {
    /// The id is outside `[0, len)`.
    NoSuchNode { id: NodeId, len: usize },
    /// An edge already joins the two nodes.
    DuplicateEdge { u: NodeId, v: NodeId },
    /// No edge joins the two nodes.
    EdgeNotFound { u: NodeId, v: NodeId },
    /// Both endpoints are the same node.
    SelfLoop(NodeId),
    /// An adjacency matrix for this many nodes cannot be allocated.
    TooLarge { nodes: usize },
    /// Stored graph data breaks a structural invariant.
    Corrupt { reason: &'static str },
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSuchNode { id, len } => {
                write!(f, "no such node {id} (graph has {len} nodes)")
            }
            Self::DuplicateEdge { u, v } => write!(f, "edge {u}-{v} already exists"),
            Self::EdgeNotFound { u, v } => write!(f, "no edge between {u} and {v}"),
            Self::SelfLoop(id) => write!(f, "cannot join node {id} to itself"),
            Self::TooLarge { nodes } => write!(f, "graph of {nodes} nodes is too large"),
            Self::Corrupt { reason } => write!(f, "corrupt graph: {reason}"),
        }
    }
}

impl std::error::Error for GraphError {}
