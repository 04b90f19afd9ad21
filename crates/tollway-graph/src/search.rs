//! Budget-constrained depth-first path search.
//!
//! The search looks for *a* simple path, not a cheapest or shortest one.
//! Neighbours are tried in ascending id order and the first branch that
//! reaches the destination wins, so the answer is fully determined by the
//! graph, the endpoints, the tariff and the starting budget.

use std::fmt;

use log::{debug, trace};

use crate::error::GraphError;
use crate::graph::{EdgeKind, Graph, NodeId};
use crate::tariff::{Money, Tariff};

// ---------------------------------------------------------------------------
// Path
// ---------------------------------------------------------------------------

/// A simple path found by [`PathSearch::find_path`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    nodes: Vec<NodeId>,
    balance: Money,
}

impl Path {
    /// The visited nodes, start first and destination last.
    #[inline]
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Number of nodes on the path. Never zero.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn start(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    pub fn destination(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }

    /// Balance on arrival at the destination.
    #[inline]
    pub fn balance(&self) -> Money {
        self.balance
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains(&id)
    }

    /// Kinds of the roads crossed, in travel order.
    pub fn kinds(&self, graph: &Graph) -> Result<Vec<EdgeKind>, GraphError> {
        self.nodes
            .windows(2)
            .map(|w| graph.edge(w[0], w[1]).map(|e| e.kind()))
            .collect()
    }
}

impl IntoIterator for Path {
    type Item = NodeId;
    type IntoIter = std::vec::IntoIter<NodeId>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, id) in self.nodes.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{id}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// PathSearch
// ---------------------------------------------------------------------------

/// One node of the path prefix being explored.
#[derive(Debug, Clone, Copy)]
struct Frame {
    node: NodeId,
    /// Balance on arrival at `node`.
    balance: Money,
    /// Next neighbour id to consider.
    cursor: NodeId,
}

/// Scratch state for [`find_path`](PathSearch::find_path).
///
/// Owns the visited marks and the current path prefix so that repeated
/// searches reuse their allocations. Both are reset at the start of every
/// search: a finished search never influences the next one.
#[derive(Debug, Default)]
pub struct PathSearch {
    visited: Vec<bool>,
    path: Vec<Frame>,
    expansions: usize,
}

impl PathSearch {
    /// Create a search context sized for graphs of `n` nodes. Larger
    /// graphs are still accepted; the scratch grows on demand.
    pub fn new(n: usize) -> Self {
        Self {
            visited: vec![false; n],
            path: Vec::with_capacity(n),
            expansions: 0,
        }
    }

    /// Number of nodes entered by the last search, counting re-entries
    /// after backtracking.
    pub fn expansions(&self) -> usize {
        self.expansions
    }

    fn reset(&mut self, n: usize) {
        self.visited.clear();
        self.visited.resize(n, false);
        self.path.clear();
        self.expansions = 0;
    }

    fn enter(&mut self, node: NodeId, balance: Money) {
        self.visited[node] = true;
        self.path.push(Frame {
            node,
            balance,
            cursor: 0,
        });
        self.expansions += 1;
    }

    /// Find a simple path from `start` to `destination` that never crosses
    /// a road the tariff refuses at the balance held at that point.
    ///
    /// Depth-first with backtracking: from each node the unvisited,
    /// affordable neighbours are tried in ascending id order, and a node
    /// whose neighbours are all exhausted is unmarked and dropped from the
    /// path again. Returns `Ok(None)` when no such path exists; errors are
    /// reserved for invalid endpoints.
    pub fn find_path<T: Tariff + ?Sized>(
        &mut self,
        graph: &Graph,
        tariff: &T,
        start: NodeId,
        destination: NodeId,
        budget: Money,
    ) -> Result<Option<Path>, GraphError> {
        graph.node(start)?;
        graph.node(destination)?;

        self.reset(graph.len());
        self.enter(start, budget);

        let found = 'search: loop {
            let Some(frame) = self.path.last_mut() else {
                break 'search None;
            };
            let (node, balance) = (frame.node, frame.balance);
            if node == destination {
                break 'search Some(balance);
            }

            match graph.incident_edge_from(node, frame.cursor)?.copied() {
                Some(edge) => {
                    let next = edge.to();
                    frame.cursor = next + 1;
                    if self.visited[next] || !tariff.can_cross(balance, edge.kind()) {
                        continue;
                    }
                    let after = tariff.cross(balance, edge.kind());
                    trace!("search: {edge} (balance {balance} -> {after})");
                    self.enter(next, after);
                }
                None => {
                    trace!("search: backtrack from {node}");
                    self.path.pop();
                    self.visited[node] = false;
                }
            }
        };

        let Some(balance) = found else {
            debug!(
                "search {start} -> {destination} (budget {budget}): no path after {} expansions",
                self.expansions
            );
            return Ok(None);
        };
        let path = Path {
            nodes: self.path.iter().map(|f| f.node).collect(),
            balance,
        };
        debug!(
            "search {start} -> {destination} (budget {budget}): {} nodes, balance {balance}, {} expansions",
            path.len(),
            self.expansions
        );
        Ok(Some(path))
    }
}

impl Graph {
    /// One-shot [`PathSearch::find_path`] with a fresh search context.
    pub fn find_path<T: Tariff + ?Sized>(
        &self,
        tariff: &T,
        start: NodeId,
        destination: NodeId,
        budget: Money,
    ) -> Result<Option<Path>, GraphError> {
        PathSearch::new(self.len()).find_path(self, tariff, start, destination, budget)
    }
}
