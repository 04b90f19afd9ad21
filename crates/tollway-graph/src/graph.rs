//! Nodes, typed edges and the fixed-size undirected [`Graph`].

use std::fmt;

use tollway_core::{Axis, FixedVec, Matrix};

use crate::error::GraphError;

/// Identity of a node: its index in the graph, `0..len`.
pub type NodeId = usize;

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

/// A graph vertex. Its id is assigned by [`Graph::new`] and never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    id: NodeId,
}

impl Node {
    #[inline]
    pub const fn new(id: NodeId) -> Self {
        Self { id }
    }

    #[inline]
    pub const fn id(self) -> NodeId {
        self.id
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

// ---------------------------------------------------------------------------
// EdgeKind / Edge
// ---------------------------------------------------------------------------

/// The economic type of a road.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EdgeKind {
    /// Pays the traveller on every crossing.
    Reward,
    /// Free to cross.
    Public,
    /// Costs the traveller on every crossing.
    Toll,
}

impl EdgeKind {
    /// All kinds, in declaration order.
    pub const ALL: [EdgeKind; 3] = [EdgeKind::Reward, EdgeKind::Public, EdgeKind::Toll];

    /// Map a standard grid marker (`C`, `F`, `T`) to its kind.
    pub fn from_marker(ch: char) -> Option<Self> {
        match ch {
            'C' => Some(Self::Reward),
            'F' => Some(Self::Public),
            'T' => Some(Self::Toll),
            _ => None,
        }
    }

    /// The standard grid marker for this kind.
    pub const fn marker(self) -> char {
        match self {
            Self::Reward => 'C',
            Self::Public => 'F',
            Self::Toll => 'T',
        }
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Reward => "reward",
            Self::Public => "public",
            Self::Toll => "toll",
        };
        f.write_str(s)
    }
}

/// One direction of an undirected road. The graph stores an `Edge` for each
/// direction, so `from` is always the node the edge was looked up from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    kind: EdgeKind,
    from: NodeId,
    to: NodeId,
}

impl Edge {
    #[inline]
    pub const fn new(from: NodeId, to: NodeId, kind: EdgeKind) -> Self {
        Self { kind, from, to }
    }

    #[inline]
    pub const fn kind(&self) -> EdgeKind {
        self.kind
    }

    #[inline]
    pub const fn from(&self) -> NodeId {
        self.from
    }

    #[inline]
    pub const fn to(&self) -> NodeId {
        self.to
    }

    /// The same road traversed the other way.
    #[inline]
    pub const fn reversed(&self) -> Self {
        Self::new(self.to, self.from, self.kind)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -{}-> {}", self.from, self.kind, self.to)
    }
}

// ---------------------------------------------------------------------------
// Graph
// ---------------------------------------------------------------------------

/// A fixed-size undirected graph with at most one typed edge per node pair.
///
/// Nodes are created once by [`new`](Graph::new). Edges are kept in an
/// `n × n` adjacency [`Matrix`] that stays symmetric: inserting `u`–`v`
/// stores `u → v` at `[u][v]` and `v → u` at `[v][u]`.
#[derive(Debug, Clone)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "GraphParts")
)]
pub struct Graph {
    nodes: FixedVec<Node>,
    adjacency: Matrix<Edge>,
    edges: usize,
}

impl Graph {
    /// Create a graph with nodes `0..n` and no edges.
    ///
    /// The adjacency matrix holds `n²` cells; when that cannot be allocated
    /// the result is [`TooLarge`](GraphError::TooLarge).
    pub fn new(n: usize) -> Result<Self, GraphError> {
        let adjacency = Matrix::new(n, n).map_err(|_| GraphError::TooLarge { nodes: n })?;
        Ok(Self {
            nodes: (0..n).map(Node::new).collect(),
            adjacency,
            edges: 0,
        })
    }

    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.capacity()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of undirected edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges
    }

    /// All nodes in id order.
    pub fn nodes(&self) -> impl Iterator<Item = Node> + '_ {
        self.nodes.iter().copied()
    }

    /// Look up a node by id.
    pub fn node(&self, id: NodeId) -> Result<Node, GraphError> {
        match self.nodes.get(id) {
            Ok(Some(node)) => Ok(*node),
            _ => Err(GraphError::NoSuchNode { id, len: self.len() }),
        }
    }

    /// Error for a `(u, v)` lookup that fell outside the adjacency matrix.
    fn missing(&self, u: NodeId, v: NodeId) -> GraphError {
        let id = if u >= self.len() { u } else { v };
        GraphError::NoSuchNode { id, len: self.len() }
    }

    fn slot(&self, u: NodeId, v: NodeId) -> Result<Option<&Edge>, GraphError> {
        self.adjacency.get(u, v).map_err(|_| self.missing(u, v))
    }

    /// Join `u` and `v` with a road of the given kind.
    ///
    /// Fails if either node does not exist, if `u == v`, or if the two are
    /// already joined.
    pub fn insert_edge(&mut self, u: NodeId, v: NodeId, kind: EdgeKind) -> Result<(), GraphError> {
        if self.slot(u, v)?.is_some() {
            return Err(GraphError::DuplicateEdge { u, v });
        }
        if u == v {
            return Err(GraphError::SelfLoop(u));
        }
        let forward = Edge::new(u, v, kind);
        self.adjacency
            .set(u, v, forward)
            .map_err(|_| self.missing(u, v))?;
        self.adjacency
            .set(v, u, forward.reversed())
            .map_err(|_| self.missing(v, u))?;
        self.edges += 1;
        Ok(())
    }

    /// Every edge leaving `u`, one per neighbour, in ascending neighbour id.
    pub fn incident_edges(
        &self,
        u: NodeId,
    ) -> Result<impl Iterator<Item = &Edge> + '_, GraphError> {
        let row = self
            .adjacency
            .axis(Axis::Row, u)
            .map_err(|_| GraphError::NoSuchNode { id: u, len: self.len() })?;
        Ok(row.into_iter())
    }

    /// The first edge leaving `u` whose neighbour id is `start` or greater.
    ///
    /// Stepping `start` to one past the returned neighbour walks the same
    /// sequence as [`incident_edges`](Self::incident_edges) without
    /// borrowing an iterator.
    pub fn incident_edge_from(
        &self,
        u: NodeId,
        start: NodeId,
    ) -> Result<Option<&Edge>, GraphError> {
        self.adjacency
            .row_from(u, start)
            .map(|found| found.map(|(_, e)| e))
            .map_err(|_| self.missing(u, start))
    }

    /// The edge from `u` to `v`.
    pub fn edge(&self, u: NodeId, v: NodeId) -> Result<&Edge, GraphError> {
        self.slot(u, v)?.ok_or(GraphError::EdgeNotFound { u, v })
    }

    /// Whether `u` and `v` are joined by an edge.
    pub fn adjacent(&self, u: NodeId, v: NodeId) -> Result<bool, GraphError> {
        Ok(self.slot(u, v)?.is_some())
    }

    /// Whether every stored edge has a mirror of the same kind.
    pub fn is_symmetric(&self) -> bool {
        let n = self.len();
        for u in 0..n {
            for v in 0..n {
                let forward = self.slot(u, v).ok().flatten();
                let back = self.slot(v, u).ok().flatten();
                match (forward, back) {
                    (None, None) => {}
                    (Some(f), Some(b)) if *b == f.reversed() => {}
                    _ => return false,
                }
            }
        }
        true
    }

    /// Check every invariant `insert_edge` maintains: node ids match their
    /// slots, the matrix is `n × n`, edges are stored at `[from][to]` with a
    /// mirrored twin and no self-loops, and `edges` counts the pairs.
    #[cfg(feature = "serde")]
    fn validate(&self) -> Result<(), GraphError> {
        let corrupt = |reason: &'static str| -> Result<(), GraphError> {
            Err(GraphError::Corrupt { reason })
        };
        let n = self.len();
        let misnumbered = self.nodes.iter().enumerate().any(|(i, v)| v.id() != i);
        if self.nodes.occupied() != n || misnumbered {
            return corrupt("node ids do not match their slots");
        }
        if self.adjacency.rows() != n || self.adjacency.cols() != n {
            return corrupt("adjacency matrix is not n x n");
        }
        let mut pairs = 0;
        for u in 0..n {
            let mut col = 0;
            while let Some((v, e)) = self.adjacency.row_from(u, col).ok().flatten() {
                if e.from() != u || e.to() != v || u == v {
                    return corrupt("edge stored in the wrong cell");
                }
                if self.slot(v, u).ok().flatten() != Some(&e.reversed()) {
                    return corrupt("edge has no mirrored twin");
                }
                if u < v {
                    pairs += 1;
                }
                col = v + 1;
            }
        }
        if pairs != self.edges {
            return corrupt("edge count does not match stored edges");
        }
        Ok(())
    }
}

/// Unchecked field values of a deserialized [`Graph`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct GraphParts {
    nodes: FixedVec<Node>,
    adjacency: Matrix<Edge>,
    edges: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<GraphParts> for Graph {
    type Error = GraphError;

    fn try_from(parts: GraphParts) -> Result<Self, GraphError> {
        let graph = Self {
            nodes: parts.nodes,
            adjacency: parts.adjacency,
            edges: parts.edges,
        };
        graph.validate()?;
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{RngExt, SeedableRng};

    #[test]
    fn nodes_are_numbered_sequentially() {
        let g = Graph::new(4).unwrap();
        assert_eq!(g.len(), 4);
        let ids: Vec<_> = g.nodes().map(Node::id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
        assert_eq!(g.node(3), Ok(Node::new(3)));
        assert_eq!(g.node(4), Err(GraphError::NoSuchNode { id: 4, len: 4 }));
    }

    #[test]
    fn insert_then_query() {
        let mut g = Graph::new(3).unwrap();
        g.insert_edge(0, 2, EdgeKind::Toll).unwrap();
        assert_eq!(g.adjacent(0, 2), Ok(true));
        assert_eq!(g.adjacent(2, 0), Ok(true));
        assert_eq!(g.adjacent(0, 1), Ok(false));
        assert_eq!(g.edge(0, 2).unwrap().kind(), EdgeKind::Toll);
        let back = g.edge(2, 0).unwrap();
        assert_eq!((back.from(), back.to()), (2, 0));
        assert_eq!(g.edge_count(), 1);
        assert!(g.is_symmetric());
    }

    #[test]
    fn duplicate_edges_are_rejected_in_either_direction() {
        let mut g = Graph::new(2).unwrap();
        g.insert_edge(0, 1, EdgeKind::Public).unwrap();
        assert_eq!(
            g.insert_edge(0, 1, EdgeKind::Reward),
            Err(GraphError::DuplicateEdge { u: 0, v: 1 })
        );
        assert_eq!(
            g.insert_edge(1, 0, EdgeKind::Public),
            Err(GraphError::DuplicateEdge { u: 1, v: 0 })
        );
        assert_eq!(g.edge(0, 1).unwrap().kind(), EdgeKind::Public);
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn invalid_endpoints_and_self_loops() {
        let mut g = Graph::new(2).unwrap();
        assert_eq!(
            g.insert_edge(0, 5, EdgeKind::Public),
            Err(GraphError::NoSuchNode { id: 5, len: 2 })
        );
        assert_eq!(
            g.insert_edge(7, 0, EdgeKind::Public),
            Err(GraphError::NoSuchNode { id: 7, len: 2 })
        );
        assert_eq!(g.insert_edge(1, 1, EdgeKind::Toll), Err(GraphError::SelfLoop(1)));
        assert_eq!(g.adjacent(0, 9), Err(GraphError::NoSuchNode { id: 9, len: 2 }));
        assert!(g.incident_edges(2).is_err());
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn unallocatable_graphs_are_refused() {
        assert_eq!(
            Graph::new(usize::MAX).unwrap_err(),
            GraphError::TooLarge { nodes: usize::MAX }
        );
        assert!(Graph::new(0).unwrap().is_empty());
    }

    #[test]
    fn missing_edge_lookup() {
        let g = Graph::new(3).unwrap();
        assert_eq!(g.edge(0, 1), Err(GraphError::EdgeNotFound { u: 0, v: 1 }));
    }

    #[test]
    fn incident_edges_in_neighbour_order() {
        let mut g = Graph::new(5).unwrap();
        g.insert_edge(2, 4, EdgeKind::Reward).unwrap();
        g.insert_edge(2, 0, EdgeKind::Toll).unwrap();
        g.insert_edge(3, 2, EdgeKind::Public).unwrap();
        let out: Vec<_> = g
            .incident_edges(2)
            .unwrap()
            .map(|e| (e.from(), e.to(), e.kind()))
            .collect();
        assert_eq!(
            out,
            vec![
                (2, 0, EdgeKind::Toll),
                (2, 3, EdgeKind::Public),
                (2, 4, EdgeKind::Reward),
            ]
        );
        assert_eq!(g.incident_edges(1).unwrap().count(), 0);
    }

    #[test]
    fn cursor_walk_matches_incident_edges() {
        let mut g = Graph::new(6).unwrap();
        for v in [1, 3, 5] {
            g.insert_edge(0, v, EdgeKind::Public).unwrap();
        }
        let mut walked = Vec::new();
        let mut cursor = 0;
        while let Some(e) = g.incident_edge_from(0, cursor).unwrap() {
            walked.push(e.to());
            cursor = e.to() + 1;
        }
        let listed: Vec<_> = g.incident_edges(0).unwrap().map(Edge::to).collect();
        assert_eq!(walked, listed);
        assert_eq!(g.incident_edge_from(0, 6), Ok(None));
    }

    #[test]
    fn random_graphs_report_exactly_the_inserted_neighbours() {
        let mut rng = StdRng::seed_from_u64(0x70_11);
        for _ in 0..50 {
            let n = rng.random_range(1..12usize);
            let mut g = Graph::new(n).unwrap();
            let mut expected = vec![Vec::new(); n];
            for _ in 0..n * 2 {
                let u = rng.random_range(0..n);
                let v = rng.random_range(0..n);
                let kind = EdgeKind::ALL[rng.random_range(0..3usize)];
                let already = u == v || expected[u].contains(&v);
                let result = g.insert_edge(u, v, kind);
                if already {
                    assert!(result.is_err());
                } else {
                    result.unwrap();
                    expected[u].push(v);
                    expected[v].push(u);
                    assert_eq!(g.edge(u, v).unwrap().kind(), kind);
                }
            }
            assert!(g.is_symmetric());
            for (u, want) in expected.iter_mut().enumerate() {
                want.sort_unstable();
                let got: Vec<_> = g.incident_edges(u).unwrap().map(Edge::to).collect();
                assert_eq!(&got, want);
                assert!(g.incident_edges(u).unwrap().all(|e| e.from() == u));
            }
        }
    }

    #[test]
    fn markers_map_to_kinds() {
        for kind in EdgeKind::ALL {
            assert_eq!(EdgeKind::from_marker(kind.marker()), Some(kind));
        }
        assert_eq!(EdgeKind::from_marker('+'), None);
        assert_eq!(EdgeKind::from_marker('c'), None);
    }

    #[test]
    fn edge_display() {
        let e = Edge::new(3, 4, EdgeKind::Toll);
        assert_eq!(e.to_string(), "3 -toll-> 4");
        assert_eq!(e.reversed().to_string(), "4 -toll-> 3");
    }
}
