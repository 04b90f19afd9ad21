//! The [`RoadMap`] model: a road graph plus the trip it is meant for.

use std::fs;
use std::path::Path as FsPath;
use std::str::FromStr;

use log::debug;
use tollway_core::{Extent, Point};
use tollway_graph::{Economy, Graph, GraphError, Money, NodeId, Path, PathSearch};

use crate::error::MapError;
use crate::layout::{MapHeader, MapLayout};

/// A rectangular road network with a designated start, destination and
/// travel budget.
///
/// Intersection `(x, y)` of a map `width` wide is node `y * width + x`.
#[derive(Debug)]
pub struct RoadMap {
    header: MapHeader,
    graph: Graph,
    search: PathSearch,
}

impl RoadMap {
    /// Read and build a map from a grid description file.
    pub fn open(path: impl AsRef<FsPath>) -> Result<Self, MapError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| MapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        text.parse()
    }

    /// Build the graph described by `layout`.
    pub fn from_layout(layout: &MapLayout) -> Result<Self, MapError> {
        let header = *layout.header();
        let mut graph = Graph::new(header.len())?;
        for road in layout.roads() {
            graph.insert_edge(road.from, road.to, road.kind)?;
        }
        debug!(
            "road map {}x{}: {} roads, {} -> {}, budget {}",
            header.width,
            header.length,
            graph.edge_count(),
            header.start,
            header.destination,
            header.initial_budget
        );
        Ok(Self {
            header,
            search: PathSearch::new(graph.len()),
            graph,
        })
    }

    pub fn header(&self) -> &MapHeader {
        &self.header
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Starting node of the trip.
    pub fn start(&self) -> NodeId {
        self.header.start
    }

    /// Destination node of the trip.
    pub fn destination(&self) -> NodeId {
        self.header.destination
    }

    pub fn initial_budget(&self) -> Money {
        self.header.initial_budget
    }

    pub fn toll(&self) -> Money {
        self.header.toll
    }

    pub fn gain(&self) -> Money {
        self.header.gain
    }

    /// Intersections per row.
    pub fn width(&self) -> usize {
        self.header.width
    }

    /// Number of rows of intersections.
    pub fn length(&self) -> usize {
        self.header.length
    }

    /// The toll and reward amounts of this map.
    pub fn economy(&self) -> Economy {
        Economy::new(self.header.toll, self.header.gain)
    }

    /// The grid of intersections, `width × length` from the origin.
    pub fn bounds(&self) -> Extent {
        Extent::new(self.header.width, self.header.length)
    }

    /// Grid position of node `id`.
    pub fn position(&self, id: NodeId) -> Option<Point> {
        self.bounds().point_at(id)
    }

    /// Node at grid position `p`.
    pub fn node_at(&self, p: Point) -> Option<NodeId> {
        self.bounds().index_of(p)
    }

    /// Find a simple path from `start` to `destination`, beginning the trip
    /// with `budget` in hand.
    ///
    /// `Ok(None)` means no route can pay its tolls.
    pub fn find_path(
        &mut self,
        start: NodeId,
        destination: NodeId,
        budget: Money,
    ) -> Result<Option<Path>, GraphError> {
        let economy = self.economy();
        self.search
            .find_path(&self.graph, &economy, start, destination, budget)
    }

    /// [`find_path`](Self::find_path) for the map's own trip.
    pub fn solve(&mut self) -> Result<Option<Path>, GraphError> {
        self.find_path(self.start(), self.destination(), self.initial_budget())
    }
}

impl FromStr for RoadMap {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, MapError> {
        Self::from_layout(&MapLayout::parse(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tollway_graph::{EdgeKind, Tariff};

    fn map(text: &str) -> RoadMap {
        text.parse().unwrap()
    }

    fn nodes(path: Option<Path>) -> Option<Vec<NodeId>> {
        path.map(|p| p.into_iter().collect())
    }

    #[test]
    fn public_road_between_two_nodes() {
        let mut m = map("1 0 1 2 1 0 5 1\n+F+");
        assert_eq!(m.graph().len(), 2);
        assert_eq!(nodes(m.solve().unwrap()), Some(vec![0, 1]));
    }

    #[test]
    fn toll_too_expensive() {
        let mut m = map("1 0 1 2 1 3 5 1\n+T+");
        assert!(m.graph().adjacent(0, 1).unwrap());
        assert_eq!(m.solve().unwrap(), None);
    }

    #[test]
    fn reward_road_balance() {
        let mut m = map("1 0 1 2 1 4 5 3\n+C+");
        let p = m.solve().unwrap().unwrap();
        assert_eq!(p.nodes(), &[0, 1]);
        assert_eq!(p.balance(), m.initial_budget() + m.gain());
    }

    #[test]
    fn toll_paid_with_exact_budget() {
        // 0 -F- 1
        // F     T
        // 2  X  3
        let text = "1 0 3 2 2 10 10 0\n+F+\nF T\n+X+";
        let mut m = map(text);
        let p = m.solve().unwrap().unwrap();
        assert_eq!(p.nodes(), &[0, 1, 3]);
        assert_eq!(p.balance(), 0);
        assert_eq!(m.find_path(0, 3, 9).unwrap(), None);
    }

    #[test]
    fn disconnected_pair() {
        let mut m = map("1 0 1 2 1 100 0 0\n+X+");
        assert_eq!(m.graph().edge_count(), 0);
        assert_eq!(m.solve().unwrap(), None);
    }

    #[test]
    fn coordinates() {
        let m = map("1 0 5 3 2 0 0 0\n+F+F+\nF F F\n+F+F+");
        assert_eq!(m.bounds().len(), 6);
        assert_eq!(m.position(4), Some(Point::new(1, 1)));
        assert_eq!(m.node_at(Point::new(2, 1)), Some(5));
        assert_eq!(m.node_at(Point::new(3, 0)), None);
        assert_eq!(m.position(6), None);
        for id in 0..m.graph().len() {
            let p = m.position(id).unwrap();
            assert_eq!(m.node_at(p), Some(id));
        }
    }

    #[test]
    fn grid_neighbours_become_edges() {
        let m = map("1 0 5 3 2 0 0 0\n+F+T+\nC X F\n+F+F+");
        let g = m.graph();
        assert_eq!(g.edge(0, 1).unwrap().kind(), EdgeKind::Public);
        assert_eq!(g.edge(2, 1).unwrap().kind(), EdgeKind::Toll);
        assert_eq!(g.edge(3, 0).unwrap().kind(), EdgeKind::Reward);
        assert_eq!(g.edge(4, 5).unwrap().kind(), EdgeKind::Public);
        assert_eq!(g.adjacent(1, 4), Ok(false));
        assert_eq!(g.edge_count(), 6);
        assert!(g.is_symmetric());
        // Every edge joins grid neighbours.
        for u in 0..g.len() {
            let pu = m.position(u).unwrap();
            for e in g.incident_edges(u).unwrap() {
                let pv = m.position(e.to()).unwrap();
                assert_eq!(pu.grid_distance(pv), 1, "{e} is not a grid road");
            }
        }
    }

    #[test]
    fn repeated_solves_agree() {
        let mut m = map("1 0 5 3 2 0 0 0\n+F+F+\nF F F\n+F+F+");
        let first = m.solve().unwrap().unwrap();
        let second = m.solve().unwrap().unwrap();
        assert_eq!(first, second);
        assert_eq!(first.nodes(), &[0, 1, 2, 5]);
        assert_eq!(
            m.economy().replay(0, first.kinds(m.graph()).unwrap()),
            Some(first.balance())
        );
    }

    #[test]
    fn large_headers_fail_without_allocating() {
        let err = "1 0 1 1000 1000 0 0 0\n+F+".parse::<RoadMap>().unwrap_err();
        assert!(matches!(
            err,
            MapError::TooManyNodes {
                width: 1000,
                length: 1000,
                ..
            }
        ));
        let err = "1 0 1 2049 1 0 0 0".parse::<RoadMap>().unwrap_err();
        assert!(matches!(err, MapError::TooManyNodes { max: 2048, .. }));
        let widest = MapLayout::parse("1 0 1 2048 1 0 0 0").unwrap();
        assert_eq!(widest.header().len(), crate::MAX_NODES);
    }

    #[test]
    fn invalid_search_endpoints() {
        let mut m = map("1 0 1 2 1 0 0 0\n+F+");
        assert_eq!(
            m.find_path(0, 2, 0),
            Err(GraphError::NoSuchNode { id: 2, len: 2 })
        );
    }
}
