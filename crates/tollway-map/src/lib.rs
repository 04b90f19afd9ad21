//! Road maps built from grid descriptions.
//!
//! A [`RoadMap`] is a rectangular network of intersections joined by public,
//! reward and toll roads, together with the trip to plan on it: a start, a
//! destination and an initial budget. Maps are read from the text format
//! described in [`MapLayout`] and solved with the budget-aware search of
//! [`tollway_graph`].
//!
//! ```
//! use tollway_map::RoadMap;
//!
//! // 0 -F- 1
//! // F     T
//! // 2  X  3
//! let text = "1 0 3 2 2 10 10 0\n+F+\nF T\n+X+";
//! let mut map: RoadMap = text.parse().unwrap();
//! let path = map.solve().unwrap().unwrap();
//! assert_eq!(path.to_string(), "0 -> 1 -> 3");
//! assert_eq!(path.balance(), 0);
//! ```

mod error;
mod layout;
mod roadmap;

pub use error::MapError;
pub use layout::{MAX_NODES, MapHeader, MapLayout, MarkerSet, Road};
pub use roadmap::RoadMap;

pub use tollway_graph::{Economy, EdgeKind, GraphError, Money, NodeId, Path, Tariff};
