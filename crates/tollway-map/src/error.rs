use std::fmt;
use std::io;
use std::path::PathBuf;

use tollway_core::Point;
use tollway_graph::GraphError;

/// Errors that can occur while building a [`RoadMap`](crate::RoadMap).
#[derive(Debug)]
pub enum MapError {
    /// The grid description could not be read.
    Io { path: PathBuf, source: io::Error },
    /// The header ended before `field` was read.
    MissingHeader { field: &'static str },
    /// A header token is not an integer.
    InvalidNumber { field: &'static str, token: String },
    /// A grid dimension is not positive or is too large.
    InvalidDimension { field: &'static str, value: i64 },
    /// The map has more intersections than a road graph can hold.
    TooManyNodes {
        width: usize,
        length: usize,
        max: usize,
    },
    /// The start or destination is not a node of the map.
    NodeOutOfRange {
        field: &'static str,
        id: i64,
        len: usize,
    },
    /// A grid character lies outside the `rows × cols` layout.
    GridTooLarge { pos: Point, rows: usize, cols: usize },
    /// The graph rejected a road.
    Graph(GraphError),
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "map error: cannot read {}: {source}", path.display())
            }
            Self::MissingHeader { field } => {
                write!(f, "map error: header ends before {field}")
            }
            Self::InvalidNumber { field, token } => {
                write!(f, "map error: {field} is not an integer: \u{201c}{token}\u{201d}")
            }
            Self::InvalidDimension { field, value } => {
                write!(f, "map error: invalid {field} {value}")
            }
            Self::TooManyNodes { width, length, max } => write!(
                f,
                "map error: a {width}x{length} map exceeds the limit of {max} intersections"
            ),
            Self::NodeOutOfRange { field, id, len } => {
                write!(f, "map error: {field} {id} is not one of the {len} nodes")
            }
            Self::GridTooLarge { pos, rows, cols } => write!(
                f,
                "map error: grid character at {pos} lies outside the {rows}x{cols} layout"
            ),
            Self::Graph(e) => write!(f, "map error: {e}"),
        }
    }
}

impl std::error::Error for MapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Graph(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GraphError> for MapError {
    fn from(e: GraphError) -> Self {
        Self::Graph(e)
    }
}
