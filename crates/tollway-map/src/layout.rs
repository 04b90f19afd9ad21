//! Grid descriptions: the text format road maps are built from.
//!
//! A description starts with eight integers separated by any whitespace:
//!
//! ```text
//! scale start destination width length budget toll gain
//! ```
//!
//! `scale` is read but has no effect. Everything after the eighth integer on
//! its line is ignored, and the following lines hold the road grid. For a
//! map `width` intersections wide and `length` long the grid has at most
//! `2*length-1` rows of at most `2*width-1` characters:
//!
//! ```text
//! +T+C+    row 0: intersections 0 1 2, roads 0-1 (toll) and 1-2 (reward)
//! F X F    row 1: roads 0-3 and 2-5 (public), 1-4 walled off
//! +F+T+    row 2: intersections 3 4 5, roads 3-4 (public) and 4-5 (toll)
//! ```
//!
//! Even rows hold intersections at even columns and horizontal roads at odd
//! columns. Odd rows hold vertical roads at even columns.
//!
//! A road position holding a marker from the [`MarkerSet`] becomes an edge
//! of that kind; any other character is a wall. Intersection positions and
//! the odd/odd filler positions are never inspected.

use std::str::FromStr;

use log::warn;
use tollway_core::Point;
use tollway_graph::{EdgeKind, Money, NodeId};

use crate::error::MapError;

/// Largest number of intersections a map may have. The road graph keeps an
/// adjacency cell for every pair of intersections.
pub const MAX_NODES: usize = 2048;

const FIELDS: [&str; 8] = [
    "scale",
    "start",
    "destination",
    "width",
    "length",
    "initial budget",
    "toll",
    "gain",
];

// ---------------------------------------------------------------------------
// MarkerSet
// ---------------------------------------------------------------------------

/// The characters that mark roads in a grid description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarkerSet {
    pub reward: char,
    pub public: char,
    pub toll: char,
}

impl Default for MarkerSet {
    fn default() -> Self {
        Self {
            reward: EdgeKind::Reward.marker(),
            public: EdgeKind::Public.marker(),
            toll: EdgeKind::Toll.marker(),
        }
    }
}

impl MarkerSet {
    /// The road kind marked by `ch`, or `None` for a wall.
    pub fn kind(&self, ch: char) -> Option<EdgeKind> {
        if ch == self.reward {
            Some(EdgeKind::Reward)
        } else if ch == self.public {
            Some(EdgeKind::Public)
        } else if ch == self.toll {
            Some(EdgeKind::Toll)
        } else {
            None
        }
    }

    /// The character marking roads of `kind`.
    pub fn marker(&self, kind: EdgeKind) -> char {
        match kind {
            EdgeKind::Reward => self.reward,
            EdgeKind::Public => self.public,
            EdgeKind::Toll => self.toll,
        }
    }
}

// ---------------------------------------------------------------------------
// MapHeader
// ---------------------------------------------------------------------------

/// The eight header values of a grid description, validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapHeader {
    pub scale: i64,
    pub start: NodeId,
    pub destination: NodeId,
    pub width: usize,
    pub length: usize,
    pub initial_budget: Money,
    pub toll: Money,
    pub gain: Money,
}

impl MapHeader {
    /// Number of intersections, `width * length`.
    #[inline]
    pub fn len(&self) -> usize {
        self.width.saturating_mul(self.length)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum grid rows, `2*length-1`.
    #[inline]
    pub fn grid_rows(&self) -> usize {
        self.length.saturating_mul(2).saturating_sub(1)
    }

    /// Maximum grid columns, `2*width-1`.
    #[inline]
    pub fn grid_cols(&self) -> usize {
        self.width.saturating_mul(2).saturating_sub(1)
    }

    fn from_values(v: [i64; 8]) -> Result<Self, MapError> {
        let dimension = |i: usize| -> Result<usize, MapError> {
            // Keep grid coordinates representable as `Point`s.
            if v[i] <= 0 || v[i] > i64::from(i32::MAX / 2) {
                return Err(MapError::InvalidDimension {
                    field: FIELDS[i],
                    value: v[i],
                });
            }
            Ok(v[i] as usize)
        };
        let width = dimension(3)?;
        let length = dimension(4)?;
        let len = match width.checked_mul(length) {
            Some(len) if len <= MAX_NODES => len,
            _ => {
                return Err(MapError::TooManyNodes {
                    width,
                    length,
                    max: MAX_NODES,
                });
            }
        };
        let node = |i: usize| -> Result<NodeId, MapError> {
            if v[i] < 0 || v[i] as u64 >= len as u64 {
                return Err(MapError::NodeOutOfRange {
                    field: FIELDS[i],
                    id: v[i],
                    len,
                });
            }
            Ok(v[i] as NodeId)
        };
        Ok(Self {
            scale: v[0],
            start: node(1)?,
            destination: node(2)?,
            width,
            length,
            initial_budget: v[5],
            toll: v[6],
            gain: v[7],
        })
    }
}

// ---------------------------------------------------------------------------
// MapLayout
// ---------------------------------------------------------------------------

/// A road to be inserted into the map graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Road {
    pub from: NodeId,
    pub to: NodeId,
    pub kind: EdgeKind,
    /// Grid position of the marker.
    pub pos: Point,
}

/// A parsed grid description.
#[derive(Debug, Clone)]
pub struct MapLayout {
    header: MapHeader,
    rows: Vec<Vec<char>>,
    markers: MarkerSet,
}

impl MapLayout {
    /// Parse a grid description using the standard markers.
    pub fn parse(s: &str) -> Result<Self, MapError> {
        Self::parse_with(s, MarkerSet::default())
    }

    /// Parse a grid description, reading roads with the given markers.
    pub fn parse_with(s: &str, markers: MarkerSet) -> Result<Self, MapError> {
        let mut lines = s.lines();
        let mut values = [0i64; 8];
        let mut count = 0;

        while count < values.len() {
            let Some(line) = lines.next() else {
                return Err(MapError::MissingHeader {
                    field: FIELDS[count],
                });
            };
            let mut tokens = line.split_whitespace();
            while count < values.len() {
                let Some(token) = tokens.next() else {
                    break;
                };
                values[count] = token.parse().map_err(|_| MapError::InvalidNumber {
                    field: FIELDS[count],
                    token: token.to_string(),
                })?;
                count += 1;
            }
            let rest: Vec<&str> = tokens.collect();
            if !rest.is_empty() {
                warn!("map header: ignoring trailing {:?}", rest.join(" "));
            }
        }
        let header = MapHeader::from_values(values)?;

        let mut rows: Vec<Vec<char>> = lines.map(|l| l.trim_end().chars().collect()).collect();
        while rows.last().is_some_and(|r| r.is_empty()) {
            rows.pop();
        }

        let (max_rows, max_cols) = (header.grid_rows(), header.grid_cols());
        if rows.len() > max_rows {
            return Err(MapError::GridTooLarge {
                pos: Point::new(0, max_rows as i32),
                rows: max_rows,
                cols: max_cols,
            });
        }
        if let Some(y) = rows.iter().position(|r| r.len() > max_cols) {
            return Err(MapError::GridTooLarge {
                pos: Point::new(max_cols as i32, y as i32),
                rows: max_rows,
                cols: max_cols,
            });
        }

        Ok(Self {
            header,
            rows,
            markers,
        })
    }

    pub fn header(&self) -> &MapHeader {
        &self.header
    }

    pub fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    /// Number of grid rows actually present.
    pub fn grid_rows(&self) -> usize {
        self.rows.len()
    }

    /// The grid character at `p` (x = column, y = row), if present.
    pub fn cell(&self, p: Point) -> Option<char> {
        if p.x < 0 || p.y < 0 {
            return None;
        }
        self.rows
            .get(p.y as usize)
            .and_then(|row| row.get(p.x as usize))
            .copied()
    }

    /// The road at grid position `(row, col)`, if the character there is a
    /// road marker in a road position.
    fn road_at(&self, row: usize, col: usize, ch: char) -> Option<Road> {
        let width = self.header.width;
        let id = (row / 2) * width + col / 2;
        let to = match (row % 2, col % 2) {
            (0, 1) => id + 1,
            (1, 0) => id + width,
            _ => return None,
        };
        let kind = self.markers.kind(ch)?;
        Some(Road {
            from: id,
            to,
            kind,
            pos: Point::new(col as i32, row as i32),
        })
    }

    /// Every road in the grid: horizontal roads on even rows and vertical
    /// roads on odd rows, top to bottom and left to right.
    pub fn roads(&self) -> impl Iterator<Item = Road> + '_ {
        self.rows.iter().enumerate().flat_map(move |(r, row)| {
            row.iter()
                .enumerate()
                .filter_map(move |(c, &ch)| self.road_at(r, c, ch))
        })
    }
}

impl FromStr for MapLayout {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, MapError> {
        Self::parse(s)
    }
}
