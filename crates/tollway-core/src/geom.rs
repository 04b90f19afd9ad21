//! Grid addressing: [`Point`] and [`Extent`].
//!
//! Intersections of a road map sit on a `width × length` grid. Node ids are
//! the row-major flattening of a [`Point`] inside the map's [`Extent`].

use std::fmt;

/// A grid position. `x` runs along the map width, `y` along its length.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Number of unit steps between `self` and `other` along the grid lines.
    #[inline]
    pub fn grid_distance(self, other: Point) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The `width × length` block of grid positions anchored at the origin.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Extent {
    width: usize,
    length: usize,
}

impl Extent {
    pub const fn new(width: usize, length: usize) -> Self {
        Self { width, length }
    }

    #[inline]
    pub fn width(self) -> usize {
        self.width
    }

    #[inline]
    pub fn length(self) -> usize {
        self.length
    }

    /// Number of positions, saturating at `usize::MAX`.
    #[inline]
    pub fn len(self) -> usize {
        self.width.saturating_mul(self.length)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.length == 0
    }

    pub fn contains(self, p: Point) -> bool {
        usize::try_from(p.x).is_ok_and(|x| x < self.width)
            && usize::try_from(p.y).is_ok_and(|y| y < self.length)
    }

    /// Row-major index of `p`, or `None` outside the extent.
    pub fn index_of(self, p: Point) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some(p.y as usize * self.width + p.x as usize)
    }

    /// The position with row-major index `idx`.
    ///
    /// `None` past the end, or when the position has no `i32` coordinates.
    pub fn point_at(self, idx: usize) -> Option<Point> {
        if idx >= self.len() {
            return None;
        }
        let x = i32::try_from(idx % self.width).ok()?;
        let y = i32::try_from(idx / self.width).ok()?;
        Some(Point::new(x, y))
    }
}
