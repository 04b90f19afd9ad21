//! **tollway-core**: fixed-size containers and grid geometry.
//!
//! This crate provides the storage primitives the road-map graph is built
//! on: a fixed-capacity sequence of optional slots ([`FixedVec`]), a
//! fixed-size 2D grid of optional cells ([`Matrix`]) and the [`Point`] /
//! [`Extent`] pair used to address intersections on a map.
//!
//! Neither container grows after construction. Absence is modelled with
//! `Option`, and every out-of-range access is reported as a
//! [`ContainerError`] rather than a panic.

pub mod error;
pub mod geom;
pub mod matrix;
pub mod vector;

pub use error::ContainerError;
pub use geom::{Extent, Point};
pub use matrix::{Axis, Matrix};
pub use vector::FixedVec;
