//! Typed-edge road graphs with budget-constrained path search.
//!
//! - [`Graph`] is a fixed-size undirected graph whose edges carry an
//!   [`EdgeKind`]: free ([`Public`](EdgeKind::Public)), paying
//!   ([`Reward`](EdgeKind::Reward)) or charging ([`Toll`](EdgeKind::Toll)).
//! - [`Tariff`] turns edge kinds into balance changes; [`Economy`] is the
//!   fixed toll/gain implementation.
//! - [`PathSearch`] finds a simple path between two nodes whose running
//!   balance can always pay the next toll.
//!
//! Structural misuse (unknown nodes, duplicate edges) is a [`GraphError`].
//! Failing to find a path is not an error; searches return `Ok(None)`.

mod error;
mod graph;
mod search;
mod tariff;

pub use error::GraphError;
pub use graph::{Edge, EdgeKind, Graph, Node, NodeId};
pub use search::{Path, PathSearch};
pub use tariff::{Economy, Money, Tariff};
