#![deny(missing_docs)]

//! Planarity decision procedure over grava graphs.
//!
//! The oracle is purely combinatorial: it consumes the graph crate's
//! connectivity, bipartiteness and induced-subgraph operators and never
//! looks at coordinates. The embedding crate's `is_plane` answers a
//! different, coordinate-dependent question.

mod oracle;

pub use oracle::{is_planar, PlanarityOracle, PlanarityVerdict};
