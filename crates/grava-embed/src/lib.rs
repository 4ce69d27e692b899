#![deny(missing_docs)]

//! 2D embeddings of grava graphs.
//!
//! An embedding assigns a position to every vertex and an arc parameter to
//! every logical edge of a graph snapshot, then answers the coordinate
//! level question planarity cannot: how many straight-line crossings does
//! THIS layout have? Renderers and layout heuristics consume the read-only
//! iterators; neither is implemented here.

mod embedding;
mod geometry;
mod serialization;

pub use embedding::{EmbeddedEdge, EmbeddedVertex, Embedding, EmbeddingOptions};
pub use geometry::{segment_intersection, segments_cross, Point, EPSILON};
pub use serialization::{embedding_from_json, embedding_to_json};
