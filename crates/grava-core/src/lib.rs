#![deny(missing_docs)]

//! Core identity, label and error types shared by the grava graph crates.
//!
//! Identity in grava is value identity: a vertex is keyed by the canonical
//! serialization of its label, and an edge by its ordered endpoint keys.
//! This crate owns the [`Label`] model and its canonicalization, the key
//! newtypes built from it, the structured error taxonomy and the
//! deterministic RNG policy used everywhere randomness is needed.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

pub mod errors;
pub mod label;
pub mod rng;
mod version;

pub use errors::{ErrorInfo, GravaError};
pub use label::{is_serializable, Label};
pub use rng::{derive_substream_seed, RngHandle};
pub use version::SchemaVersion;

/// Identity key of a vertex: the canonical serialization of its label.
///
/// Two labels with equal canonical form yield equal keys and are the same
/// vertex identity everywhere in the library.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VertexKey(String);

impl VertexKey {
    /// Derives the key for the provided label.
    pub fn from_label(label: &Label) -> Self {
        Self(label.canonical_string())
    }

    /// Returns the canonical string backing this key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for VertexKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<VertexKey> for VertexKey {
    fn as_ref(&self) -> &VertexKey {
        self
    }
}

/// Identity key of an edge, derived from its ordered endpoint pair.
///
/// The textual form is `"[source key][destination key]"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeKey(String);

impl EdgeKey {
    /// Derives the key for the ordered `(source, destination)` pair.
    pub fn from_endpoints(source: &VertexKey, destination: &VertexKey) -> Self {
        Self(format!("[{}][{}]", source.as_str(), destination.as_str()))
    }

    /// Returns the canonical string backing this key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<EdgeKey> for EdgeKey {
    fn as_ref(&self) -> &EdgeKey {
        self
    }
}
