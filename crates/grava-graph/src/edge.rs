use std::cmp::Ordering;

use grava_core::{EdgeKey, GravaError};

use crate::vertex::{ensure_weight, Vertex, DEFAULT_WEIGHT};

/// A weighted arc between two vertex identities.
///
/// The endpoints and the optional string label are fixed at construction;
/// only the weight mutates. The key is derived from the ordered endpoint
/// pair, so within one graph at most one edge exists per ordered pair.
#[derive(Debug, Clone)]
pub struct Edge {
    source: Vertex,
    destination: Vertex,
    weight: f64,
    label: Option<String>,
    key: EdgeKey,
}

impl Edge {
    /// Creates an edge between the provided endpoint vertices.
    pub fn new(
        source: Vertex,
        destination: Vertex,
        weight: f64,
        label: Option<String>,
    ) -> Result<Self, GravaError> {
        ensure_weight(weight)?;
        let key = EdgeKey::from_endpoints(source.key(), destination.key());
        Ok(Self {
            source,
            destination,
            weight,
            label,
            key,
        })
    }

    /// Creates an edge with the default weight and no label.
    pub fn between(source: Vertex, destination: Vertex) -> Result<Self, GravaError> {
        Self::new(source, destination, DEFAULT_WEIGHT, None)
    }

    /// Returns the identity key derived from the ordered endpoint pair.
    pub fn key(&self) -> &EdgeKey {
        &self.key
    }

    /// Returns the source vertex.
    pub fn source(&self) -> &Vertex {
        &self.source
    }

    /// Returns the destination vertex.
    pub fn destination(&self) -> &Vertex {
        &self.destination
    }

    /// Returns the current weight.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Returns the optional string label fixed at construction.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns whether both endpoints share the same identity.
    pub fn is_loop(&self) -> bool {
        self.source.key() == self.destination.key()
    }

    /// Returns a new edge with the endpoints swapped, same weight and label.
    pub fn transpose(&self) -> Self {
        let key = EdgeKey::from_endpoints(self.destination.key(), self.source.key());
        Self {
            source: self.destination.clone(),
            destination: self.source.clone(),
            weight: self.weight,
            label: self.label.clone(),
            key,
        }
    }

    pub(crate) fn set_weight(&mut self, weight: f64) -> Result<(), GravaError> {
        ensure_weight(weight)?;
        self.weight = weight;
        Ok(())
    }

    pub(crate) fn set_source_snapshot_weight(&mut self, weight: f64) {
        // Endpoint snapshots track the graph-owned vertex; weight was
        // validated by the graph-level setter.
        let _ = self.source.set_weight(weight);
    }

    pub(crate) fn set_destination_snapshot_weight(&mut self, weight: f64) {
        let _ = self.destination.set_weight(weight);
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.weight == other.weight && self.label == other.label
    }
}

impl Edge {
    /// Total ordering by source key, destination key, weight, then label.
    ///
    /// Used wherever edges must be enumerated reproducibly (serialization,
    /// fixtures).
    pub fn deterministic_cmp(&self, other: &Self) -> Ordering {
        self.source
            .key()
            .cmp(other.source.key())
            .then_with(|| self.destination.key().cmp(other.destination.key()))
            .then_with(|| self.weight.total_cmp(&other.weight))
            .then_with(|| self.label.cmp(&other.label))
    }
}

impl AsRef<EdgeKey> for Edge {
    fn as_ref(&self) -> &EdgeKey {
        &self.key
    }
}
