use grava_core::{GravaError, Label, VertexKey};
use serde::Serialize;

/// A weighted node keyed by the canonical serialization of its label.
///
/// The label and the derived key are fixed at construction; only the weight
/// mutates. Weight participates in value equality but never in identity.
#[derive(Debug, Clone)]
pub struct Vertex {
    label: Label,
    weight: f64,
    key: VertexKey,
}

/// Default weight assigned to vertices and edges created without one.
pub const DEFAULT_WEIGHT: f64 = 1.0;

impl Vertex {
    /// Creates a vertex with the provided label and weight.
    pub fn new(label: Label, weight: f64) -> Result<Self, GravaError> {
        ensure_weight(weight)?;
        let key = VertexKey::from_label(&label);
        Ok(Self { label, weight, key })
    }

    /// Creates a vertex with the default weight.
    pub fn with_default_weight(label: Label) -> Result<Self, GravaError> {
        Self::new(label, DEFAULT_WEIGHT)
    }

    /// Creates a vertex from any serializable value, using the value's own
    /// `Serialize` implementation as its canonical form.
    pub fn from_serialize<T: Serialize>(value: &T, weight: f64) -> Result<Self, GravaError> {
        let label = Label::from_serialize(value)?;
        Self::new(label, weight)
    }

    /// Returns the identity key derived from the label.
    pub fn key(&self) -> &VertexKey {
        &self.key
    }

    /// Returns the label this vertex is keyed by.
    pub fn label(&self) -> &Label {
        &self.label
    }

    /// Returns the current weight.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Updates the weight in place.
    pub fn set_weight(&mut self, weight: f64) -> Result<(), GravaError> {
        ensure_weight(weight)?;
        self.weight = weight;
        Ok(())
    }
}

impl PartialEq for Vertex {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.weight == other.weight
    }
}

impl AsRef<VertexKey> for Vertex {
    fn as_ref(&self) -> &VertexKey {
        &self.key
    }
}

pub(crate) fn ensure_weight(weight: f64) -> Result<(), GravaError> {
    if !weight.is_finite() {
        return Err(
            GravaError::invalid_argument("invalid-weight", "weights must be finite numbers")
                .with_context("weight", weight),
        );
    }
    Ok(())
}
