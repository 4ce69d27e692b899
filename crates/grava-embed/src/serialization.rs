use grava_core::{GravaError, Label, SchemaVersion};
use grava_graph::{Edge, Vertex};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::embedding::Embedding;
use crate::geometry::Point;

/// Serializes the embedding to a JSON string.
///
/// The document extends the graph interchange shape: each vertex carries a
/// `position` (a 2-element coordinate array encoded as its own JSON
/// string) and each edge an `arcControlDistance` and `isDirected` flag.
pub fn embedding_to_json(embedding: &Embedding) -> Result<String, GravaError> {
    let serializable = SerializableEmbedding::from_embedding(embedding)?;
    serde_json::to_string_pretty(&serializable)
        .map_err(|err| GravaError::serde("serialize-json", err.to_string()))
}

/// Restores an embedding from a JSON string.
pub fn embedding_from_json(json: &str) -> Result<Embedding, GravaError> {
    let serializable: SerializableEmbedding = serde_json::from_str(json)
        .map_err(|err| GravaError::serde("deserialize-json", err.to_string()))?;
    serializable.into_embedding()
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializableEmbedding {
    #[serde(default)]
    schema_version: SchemaVersion,
    width: f64,
    height: f64,
    vertices: Vec<SerializableEmbeddedVertex>,
    edges: Vec<SerializableEmbeddedEdge>,
}

impl SerializableEmbedding {
    fn from_embedding(embedding: &Embedding) -> Result<Self, GravaError> {
        let vertices = embedding
            .vertices()
            .map(|embedded| {
                Ok(SerializableEmbeddedVertex {
                    label: embedded.vertex().label().to_value(),
                    weight: embedded.vertex().weight(),
                    position: encode_position(embedded.position())?,
                })
            })
            .collect::<Result<_, GravaError>>()?;
        let edges = embedding
            .edges()
            .map(|embedded| SerializableEmbeddedEdge {
                source: SerializableEndpoint::from_vertex(embedded.edge().source()),
                destination: SerializableEndpoint::from_vertex(embedded.edge().destination()),
                weight: embedded.edge().weight(),
                label: embedded.edge().label().map(str::to_owned),
                arc_control_distance: embedded.arc_control_distance(),
                is_directed: embedded.is_directed(),
            })
            .collect();
        Ok(Self {
            schema_version: SchemaVersion::default(),
            width: embedding.width(),
            height: embedding.height(),
            vertices,
            edges,
        })
    }

    fn into_embedding(self) -> Result<Embedding, GravaError> {
        let vertices = self
            .vertices
            .into_iter()
            .map(|entry| {
                let vertex = Vertex::new(Label::from_value(entry.label), entry.weight)?;
                let position = decode_position(&entry.position)?;
                Ok((vertex, position))
            })
            .collect::<Result<Vec<_>, GravaError>>()?;
        let edges = self
            .edges
            .into_iter()
            .map(|entry| {
                let source = entry.source.into_vertex()?;
                let destination = entry.destination.into_vertex()?;
                let edge = Edge::new(source, destination, entry.weight, entry.label)?;
                Ok((edge, entry.arc_control_distance, entry.is_directed))
            })
            .collect::<Result<Vec<_>, GravaError>>()?;
        Embedding::from_parts(self.width, self.height, vertices, edges)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializableEmbeddedVertex {
    label: Value,
    weight: f64,
    position: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializableEndpoint {
    label: Value,
    weight: f64,
}

impl SerializableEndpoint {
    fn from_vertex(vertex: &Vertex) -> Self {
        Self {
            label: vertex.label().to_value(),
            weight: vertex.weight(),
        }
    }

    fn into_vertex(self) -> Result<Vertex, GravaError> {
        Vertex::new(Label::from_value(self.label), self.weight)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializableEmbeddedEdge {
    source: SerializableEndpoint,
    destination: SerializableEndpoint,
    weight: f64,
    label: Option<String>,
    #[serde(rename = "arcControlDistance")]
    arc_control_distance: f64,
    #[serde(rename = "isDirected")]
    is_directed: bool,
}

fn encode_position(position: Point) -> Result<String, GravaError> {
    serde_json::to_string(&[position.x(), position.y()])
        .map_err(|err| GravaError::serde("serialize-position", err.to_string()))
}

fn decode_position(encoded: &str) -> Result<Point, GravaError> {
    let coordinates: [f64; 2] = serde_json::from_str(encoded)
        .map_err(|err| GravaError::serde("deserialize-position", err.to_string()))?;
    Point::new(coordinates[0], coordinates[1])
}
