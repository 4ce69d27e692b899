use grava_core::{GravaError, Label, SchemaVersion, VertexKey};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::edge::Edge;
use crate::graph::Graph;
use crate::vertex::Vertex;

/// Serializes the graph to a compact binary representation using `bincode`.
pub fn graph_to_bytes(graph: &Graph) -> Result<Vec<u8>, GravaError> {
    let serializable = SerializableGraph::from_graph(graph);
    bincode::serialize(&serializable)
        .map_err(|err| GravaError::serde("serialize-bytes", err.to_string()))
}

/// Restores a graph from its binary representation.
pub fn graph_from_bytes(bytes: &[u8]) -> Result<Graph, GravaError> {
    let serializable: SerializableGraph = bincode::deserialize(bytes)
        .map_err(|err| GravaError::serde("deserialize-bytes", err.to_string()))?;
    serializable.into_graph()
}

/// Serializes the graph to a JSON string.
///
/// Vertices and edges are emitted in sorted key order, so equal graphs
/// produce identical documents.
pub fn graph_to_json(graph: &Graph) -> Result<String, GravaError> {
    let serializable = SerializableGraph::from_graph(graph);
    serde_json::to_string_pretty(&serializable)
        .map_err(|err| GravaError::serde("serialize-json", err.to_string()))
}

/// Restores a graph from a JSON string.
///
/// Malformed input fails with the `Serde` family, distinct from the domain
/// errors raised while rebuilding the graph.
pub fn graph_from_json(json: &str) -> Result<Graph, GravaError> {
    let serializable: SerializableGraph = serde_json::from_str(json)
        .map_err(|err| GravaError::serde("deserialize-json", err.to_string()))?;
    serializable.into_graph()
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct SerializableGraph {
    #[serde(default)]
    pub(crate) schema_version: SchemaVersion,
    pub(crate) directed: bool,
    pub(crate) vertices: Vec<SerializableVertex>,
    pub(crate) edges: Vec<SerializableEdge>,
}

impl SerializableGraph {
    pub(crate) fn from_graph(graph: &Graph) -> Self {
        let vertices = graph.vertices().map(SerializableVertex::from_vertex).collect();
        let edges = graph
            .edges()
            .into_iter()
            .map(SerializableEdge::from_edge)
            .collect();
        Self {
            schema_version: SchemaVersion::default(),
            directed: graph.is_directed(),
            vertices,
            edges,
        }
    }

    pub(crate) fn into_graph(self) -> Result<Graph, GravaError> {
        let mut graph = if self.directed {
            Graph::directed()
        } else {
            Graph::undirected()
        };
        for vertex in self.vertices {
            graph.add_vertex(&vertex.into_vertex()?)?;
        }
        for edge in self.edges {
            let source = VertexKey::from_label(&Label::from_value(edge.source.label));
            let destination = VertexKey::from_label(&Label::from_value(edge.destination.label));
            graph.create_edge(&source, &destination, edge.weight, edge.label.as_deref())?;
        }
        Ok(graph)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct SerializableVertex {
    pub(crate) label: Value,
    pub(crate) weight: f64,
}

impl SerializableVertex {
    pub(crate) fn from_vertex(vertex: &Vertex) -> Self {
        Self {
            label: vertex.label().to_value(),
            weight: vertex.weight(),
        }
    }

    pub(crate) fn into_vertex(self) -> Result<Vertex, GravaError> {
        Vertex::new(Label::from_value(self.label), self.weight)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct SerializableEdge {
    pub(crate) source: SerializableVertex,
    pub(crate) destination: SerializableVertex,
    pub(crate) weight: f64,
    pub(crate) label: Option<String>,
}

impl SerializableEdge {
    pub(crate) fn from_edge(edge: &Edge) -> Self {
        Self {
            source: SerializableVertex::from_vertex(edge.source()),
            destination: SerializableVertex::from_vertex(edge.destination()),
            weight: edge.weight(),
            label: edge.label().map(str::to_owned),
        }
    }
}
