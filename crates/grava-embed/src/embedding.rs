use std::collections::BTreeMap;

use grava_core::{EdgeKey, GravaError, RngHandle, VertexKey};
use grava_graph::{Edge, Graph, Vertex};
use rand::Rng;

use crate::geometry::{segments_cross, Point};

/// A vertex placed in the embedding plane.
///
/// Carries the graph vertex snapshot (its weight scales the rendered
/// radius) plus a mutable position.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedVertex {
    vertex: Vertex,
    position: Point,
}

impl EmbeddedVertex {
    /// Returns the identity key of the underlying vertex.
    pub fn key(&self) -> &VertexKey {
        self.vertex.key()
    }

    /// Returns the underlying vertex snapshot.
    pub fn vertex(&self) -> &Vertex {
        &self.vertex
    }

    /// Returns the current position.
    pub fn position(&self) -> Point {
        self.position
    }
}

/// An edge placed in the embedding plane.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedEdge {
    edge: Edge,
    arc_control_distance: f64,
    directed: bool,
}

impl EmbeddedEdge {
    /// Returns the identity key of the underlying edge.
    pub fn key(&self) -> &EdgeKey {
        self.edge.key()
    }

    /// Returns the underlying edge snapshot.
    pub fn edge(&self) -> &Edge {
        &self.edge
    }

    /// Returns the Bezier arc control distance used by renderers.
    pub fn arc_control_distance(&self) -> f64 {
        self.arc_control_distance
    }

    /// Returns whether renderers should draw an arrow head.
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Returns whether both endpoints coincide.
    pub fn is_loop(&self) -> bool {
        self.edge.is_loop()
    }
}

/// Canvas bounds and optional explicit placements for [`Embedding::for_graph`].
#[derive(Debug, Clone)]
pub struct EmbeddingOptions {
    width: f64,
    height: f64,
    vertex_positions: BTreeMap<VertexKey, Point>,
    arc_control_distances: BTreeMap<EdgeKey, f64>,
}

impl EmbeddingOptions {
    /// Creates options for a canvas of the given dimensions.
    pub fn new(width: f64, height: f64) -> Result<Self, GravaError> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(GravaError::invalid_argument(
                "invalid-canvas",
                "canvas dimensions must be positive finite numbers",
            )
            .with_context("width", width)
            .with_context("height", height));
        }
        Ok(Self {
            width,
            height,
            vertex_positions: BTreeMap::new(),
            arc_control_distances: BTreeMap::new(),
        })
    }

    /// Pins a vertex to an explicit position instead of a random one.
    pub fn with_vertex_position(mut self, key: VertexKey, position: Point) -> Self {
        self.vertex_positions.insert(key, position);
        self
    }

    /// Sets the initial arc control distance for an edge.
    pub fn with_arc_control_distance(mut self, key: EdgeKey, distance: f64) -> Self {
        self.arc_control_distances.insert(key, distance);
        self
    }
}

/// A 2D realization of a graph: one position per vertex, one embedded edge
/// per logical graph edge.
///
/// Positions and arc control distances mutate in place; the topology is
/// fixed at construction, so structural changes require a new embedding.
#[derive(Debug, Clone, PartialEq)]
pub struct Embedding {
    width: f64,
    height: f64,
    vertices: BTreeMap<VertexKey, EmbeddedVertex>,
    edges: BTreeMap<EdgeKey, EmbeddedEdge>,
}

impl Embedding {
    /// Builds an embedding of the provided graph.
    ///
    /// Vertices pinned through the options keep their supplied position;
    /// the rest are placed uniformly at random inside the canvas through
    /// the deterministic RNG handle, so a fixed seed reproduces the layout.
    pub fn for_graph(
        graph: &Graph,
        options: EmbeddingOptions,
        rng: &mut RngHandle,
    ) -> Result<Self, GravaError> {
        for key in options.vertex_positions.keys() {
            if !graph.contains_vertex(key) {
                return Err(GravaError::vertex_not_found(
                    "unknown-vertex",
                    "pinned position refers to a vertex outside the graph",
                )
                .with_context("vertex", key));
            }
        }
        for key in options.arc_control_distances.keys() {
            if graph.edge(key).is_none() {
                return Err(GravaError::edge_not_found(
                    "unknown-edge",
                    "arc control distance refers to an edge outside the graph",
                )
                .with_context("edge", key));
            }
        }

        let mut vertices = BTreeMap::new();
        for vertex in graph.vertices() {
            let position = match options.vertex_positions.get(vertex.key()) {
                Some(position) => *position,
                None => Point::new(
                    rng.gen_range(0.0..=options.width),
                    rng.gen_range(0.0..=options.height),
                )?,
            };
            vertices.insert(
                vertex.key().clone(),
                EmbeddedVertex {
                    vertex: vertex.clone(),
                    position,
                },
            );
        }

        let mut edges = BTreeMap::new();
        for edge in graph.edges() {
            let arc_control_distance = options
                .arc_control_distances
                .get(edge.key())
                .copied()
                .unwrap_or(0.0);
            ensure_distance(arc_control_distance)?;
            edges.insert(
                edge.key().clone(),
                EmbeddedEdge {
                    edge: edge.clone(),
                    arc_control_distance,
                    directed: graph.is_directed(),
                },
            );
        }

        Ok(Self {
            width: options.width,
            height: options.height,
            vertices,
            edges,
        })
    }

    /// Returns the canvas width.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Returns the canvas height.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Iterates embedded vertices in sorted key order.
    pub fn vertices(&self) -> impl Iterator<Item = &EmbeddedVertex> + '_ {
        self.vertices.values()
    }

    /// Iterates embedded edges in sorted key order.
    pub fn edges(&self) -> impl Iterator<Item = &EmbeddedEdge> + '_ {
        self.edges.values()
    }

    /// Looks up an embedded vertex.
    pub fn vertex<K: AsRef<VertexKey>>(&self, key: K) -> Option<&EmbeddedVertex> {
        self.vertices.get(key.as_ref())
    }

    /// Looks up an embedded edge.
    pub fn edge<K: AsRef<EdgeKey>>(&self, key: K) -> Option<&EmbeddedEdge> {
        self.edges.get(key.as_ref())
    }

    /// Moves a vertex to a new position.
    pub fn set_vertex_position<K: AsRef<VertexKey>>(
        &mut self,
        key: K,
        position: Point,
    ) -> Result<(), GravaError> {
        let key = key.as_ref();
        let embedded = self.vertices.get_mut(key).ok_or_else(|| {
            GravaError::vertex_not_found("unknown-vertex", "vertex is not part of this embedding")
                .with_context("vertex", key)
        })?;
        embedded.position = position;
        Ok(())
    }

    /// Updates the arc control distance of an edge.
    pub fn set_arc_control_distance<K: AsRef<EdgeKey>>(
        &mut self,
        key: K,
        distance: f64,
    ) -> Result<(), GravaError> {
        ensure_distance(distance)?;
        let key = key.as_ref();
        let embedded = self.edges.get_mut(key).ok_or_else(|| {
            GravaError::edge_not_found("unknown-edge", "edge is not part of this embedding")
                .with_context("edge", key)
        })?;
        embedded.arc_control_distance = distance;
        Ok(())
    }

    /// Counts straight-line crossings between non-adjacent edges.
    ///
    /// Every unordered pair of non-loop edges sharing no endpoint is tested
    /// with the parametric segment predicate; pairs sharing an endpoint are
    /// never counted because a shared-endpoint contact is not a topological
    /// crossing.
    pub fn rectilinear_intersections(&self) -> usize {
        let drawable: Vec<&EmbeddedEdge> =
            self.edges.values().filter(|edge| !edge.is_loop()).collect();
        let mut count = 0;
        for (idx, first) in drawable.iter().enumerate() {
            for second in drawable.iter().skip(idx + 1) {
                if shares_endpoint(first, second) {
                    continue;
                }
                let Some((p1, p2)) = self.segment_of(first) else {
                    continue;
                };
                let Some((q1, q2)) = self.segment_of(second) else {
                    continue;
                };
                if segments_cross(p1, p2, q1, q2) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Returns whether this particular layout is crossing-free.
    ///
    /// A coordinate-dependent notion: a planar graph may still be drawn
    /// with crossings, and moving vertices changes the answer. The
    /// combinatorial question is answered by the planarity oracle.
    pub fn is_plane(&self) -> bool {
        self.rectilinear_intersections() == 0
    }

    pub(crate) fn from_parts(
        width: f64,
        height: f64,
        vertices: Vec<(Vertex, Point)>,
        edges: Vec<(Edge, f64, bool)>,
    ) -> Result<Self, GravaError> {
        let vertices: BTreeMap<VertexKey, EmbeddedVertex> = vertices
            .into_iter()
            .map(|(vertex, position)| {
                (vertex.key().clone(), EmbeddedVertex { vertex, position })
            })
            .collect();
        let mut embedded_edges = BTreeMap::new();
        for (edge, arc_control_distance, directed) in edges {
            ensure_distance(arc_control_distance)?;
            embedded_edges.insert(
                edge.key().clone(),
                EmbeddedEdge {
                    edge,
                    arc_control_distance,
                    directed,
                },
            );
        }
        Ok(Self {
            width,
            height,
            vertices,
            edges: embedded_edges,
        })
    }

    fn segment_of(&self, edge: &EmbeddedEdge) -> Option<(Point, Point)> {
        let source = self.vertices.get(edge.edge().source().key())?;
        let destination = self.vertices.get(edge.edge().destination().key())?;
        Some((source.position, destination.position))
    }
}

fn shares_endpoint(first: &EmbeddedEdge, second: &EmbeddedEdge) -> bool {
    let (a, b) = (first.edge().source().key(), first.edge().destination().key());
    let (c, d) = (second.edge().source().key(), second.edge().destination().key());
    a == c || a == d || b == c || b == d
}

fn ensure_distance(distance: f64) -> Result<(), GravaError> {
    if !distance.is_finite() {
        return Err(GravaError::invalid_argument(
            "invalid-arc-distance",
            "arc control distances must be finite numbers",
        )
        .with_context("distance", distance));
    }
    Ok(())
}
