use grava_core::{GravaError, Label, RngHandle, VertexKey};
use rand::Rng;

use crate::graph::Graph;
use crate::vertex::DEFAULT_WEIGHT;

/// Generates the complete undirected graph on `n` integer-labeled vertices.
pub fn complete_graph(n: usize) -> Result<Graph, GravaError> {
    let keys = seed_vertices(n)?;
    let mut graph = Graph::undirected();
    let keys = insert_vertices(&mut graph, &keys)?;
    for (idx, source) in keys.iter().enumerate() {
        for destination in keys.iter().skip(idx + 1) {
            graph.connect(source, destination)?;
        }
    }
    Ok(graph)
}

/// Generates the complete bipartite undirected graph `K_{a,b}`.
///
/// The first partition takes labels `0..a`, the second `a..a + b`.
pub fn complete_bipartite_graph(a: usize, b: usize) -> Result<Graph, GravaError> {
    if a == 0 || b == 0 {
        return Err(GravaError::invalid_argument(
            "empty-partition",
            "complete bipartite graphs require two non-empty partitions",
        )
        .with_context("a", a)
        .with_context("b", b));
    }
    let labels = seed_vertices(a + b)?;
    let mut graph = Graph::undirected();
    let keys = insert_vertices(&mut graph, &labels)?;
    let (left, right) = keys.split_at(a);
    for source in left {
        for destination in right {
            graph.connect(source, destination)?;
        }
    }
    Ok(graph)
}

/// Generates an undirected path on `n` integer-labeled vertices.
pub fn path_graph(n: usize) -> Result<Graph, GravaError> {
    let labels = seed_vertices(n)?;
    let mut graph = Graph::undirected();
    let keys = insert_vertices(&mut graph, &labels)?;
    for pair in keys.windows(2) {
        graph.connect(&pair[0], &pair[1])?;
    }
    Ok(graph)
}

/// Generates an undirected cycle on `n >= 3` integer-labeled vertices.
pub fn cycle_graph(n: usize) -> Result<Graph, GravaError> {
    if n < 3 {
        return Err(GravaError::invalid_argument(
            "cycle-too-short",
            "cycles require at least three vertices",
        )
        .with_context("n", n));
    }
    let mut graph = path_graph(n)?;
    graph.connect(&key_for(n - 1), &key_for(0))?;
    Ok(graph)
}

/// Generates an undirected random graph where each unordered pair is joined
/// independently with the provided probability.
///
/// Randomness flows through the deterministic [`RngHandle`], so a fixed seed
/// reproduces the same graph on every platform.
pub fn gen_random(
    n: usize,
    edge_probability: f64,
    rng: &mut RngHandle,
) -> Result<Graph, GravaError> {
    if !(0.0..=1.0).contains(&edge_probability) || !edge_probability.is_finite() {
        return Err(GravaError::invalid_argument(
            "invalid-probability",
            "edge probability must lie in [0, 1]",
        )
        .with_context("probability", edge_probability));
    }
    let labels = seed_vertices(n)?;
    let mut graph = Graph::undirected();
    let keys = insert_vertices(&mut graph, &labels)?;
    for (idx, source) in keys.iter().enumerate() {
        for destination in keys.iter().skip(idx + 1) {
            if rng.gen_bool(edge_probability) {
                graph.connect(source, destination)?;
            }
        }
    }
    Ok(graph)
}

fn seed_vertices(n: usize) -> Result<Vec<Label>, GravaError> {
    if n == 0 {
        return Err(GravaError::invalid_argument(
            "empty-graph",
            "generators require at least one vertex",
        ));
    }
    Ok((0..n).map(|idx| Label::from(idx as u64)).collect())
}

fn insert_vertices(graph: &mut Graph, labels: &[Label]) -> Result<Vec<VertexKey>, GravaError> {
    labels
        .iter()
        .map(|label| graph.create_vertex(label.clone(), DEFAULT_WEIGHT))
        .collect()
}

fn key_for(idx: usize) -> VertexKey {
    VertexKey::from_label(&Label::from(idx as u64))
}
