use std::collections::BTreeSet;

use grava_core::{GravaError, Label, VertexKey};
use grava_graph::{canonical_hash, cycle_graph, Graph};

fn key(name: &str) -> VertexKey {
    VertexKey::from_label(&Label::from(name))
}

fn sample_directed() -> Graph {
    let mut graph = Graph::directed();
    for name in ["a", "b", "c"] {
        graph.create_default_vertex(Label::from(name)).unwrap();
    }
    graph.create_edge(&key("a"), &key("b"), 2.0, Some("ab")).unwrap();
    graph.create_edge(&key("b"), &key("a"), 3.0, Some("ba")).unwrap();
    graph.create_edge(&key("b"), &key("c"), 1.0, None).unwrap();
    graph
}

#[test]
fn transpose_reverses_every_edge() {
    let graph = sample_directed();
    let transposed = graph.transpose();

    assert!(transposed.edge_between(&key("b"), &key("a")).is_some());
    assert!(transposed.edge_between(&key("c"), &key("b")).is_some());
    assert!(transposed.edge_between(&key("b"), &key("c")).is_none());
    let reversed = transposed.edge_between(&key("b"), &key("a")).unwrap();
    assert_eq!(reversed.weight(), 2.0);
    assert_eq!(reversed.label(), Some("ab"));
}

#[test]
fn transpose_is_an_involution() {
    let graph = sample_directed();
    assert_eq!(graph.transpose().transpose(), graph);
}

#[test]
fn transpose_of_undirected_graph_is_identity() {
    let graph = cycle_graph(4).unwrap();
    assert_eq!(graph.transpose(), graph);
}

#[test]
fn symmetric_closure_sums_opposite_weights_and_drops_labels() {
    let graph = sample_directed();
    let closure = graph.symmetric_closure().unwrap();

    assert!(!closure.is_directed());
    let merged = closure.edge_between(&key("a"), &key("b")).unwrap();
    assert_eq!(merged.weight(), 5.0);
    assert_eq!(merged.label(), None);

    // The one-way edge keeps its single weight.
    let one_way = closure.edge_between(&key("b"), &key("c")).unwrap();
    assert_eq!(one_way.weight(), 1.0);
}

#[test]
fn symmetric_closure_preserves_loops() {
    let mut graph = Graph::directed();
    let a = graph.create_default_vertex(Label::from("a")).unwrap();
    graph.create_edge(&a, &a, 4.0, None).unwrap();

    let closure = graph.symmetric_closure().unwrap();
    assert_eq!(closure.edge_between(&a, &a).unwrap().weight(), 4.0);
}

#[test]
fn symmetric_closure_of_undirected_graph_is_an_equal_clone() {
    let graph = cycle_graph(5).unwrap();
    let closure = graph.symmetric_closure().unwrap();
    assert_eq!(closure, graph);
    assert_eq!(canonical_hash(&closure), canonical_hash(&graph));
}

#[test]
fn induced_subgraph_keeps_internal_edges_only() {
    let graph = sample_directed();
    let keep: BTreeSet<VertexKey> = [key("a"), key("b")].into_iter().collect();
    let induced = graph.induced_subgraph(&keep).unwrap();

    assert_eq!(induced.order(), 2);
    assert_eq!(induced.size(), 2);
    assert!(induced.edge_between(&key("a"), &key("b")).is_some());
    assert!(induced.edge_between(&key("b"), &key("a")).is_some());
    assert!(!induced.contains_vertex(&key("c")));
}

#[test]
fn induced_subgraph_of_undirected_graph_stays_symmetric() {
    let graph = cycle_graph(4).unwrap();
    let keep: BTreeSet<VertexKey> = graph.vertex_keys().take(3).cloned().collect();
    let induced = graph.induced_subgraph(&keep).unwrap();
    for edge in induced.edges() {
        assert!(induced
            .edge_between(edge.destination().key(), edge.source().key())
            .is_some());
    }
}

#[test]
fn induced_subgraph_rejects_bad_vertex_sets() {
    let graph = sample_directed();

    let err = graph.induced_subgraph(&BTreeSet::new()).unwrap_err();
    assert!(matches!(err, GravaError::InvalidArgument(_)));

    let foreign: BTreeSet<VertexKey> = [key("a"), key("ghost")].into_iter().collect();
    let err = graph.induced_subgraph(&foreign).unwrap_err();
    assert!(matches!(err, GravaError::VertexNotFound(_)));
}

#[test]
fn derived_graphs_do_not_mutate_the_receiver() {
    let graph = sample_directed();
    let fingerprint = canonical_hash(&graph);
    let _ = graph.transpose();
    let _ = graph.symmetric_closure().unwrap();
    let keep: BTreeSet<VertexKey> = [key("a"), key("b")].into_iter().collect();
    let _ = graph.induced_subgraph(&keep).unwrap();
    assert_eq!(canonical_hash(&graph), fingerprint);
}

#[test]
fn structural_hash_ignores_weights_but_not_structure() {
    let mut graph = sample_directed();
    let before = canonical_hash(&graph);
    graph.set_edge_weight(&key("a"), &key("b"), 42.0).unwrap();
    graph.set_vertex_weight(&key("c"), 6.0).unwrap();
    assert_eq!(canonical_hash(&graph), before);

    graph.connect(&key("a"), &key("c")).unwrap();
    assert_ne!(canonical_hash(&graph), before);
}
