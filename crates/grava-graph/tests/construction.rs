use grava_core::{GravaError, Label, VertexKey};
use grava_graph::{Edge, Graph, Vertex};

fn key(name: &str) -> VertexKey {
    VertexKey::from_label(&Label::from(name))
}

fn triangle_vertices(graph: &mut Graph) -> (VertexKey, VertexKey, VertexKey) {
    let a = graph.create_default_vertex(Label::from("a")).unwrap();
    let b = graph.create_default_vertex(Label::from("b")).unwrap();
    let c = graph.create_default_vertex(Label::from("c")).unwrap();
    (a, b, c)
}

#[test]
fn duplicate_vertex_is_rejected() {
    let mut graph = Graph::directed();
    graph.create_default_vertex(Label::from("a")).unwrap();
    let err = graph.create_default_vertex(Label::from("a")).unwrap_err();
    assert!(matches!(err, GravaError::VertexDuplicated(_)));
    assert_eq!(err.info().code, "duplicate-vertex");
}

#[test]
fn structurally_equal_labels_collide() {
    let mut graph = Graph::directed();
    graph
        .create_default_vertex(Label::from_value(serde_json::json!({ "a": 1, "b": 2 })))
        .unwrap();
    let err = graph
        .create_default_vertex(Label::from_value(serde_json::json!({ "b": 2, "a": 1 })))
        .unwrap_err();
    assert!(matches!(err, GravaError::VertexDuplicated(_)));
}

#[test]
fn duplicate_ordered_pair_replaces_edge() {
    let mut graph = Graph::directed();
    let (a, b, _) = triangle_vertices(&mut graph);

    graph.create_edge(&a, &b, 1.0, Some("first")).unwrap();
    graph.create_edge(&a, &b, 4.0, Some("second")).unwrap();

    assert_eq!(graph.size(), 1);
    let stored = graph.edge_between(&a, &b).unwrap();
    assert_eq!(stored.weight(), 4.0);
    assert_eq!(stored.label(), Some("second"));
}

#[test]
fn undirected_insertion_stores_both_directions() {
    let mut graph = Graph::undirected();
    let (a, b, _) = triangle_vertices(&mut graph);

    graph.create_edge(&a, &b, 2.5, None).unwrap();

    assert!(graph.edge_between(&a, &b).is_some());
    assert!(graph.edge_between(&b, &a).is_some());
    assert_eq!(graph.size(), 1);
}

#[test]
fn undirected_edges_report_one_representative() {
    let mut graph = Graph::undirected();
    let (a, b, c) = triangle_vertices(&mut graph);
    graph.connect(&a, &b).unwrap();
    graph.connect(&c, &b).unwrap();

    let edges = graph.edges();
    assert_eq!(edges.len(), 2);
    for edge in edges {
        assert!(edge.source().key() <= edge.destination().key());
    }
}

#[test]
fn loops_are_permitted() {
    let mut graph = Graph::undirected();
    let (a, _, _) = triangle_vertices(&mut graph);
    let edge = graph.connect(&a, &a).unwrap();
    assert!(edge.is_loop());
    assert_eq!(graph.size(), 1);
}

#[test]
fn edge_requires_existing_endpoints() {
    let mut graph = Graph::directed();
    let (a, _, _) = triangle_vertices(&mut graph);
    let ghost = key("ghost");
    let err = graph.connect(&a, &ghost).unwrap_err();
    assert!(matches!(err, GravaError::VertexNotFound(_)));
    assert_eq!(err.info().code, "unknown-vertex");
}

#[test]
fn add_edge_rebinds_endpoints_to_graph_vertices() {
    let mut graph = Graph::directed();
    let (a, b, _) = triangle_vertices(&mut graph);
    graph.set_vertex_weight(&a, 7.0).unwrap();

    let outside_a = Vertex::with_default_weight(Label::from("a")).unwrap();
    let outside_b = Vertex::with_default_weight(Label::from("b")).unwrap();
    let edge = Edge::between(outside_a, outside_b).unwrap();

    let stored = graph.add_edge(&edge).unwrap();
    assert_eq!(stored.source().weight(), 7.0);
    assert_eq!(graph.edge_between(&a, &b).unwrap().source().weight(), 7.0);
}

#[test]
fn vertex_weight_updates_propagate_to_edge_snapshots() {
    let mut graph = Graph::undirected();
    let (a, b, _) = triangle_vertices(&mut graph);
    graph.connect(&a, &b).unwrap();

    graph.set_vertex_weight(&b, 3.5).unwrap();

    assert_eq!(graph.edge_between(&a, &b).unwrap().destination().weight(), 3.5);
    assert_eq!(graph.edge_between(&b, &a).unwrap().source().weight(), 3.5);
}

#[test]
fn edge_weight_update_covers_both_stored_directions() {
    let mut graph = Graph::undirected();
    let (a, b, _) = triangle_vertices(&mut graph);
    graph.connect(&a, &b).unwrap();

    graph.set_edge_weight(&a, &b, 9.0).unwrap();

    assert_eq!(graph.edge_between(&a, &b).unwrap().weight(), 9.0);
    assert_eq!(graph.edge_between(&b, &a).unwrap().weight(), 9.0);
}

#[test]
fn weight_setters_reject_missing_targets() {
    let mut graph = Graph::directed();
    let (a, b, _) = triangle_vertices(&mut graph);

    let err = graph.set_vertex_weight(&key("ghost"), 1.0).unwrap_err();
    assert!(matches!(err, GravaError::VertexNotFound(_)));

    let err = graph.set_edge_weight(&a, &b, 1.0).unwrap_err();
    assert!(matches!(err, GravaError::EdgeNotFound(_)));
}

#[test]
fn non_finite_weights_are_rejected() {
    let mut graph = Graph::directed();
    let (a, b, _) = triangle_vertices(&mut graph);
    graph.connect(&a, &b).unwrap();

    assert!(matches!(
        graph.set_vertex_weight(&a, f64::NAN),
        Err(GravaError::InvalidArgument(_))
    ));
    assert!(matches!(
        graph.set_edge_weight(&a, &b, f64::INFINITY),
        Err(GravaError::InvalidArgument(_))
    ));
}

#[test]
fn degrees_follow_directedness() {
    let mut directed = Graph::directed();
    let (a, b, c) = triangle_vertices(&mut directed);
    directed.connect(&a, &b).unwrap();
    directed.connect(&c, &b).unwrap();

    assert_eq!(directed.out_degree(&a).unwrap(), 1);
    assert_eq!(directed.in_degree(&b).unwrap(), 2);
    assert_eq!(directed.degree(&b).unwrap(), 2);

    let mut undirected = Graph::undirected();
    let (a, b, c) = triangle_vertices(&mut undirected);
    undirected.connect(&a, &b).unwrap();
    undirected.connect(&b, &c).unwrap();
    assert_eq!(undirected.degree(&b).unwrap(), 2);
}

#[test]
fn edge_lookup_by_identity_key() {
    let mut graph = Graph::directed();
    let (a, b, _) = triangle_vertices(&mut graph);
    let edge = graph.connect(&a, &b).unwrap();

    let found = graph.edge(edge.key()).unwrap();
    assert_eq!(found.key().as_str(), "[\"a\"][\"b\"]");
}

#[test]
fn vertex_lookup_accepts_vertex_or_key() {
    let mut graph = Graph::directed();
    let (a, _, _) = triangle_vertices(&mut graph);
    let held = Vertex::with_default_weight(Label::from("a")).unwrap();

    assert!(graph.vertex(&a).is_some());
    assert!(graph.vertex(&held).is_some());
}
