use grava_core::{GravaError, Label, VertexKey};
use grava_graph::{
    complete_bipartite_graph, graph_from_bytes, graph_from_json, graph_to_bytes, graph_to_json,
    Graph,
};

fn key(name: &str) -> VertexKey {
    VertexKey::from_label(&Label::from(name))
}

fn labeled_sample() -> Graph {
    let mut graph = Graph::directed();
    graph
        .create_vertex(Label::from_value(serde_json::json!({ "name": "hub", "tier": 1 })), 2.0)
        .unwrap();
    graph.create_default_vertex(Label::from("leaf")).unwrap();
    let hub = VertexKey::from_label(&Label::from_value(
        serde_json::json!({ "name": "hub", "tier": 1 }),
    ));
    graph
        .create_edge(&hub, &key("leaf"), 3.5, Some("trunk"))
        .unwrap();
    graph.create_edge(&hub, &hub, 1.0, None).unwrap();
    graph
}

#[test]
fn json_round_trip_reproduces_the_graph() {
    let graph = labeled_sample();
    let json = graph_to_json(&graph).unwrap();
    let restored = graph_from_json(&json).unwrap();
    assert_eq!(restored, graph);
}

#[test]
fn binary_round_trip_reproduces_the_graph() {
    let graph = labeled_sample();
    let bytes = graph_to_bytes(&graph).unwrap();
    let restored = graph_from_bytes(&bytes).unwrap();
    assert_eq!(restored, graph);
}

#[test]
fn undirected_graphs_round_trip_with_their_policy() {
    let graph = complete_bipartite_graph(2, 3).unwrap();
    let restored = graph_from_json(&graph_to_json(&graph).unwrap()).unwrap();
    assert!(!restored.is_directed());
    assert_eq!(restored, graph);
    assert_eq!(restored.size(), 6);
}

#[test]
fn serialization_is_deterministic_for_equal_graphs() {
    // Same content, different insertion order.
    let mut first = Graph::directed();
    first.create_default_vertex(Label::from("a")).unwrap();
    first.create_default_vertex(Label::from("b")).unwrap();
    first.connect(&key("a"), &key("b")).unwrap();

    let mut second = Graph::directed();
    second.create_default_vertex(Label::from("b")).unwrap();
    second.create_default_vertex(Label::from("a")).unwrap();
    second.connect(&key("a"), &key("b")).unwrap();

    assert_eq!(graph_to_json(&first).unwrap(), graph_to_json(&second).unwrap());
}

#[test]
fn malformed_json_fails_with_a_parse_error() {
    let err = graph_from_json("{ not json").unwrap_err();
    assert!(matches!(err, GravaError::Serde(_)));
    assert_eq!(err.info().code, "deserialize-json");
}

#[test]
fn domain_errors_keep_their_family_during_restore() {
    // Duplicate vertices inside the document surface as the domain error,
    // not as a parse failure.
    let json = r#"{
        "schema_version": { "major": 1, "minor": 0, "patch": 0 },
        "directed": true,
        "vertices": [
            { "label": "a", "weight": 1.0 },
            { "label": "a", "weight": 2.0 }
        ],
        "edges": []
    }"#;
    let err = graph_from_json(json).unwrap_err();
    assert!(matches!(err, GravaError::VertexDuplicated(_)));
}

#[test]
fn edge_listing_in_documents_is_sorted() {
    let graph = labeled_sample();
    let json = graph_to_json(&graph).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let edges = value["edges"].as_array().unwrap();
    assert_eq!(edges.len(), 2);
    let vertices = value["vertices"].as_array().unwrap();
    assert_eq!(vertices.len(), 2);
}
