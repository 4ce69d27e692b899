use grava_core::{GravaError, Label, RngHandle};
use grava_graph::{complete_bipartite_graph, complete_graph, cycle_graph, gen_random, path_graph, Graph};
use grava_planar::is_planar;
use proptest::prelude::*;

#[test]
fn empty_graph_is_rejected() {
    let err = is_planar(&Graph::undirected()).unwrap_err();
    assert!(matches!(err, GravaError::InvalidArgument(_)));
    assert_eq!(err.info().code, "empty-graph");
}

#[test]
fn graphs_under_five_vertices_are_planar() {
    for n in 1..5 {
        assert!(is_planar(&complete_graph(n).unwrap()).unwrap(), "K{n}");
    }
}

#[test]
fn complete_graphs_of_five_or_more_are_not_planar() {
    for n in 5..=7 {
        assert!(!is_planar(&complete_graph(n).unwrap()).unwrap(), "K{n}");
    }
}

#[test]
fn k33_and_larger_balanced_bicliques_are_not_planar() {
    assert!(!is_planar(&complete_bipartite_graph(3, 3).unwrap()).unwrap());
    assert!(!is_planar(&complete_bipartite_graph(3, 4).unwrap()).unwrap());
    assert!(!is_planar(&complete_bipartite_graph(4, 4).unwrap()).unwrap());
}

#[test]
fn k2m_is_planar_for_every_m() {
    for m in 1..=5 {
        assert!(
            is_planar(&complete_bipartite_graph(2, m).unwrap()).unwrap(),
            "K2,{m}"
        );
    }
}

#[test]
fn paths_and_cycles_are_planar() {
    assert!(is_planar(&path_graph(8).unwrap()).unwrap());
    assert!(is_planar(&cycle_graph(8).unwrap()).unwrap());
}

#[test]
fn k5_minus_an_edge_is_planar() {
    // Forces the recursive reduction: five vertices, nine edges, no fast
    // path applies.
    let mut graph = complete_graph(5).unwrap();
    let keys: Vec<_> = graph.vertex_keys().cloned().collect();
    let rebuilt = {
        let mut out = Graph::undirected();
        for vertex in graph.vertices() {
            out.add_vertex(vertex).unwrap();
        }
        for edge in graph.edges() {
            if edge.source().key() == &keys[0] && edge.destination().key() == &keys[1] {
                continue;
            }
            out.add_edge(edge).unwrap();
        }
        out
    };
    graph = rebuilt;
    assert_eq!(graph.simple_edge_count(), 9);
    assert!(is_planar(&graph).unwrap());
}

#[test]
fn loops_do_not_affect_planarity() {
    let mut graph = complete_graph(4).unwrap();
    let first = graph.vertex_keys().next().cloned().unwrap();
    graph.connect(&first, &first).unwrap();
    assert!(is_planar(&graph).unwrap());
}

#[test]
fn dense_graphs_fail_the_euler_bound() {
    // K6 minus one edge: 6 vertices, 14 edges > 3 * 6 - 6.
    let graph = complete_graph(6).unwrap();
    let mut out = Graph::undirected();
    for vertex in graph.vertices() {
        out.add_vertex(vertex).unwrap();
    }
    let mut skipped = false;
    for edge in graph.edges() {
        if !skipped {
            skipped = true;
            continue;
        }
        out.add_edge(edge).unwrap();
    }
    assert_eq!(out.simple_edge_count(), 14);
    assert!(!is_planar(&out).unwrap());
}

proptest! {
    #[test]
    fn graphs_with_fewer_than_five_vertices_are_always_planar(seed in any::<u64>(), nodes in 1usize..5, percent in 0u32..=100) {
        let mut rng = RngHandle::from_seed(seed);
        let graph = gen_random(nodes, f64::from(percent) / 100.0, &mut rng).unwrap();
        prop_assert!(is_planar(&graph).unwrap());
    }

    #[test]
    fn decisions_are_stable_across_repeated_queries(seed in any::<u64>()) {
        let mut rng = RngHandle::from_seed(seed);
        let graph = gen_random(7, 0.35, &mut rng).unwrap();
        let first = is_planar(&graph).unwrap();
        let second = is_planar(&graph).unwrap();
        prop_assert_eq!(first, second);
    }
}

#[test]
fn directed_graphs_are_decided_on_their_symmetric_closure() {
    // A directed 4-cycle is planar.
    let mut ring = Graph::directed();
    let keys: Vec<_> = (0..4)
        .map(|idx| ring.create_default_vertex(Label::from(idx as u64)).unwrap())
        .collect();
    for idx in 0..4 {
        ring.connect(&keys[idx], &keys[(idx + 1) % 4]).unwrap();
    }
    assert!(is_planar(&ring).unwrap());

    // A tournament on five vertices closes to K5.
    let mut tournament = Graph::directed();
    let keys: Vec<_> = (0..5)
        .map(|idx| {
            tournament
                .create_default_vertex(Label::from(idx as u64))
                .unwrap()
        })
        .collect();
    for i in 0..5 {
        for j in (i + 1)..5 {
            tournament.connect(&keys[i], &keys[j]).unwrap();
        }
    }
    assert!(!is_planar(&tournament).unwrap());
}
