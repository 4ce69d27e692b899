use std::collections::{BTreeMap, BTreeSet};

use grava_core::{GravaError, VertexKey};
use grava_graph::{canonical_hash, Graph};

/// Outcome of a budgeted planarity query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanarityVerdict {
    /// The graph admits a planar embedding.
    Planar,
    /// The graph contains a non-planar obstruction.
    NotPlanar,
    /// The expansion budget ran out before a decision was reached.
    ///
    /// Never conflated with [`PlanarityVerdict::NotPlanar`].
    Indeterminate,
}

/// Memoized recursive planarity decision procedure.
///
/// The oracle reduces a graph over its one-step minors (vertex and edge
/// deletions) down to known base cases, caching every decision under the
/// graph's canonical structural hash. The memo is shared across the whole
/// recursive invocation tree of one query, which is what keeps repeated
/// substructures from being re-derived; it lives as long as the oracle, so
/// holding an oracle across queries reuses prior decisions while the
/// [`is_planar`] convenience function stays call-scoped.
///
/// The procedure is exponential in the worst case and not intended for
/// graphs much beyond twenty vertices; the optional expansion budget turns
/// an over-long run into an explicit indeterminate outcome.
#[derive(Debug, Default)]
pub struct PlanarityOracle {
    memo: BTreeMap<String, bool>,
    budget: Option<usize>,
    expansions: usize,
}

impl PlanarityOracle {
    /// Creates an oracle with no expansion budget.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an oracle that gives up after `max_expansions` non-memoized
    /// graph evaluations.
    pub fn with_budget(max_expansions: usize) -> Self {
        Self {
            memo: BTreeMap::new(),
            budget: Some(max_expansions),
            expansions: 0,
        }
    }

    /// Returns the number of structural decisions currently memoized.
    pub fn memoized_decisions(&self) -> usize {
        self.memo.len()
    }

    /// Decides planarity, reporting budget exhaustion as indeterminate.
    pub fn verdict(&mut self, graph: &Graph) -> Result<PlanarityVerdict, GravaError> {
        Ok(match self.run(graph)? {
            Some(true) => PlanarityVerdict::Planar,
            Some(false) => PlanarityVerdict::NotPlanar,
            None => PlanarityVerdict::Indeterminate,
        })
    }

    /// Decides planarity as a boolean.
    ///
    /// Fails when a configured budget ran out before a decision; use
    /// [`PlanarityOracle::verdict`] to observe indeterminate outcomes
    /// instead.
    pub fn is_planar(&mut self, graph: &Graph) -> Result<bool, GravaError> {
        match self.run(graph)? {
            Some(decision) => Ok(decision),
            None => Err(GravaError::invalid_argument(
                "budget-exhausted",
                "expansion budget ran out before a planarity decision",
            )),
        }
    }

    fn run(&mut self, graph: &Graph) -> Result<Option<bool>, GravaError> {
        if graph.order() == 0 {
            return Err(GravaError::invalid_argument(
                "empty-graph",
                "planarity is undefined for the empty graph",
            ));
        }
        // Planarity is a property of the underlying undirected structure.
        let undirected = if graph.is_directed() {
            graph.symmetric_closure()?
        } else {
            graph.clone()
        };
        self.check(&undirected)
    }

    /// Memoized planarity of an undirected graph.
    fn check(&mut self, graph: &Graph) -> Result<Option<bool>, GravaError> {
        let key = canonical_hash(graph);
        if let Some(&known) = self.memo.get(&key) {
            return Ok(Some(known));
        }
        if let Some(limit) = self.budget {
            if self.expansions >= limit {
                return Ok(None);
            }
            self.expansions += 1;
        }

        let components = graph.connected_components();
        let decision = if components.len() > 1 {
            let mut all_planar = true;
            for component_keys in components {
                let component = graph.induced_subgraph(&component_keys)?;
                match self.check(&component)? {
                    None => return Ok(None),
                    Some(false) => {
                        all_planar = false;
                        break;
                    }
                    Some(true) => {}
                }
            }
            all_planar
        } else {
            match self.check_component(graph)? {
                None => return Ok(None),
                Some(decision) => decision,
            }
        };

        self.memo.insert(key, decision);
        Ok(Some(decision))
    }

    /// Planarity of a single connected component.
    fn check_component(&mut self, component: &Graph) -> Result<Option<bool>, GravaError> {
        let n = component.order();
        let m = component.simple_edge_count();

        if n < 5 {
            return Ok(Some(true));
        }
        // Euler's bound: a planar graph has at most 3n - 6 simple edges.
        if m > 3 * n - 6 {
            return Ok(Some(false));
        }
        // K5 and larger complete graphs.
        if component.is_complete() {
            return Ok(Some(false));
        }
        // K3,3 and larger complete bipartite graphs.
        if n >= 6 {
            let bipartition = component.bipartition();
            if let Some((part_a, part_b)) = bipartition.partitions() {
                if part_a.len() >= 3 && part_b.len() >= 3 && component.is_complete_bipartite() {
                    return Ok(Some(false));
                }
            }
        }

        // Reduce over one-step minors. A subgraph of a planar graph is
        // planar, so any non-planar reduction decides immediately; the
        // graph counts as planar only when every reduction is.
        let all_keys: BTreeSet<VertexKey> = component.vertex_keys().cloned().collect();
        for removed in &all_keys {
            let mut remaining = all_keys.clone();
            remaining.remove(removed);
            let reduced = component.induced_subgraph(&remaining)?;
            match self.check(&reduced)? {
                None => return Ok(None),
                Some(false) => return Ok(Some(false)),
                Some(true) => {}
            }
        }
        let pairs: Vec<(VertexKey, VertexKey)> = component
            .edges()
            .into_iter()
            .filter(|edge| !edge.is_loop())
            .map(|edge| (edge.source().key().clone(), edge.destination().key().clone()))
            .collect();
        for (source, destination) in pairs {
            let reduced = without_edge(component, &source, &destination)?;
            match self.check(&reduced)? {
                None => return Ok(None),
                Some(false) => return Ok(Some(false)),
                Some(true) => {}
            }
        }
        Ok(Some(true))
    }
}

/// Decides planarity with a fresh, call-scoped memo.
pub fn is_planar(graph: &Graph) -> Result<bool, GravaError> {
    PlanarityOracle::new().is_planar(graph)
}

/// Copies the graph with the edge between the given endpoints removed, in
/// both stored directions.
fn without_edge(
    graph: &Graph,
    source: &VertexKey,
    destination: &VertexKey,
) -> Result<Graph, GravaError> {
    let mut out = Graph::undirected();
    for vertex in graph.vertices() {
        out.add_vertex(vertex)?;
    }
    for edge in graph.edges() {
        let s = edge.source().key();
        let d = edge.destination().key();
        if (s == source && d == destination) || (s == destination && d == source) {
            continue;
        }
        out.add_edge(edge)?;
    }
    Ok(out)
}
