use std::collections::{BTreeMap, BTreeSet, VecDeque};

use grava_core::{EdgeKey, GravaError, Label, VertexKey};

use crate::edge::Edge;
use crate::traversal::{BfsResult, DfsResult};
use crate::vertex::{ensure_weight, Vertex, DEFAULT_WEIGHT};

/// Edge-insertion policy of a [`Graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directedness {
    /// `(u, v)` and `(v, u)` are independent edges.
    Directed,
    /// Every insertion stores both directions; reads report one
    /// representative per symmetric pair.
    Undirected,
}

#[derive(Debug, Clone, PartialEq)]
struct VertexSlot {
    vertex: Vertex,
    outgoing: BTreeMap<VertexKey, Edge>,
}

impl VertexSlot {
    fn new(vertex: Vertex) -> Self {
        Self {
            vertex,
            outgoing: BTreeMap::new(),
        }
    }
}

/// A graph of label-keyed vertices with at most one edge per ordered pair.
///
/// Vertices are owned by the graph and keyed by the canonical serialization
/// of their labels. Adjacency is per-vertex outgoing maps; inserting an edge
/// for an ordered pair that already has one replaces it (last-write-wins).
/// Loops are permitted, parallel edges are not representable.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    directedness: Directedness,
    slots: BTreeMap<VertexKey, VertexSlot>,
}

/// Outcome of the two-coloring check.
///
/// Partitions are exposed only for connected graphs with at least two
/// vertices; the boolean is meaningful for every input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bipartition {
    bipartite: bool,
    parts: Option<(BTreeSet<VertexKey>, BTreeSet<VertexKey>)>,
}

impl Bipartition {
    /// Returns whether the graph admits a two-coloring.
    pub fn is_bipartite(&self) -> bool {
        self.bipartite
    }

    /// Returns the two partitions when they are defined.
    pub fn partitions(&self) -> Option<(&BTreeSet<VertexKey>, &BTreeSet<VertexKey>)> {
        self.parts.as_ref().map(|(a, b)| (a, b))
    }
}

impl Graph {
    /// Creates an empty graph with the provided edge-insertion policy.
    pub fn new(directedness: Directedness) -> Self {
        Self {
            directedness,
            slots: BTreeMap::new(),
        }
    }

    /// Creates an empty directed graph.
    pub fn directed() -> Self {
        Self::new(Directedness::Directed)
    }

    /// Creates an empty undirected graph.
    pub fn undirected() -> Self {
        Self::new(Directedness::Undirected)
    }

    /// Returns whether `(u, v)` and `(v, u)` are independent edges.
    pub fn is_directed(&self) -> bool {
        self.directedness == Directedness::Directed
    }

    /// Returns the number of vertices.
    pub fn order(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of logical edges.
    ///
    /// On an undirected graph a symmetric pair counts once.
    pub fn size(&self) -> usize {
        self.edges().len()
    }

    /// Returns the number of logical non-loop edges.
    pub fn simple_edge_count(&self) -> usize {
        self.edges().iter().filter(|edge| !edge.is_loop()).count()
    }

    /// Creates a vertex from a label and stores it.
    pub fn create_vertex(&mut self, label: Label, weight: f64) -> Result<VertexKey, GravaError> {
        self.insert_vertex(Vertex::new(label, weight)?)
    }

    /// Creates a vertex with the default weight and stores it.
    pub fn create_default_vertex(&mut self, label: Label) -> Result<VertexKey, GravaError> {
        self.create_vertex(label, DEFAULT_WEIGHT)
    }

    /// Stores a clone of the provided vertex.
    ///
    /// The clone keeps caller-held labels from aliasing graph state.
    pub fn add_vertex(&mut self, vertex: &Vertex) -> Result<VertexKey, GravaError> {
        self.insert_vertex(vertex.clone())
    }

    fn insert_vertex(&mut self, vertex: Vertex) -> Result<VertexKey, GravaError> {
        let key = vertex.key().clone();
        if self.slots.contains_key(&key) {
            return Err(GravaError::vertex_duplicated(
                "duplicate-vertex",
                "a vertex with this identity already exists",
            )
            .with_context("vertex", &key));
        }
        self.slots.insert(key.clone(), VertexSlot::new(vertex));
        Ok(key)
    }

    /// Looks up a vertex by anything resolving to its identity key.
    pub fn vertex<K: AsRef<VertexKey>>(&self, key: K) -> Option<&Vertex> {
        self.slots.get(key.as_ref()).map(|slot| &slot.vertex)
    }

    /// Returns whether a vertex with this identity exists.
    pub fn contains_vertex<K: AsRef<VertexKey>>(&self, key: K) -> bool {
        self.slots.contains_key(key.as_ref())
    }

    /// Iterates vertices in sorted key order.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> + '_ {
        self.slots.values().map(|slot| &slot.vertex)
    }

    /// Iterates vertex keys in sorted order.
    pub fn vertex_keys(&self) -> impl Iterator<Item = &VertexKey> + '_ {
        self.slots.keys()
    }

    /// Creates an edge between two existing vertices and stores it.
    ///
    /// Replaces any previous edge for the ordered pair. On an undirected
    /// graph both directions are inserted (or just the loop edge when the
    /// endpoints coincide).
    pub fn create_edge(
        &mut self,
        source: &VertexKey,
        destination: &VertexKey,
        weight: f64,
        label: Option<&str>,
    ) -> Result<Edge, GravaError> {
        let src = self.vertex_required(source)?.clone();
        let dst = self.vertex_required(destination)?.clone();
        let edge = Edge::new(src, dst, weight, label.map(str::to_owned))?;
        self.insert_edge(edge)
    }

    /// Creates an edge with the default weight and no label.
    pub fn connect(
        &mut self,
        source: &VertexKey,
        destination: &VertexKey,
    ) -> Result<Edge, GravaError> {
        self.create_edge(source, destination, DEFAULT_WEIGHT, None)
    }

    /// Stores an edge built elsewhere, rebinding its endpoints to the
    /// graph-owned vertices.
    pub fn add_edge(&mut self, edge: &Edge) -> Result<Edge, GravaError> {
        let src = self.vertex_required(edge.source().key())?.clone();
        let dst = self.vertex_required(edge.destination().key())?.clone();
        let normalized = Edge::new(src, dst, edge.weight(), edge.label().map(str::to_owned))?;
        self.insert_edge(normalized)
    }

    fn insert_edge(&mut self, edge: Edge) -> Result<Edge, GravaError> {
        let source_key = edge.source().key().clone();
        let destination_key = edge.destination().key().clone();
        if self.directedness == Directedness::Undirected && source_key != destination_key {
            let reverse = edge.transpose();
            self.slot_mut(&destination_key)?
                .outgoing
                .insert(source_key.clone(), reverse);
        }
        self.slot_mut(&source_key)?
            .outgoing
            .insert(destination_key, edge.clone());
        Ok(edge)
    }

    /// Looks up the edge stored for the ordered `(source, destination)` pair.
    pub fn edge_between<A: AsRef<VertexKey>, B: AsRef<VertexKey>>(
        &self,
        source: A,
        destination: B,
    ) -> Option<&Edge> {
        self.slots
            .get(source.as_ref())
            .and_then(|slot| slot.outgoing.get(destination.as_ref()))
    }

    /// Looks up an edge by its derived identity key.
    pub fn edge<K: AsRef<EdgeKey>>(&self, key: K) -> Option<&Edge> {
        let key = key.as_ref();
        self.stored_edges().find(|edge| edge.key() == key)
    }

    /// Returns the logical edges in deterministic sorted order.
    ///
    /// On an undirected graph one representative per symmetric pair is
    /// reported, the one whose source key is not greater than its
    /// destination key.
    pub fn edges(&self) -> Vec<&Edge> {
        match self.directedness {
            Directedness::Directed => self.stored_edges().collect(),
            Directedness::Undirected => self
                .stored_edges()
                .filter(|edge| edge.source().key() <= edge.destination().key())
                .collect(),
        }
    }

    /// Iterates the outgoing edges of a vertex in sorted destination order.
    pub fn outgoing_edges<K: AsRef<VertexKey>>(
        &self,
        key: K,
    ) -> Result<impl Iterator<Item = &Edge> + '_, GravaError> {
        Ok(self.slot(key.as_ref())?.outgoing.values())
    }

    /// Returns the outbound degree of a vertex.
    pub fn out_degree<K: AsRef<VertexKey>>(&self, key: K) -> Result<usize, GravaError> {
        Ok(self.slot(key.as_ref())?.outgoing.len())
    }

    /// Returns the inbound degree of a vertex.
    pub fn in_degree<K: AsRef<VertexKey>>(&self, key: K) -> Result<usize, GravaError> {
        let key = key.as_ref();
        self.slot(key)?;
        Ok(self
            .slots
            .values()
            .filter(|slot| slot.outgoing.contains_key(key))
            .count())
    }

    /// Returns the degree of a vertex: neighbour count on an undirected
    /// graph, inbound plus outbound on a directed one.
    pub fn degree<K: AsRef<VertexKey>>(&self, key: K) -> Result<usize, GravaError> {
        let key = key.as_ref();
        match self.directedness {
            Directedness::Undirected => self.out_degree(key),
            Directedness::Directed => Ok(self.out_degree(key)? + self.in_degree(key)?),
        }
    }

    /// Updates a vertex weight, propagating to endpoint snapshots held by
    /// incident edges.
    pub fn set_vertex_weight<K: AsRef<VertexKey>>(
        &mut self,
        key: K,
        weight: f64,
    ) -> Result<(), GravaError> {
        ensure_weight(weight)?;
        let key = key.as_ref();
        let slot = self.slots.get_mut(key).ok_or_else(|| unknown_vertex(key))?;
        slot.vertex.set_weight(weight)?;
        for edge in slot.outgoing.values_mut() {
            edge.set_source_snapshot_weight(weight);
        }
        for slot in self.slots.values_mut() {
            if let Some(edge) = slot.outgoing.get_mut(key) {
                edge.set_destination_snapshot_weight(weight);
            }
        }
        Ok(())
    }

    /// Updates the weight of the edge stored for the ordered pair.
    ///
    /// On an undirected graph both stored directions are updated.
    pub fn set_edge_weight(
        &mut self,
        source: &VertexKey,
        destination: &VertexKey,
        weight: f64,
    ) -> Result<(), GravaError> {
        ensure_weight(weight)?;
        let undirected = self.directedness == Directedness::Undirected;
        let slot = self
            .slots
            .get_mut(source)
            .ok_or_else(|| unknown_vertex(source))?;
        let edge = slot.outgoing.get_mut(destination).ok_or_else(|| {
            GravaError::edge_not_found("unknown-edge", "no edge exists for this ordered pair")
                .with_context("source", source)
                .with_context("destination", destination)
        })?;
        edge.set_weight(weight)?;
        if undirected && source != destination {
            if let Some(slot) = self.slots.get_mut(destination) {
                if let Some(reverse) = slot.outgoing.get_mut(source) {
                    reverse.set_weight(weight)?;
                }
            }
        }
        Ok(())
    }

    /// Returns a new graph with every edge reversed.
    ///
    /// The identity transform for undirected graphs.
    pub fn transpose(&self) -> Graph {
        if self.directedness == Directedness::Undirected {
            return self.clone();
        }
        let mut out = self.vertices_only_copy(Directedness::Directed);
        for edge in self.stored_edges() {
            let reversed = edge.transpose();
            if let Some(slot) = out.slots.get_mut(reversed.source().key()) {
                slot.outgoing
                    .insert(reversed.destination().key().clone(), reversed);
            }
        }
        out
    }

    /// Returns the undirected graph merging each opposite-direction pair
    /// into one edge whose weight is the sum of the directions present.
    ///
    /// Edge labels are deliberately dropped: the two directions may carry
    /// conflicting labels, and downstream consumers depend on the weight-sum
    /// semantics only. The closure of an undirected graph is an equal clone.
    pub fn symmetric_closure(&self) -> Result<Graph, GravaError> {
        if self.directedness == Directedness::Undirected {
            return Ok(self.clone());
        }
        let mut out = self.vertices_only_copy(Directedness::Undirected);
        let mut seen: BTreeSet<(VertexKey, VertexKey)> = BTreeSet::new();
        for edge in self.stored_edges() {
            let (low, high) = ordered_pair(edge.source().key(), edge.destination().key());
            if !seen.insert((low.clone(), high.clone())) {
                continue;
            }
            let forward = self.edge_between(&low, &high).map(Edge::weight).unwrap_or(0.0);
            let backward = if low == high {
                0.0
            } else {
                self.edge_between(&high, &low).map(Edge::weight).unwrap_or(0.0)
            };
            out.create_edge(&low, &high, forward + backward, None)?;
        }
        Ok(out)
    }

    /// Returns the subgraph induced by the provided vertex set.
    pub fn induced_subgraph(&self, keys: &BTreeSet<VertexKey>) -> Result<Graph, GravaError> {
        if keys.is_empty() {
            return Err(GravaError::invalid_argument(
                "empty-vertex-set",
                "induced subgraphs require at least one vertex",
            ));
        }
        for key in keys {
            if !self.slots.contains_key(key) {
                return Err(unknown_vertex(key));
            }
        }
        let mut out = Graph::new(self.directedness);
        for key in keys {
            if let Some(slot) = self.slots.get(key) {
                let outgoing = slot
                    .outgoing
                    .iter()
                    .filter(|(destination, _)| keys.contains(*destination))
                    .map(|(destination, edge)| (destination.clone(), edge.clone()))
                    .collect();
                out.slots.insert(
                    key.clone(),
                    VertexSlot {
                        vertex: slot.vertex.clone(),
                        outgoing,
                    },
                );
            }
        }
        Ok(out)
    }

    /// Runs a breadth-first traversal from the given start vertex.
    pub fn bfs<K: AsRef<VertexKey>>(&self, start: K) -> Result<BfsResult, GravaError> {
        let start = start.as_ref();
        self.slot(start)?;
        let mut distances: BTreeMap<VertexKey, u64> = BTreeMap::new();
        let mut predecessors: BTreeMap<VertexKey, VertexKey> = BTreeMap::new();
        let mut queue: VecDeque<VertexKey> = VecDeque::new();
        distances.insert(start.clone(), 0);
        queue.push_back(start.clone());
        while let Some(current) = queue.pop_front() {
            let distance = distances[&current];
            if let Some(slot) = self.slots.get(&current) {
                for neighbour in slot.outgoing.keys() {
                    if !distances.contains_key(neighbour) {
                        distances.insert(neighbour.clone(), distance + 1);
                        predecessors.insert(neighbour.clone(), current.clone());
                        queue.push_back(neighbour.clone());
                    }
                }
            }
        }
        Ok(BfsResult::new(start.clone(), distances, predecessors))
    }

    /// Runs a full-forest depth-first traversal over all vertices.
    ///
    /// Roots are taken in sorted key order, so the traversal is
    /// deterministic for a given graph.
    pub fn dfs(&self) -> DfsResult {
        let mut state = DfsState::default();
        let keys: Vec<VertexKey> = self.slots.keys().cloned().collect();
        for key in &keys {
            if !state.discovery.contains_key(key) {
                self.dfs_visit(key, None, &mut state);
            }
        }
        DfsResult::new(
            state.discovery,
            state.finish,
            state.predecessors,
            state.finish_order,
            !state.cyclic,
        )
    }

    fn dfs_visit(&self, node: &VertexKey, parent: Option<&VertexKey>, state: &mut DfsState) {
        state.discovery.insert(node.clone(), state.time);
        state.time += 1;
        if let Some(slot) = self.slots.get(node) {
            for neighbour in slot.outgoing.keys() {
                if neighbour == node {
                    // A loop edge is always a cycle.
                    state.cyclic = true;
                    continue;
                }
                if self.directedness == Directedness::Undirected && Some(neighbour) == parent {
                    // The reverse traversal of the tree edge, not a cycle.
                    continue;
                }
                if !state.discovery.contains_key(neighbour) {
                    state.predecessors.insert(neighbour.clone(), node.clone());
                    self.dfs_visit(neighbour, Some(node), state);
                } else if !state.finish.contains_key(neighbour) {
                    state.cyclic = true;
                }
            }
        }
        state.finish.insert(node.clone(), state.time);
        state.time += 1;
        state.finish_order.push(node.clone());
    }

    /// Returns the weakly connected components as sorted vertex sets.
    pub fn connected_components(&self) -> Vec<BTreeSet<VertexKey>> {
        let adjacency = self.undirected_adjacency();
        let mut visited: BTreeSet<VertexKey> = BTreeSet::new();
        let mut components = Vec::new();
        for key in self.slots.keys() {
            if visited.contains(key) {
                continue;
            }
            let mut component = BTreeSet::new();
            let mut queue = VecDeque::from([key.clone()]);
            visited.insert(key.clone());
            while let Some(current) = queue.pop_front() {
                component.insert(current.clone());
                if let Some(neighbours) = adjacency.get(&current) {
                    for neighbour in neighbours {
                        if visited.insert(neighbour.clone()) {
                            queue.push_back(neighbour.clone());
                        }
                    }
                }
            }
            components.push(component);
        }
        components
    }

    /// Returns the strongly connected components.
    ///
    /// Kosaraju's algorithm: a first DFS pass over the transpose yields a
    /// finishing order; a second pass over this graph in reverse finishing
    /// order collects one component per tree. Undirected graphs reduce to
    /// plain connectivity.
    pub fn strongly_connected_components(&self) -> Vec<BTreeSet<VertexKey>> {
        if self.directedness == Directedness::Undirected {
            return self.connected_components();
        }
        let order = self.transpose().dfs().finish_order().to_vec();
        let mut visited: BTreeSet<VertexKey> = BTreeSet::new();
        let mut components = Vec::new();
        for root in order.iter().rev() {
            if visited.contains(root) {
                continue;
            }
            let mut component = BTreeSet::new();
            let mut stack = vec![root.clone()];
            visited.insert(root.clone());
            while let Some(current) = stack.pop() {
                component.insert(current.clone());
                if let Some(slot) = self.slots.get(&current) {
                    for neighbour in slot.outgoing.keys() {
                        if visited.insert(neighbour.clone()) {
                            stack.push(neighbour.clone());
                        }
                    }
                }
            }
            components.push(component);
        }
        components
    }

    /// Returns a topological ordering, or `None` when the graph is cyclic.
    pub fn topological_ordering(&self) -> Option<Vec<VertexKey>> {
        self.dfs().topological_order()
    }

    /// Returns whether the graph is weakly connected.
    pub fn is_connected(&self) -> bool {
        self.connected_components().len() <= 1
    }

    /// Returns whether every vertex reaches every other vertex.
    pub fn is_strongly_connected(&self) -> bool {
        self.strongly_connected_components().len() <= 1
    }

    /// Returns whether the graph contains no cycle.
    pub fn is_acyclic(&self) -> bool {
        self.dfs().is_acyclic()
    }

    /// Runs the two-coloring check.
    ///
    /// Directed graphs are evaluated on their symmetric structure. The
    /// coloring spans all components; partitions are exposed only for
    /// connected graphs with at least two vertices.
    pub fn bipartition(&self) -> Bipartition {
        let adjacency = self.undirected_adjacency();
        let mut colors: BTreeMap<VertexKey, bool> = BTreeMap::new();
        let mut bipartite = true;
        for key in self.slots.keys() {
            if adjacency
                .get(key)
                .map(|neighbours| neighbours.contains(key))
                .unwrap_or(false)
            {
                bipartite = false;
            }
        }
        for root in self.slots.keys() {
            if colors.contains_key(root) {
                continue;
            }
            colors.insert(root.clone(), false);
            let mut queue = VecDeque::from([root.clone()]);
            while let Some(current) = queue.pop_front() {
                let color = colors[&current];
                if let Some(neighbours) = adjacency.get(&current) {
                    for neighbour in neighbours {
                        if neighbour == &current {
                            continue;
                        }
                        match colors.get(neighbour) {
                            None => {
                                colors.insert(neighbour.clone(), !color);
                                queue.push_back(neighbour.clone());
                            }
                            Some(existing) if *existing == color => bipartite = false,
                            Some(_) => {}
                        }
                    }
                }
            }
        }
        let parts = if bipartite && self.order() >= 2 && self.connected_components().len() == 1 {
            let mut part_a = BTreeSet::new();
            let mut part_b = BTreeSet::new();
            for (key, color) in &colors {
                if *color {
                    part_b.insert(key.clone());
                } else {
                    part_a.insert(key.clone());
                }
            }
            Some((part_a, part_b))
        } else {
            None
        };
        Bipartition { bipartite, parts }
    }

    /// Returns whether the two-coloring check succeeds.
    pub fn is_bipartite(&self) -> bool {
        self.bipartition().is_bipartite()
    }

    /// Returns whether every ordered (directed) or unordered (undirected)
    /// pair of distinct vertices is connected by an edge.
    pub fn is_complete(&self) -> bool {
        let n = self.order();
        let expected = match self.directedness {
            Directedness::Directed => n * n.saturating_sub(1),
            Directedness::Undirected => n * n.saturating_sub(1) / 2,
        };
        self.simple_edge_count() == expected
    }

    /// Returns whether the graph is a complete bipartite graph.
    pub fn is_complete_bipartite(&self) -> bool {
        let bipartition = self.bipartition();
        let Some((part_a, part_b)) = bipartition.partitions() else {
            return false;
        };
        let expected = match self.directedness {
            Directedness::Directed => 2 * part_a.len() * part_b.len(),
            Directedness::Undirected => part_a.len() * part_b.len(),
        };
        self.simple_edge_count() == expected
    }

    fn undirected_adjacency(&self) -> BTreeMap<VertexKey, BTreeSet<VertexKey>> {
        let mut adjacency: BTreeMap<VertexKey, BTreeSet<VertexKey>> = BTreeMap::new();
        for key in self.slots.keys() {
            adjacency.entry(key.clone()).or_default();
        }
        for (key, slot) in &self.slots {
            for destination in slot.outgoing.keys() {
                adjacency
                    .entry(key.clone())
                    .or_default()
                    .insert(destination.clone());
                adjacency
                    .entry(destination.clone())
                    .or_default()
                    .insert(key.clone());
            }
        }
        adjacency
    }

    fn vertices_only_copy(&self, directedness: Directedness) -> Graph {
        let slots = self
            .slots
            .iter()
            .map(|(key, slot)| (key.clone(), VertexSlot::new(slot.vertex.clone())))
            .collect();
        Graph {
            directedness,
            slots,
        }
    }

    fn stored_edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.slots.values().flat_map(|slot| slot.outgoing.values())
    }

    fn slot(&self, key: &VertexKey) -> Result<&VertexSlot, GravaError> {
        self.slots.get(key).ok_or_else(|| unknown_vertex(key))
    }

    fn slot_mut(&mut self, key: &VertexKey) -> Result<&mut VertexSlot, GravaError> {
        self.slots.get_mut(key).ok_or_else(|| unknown_vertex(key))
    }

    fn vertex_required(&self, key: &VertexKey) -> Result<&Vertex, GravaError> {
        Ok(&self.slot(key)?.vertex)
    }
}

#[derive(Default)]
struct DfsState {
    time: usize,
    discovery: BTreeMap<VertexKey, usize>,
    finish: BTreeMap<VertexKey, usize>,
    predecessors: BTreeMap<VertexKey, VertexKey>,
    finish_order: Vec<VertexKey>,
    cyclic: bool,
}

fn ordered_pair(a: &VertexKey, b: &VertexKey) -> (VertexKey, VertexKey) {
    if a <= b {
        (a.clone(), b.clone())
    } else {
        (b.clone(), a.clone())
    }
}

fn unknown_vertex(key: &VertexKey) -> GravaError {
    GravaError::vertex_not_found("unknown-vertex", "vertex does not exist")
        .with_context("vertex", key)
}
