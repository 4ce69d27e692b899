//! Immutable traversal results with lazily derived queries.

use std::collections::BTreeMap;

use grava_core::VertexKey;

/// Frozen outcome of a breadth-first traversal.
///
/// Records the hop distance and predecessor link for every vertex reached
/// from the start; unreachable vertices appear in neither map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BfsResult {
    start: VertexKey,
    distances: BTreeMap<VertexKey, u64>,
    predecessors: BTreeMap<VertexKey, VertexKey>,
}

impl BfsResult {
    pub(crate) fn new(
        start: VertexKey,
        distances: BTreeMap<VertexKey, u64>,
        predecessors: BTreeMap<VertexKey, VertexKey>,
    ) -> Self {
        Self {
            start,
            distances,
            predecessors,
        }
    }

    /// Returns the traversal's start vertex.
    pub fn start(&self) -> &VertexKey {
        &self.start
    }

    /// Returns the hop distance to a vertex, if it was reached.
    pub fn distance<K: AsRef<VertexKey>>(&self, key: K) -> Option<u64> {
        self.distances.get(key.as_ref()).copied()
    }

    /// Returns the predecessor on the shortest hop path, if any.
    pub fn predecessor<K: AsRef<VertexKey>>(&self, key: K) -> Option<&VertexKey> {
        self.predecessors.get(key.as_ref())
    }

    /// Returns whether the traversal reached the vertex.
    pub fn reached<K: AsRef<VertexKey>>(&self, key: K) -> bool {
        self.distances.contains_key(key.as_ref())
    }

    /// Reconstructs the start-to-target path from the predecessor links.
    ///
    /// Empty when the target was not reached.
    pub fn path_to<K: AsRef<VertexKey>>(&self, target: K) -> Vec<VertexKey> {
        let target = target.as_ref();
        if !self.distances.contains_key(target) {
            return Vec::new();
        }
        let mut path = vec![target.clone()];
        let mut current = target;
        while let Some(previous) = self.predecessors.get(current) {
            path.push(previous.clone());
            current = previous;
        }
        path.reverse();
        path
    }
}

/// Frozen outcome of a full-forest depth-first traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DfsResult {
    discovery: BTreeMap<VertexKey, usize>,
    finish: BTreeMap<VertexKey, usize>,
    predecessors: BTreeMap<VertexKey, VertexKey>,
    finish_order: Vec<VertexKey>,
    acyclic: bool,
}

impl DfsResult {
    pub(crate) fn new(
        discovery: BTreeMap<VertexKey, usize>,
        finish: BTreeMap<VertexKey, usize>,
        predecessors: BTreeMap<VertexKey, VertexKey>,
        finish_order: Vec<VertexKey>,
        acyclic: bool,
    ) -> Self {
        Self {
            discovery,
            finish,
            predecessors,
            finish_order,
            acyclic,
        }
    }

    /// Returns the discovery timestamp of a vertex.
    pub fn discovery_time<K: AsRef<VertexKey>>(&self, key: K) -> Option<usize> {
        self.discovery.get(key.as_ref()).copied()
    }

    /// Returns the finishing timestamp of a vertex.
    pub fn finish_time<K: AsRef<VertexKey>>(&self, key: K) -> Option<usize> {
        self.finish.get(key.as_ref()).copied()
    }

    /// Returns the DFS-tree predecessor of a vertex, if any.
    pub fn predecessor<K: AsRef<VertexKey>>(&self, key: K) -> Option<&VertexKey> {
        self.predecessors.get(key.as_ref())
    }

    /// Returns whether no cycle was seen during the traversal.
    pub fn is_acyclic(&self) -> bool {
        self.acyclic
    }

    /// Returns the vertices in finishing order.
    pub fn finish_order(&self) -> &[VertexKey] {
        &self.finish_order
    }

    /// Derives a topological ordering from the finishing times.
    ///
    /// `None` when a cycle was seen; otherwise the reversed finishing order,
    /// in which every edge `(u, v)` has `u` strictly before `v`.
    pub fn topological_order(&self) -> Option<Vec<VertexKey>> {
        self.acyclic
            .then(|| self.finish_order.iter().rev().cloned().collect())
    }
}
