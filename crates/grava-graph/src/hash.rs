use sha2::{Digest, Sha256};

use crate::graph::Graph;

/// Computes the canonical structural hash for the provided graph.
///
/// The hash covers the directedness tag, the sorted vertex keys and the
/// sorted logical edge keys. Weights and labels are excluded: the hash
/// identifies graph STRUCTURE, so it stays stable under weight edits and is
/// usable as a memoization key for structure-only algorithms.
pub fn canonical_hash(graph: &Graph) -> String {
    let mut hasher = Sha256::new();
    if graph.is_directed() {
        hasher.update(b"directed");
    } else {
        hasher.update(b"undirected");
    }

    let vertex_keys: Vec<_> = graph.vertex_keys().collect();
    hasher.update((vertex_keys.len() as u64).to_le_bytes());
    for key in vertex_keys {
        update_str(key.as_str(), &mut hasher);
    }

    let edges = graph.edges();
    hasher.update((edges.len() as u64).to_le_bytes());
    for edge in edges {
        update_str(edge.key().as_str(), &mut hasher);
    }

    format!("{:x}", hasher.finalize())
}

fn update_str(value: &str, hasher: &mut Sha256) {
    hasher.update((value.len() as u64).to_le_bytes());
    hasher.update(value.as_bytes());
}
