//! Ranked loop-free alternatives between two nodes (Yen's algorithm).
//!
//! Each iteration branches off the most recently confirmed path at every
//! node but its last. The branch search hides the edges that confirmed paths
//! with the same prefix already took, and hides the prefix itself so the
//! result stays simple. The cheapest pending candidate is then confirmed.
//!
//! Time complexity: O(K * V * (E + V log V)).

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::node::NodeIndex;
use crate::path::{candidate_from_indices, restricted_search, PathCandidate, SearchExclusions};

/// Up to `k` simple paths from `source` to `target`, cheapest first.
///
/// The first entry equals [`shortest_path`](crate::shortest_path). Fewer
/// than `k` entries are returned when fewer simple paths exist; an
/// unreachable target yields an empty list. Equal-distance candidates are
/// confirmed in the order they were discovered, so results are reproducible
/// for a fixed graph state.
///
/// # Errors
///
/// [`Error::InvalidK`] when `k` is zero, [`Error::UnknownNode`] for
/// unregistered ids.
pub fn k_shortest_paths(
    graph: &Graph,
    source: &str,
    target: &str,
    k: usize,
) -> Result<Vec<PathCandidate>> {
    if k < 1 {
        return Err(Error::InvalidK { k });
    }
    let source = graph.resolve(source)?;
    let target = graph.resolve(target)?;

    let mut confirmed: Vec<PathCandidate> = Vec::with_capacity(k);
    let Some(first) = restricted_search(graph, source, target, &SearchExclusions::default())
        .and_then(|indices| candidate_from_indices(graph, indices))
    else {
        debug!("no path between source and target");
        return Ok(confirmed);
    };
    confirmed.push(first);

    let mut pending = PendingCandidates::default();

    while confirmed.len() < k {
        let previous = confirmed[confirmed.len() - 1].indices().to_vec();

        for spur_index in 0..previous.len() - 1 {
            let spur_node = previous[spur_index];
            let root = &previous[..=spur_index];

            let exclusions = branch_exclusions(&confirmed, root);
            let Some(spur_path) = restricted_search(graph, spur_node, target, &exclusions) else {
                continue;
            };

            let mut total: Vec<NodeIndex> = root.to_vec();
            total.extend_from_slice(&spur_path[1..]);

            if confirmed.iter().any(|path| path.indices() == total.as_slice()) {
                continue;
            }
            if let Some(candidate) = candidate_from_indices(graph, total) {
                pending.insert(candidate);
            }
        }

        trace!(
            confirmed = confirmed.len(),
            pending = pending.len(),
            "yen iteration complete"
        );

        match pending.pop_cheapest() {
            Some(next) => confirmed.push(next),
            None => break,
        }
    }

    debug!(requested = k, found = confirmed.len(), "k shortest paths computed");
    Ok(confirmed)
}

/// Exclusions for a branch search rooted at `root`.
fn branch_exclusions(confirmed: &[PathCandidate], root: &[NodeIndex]) -> SearchExclusions {
    let mut exclusions = SearchExclusions::new();
    let spur_index = root.len() - 1;

    for path in confirmed {
        let nodes = path.indices();
        if nodes.len() > spur_index + 1 && &nodes[..=spur_index] == root {
            exclusions.exclude_edge(nodes[spur_index], nodes[spur_index + 1]);
        }
    }

    for &node in &root[..spur_index] {
        exclusions.exclude_node(node);
    }

    exclusions
}

/// Candidate pool keyed by full node sequence.
#[derive(Debug, Default)]
struct PendingCandidates {
    candidates: Vec<PathCandidate>,
    seen: HashSet<Vec<NodeIndex>>,
}

impl PendingCandidates {
    fn insert(&mut self, candidate: PathCandidate) {
        if self.seen.insert(candidate.indices().to_vec()) {
            self.candidates.push(candidate);
        }
    }

    /// Remove the cheapest candidate; ties go to the earliest inserted.
    fn pop_cheapest(&mut self) -> Option<PathCandidate> {
        let position = self
            .candidates
            .iter()
            .enumerate()
            .min_by(|(ia, a), (ib, b)| a.cmp_by_distance(b).then_with(|| ia.cmp(ib)))
            .map(|(position, _)| position)?;
        let candidate = self.candidates.remove(position);
        self.seen.remove(candidate.indices());
        Some(candidate)
    }

    fn len(&self) -> usize {
        self.candidates.len()
    }
}
