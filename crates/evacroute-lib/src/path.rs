use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};
use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::graph::Graph;
use crate::node::{Node, NodeId, NodeIndex};

/// A complete path from a source to a target.
///
/// The distance is the literal sum of the edge weights along `nodes`.
/// Candidates order by distance only; see [`PathCandidate::cmp_by_distance`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathCandidate {
    distance: f64,
    nodes: Vec<NodeId>,
    #[serde(skip)]
    indices: Vec<NodeIndex>,
}

impl PathCandidate {
    pub(crate) fn from_indices(graph: &Graph, indices: Vec<NodeIndex>, distance: f64) -> Self {
        let nodes = indices
            .iter()
            .map(|&index| graph.node_at(index).id().to_string())
            .collect();
        Self {
            distance,
            nodes,
            indices,
        }
    }

    /// Sum of edge weights from source to target.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Node ids from source to target, both inclusive.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Node indices matching [`PathCandidate::nodes`].
    pub fn indices(&self) -> &[NodeIndex] {
        &self.indices
    }

    pub fn source(&self) -> &str {
        self.nodes.first().map(String::as_str).unwrap_or_default()
    }

    pub fn target(&self) -> &str {
        self.nodes.last().map(String::as_str).unwrap_or_default()
    }

    /// Number of edges traversed.
    pub fn hop_count(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    /// Total order by distance. Equal distances compare equal, so stable
    /// sorts keep discovery order for ties.
    pub fn cmp_by_distance(&self, other: &Self) -> Ordering {
        self.distance.total_cmp(&other.distance)
    }
}

impl fmt::Display for PathCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}  [ {} ]", self.distance, self.nodes.join(" -> "))
    }
}

/// Edges and nodes hidden from a single restricted search.
///
/// The graph itself is never modified; the search consults these sets while
/// relaxing edges.
#[derive(Debug, Clone, Default)]
pub struct SearchExclusions {
    edges: HashSet<(NodeIndex, NodeIndex)>,
    nodes: HashSet<NodeIndex>,
}

impl SearchExclusions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hide the directed edge `from -> to`.
    pub fn exclude_edge(&mut self, from: NodeIndex, to: NodeIndex) {
        self.edges.insert((from, to));
    }

    /// Hide `node` as a relaxation target.
    pub fn exclude_node(&mut self, node: NodeIndex) {
        self.nodes.insert(node);
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty() && self.nodes.is_empty()
    }

    fn allows(&self, from: NodeIndex, to: NodeIndex) -> bool {
        !self.nodes.contains(&to) && !self.edges.contains(&(from, to))
    }
}

/// Lowest-weight path from `source` to `target` through passable nodes.
///
/// The target is always eligible as the final node even when it is
/// impassable, so callers can tell a blocked exit from an unreachable one.
/// Returns `Ok(None)` when no path exists.
pub fn shortest_path(graph: &Graph, source: &str, target: &str) -> Result<Option<PathCandidate>> {
    shortest_path_excluding(graph, source, target, &SearchExclusions::default())
}

/// [`shortest_path`] with additional edges and nodes hidden.
pub fn shortest_path_excluding(
    graph: &Graph,
    source: &str,
    target: &str,
    exclusions: &SearchExclusions,
) -> Result<Option<PathCandidate>> {
    let source = graph.resolve(source)?;
    let target = graph.resolve(target)?;
    Ok(restricted_search(graph, source, target, exclusions)
        .and_then(|indices| candidate_from_indices(graph, indices)))
}

/// Closest exit that is currently passable, reached through passable nodes.
///
/// Unlike [`shortest_path`], impassable exits are never returned. The source
/// itself counts when it is a passable exit.
pub fn nearest_exit<'g>(graph: &'g Graph, source: &str) -> Result<Option<&'g Node>> {
    let source = graph.resolve(source)?;

    let mut distances = vec![f64::INFINITY; graph.len()];
    let mut queue = BinaryHeap::new();
    distances[source.0] = 0.0;
    queue.push(QueueEntry::new(source, 0.0));

    while let Some(entry) = queue.pop() {
        let current_distance = distances[entry.node.0];
        if entry.cost.0 > current_distance {
            continue;
        }

        let node = graph.node_at(entry.node);
        if node.is_exit() && node.is_passable() {
            debug!(
                exit = node.id(),
                distance = current_distance,
                "nearest passable exit found"
            );
            return Ok(Some(node));
        }

        for (next, weight) in node.neighbours() {
            if !graph.node_at(next).is_passable() {
                continue;
            }
            let next_cost = current_distance + weight;
            if next_cost < distances[next.0] {
                distances[next.0] = next_cost;
                queue.push(QueueEntry::new(next, next_cost));
            }
        }
    }

    debug!(source = graph.node_at(source).id(), "no passable exit reachable");
    Ok(None)
}

/// Dijkstra over passable nodes honouring `exclusions`.
///
/// Returns the node sequence from `source` to `target`, or `None`.
pub(crate) fn restricted_search(
    graph: &Graph,
    source: NodeIndex,
    target: NodeIndex,
    exclusions: &SearchExclusions,
) -> Option<Vec<NodeIndex>> {
    if source == target {
        return Some(vec![source]);
    }

    let mut distances = vec![f64::INFINITY; graph.len()];
    let mut parents: Vec<Option<NodeIndex>> = vec![None; graph.len()];
    let mut queue = BinaryHeap::new();
    let mut expanded = 0usize;

    distances[source.0] = 0.0;
    queue.push(QueueEntry::new(source, 0.0));

    while let Some(entry) = queue.pop() {
        let current_distance = distances[entry.node.0];
        if entry.cost.0 > current_distance {
            continue;
        }

        if entry.node == target {
            debug!(expanded, distance = current_distance, "restricted search reached target");
            return Some(reconstruct_path(&parents, source, target));
        }
        expanded += 1;

        for (next, weight) in graph.neighbours(entry.node) {
            if !exclusions.allows(entry.node, next) {
                continue;
            }
            if next != target && !graph.node_at(next).is_passable() {
                continue;
            }

            let next_cost = current_distance + weight;
            if next_cost < distances[next.0] {
                distances[next.0] = next_cost;
                parents[next.0] = Some(entry.node);
                queue.push(QueueEntry::new(next, next_cost));
            }
        }
    }

    debug!(expanded, "restricted search exhausted frontier");
    None
}

/// Sum of edge weights along `path`, or `None` if a hop has no edge.
pub(crate) fn path_distance(graph: &Graph, path: &[NodeIndex]) -> Option<f64> {
    path.windows(2).try_fold(0.0, |total, pair| {
        graph
            .node_at(pair[0])
            .edge_weight(pair[1])
            .map(|weight| total + weight)
    })
}

pub(crate) fn candidate_from_indices(
    graph: &Graph,
    indices: Vec<NodeIndex>,
) -> Option<PathCandidate> {
    let distance = path_distance(graph, &indices)?;
    Some(PathCandidate::from_indices(graph, indices, distance))
}

fn reconstruct_path(
    parents: &[Option<NodeIndex>],
    source: NodeIndex,
    target: NodeIndex,
) -> Vec<NodeIndex> {
    let mut path = Vec::new();
    let mut current = Some(target);
    while let Some(node) = current {
        path.push(node);
        if node == source {
            break;
        }
        current = parents[node.0];
    }
    path.reverse();
    path
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    node: NodeIndex,
    cost: FloatOrd,
}

impl QueueEntry {
    fn new(node: NodeIndex, cost: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{ExitSpec, NodeSpec};

    /// A-B(5), A-C(3), B-D(4), C-D(2), D-E(7).
    fn diamond() -> Graph {
        let mut graph = Graph::new();
        for id in ["A", "B", "C", "D", "E"] {
            graph.add_node(NodeSpec::new(id, 0, 20.0, 0.0)).unwrap();
        }
        graph.connect("A", "B", 5.0).unwrap();
        graph.connect("A", "C", 3.0).unwrap();
        graph.connect("B", "D", 4.0).unwrap();
        graph.connect("C", "D", 2.0).unwrap();
        graph.connect("D", "E", 7.0).unwrap();
        graph
    }

    #[test]
    fn finds_lowest_weight_path() {
        let graph = diamond();
        let path = shortest_path(&graph, "A", "E").unwrap().unwrap();
        assert_eq!(path.nodes(), ["A", "C", "D", "E"]);
        assert_eq!(path.distance(), 12.0);
        assert_eq!(path.hop_count(), 3);
    }

    #[test]
    fn source_equals_target() {
        let graph = diamond();
        let path = shortest_path(&graph, "A", "A").unwrap().unwrap();
        assert_eq!(path.nodes(), ["A"]);
        assert_eq!(path.distance(), 0.0);
    }

    #[test]
    fn impassable_intermediate_forces_detour() {
        let mut graph = diamond();
        graph.node_mut("C").unwrap().set_temperature(95.0);
        let path = shortest_path(&graph, "A", "E").unwrap().unwrap();
        assert_eq!(path.nodes(), ["A", "B", "D", "E"]);
        assert_eq!(path.distance(), 16.0);
    }

    #[test]
    fn impassable_target_is_still_reachable() {
        let mut graph = diamond();
        graph.node_mut("E").unwrap().set_passable(false);
        let path = shortest_path(&graph, "A", "E").unwrap().unwrap();
        assert_eq!(path.target(), "E");
    }

    #[test]
    fn unreachable_target_is_none() {
        let mut graph = diamond();
        graph.node_mut("D").unwrap().set_passable(false);
        assert!(shortest_path(&graph, "A", "E").unwrap().is_none());
    }

    #[test]
    fn exclusions_hide_edges_and_nodes() {
        let graph = diamond();
        let a = graph.resolve("A").unwrap();
        let b = graph.resolve("B").unwrap();
        let c = graph.resolve("C").unwrap();

        let mut exclusions = SearchExclusions::new();
        exclusions.exclude_edge(a, c);
        let path = shortest_path_excluding(&graph, "A", "D", &exclusions)
            .unwrap()
            .unwrap();
        assert_eq!(path.nodes(), ["A", "B", "D"]);

        exclusions.exclude_node(b);
        assert!(shortest_path_excluding(&graph, "A", "D", &exclusions)
            .unwrap()
            .is_none());
    }

    #[test]
    fn path_distance_is_literal_sum() {
        let graph = diamond();
        let indices: Vec<_> = ["A", "B", "D", "C"]
            .iter()
            .map(|id| graph.resolve(id).unwrap())
            .collect();
        assert_eq!(path_distance(&graph, &indices), Some(11.0));

        let broken = [indices[0], indices[3], indices[1]];
        assert_eq!(path_distance(&graph, &broken), None);
    }

    #[test]
    fn nearest_exit_skips_blocked_exits() {
        let mut graph = diamond();
        graph
            .add_exit(ExitSpec::new("X1", "Near Gate", 0, 20.0, 0.0).blocked())
            .unwrap();
        graph
            .add_exit(ExitSpec::new("X2", "Far Gate", 0, 20.0, 0.0))
            .unwrap();
        graph.connect("A", "X1", 1.0).unwrap();
        graph.connect("E", "X2", 1.0).unwrap();

        let exit = nearest_exit(&graph, "A").unwrap().unwrap();
        assert_eq!(exit.id(), "X2");
        assert_eq!(exit.exit_name(), Some("Far Gate"));

        graph.node_mut("X1").unwrap().clear_override();
        let exit = nearest_exit(&graph, "A").unwrap().unwrap();
        assert_eq!(exit.id(), "X1");
    }

    #[test]
    fn nearest_exit_from_passable_exit_is_itself() {
        let mut graph = diamond();
        graph
            .add_exit(ExitSpec::new("X", "Gate", 0, 20.0, 0.0))
            .unwrap();
        graph.connect("X", "A", 1.0).unwrap();
        assert_eq!(nearest_exit(&graph, "X").unwrap().unwrap().id(), "X");
    }

    #[test]
    fn nearest_exit_none_without_passable_exit() {
        let graph = diamond();
        assert!(nearest_exit(&graph, "A").unwrap().is_none());
    }

    #[test]
    fn display_lists_path() {
        let graph = diamond();
        let path = shortest_path(&graph, "A", "E").unwrap().unwrap();
        assert_eq!(path.to_string(), "12.0  [ A -> C -> D -> E ]");
    }
}
