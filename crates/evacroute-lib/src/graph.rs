use std::cmp::Ordering;
use std::collections::HashMap;

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::node::{ExitSpec, Node, NodeIndex, NodeSpec};

/// Similarity floor for "did you mean" suggestions on unknown ids.
const SUGGESTION_MIN_SCORE: f64 = 0.6;

/// Maximum number of suggestions attached to an unknown-id error.
const MAX_SUGGESTIONS: usize = 3;

/// Evacuation graph: owns every node and indexes it by id.
///
/// Nodes are stored densely in registration order; edges live in each node's
/// adjacency map keyed by [`NodeIndex`]. Queries borrow the graph immutably
/// and mutations borrow it mutably, so a search can never observe a
/// half-applied update.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    index_by_id: HashMap<String, NodeIndex>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a regular node.
    pub fn add_node(&mut self, spec: NodeSpec) -> Result<NodeIndex> {
        let index = self.reserve(&spec.id)?;
        self.nodes.push(Node::from_spec(spec, index));
        Ok(index)
    }

    /// Register an exit.
    pub fn add_exit(&mut self, spec: ExitSpec) -> Result<NodeIndex> {
        let index = self.reserve(&spec.node.id)?;
        self.nodes.push(Node::from_exit_spec(spec, index));
        Ok(index)
    }

    fn reserve(&mut self, id: &str) -> Result<NodeIndex> {
        if self.index_by_id.contains_key(id) {
            return Err(Error::DuplicateNode { id: id.to_string() });
        }
        let index = NodeIndex(self.nodes.len());
        self.index_by_id.insert(id.to_string(), index);
        Ok(index)
    }

    /// Add a directed edge `from -> to`. Re-adding replaces the weight.
    pub fn connect_directed(&mut self, from: &str, to: &str, weight: f64) -> Result<()> {
        let from_index = self.resolve(from)?;
        let to_index = self.resolve(to)?;
        check_weight(from, to, weight)?;
        self.nodes[from_index.0].neighbours.insert(to_index, weight);
        Ok(())
    }

    /// Add an edge in both directions with the same weight.
    pub fn connect(&mut self, a: &str, b: &str, weight: f64) -> Result<()> {
        let a_index = self.resolve(a)?;
        let b_index = self.resolve(b)?;
        check_weight(a, b, weight)?;
        self.nodes[a_index.0].neighbours.insert(b_index, weight);
        self.nodes[b_index.0].neighbours.insert(a_index, weight);
        Ok(())
    }

    /// Resolve an id to its index, with suggestions when it is unknown.
    pub fn resolve(&self, id: &str) -> Result<NodeIndex> {
        self.index_by_id
            .get(id)
            .copied()
            .ok_or_else(|| Error::UnknownNode {
                id: id.to_string(),
                suggestions: self.fuzzy_node_matches(id, MAX_SUGGESTIONS),
            })
    }

    /// Registered ids most similar to `id`, best first.
    pub fn fuzzy_node_matches(&self, id: &str, limit: usize) -> Vec<String> {
        let mut scored: Vec<(f64, &str)> = self
            .nodes
            .iter()
            .map(|node| (strsim::jaro_winkler(id, node.id()), node.id()))
            .filter(|(score, _)| *score >= SUGGESTION_MIN_SCORE)
            .collect();
        scored.sort_by(|a, b| compare_score(b.0, a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, id)| id.to_string())
            .collect()
    }

    pub fn node(&self, id: &str) -> Result<&Node> {
        let index = self.resolve(id)?;
        Ok(&self.nodes[index.0])
    }

    pub fn node_mut(&mut self, id: &str) -> Result<&mut Node> {
        let index = self.resolve(id)?;
        Ok(&mut self.nodes[index.0])
    }

    /// Node by index. Panics if the index came from a different graph.
    pub fn node_at(&self, index: NodeIndex) -> &Node {
        &self.nodes[index.0]
    }

    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        self.nodes.get(index.0)
    }

    /// Every node in registration order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.iter_mut()
    }

    /// Every exit in registration order.
    pub fn exits(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|node| node.is_exit())
    }

    /// Exits that are currently passable, in registration order.
    pub fn passable_exits(&self) -> impl Iterator<Item = &Node> {
        self.exits().filter(|node| node.is_passable())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Passability of the node named `id`.
    pub fn is_passable(&self, id: &str) -> Result<bool> {
        Ok(self.node(id)?.is_passable())
    }

    /// Outgoing edges of `index` as `(neighbour, weight)`.
    pub fn neighbours(&self, index: NodeIndex) -> impl Iterator<Item = (NodeIndex, f64)> + '_ {
        self.nodes[index.0].neighbours()
    }

    /// Check that every registered node has at least one neighbour.
    ///
    /// Meant to run once after construction; searches never call it.
    pub fn validate(&self) -> Result<()> {
        if let Some(node) = self.nodes.iter().find(|node| node.neighbour_count() == 0) {
            debug!(node = node.id(), "validation found isolated node");
            return Err(Error::IsolatedNode {
                id: node.id().to_string(),
            });
        }
        info!(nodes = self.nodes.len(), "graph validated successfully");
        Ok(())
    }
}

fn check_weight(from: &str, to: &str, weight: f64) -> Result<()> {
    if weight.is_finite() && weight >= 0.0 {
        return Ok(());
    }
    Err(Error::InvalidEdgeWeight {
        from: from.to_string(),
        to: to.to_string(),
        weight,
    })
}

fn compare_score(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Greater)
}
