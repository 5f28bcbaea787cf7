//! Graph vertices and the passability rule.
//!
//! A [`Node`] is a physical location (room, corridor junction, stair landing)
//! carrying live environmental readings. Whether a node can be walked through
//! is re-derived from those readings on every call unless an explicit
//! override is installed. Exits are ordinary nodes tagged with [`ExitInfo`].

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// External identifier for a node (for example `"0A"`).
pub type NodeId = String;

/// Dense index assigned to a node when it is registered with a
/// [`Graph`](crate::Graph). Adjacency and search state are keyed by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct NodeIndex(pub(crate) usize);

impl NodeIndex {
    /// Position of the node inside its graph's registry.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Default temperature limit in degrees Celsius.
pub const DEFAULT_TEMPERATURE_THRESHOLD: f64 = 60.0;

/// Default gas concentration limit.
pub const DEFAULT_GAS_CONCENTRATION_THRESHOLD: f64 = 0.5;

/// Environmental limits above which a node stops being passable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub temperature: f64,
    pub gas_concentration: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE_THRESHOLD,
            gas_concentration: DEFAULT_GAS_CONCENTRATION_THRESHOLD,
        }
    }
}

impl Thresholds {
    /// Both readings must be at or below their limit.
    pub fn admits(&self, temperature: f64, gas_concentration: f64) -> bool {
        temperature <= self.temperature && gas_concentration <= self.gas_concentration
    }
}

/// Metadata that turns a node into an exit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExitInfo {
    pub name: String,
}

/// Where a passability verdict came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PassabilitySource {
    Override,
    Threshold,
}

impl PassabilitySource {
    pub fn label(self) -> &'static str {
        match self {
            PassabilitySource::Override => "override",
            PassabilitySource::Threshold => "threshold",
        }
    }
}

/// Passability verdict together with its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Passability {
    pub passable: bool,
    pub source: PassabilitySource,
}

/// Construction parameters for a regular node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSpec {
    pub id: NodeId,
    pub floor: i32,
    pub temperature: f64,
    pub gas_concentration: f64,
    pub thresholds: Thresholds,
}

impl NodeSpec {
    /// Node using the default thresholds.
    pub fn new(id: impl Into<NodeId>, floor: i32, temperature: f64, gas_concentration: f64) -> Self {
        Self {
            id: id.into(),
            floor,
            temperature,
            gas_concentration,
            thresholds: Thresholds::default(),
        }
    }

    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }
}

/// Construction parameters for an exit.
#[derive(Debug, Clone, PartialEq)]
pub struct ExitSpec {
    pub node: NodeSpec,
    pub name: String,
    /// Install a `Some(false)` override at construction.
    pub blocked: bool,
}

impl ExitSpec {
    pub fn new(
        id: impl Into<NodeId>,
        name: impl Into<String>,
        floor: i32,
        temperature: f64,
        gas_concentration: f64,
    ) -> Self {
        Self {
            node: NodeSpec::new(id, floor, temperature, gas_concentration),
            name: name.into(),
            blocked: false,
        }
    }

    /// Mark the exit impassable regardless of its readings.
    pub fn blocked(mut self) -> Self {
        self.blocked = true;
        self
    }

    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.node.thresholds = thresholds;
        self
    }
}

/// A vertex of the evacuation graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: NodeId,
    index: NodeIndex,
    floor: i32,
    temperature: f64,
    gas_concentration: f64,
    thresholds: Thresholds,
    passable_override: Option<bool>,
    exit: Option<ExitInfo>,
    pub(crate) neighbours: BTreeMap<NodeIndex, f64>,
}

impl Node {
    pub(crate) fn from_spec(spec: NodeSpec, index: NodeIndex) -> Self {
        Self {
            id: spec.id,
            index,
            floor: spec.floor,
            temperature: spec.temperature,
            gas_concentration: spec.gas_concentration,
            thresholds: spec.thresholds,
            passable_override: None,
            exit: None,
            neighbours: BTreeMap::new(),
        }
    }

    pub(crate) fn from_exit_spec(spec: ExitSpec, index: NodeIndex) -> Self {
        let mut node = Self::from_spec(spec.node, index);
        node.exit = Some(ExitInfo { name: spec.name });
        if spec.blocked {
            node.set_passable(false);
        }
        node
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn index(&self) -> NodeIndex {
        self.index
    }

    pub fn floor(&self) -> i32 {
        self.floor
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn set_temperature(&mut self, value: f64) {
        self.temperature = value;
    }

    pub fn gas_concentration(&self) -> f64 {
        self.gas_concentration
    }

    pub fn set_gas_concentration(&mut self, value: f64) {
        self.gas_concentration = value;
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    pub fn set_thresholds(&mut self, thresholds: Thresholds) {
        self.thresholds = thresholds;
    }

    pub fn set_temperature_threshold(&mut self, value: f64) {
        self.thresholds.temperature = value;
    }

    pub fn set_gas_concentration_threshold(&mut self, value: f64) {
        self.thresholds.gas_concentration = value;
    }

    /// Exit metadata, if this node is an exit.
    pub fn exit(&self) -> Option<&ExitInfo> {
        self.exit.as_ref()
    }

    pub fn is_exit(&self) -> bool {
        self.exit.is_some()
    }

    /// Human-readable exit label.
    pub fn exit_name(&self) -> Option<&str> {
        self.exit.as_ref().map(|info| info.name.as_str())
    }

    /// Whether the node can currently be walked through.
    ///
    /// An installed override always wins; otherwise both readings must be at
    /// or below their thresholds.
    pub fn is_passable(&self) -> bool {
        self.passability().passable
    }

    /// Passability verdict along with the rule that produced it.
    pub fn passability(&self) -> Passability {
        match self.passable_override {
            Some(passable) => Passability {
                passable,
                source: PassabilitySource::Override,
            },
            None => Passability {
                passable: self
                    .thresholds
                    .admits(self.temperature, self.gas_concentration),
                source: PassabilitySource::Threshold,
            },
        }
    }

    /// Force passability, bypassing the thresholds until [`Node::clear_override`].
    pub fn set_passable(&mut self, passable: bool) {
        self.passable_override = Some(passable);
    }

    /// Revert to threshold-based evaluation.
    pub fn clear_override(&mut self) {
        self.passable_override = None;
    }

    pub fn has_override(&self) -> bool {
        self.passable_override.is_some()
    }

    pub fn passable_override(&self) -> Option<bool> {
        self.passable_override
    }

    /// Outgoing edges as `(neighbour index, weight)` in index order.
    pub fn neighbours(&self) -> impl Iterator<Item = (NodeIndex, f64)> + '_ {
        self.neighbours.iter().map(|(&index, &weight)| (index, weight))
    }

    pub fn neighbour_count(&self) -> usize {
        self.neighbours.len()
    }

    /// Weight of the directed edge to `neighbour`, if one exists.
    pub fn edge_weight(&self, neighbour: NodeIndex) -> Option<f64> {
        self.neighbours.get(&neighbour).copied()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let passability = self.passability();
        match &self.exit {
            Some(exit) => write!(
                f,
                "Exit{{id='{}', name='{}', floor={}, passable={} ({}), temp={:.1}, gas={:.2}}}",
                self.id,
                exit.name,
                self.floor,
                passability.passable,
                passability.source.label(),
                self.temperature,
                self.gas_concentration
            ),
            None => write!(
                f,
                "Node{{id='{}', floor={}, passable={} ({}), temp={:.1}/{:.1}, gas={:.2}/{:.2}}}",
                self.id,
                self.floor,
                passability.passable,
                passability.source.label(),
                self.temperature,
                self.thresholds.temperature,
                self.gas_concentration,
                self.thresholds.gas_concentration
            ),
        }
    }
}
