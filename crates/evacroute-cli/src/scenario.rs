//! Hazard scenario applied to the building before a query runs.
//!
//! Every flag maps onto one of the library's mutation calls. Thresholds are
//! applied first, then readings, then explicit overrides, so an override
//! always has the final word.

use anyhow::{Context, Result};
use evacroute_lib::Graph;

/// A `NODE=VALUE` reading supplied on the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub node: String,
    pub value: f64,
}

/// Parse `NODE=VALUE` for clap.
pub fn parse_reading(raw: &str) -> std::result::Result<Reading, String> {
    let (node, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NODE=VALUE, got '{raw}'"))?;
    let node = node.trim();
    if node.is_empty() {
        return Err(format!("missing node id in '{raw}'"));
    }
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("invalid number '{}' in '{raw}'", value.trim()))?;
    if !value.is_finite() {
        return Err(format!("reading must be finite in '{raw}'"));
    }
    Ok(Reading {
        node: node.to_string(),
        value,
    })
}

/// Mutations requested through CLI flags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scenario {
    /// Nodes forced impassable.
    pub blocked: Vec<String>,
    /// Nodes forced passable.
    pub opened: Vec<String>,
    /// Nodes whose override is removed.
    pub cleared: Vec<String>,
    pub temperatures: Vec<Reading>,
    pub gas: Vec<Reading>,
    /// Temperature threshold applied to every node.
    pub temperature_threshold: Option<f64>,
    /// Gas threshold applied to every node.
    pub gas_threshold: Option<f64>,
}

impl Scenario {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply the scenario to `graph`.
    pub fn apply(&self, graph: &mut Graph) -> Result<()> {
        if let Some(limit) = self.temperature_threshold {
            for node in graph.nodes_mut() {
                node.set_temperature_threshold(limit);
            }
        }
        if let Some(limit) = self.gas_threshold {
            for node in graph.nodes_mut() {
                node.set_gas_concentration_threshold(limit);
            }
        }

        for reading in &self.temperatures {
            graph
                .node_mut(&reading.node)
                .with_context(|| format!("cannot set temperature on {}", reading.node))?
                .set_temperature(reading.value);
        }
        for reading in &self.gas {
            graph
                .node_mut(&reading.node)
                .with_context(|| format!("cannot set gas concentration on {}", reading.node))?
                .set_gas_concentration(reading.value);
        }

        for id in &self.cleared {
            graph
                .node_mut(id)
                .with_context(|| format!("cannot clear override on {id}"))?
                .clear_override();
        }
        for id in &self.opened {
            graph
                .node_mut(id)
                .with_context(|| format!("cannot open {id}"))?
                .set_passable(true);
        }
        for id in &self.blocked {
            graph
                .node_mut(id)
                .with_context(|| format!("cannot block {id}"))?
                .set_passable(false);
        }

        if !self.is_empty() {
            tracing::debug!(
                blocked = self.blocked.len(),
                opened = self.opened.len(),
                readings = self.temperatures.len() + self.gas.len(),
                "hazard scenario applied"
            );
        }
        Ok(())
    }
}
