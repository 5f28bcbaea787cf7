//! Output formatting for query results.
//!
//! Text renderings are meant for people at a terminal; JSON renderings are
//! stable machine-readable documents built from the library's serializable
//! types.

use std::io::{self, Write};

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use evacroute_lib::{Graph, Node, PassabilitySource, PathCandidate};

use crate::terminal::ColorPalette;

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Serializable snapshot of one node's state.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NodeView {
    pub id: String,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub floor: i32,
    pub passable: bool,
    pub source: PassabilitySource,
    pub temperature: f64,
    pub gas_concentration: f64,
    pub neighbours: usize,
}

impl NodeView {
    pub fn from_node(node: &Node) -> Self {
        let passability = node.passability();
        Self {
            id: node.id().to_string(),
            kind: if node.is_exit() { "exit" } else { "node" },
            name: node.exit_name().map(str::to_string),
            floor: node.floor(),
            passable: passability.passable,
            source: passability.source,
            temperature: node.temperature(),
            gas_concentration: node.gas_concentration(),
            neighbours: node.neighbour_count(),
        }
    }
}

/// Write `value` as pretty JSON followed by a newline.
pub fn write_json<T: Serialize>(out: &mut impl Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Numbered path listing: `#1  dist=5.0` followed by the joined node ids.
pub fn write_paths(
    out: &mut impl Write,
    graph: &Graph,
    paths: &[PathCandidate],
    palette: &ColorPalette,
) -> io::Result<()> {
    for (rank, path) in paths.iter().enumerate() {
        writeln!(
            out,
            "#{}  {}dist={:.1}{}",
            rank + 1,
            palette.cyan,
            path.distance(),
            palette.reset
        )?;
        let exit_label = graph
            .node(path.target())
            .ok()
            .and_then(Node::exit_name)
            .map(|name| format!("  ({}{}{})", palette.green, name, palette.reset))
            .unwrap_or_default();
        writeln!(out, "  {}{}", path.nodes().join(" -> "), exit_label)?;
    }
    Ok(())
}

/// One line per node with its kind, floor and live readings.
pub fn write_node_table(
    out: &mut impl Write,
    views: &[NodeView],
    palette: &ColorPalette,
) -> io::Result<()> {
    writeln!(
        out,
        "{}{:<6} {:<5} {:<12} {:>5} {:<9} {:<10} {:>7} {:>6}{}",
        palette.gray, "ID", "KIND", "NAME", "FLOOR", "PASSABLE", "SOURCE", "TEMP", "GAS", palette.reset
    )?;
    for view in views {
        let (color, state) = if view.passable {
            (palette.green, "yes")
        } else {
            (palette.red, "no")
        };
        writeln!(
            out,
            "{}{:<6}{} {:<5} {:<12} {:>5} {}{:<9}{} {:<10} {:>7.1} {:>6.2}",
            palette.white_bold,
            view.id,
            palette.reset,
            view.kind,
            view.name.as_deref().unwrap_or("-"),
            view.floor,
            color,
            state,
            palette.reset,
            view.source.label(),
            view.temperature,
            view.gas_concentration
        )?;
    }
    Ok(())
}
