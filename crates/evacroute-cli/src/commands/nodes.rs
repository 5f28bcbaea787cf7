//! Node listing and structural validation.

use std::io::{self, Write};

use anyhow::{Context, Result};
use serde::Serialize;

use evacroute_lib::Graph;

use crate::output::{write_json, write_node_table, NodeView, OutputFormat};
use crate::terminal::ColorPalette;

/// Handle the `nodes` subcommand.
pub fn handle_nodes_command(graph: &Graph, format: OutputFormat) -> Result<()> {
    let views: Vec<NodeView> = graph.nodes().map(NodeView::from_node).collect();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Json => write_json(&mut out, &views)?,
        OutputFormat::Text => {
            write_node_table(&mut out, &views, &ColorPalette::detect())?;
            let blocked = views.iter().filter(|view| !view.passable).count();
            writeln!(
                out,
                "\n{} nodes, {} exits, {} impassable",
                views.len(),
                graph.exits().count(),
                blocked
            )?;
        }
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct ValidationReport {
    valid: bool,
    nodes: usize,
    exits: usize,
}

/// Handle the `validate` subcommand.
pub fn handle_validate_command(graph: &Graph, format: OutputFormat) -> Result<()> {
    graph
        .validate()
        .context("building graph failed structural validation")?;

    let report = ValidationReport {
        valid: true,
        nodes: graph.len(),
        exits: graph.exits().count(),
    };
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Json => write_json(&mut out, &report)?,
        OutputFormat::Text => writeln!(
            out,
            "Graph valid: {} nodes, {} exits, every node connected.",
            report.nodes, report.exits
        )?,
    }
    Ok(())
}
