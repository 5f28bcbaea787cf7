//! Nearest-exit command handler.

use std::io::{self, Write};

use anyhow::Result;
use serde::Serialize;

use evacroute_lib::{nearest_exit, shortest_path, Graph, PathCandidate};

use crate::output::{write_json, write_paths, OutputFormat};
use crate::terminal::ColorPalette;

#[derive(Debug, Serialize)]
struct NearestReport<'a> {
    source: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    exit: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<&'a PathCandidate>,
}

/// Handle the nearest subcommand.
pub fn handle_nearest_command(graph: &Graph, format: OutputFormat, from: &str) -> Result<()> {
    let exit = nearest_exit(graph, from)?;
    // The exit is passable, so the target exception cannot change the answer.
    let path = match exit {
        Some(node) => shortest_path(graph, from, node.id())?,
        None => None,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Json => write_json(
            &mut out,
            &NearestReport {
                source: from,
                exit: exit.map(|node| node.id()),
                name: exit.and_then(|node| node.exit_name()),
                path: path.as_ref(),
            },
        )?,
        OutputFormat::Text => match (exit, path) {
            (Some(node), Some(path)) => {
                writeln!(
                    out,
                    "Nearest exit from {}: {} ({})",
                    from,
                    node.id(),
                    node.exit_name().unwrap_or("<unnamed>")
                )?;
                write_paths(&mut out, graph, &[path], &ColorPalette::detect())?;
            }
            _ => writeln!(out, "No passable exit reachable from {}.", from)?,
        },
    }
    Ok(())
}
