//! Route command handler: ranked paths between two nodes.

use std::io::{self, Write};

use anyhow::{Context, Result};
use serde::Serialize;

use evacroute_lib::{k_shortest_paths, Graph, PathCandidate};

use crate::output::{write_json, write_paths, OutputFormat};
use crate::terminal::ColorPalette;

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    /// Starting node id.
    pub from: String,
    /// Destination node id.
    pub to: String,
    /// Number of alternatives to list.
    pub k: usize,
}

#[derive(Debug, Serialize)]
struct RouteReport<'a> {
    source: &'a str,
    target: &'a str,
    target_passable: bool,
    k: usize,
    paths: &'a [PathCandidate],
}

/// Handle the route subcommand.
///
/// The destination is reachable as a final hop even when it is impassable;
/// the output flags that case so a blocked exit is not mistaken for a safe
/// one.
pub fn handle_route_command(
    graph: &Graph,
    format: OutputFormat,
    args: &RouteCommandArgs,
) -> Result<()> {
    let paths = k_shortest_paths(graph, &args.from, &args.to, args.k)
        .with_context(|| format!("failed to route from {} to {}", args.from, args.to))?;
    let target_passable = graph.is_passable(&args.to)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Json => write_json(
            &mut out,
            &RouteReport {
                source: &args.from,
                target: &args.to,
                target_passable,
                k: args.k,
                paths: &paths,
            },
        )?,
        OutputFormat::Text => {
            if paths.is_empty() {
                writeln!(out, "No route found from {} to {}.", args.from, args.to)?;
                return Ok(());
            }
            writeln!(
                out,
                "Routes from {} to {} ({} of {} requested):",
                args.from,
                args.to,
                paths.len(),
                args.k
            )?;
            write_paths(&mut out, graph, &paths, &ColorPalette::detect())?;
            if !target_passable {
                writeln!(out, "\nWarning: {} is currently impassable.", args.to)?;
            }
        }
    }
    Ok(())
}
