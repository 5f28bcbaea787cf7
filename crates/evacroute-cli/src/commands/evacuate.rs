//! Evacuate command handler: ranked routes across every exit.

use std::io::{self, Write};

use anyhow::{Context, Result};

use evacroute_lib::{plan_evacuation, EvacuationRequest, Graph, RankingPolicy};

use crate::output::{write_json, write_paths, OutputFormat};
use crate::terminal::ColorPalette;

/// Arguments for the evacuate command.
#[derive(Debug, Clone)]
pub struct EvacuateCommandArgs {
    pub from: String,
    pub per_exit: usize,
    pub max_routes: usize,
    pub policy: RankingPolicy,
}

impl EvacuateCommandArgs {
    /// Convert CLI args to a library request.
    pub fn to_request(&self) -> EvacuationRequest {
        EvacuationRequest::new(self.from.clone())
            .with_paths_per_exit(self.per_exit)
            .with_max_routes(self.max_routes)
            .with_policy(self.policy)
    }
}

/// Handle the evacuate subcommand.
pub fn handle_evacuate_command(
    graph: &Graph,
    format: OutputFormat,
    args: &EvacuateCommandArgs,
) -> Result<()> {
    let plan = plan_evacuation(graph, &args.to_request())
        .with_context(|| format!("failed to plan evacuation from {}", args.from))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Json => write_json(&mut out, &plan)?,
        OutputFormat::Text => {
            if plan.exits_considered.is_empty() {
                writeln!(out, "No passable exits in the graph.")?;
            } else if plan.is_empty() {
                writeln!(out, "No reachable paths from {}.", plan.source)?;
            } else {
                writeln!(
                    out,
                    "Top {} paths from {} ({}):",
                    plan.routes.len(),
                    plan.source,
                    plan.policy
                )?;
                write_paths(&mut out, graph, &plan.routes, &ColorPalette::detect())?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_map_onto_request() {
        let args = EvacuateCommandArgs {
            from: "2D".to_string(),
            per_exit: 2,
            max_routes: 5,
            policy: RankingPolicy::PerExit,
        };
        let request = args.to_request();
        assert_eq!(request.source, "2D");
        assert_eq!(request.paths_per_exit, 2);
        assert_eq!(request.max_routes, 5);
        assert_eq!(request.policy, RankingPolicy::PerExit);
    }
}
