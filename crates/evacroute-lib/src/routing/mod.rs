//! Evacuation planning across every exit of a building.
//!
//! This module provides:
//! - [`RankingPolicy`] - How per-exit alternatives are merged into one answer
//! - [`EvacuationRequest`] - Source node plus ranking parameters
//! - [`EvacuationPlan`] - Ranked routes returned to the caller
//! - [`plan_evacuation`] - Main entry point
//!
//! # Strategy Pattern
//!
//! Merging is delegated to an [`ExitRanker`]. Each policy is its own ranker
//! struct, so new selection rules can be added without touching the
//! orchestration in [`plan_evacuation`].
//!
//! # Example
//!
//! ```
//! use evacroute_lib::{plan_evacuation, sample_building, EvacuationRequest};
//!
//! let building = sample_building().unwrap();
//! let plan = plan_evacuation(&building, &EvacuationRequest::new("2D")).unwrap();
//! assert_eq!(plan.routes.len(), 3);
//! ```

mod planner;

pub use planner::{select_ranker, ExitRanker, ExitRoutes, GlobalTopRanker, PerExitRanker};

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::ksp::k_shortest_paths;
use crate::node::NodeId;
use crate::path::PathCandidate;

/// Alternatives computed for each passable exit.
pub const DEFAULT_PATHS_PER_EXIT: usize = 3;

/// Routes kept in the final answer.
pub const DEFAULT_MAX_ROUTES: usize = 3;

/// How per-exit alternatives are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RankingPolicy {
    /// Cheapest `max_routes` paths over all exits combined.
    #[default]
    GlobalTop,
    /// Cheapest `max_routes` paths for each exit, merged by distance.
    PerExit,
}

impl fmt::Display for RankingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RankingPolicy::GlobalTop => "global-top",
            RankingPolicy::PerExit => "per-exit",
        };
        f.write_str(value)
    }
}

/// High-level evacuation planning request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvacuationRequest {
    pub source: NodeId,
    pub paths_per_exit: usize,
    pub max_routes: usize,
    pub policy: RankingPolicy,
}

impl EvacuationRequest {
    /// Request using the default policy: three paths per exit, global top three.
    pub fn new(source: impl Into<NodeId>) -> Self {
        Self {
            source: source.into(),
            paths_per_exit: DEFAULT_PATHS_PER_EXIT,
            max_routes: DEFAULT_MAX_ROUTES,
            policy: RankingPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: RankingPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_paths_per_exit(mut self, paths_per_exit: usize) -> Self {
        self.paths_per_exit = paths_per_exit;
        self
    }

    pub fn with_max_routes(mut self, max_routes: usize) -> Self {
        self.max_routes = max_routes;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.paths_per_exit < 1 {
            return Err(Error::InvalidK {
                k: self.paths_per_exit,
            });
        }
        if self.max_routes < 1 {
            return Err(Error::InvalidRouteCount {
                count: self.max_routes,
            });
        }
        Ok(())
    }
}

/// Ranked evacuation routes for one source node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvacuationPlan {
    pub policy: RankingPolicy,
    pub source: NodeId,
    /// Exits that were passable when the plan was computed.
    pub exits_considered: Vec<NodeId>,
    /// Routes ordered by ascending distance; empty when no exit is reachable.
    pub routes: Vec<PathCandidate>,
}

impl EvacuationPlan {
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn best(&self) -> Option<&PathCandidate> {
        self.routes.first()
    }
}

/// Rank escape routes from `request.source` to every passable exit.
///
/// Impassable exits are never queried. Having no passable or reachable exit
/// is reported as a plan with no routes, not as an error.
pub fn plan_evacuation(graph: &Graph, request: &EvacuationRequest) -> Result<EvacuationPlan> {
    request.validate()?;
    graph.resolve(&request.source)?;

    let mut per_exit = Vec::new();
    for exit in graph.passable_exits() {
        let paths = k_shortest_paths(graph, &request.source, exit.id(), request.paths_per_exit)?;
        debug!(exit = exit.id(), found = paths.len(), "exit alternatives computed");
        per_exit.push(ExitRoutes {
            exit: exit.id().to_string(),
            paths,
        });
    }

    if per_exit.is_empty() {
        warn!(source = %request.source, "no passable exits in the graph");
    }

    let exits_considered = per_exit.iter().map(|routes| routes.exit.clone()).collect();
    let ranker = select_ranker(request);
    let routes = ranker.rank(per_exit, request.max_routes);

    Ok(EvacuationPlan {
        policy: ranker.policy(),
        source: request.source.clone(),
        exits_considered,
        routes,
    })
}
