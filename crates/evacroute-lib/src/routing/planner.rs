//! Ranking strategies implementing the Strategy pattern.
//!
//! An [`ExitRanker`] turns the alternatives found for each passable exit into
//! the final ordered route list. [`select_ranker`] maps a request's
//! [`RankingPolicy`] to its ranker.

use crate::node::NodeId;
use crate::path::PathCandidate;

use super::{EvacuationRequest, RankingPolicy};

/// Alternatives found for a single exit, cheapest first.
#[derive(Debug, Clone, PartialEq)]
pub struct ExitRoutes {
    pub exit: NodeId,
    pub paths: Vec<PathCandidate>,
}

/// Trait for route ranking strategies.
pub trait ExitRanker: Send + Sync {
    /// The policy this ranker implements.
    fn policy(&self) -> RankingPolicy;

    /// Merge per-exit alternatives into a list ordered by ascending distance.
    ///
    /// `per_exit` is in exit registration order; ties in distance keep that
    /// order.
    fn rank(&self, per_exit: Vec<ExitRoutes>, max_routes: usize) -> Vec<PathCandidate>;
}

/// Pools every exit's alternatives and keeps the overall cheapest.
#[derive(Debug, Clone, Default)]
pub struct GlobalTopRanker;

impl ExitRanker for GlobalTopRanker {
    fn policy(&self) -> RankingPolicy {
        RankingPolicy::GlobalTop
    }

    fn rank(&self, per_exit: Vec<ExitRoutes>, max_routes: usize) -> Vec<PathCandidate> {
        let mut pool: Vec<PathCandidate> = per_exit
            .into_iter()
            .flat_map(|routes| routes.paths)
            .collect();
        pool.sort_by(PathCandidate::cmp_by_distance);
        pool.truncate(max_routes);
        pool
    }
}

/// Keeps the cheapest alternatives of every exit so each reachable exit is
/// represented.
#[derive(Debug, Clone, Default)]
pub struct PerExitRanker;

impl ExitRanker for PerExitRanker {
    fn policy(&self) -> RankingPolicy {
        RankingPolicy::PerExit
    }

    fn rank(&self, per_exit: Vec<ExitRoutes>, max_routes: usize) -> Vec<PathCandidate> {
        let mut pool: Vec<PathCandidate> = per_exit
            .into_iter()
            .flat_map(|routes| routes.paths.into_iter().take(max_routes))
            .collect();
        pool.sort_by(PathCandidate::cmp_by_distance);
        pool
    }
}

/// Select the ranker for a given request.
pub fn select_ranker(request: &EvacuationRequest) -> Box<dyn ExitRanker> {
    match request.policy {
        RankingPolicy::GlobalTop => Box::new(GlobalTopRanker),
        RankingPolicy::PerExit => Box::new(PerExitRanker),
    }
}
