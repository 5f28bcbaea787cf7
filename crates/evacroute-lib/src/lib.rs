//! Evacroute library entry points.
//!
//! This crate models a building as a weighted graph whose nodes become
//! impassable when heat or gas readings cross their thresholds (or when an
//! operator overrides them), and computes escape routes through it: the
//! single shortest path, the nearest usable exit, ranked loop-free
//! alternatives, and a merged ranking across every exit. Higher-level
//! consumers (the CLI, renderers) should only depend on the functions
//! exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod error;
pub mod graph;
pub mod ksp;
pub mod node;
pub mod path;
pub mod routing;
pub mod sample;

pub use error::{Error, Result};
pub use graph::Graph;
pub use ksp::k_shortest_paths;
pub use node::{
    ExitInfo, ExitSpec, Node, NodeId, NodeIndex, NodeSpec, Passability, PassabilitySource,
    Thresholds, DEFAULT_GAS_CONCENTRATION_THRESHOLD, DEFAULT_TEMPERATURE_THRESHOLD,
};
pub use path::{nearest_exit, shortest_path, shortest_path_excluding, PathCandidate, SearchExclusions};
pub use routing::{
    plan_evacuation, EvacuationPlan, EvacuationRequest, RankingPolicy, DEFAULT_MAX_ROUTES,
    DEFAULT_PATHS_PER_EXIT,
};
pub use sample::sample_building;
