// Module exports for CLI subcommands
//
// Each module handles a specific CLI subcommand. main.rs parses arguments,
// builds the building graph, applies the hazard scenario and dispatches here.

pub mod evacuate;
pub mod nearest;
pub mod nodes;
pub mod route;
