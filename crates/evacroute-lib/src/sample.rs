//! Built-in demonstration building.
//!
//! Four floors, each a ring of six nodes (`A`..`F`, ids such as `"0A"` or
//! `"3F"`). The ground floor carries three exits at `A`, `C` and `E`.
//! Consecutive floors are joined by stairwells at `B` and `E`.

use crate::error::Result;
use crate::graph::Graph;
use crate::node::{ExitSpec, NodeSpec};

pub const FLOORS: usize = 4;
pub const NODES_PER_FLOOR: usize = 6;

/// Ring positions on the ground floor that are exits, with their labels.
const EXITS: [(usize, &str); 3] = [(0, "North Gate"), (2, "East Gate"), (4, "South Gate")];

/// Ring positions joined to the floor above.
const STAIRWELLS: [usize; 2] = [1, 4];

const STAIRWELL_WEIGHT: f64 = 2.0;

/// Weight of the ring edge from position `i` to `i + 1` on each floor.
const RING_WEIGHTS: [[f64; NODES_PER_FLOOR]; FLOORS] = [
    [1.0, 2.0, 1.0, 1.0, 2.0, 2.0],
    [2.0, 1.0, 1.0, 2.0, 1.0, 2.0],
    [1.0, 1.0, 2.0, 2.0, 1.0, 1.0],
    [2.0, 2.0, 1.0, 1.0, 2.0, 1.0],
];

/// Id of the node at `position` on `floor`.
pub fn node_id(floor: usize, position: usize) -> String {
    let letter = char::from(b'A' + position as u8);
    format!("{floor}{letter}")
}

/// Build and validate the demonstration building.
///
/// Every node starts with calm readings well inside the default thresholds.
pub fn sample_building() -> Result<Graph> {
    let mut graph = Graph::new();

    for floor in 0..FLOORS {
        for position in 0..NODES_PER_FLOOR {
            let id = node_id(floor, position);
            let (temperature, gas) = ambient_reading(floor, position);
            let exit = EXITS
                .iter()
                .find(|(exit_position, _)| floor == 0 && *exit_position == position);

            match exit {
                Some((_, name)) => {
                    graph.add_exit(ExitSpec::new(id, *name, floor as i32, temperature, gas))?
                }
                None => graph.add_node(NodeSpec::new(id, floor as i32, temperature, gas))?,
            };
        }
    }

    for (floor, weights) in RING_WEIGHTS.iter().enumerate() {
        for (position, &weight) in weights.iter().enumerate() {
            let next = (position + 1) % NODES_PER_FLOOR;
            graph.connect(
                &node_id(floor, position),
                &node_id(floor, next),
                weight,
            )?;
        }
    }

    for floor in 0..FLOORS - 1 {
        for &position in &STAIRWELLS {
            graph.connect(
                &node_id(floor, position),
                &node_id(floor + 1, position),
                STAIRWELL_WEIGHT,
            )?;
        }
    }

    graph.validate()?;
    Ok(graph)
}

/// Deterministic calm readings: 18-29 degrees, gas up to 0.09.
fn ambient_reading(floor: usize, position: usize) -> (f64, f64) {
    let seed = floor * NODES_PER_FLOOR + position;
    let temperature = 18.0 + ((seed * 5) % 12) as f64;
    let gas = ((seed * 3) % 10) as f64 / 100.0;
    (temperature, gas)
}
