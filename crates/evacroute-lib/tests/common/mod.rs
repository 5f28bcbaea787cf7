//! Shared graph fixtures for integration tests.

use evacroute_lib::{ExitSpec, Graph, NodeSpec};

/// Calm reading well inside the default thresholds.
pub const CALM_TEMPERATURE: f64 = 21.0;

/// Register a calm regular node.
pub fn add_room(graph: &mut Graph, id: &str) {
    graph
        .add_node(NodeSpec::new(id, 0, CALM_TEMPERATURE, 0.0))
        .expect("register room");
}

/// Register a calm, open exit.
#[allow(dead_code)]
pub fn add_exit(graph: &mut Graph, id: &str, name: &str) {
    graph
        .add_exit(ExitSpec::new(id, name, 0, CALM_TEMPERATURE, 0.0))
        .expect("register exit");
}

/// A-B(5), A-C(3), B-D(4), C-D(2), D-E(7), all bidirectional.
pub fn diamond() -> Graph {
    let mut graph = Graph::new();
    for id in ["A", "B", "C", "D", "E"] {
        add_room(&mut graph, id);
    }
    for (a, b, weight) in [
        ("A", "B", 5.0),
        ("A", "C", 3.0),
        ("B", "D", 4.0),
        ("C", "D", 2.0),
        ("D", "E", 7.0),
    ] {
        graph.connect(a, b, weight).expect("connect fixture edge");
    }
    graph
}

/// Corridor `S - H - T` with exits `X1` (off `H`) and `X2` (off `T`).
///
/// `S-H` 1, `H-T` 1, `H-X1` 4, `T-X2` 1, `S-X2` 6.
#[allow(dead_code)]
pub fn corridor_with_exits() -> Graph {
    let mut graph = Graph::new();
    for id in ["S", "H", "T"] {
        add_room(&mut graph, id);
    }
    add_exit(&mut graph, "X1", "West Door");
    add_exit(&mut graph, "X2", "East Door");
    for (a, b, weight) in [
        ("S", "H", 1.0),
        ("H", "T", 1.0),
        ("H", "X1", 4.0),
        ("T", "X2", 1.0),
        ("S", "X2", 6.0),
    ] {
        graph.connect(a, b, weight).expect("connect fixture edge");
    }
    graph
}

/// Literal sum of edge weights along `ids`.
#[allow(dead_code)]
pub fn sum_weights(graph: &Graph, ids: &[String]) -> f64 {
    ids.windows(2)
        .map(|pair| {
            let next = graph.resolve(&pair[1]).expect("known node");
            graph
                .node(&pair[0])
                .expect("known node")
                .edge_weight(next)
                .expect("edge exists")
        })
        .sum()
}
