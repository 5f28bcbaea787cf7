mod common;

use std::collections::HashSet;

use evacroute_lib::{k_shortest_paths, sample_building, shortest_path, Error};

use common::{add_room, diamond, sum_weights};

#[test]
fn documented_example_two_paths() {
    let graph = diamond();
    let paths = k_shortest_paths(&graph, "A", "D", 2).expect("valid request");

    let summary: Vec<_> = paths
        .iter()
        .map(|path| (path.nodes().join("->"), path.distance()))
        .collect();
    assert_eq!(
        summary,
        [("A->C->D".to_string(), 5.0), ("A->B->D".to_string(), 9.0)]
    );
}

#[test]
fn zero_k_is_invalid_argument() {
    let graph = diamond();
    let err = k_shortest_paths(&graph, "A", "E", 0).expect_err("k must be positive");
    assert_eq!(err, Error::InvalidK { k: 0 });
}

#[test]
fn returns_only_existing_paths() {
    let graph = diamond();
    let paths = k_shortest_paths(&graph, "A", "E", 25).unwrap();
    assert_eq!(paths.len(), 2);
    assert_eq!(paths[0].nodes(), ["A", "C", "D", "E"]);
    assert_eq!(paths[1].nodes(), ["A", "B", "D", "E"]);
}

#[test]
fn unreachable_target_gives_empty_list() {
    let mut graph = diamond();
    add_room(&mut graph, "vault");
    assert!(k_shortest_paths(&graph, "A", "vault", 3).unwrap().is_empty());
}

#[test]
fn single_path_when_k_is_one() {
    let graph = diamond();
    let paths = k_shortest_paths(&graph, "E", "A", 1).unwrap();
    assert_eq!(paths.len(), 1);
    assert_eq!(paths[0].nodes(), ["E", "D", "C", "A"]);
}

#[test]
fn hazards_remove_alternatives() {
    let mut graph = diamond();
    graph.node_mut("B").unwrap().set_temperature(61.0);
    let paths = k_shortest_paths(&graph, "A", "E", 3).unwrap();
    assert_eq!(paths.len(), 1);
    assert!(paths.iter().all(|path| !path.nodes().contains(&"B".to_string())));
}

#[test]
fn ranked_paths_are_simple_sorted_and_distinct() {
    let building = sample_building().expect("sample builds");
    let paths = k_shortest_paths(&building, "3A", "0C", 8).unwrap();
    assert_eq!(paths.len(), 8);

    let first = shortest_path(&building, "3A", "0C").unwrap().unwrap();
    assert_eq!(paths[0], first);

    let mut sequences = HashSet::new();
    for pair in paths.windows(2) {
        assert!(pair[0].distance() <= pair[1].distance());
    }
    for path in &paths {
        assert_eq!(path.source(), "3A");
        assert_eq!(path.target(), "0C");
        assert_eq!(path.distance(), sum_weights(&building, path.nodes()));

        let unique: HashSet<_> = path.nodes().iter().collect();
        assert_eq!(unique.len(), path.nodes().len(), "path {path} revisits a node");
        assert!(sequences.insert(path.nodes().to_vec()), "duplicate path {path}");
    }
}

#[test]
fn results_are_reproducible() {
    let building = sample_building().expect("sample builds");
    let first = k_shortest_paths(&building, "2C", "0E", 6).unwrap();
    let second = k_shortest_paths(&building, "2C", "0E", 6).unwrap();
    assert_eq!(first, second);
}
