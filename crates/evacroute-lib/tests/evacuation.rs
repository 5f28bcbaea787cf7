mod common;

use evacroute_lib::{
    plan_evacuation, sample_building, Error, EvacuationRequest, RankingPolicy,
};

use common::{corridor_with_exits, diamond, sum_weights};

fn summary(plan: &evacroute_lib::EvacuationPlan) -> Vec<(String, f64)> {
    plan.routes
        .iter()
        .map(|path| (path.nodes().join("->"), path.distance()))
        .collect()
}

#[test]
fn global_top_three_across_exits() {
    let graph = corridor_with_exits();
    let plan = plan_evacuation(&graph, &EvacuationRequest::new("S")).unwrap();

    assert_eq!(plan.policy, RankingPolicy::GlobalTop);
    assert_eq!(plan.exits_considered, ["X1", "X2"]);
    assert_eq!(
        summary(&plan),
        [
            ("S->H->T->X2".to_string(), 3.0),
            ("S->H->X1".to_string(), 5.0),
            ("S->X2".to_string(), 6.0),
        ]
    );
    assert_eq!(plan.best().map(|path| path.target()), Some("X2"));
}

#[test]
fn per_exit_policy_represents_each_exit() {
    let graph = corridor_with_exits();
    let request = EvacuationRequest::new("S")
        .with_policy(RankingPolicy::PerExit)
        .with_max_routes(1);
    let plan = plan_evacuation(&graph, &request).unwrap();

    assert_eq!(plan.policy, RankingPolicy::PerExit);
    assert_eq!(
        summary(&plan),
        [
            ("S->H->T->X2".to_string(), 3.0),
            ("S->H->X1".to_string(), 5.0),
        ]
    );
}

#[test]
fn blocked_exits_are_never_queried() {
    let mut graph = corridor_with_exits();
    graph.node_mut("X2").unwrap().set_passable(false);

    let plan = plan_evacuation(&graph, &EvacuationRequest::new("S")).unwrap();
    assert_eq!(plan.exits_considered, ["X1"]);
    // The detour through X2 is gone along with the exit itself.
    assert_eq!(summary(&plan), [("S->H->X1".to_string(), 5.0)]);
}

#[test]
fn blocking_last_exit_empties_plan() {
    let mut graph = corridor_with_exits();
    graph.node_mut("X1").unwrap().set_passable(false);
    assert!(!plan_evacuation(&graph, &EvacuationRequest::new("S"))
        .unwrap()
        .is_empty());

    graph.node_mut("X2").unwrap().set_passable(false);
    let plan = plan_evacuation(&graph, &EvacuationRequest::new("S")).unwrap();
    assert!(plan.is_empty());
    assert!(plan.exits_considered.is_empty());
}

#[test]
fn hazard_cutting_off_exits_empties_plan() {
    let mut graph = corridor_with_exits();
    graph.node_mut("H").unwrap().set_temperature(90.0);
    graph.node_mut("X2").unwrap().set_passable(false);

    let plan = plan_evacuation(&graph, &EvacuationRequest::new("S")).unwrap();
    assert_eq!(plan.exits_considered, ["X1"]);
    assert!(plan.is_empty());
}

#[test]
fn graph_without_exits_yields_empty_plan() {
    let graph = diamond();
    let plan = plan_evacuation(&graph, &EvacuationRequest::new("A")).unwrap();
    assert!(plan.is_empty());
}

#[test]
fn invalid_request_reports_error() {
    let graph = corridor_with_exits();
    let err = plan_evacuation(&graph, &EvacuationRequest::new("S").with_max_routes(0))
        .expect_err("zero routes");
    assert_eq!(err, Error::InvalidRouteCount { count: 0 });

    let err = plan_evacuation(&graph, &EvacuationRequest::new("nowhere"))
        .expect_err("unknown source");
    assert!(matches!(err, Error::UnknownNode { .. }));
}

#[test]
fn sample_building_plan_reaches_exits() {
    let building = sample_building().expect("sample builds");
    let plan = plan_evacuation(&building, &EvacuationRequest::new("3D")).unwrap();

    assert_eq!(plan.routes.len(), 3);
    for pair in plan.routes.windows(2) {
        assert!(pair[0].distance() <= pair[1].distance());
    }
    for path in &plan.routes {
        assert!(building.node(path.target()).unwrap().is_exit());
        assert_eq!(path.distance(), sum_weights(&building, path.nodes()));
    }
}
