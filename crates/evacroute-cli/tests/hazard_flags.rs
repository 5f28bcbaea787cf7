use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;

fn cli() -> Command {
    let mut cmd = cargo_bin_cmd!("evacroute");
    cmd.env("RUST_LOG", "error")
        .env("NO_COLOR", "1")
        .env_remove("EVACROUTE_FORMAT");
    cmd
}

#[test]
fn blocked_exit_is_skipped_by_nearest() {
    cli()
        .args(["--block", "0A", "nearest", "--from", "0B"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nearest exit from 0B: 0C (East Gate)"));
}

#[test]
fn hot_node_is_routed_around() {
    // 0C is both hot and the only short hop toward 0D.
    cli()
        .args(["--temp", "0C=75", "route", "--from", "0B", "--to", "0D"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#1  dist=6.0"))
        .stdout(predicate::str::contains("0B -> 0A -> 0F -> 0E -> 0D"));
}

#[test]
fn impassable_target_is_flagged() {
    cli()
        .args(["--gas", "0C=0.9", "route", "--from", "0B", "--to", "0C"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#1  dist=2.0"))
        .stdout(predicate::str::contains("Warning: 0C is currently impassable."));
}

#[test]
fn open_overrides_readings() {
    cli()
        .args([
            "--temp", "0C=75", "--open", "0C", "route", "--from", "0B", "--to", "0D",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("#1  dist=3.0"));
}

#[test]
fn all_exits_blocked() {
    cli()
        .args([
            "--block", "0A", "--block", "0C", "--block", "0E", "evacuate", "--from", "2C",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("No passable exits in the graph."));
}

#[test]
fn no_reachable_exit_from_sealed_node() {
    cli()
        .args([
            "--block", "0A", "--block", "0C", "--block", "1B", "nearest", "--from", "0B",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("No passable exit reachable from 0B."));
}

#[test]
fn lowered_threshold_counts_impassable_nodes() {
    cli()
        .args(["--temp-threshold", "10", "nodes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("24 nodes, 3 exits, 24 impassable"));
}

#[test]
fn malformed_reading_is_rejected() {
    cli()
        .args(["--temp", "1C=hot", "nodes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid number 'hot'"));
}

#[test]
fn unknown_node_in_scenario_fails() {
    cli()
        .args(["--block", "9Z", "nodes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown node '9Z'."));
}
