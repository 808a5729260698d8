//! End-to-end lock tests: ground a fixture world, search it, replay the
//! plan, and persist the bundle.

use lock_tests::ground;
use strider_harness::bundle_dir::{verify_bundle_dir, write_bundle_dir};
use strider_harness::runner::run_world;
use strider_harness::worlds::blocks::Blocks;
use strider_harness::worlds::gripper::Gripper;
use strider_kernel::abort::AbortFlag;
use strider_kernel::model::Operator;
use strider_kernel::replay::{replay, ReplayVerdict};
use strider_search::engine::SearchPolicy;
use strider_search::heuristics::RelaxedReachabilityHeuristic;

#[test]
fn blocks_plan_replays_valid() {
    let mut h = RelaxedReachabilityHeuristic::new();
    let report = run_world(&Blocks, &mut h, &SearchPolicy::default(), &AbortFlag::new()).unwrap();

    let plan = report.plan.expect("blocks is solvable");
    let steps: Vec<Operator> = plan
        .steps
        .iter()
        .map(|s| report.declaration.operators()[s.operator].clone())
        .collect();
    assert_eq!(replay(&report.declaration, &steps), ReplayVerdict::Valid);
}

#[test]
fn gripper_quantified_goal_is_solvable() {
    let mut h = RelaxedReachabilityHeuristic::new();
    let report = run_world(&Gripper, &mut h, &SearchPolicy::default(), &AbortFlag::new()).unwrap();

    let plan = report.plan.expect("gripper is solvable");
    // Both balls must be dropped in room-b, whatever route the search took.
    let drops = plan
        .steps
        .iter()
        .filter(|s| s.name.starts_with("(drop "))
        .count();
    assert!(drops >= 2, "expected two drops, plan: {:?}", plan.steps);
}

#[test]
fn goal_facts_exist_in_the_fact_table() {
    let decl = ground(&Blocks);
    for &fact in decl.goal() {
        assert!(decl.facts().get(fact).is_some());
    }
}

#[test]
fn bundle_write_then_verify() {
    let mut h = RelaxedReachabilityHeuristic::new();
    let report = run_world(&Blocks, &mut h, &SearchPolicy::default(), &AbortFlag::new()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    write_bundle_dir(&report, dir.path()).unwrap();
    verify_bundle_dir(dir.path()).unwrap();

    assert!(dir.path().join("declaration.json").exists());
    assert!(dir.path().join("plan.json").exists());
    assert!(dir.path().join("search_stats.json").exists());

    let manifest: serde_json::Value = serde_json::from_slice(
        &std::fs::read(dir.path().join("bundle_manifest.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(manifest["schema_version"], "bundle.v1");
    assert_eq!(manifest["world"], "blocks");
    let names: Vec<&str> = manifest["artifacts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["declaration.json", "plan.json", "search_stats.json"]);
}
