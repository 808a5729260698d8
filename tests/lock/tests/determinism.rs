//! Determinism lock tests: identical inputs must produce byte-identical
//! plans, statistics, and bundle artifacts across repeated runs.

use strider_harness::bundle_dir::write_bundle_dir;
use strider_harness::runner::{run_world, PlanReport};
use strider_harness::worlds::blocks::Blocks;
use strider_kernel::abort::AbortFlag;
use strider_search::engine::SearchPolicy;
use strider_search::heuristics::RelaxedReachabilityHeuristic;

fn blocks_report() -> PlanReport {
    let mut h = RelaxedReachabilityHeuristic::new();
    run_world(&Blocks, &mut h, &SearchPolicy::default(), &AbortFlag::new()).unwrap()
}

#[test]
fn repeated_runs_agree_on_plan_and_stats() {
    let first = blocks_report();
    let first_plan = first.plan.as_ref().expect("blocks is solvable");

    for _ in 1..5 {
        let other = blocks_report();
        let other_plan = other.plan.as_ref().expect("blocks is solvable");
        assert_eq!(first_plan.fingerprint(), other_plan.fingerprint());
        assert_eq!(first.run.stats, other.run.stats);
    }
}

#[test]
fn repeated_runs_produce_identical_bundle_bytes() {
    let first_dir = tempfile::tempdir().unwrap();
    let second_dir = tempfile::tempdir().unwrap();
    write_bundle_dir(&blocks_report(), first_dir.path()).unwrap();
    write_bundle_dir(&blocks_report(), second_dir.path()).unwrap();

    for name in ["declaration.json", "plan.json", "search_stats.json", "bundle_digest.txt"] {
        let first = std::fs::read(first_dir.path().join(name)).unwrap();
        let second = std::fs::read(second_dir.path().join(name)).unwrap();
        assert_eq!(first, second, "bundle artifact {name} differs across runs");
    }
}
