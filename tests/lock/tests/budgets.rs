//! Budget and abort lock tests: every search terminates, and the reported
//! abort reason matches the budget that fired.

use std::time::Duration;

use lock_tests::ground;
use strider_harness::worlds::blocks::Blocks;
use strider_kernel::abort::AbortFlag;
use strider_search::engine::{best_first_search, AbortReason, SearchOutcome, SearchPolicy};
use strider_search::heuristics::GoalCountHeuristic;

#[test]
fn expansion_budget_fires_before_the_first_expansion() {
    let decl = ground(&Blocks);
    let mut h = GoalCountHeuristic::new();
    let policy = SearchPolicy {
        max_expansions: Some(0),
        ..SearchPolicy::default()
    };
    let run = best_first_search(&decl, &mut h, &policy, &AbortFlag::new()).unwrap();
    assert_eq!(
        run.outcome,
        SearchOutcome::Aborted(AbortReason::ExpansionBudget)
    );
    assert_eq!(run.stats.expansions, 0);
}

#[test]
fn zero_deadline_aborts_immediately() {
    let decl = ground(&Blocks);
    let mut h = GoalCountHeuristic::new();
    let policy = SearchPolicy {
        deadline: Some(Duration::ZERO),
        ..SearchPolicy::default()
    };
    let run = best_first_search(&decl, &mut h, &policy, &AbortFlag::new()).unwrap();
    assert_eq!(run.outcome, SearchOutcome::Aborted(AbortReason::Deadline));
}

#[test]
fn preset_abort_flag_wins_over_budgets() {
    let decl = ground(&Blocks);
    let mut h = GoalCountHeuristic::new();
    let policy = SearchPolicy {
        max_expansions: Some(0),
        deadline: Some(Duration::ZERO),
        ..SearchPolicy::default()
    };
    let abort = AbortFlag::new();
    abort.set();
    let run = best_first_search(&decl, &mut h, &policy, &abort).unwrap();
    assert_eq!(run.outcome, SearchOutcome::Aborted(AbortReason::Flag));
}

#[test]
fn open_list_cap_prunes_but_still_terminates() {
    let decl = ground(&Blocks);
    let mut h = GoalCountHeuristic::new();
    let policy = SearchPolicy {
        max_open_size: Some(2),
        ..SearchPolicy::default()
    };
    let run = best_first_search(&decl, &mut h, &policy, &AbortFlag::new()).unwrap();
    assert!(run.stats.pruned > 0, "cap of 2 must force pruning");
    // Pruned states stay closed, so the run terminates either way.
    assert!(matches!(
        run.outcome,
        SearchOutcome::GoalFound(_) | SearchOutcome::Exhausted
    ));
}
