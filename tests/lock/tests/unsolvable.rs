//! Exhaustion lock tests: an unsolvable space terminates by enumerating
//! exactly its reachable states, whatever the heuristic thinks of them.

use lock_tests::ground;
use strider_harness::worlds::unsolvable::Unsolvable;
use strider_kernel::abort::AbortFlag;
use strider_search::engine::{best_first_search, SearchOutcome, SearchPolicy};
use strider_search::heuristics::{GoalCountHeuristic, RelaxedReachabilityHeuristic};

#[test]
fn exhaustion_closes_exactly_the_reachable_states() {
    let decl = ground(&Unsolvable);
    let mut h = GoalCountHeuristic::new();
    let run = best_first_search(&decl, &mut h, &SearchPolicy::default(), &AbortFlag::new()).unwrap();

    assert_eq!(run.outcome, SearchOutcome::Exhausted);
    // The toggle world has two reachable states: {down} and {up}.
    assert_eq!(run.stats.closed_size, 2);
    assert_eq!(run.stats.dead_ends, 0);
}

#[test]
fn sentinel_scores_flag_dead_ends_without_skipping_states() {
    let decl = ground(&Unsolvable);
    let mut h = RelaxedReachabilityHeuristic::new();
    let run = best_first_search(&decl, &mut h, &SearchPolicy::default(), &AbortFlag::new()).unwrap();

    // The relaxed heuristic scores both states unreachable, but they are
    // still expanded: exhaustion must enumerate the full reachable space.
    assert_eq!(run.outcome, SearchOutcome::Exhausted);
    assert_eq!(run.stats.expansions, 2);
    assert_eq!(run.stats.closed_size, 2);
    assert_eq!(run.stats.dead_ends, 2);
}
