//! Search entry point and expansion loop.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use strider_kernel::abort::AbortFlag;
use strider_kernel::model::{Declaration, FactId, Operator, OperatorId};

use crate::error::SearchError;
use crate::fingerprint::state_fingerprint;
use crate::frontier::Frontier;
use crate::heuristic::{EvalContext, Heuristic};
use crate::macros::PairCounter;
use crate::node::{NodeId, OpenKey, SearchNode};
use crate::plan::{Plan, PlanStep};

/// Budget configuration for a search run.
///
/// Every field defaults to `None`, meaning unbounded. The engine still
/// terminates on finite problems because the closed set is never released.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPolicy {
    /// Hard cap on node expansions.
    pub max_expansions: Option<u64>,
    /// Wall-clock limit, checked at step boundaries.
    pub deadline: Option<Duration>,
    /// Open-list prune threshold.
    pub max_open_size: Option<usize>,
}

impl SearchPolicy {
    /// Validate the budget values.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] when `max_open_size` is zero,
    /// which could not even hold the root.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_open_size == Some(0) {
            return Err(SearchError::InvalidPolicy {
                detail: "max_open_size must be at least 1".into(),
            });
        }
        Ok(())
    }
}

/// Why a search stopped before finding a goal or exhausting the space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    /// `max_expansions` was reached.
    ExpansionBudget,
    /// The wall-clock deadline passed.
    Deadline,
    /// The cooperative abort flag was set.
    Flag,
}

/// How a search run terminated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A goal state was popped; the plan reaches it from the initial state.
    GoalFound(Plan),
    /// The reachable space was exhausted without satisfying the goal.
    Exhausted,
    /// A budget or the abort flag stopped the run early.
    Aborted(AbortReason),
}

/// Counters describing a finished run, regardless of its outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub expansions: u64,
    pub generated: u64,
    pub duplicates_suppressed: u64,
    pub evaluations: u64,
    pub dead_ends: u64,
    pub pruned: u64,
    pub closed_size: u64,
    pub open_high_water: u64,
}

impl SearchStats {
    /// JSON rendering with deterministic key order.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "closed_size": self.closed_size,
            "dead_ends": self.dead_ends,
            "duplicates_suppressed": self.duplicates_suppressed,
            "evaluations": self.evaluations,
            "expansions": self.expansions,
            "generated": self.generated,
            "open_high_water": self.open_high_water,
            "pruned": self.pruned,
        })
    }
}

/// Result of a search execution: the outcome plus the run counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRun {
    pub outcome: SearchOutcome,
    pub stats: SearchStats,
}

impl SearchRun {
    /// The plan, when the outcome is a found goal.
    #[must_use]
    pub fn plan(&self) -> Option<&Plan> {
        match &self.outcome {
            SearchOutcome::GoalFound(plan) => Some(plan),
            SearchOutcome::Exhausted | SearchOutcome::Aborted(_) => None,
        }
    }
}

/// Run best-first search over the declaration's own operators.
///
/// The goal test happens when a node is popped, so the reported plan is the
/// best one the heuristic ordering produced, not the first one generated.
/// A node scored at the unreachable sentinel is still admitted to the open
/// list at the maximum estimate, so it ranks last but is never discarded;
/// completeness on finite spaces does not depend on the heuristic being
/// honest about reachability. All runtime terminations return
/// `Ok(SearchRun)` with the counters preserved.
///
/// # Errors
///
/// Returns [`SearchError::InvalidPolicy`] only for pre-flight policy
/// validation failures.
pub fn best_first_search(
    declaration: &Declaration,
    heuristic: &mut dyn Heuristic,
    policy: &SearchPolicy,
    abort: &AbortFlag,
) -> Result<SearchRun, SearchError> {
    policy.validate()?;
    heuristic.reset();
    Ok(run_search(
        declaration,
        declaration.operators(),
        heuristic,
        policy,
        abort,
        None,
    ))
}

fn applicable_operators(operators: &[Operator], state: &BTreeSet<FactId>) -> Vec<OperatorId> {
    operators
        .iter()
        .enumerate()
        .filter(|(_, op)| op.is_applicable(state))
        .map(|(id, _)| id)
        .collect()
}

/// The expansion loop shared by plain and macro-learning search.
///
/// `operators` may extend the declaration's table with learned macros; node
/// operator ids index into this slice. When `pairs` is given, consecutive
/// operator chainings along admitted successors are counted.
pub(crate) fn run_search(
    declaration: &Declaration,
    operators: &[Operator],
    heuristic: &mut dyn Heuristic,
    policy: &SearchPolicy,
    abort: &AbortFlag,
    mut pairs: Option<&mut PairCounter>,
) -> SearchRun {
    let ctx = EvalContext {
        declaration,
        operators,
    };
    let mut frontier = Frontier::new();
    let mut nodes: Vec<SearchNode> = Vec::new();
    let mut stats = SearchStats::default();
    let mut insertions: u64 = 0;
    let started = Instant::now();

    let root = SearchNode {
        id: 0,
        parent: None,
        operator: None,
        state: declaration.init().clone(),
        depth: 0,
    };
    if declaration.goal_satisfied(&root.state) {
        return SearchRun {
            outcome: SearchOutcome::GoalFound(Plan::default()),
            stats,
        };
    }
    let root_fp = state_fingerprint(&root.state);
    let root_applicable = applicable_operators(operators, &root.state);
    let root_estimate = heuristic.evaluate(&root, &ctx, &root_applicable);
    stats.evaluations += 1;
    if root_estimate.is_unreachable() {
        stats.dead_ends += 1;
    }
    nodes.push(root);
    frontier.push(
        OpenKey {
            estimate: root_estimate.0,
            insertion: insertions,
        },
        0,
        &root_fp,
    );
    insertions += 1;

    let outcome = loop {
        if abort.is_set() {
            break SearchOutcome::Aborted(AbortReason::Flag);
        }
        if let Some(max) = policy.max_expansions {
            if stats.expansions >= max {
                break SearchOutcome::Aborted(AbortReason::ExpansionBudget);
            }
        }
        if let Some(deadline) = policy.deadline {
            if started.elapsed() >= deadline {
                break SearchOutcome::Aborted(AbortReason::Deadline);
            }
        }

        let Some(current) = frontier.pop() else {
            break SearchOutcome::Exhausted;
        };
        if declaration.goal_satisfied(&nodes[current].state) {
            break SearchOutcome::GoalFound(extract_plan(&nodes, current, operators));
        }
        stats.expansions += 1;

        let parent_operator = nodes[current].operator;
        let depth = nodes[current].depth;
        for oid in applicable_operators(operators, &nodes[current].state) {
            let state = operators[oid].apply(&nodes[current].state);
            stats.generated += 1;
            let fp = state_fingerprint(&state);
            if frontier.is_closed(&fp) {
                stats.duplicates_suppressed += 1;
                continue;
            }
            let child = SearchNode {
                id: nodes.len(),
                parent: Some(current),
                operator: Some(oid),
                state,
                depth: depth + 1,
            };
            let child_applicable = applicable_operators(operators, &child.state);
            let estimate = heuristic.evaluate(&child, &ctx, &child_applicable);
            stats.evaluations += 1;
            if estimate.is_unreachable() {
                stats.dead_ends += 1;
            }
            if let Some(counter) = pairs.as_deref_mut() {
                if let Some(prev) = parent_operator {
                    counter.record(prev, oid);
                }
            }
            let child_id = child.id;
            nodes.push(child);
            frontier.push(
                OpenKey {
                    estimate: estimate.0,
                    insertion: insertions,
                },
                child_id,
                &fp,
            );
            insertions += 1;
        }

        if let Some(cap) = policy.max_open_size {
            if frontier.len() > cap {
                stats.pruned += frontier.prune_to(cap).len() as u64;
            }
        }
    };

    stats.closed_size = frontier.closed_len() as u64;
    stats.open_high_water = frontier.high_water();
    SearchRun { outcome, stats }
}

/// Walk the parent chain from `goal` back to the root and reverse it.
fn extract_plan(nodes: &[SearchNode], goal: NodeId, operators: &[Operator]) -> Plan {
    let mut steps = Vec::new();
    let mut cursor = goal;
    while let (Some(parent), Some(oid)) = (nodes[cursor].parent, nodes[cursor].operator) {
        steps.push(PlanStep {
            name: operators[oid].name.clone(),
            operator: oid,
        });
        cursor = parent;
    }
    steps.reverse();
    Plan { steps }
}
