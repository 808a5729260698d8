//! End-to-end runner: translate a world, search it, validate the plan.

use strider_kernel::abort::AbortFlag;
use strider_kernel::lifted::TypedObjectIndex;
use strider_kernel::model::{Declaration, Operator};
use strider_kernel::replay::{replay, ReplayVerdict};
use strider_kernel::translate::{translate, TranslateError};
use strider_search::engine::{best_first_search, SearchPolicy, SearchRun};
use strider_search::error::SearchError;
use strider_search::heuristic::Heuristic;
use strider_search::macros::{macro_learning_search, LearnedMacro, MacroPolicy};
use strider_search::plan::Plan;

use crate::worlds::PlanningWorld;

/// Failure anywhere along the translate/search/validate pipeline.
#[derive(Debug)]
pub enum RunError {
    /// Grounding the lifted problem failed.
    Translate(TranslateError),
    /// Search policy validation failed.
    Search(SearchError),
    /// The search reported a plan that does not replay cleanly. This is an
    /// engine defect, not a property of the world.
    PlanRejected { verdict: ReplayVerdict },
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Translate(e) => write!(f, "translate error: {e}"),
            Self::Search(e) => write!(f, "search error: {e}"),
            Self::PlanRejected { verdict } => {
                write!(f, "plan failed replay validation: {verdict:?}")
            }
        }
    }
}

impl std::error::Error for RunError {}

impl From<TranslateError> for RunError {
    fn from(e: TranslateError) -> Self {
        Self::Translate(e)
    }
}

impl From<SearchError> for RunError {
    fn from(e: SearchError) -> Self {
        Self::Search(e)
    }
}

/// Everything a finished run produced, ready for bundling.
#[derive(Debug)]
pub struct PlanReport {
    /// World identifier the run came from.
    pub world: String,
    /// The grounded declaration the search ran against.
    pub declaration: Declaration,
    /// Outcome and counters of the (final) search pass.
    pub run: SearchRun,
    /// The validated primitive plan, when the outcome found a goal. Macro
    /// steps are already expanded.
    pub plan: Option<Plan>,
}

/// Translate `world`, search it, and replay-validate any plan found.
///
/// # Errors
///
/// Returns [`RunError`] on grounding failure, policy rejection, or a plan
/// that does not replay.
pub fn run_world(
    world: &dyn PlanningWorld,
    heuristic: &mut dyn Heuristic,
    policy: &SearchPolicy,
    abort: &AbortFlag,
) -> Result<PlanReport, RunError> {
    let problem = world.problem();
    let oracle = TypedObjectIndex::from_problem(&problem);
    let declaration = translate(&problem, &oracle, abort)?;

    let run = best_first_search(&declaration, heuristic, policy, abort)?;
    let plan = run.plan().cloned();
    validate(&declaration, plan.as_ref())?;

    Ok(PlanReport {
        world: world.name().to_string(),
        declaration,
        run,
        plan,
    })
}

/// Like [`run_world`], but through the macro-learning search variant. The
/// report's plan is expanded back to primitives before validation.
///
/// # Errors
///
/// Returns [`RunError`] on grounding failure, policy rejection, or a plan
/// that does not replay.
pub fn run_world_with_macros(
    world: &dyn PlanningWorld,
    heuristic: &mut dyn Heuristic,
    policy: &SearchPolicy,
    macro_policy: &MacroPolicy,
    abort: &AbortFlag,
) -> Result<(PlanReport, Vec<LearnedMacro>), RunError> {
    let problem = world.problem();
    let oracle = TypedObjectIndex::from_problem(&problem);
    let declaration = translate(&problem, &oracle, abort)?;

    let learned = macro_learning_search(&declaration, heuristic, policy, macro_policy, abort)?;
    let plan = learned
        .run
        .plan()
        .map(|p| p.expand_macros(&declaration, &learned.macros));
    validate(&declaration, plan.as_ref())?;

    Ok((
        PlanReport {
            world: world.name().to_string(),
            declaration,
            run: learned.run,
            plan,
        },
        learned.macros,
    ))
}

fn validate(declaration: &Declaration, plan: Option<&Plan>) -> Result<(), RunError> {
    let Some(plan) = plan else {
        return Ok(());
    };
    let steps: Vec<Operator> = plan
        .steps
        .iter()
        .map(|s| declaration.operators()[s.operator].clone())
        .collect();
    match replay(declaration, &steps) {
        ReplayVerdict::Valid => Ok(()),
        verdict => Err(RunError::PlanRejected { verdict }),
    }
}
