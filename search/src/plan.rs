//! Plans extracted from a finished search.

use strider_kernel::model::{Declaration, OperatorId};

use crate::fingerprint::{canonical_hash, DOMAIN_PLAN};
use crate::macros::LearnedMacro;

/// One step of a plan: an operator id plus its display name, captured at
/// extraction time so a plan stays readable without the declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanStep {
    pub name: String,
    pub operator: OperatorId,
}

/// An ordered sequence of operator applications from the initial state to a
/// goal state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Plan {
    pub steps: Vec<PlanStep>,
}

impl Plan {
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Rewrite macro steps back into their constituent primitive steps.
    ///
    /// Steps whose name matches a learned macro are replaced in order by the
    /// macro's parts. Primitive steps pass through untouched, so a plan with
    /// no macro steps round-trips unchanged.
    #[must_use]
    pub fn expand_macros(&self, declaration: &Declaration, macros: &[LearnedMacro]) -> Plan {
        let mut steps = Vec::with_capacity(self.steps.len());
        for step in &self.steps {
            match macros.iter().find(|m| m.operator.name == step.name) {
                Some(learned) => {
                    for &part in &learned.parts {
                        steps.push(PlanStep {
                            name: declaration.operators()[part].name.clone(),
                            operator: part,
                        });
                    }
                }
                None => steps.push(step.clone()),
            }
        }
        Plan { steps }
    }

    /// Content fingerprint of the step names, for audit bundles.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let mut bytes = Vec::new();
        for step in &self.steps {
            bytes.extend_from_slice(step.name.as_bytes());
            bytes.push(0);
        }
        canonical_hash(DOMAIN_PLAN, &bytes)
    }

    /// JSON rendering with deterministic key order.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "fingerprint": self.fingerprint(),
            "steps": self
                .steps
                .iter()
                .map(|s| serde_json::json!({ "name": s.name, "operator": s.operator }))
                .collect::<Vec<_>>(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(name: &str, operator: OperatorId) -> PlanStep {
        PlanStep {
            name: name.to_string(),
            operator,
        }
    }

    #[test]
    fn fingerprint_distinguishes_step_orders() {
        let forward = Plan {
            steps: vec![step("(a)", 0), step("(b)", 1)],
        };
        let backward = Plan {
            steps: vec![step("(b)", 1), step("(a)", 0)],
        };
        assert_ne!(forward.fingerprint(), backward.fingerprint());
        assert!(forward.fingerprint().starts_with("sha256:"));
    }

    #[test]
    fn json_carries_names_and_ids() {
        let plan = Plan {
            steps: vec![step("(pick a)", 2)],
        };
        let value = plan.to_json();
        assert_eq!(value["steps"][0]["name"], "(pick a)");
        assert_eq!(value["steps"][0]["operator"], 2);
    }

    #[test]
    fn expansion_without_macros_is_identity() {
        let decl = crate::heuristics::test_support::context_fixture().0;
        let plan = Plan {
            steps: vec![step("(make-q)", 0), step("(make-r)", 1)],
        };
        assert_eq!(plan.expand_macros(&decl, &[]), plan);
    }
}
