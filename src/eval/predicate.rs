//! One-pass, three-tier evaluation of a single predicate.
//!
//! # Tiers
//!
//! - **Unlabelled argument**: TP = matched pairs, FP = consolidated leftover
//!   predictions, FN = unmatched reference arguments.
//! - **Labelled argument**: starts from the unlabelled counts. Each matched
//!   pair whose questions the oracle rejects moves one TP to both FP and FN.
//! - **Role**: TP = distinct reference roles with at least one labelled
//!   match, FN = the remaining reference roles, FP = 0. Over-generation is
//!   charged at the argument tiers only.

use super::align::{match_arguments, ArgumentMatching};
use super::metrics::{EvalCounts, Metrics};
use super::oracle::RoleEquivalence;
use super::EvalConfig;
use qasrl_core::{Argument, Question, Role};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Counts and alignment for one predicate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredicateEvaluation {
    /// Three-tier counts
    pub counts: EvalCounts,
    /// Argument-level alignment the counts were derived from
    pub matching: ArgumentMatching,
}

/// All distinct arguments across a predicate's roles.
#[must_use]
pub fn collect_arguments(roles: &[Role]) -> BTreeSet<Argument> {
    roles
        .iter()
        .flat_map(|role| role.arguments().iter().copied())
        .collect()
}

/// Question owning each argument.
///
/// A span answering several questions is owned by the first in question order.
fn argument_owners(roles: &[Role]) -> BTreeMap<Argument, &Question> {
    let mut sorted: Vec<&Role> = roles.iter().collect();
    sorted.sort();

    let mut owners = BTreeMap::new();
    for role in sorted {
        for arg in role.arguments() {
            owners.entry(*arg).or_insert(role.question());
        }
    }
    owners
}

/// Evaluate one predicate's predicted roles against its reference roles.
///
/// An empty `predicted` slice yields pure false negatives.
///
/// # Example
///
/// ```rust
/// use qasrl_core::{Argument, Question, Role};
/// use qasrl_eval::eval::{evaluate_predicate, EvalConfig, ExactMatch};
///
/// let q = Question::new("What did X eat?");
/// let reference = vec![Role::new(q.clone(), [Argument::new(2, 5)?])];
/// let predicted = vec![
///     Role::new(q, [Argument::new(2, 5)?]),
///     Role::new(Question::new("Where did X eat?"), [Argument::new(10, 12)?]),
/// ];
///
/// let result = evaluate_predicate(&predicted, &reference, &ExactMatch, &EvalConfig::strict());
/// assert_eq!(result.counts.unlabelled_arg.as_tuple(), (1, 1, 0));
/// assert_eq!(result.counts.labelled_arg.as_tuple(), (1, 1, 0));
/// assert_eq!(result.counts.role.as_tuple(), (1, 0, 0));
/// # Ok::<(), qasrl_core::Error>(())
/// ```
#[must_use]
pub fn evaluate_predicate<O>(
    predicted: &[Role],
    reference: &[Role],
    oracle: &O,
    config: &EvalConfig,
) -> PredicateEvaluation
where
    O: RoleEquivalence + ?Sized,
{
    let predicted_args = collect_arguments(predicted);
    let reference_args = collect_arguments(reference);
    let matching = match_arguments(&predicted_args, &reference_args, config);

    let tp = matching.matched.len();
    let unlabelled_arg = Metrics::new(
        tp,
        matching.unmatched_predicted.len(),
        reference_args.len() - tp,
    );

    let predicted_owners = argument_owners(predicted);
    let reference_owners = argument_owners(reference);

    let mut labelled_arg = unlabelled_arg;
    let mut recovered_roles: BTreeSet<&Question> = BTreeSet::new();
    for (sys_arg, grt_arg) in &matching.matched {
        // Every matched argument came from these roles
        let (Some(&sys_q), Some(&grt_q)) =
            (predicted_owners.get(sys_arg), reference_owners.get(grt_arg))
        else {
            continue;
        };

        if oracle.is_equivalent(sys_q, grt_q) {
            recovered_roles.insert(grt_q);
        } else {
            labelled_arg.true_positive -= 1;
            labelled_arg.false_positive += 1;
            labelled_arg.false_negative += 1;
        }
    }

    let role = Metrics::new(
        recovered_roles.len(),
        0,
        reference.len().saturating_sub(recovered_roles.len()),
    );

    PredicateEvaluation {
        counts: EvalCounts {
            unlabelled_arg,
            labelled_arg,
            role,
        },
        matching,
    }
}
