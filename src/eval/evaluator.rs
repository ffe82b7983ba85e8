//! Corpus-level evaluation driver.
//!
//! The reference annotations define which predicates are evaluated. For each
//! reference predicate with at least one role, the system's roles for the
//! same key are fetched (none if absent) and scored; counts are summed into
//! corpus totals. Predicted predicates missing from the reference are
//! skipped.
//!
//! With the `eval-parallel` feature, predicates are scored on the rayon pool.
//! Each worker folds its own partial totals and the partials are reduced at
//! the end, so the result equals the sequential one.

use super::metrics::EvalCounts;
use super::oracle::RoleEquivalence;
use super::predicate::{evaluate_predicate, PredicateEvaluation};
use super::EvalConfig;
use crate::Result;
use qasrl_core::{Annotations, PredicateKey, Role};
use serde::{Deserialize, Serialize};

/// Corpus totals for one evaluation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusEvaluation {
    /// Summed three-tier counts
    pub counts: EvalCounts,
    /// Reference predicates evaluated
    pub n_predicates: usize,
    /// Predicted predicates absent from the reference (not scored)
    pub skipped_predicates: usize,
}

/// Scores predicted annotations against reference annotations.
///
/// # Example
///
/// ```rust
/// use qasrl_core::{Annotations, Argument, PredicateKey, Question, Role};
/// use qasrl_eval::eval::{Evaluator, ExactMatch};
///
/// let key = PredicateKey::new("sent-1", 3);
/// let role = Role::new(Question::new("Who ate?"), [Argument::new(0, 2)?]);
/// let reference: Annotations = [(key.clone(), role.clone())].into_iter().collect();
/// let predicted: Annotations = [(key, role)].into_iter().collect();
///
/// let result = Evaluator::new(ExactMatch).evaluate(&predicted, &reference);
/// assert_eq!(result.counts.labelled_arg.f1(), Some(1.0));
/// # Ok::<(), qasrl_core::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Evaluator<O> {
    oracle: O,
    config: EvalConfig,
}

impl<O: RoleEquivalence> Evaluator<O> {
    /// Create an evaluator with strict thresholds.
    pub fn new(oracle: O) -> Self {
        Self {
            oracle,
            config: EvalConfig::strict(),
        }
    }

    /// Replace the configuration, validating it.
    pub fn with_config(mut self, config: EvalConfig) -> Result<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    /// Active configuration.
    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// The role-equivalence oracle.
    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Score one predicate.
    pub fn evaluate_predicate(&self, predicted: &[Role], reference: &[Role]) -> PredicateEvaluation {
        evaluate_predicate(predicted, reference, &self.oracle, &self.config)
    }

    /// Reference predicates in the evaluation universe, paired with predictions.
    fn paired<'a>(
        &self,
        predicted: &'a Annotations,
        reference: &'a Annotations,
    ) -> Vec<(&'a PredicateKey, &'a [Role], &'a [Role])> {
        reference
            .iter()
            .filter(|(_, roles)| !roles.is_empty())
            .map(|(key, roles)| (key, predicted.get(key), roles))
            .collect()
    }

    /// Score every reference predicate and sum the counts.
    pub fn evaluate(&self, predicted: &Annotations, reference: &Annotations) -> CorpusEvaluation {
        let paired = self.paired(predicted, reference);
        let skipped_predicates = predicted
            .predicates()
            .filter(|key| !reference.contains(key))
            .count();
        if skipped_predicates > 0 {
            log::debug!(
                "Skipping {} predicted predicates absent from the reference",
                skipped_predicates
            );
        }

        let counts = self.sum_counts(&paired);
        log::info!(
            "Evaluated {} predicates: unlabelled arg {:?}, labelled arg {:?}, role {:?}",
            paired.len(),
            counts.unlabelled_arg.as_tuple(),
            counts.labelled_arg.as_tuple(),
            counts.role.as_tuple()
        );

        CorpusEvaluation {
            counts,
            n_predicates: paired.len(),
            skipped_predicates,
        }
    }

    #[cfg(feature = "eval-parallel")]
    fn sum_counts(&self, paired: &[(&PredicateKey, &[Role], &[Role])]) -> EvalCounts {
        use rayon::prelude::*;

        paired
            .par_iter()
            .fold(EvalCounts::default, |mut acc, (key, sys, grt)| {
                acc += self.score(key, sys, grt);
                acc
            })
            .reduce(EvalCounts::default, |a, b| a + b)
    }

    #[cfg(not(feature = "eval-parallel"))]
    fn sum_counts(&self, paired: &[(&PredicateKey, &[Role], &[Role])]) -> EvalCounts {
        paired
            .iter()
            .map(|(key, sys, grt)| self.score(key, sys, grt))
            .sum()
    }

    fn score(&self, key: &PredicateKey, predicted: &[Role], reference: &[Role]) -> EvalCounts {
        let counts = self.evaluate_predicate(predicted, reference).counts;
        log::debug!(
            "{}: {} predicted / {} reference roles -> arg {:?}, labelled {:?}, role {:?}",
            key,
            predicted.len(),
            reference.len(),
            counts.unlabelled_arg.as_tuple(),
            counts.labelled_arg.as_tuple(),
            counts.role.as_tuple()
        );
        counts
    }

    /// Per-predicate results in canonical key order.
    pub fn evaluate_each(
        &self,
        predicted: &Annotations,
        reference: &Annotations,
    ) -> Vec<(PredicateKey, PredicateEvaluation)> {
        self.paired(predicted, reference)
            .into_iter()
            .map(|(key, sys, grt)| (key.clone(), self.evaluate_predicate(sys, grt)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::ExactMatch;
    use qasrl_core::{Argument, Question};

    fn arg(start: usize, end: usize) -> Argument {
        Argument::new(start, end).unwrap()
    }

    fn entry(doc: &str, idx: usize, text: &str, args: &[(usize, usize)]) -> (PredicateKey, Role) {
        (
            PredicateKey::new(doc, idx),
            Role::new(Question::new(text), args.iter().map(|&(s, e)| arg(s, e))),
        )
    }

    #[test]
    fn test_missing_prediction_is_all_false_negatives() {
        let reference: Annotations = [
            entry("d1", 0, "Who ate?", &[(0, 1)]),
            entry("d2", 4, "What fell?", &[(0, 2), (5, 7)]),
        ]
        .into_iter()
        .collect();
        let predicted: Annotations = [entry("d1", 0, "Who ate?", &[(0, 1)])].into_iter().collect();

        let result = Evaluator::new(ExactMatch).evaluate(&predicted, &reference);
        assert_eq!(result.n_predicates, 2);
        assert_eq!(result.counts.unlabelled_arg.as_tuple(), (1, 0, 2));
        assert_eq!(result.counts.role.as_tuple(), (1, 0, 1));
    }

    #[test]
    fn test_predicted_only_predicates_skipped() {
        let reference: Annotations = [entry("d1", 0, "Who ate?", &[(0, 1)])].into_iter().collect();
        let predicted: Annotations = [
            entry("d1", 0, "Who ate?", &[(0, 1)]),
            entry("d9", 2, "Who ran?", &[(0, 1)]),
        ]
        .into_iter()
        .collect();

        let result = Evaluator::new(ExactMatch).evaluate(&predicted, &reference);
        assert_eq!(result.n_predicates, 1);
        assert_eq!(result.skipped_predicates, 1);
        assert_eq!(result.counts.unlabelled_arg.as_tuple(), (1, 0, 0));
    }

    #[test]
    fn test_config_validation() {
        let bad = EvalConfig::strict().with_match_threshold(0.0);
        assert!(Evaluator::new(ExactMatch).with_config(bad).is_err());

        let evaluator = Evaluator::new(ExactMatch)
            .with_config(EvalConfig::agreement())
            .unwrap();
        assert_eq!(evaluator.config().match_threshold, 0.3);
    }

    #[test]
    fn test_looser_threshold_matches_more() {
        // iou((0,4),(2,6)) = 1/3
        let reference: Annotations = [entry("d1", 0, "Who ate?", &[(0, 4)])].into_iter().collect();
        let predicted: Annotations = [entry("d1", 0, "Who ate?", &[(2, 6)])].into_iter().collect();

        let strict = Evaluator::new(ExactMatch).evaluate(&predicted, &reference);
        assert_eq!(strict.counts.unlabelled_arg.as_tuple(), (0, 1, 1));

        let loose = Evaluator::new(ExactMatch)
            .with_config(EvalConfig::agreement())
            .unwrap()
            .evaluate(&predicted, &reference);
        assert_eq!(loose.counts.unlabelled_arg.as_tuple(), (1, 0, 0));
    }

    #[test]
    fn test_evaluate_each_matches_totals() {
        let reference: Annotations = [
            entry("d1", 0, "Who ate?", &[(0, 1)]),
            entry("d1", 3, "What fell?", &[(4, 6)]),
        ]
        .into_iter()
        .collect();
        let predicted: Annotations = [
            entry("d1", 0, "Who ate?", &[(0, 1), (8, 9)]),
            entry("d1", 3, "What dropped?", &[(4, 6)]),
        ]
        .into_iter()
        .collect();

        let evaluator = Evaluator::new(ExactMatch);
        let each = evaluator.evaluate_each(&predicted, &reference);
        assert_eq!(each.len(), 2);
        assert_eq!(each[0].0, PredicateKey::new("d1", 0));

        let summed: EvalCounts = each.iter().map(|(_, e)| e.counts).sum();
        assert_eq!(summed, evaluator.evaluate(&predicted, &reference).counts);
    }
}
