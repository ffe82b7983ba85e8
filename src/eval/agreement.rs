//! Inter-annotator agreement on roles.
//!
//! Two annotators agree on a pair of roles when the questions start with the
//! same wh-word bucket ("who" and "what" count as one) and at least one pair
//! of their answer spans overlaps by the agreement threshold (0.3 IoU under
//! [`EvalConfig::agreement`]).

use super::overlap::iou;
use super::EvalConfig;
use qasrl_core::{Annotations, Question, Role};
use serde::{Deserialize, Serialize};

/// Matched and total role counts across predicates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgreementCounts {
    /// Agreeing role pairs
    pub matches: usize,
    /// Distinct roles across both annotators (|A| + |B| - matches, per predicate)
    pub total_roles: usize,
}

impl AgreementCounts {
    /// Fraction of roles both annotators agree on, `None` when there are no roles.
    #[must_use]
    pub fn ratio(&self) -> Option<f64> {
        if self.total_roles == 0 {
            None
        } else {
            Some(self.matches as f64 / self.total_roles as f64)
        }
    }
}

/// Wh-word bucket used for agreement: "who" and "what" are interchangeable.
#[must_use]
pub fn wh_bucket(question: &Question) -> &str {
    match question.wh() {
        "who" | "what" => "whowhat",
        other => other,
    }
}

fn arguments_overlap(a: &Role, b: &Role, threshold: f64) -> bool {
    a.arguments()
        .iter()
        .any(|x| b.arguments().iter().any(|y| iou(x, y) >= threshold))
}

/// Number of agreeing (a, b) role pairs for one predicate.
///
/// Every pair is considered, so one role may agree with several roles of
/// the other annotator.
#[must_use]
pub fn role_agreement(roles_a: &[Role], roles_b: &[Role], threshold: f64) -> usize {
    let mut matches = 0;
    for a in roles_a {
        for b in roles_b {
            if !arguments_overlap(a, b, threshold) {
                continue;
            }
            if wh_bucket(a.question()) == wh_bucket(b.question()) {
                matches += 1;
            } else {
                log::debug!("Spans agree but wh differs: '{}' vs '{}'", a.text(), b.text());
            }
        }
    }
    matches
}

/// Agreement of annotator `a` with annotator `b` over `b`'s predicates.
///
/// Uses `config.match_threshold` as the overlap threshold.
///
/// # Example
///
/// ```rust
/// use qasrl_core::{Annotations, Argument, PredicateKey, Question, Role};
/// use qasrl_eval::eval::{corpus_agreement, EvalConfig};
///
/// let key = PredicateKey::new("s", 1);
/// let a: Annotations = [(key.clone(), Role::new(Question::new("Who ate?"), [Argument::new(0, 4)?]))]
///     .into_iter().collect();
/// let b: Annotations = [(key, Role::new(Question::new("What ate?"), [Argument::new(2, 6)?]))]
///     .into_iter().collect();
///
/// let counts = corpus_agreement(&a, &b, &EvalConfig::agreement());
/// assert_eq!((counts.matches, counts.total_roles), (1, 1));
/// # Ok::<(), qasrl_core::Error>(())
/// ```
#[must_use]
pub fn corpus_agreement(a: &Annotations, b: &Annotations, config: &EvalConfig) -> AgreementCounts {
    let mut counts = AgreementCounts::default();
    for (key, roles_b) in b.iter() {
        let roles_a = a.get(key);
        let matches = role_agreement(roles_a, roles_b, config.match_threshold);
        counts.matches += matches;
        counts.total_roles += (roles_a.len() + roles_b.len()).saturating_sub(matches);
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use qasrl_core::{Argument, PredicateKey};

    fn role(text: &str, args: &[(usize, usize)]) -> Role {
        Role::new(
            Question::new(text),
            args.iter().map(|&(s, e)| Argument::new(s, e).unwrap()),
        )
    }

    #[test]
    fn test_wh_bucket() {
        assert_eq!(wh_bucket(&Question::new("Who ate?")), "whowhat");
        assert_eq!(wh_bucket(&Question::new("What was eaten?")), "whowhat");
        assert_eq!(wh_bucket(&Question::new("When did it happen?")), "when");
    }

    #[test]
    fn test_requires_wh_and_overlap() {
        let a = [role("Who ate?", &[(0, 4)])];
        assert_eq!(role_agreement(&a, &[role("What ate?", &[(2, 6)])], 0.3), 1);
        // Same overlap, different bucket
        assert_eq!(role_agreement(&a, &[role("Where ate?", &[(2, 6)])], 0.3), 0);
        // Same bucket, overlap below 0.3
        assert_eq!(role_agreement(&a, &[role("Who ate?", &[(3, 10)])], 0.3), 0);
    }

    #[test]
    fn test_all_pairs_counted() {
        let a = [role("Who ate?", &[(0, 2)])];
        let b = [role("Who ate?", &[(0, 2)]), role("What ate?", &[(0, 3)])];
        assert_eq!(role_agreement(&a, &b, 0.3), 2);
    }

    #[test]
    fn test_corpus_totals() {
        let k1 = PredicateKey::new("s", 0);
        let k2 = PredicateKey::new("s", 5);
        let a: Annotations = [
            (k1.clone(), role("Who ate?", &[(0, 2)])),
            (k1.clone(), role("When?", &[(8, 9)])),
        ]
        .into_iter()
        .collect();
        let b: Annotations = [
            (k1, role("Who ate?", &[(0, 2)])),
            (k2, role("What fell?", &[(6, 7)])),
        ]
        .into_iter()
        .collect();

        let counts = corpus_agreement(&a, &b, &EvalConfig::agreement());
        // k1: 1 match, 2 + 1 - 1 = 2 roles; k2: 0 + 1 = 1 role
        assert_eq!(counts, AgreementCounts { matches: 1, total_roles: 3 });
        assert_eq!(counts.ratio(), Some(1.0 / 3.0));
        assert_eq!(AgreementCounts::default().ratio(), None);
    }
}
