//! Role-equivalence strategies.
//!
//! Whether two questions denote the same semantic role is a judgement the
//! matcher takes as given. The judge is injected through [`RoleEquivalence`]
//! so the labelling policy can change without touching alignment.
//!
//! | Strategy | Decision |
//! |----------|----------|
//! | [`ExactMatch`] | literal question text equality |
//! | [`ParaphraseTable`] | precomputed table of equivalent text pairs |
//! | any `Fn(&Question, &Question) -> bool` | caller-supplied (e.g. a paraphrase model) |

use qasrl_core::Question;
use std::collections::{HashMap, HashSet};

/// Judge of whether a predicted and a reference question express the same role.
///
/// Implementations must be pure: the evaluator may call them from several
/// threads and in any order.
pub trait RoleEquivalence: Send + Sync {
    /// True if `predicted` and `reference` denote the same role.
    fn is_equivalent(&self, predicted: &Question, reference: &Question) -> bool;
}

impl<F> RoleEquivalence for F
where
    F: Fn(&Question, &Question) -> bool + Send + Sync,
{
    fn is_equivalent(&self, predicted: &Question, reference: &Question) -> bool {
        self(predicted, reference)
    }
}

/// Questions are equivalent iff their texts are identical.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactMatch;

impl RoleEquivalence for ExactMatch {
    fn is_equivalent(&self, predicted: &Question, reference: &Question) -> bool {
        predicted == reference
    }
}

/// Lookup table of question texts judged to be paraphrases.
///
/// Pairs are symmetric, and identical texts are always equivalent.
///
/// # Example
///
/// ```rust
/// use qasrl_core::Question;
/// use qasrl_eval::eval::{ParaphraseTable, RoleEquivalence};
///
/// let table = ParaphraseTable::new()
///     .with_pair("What did someone eat?", "What was eaten?");
/// let a = Question::new("What was eaten?");
/// let b = Question::new("What did someone eat?");
/// assert!(table.is_equivalent(&a, &b));
/// assert!(!table.is_equivalent(&a, &Question::new("Who ate?")));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ParaphraseTable {
    // Holds both directions of every pair
    equivalents: HashMap<String, HashSet<String>>,
    pairs: usize,
}

impl ParaphraseTable {
    /// Create an empty table (behaves like [`ExactMatch`]).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record two question texts as equivalent.
    pub fn insert(&mut self, a: impl Into<String>, b: impl Into<String>) {
        let (a, b) = (a.into(), b.into());
        if !self.equivalents.entry(a.clone()).or_default().insert(b.clone()) {
            return;
        }
        self.pairs += 1;
        if a != b {
            self.equivalents.entry(b).or_default().insert(a);
        }
    }

    /// Builder form of [`ParaphraseTable::insert`].
    #[must_use]
    pub fn with_pair(mut self, a: impl Into<String>, b: impl Into<String>) -> Self {
        self.insert(a, b);
        self
    }

    /// Number of recorded pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs
    }

    /// True if no pair has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs == 0
    }

    fn contains(&self, a: &str, b: &str) -> bool {
        self.equivalents
            .get(a)
            .is_some_and(|equivalents| equivalents.contains(b))
    }
}

impl<A, B> FromIterator<(A, B)> for ParaphraseTable
where
    A: Into<String>,
    B: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (A, B)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (a, b) in iter {
            table.insert(a, b);
        }
        table
    }
}

impl RoleEquivalence for ParaphraseTable {
    fn is_equivalent(&self, predicted: &Question, reference: &Question) -> bool {
        predicted == reference || self.contains(predicted.text(), reference.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn judge<O: RoleEquivalence>(oracle: &O, a: &str, b: &str) -> bool {
        oracle.is_equivalent(&Question::new(a), &Question::new(b))
    }

    #[test]
    fn test_exact_match() {
        assert!(judge(&ExactMatch, "Who ate?", "Who ate?"));
        assert!(!judge(&ExactMatch, "Who ate?", "who ate?"));
    }

    #[test]
    fn test_table_is_symmetric() {
        let table: ParaphraseTable = [("Who ate?", "Who ate something?")].into_iter().collect();
        assert_eq!(table.len(), 1);
        assert!(judge(&table, "Who ate?", "Who ate something?"));
        assert!(judge(&table, "Who ate something?", "Who ate?"));
        assert!(judge(&table, "When?", "When?"));
        assert!(!judge(&table, "Who ate?", "When?"));
    }

    #[test]
    fn test_table_counts_unordered_pairs() {
        let mut table = ParaphraseTable::new();
        table.insert("What was eaten?", "What did someone eat?");
        table.insert("What did someone eat?", "What was eaten?");
        table.insert("When?", "When?");
        assert_eq!(table.len(), 2);

        table.insert("What was eaten?", "What got eaten?");
        assert_eq!(table.len(), 3);
        assert!(judge(&table, "What got eaten?", "What was eaten?"));
        // Not transitive
        assert!(!judge(&table, "What got eaten?", "What did someone eat?"));
        assert!(ParaphraseTable::new().is_empty());
    }

    #[test]
    fn test_closure_oracle() {
        let same_wh = |p: &Question, r: &Question| p.wh() == r.wh();
        assert!(judge(&same_wh, "What did X eat?", "What was eaten?"));
        assert!(!judge(&same_wh, "What did X eat?", "Who ate?"));
    }
}
