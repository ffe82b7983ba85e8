//! TP/FP/FN counts and the ratios derived from them.
//!
//! Counts are summed across predicates first and ratios computed once from
//! the totals (micro-averaging). A ratio whose denominator is zero is
//! undefined and comes back as `None`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// True-positive / false-positive / false-negative counts.
///
/// # Example
///
/// ```rust
/// use qasrl_eval::eval::Metrics;
///
/// let total = Metrics::new(3, 1, 0) + Metrics::new(1, 0, 4);
/// assert_eq!(total.as_tuple(), (4, 1, 4));
/// assert_eq!(total.precision(), Some(0.8));
/// assert_eq!(Metrics::default().precision(), None);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Metrics {
    /// Correct predictions
    pub true_positive: usize,
    /// Spurious predictions
    pub false_positive: usize,
    /// Missed reference items
    pub false_negative: usize,
}

impl Metrics {
    /// Create counts from a (TP, FP, FN) triple.
    #[must_use]
    pub fn new(true_positive: usize, false_positive: usize, false_negative: usize) -> Self {
        Self {
            true_positive,
            false_positive,
            false_negative,
        }
    }

    /// Number of predicted items (TP + FP).
    #[must_use]
    pub fn predicted(&self) -> usize {
        self.true_positive + self.false_positive
    }

    /// Number of reference items (TP + FN).
    #[must_use]
    pub fn reference(&self) -> usize {
        self.true_positive + self.false_negative
    }

    /// TP / (TP + FP), or `None` when nothing was predicted.
    #[must_use]
    pub fn precision(&self) -> Option<f64> {
        ratio(self.true_positive, self.predicted())
    }

    /// TP / (TP + FN), or `None` when there is nothing to find.
    #[must_use]
    pub fn recall(&self) -> Option<f64> {
        ratio(self.true_positive, self.reference())
    }

    /// Harmonic mean of precision and recall.
    ///
    /// `None` if either is undefined; `Some(0.0)` if both are zero.
    #[must_use]
    pub fn f1(&self) -> Option<f64> {
        let p = self.precision()?;
        let r = self.recall()?;
        if p + r == 0.0 {
            return Some(0.0);
        }
        Some(2.0 * p * r / (p + r))
    }

    /// The raw (TP, FP, FN) triple.
    #[must_use]
    pub fn as_tuple(&self) -> (usize, usize, usize) {
        (self.true_positive, self.false_positive, self.false_negative)
    }

    /// Add another set of counts into this one.
    pub fn merge(&mut self, other: &Metrics) {
        self.true_positive += other.true_positive;
        self.false_positive += other.false_positive;
        self.false_negative += other.false_negative;
    }
}

fn ratio(numerator: usize, denominator: usize) -> Option<f64> {
    if denominator == 0 {
        None
    } else {
        Some(numerator as f64 / denominator as f64)
    }
}

impl Add for Metrics {
    type Output = Metrics;

    fn add(mut self, rhs: Metrics) -> Metrics {
        self.merge(&rhs);
        self
    }
}

impl AddAssign for Metrics {
    fn add_assign(&mut self, rhs: Metrics) {
        self.merge(&rhs);
    }
}

impl Sum for Metrics {
    fn sum<I: Iterator<Item = Metrics>>(iter: I) -> Self {
        iter.fold(Metrics::default(), Add::add)
    }
}

fn fmt_percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:5.2}%", v * 100.0),
        None => "  n/a ".to_string(),
    }
}

impl fmt::Display for Metrics {
    /// `precision\trecall\tf1` as percentages.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}",
            fmt_percent(self.precision()),
            fmt_percent(self.recall()),
            fmt_percent(self.f1())
        )
    }
}

/// The three metric tiers computed from one alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalCounts {
    /// Span alignment alone
    pub unlabelled_arg: Metrics,
    /// Span alignment plus question equivalence
    pub labelled_arg: Metrics,
    /// Whole reference roles recovered (FP always 0)
    pub role: Metrics,
}

impl EvalCounts {
    /// Add another predicate's counts into this one.
    pub fn merge(&mut self, other: &EvalCounts) {
        self.unlabelled_arg.merge(&other.unlabelled_arg);
        self.labelled_arg.merge(&other.labelled_arg);
        self.role.merge(&other.role);
    }

    /// Markdown table of precision/recall/F1 per tier.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let row = |name: &str, m: &Metrics| {
            format!(
                "| {} | {} | {} | {} | {} | {} | {} |",
                name,
                fmt_percent(m.precision()).trim(),
                fmt_percent(m.recall()).trim(),
                fmt_percent(m.f1()).trim(),
                m.true_positive,
                m.false_positive,
                m.false_negative
            )
        };
        [
            "| Metric | Precision | Recall | F1 | TP | FP | FN |".to_string(),
            "|--------|-----------|--------|----|----|----|----|".to_string(),
            row("Unlabelled Argument", &self.unlabelled_arg),
            row("Labelled Argument", &self.labelled_arg),
            row("Unlabelled Role", &self.role),
        ]
        .join("\n")
    }
}

impl Add for EvalCounts {
    type Output = EvalCounts;

    fn add(mut self, rhs: EvalCounts) -> EvalCounts {
        self.merge(&rhs);
        self
    }
}

impl AddAssign for EvalCounts {
    fn add_assign(&mut self, rhs: EvalCounts) {
        self.merge(&rhs);
    }
}

impl Sum for EvalCounts {
    fn sum<I: Iterator<Item = EvalCounts>>(iter: I) -> Self {
        iter.fold(EvalCounts::default(), Add::add)
    }
}

impl fmt::Display for EvalCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Metrics:\tPrecision\tRecall\tF1")?;
        writeln!(f, "Unlabelled Argument: {}", self.unlabelled_arg)?;
        writeln!(f, "Labelled Argument: {}", self.labelled_arg)?;
        write!(f, "Unlabelled Role: {}", self.role)
    }
}
