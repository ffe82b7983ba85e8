//! Span overlap scoring and match-candidate enumeration.

use qasrl_core::Argument;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Intersection-over-union of two spans.
///
/// Symmetric, 1.0 for identical spans, 0.0 for disjoint or touching spans.
///
/// # Example
///
/// ```rust
/// use qasrl_core::Argument;
/// use qasrl_eval::eval::iou;
///
/// let a = Argument::new(0, 4).unwrap();
/// let b = Argument::new(2, 6).unwrap();
/// assert!((iou(&a, &b) - 1.0 / 3.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn iou(a: &Argument, b: &Argument) -> f64 {
    // union >= max(len) >= 1 for validated arguments
    a.intersection_len(b) as f64 / a.union_len(b) as f64
}

/// A predicted/reference pair whose overlap reaches the match threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Predicted span
    pub predicted: Argument,
    /// Reference span
    pub reference: Argument,
    /// IoU of the two spans
    pub score: f64,
}

/// Every predicted/reference pair with `iou >= threshold`.
///
/// Inputs are deduplicated and sorted first, and pairs come out
/// predicted-major in canonical order. The matcher breaks ties by input
/// order, so this makes alignment independent of how callers iterate.
#[must_use]
pub fn overlapping_pairs<'a, P, R>(predicted: P, reference: R, threshold: f64) -> Vec<Candidate>
where
    P: IntoIterator<Item = &'a Argument>,
    R: IntoIterator<Item = &'a Argument>,
{
    let predicted: BTreeSet<Argument> = predicted.into_iter().copied().collect();
    let reference: BTreeSet<Argument> = reference.into_iter().copied().collect();

    let mut candidates = Vec::new();
    for p in &predicted {
        for r in &reference {
            let score = iou(p, r);
            if score >= threshold {
                candidates.push(Candidate {
                    predicted: *p,
                    reference: *r,
                    score,
                });
            }
        }
    }
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arg(start: usize, end: usize) -> Argument {
        Argument::new(start, end).unwrap()
    }

    #[test]
    fn test_iou_basic() {
        assert_eq!(iou(&arg(3, 7), &arg(3, 7)), 1.0);
        assert_eq!(iou(&arg(0, 2), &arg(2, 4)), 0.0);
        assert_eq!(iou(&arg(0, 2), &arg(5, 9)), 0.0);
        assert!((iou(&arg(0, 4), &arg(2, 6)) - 0.333_333).abs() < 1e-5);
        assert_eq!(iou(&arg(0, 4), &arg(0, 2)), 0.5);
    }

    #[test]
    fn test_iou_symmetric() {
        let a = arg(1, 9);
        let b = arg(4, 12);
        assert_eq!(iou(&a, &b), iou(&b, &a));
    }

    #[test]
    fn test_threshold_inclusive() {
        // iou = 0.5 exactly
        let candidates = overlapping_pairs(&[arg(0, 4)], &[arg(0, 2)], 0.5);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].score, 0.5);

        let none = overlapping_pairs(&[arg(0, 4)], &[arg(2, 6)], 0.5);
        assert!(none.is_empty());
    }

    #[test]
    fn test_canonical_order_regardless_of_input() {
        let sys_a = [arg(5, 8), arg(0, 3), arg(0, 2)];
        let sys_b = [arg(0, 2), arg(5, 8), arg(0, 3), arg(0, 2)];
        let grt_a = [arg(5, 7), arg(0, 3)];
        let grt_b = [arg(0, 3), arg(5, 7)];

        let a = overlapping_pairs(&sys_a, &grt_a, 0.5);
        let b = overlapping_pairs(&sys_b, &grt_b, 0.5);
        assert_eq!(a, b);

        let pairs: Vec<(Argument, Argument)> =
            a.iter().map(|c| (c.predicted, c.reference)).collect();
        assert_eq!(
            pairs,
            vec![
                (arg(0, 2), arg(0, 3)),
                (arg(0, 3), arg(0, 3)),
                (arg(5, 8), arg(5, 7)),
            ]
        );
    }
}
