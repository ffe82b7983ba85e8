//! One-to-one alignment of predicted and reference spans.
//!
//! # Algorithm
//!
//! The candidate pairs form a bipartite graph: predicted arguments on one
//! side, reference arguments on the other, IoU on the edges. The two sides
//! are the rows and columns of an assignment matrix, so a span that appears
//! in both sets is still two distinct nodes.
//!
//! The matrix is solved with the Hungarian (Kuhn-Munkres) method. Cells
//! without a candidate weigh 0 and mean "unmatched". Weights are IoU in
//! integer micro-units multiplied by `K = min(rows, cols) + 1`, plus a
//! `+1` per edge. Any gain in total IoU dominates the cardinality bonus, so
//! the optimum is a maximum-weight matching, and among those the one with
//! most pairs.
//!
//! Rows and columns are visited in canonical order, which keeps tie-breaking
//! reproducible.

use super::consolidate::consolidate_by_overlap;
use super::overlap::{overlapping_pairs, Candidate};
use super::EvalConfig;
use qasrl_core::Argument;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// IoU resolution of the assignment weights.
const WEIGHT_SCALE: f64 = 1_000_000.0;

/// Result of matching one predicate's predicted arguments to its reference arguments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArgumentMatching {
    /// Injective map predicted -> reference, covering matched pairs only.
    /// Serialized as a list of `[predicted, reference]` pairs.
    #[serde(with = "matched_pairs")]
    pub matched: BTreeMap<Argument, Argument>,
    /// Unmatched predicted arguments after redundancy consolidation
    pub unmatched_predicted: Vec<Argument>,
    /// Reference arguments no prediction was aligned to
    pub unmatched_reference: Vec<Argument>,
}

impl ArgumentMatching {
    /// Whether `arg` survives alignment and consolidation on the predicted side.
    #[must_use]
    pub fn keeps_predicted(&self, arg: &Argument) -> bool {
        self.matched.contains_key(arg) || self.unmatched_predicted.binary_search(arg).is_ok()
    }
}

mod matched_pairs {
    use qasrl_core::Argument;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::collections::{BTreeMap, BTreeSet};

    pub fn serialize<S: Serializer>(
        matched: &BTreeMap<Argument, Argument>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(matched.iter())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<Argument, Argument>, D::Error> {
        let pairs = Vec::<(Argument, Argument)>::deserialize(deserializer)?;
        let targets: BTreeSet<Argument> = pairs.iter().map(|(_, r)| *r).collect();
        let matched: BTreeMap<Argument, Argument> = pairs.iter().copied().collect();
        if matched.len() != pairs.len() || targets.len() != pairs.len() {
            return Err(D::Error::custom("matched pairs must be one-to-one"));
        }
        Ok(matched)
    }
}

/// Align predicted to reference arguments and consolidate the leftovers.
///
/// Both inputs are treated as sets.
#[must_use]
pub fn match_arguments(
    predicted: &BTreeSet<Argument>,
    reference: &BTreeSet<Argument>,
    config: &EvalConfig,
) -> ArgumentMatching {
    let candidates = overlapping_pairs(predicted, reference, config.match_threshold);
    let matched = align_one_to_one(&candidates);

    let leftover: Vec<Argument> = predicted
        .iter()
        .filter(|arg| !matched.contains_key(*arg))
        .copied()
        .collect();
    let unmatched_predicted = consolidate_by_overlap(&leftover, config.consolidation_threshold);

    let aligned: BTreeSet<&Argument> = matched.values().collect();
    let unmatched_reference = reference
        .iter()
        .filter(|arg| !aligned.contains(arg))
        .copied()
        .collect();

    ArgumentMatching {
        matched,
        unmatched_predicted,
        unmatched_reference,
    }
}

/// Maximum-weight, then maximum-cardinality, one-to-one matching over candidates.
///
/// Returns a predicted -> reference map that is injective in both directions.
///
/// # Example
///
/// ```rust
/// use qasrl_core::Argument;
/// use qasrl_eval::eval::{align_one_to_one, overlapping_pairs};
///
/// let a = |s, e| Argument::new(s, e).unwrap();
/// // (0,4) overlaps both references; the matcher keeps both pairs
/// let sys = [a(0, 4), a(0, 2)];
/// let grt = [a(0, 3), a(1, 4)];
/// let map = align_one_to_one(&overlapping_pairs(&sys, &grt, 0.5));
/// assert_eq!(map.len(), 2);
/// assert_eq!(map[&a(0, 2)], a(0, 3));
/// assert_eq!(map[&a(0, 4)], a(1, 4));
/// ```
#[must_use]
pub fn align_one_to_one(candidates: &[Candidate]) -> BTreeMap<Argument, Argument> {
    if candidates.is_empty() {
        return BTreeMap::new();
    }

    let predicted: Vec<Argument> = candidates
        .iter()
        .map(|c| c.predicted)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let reference: Vec<Argument> = candidates
        .iter()
        .map(|c| c.reference)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let bonus_base = predicted.len().min(reference.len()) as i64 + 1;
    let mut weights = vec![vec![0i64; reference.len()]; predicted.len()];
    for c in candidates {
        // Both sides were built from these candidates
        let (Ok(i), Ok(j)) = (
            predicted.binary_search(&c.predicted),
            reference.binary_search(&c.reference),
        ) else {
            continue;
        };
        let scaled = (c.score * WEIGHT_SCALE).round() as i64;
        weights[i][j] = scaled * bonus_base + 1;
    }

    let pairs = if predicted.len() <= reference.len() {
        max_weight_assignment(&weights)
    } else {
        max_weight_assignment(&transpose(&weights))
            .into_iter()
            .map(|(j, i)| (i, j))
            .collect()
    };

    pairs
        .into_iter()
        .filter(|&(i, j)| weights[i][j] > 0)
        .map(|(i, j)| (predicted[i], reference[j]))
        .collect()
}

fn transpose(matrix: &[Vec<i64>]) -> Vec<Vec<i64>> {
    let cols = matrix.first().map_or(0, Vec::len);
    (0..cols)
        .map(|j| matrix.iter().map(|row| row[j]).collect())
        .collect()
}

/// Hungarian method on an `n x m` weight matrix with `n <= m`, maximizing.
///
/// Every row is assigned a distinct column; returns `(row, col)` pairs.
fn max_weight_assignment(weights: &[Vec<i64>]) -> Vec<(usize, usize)> {
    let n = weights.len();
    let m = weights.first().map_or(0, Vec::len);
    debug_assert!(n <= m);
    if n == 0 {
        return Vec::new();
    }

    const INF: i64 = i64::MAX / 4;
    // 1-based potentials; column 0 is a virtual source.
    let mut u = vec![0i64; n + 1];
    let mut v = vec![0i64; m + 1];
    let mut owner = vec![0usize; m + 1];
    let mut way = vec![0usize; m + 1];

    for row in 1..=n {
        owner[0] = row;
        let mut j0 = 0usize;
        let mut min_slack = vec![INF; m + 1];
        let mut used = vec![false; m + 1];

        loop {
            used[j0] = true;
            let i0 = owner[j0];
            let mut delta = INF;
            let mut j1 = 0usize;
            for j in 1..=m {
                if used[j] {
                    continue;
                }
                let cost = -weights[i0 - 1][j - 1] - u[i0] - v[j];
                if cost < min_slack[j] {
                    min_slack[j] = cost;
                    way[j] = j0;
                }
                if min_slack[j] < delta {
                    delta = min_slack[j];
                    j1 = j;
                }
            }
            for j in 0..=m {
                if used[j] {
                    u[owner[j]] += delta;
                    v[j] -= delta;
                } else {
                    min_slack[j] -= delta;
                }
            }
            j0 = j1;
            if owner[j0] == 0 {
                break;
            }
        }

        // Flip the augmenting path
        loop {
            let j1 = way[j0];
            owner[j0] = owner[j1];
            j0 = j1;
            if j0 == 0 {
                break;
            }
        }
    }

    (1..=m)
        .filter(|&j| owner[j] != 0)
        .map(|j| (owner[j] - 1, j - 1))
        .collect()
}
