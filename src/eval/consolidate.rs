//! Redundancy consolidation for leftover predictions.
//!
//! A system that emits several near-duplicate spans for one answer it got
//! wrong should be charged one false positive, not one per duplicate. Leftover
//! predicted arguments are linked whenever they overlap enough, and each
//! connected component collapses to a single representative.

use super::overlap::iou;
use petgraph::unionfind::UnionFind;
use qasrl_core::Argument;
use std::collections::{BTreeMap, BTreeSet};

/// Collapse mutually overlapping arguments to one representative per component.
///
/// Two arguments are linked when `iou >= threshold`; linking is transitive.
/// The representative of a component is its canonically smallest argument,
/// and the result is sorted.
///
/// # Example
///
/// ```rust
/// use qasrl_core::Argument;
/// use qasrl_eval::eval::consolidate_by_overlap;
///
/// let args = [
///     Argument::new(0, 4).unwrap(),
///     Argument::new(0, 5).unwrap(),
///     Argument::new(10, 12).unwrap(),
/// ];
/// let reps = consolidate_by_overlap(&args, 0.5);
/// assert_eq!(reps, vec![Argument::new(0, 4).unwrap(), Argument::new(10, 12).unwrap()]);
/// ```
#[must_use]
pub fn consolidate_by_overlap<'a, I>(arguments: I, threshold: f64) -> Vec<Argument>
where
    I: IntoIterator<Item = &'a Argument>,
{
    let nodes: Vec<Argument> = arguments
        .into_iter()
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut components = UnionFind::<usize>::new(nodes.len());
    for i in 0..nodes.len() {
        for j in (i + 1)..nodes.len() {
            if iou(&nodes[i], &nodes[j]) >= threshold {
                components.union(i, j);
            }
        }
    }

    // Nodes are sorted, so the first member seen per root is the smallest.
    let mut representatives: BTreeMap<usize, Argument> = BTreeMap::new();
    for (i, arg) in nodes.iter().enumerate() {
        representatives.entry(components.find(i)).or_insert(*arg);
    }

    let mut result: Vec<Argument> = representatives.into_values().collect();
    result.sort();
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arg(start: usize, end: usize) -> Argument {
        Argument::new(start, end).unwrap()
    }

    #[test]
    fn test_empty() {
        let none: [Argument; 0] = [];
        assert!(consolidate_by_overlap(&none, 0.5).is_empty());
    }

    #[test]
    fn test_clique_collapses_to_one() {
        let args = [arg(2, 6), arg(2, 7), arg(3, 6), arg(2, 6)];
        assert_eq!(consolidate_by_overlap(&args, 0.5), vec![arg(2, 6)]);
    }

    #[test]
    fn test_disjoint_spans_survive() {
        let args = [arg(0, 1), arg(1, 2), arg(5, 9), arg(20, 21)];
        assert_eq!(consolidate_by_overlap(&args, 0.5).len(), 4);
    }

    #[test]
    fn test_transitive_chain() {
        // (0,4)~(1,5), (1,5)~(2,6), but iou((0,4),(2,6)) = 1/3
        let args = [arg(0, 4), arg(1, 5), arg(2, 6)];
        assert!(iou(&args[0], &args[2]) < 0.5);
        assert_eq!(consolidate_by_overlap(&args, 0.5), vec![arg(0, 4)]);
    }

    #[test]
    fn test_threshold_controls_grouping() {
        let args = [arg(0, 4), arg(2, 6)];
        assert_eq!(consolidate_by_overlap(&args, 0.5).len(), 2);
        assert_eq!(consolidate_by_overlap(&args, 0.3).len(), 1);
    }
}
