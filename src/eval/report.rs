//! Flat alignment report.
//!
//! One row per predicted or reference (argument, question) pair, joined
//! through the argument alignment, with the answer text pulled from the
//! sentence tokens. The report is a projection of the alignment the metrics
//! were computed from; it adds no scoring logic.
//!
//! Predicted roles are consolidated first: arguments dropped as redundant
//! duplicates are removed, and so are roles left without arguments. A role
//! can therefore vanish from the report when all of its spans were
//! duplicates of spans answered under another question.

use super::align::ArgumentMatching;
use super::oracle::RoleEquivalence;
use super::Evaluator;
use crate::Result;
use qasrl_core::{Annotations, Argument, PredicateKey, Role};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Sentence tokens keyed by document id.
pub type Sentences = HashMap<String, Vec<String>>;

/// One line of the alignment report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentRow {
    /// Predicate the row belongs to
    pub key: PredicateKey,
    /// Predicted span, if any
    pub predicted_arg: Option<Argument>,
    /// Reference span, if any
    pub reference_arg: Option<Argument>,
    /// Predicted question text
    pub predicted_role: Option<String>,
    /// Reference question text
    pub reference_role: Option<String>,
    /// Predicted answer text
    pub predicted_text: Option<String>,
    /// Reference answer text
    pub reference_text: Option<String>,
}

/// Alignment rows for a whole corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentReport {
    /// Rows sorted by predicate key, then reference role, with rows
    /// lacking a reference role last
    pub rows: Vec<AlignmentRow>,
}

impl AlignmentReport {
    /// Align every reference predicate and project the result into rows.
    pub fn build<O: RoleEquivalence>(
        predicted: &Annotations,
        reference: &Annotations,
        evaluator: &Evaluator<O>,
        sentences: &Sentences,
    ) -> Self {
        let mut rows = Vec::new();
        for (key, evaluation) in evaluator.evaluate_each(predicted, reference) {
            let tokens = sentences.get(&key.document_id).map(Vec::as_slice);
            if tokens.is_none() {
                log::warn!("No tokens for document '{}'; answer text left empty", key.document_id);
            }
            let consolidated = consolidate_roles(predicted.get(&key), &evaluation.matching);
            rows.extend(project_predicate(
                &key,
                &consolidated,
                reference.get(&key),
                &evaluation.matching,
                tokens,
            ));
        }

        // Rows without a reference role go last within their predicate
        rows.sort_by(|a, b| {
            a.key.cmp(&b.key).then_with(|| {
                (a.reference_role.is_none(), &a.reference_role)
                    .cmp(&(b.reference_role.is_none(), &b.reference_role))
            })
        });
        Self { rows }
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if the report has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Serialize as JSON lines, one row per line.
    pub fn to_json_lines(&self) -> Result<String> {
        let mut out = String::new();
        for row in &self.rows {
            out.push_str(&serde_json::to_string(row)?);
            out.push('\n');
        }
        Ok(out)
    }
}

/// Predicted roles restricted to arguments kept by alignment and consolidation.
#[must_use]
pub fn consolidate_roles(predicted: &[Role], matching: &ArgumentMatching) -> Vec<Role> {
    predicted
        .iter()
        .map(|role| role.filtered(|arg| matching.keeps_predicted(arg)))
        .filter(|role| !role.arguments().is_empty())
        .collect()
}

fn answer_text(arg: &Argument, tokens: Option<&[String]>) -> Option<String> {
    arg.slice(tokens?).map(|span| span.join(" "))
}

/// Outer join of predicted and reference (argument, question) pairs on the alignment.
fn project_predicate(
    key: &PredicateKey,
    predicted: &[Role],
    reference: &[Role],
    matching: &ArgumentMatching,
    tokens: Option<&[String]>,
) -> Vec<AlignmentRow> {
    let reference_pairs: Vec<(Argument, &str)> = reference
        .iter()
        .flat_map(|role| role.arguments().iter().map(move |arg| (*arg, role.text())))
        .collect();
    let mut joined = vec![false; reference_pairs.len()];
    let mut rows = Vec::new();

    let row = |sys: Option<(Argument, &str)>, grt: Option<(Argument, &str)>| AlignmentRow {
        key: key.clone(),
        predicted_arg: sys.map(|(a, _)| a),
        reference_arg: grt.map(|(a, _)| a),
        predicted_role: sys.map(|(_, q)| q.to_string()),
        reference_role: grt.map(|(_, q)| q.to_string()),
        predicted_text: sys.and_then(|(a, _)| answer_text(&a, tokens)),
        reference_text: grt.and_then(|(a, _)| answer_text(&a, tokens)),
    };

    for role in predicted {
        for sys_arg in role.arguments() {
            let sys = Some((*sys_arg, role.text()));
            let aligned = matching.matched.get(sys_arg);
            let mut any = false;
            for (idx, grt) in reference_pairs.iter().enumerate() {
                if Some(&grt.0) == aligned {
                    joined[idx] = true;
                    any = true;
                    rows.push(row(sys, Some(*grt)));
                }
            }
            if !any {
                rows.push(row(sys, None));
            }
        }
    }

    for (idx, grt) in reference_pairs.iter().enumerate() {
        if !joined[idx] {
            rows.push(row(None, Some(*grt)));
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::ExactMatch;
    use qasrl_core::Question;

    fn arg(start: usize, end: usize) -> Argument {
        Argument::new(start, end).unwrap()
    }

    fn entry(text: &str, args: &[(usize, usize)]) -> (PredicateKey, Role) {
        (
            PredicateKey::new("s1", 2),
            Role::new(Question::new(text), args.iter().map(|&(s, e)| arg(s, e))),
        )
    }

    fn sentences() -> Sentences {
        let tokens = "The old man ate the soup in the kitchen quickly";
        [("s1".to_string(), tokens.split(' ').map(String::from).collect())]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_rows_cover_matched_and_unmatched() {
        let reference: Annotations = [
            entry("Who ate something?", &[(0, 3)]),
            entry("What did someone eat?", &[(3, 5)]),
        ]
        .into_iter()
        .collect();
        let predicted: Annotations = [
            entry("Who ate something?", &[(1, 3)]),
            entry("Where did someone eat?", &[(6, 9), (7, 9)]),
        ]
        .into_iter()
        .collect();

        let report = AlignmentReport::build(
            &predicted,
            &reference,
            &Evaluator::new(ExactMatch),
            &sentences(),
        );

        // matched (1,3)->(0,3), one consolidated leftover, one missed reference
        assert_eq!(report.len(), 3);

        let matched = report
            .rows
            .iter()
            .find(|r| r.predicted_arg.is_some() && r.reference_arg.is_some())
            .unwrap();
        assert_eq!(matched.predicted_text.as_deref(), Some("old man"));
        assert_eq!(matched.reference_text.as_deref(), Some("The old man"));

        let spurious = report.rows.iter().find(|r| r.reference_arg.is_none()).unwrap();
        assert_eq!(spurious.predicted_arg, Some(arg(6, 9)));
        assert_eq!(spurious.predicted_text.as_deref(), Some("in the kitchen"));

        let missed = report.rows.iter().find(|r| r.predicted_arg.is_none()).unwrap();
        assert_eq!(missed.reference_role.as_deref(), Some("What did someone eat?"));
        assert_eq!(missed.predicted_role, None);
    }

    #[test]
    fn test_rows_without_reference_sort_last() {
        let reference: Annotations = [
            entry("Who ate something?", &[(0, 3)]),
            entry("What did someone eat?", &[(3, 5)]),
        ]
        .into_iter()
        .collect();
        let predicted: Annotations = [
            entry("Who ate something?", &[(0, 3)]),
            entry("Where did someone eat?", &[(6, 9)]),
        ]
        .into_iter()
        .collect();

        let report = AlignmentReport::build(
            &predicted,
            &reference,
            &Evaluator::new(ExactMatch),
            &sentences(),
        );
        let roles: Vec<Option<&str>> = report
            .rows
            .iter()
            .map(|r| r.reference_role.as_deref())
            .collect();
        assert_eq!(
            roles,
            vec![Some("What did someone eat?"), Some("Who ate something?"), None]
        );
        assert_eq!(report.rows[2].predicted_arg, Some(arg(6, 9)));
    }

    #[test]
    fn test_consolidated_role_dropped() {
        let matching = ArgumentMatching {
            unmatched_predicted: vec![arg(0, 3)],
            ..Default::default()
        };
        let roles = vec![
            Role::new(Question::new("A?"), [arg(0, 3)]),
            Role::new(Question::new("B?"), [arg(0, 4)]),
        ];
        let kept = consolidate_roles(&roles, &matching);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].text(), "A?");
    }

    #[test]
    fn test_json_lines_and_missing_tokens() {
        let reference: Annotations = [entry("Who ate?", &[(0, 3)])].into_iter().collect();
        let report = AlignmentReport::build(
            &Annotations::new(),
            &reference,
            &Evaluator::new(ExactMatch),
            &Sentences::new(),
        );
        assert_eq!(report.len(), 1);
        assert_eq!(report.rows[0].reference_text, None);

        let lines = report.to_json_lines().unwrap();
        assert_eq!(lines.lines().count(), 1);
        let row: AlignmentRow = serde_json::from_str(lines.trim()).unwrap();
        assert_eq!(row, report.rows[0]);
    }
}
