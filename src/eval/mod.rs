//! QA-SRL evaluation engine.
//!
//! # Overview
//!
//! Predicted question-answer roles are scored against reference roles, one
//! predicate occurrence at a time:
//!
//! 1. **Overlap** ([`overlap`]): IoU between spans, and every
//!    predicted/reference pair reaching the match threshold.
//! 2. **Alignment** ([`align`]): maximum-weight one-to-one matching of
//!    predicted to reference spans.
//! 3. **Consolidation** ([`consolidate`]): leftover predictions that
//!    duplicate each other collapse to one representative.
//! 4. **Metrics** ([`predicate`], [`metrics`]): unlabelled-argument,
//!    labelled-argument and role counts from the one alignment, using an
//!    injected [`RoleEquivalence`] oracle for question equivalence.
//! 5. **Corpus** ([`evaluator`]): counts summed over reference predicates;
//!    ratios computed once from the totals.
//!
//! # Example
//!
//! ```rust
//! use qasrl_core::{Annotations, Argument, PredicateKey, Question, Role};
//! use qasrl_eval::eval::{Evaluator, ParaphraseTable};
//!
//! let key = PredicateKey::new("sent-7", 2);
//! let reference: Annotations = [(
//!     key.clone(),
//!     Role::new(Question::new("What did someone eat?"), [Argument::new(3, 5)?]),
//! )]
//! .into_iter()
//! .collect();
//! let predicted: Annotations = [(
//!     key,
//!     Role::new(Question::new("What was eaten?"), [Argument::new(3, 6)?]),
//! )]
//! .into_iter()
//! .collect();
//!
//! let oracle = ParaphraseTable::new().with_pair("What did someone eat?", "What was eaten?");
//! let result = Evaluator::new(oracle).evaluate(&predicted, &reference);
//! assert_eq!(result.counts.labelled_arg.as_tuple(), (1, 0, 0));
//! assert_eq!(result.counts.role.as_tuple(), (1, 0, 0));
//! # Ok::<(), qasrl_core::Error>(())
//! ```

pub mod agreement;
pub mod align;
pub mod config;
pub mod consolidate;
pub mod evaluator;
pub mod metrics;
pub mod oracle;
pub mod overlap;
pub mod predicate;
pub mod report;

pub use agreement::{corpus_agreement, role_agreement, wh_bucket, AgreementCounts};
pub use align::{align_one_to_one, match_arguments, ArgumentMatching};
pub use config::{EvalConfig, AGREEMENT_IOU_THRESHOLD, STRICT_IOU_THRESHOLD};
pub use consolidate::consolidate_by_overlap;
pub use evaluator::{CorpusEvaluation, Evaluator};
pub use metrics::{EvalCounts, Metrics};
pub use oracle::{ExactMatch, ParaphraseTable, RoleEquivalence};
pub use overlap::{iou, overlapping_pairs, Candidate};
pub use predicate::{collect_arguments, evaluate_predicate, PredicateEvaluation};
pub use report::{consolidate_roles, AlignmentReport, AlignmentRow, Sentences};
