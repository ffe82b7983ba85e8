//! # qasrl-eval
//!
//! Span alignment and scoring for question-answer semantic role annotations.
//!
//! - **Alignment**: IoU candidates, one-to-one maximum-weight matching,
//!   redundancy consolidation of duplicate predictions
//! - **Metrics**: unlabelled argument, labelled argument and role P/R/F1
//!   from a single alignment pass, micro-averaged over predicates
//! - **Oracles**: pluggable question-equivalence judges (exact text,
//!   paraphrase table, or any closure)
//! - **Reports**: flat alignment rows and inter-annotator agreement
//!
//! ## Quick Start
//!
//! ```rust
//! use qasrl_eval::{Annotations, Argument, PredicateKey, Question, Role};
//! use qasrl_eval::eval::{Evaluator, ExactMatch};
//!
//! let key = PredicateKey::new("sent-1", 2);
//! let what = Question::new("What did X eat?");
//!
//! let reference: Annotations =
//!     [(key.clone(), Role::new(what.clone(), [Argument::new(2, 5)?]))].into_iter().collect();
//! let predicted: Annotations = [
//!     (key.clone(), Role::new(what, [Argument::new(2, 5)?])),
//!     (key, Role::new(Question::new("Where did X eat?"), [Argument::new(10, 12)?])),
//! ]
//! .into_iter()
//! .collect();
//!
//! let result = Evaluator::new(ExactMatch).evaluate(&predicted, &reference);
//! assert_eq!(result.counts.unlabelled_arg.as_tuple(), (1, 1, 0));
//! assert_eq!(result.counts.role.as_tuple(), (1, 0, 0));
//! println!("{}", result.counts);
//! # Ok::<(), qasrl_eval::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `eval-parallel`: score predicates on a rayon thread pool
//!
//! ## Design Notes
//!
//! - **Reference defines the universe**: predicted predicates missing from
//!   the reference are skipped, missing predictions count as misses
//! - **Micro-averaging**: counts are summed before ratios are taken
//! - **Undefined, not zero**: a ratio with a zero denominator is `None`
//! - **Role FP is zero**: over-generation is charged at the argument tiers

#![warn(missing_docs)]

mod error;
pub mod eval;

pub use error::{Error, Result};
pub use qasrl_core::{Annotations, Argument, PredicateKey, Question, QuestionSlots, Role};
