//! # qasrl-core
//!
//! Core types for QA-SRL evaluation: shared data structures used across the workspace.
//!
//! This crate provides:
//! - **Spans**: `Argument`, a validated half-open token interval
//! - **Questions**: `Question` and its `QuestionSlots`
//! - **Roles**: `Role`, a question with its deduplicated answer spans
//! - **Grouping**: `PredicateKey` and `Annotations`, roles grouped by verb occurrence
//!
//! Every other crate in the workspace depends on `qasrl-core` so that predicted
//! and reference annotations share one representation.

#![warn(missing_docs)]

pub mod argument;
pub mod error;
pub mod question;
pub mod role;

pub use argument::Argument;
pub use error::{Error, Result};
pub use question::{Question, QuestionSlots};
pub use role::{Annotations, PredicateKey, Role};
