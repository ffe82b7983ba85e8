//! Answer spans.
//!
//! An [`Argument`] is a half-open `[start, end)` interval over the token
//! sequence of a sentence. It is a plain value: two arguments with the same
//! offsets are the same argument, whichever role or annotator produced them.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A half-open token span `[start, end)` answering a role question.
///
/// Construction rejects empty and inverted spans, so every `Argument` in the
/// system has a strictly positive length.
///
/// # Example
///
/// ```rust
/// use qasrl_core::Argument;
///
/// let arg = Argument::new(2, 5).unwrap();
/// assert_eq!(arg.len(), 3);
/// assert!(Argument::new(5, 5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "(usize, usize)", into = "(usize, usize)")]
pub struct Argument {
    start: usize,
    end: usize,
}

impl Argument {
    /// Create a new argument, validating `start < end`.
    pub fn new(start: usize, end: usize) -> Result<Self> {
        if start >= end {
            return Err(Error::malformed_span(start, end));
        }
        Ok(Self { start, end })
    }

    /// First token index (inclusive).
    #[inline]
    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Last token index (exclusive).
    #[inline]
    #[must_use]
    pub fn end(&self) -> usize {
        self.end
    }

    /// Number of tokens covered. Always at least 1.
    #[inline]
    #[must_use]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Number of tokens shared with `other` (0 for disjoint or touching spans).
    #[must_use]
    pub fn intersection_len(&self, other: &Self) -> usize {
        let max_start = self.start.max(other.start);
        let min_end = self.end.min(other.end);
        min_end.saturating_sub(max_start)
    }

    /// Number of tokens covered by either span.
    #[must_use]
    pub fn union_len(&self, other: &Self) -> usize {
        self.len() + other.len() - self.intersection_len(other)
    }

    /// Slice the covered tokens out of a sentence, if the span is in bounds.
    #[must_use]
    pub fn slice<'a, T>(&self, tokens: &'a [T]) -> Option<&'a [T]> {
        tokens.get(self.start..self.end)
    }
}

impl TryFrom<(usize, usize)> for Argument {
    type Error = Error;

    fn try_from((start, end): (usize, usize)) -> Result<Self> {
        Self::new(start, end)
    }
}

impl From<Argument> for (usize, usize) {
    fn from(arg: Argument) -> Self {
        (arg.start, arg.end)
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arg(start: usize, end: usize) -> Argument {
        Argument::new(start, end).unwrap()
    }

    #[test]
    fn test_rejects_empty_and_inverted() {
        assert_eq!(
            Argument::new(3, 3),
            Err(Error::MalformedSpan { start: 3, end: 3 })
        );
        assert!(Argument::new(4, 1).is_err());
        assert!(Argument::new(0, 1).is_ok());
    }

    #[test]
    fn test_intersection_and_union() {
        let a = arg(0, 4);
        let b = arg(2, 6);
        assert_eq!(a.intersection_len(&b), 2);
        assert_eq!(a.union_len(&b), 6);

        // Touching spans share nothing
        assert_eq!(arg(0, 2).intersection_len(&arg(2, 4)), 0);
        assert_eq!(arg(0, 2).intersection_len(&arg(7, 9)), 0);
    }

    #[test]
    fn test_canonical_order() {
        let mut args = vec![arg(3, 4), arg(0, 5), arg(0, 2)];
        args.sort();
        assert_eq!(args, vec![arg(0, 2), arg(0, 5), arg(3, 4)]);
    }

    #[test]
    fn test_slice() {
        let tokens = ["The", "cat", "ate", "the", "fish"];
        assert_eq!(arg(3, 5).slice(&tokens), Some(&["the", "fish"][..]));
        assert_eq!(arg(4, 9).slice(&tokens), None);
    }

    #[test]
    fn test_serde_validates() {
        let ok: Argument = serde_json::from_str("[1, 3]").unwrap();
        assert_eq!(ok, arg(1, 3));
        assert_eq!(serde_json::to_string(&ok).unwrap(), "[1,3]");

        let bad: std::result::Result<Argument, _> = serde_json::from_str("[3, 1]");
        assert!(bad.is_err());
    }
}
