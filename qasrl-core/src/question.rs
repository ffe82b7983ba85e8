//! Role questions.
//!
//! A QA-SRL question such as "What did someone eat?" is stored both as its
//! literal text and as the template slots it was generated from. Identity is
//! the text alone: two questions with the same text are the same question,
//! whatever their slots say.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Template slots of a QA-SRL question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSlots {
    /// Wh-word, lower-cased ("what", "who", "when", ...)
    pub wh: String,
    /// Subject slot ("someone", "something", or empty)
    pub subj: String,
    /// Object slot
    pub obj: String,
    /// Auxiliary verb ("did", "is", "might", ...)
    pub aux: String,
    /// Preposition
    pub prep: String,
    /// Second object slot
    pub obj2: String,
    /// Passive voice
    pub is_passive: bool,
    /// Negated
    pub is_negated: bool,
}

impl QuestionSlots {
    /// Create slots with only the wh-word set.
    #[must_use]
    pub fn new(wh: impl AsRef<str>) -> Self {
        Self {
            wh: wh.as_ref().to_lowercase(),
            ..Self::default()
        }
    }

    /// Set the subject slot.
    #[must_use]
    pub fn with_subj(mut self, subj: impl Into<String>) -> Self {
        self.subj = subj.into();
        self
    }

    /// Set the object slot.
    #[must_use]
    pub fn with_obj(mut self, obj: impl Into<String>) -> Self {
        self.obj = obj.into();
        self
    }

    /// Set the auxiliary slot.
    #[must_use]
    pub fn with_aux(mut self, aux: impl Into<String>) -> Self {
        self.aux = aux.into();
        self
    }

    /// Set the preposition slot.
    #[must_use]
    pub fn with_prep(mut self, prep: impl Into<String>) -> Self {
        self.prep = prep.into();
        self
    }

    /// Set the second object slot.
    #[must_use]
    pub fn with_obj2(mut self, obj2: impl Into<String>) -> Self {
        self.obj2 = obj2.into();
        self
    }

    /// Mark the question as passive.
    #[must_use]
    pub fn passive(mut self, is_passive: bool) -> Self {
        self.is_passive = is_passive;
        self
    }

    /// Mark the question as negated.
    #[must_use]
    pub fn negated(mut self, is_negated: bool) -> Self {
        self.is_negated = is_negated;
        self
    }
}

/// A role question: literal text plus template slots.
///
/// `Eq`, `Ord` and `Hash` look at [`Question::text`] only.
///
/// # Example
///
/// ```rust
/// use qasrl_core::{Question, QuestionSlots};
///
/// let a = Question::new("What did someone eat?");
/// let b = Question::with_slots("What did someone eat?", QuestionSlots::new("WHAT"));
/// assert_eq!(a, b);
/// assert_eq!(b.slots().wh, "what");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    text: String,
    #[serde(default)]
    slots: QuestionSlots,
}

impl Question {
    /// Create a question with empty slots.
    ///
    /// The wh slot is filled from the first word of the text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let wh = text.split_whitespace().next().unwrap_or_default();
        let slots = QuestionSlots::new(wh);
        Self { text, slots }
    }

    /// Create a question from its text and slots.
    #[must_use]
    pub fn with_slots(text: impl Into<String>, mut slots: QuestionSlots) -> Self {
        slots.wh = slots.wh.to_lowercase();
        Self {
            text: text.into(),
            slots,
        }
    }

    /// Literal question text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Template slots.
    #[must_use]
    pub fn slots(&self) -> &QuestionSlots {
        &self.slots
    }

    /// Lower-cased wh-word.
    #[must_use]
    pub fn wh(&self) -> &str {
        &self.slots.wh
    }
}

impl PartialEq for Question {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for Question {}

impl Hash for Question {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl PartialOrd for Question {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Question {
    fn cmp(&self, other: &Self) -> Ordering {
        self.text.cmp(&other.text)
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
