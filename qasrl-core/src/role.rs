//! Roles and their grouping by predicate occurrence.

use crate::{Argument, Question};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// One verb occurrence: a document and the token index of its predicate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PredicateKey {
    /// Document (sentence) identifier
    pub document_id: String,
    /// Token index of the predicate within the document
    pub predicate_index: usize,
}

impl PredicateKey {
    /// Create a new predicate key.
    #[must_use]
    pub fn new(document_id: impl Into<String>, predicate_index: usize) -> Self {
        Self {
            document_id: document_id.into(),
            predicate_index,
        }
    }
}

impl fmt::Display for PredicateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.document_id, self.predicate_index)
    }
}

/// A question together with the spans that answer it, for one predicate.
///
/// Arguments are held in an ordered set, so duplicates collapse on
/// construction. Roles compare and order by their question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    question: Question,
    arguments: BTreeSet<Argument>,
}

impl Role {
    /// Create a role, deduplicating its arguments.
    #[must_use]
    pub fn new(question: Question, arguments: impl IntoIterator<Item = Argument>) -> Self {
        Self {
            question,
            arguments: arguments.into_iter().collect(),
        }
    }

    /// The role question.
    #[must_use]
    pub fn question(&self) -> &Question {
        &self.question
    }

    /// Answer spans in canonical order.
    #[must_use]
    pub fn arguments(&self) -> &BTreeSet<Argument> {
        &self.arguments
    }

    /// Question text.
    #[must_use]
    pub fn text(&self) -> &str {
        self.question.text()
    }

    /// Whether `arg` answers this role.
    #[must_use]
    pub fn contains(&self, arg: &Argument) -> bool {
        self.arguments.contains(arg)
    }

    /// Copy of this role keeping only the arguments accepted by `keep`.
    #[must_use]
    pub fn filtered(&self, mut keep: impl FnMut(&Argument) -> bool) -> Self {
        Self {
            question: self.question.clone(),
            arguments: self.arguments.iter().copied().filter(|a| keep(a)).collect(),
        }
    }

    fn merge(&mut self, other: Role) {
        self.arguments.extend(other.arguments);
    }
}

impl PartialEq for Role {
    fn eq(&self, other: &Self) -> bool {
        self.question == other.question
    }
}

impl Eq for Role {}

impl PartialOrd for Role {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Role {
    fn cmp(&self, other: &Self) -> Ordering {
        self.question.cmp(&other.question)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ==> ", self.question)?;
        for (i, arg) in self.arguments.iter().enumerate() {
            if i > 0 {
                f.write_str(" / ")?;
            }
            write!(f, "{}", arg)?;
        }
        Ok(())
    }
}

/// Roles grouped by predicate occurrence.
///
/// Keys iterate in canonical order, and the roles of each predicate are kept
/// sorted by question. Inserting a role whose question is already present for
/// that predicate merges the arguments into the existing role.
///
/// # Example
///
/// ```rust
/// use qasrl_core::{Annotations, Argument, PredicateKey, Question, Role};
///
/// let key = PredicateKey::new("doc-1", 2);
/// let mut annotations = Annotations::new();
/// annotations.insert(key.clone(), Role::new(Question::new("Who ate?"), [Argument::new(0, 1)?]));
/// annotations.insert(key.clone(), Role::new(Question::new("Who ate?"), [Argument::new(0, 2)?]));
///
/// assert_eq!(annotations.get(&key).len(), 1);
/// assert_eq!(annotations.get(&key)[0].arguments().len(), 2);
/// assert!(annotations.get(&PredicateKey::new("doc-2", 0)).is_empty());
/// # Ok::<(), qasrl_core::Error>(())
/// ```
///
/// Serialized as a flat list of `[key, role]` pairs. Deserializing goes
/// through [`Annotations::insert`], so input order and repeated questions
/// are normalized the same way as in code.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<(PredicateKey, Role)>", into = "Vec<(PredicateKey, Role)>")]
pub struct Annotations {
    predicates: BTreeMap<PredicateKey, Vec<Role>>,
}

impl Annotations {
    /// Create an empty grouping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a role to a predicate, merging with an existing role of the same question.
    pub fn insert(&mut self, key: PredicateKey, role: Role) {
        let roles = self.predicates.entry(key).or_default();
        match roles.binary_search_by(|r| r.question().cmp(role.question())) {
            Ok(idx) => roles[idx].merge(role),
            Err(idx) => roles.insert(idx, role),
        }
    }

    /// Roles of a predicate, or an empty slice if the predicate is absent.
    #[must_use]
    pub fn get(&self, key: &PredicateKey) -> &[Role] {
        self.predicates.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether the predicate has an entry.
    #[must_use]
    pub fn contains(&self, key: &PredicateKey) -> bool {
        self.predicates.contains_key(key)
    }

    /// Predicate keys in canonical order.
    pub fn predicates(&self) -> impl Iterator<Item = &PredicateKey> {
        self.predicates.keys()
    }

    /// Predicates with their roles, in canonical key order.
    pub fn iter(&self) -> impl Iterator<Item = (&PredicateKey, &[Role])> {
        self.predicates.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Number of predicates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    /// True if no predicate has been inserted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Total number of roles across all predicates.
    #[must_use]
    pub fn num_roles(&self) -> usize {
        self.predicates.values().map(Vec::len).sum()
    }
}

impl FromIterator<(PredicateKey, Role)> for Annotations {
    fn from_iter<I: IntoIterator<Item = (PredicateKey, Role)>>(iter: I) -> Self {
        let mut annotations = Self::new();
        annotations.extend(iter);
        annotations
    }
}

impl From<Vec<(PredicateKey, Role)>> for Annotations {
    fn from(entries: Vec<(PredicateKey, Role)>) -> Self {
        entries.into_iter().collect()
    }
}

impl From<Annotations> for Vec<(PredicateKey, Role)> {
    fn from(annotations: Annotations) -> Self {
        annotations
            .predicates
            .into_iter()
            .flat_map(|(key, roles)| roles.into_iter().map(move |role| (key.clone(), role)))
            .collect()
    }
}

impl Extend<(PredicateKey, Role)> for Annotations {
    fn extend<I: IntoIterator<Item = (PredicateKey, Role)>>(&mut self, iter: I) {
        for (key, role) in iter {
            self.insert(key, role);
        }
    }
}
