//! Questions and the tri-state check contract.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::QuizError;
use crate::model::{QuestionId, QuestionKind, QuestionRecord, Reference};
use crate::registry::VariantRegistry;
use crate::submission::Submission;
use crate::variant::Variant;

/// Outcome of checking one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriState {
    Correct,
    Incorrect,
    /// No answer given. Never a graded wrong answer.
    Unanswered,
}

impl fmt::Display for TriState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriState::Correct => write!(f, "correct"),
            TriState::Incorrect => write!(f, "incorrect"),
            TriState::Unanswered => write!(f, "unanswered"),
        }
    }
}

/// An authored question bound to the variant that grades it.
///
/// Immutable once built; the presentation order is fixed at construction.
#[derive(Debug, Clone)]
pub struct Question {
    id: QuestionId,
    text: String,
    variant: Variant,
    explanation: String,
    references: Vec<Reference>,
    groups: BTreeSet<String>,
}

impl Question {
    /// Build a question from a record, resolving its kind through `registry`.
    ///
    /// The presentation order is the authored one; the engine shuffles it.
    pub fn from_record(record: &QuestionRecord, registry: &VariantRegistry) -> Result<Self, QuizError> {
        let kind = registry.resolve(&record.id, &record.kind)?;
        let variant = Variant::from_record(kind, record)?;
        Ok(Self {
            id: record.id.clone(),
            text: record.text.clone(),
            variant,
            explanation: record.explanation.clone(),
            references: record.references.clone(),
            groups: record.groups.iter().cloned().collect(),
        })
    }

    /// Grade `submission` against this question's answer.
    pub fn check(&self, submission: &Submission) -> TriState {
        if self.variant.is_unanswered(submission) {
            TriState::Unanswered
        } else if self.variant.matches(submission) {
            TriState::Correct
        } else {
            TriState::Incorrect
        }
    }

    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    pub fn kind(&self) -> QuestionKind {
        self.variant.kind()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn variant(&self) -> &Variant {
        &self.variant
    }

    pub(crate) fn variant_mut(&mut self) -> &mut Variant {
        &mut self.variant
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    pub fn references(&self) -> &[Reference] {
        &self.references
    }

    pub fn groups(&self) -> &BTreeSet<String> {
        &self.groups
    }
}
