//! Grading engine error types.
//!
//! Construction-time failures abort building a quiz; `InvalidInput` is a
//! caller contract violation reported before any question is graded.

use thiserror::Error;

/// Errors raised while building or grading a quiz.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    /// A record's `type` has no registered variant.
    #[error("question {id}: unknown question kind '{kind}'")]
    UnknownQuestionKind { id: String, kind: String },

    /// The authored answer does not fit the authored choices.
    #[error("question {id}: invalid answer shape: {reason}")]
    InvalidAnswerShape { id: String, reason: String },

    /// Two records share the same id.
    #[error("duplicate question id: {0}")]
    DuplicateQuestionId(String),

    /// Submissions do not line up with the question collection.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl QuizError {
    pub(crate) fn shape(id: impl ToString, reason: impl Into<String>) -> Self {
        QuizError::InvalidAnswerShape {
            id: id.to_string(),
            reason: reason.into(),
        }
    }
}
