//! quizcheck-core: question model, grading engine, and scoring.
//!
//! This crate defines the question model, the per-kind answer rules, the
//! tri-state check contract, and the aggregation that the rest of quizcheck
//! builds on.

pub mod engine;
pub mod error;
pub mod matching;
pub mod model;
pub mod parser;
pub mod question;
pub mod registry;
pub mod report;
pub mod shuffle;
pub mod statistics;
pub mod submission;
pub mod variant;

pub use engine::{QuizEngine, QuizEngineConfig, SessionState};
pub use error::QuizError;
pub use model::{QuestionId, QuestionKind, QuestionRecord, QuizSet, Reference};
pub use question::{Question, TriState};
pub use registry::VariantRegistry;
pub use statistics::ScoreSummary;
pub use submission::Submission;
