//! Central grading engine.
//!
//! Owns the ordered questions of one quiz session, grades every question on
//! each check, and keeps the latest results.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::QuizError;
use crate::model::QuestionRecord;
use crate::question::{Question, TriState};
use crate::registry::VariantRegistry;
use crate::statistics::{aggregate, ScoreSummary};
use crate::submission::Submission;

/// Configuration for building a quiz session.
#[derive(Debug, Clone, Default)]
pub struct QuizEngineConfig {
    /// Also shuffle single and multiple choice options.
    pub shuffle_choices: bool,
    /// Seed for a reproducible presentation shuffle.
    pub seed: Option<u64>,
}

/// Where a session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unstarted,
    Graded,
}

/// A quiz session: questions in order plus the latest results.
#[derive(Debug, Clone)]
pub struct QuizEngine {
    questions: Vec<Question>,
    results: Option<Vec<TriState>>,
}

impl QuizEngine {
    /// Build a session, drawing the presentation shuffle from the configured
    /// seed, or from the thread RNG when there is none.
    pub fn new(
        records: &[QuestionRecord],
        registry: &VariantRegistry,
        config: &QuizEngineConfig,
    ) -> Result<Self, QuizError> {
        match config.seed {
            Some(seed) => Self::with_rng(records, registry, config, &mut StdRng::seed_from_u64(seed)),
            None => Self::with_rng(records, registry, config, &mut rand::thread_rng()),
        }
    }

    /// Build a session using `rng` for the presentation shuffle.
    ///
    /// Fails on the first record that cannot be built; nothing is returned
    /// half-built.
    pub fn with_rng<R: Rng + ?Sized>(
        records: &[QuestionRecord],
        registry: &VariantRegistry,
        config: &QuizEngineConfig,
        rng: &mut R,
    ) -> Result<Self, QuizError> {
        let mut seen = HashSet::new();
        let mut questions = Vec::with_capacity(records.len());

        for record in records {
            // ids are compared as displayed: 1 and "1" collide
            let id = record.id.to_string();
            if seen.contains(&id) {
                return Err(QuizError::DuplicateQuestionId(id));
            }
            seen.insert(id);
            let mut question = Question::from_record(record, registry)?;
            question
                .variant_mut()
                .shuffle_presentation(config.shuffle_choices, rng);
            tracing::debug!(id = %question.id(), kind = %question.kind(), "built question");
            questions.push(question);
        }

        Ok(Self {
            questions,
            results: None,
        })
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn state(&self) -> SessionState {
        if self.results.is_some() {
            SessionState::Graded
        } else {
            SessionState::Unstarted
        }
    }

    /// Results of the latest check, if any.
    pub fn results(&self) -> Option<&[TriState]> {
        self.results.as_deref()
    }

    /// Grade every question against its submission, in order.
    ///
    /// `submissions` must pair one-to-one with the questions and each must
    /// have its question's shape; otherwise nothing is graded and the previous
    /// results are kept.
    pub fn check_all(&mut self, submissions: &[Submission]) -> Result<Vec<TriState>, QuizError> {
        if submissions.len() != self.questions.len() {
            return Err(QuizError::InvalidInput(format!(
                "{} submission(s) for {} question(s)",
                submissions.len(),
                self.questions.len()
            )));
        }
        if let Some((question, _)) = self
            .questions
            .iter()
            .zip(submissions)
            .find(|(q, s)| !s.fits(q.kind()))
        {
            return Err(QuizError::InvalidInput(format!(
                "submission for question {} does not fit a {} question",
                question.id(),
                question.kind()
            )));
        }

        let results: Vec<TriState> = self
            .questions
            .iter()
            .zip(submissions)
            .map(|(question, submission)| question.check(submission))
            .collect();

        let summary = aggregate(&results);
        tracing::info!(
            correct = summary.correct_count,
            incorrect = summary.incorrect_count,
            unanswered = summary.unanswered_count,
            total = summary.total,
            "quiz graded"
        );

        self.results = Some(results.clone());
        Ok(results)
    }

    /// Tally a results sequence.
    pub fn aggregate(results: &[TriState]) -> ScoreSummary {
        aggregate(results)
    }

    /// Tally of the latest check, if any.
    pub fn summary(&self) -> Option<ScoreSummary> {
        self.results.as_deref().map(aggregate)
    }
}
