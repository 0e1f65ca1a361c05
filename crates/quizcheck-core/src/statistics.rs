//! Result aggregation.
//!
//! A tally over tri-state results: `correct + incorrect + unanswered == total`
//! holds for every input.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::question::{Question, TriState};

/// Counts of each outcome across a set of results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSummary {
    pub correct_count: usize,
    pub incorrect_count: usize,
    pub unanswered_count: usize,
    pub total: usize,
}

impl ScoreSummary {
    /// Add one result to the tally.
    pub fn record(&mut self, result: TriState) {
        match result {
            TriState::Correct => self.correct_count += 1,
            TriState::Incorrect => self.incorrect_count += 1,
            TriState::Unanswered => self.unanswered_count += 1,
        }
        self.total += 1;
    }

    /// Questions that received an answer, right or wrong.
    pub fn answered(&self) -> usize {
        self.correct_count + self.incorrect_count
    }

    /// Fraction of all questions answered correctly; 0.0 for an empty quiz.
    pub fn score_ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct_count as f64 / self.total as f64
        }
    }
}

/// Tally a sequence of results.
pub fn aggregate(results: &[TriState]) -> ScoreSummary {
    let mut summary = ScoreSummary::default();
    for &result in results {
        summary.record(result);
    }
    summary
}

/// Tally results per group tag. A question in several groups counts in each.
///
/// `questions` and `results` are paired by position.
pub fn aggregate_by_group(questions: &[Question], results: &[TriState]) -> BTreeMap<String, ScoreSummary> {
    let mut per_group: BTreeMap<String, ScoreSummary> = BTreeMap::new();
    for (question, &result) in questions.iter().zip(results) {
        for group in question.groups() {
            per_group.entry(group.clone()).or_default().record(result);
        }
    }
    per_group
}
