//! Grade report types with JSON persistence.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::QuizEngine;
use crate::model::{QuestionId, QuestionKind, QuizSet, Reference};
use crate::question::TriState;
use crate::statistics::{aggregate_by_group, ScoreSummary};

/// A graded quiz session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the session was graded.
    pub created_at: DateTime<Utc>,
    /// Summary of the quiz.
    pub quiz: QuizSummary,
    /// One outcome per question, in quiz order.
    pub outcomes: Vec<QuestionOutcome>,
    /// Overall tally.
    pub summary: ScoreSummary,
    /// Tally per group tag.
    #[serde(default)]
    pub per_group: BTreeMap<String, ScoreSummary>,
}

/// Summary of a quiz set (without the questions).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSummary {
    pub id: String,
    pub name: String,
    pub question_count: usize,
}

/// The result for one question and the content revealed after grading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionOutcome {
    pub question_id: QuestionId,
    pub kind: QuestionKind,
    pub text: String,
    pub result: TriState,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub references: Vec<Reference>,
}

impl GradeReport {
    /// Build a report from a graded engine. Returns `None` before the first check.
    pub fn from_engine(set: &QuizSet, engine: &QuizEngine) -> Option<Self> {
        let results = engine.results()?;
        let summary = engine.summary()?;

        let outcomes = engine
            .questions()
            .iter()
            .zip(results)
            .map(|(q, &result)| QuestionOutcome {
                question_id: q.id().clone(),
                kind: q.kind(),
                text: q.text().to_string(),
                result,
                explanation: q.explanation().to_string(),
                references: q.references().to_vec(),
            })
            .collect();

        Some(Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            quiz: QuizSummary {
                id: set.id.clone(),
                name: set.name.clone(),
                question_count: engine.len(),
            },
            outcomes,
            summary,
            per_group: aggregate_by_group(engine.questions(), results),
        })
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: GradeReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Format the report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!("## {}\n\n", self.quiz.name));
        md.push_str(&format!(
            "**Score:** {}/{} correct, {} incorrect, {} unanswered ({:.1}%)\n\n",
            self.summary.correct_count,
            self.summary.total,
            self.summary.incorrect_count,
            self.summary.unanswered_count,
            self.summary.score_ratio() * 100.0
        ));

        md.push_str("| Question | Kind | Result |\n");
        md.push_str("|----------|------|--------|\n");
        for o in &self.outcomes {
            md.push_str(&format!("| {} | {} | {} |\n", o.question_id, o.kind, o.result));
        }

        if !self.per_group.is_empty() {
            md.push_str("\n### Groups\n\n");
            md.push_str("| Group | Correct | Total |\n");
            md.push_str("|-------|---------|-------|\n");
            for (group, s) in &self.per_group {
                md.push_str(&format!("| {} | {} | {} |\n", group, s.correct_count, s.total));
            }
        }

        md
    }
}
