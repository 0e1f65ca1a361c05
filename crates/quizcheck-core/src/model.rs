//! Core data model types for quizcheck.
//!
//! These are the authored records the grading engine is built from, in the
//! JSON shape produced by the authoring pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The discriminant selecting which grading and shape rules apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    SingleChoice,
    MultipleChoice,
    Ranking,
    Classification,
}

impl QuestionKind {
    /// All kinds, in wire-tag order.
    pub const ALL: [QuestionKind; 4] = [
        QuestionKind::SingleChoice,
        QuestionKind::MultipleChoice,
        QuestionKind::Ranking,
        QuestionKind::Classification,
    ];

    /// The tag used in question records.
    pub fn tag(self) -> &'static str {
        match self {
            QuestionKind::SingleChoice => "single_choice",
            QuestionKind::MultipleChoice => "multiple_choice",
            QuestionKind::Ranking => "ranking",
            QuestionKind::Classification => "classification",
        }
    }

    /// Whether the presented order must be shuffled regardless of settings.
    ///
    /// A ranking shown in its authored order would already be the answer, and
    /// classification elements are listed in answer order.
    pub fn requires_shuffle(self) -> bool {
        matches!(self, QuestionKind::Ranking | QuestionKind::Classification)
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for QuestionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QuestionKind::ALL
            .into_iter()
            .find(|k| k.tag() == s)
            .ok_or_else(|| format!("unknown question kind: {s}"))
    }
}

/// A question identifier: the sheet row number, or an authored string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuestionId {
    Number(u64),
    Text(String),
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionId::Number(n) => write!(f, "{n}"),
            QuestionId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for QuestionId {
    fn from(n: u64) -> Self {
        QuestionId::Number(n)
    }
}

impl From<&str> for QuestionId {
    fn from(s: &str) -> Self {
        QuestionId::Text(s.to_string())
    }
}

/// A source backing a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// Descriptive text (page name, book title...).
    pub text: String,
    /// Optional HTTP(S) link.
    #[serde(default)]
    pub url: Option<String>,
}

/// A single authored question, as exported.
///
/// `choices` and `answer` stay raw until the question is built, because their
/// shape depends on `kind`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub id: QuestionId,
    pub text: String,
    /// Kind tag; resolved against a registry when the quiz is built.
    #[serde(rename = "type")]
    pub kind: String,
    pub choices: serde_json::Value,
    pub answer: serde_json::Value,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub references: Vec<Reference>,
    /// Tags used to select questions; not consumed by grading.
    #[serde(default)]
    pub groups: Vec<String>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub topics: Vec<String>,
}

impl QuestionRecord {
    /// Whether this record belongs to any of `groups`.
    pub fn in_any_group(&self, groups: &[&str]) -> bool {
        self.groups.iter().any(|g| groups.contains(&g.as_str()))
    }
}

/// A quiz: an ordered collection of question records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSet {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub questions: Vec<QuestionRecord>,
}

impl QuizSet {
    /// Keep only questions tagged with at least one of `groups`.
    pub fn retain_groups(&mut self, groups: &[&str]) {
        self.questions.retain(|q| q.in_any_group(groups));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kind_display_and_parse() {
        assert_eq!(QuestionKind::SingleChoice.to_string(), "single_choice");
        assert_eq!(
            "classification".parse::<QuestionKind>().unwrap(),
            QuestionKind::Classification
        );
        assert!("essay".parse::<QuestionKind>().is_err());
        assert!(QuestionKind::Ranking.requires_shuffle());
        assert!(!QuestionKind::MultipleChoice.requires_shuffle());
    }

    #[test]
    fn question_id_accepts_numbers_and_strings() {
        let n: QuestionId = serde_json::from_value(json!(12)).unwrap();
        let s: QuestionId = serde_json::from_value(json!("q-12")).unwrap();
        assert_eq!(n, QuestionId::Number(12));
        assert_eq!(s.to_string(), "q-12");
    }

    #[test]
    fn record_from_exported_json() {
        let record: QuestionRecord = serde_json::from_value(json!({
            "id": 4,
            "text": "Sort the planets by size",
            "type": "ranking",
            "choices": ["Jupiter", "Earth", "Mars"],
            "answer": ["Jupiter", "Earth", "Mars"],
            "references": [{"text": "NASA fact sheet", "url": "https://nssdc.gsfc.nasa.gov"}],
            "groups": ["astronomy"]
        }))
        .unwrap();
        assert_eq!(record.kind, "ranking");
        assert!(record.explanation.is_empty());
        assert_eq!(record.references[0].url.as_deref(), Some("https://nssdc.gsfc.nasa.gov"));
        assert!(record.in_any_group(&["astronomy", "physics"]));
        assert!(!record.in_any_group(&["history"]));
    }
}
