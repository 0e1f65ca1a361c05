//! JSON quiz parser.
//!
//! Loads quiz sets and submissions from JSON files and directories, validates
//! them, and provides the cell/URL helpers shared with the authoring pipeline.

use std::collections::HashSet;
use std::path::Path;
use std::sync::OnceLock;

use anyhow::{Context, Result};
use regex::Regex;

use crate::error::QuizError;
use crate::model::{QuestionRecord, QuizSet};
use crate::question::Question;
use crate::registry::VariantRegistry;
use crate::submission::Submission;
use crate::variant::Variant;

/// Parse a single JSON file into a `QuizSet`.
pub fn parse_quiz(path: &Path) -> Result<QuizSet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read quiz file: {}", path.display()))?;

    parse_quiz_str(&content, path)
}

/// Parse a JSON string into a `QuizSet` (useful for testing).
///
/// A bare array takes its id and name from the file stem.
pub fn parse_quiz_str(content: &str, source_path: &Path) -> Result<QuizSet> {
    // a quiz file is either a full set or a bare array of exported records
    if !content.trim_start().starts_with('[') {
        return serde_json::from_str(content)
            .with_context(|| format!("failed to parse quiz JSON: {}", source_path.display()));
    }

    let questions: Vec<QuestionRecord> = serde_json::from_str(content)
        .with_context(|| format!("failed to parse quiz JSON: {}", source_path.display()))?;
    let stem = source_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "quiz".to_string());
    Ok(QuizSet {
        id: stem.clone(),
        name: stem,
        description: String::new(),
        questions,
    })
}

/// Recursively load all `.json` quiz files from a directory.
pub fn load_quiz_directory(dir: &Path) -> Result<Vec<QuizSet>> {
    let mut sets = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            sets.extend(load_quiz_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "json") {
            match parse_quiz(&path) {
                Ok(set) => sets.push(set),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(sets)
}

/// Parse a JSON array of per-question submissions, in question order.
pub fn parse_submissions_str(content: &str, questions: &[Question]) -> Result<Vec<Submission>> {
    let values: Vec<serde_json::Value> =
        serde_json::from_str(content).context("submissions must be a JSON array")?;

    if values.len() != questions.len() {
        return Err(QuizError::InvalidInput(format!(
            "{} submission(s) for {} question(s)",
            values.len(),
            questions.len()
        ))
        .into());
    }

    questions
        .iter()
        .zip(&values)
        .map(|(question, value)| {
            Submission::from_json(question.kind(), value)
                .with_context(|| format!("submission for question {}", question.id()))
        })
        .collect()
}

/// Read submissions from a file.
pub fn parse_submissions(path: &Path, questions: &[Question]) -> Result<Vec<Submission>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read submissions: {}", path.display()))?;
    parse_submissions_str(&content, questions)
        .with_context(|| format!("invalid submissions file: {}", path.display()))
}

/// A warning from quiz validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question ID (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a quiz set for authoring mistakes the engine would reject or
/// that the rendering layer would show badly.
pub fn validate_quiz(set: &QuizSet, registry: &VariantRegistry) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let mut warn = |id: &dyn ToString, message: String| {
        warnings.push(ValidationWarning {
            question_id: Some(id.to_string()),
            message,
        });
    };

    let mut seen_ids = HashSet::new();
    for q in &set.questions {
        // 1 and "1" display the same, so they collide
        if !seen_ids.insert(q.id.to_string()) {
            warn(&q.id, format!("duplicate question ID: {}", q.id));
        }
    }

    for q in &set.questions {
        if q.text.trim().is_empty() {
            warn(&q.id, "question text is empty".into());
        }

        match registry.resolve(&q.id, &q.kind) {
            Ok(kind) => {
                if let Err(e) = Variant::from_record(kind, q) {
                    warn(&q.id, e.to_string());
                }
            }
            Err(e) => warn(&q.id, e.to_string()),
        }

        if q.references.is_empty() {
            warn(&q.id, "no reference given".into());
        }
        for reference in &q.references {
            if reference.text.trim().is_empty() {
                warn(&q.id, "reference text is empty".into());
            } else if is_url(&reference.text) {
                warn(
                    &q.id,
                    format!("reference text \"{}\" is a URL, describe the source instead", reference.text),
                );
            }
            if let Some(url) = &reference.url {
                if !is_url(url) {
                    warn(&q.id, format!("reference url \"{url}\" is not an HTTP(S) URL"));
                }
            }
        }

        for group in &q.groups {
            if group.to_lowercase() != *group {
                warn(&q.id, format!("group tag \"{group}\" is not lowercase"));
            }
        }
    }

    warnings
}

/// Split a cell on `sep`, trimming each piece and dropping empty ones.
pub fn split_cell<'a>(content: &'a str, sep: &str) -> Vec<&'a str> {
    content
        .split(sep)
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect()
}

/// The first item that appears more than once, if any.
pub fn find_duplicate<S: AsRef<str>>(items: &[S]) -> Option<&str> {
    let mut seen = HashSet::new();
    items
        .iter()
        .map(AsRef::as_ref)
        .find(|item| !seen.insert(*item))
}

/// Whether `text` contains an HTTP(S) URL.
pub fn is_url(text: &str) -> bool {
    static URL: OnceLock<Regex> = OnceLock::new();
    URL.get_or_init(|| {
        Regex::new(
            r"(?i)https?://(www\.)?[-a-z0-9@:%._+~#=]{1,256}\.[a-z0-9()]{1,6}\b([-a-z0-9()@:%_+.~#?&/=]*)",
        )
        .expect("URL pattern is valid")
    })
    .is_match(text)
}
