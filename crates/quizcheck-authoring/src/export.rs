//! Sheet row to question record conversion.
//!
//! Every field of a row is checked and every problem is reported, so an
//! author can fix a row in one pass. Only validated, error-free rows are
//! exported.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{json, Value};

use quizcheck_core::model::{QuestionId, QuestionKind, QuestionRecord, QuizSet, Reference};
use quizcheck_core::parser::{find_duplicate, is_url, split_cell};
use quizcheck_core::variant::MIN_OPTIONS;

use crate::config::{AuthoringConfig, ColumnNames};
use crate::sheet::SheetRow;

/// The result of converting one sheet row.
#[derive(Debug, Clone)]
pub struct RowOutcome {
    pub row: u64,
    /// Whether the state column carries the validated marker.
    pub is_validated: bool,
    /// The record, when every field parsed.
    pub record: Option<QuestionRecord>,
    pub errors: Vec<String>,
}

impl RowOutcome {
    /// The record to export: only for validated rows without errors.
    pub fn exportable(&self) -> Option<&QuestionRecord> {
        if self.is_validated && self.errors.is_empty() {
            self.record.as_ref()
        } else {
            None
        }
    }
}

/// Convert one row. Returns `None` for rows with a blank type cell.
pub fn row_to_record(row: &SheetRow, config: &AuthoringConfig) -> Option<RowOutcome> {
    let cols = &config.columns;
    let type_cell = row.cell(&cols.kind).trim();
    if type_cell.is_empty() {
        return None;
    }

    let mut errors = Vec::new();

    let text = row.cell(&cols.text).trim().to_string();
    if text.is_empty() {
        errors.push("question text cannot be empty".to_string());
    }

    let kind = parse_kind(type_cell).map_err(|e| errors.push(e)).ok();

    let references = parse_references(row.cell(&cols.references)).unwrap_or_else(|e| {
        errors.push(e);
        Vec::new()
    });

    let topics = lowercase_list(row.cell(&cols.topics));
    let keywords = lowercase_list(row.cell(&cols.keywords));

    let level = row.cell(&cols.level).trim().to_lowercase();
    if level.is_empty() {
        errors.push("question level cannot be empty".to_string());
    }

    let body = kind.and_then(|kind| {
        parse_choices_and_answer(kind, row, cols)
            .map_err(|errs| errors.extend(errs))
            .ok()
    });

    let explanation = row.cell(&cols.explanation).trim().to_string();

    let groups = config
        .group_columns
        .iter()
        .filter(|header| config.is_affirmative(row.cell(header)))
        .map(|header| header.to_lowercase())
        .collect();

    let is_validated = row.cell(&cols.state).trim() == config.validated_state;

    let record = match (kind, body) {
        (Some(kind), Some((choices, answer))) if errors.is_empty() => Some(QuestionRecord {
            id: QuestionId::Number(row.row),
            text,
            kind: kind.tag().to_string(),
            choices,
            answer,
            explanation,
            references,
            groups,
            level: Some(level),
            keywords,
            topics,
        }),
        _ => None,
    };

    Some(RowOutcome {
        row: row.row,
        is_validated,
        record,
        errors,
    })
}

/// Map a type cell to a kind: a wire tag or its spelled-out label.
pub fn parse_kind(cell: &str) -> Result<QuestionKind, String> {
    let label = cell.trim().to_lowercase();
    if let Ok(kind) = label.parse::<QuestionKind>() {
        return Ok(kind);
    }
    match label.as_str() {
        "single choice" => Ok(QuestionKind::SingleChoice),
        "multiple choice" => Ok(QuestionKind::MultipleChoice),
        _ => Err(format!("question type '{label}' is not supported")),
    }
}

/// Parse a references cell: blocks separated by a blank line, each a text
/// line optionally followed by a URL line.
pub fn parse_references(content: &str) -> Result<Vec<Reference>, String> {
    let mut parsed = Vec::new();

    for block in split_cell(content, "\n\n") {
        let lines: Vec<&str> = block.lines().map(str::trim).collect();
        let text = lines[0];
        if is_url(text) {
            return Err(format!(
                "reference \"{text}\" is a URL. Was a line skipped by mistake? \
                 Otherwise use a descriptive text (page name, book title...)"
            ));
        }
        match lines.as_slice() {
            [_] => parsed.push(Reference {
                text: text.to_string(),
                url: None,
            }),
            [_, url] => {
                if !is_url(url) {
                    return Err(format!("reference url \"{url}\" is not a URL"));
                }
                parsed.push(Reference {
                    text: text.to_string(),
                    url: Some(url.to_string()),
                });
            }
            _ => {
                return Err(format!(
                    "reference \"{block}\" must span one or two lines only"
                ))
            }
        }
    }

    if parsed.is_empty() {
        return Err("a reference is missing".to_string());
    }
    Ok(parsed)
}

fn lowercase_list(content: &str) -> Vec<String> {
    split_cell(content, ",")
        .into_iter()
        .map(str::to_lowercase)
        .collect()
}

fn option_list<'a>(content: &'a str, what: &str) -> Result<Vec<&'a str>, String> {
    let options = split_cell(content, "\n");
    if options.len() < MIN_OPTIONS {
        return Err(format!("there must be at least {MIN_OPTIONS} {what}"));
    }
    if let Some(dup) = find_duplicate(&options) {
        return Err(format!("{what} cannot contain duplicates (\"{dup}\")"));
    }
    Ok(options)
}

fn parse_choices_and_answer(
    kind: QuestionKind,
    row: &SheetRow,
    cols: &ColumnNames,
) -> Result<(Value, Value), Vec<String>> {
    let answer_cell = row.cell(&cols.answer);

    match kind {
        QuestionKind::SingleChoice => {
            let choices = option_list(row.cell(&cols.choices), "choices").map_err(|e| vec![e])?;
            let answer = answer_cell.trim();
            if !choices.contains(&answer) {
                return Err(vec![format!(
                    "answer \"{answer}\" does not appear in the choices"
                )]);
            }
            Ok((json!(choices), json!(answer)))
        }
        QuestionKind::MultipleChoice => {
            let choices = option_list(row.cell(&cols.choices), "choices").map_err(|e| vec![e])?;
            let answer = split_cell(answer_cell, "\n");
            if answer.is_empty() {
                return Err(vec!["answer cannot be empty".to_string()]);
            }
            if let Some(dup) = find_duplicate(&answer) {
                return Err(vec![format!(
                    "answer cannot contain duplicates (\"{dup}\")"
                )]);
            }
            let missing: Vec<String> = answer
                .iter()
                .filter(|a| !choices.contains(a))
                .map(|a| format!("answer \"{a}\" does not appear in the choices"))
                .collect();
            if !missing.is_empty() {
                return Err(missing);
            }
            Ok((json!(choices), json!(answer)))
        }
        // the authored order is the answer
        QuestionKind::Ranking => {
            let choices = option_list(row.cell(&cols.choices), "choices").map_err(|e| vec![e])?;
            Ok((json!(choices), json!(choices)))
        }
        QuestionKind::Classification => {
            let elements = option_list(row.cell(&cols.choices), "elements");
            let categories = option_list(row.cell(&cols.category_choices), "categories");
            let (elements, categories) = match (elements, categories) {
                (Ok(e), Ok(c)) => (e, c),
                (e, c) => {
                    return Err(e.err().into_iter().chain(c.err()).collect());
                }
            };

            let assigned = split_cell(answer_cell, "\n");
            if assigned.len() != elements.len() {
                return Err(vec![
                    "the answer must list as many categories as there are elements".to_string(),
                ]);
            }
            let unknown: Vec<String> = assigned
                .iter()
                .filter(|c| !categories.contains(c))
                .map(|c| format!("answer \"{c}\" does not appear in the categories"))
                .collect();
            if !unknown.is_empty() {
                return Err(unknown);
            }

            let answer: BTreeMap<&str, &str> =
                elements.iter().copied().zip(assigned.iter().copied()).collect();
            Ok((json!([elements, categories]), json!(answer)))
        }
    }
}

/// A row that could not be exported.
#[derive(Debug, Clone, Serialize)]
pub struct RejectedRow {
    pub row: u64,
    pub errors: Vec<String>,
}

/// The outcome of exporting a whole sheet.
#[derive(Debug, Clone, Default)]
pub struct ExportReport {
    /// Records ready for the grading engine, in sheet order.
    pub records: Vec<QuestionRecord>,
    /// Rows with errors.
    pub rejected: Vec<RejectedRow>,
    /// Error-free rows not yet marked validated.
    pub unvalidated: Vec<u64>,
}

impl ExportReport {
    /// Wrap the exported records in a quiz set.
    pub fn into_quiz_set(self, id: impl Into<String>, name: impl Into<String>) -> QuizSet {
        QuizSet {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            questions: self.records,
        }
    }
}

/// Convert every row and sort them into exported, rejected, and unvalidated.
pub fn export_rows(rows: &[SheetRow], config: &AuthoringConfig) -> ExportReport {
    let mut report = ExportReport::default();

    for outcome in rows.iter().filter_map(|row| row_to_record(row, config)) {
        if !outcome.errors.is_empty() {
            tracing::debug!(row = outcome.row, errors = outcome.errors.len(), "row rejected");
            report.rejected.push(RejectedRow {
                row: outcome.row,
                errors: outcome.errors,
            });
        } else if let Some(record) = outcome.exportable() {
            report.records.push(record.clone());
        } else {
            report.unvalidated.push(outcome.row);
        }
    }

    tracing::info!(
        exported = report.records.len(),
        rejected = report.rejected.len(),
        unvalidated = report.unvalidated.len(),
        "sheet exported"
    );
    report
}
