//! The `quizcheck validate` command.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use anyhow::Result;

use quizcheck_core::model::{QuestionKind, QuizSet};
use quizcheck_core::parser::{load_quiz_directory, parse_quiz, validate_quiz, ValidationWarning};
use quizcheck_core::registry::VariantRegistry;

pub fn execute(quiz_path: PathBuf) -> Result<()> {
    let sets = if quiz_path.is_dir() {
        load_quiz_directory(&quiz_path)?
    } else {
        vec![parse_quiz(&quiz_path)?]
    };

    let registry = VariantRegistry::standard();
    let mut flagged = 0;
    let mut total_warnings = 0;

    for set in &sets {
        println!("Quiz: {} ({} questions)", set.name, set.questions.len());
        println!("  kinds: {}", kind_breakdown(set));
        let groups = group_tags(set);
        if !groups.is_empty() {
            println!("  groups: {}", groups.into_iter().collect::<Vec<_>>().join(", "));
        }

        let warnings = validate_quiz(set, &registry);
        for w in &warnings {
            println!("{}", format_warning(w));
        }
        flagged += warnings
            .iter()
            .filter_map(|w| w.question_id.as_deref())
            .collect::<BTreeSet<_>>()
            .len();
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All quizzes valid.");
    } else {
        println!("\n{total_warnings} warning(s) found on {flagged} question(s).");
    }

    Ok(())
}

/// `single_choice: 2, ranking: 1`, in canonical kind order; unknown tags last.
fn kind_breakdown(set: &QuizSet) -> String {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for record in &set.questions {
        *counts.entry(record.kind.as_str()).or_default() += 1;
    }

    let mut parts: Vec<String> = QuestionKind::ALL
        .iter()
        .filter_map(|kind| counts.remove(kind.tag()).map(|n| format!("{kind}: {n}")))
        .collect();
    parts.extend(counts.iter().map(|(tag, n)| format!("{tag} (unknown): {n}")));

    if parts.is_empty() {
        "none".to_string()
    } else {
        parts.join(", ")
    }
}

fn group_tags(set: &QuizSet) -> BTreeSet<&str> {
    set.questions
        .iter()
        .flat_map(|q| q.groups.iter().map(String::as_str))
        .collect()
}

fn format_warning(w: &ValidationWarning) -> String {
    match &w.question_id {
        Some(id) => format!("  [{id}] WARNING: {}", w.message),
        None => format!("  WARNING: {}", w.message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn breakdown_counts_each_kind() {
        let json = r#"[
            {"id": 1, "text": "t", "type": "ranking", "choices": ["a", "b"], "answer": ["a", "b"],
             "groups": ["world"]},
            {"id": 2, "text": "t", "type": "single_choice", "choices": ["a", "b"], "answer": "a",
             "groups": ["europe", "world"]},
            {"id": 3, "text": "t", "type": "ranking", "choices": ["a", "b"], "answer": ["a", "b"]},
            {"id": 4, "text": "t", "type": "essay", "choices": [], "answer": ""}
        ]"#;
        let set = quizcheck_core::parser::parse_quiz_str(json, Path::new("mixed.json")).unwrap();
        assert_eq!(
            kind_breakdown(&set),
            "single_choice: 1, ranking: 2, essay (unknown): 1"
        );
        assert_eq!(
            group_tags(&set).into_iter().collect::<Vec<_>>(),
            vec!["europe", "world"]
        );
    }
}
