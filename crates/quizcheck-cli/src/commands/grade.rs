//! The `quizcheck grade` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use quizcheck_authoring::config::load_config_from;
use quizcheck_core::engine::QuizEngine;
use quizcheck_core::model::QuestionKind;
use quizcheck_core::parser;
use quizcheck_core::question::{Question, TriState};
use quizcheck_core::registry::VariantRegistry;
use quizcheck_core::report::GradeReport;
use quizcheck_core::submission::Submission;

pub fn execute(
    quiz_path: PathBuf,
    submissions_path: PathBuf,
    group: Option<String>,
    seed: Option<u64>,
    format: String,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let mut set = parser::parse_quiz(&quiz_path)?;

    // Apply group filter
    if let Some(groups) = &group {
        let groups: Vec<&str> = groups.split(',').map(|s| s.trim()).collect();
        set.retain_groups(&groups);
        tracing::debug!(?groups, remaining = set.questions.len(), "group filter applied");
        anyhow::ensure!(
            !set.questions.is_empty(),
            "no question in groups {groups:?}"
        );
    }

    let mut engine_config = config.grading.engine_config();
    if seed.is_some() {
        engine_config.seed = seed;
    }

    let mut engine = QuizEngine::new(&set.questions, &VariantRegistry::standard(), &engine_config)
        .with_context(|| format!("failed to build quiz: {}", quiz_path.display()))?;

    let submissions = parser::parse_submissions(&submissions_path, engine.questions())?;
    if engine_config.seed.is_none() {
        let untouched = untouched_rankings(engine.questions(), &submissions);
        if !untouched.is_empty() {
            tracing::warn!(
                questions = %untouched.join(", "),
                "ranking left blank is graded in a random presented order; pass --seed to fix it"
            );
        }
    }
    engine.check_all(&submissions)?;

    let report = GradeReport::from_engine(&set, &engine).context("quiz was not graded")?;

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        "markdown" | "md" => println!("{}", report.to_markdown()),
        _ => print_summary(&report),
    }

    if let Some(dir) = output {
        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");
        let path = dir.join(format!("grade-{timestamp}.json"));
        report.save_json(&path)?;
        eprintln!("Report saved to: {}", path.display());
    }

    Ok(())
}

/// Ranking questions whose submission is `null`.
fn untouched_rankings(questions: &[Question], submissions: &[Submission]) -> Vec<String> {
    questions
        .iter()
        .zip(submissions)
        .filter(|(q, s)| q.kind() == QuestionKind::Ranking && **s == Submission::Empty)
        .map(|(q, _)| q.id().to_string())
        .collect()
}

fn print_summary(report: &GradeReport) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Question", "Kind", "Result"]);

    for outcome in &report.outcomes {
        let icon = match outcome.result {
            TriState::Correct => "OK",
            TriState::Incorrect => "WRONG",
            TriState::Unanswered => "-",
        };
        table.add_row(vec![
            Cell::new(&outcome.question_id),
            Cell::new(outcome.kind),
            Cell::new(format!("{icon} {}", outcome.result)),
        ]);
    }

    println!("{}\n{table}", report.quiz.name);

    let s = &report.summary;
    println!(
        "Score: {}/{} correct, {} incorrect, {} unanswered ({:.1}%)",
        s.correct_count,
        s.total,
        s.incorrect_count,
        s.unanswered_count,
        s.score_ratio() * 100.0
    );
    println!("Answered: {}/{}", s.answered(), s.total);

    for outcome in &report.outcomes {
        if outcome.result == TriState::Correct || outcome.explanation.is_empty() {
            continue;
        }
        println!("\n[{}] {}", outcome.question_id, outcome.explanation);
        for reference in &outcome.references {
            match &reference.url {
                Some(url) => println!("  - {} <{url}>", reference.text),
                None => println!("  - {}", reference.text),
            }
        }
    }
}
