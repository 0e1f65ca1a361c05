//! The `quizcheck export` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use quizcheck_authoring::config::load_config_from;
use quizcheck_authoring::{export_rows, read_sheet};

pub fn execute(sheet_path: PathBuf, output: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let rows = read_sheet(&sheet_path)?;

    let report = export_rows(&rows, &config.authoring);

    for rejected in &report.rejected {
        eprintln!("Row {}:", rejected.row);
        for error in &rejected.errors {
            eprintln!("  {error}");
        }
    }
    if !report.unvalidated.is_empty() {
        let rows: Vec<String> = report.unvalidated.iter().map(u64::to_string).collect();
        eprintln!("Not validated yet: row(s) {}", rows.join(", "));
    }

    let exported = report.records.len();
    let rejected = report.rejected.len();

    let stem = sheet_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "quiz".to_string());
    let set = report.into_quiz_set(stem.clone(), stem);
    let json = serde_json::to_string_pretty(&set).context("failed to serialize quiz")?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, json)
                .with_context(|| format!("failed to write quiz to {}", path.display()))?;
            eprintln!("Exported {exported} question(s) to {}", path.display());
        }
        None => println!("{json}"),
    }

    if rejected > 0 {
        eprintln!("{rejected} row(s) rejected.");
    }

    Ok(())
}
