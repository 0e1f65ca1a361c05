//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn quizcheck() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("quizcheck").unwrap();
    cmd.env_remove("QUIZCHECK_SEED").env_remove("RUST_LOG");
    cmd
}

const GEOGRAPHY: &str = "../../quizzes/geography.json";

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn validate_valid_quiz() {
    quizcheck()
        .arg("validate")
        .arg("--quiz")
        .arg(GEOGRAPHY)
        .assert()
        .success()
        .stdout(predicate::str::contains("Geography Basics (4 questions)"))
        .stdout(predicate::str::contains(
            "kinds: single_choice: 1, multiple_choice: 1, ranking: 1, classification: 1",
        ))
        .stdout(predicate::str::contains("groups: beginner, europe, world"))
        .stdout(predicate::str::contains("All quizzes valid"));
}

#[test]
fn validate_directory() {
    quizcheck()
        .arg("validate")
        .arg("--quiz")
        .arg("../../quizzes")
        .assert()
        .success()
        .stdout(predicate::str::contains("Quiz: animals (2 questions)"))
        .stdout(predicate::str::contains("Geography Basics"));
}

#[test]
fn validate_reports_warnings() {
    let dir = TempDir::new().unwrap();
    let quiz = write(
        &dir,
        "broken.json",
        r#"[
            {"id": 1, "text": "Pick one", "type": "single_choice",
             "choices": ["a", "b"], "answer": "z", "groups": ["Beginner"]},
            {"id": 2, "text": "Essay", "type": "essay", "choices": [], "answer": null}
        ]"#,
    );

    quizcheck()
        .arg("validate")
        .arg("--quiz")
        .arg(&quiz)
        .assert()
        .success()
        .stdout(predicate::str::contains("[1] WARNING"))
        .stdout(predicate::str::contains("not lowercase"))
        .stdout(predicate::str::contains("essay"))
        .stdout(predicate::str::contains("essay (unknown): 1"))
        .stdout(predicate::str::contains("on 2 question(s)"));
}

#[test]
fn validate_names_the_missing_field() {
    let dir = TempDir::new().unwrap();
    let quiz = write(
        &dir,
        "geo.json",
        r#"{"id": "geo", "name": "Geography", "questions": [
            {"id": 1, "type": "single_choice", "choices": ["a", "b"], "answer": "a"}
        ]}"#,
    );

    quizcheck()
        .arg("validate")
        .arg("--quiz")
        .arg(&quiz)
        .assert()
        .failure()
        .stderr(predicate::str::contains("geo.json"))
        .stderr(predicate::str::contains("missing field `text`"));
}

#[test]
fn validate_nonexistent_file() {
    quizcheck()
        .arg("validate")
        .arg("--quiz")
        .arg("nonexistent.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn grade_prints_score_and_explanations() {
    let dir = TempDir::new().unwrap();
    let submissions = write(
        &dir,
        "answers.json",
        r#"[
            "Paris",
            ["Loire", "Seine"],
            ["Asia", "Africa", "North America", "Europe"],
            {"Kenya": "Africa", "Peru": "South America", "Chile": "Africa"}
        ]"#,
    );

    quizcheck()
        .arg("grade")
        .arg("--quiz")
        .arg(GEOGRAPHY)
        .arg("--submissions")
        .arg(&submissions)
        .arg("--seed")
        .arg("7")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Score: 3/4 correct, 1 incorrect, 0 unanswered (75.0%)",
        ))
        .stdout(predicate::str::contains("Answered: 4/4"))
        .stdout(predicate::str::contains("Peru and Chile share the Andes."))
        .stdout(predicate::str::contains("Paris has been the capital").not());
}

#[test]
fn grade_json_with_group_filter() {
    let dir = TempDir::new().unwrap();
    let submissions = write(&dir, "answers.json", r#"[null, ["Seine"]]"#);

    quizcheck()
        .arg("grade")
        .arg("--quiz")
        .arg(GEOGRAPHY)
        .arg("--submissions")
        .arg(&submissions)
        .arg("--group")
        .arg("europe")
        .arg("--format")
        .arg("json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"question_count\": 2"))
        .stdout(predicate::str::contains("\"unansweredCount\": 1"))
        .stdout(predicate::str::contains("\"incorrectCount\": 1"));
}

#[test]
fn grade_saves_report() {
    let dir = TempDir::new().unwrap();
    let submissions = write(&dir, "answers.json", r#"[null, null, null, null]"#);
    let reports = dir.path().join("reports");
    std::fs::create_dir_all(&reports).unwrap();

    quizcheck()
        .arg("grade")
        .arg("--quiz")
        .arg(GEOGRAPHY)
        .arg("--submissions")
        .arg(&submissions)
        .arg("--output")
        .arg(&reports)
        .assert()
        .success()
        .stderr(predicate::str::contains("Report saved to"));

    let saved: Vec<_> = std::fs::read_dir(&reports).unwrap().collect();
    assert_eq!(saved.len(), 1);
}

#[test]
fn blank_ranking_without_seed_warns() {
    let dir = TempDir::new().unwrap();
    let submissions = write(&dir, "answers.json", r#"["Paris", null, null, null]"#);

    quizcheck()
        .arg("grade")
        .arg("--quiz")
        .arg(GEOGRAPHY)
        .arg("--submissions")
        .arg(&submissions)
        .assert()
        .success()
        .stderr(predicate::str::contains("random presented order"));

    quizcheck()
        .arg("grade")
        .arg("--quiz")
        .arg(GEOGRAPHY)
        .arg("--submissions")
        .arg(&submissions)
        .arg("--seed")
        .arg("3")
        .assert()
        .success()
        .stderr(predicate::str::contains("random presented order").not());
}

#[test]
fn grade_rejects_wrong_submission_count() {
    let dir = TempDir::new().unwrap();
    let submissions = write(&dir, "answers.json", r#"["Paris"]"#);

    quizcheck()
        .arg("grade")
        .arg("--quiz")
        .arg(GEOGRAPHY)
        .arg("--submissions")
        .arg(&submissions)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid input"));
}

#[test]
fn grade_unknown_group_fails() {
    let dir = TempDir::new().unwrap();
    let submissions = write(&dir, "answers.json", "[]");

    quizcheck()
        .arg("grade")
        .arg("--quiz")
        .arg(GEOGRAPHY)
        .arg("--submissions")
        .arg(&submissions)
        .arg("--group")
        .arg("oceania")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no question in groups"));
}

#[test]
fn export_sheet_to_file() {
    let dir = TempDir::new().unwrap();
    let config = write(
        &dir,
        "quizcheck.toml",
        "[authoring]\ngroup_columns = [\"beginner\", \"expert\"]\n",
    );
    let output = dir.path().join("out/questions.json");

    quizcheck()
        .arg("export")
        .arg("--sheet")
        .arg("../../sheets/questions.csv")
        .arg("--output")
        .arg(&output)
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stderr(predicate::str::contains("Row 7:"))
        .stderr(predicate::str::contains("does not appear in the choices"))
        .stderr(predicate::str::contains("Not validated yet: row(s) 6"))
        .stderr(predicate::str::contains("Exported 4 question(s)"))
        .stderr(predicate::str::contains("1 row(s) rejected."));

    quizcheck()
        .arg("validate")
        .arg("--quiz")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("questions (4 questions)"))
        .stdout(predicate::str::contains("All quizzes valid"));

    let exported = std::fs::read_to_string(&output).unwrap();
    assert!(exported.contains("\"beginner\""));
    assert!(exported.contains("\"expert\""));
}

#[test]
fn export_missing_sheet() {
    quizcheck()
        .arg("export")
        .arg("--sheet")
        .arg("no_such_sheet.csv")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to open sheet"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    quizcheck()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created quizcheck.toml"))
        .stdout(predicate::str::contains("Created quizzes/example.json"));

    assert!(dir.path().join("quizcheck.toml").exists());
    assert!(dir.path().join("quizzes/example.json").exists());

    quizcheck()
        .current_dir(dir.path())
        .arg("validate")
        .arg("--quiz")
        .arg("quizzes/example.json")
        .assert()
        .success()
        .stdout(predicate::str::contains("Example Quiz (4 questions)"))
        .stdout(predicate::str::contains("All quizzes valid"));
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    quizcheck()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    quizcheck()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn help_output() {
    quizcheck()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Self-assessment quiz grader"));
}

#[test]
fn version_output() {
    quizcheck()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("quizcheck"));
}
