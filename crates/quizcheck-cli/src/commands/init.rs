//! The `quizcheck init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create quizcheck.toml
    if std::path::Path::new("quizcheck.toml").exists() {
        println!("quizcheck.toml already exists, skipping.");
    } else {
        std::fs::write("quizcheck.toml", SAMPLE_CONFIG)?;
        println!("Created quizcheck.toml");
    }

    // Create example quiz
    std::fs::create_dir_all("quizzes")?;
    let example_path = std::path::Path::new("quizzes/example.json");
    if example_path.exists() {
        println!("quizzes/example.json already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_QUIZ)?;
        println!("Created quizzes/example.json");
    }

    println!("\nNext steps:");
    println!("  1. Edit quizzes/example.json or export one from your sheet");
    println!("  2. Run: quizcheck validate --quiz quizzes/example.json");
    println!("  3. Run: quizcheck grade --quiz quizzes/example.json --submissions answers.json");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizcheck configuration

[grading]
# Also shuffle single and multiple choice options.
shuffle_choices = false
# seed = 42

[authoring]
validated_state = "validated"
group_columns = ["beginner", "expert"]
affirmative = ["yes"]

[authoring.columns]
text = "text"
kind = "type"
references = "references"
choices = "choices"
category_choices = "category_choices"
answer = "answer"
state = "state"
"#;

const EXAMPLE_QUIZ: &str = r#"{
  "id": "example",
  "name": "Example Quiz",
  "description": "One question of each kind",
  "questions": [
    {
      "id": 1,
      "text": "What is the capital of France?",
      "type": "single_choice",
      "choices": ["Paris", "Lyon", "Marseille"],
      "answer": "Paris",
      "explanation": "Paris has been the capital for most of French history.",
      "references": [{"text": "World Factbook", "url": "https://www.cia.gov/the-world-factbook/"}],
      "groups": ["beginner"]
    },
    {
      "id": 2,
      "text": "Which of these are prime numbers?",
      "type": "multiple_choice",
      "choices": ["2", "4", "7", "9"],
      "answer": ["2", "7"],
      "explanation": "4 and 9 are squares.",
      "references": [{"text": "Elementary number theory course notes"}],
      "groups": ["beginner"]
    },
    {
      "id": 3,
      "text": "Order these planets from the Sun outwards.",
      "type": "ranking",
      "choices": ["Mercury", "Venus", "Earth", "Mars"],
      "answer": ["Mercury", "Venus", "Earth", "Mars"],
      "references": [{"text": "NASA Solar System Exploration", "url": "https://science.nasa.gov/solar-system/"}],
      "groups": ["expert"]
    },
    {
      "id": 4,
      "text": "Classify these animals.",
      "type": "classification",
      "choices": [["cat", "eagle", "dog"], ["mammal", "bird"]],
      "answer": {"cat": "mammal", "eagle": "bird", "dog": "mammal"},
      "references": [{"text": "Introductory zoology textbook"}],
      "groups": ["expert"]
    }
  ]
}
"#;
