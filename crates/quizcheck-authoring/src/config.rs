//! quizcheck configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use quizcheck_core::engine::QuizEngineConfig;

/// Top-level quizcheck configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuizcheckConfig {
    #[serde(default)]
    pub grading: GradingConfig,
    #[serde(default)]
    pub authoring: AuthoringConfig,
}

/// How quiz sessions are built.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GradingConfig {
    /// Shuffle single and multiple choice options as well.
    #[serde(default)]
    pub shuffle_choices: bool,
    /// Fixed seed for the presentation shuffle.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl GradingConfig {
    pub fn engine_config(&self) -> QuizEngineConfig {
        QuizEngineConfig {
            shuffle_choices: self.shuffle_choices,
            seed: self.seed,
        }
    }
}

/// How sheet rows become question records.
///
/// Passed explicitly into the export pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthoringConfig {
    /// Value of the state column marking a row ready for export.
    #[serde(default = "default_validated_state")]
    pub validated_state: String,
    /// Header names of the record columns.
    #[serde(default)]
    pub columns: ColumnNames,
    /// Headers of columns flagging membership in a group named after them.
    #[serde(default)]
    pub group_columns: Vec<String>,
    /// Cell values that mean "member of this group".
    #[serde(default = "default_affirmative")]
    pub affirmative: Vec<String>,
}

impl Default for AuthoringConfig {
    fn default() -> Self {
        Self {
            validated_state: default_validated_state(),
            columns: ColumnNames::default(),
            group_columns: Vec::new(),
            affirmative: default_affirmative(),
        }
    }
}

impl AuthoringConfig {
    /// Whether a group cell marks membership.
    pub fn is_affirmative(&self, cell: &str) -> bool {
        let cell = cell.trim();
        self.affirmative.iter().any(|a| a.eq_ignore_ascii_case(cell))
    }
}

fn default_validated_state() -> String {
    "validated".to_string()
}

fn default_affirmative() -> Vec<String> {
    vec!["yes".to_string()]
}

/// Sheet header for each record field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub text: String,
    pub kind: String,
    pub references: String,
    pub topics: String,
    pub keywords: String,
    pub level: String,
    pub choices: String,
    pub category_choices: String,
    pub answer: String,
    pub explanation: String,
    pub state: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            text: "text".into(),
            kind: "type".into(),
            references: "references".into(),
            topics: "topics".into(),
            keywords: "keywords".into(),
            level: "level".into(),
            choices: "choices".into(),
            category_choices: "category_choices".into(),
            answer: "answer".into(),
            explanation: "explanation".into(),
            state: "state".into(),
        }
    }
}

/// Load config from an explicit path, or search the well-known paths.
///
/// Search order without a path:
/// 1. `quizcheck.toml` in the current directory
/// 2. `~/.config/quizcheck/config.toml`
///
/// Environment variable override: `QUIZCHECK_SEED`.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizcheckConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizcheck.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizcheckConfig::default(),
    };

    if let Ok(seed) = std::env::var("QUIZCHECK_SEED") {
        let seed = seed
            .trim()
            .parse::<u64>()
            .with_context(|| format!("QUIZCHECK_SEED is not a number: '{seed}'"))?;
        config.grading.seed = Some(seed);
    }

    Ok(config)
}

/// Parse a TOML config string.
pub fn parse_config(content: &str) -> Result<QuizcheckConfig> {
    Ok(toml::from_str(content)?)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizcheck"))
}
