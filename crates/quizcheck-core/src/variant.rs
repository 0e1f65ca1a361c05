//! Per-kind answer shapes and matching rules.

use std::collections::{BTreeMap, BTreeSet};

use rand::Rng;
use serde::de::DeserializeOwned;

use crate::error::QuizError;
use crate::matching::{same_mapping, same_sequence, same_set};
use crate::model::{QuestionKind, QuestionRecord};
use crate::parser::find_duplicate;
use crate::shuffle::shuffle;
use crate::submission::Submission;

/// Minimum number of options, elements, or categories a question offers.
pub const MIN_OPTIONS: usize = 2;

/// The kind-specific payload of a question and the rule that grades it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Variant {
    SingleChoice {
        /// Options in presentation order.
        choices: Vec<String>,
        answer: String,
    },
    MultipleChoice {
        choices: Vec<String>,
        answer: BTreeSet<String>,
    },
    Ranking {
        /// Options in presentation order; the learner starts from here.
        choices: Vec<String>,
        /// The authored order.
        answer: Vec<String>,
    },
    Classification {
        /// Elements in presentation order.
        elements: Vec<String>,
        /// Categories in authored order; never shuffled.
        categories: Vec<String>,
        answer: BTreeMap<String, String>,
    },
}

impl Variant {
    /// Build the variant for `kind` from a record, checking that the answer
    /// is drawn from the choices.
    pub fn from_record(kind: QuestionKind, record: &QuestionRecord) -> Result<Self, QuizError> {
        let id = &record.id;
        match kind {
            QuestionKind::SingleChoice => {
                let choices = option_list(id, "choices", &record.choices)?;
                let answer: String = decode(id, "answer", &record.answer)?;
                if !choices.contains(&answer) {
                    return Err(QuizError::shape(
                        id,
                        format!("answer \"{answer}\" is not one of the choices"),
                    ));
                }
                Ok(Variant::SingleChoice { choices, answer })
            }
            QuestionKind::MultipleChoice => {
                let choices = option_list(id, "choices", &record.choices)?;
                let listed: Vec<String> = decode(id, "answer", &record.answer)?;
                if listed.is_empty() {
                    return Err(QuizError::shape(id, "answer selects no choice"));
                }
                if let Some(missing) = listed.iter().find(|a| !choices.contains(a)) {
                    return Err(QuizError::shape(
                        id,
                        format!("answer \"{missing}\" is not one of the choices"),
                    ));
                }
                Ok(Variant::MultipleChoice {
                    choices,
                    answer: listed.into_iter().collect(),
                })
            }
            QuestionKind::Ranking => {
                let choices = option_list(id, "choices", &record.choices)?;
                let answer: Vec<String> = decode(id, "answer", &record.answer)?;
                let mut sorted_choices = choices.clone();
                let mut sorted_answer = answer.clone();
                sorted_choices.sort();
                sorted_answer.sort();
                if sorted_choices != sorted_answer {
                    return Err(QuizError::shape(
                        id,
                        "ranking answer must order exactly the choices",
                    ));
                }
                Ok(Variant::Ranking { choices, answer })
            }
            QuestionKind::Classification => {
                let (elements, categories): (Vec<String>, Vec<String>) =
                    decode(id, "choices", &record.choices)?;
                check_options(id, "elements", &elements)?;
                check_options(id, "categories", &categories)?;
                let answer: BTreeMap<String, String> = decode(id, "answer", &record.answer)?;
                if answer.len() != elements.len() {
                    return Err(QuizError::shape(
                        id,
                        format!(
                            "answer assigns {} element(s) but there are {}",
                            answer.len(),
                            elements.len()
                        ),
                    ));
                }
                for (element, category) in &answer {
                    if !elements.contains(element) {
                        return Err(QuizError::shape(
                            id,
                            format!("answer element \"{element}\" is not listed"),
                        ));
                    }
                    if !categories.contains(category) {
                        return Err(QuizError::shape(
                            id,
                            format!("answer category \"{category}\" is not listed"),
                        ));
                    }
                }
                Ok(Variant::Classification {
                    elements,
                    categories,
                    answer,
                })
            }
        }
    }

    pub fn kind(&self) -> QuestionKind {
        match self {
            Variant::SingleChoice { .. } => QuestionKind::SingleChoice,
            Variant::MultipleChoice { .. } => QuestionKind::MultipleChoice,
            Variant::Ranking { .. } => QuestionKind::Ranking,
            Variant::Classification { .. } => QuestionKind::Classification,
        }
    }

    /// The options (or classification elements) in the order shown.
    pub fn presented(&self) -> &[String] {
        match self {
            Variant::SingleChoice { choices, .. }
            | Variant::MultipleChoice { choices, .. }
            | Variant::Ranking { choices, .. } => choices,
            Variant::Classification { elements, .. } => elements,
        }
    }

    /// Fix the presentation order once. Kinds that require it are always
    /// shuffled; plain choices only when asked to.
    pub(crate) fn shuffle_presentation<R: Rng + ?Sized>(&mut self, shuffle_choices: bool, rng: &mut R) {
        if !shuffle_choices && !self.kind().requires_shuffle() {
            return;
        }
        match self {
            Variant::SingleChoice { choices, .. }
            | Variant::MultipleChoice { choices, .. }
            | Variant::Ranking { choices, .. } => shuffle(choices, rng),
            Variant::Classification { elements, .. } => shuffle(elements, rng),
        }
    }

    /// Whether `submission` counts as no answer at all.
    ///
    /// A ranking always has some order, so it is never unanswered. A partial
    /// classification is graded, not treated as unanswered.
    pub fn is_unanswered(&self, submission: &Submission) -> bool {
        match (self, submission) {
            (Variant::Ranking { .. }, _) => false,
            (_, Submission::Empty) => true,
            (_, Submission::Multiple(selected)) => selected.is_empty(),
            (_, Submission::Classification(assigned)) => assigned.is_empty(),
            _ => false,
        }
    }

    /// Apply the kind's equality rule. Submissions of another shape never match.
    pub fn matches(&self, submission: &Submission) -> bool {
        match (self, submission) {
            (Variant::SingleChoice { answer, .. }, Submission::Single(selected)) => {
                selected == answer
            }
            (Variant::MultipleChoice { answer, .. }, Submission::Multiple(selected)) => {
                same_set(selected, answer)
            }
            (Variant::Ranking { answer, .. }, Submission::Ranking(order)) => {
                same_sequence(order, answer)
            }
            // an untouched list is submitted as presented
            (Variant::Ranking { choices, answer }, Submission::Empty) => {
                same_sequence(choices, answer)
            }
            (Variant::Classification { answer, .. }, Submission::Classification(assigned)) => {
                same_mapping(assigned, answer)
            }
            _ => false,
        }
    }
}

fn decode<T: DeserializeOwned>(
    id: &impl ToString,
    field: &str,
    value: &serde_json::Value,
) -> Result<T, QuizError> {
    serde_json::from_value(value.clone())
        .map_err(|e| QuizError::shape(id.to_string(), format!("malformed {field}: {e}")))
}

fn option_list(
    id: &impl ToString,
    field: &str,
    value: &serde_json::Value,
) -> Result<Vec<String>, QuizError> {
    let options: Vec<String> = decode(id, field, value)?;
    check_options(id, field, &options)?;
    Ok(options)
}

fn check_options(id: &impl ToString, field: &str, options: &[String]) -> Result<(), QuizError> {
    if options.len() < MIN_OPTIONS {
        return Err(QuizError::shape(
            id.to_string(),
            format!("{field} needs at least {MIN_OPTIONS} entries"),
        ));
    }
    if let Some(dup) = find_duplicate(options) {
        return Err(QuizError::shape(
            id.to_string(),
            format!("{field} lists \"{dup}\" more than once"),
        ));
    }
    Ok(())
}
