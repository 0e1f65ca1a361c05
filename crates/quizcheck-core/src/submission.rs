//! Learner submissions.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::QuizError;
use crate::model::QuestionKind;

/// The learner's current input for one question, shaped like its answer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Submission {
    /// Nothing selected, nothing assigned, or the ranking left untouched.
    #[default]
    Empty,
    Single(String),
    Multiple(Vec<String>),
    Ranking(Vec<String>),
    /// Element to category. Unassigned elements are simply absent.
    Classification(BTreeMap<String, String>),
}

impl Submission {
    pub fn single(choice: impl Into<String>) -> Self {
        Submission::Single(choice.into())
    }

    pub fn multiple<I, S>(choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Submission::Multiple(choices.into_iter().map(Into::into).collect())
    }

    pub fn ranking<I, S>(order: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Submission::Ranking(order.into_iter().map(Into::into).collect())
    }

    pub fn classification<I, K, V>(assignments: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Submission::Classification(
            assignments
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Whether this submission has the shape `kind` expects.
    pub fn fits(&self, kind: QuestionKind) -> bool {
        matches!(
            (self, kind),
            (Submission::Empty, _)
                | (Submission::Single(_), QuestionKind::SingleChoice)
                | (Submission::Multiple(_), QuestionKind::MultipleChoice)
                | (Submission::Ranking(_), QuestionKind::Ranking)
                | (Submission::Classification(_), QuestionKind::Classification)
        )
    }

    /// Read a submission from JSON, interpreting it for a question of `kind`.
    ///
    /// `null` is always an empty submission. Classification entries mapped to
    /// `null` count as unassigned.
    pub fn from_json(kind: QuestionKind, value: &Value) -> Result<Self, QuizError> {
        if value.is_null() {
            return Ok(Submission::Empty);
        }

        let mismatch = |expected: &str| {
            QuizError::InvalidInput(format!(
                "expected {expected} for a {kind} submission, got {value}"
            ))
        };

        match kind {
            QuestionKind::SingleChoice => value
                .as_str()
                .map(Submission::single)
                .ok_or_else(|| mismatch("a string")),
            QuestionKind::MultipleChoice => {
                string_list(value).map(Submission::Multiple).ok_or_else(|| mismatch("an array of strings"))
            }
            QuestionKind::Ranking => {
                string_list(value).map(Submission::Ranking).ok_or_else(|| mismatch("an array of strings"))
            }
            QuestionKind::Classification => {
                let object = value
                    .as_object()
                    .ok_or_else(|| mismatch("an object of element to category"))?;
                let mut assignments = BTreeMap::new();
                for (element, category) in object {
                    match category {
                        Value::Null => {}
                        Value::String(c) => {
                            assignments.insert(element.clone(), c.clone());
                        }
                        _ => return Err(mismatch("an object of element to category")),
                    }
                }
                Ok(Submission::Classification(assignments))
            }
        }
    }
}

fn string_list(value: &Value) -> Option<Vec<String>> {
    value
        .as_array()?
        .iter()
        .map(|v| v.as_str().map(str::to_string))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_is_empty_for_every_kind() {
        for kind in QuestionKind::ALL {
            assert_eq!(
                Submission::from_json(kind, &Value::Null).unwrap(),
                Submission::Empty
            );
        }
    }

    #[test]
    fn reads_each_shape() {
        assert_eq!(
            Submission::from_json(QuestionKind::SingleChoice, &json!("Paris")).unwrap(),
            Submission::single("Paris")
        );
        assert_eq!(
            Submission::from_json(QuestionKind::MultipleChoice, &json!(["c", "a"])).unwrap(),
            Submission::multiple(["c", "a"])
        );
        assert_eq!(
            Submission::from_json(QuestionKind::Ranking, &json!(["b", "a"])).unwrap(),
            Submission::ranking(["b", "a"])
        );
        assert_eq!(
            Submission::from_json(
                QuestionKind::Classification,
                &json!({"cat": "mammal", "dog": null})
            )
            .unwrap(),
            Submission::classification([("cat", "mammal")])
        );
    }

    #[test]
    fn rejects_shapes_for_the_wrong_kind() {
        let err = Submission::from_json(QuestionKind::SingleChoice, &json!(["a"])).unwrap_err();
        assert!(matches!(err, QuizError::InvalidInput(_)));
        assert!(Submission::from_json(QuestionKind::MultipleChoice, &json!([1, 2])).is_err());
        assert!(Submission::from_json(QuestionKind::Classification, &json!({"cat": 3})).is_err());
    }

    #[test]
    fn fits_checks_shape_against_kind() {
        assert!(Submission::Empty.fits(QuestionKind::Ranking));
        assert!(Submission::single("a").fits(QuestionKind::SingleChoice));
        assert!(!Submission::single("a").fits(QuestionKind::MultipleChoice));
        assert!(!Submission::ranking(["a"]).fits(QuestionKind::Classification));
    }
}
