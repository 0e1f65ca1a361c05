//! Kind-tag registry consulted when a quiz is built.

use std::collections::BTreeMap;

use crate::error::QuizError;
use crate::model::QuestionKind;

/// Maps record `type` tags to the variant that grades them.
#[derive(Debug, Clone)]
pub struct VariantRegistry {
    kinds: BTreeMap<String, QuestionKind>,
}

impl VariantRegistry {
    /// A registry with nothing registered.
    pub fn empty() -> Self {
        Self {
            kinds: BTreeMap::new(),
        }
    }

    /// A registry with the four standard wire tags.
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        for kind in QuestionKind::ALL {
            registry.register(kind.tag(), kind);
        }
        registry
    }

    /// Register `tag` as an alias for `kind`, replacing any earlier binding.
    pub fn register(&mut self, tag: impl Into<String>, kind: QuestionKind) -> &mut Self {
        self.kinds.insert(tag.into(), kind);
        self
    }

    /// Look up the kind for a record's tag.
    pub fn resolve(&self, id: &impl ToString, tag: &str) -> Result<QuestionKind, QuizError> {
        self.kinds
            .get(tag)
            .copied()
            .ok_or_else(|| QuizError::UnknownQuestionKind {
                id: id.to_string(),
                kind: tag.to_string(),
            })
    }
}

impl Default for VariantRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
