// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Error types returned by the tag rule and custom property parsers.

/// A well-formed token that is not part of a closed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VocabularyError {
    #[error("Unknown entity type '{0}'")]
    UnknownEntityType(String),

    #[error("Unknown tag context '{0}'")]
    UnknownTagContext(String),
}

/// Errors produced while parsing a tag rule list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TagRuleError {
    /// Delimiters are used incorrectly or a required segment is empty.
    #[error("Failed to parse tag rule segment '{segment}' in '{input}': {reason}")]
    Parsing {
        reason: &'static str,
        segment: String,
        input: String,
    },

    #[error(transparent)]
    Vocabulary(#[from] VocabularyError),
}

impl TagRuleError {
    pub(crate) fn parsing(reason: &'static str, segment: &str, input: &str) -> Self {
        TagRuleError::Parsing {
            reason,
            segment: segment.to_string(),
            input: input.to_string(),
        }
    }

    /// Returns true for structural errors, false for vocabulary errors.
    #[must_use]
    pub fn is_parsing(&self) -> bool {
        matches!(self, TagRuleError::Parsing { .. })
    }
}

/// Errors produced while parsing a custom property list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CustomPropError {
    #[error("Failed to parse custom property '{segment}': {reason}")]
    Parsing {
        reason: &'static str,
        segment: String,
    },
}
