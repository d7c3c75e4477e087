// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Tag contexts.
//!
//! A tag context is the namespace a tag key belongs to. Tags imported from a cloud
//! provider carry that provider's context, while tags defined by hand in Dynatrace have
//! no namespace and use [`TagContext::Contextless`].
//!
//! # Syntax
//!
//! A context can be written in front of a tag key in two equivalent ways:
//! - **Bracketed**: `[AWS]owner`
//! - **Colon-prefixed**: `AWS:owner`
//!
//! When no context is written the tag is `CONTEXTLESS`.

use std::{fmt::Display, str::FromStr};

use serde::{Serialize, Serializer};

use crate::errors::VocabularyError;

/// The namespace of a tag key.
///
/// | Context | Source |
/// |---------|--------|
/// | `AWS` | Tags imported from AWS resources |
/// | `AWS_GENERIC` | Tags imported through the generic AWS integration |
/// | `AZURE` | Tags imported from Azure resources |
/// | `CLOUD_FOUNDRY` | Cloud Foundry labels |
/// | `CONTEXTLESS` | Manually defined tags (default) |
/// | `ENVIRONMENT` | Tags read from process environment variables |
/// | `GOOGLE_CLOUD` | Google Cloud labels |
/// | `KUBERNETES` | Kubernetes labels |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TagContext {
    Aws,
    AwsGeneric,
    Azure,
    CloudFoundry,
    #[default]
    Contextless,
    Environment,
    GoogleCloud,
    Kubernetes,
}

impl TagContext {
    /// Every known context, in identifier order.
    pub const ALL: [TagContext; 8] = [
        TagContext::Aws,
        TagContext::AwsGeneric,
        TagContext::Azure,
        TagContext::CloudFoundry,
        TagContext::Contextless,
        TagContext::Environment,
        TagContext::GoogleCloud,
        TagContext::Kubernetes,
    ];

    /// The wire identifier, e.g. `CLOUD_FOUNDRY`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TagContext::Aws => "AWS",
            TagContext::AwsGeneric => "AWS_GENERIC",
            TagContext::Azure => "AZURE",
            TagContext::CloudFoundry => "CLOUD_FOUNDRY",
            TagContext::Contextless => "CONTEXTLESS",
            TagContext::Environment => "ENVIRONMENT",
            TagContext::GoogleCloud => "GOOGLE_CLOUD",
            TagContext::Kubernetes => "KUBERNETES",
        }
    }

    /// Returns true when `token` is written the way context identifiers are: ASCII
    /// letters and underscores only.
    ///
    /// Used to decide whether the first part of an unbracketed `a:b` tag names a
    /// context (and must therefore be valid) or is the tag key itself.
    #[must_use]
    pub(crate) fn is_context_shaped(token: &str) -> bool {
        !token.is_empty()
            && token
                .chars()
                .all(|ch| ch.is_ascii_alphabetic() || ch == '_')
    }
}

/// Parses a context identifier. Matching is exact: `aws` is not `AWS`.
impl FromStr for TagContext {
    type Err = VocabularyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AWS" => Ok(TagContext::Aws),
            "AWS_GENERIC" => Ok(TagContext::AwsGeneric),
            "AZURE" => Ok(TagContext::Azure),
            "CLOUD_FOUNDRY" => Ok(TagContext::CloudFoundry),
            "CONTEXTLESS" => Ok(TagContext::Contextless),
            "ENVIRONMENT" => Ok(TagContext::Environment),
            "GOOGLE_CLOUD" => Ok(TagContext::GoogleCloud),
            "KUBERNETES" => Ok(TagContext::Kubernetes),
            _ => Err(VocabularyError::UnknownTagContext(s.to_string())),
        }
    }
}

impl Display for TagContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TagContext {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}
