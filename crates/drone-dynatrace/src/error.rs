// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use dynatrace_tag_rules::{CustomPropError, TagRuleError};

/// Errors that can occur while turning the build environment into an event
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Missing required environment variable {0}")]
    MissingVariable(&'static str),

    #[error("Invalid tag rule: {0}")]
    TagRules(#[from] TagRuleError),

    #[error("Invalid custom properties: {0}")]
    CustomProperties(#[from] CustomPropError),

    #[error("Failed to serialize event: {0}")]
    Serialization(#[from] serde_json::Error),
}
