// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::{env, fmt, str::FromStr};

use tracing::warn;

use crate::{error::PluginError, log_level::LogLevel};

pub const ENVIRONMENT_VAR: &str = "PLUGIN_DYNATRACE_ENVIRONMENT";
pub const API_TOKEN_VAR: &str = "PLUGIN_DYNATRACE_API_TOKEN";
pub const TAG_RULE_VAR: &str = "PLUGIN_DYNATRACE_TAG_RULE";
pub const ENTITY_VAR: &str = "PLUGIN_DYNATRACE_ENTITY";
pub const CUSTOM_PROPERTIES_VAR: &str = "PLUGIN_DYNATRACE_CUSTOM_PROPERTIES";
pub const TIMEOUT_MINUTES_VAR: &str = "PLUGIN_DYNATRACE_TIMEOUT_MINUTES";
pub const LOG_LEVEL_VAR: &str = "PLUGIN_LOG_LEVEL";

const DEFAULT_COMMIT_AUTHOR: &str = "Drone CI";
const DEFAULT_COMMIT_SHA: &str = "No Text In Revision";
const DEFAULT_COMMIT_MESSAGE: &str = "No Text In Changelog";
const EVENTS_API_PATH: &str = "/api/v1/events";

/// Plugin configuration, read from the variables Drone exposes to a plugin step.
///
/// Settings from the pipeline YAML arrive as `PLUGIN_*`, build metadata as `DRONE_*`.
#[derive(Clone, PartialEq)]
pub struct PluginConfig {
    /// Dynatrace environment base URL, always with a scheme and no trailing slash
    pub environment_url: String,
    pub api_token: String,
    /// Raw tag rule list, parsed when the event is built
    pub tag_rule: Option<String>,
    pub entity_ids: Vec<String>,
    /// Raw custom property list, parsed when the event is built
    pub custom_properties: Option<String>,
    pub timeout_minutes: u32,
    pub commit_author: String,
    pub commit_sha: String,
    pub commit_message: String,
    pub repo: Option<String>,
    pub build_link: Option<String>,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            environment_url: String::new(),
            api_token: String::new(),
            tag_rule: None,
            entity_ids: Vec::new(),
            custom_properties: None,
            timeout_minutes: 0,
            commit_author: DEFAULT_COMMIT_AUTHOR.to_string(),
            commit_sha: DEFAULT_COMMIT_SHA.to_string(),
            commit_message: DEFAULT_COMMIT_MESSAGE.to_string(),
            repo: None,
            build_link: None,
        }
    }
}

impl fmt::Debug for PluginConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginConfig")
            .field("environment_url", &self.environment_url)
            .field("api_token", &"<redacted>")
            .field("tag_rule", &self.tag_rule)
            .field("entity_ids", &self.entity_ids)
            .field("custom_properties", &self.custom_properties)
            .field("timeout_minutes", &self.timeout_minutes)
            .field("commit_author", &self.commit_author)
            .field("commit_sha", &self.commit_sha)
            .field("commit_message", &self.commit_message)
            .field("repo", &self.repo)
            .field("build_link", &self.build_link)
            .finish()
    }
}

impl PluginConfig {
    /// Create configuration from environment variables
    ///
    /// `PLUGIN_LOG_LEVEL` is only checked here so a typo fails the step; the binary
    /// reads it on its own to install the subscriber before anything else runs.
    pub fn from_env() -> Result<Self, PluginError> {
        let environment_url = read_var(ENVIRONMENT_VAR)
            .map(|url| normalize_url(&url))
            .ok_or(PluginError::MissingVariable(ENVIRONMENT_VAR))?;
        let api_token = read_var(API_TOKEN_VAR)
            .ok_or(PluginError::MissingVariable(API_TOKEN_VAR))?;

        let timeout_minutes = match read_var(TIMEOUT_MINUTES_VAR) {
            Some(raw) => raw.parse::<u32>().unwrap_or_else(|_| {
                warn!("{TIMEOUT_MINUTES_VAR} is not a whole number of minutes: '{raw}', using 0");
                0
            }),
            None => 0,
        };
        if let Some(raw) = read_var(LOG_LEVEL_VAR) {
            LogLevel::from_str(&raw).map_err(PluginError::InvalidConfig)?;
        }

        let config = Self {
            environment_url,
            api_token,
            tag_rule: read_var(TAG_RULE_VAR),
            entity_ids: read_var(ENTITY_VAR)
                .map(|ids| parse_entity_ids(&ids))
                .unwrap_or_default(),
            custom_properties: read_var(CUSTOM_PROPERTIES_VAR),
            timeout_minutes,
            commit_author: read_var("DRONE_COMMIT_AUTHOR")
                .unwrap_or_else(|| DEFAULT_COMMIT_AUTHOR.to_string()),
            commit_sha: read_var("DRONE_COMMIT_SHA")
                .unwrap_or_else(|| DEFAULT_COMMIT_SHA.to_string()),
            commit_message: read_var("DRONE_COMMIT_MESSAGE")
                .unwrap_or_else(|| DEFAULT_COMMIT_MESSAGE.to_string()),
            repo: read_var("DRONE_REPO"),
            build_link: read_var("DRONE_BUILD_LINK"),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), PluginError> {
        if self.environment_url.trim().is_empty() {
            return Err(PluginError::InvalidConfig(
                "Dynatrace environment URL cannot be empty".to_string(),
            ));
        }

        if self.api_token.trim().is_empty() {
            return Err(PluginError::InvalidConfig(
                "Dynatrace API token cannot be empty".to_string(),
            ));
        }

        // An event nobody can find is useless, so it must target something.
        if self.tag_rule.is_none() && self.entity_ids.is_empty() {
            return Err(PluginError::InvalidConfig(format!(
                "This plugin requires some way to tie a Drone event to a Dynatrace Monitoring Entity, set {TAG_RULE_VAR} or {ENTITY_VAR}"
            )));
        }

        Ok(())
    }

    /// The events endpoint of the configured environment.
    #[must_use]
    pub fn events_url(&self) -> String {
        format!("{}{EVENTS_API_PATH}", self.environment_url)
    }
}

/// Reads a variable, treating unset, non-unicode and blank values alike.
fn read_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Adds an `https://` scheme when none is given and drops trailing slashes.
fn normalize_url(url: &str) -> String {
    let url = url.trim().trim_end_matches('/');

    if url.starts_with("http://") || url.starts_with("https://") || url.is_empty() {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

/// Splits a comma-separated list of entity IDs, skipping blanks.
fn parse_entity_ids(ids: &str) -> Vec<String> {
    ids.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}
