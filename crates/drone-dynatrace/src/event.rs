// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! The `CUSTOM_DEPLOYMENT` event pushed to the Dynatrace events API.
//!
//! ```json
//! {
//!   "eventType": "CUSTOM_DEPLOYMENT",
//!   "timeoutMinutes": 0,
//!   "attachRules": {
//!     "tagRule": [{"meTypes": ["HOST"], "tags": [{"context": "CONTEXTLESS", "key": "tagname"}]}]
//!   },
//!   "source": "Drone CI",
//!   "deploymentName": "octocat/hello-world",
//!   "deploymentVersion": "1.2.3 alpha",
//!   "customProperties": {"Commit Message": "Fix the build"}
//! }
//! ```

use dynatrace_tag_rules::{parse_custom_props, parse_tag_rules, CustomProperties, TagRuleInstance};
use serde::Serialize;
use tracing::debug;

use crate::{config::PluginConfig, error::PluginError};

const EVENT_TYPE: &str = "CUSTOM_DEPLOYMENT";
const DEFAULT_DEPLOYMENT_NAME: &str = "Drone deployment";
const COMMIT_MESSAGE_PROPERTY: &str = "Commit Message";

/// Selects the monitored entities an event is attached to.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachRules {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub entity_ids: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tag_rule: Vec<TagRuleInstance>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentEvent {
    pub event_type: &'static str,
    pub timeout_minutes: u32,
    pub attach_rules: AttachRules,
    pub source: String,
    pub deployment_name: String,
    pub deployment_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment_project: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ci_back_link: Option<String>,
    #[serde(skip_serializing_if = "CustomProperties::is_empty")]
    pub custom_properties: CustomProperties,
}

impl DeploymentEvent {
    /// Builds the event for the current build.
    ///
    /// The commit message is added as the `Commit Message` property unless the
    /// pipeline already set one.
    pub fn from_config(config: &PluginConfig) -> Result<Self, PluginError> {
        let tag_rule = match &config.tag_rule {
            Some(raw) => parse_tag_rules(raw)?,
            None => Vec::new(),
        };

        let mut custom_properties = match &config.custom_properties {
            Some(raw) => parse_custom_props(raw)?,
            None => CustomProperties::new(),
        };
        if !custom_properties.contains_key(COMMIT_MESSAGE_PROPERTY) {
            custom_properties.insert(COMMIT_MESSAGE_PROPERTY, Some(config.commit_message.clone()));
        }

        debug!(
            "Built deployment event with {} tag rule(s), {} entity id(s), {} custom property(ies)",
            tag_rule.len(),
            config.entity_ids.len(),
            custom_properties.len()
        );

        Ok(Self {
            event_type: EVENT_TYPE,
            timeout_minutes: config.timeout_minutes,
            attach_rules: AttachRules {
                entity_ids: config.entity_ids.clone(),
                tag_rule,
            },
            source: config.commit_author.clone(),
            deployment_name: config
                .repo
                .clone()
                .unwrap_or_else(|| DEFAULT_DEPLOYMENT_NAME.to_string()),
            deployment_version: config.commit_sha.clone(),
            deployment_project: config.repo.clone(),
            ci_back_link: config.build_link.clone(),
            custom_properties,
        })
    }

    pub fn to_json(&self) -> Result<String, PluginError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
