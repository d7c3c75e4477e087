// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Drone plugin glue for Dynatrace deployment events.
//!
//! Reads the plugin settings and build metadata Drone exposes as environment variables,
//! runs them through the tag rule and custom property parsers and assembles the
//! `CUSTOM_DEPLOYMENT` event payload.

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

pub mod config;
pub mod error;
pub mod event;
pub mod log_level;

pub use config::PluginConfig;
pub use error::PluginError;
pub use event::{AttachRules, DeploymentEvent};
pub use log_level::LogLevel;
