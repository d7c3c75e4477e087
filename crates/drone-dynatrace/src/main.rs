// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

use std::{env, process::ExitCode, str::FromStr};

use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use drone_dynatrace::{config::LOG_LEVEL_VAR, DeploymentEvent, LogLevel, PluginConfig, PluginError};

pub fn main() -> ExitCode {
    // The config may be invalid, so logging cannot wait for it.
    let log_level = env::var(LOG_LEVEL_VAR)
        .ok()
        .and_then(|val| LogLevel::from_str(val.trim()).ok())
        .unwrap_or_default();
    let env_filter = log_level.as_ref();

    #[allow(clippy::expect_used)]
    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_new(env_filter).expect("could not parse log level in configuration"),
        )
        .with_writer(std::io::stderr)
        .with_level(true)
        .with_thread_names(false)
        .with_thread_ids(false)
        .with_line_number(false)
        .with_file(false)
        .with_target(true)
        .without_time()
        .finish();

    #[allow(clippy::expect_used)]
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    debug!("Logging subsystem enabled");

    match run() {
        Ok(payload) => {
            println!("{payload}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Unable to build Dynatrace deployment event: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<String, PluginError> {
    let config = PluginConfig::from_env()?;
    debug!("Loaded plugin configuration: {config:?}");

    let event = DeploymentEvent::from_config(&config)?;
    info!(
        "Built {} event for {} ({})",
        event.event_type,
        config.events_url(),
        event.deployment_version
    );

    event.to_json()
}
