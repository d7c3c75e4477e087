// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Parsers for the two compact string formats used to configure Dynatrace deployment
//! events:
//!
//! - **Tag rules** (`HOST=[AWS]owner:core&&team,SERVICE=tag1`), which select the
//!   monitored entities an event attaches to. See [`parse_tag_rules`].
//! - **Custom properties** (`Team=core,Pipeline=release`), free-form key/value pairs
//!   carried by the event. See [`parse_custom_props`].
//!
//! Both parsers are pure functions over their input string and can be called from any
//! thread. Entity types and tag contexts are closed vocabularies modelled as enums.

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

pub mod custom_props;
pub mod entity_type;
pub mod errors;
pub mod tag_context;
pub mod tag_rule;

pub use custom_props::{parse_custom_props, CustomProperties};
pub use entity_type::EntityType;
pub use errors::{CustomPropError, TagRuleError, VocabularyError};
pub use tag_context::TagContext;
pub use tag_rule::{parse_tag_rules, TagDescription, TagRuleInstance};
