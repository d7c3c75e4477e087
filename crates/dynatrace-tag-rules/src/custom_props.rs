// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Custom property parsing.
//!
//! Custom properties are free-form key/value pairs attached to an outbound event.
//!
//! # Format
//!
//! ```text
//! Team=core,Pipeline=release,Query=a=b
//! ```
//!
//! - Pairs are separated by `,`; blank segments are skipped
//! - The first `=` separates the key from the value, later ones belong to the value
//! - `key=` (or a bare `key`) carries no value
//! - When a key repeats, the last value wins

use indexmap::IndexMap;
use serde::{ser::SerializeMap, Serialize, Serializer};
use tracing::debug;

use crate::errors::CustomPropError;

const PAIR_DELIMITER: char = ',';
const VALUE_DELIMITER: char = '=';

/// Parsed custom properties, one entry per distinct key.
///
/// Keys keep the position of their first occurrence. A value of `None` means the
/// property was named without a value; such entries are left out when serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomProperties(IndexMap<String, Option<String>>);

impl CustomProperties {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the entry for `key`: `None` when the key is missing, `Some(None)` when it
    /// is present without a value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Option<&str>> {
        self.0.get(key).map(Option::as_deref)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Inserts or overwrites a property.
    pub fn insert(&mut self, key: impl Into<String>, value: Option<String>) {
        self.0.insert(key.into(), value);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }
}

impl Serialize for CustomProperties {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        for (key, value) in &self.0 {
            if let Some(value) = value {
                map.serialize_entry(key, value)?;
            }
        }
        map.end()
    }
}

/// Parses a comma-separated `key=value` list.
///
/// # Errors
///
/// Returns [`CustomPropError::Parsing`] when a segment has an empty key, such as
/// `=2` or ` =2`. Blank segments are never an error.
///
/// # Examples
///
/// ```
/// use dynatrace_tag_rules::parse_custom_props;
///
/// let props = parse_custom_props("val1=part1=part2ofval, ,foo=").unwrap();
/// assert_eq!(props.get("val1"), Some(Some("part1=part2ofval")));
/// assert_eq!(props.get("foo"), Some(None));
/// assert_eq!(props.len(), 2);
/// ```
pub fn parse_custom_props(input: &str) -> Result<CustomProperties, CustomPropError> {
    let mut props = CustomProperties::new();

    for segment in input.split(PAIR_DELIMITER) {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }

        let (key, value) = match segment.split_once(VALUE_DELIMITER) {
            Some((key, value)) => (key.trim(), Some(value).filter(|value| !value.is_empty())),
            None => (segment, None),
        };
        if key.is_empty() {
            return Err(CustomPropError::Parsing {
                reason: "empty key",
                segment: segment.to_string(),
            });
        }

        props.insert(key, value.map(str::to_string));
    }

    debug!("Parsed {} custom property(ies)", props.len());
    Ok(props)
}
