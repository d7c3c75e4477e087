// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Tag rule parsing.
//!
//! A tag rule list ties monitored entity types to the tags an event should attach to.
//!
//! # Format
//!
//! ```text
//! HOST=CONTEXTLESS:owner&&[AWS]team:core,PROCESS_GROUP=[CONTEXTLESS]env:prod
//! ```
//!
//! - Rules are separated by `,`
//! - Each rule is `<entity type>=<tags>`
//! - Tags are separated by `&&`
//! - Each tag is `[CONTEXT]key:value`, `CONTEXT:key:value` or `key:value`; the context
//!   and the value are optional
//!
//! Only the first `:` after the key separates it from the value, so values may contain
//! colons. Spaces are ordinary characters.
//!
//! In the unbracketed form, a first part made only of letters and `_` is read as a
//! context and must be a known one: `haha:x` is rejected, while `tag1:x` is the key
//! `tag1` with value `x`. Write `[CONTEXTLESS]env:prod` for a plain word key with a value.
//!
//! Parsing is all-or-nothing: the first malformed segment aborts the whole list.

use std::str::FromStr;

use serde::Serialize;
use tracing::debug;

use crate::{entity_type::EntityType, errors::TagRuleError, tag_context::TagContext};

const RULE_DELIMITER: char = ',';
const ENTITY_DELIMITER: char = '=';
const TAG_DELIMITER: &str = "&&";
const VALUE_DELIMITER: char = ':';
const CONTEXT_OPEN: char = '[';
const CONTEXT_CLOSE: char = ']';

/// A context-qualified tag, optionally carrying a value.
///
/// `value` is `None` when the source did not supply one (including a trailing `:`);
/// it is then left out of the serialized form entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagDescription {
    pub context: TagContext,
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl TagDescription {
    #[must_use]
    pub fn new(context: TagContext, key: impl Into<String>, value: Option<&str>) -> Self {
        Self {
            context,
            key: key.into(),
            value: value.map(str::to_string),
        }
    }
}

/// One rule group: a single entity type and the tags it must carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagRuleInstance {
    /// Always holds exactly one entity type; repeated types are not merged.
    pub me_types: Vec<EntityType>,
    pub tags: Vec<TagDescription>,
}

/// Parses a rule list into one [`TagRuleInstance`] per rule group, in source order.
///
/// # Errors
///
/// - [`TagRuleError::Parsing`] for an empty rule group (stray `,`), a missing `=`, an
///   empty entity type or tag list, an empty tag (stray `&&`), an empty or unclosed
///   `[...]` context, or an empty key.
/// - [`TagRuleError::Vocabulary`] for an unknown entity type or tag context. Without
///   brackets, a head made only of letters and `_` is taken as a context, so
///   `HOST=env:prod` fails on `env`; `HOST=[CONTEXTLESS]env:prod` is the accepted form.
///
/// # Examples
///
/// ```
/// use dynatrace_tag_rules::{parse_tag_rules, EntityType, TagContext};
///
/// let rules = parse_tag_rules("HOST=[AWS]tag1:testval:stillfirstval").unwrap();
/// assert_eq!(rules[0].me_types, vec![EntityType::Host]);
/// assert_eq!(rules[0].tags[0].context, TagContext::Aws);
/// assert_eq!(rules[0].tags[0].key, "tag1");
/// assert_eq!(rules[0].tags[0].value.as_deref(), Some("testval:stillfirstval"));
/// ```
pub fn parse_tag_rules(input: &str) -> Result<Vec<TagRuleInstance>, TagRuleError> {
    let rules = input
        .split(RULE_DELIMITER)
        .map(|group| parse_rule(group, input))
        .collect::<Result<Vec<_>, _>>()?;

    debug!("Parsed {} tag rule(s)", rules.len());
    Ok(rules)
}

fn parse_rule(group: &str, input: &str) -> Result<TagRuleInstance, TagRuleError> {
    if group.is_empty() {
        return Err(TagRuleError::parsing("empty rule group", group, input));
    }

    let Some((me_type, tag_specs)) = group.split_once(ENTITY_DELIMITER) else {
        return Err(TagRuleError::parsing("expected '<entity type>=<tags>'", group, input));
    };
    if me_type.is_empty() {
        return Err(TagRuleError::parsing("missing entity type before '='", group, input));
    }
    if tag_specs.is_empty() {
        return Err(TagRuleError::parsing("missing tags after '='", group, input));
    }

    let me_type = EntityType::from_str(me_type)?;
    let tags = tag_specs
        .split(TAG_DELIMITER)
        .map(|spec| parse_tag(spec, input))
        .collect::<Result<Vec<_>, _>>()?;

    debug!("Tag rule for {}: {} tag(s)", me_type, tags.len());
    Ok(TagRuleInstance {
        me_types: vec![me_type],
        tags,
    })
}

/// Parses a single tag in two stages: first the context is split off, then the key
/// is separated from the value.
fn parse_tag(spec: &str, input: &str) -> Result<TagDescription, TagRuleError> {
    if spec.is_empty() {
        return Err(TagRuleError::parsing("empty tag between '&&' delimiters", spec, input));
    }

    let (context, key_value) = split_context(spec, input)?;

    let (key, value) = match key_value.split_once(VALUE_DELIMITER) {
        Some((key, value)) => (key, Some(value).filter(|value| !value.is_empty())),
        None => (key_value, None),
    };
    if key.is_empty() {
        return Err(TagRuleError::parsing("empty tag key", spec, input));
    }

    Ok(TagDescription::new(context, key, value))
}

fn split_context<'a>(spec: &'a str, input: &str) -> Result<(TagContext, &'a str), TagRuleError> {
    if let Some(bracketed) = spec.strip_prefix(CONTEXT_OPEN) {
        let Some((context, key_value)) = bracketed.split_once(CONTEXT_CLOSE) else {
            return Err(TagRuleError::parsing("unclosed '[' in tag context", spec, input));
        };
        if context.is_empty() {
            return Err(TagRuleError::parsing("empty tag context '[]'", spec, input));
        }
        return Ok((TagContext::from_str(context)?, key_value));
    }

    match spec.split_once(VALUE_DELIMITER) {
        // Known contexts are all context-shaped, so an unknown one fails here too.
        Some((head, key_value)) if TagContext::is_context_shaped(head) => {
            Ok((TagContext::from_str(head)?, key_value))
        }
        _ => Ok((TagContext::default(), spec)),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::errors::VocabularyError;
    use duplicate::duplicate_item;
    use tracing_test::traced_test;

    fn contextless(key: &str, value: Option<&str>) -> TagDescription {
        TagDescription::new(TagContext::Contextless, key, value)
    }

    #[test]
    fn test_one_rule() {
        let rules = parse_tag_rules("HOST=CONTEXTLESS:tag1").unwrap();
        assert_eq!(
            rules,
            vec![TagRuleInstance {
                me_types: vec![EntityType::Host],
                tags: vec![contextless("tag1", None)],
            }]
        );
    }

    #[test]
    fn test_multiple_rules() {
        let rules = parse_tag_rules("HOST=CONTEXTLESS:tag1,PROCESS_GROUP=tag1").unwrap();
        assert_eq!(
            rules,
            vec![
                TagRuleInstance {
                    me_types: vec![EntityType::Host],
                    tags: vec![contextless("tag1", None)],
                },
                TagRuleInstance {
                    me_types: vec![EntityType::ProcessGroup],
                    tags: vec![contextless("tag1", None)],
                },
            ]
        );
    }

    #[test]
    fn test_multiple_tags_in_one_rule() {
        let rules = parse_tag_rules("HOST=CONTEXTLESS:tag1&&tag2&&tag3").unwrap();
        assert_eq!(
            rules[0].tags,
            vec![
                contextless("tag1", None),
                contextless("tag2", None),
                contextless("tag3", None),
            ]
        );
    }

    #[test]
    fn test_key_only_defaults_to_contextless() {
        let rules = parse_tag_rules("HOST=tag1").unwrap();
        assert_eq!(rules[0].tags, vec![contextless("tag1", None)]);
    }

    #[test]
    fn test_value_without_context() {
        let rules = parse_tag_rules("HOST=tag1:123&&t2").unwrap();
        assert_eq!(
            rules[0].tags,
            vec![contextless("tag1", Some("123")), contextless("t2", None)]
        );
    }

    #[test]
    fn test_bracket_context_with_colon_in_value() {
        let rules = parse_tag_rules("HOST=[AWS]tag1:testval:stillfirstval").unwrap();
        assert_eq!(
            rules[0].tags,
            vec![TagDescription::new(
                TagContext::Aws,
                "tag1",
                Some("testval:stillfirstval")
            )]
        );
    }

    #[test]
    fn test_colon_context_with_value() {
        let rules = parse_tag_rules("SERVICE=KUBERNETES:app:checkout").unwrap();
        assert_eq!(
            rules[0].tags,
            vec![TagDescription::new(
                TagContext::Kubernetes,
                "app",
                Some("checkout")
            )]
        );
    }

    #[test]
    fn test_known_context_in_colon_form() {
        let rules = parse_tag_rules("HOST=AZURE:ahahaha").unwrap();
        assert_eq!(
            rules[0].tags,
            vec![TagDescription::new(TagContext::Azure, "ahahaha", None)]
        );
    }

    #[test]
    fn test_trailing_colon_means_no_value() {
        let rules = parse_tag_rules("HOST=[ENVIRONMENT]stage:&&tag2:").unwrap();
        assert_eq!(
            rules[0].tags,
            vec![
                TagDescription::new(TagContext::Environment, "stage", None),
                contextless("tag2", None),
            ]
        );
    }

    #[test]
    fn test_values_keep_spaces() {
        let rules = parse_tag_rules("HOST=[CONTEXTLESS]owner:team one").unwrap();
        assert_eq!(rules[0].tags[0].value.as_deref(), Some("team one"));
    }

    #[test]
    fn test_duplicate_entity_types_are_not_merged() {
        let rules = parse_tag_rules("HOST=a,HOST=b&&b").unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].tags, vec![contextless("a", None)]);
        assert_eq!(
            rules[1].tags,
            vec![contextless("b", None), contextless("b", None)]
        );
    }

    #[test]
    fn test_equals_sign_allowed_in_value() {
        let rules = parse_tag_rules("HOST=tag1:a=b").unwrap();
        assert_eq!(rules[0].tags, vec![contextless("tag1", Some("a=b"))]);
    }

    #[duplicate_item(
        test_name                           input;
        [test_rejects_empty_brackets]       ["HOST=[]"];
        [test_rejects_missing_entity_type]  ["=CONTEXTLESS:tag1"];
        [test_rejects_trailing_comma]       ["HOST=CONTEXTLESS:tag1,"];
        [test_rejects_leading_comma]        [",HOST=tag1"];
        [test_rejects_doubled_comma]        ["HOST=tag1,,SERVICE=tag2"];
        [test_rejects_empty_input]          [""];
        [test_rejects_missing_equals]       ["HOST"];
        [test_rejects_missing_tags]         ["HOST="];
        [test_rejects_trailing_ampersands]  ["HOST=tag1&&"];
        [test_rejects_leading_ampersands]   ["HOST=&&tag1"];
        [test_rejects_doubled_ampersands]   ["HOST=tag1&&&&tag2"];
        [test_rejects_unclosed_bracket]     ["HOST=[AWS tag1"];
        [test_rejects_bracket_without_key]  ["HOST=[AWS]"];
        [test_rejects_empty_key]            ["HOST=:value"];
        [test_rejects_context_without_key]  ["HOST=CONTEXTLESS:"];
    )]
    #[test]
    fn test_name() {
        let err = parse_tag_rules(input).unwrap_err();
        assert!(err.is_parsing(), "expected parsing error, got {err:?}");
    }

    #[test]
    fn test_parsing_error_names_segment_and_input() {
        let err = parse_tag_rules("HOST=a,SERVICE").unwrap_err();
        assert_eq!(
            err,
            TagRuleError::Parsing {
                reason: "expected '<entity type>=<tags>'",
                segment: "SERVICE".to_string(),
                input: "HOST=a,SERVICE".to_string(),
            }
        );
    }

    #[test]
    fn test_rejects_unknown_entity_type() {
        assert_eq!(
            parse_tag_rules("TEST=haha:ahahaha").unwrap_err(),
            TagRuleError::Vocabulary(VocabularyError::UnknownEntityType("TEST".to_string()))
        );
    }

    #[test]
    fn test_rejects_unknown_colon_context() {
        assert_eq!(
            parse_tag_rules("HOST=haha:ahahaha").unwrap_err(),
            TagRuleError::Vocabulary(VocabularyError::UnknownTagContext("haha".to_string()))
        );
    }

    #[test]
    fn test_rejects_unknown_bracket_context() {
        assert_eq!(
            parse_tag_rules("HOST=[aws]tag1").unwrap_err(),
            TagRuleError::Vocabulary(VocabularyError::UnknownTagContext("aws".to_string()))
        );
    }

    #[test]
    fn test_letters_only_head_is_read_as_context() {
        assert_eq!(
            parse_tag_rules("HOST=env:prod").unwrap_err(),
            TagRuleError::Vocabulary(VocabularyError::UnknownTagContext("env".to_string()))
        );
        let rules = parse_tag_rules("HOST=[CONTEXTLESS]env:prod").unwrap();
        assert_eq!(rules[0].tags, vec![contextless("env", Some("prod"))]);
    }

    #[test]
    fn test_one_bad_group_fails_whole_list() {
        assert!(parse_tag_rules("HOST=tag1,SERVICE=tag2,NOPE=tag3").is_err());
    }

    #[test]
    fn test_serialization_omits_absent_value() {
        let rules = parse_tag_rules("HOST=tagname&&[AWS]owner:me").unwrap();
        let json = serde_json::to_value(&rules).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{
                "meTypes": ["HOST"],
                "tags": [
                    {"context": "CONTEXTLESS", "key": "tagname"},
                    {"context": "AWS", "key": "owner", "value": "me"}
                ]
            }])
        );
    }

    #[test]
    #[traced_test]
    fn test_logs_parsed_rules() {
        parse_tag_rules("HOST=a,SERVICE=b&&c").unwrap();
        assert!(logs_contain("Tag rule for SERVICE: 2 tag(s)"));
        assert!(logs_contain("Parsed 2 tag rule(s)"));
    }
}
