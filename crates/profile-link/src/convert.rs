//! Converters between configuration and IAM Identity payloads.
//!
//! Optional names are carried as `Option` end to end: an absent name is never
//! turned into an empty string, and an empty string is never dropped.

use crate::error::LinkResourceError;
use crate::link::{LinkConfig, LinkTarget};
use chrono::{DateTime, SecondsFormat, Utc};
use iam_identity_client::{CreateProfileLinkRequest, CreateProfileLinkRequestLink, ProfileLinkLink};
use serde_json::{Map, Value};

/// Configuration map of a `link` element to a typed target.
///
/// `crn` and `namespace` are required; `name` is copied only if present.
pub fn target_from_map(map: &Map<String, Value>) -> Result<LinkTarget, LinkResourceError> {
    let field = |key: &str| -> Result<Option<String>, LinkResourceError> {
        match map.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(LinkResourceError::InvalidConfiguration(format!(
                "link.0.{} must be a string",
                key
            ))),
        }
    };
    let required = |key: &str| -> Result<String, LinkResourceError> {
        field(key)?.ok_or_else(|| {
            LinkResourceError::InvalidConfiguration(format!("link.0.{}: required attribute is missing", key))
        })
    };

    Ok(LinkTarget {
        crn: required("crn")?,
        namespace: required("namespace")?,
        name: field("name")?,
    })
}

/// Typed target back to a configuration map; `name` is omitted when absent.
pub fn target_to_map(target: &LinkTarget) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert("crn".to_string(), Value::String(target.crn.clone()));
    map.insert("namespace".to_string(), Value::String(target.namespace.clone()));
    if let Some(name) = &target.name {
        map.insert("name".to_string(), Value::String(name.clone()));
    }
    map
}

impl From<&LinkTarget> for CreateProfileLinkRequestLink {
    fn from(target: &LinkTarget) -> Self {
        Self {
            crn: target.crn.clone(),
            namespace: target.namespace.clone(),
            name: target.name.clone(),
        }
    }
}

impl From<&ProfileLinkLink> for LinkTarget {
    fn from(link: &ProfileLinkLink) -> Self {
        Self {
            crn: link.crn.clone().unwrap_or_default(),
            namespace: link.namespace.clone().unwrap_or_default(),
            name: link.name.clone(),
        }
    }
}

/// Build the create request; the top-level name is sent only when set.
pub fn create_request(config: &LinkConfig) -> CreateProfileLinkRequest {
    CreateProfileLinkRequest {
        name: config.name.clone(),
        cr_type: config.cr_type,
        link: CreateProfileLinkRequestLink::from(&config.link),
    }
}

/// ISO-8601 rendering used for `created_at` / `modified_at`
pub fn format_timestamp(timestamp: Option<DateTime<Utc>>) -> Option<String> {
    timestamp.map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true))
}
