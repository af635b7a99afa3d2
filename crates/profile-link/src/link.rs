//! Typed view of the link configuration.
//!
//! Resource data is validated against the schema at the boundary; from there
//! on the adapter works with these types only.

use crate::convert::target_from_map;
use crate::error::LinkResourceError;
use crate::identifier::ID_SEPARATOR;
use crate::resource_data::ResourceData;
use iam_identity_client::ComputeResourceType;
use serde_json::Value;

/// Compute resource a trusted profile is linked to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTarget {
    /// CRN of the compute resource
    pub crn: String,
    /// Namespace (IKS_SA / ROKS_SA only)
    pub namespace: String,
    /// Name (IKS_SA / ROKS_SA only); `None` is distinct from an empty name
    pub name: Option<String>,
}

/// Desired state of a trusted profile link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkConfig {
    /// Trusted profile the link belongs to
    pub profile_id: String,
    /// Compute resource type
    pub cr_type: ComputeResourceType,
    /// Linked compute resource
    pub link: LinkTarget,
    /// Link name; `None` when not set in configuration
    pub name: Option<String>,
}

impl LinkConfig {
    /// Read the typed configuration out of resource data.
    pub fn from_resource_data(data: &ResourceData) -> Result<Self, LinkResourceError> {
        let profile_id = data
            .get_str("profile_id")
            .ok_or_else(|| missing("profile_id"))?
            .to_string();

        let cr_type = data
            .get_str("cr_type")
            .ok_or_else(|| missing("cr_type"))?
            .parse::<ComputeResourceType>()
            .map_err(|e| LinkResourceError::InvalidConfiguration(format!("cr_type: {}", e)))?;

        let link = match data.get("link") {
            Some(Value::Array(items)) if items.len() == 1 => match &items[0] {
                Value::Object(map) => target_from_map(map)?,
                _ => {
                    return Err(LinkResourceError::InvalidConfiguration(
                        "link: element must be a map".to_string(),
                    ))
                }
            },
            Some(_) => {
                return Err(LinkResourceError::InvalidConfiguration(
                    "link: exactly one element is required".to_string(),
                ))
            }
            None => return Err(missing("link")),
        };

        Ok(Self {
            profile_id,
            cr_type,
            link,
            name: data.get_str("name").map(str::to_string),
        })
    }

    /// Check the target against the compute resource type. Service account
    /// links need both a namespace and a name; VSI links ignore them.
    pub fn validate(&self) -> Result<(), LinkResourceError> {
        if self.profile_id.trim().is_empty() {
            return Err(LinkResourceError::InvalidConfiguration(
                "profile_id must not be empty".to_string(),
            ));
        }
        if self.profile_id.contains(ID_SEPARATOR) {
            return Err(LinkResourceError::InvalidConfiguration(format!(
                "profile_id must not contain {:?}",
                ID_SEPARATOR
            )));
        }
        if self.link.crn.trim().is_empty() {
            return Err(LinkResourceError::InvalidConfiguration(
                "link.0.crn must not be empty".to_string(),
            ));
        }
        if self.cr_type.requires_workload_identity() {
            if self.link.namespace.is_empty() {
                return Err(LinkResourceError::InvalidConfiguration(format!(
                    "link.0.namespace is required when cr_type is {}",
                    self.cr_type
                )));
            }
            if self.link.name.as_deref().is_none_or(str::is_empty) {
                return Err(LinkResourceError::InvalidConfiguration(format!(
                    "link.0.name is required when cr_type is {}",
                    self.cr_type
                )));
            }
        }
        Ok(())
    }
}

fn missing(attribute: &str) -> LinkResourceError {
    LinkResourceError::InvalidConfiguration(format!("{}: required attribute is missing", attribute))
}
