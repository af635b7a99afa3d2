//! IAM Identity API models
//!
//! These models match the trusted profile link payloads of the IAM Identity
//! API (`/v1/profiles/{profile-id}/links`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Compute resource type a trusted profile can be linked to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComputeResourceType {
    /// Virtual server instance
    #[serde(rename = "VSI")]
    Vsi,
    /// Kubernetes service account
    #[serde(rename = "IKS_SA")]
    IksSa,
    /// Red Hat OpenShift service account
    #[serde(rename = "ROKS_SA")]
    RoksSa,
}

impl ComputeResourceType {
    /// All accepted values, in wire form
    pub const VALUES: [&'static str; 3] = ["VSI", "IKS_SA", "ROKS_SA"];

    /// Wire representation of the type
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vsi => "VSI",
            Self::IksSa => "IKS_SA",
            Self::RoksSa => "ROKS_SA",
        }
    }

    /// Service account types address the target by namespace and name
    pub fn requires_workload_identity(&self) -> bool {
        matches!(self, Self::IksSa | Self::RoksSa)
    }
}

impl fmt::Display for ComputeResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComputeResourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "VSI" => Ok(Self::Vsi),
            "IKS_SA" => Ok(Self::IksSa),
            "ROKS_SA" => Ok(Self::RoksSa),
            other => Err(format!(
                "unknown compute resource type {:?}, expected one of {}",
                other,
                Self::VALUES.join(", ")
            )),
        }
    }
}

/// Link target sent when creating a link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateProfileLinkRequestLink {
    /// CRN of the compute resource
    pub crn: String,
    /// Compute resource namespace (IKS_SA / ROKS_SA only)
    pub namespace: String,
    /// Compute resource name (IKS_SA / ROKS_SA only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Request body for `POST /v1/profiles/{profile-id}/links`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateProfileLinkRequest {
    /// Optional name of the link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Compute resource type
    pub cr_type: ComputeResourceType,
    /// Link target
    pub link: CreateProfileLinkRequestLink,
}

/// Link target as echoed back by the server
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileLinkLink {
    /// CRN of the compute resource
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crn: Option<String>,
    /// Namespace (IKS_SA / ROKS_SA only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Service account name (IKS_SA / ROKS_SA only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Trusted profile link as stored by the IAM Identity service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileLink {
    /// Server-assigned link ID
    pub id: String,
    /// Version of the link, used for optimistic concurrency
    pub entity_tag: String,
    /// Creation time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
    /// Optional name of the link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Compute resource type
    pub cr_type: ComputeResourceType,
    /// Linked compute resource
    pub link: ProfileLinkLink,
}

/// Response of `GET /v1/profiles/{profile-id}/links`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileLinkList {
    /// Links of the profile
    #[serde(default)]
    pub links: Vec<ProfileLink>,
}
