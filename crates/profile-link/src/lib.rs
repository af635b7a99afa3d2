//! Trusted Profile Link Resource
//!
//! Declarative lifecycle management for the links that bind an IAM trusted
//! profile to a compute resource (VSI, IKS service account, ROKS service
//! account). The resource supports Create, Read, Delete and Import; every
//! configurable attribute forces recreation since links cannot be updated.
//!
//! # Example
//!
//! ```no_run
//! use profile_link::{ResourceData, Session, SessionConfig, TrustedProfileLinkResource};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let session = Arc::new(Session::new(SessionConfig::from_env()?));
//! let resource = TrustedProfileLinkResource::new(session);
//!
//! let mut data = ResourceData::from_config(
//!     resource.schema(),
//!     json!({
//!         "profile_id": "Profile-1234",
//!         "cr_type": "IKS_SA",
//!         "link": [{"crn": "crn:v1:bluemix:public:containers-kubernetes:us-south:a/abc:cluster::", "namespace": "default", "name": "builder"}]
//!     }),
//! )?;
//! resource.create(&mut data).await?;
//! println!("created {}", data.id());
//! # Ok(())
//! # }
//! ```

pub mod convert;
pub mod error;
pub mod identifier;
pub mod link;
pub mod plan;
pub mod resource;
pub mod resource_data;
pub mod schema;
pub mod session;

#[cfg(test)]
mod resource_test;
#[cfg(test)]
mod test_utils;

pub use error::{Diagnostics, LinkResourceError, SessionError};
pub use identifier::LinkId;
pub use link::{LinkConfig, LinkTarget};
pub use plan::{plan, PlanAction};
pub use resource::TrustedProfileLinkResource;
pub use resource_data::{ResourceData, ResourceState};
pub use schema::{Attribute, AttributeType, Block, TRUSTED_PROFILE_LINK_SCHEMA};
pub use session::{ClientSession, Session, SessionConfig};
