//! Trusted profile link resource: Create, Read and Delete.
//!
//! Each operation performs exactly one remote call (Create adds the cascaded
//! Read) and reports failures as [`Diagnostics`]. Nothing is retried here;
//! retry policy belongs to whoever drives the lifecycle.

use crate::convert::{create_request, format_timestamp, target_to_map};
use crate::error::{Diagnostics, LinkResourceError};
use crate::identifier::LinkId;
use crate::link::{LinkConfig, LinkTarget};
use crate::resource_data::ResourceData;
use crate::schema::{Block, TRUSTED_PROFILE_LINK_SCHEMA};
use crate::session::ClientSession;
use iam_identity_client::{IamIdentityClientTrait, ProfileLink};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Resource adapter for trusted profile links
pub struct TrustedProfileLinkResource {
    session: Arc<dyn ClientSession>,
}

impl std::fmt::Debug for TrustedProfileLinkResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrustedProfileLinkResource").finish_non_exhaustive()
    }
}

impl TrustedProfileLinkResource {
    /// Adapter borrowing clients from `session`
    pub fn new(session: Arc<dyn ClientSession>) -> Self {
        Self { session }
    }

    /// Schema the adapter reads and writes
    pub fn schema(&self) -> &'static Block {
        &TRUSTED_PROFILE_LINK_SCHEMA
    }

    /// Resource data for an import: only the identifier is known; a
    /// following [`read`](Self::read) fills in the rest.
    pub fn import(&self, id: &str) -> Result<ResourceData, LinkResourceError> {
        let link_id = LinkId::parse(id)?;
        Ok(ResourceData::import(self.schema(), link_id.to_string()))
    }

    fn client(&self) -> Result<Arc<dyn IamIdentityClientTrait>, LinkResourceError> {
        self.session
            .iam_identity_api()
            .map_err(LinkResourceError::ClientUnavailable)
    }

    /// Create the link, store `<profile_id>/<link_id>` as identifier and read
    /// back the server state.
    pub async fn create(&self, data: &mut ResourceData) -> Result<(), Diagnostics> {
        let client = self.client()?;

        let config = LinkConfig::from_resource_data(data)?;
        config.validate()?;
        let request = create_request(&config);

        info!("Creating {} link for trusted profile {}", config.cr_type, config.profile_id);
        let link = match client.create_link(&config.profile_id, &request).await {
            Ok(link) => link,
            Err(e) => {
                debug!("CreateLink failed {}", e);
                return Err(LinkResourceError::RemoteOperationFailed {
                    operation: "CreateLink",
                    source: e,
                }
                .into());
            }
        };

        let id = LinkId::new(config.profile_id, link.id);
        info!("Created trusted profile link {}", id);
        data.set_id(id.to_string());

        self.read(data).await
    }

    /// Refresh every attribute from the server.
    ///
    /// A link that no longer exists clears the identifier and is not an error.
    pub async fn read(&self, data: &mut ResourceData) -> Result<(), Diagnostics> {
        if data.id().is_empty() {
            debug!("Trusted profile link has no identifier, nothing to read");
            return Ok(());
        }

        let client = self.client()?;
        let id = LinkId::parse(data.id())?;

        debug!("Reading trusted profile link {}", id);
        let link = match client.get_link(&id.profile_id, &id.link_id).await {
            Ok(link) => link,
            Err(e) if e.is_not_found() => {
                warn!("Trusted profile link {} no longer exists, removing it from state", id);
                data.set_id("");
                return Ok(());
            }
            Err(e) => {
                debug!("GetLink failed {}", e);
                return Err(LinkResourceError::RemoteOperationFailed {
                    operation: "GetLink",
                    source: e,
                }
                .into());
            }
        };

        apply_link(data, &id, &link).into_result()
    }

    /// Delete the link and clear the identifier.
    pub async fn delete(&self, data: &mut ResourceData) -> Result<(), Diagnostics> {
        let client = self.client()?;
        let id = LinkId::parse(data.id())?;

        info!("Deleting trusted profile link {}", id);
        if let Err(e) = client.delete_link(&id.profile_id, &id.link_id).await {
            debug!("DeleteLink failed {}", e);
            return Err(LinkResourceError::RemoteOperationFailed {
                operation: "DeleteLink",
                source: e,
            }
            .into());
        }

        data.set_id("");
        Ok(())
    }
}

/// Overwrite every declared attribute from the server record, collecting one
/// diagnostic per attribute that could not be set.
fn apply_link(data: &mut ResourceData, id: &LinkId, link: &ProfileLink) -> Diagnostics {
    let target = target_to_map(&LinkTarget::from(&link.link));
    let optional = |value: Option<String>| value.map_or(Value::Null, Value::String);

    let values = [
        ("profile_id", Value::String(id.profile_id.clone())),
        ("cr_type", Value::String(link.cr_type.to_string())),
        ("link", Value::Array(vec![Value::Object(target)])),
        ("name", optional(link.name.clone())),
        ("entity_tag", Value::String(link.entity_tag.clone())),
        ("created_at", optional(format_timestamp(link.created_at))),
        ("modified_at", optional(format_timestamp(link.modified_at))),
    ];

    let mut diags = Diagnostics::new();
    for (attribute, value) in values {
        if let Err(e) = data.set(attribute, value) {
            diags.push(e);
        }
    }
    diags
}
