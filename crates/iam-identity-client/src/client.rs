//! IAM Identity API client
//!
//! Implements the trusted profile link endpoints:
//! `/v1/profiles/{profile-id}/links` and `/v1/profiles/{profile-id}/links/{link-id}`

use crate::common::{encode_segment, HttpClient};
use crate::error::IamIdentityError;
use crate::iam_identity_trait::IamIdentityClientTrait;
use crate::models::*;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// IAM Identity API client
#[derive(Debug, Clone)]
pub struct IamIdentityClient {
    http: HttpClient,
}

impl IamIdentityClient {
    /// Create a new IAM Identity client
    ///
    /// # Arguments
    /// * `base_url` - IAM Identity endpoint (e.g., "https://iam.cloud.ibm.com")
    /// * `token` - IAM bearer token
    pub fn new(base_url: String, token: String) -> Result<Self, IamIdentityError> {
        Self::with_timeout(base_url, token, DEFAULT_TIMEOUT)
    }

    /// Create a new IAM Identity client with a custom request timeout
    pub fn with_timeout(base_url: String, token: String, timeout: Duration) -> Result<Self, IamIdentityError> {
        if token.trim().is_empty() {
            return Err(IamIdentityError::Authentication("IAM token is empty".to_string()));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(IamIdentityError::Http)?;

        Ok(Self {
            http: HttpClient::new(client, base_url, token),
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    fn links_path(profile_id: &str) -> String {
        format!("/v1/profiles/{}/links", encode_segment(profile_id))
    }

    fn link_path(profile_id: &str, link_id: &str) -> String {
        format!("{}/{}", Self::links_path(profile_id), encode_segment(link_id))
    }

    /// Create a link between a trusted profile and a compute resource
    ///
    /// # Arguments
    /// * `profile_id` - ID of the trusted profile
    /// * `request` - Compute resource type, target and optional link name
    ///
    /// # Returns
    /// * `Ok(ProfileLink)` - The created link, including server-assigned fields
    /// * `Err(IamIdentityError)` - If the request fails
    pub async fn create_link(
        &self,
        profile_id: &str,
        request: &CreateProfileLinkRequest,
    ) -> Result<ProfileLink, IamIdentityError> {
        if profile_id.is_empty() {
            return Err(IamIdentityError::InvalidRequest("profile_id must not be empty".to_string()));
        }
        if request.link.crn.is_empty() {
            return Err(IamIdentityError::InvalidRequest("link.crn must not be empty".to_string()));
        }

        debug!("Creating {} link for trusted profile {}", request.cr_type, profile_id);
        let link: ProfileLink = self.http.post(&Self::links_path(profile_id), request).await?;
        debug!("Created link {} for trusted profile {}", link.id, profile_id);
        Ok(link)
    }

    /// Get a link of a trusted profile
    ///
    /// # Returns
    /// * `Ok(ProfileLink)` - The link
    /// * `Err(IamIdentityError::NotFound)` - If the profile or link does not exist
    pub async fn get_link(&self, profile_id: &str, link_id: &str) -> Result<ProfileLink, IamIdentityError> {
        debug!("Fetching link {} of trusted profile {}", link_id, profile_id);
        self.http.get(&Self::link_path(profile_id, link_id)).await
    }

    /// Delete a link of a trusted profile
    pub async fn delete_link(&self, profile_id: &str, link_id: &str) -> Result<(), IamIdentityError> {
        debug!("Deleting link {} of trusted profile {}", link_id, profile_id);
        self.http.delete(&Self::link_path(profile_id, link_id)).await
    }

    /// List all links of a trusted profile
    pub async fn list_links(&self, profile_id: &str) -> Result<Vec<ProfileLink>, IamIdentityError> {
        debug!("Listing links of trusted profile {}", profile_id);
        let list: ProfileLinkList = self.http.get(&Self::links_path(profile_id)).await?;
        Ok(list.links)
    }
}

#[async_trait::async_trait]
impl IamIdentityClientTrait for IamIdentityClient {
    fn base_url(&self) -> &str {
        self.http.base_url()
    }

    async fn create_link(&self, profile_id: &str, request: &CreateProfileLinkRequest) -> Result<ProfileLink, IamIdentityError> {
        self.create_link(profile_id, request).await
    }

    async fn get_link(&self, profile_id: &str, link_id: &str) -> Result<ProfileLink, IamIdentityError> {
        self.get_link(profile_id, link_id).await
    }

    async fn delete_link(&self, profile_id: &str, link_id: &str) -> Result<(), IamIdentityError> {
        self.delete_link(profile_id, link_id).await
    }

    async fn list_links(&self, profile_id: &str) -> Result<Vec<ProfileLink>, IamIdentityError> {
        self.list_links(profile_id).await
    }
}
