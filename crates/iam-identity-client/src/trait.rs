//! IamIdentityClient trait for mocking
//!
//! The concrete `IamIdentityClient` implements this trait; resource adapters
//! depend on the trait so tests can substitute the in-memory mock.

use crate::error::IamIdentityError;
use crate::models::*;

/// Trait for IAM Identity API client operations
///
/// All async methods must be `Send` to work with Tokio's work-stealing runtime.
#[async_trait::async_trait]
pub trait IamIdentityClientTrait: Send + Sync {
    /// Get the base URL
    fn base_url(&self) -> &str;

    // Trusted profile link operations
    async fn create_link(&self, profile_id: &str, request: &CreateProfileLinkRequest) -> Result<ProfileLink, IamIdentityError>;
    async fn get_link(&self, profile_id: &str, link_id: &str) -> Result<ProfileLink, IamIdentityError>;
    async fn delete_link(&self, profile_id: &str, link_id: &str) -> Result<(), IamIdentityError>;
    async fn list_links(&self, profile_id: &str) -> Result<Vec<ProfileLink>, IamIdentityError>;
}
