//! Test utilities for exercising the resource adapter against the mock client

use crate::error::SessionError;
use crate::resource::TrustedProfileLinkResource;
use crate::resource_data::ResourceData;
use crate::schema::TRUSTED_PROFILE_LINK_SCHEMA;
use crate::session::ClientSession;
use chrono::{DateTime, TimeZone, Utc};
use iam_identity_client::{IamIdentityClientTrait, MockIamIdentityClient};
use serde_json::Value;
use std::sync::Arc;

/// Session handing out a shared mock client
pub struct MockSession {
    client: MockIamIdentityClient,
}

impl ClientSession for MockSession {
    fn iam_identity_api(&self) -> Result<Arc<dyn IamIdentityClientTrait>, SessionError> {
        let client: Arc<dyn IamIdentityClientTrait> = Arc::new(self.client.clone());
        Ok(client)
    }
}

/// Session whose credentials were never configured
pub struct UnauthenticatedSession;

impl ClientSession for UnauthenticatedSession {
    fn iam_identity_api(&self) -> Result<Arc<dyn IamIdentityClientTrait>, SessionError> {
        Err(SessionError::MissingCredentials("IAM_TOKEN is not set".to_string()))
    }
}

/// Fixed timestamp stamped on links created by the mock
pub fn test_clock() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 10, 15, 30).unwrap()
}

/// Resource backed by a fresh mock; the returned mock shares its store
pub fn create_test_resource() -> (TrustedProfileLinkResource, MockIamIdentityClient) {
    let mock = MockIamIdentityClient::new("http://test-iam");
    mock.set_clock(test_clock());
    let session = Arc::new(MockSession { client: mock.clone() });
    (TrustedProfileLinkResource::new(session), mock)
}

/// Resource data from a JSON configuration
pub fn create_test_config(config: Value) -> ResourceData {
    ResourceData::from_config(&TRUSTED_PROFILE_LINK_SCHEMA, config).unwrap()
}
