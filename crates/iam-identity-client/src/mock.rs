//! Mock IamIdentityClient for unit testing
//!
//! Stores links in memory and can be told to fail specific operations, so
//! resource adapters can be exercised without a live IAM Identity endpoint.

use crate::error::IamIdentityError;
use crate::iam_identity_trait::IamIdentityClientTrait;
use crate::models::*;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Operations of the mock that can be counted or failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockOperation {
    CreateLink,
    GetLink,
    DeleteLink,
    ListLinks,
}

/// Canned failure returned by the next call of an operation
#[derive(Debug, Clone)]
struct MockFailure {
    status: u16,
    body: String,
}

/// Mock IamIdentityClient for testing
#[derive(Debug, Clone)]
pub struct MockIamIdentityClient {
    base_url: String,
    // Links keyed by (profile_id, link_id)
    links: Arc<Mutex<HashMap<(String, String), ProfileLink>>>,
    failures: Arc<Mutex<HashMap<MockOperation, MockFailure>>>,
    calls: Arc<Mutex<HashMap<MockOperation, usize>>>,
    next_id: Arc<Mutex<u64>>,
    clock: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl MockIamIdentityClient {
    /// Create a new mock client
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            links: Arc::new(Mutex::new(HashMap::new())),
            failures: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(HashMap::new())),
            next_id: Arc::new(Mutex::new(1)),
            clock: Arc::new(Mutex::new(None)),
        }
    }

    /// Add a link to the mock store (for test setup)
    pub fn add_link(&self, profile_id: &str, link: ProfileLink) {
        self.links
            .lock()
            .unwrap()
            .insert((profile_id.to_string(), link.id.clone()), link);
    }

    /// Remove a link behind the adapter's back (out-of-band deletion)
    pub fn remove_link(&self, profile_id: &str, link_id: &str) -> Option<ProfileLink> {
        self.links
            .lock()
            .unwrap()
            .remove(&(profile_id.to_string(), link_id.to_string()))
    }

    /// Look up a stored link without counting a call
    pub fn stored_link(&self, profile_id: &str, link_id: &str) -> Option<ProfileLink> {
        self.links
            .lock()
            .unwrap()
            .get(&(profile_id.to_string(), link_id.to_string()))
            .cloned()
    }

    /// Number of links currently stored
    pub fn link_count(&self) -> usize {
        self.links.lock().unwrap().len()
    }

    /// Make the next call of `operation` fail with the given HTTP status and body
    pub fn fail_next(&self, operation: MockOperation, status: u16, body: impl Into<String>) {
        self.failures.lock().unwrap().insert(
            operation,
            MockFailure {
                status,
                body: body.into(),
            },
        );
    }

    /// Number of calls made to `operation`
    pub fn calls(&self, operation: MockOperation) -> usize {
        self.calls.lock().unwrap().get(&operation).copied().unwrap_or(0)
    }

    /// Set the ID the next created link receives
    pub fn set_next_id(&self, id: u64) {
        *self.next_id.lock().unwrap() = id;
    }

    /// Pin the timestamps stamped on created links
    pub fn set_clock(&self, now: DateTime<Utc>) {
        *self.clock.lock().unwrap() = Some(now);
    }

    fn now(&self) -> DateTime<Utc> {
        let pinned = *self.clock.lock().unwrap();
        pinned.unwrap_or_else(Utc::now)
    }

    fn next_link_id(&self) -> String {
        let mut id = self.next_id.lock().unwrap();
        let current = *id;
        *id += 1;
        format!("link-{}", current)
    }

    /// Count the call and return the injected failure, if any
    fn enter(&self, operation: MockOperation, context: &str) -> Result<(), IamIdentityError> {
        *self.calls.lock().unwrap().entry(operation).or_insert(0) += 1;
        match self.failures.lock().unwrap().remove(&operation) {
            Some(failure) => Err(IamIdentityError::from_status(failure.status, context, failure.body)),
            None => Ok(()),
        }
    }
}

#[async_trait::async_trait]
impl IamIdentityClientTrait for MockIamIdentityClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn create_link(&self, profile_id: &str, request: &CreateProfileLinkRequest) -> Result<ProfileLink, IamIdentityError> {
        self.enter(MockOperation::CreateLink, &format!("POST /v1/profiles/{}/links", profile_id))?;

        let id = self.next_link_id();
        let now = self.now();
        let link = ProfileLink {
            id: id.clone(),
            entity_tag: format!("1-{}", id),
            created_at: Some(now),
            modified_at: Some(now),
            name: request.name.clone(),
            cr_type: request.cr_type,
            link: ProfileLinkLink {
                crn: Some(request.link.crn.clone()),
                namespace: Some(request.link.namespace.clone()),
                name: request.link.name.clone(),
            },
        };

        self.links
            .lock()
            .unwrap()
            .insert((profile_id.to_string(), id), link.clone());
        Ok(link)
    }

    async fn get_link(&self, profile_id: &str, link_id: &str) -> Result<ProfileLink, IamIdentityError> {
        let context = format!("GET /v1/profiles/{}/links/{}", profile_id, link_id);
        self.enter(MockOperation::GetLink, &context)?;

        self.stored_link(profile_id, link_id)
            .ok_or_else(|| IamIdentityError::NotFound(format!("{} - link not found", context)))
    }

    async fn delete_link(&self, profile_id: &str, link_id: &str) -> Result<(), IamIdentityError> {
        let context = format!("DELETE /v1/profiles/{}/links/{}", profile_id, link_id);
        self.enter(MockOperation::DeleteLink, &context)?;

        self.remove_link(profile_id, link_id)
            .map(|_| ())
            .ok_or_else(|| IamIdentityError::NotFound(format!("{} - link not found", context)))
    }

    async fn list_links(&self, profile_id: &str) -> Result<Vec<ProfileLink>, IamIdentityError> {
        self.enter(MockOperation::ListLinks, &format!("GET /v1/profiles/{}/links", profile_id))?;

        let links = self.links.lock().unwrap();
        let mut found: Vec<ProfileLink> = links
            .iter()
            .filter(|((profile, _), _)| profile == profile_id)
            .map(|(_, link)| link.clone())
            .collect();
        found.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(found)
    }
}
