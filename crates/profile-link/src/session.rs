//! Session capability handing out IAM Identity clients.
//!
//! The adapter never builds a client itself; it borrows one from an injected
//! [`ClientSession`] on every lifecycle call.

use crate::error::SessionError;
use iam_identity_client::{IamIdentityClient, IamIdentityClientTrait};
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tracing::debug;

/// Default IAM Identity endpoint
pub const DEFAULT_IAM_ENDPOINT: &str = "https://iam.cloud.ibm.com";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Source of ready-to-use IAM Identity clients
pub trait ClientSession: Send + Sync {
    /// Obtain the IAM Identity client, or fail if the session is incomplete
    fn iam_identity_api(&self) -> Result<Arc<dyn IamIdentityClientTrait>, SessionError>;
}

/// Session settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// IAM Identity endpoint
    pub iam_endpoint: String,
    /// Bearer token; `None` leaves the session without credentials
    pub iam_token: Option<String>,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            iam_endpoint: DEFAULT_IAM_ENDPOINT.to_string(),
            iam_token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl SessionConfig {
    /// Load settings from environment variables:
    /// `IAM_IDENTITY_ENDPOINT`, `IAM_TOKEN` and `IAM_REQUEST_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, SessionError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SessionError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let iam_endpoint = lookup("IAM_IDENTITY_ENDPOINT")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.iam_endpoint);
        let iam_token = lookup("IAM_TOKEN").filter(|v| !v.trim().is_empty());
        let timeout = match lookup("IAM_REQUEST_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw.trim().parse::<u64>().map_err(|e| SessionError::InvalidSetting {
                    name: "IAM_REQUEST_TIMEOUT_SECS".to_string(),
                    reason: e.to_string(),
                })?;
                Duration::from_secs(secs)
            }
            None => defaults.timeout,
        };

        Ok(Self {
            iam_endpoint,
            iam_token,
            timeout,
        })
    }
}

/// Production session: builds one client lazily and shares it
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    client: OnceLock<Arc<IamIdentityClient>>,
}

impl Session {
    /// Session over `config`; no client is built until first use
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            client: OnceLock::new(),
        }
    }

    /// Settings the session was built from
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}

impl ClientSession for Session {
    fn iam_identity_api(&self) -> Result<Arc<dyn IamIdentityClientTrait>, SessionError> {
        if let Some(client) = self.client.get() {
            let client: Arc<dyn IamIdentityClientTrait> = client.clone();
            return Ok(client);
        }

        let token = self.config.iam_token.clone().ok_or_else(|| {
            SessionError::MissingCredentials("IAM_TOKEN is not set".to_string())
        })?;
        debug!("Building IAM Identity client for {}", self.config.iam_endpoint);
        let client = Arc::new(IamIdentityClient::with_timeout(
            self.config.iam_endpoint.clone(),
            token,
            self.config.timeout,
        )?);

        let client: Arc<dyn IamIdentityClientTrait> = self.client.get_or_init(|| client).clone();
        Ok(client)
    }
}
