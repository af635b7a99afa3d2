//! Common utilities for the IAM Identity API client
//!
//! Provides the authenticated HTTP plumbing shared by every endpoint.

use crate::error::IamIdentityError;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

/// HTTP client wrapper with bearer authentication
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: String,
}

impl HttpClient {
    /// Create a new HTTP client wrapper
    pub fn new(client: Client, base_url: String, token: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a full URL from a path
    pub fn build_url(&self, path: &str) -> String {
        if path.starts_with("http") {
            path.to_string()
        } else {
            format!("{}{}", self.base_url, path)
        }
    }

    /// Get authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, IamIdentityError> {
        let url = self.build_url(path);
        debug!("GET {}", url);

        let response = self.client
            .get(&url)
            .header("Authorization", self.auth_header())
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(IamIdentityError::Http)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(IamIdentityError::from_status(
                status.as_u16(),
                &format!("GET {}", path),
                body,
            ));
        }

        Self::decode(response).await
    }

    /// Make a POST request with a JSON body
    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, IamIdentityError> {
        let url = self.build_url(path);
        let payload = serde_json::to_value(body)?;
        debug!("POST {} with body: {}", url, payload);

        let response = self.client
            .post(&url)
            .header("Authorization", self.auth_header())
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(IamIdentityError::Http)?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            return Err(IamIdentityError::from_status(
                status.as_u16(),
                &format!("POST {}", path),
                body_text,
            ));
        }

        Self::decode(response).await
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str) -> Result<(), IamIdentityError> {
        let url = self.build_url(path);
        debug!("DELETE {}", url);

        let response = self.client
            .delete(&url)
            .header("Authorization", self.auth_header())
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(IamIdentityError::Http)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(IamIdentityError::from_status(
                status.as_u16(),
                &format!("DELETE {}", path),
                body,
            ));
        }

        Ok(())
    }

    /// Decode a JSON body, keeping the raw text in the error for diagnosis
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, IamIdentityError> {
        let status = response.status().as_u16();
        let response_text = response.text().await?;
        serde_json::from_str(&response_text).map_err(|e| IamIdentityError::Api {
            status,
            body: format!(
                "error decoding response body: {} - Response (first 500 chars): {}",
                e,
                response_text.chars().take(500).collect::<String>()
            ),
        })
    }
}

/// Percent-encode a single path segment
pub fn encode_segment(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}
