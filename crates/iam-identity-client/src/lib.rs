//! IAM Identity REST API Client
//!
//! A Rust client library for the trusted profile link endpoints of the IAM
//! Identity API. Provides type-safe models and methods to create, read, list
//! and delete the links that bind a trusted profile to a compute resource.
//!
//! # Example
//!
//! ```no_run
//! use iam_identity_client::{
//!     ComputeResourceType, CreateProfileLinkRequest, CreateProfileLinkRequestLink,
//!     IamIdentityClient,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = IamIdentityClient::new(
//!     "https://iam.cloud.ibm.com".to_string(),
//!     "your-iam-token".to_string(),
//! )?;
//!
//! let request = CreateProfileLinkRequest {
//!     name: None,
//!     cr_type: ComputeResourceType::IksSa,
//!     link: CreateProfileLinkRequestLink {
//!         crn: "crn:v1:bluemix:public:containers-kubernetes:us-south:a/abc:cluster::".to_string(),
//!         namespace: "default".to_string(),
//!         name: Some("builder".to_string()),
//!     },
//! };
//! let link = client.create_link("Profile-1234", &request).await?;
//! let fetched = client.get_link("Profile-1234", &link.id).await?;
//! client.delete_link("Profile-1234", &fetched.id).await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod common;
pub mod error;
pub mod models;
#[path = "trait.rs"]
pub mod iam_identity_trait;
#[cfg(feature = "test-util")]
pub mod mock;

pub use client::IamIdentityClient;
pub use common::HttpClient;
pub use error::IamIdentityError;
pub use models::*;
pub use iam_identity_trait::IamIdentityClientTrait;
#[cfg(feature = "test-util")]
pub use mock::{MockIamIdentityClient, MockOperation};
