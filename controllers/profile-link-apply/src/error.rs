//! Runner-specific error types.
//!
//! Lifecycle failures arrive as [`Diagnostics`]; everything else here is
//! about files and arguments handled by the runner itself.

use iam_identity_client::IamIdentityError;
use profile_link::{Diagnostics, LinkResourceError, SessionError};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in the profile link runner.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// A configuration or state file could not be read or written
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration or state file is not valid YAML for its purpose
    #[error("{}: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Session settings could not be loaded
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Configuration or identifier rejected before any remote call
    #[error("{0}")]
    Resource(#[from] LinkResourceError),

    /// One or more lifecycle diagnostics
    #[error("{0}")]
    Diagnostics(#[from] Diagnostics),

    /// Import pre-check against the profile's link list failed
    #[error("Listing links of trusted profile {profile_id} failed: {source}")]
    ListLinks {
        profile_id: String,
        #[source]
        source: IamIdentityError,
    },

    /// The state file already records a link
    #[error("State already manages trusted profile link {id}; destroy it or use another state file")]
    AlreadyManaged { id: String },

    /// The link to import is not attached to the profile
    #[error("Trusted profile {profile_id} has no link {link_id}")]
    LinkNotFound { profile_id: String, link_id: String },
}
