//! Resource adapter error types.
//!
//! Every lifecycle operation reports failures as [`Diagnostics`], an ordered
//! list of [`LinkResourceError`]s. A link that vanished on the server is not an
//! error and never shows up here.

use iam_identity_client::IamIdentityError;
use std::fmt;
use thiserror::Error;

/// Errors raised while obtaining an IAM Identity client from the session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No credentials were configured
    #[error("missing credentials: {0}")]
    MissingCredentials(String),

    /// A session setting could not be parsed
    #[error("invalid setting {name}: {reason}")]
    InvalidSetting {
        /// Name of the setting
        name: String,
        /// Why the value was rejected
        reason: String,
    },

    /// The client could not be constructed
    #[error("client construction failed: {0}")]
    Client(#[from] IamIdentityError),
}

/// Errors that can occur while managing a trusted profile link.
#[derive(Debug, Error)]
pub enum LinkResourceError {
    /// Session or authentication setup failed
    #[error("IAM Identity client unavailable: {0}")]
    ClientUnavailable(#[from] SessionError),

    /// The remote call failed; the source carries the raw response
    #[error("{operation} failed: {source}")]
    RemoteOperationFailed {
        /// Remote operation name (e.g. "CreateLink")
        operation: &'static str,
        /// Underlying client error
        #[source]
        source: IamIdentityError,
    },

    /// A value could not be written back into resource data
    #[error("Error setting {attribute}: {reason}")]
    AttributeAssignmentFailed {
        /// Attribute that was being set
        attribute: String,
        /// Why the value was rejected
        reason: String,
    },

    /// Configuration does not match the resource schema
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Identifier is not of the form `<profile_id>/<link_id>`
    #[error("Invalid identifier {0:?}: expected <profile_id>/<link_id>")]
    InvalidIdentifier(String),
}

impl LinkResourceError {
    /// Attribute a diagnostic refers to, when it refers to one
    pub fn attribute(&self) -> Option<&str> {
        match self {
            Self::AttributeAssignmentFailed { attribute, .. } => Some(attribute),
            _ => None,
        }
    }
}

/// Ordered collection of errors reported by one lifecycle operation.
#[derive(Debug, Default)]
pub struct Diagnostics(Vec<LinkResourceError>);

impl Diagnostics {
    /// Empty diagnostics
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a diagnostic
    pub fn push(&mut self, error: LinkResourceError) {
        self.0.push(error);
    }

    /// True when nothing was reported
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of diagnostics
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Diagnostics in reporting order
    pub fn iter(&self) -> std::slice::Iter<'_, LinkResourceError> {
        self.0.iter()
    }

    /// `Ok(())` when nothing was reported, otherwise `Err(self)`
    pub fn into_result(self) -> Result<(), Diagnostics> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl From<LinkResourceError> for Diagnostics {
    fn from(error: LinkResourceError) -> Self {
        Self(vec![error])
    }
}

impl IntoIterator for Diagnostics {
    type Item = LinkResourceError;
    type IntoIter = std::vec::IntoIter<LinkResourceError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostics {}
