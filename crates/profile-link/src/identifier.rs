//! Composite `<profile_id>/<link_id>` identifier.
//!
//! The IAM Identity API addresses a link only together with its owning
//! profile, so both halves travel in the resource identifier.

use crate::error::LinkResourceError;
use std::fmt;
use std::str::FromStr;

/// Separator between profile ID and link ID
pub const ID_SEPARATOR: char = '/';

/// Identifier of a link together with its owning profile
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LinkId {
    /// Trusted profile ID
    pub profile_id: String,
    /// Link ID assigned by the server
    pub link_id: String,
}

impl LinkId {
    /// Identifier from its two halves
    pub fn new(profile_id: impl Into<String>, link_id: impl Into<String>) -> Self {
        Self {
            profile_id: profile_id.into(),
            link_id: link_id.into(),
        }
    }

    /// Parse `<profile_id>/<link_id>`; both segments must be non-empty and
    /// the link ID may not contain another separator.
    pub fn parse(id: &str) -> Result<Self, LinkResourceError> {
        match id.split_once(ID_SEPARATOR) {
            Some((profile_id, link_id))
                if !profile_id.is_empty() && !link_id.is_empty() && !link_id.contains(ID_SEPARATOR) =>
            {
                Ok(Self::new(profile_id, link_id))
            }
            _ => Err(LinkResourceError::InvalidIdentifier(id.to_string())),
        }
    }
}

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.profile_id, ID_SEPARATOR, self.link_id)
    }
}

impl FromStr for LinkId {
    type Err = LinkResourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
