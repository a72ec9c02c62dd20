//! Frame identity and how it is read from a frame location.
//!
//! A frame is served either from a custom-scheme origin whose authority
//! carries the casecode-encoded identity
//! (`applet://uhc%24a%24k....` → `uhCAk...`), or in development mode from a
//! plain origin with the encoded identity in the URL fragment
//! (`http://localhost:8888/#uhc%24a%24k...`).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ProtocolError, Result};
use crate::hash::HashB64;

/// The tool instance a frame belongs to.
///
/// Derived once from the frame location and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameIdentity(HashB64);

impl FrameIdentity {
    pub fn new(hash: HashB64) -> Self {
        Self(hash)
    }

    /// Read the identity from a frame location.
    ///
    /// Locations using `scheme` carry the identity in the first label of the
    /// authority. Any other location is treated as a development origin and
    /// carries it in the fragment.
    pub fn from_location(location: &str, scheme: &str) -> Result<Self> {
        let encoded = match location
            .strip_prefix(scheme)
            .and_then(|rest| rest.strip_prefix("://"))
        {
            Some(rest) => authority_label(rest),
            None => location.split_once('#').map(|(_, fragment)| fragment),
        };

        let encoded = encoded
            .filter(|label| !label.is_empty())
            .ok_or_else(|| ProtocolError::MissingIdentity(location.to_string()))?;

        HashB64::parse(casecode::decode_component(encoded)).map(Self)
    }

    /// The encoded, transport-escaped label a host puts in a frame origin.
    pub fn authority_label(&self) -> String {
        casecode::encode_component(self.0.as_str())
    }

    /// Build the production origin of a frame with this identity.
    pub fn origin(&self, scheme: &str) -> String {
        format!("{}://{}", scheme, self.authority_label())
    }

    pub fn hash(&self) -> &HashB64 {
        &self.0
    }
}

/// First `.`-separated label of an authority, stopping at path, query or
/// fragment.
fn authority_label(rest: &str) -> Option<&str> {
    let authority = rest.split(['/', '?', '#']).next()?;
    authority.split('.').next()
}

impl fmt::Display for FrameIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
