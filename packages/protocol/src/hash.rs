//! Base64 content hashes.

use std::fmt;

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ProtocolError, Result};

/// Leading character of multibase-prefixed (`u` = base64url) hashes.
const MULTIBASE_PREFIX: char = 'u';

/// Base64url engine that accepts input with or without padding.
pub(crate) const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Map the standard base64 alphabet onto the url-safe one.
pub(crate) fn to_url_safe(input: &str) -> String {
    input.replace('+', "-").replace('/', "_")
}

/// A content hash in its base64 text form.
///
/// The alphabet is ASCII letters, digits and `+ / = - _`. The casecode
/// marker can never appear, which is what makes identity addressing
/// reversible.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HashB64(String);

impl HashB64 {
    /// Validate and wrap a base64 hash string.
    pub fn parse(input: impl Into<String>) -> Result<Self> {
        let input = input.into();
        if input.is_empty() {
            return Err(ProtocolError::InvalidHash {
                hash: input,
                reason: "empty".to_string(),
            });
        }
        if let Some(bad) = input.chars().find(|c| !is_hash_char(*c)) {
            return Err(ProtocolError::InvalidHash {
                reason: format!("character '{}' is outside the hash alphabet", bad),
                hash: input,
            });
        }
        Ok(Self(input))
    }

    /// Build the text form of raw hash bytes, multibase-prefixed.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(format!("{}{}", MULTIBASE_PREFIX, URL_SAFE_LENIENT.encode(bytes)))
    }

    /// The hash as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode the hash payload, dropping the multibase prefix if present.
    pub fn to_bytes(&self) -> Option<Vec<u8>> {
        let payload = self.0.strip_prefix(MULTIBASE_PREFIX).unwrap_or(&self.0);
        URL_SAFE_LENIENT.decode(to_url_safe(payload)).ok()
    }

    /// Whether this is the null hash (a payload of only zero bytes).
    ///
    /// A locator whose resource is null points at a whole collection rather
    /// than at a record.
    pub fn is_null(&self) -> bool {
        match self.to_bytes() {
            Some(bytes) => !bytes.is_empty() && bytes.iter().all(|b| *b == 0),
            None => false,
        }
    }
}

fn is_hash_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '=' | '-' | '_')
}

impl fmt::Display for HashB64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for HashB64 {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for HashB64 {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for HashB64 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(s).map_err(serde::de::Error::custom)
    }
}

/// Identifier of an installed tool instance.
pub type ToolId = HashB64;

/// Identifier of a group.
pub type GroupId = HashB64;
