//! Locators: portable pointers to addressable content.

use std::fmt;

use base64::Engine;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ProtocolError, Result};
use crate::hash::{to_url_safe, HashB64, URL_SAFE_LENIENT};

/// Scheme prefix of the hash-pair text form.
pub const HRL_SCHEME: &str = "hrl://";

/// Caller-defined opaque context attached to a locator or view.
///
/// The bytes are never interpreted by the frame. On the wire they travel as
/// unpadded base64url.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Context(Vec<u8>);

impl Context {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Decode a base64 context blob.
    ///
    /// Both the url-safe and the standard alphabet are accepted, padded or
    /// not.
    pub fn from_base64(input: &str) -> Result<Self> {
        URL_SAFE_LENIENT
            .decode(to_url_safe(input))
            .map(Self)
            .map_err(|e| ProtocolError::InvalidContext(e.to_string()))
    }

    /// Encode as unpadded base64url.
    pub fn to_base64(&self) -> String {
        URL_SAFE_LENIENT.encode(&self.0)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl Serialize for Context {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base64())
    }
}

impl<'de> Deserialize<'de> for Context {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_base64(&s).map_err(serde::de::Error::custom)
    }
}

/// A globally addressable pointer to a piece of content.
///
/// Two locators are equal when both hashes and the decoded context bytes are
/// equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locator {
    /// Hash of the space the content lives in.
    pub origin: HashB64,

    /// Hash of the content itself.
    pub resource: HashB64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Context>,
}

impl Locator {
    pub fn new(origin: HashB64, resource: HashB64) -> Self {
        Self {
            origin,
            resource,
            context: None,
        }
    }

    pub fn with_context(mut self, context: Context) -> Self {
        self.context = Some(context);
        self
    }

    /// Parse the hash-pair text form `hrl://<origin>/<resource>`.
    ///
    /// Exactly two non-empty hashes must follow the scheme. A `/` inside a
    /// hash is written as `%2F`. The result carries no context.
    pub fn parse_hrl(input: &str) -> Result<Self> {
        let invalid = |reason: &str| ProtocolError::InvalidLocator {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let rest = input
            .strip_prefix(HRL_SCHEME)
            .ok_or_else(|| invalid("missing hrl:// prefix"))?;
        let parts: Vec<&str> = rest.split('/').collect();
        let [origin, resource] = parts[..] else {
            return Err(invalid("expected exactly two hashes separated by '/'"));
        };

        let origin = HashB64::parse(unescape_slash(origin)).map_err(|e| invalid(&e.to_string()))?;
        let resource =
            HashB64::parse(unescape_slash(resource)).map_err(|e| invalid(&e.to_string()))?;
        Ok(Self::new(origin, resource))
    }

    /// The hash-pair text form, without context.
    pub fn hrl(&self) -> String {
        format!(
            "{}{}/{}",
            HRL_SCHEME,
            escape_slash(self.origin.as_str()),
            escape_slash(self.resource.as_str())
        )
    }

    /// Whether this locator points at a whole collection instead of a record.
    pub fn targets_collection(&self) -> bool {
        self.resource.is_null()
    }
}

const ESCAPED_SLASH: &str = "%2F";

fn escape_slash(hash: &str) -> String {
    hash.replace('/', ESCAPED_SLASH)
}

fn unescape_slash(part: &str) -> String {
    part.replace(ESCAPED_SLASH, "/").replace("%2f", "/")
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.hrl())?;
        if let Some(context) = &self.context {
            write!(f, "?context={}", context.to_base64())?;
        }
        Ok(())
    }
}
