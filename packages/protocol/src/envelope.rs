//! Framing for frame/host exchanges.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::identity::FrameIdentity;
use crate::request::HostRequest;

/// An outbound request stamped with the sender's identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub request: HostRequest,
    pub frame_identity: FrameIdentity,
}

/// Answer to one request, in either direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Reply {
    Success {
        #[serde(default)]
        result: Value,
    },
    Error {
        error: String,
    },
}

impl Reply {
    pub fn success(result: Value) -> Self {
        Reply::Success { result }
    }

    pub fn error(error: impl Into<String>) -> Self {
        Reply::Error {
            error: error.into(),
        }
    }

    pub fn into_result(self) -> std::result::Result<Value, String> {
        match self {
            Reply::Success { result } => Ok(result),
            Reply::Error { error } => Err(error),
        }
    }
}

impl From<std::result::Result<Value, String>> for Reply {
    fn from(result: std::result::Result<Value, String>) -> Self {
        match result {
            Ok(value) => Reply::success(value),
            Err(error) => Reply::error(error),
        }
    }
}
