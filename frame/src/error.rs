//! Error types for the frame runtime.

use thiserror::Error;
use toolframe_protocol::{ProtocolError, QueryError, ViewScope};
use toolframe_rpc::RpcError;

/// Errors that stop a frame from starting, or fail a tool handler.
#[derive(Debug, Error)]
pub enum FrameError {
    /// The frame location does not carry a usable identity.
    #[error("identity: {0}")]
    Identity(#[from] ProtocolError),

    /// The startup query does not describe a view.
    #[error("query: {0}")]
    Query(#[from] QueryError),

    /// A host call needed to start failed.
    #[error("host call failed: {0}")]
    Rpc(#[from] RpcError),

    /// The host sent a config for a different kind of view.
    #[error("{config:?} config cannot render a {view:?} view")]
    ConfigMismatch { view: ViewScope, config: ViewScope },

    /// A backend connection could not be opened.
    #[error("connecting to {target} failed: {reason}")]
    Connect { target: String, reason: String },

    /// A tool handler failed while serving the host.
    #[error("tool handler failed: {0}")]
    Handler(String),
}

impl FrameError {
    /// A message an embedder can show in place of the tool.
    pub fn fallback_notice(&self) -> String {
        format!("This tool could not be started. {}", self)
    }
}

/// Result type alias for frame operations.
pub type Result<T> = std::result::Result<T, FrameError>;
