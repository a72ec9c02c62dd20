//! Error types for the RPC channel.

use thiserror::Error;

/// Errors a single call can end with.
///
/// Every variant is local to the call that produced it.
#[derive(Debug, Error)]
pub enum RpcError {
    /// The other side answered with an error reply.
    #[error("rejected: {0}")]
    Rejected(String),

    /// The reply port was dropped without an answer.
    #[error("reply channel closed")]
    ChannelClosed,

    /// The request could not be handed to the transport.
    #[error("post failed: {0}")]
    Post(String),

    /// A reply did not have the expected shape.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for RPC operations.
pub type Result<T> = std::result::Result<T, RpcError>;
