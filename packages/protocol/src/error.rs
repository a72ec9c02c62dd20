//! Error types for the frame/host protocol.

use thiserror::Error;

/// Errors raised while building or parsing protocol values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// A string is not a valid base64 content hash.
    #[error("invalid hash '{hash}': {reason}")]
    InvalidHash { hash: String, reason: String },

    /// A locator string is malformed.
    #[error("invalid locator '{input}': {reason}")]
    InvalidLocator { input: String, reason: String },

    /// A context blob is not valid base64.
    #[error("invalid context: {0}")]
    InvalidContext(String),

    /// The frame location carries no identity.
    #[error("no frame identity in location '{0}'")]
    MissingIdentity(String),

    /// The startup query string is malformed.
    #[error(transparent)]
    Query(#[from] QueryError),
}

/// Errors from the startup query grammar.
///
/// Every variant is fatal for the frame: a view that cannot be parsed cannot
/// be rendered.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("query string is empty")]
    Empty,

    #[error("query string '{query}' is missing the {segment} segment")]
    MissingSegment {
        query: String,
        segment: &'static str,
    },

    #[error("unknown outer kind '{0}'")]
    UnknownOuterKind(String),

    #[error("unknown view kind '{0}'")]
    UnknownViewKind(String),

    #[error("segment '{key}' is not valid for a {view} view")]
    UnexpectedPayload { key: String, view: &'static str },

    #[error("a {view} view cannot be rendered as a cross-tool view")]
    InvalidPairing { view: &'static str },

    #[error("unexpected trailing segments in query string '{0}'")]
    TrailingSegments(String),

    #[error("bad locator in query string: {0}")]
    Locator(String),

    #[error("bad context in query string: {0}")]
    Context(String),
}

/// Result type alias for protocol operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;
