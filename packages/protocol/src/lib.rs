//! Wire types spoken between a tool frame and its host.
//!
//! A frame is an isolated UI surface. It learns who it is from its own
//! location ([`FrameIdentity`]), what to show from its startup query
//! ([`ViewQuery`]), and what it may use from the host's [`FrameConfig`].
//! Everything after that is request/reply traffic: [`HostRequest`]s out,
//! wrapped in an [`Envelope`], and [`FrameRequest`]s in, each answered with
//! a [`Reply`].
//!
//! ```
//! use toolframe_protocol::{FrameIdentity, SingleQuery, ViewQuery};
//!
//! let identity = FrameIdentity::from_location("applet://uhc$kka$b$12xy$.localhost/", "applet").unwrap();
//! assert_eq!(identity.hash().as_str(), "uhCkkAB12xY");
//!
//! let query: ViewQuery = "view=applet-view&view-type=main".parse().unwrap();
//! assert_eq!(query, ViewQuery::Single(SingleQuery::Main));
//! ```

pub mod config;
pub mod envelope;
pub mod error;
pub mod hash;
pub mod identity;
pub mod locator;
pub mod query;
pub mod request;
pub mod types;

pub use config::{
    AuthToken, ConnectionParams, CrossToolConfig, CrossToolEntry, FrameConfig, ProfilesLocation,
    SingleToolConfig,
};
pub use envelope::{Envelope, Reply};
pub use error::{ProtocolError, QueryError, Result};
pub use hash::{GroupId, HashB64, ToolId};
pub use identity::FrameIdentity;
pub use locator::{Context, Locator, HRL_SCHEME};
pub use query::{CrossQuery, SingleQuery, ViewQuery};
pub use request::{FrameRequest, HostRequest};
pub use types::{
    AssetInfo, AssetLocation, AssetLocationAndInfo, BlockType, CreatableResult, CreatableType,
    DialogSize, FrameNotification, GroupPermission, GroupProfile, LocatorSource, OpenMode, SignedCall, ToolInfo,
    UnsignedCall, Urgency, ViewScope,
};
