//! Request/reply channel between a tool frame and its host.
//!
//! Outbound, a [`HostCaller`] stamps each [`HostRequest`] with the frame's
//! identity and posts it over a [`HostLink`] together with a fresh
//! [`ReplyPort`]. The caller then waits on the matching [`PendingCall`].
//! Inbound, [`serve_inbound`] decodes host requests and hands them to an
//! [`InboundHandler`], answering each exactly once.
//!
//! [`HostRequest`]: toolframe_protocol::HostRequest

mod caller;
mod endpoint;
mod error;
mod inbound;
mod link;
mod reply;

#[cfg(feature = "test-util")]
pub mod testing;

pub use caller::{CallId, HostCaller};
pub use endpoint::{channel_pair, FrameCaller, FrameEndpoint, HostEndpoint};
pub use error::{Result, RpcError};
pub use inbound::{serve_call, serve_inbound, InboundHandler};
pub use link::{ChannelLink, HostLink, InboundCall, OutboundCall};
pub use reply::{reply_channel, PendingCall, ReplyPort};
