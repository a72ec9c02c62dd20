//! Transports between a frame and its host.

use serde_json::Value;
use tokio::sync::mpsc;
use toolframe_protocol::Envelope;

use crate::error::{Result, RpcError};
use crate::reply::ReplyPort;

/// A request on its way to the host, with the port to answer it on.
#[derive(Debug)]
pub struct OutboundCall {
    pub envelope: Envelope,
    pub reply: ReplyPort,
}

/// A request on its way to the frame.
///
/// The request stays raw until the frame decodes it, so requests of a kind
/// the frame does not know can still be answered.
#[derive(Debug)]
pub struct InboundCall {
    pub request: Value,
    pub reply: ReplyPort,
}

/// Carries outbound requests to the host.
///
/// Implementations hand the envelope over and return; the answer arrives
/// later on `reply`. A transport that cannot accept the envelope must say so
/// instead of dropping it.
pub trait HostLink: Send + Sync {
    fn post(&self, envelope: Envelope, reply: ReplyPort) -> Result<()>;
}

/// In-process [`HostLink`] over an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelLink {
    tx: mpsc::UnboundedSender<OutboundCall>,
}

impl ChannelLink {
    /// Create a link and the receiver the host side drains.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<OutboundCall>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl HostLink for ChannelLink {
    fn post(&self, envelope: Envelope, reply: ReplyPort) -> Result<()> {
        self.tx
            .send(OutboundCall { envelope, reply })
            .map_err(|_| RpcError::Post("host side of the link is gone".to_string()))
    }
}
