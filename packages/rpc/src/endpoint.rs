//! Both ends of an in-process frame/host connection.

use serde::Serialize;
use serde_json::Value;
use tokio::sync::mpsc;

use crate::error::{Result, RpcError};
use crate::link::{ChannelLink, InboundCall, OutboundCall};
use crate::reply::reply_channel;

/// Wire a frame to a host in the same process.
pub fn channel_pair() -> (FrameEndpoint, HostEndpoint) {
    let (link, outbound) = ChannelLink::new();
    let (inbound_tx, inbound) = mpsc::unbounded_channel();
    (
        FrameEndpoint { link, inbound },
        HostEndpoint {
            frame: FrameCaller { tx: inbound_tx },
            outbound,
        },
    )
}

/// What a frame is handed: a link to post on and the calls addressed to it.
#[derive(Debug)]
pub struct FrameEndpoint {
    pub link: ChannelLink,
    pub inbound: mpsc::UnboundedReceiver<InboundCall>,
}

/// The host's end: requests from the frame, and a way to call the frame.
#[derive(Debug)]
pub struct HostEndpoint {
    frame: FrameCaller,
    outbound: mpsc::UnboundedReceiver<OutboundCall>,
}

impl HostEndpoint {
    /// Next request the frame sent, or `None` once the frame is gone.
    pub async fn next_request(&mut self) -> Option<OutboundCall> {
        self.outbound.recv().await
    }

    pub async fn call_frame(&self, request: impl Serialize) -> Result<Value> {
        self.frame.call(request).await
    }

    /// Separate the two directions so they can be driven independently.
    pub fn split(self) -> (FrameCaller, mpsc::UnboundedReceiver<OutboundCall>) {
        (self.frame, self.outbound)
    }
}

/// Sends host-initiated requests to a frame.
#[derive(Debug, Clone)]
pub struct FrameCaller {
    tx: mpsc::UnboundedSender<InboundCall>,
}

impl FrameCaller {
    /// Send a request to the frame and wait for its reply.
    ///
    /// The request is serialized as is, so kinds the frame does not know can
    /// be sent too.
    pub async fn call(&self, request: impl Serialize) -> Result<Value> {
        let request = serde_json::to_value(request)?;
        let (port, pending) = reply_channel();
        self.tx
            .send(InboundCall {
                request,
                reply: port,
            })
            .map_err(|_| RpcError::Post("frame is not listening".to_string()))?;
        pending.outcome().await
    }
}
