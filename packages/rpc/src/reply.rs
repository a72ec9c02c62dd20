//! Single-use reply channels.
//!
//! Every call owns exactly one channel. The answering side holds the
//! [`ReplyPort`] and consumes it with the answer; the asking side holds the
//! [`PendingCall`] and consumes it when awaiting the outcome. Neither half can
//! be used twice.

use serde_json::Value;
use tokio::sync::oneshot;
use toolframe_protocol::Reply;

use crate::error::{Result, RpcError};

/// Create a fresh reply channel for one call.
pub fn reply_channel() -> (ReplyPort, PendingCall) {
    let (tx, rx) = oneshot::channel();
    (ReplyPort { tx }, PendingCall { rx })
}

/// Sending half of a reply channel.
#[derive(Debug)]
pub struct ReplyPort {
    tx: oneshot::Sender<Reply>,
}

impl ReplyPort {
    /// Answer the call. Returns `false` when nobody is waiting any more.
    pub fn send(self, reply: Reply) -> bool {
        self.tx.send(reply).is_ok()
    }

    pub fn success(self, result: Value) -> bool {
        self.send(Reply::success(result))
    }

    pub fn error(self, error: impl Into<String>) -> bool {
        self.send(Reply::error(error))
    }

    /// Whether the asking side gave up on the call.
    pub fn is_abandoned(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Receiving half of a reply channel.
#[derive(Debug)]
pub struct PendingCall {
    rx: oneshot::Receiver<Reply>,
}

impl PendingCall {
    /// Wait for the single reply.
    pub async fn outcome(self) -> Result<Value> {
        match self.rx.await {
            Ok(Reply::Success { result }) => Ok(result),
            Ok(Reply::Error { error }) => Err(RpcError::Rejected(error)),
            Err(_) => Err(RpcError::ChannelClosed),
        }
    }
}
