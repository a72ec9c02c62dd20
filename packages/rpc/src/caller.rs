//! Outbound calls from a frame to its host.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use toolframe_protocol::{Envelope, FrameIdentity, HostRequest};

use crate::error::Result;
use crate::link::HostLink;
use crate::reply::{reply_channel, PendingCall};

/// Correlates the log lines of one outbound call. Never sent on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallId(Uuid);

impl CallId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for CallId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sends requests to the host on behalf of one frame.
///
/// Calls are independent: each gets its own reply channel, so any number may
/// be in flight and they can complete in any order. There is no retry and no
/// timeout.
#[derive(Clone)]
pub struct HostCaller {
    link: Arc<dyn HostLink>,
    identity: FrameIdentity,
}

impl HostCaller {
    pub fn new(link: Arc<dyn HostLink>, identity: FrameIdentity) -> Self {
        Self { link, identity }
    }

    pub fn identity(&self) -> &FrameIdentity {
        &self.identity
    }

    fn post(&self, request: HostRequest) -> Result<(CallId, PendingCall)> {
        let id = CallId::new();
        debug!(call_id = %id, kind = request.kind(), "posting host request");

        let (port, pending) = reply_channel();
        let envelope = Envelope {
            request,
            frame_identity: self.identity.clone(),
        };
        self.link.post(envelope, port)?;
        Ok((id, pending))
    }

    /// Send a request and wait for its reply.
    pub async fn call(&self, request: HostRequest) -> Result<Value> {
        let kind = request.kind();
        let (id, pending) = self.post(request)?;
        let outcome = pending.outcome().await;
        match &outcome {
            Ok(_) => debug!(call_id = %id, kind, "host request resolved"),
            Err(e) => debug!(call_id = %id, kind, error = %e, "host request failed"),
        }
        outcome
    }

    /// Send a request and deserialize its reply.
    pub async fn call_as<T: DeserializeOwned>(&self, request: HostRequest) -> Result<T> {
        let value = self.call(request).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Send a request without waiting for, or caring about, the reply.
    pub fn notify(&self, request: HostRequest) -> Result<()> {
        self.post(request).map(|_| ())
    }
}

impl fmt::Debug for HostCaller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostCaller")
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}
