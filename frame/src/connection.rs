//! Backend connections and call signing.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use toolframe_protocol::{ConnectionParams, HostRequest, SignedCall, UnsignedCall};
use toolframe_rpc::HostCaller;

/// A backend call, signed or not yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    Unsigned(UnsignedCall),
    Signed(SignedCall),
}

/// Signs backend calls by asking the host.
///
/// Handed to every connection a [`Connector`] opens. It is the only way a
/// connection gets signatures; tool code never sees it.
#[derive(Debug, Clone)]
pub struct CallSigner {
    caller: HostCaller,
}

impl CallSigner {
    pub(crate) fn new(caller: HostCaller) -> Self {
        Self { caller }
    }

    /// Sign `call`. Calls that already carry a signature pass through.
    pub async fn sign(&self, call: BackendCall) -> toolframe_rpc::Result<SignedCall> {
        match call {
            BackendCall::Signed(signed) => Ok(signed),
            BackendCall::Unsigned(call) => {
                debug!(function = %call.function, "requesting call signature");
                self.caller.call_as(HostRequest::SignCall { call }).await
            }
        }
    }
}

/// An open connection to the application backend.
#[async_trait]
pub trait AppConnection: Send + Sync {
    /// Make a backend call, returning the raw response payload.
    async fn call(&self, call: BackendCall) -> Result<Vec<u8>, String>;
}

/// Opens backend connections.
///
/// Returns `Err` with a message if the connection cannot be established.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn open(
        &self,
        params: ConnectionParams,
        signer: CallSigner,
    ) -> Result<Arc<dyn AppConnection>, String>;
}
