//! Serving requests the host sends to a frame.

use std::any::Any;
use std::panic::AssertUnwindSafe;

use async_trait::async_trait;
use futures::{FutureExt, StreamExt};
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, error};

use toolframe_protocol::{FrameRequest, Reply};

use crate::link::InboundCall;

/// Answers decoded inbound requests.
///
/// An `Err` becomes an error reply carrying the message.
#[async_trait]
pub trait InboundHandler: Send + Sync {
    async fn handle(&self, request: FrameRequest) -> Result<Value, String>;
}

/// Decode, handle and answer one inbound call.
///
/// The call is answered exactly once whatever happens: malformed requests,
/// unknown kinds, handler errors and handler panics all turn into an error
/// reply.
pub async fn serve_call<H>(call: InboundCall, handler: &H)
where
    H: InboundHandler + ?Sized,
{
    let InboundCall { request, reply } = call;

    let outcome = match FrameRequest::from_value(request) {
        Err(e) => {
            error!(error = %e, "rejecting inbound request");
            Err(e)
        }
        Ok(request) => {
            let kind = request.kind();
            debug!(kind, "serving inbound request");
            match AssertUnwindSafe(handler.handle(request)).catch_unwind().await {
                Ok(Ok(value)) => Ok(value),
                Ok(Err(e)) => {
                    error!(kind, error = %e, "inbound request failed");
                    Err(e)
                }
                Err(payload) => {
                    let message = panic_message(payload.as_ref());
                    error!(kind, panic = %message, "inbound handler panicked");
                    Err(format!("handler for '{}' panicked: {}", kind, message))
                }
            }
        }
    };

    if !reply.send(Reply::from(outcome)) {
        debug!("host abandoned an inbound request before it was answered");
    }
}

/// Serve inbound calls until the sending side closes.
///
/// At most `concurrency` calls are handled at once, all on the current task.
pub async fn serve_inbound<H>(
    receiver: mpsc::UnboundedReceiver<InboundCall>,
    handler: &H,
    concurrency: usize,
) where
    H: InboundHandler + ?Sized,
{
    let calls = futures::stream::unfold(receiver, |mut rx| async move {
        rx.recv().await.map(|call| (call, rx))
    });
    calls
        .for_each_concurrent(concurrency.max(1), |call| serve_call(call, handler))
        .await;
    debug!("inbound channel closed");
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
