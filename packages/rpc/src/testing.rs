//! Host doubles for testing frame code.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde_json::Value;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use toolframe_protocol::{Envelope, HostRequest, Reply};

use crate::error::Result;
use crate::link::{HostLink, OutboundCall};
use crate::reply::ReplyPort;

type Responder = Arc<dyn Fn(&HostRequest) -> Reply + Send + Sync>;

/// A host that answers from a script.
///
/// Responders are registered per request kind. Every request is recorded,
/// answered or not. A request with no responder gets an error reply. Clones
/// share their script and their record.
#[derive(Clone, Default)]
pub struct ScriptedHost {
    responders: Arc<Mutex<HashMap<&'static str, Responder>>>,
    recorded: Arc<Mutex<Vec<Envelope>>>,
    held_kinds: Arc<Mutex<Vec<&'static str>>>,
    held: Arc<Mutex<Vec<OutboundCall>>>,
}

impl ScriptedHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer requests of `kind` with whatever `responder` returns.
    pub fn on<F>(self, kind: &'static str, responder: F) -> Self
    where
        F: Fn(&HostRequest) -> Reply + Send + Sync + 'static,
    {
        self.responders
            .lock()
            .unwrap()
            .insert(kind, Arc::new(responder));
        self
    }

    /// Answer requests of `kind` with a fixed result.
    pub fn reply_with(self, kind: &'static str, result: impl Serialize) -> Self {
        let result = serde_json::to_value(result).unwrap();
        self.on(kind, move |_| Reply::success(result.clone()))
    }

    /// Reject requests of `kind` with a fixed message.
    pub fn reject(self, kind: &'static str, message: impl Into<String>) -> Self {
        let message = message.into();
        self.on(kind, move |_| Reply::error(message.clone()))
    }

    /// Record requests of `kind` and keep them unanswered until taken
    /// with [`ScriptedHost::take_held`].
    pub fn hold(self, kind: &'static str) -> Self {
        self.held_kinds.lock().unwrap().push(kind);
        self
    }

    /// Calls held so far, oldest first, for the test to answer by hand.
    pub fn take_held(&self) -> Vec<OutboundCall> {
        std::mem::take(&mut *self.held.lock().unwrap())
    }

    /// Every envelope received so far, in order.
    pub fn envelopes(&self) -> Vec<Envelope> {
        self.recorded.lock().unwrap().clone()
    }

    pub fn requests(&self) -> Vec<HostRequest> {
        self.envelopes().into_iter().map(|e| e.request).collect()
    }

    pub fn kinds(&self) -> Vec<&'static str> {
        self.envelopes().iter().map(|e| e.request.kind()).collect()
    }

    /// How many requests of `kind` were received.
    pub fn count(&self, kind: &str) -> usize {
        self.kinds().into_iter().filter(|k| *k == kind).count()
    }

    pub fn clear_recorded(&self) {
        self.recorded.lock().unwrap().clear();
    }

    /// Answer one call from the script.
    pub fn answer(&self, call: OutboundCall) {
        self.recorded.lock().unwrap().push(call.envelope.clone());

        let kind = call.envelope.request.kind();
        if self.held_kinds.lock().unwrap().contains(&kind) {
            self.held.lock().unwrap().push(call);
            return;
        }

        let reply = self.script_reply(&call.envelope.request);
        call.reply.send(reply);
    }

    /// Answer every call arriving on `outbound` until it closes.
    pub fn serve(&self, mut outbound: mpsc::UnboundedReceiver<OutboundCall>) -> JoinHandle<()> {
        let host = self.clone();
        tokio::spawn(async move {
            while let Some(call) = outbound.recv().await {
                host.answer(call);
            }
        })
    }

    fn script_reply(&self, request: &HostRequest) -> Reply {
        let responder = self.responders.lock().unwrap().get(request.kind()).cloned();
        match responder {
            Some(responder) => responder(request),
            None => Reply::error(format!("no scripted reply for '{}'", request.kind())),
        }
    }
}

impl HostLink for ScriptedHost {
    fn post(&self, envelope: Envelope, reply: ReplyPort) -> Result<()> {
        self.answer(OutboundCall { envelope, reply });
        Ok(())
    }
}

/// Shorthand for a success reply in responders.
pub fn ok(result: impl Serialize) -> Reply {
    Reply::success(serde_json::to_value(result).unwrap_or(Value::Null))
}
