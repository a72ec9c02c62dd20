//! Shared fixtures for frame tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use toolframe::{AppConnection, BackendCall, CallSigner, Connector};
use toolframe_protocol::{ConnectionParams, SignedCall};

/// Location of a production frame with identity `uhCkkAB12xY`.
pub const LOCATION: &str = "applet://uhc%24kka%24b%2412xy%24.localhost/index.html";

pub const IDENTITY: &str = "uhCkkAB12xY";

pub const TOOL_A: &str = "uhCkkToolA";
pub const TOOL_B: &str = "uhCkkToolB";

/// A backend connection that only asks for signatures.
pub struct FakeConnection {
    pub params: ConnectionParams,
    signer: CallSigner,
}

#[async_trait]
impl AppConnection for FakeConnection {
    async fn call(&self, call: BackendCall) -> Result<Vec<u8>, String> {
        let signed: SignedCall = self.signer.sign(call).await.map_err(|e| e.to_string())?;
        Ok(signed.signature)
    }
}

/// Opens [`FakeConnection`]s, refusing configured tokens.
#[derive(Clone, Default)]
pub struct FakeConnector {
    opened: Arc<Mutex<Vec<ConnectionParams>>>,
    refused: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl FakeConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn refuse_token(self, token: Vec<u8>) -> Self {
        self.refused.lock().unwrap().push(token);
        self
    }

    pub fn opened(&self) -> Vec<ConnectionParams> {
        self.opened.lock().unwrap().clone()
    }
}

#[async_trait]
impl Connector for FakeConnector {
    async fn open(
        &self,
        params: ConnectionParams,
        signer: CallSigner,
    ) -> Result<Arc<dyn AppConnection>, String> {
        if self.refused.lock().unwrap().contains(&params.auth_token) {
            return Err(format!("token {:?} refused", params.auth_token));
        }
        self.opened.lock().unwrap().push(params.clone());
        Ok(Arc::new(FakeConnection { params, signer }))
    }
}

pub fn single_config() -> Value {
    json!({
        "type": "single",
        "app_port": 30001,
        "auth_token": [1],
        "profiles": {"auth_token": [2], "role_name": "profiles"},
        "protocol_version": "0.13",
        "host_version": "0.13.2",
        "main_ui_origin": "host://ui",
        "group_profiles": [{"name": "Friends", "icon_src": "data:,"}],
    })
}

pub fn cross_config() -> Value {
    json!({
        "type": "cross",
        "app_port": 30001,
        "protocol_version": "0.13",
        "host_version": "0.13.2",
        "main_ui_origin": "host://ui",
        "tools": {
            TOOL_A: {
                "auth_token": [10],
                "profiles": {"auth_token": [11], "role_name": "profiles"},
            },
            TOOL_B: {
                "auth_token": [20],
                "profiles": {"auth_token": [21], "role_name": "profiles"},
            },
        },
    })
}
