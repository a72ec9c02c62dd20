//! Answering host-initiated requests with the tool's services.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::info;

use toolframe_protocol::{FrameIdentity, FrameRequest};
use toolframe_rpc::{serve_inbound, InboundCall, InboundHandler};

use crate::capabilities::ToolApi;
use crate::connection::AppConnection;
use crate::error::{FrameError, Result};
use crate::services::ToolServices;

/// Routes the four inbound request kinds to [`ToolServices`].
pub struct InboundDispatcher {
    connection: Arc<dyn AppConnection>,
    identity: FrameIdentity,
    api: ToolApi,
    services: Arc<dyn ToolServices>,
}

impl InboundDispatcher {
    pub fn new(
        connection: Arc<dyn AppConnection>,
        identity: FrameIdentity,
        api: ToolApi,
        services: Arc<dyn ToolServices>,
    ) -> Self {
        Self {
            connection,
            identity,
            api,
            services,
        }
    }

    async fn dispatch(&self, request: FrameRequest) -> Result<Value> {
        let conn = self.connection.as_ref();
        match request {
            FrameRequest::AssetInfoForLocator { locator, location } => {
                let info = self
                    .services
                    .asset_info(conn, &locator, location.as_ref())
                    .await
                    .map_err(FrameError::Handler)?;
                to_value(info)
            }
            FrameRequest::EnumerateBlockTypes => to_value(self.services.block_types()),
            FrameRequest::BindTwoLocators {
                source,
                target,
                target_location,
            } => {
                self.services
                    .bind(conn, &source, &target, target_location.as_ref())
                    .await
                    .map_err(FrameError::Handler)?;
                Ok(Value::Null)
            }
            FrameRequest::SearchByFilter { filter } => {
                let found = self
                    .services
                    .search(conn, &self.identity, &self.api, &filter)
                    .await
                    .map_err(FrameError::Handler)?;
                to_value(found)
            }
        }
    }
}

fn to_value(value: impl Serialize) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| FrameError::Handler(e.to_string()))
}

#[async_trait]
impl InboundHandler for InboundDispatcher {
    async fn handle(&self, request: FrameRequest) -> std::result::Result<Value, String> {
        self.dispatch(request).await.map_err(|e| e.to_string())
    }
}

/// The installed inbound side of a running frame.
///
/// Nothing is served until [`InboundListener::run`] is driven.
pub struct InboundListener {
    receiver: mpsc::UnboundedReceiver<InboundCall>,
    dispatcher: InboundDispatcher,
    concurrency: usize,
}

impl InboundListener {
    pub(crate) fn new(
        receiver: mpsc::UnboundedReceiver<InboundCall>,
        dispatcher: InboundDispatcher,
        concurrency: usize,
    ) -> Self {
        Self {
            receiver,
            dispatcher,
            concurrency,
        }
    }

    /// Serve host requests until the host closes its side.
    pub async fn run(self) {
        info!(concurrency = self.concurrency, "serving host requests");
        serve_inbound(self.receiver, &self.dispatcher, self.concurrency).await;
        info!("host closed the inbound channel");
    }
}
