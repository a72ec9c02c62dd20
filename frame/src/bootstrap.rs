//! Starting a frame.
//!
//! Bootstrap runs once, in fixed phases:
//!
//! 1. **Identify**: read the frame identity from its location and build the
//!    capability surface.
//! 2. **Prime**: fetch the persisted store snapshot and resolve the view,
//!    concurrently.
//! 3. **Configure**: ask the host what this frame may use.
//! 4. **Connect**: open backend connections.
//! 5. **Expose**: publish the [`RenderInfo`].
//! 6. **Listen**: install the inbound dispatcher (single tool, main view only).
//! 7. **Ready**.
//!
//! A tool that is not installed ends in [`Phase::NotInstalled`]; any fatal
//! error ends in [`Phase::Failed`] and is returned to the embedder.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::{mpsc, watch};
use tracing::{error, info, warn};

use toolframe_local_store::parse_snapshot;
use toolframe_protocol::{
    ConnectionParams, CrossToolConfig, FrameConfig, FrameIdentity, HostRequest, SingleToolConfig,
    ToolId, ViewScope,
};
use toolframe_rpc::{HostCaller, HostLink, InboundCall};

use crate::capabilities::ToolApi;
use crate::connection::{CallSigner, Connector};
use crate::dispatcher::{InboundDispatcher, InboundListener};
use crate::error::{FrameError, Result};
use crate::mirror::{FrameStore, HostMirror};
use crate::render_info::{HostVersions, RenderInfo, ToolConnections};
use crate::resolver::resolve_query;
use crate::services::{NoServices, ToolServices};
use crate::settings::FrameSettings;
use crate::view::{RenderView, SingleView};

/// Where bootstrap is. Phases only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Identify,
    Prime,
    Configure,
    Connect,
    Expose,
    Listen,
    Ready,
    NotInstalled,
    Failed,
}

impl Phase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Ready | Phase::NotInstalled | Phase::Failed)
    }
}

/// The tool is not installed for this user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotInstalledNotice {
    pub display_name: String,
}

impl fmt::Display for NotInstalledNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "You don't have the tool {} installed. Install it from the group's home, and refresh this view.",
            self.display_name
        )
    }
}

/// How a successful bootstrap ended.
#[derive(Debug)]
pub enum BootstrapOutcome {
    Running(RunningFrame),
    NotInstalled(NotInstalledNotice),
}

/// A started frame.
pub struct RunningFrame {
    info: Arc<RenderInfo>,
    caller: HostCaller,
    api: ToolApi,
    services: Arc<dyn ToolServices>,
    listener: Option<InboundListener>,
}

impl RunningFrame {
    pub fn render_info(&self) -> Arc<RenderInfo> {
        Arc::clone(&self.info)
    }

    pub fn api(&self) -> &ToolApi {
        &self.api
    }

    /// The inbound listener, if this frame answers host requests.
    ///
    /// Only the first call returns it.
    pub fn take_listener(&mut self) -> Option<InboundListener> {
        self.listener.take()
    }

    /// The tool's client is up: tell the host what it can create.
    pub async fn client_attached(&self) -> toolframe_rpc::Result<()> {
        let catalog = self.services.creatables();
        info!(creatables = catalog.len(), "pushing creatable catalog");
        self.caller
            .call(HostRequest::PushCreatableCatalog { catalog })
            .await
            .map(|_| ())
    }
}

impl fmt::Debug for RunningFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunningFrame")
            .field("info", &self.info)
            .field("listening", &self.listener.is_some())
            .finish_non_exhaustive()
    }
}

/// Drives a frame from its location and startup query to a running frame.
pub struct Bootstrap {
    settings: FrameSettings,
    location: String,
    query: String,
    link: Arc<dyn HostLink>,
    inbound: mpsc::UnboundedReceiver<InboundCall>,
    connector: Arc<dyn Connector>,
    services: Arc<dyn ToolServices>,
    phase: watch::Sender<Phase>,
}

impl Bootstrap {
    pub fn new(
        location: impl Into<String>,
        query: impl Into<String>,
        link: Arc<dyn HostLink>,
        inbound: mpsc::UnboundedReceiver<InboundCall>,
        connector: Arc<dyn Connector>,
    ) -> Self {
        let (phase, _) = watch::channel(Phase::Identify);
        Self {
            settings: FrameSettings::default(),
            location: location.into(),
            query: query.into(),
            link,
            inbound,
            connector,
            services: Arc::new(NoServices),
            phase,
        }
    }

    pub fn with_services(mut self, services: Arc<dyn ToolServices>) -> Self {
        self.services = services;
        self
    }

    pub fn with_settings(mut self, settings: FrameSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Watch phase changes.
    pub fn phases(&self) -> watch::Receiver<Phase> {
        self.phase.subscribe()
    }

    fn enter(&self, phase: Phase) {
        info!(?phase, "bootstrap phase");
        self.phase.send_replace(phase);
    }

    /// Run every phase.
    pub async fn run(self) -> Result<BootstrapOutcome> {
        let phase = self.phase.clone();
        match self.run_phases().await {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                error!(error = %e, "bootstrap failed");
                phase.send_replace(Phase::Failed);
                Err(e)
            }
        }
    }

    async fn run_phases(self) -> Result<BootstrapOutcome> {
        self.enter(Phase::Identify);
        let identity = FrameIdentity::from_location(&self.location, &self.settings.scheme)?;
        info!(identity = %identity, "frame identified");
        let caller = HostCaller::new(Arc::clone(&self.link), identity.clone());
        let store = FrameStore::new(HostMirror::new(caller.clone()));
        let api = ToolApi::new(caller.clone(), store.clone());

        self.enter(Phase::Prime);
        let (_, view) = tokio::join!(
            prime_store(&caller, &store),
            resolve_query(&self.query, &caller)
        );
        let view = view?;

        self.enter(Phase::Configure);
        let config: FrameConfig = caller
            .call_as(HostRequest::GetFrameConfig {
                cross: view.scope() == ViewScope::Cross,
            })
            .await?;

        let signer = CallSigner::new(caller.clone());
        let info = match (view, config) {
            (_, FrameConfig::NotInstalled { display_name }) => {
                info!(tool = %display_name, "tool not installed");
                self.phase.send_replace(Phase::NotInstalled);
                return Ok(BootstrapOutcome::NotInstalled(NotInstalledNotice {
                    display_name,
                }));
            }
            (RenderView::Single(view), FrameConfig::Single(config)) => {
                self.enter(Phase::Connect);
                let connections = self.connect_single(&identity, &config, &signer).await?;
                RenderInfo::Single {
                    view,
                    identity: identity.clone(),
                    connections,
                    versions: HostVersions {
                        protocol: config.protocol_version,
                        host: config.host_version,
                    },
                    group_profiles: config.group_profiles,
                }
            }
            (RenderView::Cross(view), FrameConfig::Cross(config)) => {
                self.enter(Phase::Connect);
                let tools = self.connect_cross(&config, &signer).await;
                RenderInfo::Cross {
                    view,
                    identity: identity.clone(),
                    tools,
                    versions: HostVersions {
                        protocol: config.protocol_version,
                        host: config.host_version,
                    },
                }
            }
            (view, config) => {
                return Err(FrameError::ConfigMismatch {
                    view: view.scope(),
                    config: config.scope().unwrap_or(view.scope()),
                });
            }
        };

        self.enter(Phase::Expose);
        let info = Arc::new(info);

        self.enter(Phase::Listen);
        let listener = match info.as_ref() {
            RenderInfo::Single {
                view: SingleView::Main,
                connections,
                ..
            } => {
                let dispatcher = InboundDispatcher::new(
                    Arc::clone(&connections.app),
                    identity.clone(),
                    api.clone(),
                    Arc::clone(&self.services),
                );
                Some(InboundListener::new(
                    self.inbound,
                    dispatcher,
                    self.settings.inbound_concurrency,
                ))
            }
            _ => None,
        };

        self.phase.send_replace(Phase::Ready);
        info!(phase = ?Phase::Ready, listening = listener.is_some(), "bootstrap phase");

        Ok(BootstrapOutcome::Running(RunningFrame {
            info,
            caller,
            api,
            services: self.services,
            listener,
        }))
    }

    async fn connect_single(
        &self,
        identity: &FrameIdentity,
        config: &SingleToolConfig,
        signer: &CallSigner,
    ) -> Result<ToolConnections> {
        open_tool(
            self.connector.as_ref(),
            config.connection(),
            config.profiles_connection(),
            config.profiles.role_name.clone(),
            signer,
        )
        .await
        .map_err(|reason| FrameError::Connect {
            target: identity.to_string(),
            reason,
        })
    }

    async fn connect_cross(
        &self,
        config: &CrossToolConfig,
        signer: &CallSigner,
    ) -> BTreeMap<ToolId, ToolConnections> {
        let opened = join_all(config.tools.iter().map(|(tool, entry)| async move {
            let result = open_tool(
                self.connector.as_ref(),
                config.connection(entry),
                config.profiles_connection(entry),
                entry.profiles.role_name.clone(),
                signer,
            )
            .await;
            (tool.clone(), result)
        }))
        .await;

        opened
            .into_iter()
            .filter_map(|(tool, result)| match result {
                Ok(connections) => Some((tool, connections)),
                Err(reason) => {
                    warn!(tool = %tool, reason = %reason, "skipping tool whose connection failed");
                    None
                }
            })
            .collect()
    }
}

/// Open the app and profiles connections of one tool concurrently.
async fn open_tool(
    connector: &dyn Connector,
    app: ConnectionParams,
    profiles: ConnectionParams,
    profiles_role: String,
    signer: &CallSigner,
) -> std::result::Result<ToolConnections, String> {
    let (app, profiles) = tokio::try_join!(
        connector.open(app, signer.clone()),
        connector.open(profiles, signer.clone())
    )?;
    Ok(ToolConnections {
        app,
        profiles,
        profiles_role,
    })
}

/// Load the persisted snapshot. Failures leave the store empty.
async fn prime_store(caller: &HostCaller, store: &FrameStore) {
    let snapshot = caller
        .call(HostRequest::GetStoreSnapshot)
        .await
        .map_err(|e| e.to_string())
        .and_then(|value| parse_snapshot(value).map_err(|e| e.to_string()));
    match snapshot {
        Ok(snapshot) => store.hydrate(snapshot),
        Err(e) => warn!(error = %e, "starting with an empty store"),
    }
}
