//! Frame-side runtime for tools embedded in a host.
//!
//! A tool's UI runs in an isolated frame. This crate starts the frame and
//! connects the tool to its host:
//!
//! - [`Bootstrap`] works out who the frame is and what it shows, fetches its
//!   config from the host and opens backend connections.
//! - [`ToolApi`] is the only way tool code reaches the host.
//! - [`ToolServices`] is what the tool offers back; the [`InboundDispatcher`]
//!   routes host requests to it.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use toolframe::{Bootstrap, BootstrapOutcome, Connector};
//! use toolframe_rpc::channel_pair;
//!
//! async fn start(connector: Arc<dyn Connector>) {
//!     let (frame, _host) = channel_pair();
//!     let bootstrap = Bootstrap::new(
//!         "applet://uhc$kka$b$12xy$.localhost/",
//!         "outerKind=Single&viewKind=main",
//!         Arc::new(frame.link),
//!         frame.inbound,
//!         connector,
//!     );
//!     match bootstrap.run().await {
//!         Ok(BootstrapOutcome::Running(mut running)) => {
//!             if let Some(listener) = running.take_listener() {
//!                 tokio::spawn(listener.run());
//!             }
//!         }
//!         Ok(BootstrapOutcome::NotInstalled(notice)) => eprintln!("{}", notice),
//!         Err(e) => eprintln!("{}", e.fallback_notice()),
//!     }
//! }
//! ```

pub mod bootstrap;
pub mod capabilities;
pub mod connection;
pub mod dispatcher;
pub mod error;
pub mod mirror;
pub mod render_info;
pub mod resolver;
pub mod services;
pub mod settings;
pub mod view;

pub use bootstrap::{Bootstrap, BootstrapOutcome, NotInstalledNotice, Phase, RunningFrame};
pub use capabilities::{AssetSubscription, ToolApi};
pub use connection::{AppConnection, BackendCall, CallSigner, Connector};
pub use dispatcher::{InboundDispatcher, InboundListener};
pub use error::{FrameError, Result};
pub use mirror::{FrameStore, HostMirror};
pub use render_info::{HostVersions, RenderInfo, ToolConnections};
pub use resolver::{resolve_query, resolve_view, CreatableDialog};
pub use services::{NoServices, ToolServices};
pub use settings::FrameSettings;
pub use view::{CrossView, RenderView, SingleView};
