//! What a running frame publishes to tool code.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use toolframe_protocol::{FrameIdentity, GroupProfile, ToolId};

use crate::connection::AppConnection;
use crate::view::{CrossView, SingleView};

/// Backend connections of one tool.
#[derive(Clone)]
pub struct ToolConnections {
    pub app: Arc<dyn AppConnection>,
    pub profiles: Arc<dyn AppConnection>,
    /// Role the profiles live under on `profiles`.
    pub profiles_role: String,
}

impl fmt::Debug for ToolConnections {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolConnections")
            .field("profiles_role", &self.profiles_role)
            .finish_non_exhaustive()
    }
}

/// Versions the host reported in its config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostVersions {
    pub protocol: String,
    pub host: String,
}

/// Everything tool code needs to render. Built once, never changed.
#[derive(Debug)]
pub enum RenderInfo {
    Single {
        view: SingleView,
        identity: FrameIdentity,
        connections: ToolConnections,
        group_profiles: Vec<GroupProfile>,
        versions: HostVersions,
    },
    Cross {
        view: CrossView,
        identity: FrameIdentity,
        /// Tools whose connections could be opened. Others are left out.
        tools: BTreeMap<ToolId, ToolConnections>,
        versions: HostVersions,
    },
}

impl RenderInfo {
    pub fn identity(&self) -> &FrameIdentity {
        match self {
            RenderInfo::Single { identity, .. } | RenderInfo::Cross { identity, .. } => identity,
        }
    }

    pub fn versions(&self) -> &HostVersions {
        match self {
            RenderInfo::Single { versions, .. } | RenderInfo::Cross { versions, .. } => versions,
        }
    }
}
