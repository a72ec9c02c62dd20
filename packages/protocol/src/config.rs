//! What the host is prepared to give a frame.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::hash::ToolId;
use crate::types::{GroupProfile, ViewScope};

/// Opaque token authenticating one backend connection.
pub type AuthToken = Vec<u8>;

/// Everything needed to open one backend connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionParams {
    pub app_port: u16,
    pub auth_token: AuthToken,
}

/// Where the profiles of a tool's participants live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfilesLocation {
    pub auth_token: AuthToken,
    pub role_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleToolConfig {
    pub app_port: u16,
    pub auth_token: AuthToken,
    pub profiles: ProfilesLocation,
    pub protocol_version: String,
    pub host_version: String,
    /// Origin of the host UI, used by the host to validate messages.
    pub main_ui_origin: String,
    /// Non-exhaustive: the tool may be shared with groups this host is not in.
    #[serde(default)]
    pub group_profiles: Vec<GroupProfile>,
}

impl SingleToolConfig {
    pub fn connection(&self) -> ConnectionParams {
        ConnectionParams {
            app_port: self.app_port,
            auth_token: self.auth_token.clone(),
        }
    }

    pub fn profiles_connection(&self) -> ConnectionParams {
        ConnectionParams {
            app_port: self.app_port,
            auth_token: self.profiles.auth_token.clone(),
        }
    }
}

/// Per-tool credentials of a cross-tool frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossToolEntry {
    pub auth_token: AuthToken,
    pub profiles: ProfilesLocation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossToolConfig {
    pub app_port: u16,
    pub protocol_version: String,
    pub host_version: String,
    pub main_ui_origin: String,
    pub tools: BTreeMap<ToolId, CrossToolEntry>,
}

impl CrossToolConfig {
    pub fn connection(&self, entry: &CrossToolEntry) -> ConnectionParams {
        ConnectionParams {
            app_port: self.app_port,
            auth_token: entry.auth_token.clone(),
        }
    }

    pub fn profiles_connection(&self, entry: &CrossToolEntry) -> ConnectionParams {
        ConnectionParams {
            app_port: self.app_port,
            auth_token: entry.profiles.auth_token.clone(),
        }
    }
}

/// Answer to `get-frame-config`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum FrameConfig {
    /// The tool is not installed for this user. Not an error.
    NotInstalled { display_name: String },
    Single(SingleToolConfig),
    Cross(CrossToolConfig),
}

impl FrameConfig {
    /// The view scope this config pairs with, if any.
    pub fn scope(&self) -> Option<ViewScope> {
        match self {
            FrameConfig::NotInstalled { .. } => None,
            FrameConfig::Single(_) => Some(ViewScope::Single),
            FrameConfig::Cross(_) => Some(ViewScope::Cross),
        }
    }
}
