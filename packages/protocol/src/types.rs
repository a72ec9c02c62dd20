//! Plain data exchanged between tool, frame and host.

use serde::{Deserialize, Serialize};

use crate::hash::{GroupId, HashB64, ToolId};
use crate::locator::Locator;

/// Where in the host's content model a locator points.
///
/// Needed by a tool before it can pick a renderer for an asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetLocation {
    pub role_name: String,
    pub integrity_module: String,
    pub entry_type: String,
}

/// Display information about an asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetInfo {
    pub name: String,
    pub icon_src: String,
}

/// Answer to a global asset lookup: which tool owns it and how it looks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetLocationAndInfo {
    pub tool: ToolId,
    pub asset_info: AssetInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupProfile {
    pub name: String,
    pub icon_src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_data: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolInfo {
    pub bundle_id: String,
    pub name: String,
    pub icon_src: String,
    pub groups: Vec<GroupId>,
}

/// The local agent's standing in the group that owns the frame's tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GroupPermission {
    /// Created the group.
    Progenitor,
    Steward,
    Member,
}

/// Whether a view renders one tool or spans all instances of a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewScope {
    Single,
    Cross,
}

/// A block a tool can render, as advertised to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockType {
    pub label: String,
    pub icon_src: String,
    pub view: ViewScope,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialogSize {
    Small,
    Medium,
    Large,
}

/// Something a tool can create from a host dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatableType {
    /// Label the host shows to open the creatable dialog.
    pub label: String,
    pub icon_src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<DialogSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<DialogSize>,
}

/// How a creatable dialog ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CreatableResult {
    Success { locator: Locator },
    Cancel,
    Error { error: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    /// Only shows up in activity feeds.
    Low,
    /// Marks the tool in the host's tray.
    Medium,
    /// Additionally raises an OS notification.
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameNotification {
    pub title: String,
    pub body: String,
    pub notification_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_src: Option<String>,
    pub urgency: Urgency,
    /// Milliseconds since the epoch of the event the notification is about.
    pub timestamp: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<Locator>,
}

/// Where the host should open a locator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpenMode {
    Front,
    Side,
    Window,
}

/// Which host picker to start from when prompting for a locator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocatorSource {
    Search,
    Pocket,
    Create,
}

/// A backend call before signing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsignedCall {
    pub role_name: String,
    pub module: String,
    pub function: String,
    pub payload: Vec<u8>,
}

/// A backend call signed by the host on the frame's behalf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedCall {
    pub call: UnsignedCall,
    pub provenance: HashB64,
    pub signature: Vec<u8>,
}
