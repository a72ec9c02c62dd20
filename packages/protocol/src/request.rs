//! Request catalogues for both directions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::hash::{GroupId, HashB64, ToolId};
use crate::locator::{Context, Locator};
use crate::types::{
    AssetLocation, CreatableResult, CreatableType, FrameNotification, LocatorSource, OpenMode,
    UnsignedCall,
};

/// Requests a frame sends to its host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum HostRequest {
    OpenViewForMain {
        tool: ToolId,
    },
    OpenViewForBlock {
        tool: ToolId,
        block: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        context: Option<Context>,
    },
    OpenViewForCrossMain {
        bundle_id: String,
    },
    OpenViewForCrossBlock {
        bundle_id: String,
        block: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        context: Option<Context>,
    },
    OpenLocator {
        locator: Locator,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        mode: Option<OpenMode>,
    },
    GetGroupProfile {
        group: GroupId,
    },
    GetToolInfo {
        tool: ToolId,
    },
    GetGlobalAssetInfo {
        locator: Locator,
    },
    AddLocatorToPocket {
        locator: Locator,
    },
    /// Start a host drag-and-drop gesture carrying the locator.
    DragLocator {
        locator: Locator,
    },
    AddTagsToAsset {
        locator: Locator,
        tags: Vec<String>,
    },
    RemoveTagsFromAsset {
        locator: Locator,
        tags: Vec<String>,
    },
    AddAssetRelation {
        source: Locator,
        target: Locator,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        tags: Vec<String>,
    },
    RemoveAssetRelation {
        relation: HashB64,
    },
    AddTagsToAssetRelation {
        relation: HashB64,
        tags: Vec<String>,
    },
    RemoveTagsFromAssetRelation {
        relation: HashB64,
        tags: Vec<String>,
    },
    SubscribeToAssetStore {
        locator: Locator,
    },
    UnsubscribeFromAssetStore {
        locator: Locator,
    },
    PromptUserForLocator {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        from: Option<LocatorSource>,
    },
    SendFrameNotifications {
        notifications: Vec<FrameNotification>,
    },
    PromptUserForScreen,
    RequestBindLocators {
        source: Locator,
        target: Locator,
    },
    GetFrameConfig {
        cross: bool,
    },
    GetLocationForLocator {
        locator: Locator,
    },
    SignCall {
        call: UnsignedCall,
    },
    TogglePocket,
    MirrorStoreSet {
        key: String,
        value: String,
    },
    MirrorStoreRemove {
        key: String,
    },
    MirrorStoreClear,
    PushCreatableCatalog {
        catalog: BTreeMap<String, CreatableType>,
    },
    CreatableFinished {
        dialog_id: String,
        result: CreatableResult,
    },
    GetStoreSnapshot,
    RequestClose,
    GetGroupPermission,
    GetToolParticipants,
    /// Fire-and-forget payload for every online participant of the tool.
    SendRemoteSignal {
        payload: Vec<u8>,
    },
}

impl HostRequest {
    /// Wire name of this request, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            HostRequest::OpenViewForMain { .. } => "open-view-for-main",
            HostRequest::OpenViewForBlock { .. } => "open-view-for-block",
            HostRequest::OpenViewForCrossMain { .. } => "open-view-for-cross-main",
            HostRequest::OpenViewForCrossBlock { .. } => "open-view-for-cross-block",
            HostRequest::OpenLocator { .. } => "open-locator",
            HostRequest::GetGroupProfile { .. } => "get-group-profile",
            HostRequest::GetToolInfo { .. } => "get-tool-info",
            HostRequest::GetGlobalAssetInfo { .. } => "get-global-asset-info",
            HostRequest::AddLocatorToPocket { .. } => "add-locator-to-pocket",
            HostRequest::DragLocator { .. } => "drag-locator",
            HostRequest::AddTagsToAsset { .. } => "add-tags-to-asset",
            HostRequest::RemoveTagsFromAsset { .. } => "remove-tags-from-asset",
            HostRequest::AddAssetRelation { .. } => "add-asset-relation",
            HostRequest::RemoveAssetRelation { .. } => "remove-asset-relation",
            HostRequest::AddTagsToAssetRelation { .. } => "add-tags-to-asset-relation",
            HostRequest::RemoveTagsFromAssetRelation { .. } => "remove-tags-from-asset-relation",
            HostRequest::SubscribeToAssetStore { .. } => "subscribe-to-asset-store",
            HostRequest::UnsubscribeFromAssetStore { .. } => "unsubscribe-from-asset-store",
            HostRequest::PromptUserForLocator { .. } => "prompt-user-for-locator",
            HostRequest::SendFrameNotifications { .. } => "send-frame-notifications",
            HostRequest::PromptUserForScreen => "prompt-user-for-screen",
            HostRequest::RequestBindLocators { .. } => "request-bind-locators",
            HostRequest::GetFrameConfig { .. } => "get-frame-config",
            HostRequest::GetLocationForLocator { .. } => "get-location-for-locator",
            HostRequest::SignCall { .. } => "sign-call",
            HostRequest::TogglePocket => "toggle-pocket",
            HostRequest::MirrorStoreSet { .. } => "mirror-store-set",
            HostRequest::MirrorStoreRemove { .. } => "mirror-store-remove",
            HostRequest::MirrorStoreClear => "mirror-store-clear",
            HostRequest::PushCreatableCatalog { .. } => "push-creatable-catalog",
            HostRequest::CreatableFinished { .. } => "creatable-finished",
            HostRequest::GetStoreSnapshot => "get-store-snapshot",
            HostRequest::RequestClose => "request-close",
            HostRequest::GetGroupPermission => "get-group-permission",
            HostRequest::GetToolParticipants => "get-tool-participants",
            HostRequest::SendRemoteSignal { .. } => "send-remote-signal",
        }
    }
}

/// Requests a host sends to a frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum FrameRequest {
    AssetInfoForLocator {
        locator: Locator,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        location: Option<AssetLocation>,
    },
    EnumerateBlockTypes,
    BindTwoLocators {
        source: Locator,
        target: Locator,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target_location: Option<AssetLocation>,
    },
    SearchByFilter {
        filter: String,
    },
}

impl FrameRequest {
    /// Wire names of every request a frame answers.
    pub const KINDS: [&'static str; 4] = [
        "asset-info-for-locator",
        "enumerate-block-types",
        "bind-two-locators",
        "search-by-filter",
    ];

    pub fn kind(&self) -> &'static str {
        match self {
            FrameRequest::AssetInfoForLocator { .. } => Self::KINDS[0],
            FrameRequest::EnumerateBlockTypes => Self::KINDS[1],
            FrameRequest::BindTwoLocators { .. } => Self::KINDS[2],
            FrameRequest::SearchByFilter { .. } => Self::KINDS[3],
        }
    }

    /// Decode a raw inbound request.
    ///
    /// The error names the offending kind when the host sent one this frame
    /// does not know.
    pub fn from_value(value: serde_json::Value) -> Result<Self, String> {
        match value.get("type").and_then(|t| t.as_str()) {
            None => return Err("inbound request has no 'type'".to_string()),
            Some(kind) if !Self::KINDS.contains(&kind) => {
                return Err(format!("unknown request kind '{}'", kind));
            }
            Some(_) => {}
        }
        serde_json::from_value(value).map_err(|e| format!("malformed inbound request: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::HashB64;
    use crate::types::CreatableResult;

    #[test]
    fn host_request_tags_match_kind() {
        let requests = vec![
            HostRequest::GetFrameConfig { cross: true },
            HostRequest::TogglePocket,
            HostRequest::MirrorStoreSet {
                key: "k".to_string(),
                value: "v".to_string(),
            },
            HostRequest::CreatableFinished {
                dialog_id: "d1".to_string(),
                result: CreatableResult::Cancel,
            },
            HostRequest::GetStoreSnapshot,
            HostRequest::RemoveAssetRelation {
                relation: HashB64::parse("uhCEkRel").unwrap(),
            },
            HostRequest::UnsubscribeFromAssetStore {
                locator: Locator::new(
                    HashB64::parse("uA").unwrap(),
                    HashB64::parse("uB").unwrap(),
                ),
            },
            HostRequest::GetGroupPermission,
            HostRequest::GetToolParticipants,
            HostRequest::SendRemoteSignal { payload: vec![1] },
        ];
        for request in requests {
            let json = serde_json::to_value(&request).unwrap();
            assert_eq!(json["type"], request.kind());
        }
    }

    #[test]
    fn creatable_finished_shape() {
        let json = serde_json::to_value(HostRequest::CreatableFinished {
            dialog_id: "d1".to_string(),
            result: CreatableResult::Cancel,
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "creatable-finished",
                "dialog_id": "d1",
                "result": {"type": "cancel"},
            })
        );
    }

    #[test]
    fn asset_relation_tags_are_optional() {
        let source = Locator::new(HashB64::parse("uA").unwrap(), HashB64::parse("uB").unwrap());
        let target = Locator::new(HashB64::parse("uA").unwrap(), HashB64::parse("uC").unwrap());
        let json = serde_json::to_value(HostRequest::AddAssetRelation {
            source: source.clone(),
            target: target.clone(),
            tags: vec![],
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "add-asset-relation",
                "source": {"origin": "uA", "resource": "uB"},
                "target": {"origin": "uA", "resource": "uC"},
            })
        );
        let back: HostRequest = serde_json::from_value(json).unwrap();
        assert_eq!(
            back,
            HostRequest::AddAssetRelation {
                source,
                target,
                tags: vec![]
            }
        );
    }

    #[test]
    fn frame_request_decode() {
        let request = FrameRequest::from_value(serde_json::json!({
            "type": "search-by-filter",
            "filter": "todo",
        }))
        .unwrap();
        assert_eq!(
            request,
            FrameRequest::SearchByFilter {
                filter: "todo".to_string()
            }
        );
        assert_eq!(request.kind(), "search-by-filter");
    }

    #[test]
    fn frame_request_unknown_kind() {
        let err = FrameRequest::from_value(serde_json::json!({"type": "self-destruct"})).unwrap_err();
        assert_eq!(err, "unknown request kind 'self-destruct'");
    }

    #[test]
    fn frame_request_malformed() {
        let err = FrameRequest::from_value(serde_json::json!({"type": "search-by-filter"}))
            .unwrap_err();
        assert!(err.starts_with("malformed inbound request"));

        let err = FrameRequest::from_value(serde_json::json!({"filter": "x"})).unwrap_err();
        assert!(err.contains("no 'type'"));
    }

    #[test]
    fn asset_info_request_optional_location() {
        let request = FrameRequest::from_value(serde_json::json!({
            "type": "asset-info-for-locator",
            "locator": {"origin": "uA", "resource": "uB"},
        }))
        .unwrap();
        let FrameRequest::AssetInfoForLocator { locator, location } = request else {
            panic!("expected asset info request");
        };
        assert_eq!(locator.origin, HashB64::parse("uA").unwrap());
        assert!(location.is_none());
    }
}
