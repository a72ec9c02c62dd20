//! The host capabilities a tool may use.

use toolframe_protocol::{
    AssetLocationAndInfo, Context, FrameIdentity, FrameNotification, GroupId, GroupPermission,
    GroupProfile, HashB64, HostRequest, Locator, LocatorSource, OpenMode, ToolId, ToolInfo,
};
use toolframe_rpc::{HostCaller, Result};
use tracing::warn;

use crate::mirror::FrameStore;

/// Capability surface handed to tool code.
///
/// Only end-user requests are exposed. A tool cannot reach the underlying
/// caller, the link, or call signing through it.
#[derive(Debug, Clone)]
pub struct ToolApi {
    caller: HostCaller,
    store: FrameStore,
}

impl ToolApi {
    pub(crate) fn new(caller: HostCaller, store: FrameStore) -> Self {
        Self { caller, store }
    }

    pub fn identity(&self) -> &FrameIdentity {
        self.caller.identity()
    }

    /// The frame's local store.
    pub fn store(&self) -> &FrameStore {
        &self.store
    }

    async fn send(&self, request: HostRequest) -> Result<()> {
        self.caller.call(request).await.map(|_| ())
    }

    pub async fn open_main(&self, tool: ToolId) -> Result<()> {
        self.send(HostRequest::OpenViewForMain { tool }).await
    }

    pub async fn open_block(
        &self,
        tool: ToolId,
        block: impl Into<String>,
        context: Option<Context>,
    ) -> Result<()> {
        self.send(HostRequest::OpenViewForBlock {
            tool,
            block: block.into(),
            context,
        })
        .await
    }

    pub async fn open_cross_main(&self, bundle_id: impl Into<String>) -> Result<()> {
        self.send(HostRequest::OpenViewForCrossMain {
            bundle_id: bundle_id.into(),
        })
        .await
    }

    pub async fn open_cross_block(
        &self,
        bundle_id: impl Into<String>,
        block: impl Into<String>,
        context: Option<Context>,
    ) -> Result<()> {
        self.send(HostRequest::OpenViewForCrossBlock {
            bundle_id: bundle_id.into(),
            block: block.into(),
            context,
        })
        .await
    }

    pub async fn open_locator(&self, locator: Locator, mode: Option<OpenMode>) -> Result<()> {
        self.send(HostRequest::OpenLocator { locator, mode }).await
    }

    pub async fn group_profile(&self, group: GroupId) -> Result<Option<GroupProfile>> {
        self.caller
            .call_as(HostRequest::GetGroupProfile { group })
            .await
    }

    pub async fn tool_info(&self, tool: ToolId) -> Result<Option<ToolInfo>> {
        self.caller.call_as(HostRequest::GetToolInfo { tool }).await
    }

    /// Look up an asset of any tool.
    pub async fn asset_info(&self, locator: Locator) -> Result<Option<AssetLocationAndInfo>> {
        self.caller
            .call_as(HostRequest::GetGlobalAssetInfo { locator })
            .await
    }

    pub async fn add_to_pocket(&self, locator: Locator) -> Result<()> {
        self.send(HostRequest::AddLocatorToPocket { locator }).await
    }

    /// Let the user pick an asset. `None` if they cancel.
    pub async fn prompt_for_locator(&self, from: Option<LocatorSource>) -> Result<Option<Locator>> {
        self.caller
            .call_as(HostRequest::PromptUserForLocator { from })
            .await
    }

    pub async fn notify(&self, notifications: Vec<FrameNotification>) -> Result<()> {
        self.send(HostRequest::SendFrameNotifications { notifications })
            .await
    }

    /// Let the user pick a screen to capture. Returns the host's source id.
    pub async fn prompt_for_screen(&self) -> Result<String> {
        self.caller.call_as(HostRequest::PromptUserForScreen).await
    }

    pub async fn request_bind(&self, source: Locator, target: Locator) -> Result<()> {
        self.send(HostRequest::RequestBindLocators { source, target })
            .await
    }

    pub async fn toggle_pocket(&self) -> Result<()> {
        self.send(HostRequest::TogglePocket).await
    }

    /// Ask the host to close this frame.
    pub async fn request_close(&self) -> Result<()> {
        self.send(HostRequest::RequestClose).await
    }

    pub async fn drag_locator(&self, locator: Locator) -> Result<()> {
        self.send(HostRequest::DragLocator { locator }).await
    }

    pub async fn add_tags(&self, locator: Locator, tags: Vec<String>) -> Result<()> {
        self.send(HostRequest::AddTagsToAsset { locator, tags }).await
    }

    pub async fn remove_tags(&self, locator: Locator, tags: Vec<String>) -> Result<()> {
        self.send(HostRequest::RemoveTagsFromAsset { locator, tags })
            .await
    }

    /// Relate two assets. The new relation shows up through asset subscriptions.
    pub async fn add_relation(
        &self,
        source: Locator,
        target: Locator,
        tags: Vec<String>,
    ) -> Result<()> {
        self.send(HostRequest::AddAssetRelation {
            source,
            target,
            tags,
        })
        .await
    }

    /// Remove a relation and all its tags.
    pub async fn remove_relation(&self, relation: HashB64) -> Result<()> {
        self.send(HostRequest::RemoveAssetRelation { relation }).await
    }

    pub async fn add_relation_tags(&self, relation: HashB64, tags: Vec<String>) -> Result<()> {
        self.send(HostRequest::AddTagsToAssetRelation { relation, tags })
            .await
    }

    pub async fn remove_relation_tags(&self, relation: HashB64, tags: Vec<String>) -> Result<()> {
        self.send(HostRequest::RemoveTagsFromAssetRelation { relation, tags })
            .await
    }

    /// Ask the host to track an asset's tags and relations.
    ///
    /// The subscription lasts until the returned handle is dropped.
    pub async fn subscribe_asset(&self, locator: Locator) -> Result<AssetSubscription> {
        self.send(HostRequest::SubscribeToAssetStore {
            locator: locator.clone(),
        })
        .await?;
        Ok(AssetSubscription {
            caller: self.caller.clone(),
            locator,
        })
    }

    pub async fn group_permission(&self) -> Result<GroupPermission> {
        self.caller.call_as(HostRequest::GetGroupPermission).await
    }

    /// Agents that joined this tool instance.
    pub async fn participants(&self) -> Result<Vec<HashB64>> {
        self.caller.call_as(HostRequest::GetToolParticipants).await
    }

    /// Send a small payload to every online participant. Delivery is not
    /// confirmed.
    pub async fn send_remote_signal(&self, payload: Vec<u8>) -> Result<()> {
        self.send(HostRequest::SendRemoteSignal { payload }).await
    }
}

/// An open asset subscription. Dropping it unsubscribes.
#[derive(Debug)]
pub struct AssetSubscription {
    caller: HostCaller,
    locator: Locator,
}

impl AssetSubscription {
    pub fn locator(&self) -> &Locator {
        &self.locator
    }
}

impl Drop for AssetSubscription {
    fn drop(&mut self) {
        let request = HostRequest::UnsubscribeFromAssetStore {
            locator: self.locator.clone(),
        };
        if let Err(e) = self.caller.notify(request) {
            warn!(locator = %self.locator, error = %e, "failed to unsubscribe from asset");
        }
    }
}
