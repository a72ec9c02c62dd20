//! Extension points a tool implements for its host.

use std::collections::BTreeMap;

use async_trait::async_trait;

use toolframe_protocol::{
    AssetInfo, AssetLocation, BlockType, CreatableType, FrameIdentity, Locator,
};

use crate::capabilities::ToolApi;
use crate::connection::AppConnection;

/// What a tool offers the host.
///
/// Every method has a default, so a tool only implements what it supports.
/// Errors are reported to the host as the reply to its request.
#[async_trait]
pub trait ToolServices: Send + Sync {
    /// Assets that can be created from a host dialog, by name.
    fn creatables(&self) -> BTreeMap<String, CreatableType> {
        BTreeMap::new()
    }

    /// Blocks the host may embed, by name.
    fn block_types(&self) -> BTreeMap<String, BlockType> {
        BTreeMap::new()
    }

    /// Describe one of this tool's assets. `Ok(None)` if it is not known.
    async fn asset_info(
        &self,
        _conn: &dyn AppConnection,
        _locator: &Locator,
        _location: Option<&AssetLocation>,
    ) -> Result<Option<AssetInfo>, String> {
        Ok(None)
    }

    /// Attach `source` to `target`, an asset of this tool.
    async fn bind(
        &self,
        _conn: &dyn AppConnection,
        _source: &Locator,
        _target: &Locator,
        _target_location: Option<&AssetLocation>,
    ) -> Result<(), String> {
        Err("this tool does not bind assets".to_string())
    }

    /// Search this tool's assets.
    async fn search(
        &self,
        _conn: &dyn AppConnection,
        _identity: &FrameIdentity,
        _api: &ToolApi,
        _filter: &str,
    ) -> Result<Vec<Locator>, String> {
        Ok(Vec::new())
    }
}

/// A tool that offers nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoServices;

impl ToolServices for NoServices {}
