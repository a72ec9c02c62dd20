//! Turning a startup query into a [`RenderView`].

use std::fmt;

use tracing::debug;

use toolframe_protocol::{
    AssetLocation, CreatableResult, CrossQuery, HostRequest, Locator, SingleQuery, ViewQuery,
};
use toolframe_rpc::HostCaller;

use crate::error::Result;
use crate::view::{CrossView, RenderView, SingleView};

/// Parse a startup query and resolve it.
pub async fn resolve_query(query: &str, caller: &HostCaller) -> Result<RenderView> {
    let parsed = ViewQuery::parse(query)?;
    resolve_view(parsed, caller).await
}

/// Resolve a parsed query.
///
/// Asset views of a single record cost one `get-location-for-locator` call.
/// Every other view resolves without talking to the host.
pub async fn resolve_view(query: ViewQuery, caller: &HostCaller) -> Result<RenderView> {
    let view = match query {
        ViewQuery::Cross(CrossQuery::Main) => RenderView::Cross(CrossView::Main),
        ViewQuery::Cross(CrossQuery::Block { name, context }) => {
            RenderView::Cross(CrossView::Block { name, context })
        }
        ViewQuery::Single(SingleQuery::Main) => RenderView::Single(SingleView::Main),
        ViewQuery::Single(SingleQuery::Block { name, context }) => {
            RenderView::Single(SingleView::Block { name, context })
        }
        ViewQuery::Single(SingleQuery::Asset { locator }) => {
            let location = if locator.targets_collection() {
                debug!(locator = %locator, "asset view of a collection, skipping location lookup");
                None
            } else {
                let location: AssetLocation = caller
                    .call_as(HostRequest::GetLocationForLocator {
                        locator: locator.clone(),
                    })
                    .await?;
                Some(location)
            };
            RenderView::Single(SingleView::Asset { locator, location })
        }
        ViewQuery::Single(SingleQuery::Creatable { name, dialog_id }) => {
            RenderView::Single(SingleView::Creatable {
                name,
                dialog: CreatableDialog::new(dialog_id, caller.clone()),
            })
        }
    };
    Ok(view)
}

/// The host-side dialog a creatable view was opened in.
///
/// Finishing the dialog tells the host how it ended; each call sends one
/// `creatable-finished` request.
#[derive(Clone)]
pub struct CreatableDialog {
    id: String,
    caller: HostCaller,
}

impl CreatableDialog {
    pub(crate) fn new(id: String, caller: HostCaller) -> Self {
        Self { id, caller }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The asset was created.
    pub async fn resolve(&self, locator: Locator) -> toolframe_rpc::Result<()> {
        self.finish(CreatableResult::Success { locator }).await
    }

    /// Creating the asset failed.
    pub async fn reject(&self, error: impl Into<String>) -> toolframe_rpc::Result<()> {
        self.finish(CreatableResult::Error {
            error: error.into(),
        })
        .await
    }

    /// The user gave up.
    pub async fn cancel(&self) -> toolframe_rpc::Result<()> {
        self.finish(CreatableResult::Cancel).await
    }

    async fn finish(&self, result: CreatableResult) -> toolframe_rpc::Result<()> {
        self.caller
            .call(HostRequest::CreatableFinished {
                dialog_id: self.id.clone(),
                result,
            })
            .await
            .map(|_| ())
    }
}

impl PartialEq for CreatableDialog {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl fmt::Debug for CreatableDialog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreatableDialog").field("id", &self.id).finish()
    }
}
