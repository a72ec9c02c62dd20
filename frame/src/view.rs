//! What a frame renders, once resolved.

use toolframe_protocol::{AssetLocation, Context, Locator, ViewScope};

use crate::resolver::CreatableDialog;

/// A resolved view. Asset and creatable views only exist for single tools.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderView {
    Single(SingleView),
    Cross(CrossView),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SingleView {
    Main,
    Block {
        name: String,
        context: Option<Context>,
    },
    Asset {
        locator: Locator,
        /// `None` when the locator points at a whole collection.
        location: Option<AssetLocation>,
    },
    Creatable {
        name: String,
        dialog: CreatableDialog,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrossView {
    Main,
    Block {
        name: String,
        context: Option<Context>,
    },
}

impl RenderView {
    pub fn scope(&self) -> ViewScope {
        match self {
            RenderView::Single(_) => ViewScope::Single,
            RenderView::Cross(_) => ViewScope::Cross,
        }
    }

    pub fn is_single_main(&self) -> bool {
        matches!(self, RenderView::Single(SingleView::Main))
    }
}
