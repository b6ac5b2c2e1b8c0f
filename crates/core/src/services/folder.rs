//! Drive folder service

use larkbridge_domain::{FolderHandle, Result};
use serde_json::{json, Value};
use tracing::instrument;

use crate::context::ApiContext;
use crate::endpoint::actions;

/// A drive folder that bases can be created in.
#[derive(Debug, Clone)]
pub struct FolderService {
    ctx: ApiContext,
    handle: FolderHandle,
}

impl FolderService {
    /// Service for the folder behind `handle`.
    pub fn new(ctx: ApiContext, handle: FolderHandle) -> Self {
        Self { ctx, handle }
    }

    /// Identifier of this folder.
    pub fn handle(&self) -> &FolderHandle {
        &self.handle
    }

    /// Create a bitable app inside this folder.
    ///
    /// # Errors
    /// Transport failures.
    #[instrument(skip(self), fields(folder = %self.handle.folder_token))]
    pub async fn create_base(&self, name: &str) -> Result<Value> {
        let path = self.ctx.resolve(actions::CREATE_BASE, &[])?;
        let body = json!({ "name": name, "folder_token": self.handle.folder_token });
        self.ctx.transport().post(&path, &body).await
    }
}
