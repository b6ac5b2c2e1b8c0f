//! Drive entry point

use larkbridge_domain::{BaseHandle, FolderHandle};

use super::{BaseService, FolderService};
use crate::context::ApiContext;

/// Entry point for drive resources.
#[derive(Debug, Clone)]
pub struct DocsService {
    ctx: ApiContext,
}

impl DocsService {
    /// Docs entry point over `ctx`.
    pub fn new(ctx: ApiContext) -> Self {
        Self { ctx }
    }

    /// Folder identified by its token.
    pub fn open_folder(&self, folder_token: impl Into<String>) -> FolderService {
        FolderService::new(self.ctx.clone(), FolderHandle { folder_token: folder_token.into() })
    }

    /// Base identified by its app id.
    pub fn open_base(&self, base_id: impl Into<String>) -> BaseService {
        BaseService::new(self.ctx.clone(), BaseHandle { base_id: base_id.into() })
    }
}
