//! Bitable app service

use larkbridge_domain::constants::DEFAULT_TABLE_VIEW_NAME;
use larkbridge_domain::{BaseHandle, Result, TableHandle};
use serde_json::{json, Value};
use tracing::instrument;

use super::TableService;
use crate::context::ApiContext;
use crate::endpoint::actions;

/// A bitable app ("base").
#[derive(Debug, Clone)]
pub struct BaseService {
    ctx: ApiContext,
    handle: BaseHandle,
}

impl BaseService {
    /// Service for the base behind `handle`.
    pub fn new(ctx: ApiContext, handle: BaseHandle) -> Self {
        Self { ctx, handle }
    }

    /// Identifier of this base.
    pub fn handle(&self) -> &BaseHandle {
        &self.handle
    }

    pub(crate) fn context(&self) -> &ApiContext {
        &self.ctx
    }

    fn path(&self, action: &str) -> Result<String> {
        let base_id = urlencoding::encode(&self.handle.base_id);
        self.ctx.resolve(action, &[("baseId", &*base_id)])
    }

    /// # Errors
    /// Transport failures.
    pub async fn list_tables(&self) -> Result<Value> {
        let path = self.path(actions::LIST_TABLES)?;
        self.ctx.transport().get(&path).await
    }

    /// Create a table. `default_view_name` falls back to `"Grid"`.
    ///
    /// # Errors
    /// Transport failures.
    #[instrument(skip(self, fields), fields(base_id = %self.handle.base_id))]
    pub async fn create_table(
        &self,
        name: &str,
        fields: Vec<Value>,
        default_view_name: Option<&str>,
    ) -> Result<Value> {
        let path = self.path(actions::CREATE_TABLE)?;
        let body = json!({
            "table": {
                "name": name,
                "default_view_name": default_view_name.unwrap_or(DEFAULT_TABLE_VIEW_NAME),
                "fields": fields,
            }
        });
        self.ctx.transport().post(&path, &body).await
    }

    /// Table service borrowing this base.
    pub fn open_table(&self, table_id: impl Into<String>) -> TableService<'_> {
        TableService::new(self, TableHandle::new(self.handle.base_id.clone(), table_id))
    }

    /// Give back the shared context this base was opened from.
    pub fn close(self) -> ApiContext {
        self.ctx
    }
}
