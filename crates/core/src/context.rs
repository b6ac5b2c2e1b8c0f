//! Shared wiring handed to every resource service

use std::sync::Arc;

use larkbridge_common::resilience::{FixedInterval, PacingPolicy};
use larkbridge_domain::constants::MAX_RECORDS_PER_CHUNK;
use larkbridge_domain::{ChatTarget, LarkError, NotificationConfig, Result, TableHandle};

use crate::endpoint::EndpointCatalog;
use crate::ports::ApiTransport;
use crate::records::BulkRecordOperator;
use crate::services::{BotChatService, DocsService};

/// Transport, endpoint catalog and pacing bundled together.
///
/// Cloning is cheap; every field is shared.
#[derive(Clone)]
pub struct ApiContext {
    transport: Arc<dyn ApiTransport>,
    catalog: Arc<EndpointCatalog>,
    pacing: Arc<dyn PacingPolicy>,
    chunk_size: usize,
    notification: Arc<NotificationConfig>,
}

impl ApiContext {
    /// Context with a one second pause between chunks, full-size chunks and
    /// the default notifier identity.
    pub fn new(transport: Arc<dyn ApiTransport>, catalog: Arc<EndpointCatalog>) -> Self {
        Self {
            transport,
            catalog,
            pacing: Arc::new(FixedInterval::default()),
            chunk_size: MAX_RECORDS_PER_CHUNK,
            notification: Arc::new(NotificationConfig::default()),
        }
    }

    /// Replace the policy run between batch-create chunks.
    pub fn with_pacing(mut self, pacing: Arc<dyn PacingPolicy>) -> Self {
        self.pacing = pacing;
        self
    }

    /// # Errors
    /// `InvalidInput` unless `1 <= chunk_size <= 1000`.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Result<Self> {
        if !(1..=MAX_RECORDS_PER_CHUNK).contains(&chunk_size) {
            return Err(LarkError::InvalidInput(format!(
                "chunk size must be between 1 and {MAX_RECORDS_PER_CHUNK}, got {chunk_size}"
            )));
        }
        self.chunk_size = chunk_size;
        Ok(self)
    }

    /// Set the identity stamped into notification titles.
    pub fn with_notification(mut self, notification: NotificationConfig) -> Self {
        self.notification = Arc::new(notification);
        self
    }

    /// Transport every service call goes through.
    pub fn transport(&self) -> &dyn ApiTransport {
        self.transport.as_ref()
    }

    /// Endpoint templates used by [`Self::resolve`].
    pub fn catalog(&self) -> &EndpointCatalog {
        &self.catalog
    }

    /// Pause policy between batch-create chunks.
    pub fn pacing(&self) -> &dyn PacingPolicy {
        self.pacing.as_ref()
    }

    /// Records per batch-create request.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// App name and environment for notification titles.
    pub fn notification(&self) -> &NotificationConfig {
        &self.notification
    }

    /// # Errors
    /// See [`EndpointCatalog::resolve`].
    pub fn resolve(&self, action: &str, params: &[(&str, &str)]) -> Result<String> {
        self.catalog.resolve(action, params)
    }

    /// Entry point for folders and bases.
    pub fn use_docs(&self) -> DocsService {
        DocsService::new(self.clone())
    }

    /// Bot notifier addressing a group chat.
    pub fn use_bot_chat(&self, chat_id: impl Into<String>) -> BotChatService {
        self.bot_chat(ChatTarget::chat(chat_id))
    }

    /// Notifications to an arbitrary receiver.
    pub fn bot_chat(&self, target: ChatTarget) -> BotChatService {
        BotChatService::new(self.clone(), target)
    }

    /// Bulk record operations for `table`.
    pub fn records(&self, table: TableHandle) -> BulkRecordOperator {
        BulkRecordOperator::new(self.clone(), table)
    }
}

impl std::fmt::Debug for ApiContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiContext")
            .field("endpoints", &self.catalog.len())
            .field("pacing", &self.pacing.name())
            .field("chunk_size", &self.chunk_size)
            .field("notification", &self.notification)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use larkbridge_domain::ReceiveIdType;

    use super::*;
    use crate::testing::{context_with, RecordingTransport};

    #[test]
    fn chunk_size_must_be_within_api_limit() {
        let ctx = context_with(RecordingTransport::new());

        assert!(matches!(ctx.clone().with_chunk_size(0), Err(LarkError::InvalidInput(_))));
        assert!(matches!(ctx.clone().with_chunk_size(1001), Err(LarkError::InvalidInput(_))));
        assert_eq!(ctx.with_chunk_size(1000).unwrap().chunk_size(), 1000);
    }

    #[test]
    fn use_bot_chat_targets_chat_id() {
        let bot = context_with(RecordingTransport::new()).use_bot_chat("oc_1");

        assert_eq!(bot.target().receive_id_type, ReceiveIdType::ChatId);
        assert_eq!(bot.target().receive_id, "oc_1");
    }
}
