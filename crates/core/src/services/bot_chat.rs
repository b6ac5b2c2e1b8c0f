//! Bot chat notifications

use larkbridge_domain::constants::{
    NOTIFICATION_FAILURE_ERROR, POST_CONTENT_LOCALE, POST_MESSAGE_TYPE,
};
use larkbridge_domain::{
    ChatTarget, LarkError, NotificationLevel, NotificationOutcome, PostContent, Result,
};
use serde_json::{json, Value};
use tracing::{error, instrument};

use crate::context::ApiContext;
use crate::endpoint::actions;
use crate::notification::{build_post_content, notification_title, ErrorReport};

/// Sends leveled notifications to a chat as rich-text posts.
///
/// Sending is best effort: failures are logged and returned as
/// [`NotificationOutcome::Failed`], never as an error.
#[derive(Debug, Clone)]
pub struct BotChatService {
    ctx: ApiContext,
    target: ChatTarget,
}

impl BotChatService {
    /// Service sending to `target`.
    pub fn new(ctx: ApiContext, target: ChatTarget) -> Self {
        Self { ctx, target }
    }

    /// Receiver of every notification.
    pub fn target(&self) -> &ChatTarget {
        &self.target
    }

    /// Error notification, with exception blocks when `cause` is given.
    pub async fn send_error_notification(
        &self,
        kind: &str,
        message: &str,
        cause: Option<&ErrorReport>,
    ) -> NotificationOutcome {
        self.send(NotificationLevel::Error, kind, message, cause, None).await
    }

    /// Warning notification with an optional context dump.
    pub async fn send_warning_notification(
        &self,
        kind: &str,
        message: &str,
        context: Option<&Value>,
    ) -> NotificationOutcome {
        self.send(NotificationLevel::Warning, kind, message, None, context).await
    }

    /// Info notification with an optional context dump.
    pub async fn send_info_notification(
        &self,
        kind: &str,
        message: &str,
        context: Option<&Value>,
    ) -> NotificationOutcome {
        self.send(NotificationLevel::Info, kind, message, None, context).await
    }

    #[instrument(skip(self, message, cause, context), fields(receive_id = %self.target.receive_id))]
    async fn send(
        &self,
        level: NotificationLevel,
        kind: &str,
        message: &str,
        cause: Option<&ErrorReport>,
        context: Option<&Value>,
    ) -> NotificationOutcome {
        let identity = self.ctx.notification();
        let title = notification_title(&identity.app_name, &identity.app_env, kind, level);
        let post = build_post_content(title, level, message, cause, context);

        let payload = match self.payload(&post) {
            Ok(payload) => payload,
            Err(err) => return failed(&err),
        };

        let id_type = self.target.receive_id_type.as_str();
        let params = [("receive_id_type", id_type)];
        let endpoint = match self.ctx.resolve(actions::SEND_MESSAGE, &params) {
            Ok(endpoint) => endpoint,
            Err(err) => {
                error!(payload = %payload, error = %err, "Failed to send Lark notification");
                return failed(&err);
            }
        };

        match self.ctx.transport().post(&endpoint, &payload).await {
            Ok(response) => NotificationOutcome::Delivered(response),
            Err(err) => {
                error!(
                    endpoint = %endpoint,
                    payload = %payload,
                    error = %err,
                    error_type = err.label(),
                    "Failed to send Lark notification"
                );
                failed(&err)
            }
        }
    }

    fn payload(&self, post: &PostContent) -> Result<Value> {
        let content = serde_json::to_string(&json!({ POST_CONTENT_LOCALE: post }))
            .map_err(|e| LarkError::InvalidInput(format!("unserializable post content: {e}")))?;
        Ok(json!({
            "receive_id": self.target.receive_id,
            "msg_type": POST_MESSAGE_TYPE,
            "content": content,
        }))
    }
}

fn failed(err: &LarkError) -> NotificationOutcome {
    NotificationOutcome::Failed {
        error: NOTIFICATION_FAILURE_ERROR.to_string(),
        message: err.to_string(),
    }
}
