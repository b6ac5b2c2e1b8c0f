//! Rich-text notification formatting
//!
//! Builds the `post` message body sent by [`crate::services::BotChatService`].
//! Paragraph order is fixed: the level message first, then either exception
//! details (errors) or a context dump (warnings and info).

use std::error::Error;

use larkbridge_domain::{NotificationLevel, PostContent, PostElement, PostParagraph, TextStyle};
use serde_json::Value;

/// Description of a failure attached to an error notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    /// Fully qualified type of the error.
    pub type_name: String,
    /// `Display` output of the error.
    pub message: String,
    /// Rendered cause chain, one `#N cause` per line.
    pub trace: String,
}

impl ErrorReport {
    /// Report from already formatted parts.
    pub fn new(
        type_name: impl Into<String>,
        message: impl Into<String>,
        trace: impl Into<String>,
    ) -> Self {
        Self { type_name: type_name.into(), message: message.into(), trace: trace.into() }
    }

    /// Capture type, message and `source()` chain of `err`.
    ///
    /// Trait objects are accepted; their type name is the trait object's.
    pub fn from_error<E: Error + ?Sized + 'static>(err: &E) -> Self {
        let mut trace = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            trace.push(format!("#{} {}", trace.len(), cause));
            source = cause.source();
        }

        Self {
            type_name: std::any::type_name::<E>().to_string(),
            message: err.to_string(),
            trace: trace.join("\n"),
        }
    }
}

/// `"{App} Notification | {env} | {kind} | {Level}"`, app name capitalized.
pub fn notification_title(
    app_name: &str,
    app_env: &str,
    kind: &str,
    level: NotificationLevel,
) -> String {
    format!("{} Notification | {app_env} | {kind} | {}", capitalize(app_name), level.heading())
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn labelled(label: &str, value: PostElement) -> PostParagraph {
    vec![PostElement::styled(label, TextStyle::Bold), value]
}

fn code_block(body: &str) -> PostElement {
    PostElement::markdown(format!("```\n{body}\n```"))
}

fn has_context(context: Option<&Value>) -> Option<&Value> {
    context.filter(|value| match value {
        Value::Null => false,
        Value::Object(map) => !map.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::String(text) => !text.is_empty(),
        _ => true,
    })
}

/// Assemble title and paragraphs for one notification.
pub fn build_post_content(
    title: String,
    level: NotificationLevel,
    message: &str,
    cause: Option<&ErrorReport>,
    context: Option<&Value>,
) -> PostContent {
    let mut content =
        vec![labelled(&format!("{} Message: ", level.heading()), PostElement::text(message))];

    if let Some(report) = cause {
        content.push(labelled(
            "Exception Type: ",
            PostElement::styled(report.type_name.as_str(), TextStyle::Italic),
        ));
        content.push(labelled("Exception Message: ", PostElement::text(report.message.as_str())));
        content.push(labelled("Stack Trace: ", code_block(&report.trace)));
    }

    if let Some(context) = has_context(context) {
        let pretty = serde_json::to_string_pretty(context).unwrap_or_else(|_| context.to_string());
        content.push(labelled("Context: ", code_block(&pretty)));
    }

    PostContent { title, content }
}
