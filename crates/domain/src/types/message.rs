//! Rich-text ("post") message content and notification outcomes

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::impl_wire_enum_conversions;

/// Element kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostTag {
    /// Plain text, optionally styled.
    Text,
    /// Markdown.
    Md,
}

/// Inline text style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextStyle {
    /// Bold.
    Bold,
    /// Italic.
    Italic,
}

/// One inline element of a post paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostElement {
    /// Element kind.
    pub tag: PostTag,
    /// Text or markdown source.
    pub text: String,
    /// Styles for text elements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Vec<TextStyle>>,
}

impl PostElement {
    /// Unstyled text.
    pub fn text(text: impl Into<String>) -> Self {
        Self { tag: PostTag::Text, text: text.into(), style: None }
    }

    /// Text with one style.
    pub fn styled(text: impl Into<String>, style: TextStyle) -> Self {
        Self { tag: PostTag::Text, text: text.into(), style: Some(vec![style]) }
    }

    /// Markdown element.
    pub fn markdown(text: impl Into<String>) -> Self {
        Self { tag: PostTag::Md, text: text.into(), style: None }
    }
}

/// One line of a post.
pub type PostParagraph = Vec<PostElement>;

/// Title plus paragraphs for a single locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostContent {
    /// Post title.
    pub title: String,
    /// Paragraphs in display order.
    pub content: Vec<PostParagraph>,
}

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationLevel {
    /// Failure, may carry exception details.
    Error,
    /// Degraded but working.
    Warning,
    /// Informational.
    Info,
}

impl_wire_enum_conversions!(NotificationLevel {
    Error => "error",
    Warning => "warning",
    Info => "info",
});

impl NotificationLevel {
    /// Capitalized form used in titles and block headings.
    pub const fn heading(&self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::Warning => "Warning",
            Self::Info => "Info",
        }
    }
}

/// Result of a best-effort notification send.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NotificationOutcome {
    /// Send failed.
    Failed {
        /// Always `"Failed to send notification"`.
        error: String,
        /// Display text of the underlying error.
        message: String,
    },
    /// Decoded API response.
    Delivered(Value),
}

impl NotificationOutcome {
    /// Whether the API accepted the request.
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered(_))
    }
}
