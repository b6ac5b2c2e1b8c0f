//! Error types used throughout the gateway

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Larkbridge
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum LarkError {
    /// No endpoint template is registered under the requested action key.
    #[error("URL pattern for {0} does not exist")]
    UnknownAction(String),

    /// A supplied parameter has no matching placeholder in the template.
    #[error("Placeholder not found in URL pattern: {0}")]
    MissingPlaceholder(String),

    /// A declared placeholder was left without a value.
    #[error("Placeholder left unresolved in URL pattern: {0}")]
    UnresolvedPlaceholder(String),

    /// Template text could not be parsed into segments.
    #[error("Malformed URL pattern: {0}")]
    MalformedTemplate(String),

    /// Tenant token could not be obtained or used.
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Network failure or undecodable response.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Invalid or missing configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Caller supplied an unusable argument.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl LarkError {
    /// Stable label suitable for structured log fields.
    #[inline]
    pub fn label(&self) -> &'static str {
        match self {
            Self::UnknownAction(_) => "unknown_action",
            Self::MissingPlaceholder(_) => "missing_placeholder",
            Self::UnresolvedPlaceholder(_) => "unresolved_placeholder",
            Self::MalformedTemplate(_) => "malformed_template",
            Self::Authentication(_) => "authentication",
            Self::Transport(_) => "transport",
            Self::Config(_) => "config",
            Self::InvalidInput(_) => "invalid_input",
        }
    }

    /// Endpoint resolution failures are programmer errors and never worth
    /// retrying; transport failures might be.
    pub fn is_resolution_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownAction(_)
                | Self::MissingPlaceholder(_)
                | Self::UnresolvedPlaceholder(_)
                | Self::MalformedTemplate(_)
        )
    }
}

/// Result type alias for gateway operations
pub type Result<T> = std::result::Result<T, LarkError>;
