//! App credentials

use std::fmt;

use serde::{Deserialize, Serialize};

/// Application credentials exchanged for a tenant access token.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Application id (`cli_...`).
    pub app_id: String,
    /// Application secret. Never logged.
    pub app_secret: String,
}

impl Credentials {
    /// Credentials from id and secret.
    pub fn new(app_id: impl Into<String>, app_secret: impl Into<String>) -> Self {
        Self { app_id: app_id.into(), app_secret: app_secret.into() }
    }

    /// Both halves must be present for the auth endpoint to accept them.
    pub fn is_complete(&self) -> bool {
        !self.app_id.trim().is_empty() && !self.app_secret.trim().is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("app_id", &self.app_id)
            .field("app_secret", &"<redacted>")
            .finish()
    }
}
