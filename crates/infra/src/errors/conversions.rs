//! Conversions from external infrastructure errors into domain errors.

use larkbridge_domain::LarkError;
use reqwest::header::InvalidHeaderValue;
use reqwest::Error as HttpError;
use serde_json::Error as JsonError;
use thiserror::Error;
use url::ParseError as UrlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct InfraError(pub LarkError);

impl From<InfraError> for LarkError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<LarkError> for InfraError {
    fn from(value: LarkError) -> Self {
        InfraError(value)
    }
}

trait IntoLarkError {
    fn into_lark(self) -> LarkError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → LarkError */
/* -------------------------------------------------------------------------- */

impl IntoLarkError for HttpError {
    fn into_lark(self) -> LarkError {
        if self.is_timeout() {
            return LarkError::Transport(format!("HTTP request timed out: {self}"));
        }

        if self.is_connect() {
            return LarkError::Transport(format!("HTTP connection failure: {self}"));
        }

        if self.is_decode() {
            return LarkError::Transport(format!("failed to read response body: {self}"));
        }

        if self.is_builder() {
            return LarkError::Config(format!("invalid HTTP request: {self}"));
        }

        LarkError::Transport(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_lark())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → LarkError */
/* -------------------------------------------------------------------------- */

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(LarkError::Transport(format!("response is not valid JSON: {value}")))
    }
}

/* -------------------------------------------------------------------------- */
/* Configuration-time failures */
/* -------------------------------------------------------------------------- */

impl From<UrlError> for InfraError {
    fn from(value: UrlError) -> Self {
        InfraError(LarkError::Config(format!("invalid URL: {value}")))
    }
}

impl From<InvalidHeaderValue> for InfraError {
    fn from(value: InvalidHeaderValue) -> Self {
        InfraError(LarkError::Authentication(format!("token is not a valid header value: {value}")))
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
