//! # Larkbridge Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - reqwest-based HTTP client
//! - Tenant token issuer, auth session and authenticated transport
//! - The `LarkClient` facade
//! - Configuration loading and tracing setup
//!
//! ## Architecture
//! - Implements traits defined in `larkbridge-core`
//! - Contains all "impure" code (network, environment, files)

pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod observability;

// Re-export commonly used items
pub use api::{AuthSession, AuthenticatedTransport, LarkClient, TenantTokenIssuer};
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
