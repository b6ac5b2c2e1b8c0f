//! Authenticated access to the Lark open platform
//!
//! - [`auth`]: exchanges app credentials for a tenant access token
//! - [`session`]: caches the token and rebuilds the transport on refresh
//! - [`transport`]: bearer-authenticated JSON transport
//! - [`client`]: [`LarkClient`] facade wiring the above into an `ApiContext`

pub mod auth;
pub mod client;
pub mod session;
pub mod transport;

pub use auth::TenantTokenIssuer;
pub use client::LarkClient;
pub use session::AuthSession;
pub use transport::AuthenticatedTransport;
