//! # Larkbridge Core
//!
//! Gateway logic over ports - no HTTP or configuration code.
//!
//! This crate contains:
//! - Endpoint resolution (`endpoint`)
//! - Port interfaces (`ports`)
//! - The shared `ApiContext` and resource services
//! - Bulk record operations and notification formatting
//!
//! ## Architecture Principles
//! - Depends only on `larkbridge-common` and `larkbridge-domain`
//! - All remote calls go through [`ports::ApiTransport`]

pub mod context;
pub mod endpoint;
pub mod notification;
pub mod ports;
pub mod records;
pub mod services;

#[cfg(test)]
mod testing;

pub use context::ApiContext;
pub use endpoint::{actions, EndpointCatalog, EndpointTemplate};
pub use notification::ErrorReport;
pub use ports::{ApiTransport, TokenIssuer};
pub use records::{BulkRecordOperator, DrainOutcome};
pub use services::{BaseService, BotChatService, DocsService, FolderService, TableService};
