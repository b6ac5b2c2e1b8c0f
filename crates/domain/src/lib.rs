//! # Larkbridge Domain
//!
//! Domain types and models for the Lark gateway.
//!
//! This crate contains:
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Credentials, tokens, record pages, resource handles, post content
//! - Domain constants
//!
//! ## Architecture
//! - No dependencies on other Larkbridge crates
//! - Only external dependencies allowed

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
