//! Resource services: thin wrappers that resolve one endpoint and forward
//! one verb through the context's transport.

pub mod base;
pub mod bot_chat;
pub mod docs;
pub mod folder;
pub mod table;

pub use base::BaseService;
pub use bot_chat::BotChatService;
pub use docs::DocsService;
pub use folder::FolderService;
pub use table::TableService;
