//! Domain types and models

pub mod credentials;
pub mod handles;
pub mod message;
pub mod records;
pub mod token;

pub use credentials::Credentials;
pub use handles::{BaseHandle, ChatTarget, FolderHandle, ReceiveIdType, TableHandle};
pub use message::{
    NotificationLevel, NotificationOutcome, PostContent, PostElement, PostParagraph, PostTag,
    TextStyle,
};
pub use records::{PageResult, Record, RecordItem};
pub use token::AccessToken;
