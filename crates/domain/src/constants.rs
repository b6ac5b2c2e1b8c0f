//! Gateway constants
//!
//! Centralized location for domain-level constants shared by the core and
//! infrastructure crates.

// Authentication
/// Tenant tokens are reused for one hour.
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 3600;
/// Lark international open API root.
pub const DEFAULT_BASE_URI: &str = "https://open.larksuite.com/open-apis/";

// Bulk record operations
/// Upper bound accepted by `batch_create`.
pub const MAX_RECORDS_PER_CHUNK: usize = 1000;
/// Pause between batch-create chunks.
pub const DEFAULT_BATCH_PAUSE_MS: u64 = 1000;
/// Drain result reported when the first listing carried no `items`.
pub const NOTHING_TO_DELETE: i64 = -1;

// Bitable
/// View created with a new table.
pub const DEFAULT_TABLE_VIEW_NAME: &str = "Grid";

// Messaging
/// `msg_type` of rich-text messages.
pub const POST_MESSAGE_TYPE: &str = "post";
/// Locale key wrapping post content.
pub const POST_CONTENT_LOCALE: &str = "zh_cn";
/// `error` field of a failed notification outcome.
pub const NOTIFICATION_FAILURE_ERROR: &str = "Failed to send notification";
/// App name used in titles when none is configured.
pub const DEFAULT_APP_NAME: &str = "larksuit";
/// Environment used in titles when none is configured.
pub const DEFAULT_APP_ENV: &str = "local";

// HTTP
/// Whole-request timeout.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
/// TCP and TLS connect timeout.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
