//! Configuration loader
//!
//! Loads gateway configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. Loads a `.env` file into the environment if one exists
//! 2. Attempts to load from environment variables
//! 3. If the credentials are not in the environment, falls back to a file
//! 4. Probes multiple paths for config files
//! 5. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `LARK_APP_ID`: Application id (required)
//! - `LARK_APP_SECRET`: Application secret (required)
//! - `LARK_BASE_URI`: Open API base URI
//! - `LARK_APP_NAME`: Name shown in notification titles (falls back to `APP_NAME`)
//! - `LARK_APP_ENV`: Environment shown in notification titles (falls back to `APP_ENV`)
//! - `LARK_TOKEN_TTL_SECS`: Tenant token lifetime in seconds
//! - `LARK_BATCH_PAUSE_MS`: Pause between batch-create chunks
//! - `LARK_BATCH_CHUNK_SIZE`: Records per batch-create request (1..=1000)
//! - `LARK_HTTP_TIMEOUT_SECS`: Request timeout in seconds
//! - `LARK_HTTP_SYSTEM_PROXY`: `false` to ignore `HTTP(S)_PROXY`
//!
//! The notification identity variables also override values read from a
//! config file.
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./lark.{json,toml}` or `./config.{json,toml}` (current working
//!    directory)
//! 2. The same names in the parent and grandparent directories
//! 3. The same names next to the executable

use std::path::{Path, PathBuf};
use std::str::FromStr;

use larkbridge_domain::{
    AuthConfig, BulkConfig, Credentials, HttpConfig, LarkConfig, LarkError, NotificationConfig,
    Result,
};
use url::Url;

const CONFIG_FILE_NAMES: &[&str] = &["lark.json", "lark.toml", "config.json", "config.toml"];

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If the credentials
/// are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `LarkError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - A value fails validation
pub fn load() -> Result<LarkConfig> {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!(path = %path.display(), "Loaded .env file");
    }

    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// `LARK_APP_ID` and `LARK_APP_SECRET` must be present; every other
/// variable falls back to its default.
///
/// # Errors
/// Returns `LarkError::Config` if required variables are missing
/// or have invalid values.
pub fn load_from_env() -> Result<LarkConfig> {
    let credentials = Credentials::new(env_var("LARK_APP_ID")?, env_var("LARK_APP_SECRET")?);
    let defaults = LarkConfig::new(credentials.clone());

    let config = LarkConfig {
        credentials,
        base_uri: env_or("LARK_BASE_URI", defaults.base_uri)?,
        auth: AuthConfig {
            token_ttl_secs: env_or("LARK_TOKEN_TTL_SECS", defaults.auth.token_ttl_secs)?,
        },
        bulk: BulkConfig {
            pause_ms: env_or("LARK_BATCH_PAUSE_MS", defaults.bulk.pause_ms)?,
            chunk_size: env_or("LARK_BATCH_CHUNK_SIZE", defaults.bulk.chunk_size)?,
        },
        http: HttpConfig {
            timeout_secs: env_or("LARK_HTTP_TIMEOUT_SECS", defaults.http.timeout_secs)?,
            system_proxy: env_or("LARK_HTTP_SYSTEM_PROXY", defaults.http.system_proxy)?,
            ..defaults.http
        },
        notification: notification_from_env(defaults.notification),
    };

    validate(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `LarkError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - A value fails validation
pub fn load_from_file(path: Option<PathBuf>) -> Result<LarkConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(LarkError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            LarkError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| LarkError::Config(format!("Failed to read config file: {}", e)))?;

    let mut config = parse_config(&contents, &config_path)?;
    config.notification = notification_from_env(config.notification);
    validate(config)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
///
/// # Errors
/// Returns `LarkError::Config` if format is invalid or parsing fails.
fn parse_config(contents: &str, path: &Path) -> Result<LarkConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| LarkError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| LarkError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(LarkError::Config(format!("Unsupported config format: {}", extension))),
    }
}

fn validate(config: LarkConfig) -> Result<LarkConfig> {
    config.validate()?;
    parse_base_uri(&config.base_uri)?;
    Ok(config)
}

/// Parse and check the open API base URI.
///
/// # Errors
/// Returns `LarkError::Config` unless `raw` is an absolute `http(s)` URL.
pub fn parse_base_uri(raw: &str) -> Result<Url> {
    let url = Url::parse(raw)
        .map_err(|e| LarkError::Config(format!("Invalid base URI '{}': {}", raw, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(LarkError::Config(format!("Unsupported base URI scheme: {}", other))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches for config files in the following locations (in order):
/// 1. Current working directory
/// 2. Parent directories (up to 2 levels)
/// 3. Relative to executable location
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.extend([cwd.clone(), cwd.join(".."), cwd.join("../..")]);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            dirs.push(exe_dir.to_path_buf());
        }
    }

    dirs.iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
}

/// Get required environment variable
///
/// # Errors
/// Returns `LarkError::Config` if the variable is not set or empty.
fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| LarkError::Config(format!("Missing required environment variable: {}", key)))
}

/// First non-blank value among `keys`.
fn first_env(keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| std::env::var(key).ok())
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

/// Notification identity with `LARK_APP_*`, then `APP_*`, taking precedence
/// over `base`.
fn notification_from_env(base: NotificationConfig) -> NotificationConfig {
    NotificationConfig {
        app_name: first_env(&["LARK_APP_NAME", "APP_NAME"]).unwrap_or(base.app_name),
        app_env: first_env(&["LARK_APP_ENV", "APP_ENV"]).unwrap_or(base.app_env),
    }
}

/// Parse an optional environment variable, falling back to `default`.
///
/// # Errors
/// Returns `LarkError::Config` if the variable is set but does not parse.
fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map_err(|e| LarkError::Config(format!("Invalid value for {}: {}", key, e))),
        _ => Ok(default),
    }
}
