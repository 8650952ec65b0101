//! Configuration loader
//!
//! ## Loading Strategy
//! 1. Environment variables, when the required ones are present
//! 2. Otherwise the first config file found by [`probe_config_paths`]
//!
//! ## Environment Variables
//! - `ACCOUNTDESK_BACKEND_URL` (required): backend base URL
//! - `ACCOUNTDESK_BACKEND_ANON_KEY` (required): public API key
//! - `ACCOUNTDESK_IMAGE_PATH_PREFIX`: public image path appended to the URL
//! - `ACCOUNTDESK_BUCKET`: storage bucket for photos
//! - `ACCOUNTDESK_PROFILE_TABLE`: profile table name
//! - `ACCOUNTDESK_HTTP_TIMEOUT_SECS`: per-request timeout
//! - `ACCOUNTDESK_HTTP_MAX_ATTEMPTS`: attempts per request (1 = no retry)
//! - `ACCOUNTDESK_CACHE_PATH`: JSON file used as device-local storage
//!
//! ## File Locations
//! `accountdesk.toml`, `accountdesk.json`, `config.toml`, `config.json`, in
//! the working directory first and then next to the executable.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use accountdesk_domain::constants::{
    DEFAULT_IMAGE_PATH_PREFIX, DEFAULT_PHOTO_BUCKET, DEFAULT_PROFILE_TABLE,
};
use accountdesk_domain::{AccountDeskError, BackendConfig, CacheConfig, Config, HttpConfig, Result};

const CONFIG_FILE_NAMES: [&str; 4] =
    ["accountdesk.toml", "accountdesk.json", "config.toml", "config.json"];

/// Load configuration from the environment, falling back to a file.
///
/// # Errors
/// `AccountDeskError::Config` when neither source yields a valid
/// configuration.
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Environment configuration incomplete, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from `ACCOUNTDESK_*` environment variables.
///
/// Only the backend URL and key are required; everything else falls back to
/// its default.
///
/// # Errors
/// `AccountDeskError::Config` if a required variable is missing or a numeric
/// one does not parse.
pub fn load_from_env() -> Result<Config> {
    let url = env_var("ACCOUNTDESK_BACKEND_URL")?;
    let anon_key = env_var("ACCOUNTDESK_BACKEND_ANON_KEY")?;

    let http_defaults = HttpConfig::default();
    let http = HttpConfig {
        timeout_secs: env_parse("ACCOUNTDESK_HTTP_TIMEOUT_SECS", http_defaults.timeout_secs)?,
        max_attempts: env_parse("ACCOUNTDESK_HTTP_MAX_ATTEMPTS", http_defaults.max_attempts)?,
    };

    Ok(Config {
        backend: BackendConfig {
            url,
            anon_key,
            image_path_prefix: env_or("ACCOUNTDESK_IMAGE_PATH_PREFIX", DEFAULT_IMAGE_PATH_PREFIX),
            bucket: env_or("ACCOUNTDESK_BUCKET", DEFAULT_PHOTO_BUCKET),
            profile_table: env_or("ACCOUNTDESK_PROFILE_TABLE", DEFAULT_PROFILE_TABLE),
        },
        http,
        cache: CacheConfig {
            path: env_or("ACCOUNTDESK_CACHE_PATH", &CacheConfig::default().path),
        },
    })
}

/// Load configuration from a file.
///
/// With `path` set to `None` the standard locations are probed. The format
/// follows the file extension (`.toml` or `.json`).
///
/// # Errors
/// `AccountDeskError::Config` if the file is missing, unreadable, or does
/// not parse.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) if p.exists() => p,
        Some(p) => {
            return Err(AccountDeskError::Config(format!(
                "Config file not found: {}",
                p.display()
            )))
        }
        None => probe_config_paths().ok_or_else(|| {
            AccountDeskError::Config(
                "No config file found and ACCOUNTDESK_BACKEND_URL / ACCOUNTDESK_BACKEND_ANON_KEY are not set"
                    .to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| AccountDeskError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| AccountDeskError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| AccountDeskError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(AccountDeskError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// First existing config file, looking in the working directory and then
/// next to the executable.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }
    if let Some(exe_dir) =
        std::env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        dirs.push(exe_dir);
    }

    dirs.iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| {
            AccountDeskError::Config(format!("Missing required environment variable: {}", key))
        })
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).ok().filter(|v| !v.is_empty()).unwrap_or_else(|| default.to_string())
}

fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| AccountDeskError::Config(format!("Invalid value for {}: {}", key, e))),
        _ => Ok(default),
    }
}
