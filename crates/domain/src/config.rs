//! Configuration management

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CACHE_PATH, DEFAULT_HTTP_MAX_ATTEMPTS, DEFAULT_HTTP_TIMEOUT_SECS,
    DEFAULT_IMAGE_PATH_PREFIX, DEFAULT_PHOTO_BUCKET, DEFAULT_PROFILE_TABLE,
};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub backend: BackendConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Hosted backend endpoints and credentials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL, e.g. `https://project.example.co`
    pub url: String,
    /// Public API key sent as `apikey` and as the default bearer token
    #[serde(skip_serializing)]
    pub anon_key: String,
    #[serde(default = "default_image_path_prefix")]
    pub image_path_prefix: String,
    #[serde(default = "default_bucket")]
    pub bucket: String,
    #[serde(default = "default_profile_table")]
    pub profile_table: String,
}

impl BackendConfig {
    /// Base that object identifiers are appended to when composing a photo
    /// URL. Plain concatenation, no separator handling.
    pub fn photo_url_base(&self) -> String {
        format!("{}{}", self.url, self.image_path_prefix)
    }
}

/// HTTP transport configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    /// Total attempts per request (initial try + retries)
    pub max_attempts: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS, max_attempts: DEFAULT_HTTP_MAX_ATTEMPTS }
    }
}

/// Device-local storage configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    pub path: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { path: DEFAULT_CACHE_PATH.to_string() }
    }
}

fn default_image_path_prefix() -> String {
    DEFAULT_IMAGE_PATH_PREFIX.to_string()
}

fn default_bucket() -> String {
    DEFAULT_PHOTO_BUCKET.to_string()
}

fn default_profile_table() -> String {
    DEFAULT_PROFILE_TABLE.to_string()
}
