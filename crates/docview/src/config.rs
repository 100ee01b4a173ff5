use docview_core::cache::CacheOptions;
use docview_core::{DocsError, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Root configuration for docview.
///
/// Usually read from a JSON file. All fields use sensible defaults if not
/// specified.
///
/// # Examples
///
/// ```
/// use docview::config::DocviewConfig;
///
/// let json = r#"{
///     "content": { "origin": "https://docs.example.com" },
///     "cache": { "max_entries": 64 }
/// }"#;
///
/// let config = DocviewConfig::from_json(json).unwrap();
/// assert_eq!(config.content.origin, "https://docs.example.com");
/// assert_eq!(config.content.base_path, "/docs");
/// assert_eq!(config.cache.max_entries, 64);
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
pub struct DocviewConfig {
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

impl DocviewConfig {
    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns `DocsError::Json` for malformed JSON and
    /// `DocsError::InvalidConfig` for values that fail validation.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    /// Checks values that serde cannot check on its own.
    pub fn validate(&self) -> Result<()> {
        self.content.validate()?;

        if self.navigation.default_version.is_empty() || self.navigation.default_page.is_empty() {
            return Err(DocsError::InvalidConfig(
                "navigation defaults must not be empty".into(),
            ));
        }

        if self.cache.enabled && self.cache.max_entries == 0 {
            return Err(DocsError::InvalidConfig(
                "cache.max_entries must be positive when the cache is enabled".into(),
            ));
        }

        Ok(())
    }
}

/// Where markdown pages are served from.
///
/// A page lives at `{origin}{base_path}/{version}/{page}{extension}`.
///
/// # Defaults
///
/// - `origin`: `"http://localhost:8080"`
/// - `base_path`: `"/docs"`
/// - `extension`: `".md"`
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ContentConfig {
    #[serde(default = "default_origin")]
    pub origin: String,
    #[serde(default = "default_base_path")]
    pub base_path: String,
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            origin: default_origin(),
            base_path: default_base_path(),
            extension: default_extension(),
        }
    }
}

impl ContentConfig {
    fn validate(&self) -> Result<()> {
        ensure_http_origin(&self.origin)?;

        if !self.base_path.is_empty() && !self.base_path.starts_with('/') {
            return Err(DocsError::InvalidConfig(format!(
                "content.base_path must start with '/': {}",
                self.base_path
            )));
        }

        Ok(())
    }

    /// Path of a page relative to the origin.
    ///
    /// Version and page are percent-encoded, so a slug containing `#`, `?`
    /// or `%` still names a single resource.
    pub fn content_path(&self, version: &str, page: &str) -> String {
        format!(
            "{}/{}/{}{}",
            self.base_path.trim_end_matches('/'),
            urlencoding::encode(version),
            urlencoding::encode(page),
            self.extension
        )
    }

    /// Absolute URL of a page.
    pub fn content_url(&self, version: &str, page: &str) -> String {
        format!(
            "{}{}",
            self.origin.trim_end_matches('/'),
            self.content_path(version, page)
        )
    }
}

/// Validates that the origin is an absolute http(s) URL without a path.
fn ensure_http_origin(origin: &str) -> Result<()> {
    let rest = origin
        .strip_prefix("https://")
        .or_else(|| origin.strip_prefix("http://"))
        .ok_or_else(|| DocsError::InvalidUrl(format!("origin must use http(s): {}", origin)))?;

    let host = rest.trim_end_matches('/');
    if host.is_empty() || host.contains('/') {
        return Err(DocsError::InvalidUrl(format!(
            "origin must be scheme and host only: {}",
            origin
        )));
    }

    Ok(())
}

/// Route names and fallback targets used by navigation.
///
/// # Defaults
///
/// - `route_name`: `"docs-versioned"`
/// - `default_version`: `"1.x"`
/// - `default_page`: `"home"`
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct NavigationConfig {
    #[serde(default = "default_route_name")]
    pub route_name: String,
    #[serde(default = "default_version")]
    pub default_version: String,
    #[serde(default = "default_page")]
    pub default_page: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            route_name: default_route_name(),
            default_version: default_version(),
            default_page: default_page(),
        }
    }
}

/// Configuration for the content cache.
///
/// # Defaults
///
/// - `enabled`: `true`
/// - `max_entries`: `256`
/// - `ttl_secs`: `300` (5 minutes)
/// - `request_timeout_secs`: `30`
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CacheConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_entries: default_max_entries(),
            ttl_secs: default_ttl_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl From<&CacheConfig> for CacheOptions {
    fn from(config: &CacheConfig) -> Self {
        Self {
            enabled: config.enabled,
            max_entries: config.max_entries,
            ttl: Duration::from_secs(config.ttl_secs),
            request_timeout: Duration::from_secs(config.request_timeout_secs),
        }
    }
}

// Default value functions
const fn default_true() -> bool {
    true
}

fn default_origin() -> String {
    "http://localhost:8080".to_string()
}

fn default_base_path() -> String {
    "/docs".to_string()
}

fn default_extension() -> String {
    ".md".to_string()
}

fn default_route_name() -> String {
    "docs-versioned".to_string()
}

fn default_version() -> String {
    "1.x".to_string()
}

fn default_page() -> String {
    "home".to_string()
}

const fn default_max_entries() -> usize {
    256
}

const fn default_ttl_secs() -> u64 {
    300 // 5 minutes
}

const fn default_request_timeout_secs() -> u64 {
    30
}
