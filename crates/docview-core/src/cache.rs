use crate::error::{DocsError, LoadError, Result};
use dashmap::DashMap;
use reqwest::Client;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::OnceCell;

/// Default maximum number of cached pages.
pub const DEFAULT_MAX_ENTRIES: usize = 256;

/// Default lifetime of a cached outcome.
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Default timeout applied to every content request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Result of fetching one page: the markdown text or the user-facing error.
///
/// The text is wrapped in `Arc` so cache hits share the buffer.
pub type FetchOutcome = std::result::Result<Arc<str>, LoadError>;

/// Tuning knobs for [`ContentCache`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheOptions {
    /// When `false`, every call goes to the network and nothing is stored.
    pub enabled: bool,
    pub max_entries: usize,
    pub ttl: Duration,
    pub request_timeout: Duration,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            max_entries: DEFAULT_MAX_ENTRIES,
            ttl: DEFAULT_TTL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// One memoized URL. The cell is shared by every caller that asks for the
/// URL while the entry lives, so concurrent callers wait on one request.
struct CacheEntry {
    cell: Arc<OnceCell<FetchOutcome>>,
    created_at: Instant,
}

impl CacheEntry {
    fn new() -> Self {
        Self {
            cell: Arc::new(OnceCell::new()),
            created_at: Instant::now(),
        }
    }

    /// In-flight entries never expire, otherwise a slow request would be
    /// issued twice.
    fn is_expired(&self, ttl: Duration) -> bool {
        self.cell.initialized() && self.created_at.elapsed() >= ttl
    }
}

/// Memoizing HTTP fetcher for markdown pages.
///
/// Keyed by the full URL. Every outcome is cached, including not-found
/// responses and transport failures, until the entry expires or is evicted.
/// The cache is bounded: entries older than the TTL are refetched and the
/// oldest entries are evicted once `max_entries` is reached.
///
/// # Examples
///
/// ```no_run
/// use docview_core::cache::{CacheOptions, ContentCache};
///
/// # async fn example() -> docview_core::error::Result<()> {
/// let cache = ContentCache::new(CacheOptions::default())?;
///
/// // First call fetches from the network
/// let first = cache.fetch_text("http://localhost:8080/docs/1.x/home.md").await;
///
/// // Second call is served from the cache
/// let second = cache.fetch_text("http://localhost:8080/docs/1.x/home.md").await;
/// assert_eq!(first, second);
/// # Ok(())
/// # }
/// ```
pub struct ContentCache {
    entries: DashMap<String, CacheEntry>,
    client: Client,
    options: CacheOptions,
}

impl ContentCache {
    /// Creates a cache with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns `DocsError::HttpClient` if the client cannot be built.
    pub fn new(options: CacheOptions) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("docview/", env!("CARGO_PKG_VERSION")))
            .timeout(options.request_timeout)
            .build()
            .map_err(|source| DocsError::HttpClient { source })?;

        Ok(Self::with_client(client, options))
    }

    /// Creates a cache around an existing client.
    pub fn with_client(client: Client, options: CacheOptions) -> Self {
        Self {
            entries: DashMap::new(),
            client,
            options,
        }
    }

    pub fn options(&self) -> &CacheOptions {
        &self.options
    }

    /// Returns the page at `url`, issuing at most one request per live entry.
    ///
    /// Never fails: HTTP statuses at or above 400 become
    /// `LoadError::NotFound`, and connection or body errors become
    /// `LoadError::TransportFailure`.
    pub async fn fetch_text(&self, url: &str) -> FetchOutcome {
        if !self.options.enabled {
            return self.fetch(url).await;
        }

        let cell = self.slot(url);
        if cell.initialized() {
            tracing::debug!("cache hit: {}", url);
        }

        cell.get_or_init(|| self.fetch(url)).await.clone()
    }

    /// Returns the shared cell for `url`, replacing it when expired.
    fn slot(&self, url: &str) -> Arc<OnceCell<FetchOutcome>> {
        // Must not hold a shard lock here: len() and eviction lock every shard.
        if !self.entries.contains_key(url) && self.entries.len() >= self.options.max_entries {
            self.evict_entries();
        }

        let mut entry = self
            .entries
            .entry(url.to_string())
            .or_insert_with(CacheEntry::new);

        if entry.is_expired(self.options.ttl) {
            tracing::debug!("cache entry expired: {}", url);
            *entry = CacheEntry::new();
        }

        Arc::clone(&entry.cell)
    }

    async fn fetch(&self, url: &str) -> FetchOutcome {
        tracing::debug!("fetching fresh: {}", url);

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("request failed for {}: {}", url, e);
                return Err(LoadError::TransportFailure);
            }
        };

        let status = response.status();
        if status.as_u16() >= 400 {
            tracing::debug!("HTTP {} for {}", status, url);
            return Err(LoadError::NotFound);
        }

        match response.text().await {
            Ok(body) => Ok(Arc::from(body)),
            Err(e) => {
                tracing::warn!("failed to read body of {}: {}", url, e);
                Err(LoadError::TransportFailure)
            }
        }
    }

    /// Drops the cached outcome for one URL.
    pub fn invalidate(&self, url: &str) -> bool {
        self.entries.remove(url).is_some()
    }

    /// Clears all cached entries.
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Returns the number of cached entries, including in-flight ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the cache contains no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Evicts expired entries, then the oldest ~10% if still at capacity.
    ///
    /// In-flight entries are never evicted: a caller arriving later must
    /// join the pending request instead of issuing a second one. While
    /// every entry is in flight the cache may briefly exceed `max_entries`.
    fn evict_entries(&self) {
        let ttl = self.options.ttl;
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(ttl));

        let max_entries = self.options.max_entries;
        if self.entries.len() >= max_entries {
            let target_removals = (max_entries / 10).max(1);

            let mut by_age: Vec<(String, Instant)> = self
                .entries
                .iter()
                .filter(|entry| entry.value().cell.initialized())
                .map(|entry| (entry.key().clone(), entry.value().created_at))
                .collect();
            by_age.sort_by_key(|(_, created_at)| *created_at);

            for (url, _) in by_age.iter().take(target_removals) {
                self.entries.remove(url);
            }
        }

        tracing::debug!(
            "evicted {} cache entries",
            before.saturating_sub(self.entries.len())
        );
    }
}
