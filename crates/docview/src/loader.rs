//! Content loading for the current documentation page.
//!
//! A load selects the version, document and page in the shared state,
//! fetches the markdown through the content cache and applies the outcome.
//!
//! # Error Handling
//!
//! Fetch failures never reach the caller. A status of 400 or above becomes
//! `LoadError::NotFound` and anything else that prevents a response becomes
//! `LoadError::TransportFailure`; both are stored in the state. An unknown
//! version or page is not an error at all: the state simply holds `None`.

use crate::config::{ContentConfig, DocviewConfig};
use crate::state::DocContext;
use crate::viewport::Viewport;
use docview_core::{ContentCache, DocumentRegistry, resolve_page};
use std::sync::Arc;

/// Loads markdown pages into a [`DocContext`].
pub struct ContentLoader {
    context: Arc<DocContext>,
    registry: Arc<dyn DocumentRegistry>,
    cache: Arc<ContentCache>,
    viewport: Arc<dyn Viewport>,
    content: ContentConfig,
    default_version: String,
}

impl ContentLoader {
    pub fn new(
        config: &DocviewConfig,
        context: Arc<DocContext>,
        registry: Arc<dyn DocumentRegistry>,
        cache: Arc<ContentCache>,
        viewport: Arc<dyn Viewport>,
    ) -> Self {
        Self {
            context,
            registry,
            cache,
            viewport,
            content: config.content.clone(),
            default_version: config.navigation.default_version.clone(),
        }
    }

    pub fn context(&self) -> &Arc<DocContext> {
        &self.context
    }

    pub fn registry(&self) -> &Arc<dyn DocumentRegistry> {
        &self.registry
    }

    pub fn cache(&self) -> &Arc<ContentCache> {
        &self.cache
    }

    /// Path of a page relative to the content origin, e.g. `/docs/1.x/home.md`.
    pub fn content_path(&self, version: &str, page: &str) -> String {
        self.content.content_path(version, page)
    }

    /// Loads `page` of `version` and publishes the result.
    ///
    /// State changes, in order: loading is set, the version, document and
    /// page are selected, previous error and markdown are cleared; after
    /// the fetch the markdown or error is stored, loading is cleared and
    /// the viewport is scrolled to the origin.
    ///
    /// If another load starts before this one finishes, this one's result
    /// is discarded.
    pub async fn load_document(&self, version: &str, page: &str) {
        let url = self.content.content_url(version, page);

        let document = self.registry.find(version).cloned();
        let section = document
            .as_ref()
            .and_then(|doc| resolve_page(doc, Some(page)))
            .cloned();

        if document.is_none() {
            tracing::debug!("no document registered for version {}", version);
        } else if section.is_none() {
            tracing::debug!("page {} not found in version {}", page, version);
        }

        let generation = self.context.begin_load(|state| {
            state.loading = true;
            state.version = Some(version.to_string());
            state.document = document;
            state.page = section;
            state.error = None;
            state.markdown = None;
        });

        tracing::info!("loading {} (generation {})", url, generation);
        let outcome = self.cache.fetch_text(&url).await;

        let applied = self.context.finish_load(generation, |state| {
            match outcome {
                Ok(markdown) => state.markdown = Some(markdown.to_string()),
                Err(error) => {
                    tracing::warn!("failed to load {}: {}", url, error);
                    state.error = Some(error);
                }
            }
            state.loading = false;
        });

        if applied {
            self.viewport.scroll_to(0, 0);
        } else {
            tracing::debug!(
                "discarding result of {} (generation {} superseded)",
                url,
                generation
            );
        }
    }

    /// Builds the link for a section of the current version.
    ///
    /// Falls back to the default version before anything was loaded.
    pub fn build_section_url(&self, section_url: &str) -> String {
        let version = self
            .context
            .current_version()
            .unwrap_or_else(|| self.default_version.clone());

        format!(
            "{}/{}/{}",
            self.content.base_path.trim_end_matches('/'),
            version,
            section_url
        )
    }
}
