//! Routing layer seam.
//!
//! docview does not own a routing table. It reads [`Route`] snapshots
//! provided by the host application and asks a [`Router`] to navigate.

use crate::config::NavigationConfig;
use async_trait::async_trait;
use docview_core::Result;
use std::collections::BTreeMap;

/// Route parameter holding the documentation version.
pub const VERSION_PARAM: &str = "version";

/// Route parameter holding the page id.
pub const PAGE_PARAM: &str = "page";

/// Snapshot of the host application's current route.
///
/// Empty strings are treated as absent, for both the name and params.
///
/// # Examples
///
/// ```
/// use docview::router::Route;
///
/// let route = Route::named("docs-versioned")
///     .with_param("version", "1.x")
///     .with_param("page", "");
///
/// assert_eq!(route.version(), Some("1.x"));
/// assert_eq!(route.page(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Route {
    pub name: Option<String>,
    pub params: BTreeMap<String, String>,
}

impl Route {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            params: BTreeMap::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    pub fn version(&self) -> Option<&str> {
        self.param(VERSION_PARAM)
    }

    pub fn page(&self) -> Option<&str> {
        self.param(PAGE_PARAM)
    }
}

/// A navigation request: a named route plus its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationTarget {
    pub name: String,
    pub params: BTreeMap<String, String>,
}

impl NavigationTarget {
    /// Target for a page of a given documentation version.
    pub fn versioned(config: &NavigationConfig, version: &str, page: &str) -> Self {
        let mut params = BTreeMap::new();
        params.insert(VERSION_PARAM.to_string(), version.to_string());
        params.insert(PAGE_PARAM.to_string(), page.to_string());

        Self {
            name: config.route_name.clone(),
            params,
        }
    }

    /// Target used when a route carries no version.
    pub fn fallback(config: &NavigationConfig) -> Self {
        Self::versioned(config, &config.default_version, &config.default_page)
    }
}

/// Navigation interface of the host application.
#[async_trait]
pub trait Router: Send + Sync {
    /// Navigates to `target`.
    ///
    /// # Errors
    ///
    /// Implementations return `DocsError::Navigation` when the host rejects
    /// or cannot perform the navigation.
    async fn push(&self, target: NavigationTarget) -> Result<()>;
}

/// Switches to another documentation version, landing on its default page.
pub async fn change_version(
    router: &dyn Router,
    config: &NavigationConfig,
    version: &str,
) -> Result<()> {
    tracing::info!("switching documentation to version {}", version);
    router
        .push(NavigationTarget::versioned(config, version, &config.default_page))
        .await
}
