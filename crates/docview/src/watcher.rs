//! Route observation.
//!
//! The watcher tracks two signals of the host's route:
//! - the `version` param: whenever it changes to a non-empty value, the
//!   page named by the route is loaded
//! - the route name: whenever it changes to a non-empty value while the
//!   route carries no version, the router is sent to the default version
//!
//! Loads run on their own task, so a new route can be observed while the
//! previous fetch is still in flight. The loader discards the stale result.

use crate::config::NavigationConfig;
use crate::loader::ContentLoader;
use crate::router::{NavigationTarget, Route, Router};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Observes route snapshots and triggers loads and redirects.
pub struct NavigationWatcher {
    loader: Arc<ContentLoader>,
    router: Arc<dyn Router>,
    config: NavigationConfig,
    last_version: Option<String>,
    last_name: Option<String>,
}

impl NavigationWatcher {
    pub fn new(
        loader: Arc<ContentLoader>,
        router: Arc<dyn Router>,
        config: NavigationConfig,
    ) -> Self {
        Self {
            loader,
            router,
            config,
            last_version: None,
            last_name: None,
        }
    }

    /// Processes one route snapshot.
    ///
    /// A versioned route without a `page` param (or with an empty one)
    /// loads the configured default page rather than a literal
    /// placeholder slug.
    ///
    /// Returns the handle of the spawned load when the version changed.
    /// Redirects are awaited before returning; a failed redirect is logged.
    pub async fn observe(&mut self, route: &Route) -> Option<JoinHandle<()>> {
        let load = self.on_version_change(route);
        self.on_name_change(route).await;
        load
    }

    fn on_version_change(&mut self, route: &Route) -> Option<JoinHandle<()>> {
        let version = route.version().map(str::to_string);
        if version == self.last_version {
            return None;
        }
        self.last_version.clone_from(&version);

        let version = version?;
        let page = route
            .page()
            .unwrap_or(&self.config.default_page)
            .to_string();

        tracing::info!("route selected version {} page {}", version, page);
        let loader = Arc::clone(&self.loader);
        Some(tokio::spawn(async move {
            loader.load_document(&version, &page).await;
        }))
    }

    async fn on_name_change(&mut self, route: &Route) {
        let name = route.name().map(str::to_string);
        if name == self.last_name {
            return;
        }
        self.last_name.clone_from(&name);

        if name.is_none() || route.version().is_some() {
            return;
        }

        let target = NavigationTarget::fallback(&self.config);
        tracing::info!(
            "route {:?} has no version, redirecting to {}",
            name,
            self.config.default_version
        );
        if let Err(e) = self.router.push(target).await {
            tracing::warn!("redirect failed: {}", e);
        }
    }

    /// Observes every route published on `routes` until the sender is dropped.
    ///
    /// The value present when the loop starts is observed first.
    pub async fn run(mut self, mut routes: watch::Receiver<Route>) {
        loop {
            let route = routes.borrow_and_update().clone();
            self.observe(&route).await;

            if routes.changed().await.is_err() {
                tracing::debug!("route channel closed, stopping navigation watcher");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_helpers::{RecordingRouter, create_test_loader};

    fn watcher(origin: &str) -> (NavigationWatcher, Arc<RecordingRouter>, Arc<ContentLoader>) {
        let (loader, _) = create_test_loader(origin);
        let router = Arc::new(RecordingRouter::default());
        let watcher = NavigationWatcher::new(
            Arc::clone(&loader),
            router.clone(),
            NavigationConfig::default(),
        );
        (watcher, router, loader)
    }

    #[tokio::test]
    async fn test_route_without_version_redirects_once() {
        let (mut watcher, router, _) = watcher("http://127.0.0.1:1");

        let load = watcher.observe(&Route::named("docs")).await;

        assert!(load.is_none());
        let pushed = router.pushed();
        assert_eq!(pushed.len(), 1);
        assert_eq!(pushed[0], NavigationTarget::fallback(&NavigationConfig::default()));
    }

    #[tokio::test]
    async fn test_same_route_name_does_not_redirect_twice() {
        let (mut watcher, router, _) = watcher("http://127.0.0.1:1");

        watcher.observe(&Route::named("docs")).await;
        watcher.observe(&Route::named("docs")).await;

        assert_eq!(router.pushed().len(), 1);
    }

    #[tokio::test]
    async fn test_route_without_name_does_nothing() {
        let (mut watcher, router, _) = watcher("http://127.0.0.1:1");

        let load = watcher.observe(&Route::default()).await;

        assert!(load.is_none());
        assert!(router.pushed().is_empty());
    }

    #[tokio::test]
    async fn test_versioned_route_loads_without_redirect() {
        let (mut watcher, router, loader) = watcher("http://127.0.0.1:1");
        let route = Route::named("docs-versioned")
            .with_param("version", "1.x")
            .with_param("page", "install");

        let load = watcher.observe(&route).await.expect("load spawned");
        load.await.unwrap();

        assert!(router.pushed().is_empty());
        let state = loader.context().snapshot();
        assert_eq!(state.version.as_deref(), Some("1.x"));
        assert_eq!(state.page.as_ref().map(|p| p.url.as_str()), Some("install"));
    }

    #[tokio::test]
    async fn test_unchanged_version_does_not_reload() {
        let (mut watcher, _, _) = watcher("http://127.0.0.1:1");
        let route = Route::named("docs-versioned").with_param("version", "1.x");

        assert!(watcher.observe(&route).await.is_some());
        assert!(watcher.observe(&route).await.is_none());
    }

    #[tokio::test]
    async fn test_missing_page_uses_default() {
        let (mut watcher, _, loader) = watcher("http://127.0.0.1:1");
        let route = Route::named("docs-versioned").with_param("version", "1.x");

        watcher.observe(&route).await.unwrap().await.unwrap();

        let state = loader.context().snapshot();
        assert_eq!(state.page.as_ref().map(|p| p.url.as_str()), Some("home"));
    }

    #[tokio::test]
    async fn test_failed_redirect_is_swallowed() {
        let (loader, _) = create_test_loader("http://127.0.0.1:1");
        let router = Arc::new(RecordingRouter::failing());
        let mut watcher =
            NavigationWatcher::new(loader, router.clone(), NavigationConfig::default());

        watcher.observe(&Route::named("docs")).await;

        assert_eq!(router.pushed().len(), 1);
    }

    #[tokio::test]
    async fn test_run_stops_when_sender_dropped() {
        let (watcher, router, _) = watcher("http://127.0.0.1:1");
        let (tx, rx) = watch::channel(Route::named("docs"));

        let handle = tokio::spawn(watcher.run(rx));
        drop(tx);
        handle.await.unwrap();

        assert_eq!(router.pushed().len(), 1);
    }
}
