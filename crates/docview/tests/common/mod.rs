//! Shared fixtures for integration tests.

use async_trait::async_trait;
use docview::{ContentLoader, DocContext, DocviewConfig, NavigationTarget, Router, Viewport};
use docview_core::{ContentCache, Result, StaticRegistry};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub(crate) const MANIFEST: &str = r#"[
    {
        "version": "1.x",
        "sections": [
            { "url": "a" },
            { "url": "b", "subSections": [{ "url": "b1" }] },
            { "url": "home", "title": "Home" }
        ]
    },
    { "version": "2.x", "sections": [{ "url": "home" }] }
]"#;

/// Router that records every navigation request.
#[allow(dead_code)] // Only used by the navigation tests
#[derive(Default)]
pub(crate) struct RecordingRouter {
    pushed: Mutex<Vec<NavigationTarget>>,
}

impl RecordingRouter {
    #[allow(dead_code)]
    pub(crate) fn pushed(&self) -> Vec<NavigationTarget> {
        self.pushed.lock().unwrap().clone()
    }
}

#[async_trait]
impl Router for RecordingRouter {
    async fn push(&self, target: NavigationTarget) -> Result<()> {
        self.pushed.lock().unwrap().push(target);
        Ok(())
    }
}

/// Viewport that counts scroll resets.
#[derive(Default)]
pub(crate) struct CountingViewport {
    scrolls: AtomicUsize,
}

impl CountingViewport {
    #[allow(dead_code)] // Not every test file checks scrolling
    pub(crate) fn scrolls(&self) -> usize {
        self.scrolls.load(Ordering::SeqCst)
    }
}

impl Viewport for CountingViewport {
    fn scroll_to(&self, x: u32, y: u32) {
        assert_eq!((x, y), (0, 0));
        self.scrolls.fetch_add(1, Ordering::SeqCst);
    }
}

/// Builds a loader serving content from `origin`.
pub(crate) fn loader_for(origin: &str) -> (Arc<ContentLoader>, Arc<CountingViewport>) {
    let mut config = DocviewConfig::default();
    config.content.origin = origin.to_string();

    let registry = StaticRegistry::from_json(MANIFEST).unwrap();
    let cache = ContentCache::new((&config.cache).into()).unwrap();
    let viewport = Arc::new(CountingViewport::default());

    let loader = ContentLoader::new(
        &config,
        Arc::new(DocContext::new()),
        Arc::new(registry),
        Arc::new(cache),
        viewport.clone(),
    );
    (Arc::new(loader), viewport)
}
