//! Route watching against a mock content server.

mod common;

use common::{RecordingRouter, loader_for};
use docview::config::NavigationConfig;
use docview::{NavigationTarget, NavigationWatcher, Route, change_version};
use std::sync::Arc;
use tokio::sync::watch;

#[tokio::test]
async fn test_unversioned_route_redirects_to_default() {
    let (loader, _) = loader_for("http://127.0.0.1:1");
    let router = Arc::new(RecordingRouter::default());
    let mut watcher = NavigationWatcher::new(loader, router.clone(), NavigationConfig::default());

    let load = watcher.observe(&Route::named("docs")).await;

    assert!(load.is_none());
    let pushed = router.pushed();
    assert_eq!(pushed.len(), 1);
    assert_eq!(pushed[0].name, "docs-versioned");
    assert_eq!(pushed[0].params["version"], "1.x");
    assert_eq!(pushed[0].params["page"], "home");
}

#[tokio::test]
async fn test_versioned_route_loads_once_without_redirect() {
    let mut server = mockito::Server::new_async().await;
    let page = server
        .mock("GET", "/docs/1.x/b1.md")
        .with_status(200)
        .with_body("# B1")
        .expect(1)
        .create_async()
        .await;

    let (loader, _) = loader_for(&server.url());
    let router = Arc::new(RecordingRouter::default());
    let mut watcher = NavigationWatcher::new(
        Arc::clone(&loader),
        router.clone(),
        NavigationConfig::default(),
    );

    let route = Route::named("docs-versioned")
        .with_param("version", "1.x")
        .with_param("page", "b1");
    watcher.observe(&route).await.unwrap().await.unwrap();

    assert!(router.pushed().is_empty());
    let state = loader.context().snapshot();
    assert_eq!(state.markdown.as_deref(), Some("# B1"));
    assert_eq!(state.page.map(|p| p.url), Some("b1".to_string()));
    page.assert_async().await;
}

#[tokio::test]
async fn test_run_follows_route_channel() {
    let mut server = mockito::Server::new_async().await;
    let _home = server
        .mock("GET", "/docs/2.x/home.md")
        .with_status(200)
        .with_body("# Home v2")
        .create_async()
        .await;

    let (loader, _) = loader_for(&server.url());
    let router = Arc::new(RecordingRouter::default());
    let watcher = NavigationWatcher::new(
        Arc::clone(&loader),
        router.clone(),
        NavigationConfig::default(),
    );

    let (routes, receiver) = watch::channel(Route::default());
    let mut states = loader.context().subscribe();
    let task = tokio::spawn(watcher.run(receiver));

    routes
        .send(
            Route::named("docs-versioned")
                .with_param("version", "2.x")
                .with_param("page", "home"),
        )
        .unwrap();

    // Wait for the spawned load to publish its content
    loop {
        states.changed().await.unwrap();
        if states.borrow_and_update().markdown.is_some() {
            break;
        }
    }

    drop(routes);
    task.await.unwrap();

    assert!(router.pushed().is_empty());
    assert_eq!(
        loader.context().snapshot().markdown.as_deref(),
        Some("# Home v2")
    );
}

#[tokio::test]
async fn test_change_version_targets_default_page() {
    let router = RecordingRouter::default();
    let config = NavigationConfig::default();

    change_version(&router, &config, "2.x").await.unwrap();

    assert_eq!(
        router.pushed(),
        vec![NavigationTarget::versioned(&config, "2.x", "home")]
    );
}
