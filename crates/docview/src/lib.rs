pub mod config;
pub mod loader;
pub mod router;
pub mod state;
pub mod viewport;
pub mod watcher;

mod test_utils;

// Re-export commonly used types
pub use config::DocviewConfig;
pub use docview_core::{DocsError, LoadError, Result, resolve_page};
pub use loader::ContentLoader;
pub use router::{NavigationTarget, Route, Router, change_version};
pub use state::{DocContext, DocState};
pub use viewport::{NoopViewport, Viewport};
pub use watcher::NavigationWatcher;
