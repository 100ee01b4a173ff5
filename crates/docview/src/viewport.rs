//! Display surface hooks.

/// The surface the documentation is rendered on.
///
/// The loader resets the scroll position after each completed load.
pub trait Viewport: Send + Sync {
    fn scroll_to(&self, x: u32, y: u32);
}

/// Viewport for headless use, e.g. the CLI.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopViewport;

impl Viewport for NoopViewport {
    fn scroll_to(&self, x: u32, y: u32) {
        tracing::trace!("scroll to ({}, {}) ignored", x, y);
    }
}
