//! Test utilities for routers, viewports and loaders.
