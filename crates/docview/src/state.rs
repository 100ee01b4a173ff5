//! Shared "current document view" state.
//!
//! A [`DocContext`] is created once per UI session and handed by reference
//! to every consumer. State lives in a `tokio::sync::watch` channel so UI
//! layers can subscribe and re-render on each change.

use docview_core::{Document, LoadError, Section};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;

/// Snapshot of the current selection.
///
/// `error` and `markdown` are independent: a failed load leaves `markdown`
/// empty and sets `error`, but nothing forces the two to be exclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocState {
    pub version: Option<String>,
    pub document: Option<Document>,
    pub page: Option<Section>,
    pub markdown: Option<String>,
    pub loading: bool,
    pub error: Option<LoadError>,
}

impl DocState {
    /// Returns the message to display for the current error, if any.
    pub fn error_message(&self) -> Option<String> {
        self.error.map(|e| e.to_string())
    }
}

/// Owner of the shared [`DocState`].
///
/// Each load takes a generation number from [`DocContext::begin_load`].
/// Only the most recent generation may finish, so an older fetch that
/// completes late cannot overwrite the page the reader asked for last.
pub struct DocContext {
    state: watch::Sender<DocState>,
    generation: AtomicU64,
}

impl DocContext {
    pub fn new() -> Self {
        let (state, _) = watch::channel(DocState::default());
        Self {
            state,
            generation: AtomicU64::new(0),
        }
    }

    /// Returns a copy of the current state.
    pub fn snapshot(&self) -> DocState {
        self.state.borrow().clone()
    }

    /// Subscribes to state changes.
    pub fn subscribe(&self) -> watch::Receiver<DocState> {
        self.state.subscribe()
    }

    /// Returns the currently selected version.
    pub fn current_version(&self) -> Option<String> {
        self.state.borrow().version.clone()
    }

    /// Returns the latest generation handed out.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Starts a new load and applies `start` to the state.
    ///
    /// The generation bump and the state change happen under the same
    /// channel lock, so a finishing load either sees both or neither.
    pub fn begin_load(&self, start: impl FnOnce(&mut DocState)) -> u64 {
        let mut generation = 0;
        self.state.send_modify(|state| {
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            start(state);
        });
        generation
    }

    /// Applies `finish` if `generation` is still the latest load.
    ///
    /// Returns `false` and leaves the state untouched when a newer load
    /// has started or the context was reset in the meantime.
    pub fn finish_load(&self, generation: u64, finish: impl FnOnce(&mut DocState)) -> bool {
        self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            finish(state);
            true
        })
    }

    /// Clears the state back to its initial value.
    ///
    /// Loads still in flight are invalidated and will be discarded.
    pub fn reset(&self) {
        self.state.send_modify(|state| {
            self.generation.fetch_add(1, Ordering::SeqCst);
            *state = DocState::default();
        });
        tracing::debug!("document context reset");
    }
}

impl Default for DocContext {
    fn default() -> Self {
        Self::new()
    }
}
