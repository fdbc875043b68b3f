//! Test utilities for form-dispatch applications
//!
//! - [`TestHarness`]: state plus an action channel for capturing emitted actions
//! - [`RecordingMiddleware`]: middleware that records what reached the reducer
//! - Assertion macros for verifying emitted actions
//!
//! # Example
//!
//! ```ignore
//! use form_dispatch::testing::TestHarness;
//!
//! let mut harness = TestHarness::<FormState, FormAction>::new(FormState::default());
//!
//! // Emit actions (simulating what input handlers would do)
//! harness.emit(FormAction::UpdatePages(Some(12)));
//!
//! let emitted = harness.drain_emitted();
//! assert_emitted!(emitted, FormAction::UpdatePages(Some(12)));
//! ```

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use crate::action::DebounceKey;
use crate::store::Middleware;
use crate::Action;

/// Generic test harness for form-dispatch applications.
///
/// Provides:
/// - State management with a simple `state` field
/// - Action channel for capturing emitted actions
/// - Helper methods for draining actions, optionally by debounce key
pub struct TestHarness<S, A: Action> {
    /// The state under test
    pub state: S,
    tx: mpsc::UnboundedSender<A>,
    rx: mpsc::UnboundedReceiver<A>,
}

impl<S, A: Action> TestHarness<S, A> {
    /// Create a new test harness with the given initial state.
    pub fn new(state: S) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { state, tx, rx }
    }

    /// Get a clone of the action sender for passing to handlers.
    pub fn sender(&self) -> mpsc::UnboundedSender<A> {
        self.tx.clone()
    }

    /// Emit an action (simulates what a handler would do).
    pub fn emit(&self, action: A) {
        let _ = self.tx.send(action);
    }

    /// Drain all emitted actions from the channel.
    pub fn drain_emitted(&mut self) -> Vec<A> {
        let mut actions = Vec::new();
        while let Ok(action) = self.rx.try_recv() {
            actions.push(action);
        }
        actions
    }

    /// Check if any actions were emitted.
    pub fn has_emitted(&mut self) -> bool {
        !self.drain_emitted().is_empty()
    }

    /// Drain emitted actions marked with the given debounce key.
    ///
    /// Other actions remain in the channel, in their original order.
    pub fn drain_debounced(&mut self, key: &str) -> Vec<A> {
        let (matching, rest): (Vec<A>, Vec<A>) = self
            .drain_emitted()
            .into_iter()
            .partition(|action| is_debounced_with(action, key));

        for action in rest {
            let _ = self.tx.send(action);
        }
        matching
    }

    /// Apply every emitted action to the harness state with `reducer`.
    ///
    /// Returns whether any of them changed the state.
    pub fn apply_emitted(&mut self, reducer: fn(&mut S, A) -> bool) -> bool {
        let mut changed = false;
        for action in self.drain_emitted() {
            changed |= reducer(&mut self.state, action);
        }
        changed
    }
}

impl<S: Default, A: Action> Default for TestHarness<S, A> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

/// Whether `action` carries debounce metadata with the given key.
pub fn is_debounced_with<A: Action>(action: &A, key: &str) -> bool {
    action
        .meta()
        .is_some_and(|meta| meta.debounce == DebounceKey::new(key))
}

/// Middleware that records every action reaching the reducer.
///
/// Clones share the same record, so a test can keep one handle while the
/// store owns the other.
#[derive(Debug)]
pub struct RecordingMiddleware<A> {
    applied: Arc<Mutex<Vec<(A, bool)>>>,
}

impl<A> Clone for RecordingMiddleware<A> {
    fn clone(&self) -> Self {
        Self {
            applied: Arc::clone(&self.applied),
        }
    }
}

impl<A> Default for RecordingMiddleware<A> {
    fn default() -> Self {
        Self {
            applied: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl<A: Action> RecordingMiddleware<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Actions applied so far, in order, with their `state_changed` flag
    pub fn applied(&self) -> Vec<(A, bool)> {
        self.applied
            .lock()
            .map(|applied| applied.clone())
            .unwrap_or_default()
    }

    /// Names of the actions applied so far, in order
    pub fn applied_names(&self) -> Vec<&'static str> {
        self.applied().iter().map(|(a, _)| a.name()).collect()
    }
}

impl<A: Action> Middleware<A> for RecordingMiddleware<A> {
    fn before(&mut self, _action: &A) -> bool {
        true
    }

    fn after(&mut self, action: &A, state_changed: bool) {
        if let Ok(mut applied) = self.applied.lock() {
            applied.push((action.clone(), state_changed));
        }
    }
}

/// Pause tokio's clock so debounce windows only elapse through [`advance_time`].
///
/// Must be called from a current-thread runtime.
#[cfg(feature = "testing-time")]
pub fn pause_time() {
    tokio::time::pause();
}

/// Resume the real clock after [`pause_time`].
#[cfg(feature = "testing-time")]
pub fn resume_time() {
    tokio::time::resume();
}

/// Move the paused clock forward, firing any debounce deadline it passes.
#[cfg(feature = "testing-time")]
pub async fn advance_time(duration: std::time::Duration) {
    tokio::time::advance(duration).await;
}

/// Assert that a specific action was emitted.
///
/// # Example
///
/// ```ignore
/// let actions = harness.drain_emitted();
/// assert_emitted!(actions, FormAction::ShowPhysical);
/// assert_emitted!(actions, FormAction::UpdatePages(Some(_)));
/// ```
#[macro_export]
macro_rules! assert_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            $actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` to be emitted, but got: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Assert that a specific action was NOT emitted.
#[macro_export]
macro_rules! assert_not_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            !$actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` NOT to be emitted, but it was: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Find and return the first action matching a pattern.
#[macro_export]
macro_rules! find_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        $actions.iter().find(|a| matches!(a, $pattern $(if $guard)?))
    };
}

/// Count how many actions match a pattern.
#[macro_export]
macro_rules! count_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        $actions.iter().filter(|a| matches!(a, $pattern $(if $guard)?)).count()
    };
}

/// Assert that an action carries debounce metadata with the given key.
///
/// # Example
///
/// ```ignore
/// assert_debounced!(FormAction::UpdateWeight(Some(250.0)), "keystroke");
/// ```
#[macro_export]
macro_rules! assert_debounced {
    ($action:expr, $key:expr) => {{
        let action = &$action;
        assert!(
            $crate::testing::is_debounced_with(action, $key),
            "Expected {:?} to be debounced with `{}`, but its meta was {:?}",
            action,
            $key,
            $crate::Action::meta(action)
        );
    }};
}
