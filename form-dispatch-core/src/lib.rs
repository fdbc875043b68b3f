//! Core traits and types for form-dispatch
//!
//! This crate provides the foundational abstractions for form editors
//! with centralized state management, following a Redux-inspired architecture.
//!
//! # Core Concepts
//!
//! - **Action**: Immutable descriptions of state changes, optionally carrying
//!   [`ActionMeta`] that asks for debounced dispatch
//! - **Store**: Centralized state container with reducer pattern
//! - **Middleware**: Cross-cutting concerns around the reducer (logging, debouncing)
//! - **Runtime**: Async loop feeding a store from an action channel
//!
//! # Basic Example
//!
//! ```ignore
//! use form_dispatch_core::prelude::*;
//!
//! #[derive(Action, Clone, Debug)]
//! #[action(rename_all = "SCREAMING_SNAKE_CASE")]
//! enum FormAction {
//!     #[action(debounce = "keystroke")]
//!     UpdatePages(Option<i64>),
//!     ShowPhysical,
//! }
//!
//! #[derive(Default)]
//! struct FormState {
//!     pages: Option<i64>,
//!     physical_visible: bool,
//! }
//!
//! fn reducer(state: &mut FormState, action: FormAction) -> bool {
//!     match action {
//!         FormAction::UpdatePages(pages) => { state.pages = pages; true }
//!         FormAction::ShowPhysical => { state.physical_visible = true; true }
//!     }
//! }
//!
//! let mut store = StoreWithMiddleware::new(
//!     FormState::default(),
//!     reducer,
//!     DebounceMiddleware::default(),
//! );
//! store.dispatch(FormAction::ShowPhysical);      // applied now
//! store.dispatch(FormAction::UpdatePages(Some(3))); // held for the keystroke window
//! ```

pub mod action;
pub mod config;
pub mod debounce;
pub mod error;
pub mod logger;
pub mod runtime;
pub mod store;
pub mod testing;

// Core trait exports
pub use action::{Action, ActionMeta, ActionSummary, DebounceKey};

// Store exports
pub use store::{
    ComposedMiddleware, LoggingMiddleware, Middleware, NoopMiddleware, Reducer, Store,
    StoreWithMiddleware,
};

// Debounce and logging exports
pub use debounce::{DebounceConfig, DebounceMiddleware, DEFAULT_KEYSTROKE_WINDOW};
pub use logger::{ActionLog, ActionLogConfig, ActionLogEntry, ActionLoggerConfig, ActionLoggerMiddleware};

// Config and error exports
pub use config::{DispatchConfig, LogSettings};
pub use error::ConfigError;

// Runtime exports
pub use runtime::DispatchRuntime;

// Testing exports
pub use testing::{RecordingMiddleware, TestHarness};

#[cfg(feature = "testing-time")]
pub use testing::{advance_time, pause_time, resume_time};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::action::{Action, ActionMeta, ActionSummary, DebounceKey};
    pub use crate::config::DispatchConfig;
    pub use crate::debounce::{DebounceConfig, DebounceMiddleware};
    pub use crate::logger::{ActionLogConfig, ActionLoggerConfig, ActionLoggerMiddleware};
    pub use crate::runtime::DispatchRuntime;
    pub use crate::store::{
        ComposedMiddleware, LoggingMiddleware, Middleware, NoopMiddleware, Reducer, Store,
        StoreWithMiddleware,
    };
}
