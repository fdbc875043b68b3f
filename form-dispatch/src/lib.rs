//! form-dispatch: typed actions and debounced dispatch for form state
//!
//! Like Redux, but typed. Input handlers build actions, middleware decides
//! when they reach the reducer, and all state mutations happen in the reducer.
//!
//! # Example
//! ```ignore
//! use form_dispatch::prelude::*;
//!
//! #[derive(Action, Clone, Debug)]
//! #[action(rename_all = "SCREAMING_SNAKE_CASE")]
//! enum FormAction {
//!     UpdateStatus(Option<i64>),
//!     #[action(debounce = "keystroke")]
//!     UpdatePages(Option<i64>),
//! }
//!
//! assert_eq!(FormAction::UpdateStatus(Some(5)).name(), "UPDATE_STATUS");
//! assert_eq!(
//!     FormAction::UpdatePages(None).meta(),
//!     Some(ActionMeta::keystroke()),
//! );
//! ```

// Re-export everything from core
pub use form_dispatch_core::*;

// Re-export derive macros
pub use form_dispatch_macros::Action;

/// Prelude for convenient imports
pub mod prelude {
    // Traits and metadata
    pub use form_dispatch_core::{Action, ActionMeta, ActionSummary, DebounceKey};

    // Store
    pub use form_dispatch_core::{
        ComposedMiddleware, LoggingMiddleware, Middleware, NoopMiddleware, Reducer, Store,
        StoreWithMiddleware,
    };

    // Debounce, logging, config, runtime
    pub use form_dispatch_core::{
        ActionLogConfig, ActionLoggerConfig, ActionLoggerMiddleware, DebounceConfig,
        DebounceMiddleware, DispatchConfig, DispatchRuntime,
    };

    // Derive macros
    pub use form_dispatch_macros::Action;
}
