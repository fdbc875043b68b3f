//! Edition section of the entity editor
//!
//! - [`action`]: the closed set of edition actions and their constructors
//! - [`wire`]: the `{type, payload, meta?}` JSON format
//! - [`state`] and [`reducer`]: the form state those actions update
//!
//! Typed fields (release date, weight, pages, dimensions) carry keystroke
//! debounce metadata. Pair the reducer with
//! [`DebounceMiddleware`](form_dispatch::DebounceMiddleware) to coalesce them.

pub mod action;
pub mod error;
pub mod reducer;
pub mod state;
pub mod wire;

pub use action::*;
pub use error::WireError;
pub use reducer::reducer;
pub use state::EditionSectionState;
pub use wire::{decode_line, decode_lines, from_json, to_json, ActionEnvelope};
