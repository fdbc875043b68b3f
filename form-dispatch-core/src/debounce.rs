//! Debounced dispatch for actions that carry debounce metadata
//!
//! Actions whose [`ActionMeta`](crate::ActionMeta) names a debounce key are
//! held back and coalesced:
//! - Held actions are keyed by debounce key and action name
//! - A newer action for the same slot replaces the held one and restarts its timer
//! - Once the window elapses without a newer action, the last value is released
//!
//! Actions without metadata, or with a key that has no configured window,
//! pass straight through.
//!
//! # Example
//!
//! ```ignore
//! use form_dispatch::debounce::{DebounceConfig, DebounceMiddleware};
//! use std::time::Duration;
//! use tokio::time::Instant;
//!
//! let middleware = DebounceMiddleware::new(DebounceConfig::default());
//! let mut store = StoreWithMiddleware::new(FormState::default(), reducer, middleware);
//!
//! // Each keystroke replaces the previous pending value
//! store.dispatch(FormAction::UpdateWeight(Some(2.0)));
//! store.dispatch(FormAction::UpdateWeight(Some(25.0)));
//! store.dispatch(FormAction::UpdateWeight(Some(250.0)));
//!
//! // Later, from the event loop
//! store.flush_due(Instant::now());
//! ```

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::Instant;

use crate::action::{Action, DebounceKey};
use crate::store::Middleware;

/// Window used for the keystroke policy when nothing else is configured.
pub const DEFAULT_KEYSTROKE_WINDOW: Duration = Duration::from_millis(250);

/// Debounce windows per key.
///
/// Serialized as a table of key to milliseconds:
///
/// ```toml
/// [debounce]
/// keystroke = 250
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DebounceConfig {
    #[serde(with = "millis_map")]
    windows: BTreeMap<DebounceKey, Duration>,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self::empty().with_window(DebounceKey::keystroke(), DEFAULT_KEYSTROKE_WINDOW)
    }
}

impl DebounceConfig {
    /// A config with no windows: every action passes straight through.
    pub fn empty() -> Self {
        Self {
            windows: BTreeMap::new(),
        }
    }

    /// Set the window for `key`
    pub fn with_window(mut self, key: impl Into<DebounceKey>, window: Duration) -> Self {
        self.set_window(key, window);
        self
    }

    pub fn set_window(&mut self, key: impl Into<DebounceKey>, window: Duration) {
        self.windows.insert(key.into(), window);
    }

    /// Window configured for `key`, if any
    pub fn window(&self, key: &DebounceKey) -> Option<Duration> {
        self.windows.get(key).copied()
    }

    pub fn keys(&self) -> impl Iterator<Item = &DebounceKey> {
        self.windows.keys()
    }
}

mod millis_map {
    use std::collections::BTreeMap;
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::action::DebounceKey;

    pub fn serialize<S: Serializer>(
        windows: &BTreeMap<DebounceKey, Duration>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        windows
            .iter()
            .map(|(key, window)| (key.clone(), window.as_millis() as u64))
            .collect::<BTreeMap<_, _>>()
            .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<DebounceKey, Duration>, D::Error> {
        let raw = BTreeMap::<DebounceKey, u64>::deserialize(deserializer)?;
        Ok(raw
            .into_iter()
            .map(|(key, ms)| (key, Duration::from_millis(ms)))
            .collect())
    }
}

/// Identifies a held action: one slot per debounce key and action name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct Slot {
    key: DebounceKey,
    name: &'static str,
}

#[derive(Debug)]
struct Pending<A> {
    action: A,
    deadline: Instant,
    /// Arrival order, breaks ties between equal deadlines
    sequence: u64,
}

/// Middleware that holds debounce-marked actions and releases the last one
/// per slot after its window elapses.
#[derive(Debug)]
pub struct DebounceMiddleware<A> {
    config: DebounceConfig,
    pending: HashMap<Slot, Pending<A>>,
    next_sequence: u64,
}

impl<A: Action> DebounceMiddleware<A> {
    pub fn new(config: DebounceConfig) -> Self {
        Self {
            config,
            pending: HashMap::new(),
            next_sequence: 0,
        }
    }

    pub fn config(&self) -> &DebounceConfig {
        &self.config
    }

    /// Hold `action` if it is debounced, as if it arrived at `now`.
    ///
    /// Returns `true` when the action was held, `false` when it should be
    /// applied immediately.
    pub fn hold(&mut self, action: &A, now: Instant) -> bool {
        let Some(meta) = action.meta() else {
            return false;
        };
        let window = match self.config.window(&meta.debounce) {
            Some(window) if !window.is_zero() => window,
            _ => return false,
        };

        let slot = Slot {
            key: meta.debounce,
            name: action.name(),
        };
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        let replaced = self
            .pending
            .insert(
                slot,
                Pending {
                    action: action.clone(),
                    deadline: now + window,
                    sequence,
                },
            )
            .is_some();

        tracing::trace!(
            action = %action.name(),
            window_ms = window.as_millis() as u64,
            replaced,
            "Holding debounced action"
        );
        true
    }

    /// Number of held actions
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Whether an action with this name is currently held
    pub fn is_pending(&self, name: &str) -> bool {
        self.pending.keys().any(|slot| slot.name == name)
    }

    fn release(&mut self, slots: Vec<Slot>) -> Vec<A> {
        let mut released: Vec<Pending<A>> = slots
            .into_iter()
            .filter_map(|slot| self.pending.remove(&slot))
            .collect();
        released.sort_by_key(|p| (p.deadline, p.sequence));

        released
            .into_iter()
            .map(|p| {
                tracing::debug!(action = %p.action.name(), "Releasing debounced action");
                p.action
            })
            .collect()
    }
}

impl<A: Action> Default for DebounceMiddleware<A> {
    fn default() -> Self {
        Self::new(DebounceConfig::default())
    }
}

impl<A: Action> Middleware<A> for DebounceMiddleware<A> {
    fn before(&mut self, action: &A) -> bool {
        !self.hold(action, Instant::now())
    }

    fn after(&mut self, _action: &A, _state_changed: bool) {}

    fn take_due(&mut self, now: Instant) -> Vec<A> {
        let due = self
            .pending
            .iter()
            .filter(|(_, p)| p.deadline <= now)
            .map(|(slot, _)| slot.clone())
            .collect();
        self.release(due)
    }

    fn take_all(&mut self) -> Vec<A> {
        let all = self.pending.keys().cloned().collect();
        self.release(all)
    }

    fn next_deadline(&self) -> Option<Instant> {
        self.pending.values().map(|p| p.deadline).min()
    }
}
