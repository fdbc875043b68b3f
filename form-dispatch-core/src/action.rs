//! Action trait and dispatch metadata

use std::fmt::{self, Debug};

use serde::{Deserialize, Serialize};

/// Marker trait for actions that can be dispatched to the store
///
/// Actions represent intents to change state. They should be:
/// - Clone: Actions may be logged, held by a debouncer, or replayed
/// - Debug: For debugging and logging
/// - Send + 'static: For async dispatch across threads
///
/// Use `#[derive(Action)]` from `form-dispatch-macros` to auto-implement this trait.
pub trait Action: Clone + Debug + Send + 'static {
    /// Get the action name for logging, filtering and the wire `type` field
    fn name(&self) -> &'static str;

    /// Dispatch metadata attached to this action, if any
    ///
    /// Middleware reads this to decide whether the action should be
    /// delayed or coalesced. The action itself performs no timing.
    fn meta(&self) -> Option<ActionMeta> {
        None
    }
}

/// Human-readable summary of an action for the action log
///
/// The default uses the `Debug` representation. Override it for actions
/// carrying large payloads.
pub trait ActionSummary: Action {
    fn summary(&self) -> String {
        format!("{:?}", self)
    }
}

/// Names a debounce policy.
///
/// Actions tagged with the same key share the window configured for that key
/// in [`DebounceConfig`](crate::debounce::DebounceConfig).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DebounceKey(String);

impl DebounceKey {
    /// Name of the per-keystroke policy used by free-text and numeric inputs.
    pub const KEYSTROKE: &'static str = "keystroke";

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The per-keystroke debounce key.
    pub fn keystroke() -> Self {
        Self::new(Self::KEYSTROKE)
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DebounceKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for DebounceKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for DebounceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Side-channel metadata carried next to an action's payload.
///
/// On the wire this is the `meta` object, e.g. `{"debounce":"keystroke"}`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionMeta {
    pub debounce: DebounceKey,
}

impl ActionMeta {
    /// Metadata marking an action for debounced dispatch under `key`.
    pub fn debounce(key: impl Into<DebounceKey>) -> Self {
        Self {
            debounce: key.into(),
        }
    }

    /// Metadata for the per-keystroke debounce policy.
    pub fn keystroke() -> Self {
        Self::debounce(DebounceKey::keystroke())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug)]
    enum TestAction {
        Typed(String),
        Clicked,
    }

    impl Action for TestAction {
        fn name(&self) -> &'static str {
            match self {
                TestAction::Typed(_) => "Typed",
                TestAction::Clicked => "Clicked",
            }
        }

        fn meta(&self) -> Option<ActionMeta> {
            match self {
                TestAction::Typed(_) => Some(ActionMeta::keystroke()),
                TestAction::Clicked => None,
            }
        }
    }

    impl ActionSummary for TestAction {}

    #[test]
    fn test_debounce_key_conversions() {
        let k1 = DebounceKey::new("keystroke");
        let k2 = DebounceKey::from("keystroke");
        let k3: DebounceKey = String::from("keystroke").into();

        assert_eq!(k1, k2);
        assert_eq!(k2, k3);
        assert_eq!(k1, DebounceKey::keystroke());
        assert_eq!(k1.to_string(), "keystroke");
    }

    #[test]
    fn test_meta_wire_shape() {
        let json = serde_json::to_value(ActionMeta::keystroke()).unwrap();
        assert_eq!(json, serde_json::json!({"debounce": "keystroke"}));

        let back: ActionMeta = serde_json::from_value(json).unwrap();
        assert_eq!(back.debounce.name(), "keystroke");
    }

    #[test]
    fn test_default_meta_and_summary() {
        assert_eq!(TestAction::Clicked.meta(), None);
        assert_eq!(
            TestAction::Typed("a".into()).meta(),
            Some(ActionMeta::keystroke())
        );
        assert_eq!(TestAction::Typed("a".into()).summary(), "Typed(\"a\")");
    }
}
