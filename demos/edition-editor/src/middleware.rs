use edition_section::EditionAction;
use form_dispatch::{ActionLoggerMiddleware, DebounceMiddleware, DispatchConfig, Middleware};
use tokio::time::Instant;

/// Debouncing in front of the reducer, action history behind it.
///
/// Held keystrokes reach the logger only once released, so each coalesced
/// burst shows up as a single history entry.
pub struct EditorMiddleware {
    pub debounce: DebounceMiddleware<EditionAction>,
    pub logger: ActionLoggerMiddleware,
}

impl EditorMiddleware {
    pub fn from_config(config: &DispatchConfig) -> Self {
        Self {
            debounce: DebounceMiddleware::new(config.debounce.clone()),
            logger: ActionLoggerMiddleware::with_log(config.log.log_config()),
        }
    }
}

impl Middleware<EditionAction> for EditorMiddleware {
    fn before(&mut self, action: &EditionAction) -> bool {
        self.debounce.before(action)
    }

    fn after(&mut self, action: &EditionAction, state_changed: bool) {
        self.logger.after(action, state_changed);
    }

    fn take_due(&mut self, now: Instant) -> Vec<EditionAction> {
        self.debounce.take_due(now)
    }

    fn take_all(&mut self) -> Vec<EditionAction> {
        self.debounce.take_all()
    }

    fn next_deadline(&self) -> Option<Instant> {
        self.debounce.next_deadline()
    }
}
