//! Centralized state store with reducer pattern

use std::marker::PhantomData;

use tokio::time::Instant;

use crate::Action;

/// A reducer function that handles actions and mutates state
///
/// Returns `true` if the state changed.
pub type Reducer<S, A> = fn(&mut S, A) -> bool;

/// Centralized state store with Redux-like reducer pattern
///
/// The store holds the form state and provides a single point
/// for state mutations through the `dispatch` method.
///
/// # Type Parameters
/// * `S` - The form state type
/// * `A` - The action type (must implement `Action`)
///
/// # Example
/// ```ignore
/// #[derive(Default)]
/// struct FormState {
///     pages: Option<i64>,
/// }
///
/// #[derive(Action, Clone, Debug)]
/// enum FormAction {
///     UpdatePages(Option<i64>),
/// }
///
/// fn reducer(state: &mut FormState, action: FormAction) -> bool {
///     match action {
///         FormAction::UpdatePages(pages) => {
///             let changed = state.pages != pages;
///             state.pages = pages;
///             changed
///         }
///     }
/// }
///
/// let mut store = Store::new(FormState::default(), reducer);
/// store.dispatch(FormAction::UpdatePages(Some(320)));
/// assert_eq!(store.state().pages, Some(320));
/// ```
pub struct Store<S, A: Action> {
    state: S,
    reducer: Reducer<S, A>,
    _marker: PhantomData<A>,
}

impl<S, A: Action> Store<S, A> {
    /// Create a new store with initial state and reducer
    pub fn new(state: S, reducer: Reducer<S, A>) -> Self {
        Self {
            state,
            reducer,
            _marker: PhantomData,
        }
    }

    /// Apply an action to the state
    ///
    /// Returns `true` if the state changed.
    pub fn dispatch(&mut self, action: A) -> bool {
        (self.reducer)(&mut self.state, action)
    }

    /// Get a reference to the current state
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Get a mutable reference to the state
    ///
    /// Use this sparingly - prefer dispatching actions for state changes.
    /// It exists for seeding state loaded from elsewhere.
    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }

    /// Consume the store, returning the state
    pub fn into_state(self) -> S {
        self.state
    }
}

/// Store with middleware support
///
/// Wraps a `Store` and lets middleware intercept actions before and after
/// the reducer sees them. Middleware may hold an action back (for example to
/// debounce it) and release it later through [`flush_due`](Self::flush_due).
pub struct StoreWithMiddleware<S, A: Action, M: Middleware<A>> {
    store: Store<S, A>,
    middleware: M,
}

impl<S, A: Action, M: Middleware<A>> StoreWithMiddleware<S, A, M> {
    /// Create a new store with middleware
    pub fn new(state: S, reducer: Reducer<S, A>, middleware: M) -> Self {
        Self {
            store: Store::new(state, reducer),
            middleware,
        }
    }

    /// Dispatch an action through middleware and store
    ///
    /// Returns `false` without touching the state when middleware holds the action.
    pub fn dispatch(&mut self, action: A) -> bool {
        if !self.middleware.before(&action) {
            return false;
        }
        self.apply(action)
    }

    /// Apply every action the middleware releases at `now`
    ///
    /// Returns `true` if any released action changed the state.
    pub fn flush_due(&mut self, now: Instant) -> bool {
        let released = self.middleware.take_due(now);
        self.apply_all(released)
    }

    /// Apply every action the middleware is still holding, regardless of deadlines
    pub fn flush_all(&mut self) -> bool {
        let released = self.middleware.take_all();
        self.apply_all(released)
    }

    /// Earliest instant at which held actions become due
    pub fn next_deadline(&self) -> Option<Instant> {
        self.middleware.next_deadline()
    }

    fn apply(&mut self, action: A) -> bool {
        let changed = self.store.dispatch(action.clone());
        self.middleware.after(&action, changed);
        changed
    }

    fn apply_all(&mut self, actions: Vec<A>) -> bool {
        let mut changed = false;
        for action in actions {
            changed |= self.apply(action);
        }
        changed
    }

    /// Get a reference to the current state
    pub fn state(&self) -> &S {
        self.store.state()
    }

    /// Get a mutable reference to the state
    pub fn state_mut(&mut self) -> &mut S {
        self.store.state_mut()
    }

    /// Get a reference to the middleware
    pub fn middleware(&self) -> &M {
        &self.middleware
    }

    /// Get a mutable reference to the middleware
    pub fn middleware_mut(&mut self) -> &mut M {
        &mut self.middleware
    }

    /// Consume the store, returning the state and the middleware
    pub fn into_parts(self) -> (S, M) {
        (self.store.into_state(), self.middleware)
    }
}

/// Middleware trait for intercepting actions
///
/// Implement this trait to add logging, debouncing, or other
/// cross-cutting concerns to your store.
pub trait Middleware<A: Action> {
    /// Called before the action reaches the reducer
    ///
    /// Return `false` to take the action out of the normal flow. The
    /// middleware is then responsible for handing it back through
    /// [`take_due`](Self::take_due) or [`take_all`](Self::take_all).
    fn before(&mut self, action: &A) -> bool;

    /// Called after the action is processed by the reducer
    fn after(&mut self, action: &A, state_changed: bool);

    /// Release held actions whose time has come
    fn take_due(&mut self, _now: Instant) -> Vec<A> {
        Vec::new()
    }

    /// Release every held action
    fn take_all(&mut self) -> Vec<A> {
        Vec::new()
    }

    /// Earliest instant at which a held action becomes due
    fn next_deadline(&self) -> Option<Instant> {
        None
    }
}

/// A no-op middleware that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMiddleware;

impl<A: Action> Middleware<A> for NoopMiddleware {
    fn before(&mut self, _action: &A) -> bool {
        true
    }
    fn after(&mut self, _action: &A, _state_changed: bool) {}
}

/// Middleware that logs actions (for debugging)
#[derive(Debug, Clone, Default)]
pub struct LoggingMiddleware {
    /// Whether to log before dispatch
    pub log_before: bool,
    /// Whether to log after dispatch
    pub log_after: bool,
}

impl LoggingMiddleware {
    /// Create a new logging middleware with default settings (log after only)
    pub fn new() -> Self {
        Self {
            log_before: false,
            log_after: true,
        }
    }

    /// Create a logging middleware that logs both before and after
    pub fn verbose() -> Self {
        Self {
            log_before: true,
            log_after: true,
        }
    }
}

impl<A: Action> Middleware<A> for LoggingMiddleware {
    fn before(&mut self, action: &A) -> bool {
        if self.log_before {
            let debounce = action.meta().map(|m| m.debounce);
            tracing::debug!(action = %action.name(), ?debounce, "Dispatching action");
        }
        true
    }

    fn after(&mut self, action: &A, state_changed: bool) {
        if self.log_after {
            tracing::debug!(
                action = %action.name(),
                state_changed = state_changed,
                "Action applied"
            );
        }
    }
}

/// Compose multiple middleware into a single middleware
///
/// `before` runs in insertion order and stops at the first middleware that
/// holds the action. Once released, the action continues through the `before`
/// of the middleware after the one that held it.
pub struct ComposedMiddleware<A: Action> {
    middlewares: Vec<Box<dyn Middleware<A> + Send>>,
}

impl<A: Action> std::fmt::Debug for ComposedMiddleware<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComposedMiddleware")
            .field("middlewares_count", &self.middlewares.len())
            .finish()
    }
}

impl<A: Action> Default for ComposedMiddleware<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Action> ComposedMiddleware<A> {
    /// Create a new composed middleware
    pub fn new() -> Self {
        Self {
            middlewares: Vec::new(),
        }
    }

    /// Add a middleware to the composition
    pub fn add<M: Middleware<A> + Send + 'static>(&mut self, middleware: M) {
        self.middlewares.push(Box::new(middleware));
    }

    /// Builder form of [`add`](Self::add)
    pub fn with<M: Middleware<A> + Send + 'static>(mut self, middleware: M) -> Self {
        self.add(middleware);
        self
    }

    pub fn len(&self) -> usize {
        self.middlewares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.middlewares.is_empty()
    }

    /// Run actions released by the middleware at `index` through the
    /// `before` of every middleware after it, keeping those none of them hold.
    fn pass_downstream(&mut self, index: usize, actions: Vec<A>) -> Vec<A> {
        let downstream = &mut self.middlewares[index + 1..];
        actions
            .into_iter()
            .filter(|action| downstream.iter_mut().all(|m| m.before(action)))
            .collect()
    }
}

impl<A: Action> Middleware<A> for ComposedMiddleware<A> {
    fn before(&mut self, action: &A) -> bool {
        self.middlewares.iter_mut().all(|m| m.before(action))
    }

    fn after(&mut self, action: &A, state_changed: bool) {
        // Call in reverse order for proper nesting
        for middleware in self.middlewares.iter_mut().rev() {
            middleware.after(action, state_changed);
        }
    }

    fn take_due(&mut self, now: Instant) -> Vec<A> {
        let mut released = Vec::new();
        for index in 0..self.middlewares.len() {
            let due = self.middlewares[index].take_due(now);
            released.extend(self.pass_downstream(index, due));
        }
        released
    }

    fn take_all(&mut self) -> Vec<A> {
        // Later middleware may hold what earlier ones release; visiting them
        // in order flushes those as well.
        let mut released = Vec::new();
        for index in 0..self.middlewares.len() {
            let held = self.middlewares[index].take_all();
            released.extend(self.pass_downstream(index, held));
        }
        released
    }

    fn next_deadline(&self) -> Option<Instant> {
        self.middlewares
            .iter()
            .filter_map(|m| m.next_deadline())
            .min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[derive(Default)]
    struct TestState {
        title: String,
        pages: i64,
    }

    #[derive(Clone, Debug)]
    enum TestAction {
        SetTitle(String),
        AddPage,
        NoOp,
    }

    impl Action for TestAction {
        fn name(&self) -> &'static str {
            match self {
                TestAction::SetTitle(_) => "SetTitle",
                TestAction::AddPage => "AddPage",
                TestAction::NoOp => "NoOp",
            }
        }
    }

    fn test_reducer(state: &mut TestState, action: TestAction) -> bool {
        match action {
            TestAction::SetTitle(title) => {
                let changed = state.title != title;
                state.title = title;
                changed
            }
            TestAction::AddPage => {
                state.pages += 1;
                true
            }
            TestAction::NoOp => false,
        }
    }

    #[test]
    fn test_store_dispatch() {
        let mut store = Store::new(TestState::default(), test_reducer);

        assert!(store.dispatch(TestAction::SetTitle("Dune".into())));
        assert_eq!(store.state().title, "Dune");

        assert!(!store.dispatch(TestAction::SetTitle("Dune".into())));

        assert!(store.dispatch(TestAction::AddPage));
        assert_eq!(store.state().pages, 1);
    }

    #[test]
    fn test_store_noop() {
        let mut store = Store::new(TestState::default(), test_reducer);

        assert!(!store.dispatch(TestAction::NoOp));
        assert_eq!(store.state().pages, 0);
    }

    #[test]
    fn test_store_state_mut() {
        let mut store = Store::new(TestState::default(), test_reducer);

        store.state_mut().pages = 100;
        assert_eq!(store.state().pages, 100);
        assert_eq!(store.into_state().pages, 100);
    }

    #[derive(Default)]
    struct CountingMiddleware {
        before_count: usize,
        after_count: usize,
    }

    impl<A: Action> Middleware<A> for CountingMiddleware {
        fn before(&mut self, _action: &A) -> bool {
            self.before_count += 1;
            true
        }

        fn after(&mut self, _action: &A, _state_changed: bool) {
            self.after_count += 1;
        }
    }

    #[test]
    fn test_store_with_middleware() {
        let mut store = StoreWithMiddleware::new(
            TestState::default(),
            test_reducer,
            CountingMiddleware::default(),
        );

        store.dispatch(TestAction::AddPage);
        store.dispatch(TestAction::AddPage);

        assert_eq!(store.middleware().before_count, 2);
        assert_eq!(store.middleware().after_count, 2);
        assert_eq!(store.state().pages, 2);
    }

    /// Holds every `SetTitle` until flushed, releasing it `delay` after it arrived.
    struct HoldTitles {
        held: Vec<(Instant, TestAction)>,
        delay: Duration,
    }

    impl Default for HoldTitles {
        fn default() -> Self {
            Self::with_delay(Duration::from_secs(1))
        }
    }

    impl HoldTitles {
        fn with_delay(delay: Duration) -> Self {
            Self {
                held: Vec::new(),
                delay,
            }
        }
    }

    impl Middleware<TestAction> for HoldTitles {
        fn before(&mut self, action: &TestAction) -> bool {
            if let TestAction::SetTitle(_) = action {
                self.held.push((Instant::now() + self.delay, action.clone()));
                return false;
            }
            true
        }

        fn after(&mut self, _action: &TestAction, _state_changed: bool) {}

        fn take_due(&mut self, now: Instant) -> Vec<TestAction> {
            let (due, rest): (Vec<_>, Vec<_>) =
                self.held.drain(..).partition(|(at, _)| *at <= now);
            self.held = rest;
            due.into_iter().map(|(_, a)| a).collect()
        }

        fn take_all(&mut self) -> Vec<TestAction> {
            self.held.drain(..).map(|(_, a)| a).collect()
        }

        fn next_deadline(&self) -> Option<Instant> {
            self.held.iter().map(|(at, _)| *at).min()
        }
    }

    #[test]
    fn test_held_action_skips_reducer_until_flushed() {
        let mut store =
            StoreWithMiddleware::new(TestState::default(), test_reducer, HoldTitles::default());

        assert!(!store.dispatch(TestAction::SetTitle("Emma".into())));
        assert_eq!(store.state().title, "");
        assert!(store.next_deadline().is_some());

        // Not due yet
        assert!(!store.flush_due(Instant::now()));
        assert_eq!(store.state().title, "");

        assert!(store.flush_due(Instant::now() + Duration::from_secs(2)));
        assert_eq!(store.state().title, "Emma");
        assert!(store.next_deadline().is_none());
    }

    #[test]
    fn test_flush_all_ignores_deadlines() {
        let mut store =
            StoreWithMiddleware::new(TestState::default(), test_reducer, HoldTitles::default());

        store.dispatch(TestAction::SetTitle("Persuasion".into()));
        assert!(store.flush_all());
        assert_eq!(store.state().title, "Persuasion");
    }

    #[test]
    fn test_composed_stops_at_holding_middleware() {
        let composed = ComposedMiddleware::new()
            .with(HoldTitles::default())
            .with(LoggingMiddleware::verbose());
        assert_eq!(composed.len(), 2);

        let mut store = StoreWithMiddleware::new(TestState::default(), test_reducer, composed);

        assert!(!store.dispatch(TestAction::SetTitle("Ulysses".into())));
        assert!(store.dispatch(TestAction::AddPage));

        let deadline = store.next_deadline().expect("title is held");
        assert!(store.flush_due(deadline));
        assert_eq!(store.state().title, "Ulysses");
        assert_eq!(store.state().pages, 1);
    }

    /// Counts `before` calls through a shared counter.
    struct CountBefore(Arc<AtomicUsize>);

    impl Middleware<TestAction> for CountBefore {
        fn before(&mut self, _action: &TestAction) -> bool {
            self.0.fetch_add(1, Ordering::SeqCst);
            true
        }

        fn after(&mut self, _action: &TestAction, _state_changed: bool) {}
    }

    #[test]
    fn test_released_action_reaches_later_before() {
        let seen = Arc::new(AtomicUsize::new(0));
        let composed = ComposedMiddleware::new()
            .with(HoldTitles::default())
            .with(CountBefore(Arc::clone(&seen)));
        let mut store = StoreWithMiddleware::new(TestState::default(), test_reducer, composed);

        store.dispatch(TestAction::SetTitle("Emma".into()));
        assert_eq!(seen.load(Ordering::SeqCst), 0);

        assert!(store.flush_all());
        assert_eq!(seen.load(Ordering::SeqCst), 1);
        assert_eq!(store.state().title, "Emma");
    }

    #[test]
    fn test_released_action_can_be_held_again() {
        let seen = Arc::new(AtomicUsize::new(0));
        let composed = ComposedMiddleware::new()
            .with(HoldTitles::default())
            .with(HoldTitles::with_delay(Duration::from_secs(60)))
            .with(CountBefore(Arc::clone(&seen)));
        let mut store = StoreWithMiddleware::new(TestState::default(), test_reducer, composed);

        store.dispatch(TestAction::SetTitle("Emma".into()));

        // The first holder lets go, the second takes it over with its own deadline
        assert!(!store.flush_due(Instant::now() + Duration::from_secs(2)));
        assert_eq!(store.state().title, "");
        assert_eq!(seen.load(Ordering::SeqCst), 0);
        assert!(store.next_deadline().is_some());

        assert!(store.flush_all());
        assert_eq!(seen.load(Ordering::SeqCst), 1);
        assert_eq!(store.state().title, "Emma");
        assert!(store.next_deadline().is_none());
    }
}
