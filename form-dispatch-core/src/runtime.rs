//! Async dispatch loop for stores with time-based middleware.
//!
//! The runtime receives actions over an unbounded channel, feeds them
//! through a [`StoreWithMiddleware`], and wakes up whenever the middleware
//! has held actions coming due (for example debounced keystrokes).

use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::store::{Middleware, Reducer, StoreWithMiddleware};
use crate::Action;

/// Runtime helper driving a store from an action channel.
///
/// # Example
///
/// ```ignore
/// let runtime = DispatchRuntime::new(FormState::default(), reducer, DebounceMiddleware::default());
/// let tx = runtime.action_tx();
///
/// let handle = tokio::spawn(runtime.run(CancellationToken::new(), |_state| {}));
///
/// tx.send(FormAction::UpdatePages(Some(320)))?;
/// drop(tx);
///
/// let store = handle.await?;
/// ```
pub struct DispatchRuntime<S, A: Action, M: Middleware<A>> {
    store: StoreWithMiddleware<S, A, M>,
    action_tx: mpsc::UnboundedSender<A>,
    action_rx: mpsc::UnboundedReceiver<A>,
}

impl<S, A: Action, M: Middleware<A>> DispatchRuntime<S, A, M> {
    /// Create a runtime from state, reducer and middleware.
    pub fn new(state: S, reducer: Reducer<S, A>, middleware: M) -> Self {
        Self::from_store(StoreWithMiddleware::new(state, reducer, middleware))
    }

    /// Create a runtime from an existing store.
    pub fn from_store(store: StoreWithMiddleware<S, A, M>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        Self {
            store,
            action_tx,
            action_rx,
        }
    }

    /// Send an action into the runtime queue.
    pub fn enqueue(&self, action: A) {
        let _ = self.action_tx.send(action);
    }

    /// Clone the action sender.
    ///
    /// The loop in [`run`](Self::run) ends once every sender has been dropped.
    pub fn action_tx(&self) -> mpsc::UnboundedSender<A> {
        self.action_tx.clone()
    }

    /// Access the current state.
    pub fn state(&self) -> &S {
        self.store.state()
    }

    /// Run the dispatch loop.
    ///
    /// Actions are applied in the order they arrive, except for those the
    /// middleware holds back, which are applied once they come due. The loop
    /// stops when `cancel` fires or every sender is gone. Actions still queued
    /// or held at that point are applied before the store is returned.
    ///
    /// `on_change` runs after every dispatch or release that changed the state.
    pub async fn run<F>(self, cancel: CancellationToken, mut on_change: F) -> StoreWithMiddleware<S, A, M>
    where
        F: FnMut(&S),
    {
        let Self {
            mut store,
            action_tx,
            mut action_rx,
        } = self;
        // Only external senders keep the loop alive
        drop(action_tx);

        loop {
            let deadline = store.next_deadline();
            let wake_at = deadline.unwrap_or_else(Instant::now);

            tokio::select! {
                biased;

                _ = cancel.cancelled() => {
                    tracing::debug!("Dispatch runtime cancelled");
                    break;
                }

                maybe_action = action_rx.recv() => {
                    let Some(action) = maybe_action else {
                        tracing::debug!("All action senders dropped");
                        break;
                    };
                    if store.dispatch(action) {
                        on_change(store.state());
                    }
                }

                _ = tokio::time::sleep_until(wake_at), if deadline.is_some() => {
                    if store.flush_due(Instant::now()) {
                        on_change(store.state());
                    }
                }
            }
        }

        let mut changed = false;
        while let Ok(action) = action_rx.try_recv() {
            changed |= store.dispatch(action);
        }
        changed |= store.flush_all();
        if changed {
            on_change(store.state());
        }

        store
    }
}
